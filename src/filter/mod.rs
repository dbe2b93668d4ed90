//! Redundancy filtering of structural hit lists
//!
//! A structure search against the full ECOD library returns thousands of
//! hits for a well-populated fold, most of them stacked on the same region
//! of the query. Filtering keeps the list diverse enough for downstream
//! decomposition without losing any region's best representatives.

pub mod coverage;
