//! Iterative structural decomposition against single templates
//!
//! One template can match a query more than once (tandem repeats of the same
//! fold). Decomposition re-aligns the query against the template repeatedly,
//! masking out each match, so every repeat surfaces as its own candidate.

pub mod aligner;
pub mod iterative;

pub use aligner::{AlignedPair, Aligner, Alignment, CommandAligner};
pub use iterative::{decompose, DecomposeConfig, DomainCandidate, TemplateRef};
