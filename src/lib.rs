pub mod common;
pub mod diagnostics;
pub mod residues;

pub mod filter;
pub mod decompose;
pub mod reconcile;

pub mod input;
pub mod refdata;
pub mod report;

pub mod pipeline;
