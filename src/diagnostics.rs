//! Diagnostic counters for the assignment pipeline
//!
//! Tracks where hits are lost between the raw search output and the final
//! domain mappings. Printing is gated on the DOMAP_DIAGNOSTICS environment
//! variable so normal runs stay quiet.

use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

/// Check if diagnostics are enabled via environment variable
pub fn diagnostics_enabled() -> bool {
    std::env::var("DOMAP_DIAGNOSTICS")
        .map(|v| v == "1" || v.to_lowercase() == "true")
        .unwrap_or(false)
}

#[derive(Default)]
pub struct Diagnostics {
    // Input stage
    pub input_lines_skipped: AtomicUsize,
    // Coverage cull stage
    pub hits_before_cull: AtomicUsize,
    pub hits_after_cull: AtomicUsize,
    // Decomposition stage
    pub aligner_calls: AtomicUsize,
    pub aligner_failures: AtomicUsize,
    pub candidates_recorded: AtomicUsize,
    // Reconciliation stage
    pub domains_with_seq_evidence: AtomicUsize,
    pub domains_with_struct_evidence: AtomicUsize,
    pub domains_without_evidence: AtomicUsize,
}

impl Diagnostics {
    pub fn print_summary(&self) {
        if !diagnostics_enabled() {
            return;
        }
        let get = |c: &AtomicUsize| c.load(AtomicOrdering::Relaxed);
        eprintln!("=== domap diagnostics ===");
        eprintln!("input lines skipped:        {}", get(&self.input_lines_skipped));
        eprintln!("hits before coverage cull:  {}", get(&self.hits_before_cull));
        eprintln!("hits after coverage cull:   {}", get(&self.hits_after_cull));
        eprintln!("aligner calls:              {}", get(&self.aligner_calls));
        eprintln!("aligner failures:           {}", get(&self.aligner_failures));
        eprintln!("candidates recorded:        {}", get(&self.candidates_recorded));
        eprintln!(
            "domains with seq evidence:  {}",
            get(&self.domains_with_seq_evidence)
        );
        eprintln!(
            "domains with struct evidence: {}",
            get(&self.domains_with_struct_evidence)
        );
        eprintln!(
            "domains without evidence:   {}",
            get(&self.domains_without_evidence)
        );
    }
}
