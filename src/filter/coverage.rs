//! Coverage-based culling of structural hits
//!
//! Greedy, order-sensitive diversity filter: hits are visited best e-value
//! first, each hit charges one count to every query residue it covers, and a
//! hit survives only if enough of its own residues are still below the
//! per-residue coverage cap at the moment it is visited. Later hits over a
//! saturated region therefore face a strictly harder bar. This is not a
//! global optimum; determinism comes from the stated sort and tie-break.

use crate::common::{evalue_cmp, StructHit};

/// Tuning knobs for the coverage cull. The defaults are the values the
/// production pipeline runs with.
#[derive(Debug, Clone, Copy)]
pub struct CoverageConfig {
    /// A residue is "saturated" once more than this many hits cover it.
    pub coverage_cap: u32,
    /// Minimum number of unsaturated residues a hit must keep to survive.
    pub min_good_residues: usize,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            coverage_cap: 100,
            min_good_residues: 10,
        }
    }
}

/// Cull `hits` down to a diverse subset under a per-residue coverage budget.
///
/// Hits are processed in ascending e-value order; equal e-values keep their
/// input order (stable sort), so the earlier-ranked hit spends coverage
/// budget first. Each hit increments the coverage count of every one of its
/// query residues inside `[1, query_length]` (out-of-range positions are
/// ignored), then counts how many of its own residues sit at or below
/// `coverage_cap` *after* its own increment. Hits with at least
/// `min_good_residues` such residues are kept. Counts are never decremented,
/// and hits are never mutated. Empty input yields empty output.
pub fn cull_by_coverage(
    hits: Vec<StructHit>,
    query_length: u32,
    cfg: &CoverageConfig,
) -> Vec<StructHit> {
    if hits.is_empty() {
        return hits;
    }

    let mut sorted = hits;
    // Stable: equal e-values preserve raw search order.
    sorted.sort_by(|a, b| evalue_cmp(a.evalue, b.evalue));

    // Lifetime of the table is exactly this pass.
    let mut coverage: Vec<u32> = vec![0; query_length as usize];

    let mut kept: Vec<StructHit> = Vec::new();
    for hit in sorted {
        for pos in hit.query_range.iter() {
            if pos >= 1 && pos <= query_length {
                coverage[(pos - 1) as usize] += 1;
            }
        }
        // The check runs after this hit's own increment, so a hit can
        // self-qualify right at the cap boundary.
        let good = hit
            .query_range
            .iter()
            .filter(|&pos| {
                pos >= 1 && pos <= query_length && coverage[(pos - 1) as usize] <= cfg.coverage_cap
            })
            .count();
        if good >= cfg.min_good_residues {
            kept.push(hit);
        }
    }
    kept
}
