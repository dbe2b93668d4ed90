//! Strict geometric overlap between a domain and a hit range
//!
//! The rule that decides whether a piece of search evidence "belongs" to a
//! called domain. Both tests must pass: the shared region must be at least a
//! third of the smaller set, and at least half of one side must be shared.
//! A small set engulfed by a much larger one therefore only qualifies
//! through the half-of-the-smaller branch.

use crate::residues::ResidueSet;

/// True iff `a` and `b` overlap under the strict rule:
/// `shared/min(|a|,|b|) >= 1/3` and (`shared/|a| >= 1/2` or
/// `shared/|b| >= 1/2`). Empty sets never overlap.
pub fn overlaps_strict(a: &ResidueSet, b: &ResidueSet) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    let shared = a.intersection_len(b) as f64;
    let len_a = a.len() as f64;
    let len_b = b.len() as f64;
    let min_len = len_a.min(len_b);

    shared / min_len >= 1.0 / 3.0 && (shared / len_a >= 0.5 || shared / len_b >= 0.5)
}
