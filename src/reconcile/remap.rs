//! Cross-coordinate remapping of domain ranges into template numbering
//!
//! A hit's query range and template range are parallel listings of the same
//! alignment, so zipping their ordered positions recovers the hit's own
//! query↔template correspondence without re-reading the alignment. Domain
//! residues go query position → template sequence position (via that zip) →
//! native template numbering (via the residue map). Positions absent from
//! the map are alignment gaps and are skipped.

use crate::refdata::ResidueMap;
use crate::residues::ResidueSet;

/// Remap the part of `domain` covered by a hit into the hit template's
/// native residue numbering. Returns `None` when nothing maps (no shared
/// residues, or an empty residue map).
pub fn remap_domain_range(
    domain: &ResidueSet,
    hit_query_range: &ResidueSet,
    hit_template_range: &ResidueSet,
    map: &ResidueMap,
) -> Option<String> {
    let mut mapped = ResidueSet::new();
    // Ranges of unequal length can only come from a truncated hit record;
    // the zip silently stops at the shorter side.
    for (q, t) in hit_query_range.iter().zip(hit_template_range.iter()) {
        if !domain.contains(q) {
            continue;
        }
        if let Some(&native) = map.get(&t) {
            mapped.insert(native);
        }
    }
    if mapped.is_empty() {
        None
    } else {
        Some(mapped.to_range_string())
    }
}
