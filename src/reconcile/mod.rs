//! Reconciliation of called domains with search evidence
//!
//! For every called domain, find the sequence-profile hits and structural
//! hits that genuinely sit on it (strict overlap rule), pick the best of
//! each under an explicit total order, and remap the domain's residues into
//! each winning template's native numbering. Domains backed by neither
//! evidence type still produce a record, with `na` template ranges.

pub mod overlap;
pub mod remap;

use crate::common::{
    seq_hit_cmp, struct_hit_cmp, DomainMapping, DomainRange, SeqHit, StructHit, NA,
};
use crate::diagnostics::Diagnostics;
use crate::refdata::{ResidueMapProvider, TemplateTable};
use std::sync::atomic::Ordering as AtomicOrdering;

pub use overlap::overlaps_strict;
pub use remap::remap_domain_range;

/// Reconcile `domains` against both evidence lists, one `DomainMapping` per
/// domain, in input domain order.
///
/// The best overlapping sequence hit supplies `template_id`, `tgroup` and
/// `probability`; with no sequence evidence those fall back to the best
/// overlapping structural hit (probability stays `na`); with neither, all
/// three are `na`. Tgroups come from the ECOD template table, `na` when the
/// template is not listed. Missing residue maps degrade to `na` ranges.
pub fn reconcile(
    domains: &[DomainRange],
    seq_hits: &[SeqHit],
    struct_hits: &[StructHit],
    maps: &dyn ResidueMapProvider,
    templates: &TemplateTable,
    diag: &Diagnostics,
) -> Vec<DomainMapping> {
    let mut mappings = Vec::with_capacity(domains.len());
    for domain in domains {
        let best_seq = seq_hits
            .iter()
            .filter(|h| overlaps_strict(&domain.query_residues, &h.query_range))
            .min_by(|a, b| seq_hit_cmp(a, b));
        let best_struct = struct_hits
            .iter()
            .filter(|h| overlaps_strict(&domain.query_residues, &h.query_range))
            .min_by(|a, b| struct_hit_cmp(a, b));

        match (best_seq.is_some(), best_struct.is_some()) {
            (true, _) => {
                diag.domains_with_seq_evidence
                    .fetch_add(1, AtomicOrdering::Relaxed);
                if best_struct.is_some() {
                    diag.domains_with_struct_evidence
                        .fetch_add(1, AtomicOrdering::Relaxed);
                }
            }
            (false, true) => {
                diag.domains_with_struct_evidence
                    .fetch_add(1, AtomicOrdering::Relaxed);
            }
            (false, false) => {
                diag.domains_without_evidence
                    .fetch_add(1, AtomicOrdering::Relaxed);
            }
        }

        let hh_template_range = best_seq
            .and_then(|h| {
                remap_domain_range(
                    &domain.query_residues,
                    &h.query_range,
                    &h.template_range,
                    &maps.residue_map(&h.template_id),
                )
            })
            .unwrap_or_else(|| NA.to_string());
        let dali_template_range = best_struct
            .and_then(|h| {
                remap_domain_range(
                    &domain.query_residues,
                    &h.query_range,
                    &h.template_range,
                    &maps.residue_map(&h.template_id),
                )
            })
            .unwrap_or_else(|| NA.to_string());

        let (template_id, probability) = match (best_seq, best_struct) {
            (Some(h), _) => (h.template_id.clone(), format!("{:.1}", h.probability)),
            (None, Some(h)) => (h.template_id.clone(), NA.to_string()),
            (None, None) => (NA.to_string(), NA.to_string()),
        };
        let tgroup = if template_id == NA {
            NA.to_string()
        } else {
            templates
                .tgroup(&template_id)
                .unwrap_or(NA)
                .to_string()
        };

        // One mapping per supplied domain, same id, same order; the record
        // can only reference domains the upstream caller handed in.
        mappings.push(DomainMapping {
            domain_id: domain.domain_id.clone(),
            domain_range: domain.query_residues.to_range_string(),
            template_id,
            tgroup,
            probability,
            quality: domain.quality.clone(),
            hh_template_range,
            dali_template_range,
        });
    }
    mappings
}
