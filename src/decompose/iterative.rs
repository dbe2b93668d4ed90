//! Iterative align-and-mask decomposition for one (query, template) pair
//!
//! Each iteration aligns the remaining residue pool against the template,
//! records the match as a domain candidate, masks the matched (gap-expanded)
//! residues out of the pool, and goes again. The pool only ever shrinks, so
//! the loop terminates once the remainder drops below the minimum alignable
//! size. Worst case is O(query_length / min_aligned) aligner calls.

use crate::decompose::aligner::{AlignedPair, Aligner};
use crate::diagnostics::Diagnostics;
use crate::residues::ResidueSet;

/// Tuning knobs for one decomposition run.
#[derive(Debug, Clone, Copy)]
pub struct DecomposeConfig {
    /// Minimum aligned pairs for an alignment to count as a candidate, and
    /// minimum pool size worth re-aligning.
    pub min_aligned: usize,
    /// Unexplained gaps of at most this many residues between matched
    /// residues are masked along with the match.
    pub gap_tolerance: u32,
}

impl Default for DecomposeConfig {
    fn default() -> Self {
        Self {
            min_aligned: 20,
            gap_tolerance: 5,
        }
    }
}

/// The template being decomposed against.
#[derive(Debug, Clone)]
pub struct TemplateRef {
    pub id: String,
    pub length: u32,
}

/// One sub-alignment extracted by the decomposer. Immutable once recorded.
/// `pairs` are in absolute query numbering (already translated out of the
/// pool's compacted indexing).
#[derive(Debug, Clone)]
pub struct DomainCandidate {
    /// `"{template_id}_{iteration}"`, iteration numbering from 1.
    pub hit_name: String,
    pub template_id: String,
    pub score: f64,
    pub n_aligned: usize,
    pub query_length: u32,
    pub template_length: u32,
    pub pairs: Vec<AlignedPair>,
}

/// Decompose `query_residues` against one template, returning every
/// sub-alignment found.
///
/// Each successful iteration strictly shrinks the pool. An aligner error or
/// a no-significant-alignment result terminates the run with the candidates
/// recorded so far; partial results are never discarded. Each template run
/// owns its pool; runs for different templates start from the full set and
/// share nothing.
pub fn decompose(
    query_residues: &ResidueSet,
    query_length: u32,
    template: &TemplateRef,
    aligner: &dyn Aligner,
    cfg: &DecomposeConfig,
    diag: &Diagnostics,
) -> Vec<DomainCandidate> {
    let mut pool = query_residues.clone();
    let mut candidates: Vec<DomainCandidate> = Vec::new();
    let mut iteration: u32 = 0;

    while pool.len() >= cfg.min_aligned {
        diag.aligner_calls.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        let alignment = match aligner.align(&pool, &template.id) {
            Ok(Some(a)) => a,
            Ok(None) => break,
            Err(err) => {
                diag.aligner_failures
                    .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
                eprintln!(
                    "warning: aligner failed on template {} (iteration {}): {:#}",
                    template.id,
                    iteration + 1,
                    err
                );
                break;
            }
        };
        if alignment.pairs.len() < cfg.min_aligned {
            break;
        }

        // Pairs come back in the pool's compacted 1-based indexing; map them
        // onto absolute residue ids via the pool's ordered listing. An index
        // outside the pool means the external tool violated the protocol;
        // that terminates this template run like any other aligner failure,
        // keeping the candidates already recorded.
        let listing = pool.ordered();
        if let Some(bad) = alignment
            .pairs
            .iter()
            .find(|p| p.query_pos < 1 || p.query_pos as usize > listing.len())
        {
            diag.aligner_failures
                .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            eprintln!(
                "warning: aligner returned pool index {} outside pool of {} residues on template {}",
                bad.query_pos,
                listing.len(),
                template.id
            );
            break;
        }
        iteration += 1;

        let mut absolute_pairs: Vec<AlignedPair> = Vec::with_capacity(alignment.pairs.len());
        let mut touched = ResidueSet::new();
        for pair in &alignment.pairs {
            let absolute = listing[pair.query_pos as usize - 1];
            absolute_pairs.push(AlignedPair {
                query_pos: absolute,
                template_pos: pair.template_pos,
            });
            touched.insert(absolute);
        }

        candidates.push(DomainCandidate {
            hit_name: format!("{}_{}", template.id, iteration),
            template_id: template.id.clone(),
            score: alignment.score,
            n_aligned: absolute_pairs.len(),
            query_length,
            template_length: template.length,
            pairs: absolute_pairs,
        });
        diag.candidates_recorded
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed);

        // Mask the match plus any tiny unexplained gaps inside it, so the
        // next iteration does not chase fragmented leftovers of this unit.
        let explained = touched.expand_gaps(cfg.gap_tolerance);
        pool.subtract(&explained);
    }

    candidates
}
