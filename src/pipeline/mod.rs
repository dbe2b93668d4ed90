//! Per-protein pipeline orchestration
//!
//! Each subcommand handles one query chain. Runs for different chains are
//! fully independent, so batch callers fan out at the process level. Inside
//! one run, only the per-template decompositions are parallel; every other
//! stage is a single pass.

pub mod args;

use crate::common::write_struct_hits;
use crate::decompose::{decompose, CommandAligner, DecomposeConfig, DomainCandidate, TemplateRef};
use crate::diagnostics::Diagnostics;
use crate::filter::coverage::{cull_by_coverage, CoverageConfig};
use crate::input;
use crate::reconcile::reconcile;
use crate::refdata::{FileResidueMaps, TemplateTable};
use crate::report;
use crate::residues::ResidueSet;
use anyhow::{Context, Result};
use args::{CullArgs, DecomposeArgs, MapArgs};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::sync::atomic::Ordering as AtomicOrdering;

pub fn run_cull(args: CullArgs) -> Result<()> {
    let diag = Diagnostics::default();
    let hits = input::read_struct_hits(&args.hits, &diag)?;
    diag.hits_before_cull.store(hits.len(), AtomicOrdering::Relaxed);

    let cfg = CoverageConfig {
        coverage_cap: args.coverage_cap,
        min_good_residues: args.min_good_residues,
    };
    let kept = cull_by_coverage(hits, args.query_length, &cfg);
    diag.hits_after_cull.store(kept.len(), AtomicOrdering::Relaxed);

    write_struct_hits(&kept, args.out.as_ref())?;
    diag.print_summary();
    Ok(())
}

pub fn run_decompose(args: DecomposeArgs) -> Result<()> {
    let diag = Diagnostics::default();
    let hits = input::read_struct_hits(&args.hits, &diag)?;
    let templates = TemplateTable::load(&args.templates)?;

    // Unique surviving templates, first-hit order.
    let mut template_refs: Vec<TemplateRef> = Vec::new();
    for hit in &hits {
        if template_refs.iter().any(|t| t.id == hit.template_id) {
            continue;
        }
        match templates.get(&hit.template_id) {
            Some(info) => template_refs.push(TemplateRef {
                id: hit.template_id.clone(),
                length: info.length,
            }),
            None => {
                eprintln!(
                    "warning: template {} not in template table, skipping",
                    hit.template_id
                );
            }
        }
    }

    let num_threads = if args.num_threads == 0 {
        num_cpus::get()
    } else {
        args.num_threads
    };
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()
        .context("failed to build thread pool")?;

    let bar = ProgressBar::new(template_refs.len() as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40.cyan/blue} {pos}/{len} templates {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let aligner = CommandAligner::new(args.aligner_cmd.clone());
    let cfg = DecomposeConfig {
        min_aligned: args.min_aligned,
        gap_tolerance: args.gap_tolerance,
    };
    let query = ResidueSet::from_span(1, args.query_length);

    // Each template run owns its pool clone; nothing mutable is shared, so
    // the fan-out is safe and the collected order matches template order.
    let per_template: Vec<Vec<DomainCandidate>> = template_refs
        .par_iter()
        .map(|template| {
            let candidates = decompose(&query, args.query_length, template, &aligner, &cfg, &diag);
            bar.inc(1);
            candidates
        })
        .collect();
    bar.finish_and_clear();

    let candidates: Vec<DomainCandidate> = per_template.into_iter().flatten().collect();
    report::write_candidates(&candidates, args.out.as_ref())?;
    diag.print_summary();
    Ok(())
}

pub fn run_map(args: MapArgs) -> Result<()> {
    let diag = Diagnostics::default();
    let domains = input::read_domains(&args.domains, &diag)?;
    let seq_hits = input::read_seq_hits(&args.seq_hits, &diag)?;
    let struct_hits = input::read_struct_hits(&args.struct_hits, &diag)?;
    let templates = TemplateTable::load(&args.templates)?;
    let maps = FileResidueMaps::new(args.map_dir.clone());

    let mappings = reconcile(&domains, &seq_hits, &struct_hits, &maps, &templates, &diag);
    report::write_mappings(&mappings, args.out.as_ref())?;
    diag.print_summary();
    Ok(())
}
