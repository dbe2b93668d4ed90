//! Command-line arguments for the domap subcommands

use clap::Args;
use std::path::PathBuf;

/// Arguments for `domap cull` (coverage-based hit culling)
#[derive(Args, Debug)]
pub struct CullArgs {
    /// Structural hit table (TSV: hit_id, template_id, evalue, query_range, template_range)
    #[arg(long)]
    pub hits: PathBuf,
    /// Length of the query chain in residues
    #[arg(short, long)]
    pub query_length: u32,
    /// Per-residue saturation cap
    #[arg(long, default_value_t = 100)]
    pub coverage_cap: u32,
    /// Minimum unsaturated residues a hit needs to survive
    #[arg(long, default_value_t = 10)]
    pub min_good_residues: usize,
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

/// Arguments for `domap decompose` (iterative per-template decomposition)
#[derive(Args, Debug)]
pub struct DecomposeArgs {
    /// Culled structural hit table naming the candidate templates
    #[arg(long)]
    pub hits: PathBuf,
    /// Length of the query chain in residues
    #[arg(short, long)]
    pub query_length: u32,
    /// External structure-alignment command, run as `<cmd> <template_id>`
    /// with the residue pool on stdin
    #[arg(long)]
    pub aligner_cmd: PathBuf,
    /// ECOD template table (TSV: template_id, tgroup, length)
    #[arg(long)]
    pub templates: PathBuf,
    /// Minimum aligned residues per recorded sub-alignment
    #[arg(long, default_value_t = 20)]
    pub min_aligned: usize,
    /// Mask unexplained gaps up to this many residues with each match
    #[arg(long, default_value_t = 5)]
    pub gap_tolerance: u32,
    /// Worker threads for per-template decomposition (0 = all cores)
    #[arg(short = 'n', long, default_value_t = 0)]
    pub num_threads: usize,
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

/// Arguments for `domap map` (evidence reconciliation)
#[derive(Args, Debug)]
pub struct MapArgs {
    /// Called domain table (TSV: domain_id, range, quality)
    #[arg(long)]
    pub domains: PathBuf,
    /// Sequence-profile hit table (TSV: hit_id, template_id, probability, evalue, query_range, template_range)
    #[arg(long)]
    pub seq_hits: PathBuf,
    /// Structural hit table (TSV: hit_id, template_id, evalue, query_range, template_range)
    #[arg(long)]
    pub struct_hits: PathBuf,
    /// ECOD template table (TSV: template_id, tgroup, length)
    #[arg(long)]
    pub templates: PathBuf,
    /// Directory of per-template residue maps (`<template_id>.map`)
    #[arg(long)]
    pub map_dir: PathBuf,
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}
