use crate::residues::ResidueSet;
use anyhow::Result;
use std::cmp::Ordering;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Sentinel emitted wherever a field has no value (no evidence of that type,
/// no residue map, no mapped positions). Downstream consumers key on it.
pub const NA: &str = "na";

/// One hit from the structure-alignment search, for one query chain.
#[derive(Debug, Clone)]
pub struct StructHit {
    pub hit_id: String,
    pub template_id: String,
    pub evalue: f64,
    /// Query residues covered by the hit's alignment, 1-based.
    pub query_range: ResidueSet,
    /// Template sequence positions paired with `query_range`, in order.
    pub template_range: ResidueSet,
    /// Rank in the raw search output. Input order doubles as the tie-break
    /// for equal e-values in the coverage cull (stable sort).
    pub raw_rank: u32,
}

/// One hit from the sequence-profile search.
#[derive(Debug, Clone)]
pub struct SeqHit {
    pub hit_id: String,
    pub template_id: String,
    /// Match probability reported by the profile search (0-100).
    pub probability: f64,
    pub evalue: f64,
    pub query_range: ResidueSet,
    pub template_range: ResidueSet,
}

/// A called domain on the query chain, supplied by the upstream domain
/// caller. Read-only input to reconciliation.
#[derive(Debug, Clone)]
pub struct DomainRange {
    pub domain_id: String,
    pub query_residues: ResidueSet,
    /// Upstream confidence label, carried through to the final record.
    pub quality: String,
}

/// Final per-domain record: the domain, its best corroborating evidence, and
/// the domain's range remapped into each template's native numbering.
#[derive(Debug, Clone)]
pub struct DomainMapping {
    pub domain_id: String,
    pub domain_range: String,
    pub template_id: String,
    pub tgroup: String,
    pub probability: String,
    pub quality: String,
    pub hh_template_range: String,
    pub dali_template_range: String,
}

/// Compare two e-values, treating both as equal when they underflow toward
/// zero, so that sorts stay stable across platforms.
#[inline]
pub fn evalue_cmp(a: f64, b: f64) -> Ordering {
    const EPSILON: f64 = 1.0e-180;
    if a < EPSILON && b < EPSILON {
        Ordering::Equal
    } else if a < b {
        Ordering::Less
    } else if a > b {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

/// Total order on sequence hits competing for the same domain.
///
/// Order: probability DESC → e-value ASC → hit_id ASC. The lexicographic
/// tail makes the winner deterministic when two hits score identically.
pub fn seq_hit_cmp(a: &SeqHit, b: &SeqHit) -> Ordering {
    match b
        .probability
        .partial_cmp(&a.probability)
        .unwrap_or(Ordering::Equal)
    {
        Ordering::Equal => {}
        ord => return ord,
    }
    match evalue_cmp(a.evalue, b.evalue) {
        Ordering::Equal => {}
        ord => return ord,
    }
    a.hit_id.cmp(&b.hit_id)
}

/// Total order on structural hits competing for the same domain.
///
/// Order: aligned-residue count DESC → e-value ASC → hit_id ASC.
pub fn struct_hit_cmp(a: &StructHit, b: &StructHit) -> Ordering {
    match b.query_range.len().cmp(&a.query_range.len()) {
        Ordering::Equal => {}
        ord => return ord,
    }
    match evalue_cmp(a.evalue, b.evalue) {
        Ordering::Equal => {}
        ord => return ord,
    }
    a.hit_id.cmp(&b.hit_id)
}

/// Open `out_path` for buffered writing, or stdout when absent.
pub fn open_output(out_path: Option<&PathBuf>) -> Result<Box<dyn Write>> {
    let writer: Box<dyn Write> = if let Some(path) = out_path {
        Box::new(BufWriter::new(File::create(path)?))
    } else {
        Box::new(BufWriter::new(io::stdout().lock()))
    };
    Ok(writer)
}

/// Write structural hits back out in the same TSV layout they are read from.
pub fn write_struct_hits(hits: &[StructHit], out_path: Option<&PathBuf>) -> Result<()> {
    let mut writer = open_output(out_path)?;
    for hit in hits {
        writeln!(
            writer,
            "{}\t{}\t{:.3e}\t{}\t{}",
            hit.hit_id,
            hit.template_id,
            hit.evalue,
            hit.query_range.to_range_string(),
            hit.template_range.to_range_string()
        )?;
    }
    writer.flush()?;
    Ok(())
}
