//! Final report writer
//!
//! One row per domain mapping, tab-separated, fields in the fixed order the
//! downstream consumer expects:
//! `domain  domain_range  template_id  tgroup  probability  quality
//!  hh_template_range  dali_template_range`.

use crate::common::{open_output, DomainMapping};
use crate::decompose::DomainCandidate;
use anyhow::Result;
use std::io::Write;
use std::path::PathBuf;

pub fn write_mappings(mappings: &[DomainMapping], out_path: Option<&PathBuf>) -> Result<()> {
    let mut writer = open_output(out_path)?;
    for m in mappings {
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            m.domain_id,
            m.domain_range,
            m.template_id,
            m.tgroup,
            m.probability,
            m.quality,
            m.hh_template_range,
            m.dali_template_range
        )?;
    }
    writer.flush()?;
    Ok(())
}

/// One row per sub-alignment found by decomposition:
/// `hit_name  template_id  score  n_aligned  query_length  template_length  query_range`.
pub fn write_candidates(candidates: &[DomainCandidate], out_path: Option<&PathBuf>) -> Result<()> {
    let mut writer = open_output(out_path)?;
    for c in candidates {
        let range: crate::residues::ResidueSet = c.pairs.iter().map(|p| p.query_pos).collect();
        writeln!(
            writer,
            "{}\t{}\t{:.1}\t{}\t{}\t{}\t{}",
            c.hit_name,
            c.template_id,
            c.score,
            c.n_aligned,
            c.query_length,
            c.template_length,
            range.to_range_string()
        )?;
    }
    writer.flush()?;
    Ok(())
}
