//! TSV readers for hit tables and domain tables
//!
//! All upstream tools are captured into simple tab-separated summaries
//! before domap runs; these readers are the malformed-record boundary.
//! Lines starting with `#` are comments; lines that fail to parse are
//! counted and skipped with a warning, never fatal. Empty files are valid
//! and yield empty lists.

use crate::common::{DomainRange, SeqHit, StructHit};
use crate::diagnostics::Diagnostics;
use crate::residues::ResidueSet;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use std::sync::atomic::Ordering as AtomicOrdering;

/// `hit_id  template_id  evalue  query_range  template_range`
pub fn read_struct_hits(path: &Path, diag: &Diagnostics) -> Result<Vec<StructHit>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read structural hits {}", path.display()))?;
    Ok(parse_struct_hits(&text, diag))
}

pub fn parse_struct_hits(text: &str, diag: &Diagnostics) -> Vec<StructHit> {
    let mut hits = Vec::new();
    for (lineno, line) in data_lines(text) {
        let fields: Vec<&str> = line.split('\t').collect();
        let parsed = (|| -> Option<StructHit> {
            if fields.len() < 5 {
                return None;
            }
            Some(StructHit {
                hit_id: fields[0].to_string(),
                template_id: fields[1].to_string(),
                evalue: parse_nonneg(fields[2])?,
                query_range: ResidueSet::parse(fields[3]).ok().filter(|r| !r.is_empty())?,
                template_range: ResidueSet::parse(fields[4]).ok()?,
                raw_rank: hits.len() as u32,
            })
        })();
        match parsed {
            Some(hit) => hits.push(hit),
            None => skip_line(diag, "structural hit", lineno, line),
        }
    }
    hits
}

/// `hit_id  template_id  probability  evalue  query_range  template_range`
pub fn read_seq_hits(path: &Path, diag: &Diagnostics) -> Result<Vec<SeqHit>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read sequence hits {}", path.display()))?;
    Ok(parse_seq_hits(&text, diag))
}

pub fn parse_seq_hits(text: &str, diag: &Diagnostics) -> Vec<SeqHit> {
    let mut hits = Vec::new();
    for (lineno, line) in data_lines(text) {
        let fields: Vec<&str> = line.split('\t').collect();
        let parsed = (|| -> Option<SeqHit> {
            if fields.len() < 6 {
                return None;
            }
            Some(SeqHit {
                hit_id: fields[0].to_string(),
                template_id: fields[1].to_string(),
                probability: fields[2].trim().parse().ok()?,
                evalue: parse_nonneg(fields[3])?,
                query_range: ResidueSet::parse(fields[4]).ok().filter(|r| !r.is_empty())?,
                template_range: ResidueSet::parse(fields[5]).ok()?,
            })
        })();
        match parsed {
            Some(hit) => hits.push(hit),
            None => skip_line(diag, "sequence hit", lineno, line),
        }
    }
    hits
}

/// `domain_id  range  quality`
pub fn read_domains(path: &Path, diag: &Diagnostics) -> Result<Vec<DomainRange>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read domain table {}", path.display()))?;
    Ok(parse_domains(&text, diag))
}

pub fn parse_domains(text: &str, diag: &Diagnostics) -> Vec<DomainRange> {
    let mut domains = Vec::new();
    for (lineno, line) in data_lines(text) {
        let fields: Vec<&str> = line.split('\t').collect();
        let parsed = (|| -> Option<DomainRange> {
            if fields.len() < 3 {
                return None;
            }
            Some(DomainRange {
                domain_id: fields[0].to_string(),
                query_residues: ResidueSet::parse(fields[1]).ok().filter(|r| !r.is_empty())?,
                quality: fields[2].to_string(),
            })
        })();
        match parsed {
            Some(domain) => domains.push(domain),
            None => skip_line(diag, "domain", lineno, line),
        }
    }
    domains
}

fn data_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim_end()))
        .filter(|(_, l)| !l.is_empty() && !l.starts_with('#'))
}

fn parse_nonneg(field: &str) -> Option<f64> {
    field.trim().parse::<f64>().ok().filter(|v| *v >= 0.0)
}

fn skip_line(diag: &Diagnostics, kind: &str, lineno: usize, line: &str) {
    diag.input_lines_skipped.fetch_add(1, AtomicOrdering::Relaxed);
    eprintln!("warning: skipping malformed {} line {}: {:?}", kind, lineno, line);
}
