//! Ordered sets of 1-based residue positions and their range-string form
//!
//! Every component in the pipeline talks about protein residues as sets of
//! 1-based sequence positions, possibly gapped. On disk (and in reports)
//! these sets travel as run-length compacted range strings such as
//! `"12-45,60-80"` or `"7"`. This module owns both representations.

use anyhow::{bail, Result};
use std::collections::BTreeSet;

/// An ordered set of 1-based residue positions.
///
/// Backed by a `BTreeSet` so iteration is always in ascending position
/// order; the iterative decomposer relies on that ordering to translate
/// pool-compacted alignment indices back to absolute residue ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResidueSet(BTreeSet<u32>);

impl ResidueSet {
    pub fn new() -> Self {
        ResidueSet(BTreeSet::new())
    }

    /// Build a set from a contiguous inclusive span.
    pub fn from_span(start: u32, end: u32) -> Self {
        ResidueSet((start..=end).collect())
    }

    /// Parse a range string: comma-separated `start-end` spans or single
    /// positions, e.g. `"12-45,60-80"` or `"7"`. Whitespace is not allowed.
    pub fn parse(s: &str) -> Result<Self> {
        let mut set = BTreeSet::new();
        for part in s.split(',') {
            if part.is_empty() {
                bail!("empty segment in range string {:?}", s);
            }
            match part.split_once('-') {
                Some((a, b)) => {
                    let start: u32 = a
                        .parse()
                        .map_err(|_| anyhow::anyhow!("bad range start {:?} in {:?}", a, s))?;
                    let end: u32 = b
                        .parse()
                        .map_err(|_| anyhow::anyhow!("bad range end {:?} in {:?}", b, s))?;
                    if start == 0 || end < start {
                        bail!("invalid span {}-{} in range string {:?}", start, end, s);
                    }
                    set.extend(start..=end);
                }
                None => {
                    let pos: u32 = part
                        .parse()
                        .map_err(|_| anyhow::anyhow!("bad position {:?} in {:?}", part, s))?;
                    if pos == 0 {
                        bail!("residue positions are 1-based, got 0 in {:?}", s);
                    }
                    set.insert(pos);
                }
            }
        }
        Ok(ResidueSet(set))
    }

    /// Serialize to the minimal run-length range string. Empty sets have no
    /// range-string form; callers emit the `"na"` sentinel instead.
    pub fn to_range_string(&self) -> String {
        let mut out = String::new();
        let mut iter = self.0.iter().copied();
        let mut run_start = match iter.next() {
            Some(p) => p,
            None => return out,
        };
        let mut run_end = run_start;
        for pos in iter {
            if pos == run_end + 1 {
                run_end = pos;
            } else {
                push_run(&mut out, run_start, run_end);
                run_start = pos;
                run_end = pos;
            }
        }
        push_run(&mut out, run_start, run_end);
        out
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, pos: u32) -> bool {
        self.0.contains(&pos)
    }

    pub fn insert(&mut self, pos: u32) {
        self.0.insert(pos);
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }

    /// Ascending listing of the positions. Index `i` of this listing is the
    /// compacted index `i + 1` used by the aligner capability.
    pub fn ordered(&self) -> Vec<u32> {
        self.0.iter().copied().collect()
    }

    /// Number of positions shared with `other`.
    pub fn intersection_len(&self, other: &ResidueSet) -> usize {
        if self.len() <= other.len() {
            self.0.iter().filter(|p| other.0.contains(p)).count()
        } else {
            other.0.iter().filter(|p| self.0.contains(p)).count()
        }
    }

    /// Remove every position in `other` from `self`.
    pub fn subtract(&mut self, other: &ResidueSet) {
        for pos in &other.0 {
            self.0.remove(pos);
        }
    }

    /// Close small gaps: any run of absent positions of length
    /// `<= gap_tolerance` lying strictly between two present positions is
    /// filled in. Used to mask out tiny unaligned leftovers inside an
    /// already-matched structural unit.
    pub fn expand_gaps(&self, gap_tolerance: u32) -> ResidueSet {
        let mut out = self.0.clone();
        let positions: Vec<u32> = self.0.iter().copied().collect();
        for pair in positions.windows(2) {
            let (prev, next) = (pair[0], pair[1]);
            let gap = next - prev - 1;
            if gap > 0 && gap <= gap_tolerance {
                out.extend(prev + 1..next);
            }
        }
        ResidueSet(out)
    }
}

impl FromIterator<u32> for ResidueSet {
    fn from_iter<T: IntoIterator<Item = u32>>(iter: T) -> Self {
        ResidueSet(iter.into_iter().collect())
    }
}

fn push_run(out: &mut String, start: u32, end: u32) {
    if !out.is_empty() {
        out.push(',');
    }
    if start == end {
        out.push_str(&start.to_string());
    } else {
        out.push_str(&format!("{}-{}", start, end));
    }
}
