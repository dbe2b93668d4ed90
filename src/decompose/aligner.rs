//! The structure-aligner capability
//!
//! The decomposer does not know how structures are aligned; it only needs
//! `align(pool, template) -> Option<(score, pairs)>`. The `Aligner` trait is
//! that seam. Production runs plug in `CommandAligner`, which shells out to
//! the site's structure-alignment tool once per iteration; tests plug in
//! scripted aligners.

use crate::residues::ResidueSet;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// One aligned residue pair. `query_pos` is expressed in the *pool's*
/// compacted 1-based indexing (index into the ordered pool listing), not in
/// absolute query numbering; the decomposer translates it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignedPair {
    pub query_pos: u32,
    pub template_pos: u32,
}

/// Output of one aligner invocation.
#[derive(Debug, Clone)]
pub struct Alignment {
    pub score: f64,
    pub pairs: Vec<AlignedPair>,
}

/// Capability to align a set of query residues against a template.
///
/// `Ok(None)` means the tool found no significant alignment; `Err` means the
/// tool itself failed. The decomposer treats both as terminal for the
/// current template run, keeping whatever candidates it already has.
pub trait Aligner {
    fn align(&self, pool: &ResidueSet, template_id: &str) -> Result<Option<Alignment>>;
}

/// Aligner that invokes an external command per iteration.
///
/// Protocol: the command is run as `<cmd> <template_id>`, the current pool
/// is written to stdin one absolute residue id per line, and stdout is
/// parsed as: a first line `score\t<float>` (or the literal `none` when no
/// significant alignment was found) followed by one `pool_index\ttemplate_pos`
/// line per aligned pair.
pub struct CommandAligner {
    cmd: PathBuf,
}

impl CommandAligner {
    pub fn new(cmd: PathBuf) -> Self {
        Self { cmd }
    }

    fn parse_output(text: &str) -> Result<Option<Alignment>> {
        let mut lines = text.lines().filter(|l| !l.trim().is_empty());
        let header = match lines.next() {
            Some(h) => h.trim(),
            None => return Ok(None),
        };
        if header == "none" {
            return Ok(None);
        }
        let score: f64 = match header.strip_prefix("score\t") {
            Some(s) => s
                .trim()
                .parse()
                .with_context(|| format!("bad aligner score line {:?}", header))?,
            None => anyhow::bail!("bad aligner header line {:?}", header),
        };
        let mut pairs = Vec::new();
        for line in lines {
            let mut fields = line.split('\t');
            let (q, t) = match (fields.next(), fields.next()) {
                (Some(q), Some(t)) => (q, t),
                _ => anyhow::bail!("bad aligner pair line {:?}", line),
            };
            let query_pos: u32 = q
                .trim()
                .parse()
                .with_context(|| format!("bad pool index in {:?}", line))?;
            let template_pos: u32 = t
                .trim()
                .parse()
                .with_context(|| format!("bad template position in {:?}", line))?;
            pairs.push(AlignedPair {
                query_pos,
                template_pos,
            });
        }
        Ok(Some(Alignment { score, pairs }))
    }
}

impl Aligner for CommandAligner {
    fn align(&self, pool: &ResidueSet, template_id: &str) -> Result<Option<Alignment>> {
        let mut child = Command::new(&self.cmd)
            .arg(template_id)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("failed to spawn aligner {:?}", self.cmd))?;

        {
            let stdin = child
                .stdin
                .as_mut()
                .context("aligner stdin unavailable")?;
            let mut buf = String::new();
            for pos in pool.iter() {
                buf.push_str(&pos.to_string());
                buf.push('\n');
            }
            stdin.write_all(buf.as_bytes())?;
        }

        let output = child
            .wait_with_output()
            .with_context(|| format!("aligner {:?} did not finish", self.cmd))?;
        if !output.status.success() {
            anyhow::bail!(
                "aligner {:?} exited with {} on template {}",
                self.cmd,
                output.status,
                template_id
            );
        }
        let text = String::from_utf8(output.stdout).context("aligner output is not UTF-8")?;
        Self::parse_output(&text)
    }
}
