//! Unit tests for iterative per-template decomposition

use anyhow::Result;
use domap::decompose::{decompose, Aligner, AlignedPair, Alignment, DecomposeConfig, TemplateRef};
use domap::diagnostics::Diagnostics;
use domap::residues::ResidueSet;
use std::sync::Mutex;

/// Aligner that always reports a full-pool match with a decaying score, up
/// to a fixed number of calls.
struct RepeatMatcher {
    max_matches: usize,
    match_len: usize,
    calls: Mutex<usize>,
}

impl Aligner for RepeatMatcher {
    fn align(&self, pool: &ResidueSet, _template_id: &str) -> Result<Option<Alignment>> {
        let mut calls = self.calls.lock().unwrap();
        *calls += 1;
        if *calls > self.max_matches {
            return Ok(None);
        }
        let n = self.match_len.min(pool.len());
        let pairs = (1..=n as u32)
            .map(|i| AlignedPair {
                query_pos: i,
                template_pos: i,
            })
            .collect();
        Ok(Some(Alignment {
            score: 50.0 / *calls as f64,
            pairs,
        }))
    }
}

fn template() -> TemplateRef {
    TemplateRef {
        id: "e1aaaA1".to_string(),
        length: 140,
    }
}

#[test]
fn test_three_tandem_repeats_recovered() {
    let aligner = RepeatMatcher {
        max_matches: 10,
        match_len: 50,
        calls: Mutex::new(0),
    };
    let query = ResidueSet::from_span(1, 160);
    let cands = decompose(
        &query,
        160,
        &template(),
        &aligner,
        &DecomposeConfig::default(),
        &Diagnostics::default(),
    );
    // 160 residues, 50 masked per round: the fourth round has only 10 left,
    // below min_aligned, so the loop never calls the aligner again.
    assert_eq!(cands.len(), 3);
    assert_eq!(cands[0].hit_name, "e1aaaA1_1");
    assert_eq!(cands[2].hit_name, "e1aaaA1_3");
    assert_eq!(cands[2].pairs[0].query_pos, 101);
    assert_eq!(*aligner.calls.lock().unwrap(), 3);
}

#[test]
fn test_no_candidate_below_min_aligned() {
    let aligner = RepeatMatcher {
        max_matches: 10,
        match_len: 15,
        calls: Mutex::new(0),
    };
    let query = ResidueSet::from_span(1, 100);
    let cands = decompose(
        &query,
        100,
        &template(),
        &aligner,
        &DecomposeConfig::default(),
        &Diagnostics::default(),
    );
    assert!(cands.is_empty());
    for c in &cands {
        assert!(c.n_aligned >= 20);
    }
}

#[test]
fn test_candidates_record_template_metadata() {
    let aligner = RepeatMatcher {
        max_matches: 1,
        match_len: 60,
        calls: Mutex::new(0),
    };
    let query = ResidueSet::from_span(1, 120);
    let cands = decompose(
        &query,
        120,
        &template(),
        &aligner,
        &DecomposeConfig::default(),
        &Diagnostics::default(),
    );
    assert_eq!(cands.len(), 1);
    let c = &cands[0];
    assert_eq!(c.template_id, "e1aaaA1");
    assert_eq!(c.query_length, 120);
    assert_eq!(c.template_length, 140);
    assert_eq!(c.n_aligned, c.pairs.len());
    assert_eq!(c.score, 50.0);
}

#[test]
fn test_gapped_pool_translation() {
    // A pool with a hole: compacted index n must map to the n-th remaining
    // residue, not to absolute position n.
    struct OneShot;
    impl Aligner for OneShot {
        fn align(&self, pool: &ResidueSet, _template_id: &str) -> Result<Option<Alignment>> {
            if pool.len() < 40 {
                return Ok(None);
            }
            let pairs = (1..=25)
                .map(|i| AlignedPair {
                    query_pos: i,
                    template_pos: i,
                })
                .collect();
            Ok(Some(Alignment { score: 20.0, pairs }))
        }
    }
    let mut query = ResidueSet::from_span(1, 60);
    query.subtract(&ResidueSet::from_span(10, 19));
    let cands = decompose(
        &query,
        60,
        &template(),
        &OneShot,
        &DecomposeConfig::default(),
        &Diagnostics::default(),
    );
    assert_eq!(cands.len(), 1);
    // 25th pool residue is absolute 35 (1-9 then 20-35).
    assert_eq!(cands[0].pairs.last().unwrap().query_pos, 35);
}

#[cfg(unix)]
mod command_aligner {
    use domap::decompose::{Aligner, CommandAligner};
    use domap::residues::ResidueSet;
    use std::io::Write;
    use std::os::unix::fs::PermissionsExt;

    fn write_script(body: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aligner.sh");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "#!/bin/sh").unwrap();
        writeln!(f, "{}", body).unwrap();
        drop(f);
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();
        dir
    }

    #[test]
    fn test_command_aligner_parses_pairs() {
        let dir = write_script(
            "cat > /dev/null\nprintf 'score\\t12.5\\n1\\t101\\n2\\t102\\n3\\t104\\n'",
        );
        let aligner = CommandAligner::new(dir.path().join("aligner.sh"));
        let pool = ResidueSet::from_span(5, 30);
        let aln = aligner.align(&pool, "e1aaaA1").unwrap().unwrap();
        assert_eq!(aln.score, 12.5);
        assert_eq!(aln.pairs.len(), 3);
    }

    #[test]
    fn test_command_aligner_none() {
        let dir = write_script("cat > /dev/null\nprintf 'none\\n'");
        let aligner = CommandAligner::new(dir.path().join("aligner.sh"));
        let pool = ResidueSet::from_span(1, 30);
        assert!(aligner.align(&pool, "e1aaaA1").unwrap().is_none());
    }

    #[test]
    fn test_command_aligner_failure_is_error() {
        let dir = write_script("cat > /dev/null\nexit 3");
        let aligner = CommandAligner::new(dir.path().join("aligner.sh"));
        let pool = ResidueSet::from_span(1, 30);
        assert!(aligner.align(&pool, "e1aaaA1").is_err());
    }
}
