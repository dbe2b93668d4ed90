//! Unit tests for coverage-based structural hit culling

use super::helpers::make_struct_hit;
use domap::filter::coverage::{cull_by_coverage, CoverageConfig};

#[test]
fn test_no_hit_invented_or_duplicated() {
    let hits = vec![
        make_struct_hit("h1", "t1", 1e-8, 1, 40),
        make_struct_hit("h2", "t2", 1e-6, 5, 45),
        make_struct_hit("h3", "t3", 1e-4, 50, 90),
    ];
    let kept = cull_by_coverage(hits, 100, &CoverageConfig::default());
    assert_eq!(kept.len(), 3);
    let mut ids: Vec<&str> = kept.iter().map(|h| h.hit_id.as_str()).collect();
    ids.dedup();
    assert_eq!(ids, vec!["h1", "h2", "h3"]);
}

#[test]
fn test_overlapping_pair_under_cap_both_retained() {
    // range {1..15} at 1e-5 and {10..25} at 1e-3: neither exceeds the cap.
    let hits = vec![
        make_struct_hit("h1", "t1", 1e-5, 1, 15),
        make_struct_hit("h2", "t2", 1e-3, 10, 25),
    ];
    let kept = cull_by_coverage(hits, 30, &CoverageConfig::default());
    assert_eq!(kept.len(), 2);
}

#[test]
fn test_saturation_drops_redundant_tail() {
    // 150 hits stacked on residues 10..=30 with strictly increasing
    // e-values: once the region saturates at the cap, later hits cannot
    // find 10 good residues anywhere.
    let hits: Vec<_> = (0..150)
        .map(|i| {
            make_struct_hit(
                &format!("h{:03}", i),
                &format!("t{:03}", i),
                1e-120 * 10f64.powi(i),
                10,
                30,
            )
        })
        .collect();
    let kept = cull_by_coverage(hits, 40, &CoverageConfig::default());
    assert!(kept.len() < 150);
    assert_eq!(kept.len(), 100);
    // Best e-values survive.
    assert_eq!(kept[0].hit_id, "h000");
    assert_eq!(kept[99].hit_id, "h099");
}

#[test]
fn test_diverse_regions_survive_saturation_elsewhere() {
    // Saturate 1..=30, then a late hit on an untouched region must survive.
    let mut hits: Vec<_> = (0..120)
        .map(|i| {
            make_struct_hit(
                &format!("h{:03}", i),
                &format!("t{:03}", i),
                1e-90 * 10f64.powi(i),
                1,
                30,
            )
        })
        .collect();
    hits.push(make_struct_hit("late", "t_late", 1.0, 60, 95));
    let kept = cull_by_coverage(hits, 100, &CoverageConfig::default());
    assert!(kept.iter().any(|h| h.hit_id == "late"));
}

#[test]
fn test_configurable_knobs() {
    let cfg = CoverageConfig {
        coverage_cap: 2,
        min_good_residues: 5,
    };
    let hits: Vec<_> = (0..4)
        .map(|i| {
            make_struct_hit(
                &format!("h{}", i),
                &format!("t{}", i),
                1e-20 * 10f64.powi(i),
                1,
                10,
            )
        })
        .collect();
    let kept = cull_by_coverage(hits, 10, &cfg);
    // Third hit raises counts to 3 > cap on every residue it has.
    assert_eq!(kept.len(), 2);
}
