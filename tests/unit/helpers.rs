//! Shared fixtures for domap unit tests

use domap::common::{DomainRange, SeqHit, StructHit};
use domap::refdata::{MemoryResidueMaps, ResidueMap, TemplateInfo, TemplateTable};
use domap::residues::ResidueSet;

/// Create a structural hit covering an inclusive query span, with the
/// template range starting at 1.
pub fn make_struct_hit(hit_id: &str, template_id: &str, evalue: f64, start: u32, end: u32) -> StructHit {
    StructHit {
        hit_id: hit_id.to_string(),
        template_id: template_id.to_string(),
        evalue,
        query_range: ResidueSet::from_span(start, end),
        template_range: ResidueSet::from_span(1, end - start + 1),
        raw_rank: 0,
    }
}

/// Create a sequence-profile hit covering an inclusive query span, with the
/// template range starting at 1.
pub fn make_seq_hit(
    hit_id: &str,
    template_id: &str,
    probability: f64,
    evalue: f64,
    start: u32,
    end: u32,
) -> SeqHit {
    SeqHit {
        hit_id: hit_id.to_string(),
        template_id: template_id.to_string(),
        probability,
        evalue,
        query_range: ResidueSet::from_span(start, end),
        template_range: ResidueSet::from_span(1, end - start + 1),
    }
}

pub fn make_domain(domain_id: &str, range: &str, quality: &str) -> DomainRange {
    DomainRange {
        domain_id: domain_id.to_string(),
        query_residues: ResidueSet::parse(range).unwrap(),
        quality: quality.to_string(),
    }
}

/// A template table holding the templates the fixtures use.
pub fn make_template_table() -> TemplateTable {
    let mut table = TemplateTable::default();
    table.insert(
        "e1aaaA1",
        TemplateInfo {
            tgroup: "2004.1.1".to_string(),
            length: 140,
        },
    );
    table.insert(
        "e2bbbB1",
        TemplateInfo {
            tgroup: "304.5.2".to_string(),
            length: 98,
        },
    );
    table
}

/// Identity residue map over `1..=len`.
pub fn identity_map(len: u32) -> ResidueMap {
    (1..=len).map(|i| (i, i)).collect()
}

/// Map provider that knows identity maps for the fixture templates.
pub fn make_maps(len: u32) -> MemoryResidueMaps {
    let mut maps = MemoryResidueMaps::default();
    maps.insert("e1aaaA1", identity_map(len));
    maps.insert("e2bbbB1", identity_map(len));
    maps
}
