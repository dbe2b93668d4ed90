//! Reference-data lookups: ECOD template table and per-template residue maps
//!
//! The reconciler consumes reference data as plain lookups. Template
//! metadata (tgroup, length) comes from one TSV table; residue maps come one
//! file per template, translating template sequence positions into the
//! template's native residue numbering. A template with no map file gets an
//! empty map, never an error.

use anyhow::{Context, Result};
use rustc_hash::FxHashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Template sequence position → native residue number.
pub type ResidueMap = FxHashMap<u32, u32>;

/// Supplies the residue map for a template. Implementations must degrade a
/// missing map to an empty one.
pub trait ResidueMapProvider {
    fn residue_map(&self, template_id: &str) -> ResidueMap;
}

/// File-backed provider: reads `<dir>/<template_id>.map`, tab-separated
/// `seq_pos  native_pos` lines. Malformed lines are skipped.
pub struct FileResidueMaps {
    dir: PathBuf,
}

impl FileResidueMaps {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }
}

impl ResidueMapProvider for FileResidueMaps {
    fn residue_map(&self, template_id: &str) -> ResidueMap {
        let path = self.dir.join(format!("{}.map", template_id));
        let text = match fs::read_to_string(&path) {
            Ok(t) => t,
            // No map file for this template: everything unmapped.
            Err(_) => return ResidueMap::default(),
        };
        parse_residue_map(&text)
    }
}

/// In-memory provider, used by tests and by callers that preload maps.
#[derive(Default)]
pub struct MemoryResidueMaps {
    maps: FxHashMap<String, ResidueMap>,
}

impl MemoryResidueMaps {
    pub fn insert(&mut self, template_id: &str, map: ResidueMap) {
        self.maps.insert(template_id.to_string(), map);
    }
}

impl ResidueMapProvider for MemoryResidueMaps {
    fn residue_map(&self, template_id: &str) -> ResidueMap {
        self.maps.get(template_id).cloned().unwrap_or_default()
    }
}

pub fn parse_residue_map(text: &str) -> ResidueMap {
    let mut map = ResidueMap::default();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut fields = line.split('\t');
        let (seq, native) = match (fields.next(), fields.next()) {
            (Some(a), Some(b)) => (a, b),
            _ => continue,
        };
        if let (Ok(seq_pos), Ok(native_pos)) = (seq.trim().parse(), native.trim().parse()) {
            map.insert(seq_pos, native_pos);
        }
    }
    map
}

/// Metadata for one ECOD template.
#[derive(Debug, Clone)]
pub struct TemplateInfo {
    pub tgroup: String,
    pub length: u32,
}

/// template_id → metadata, loaded from the ECOD listing TSV:
/// `template_id  tgroup  length`, `#` comments and malformed lines skipped.
#[derive(Debug, Clone, Default)]
pub struct TemplateTable {
    entries: FxHashMap<String, TemplateInfo>,
}

impl TemplateTable {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read template table {}", path.display()))?;
        Ok(Self::parse(&text))
    }

    pub fn parse(text: &str) -> Self {
        let mut entries = FxHashMap::default();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() < 3 {
                continue;
            }
            if let Ok(length) = fields[2].trim().parse::<u32>() {
                entries.insert(
                    fields[0].to_string(),
                    TemplateInfo {
                        tgroup: fields[1].to_string(),
                        length,
                    },
                );
            }
        }
        Self { entries }
    }

    pub fn insert(&mut self, template_id: &str, info: TemplateInfo) {
        self.entries.insert(template_id.to_string(), info);
    }

    pub fn get(&self, template_id: &str) -> Option<&TemplateInfo> {
        self.entries.get(template_id)
    }

    pub fn tgroup(&self, template_id: &str) -> Option<&str> {
        self.entries.get(template_id).map(|t| t.tgroup.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
