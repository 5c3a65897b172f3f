use std::path::PathBuf;

use serde_json::Value;

use crate::error::{PlayerError, Result};

use super::item::AlignmentItem;
use super::region::Region;

/// Where overlay regions come from.
#[derive(Debug, Clone, PartialEq)]
pub enum AlignmentSource {
    /// A TextGrid file; its first tier is read.
    File(PathBuf),
    /// Timed labels, mapped one to one onto regions.
    Items(Vec<AlignmentItem>),
    /// Already normalized regions, passed through untouched.
    Regions(Vec<Region>),
}

impl AlignmentSource {
    /// Classifies a loosely typed value once: a string is a file path, a list
    /// of `{start, end, content}` mappings is pre-normalized, any other list is
    /// parsed item by item.
    pub fn probe(value: Value) -> Result<Self> {
        match value {
            Value::String(path) => Ok(AlignmentSource::File(PathBuf::from(path))),
            Value::Array(entries) => {
                if !entries.is_empty() && entries.iter().all(is_region_shaped) {
                    let regions = entries
                        .into_iter()
                        .map(serde_json::from_value)
                        .collect::<std::result::Result<Vec<Region>, _>>()
                        .map_err(|err| {
                            PlayerError::UnsupportedSourceKind(format!("region: {err}"))
                        })?;
                    return Ok(AlignmentSource::Regions(regions));
                }
                let items = entries
                    .iter()
                    .map(AlignmentItem::from_value)
                    .collect::<Result<Vec<_>>>()?;
                Ok(AlignmentSource::Items(items))
            }
            other => Err(PlayerError::UnsupportedSourceKind(format!(
                "expected a path or a list of alignments, got {other}"
            ))),
        }
    }
}

fn is_region_shaped(entry: &Value) -> bool {
    entry.as_object().map_or(false, |map| {
        map.contains_key("start") && map.contains_key("end") && map.contains_key("content")
    })
}

impl From<PathBuf> for AlignmentSource {
    fn from(path: PathBuf) -> Self {
        AlignmentSource::File(path)
    }
}

impl From<&std::path::Path> for AlignmentSource {
    fn from(path: &std::path::Path) -> Self {
        AlignmentSource::File(path.to_path_buf())
    }
}

impl From<Vec<AlignmentItem>> for AlignmentSource {
    fn from(items: Vec<AlignmentItem>) -> Self {
        AlignmentSource::Items(items)
    }
}

impl From<Vec<Region>> for AlignmentSource {
    fn from(regions: Vec<Region>) -> Self {
        AlignmentSource::Regions(regions)
    }
}
