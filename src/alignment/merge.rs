use serde::{Deserialize, Serialize};

use super::region::Region;

/// Post-processing applied to loaded regions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum MergeMode {
    /// Regions are returned as loaded.
    #[default]
    None,
    /// Overlapping regions are joined, their contents separated by a space.
    Concat,
    /// Overlapping regions are joined only when their contents are identical.
    Merge,
}

impl MergeMode {
    /// `concat` takes precedence when both flags are set.
    pub fn from_flags(concat: bool, merge: bool) -> Self {
        if concat {
            MergeMode::Concat
        } else if merge {
            MergeMode::Merge
        } else {
            MergeMode::None
        }
    }

    pub fn apply(self, regions: Vec<Region>) -> Vec<Region> {
        match self {
            MergeMode::None => regions,
            MergeMode::Concat => concat_overlapping(regions),
            MergeMode::Merge => merge_identical(regions),
        }
    }
}

/// Single forward pass: every region that starts before the end of the last
/// kept region is folded into it, and the kept region then ends where the
/// folded one ends.
pub fn concat_overlapping(regions: Vec<Region>) -> Vec<Region> {
    let mut kept: Vec<Region> = Vec::with_capacity(regions.len());

    for region in regions {
        match kept.last_mut() {
            Some(last) if last.overlaps_next(&region) => {
                last.content.push(' ');
                last.content.push_str(&region.content);
                last.end = region.end;
            }
            _ => kept.push(region),
        }
    }

    kept
}

/// Like [`concat_overlapping`] but only coalesces a label split across
/// several overlapping intervals; differing labels stay separate.
pub fn merge_identical(regions: Vec<Region>) -> Vec<Region> {
    let mut kept: Vec<Region> = Vec::with_capacity(regions.len());

    for region in regions {
        match kept.last_mut() {
            Some(last) if last.overlaps_next(&region) && last.content == region.content => {
                last.end = region.end;
            }
            _ => kept.push(region),
        }
    }

    kept
}
