use crate::error::Result;

use super::merge::MergeMode;
use super::region::Region;
use super::source::AlignmentSource;
use super::textgrid;

const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_warn};

/// Normalizes `source` into regions in input order, then applies `mode`.
/// Regions are never sorted.
pub fn load(source: &AlignmentSource, mode: MergeMode) -> Result<Vec<Region>> {
    let regions = match source {
        AlignmentSource::File(path) => textgrid::read_first_tier(path).map_err(|err| {
            log_warn!("failed to load alignments: {}", err);
            err
        })?,
        AlignmentSource::Items(items) => items
            .iter()
            .map(|item| Region::new(item.start, item.end(), item.symbol.clone()))
            .collect(),
        AlignmentSource::Regions(regions) => regions.clone(),
    };

    let loaded = regions.len();
    let regions = mode.apply(regions);
    log_debug!(
        "loaded {} regions ({} after {:?} pass)",
        loaded,
        regions.len(),
        mode
    );
    Ok(regions)
}

/// Like [`load`] for an optional source; no source means no regions.
pub fn load_optional(source: Option<&AlignmentSource>, mode: MergeMode) -> Result<Vec<Region>> {
    match source {
        Some(source) => load(source, mode),
        None => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::alignment::AlignmentItem;
    use crate::error::PlayerError;

    const GRID: &str = r#"File type = "ooTextFile"
Object class = "TextGrid"

xmin = 0
xmax = 3
tiers? <exists>
size = 1
item []:
    item [1]:
        class = "IntervalTier"
        name = "words"
        xmin = 0
        xmax = 3
        intervals: size = 3
        intervals [1]:
            xmin = 0
            xmax = 1.000000001
            text = "x"
        intervals [2]:
            xmin = 0.9
            xmax = 2
            text = "x"
        intervals [3]:
            xmin = 2
            xmax = 3
            text = "y"
"#;

    #[test]
    fn none_mode_preserves_order_and_count() {
        let items = vec![
            AlignmentItem::new("b", 2.0, 1.0),
            AlignmentItem::new("a", 0.0, 1.0),
            AlignmentItem::new("a", 0.5, 1.0),
        ];
        let regions = load(&AlignmentSource::Items(items), MergeMode::None).unwrap();
        let contents: Vec<_> = regions.iter().map(|r| r.content.as_str()).collect();
        assert_eq!(contents, ["b", "a", "a"]);
    }

    #[test]
    fn items_use_rounded_end() {
        let items = vec![AlignmentItem::new("a", 0.1, 0.2)];
        let regions = load(&items.into(), MergeMode::None).unwrap();
        assert_eq!(regions, vec![Region::new(0.1, 0.3, "a")]);
    }

    #[test]
    fn file_intervals_are_copied_verbatim() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(GRID.as_bytes()).unwrap();

        let regions = load(&file.path().into(), MergeMode::None).unwrap();
        assert_eq!(regions.len(), 3);
        assert_eq!(regions[0], Region::new(0.0, 1.000000001, "x"));

        let merged = load(&file.path().into(), MergeMode::Merge).unwrap();
        assert_eq!(merged, vec![Region::new(0.0, 2.0, "x"), Region::new(2.0, 3.0, "y")]);
    }

    #[test]
    fn missing_or_broken_file_is_malformed() {
        let missing = AlignmentSource::File("/definitely/not/here.TextGrid".into());
        assert!(matches!(
            load(&missing, MergeMode::None),
            Err(PlayerError::MalformedAlignmentFile { .. })
        ));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not a textgrid").unwrap();
        assert!(matches!(
            load(&file.path().into(), MergeMode::None),
            Err(PlayerError::MalformedAlignmentFile { .. })
        ));
    }

    #[test]
    fn regions_pass_through_then_concat() {
        let regions = vec![
            Region::new(0.0, 1.0, "a"),
            Region::new(0.5, 1.5, "b"),
            Region::new(2.0, 3.0, "c"),
        ];
        let out = load(&regions.into(), MergeMode::Concat).unwrap();
        assert_eq!(out, vec![Region::new(0.0, 1.5, "a b"), Region::new(2.0, 3.0, "c")]);
    }

    #[test]
    fn no_source_yields_no_regions() {
        assert!(load_optional(None, MergeMode::Concat).unwrap().is_empty());
    }
}
