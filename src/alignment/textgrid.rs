use std::path::Path;

use textgrid::{TextGrid, TierType};

use crate::error::{PlayerError, Result};

use super::region::Region;

const ENABLE_LOGS: bool = true;

use crate::log_debug;

/// One region per interval of the first tier, times and labels copied as is.
pub fn read_first_tier(path: &Path) -> Result<Vec<Region>> {
    let grid = TextGrid::from_file(path)
        .map_err(|err| PlayerError::malformed(path, format!("textgrid parse failed: {err}")))?;

    let tier = grid
        .tiers
        .first()
        .ok_or_else(|| PlayerError::malformed(path, "no tiers"))?;
    if tier.tier_type != TierType::IntervalTier {
        return Err(PlayerError::malformed(
            path,
            format!("first tier '{}' is not an IntervalTier", tier.name),
        ));
    }

    let regions: Vec<Region> = tier
        .intervals
        .iter()
        .map(|interval| Region::new(interval.xmin, interval.xmax, interval.text.clone()))
        .collect();
    log_debug!(
        "read tier '{}' with {} intervals from {}",
        tier.name,
        regions.len(),
        path.display()
    );
    Ok(regions)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    const TWO_TIERS: &str = r#"File type = "ooTextFile"
Object class = "TextGrid"

xmin = 0
xmax = 2.3
tiers? <exists>
size = 2
item []:
    item [1]:
        class = "IntervalTier"
        name = "words"
        xmin = 0
        xmax = 2.3
        intervals: size = 3
        intervals [1]:
            xmin = 0
            xmax = 0.5
            text = ""
        intervals [2]:
            xmin = 0.5
            xmax = 1.25
            text = "hello"
        intervals [3]:
            xmin = 1.25
            xmax = 2.3
            text = "world"
    item [2]:
        class = "IntervalTier"
        name = "phones"
        xmin = 0
        xmax = 2.3
        intervals: size = 1
        intervals [1]:
            xmin = 0
            xmax = 2.3
            text = "p"
"#;

    const POINT_TIER: &str = r#"File type = "ooTextFile"
Object class = "TextGrid"

xmin = 0
xmax = 1
tiers? <exists>
size = 1
item []:
    item [1]:
        class = "TextTier"
        name = "events"
        xmin = 0
        xmax = 1
        points: size = 1
        points [1]:
            number = 0.5
            mark = "click"
"#;

    fn write(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn first_tier_intervals_become_regions() {
        let dir = tempfile::tempdir().unwrap();
        let regions = read_first_tier(&write(&dir, "a.TextGrid", TWO_TIERS)).unwrap();
        assert_eq!(
            regions,
            vec![
                Region::new(0.0, 0.5, ""),
                Region::new(0.5, 1.25, "hello"),
                Region::new(1.25, 2.3, "world"),
            ]
        );
    }

    #[test]
    fn point_tier_first_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_first_tier(&write(&dir, "p.TextGrid", POINT_TIER)).unwrap_err();
        assert!(matches!(err, PlayerError::MalformedAlignmentFile { .. }));
    }

    #[test]
    fn unreadable_file_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let garbage = write(&dir, "g.TextGrid", "not a textgrid");
        for path in [garbage, dir.path().join("missing.TextGrid")] {
            let err = read_first_tier(&path).unwrap_err();
            assert!(matches!(err, PlayerError::MalformedAlignmentFile { .. }));
        }
    }
}
