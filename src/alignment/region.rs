use serde::{Deserialize, Serialize};

use super::item::Seconds;

/// A normalized `(start, end, content)` overlay interval drawn on top of the
/// waveform. Serialized as-is into the widget's `load` command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub start: Seconds,
    pub end: Seconds,
    pub content: String,
}

impl Region {
    pub fn new(start: Seconds, end: Seconds, content: impl Into<String>) -> Self {
        Self {
            start,
            end,
            content: content.into(),
        }
    }

    /// Strict test: a region starting exactly at `self.end` does not overlap.
    pub fn overlaps_next(&self, next: &Region) -> bool {
        next.start < self.end
    }
}

impl From<(Seconds, Seconds, &str)> for Region {
    fn from((start, end, content): (Seconds, Seconds, &str)) -> Self {
        Region::new(start, end, content)
    }
}
