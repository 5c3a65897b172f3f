use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::state::PlaybackMode;

/// One playback lifecycle on a widget instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSession {
    pub id: String,
    pub sample_rate: u32,
    pub mode: PlaybackMode,
    pub started_at: DateTime<Utc>,
    /// Only present when performance tracking is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunk_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_audio_duration: Option<f64>,
}

impl PlayerSession {
    pub fn new(id: impl Into<String>, sample_rate: u32, mode: PlaybackMode, tracked: bool) -> Self {
        Self {
            id: id.into(),
            sample_rate,
            mode,
            started_at: Utc::now(),
            chunk_count: tracked.then_some(0),
            total_audio_duration: tracked.then_some(0.0),
        }
    }

    pub(crate) fn record_chunk(&mut self, duration_secs: f64) {
        if let Some(count) = self.chunk_count.as_mut() {
            *count += 1;
        }
        if let Some(total) = self.total_audio_duration.as_mut() {
            *total += duration_secs;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_exist_only_when_tracked() {
        let mut tracked = PlayerSession::new("a", 16_000, PlaybackMode::Streaming, true);
        tracked.record_chunk(0.5);
        tracked.record_chunk(0.25);
        assert_eq!(tracked.chunk_count, Some(2));
        assert_eq!(tracked.total_audio_duration, Some(0.75));

        let mut untracked = PlayerSession::new("b", 16_000, PlaybackMode::Streaming, false);
        untracked.record_chunk(0.5);
        assert_eq!(untracked.chunk_count, None);

        let json = serde_json::to_value(&untracked).unwrap();
        assert_eq!(json["mode"], "streaming");
        assert_eq!(json["sampleRate"], 16_000);
        assert!(json.get("chunkCount").is_none());
    }
}
