use serde::{Deserialize, Serialize};

/// Streaming performance so far. All zero until chunks are recorded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSummary {
    /// Wall-clock time from session start to the first chunk.
    pub latency_ms: f64,
    /// Elapsed processing time divided by audio seconds processed, 2 decimals.
    pub real_time_factor: f64,
    pub chunk_count: u64,
    pub total_audio_secs: f64,
}
