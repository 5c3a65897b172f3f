//! Waveform player widgets for notebook cells: batch playback with alignment
//! overlays, and chunked PCM streaming into a browser-side player.

pub mod alignment;
pub mod encode;
pub mod error;
pub mod language;
pub mod metrics;
pub mod player;
pub mod render;
pub mod settings;
pub mod timer;
pub mod utils;

use std::sync::Arc;

pub use alignment::{AlignmentItem, AlignmentSource, MergeMode, Region};
pub use encode::{AudioData, Encoder, PcmEncoder};
pub use error::{PlayerError, Result};
pub use language::Language;
pub use metrics::{PerformanceSummary, PerformanceTracker};
pub use player::{
    AudioSource, LoadOptions, Playback, PlaybackMode, PlaybackState, Player, PlayerSession,
    StreamChunk, StreamOutcome, StreamingTask,
};
pub use render::{NotebookSink, RecordingSink, RenderSink, WidgetAssets};
pub use settings::PlayerConfig;
pub use utils::init_logging;

/// Creates a player and loads `audio` once. `verbose` enables the streaming
/// performance table.
pub fn play(
    audio: impl Into<AudioSource>,
    options: LoadOptions,
    config: PlayerConfig,
    language: Language,
    verbose: bool,
    sink: Arc<dyn RenderSink>,
) -> Result<(Player, Playback)> {
    let mut player = Player::new(sink, language, verbose).with_config(config);
    let playback = player.load(audio, options)?;
    Ok((player, playback))
}
