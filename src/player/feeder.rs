use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::encode::{AudioData, EncodeOptions, Encoder};
use crate::error::{PlayerError, Result};
use crate::metrics::PerformanceTracker;
use crate::render::{DisplaySlot, RenderSink, WidgetCommand};

use super::session::PlayerSession;
use super::source::StreamChunk;
use super::state::PlaybackState;

const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_info};

/// Ordered script delivery to one widget instance. Every command replaces the
/// previous one in a single display slot.
pub(crate) struct CommandChannel {
    session_id: String,
    slot: DisplaySlot,
}

impl CommandChannel {
    pub(crate) fn new(session_id: impl Into<String>, sink: Arc<dyn RenderSink>) -> Self {
        Self {
            session_id: session_id.into(),
            slot: DisplaySlot::new(sink),
        }
    }

    pub(crate) fn send(&mut self, command: &WidgetCommand) {
        log_debug!("[{}] {}", self.session_id, command.name());
        self.slot.run_script(&command.to_script(&self.session_id));
    }
}

/// Everything a load mutates. Shared with a background streaming task.
pub(crate) struct SessionCore {
    pub(crate) state: PlaybackState,
    pub(crate) session: Option<PlayerSession>,
    pub(crate) channel: CommandChannel,
    pub(crate) tracker: PerformanceTracker,
    /// Bumped by every load; a feeder from an older load stops emitting.
    pub(crate) generation: u64,
}

impl SessionCore {
    pub(crate) fn new(channel: CommandChannel, tracker: PerformanceTracker) -> Self {
        Self {
            state: PlaybackState::Idle,
            session: None,
            channel,
            tracker,
            generation: 0,
        }
    }
}

pub(crate) type SharedCore = Arc<Mutex<SessionCore>>;

pub(crate) fn lock(core: &SharedCore) -> MutexGuard<'_, SessionCore> {
    core.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Processes streaming chunks in arrival order: adopt rate, encode, announce
/// the rate, feed, track.
pub(crate) struct ChunkFeeder {
    core: SharedCore,
    encoder: Arc<dyn Encoder>,
    generation: u64,
    rate: Option<u32>,
    announced: bool,
    index: usize,
}

impl ChunkFeeder {
    pub(crate) fn new(
        core: SharedCore,
        encoder: Arc<dyn Encoder>,
        generation: u64,
        rate: Option<u32>,
    ) -> Self {
        Self {
            core,
            encoder,
            generation,
            rate,
            announced: false,
            index: 0,
        }
    }

    pub(crate) fn chunks_fed(&self) -> usize {
        self.index
    }

    /// Returns `false` once a newer load has taken over the widget; nothing is
    /// emitted in that case.
    pub(crate) fn feed(&mut self, chunk: StreamChunk) -> Result<bool> {
        let carried = chunk.sample_rate;
        if carried.is_some() {
            self.rate = carried;
        }

        let encoded = self
            .encoder
            .encode(&chunk.audio, EncodeOptions::streaming(self.rate))
            .map_err(PlayerError::Encode)?;

        // Files play at their own rate whatever the session expected.
        let mut announce = carried.is_some() || (!self.announced && self.rate.is_some());
        if matches!(chunk.audio, AudioData::Path(_)) && self.rate != Some(encoded.sample_rate) {
            self.rate = Some(encoded.sample_rate);
            announce = true;
        }

        let mut core = lock(&self.core);
        if core.generation != self.generation {
            return Ok(false);
        }
        if let (true, Some(rate)) = (announce, self.rate) {
            core.channel.send(&WidgetCommand::SetSampleRate { rate });
            self.announced = true;
        }
        let duration = encoded.duration_secs();
        let sample_rate = encoded.sample_rate;
        core.channel.send(&WidgetCommand::Feed {
            payload: encoded.payload,
        });

        core.tracker.record_chunk(self.index, duration)?;
        if let Some(session) = core.session.as_mut() {
            session.sample_rate = sample_rate;
            session.record_chunk(duration);
        }
        self.index += 1;
        Ok(true)
    }

    /// Marks the stream exhausted on the widget.
    pub(crate) fn finish(&mut self) {
        let mut core = lock(&self.core);
        if core.generation != self.generation {
            return;
        }
        core.channel.send(&WidgetCommand::SetDone);
        core.state = PlaybackState::Done;
        let audio_secs = core
            .session
            .as_ref()
            .and_then(|session| session.total_audio_duration)
            .unwrap_or_default();
        log_info!("stream finished after {} chunks ({:.3} s of audio)", self.index, audio_secs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::PcmEncoder;
    use crate::player::state::PlaybackMode;
    use crate::render::RecordingSink;

    fn core(sink: &RecordingSink) -> SharedCore {
        Arc::new(Mutex::new(SessionCore::new(
            CommandChannel::new("s", Arc::new(sink.clone())),
            PerformanceTracker::disabled(),
        )))
    }

    #[test]
    fn rate_is_announced_once_when_only_the_caller_knows_it() {
        let sink = RecordingSink::new();
        let mut feeder = ChunkFeeder::new(core(&sink), Arc::new(PcmEncoder), 0, Some(8000));
        for _ in 0..3 {
            assert!(feeder.feed(StreamChunk::new(vec![0.0f32; 8])).unwrap());
        }
        let announces: Vec<_> = sink
            .scripts()
            .iter()
            .map(|s| s.contains("sampleRate"))
            .collect();
        assert_eq!(announces, [true, false, false, false]);
        assert_eq!(feeder.chunks_fed(), 3);
    }

    #[test]
    fn fed_chunks_update_the_session() {
        let sink = RecordingSink::new();
        let shared = core(&sink);
        let session = PlayerSession::new("s", 16_000, PlaybackMode::Streaming, true);
        lock(&shared).session = Some(session);
        let mut feeder = ChunkFeeder::new(shared.clone(), Arc::new(PcmEncoder), 0, None);

        feeder.feed(StreamChunk::with_rate(vec![0.0f32; 800], 8000)).unwrap();
        feeder.feed(StreamChunk::new(vec![0.0f32; 800])).unwrap();

        let session = lock(&shared).session.clone().unwrap();
        assert_eq!(session.sample_rate, 8000);
        assert_eq!(session.chunk_count, Some(2));
        assert_eq!(session.total_audio_duration, Some(0.2));
    }

    #[test]
    fn rate_is_not_announced_when_unknown() {
        let sink = RecordingSink::new();
        let mut feeder = ChunkFeeder::new(core(&sink), Arc::new(PcmEncoder), 0, None);
        feeder.feed(StreamChunk::new(vec![0.0f32; 8])).unwrap();
        assert_eq!(sink.scripts().len(), 1);
        assert!(sink.scripts()[0].contains(".feed("));
    }

    #[test]
    fn superseded_feeder_emits_nothing() {
        let sink = RecordingSink::new();
        let shared = core(&sink);
        let mut feeder = ChunkFeeder::new(shared.clone(), Arc::new(PcmEncoder), 0, None);
        lock(&shared).generation = 1;

        assert!(!feeder.feed(StreamChunk::new(vec![0.0f32])).unwrap());
        feeder.finish();
        assert!(sink.events().is_empty());
        assert_eq!(lock(&shared).state, PlaybackState::Idle);
    }
}
