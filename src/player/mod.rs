mod feeder;
pub mod session;
pub mod source;
pub mod state;
pub mod task;

pub use session::PlayerSession;
pub use source::{AudioSource, StreamChunk};
pub use state::{PlaybackMode, PlaybackState};
pub use task::{StreamOutcome, StreamingTask};

use std::path::Path;
use std::sync::{Arc, Mutex};

use serde_json::Value;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::alignment::{load_optional, AlignmentSource, MergeMode};
use crate::encode::{AudioData, EncodeOptions, Encoder, PcmEncoder, DEFAULT_SAMPLE_RATE};
use crate::error::{PlayerError, Result};
use crate::language::Language;
use crate::metrics::{PerformanceSummary, PerformanceTracker};
use crate::render::{render_widget, RenderSink, WidgetAssets, WidgetCommand};
use crate::settings::PlayerConfig;
use crate::timer::{Clock, Stopwatch, SystemClock};

use feeder::{lock, ChunkFeeder, CommandChannel, SessionCore, SharedCore};

const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_info};

/// Per-load arguments.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Sample rate of in-memory samples. Unknown means the encoder default
    /// for batch audio and no rate announcement for streams.
    pub rate: Option<u32>,
    /// Overlay regions, batch playback only.
    pub alignments: Option<AlignmentSource>,
    pub concat: bool,
    pub merge: bool,
}

impl LoadOptions {
    pub fn rate(mut self, rate: u32) -> Self {
        self.rate = Some(rate);
        self
    }

    pub fn alignments(mut self, source: impl Into<AlignmentSource>) -> Self {
        self.alignments = Some(source.into());
        self
    }

    pub fn concat(mut self) -> Self {
        self.concat = true;
        self
    }

    pub fn merge(mut self) -> Self {
        self.merge = true;
        self
    }

    fn merge_mode(&self) -> MergeMode {
        MergeMode::from_flags(self.concat, self.merge)
    }
}

/// What a load left running.
#[derive(Debug)]
pub enum Playback {
    /// Every command has been emitted.
    Finished,
    /// Chunks keep arriving on a background task.
    Streaming(StreamingTask),
}

impl Playback {
    pub fn into_task(self) -> Option<StreamingTask> {
        match self {
            Playback::Finished => None,
            Playback::Streaming(task) => Some(task),
        }
    }

    /// Waits for a background stream, if any.
    pub async fn wait(self) -> Result<StreamOutcome> {
        match self {
            Playback::Finished => Ok(StreamOutcome::Completed { chunks: 0 }),
            Playback::Streaming(task) => task.join().await,
        }
    }
}

/// A waveform widget bound to one id. Each `load` starts a new batch or
/// streaming session on it.
pub struct Player {
    id: String,
    language: Language,
    config: PlayerConfig,
    sink: Arc<dyn RenderSink>,
    encoder: Arc<dyn Encoder>,
    clock: Arc<dyn Clock>,
    track_performance: bool,
    shell_displayed: bool,
    active: Option<CancellationToken>,
    core: SharedCore,
}

impl Player {
    pub fn new(sink: Arc<dyn RenderSink>, language: Language, track_performance: bool) -> Self {
        let id = Uuid::new_v4().simple().to_string();
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let tracker = build_tracker(track_performance, &clock, language, &sink);
        let core = SessionCore::new(CommandChannel::new(id.clone(), sink.clone()), tracker);
        Self {
            id,
            language,
            config: PlayerConfig::default(),
            sink,
            encoder: Arc::new(PcmEncoder),
            clock,
            track_performance,
            shell_displayed: false,
            active: None,
            core: Arc::new(Mutex::new(core)),
        }
    }

    pub fn with_config(mut self, config: PlayerConfig) -> Self {
        self.config = config;
        self
    }

    /// Merges a JSON override file over the default display options.
    pub fn with_config_file(self, path: &Path) -> Result<Self> {
        let config = PlayerConfig::from_file(path).map_err(PlayerError::Config)?;
        Ok(self.with_config(config))
    }

    pub fn with_encoder(mut self, encoder: Arc<dyn Encoder>) -> Self {
        self.encoder = encoder;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        lock(&self.core).tracker =
            build_tracker(self.track_performance, &clock, self.language, &self.sink);
        self.clock = clock;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn state(&self) -> PlaybackState {
        lock(&self.core).state
    }

    /// The most recent session, if anything was loaded.
    pub fn session(&self) -> Option<PlayerSession> {
        lock(&self.core).session.clone()
    }

    pub fn performance(&self) -> Result<PerformanceSummary> {
        lock(&self.core).tracker.summary()
    }

    /// Probes a loosely typed value before loading it.
    pub fn load_value(&mut self, audio: Value, options: LoadOptions) -> Result<Playback> {
        let source = AudioSource::probe(audio)?;
        self.load(source, options)
    }

    /// Resets the widget and plays `audio` in one batch or as a stream. A
    /// stream still running from an earlier load is cancelled first.
    pub fn load(
        &mut self,
        audio: impl Into<AudioSource>,
        options: LoadOptions,
    ) -> Result<Playback> {
        let audio = audio.into();
        let mode = if audio.is_streaming() {
            PlaybackMode::Streaming
        } else {
            PlaybackMode::Batch
        };
        // Resolved before anything is emitted so a missing runtime leaves the
        // widget untouched.
        let runtime = match &audio {
            AudioSource::Stream(_) => Some(Handle::try_current().map_err(|err| {
                PlayerError::StreamTask(format!("asynchronous audio needs a tokio runtime: {err}"))
            })?),
            _ => None,
        };

        if let Some(previous) = self.active.take() {
            previous.cancel();
        }
        self.display_shell();
        let generation = self.initialize(mode, options.rate);

        match audio {
            AudioSource::Path(path) => self.load_batch(AudioData::Path(path), &options),
            AudioSource::Samples(samples) => self.load_batch(samples, &options),
            AudioSource::Chunks(chunks) => {
                let mut feeder = self.start_stream(generation, &options);
                for chunk in chunks {
                    if !feeder.feed(chunk)? {
                        return Ok(Playback::Finished);
                    }
                }
                feeder.finish();
                Ok(Playback::Finished)
            }
            AudioSource::Stream(stream) => {
                let Some(runtime) = runtime else {
                    return Err(PlayerError::StreamTask(
                        "no runtime for asynchronous audio".to_string(),
                    ));
                };
                let feeder = self.start_stream(generation, &options);
                let cancel = CancellationToken::new();
                self.active = Some(cancel.clone());
                Ok(Playback::Streaming(StreamingTask::spawn(&runtime, stream, feeder, cancel)))
            }
        }
    }

    /// Cancels a running stream and releases the browser-side player. The
    /// playback state is left as is.
    pub fn destroy(&mut self) {
        if let Some(active) = self.active.take() {
            active.cancel();
        }
        let mut core = lock(&self.core);
        core.generation += 1;
        core.channel.send(&WidgetCommand::Destroy);
    }

    fn display_shell(&mut self) {
        if self.shell_displayed {
            return;
        }
        let html = render_widget(&self.id, &self.config, self.language, WidgetAssets::global());
        self.sink.display(&html);
        self.shell_displayed = true;
    }

    fn initialize(&self, mode: PlaybackMode, rate: Option<u32>) -> u64 {
        let mut core = lock(&self.core);
        core.generation += 1;
        core.session = Some(PlayerSession::new(
            self.id.clone(),
            rate.unwrap_or(DEFAULT_SAMPLE_RATE),
            mode,
            self.track_performance,
        ));
        core.state = PlaybackState::Initialized;
        core.channel.send(&WidgetCommand::Reset {
            streaming: mode.is_streaming(),
        });
        log_info!("[{}] session started ({:?})", self.id, mode);
        core.generation
    }

    fn load_batch(&self, audio: AudioData, options: &LoadOptions) -> Result<Playback> {
        let mut stopwatch = Stopwatch::new(self.clock.clone(), self.language).named("encode");
        stopwatch.start();
        let encoded = self
            .encoder
            .encode(&audio, EncodeOptions::batch(options.rate))
            .map_err(PlayerError::Encode)?;
        stopwatch.stop()?;

        let regions = load_optional(options.alignments.as_ref(), options.merge_mode())?;

        let mut core = lock(&self.core);
        core.channel.send(&WidgetCommand::Load {
            url: format!("data:audio/wav;base64,{}", encoded.payload),
            regions,
        });
        if let Some(session) = core.session.as_mut() {
            session.sample_rate = encoded.sample_rate;
        }
        core.state = PlaybackState::BatchLoaded;
        Ok(Playback::Finished)
    }

    fn start_stream(&self, generation: u64, options: &LoadOptions) -> ChunkFeeder {
        if options.alignments.is_some() {
            log_debug!("[{}] alignments are ignored while streaming", self.id);
        }
        {
            let mut core = lock(&self.core);
            core.tracker.start();
            core.state = PlaybackState::StreamingActive;
        }
        ChunkFeeder::new(self.core.clone(), self.encoder.clone(), generation, options.rate)
    }
}

fn build_tracker(
    enabled: bool,
    clock: &Arc<dyn Clock>,
    language: Language,
    sink: &Arc<dyn RenderSink>,
) -> PerformanceTracker {
    if enabled {
        PerformanceTracker::new(clock.clone(), language, sink.clone())
    } else {
        PerformanceTracker::disabled()
    }
}
