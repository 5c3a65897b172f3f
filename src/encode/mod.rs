pub mod decode;

pub use decode::{decode_file, DecodedAudio};

use std::io::Cursor;
use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use hound::{SampleFormat, WavSpec, WavWriter};

/// Rate assumed for in-memory samples when neither the caller nor the
/// stream says otherwise.
pub const DEFAULT_SAMPLE_RATE: u32 = 16_000;

/// Audio handed to an [`Encoder`].
#[derive(Debug, Clone, PartialEq)]
pub enum AudioData {
    /// A media file to decode.
    Path(PathBuf),
    /// Interleaved samples in `[-1.0, 1.0]`.
    Samples { samples: Vec<f32>, channels: u16 },
}

impl AudioData {
    pub fn mono(samples: Vec<f32>) -> Self {
        AudioData::Samples {
            samples,
            channels: 1,
        }
    }
}

impl From<Vec<f32>> for AudioData {
    fn from(samples: Vec<f32>) -> Self {
        AudioData::mono(samples)
    }
}

impl From<PathBuf> for AudioData {
    fn from(path: PathBuf) -> Self {
        AudioData::Path(path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    pub rate: Option<u32>,
    pub to_mono: bool,
    /// Raw PCM for incremental feeding instead of a complete WAV file.
    pub headerless: bool,
}

impl EncodeOptions {
    pub fn batch(rate: Option<u32>) -> Self {
        Self {
            rate,
            to_mono: true,
            headerless: false,
        }
    }

    pub fn streaming(rate: Option<u32>) -> Self {
        Self {
            rate,
            to_mono: true,
            headerless: true,
        }
    }
}

/// A playback payload and the rate it plays at.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedAudio {
    pub payload: String,
    pub sample_rate: u32,
    pub frames: usize,
}

impl EncodedAudio {
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frames as f64 / self.sample_rate as f64
    }
}

/// Turns audio into an opaque payload the widget can play.
pub trait Encoder: Send + Sync {
    fn encode(&self, audio: &AudioData, options: EncodeOptions) -> Result<EncodedAudio>;
}

/// Base64 PCM16 little-endian; WAV-wrapped unless `headerless`. Files play at
/// their native rate, samples at the requested rate.
#[derive(Debug, Clone, Copy, Default)]
pub struct PcmEncoder;

impl Encoder for PcmEncoder {
    fn encode(&self, audio: &AudioData, options: EncodeOptions) -> Result<EncodedAudio> {
        let (samples, channels, sample_rate) = match audio {
            AudioData::Path(path) => {
                let decoded = decode_file(path)?;
                (decoded.samples, decoded.channels, decoded.sample_rate)
            }
            AudioData::Samples { samples, channels } => (
                samples.clone(),
                *channels,
                options.rate.unwrap_or(DEFAULT_SAMPLE_RATE),
            ),
        };
        ensure!(channels > 0, "audio must have at least one channel");
        ensure!(sample_rate > 0, "sample rate must be positive");

        let (samples, channels) = if options.to_mono && channels > 1 {
            (downmix(&samples, channels), 1)
        } else {
            (samples, channels)
        };
        let frames = samples.len() / channels as usize;

        let bytes = if options.headerless {
            pcm16_bytes(&samples)
        } else {
            wav_bytes(&samples, channels, sample_rate)?
        };

        Ok(EncodedAudio {
            payload: BASE64_STANDARD.encode(bytes),
            sample_rate,
            frames,
        })
    }
}

/// Averages interleaved frames into one channel.
pub fn downmix(samples: &[f32], channels: u16) -> Vec<f32> {
    let channels = channels.max(1) as usize;
    samples
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
        .collect()
}

fn to_pcm16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16
}

fn pcm16_bytes(samples: &[f32]) -> Vec<u8> {
    samples
        .iter()
        .flat_map(|&sample| to_pcm16(sample).to_le_bytes())
        .collect()
}

fn wav_bytes(samples: &[f32], channels: u16, sample_rate: u32) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    {
        let spec = WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::new(&mut cursor, spec).context("failed to start WAV stream")?;
        for &sample in samples {
            writer.write_sample(to_pcm16(sample))?;
        }
        writer.finalize().context("failed to finalize WAV stream")?;
    }
    Ok(cursor.into_inner())
}
