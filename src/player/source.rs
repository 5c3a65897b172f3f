use std::fmt;
use std::path::PathBuf;

use futures_util::stream::{BoxStream, Stream, StreamExt};
use serde_json::Value;

use crate::encode::AudioData;
use crate::error::{PlayerError, Result};

/// One element of a streaming source. A chunk that carries its own rate
/// switches the session to that rate.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamChunk {
    pub audio: AudioData,
    pub sample_rate: Option<u32>,
}

impl StreamChunk {
    pub fn new(audio: impl Into<AudioData>) -> Self {
        Self {
            audio: audio.into(),
            sample_rate: None,
        }
    }

    pub fn with_rate(audio: impl Into<AudioData>, sample_rate: u32) -> Self {
        Self {
            audio: audio.into(),
            sample_rate: Some(sample_rate),
        }
    }
}

impl From<Vec<f32>> for StreamChunk {
    fn from(samples: Vec<f32>) -> Self {
        StreamChunk::new(samples)
    }
}

impl From<(Vec<f32>, u32)> for StreamChunk {
    fn from((samples, rate): (Vec<f32>, u32)) -> Self {
        StreamChunk::with_rate(samples, rate)
    }
}

impl From<AudioData> for StreamChunk {
    fn from(audio: AudioData) -> Self {
        StreamChunk::new(audio)
    }
}

/// What a player is asked to play. Resolved once when a session starts.
pub enum AudioSource {
    /// A decodable media file, played in one batch.
    Path(PathBuf),
    /// Samples already in memory, played in one batch.
    Samples(AudioData),
    /// Chunks pulled synchronously on the caller's thread.
    Chunks(Box<dyn Iterator<Item = StreamChunk> + Send>),
    /// Chunks produced asynchronously and consumed by a background task.
    Stream(BoxStream<'static, StreamChunk>),
}

impl AudioSource {
    pub fn chunks<I>(chunks: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<StreamChunk> + 'static,
        I::IntoIter: Send + 'static,
    {
        AudioSource::Chunks(Box::new(chunks.into_iter().map(Into::into)))
    }

    pub fn stream<S>(stream: S) -> Self
    where
        S: Stream + Send + 'static,
        S::Item: Into<StreamChunk>,
    {
        AudioSource::Stream(stream.map(Into::into).boxed())
    }

    pub fn is_streaming(&self) -> bool {
        matches!(self, AudioSource::Chunks(_) | AudioSource::Stream(_))
    }

    /// Classifies a loosely typed value: a string is a media path, a list of
    /// numbers is mono samples, a list of equally long numeric lists is one
    /// list per channel. Anything else is not audio.
    pub fn probe(value: Value) -> Result<Self> {
        match value {
            Value::String(path) => Ok(AudioSource::Path(PathBuf::from(path))),
            Value::Array(entries) if !entries.is_empty() => {
                if let Some(samples) = numeric(&entries) {
                    return Ok(AudioSource::Samples(AudioData::mono(samples)));
                }
                let channels = entries
                    .iter()
                    .map(|entry| entry.as_array().and_then(|values| numeric(values)))
                    .collect::<Option<Vec<_>>>()
                    .ok_or_else(|| unknown(&Value::Array(entries.clone())))?;
                let frames = channels[0].len();
                if channels.iter().any(|channel| channel.len() != frames) {
                    return Err(PlayerError::UnknownAudioSource(
                        "channels have different lengths".to_string(),
                    ));
                }
                let channel_count = u16::try_from(channels.len())
                    .map_err(|_| PlayerError::UnknownAudioSource("too many channels".to_string()))?;
                let samples = (0..frames)
                    .flat_map(|frame| channels.iter().map(move |channel| channel[frame]))
                    .collect();
                Ok(AudioSource::Samples(AudioData::Samples {
                    samples,
                    channels: channel_count,
                }))
            }
            other => Err(unknown(&other)),
        }
    }
}

fn numeric(values: &[Value]) -> Option<Vec<f32>> {
    values
        .iter()
        .map(|value| value.as_f64().map(|sample| sample as f32))
        .collect()
}

fn unknown(value: &Value) -> PlayerError {
    let mut shown = value.to_string();
    if shown.len() > 64 {
        let cut = (0..=64).rev().find(|&i| shown.is_char_boundary(i)).unwrap_or(0);
        shown.truncate(cut);
        shown.push_str("...");
    }
    PlayerError::UnknownAudioSource(format!(
        "expected decodable media or a chunk sequence, got {shown}"
    ))
}

impl From<PathBuf> for AudioSource {
    fn from(path: PathBuf) -> Self {
        AudioSource::Path(path)
    }
}

impl From<Vec<f32>> for AudioSource {
    fn from(samples: Vec<f32>) -> Self {
        AudioSource::Samples(AudioData::mono(samples))
    }
}

impl From<AudioData> for AudioSource {
    fn from(audio: AudioData) -> Self {
        match audio {
            AudioData::Path(path) => AudioSource::Path(path),
            samples => AudioSource::Samples(samples),
        }
    }
}

impl fmt::Debug for AudioSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioSource::Path(path) => f.debug_tuple("Path").field(path).finish(),
            AudioSource::Samples(audio) => f.debug_tuple("Samples").field(audio).finish(),
            AudioSource::Chunks(_) => f.write_str("Chunks(..)"),
            AudioSource::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}
