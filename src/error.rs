use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlayerError>;

#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("unknown audio source: {0}")]
    UnknownAudioSource(String),
    #[error("unsupported alignment source: {0}")]
    UnsupportedSourceKind(String),
    #[error("malformed alignment file '{}': {reason}", path.display())]
    MalformedAlignmentFile { path: PathBuf, reason: String },
    #[error("timer not started")]
    TrackerNotStarted,
    #[error("audio encoding failed: {0:#}")]
    Encode(#[source] anyhow::Error),
    #[error("invalid player config: {0:#}")]
    Config(#[source] anyhow::Error),
    #[error("streaming task failed: {0}")]
    StreamTask(String),
}

impl PlayerError {
    pub(crate) fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::MalformedAlignmentFile {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
