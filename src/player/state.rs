use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum PlaybackState {
    #[default]
    Idle,
    Initialized,
    BatchLoaded,
    StreamingActive,
    Done,
}

impl PlaybackState {
    /// No further commands will be issued for the current session.
    pub fn is_terminal(&self) -> bool {
        matches!(self, PlaybackState::BatchLoaded | PlaybackState::Done)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum PlaybackMode {
    Batch,
    Streaming,
}

impl PlaybackMode {
    pub fn is_streaming(&self) -> bool {
        matches!(self, PlaybackMode::Streaming)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_players_start_idle() {
        let state = PlaybackState::default();
        assert_eq!(state, PlaybackState::Idle);
        assert!(!state.is_terminal());
        assert_eq!(serde_json::to_value(state).unwrap(), "idle");
    }

    #[test]
    fn batch_and_done_are_terminal() {
        assert!(PlaybackState::BatchLoaded.is_terminal());
        assert!(PlaybackState::Done.is_terminal());
        assert!(!PlaybackState::StreamingActive.is_terminal());
    }
}
