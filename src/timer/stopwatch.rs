use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::{PlayerError, Result};
use crate::language::Language;

use super::clock::{Clock, SystemClock};

const ENABLE_LOGS: bool = true;

use crate::log_info;

/// Named, language-aware stopwatch. Logs the elapsed time when stopped.
#[derive(Clone)]
pub struct Stopwatch {
    name: Option<String>,
    language: Language,
    clock: Arc<dyn Clock>,
    started_at: Option<Instant>,
    stopped_at: Option<Instant>,
}

impl Stopwatch {
    pub fn new(clock: Arc<dyn Clock>, language: Language) -> Self {
        Self {
            name: None,
            language,
            clock,
            started_at: None,
            stopped_at: None,
        }
    }

    /// A stopwatch on the system clock that is already running.
    pub fn started(name: impl Into<String>, language: Language) -> Self {
        let mut stopwatch = Self::new(Arc::new(SystemClock), language).named(name);
        stopwatch.start();
        stopwatch
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// (Re)starts timing and clears a previous stop.
    pub fn start(&mut self) {
        self.started_at = Some(self.clock.now());
        self.stopped_at = None;
    }

    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    /// Freezes the elapsed time and logs it.
    pub fn stop(&mut self) -> Result<Duration> {
        if self.started_at.is_none() {
            return Err(PlayerError::TrackerNotStarted);
        }
        self.stopped_at = Some(self.clock.now());
        log_info!("{}", self);
        self.elapsed()
    }

    /// Time since `start`, or up to `stop` once stopped.
    pub fn elapsed(&self) -> Result<Duration> {
        let started_at = self.started_at.ok_or(PlayerError::TrackerNotStarted)?;
        let end = self.stopped_at.unwrap_or_else(|| self.clock.now());
        Ok(end.saturating_duration_since(started_at))
    }
}

impl fmt::Display for Stopwatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "[{name}] ")?;
        }
        match self.elapsed() {
            Ok(elapsed) => write!(
                f,
                "{}: {:.6} {}",
                self.language.cost_label(),
                elapsed.as_secs_f64(),
                self.language.seconds_unit()
            ),
            Err(_) => f.write_str(self.language.not_started_label()),
        }
    }
}

impl fmt::Debug for Stopwatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stopwatch")
            .field("name", &self.name)
            .field("language", &self.language)
            .field("started_at", &self.started_at)
            .field("stopped_at", &self.stopped_at)
            .finish()
    }
}
