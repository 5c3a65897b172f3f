mod table;
mod types;

pub use table::render_table;
pub use types::PerformanceSummary;

use std::sync::Arc;

use crate::alignment::item::round_to;
use crate::error::Result;
use crate::language::Language;
use crate::render::{DisplaySlot, RenderSink};
use crate::timer::{Clock, Stopwatch};

/// Tracks first-chunk latency and the running real-time factor of a
/// streaming session, re-rendering a summary table in one display slot on
/// every chunk. A disabled tracker neither times nor renders anything.
pub struct PerformanceTracker {
    inner: Option<TrackerState>,
}

struct TrackerState {
    stopwatch: Stopwatch,
    language: Language,
    slot: DisplaySlot,
    summary: PerformanceSummary,
    latency_captured: bool,
}

impl PerformanceTracker {
    pub fn new(clock: Arc<dyn Clock>, language: Language, sink: Arc<dyn RenderSink>) -> Self {
        Self {
            inner: Some(TrackerState {
                stopwatch: Stopwatch::new(clock, language).named("stream"),
                language,
                slot: DisplaySlot::new(sink),
                summary: PerformanceSummary::default(),
                latency_captured: false,
            }),
        }
    }

    pub fn disabled() -> Self {
        Self { inner: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.is_some()
    }

    /// Captures `t0` and resets all counters.
    pub fn start(&mut self) {
        if let Some(state) = self.inner.as_mut() {
            state.stopwatch.start();
            state.summary = PerformanceSummary::default();
            state.latency_captured = false;
        }
    }

    pub fn record_chunk(&mut self, index: usize, chunk_secs: f64) -> Result<()> {
        let Some(state) = self.inner.as_mut() else {
            return Ok(());
        };
        let elapsed = state.stopwatch.elapsed()?.as_secs_f64();

        if index == 0 && !state.latency_captured {
            state.summary.latency_ms = elapsed * 1000.0;
            state.latency_captured = true;
        }
        state.summary.chunk_count += 1;
        state.summary.total_audio_secs += chunk_secs;
        if state.summary.total_audio_secs > 0.0 {
            state.summary.real_time_factor = round_to(elapsed / state.summary.total_audio_secs, 2);
        }

        let html = render_table(&[
            (
                state.language.latency_label(),
                format!("{:.2} ms", state.summary.latency_ms),
            ),
            (
                state.language.rtf_label(),
                format!("{:.2}", state.summary.real_time_factor),
            ),
        ]);
        state.slot.render(&html);
        Ok(())
    }

    pub fn summary(&self) -> Result<PerformanceSummary> {
        match &self.inner {
            None => Ok(PerformanceSummary::default()),
            Some(state) => {
                state.stopwatch.elapsed()?;
                Ok(state.summary)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::error::PlayerError;
    use crate::render::{RecordingSink, RenderEvent};
    use crate::timer::ManualClock;

    fn tracker() -> (PerformanceTracker, ManualClock, RecordingSink) {
        let clock = ManualClock::new();
        let sink = RecordingSink::new();
        let tracker =
            PerformanceTracker::new(Arc::new(clock.clone()), Language::En, Arc::new(sink.clone()));
        (tracker, clock, sink)
    }

    #[test]
    fn summary_before_start_fails() {
        let (tracker, _, _) = tracker();
        assert!(matches!(tracker.summary(), Err(PlayerError::TrackerNotStarted)));
    }

    #[test]
    fn latency_is_captured_once_on_first_chunk() {
        let (mut tracker, clock, _) = tracker();
        tracker.start();
        clock.advance(Duration::from_millis(120));
        tracker.record_chunk(0, 0.5).unwrap();
        clock.advance(Duration::from_millis(500));
        tracker.record_chunk(1, 0.5).unwrap();

        let summary = tracker.summary().unwrap();
        assert!((summary.latency_ms - 120.0).abs() < 1e-6);
        assert_eq!(summary.chunk_count, 2);
        assert_eq!(summary.total_audio_secs, 1.0);
        assert_eq!(summary.real_time_factor, 0.62);
    }

    #[test]
    fn rtf_stays_zero_until_audio_accumulates() {
        let (mut tracker, clock, _) = tracker();
        tracker.start();
        clock.advance(Duration::from_millis(100));
        tracker.record_chunk(0, 0.0).unwrap();
        assert_eq!(tracker.summary().unwrap().real_time_factor, 0.0);

        tracker.record_chunk(1, 2.0).unwrap();
        let first = tracker.summary().unwrap().real_time_factor;
        assert_eq!(first, 0.05);

        clock.advance(Duration::from_millis(900));
        tracker.record_chunk(2, 0.0).unwrap();
        let second = tracker.summary().unwrap().real_time_factor;
        assert!(second > first);
        assert_eq!(second, 0.5);
    }

    #[test]
    fn every_chunk_replaces_the_table_in_place() {
        let (mut tracker, clock, sink) = tracker();
        tracker.start();
        for index in 0..3 {
            clock.advance(Duration::from_millis(10));
            tracker.record_chunk(index, 0.1).unwrap();
        }

        let events = sink.events();
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], RenderEvent::Display { .. }));
        assert!(events[1..].iter().all(|e| matches!(e, RenderEvent::Update { .. })));
        assert!(events.iter().all(|e| e.id() == events[0].id()));
        assert!(events[2].html().contains("<th>Real-Time Factor</th>"));
    }

    #[test]
    fn disabled_tracker_is_a_no_op() {
        let mut tracker = PerformanceTracker::disabled();
        tracker.start();
        tracker.record_chunk(0, 1.0).unwrap();
        assert_eq!(tracker.summary().unwrap(), PerformanceSummary::default());
    }
}
