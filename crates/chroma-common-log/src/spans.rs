//! Span and timing helpers.

use std::time::{Duration, Instant};

use tracing::{info_span, Span};

/// Create a span for one build stage (`scan`, `emit`, `bundle`).
pub fn stage_span(stage: &'static str) -> Span {
    info_span!("stage", name = stage)
}

/// Create a span for work on a single output format.
pub fn format_span(format: &str) -> Span {
    info_span!("format", name = %format)
}

/// Timing utility for operations.
pub struct Timer {
    start: Instant,
    operation: &'static str,
}

impl Timer {
    /// Start a new timer.
    pub fn start(operation: &'static str) -> Self {
        Self {
            start: Instant::now(),
            operation,
        }
    }

    /// Complete the timer, log and return the elapsed duration.
    pub fn finish(self) -> Duration {
        let duration = self.start.elapsed();
        tracing::debug!(
            operation = %self.operation,
            duration_ms = %duration.as_millis(),
            "operation completed"
        );
        duration
    }
}
