//! Structured span definitions for tracing.

use std::time::Instant;
use tracing::{Level, Span, field, span};

/// Span around one manifest scan.
pub fn scan_span(path: &str, extension: &str) -> Span {
    span!(
        Level::DEBUG,
        "nexus.scan",
        path = path,
        extension = extension,
        documents = field::Empty,
        skipped = field::Empty,
    )
}

/// Span around one discovery pass, recording its counts and duration on finish.
pub struct DiscoverySpan {
    span: Span,
    start: Instant,
}

impl DiscoverySpan {
    pub fn new() -> Self {
        let span = span!(
            Level::INFO,
            "nexus.discover",
            plugins = field::Empty,
            skipped = field::Empty,
            elapsed_ms = field::Empty,
        );
        Self {
            span,
            start: Instant::now(),
        }
    }

    pub fn finish(&self, plugins: usize, skipped: usize) {
        self.span.record("plugins", plugins as u64);
        self.span.record("skipped", skipped as u64);
        self.span
            .record("elapsed_ms", self.start.elapsed().as_millis() as u64);
    }

    pub fn span(&self) -> &Span {
        &self.span
    }
}

impl Default for DiscoverySpan {
    fn default() -> Self {
        Self::new()
    }
}
