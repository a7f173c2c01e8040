//! Default diagnostic sinks.
//!
//! After every registered handler has seen an event, the dispatcher hands it
//! to exactly one default sink. The sink is fixed when the reporter is built
//! and cannot be removed.
//!
//! - [`TerminalSink`]: canonical rendering to a writer (stderr by default)
//! - [`TracingSink`]: forwards events into `tracing`
//! - [`BufferSink`]: captures rendered lines in memory
//! - [`SilentSink`]: discards everything

mod terminal;

pub use terminal::{ColorMode, TerminalSink};

use parking_lot::Mutex;

use crate::DiagnosticEvent;

/// Destination for diagnostics after handler delivery.
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, event: &DiagnosticEvent);
}

/// Forwards events into the `tracing` ecosystem.
///
/// Error severities and fatal events become `ERROR` level; warnings become
/// `WARN`. The call site and detail travel as structured fields.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, event: &DiagnosticEvent) {
        let primary = event.primary_message();
        if event.fatal || event.severity.is_error() {
            tracing::error!(
                target: "ward",
                function = event.site.function,
                file = event.site.file,
                line = event.site.line,
                severity = %event.severity,
                fatal = event.fatal,
                detail = event.detail(),
                "{primary}"
            );
        } else {
            tracing::warn!(
                target: "ward",
                function = event.site.function,
                file = event.site.file,
                line = event.site.line,
                severity = %event.severity,
                detail = event.detail(),
                "{primary}"
            );
        }
    }
}

/// Captures rendered diagnostics.
///
/// Used for tests and for hosts that display diagnostics themselves.
#[derive(Debug, Default)]
pub struct BufferSink {
    lines: Mutex<Vec<String>>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All rendered diagnostics so far, oldest first.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

impl DiagnosticSink for BufferSink {
    fn emit(&self, event: &DiagnosticEvent) {
        self.lines.lock().push(event.to_string());
    }
}

/// Discards all diagnostics.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentSink;

impl DiagnosticSink for SilentSink {
    fn emit(&self, _event: &DiagnosticEvent) {}
}

/// Shared sinks can be handed to a reporter while the caller keeps a handle
/// for inspection.
impl<S: DiagnosticSink + ?Sized> DiagnosticSink for std::sync::Arc<S> {
    fn emit(&self, event: &DiagnosticEvent) {
        (**self).emit(event);
    }
}
