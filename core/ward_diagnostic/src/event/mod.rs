//! Diagnostic event model.
//!
//! A [`DiagnosticEvent`] describes one contract violation: where it happened
//! ([`CallSite`]), what was violated ([`Primary`]), an optional caller-authored
//! explanation (the detail), how severe it is ([`Severity`]) and whether the
//! process is about to terminate.

use std::borrow::Cow;
use std::fmt;

use crate::site::CallSite;

/// Severity attached to every event.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Severity {
    #[default]
    Error,
    Warning,
    /// Raised on behalf of a hosted script.
    Script,
    /// Raised while compiling or validating a shader.
    Shader,
}

impl Severity {
    /// Everything except `Warning` counts as an error.
    pub fn is_error(self) -> bool {
        !matches!(self, Severity::Warning)
    }

    /// Upper-case label used in rendered diagnostics.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Error => "ERROR",
            Severity::Warning => "WARNING",
            Severity::Script => "SCRIPT ERROR",
            Severity::Shader => "SHADER ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An index that fell outside `[0, size)`.
///
/// Values are stored widened to `i64`; the guard that produced the event
/// compared them in the caller's own integer type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct IndexViolation {
    pub index: i64,
    pub size: i64,
    /// Source text of the index expression.
    pub index_text: &'static str,
    /// Source text of the size expression.
    pub size_text: &'static str,
}

impl IndexViolation {
    pub fn new(index: i64, size: i64, index_text: &'static str, size_text: &'static str) -> Self {
        IndexViolation {
            index,
            size,
            index_text,
            size_text,
        }
    }
}

impl fmt::Display for IndexViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Index {} = {} is out of bounds ({} = {}).",
            self.index_text, self.index, self.size_text, self.size
        )
    }
}

/// What was violated.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Primary {
    /// Free-form text, e.g. `Condition "x > 3" is true.`
    Message(Cow<'static, str>),
    /// Index/bound pair, rendered canonically at dispatch time.
    Index(IndexViolation),
}

impl Primary {
    /// Empty primary, used by pure print events whose text is all detail.
    pub const EMPTY: Primary = Primary::Message(Cow::Borrowed(""));

    /// Render the primary message.
    pub fn render(&self) -> Cow<'_, str> {
        match self {
            Primary::Message(text) => Cow::Borrowed(text.as_ref()),
            Primary::Index(violation) => Cow::Owned(violation.to_string()),
        }
    }

    fn is_empty(&self) -> bool {
        matches!(self, Primary::Message(text) if text.is_empty())
    }
}

impl From<&'static str> for Primary {
    fn from(text: &'static str) -> Self {
        Primary::Message(Cow::Borrowed(text))
    }
}

impl From<String> for Primary {
    fn from(text: String) -> Self {
        Primary::Message(Cow::Owned(text))
    }
}

impl From<IndexViolation> for Primary {
    fn from(violation: IndexViolation) -> Self {
        Primary::Index(violation)
    }
}

/// One dispatched violation.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DiagnosticEvent {
    pub site: CallSite,
    pub primary: Primary,
    /// Caller-authored explanation; empty when none was given or when the
    /// message policy elided it.
    pub detail: String,
    pub severity: Severity,
    /// The process terminates once this event has been dispatched.
    pub fatal: bool,
}

impl DiagnosticEvent {
    /// Create a non-fatal error event with no detail.
    pub fn new(site: CallSite, primary: impl Into<Primary>) -> Self {
        DiagnosticEvent {
            site,
            primary: primary.into(),
            detail: String::new(),
            severity: Severity::Error,
            fatal: false,
        }
    }

    /// Create an index-out-of-bounds event.
    pub fn index(site: CallSite, violation: IndexViolation) -> Self {
        Self::new(site, Primary::Index(violation))
    }

    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = detail.into();
        self
    }

    #[must_use]
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Mark the event as fatal.
    #[must_use]
    pub fn fatal(mut self) -> Self {
        self.fatal = true;
        self
    }

    /// The rendered primary message.
    pub fn primary_message(&self) -> Cow<'_, str> {
        self.primary.render()
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }

    pub fn has_detail(&self) -> bool {
        !self.detail.is_empty()
    }

    /// The index/bound pair, for index events.
    pub fn index_violation(&self) -> Option<&IndexViolation> {
        match &self.primary {
            Primary::Index(violation) => Some(violation),
            Primary::Message(_) => None,
        }
    }

    /// Render the first line (without the location line).
    pub fn headline(&self) -> String {
        let mut line = String::new();
        if self.fatal {
            line.push_str("FATAL: ");
        }
        line.push_str(self.site.function);
        line.push_str(": ");
        if self.primary.is_empty() {
            line.push_str(&self.detail);
        } else {
            line.push_str(&self.primary.render());
            if self.has_detail() {
                line.push_str(" - ");
                line.push_str(&self.detail);
            }
        }
        line
    }
}

/// Canonical two-line rendering:
///
/// ```text
/// ERROR: set_size: Index index = 5 is out of bounds (len = 3). - bad slot
///    at: src/slots.rs:42
/// ```
impl fmt::Display for DiagnosticEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}\n   at: {}:{}",
            self.severity,
            self.headline(),
            self.site.file,
            self.site.line
        )
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
