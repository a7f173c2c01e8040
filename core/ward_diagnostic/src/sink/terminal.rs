//! Terminal sink.
//!
//! Human-readable diagnostic output with optional ANSI color support.

use std::io::{self, IsTerminal, Write};
use std::str::FromStr;

use parking_lot::Mutex;

use crate::config::ConfigError;
use crate::{DiagnosticEvent, Severity};

use super::DiagnosticSink;

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const WARNING: &str = "\x1b[1;33m"; // Bold yellow
    pub const SCRIPT: &str = "\x1b[1;35m"; // Bold magenta
    pub const SHADER: &str = "\x1b[1;36m"; // Bold cyan
    pub const LOCATION: &str = "\x1b[90m"; // Gray
    pub const RESET: &str = "\x1b[0m";
}

/// Color output mode for the terminal sink.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ColorMode {
    /// Use colors when the destination is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Resolve to a boolean. `is_tty` only matters for `Auto`.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

impl FromStr for ColorMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(ColorMode::Auto),
            "always" | "on" => Ok(ColorMode::Always),
            "never" | "off" => Ok(ColorMode::Never),
            _ => Err(ConfigError::InvalidValue {
                key: "color",
                value: s.to_owned(),
                expected: "auto, always or never",
            }),
        }
    }
}

/// Writes the canonical rendering of each event, one diagnostic per write.
pub struct TerminalSink<W: Write + Send> {
    writer: Mutex<W>,
    colors: bool,
}

impl<W: Write + Send> TerminalSink<W> {
    /// Create a sink with explicit color mode.
    ///
    /// `is_tty` is only consulted for [`ColorMode::Auto`].
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalSink {
            writer: Mutex::new(writer),
            colors: mode.should_use_colors(is_tty),
        }
    }

    /// Consume the sink and return the writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn severity_color(severity: Severity) -> &'static str {
        match severity {
            Severity::Error => colors::ERROR,
            Severity::Warning => colors::WARNING,
            Severity::Script => colors::SCRIPT,
            Severity::Shader => colors::SHADER,
        }
    }

    fn render(&self, event: &DiagnosticEvent) -> String {
        if !self.colors {
            return format!("{event}\n");
        }
        // Fatal events are always red, whatever their severity.
        let color = if event.fatal {
            colors::ERROR
        } else {
            Self::severity_color(event.severity)
        };
        format!(
            "{color}{}:{} {}\n{}   at: {}:{}{}\n",
            event.severity,
            colors::RESET,
            event.headline(),
            colors::LOCATION,
            event.site.file,
            event.site.line,
            colors::RESET
        )
    }
}

impl TerminalSink<io::Stderr> {
    /// Sink writing to stderr; `Auto` checks whether stderr is a terminal.
    pub fn stderr(mode: ColorMode) -> Self {
        let stderr = io::stderr();
        let is_tty = stderr.is_terminal();
        Self::with_color_mode(stderr, mode, is_tty)
    }
}

impl<W: Write + Send> DiagnosticSink for TerminalSink<W> {
    fn emit(&self, event: &DiagnosticEvent) {
        let text = self.render(event);
        let mut writer = self.writer.lock();
        // A failing diagnostic stream has nowhere left to report to.
        if writer.write_all(text.as_bytes()).is_ok() {
            let _ = writer.flush();
        }
    }
}
