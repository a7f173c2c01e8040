//! Reporter configuration.
//!
//! Selects the default sink and its color mode. The message policy is not
//! configurable here: it is fixed per build by the `elide-messages` feature.
//!
//! # Environment
//!
//! - `WARD_SINK`: `terminal` (default), `tracing` or `silent`
//! - `WARD_COLOR`: `auto` (default), `always` or `never`

use std::str::FromStr;

use crate::sink::ColorMode;

pub const SINK_ENV: &str = "WARD_SINK";
pub const COLOR_ENV: &str = "WARD_COLOR";

/// Invalid configuration input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {key} setting `{value}` (expected {expected})")]
    InvalidValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Which default sink the reporter writes to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SinkKind {
    #[default]
    Terminal,
    Tracing,
    Silent,
}

impl FromStr for SinkKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "terminal" | "stderr" => Ok(SinkKind::Terminal),
            "tracing" | "log" => Ok(SinkKind::Tracing),
            "silent" | "none" => Ok(SinkKind::Silent),
            _ => Err(ConfigError::InvalidValue {
                key: "sink",
                value: s.to_owned(),
                expected: "terminal, tracing or silent",
            }),
        }
    }
}

/// Configuration for building a [`Reporter`](crate::Reporter).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ReporterConfig {
    pub sink: SinkKind,
    pub color: ColorMode,
}

impl ReporterConfig {
    /// Read configuration from the process environment.
    ///
    /// Unset variables use defaults. Invalid values also fall back to the
    /// default, with a warning logged through `tracing`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) but with an arbitrary variable
    /// source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = ReporterConfig::default();
        if let Some(raw) = lookup(SINK_ENV) {
            match raw.parse() {
                Ok(sink) => config.sink = sink,
                Err(err) => tracing::warn!(%err, "ignoring {SINK_ENV}"),
            }
        }
        if let Some(raw) = lookup(COLOR_ENV) {
            match raw.parse() {
                Ok(color) => config.color = color,
                Err(err) => tracing::warn!(%err, "ignoring {COLOR_ENV}"),
            }
        }
        config
    }

    /// Strict variant of [`from_lookup`](Self::from_lookup) that reports the
    /// first invalid value.
    pub fn try_from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = ReporterConfig::default();
        if let Some(raw) = lookup(SINK_ENV) {
            config.sink = raw.parse()?;
        }
        if let Some(raw) = lookup(COLOR_ENV) {
            config.color = raw.parse()?;
        }
        Ok(config)
    }
}
