//! Severity levels attached to request records.
//!
//! The set mirrors the levels common to structured-logging backends, ordered
//! from the most verbose to the most severe:
//! `Trace < Debug < Info < Warn < Error < Fatal < Panic`.

use crate::error::ParseSeverityError;
use http::StatusCode;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordered log severity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Finer-grained than debug.
    Trace,
    /// Diagnostic detail.
    Debug,
    /// Normal operation (default).
    #[default]
    Info,
    /// Something worth a look, usually a client error.
    Warn,
    /// A failed request, usually a server error.
    Error,
    /// Unrecoverable for the component.
    Fatal,
    /// Unrecoverable for the process.
    Panic,
}

impl Severity {
    /// All levels, least severe first.
    pub const ALL: [Severity; 7] = [
        Severity::Trace,
        Severity::Debug,
        Severity::Info,
        Severity::Warn,
        Severity::Error,
        Severity::Fatal,
        Severity::Panic,
    ];

    /// Lowercase level name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "trace",
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
            Severity::Fatal => "fatal",
            Severity::Panic => "panic",
        }
    }

    /// Conventional status banding: 5xx is `Error`, 4xx is `Warn`, anything
    /// else is `Info`.
    pub fn from_status(status: StatusCode) -> Self {
        if status.is_server_error() {
            Severity::Error
        } else if status.is_client_error() {
            Severity::Warn
        } else {
            Severity::Info
        }
    }

    /// Nearest `tracing` level. `tracing` stops at `ERROR`, so `Fatal` and
    /// `Panic` collapse onto it.
    pub fn as_tracing_level(&self) -> tracing::Level {
        match self {
            Severity::Trace => tracing::Level::TRACE,
            Severity::Debug => tracing::Level::DEBUG,
            Severity::Info => tracing::Level::INFO,
            Severity::Warn => tracing::Level::WARN,
            Severity::Error | Severity::Fatal | Severity::Panic => tracing::Level::ERROR,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Severity::Trace),
            "debug" => Ok(Severity::Debug),
            "info" => Ok(Severity::Info),
            "warn" | "warning" => Ok(Severity::Warn),
            "error" => Ok(Severity::Error),
            "fatal" => Ok(Severity::Fatal),
            "panic" => Ok(Severity::Panic),
            _ => Err(ParseSeverityError(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

impl From<Severity> for tracing::Level {
    fn from(severity: Severity) -> Self {
        severity.as_tracing_level()
    }
}
