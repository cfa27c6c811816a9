//! Request logger configuration.
//!
//! [`LoggerConfig`] is frozen once built and can be shared by every request
//! the logger handles. Build one with [`LoggerConfigBuilder`]:
//!
//! ```rust
//! use reqlog::{LoggerConfig, Severity};
//!
//! let config = LoggerConfig::builder()
//!     .with_logging_level(Severity::Debug)
//!     .with_request_headers_included()
//!     .build();
//!
//! assert_eq!(config.level(), Severity::Debug);
//! assert!(config.include_request_headers());
//! ```

use crate::level::Severity;
use http::StatusCode;

/// Non-default behavior of a request logger.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoggerConfig {
    level: Option<Severity>,
    include_request_headers: bool,
    status_levels: bool,
}

impl LoggerConfig {
    /// Create a new builder starting from the defaults.
    pub fn builder() -> LoggerConfigBuilder {
        LoggerConfigBuilder::new()
    }

    /// Level every record is emitted at when no status policy applies.
    ///
    /// `Info` unless a level was set explicitly.
    pub fn level(&self) -> Severity {
        self.level.unwrap_or_default()
    }

    /// The level set through [`LoggerConfigBuilder::with_logging_level`], if any.
    pub fn explicit_level(&self) -> Option<Severity> {
        self.level
    }

    /// Whether records carry the serialized request headers.
    pub fn include_request_headers(&self) -> bool {
        self.include_request_headers
    }

    /// Whether the level is derived from the response status.
    pub fn status_levels(&self) -> bool {
        self.status_levels
    }

    /// Severity of the record for a response with `status`.
    ///
    /// An explicit level always wins. Otherwise the status is banded when
    /// status levels are enabled, and everything is `Info` when they are not.
    pub fn severity_for(&self, status: StatusCode) -> Severity {
        match self.level {
            Some(level) => level,
            None if self.status_levels => Severity::from_status(status),
            None => Severity::Info,
        }
    }
}

/// Builder for [`LoggerConfig`].
#[derive(Clone, Debug, Default)]
pub struct LoggerConfigBuilder {
    config: LoggerConfig,
}

impl LoggerConfigBuilder {
    /// Start from the defaults: `Info`, no headers, no status levels.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit every record at `level`, regardless of the response status.
    pub fn with_logging_level(&mut self, level: Severity) -> &mut Self {
        self.config.level = Some(level);
        self
    }

    /// Attach the inbound request headers to every record.
    pub fn with_request_headers_included(&mut self) -> &mut Self {
        self.config.include_request_headers = true;
        self
    }

    /// Derive the level from the response status (5xx error, 4xx warn,
    /// otherwise info). Ignored when an explicit level is set.
    pub fn with_status_levels(&mut self) -> &mut Self {
        self.config.status_levels = true;
        self
    }

    /// Freeze the staged configuration.
    pub fn build(&self) -> LoggerConfig {
        self.config.clone()
    }
}

#[cfg(feature = "env")]
mod env {
    use super::LoggerConfig;
    use crate::error::ConfigError;
    use crate::level::Severity;
    use serde::Deserialize;

    /// Prefix of every environment variable read by [`LoggerConfig::from_env`].
    pub const ENV_PREFIX: &str = "REQLOG_";

    #[derive(Debug, Deserialize)]
    struct EnvConfig {
        level: Option<Severity>,
        #[serde(default)]
        include_request_headers: bool,
        #[serde(default)]
        status_levels: bool,
    }

    impl LoggerConfig {
        /// Load configuration from `REQLOG_*` environment variables.
        ///
        /// - `REQLOG_LEVEL`: fixed severity name (optional)
        /// - `REQLOG_INCLUDE_REQUEST_HEADERS`: `true`/`false`, default `false`
        /// - `REQLOG_STATUS_LEVELS`: `true`/`false`, default `false`
        pub fn from_env() -> Result<Self, ConfigError> {
            let raw: EnvConfig = envy::prefixed(ENV_PREFIX).from_env()?;

            let mut builder = LoggerConfig::builder();
            if let Some(level) = raw.level {
                builder.with_logging_level(level);
            }
            if raw.include_request_headers {
                builder.with_request_headers_included();
            }
            if raw.status_levels {
                builder.with_status_levels();
            }
            Ok(builder.build())
        }
    }

    /// Load a `.env` file from the current directory or its parents.
    ///
    /// A missing file is not an error; `Ok(false)` is returned instead.
    pub fn load_dotenv() -> Result<bool, ConfigError> {
        match dotenvy::dotenv() {
            Ok(_) => Ok(true),
            Err(err) if err.not_found() => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(feature = "env")]
pub use env::{load_dotenv, ENV_PREFIX};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoggerConfigBuilder::new().build();

        assert!(!config.include_request_headers());
        assert_eq!(config.level(), Severity::Info);
        assert_eq!(config.explicit_level(), None);
        assert!(!config.status_levels());
    }

    #[test]
    fn test_config_with_debug_level() {
        let config = LoggerConfig::builder()
            .with_logging_level(Severity::Debug)
            .build();

        assert!(!config.include_request_headers());
        assert_eq!(config.level(), Severity::Debug);
        assert_eq!(config.explicit_level(), Some(Severity::Debug));
    }

    #[test]
    fn test_config_with_included_headers() {
        let config = LoggerConfig::builder()
            .with_request_headers_included()
            .build();

        assert!(config.include_request_headers());
        assert_eq!(config.level(), Severity::Info);
    }

    #[test]
    fn test_config_with_debug_level_and_included_headers() {
        let config = LoggerConfig::builder()
            .with_logging_level(Severity::Debug)
            .with_request_headers_included()
            .build();

        assert!(config.include_request_headers());
        assert_eq!(config.level(), Severity::Debug);
    }

    #[test]
    fn test_builder_snapshot_is_independent() {
        let mut builder = LoggerConfig::builder();
        let before = builder.build();
        builder.with_logging_level(Severity::Error);
        let after = builder.build();

        assert_eq!(before.level(), Severity::Info);
        assert_eq!(after.level(), Severity::Error);
    }

    #[test]
    fn test_default_severity_ignores_status() {
        let config = LoggerConfig::default();

        assert_eq!(
            config.severity_for(StatusCode::INTERNAL_SERVER_ERROR),
            Severity::Info
        );
        assert_eq!(config.severity_for(StatusCode::NOT_FOUND), Severity::Info);
    }

    #[test]
    fn test_status_levels_band_by_status() {
        let config = LoggerConfig::builder().with_status_levels().build();

        assert_eq!(
            config.severity_for(StatusCode::INTERNAL_SERVER_ERROR),
            Severity::Error
        );
        assert_eq!(config.severity_for(StatusCode::NOT_FOUND), Severity::Warn);
        assert_eq!(config.severity_for(StatusCode::FOUND), Severity::Info);
    }

    #[test]
    fn test_explicit_level_beats_status_levels() {
        let config = LoggerConfig::builder()
            .with_status_levels()
            .with_logging_level(Severity::Debug)
            .build();

        assert_eq!(
            config.severity_for(StatusCode::INTERNAL_SERVER_ERROR),
            Severity::Debug
        );
        assert_eq!(config.severity_for(StatusCode::OK), Severity::Debug);
    }
}
