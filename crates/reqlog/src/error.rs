use thiserror::Error;

/// Returned when a string does not name a known [`Severity`](crate::Severity).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown severity level: {0}")]
pub struct ParseSeverityError(pub(crate) String);

impl ParseSeverityError {
    /// The rejected input.
    pub fn input(&self) -> &str {
        &self.0
    }
}

/// Error type for configuration loading failures.
#[cfg(feature = "env")]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment variable deserialization failed.
    #[error("Configuration error: {0}")]
    Env(#[from] envy::Error),

    /// A `.env` file existed but could not be read.
    #[error("Failed to load .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),
}
