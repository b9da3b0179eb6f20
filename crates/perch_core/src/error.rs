//! Error types for Perch.
//!
//! Placement and visibility never fail at runtime: degenerate geometry
//! degrades to odd coordinates instead of erroring. The only fatal class is
//! configuration, raised at setup.

use thiserror::Error;

/// Main error type for Perch.
#[derive(Debug, Error)]
pub enum PerchError {
    /// A placement value outside `top`, `right`, `bottom`, `left`.
    #[error("Invalid tooltip placement: {value}")]
    InvalidPlacement {
        /// The rejected value, as given.
        value: String,
    },

    /// Configuration error.
    #[error("Config error: {message}")]
    Config {
        /// Human-readable error message.
        message: String,
        /// Optional underlying error source.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The host environment is missing something the binding needs.
    #[error("Host error: {message}")]
    Host {
        /// Human-readable error message.
        message: String,
    },
}

impl PerchError {
    // ========== Constructors ==========

    /// Create an invalid placement error.
    pub fn invalid_placement(value: impl Into<String>) -> Self {
        Self::InvalidPlacement { value: value.into() }
    }

    /// Create a new config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config { message: message.into(), source: None }
    }

    /// Create a new config error with source.
    pub fn config_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config { message: message.into(), source: Some(Box::new(source)) }
    }

    /// Create a new host error.
    pub fn host(message: impl Into<String>) -> Self {
        Self::Host { message: message.into() }
    }

    // ========== Methods ==========

    /// Check if this error is a configuration problem (always fatal).
    pub fn is_config(&self) -> bool {
        matches!(self, Self::InvalidPlacement { .. } | Self::Config { .. })
    }

    /// Get the error category name.
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidPlacement { .. } => "Placement",
            Self::Config { .. } => "Config",
            Self::Host { .. } => "Host",
        }
    }

    /// Get actionable hint for the developer.
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::InvalidPlacement { .. } => Some("Use one of: top, right, bottom, left"),
            Self::Config { .. } => None,
            Self::Host { .. } => Some("Perch must run inside a browser document"),
        }
    }
}

// ========== Error Conversions ==========

/// Convert from std::io::Error to PerchError.
impl From<std::io::Error> for PerchError {
    fn from(err: std::io::Error) -> Self {
        PerchError::config_with_source(format!("Failed to read config: {err}"), err)
    }
}

/// Convert from serde_json::Error to PerchError.
impl From<serde_json::Error> for PerchError {
    fn from(err: serde_json::Error) -> Self {
        PerchError::config_with_source(format!("JSON error: {err}"), err)
    }
}
