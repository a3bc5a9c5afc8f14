//! Error types for Omnibar
//!
//! Every failure the widget can observe is expressed here. None of them
//! cross the widget boundary: they are logged and handed to the
//! configured [`ErrorHook`], and the widget falls back to a safe state.

use std::sync::Arc;

use thiserror::Error;

/// Errors that can occur in Omnibar
#[derive(Debug, Error)]
pub enum OmnibarError {
    /// Invalid configuration, detected at construction
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// An extension failed to produce results for a query
    #[error("Extension '{extension}' failed for query '{query}': {source}")]
    Extension {
        extension: String,
        query: String,
        #[source]
        source: ExtensionError,
    },

    /// The selected item's action failed
    #[error("Action error: {0}")]
    Action(#[from] ActionError),
}

/// Configuration errors. Invalid values are rejected, never clamped.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("input delay must not be negative (got {0}ms)")]
    NegativeDelay(i64),

    #[error("max_results must be at least 1")]
    ZeroMaxResults,

    #[error("max_viewable_results must be at least 1")]
    ZeroViewableResults,

    #[error("quicklink template '{0}' has no {{query}} placeholder")]
    QuicklinkTemplate(String),

    #[error("Failed to read config {path}: {message}")]
    Read { path: String, message: String },

    #[error("Config parse error: {0}")]
    Parse(String),

    #[error("Failed to write config: {0}")]
    Write(String),
}

/// Errors produced while resolving an extension's results.
#[derive(Debug, Error)]
pub enum ExtensionError {
    #[error("{0}")]
    Failed(String),

    #[error("extension task panicked: {0}")]
    Panicked(String),

    #[error("extension task was cancelled")]
    Cancelled,
}

/// Errors produced by an action on the selected item.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("item has no URL to open")]
    MissingUrl,

    #[error("malformed URL: '{0}'")]
    InvalidUrl(String),

    #[error("Failed to open URL: {0}")]
    Launch(#[from] std::io::Error),

    #[error("{0}")]
    Custom(String),
}

/// Result type alias for Omnibar operations
pub type OmnibarResult<T> = Result<T, OmnibarError>;

/// Result type for extension resolutions.
pub type ExtensionResult<T> = Result<T, ExtensionError>;

/// Observability hook receiving every recovered failure.
pub type ErrorHook = Arc<dyn Fn(&OmnibarError) + Send + Sync + 'static>;

/// The hook used when none is configured: failures are only logged.
pub fn log_only() -> ErrorHook {
    Arc::new(|_| {})
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_error_names_extension_and_query() {
        let err = OmnibarError::Extension {
            extension: "npm".to_string(),
            query: "react".to_string(),
            source: ExtensionError::Failed("503".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Extension 'npm' failed for query 'react': 503"
        );
    }

    #[test]
    fn test_config_error_converts() {
        let err: OmnibarError = ConfigError::NegativeDelay(-5).into();
        assert!(matches!(err, OmnibarError::Config(ConfigError::NegativeDelay(-5))));
        assert_eq!(
            err.to_string(),
            "Configuration error: input delay must not be negative (got -5ms)"
        );
    }
}
