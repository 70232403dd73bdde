//! Application-wide error types.
//!
//! This module defines the error taxonomy of the class helper. Configuration
//! and unrecoverable network errors end a popup session; validation and
//! permission errors are recovered in place; dropdown and translation errors
//! degrade the rendering without blocking it.

pub use crate::config::ConfigError;
pub use crate::helpurl::ConfigurationError;
pub use crate::rest::NetworkError;

/// Main class helper error type.
///
#[derive(Debug, thiserror::Error)]
pub enum ClassHelperError {
    /// Malformed wrapped link or descriptor
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Fetch, parse or non-OK failure of a REST call
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    /// The server rejected a search value for a field
    #[error("Invalid value \"{value}\" for \"{field}\"")]
    Validation { value: String, field: String },

    /// The server refused access to the searched data
    #[error("Permission denied: {message}")]
    Permission { message: String },

    /// A dropdown collection has no usable label property
    #[error("No value key found in dropdown data for: {url}")]
    DropdownShape { url: String },

    /// The translation lookup failed
    #[error("Failed to fetch translations: {0}")]
    TranslationFetch(#[source] NetworkError),

    /// The host could not open a popup window
    #[error("Failed to open popup window")]
    PopupBlocked,

    /// The document url carries the abort marker
    #[error("Aborting due to {0} fragment")]
    Aborted(&'static str),

    /// Configuration file errors
    #[error("Configuration file error: {0}")]
    Config(#[from] ConfigError),
}

impl ClassHelperError {
    /// Return true for errors rendered in place rather than ending the
    /// session.
    ///
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ClassHelperError::Validation { .. }
                | ClassHelperError::Permission { .. }
                | ClassHelperError::DropdownShape { .. }
                | ClassHelperError::TranslationFetch(_)
        )
    }

    /// Return the url involved in the failure, if any.
    ///
    pub fn url(&self) -> Option<&str> {
        match self {
            ClassHelperError::Network(e) | ClassHelperError::TranslationFetch(e) => Some(e.url()),
            ClassHelperError::DropdownShape { url } => Some(url),
            _ => None,
        }
    }
}

/// Convenience type alias for Result with ClassHelperError
pub type ClassHelperResult<T> = Result<T, ClassHelperError>;
