//! Configuration-specific error types for wrapped help links.

/// Errors raised while discovering or parsing a class helper link.
///
/// Every variant fails the widget at initialization, before any popup can
/// open, and leaves the link's native click action in place.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigurationError {
    /// The widget must wrap exactly one link
    #[error("classhelper must wrap a single classhelp link, found {count}")]
    NotSingleLink { count: usize },

    /// The wrapped link lacks a required attribute
    #[error("classhelper link must have a {0} attribute")]
    MissingAttribute(&'static str),

    /// Popup width or height is not a positive number
    #[error("{attribute} in helpurl must be a positive number, got '{value}'")]
    InvalidGeometry {
        attribute: &'static str,
        value: String,
    },

    /// The help url does not split into exactly one path and one query
    #[error("invalid helpurl '{0}', missing query params")]
    MalformedHelpUrl(String),

    /// `@startwith` is missing, not a number or negative
    #[error("startwith in helpurl must be a number, got '{0}'")]
    InvalidPageIndex(String),

    /// `@pagesize` is missing, not a number or negative
    #[error("pagesize in helpurl must be a number, got '{0}'")]
    InvalidPageSize(String),

    /// The help url path names no class
    #[error("helpurl does not name a target class")]
    MissingTargetClass,

    /// The help url carries no `properties` to display
    #[error("helpurl does not list any properties to display")]
    MissingDisplayFields,

    /// The tracker base url could not be parsed
    #[error("invalid tracker url '{url}': {message}")]
    InvalidBaseUrl { url: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_display() {
        let error = ConfigurationError::NotSingleLink { count: 2 };
        assert!(error.to_string().contains("single classhelp link"));
        assert!(error.to_string().contains('2'));

        let error = ConfigurationError::MissingAttribute("data-width");
        assert!(error.to_string().contains("data-width"));

        let error = ConfigurationError::InvalidGeometry {
            attribute: "width",
            value: "wide".to_string(),
        };
        assert!(error.to_string().contains("width"));
        assert!(error.to_string().contains("wide"));

        let error = ConfigurationError::InvalidPageIndex("x".to_string());
        assert!(error.to_string().contains("startwith"));

        let error = ConfigurationError::InvalidPageSize("y".to_string());
        assert!(error.to_string().contains("pagesize"));
    }
}
