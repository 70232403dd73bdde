//! Errors raised while reading or writing `config.yml`.

use std::path::PathBuf;

/// Configuration file and settings errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `save` was called before `load` chose a file
    #[error("No configuration file selected")]
    FilePathNotSet,

    /// Neither `tracker_url` nor `--tracker` was given
    #[error("Tracker url not set, add tracker_url to config.yml or pass --tracker")]
    TrackerUrlNotSet,

    /// The tracker url does not parse as an absolute url
    #[error("Invalid tracker url {url}: {message}")]
    InvalidTrackerUrl { url: String, message: String },

    #[error("Home directory not found, pass a configuration directory")]
    HomeDirectoryNotFound,

    #[error("Failed to read {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    #[error("Failed to write {path}: {source}")]
    SaveFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to create configuration directory {path}: {source}")]
    CreateDirectoryFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// YAML encoding of the settings failed
    #[error("Failed to encode settings as YAML: {0}")]
    SerializationFailed(String),

    /// `config.yml` is not valid YAML or has mistyped settings
    #[error("Malformed config.yml: {0}")]
    DeserializationFailed(String),
}
