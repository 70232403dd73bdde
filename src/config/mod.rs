//! Configuration management module.
//!
//! This module loads the class helper configuration file: the tracker to
//! talk to, optional credentials and the page level widget settings.

mod error;

pub use error::ConfigError;

use crate::cache::default_keywords;
use crate::error::ClassHelperResult;
use crate::rest::Credentials;
use crate::widget::WidgetSettings;
use log::*;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    io::Write,
    path::{Path, PathBuf},
};
use url::Url;

const FILE_NAME: &str = "config.yml";
const DEFAULT_DIRECTORY_PATH: &str = ".config/roundup-classhelper";

/// Oversees management of configuration file.
///
#[derive(Clone, Debug)]
pub struct Config {
    pub tracker_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub stylesheet: String,
    pub disabled: bool,
    pub alternative_dropdown_paths: HashMap<String, String>,
    pub translation_keywords: Vec<String>,
    file_path: Option<PathBuf>,
}

/// On-disk layout of the configuration file.
///
#[derive(Serialize, Deserialize)]
struct FileSpec {
    #[serde(default)]
    pub tracker_url: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default = "default_stylesheet")]
    pub stylesheet: String,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default = "default_alternative_dropdown_paths")]
    pub alternative_dropdown_paths: HashMap<String, String>,
    #[serde(default = "default_keywords")]
    pub translation_keywords: Vec<String>,
}

fn default_stylesheet() -> String {
    WidgetSettings::default().stylesheet
}

fn default_alternative_dropdown_paths() -> HashMap<String, String> {
    WidgetSettings::default().alternative_dropdown_paths
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

impl Config {
    /// Return a new instance with default settings.
    ///
    pub fn new() -> Config {
        Config {
            tracker_url: None,
            username: None,
            password: None,
            stylesheet: default_stylesheet(),
            disabled: false,
            alternative_dropdown_paths: default_alternative_dropdown_paths(),
            translation_keywords: default_keywords(),
            file_path: None,
        }
    }

    /// Load the configuration file from the custom directory if provided,
    /// else from the default directory. A missing file is created with the
    /// default settings so it can be edited.
    ///
    pub fn load(&mut self, custom_path: Option<&str>) -> ClassHelperResult<()> {
        // Use default path unless custom path provided
        let dir_path = match custom_path {
            Some(path) => Path::new(&path).to_path_buf(),
            None => Config::default_path()?,
        };

        if !dir_path.exists() {
            fs::create_dir_all(&dir_path).map_err(|e| ConfigError::CreateDirectoryFailed {
                path: dir_path.clone(),
                source: e,
            })?;
        }

        self.file_path = Some(dir_path.join(Path::new(FILE_NAME)));
        let file_path = self.file_path.as_ref().ok_or(ConfigError::FilePathNotSet)?;

        if !file_path.exists() {
            info!("Writing default configuration to {}", file_path.display());
            return self.save();
        }

        let contents = fs::read_to_string(file_path).map_err(|e| ConfigError::LoadFailed {
            path: file_path.clone(),
            message: format!("IO error: {}", e),
        })?;
        let data: FileSpec = serde_yaml::from_str(&contents)
            .map_err(|e| ConfigError::DeserializationFailed(e.to_string()))?;
        self.tracker_url = data.tracker_url;
        self.username = data.username;
        self.password = data.password;
        self.stylesheet = data.stylesheet;
        self.disabled = data.disabled;
        self.alternative_dropdown_paths = data.alternative_dropdown_paths;
        self.translation_keywords = data.translation_keywords;
        Ok(())
    }

    /// Serialize the configuration and write it to the loaded file path.
    ///
    pub fn save(&self) -> ClassHelperResult<()> {
        let file_path = self.file_path.as_ref().ok_or(ConfigError::FilePathNotSet)?;
        let data = FileSpec {
            tracker_url: self.tracker_url.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            stylesheet: self.stylesheet.clone(),
            disabled: self.disabled,
            alternative_dropdown_paths: self.alternative_dropdown_paths.clone(),
            translation_keywords: self.translation_keywords.clone(),
        };
        let content = serde_yaml::to_string(&data)
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;

        let mut file = fs::File::create(file_path).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        write!(file, "{}", content).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        file.flush().map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        Ok(())
    }

    /// Return the tracker url, checking that it is set and absolute.
    ///
    pub fn tracker_url(&self) -> Result<&str, ConfigError> {
        let url = self
            .tracker_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::TrackerUrlNotSet)?;
        Url::parse(url).map_err(|e| ConfigError::InvalidTrackerUrl {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        Ok(url)
    }

    /// Return basic auth credentials when a username is configured.
    ///
    pub fn credentials(&self) -> Option<Credentials> {
        self.username
            .as_ref()
            .filter(|name| !name.is_empty())
            .map(|username| Credentials {
                username: username.clone(),
                password: self.password.clone(),
            })
    }

    pub fn widget_settings(&self) -> WidgetSettings {
        WidgetSettings {
            stylesheet: self.stylesheet.clone(),
            alternative_dropdown_paths: self.alternative_dropdown_paths.clone(),
        }
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Returns the path buffer for the default path to the configuration file
    /// or an error if the home directory could not be found.
    ///
    fn default_path() -> Result<PathBuf, ConfigError> {
        match dirs::home_dir() {
            Some(home) => {
                let home_path = Path::new(&home);
                let default_config_path = Path::new(DEFAULT_DIRECTORY_PATH);
                Ok(home_path.join(default_config_path))
            }
            None => Err(ConfigError::HomeDirectoryNotFound),
        }
    }
}
