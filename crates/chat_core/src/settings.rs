//! Application settings - provider credentials and the initial control values.
//!
//! Sources, lowest to highest priority: built-in defaults, the TOML settings
//! file, then the process environment (optionally seeded from `.env`).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{MaxTokens, Temperature};
use crate::options::{EmojiLevel, Model, Mood, Persona};

pub const SETTINGS_FILE_PATH: &str = "persona-chat.toml";
pub const DEFAULT_API_BASE: &str = "https://api.groq.com/openai/v1";

pub const API_KEY_ENV: &str = "GROQ_API_KEY";
pub const API_BASE_ENV: &str = "GROQ_API_BASE";
pub const TIMEOUT_ENV: &str = "GROQ_TIMEOUT_SECS";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Groq API Key not found. Please add it to your .env file.")]
    MissingApiKey,

    #[error("Failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Initial values for the chat controls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub model: Model,
    pub persona: Persona,
    pub mood: Mood,
    pub temperature: Temperature,
    pub max_tokens: MaxTokens,
    pub emoji: EmojiLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_key: Option<String>,
    pub api_base: String,
    pub timeout_secs: Option<u64>,
    pub defaults: Defaults,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: DEFAULT_API_BASE.to_string(),
            timeout_secs: None,
            defaults: Defaults::default(),
        }
    }
}

impl Settings {
    /// Load settings from `.env`, the settings file and the environment.
    ///
    /// An explicitly requested file must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        if let Err(e) = dotenvy::dotenv() {
            log::debug!("No .env file loaded: {}", e);
        }

        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(SETTINGS_FILE_PATH), false),
        };

        let contents = if required || path.exists() {
            let text = std::fs::read_to_string(&path).map_err(|source| SettingsError::Read {
                path: path.clone(),
                source,
            })?;
            log::info!("Loaded settings from {}", path.display());
            Some(text)
        } else {
            None
        };

        Self::from_sources(contents.as_deref(), &path, |key| std::env::var(key).ok())
    }

    /// Merge file contents and environment lookups over the defaults.
    pub fn from_sources(
        contents: Option<&str>,
        path: &Path,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, SettingsError> {
        let mut settings = match contents {
            Some(text) => toml::from_str::<Settings>(text).map_err(|source| {
                SettingsError::Parse {
                    path: path.to_path_buf(),
                    source,
                }
            })?,
            None => Settings::default(),
        };

        if let Some(api_key) = env(API_KEY_ENV) {
            settings.api_key = Some(api_key);
        }
        if let Some(api_base) = env(API_BASE_ENV) {
            settings.api_base = api_base;
        }
        if let Some(timeout) = env(TIMEOUT_ENV) {
            match timeout.trim().parse::<u64>() {
                Ok(secs) => settings.timeout_secs = Some(secs),
                Err(_) => log::warn!("Ignoring invalid {}: {:?}", TIMEOUT_ENV, timeout),
            }
        }

        Ok(settings)
    }

    /// The key, if one is configured and not blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Passive warning shown while no API key is configured.
    pub fn api_key_warning(&self) -> Option<SettingsError> {
        match self.api_key() {
            Some(_) => None,
            None => Some(SettingsError::MissingApiKey),
        }
    }
}
