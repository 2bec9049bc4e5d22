use crate::error::{RecapError, Result};
use crate::format::NumberFormat;
use crate::stats::ranking::{DEFAULT_LANGUAGE_LIMIT, DEFAULT_REPOSITORY_LIMIT};
use crate::stats::zone::parse_time_zone;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// GitHub login the report is for
    pub username: Option<String>,

    /// IANA time zone used to decide what "today" is (default: UTC)
    #[serde(default = "default_time_zone")]
    pub time_zone: String,

    /// Number of repositories to rank (default: 3)
    #[serde(default = "default_top_repositories")]
    pub top_repositories: usize,

    /// Number of languages to rank (default: 5)
    #[serde(default = "default_top_languages")]
    pub top_languages: usize,

    /// Pad ranked lists with placeholders up to their size
    #[serde(default = "default_true")]
    pub pad_placeholders: bool,

    /// Digit grouping used in summaries
    #[serde(default = "default_thousands_separator")]
    pub thousands_separator: char,
}

impl Config {
    /// Load configuration from the default location (~/.config/year-recap/config.toml)
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(RecapError::config(format!(
                "Config file not found at: {}",
                path.display()
            )));
        }

        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| RecapError::config("Could not determine home directory"))?;
        Ok(home.join(".config").join("year-recap").join("config.toml"))
    }

    /// Write the default configuration to `path`, creating parent directories
    pub fn create_at(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let config = Self::default();
        let toml_string = toml::to_string_pretty(&config)?;
        fs::write(path, toml_string)?;

        Ok(config)
    }

    /// Create a default configuration file at the default location
    pub fn create_default() -> Result<Self> {
        Self::create_at(&Self::default_config_path()?)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        parse_time_zone(&self.time_zone)?;

        if self.top_repositories == 0 {
            return Err(RecapError::config("top_repositories must be > 0"));
        }

        if self.top_languages == 0 {
            return Err(RecapError::config("top_languages must be > 0"));
        }

        Ok(())
    }

    /// Load config from file, or create default if it doesn't exist
    pub fn load_or_create_default() -> Result<Self> {
        match Self::load() {
            Ok(config) => Ok(config),
            Err(RecapError::Config(_)) => {
                tracing::info!("config file not found, creating default config");
                Self::create_default()
            }
            Err(e) => Err(e),
        }
    }

    pub fn number_format(&self) -> NumberFormat {
        NumberFormat {
            thousands_separator: self.thousands_separator,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            username: None,
            time_zone: default_time_zone(),
            top_repositories: default_top_repositories(),
            top_languages: default_top_languages(),
            pad_placeholders: default_true(),
            thousands_separator: default_thousands_separator(),
        }
    }
}

// Serde default functions
fn default_time_zone() -> String {
    "UTC".to_string()
}

fn default_top_repositories() -> usize {
    DEFAULT_REPOSITORY_LIMIT
}

fn default_top_languages() -> usize {
    DEFAULT_LANGUAGE_LIMIT
}

fn default_true() -> bool {
    true
}

fn default_thousands_separator() -> char {
    ','
}
