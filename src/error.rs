use thiserror::Error;

/// Main error type for year-recap
#[derive(Error, Debug)]
pub enum RecapError {
    /// Timezone name that chrono-tz does not know
    #[error("Invalid time zone: {0}")]
    InvalidTimeZone(String),

    /// Report year outside the supported range
    #[error("Invalid year: {0} (expected 2008..=2100)")]
    InvalidYear(i32),

    /// Date string that is not a valid YYYY-MM-DD date
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Reply from the AI collaborator that does not match the summary schema
    #[error("Invalid AI reply: {0}")]
    InvalidAiReply(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML parsing errors
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization errors
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for year-recap operations
pub type Result<T> = std::result::Result<T, RecapError>;

impl RecapError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new AI reply error
    pub fn ai_reply<S: Into<String>>(msg: S) -> Self {
        Self::InvalidAiReply(msg.into())
    }
}
