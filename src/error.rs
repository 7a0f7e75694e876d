use thiserror::Error;

pub type Result<T> = std::result::Result<T, HardenError>;

#[derive(Error, Debug)]
pub enum HardenError {
    #[error("Unknown rule id: {0}")]
    UnknownRule(String),

    #[error("Invalid line pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("External command '{command}' failed: {message}")]
    CommandFailed { command: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HardenError {
    /// Errors outside the engine's outcome table map to the failure code.
    pub fn exit_code(&self) -> i32 {
        3
    }
}
