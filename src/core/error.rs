use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("Action cannot be applied right now: {0}")]
    IneligibleAction(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl SimError {
    /// Stable name used by the boundary protocol
    pub fn kind(&self) -> &'static str {
        match self {
            SimError::Validation(_) => "ValidationError",
            SimError::UnknownAction(_) => "UnknownAction",
            SimError::IneligibleAction(_) => "IneligibleAction",
            SimError::Config(_) => "ConfigError",
            SimError::Io(_) => "IoError",
            SimError::Toml(_) => "ConfigError",
            SimError::Serde(_) => "SerializationError",
        }
    }
}

pub type Result<T> = std::result::Result<T, SimError>;
