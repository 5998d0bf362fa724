use thiserror::Error;

pub type MediaMixResult<T> = Result<T, MediaMixError>;

#[derive(Error, Debug)]
pub enum MediaMixError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("No channels selected")]
    EmptySelection,

    #[error("Media mix is empty, nothing to export")]
    EmptyMix,

    #[error("Unknown {kind}: {value}")]
    UnknownVariant { kind: &'static str, value: String },

    #[error("Plan not found: {0}")]
    PlanNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<config::ConfigError> for MediaMixError {
    fn from(err: config::ConfigError) -> Self {
        MediaMixError::Config(err.to_string())
    }
}
