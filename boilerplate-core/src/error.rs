use thiserror::Error;

use crate::config::loader::LoadStage;
use crate::config::observability::ObservabilityError;
use crate::config::path::ConfigPath;
use crate::config::validation::ValidationErrors;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("could not load environment variables: {0}")]
    EnvLoad(String),

    #[error("could not decode '{path}': expected {expected}, got '{value}'")]
    Decode {
        path: ConfigPath,
        value: String,
        expected: String,
    },

    #[error("decoded values do not fit the config schema: {0}")]
    Shape(String),

    #[error("config validation failed:\n{0}")]
    Validation(ValidationErrors),

    #[error("invalid observability config: {0}")]
    Observability(#[from] ObservabilityError),

    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Stage the load was trying to reach when this error stopped it.
    ///
    /// `None` for errors raised outside the load pipeline.
    pub fn stage(&self) -> Option<LoadStage> {
        match self {
            Self::EnvLoad(_) => Some(LoadStage::Scanned),
            Self::Decode { .. } | Self::Shape(_) => Some(LoadStage::Decoded),
            Self::Validation(_) => Some(LoadStage::Validated),
            Self::Observability(_) => Some(LoadStage::ObservabilityValidated),
            Self::Config(_) => None,
        }
    }
}
