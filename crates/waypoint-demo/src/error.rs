#![forbid(unsafe_code)]

use thiserror::Error;
use waypoint::{CatalogError, ConfigError, LoadError};

pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_USAGE: i32 = 2;

pub type Result<T> = std::result::Result<T, DemoError>;

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("catalog {path}: {source}")]
    CatalogFile {
        path: String,
        #[source]
        source: LoadError,
    },

    #[error("built-in catalog is invalid: {0}")]
    Catalog(#[from] CatalogError),

    #[error("config {path}: {source}")]
    Config {
        path: String,
        #[source]
        source: ConfigError,
    },

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DemoError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument { .. } => EXIT_USAGE,
            _ => EXIT_FAILURE,
        }
    }
}
