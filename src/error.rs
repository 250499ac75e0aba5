//! Error types surfaced by the conversion pipeline.
//!
//! Every failure is fatal for the run and falls into one of two classes:
//!
//! - [`ImportError::Configuration`] - invalid mapping, header row out of range,
//!   or unusable command parameters.
//! - [`ImportError::SourceRead`] - the input could not be opened, decoded, or the
//!   requested sheet does not exist.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImportError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Source read error: {0}")]
    SourceRead(String),
}

impl ImportError {
    pub fn configuration(message: impl Into<String>) -> Self {
        ImportError::Configuration(message.into())
    }

    pub fn source_read(message: impl Into<String>) -> Self {
        ImportError::SourceRead(message.into())
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, ImportError::Configuration(_))
    }
}

pub type ImportResult<T> = Result<T, ImportError>;
