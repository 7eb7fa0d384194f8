use std::io;

use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read resource")]
    Io(#[from] io::Error),

    #[error("malformed content")]
    Format(#[source] BoxError),
}

impl LoadError {
    pub fn format<E: Into<BoxError>>(error: E) -> Self {
        LoadError::Format(error.into())
    }

    pub fn is_io(&self) -> bool {
        matches!(self, LoadError::Io(_))
    }

    pub fn is_format(&self) -> bool {
        matches!(self, LoadError::Format(_))
    }
}
