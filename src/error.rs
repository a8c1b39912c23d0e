use crate::board::board::LayoutError;
use crate::wire::DecodeError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("protocol violation: {0}")]
    ProtocolViolation(String),

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("malformed payload: {0}")]
    Malformed(#[from] DecodeError),

    #[error("invalid board description: {0}")]
    Input(String),

    #[error("invalid board layout: {0}")]
    Layout(#[from] LayoutError),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no legal move from the current position")]
    NoLegalMove,
}

pub type Result<T> = std::result::Result<T, Error>;
