//! Error types for pkgrecipe-core
//!
//! Errors are layered the same way the contracts are: every processor or
//! output handler failure can carry a [`HandlerError`] from the document layer
//! underneath it.

use thiserror::Error;

/// Document I/O and substitution failures.
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed environment document: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Failed to serialize environment document: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Unresolved reference %{key}%: no such key in environment")]
    UnresolvedReference { key: String },

    #[error("Reference %{key}% does not point at a string value")]
    NonStringReference { key: String },
}

/// Failures raised by the [`Processor`](crate::Processor) contract.
#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error(transparent)]
    Handler(#[from] HandlerError),

    #[error("Missing manifest: {0}")]
    MissingManifest(&'static str),

    #[error("{processor} requires {variable}")]
    MissingInput { processor: String, variable: String },

    #[error("Illegal argument '{0}'")]
    IllegalArgument(String),

    #[error("{0}")]
    Failed(String),
}

/// Failures raised by the [`OutputHandler`](crate::OutputHandler) contract.
#[derive(Error, Debug)]
pub enum OutputHandlerError {
    #[error(transparent)]
    Handler(#[from] HandlerError),

    #[error("Missing required key: {0}")]
    MissingKey(String),

    #[error("Illegal argument '{0}'")]
    IllegalArgument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Failed(String),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegistryError {
    #[error("'{0}' is already registered")]
    Duplicate(String),

    #[error("Unknown name: {0}")]
    Unknown(String),
}

pub type HandlerResult<T> = std::result::Result<T, HandlerError>;
pub type ProcessorResult<T> = std::result::Result<T, ProcessorError>;
pub type OutputHandlerResult<T> = std::result::Result<T, OutputHandlerError>;
