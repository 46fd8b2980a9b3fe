//! Error types for pkgrecipe-cli

use pkgrecipe_core::{HandlerError, ProcessorError, RegistryError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),

    #[error("ProcessorError: {0}")]
    Processor(#[from] ProcessorError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
