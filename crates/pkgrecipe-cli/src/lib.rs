//! pkgrecipe CLI library
//!
//! Command handlers and built-in processors behind the `pkgrecipe` binary.

pub mod builtin;
pub mod commands;
pub mod config;
pub mod error;

pub use config::CliConfig;
pub use error::CliError;
