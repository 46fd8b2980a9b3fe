//! # pkgrecipe core
//!
//! The contract shared by every step of a packaging recipe. A processor
//! receives an environment document, checks its required inputs, runs its
//! own logic and hands the updated environment to the next processor.

pub mod chain;
pub mod error;
pub mod handler;
pub mod manifest;
pub mod output_handler;
pub mod processor;
pub mod registry;
pub mod shell;
pub mod substitution;
pub mod value;

pub use chain::{Chain, Step};
pub use error::{
    HandlerError, HandlerResult, OutputHandlerError, OutputHandlerResult, ProcessorError,
    ProcessorResult, RegistryError,
};
pub use handler::Handler;
pub use manifest::{InputVariable, InputVariables, Manifest, OutputVariable, OutputVariables};
pub use output_handler::{BoxedOutputHandler, ExportItem, OutputHandler, OutputHandlerShell};
pub use processor::{BoxedProcessor, Processor, ProcessorExt, ProcessorShell};
pub use registry::{Factory, OutputHandlerRegistry, ProcessorRegistry, Registry};
pub use shell::ShellStatus;
pub use value::{Environment, Value};
