//! CLI command handlers

pub mod export;
pub mod list;
pub mod manifest;
pub mod run;

pub use export::run_export;
pub use list::run_list;
pub use manifest::run_manifest;
pub use run::run_processor;
