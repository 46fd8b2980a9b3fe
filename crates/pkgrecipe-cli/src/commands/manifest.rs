//! Manifest command handler

use std::io::Write;

use pkgrecipe_core::{ProcessorExt, ProcessorRegistry};

use crate::error::CliError;

/// Print the manifest of a registered processor as JSON
pub fn run_manifest<W: Write>(
    processors: &ProcessorRegistry,
    name: &str,
    out: &mut W,
) -> Result<(), CliError> {
    let processor = processors.create(name)?;
    let manifest = processor.get_manifest()?;

    serde_json::to_writer_pretty(&mut *out, &manifest)?;
    writeln!(out)?;
    Ok(())
}
