//! List command handler

use std::io::Write;

use pkgrecipe_core::{OutputHandlerRegistry, ProcessorRegistry};

use crate::error::CliError;

pub fn run_list<W: Write>(
    processors: &ProcessorRegistry,
    output_handlers: &OutputHandlerRegistry,
    out: &mut W,
) -> Result<(), CliError> {
    writeln!(out, "Processors:")?;
    for name in processors.names() {
        writeln!(out, "  {}", name)?;
    }

    writeln!(out, "Output handlers:")?;
    for name in output_handlers.names() {
        writeln!(out, "  {}", name)?;
    }

    Ok(())
}
