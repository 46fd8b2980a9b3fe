//! Run command handler

use std::io::{Read, Write};

use pkgrecipe_core::{Handler, ProcessorRegistry, ProcessorShell, ShellStatus};

use crate::error::CliError;

/// Run one registered processor in standalone mode.
///
/// The environment document is read from `input` and written to `output`;
/// processor errors are reported on `diagnostics`.
pub fn run_processor<R, W, E>(
    processors: &ProcessorRegistry,
    name: &str,
    arguments: &[String],
    input: R,
    output: W,
    diagnostics: &mut E,
) -> Result<ShellStatus, CliError>
where
    R: Read,
    W: Write,
    E: Write,
{
    let processor = processors.create(name)?;
    let mut shell = ProcessorShell::new(processor, Handler::new(None, input, output));

    let status = shell.execute_shell(arguments, diagnostics)?;
    tracing::debug!(processor = name, code = status.code(), "processor finished");
    Ok(status)
}
