//! Export command handler

use std::io::{Read, Write};

use pkgrecipe_core::{Handler, OutputHandlerRegistry, OutputHandlerShell, ShellStatus};

use crate::config::CliConfig;
use crate::error::CliError;

/// Run one registered output handler in standalone mode.
///
/// Configured defaults only fill keys the input document lacks, and
/// `arguments` override both.
pub fn run_export<R, W, E>(
    output_handlers: &OutputHandlerRegistry,
    config: &CliConfig,
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
    let output_handler = output_handlers.create(name)?;
    let mut shell = OutputHandlerShell::new(output_handler, Handler::new(None, input, output))
        .with_defaults(config.defaults());

    let status = shell.execute_shell(arguments, diagnostics)?;
    tracing::debug!(output_handler = name, code = status.code(), "export finished");
    Ok(status)
}
