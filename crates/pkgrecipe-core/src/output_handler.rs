//! OutputHandler contract
//!
//! Output handlers import a single item into an external repository. They
//! usually read these keys from the environment:
//!
//! - `NAME`: the name of the item
//! - `version`: the version of the item
//! - `item_path`: where the item lives on disk
//!
//! Unlike processors there is no manifest and no input validation at this
//! level; a handler checks what it needs itself, for example through
//! [`ExportItem::from_env`].

use std::io::{Read, Write};
use std::path::PathBuf;

use crate::error::{HandlerError, OutputHandlerError, OutputHandlerResult};
use crate::handler::Handler;
use crate::shell::{ShellStatus, split_argument};
use crate::value::Environment;

pub trait OutputHandler {
    fn name(&self) -> &str;

    /// Export the item described by `env`
    fn main(&mut self, env: &mut Environment) -> OutputHandlerResult<()>;
}

pub type BoxedOutputHandler = Box<dyn OutputHandler>;

impl<H: OutputHandler + ?Sized> OutputHandler for Box<H> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn main(&mut self, env: &mut Environment) -> OutputHandlerResult<()> {
        (**self).main(env)
    }
}

/// The conventional item keys, read out of an environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportItem {
    pub name: String,
    pub version: String,
    pub item_path: PathBuf,
}

impl ExportItem {
    pub fn from_env(env: &Environment) -> OutputHandlerResult<Self> {
        let get = |key: &str| {
            env.get_str(key)
                .map(str::to_string)
                .ok_or_else(|| OutputHandlerError::MissingKey(key.to_string()))
        };

        Ok(Self {
            name: get("NAME")?,
            version: get("version")?,
            item_path: PathBuf::from(get("item_path")?),
        })
    }
}

/// An output handler bound to a [`Handler`], for standalone execution
pub struct OutputHandlerShell<H, R, W> {
    output_handler: H,
    handler: Handler<R, W>,
    defaults: Environment,
}

impl<H: OutputHandler, R: Read, W: Write> OutputHandlerShell<H, R, W> {
    pub fn new(output_handler: H, handler: Handler<R, W>) -> Self {
        Self {
            output_handler,
            handler,
            defaults: Environment::new(),
        }
    }

    /// Values used for keys the input document does not carry.
    ///
    /// They are filled in after the document is read and before arguments
    /// are applied, so both the document and the arguments take precedence.
    pub fn with_defaults(mut self, defaults: Environment) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn handler(&self) -> &Handler<R, W> {
        &self.handler
    }

    pub fn into_parts(self) -> (H, Handler<R, W>) {
        (self.output_handler, self.handler)
    }

    /// Run the handler against the current environment
    pub fn export(&mut self) -> OutputHandlerResult<&Environment> {
        let env = self.handler.env_or_default();
        tracing::info!(output_handler = self.output_handler.name(), "exporting");
        self.output_handler.main(env)?;
        Ok(env)
    }

    pub fn parse_arguments<I, S>(&mut self, args: I) -> OutputHandlerResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for arg in args {
            let arg = arg.as_ref();
            let (key, value) = split_argument(arg)
                .ok_or_else(|| OutputHandlerError::IllegalArgument(arg.to_string()))?;
            self.handler.update_data(key, value)?;
        }
        Ok(())
    }

    /// Read input, apply arguments, export, write output.
    ///
    /// An [`OutputHandlerError`] is reported on `diagnostics` as
    /// `OutputHandlerError: <message>`; document-layer failures come back as `Err`.
    pub fn execute_shell<I, S, E>(
        &mut self,
        args: I,
        diagnostics: &mut E,
    ) -> Result<ShellStatus, HandlerError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        E: Write,
    {
        match self.run_shell(args) {
            Ok(()) => Ok(ShellStatus::Success),
            Err(OutputHandlerError::Handler(e)) => Err(e),
            Err(e) => {
                tracing::error!(
                    output_handler = self.output_handler.name(),
                    error = %e,
                    "export failed"
                );
                writeln!(diagnostics, "OutputHandlerError: {}", e)?;
                Ok(ShellStatus::Reported)
            }
        }
    }

    fn run_shell<I, S>(&mut self, args: I) -> OutputHandlerResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.handler.read_input_document()?;
        self.handler
            .env_or_default()
            .merge_defaults(self.defaults.iter().map(|(k, v)| (k.clone(), v.clone())));
        self.parse_arguments(args)?;
        self.export()?;
        self.handler.write_output_document()?;
        Ok(())
    }
}
