//! Processor contract
//!
//! A processor is one step of a recipe: it declares a manifest, gets its
//! required inputs checked against the environment, and then mutates the
//! environment in [`Processor::main`]. Processors are composed by feeding the
//! environment returned from one [`ProcessorExt::process`] call into the next.

use std::io::{Read, Write};

use crate::error::{HandlerError, ProcessorError, ProcessorResult};
use crate::handler::Handler;
use crate::manifest::{InputVariables, Manifest, OutputVariables};
use crate::shell::{ShellStatus, split_argument};
use crate::value::Environment;

/// Core trait every concrete processor implements
///
/// Only [`name`](Processor::name) and [`main`](Processor::main) are
/// mandatory. The manifest parts default to undeclared, which
/// [`ProcessorExt::get_manifest`] reports as a configuration defect.
pub trait Processor {
    /// Name used in error messages and in the registry
    fn name(&self) -> &str;

    fn description(&self) -> Option<String> {
        None
    }

    fn input_variables(&self) -> Option<InputVariables> {
        None
    }

    fn output_variables(&self) -> Option<OutputVariables> {
        None
    }

    /// Domain logic. Runs after the required inputs have been checked.
    fn main(&mut self, env: &mut Environment) -> ProcessorResult<()>;
}

/// A boxed processor for dynamic dispatch
pub type BoxedProcessor = Box<dyn Processor>;

impl<P: Processor + ?Sized> Processor for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn description(&self) -> Option<String> {
        (**self).description()
    }

    fn input_variables(&self) -> Option<InputVariables> {
        (**self).input_variables()
    }

    fn output_variables(&self) -> Option<OutputVariables> {
        (**self).output_variables()
    }

    fn main(&mut self, env: &mut Environment) -> ProcessorResult<()> {
        (**self).main(env)
    }
}

/// Validation and composition on top of [`Processor`]
pub trait ProcessorExt: Processor {
    /// Return the full manifest, failing if any part is undeclared
    fn get_manifest(&self) -> ProcessorResult<Manifest> {
        Ok(Manifest {
            description: self
                .description()
                .ok_or(ProcessorError::MissingManifest("description"))?,
            input_variables: self
                .input_variables()
                .ok_or(ProcessorError::MissingManifest("input_variables"))?,
            output_variables: self
                .output_variables()
                .ok_or(ProcessorError::MissingManifest("output_variables"))?,
        })
    }

    /// Fail on the first required input missing from `env`
    fn check_inputs(&self, env: &Environment) -> ProcessorResult<()> {
        let inputs = self
            .input_variables()
            .ok_or(ProcessorError::MissingManifest("input_variables"))?;

        if let Some(missing) = inputs.required_names().find(|name| !env.contains_key(name)) {
            tracing::warn!(processor = self.name(), variable = missing, "missing required input");
            return Err(ProcessorError::MissingInput {
                processor: self.name().to_string(),
                variable: missing.to_string(),
            });
        }
        Ok(())
    }

    /// Validate inputs and run [`Processor::main`] on a borrowed environment
    fn process_in_place(&mut self, env: &mut Environment) -> ProcessorResult<()> {
        self.check_inputs(env)?;
        tracing::info!(processor = self.name(), "processing");
        self.main(env)
    }

    /// Validate inputs, run [`Processor::main`] and hand the environment back
    fn process(&mut self, mut env: Environment) -> ProcessorResult<Environment> {
        self.process_in_place(&mut env)?;
        Ok(env)
    }
}

impl<T: Processor + ?Sized> ProcessorExt for T {}

/// A processor bound to a [`Handler`], for standalone execution
pub struct ProcessorShell<P, R, W> {
    processor: P,
    handler: Handler<R, W>,
}

impl<P: Processor, R: Read, W: Write> ProcessorShell<P, R, W> {
    pub fn new(processor: P, handler: Handler<R, W>) -> Self {
        Self { processor, handler }
    }

    pub fn processor(&self) -> &P {
        &self.processor
    }

    pub fn handler(&self) -> &Handler<R, W> {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut Handler<R, W> {
        &mut self.handler
    }

    pub fn into_parts(self) -> (P, Handler<R, W>) {
        (self.processor, self.handler)
    }

    pub fn get_manifest(&self) -> ProcessorResult<Manifest> {
        self.processor.get_manifest()
    }

    /// Validate and run against the handler's environment.
    ///
    /// An unset environment is treated as empty.
    pub fn process(&mut self) -> ProcessorResult<&Environment> {
        let env = self.handler.env_or_default();
        self.processor.process_in_place(env)?;
        Ok(env)
    }

    /// Apply `key=value` arguments through `update_data`, so they may
    /// reference keys loaded or parsed before them.
    pub fn parse_arguments<I, S>(&mut self, args: I) -> ProcessorResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for arg in args {
            let arg = arg.as_ref();
            let (key, value) = split_argument(arg)
                .ok_or_else(|| ProcessorError::IllegalArgument(arg.to_string()))?;
            self.handler.update_data(key, value)?;
        }
        Ok(())
    }

    /// Read input, apply arguments, process, write output.
    ///
    /// A [`ProcessorError`] is reported on `diagnostics` as
    /// `ProcessorError: <message>` and turned into [`ShellStatus::Reported`].
    /// Document-layer failures are not reported here; they come back as `Err`.
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
            Err(ProcessorError::Handler(e)) => Err(e),
            Err(e) => {
                tracing::error!(processor = self.processor.name(), error = %e, "processor failed");
                writeln!(diagnostics, "ProcessorError: {}", e)?;
                Ok(ShellStatus::Reported)
            }
        }
    }

    fn run_shell<I, S>(&mut self, args: I) -> ProcessorResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.handler.read_input_document()?;
        self.parse_arguments(args)?;
        self.process()?;
        self.handler.write_output_document()?;
        Ok(())
    }
}
