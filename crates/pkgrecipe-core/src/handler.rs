//! Handler: environment document I/O and controlled mutation
//!
//! A [`Handler`] owns the environment document together with the streams it
//! is read from and written to. The caller picks the streams; nothing here
//! falls back to the process's stdin/stdout on its own.

use std::io::{Read, Write};

use crate::error::{HandlerError, HandlerResult};
use crate::value::{Environment, Value};

/// Base for processors and output handlers
#[derive(Debug)]
pub struct Handler<R, W> {
    env: Option<Environment>,
    input: R,
    output: W,
}

impl<R: Read, W: Write> Handler<R, W> {
    /// Create a handler; no validation happens here
    pub fn new(env: Option<Environment>, input: R, output: W) -> Self {
        Self { env, input, output }
    }

    /// Read the whole input stream into the environment.
    ///
    /// Empty input yields an empty environment.
    pub fn read_input_document(&mut self) -> HandlerResult<()> {
        let mut data = Vec::new();
        self.input.read_to_end(&mut data)?;

        let env = if data.is_empty() {
            Environment::new()
        } else {
            serde_json::from_slice(&data).map_err(HandlerError::Decode)?
        };
        tracing::debug!(keys = env.len(), "read environment document");
        self.env = Some(env);
        Ok(())
    }

    /// Serialize the environment to the output stream.
    ///
    /// Writes nothing when the environment was never set.
    pub fn write_output_document(&mut self) -> HandlerResult<()> {
        let Some(env) = &self.env else {
            return Ok(());
        };

        let mut data = serde_json::to_vec_pretty(env).map_err(HandlerError::Encode)?;
        data.push(b'\n');
        self.output.write_all(&data)?;
        self.output.flush()?;
        tracing::debug!(keys = env.len(), "wrote environment document");
        Ok(())
    }

    /// Store `value` under `key` with `%name%` substitution.
    ///
    /// An unset environment starts out empty.
    pub fn update_data(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> HandlerResult<()> {
        self.env_or_default().update_data(key, value)
    }

    /// Apply [`update_data`](Self::update_data) for every argument in one pass
    pub fn inject<K, V, I>(&mut self, arguments: I) -> HandlerResult<()>
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        self.env_or_default().inject(arguments)
    }

    pub(crate) fn env_or_default(&mut self) -> &mut Environment {
        self.env.get_or_insert_with(Environment::new)
    }
}

impl<R, W> Handler<R, W> {
    pub fn env(&self) -> Option<&Environment> {
        self.env.as_ref()
    }

    pub fn env_mut(&mut self) -> Option<&mut Environment> {
        self.env.as_mut()
    }

    pub fn set_env(&mut self, env: Option<Environment>) {
        self.env = env;
    }

    pub fn into_env(self) -> Option<Environment> {
        self.env
    }

    /// Hand the streams back to the caller
    pub fn into_parts(self) -> (Option<Environment>, R, W) {
        (self.env, self.input, self.output)
    }
}
