use std::path::Path;

use pkgrecipe_core::{
    Environment, InputVariables, OutputVariables, Processor, ProcessorError, ProcessorResult,
};

/// Extracts the last component of `pathname` into `filename`
pub struct PathBasename;

impl Processor for PathBasename {
    fn name(&self) -> &str {
        "PathBasename"
    }

    fn description(&self) -> Option<String> {
        Some("Sets filename to the last path component of pathname.".to_string())
    }

    fn input_variables(&self) -> Option<InputVariables> {
        Some(InputVariables::new().required("pathname", "Path to take the file name from."))
    }

    fn output_variables(&self) -> Option<OutputVariables> {
        Some(OutputVariables::new().output("filename", "Last component of pathname."))
    }

    fn main(&mut self, env: &mut Environment) -> ProcessorResult<()> {
        let pathname = env
            .get_str("pathname")
            .ok_or_else(|| ProcessorError::Failed("pathname is not a string".to_string()))?;

        let filename = Path::new(pathname)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| ProcessorError::Failed(format!("{} has no file name", pathname)))?;

        tracing::debug!(filename = %filename, "extracted file name");
        env.insert("filename", filename);
        Ok(())
    }
}
