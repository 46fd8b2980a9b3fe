use pkgrecipe_core::{Environment, InputVariables, OutputVariables, Processor, ProcessorResult};

/// Marks where a recipe stops when only checking for updates. Does nothing
/// on its own.
pub struct EndOfCheckPhase;

impl Processor for EndOfCheckPhase {
    fn name(&self) -> &str {
        "EndOfCheckPhase"
    }

    fn description(&self) -> Option<String> {
        Some("Marks the end of the check phase of a recipe. Does nothing.".to_string())
    }

    fn input_variables(&self) -> Option<InputVariables> {
        Some(InputVariables::new())
    }

    fn output_variables(&self) -> Option<OutputVariables> {
        Some(OutputVariables::new())
    }

    fn main(&mut self, _env: &mut Environment) -> ProcessorResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkgrecipe_core::ProcessorExt;

    #[test]
    fn test_leaves_environment_untouched() {
        let env: Environment = [("NAME", "Foo")].into_iter().collect();
        let out = EndOfCheckPhase.process(env.clone()).unwrap();
        assert_eq!(out, env);
    }
}
