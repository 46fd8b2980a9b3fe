//! Sequential processor chains
//!
//! A chain runs its steps strictly in order. Each step first injects its
//! arguments into the environment (with substitution), then processes it;
//! the resulting environment is what the next step sees. The first error
//! stops the chain and is returned as is.

use crate::error::ProcessorResult;
use crate::processor::{BoxedProcessor, Processor, ProcessorExt};
use crate::value::{Environment, Value};

/// One processor plus the arguments injected before it runs
pub struct Step {
    processor: BoxedProcessor,
    arguments: Vec<(String, Value)>,
}

impl Step {
    pub fn new(processor: BoxedProcessor) -> Self {
        Self {
            processor,
            arguments: Vec::new(),
        }
    }

    pub fn argument(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments.push((key.into(), value.into()));
        self
    }

    pub fn name(&self) -> &str {
        self.processor.name()
    }
}

#[derive(Default)]
pub struct Chain {
    steps: Vec<Step>,
}

impl Chain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a processor without arguments
    pub fn then(self, processor: impl Processor + 'static) -> Self {
        self.then_step(Step::new(Box::new(processor)))
    }

    pub fn then_step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    pub fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    /// Names of the processors in run order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(Step::name)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn run(&mut self, mut env: Environment) -> ProcessorResult<Environment> {
        let total = self.steps.len();
        for (index, step) in self.steps.iter_mut().enumerate() {
            let span = tracing::info_span!(
                "step",
                index = index + 1,
                total,
                processor = step.processor.name()
            );
            let _entered = span.enter();

            env.inject(step.arguments.iter().cloned())?;
            env = step.processor.process(env)?;
            tracing::info!(keys = env.len(), "step finished");
        }
        Ok(env)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HandlerError, InputVariables, ProcessorError};

    /// Copies one key to another
    struct CopyKey {
        from: &'static str,
        to: &'static str,
    }

    impl Processor for CopyKey {
        fn name(&self) -> &str {
            "CopyKey"
        }

        fn input_variables(&self) -> Option<InputVariables> {
            Some(InputVariables::new().required(self.from, "Source key"))
        }

        fn main(&mut self, env: &mut Environment) -> ProcessorResult<()> {
            let value = env.get(self.from).cloned().unwrap_or(Value::from(""));
            env.insert(self.to, value);
            Ok(())
        }
    }

    #[test]
    fn test_environment_flows_between_steps() {
        let mut chain = Chain::new()
            .then(CopyKey { from: "a", to: "b" })
            .then(CopyKey { from: "b", to: "c" });

        let env = chain.run([("a", "value")].into_iter().collect()).unwrap();
        assert_eq!(env.get_str("c"), Some("value"));
        assert_eq!(chain.names().collect::<Vec<_>>(), vec!["CopyKey", "CopyKey"]);
    }

    #[test]
    fn test_arguments_are_injected_with_substitution() {
        let step = Step::new(Box::new(CopyKey {
            from: "path",
            to: "out",
        }))
        .argument("path", "/tmp/%NAME%");
        let mut chain = Chain::new().then_step(step);

        let env = chain.run([("NAME", "Foo")].into_iter().collect()).unwrap();
        assert_eq!(env.get_str("out"), Some("/tmp/Foo"));
    }

    #[test]
    fn test_missing_input_stops_chain() {
        let mut chain = Chain::new()
            .then(CopyKey { from: "missing", to: "x" })
            .then(CopyKey { from: "a", to: "b" });

        let err = chain.run([("a", "1")].into_iter().collect()).unwrap_err();
        assert_eq!(err.to_string(), "CopyKey requires missing");
    }

    #[test]
    fn test_unresolved_argument_stops_chain() {
        let step = Step::new(Box::new(CopyKey { from: "a", to: "b" })).argument("a", "%nope%");
        let mut chain = Chain::new().then_step(step);

        let err = chain.run(Environment::new()).unwrap_err();
        assert!(matches!(
            err,
            ProcessorError::Handler(HandlerError::UnresolvedReference { .. })
        ));
    }
}
