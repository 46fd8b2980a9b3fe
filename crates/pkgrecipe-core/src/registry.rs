//! Name → constructor registry for processors and output handlers
//!
//! Implementations are registered explicitly at startup; recipes then look
//! them up by name.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::RegistryError;
use crate::output_handler::OutputHandler;
use crate::processor::Processor;

/// Constructor function that creates a fresh instance
pub type Factory<T> = fn() -> Box<T>;

pub struct Registry<T: ?Sized> {
    factories: BTreeMap<String, Factory<T>>,
}

pub type ProcessorRegistry = Registry<dyn Processor>;
pub type OutputHandlerRegistry = Registry<dyn OutputHandler>;

impl<T: ?Sized> Registry<T> {
    pub fn new() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// Register a constructor under `name`; names are unique
    pub fn register(
        &mut self,
        name: impl Into<String>,
        factory: Factory<T>,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        if self.factories.contains_key(&name) {
            return Err(RegistryError::Duplicate(name));
        }
        tracing::debug!(name = %name, "registered");
        self.factories.insert(name, factory);
        Ok(())
    }

    /// Build a new instance of the implementation registered as `name`
    pub fn create(&self, name: &str) -> Result<Box<T>, RegistryError> {
        self.factories
            .get(name)
            .map(|factory| factory())
            .ok_or_else(|| RegistryError::Unknown(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl<T: ?Sized> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("names", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Environment, ProcessorExt, ProcessorResult};

    struct Touch;

    impl Processor for Touch {
        fn name(&self) -> &str {
            "Touch"
        }

        fn input_variables(&self) -> Option<crate::InputVariables> {
            Some(crate::InputVariables::new())
        }

        fn main(&mut self, env: &mut Environment) -> ProcessorResult<()> {
            env.insert("touched", "yes");
            Ok(())
        }
    }

    fn touch() -> Box<dyn Processor> {
        Box::new(Touch)
    }

    #[test]
    fn test_register_and_create() {
        let mut registry = ProcessorRegistry::new();
        registry.register("Touch", touch).unwrap();

        let mut processor = registry.create("Touch").unwrap();
        assert_eq!(processor.name(), "Touch");
        let env = processor.process(Environment::new()).unwrap();
        assert_eq!(env.get_str("touched"), Some("yes"));
    }

    #[test]
    fn test_duplicate_registration() {
        let mut registry = ProcessorRegistry::new();
        registry.register("Touch", touch).unwrap();
        assert_eq!(
            registry.register("Touch", touch),
            Err(RegistryError::Duplicate("Touch".to_string()))
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_unknown_name() {
        let registry = ProcessorRegistry::new();
        assert!(matches!(
            registry.create("Nope"),
            Err(RegistryError::Unknown(name)) if name == "Nope"
        ));
    }

    #[test]
    fn test_names_sorted() {
        let mut registry = ProcessorRegistry::new();
        registry.register("Zeta", touch).unwrap();
        registry.register("Alpha", touch).unwrap();
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["Alpha", "Zeta"]);
    }
}
