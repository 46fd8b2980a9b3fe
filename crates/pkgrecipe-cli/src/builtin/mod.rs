//! Built-in processors and output handlers

pub mod end_of_check_phase;
pub mod local_repository;
pub mod path_basename;

pub use end_of_check_phase::EndOfCheckPhase;
pub use local_repository::LocalRepository;
pub use path_basename::PathBasename;

use pkgrecipe_core::{
    BoxedOutputHandler, BoxedProcessor, OutputHandlerRegistry, ProcessorRegistry, RegistryError,
};

/// Register every built-in processor
pub fn register_processors(registry: &mut ProcessorRegistry) -> Result<(), RegistryError> {
    registry.register("EndOfCheckPhase", || -> BoxedProcessor { Box::new(EndOfCheckPhase) })?;
    registry.register("PathBasename", || -> BoxedProcessor { Box::new(PathBasename) })?;
    Ok(())
}

/// Register every built-in output handler
pub fn register_output_handlers(registry: &mut OutputHandlerRegistry) -> Result<(), RegistryError> {
    registry.register("LocalRepository", || -> BoxedOutputHandler {
        Box::new(LocalRepository)
    })?;
    Ok(())
}

pub fn processor_registry() -> Result<ProcessorRegistry, RegistryError> {
    let mut registry = ProcessorRegistry::new();
    register_processors(&mut registry)?;
    Ok(registry)
}

pub fn output_handler_registry() -> Result<OutputHandlerRegistry, RegistryError> {
    let mut registry = OutputHandlerRegistry::new();
    register_output_handlers(&mut registry)?;
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkgrecipe_core::ProcessorExt;

    #[test]
    fn test_builtin_registries() {
        let processors = processor_registry().unwrap();
        assert_eq!(
            processors.names().collect::<Vec<_>>(),
            vec!["EndOfCheckPhase", "PathBasename"]
        );

        let handlers = output_handler_registry().unwrap();
        assert!(handlers.contains("LocalRepository"));
    }

    #[test]
    fn test_every_builtin_declares_a_manifest() {
        let processors = processor_registry().unwrap();
        for name in processors.names() {
            let processor = processors.create(name).unwrap();
            assert!(processor.get_manifest().is_ok(), "{} has no manifest", name);
            assert_eq!(processor.name(), name);
        }
    }
}
