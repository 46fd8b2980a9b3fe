//! Processor manifests
//!
//! A manifest is the static description a processor gives of itself: what it
//! does, which environment keys it reads and which it writes. Recipe tooling
//! reads manifests without running anything.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Declaration of one input variable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputVariable {
    pub required: bool,
    pub description: String,
}

/// Declaration of one output variable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputVariable {
    pub description: String,
}

/// Input variable specification, keyed by variable name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputVariables(BTreeMap<String, InputVariable>);

impl InputVariables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a variable that must be present before the processor runs
    pub fn required(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.0.insert(
            name.into(),
            InputVariable {
                required: true,
                description: description.into(),
            },
        );
        self
    }

    pub fn optional(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.0.insert(
            name.into(),
            InputVariable {
                required: false,
                description: description.into(),
            },
        );
        self
    }

    pub fn get(&self, name: &str) -> Option<&InputVariable> {
        self.0.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &InputVariable)> {
        self.0.iter()
    }

    /// Names of the variables flagged as required
    pub fn required_names(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(|(_, var)| var.required)
            .map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Output variable specification, keyed by variable name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutputVariables(BTreeMap<String, OutputVariable>);

impl OutputVariables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.0.insert(
            name.into(),
            OutputVariable {
                description: description.into(),
            },
        );
        self
    }

    pub fn get(&self, name: &str) -> Option<&OutputVariable> {
        self.0.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &OutputVariable)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The complete `(description, input_variables, output_variables)` triple
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub description: String,
    pub input_variables: InputVariables,
    pub output_variables: OutputVariables,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_names() {
        let inputs = InputVariables::new()
            .required("url", "Download URL")
            .optional("filename", "Local file name")
            .required("NAME", "Item name");

        let required: Vec<_> = inputs.required_names().collect();
        assert_eq!(required, vec!["NAME", "url"]);
        assert_eq!(inputs.len(), 3);
    }

    #[test]
    fn test_manifest_json_shape() {
        let manifest = Manifest {
            description: "Does things".to_string(),
            input_variables: InputVariables::new().required("foo", "Foo input"),
            output_variables: OutputVariables::new().output("bar", "Bar output"),
        };

        let json = serde_json::to_value(&manifest).unwrap();
        assert_eq!(json["description"], "Does things");
        assert_eq!(json["input_variables"]["foo"]["required"], true);
        assert_eq!(json["output_variables"]["bar"]["description"], "Bar output");
    }
}
