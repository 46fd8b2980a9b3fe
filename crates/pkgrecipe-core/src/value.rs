//! Environment document types
//!
//! The environment is the key/value document handed from one processor to
//! the next. Every value is a string, a sequence of values or a nested
//! mapping.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::HandlerResult;
use crate::substitution;

/// A single node of the environment document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    String(String),
    Array(Vec<Value>),
    Dict(BTreeMap<String, Value>),
}

impl Value {
    /// Borrow the string payload, if this is a string leaf
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Dict(map) => Some(map),
            _ => None,
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Value::Dict(map)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{}", s),
            other => match serde_json::to_string(other) {
                Ok(json) => write!(f, "{}", json),
                Err(_) => Err(fmt::Error),
            },
        }
    }
}

/// The shared key/value document flowing through a chain of processors
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Environment(BTreeMap<String, Value>);

impl Environment {
    /// Create an empty environment
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Get a value only if it is a string leaf
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Store a value verbatim, without variable substitution
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Store `value` under `key` after replacing every `%name%` token in its
    /// string leaves with the current string value of `name`.
    ///
    /// Tokens resolve against the environment as it stands before the call,
    /// so a value cannot reference its own key unless that key already exists.
    pub fn update_data(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> HandlerResult<()> {
        let key = key.into();
        let value = substitution::substitute(value.into(), self)?;
        tracing::debug!(key = %key, "updating environment");
        self.0.insert(key, value);
        Ok(())
    }

    /// Apply [`update_data`](Self::update_data) once per entry, in a single
    /// pass. Each entry sees the updates made by the entries before it.
    pub fn inject<K, V, I>(&mut self, arguments: I) -> HandlerResult<()>
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in arguments {
            self.update_data(key, value)?;
        }
        Ok(())
    }

    /// Insert entries verbatim, skipping keys that are already present
    pub fn merge_defaults<K, V, I>(&mut self, defaults: I)
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in defaults {
            self.0.entry(key.into()).or_insert_with(|| value.into());
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> BTreeMap<String, Value> {
        self.0
    }
}

impl From<BTreeMap<String, Value>> for Environment {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Environment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl IntoIterator for Environment {
    type Item = (String, Value);
    type IntoIter = std::collections::btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HandlerError;

    #[test]
    fn test_update_data_without_tokens_is_identity() {
        let mut env = Environment::new();
        let value = Value::from(vec!["a", "b"]);
        env.update_data("list", value.clone()).unwrap();
        assert_eq!(env.get("list"), Some(&value));
    }

    #[test]
    fn test_update_data_substitutes() {
        let mut env: Environment = [("x", "hello")].into_iter().collect();
        env.update_data("y", "%x% world").unwrap();
        assert_eq!(env.get_str("y"), Some("hello world"));
    }

    #[test]
    fn test_update_data_cannot_reference_itself() {
        let mut env = Environment::new();
        let err = env.update_data("me", "%me%").unwrap_err();
        assert!(matches!(err, HandlerError::UnresolvedReference { key } if key == "me"));
        assert!(env.is_empty());
    }

    #[test]
    fn test_inject_sees_prior_entries() {
        let mut env = Environment::new();
        env.inject(vec![("NAME", "Foo"), ("pkg", "%NAME%.pkg")]).unwrap();
        assert_eq!(env.get_str("pkg"), Some("Foo.pkg"));
    }

    #[test]
    fn test_inject_does_not_see_later_entries() {
        let mut env = Environment::new();
        let err = env
            .inject(vec![("pkg", "%NAME%.pkg"), ("NAME", "Foo")])
            .unwrap_err();
        assert!(matches!(err, HandlerError::UnresolvedReference { .. }));
    }

    #[test]
    fn test_merge_defaults_keeps_existing_values() {
        let mut env: Environment = [("repo_dir", "/from/document")].into_iter().collect();
        env.merge_defaults([("repo_dir", "/from/config"), ("channel", "%stable%")]);
        assert_eq!(env.get_str("repo_dir"), Some("/from/document"));
        assert_eq!(env.get_str("channel"), Some("%stable%"));
    }

    #[test]
    fn test_deserialize_rejects_numbers() {
        let result: Result<Environment, _> = serde_json::from_str(r#"{"A": 1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::from("plain").to_string(), "plain");
        assert_eq!(Value::from(vec!["a"]).to_string(), r#"["a"]"#);
    }
}
