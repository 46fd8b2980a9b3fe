//! `%name%` variable substitution over environment values

use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::error::{HandlerError, HandlerResult};
use crate::value::{Environment, Value};

static KEY_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"%(?P<key>[a-zA-Z_][a-zA-Z_0-9]*)%").expect("Failed to compile key reference regex")
});

/// Resolve every token in every string leaf of `value` against `env`.
///
/// Sequences and mappings keep their exact shape; only strings change.
pub fn substitute(value: Value, env: &Environment) -> HandlerResult<Value> {
    match value {
        Value::String(s) => substitute_str(&s, env).map(Value::String),
        Value::Array(items) => items
            .into_iter()
            .map(|item| substitute(item, env))
            .collect::<HandlerResult<Vec<_>>>()
            .map(Value::Array),
        Value::Dict(map) => map
            .into_iter()
            .map(|(k, v)| substitute(v, env).map(|v| (k, v)))
            .collect::<HandlerResult<_>>()
            .map(Value::Dict),
    }
}

/// Replace tokens in a single string
pub fn substitute_str(text: &str, env: &Environment) -> HandlerResult<String> {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for caps in KEY_REF.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        out.push_str(&text[last..whole.start()]);
        out.push_str(lookup(&caps, env)?);
        last = whole.end();
    }
    out.push_str(&text[last..]);

    Ok(out)
}

fn lookup<'e>(caps: &Captures<'_>, env: &'e Environment) -> HandlerResult<&'e str> {
    let key = caps.name("key").map(|m| m.as_str()).unwrap_or_default();
    match env.get(key) {
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(HandlerError::NonStringReference {
            key: key.to_string(),
        }),
        None => Err(HandlerError::UnresolvedReference {
            key: key.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn env() -> Environment {
        [("NAME", "Firefox"), ("version", "1.0"), ("empty", "")]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_multiple_tokens() {
        let out = substitute_str("%NAME%-%version%.dmg", &env()).unwrap();
        assert_eq!(out, "Firefox-1.0.dmg");
    }

    #[test]
    fn test_lone_percent_signs_are_kept() {
        let out = substitute_str("100% of %NAME%", &env()).unwrap();
        assert_eq!(out, "100% of Firefox");
        assert_eq!(substitute_str("%1abc%", &env()).unwrap(), "%1abc%");
    }

    #[test]
    fn test_replacement_is_not_rescanned() {
        let env: Environment = [("a", "%b%"), ("b", "nope")].into_iter().collect();
        assert_eq!(substitute_str("%a%", &env).unwrap(), "%b%");
    }

    #[test]
    fn test_empty_value_substitutes() {
        assert_eq!(substitute_str("x%empty%y", &env()).unwrap(), "xy");
    }

    #[test]
    fn test_missing_key_fails() {
        let err = substitute(Value::from("%missing%"), &env()).unwrap_err();
        assert!(matches!(err, HandlerError::UnresolvedReference { key } if key == "missing"));
    }

    #[test]
    fn test_non_string_reference_fails() {
        let mut env = env();
        env.insert("list", vec!["a"]);
        let err = substitute_str("%list%", &env).unwrap_err();
        assert!(matches!(err, HandlerError::NonStringReference { key } if key == "list"));
    }

    #[test]
    fn test_nested_structure_is_preserved() {
        let mut inner = BTreeMap::new();
        inner.insert("path".to_string(), Value::from("/tmp/%NAME%"));
        inner.insert("plain".to_string(), Value::from("unchanged"));
        let value = Value::Array(vec![
            Value::Dict(inner),
            Value::from(vec!["%version%", "x"]),
        ]);

        let out = substitute(value, &env()).unwrap();

        let mut expected_inner = BTreeMap::new();
        expected_inner.insert("path".to_string(), Value::from("/tmp/Firefox"));
        expected_inner.insert("plain".to_string(), Value::from("unchanged"));
        let expected = Value::Array(vec![
            Value::Dict(expected_inner),
            Value::from(vec!["1.0", "x"]),
        ]);
        assert_eq!(out, expected);
    }

    #[test]
    fn test_missing_key_deep_in_structure_fails() {
        let value = Value::Array(vec![Value::from(vec!["ok", "%nope%"])]);
        assert!(substitute(value, &env()).is_err());
    }
}
