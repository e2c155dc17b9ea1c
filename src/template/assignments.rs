//! Name→value store consumed by template execution

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

/// Values that placeholder names resolve to.
///
/// Values are stringified on read: strings verbatim, everything else in
/// its JSON rendering. No shape is imposed on names; multi-template
/// execution writes intermediate resolved template text back under the
/// template's own name.
#[derive(Debug, Clone, Default)]
pub struct Assignments {
    values: HashMap<String, Value>,
}

impl Assignments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stringified value bound to `key`, if any.
    pub fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).map(|value| match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Binds `key` to `value`, replacing any existing binding.
    pub fn assign(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Binds every entry of `entries`.
    pub fn assign_map<K, V>(&mut self, entries: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<Value>,
    {
        for (key, value) in entries {
            self.assign(key, value);
        }
    }

    /// Binds every top-level field of a serializable record under its
    /// field name. Values that do not serialize to a record are ignored.
    pub fn assign_object<T: Serialize>(&mut self, record: &T) {
        if let Ok(Value::Object(fields)) = serde_json::to_value(record) {
            for (key, value) in fields {
                self.values.insert(key, value);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Assignments {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut assignments = Assignments::new();
        assignments.assign_map(iter);
        assignments
    }
}
