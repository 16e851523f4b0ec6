//! Render context handed to template engines.

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

/// Variables available to a template: one environment's configuration data.
///
/// Top-level keys become template variables. Nested mappings and sequences
/// are reachable through dotted paths (`image.tag`, `ports.0`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RenderContext(Mapping);

impl RenderContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a top-level variable.
    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(Value::String(key.into()), value.into());
        self
    }

    /// Get a top-level variable.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Look up a value by dotted path.
    ///
    /// Mapping segments match string keys; sequence segments must be
    /// zero-based indices.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let mut current = self.0.get(segments.next()?)?;

        for segment in segments {
            current = match untag(current) {
                Value::Mapping(map) => map.get(segment)?,
                Value::Sequence(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }

        Some(untag(current))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_mapping(&self) -> &Mapping {
        &self.0
    }
}

impl From<Mapping> for RenderContext {
    fn from(mapping: Mapping) -> Self {
        Self(mapping)
    }
}

fn untag(value: &Value) -> &Value {
    match value {
        Value::Tagged(tagged) => untag(&tagged.value),
        other => other,
    }
}
