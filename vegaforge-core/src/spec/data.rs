use crate::spec::transform::TransformSpec;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSpec {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Value>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transform: Vec<TransformSpec>,

    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl DataSpec {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            source: None,
            values: None,
            transform: Vec::new(),
            extra: Default::default(),
        }
    }

    pub fn derived<S: Into<String>, T: Into<String>>(name: S, source: T) -> Self {
        Self {
            source: Some(source.into()),
            ..Self::new(name)
        }
    }

    /// True when a transform of the given tag is already present. Used by the
    /// idempotent builders (e.g. at most one timeunit transform per table).
    pub fn has_transform_of(&self, type_name: &str) -> bool {
        self.transform.iter().any(|tx| tx.type_name() == type_name)
    }

    /// Fields produced by this source's transform chain
    pub fn output_fields(&self) -> Vec<String> {
        self.transform
            .iter()
            .flat_map(|tx| tx.output_fields())
            .collect()
    }
}
