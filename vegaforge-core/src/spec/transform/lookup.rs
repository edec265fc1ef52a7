use crate::spec::values::Field;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupTransformSpec {
    pub from: String,
    pub key: String,
    pub fields: Vec<Field>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,

    #[serde(rename = "as", skip_serializing_if = "Option::is_none")]
    pub as_: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl LookupTransformSpec {
    pub fn output_fields(&self) -> Vec<String> {
        match (&self.as_, &self.values) {
            (Some(as_), _) => as_.clone(),
            (None, Some(values)) => values.clone(),
            (None, None) => Vec::new(),
        }
    }
}
