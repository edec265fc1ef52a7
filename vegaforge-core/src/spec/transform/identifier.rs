use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentifierTransformSpec {
    #[serde(rename = "as")]
    pub as_: String,

    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl IdentifierTransformSpec {
    pub fn new<A: Into<String>>(as_: A) -> Self {
        Self {
            as_: as_.into(),
            extra: Default::default(),
        }
    }
}
