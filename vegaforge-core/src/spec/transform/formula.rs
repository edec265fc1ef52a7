use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormulaTransformSpec {
    pub expr: String,

    #[serde(rename = "as")]
    pub as_: String,

    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl FormulaTransformSpec {
    pub fn new<E: Into<String>, A: Into<String>>(expr: E, as_: A) -> Self {
        Self {
            expr: expr.into(),
            as_: as_.into(),
            extra: Default::default(),
        }
    }
}
