use crate::spec::values::Field;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTransformSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<RegressionMethodSpec>,

    pub x: Field,
    pub y: Field,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub groupby: Option<Vec<Field>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<bool>,

    #[serde(rename = "as", skip_serializing_if = "Option::is_none")]
    pub as_: Option<Vec<String>>,

    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl RegressionTransformSpec {
    pub fn method(&self) -> RegressionMethodSpec {
        self.method.unwrap_or(RegressionMethodSpec::Linear)
    }

    pub fn output_fields(&self) -> Vec<String> {
        self.as_.clone().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegressionMethodSpec {
    Linear,
    Log,
    Exp,
    Pow,
    Quad,
    Poly,
}
