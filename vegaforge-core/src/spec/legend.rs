use crate::spec::mark::MarkEncodingsSpec;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LegendSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub orient: Option<LegendOrientSpec>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub encode: Option<LegendEncodeSpec>,

    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LegendOrientSpec {
    Left,
    Right,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LegendEncodeSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entries: Option<LegendEntriesEncodeSpec>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<LegendEntriesEncodeSpec>,

    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LegendEntriesEncodeSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub interactive: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub enter: Option<MarkEncodingsSpec>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub update: Option<MarkEncodingsSpec>,

    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}
