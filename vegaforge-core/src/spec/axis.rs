use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisSpec {
    pub scale: String,
    pub orient: AxisOrientSpec,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticks: Option<bool>,

    #[serde(rename = "tickCount", skip_serializing_if = "Option::is_none")]
    pub tick_count: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<bool>,

    #[serde(rename = "labelAngle", skip_serializing_if = "Option::is_none")]
    pub label_angle: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(rename = "formatType", skip_serializing_if = "Option::is_none")]
    pub format_type: Option<AxisFormatTypeSpec>,

    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl AxisSpec {
    pub fn new<S: Into<String>>(scale: S, orient: AxisOrientSpec) -> Self {
        Self {
            scale: scale.into(),
            orient,
            title: None,
            grid: None,
            ticks: None,
            tick_count: None,
            labels: None,
            label_angle: None,
            domain: None,
            format: None,
            format_type: None,
            extra: Default::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisOrientSpec {
    Top,
    Bottom,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisFormatTypeSpec {
    Number,
    Time,
    Utc,
}
