use crate::spec::axis::AxisSpec;
use crate::spec::data::DataSpec;
use crate::spec::legend::LegendSpec;
use crate::spec::mark::MarkSpec;
use crate::spec::scale::ScaleSpec;
use crate::spec::signal::SignalSpec;
use crate::spec::title::TitleSpec;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    #[serde(rename = "$schema", default = "default_schema")]
    pub schema: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data: Vec<DataSpec>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub signals: Vec<SignalSpec>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scales: Vec<ScaleSpec>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marks: Vec<MarkSpec>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub axes: Vec<AxisSpec>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub legends: Vec<LegendSpec>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<TitleSpec>,

    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl Default for ChartSpec {
    fn default() -> Self {
        Self {
            schema: default_schema(),
            width: None,
            height: None,
            data: Vec::new(),
            signals: Vec::new(),
            scales: Vec::new(),
            marks: Vec::new(),
            axes: Vec::new(),
            legends: Vec::new(),
            title: None,
            extra: Default::default(),
        }
    }
}

pub fn default_schema() -> String {
    String::from("https://vega.github.io/schema/vega/v5.json")
}

impl ChartSpec {
    pub fn get_data(&self, name: &str) -> Option<&DataSpec> {
        self.data.iter().find(|d| d.name == name)
    }

    pub fn get_data_mut(&mut self, name: &str) -> Option<&mut DataSpec> {
        self.data.iter_mut().find(|d| d.name == name)
    }

    pub fn get_signal(&self, name: &str) -> Option<&SignalSpec> {
        self.signals.iter().find(|s| s.name == name)
    }

    pub fn get_signal_mut(&mut self, name: &str) -> Option<&mut SignalSpec> {
        self.signals.iter_mut().find(|s| s.name == name)
    }

    pub fn get_scale(&self, name: &str) -> Option<&ScaleSpec> {
        self.scales.iter().find(|s| s.name == name)
    }

    pub fn get_scale_mut(&mut self, name: &str) -> Option<&mut ScaleSpec> {
        self.scales.iter_mut().find(|s| s.name == name)
    }

    pub fn get_mark(&self, name: &str) -> Option<&MarkSpec> {
        self.marks.iter().find(|m| m.name.as_deref() == Some(name))
    }
}
