use crate::options::default_mark_name;
use crate::spec::legend::LegendOrientSpec;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LegendOptions {
    pub name: Option<String>,
    pub position: Option<LegendOrientSpec>,
    pub title: Option<String>,
    /// Facet columns forming the legend entry identity; when set, hover
    /// highlighting is scoped to a per-legend signal instead of the shared one
    pub keys: Option<Vec<String>>,
    /// Wire hover-to-highlight behavior
    pub highlight: Option<bool>,
    /// Clicking entries toggles series visibility
    pub is_toggleable: Option<bool>,
    pub columns: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendSpecOptions {
    pub name: String,
    pub index: usize,
    pub position: LegendOrientSpec,
    pub title: Option<String>,
    pub keys: Option<Vec<String>>,
    pub highlight: bool,
    pub is_toggleable: bool,
    pub columns: Option<u32>,
}

impl LegendOptions {
    pub fn normalize(&self, index: usize) -> LegendSpecOptions {
        LegendSpecOptions {
            name: default_mark_name(self.name.as_ref(), "legend", index),
            index,
            position: self.position.unwrap_or(LegendOrientSpec::Bottom),
            title: self.title.clone(),
            keys: self.keys.clone(),
            highlight: self.highlight.unwrap_or(false),
            is_toggleable: self.is_toggleable.unwrap_or(false),
            columns: self.columns,
        }
    }
}

impl LegendSpecOptions {
    pub fn entry_mark_name(&self) -> String {
        format!("{}_legendEntry", self.name)
    }

    pub fn is_interactive(&self) -> bool {
        self.highlight || self.is_toggleable
    }
}
