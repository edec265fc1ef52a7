use crate::spec::axis::AxisOrientSpec;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AxisOptions {
    pub position: Option<AxisOrientSpec>,
    pub title: Option<String>,
    pub grid: Option<bool>,
    pub ticks: Option<bool>,
    pub tick_count: Option<Value>,
    pub labels: Option<bool>,
    pub label_angle: Option<f64>,
    pub base_line: Option<bool>,
    pub format: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisSpecOptions {
    pub index: usize,
    pub position: AxisOrientSpec,
    pub title: Option<String>,
    pub grid: bool,
    pub ticks: bool,
    pub tick_count: Option<Value>,
    pub labels: bool,
    pub label_angle: Option<f64>,
    pub base_line: bool,
    pub format: Option<String>,
}

impl AxisOptions {
    pub fn normalize(&self, index: usize) -> AxisSpecOptions {
        let position = self.position.unwrap_or(AxisOrientSpec::Bottom);
        // metric axes default to grid lines, dimension axes don't
        let default_grid = matches!(position, AxisOrientSpec::Left | AxisOrientSpec::Right);
        AxisSpecOptions {
            index,
            position,
            title: self.title.clone(),
            grid: self.grid.unwrap_or(default_grid),
            ticks: self.ticks.unwrap_or(false),
            tick_count: self.tick_count.clone(),
            labels: self.labels.unwrap_or(true),
            label_angle: self.label_angle,
            base_line: self.base_line.unwrap_or(false),
            format: self.format.clone(),
        }
    }
}

impl AxisSpecOptions {
    /// Whether this axis annotates the x (dimension) or y (metric) direction
    pub fn is_vertical_axis(&self) -> bool {
        matches!(self.position, AxisOrientSpec::Left | AxisOrientSpec::Right)
    }
}
