use crate::options::area::AreaOptions;
use crate::options::axis::AxisOptions;
use crate::options::bar::BarOptions;
use crate::options::donut::DonutOptions;
use crate::options::legend::LegendOptions;
use crate::options::line::LineOptions;
use crate::options::scatter::ScatterOptions;
use crate::options::ColorScheme;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Top-level chart input: dataset rows, chart-level configuration, and the
/// component children the orchestrator folds into one spec.
#[derive(Debug, Clone, Default)]
pub struct ChartOptions {
    /// Input rows, one JSON object per datum
    pub data: Vec<Value>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub color_scheme: ColorScheme,
    /// Series hidden from every mark (toggleable-legend state)
    pub hidden_series: Vec<String>,
    /// Externally forced highlighted mark id
    pub highlighted_item: Option<Value>,
    /// Externally forced highlighted series
    pub highlighted_series: Option<String>,
    pub animations: bool,
    pub children: Vec<ChartChildOptions>,
}

/// One chart child. The `Other` arm carries anything this library does not
/// recognize; the orchestrator logs it and moves on without failing the
/// build.
#[derive(Debug, Clone)]
pub enum ChartChildOptions {
    Area(AreaOptions),
    Bar(BarOptions),
    Line(LineOptions),
    Scatter(ScatterOptions),
    Donut(DonutOptions),
    Combo(ComboOptions),
    Legend(LegendOptions),
    Axis(AxisOptions),
    Title(TitleOptions),
    Other(Value),
}

impl ChartChildOptions {
    /// Fixed build order: series marks before the legend, the legend before
    /// axes, the title last. Axes and legends read scale domains the series
    /// builders produce, so this order is correctness, not cosmetics.
    pub fn priority(&self) -> u8 {
        match self {
            ChartChildOptions::Area(_)
            | ChartChildOptions::Bar(_)
            | ChartChildOptions::Line(_)
            | ChartChildOptions::Scatter(_)
            | ChartChildOptions::Donut(_)
            | ChartChildOptions::Combo(_) => 0,
            ChartChildOptions::Legend(_) => 1,
            ChartChildOptions::Axis(_) => 2,
            ChartChildOptions::Title(_) => 3,
            ChartChildOptions::Other(_) => 4,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ChartChildOptions::Area(_) => "area",
            ChartChildOptions::Bar(_) => "bar",
            ChartChildOptions::Line(_) => "line",
            ChartChildOptions::Scatter(_) => "scatter",
            ChartChildOptions::Donut(_) => "donut",
            ChartChildOptions::Combo(_) => "combo",
            ChartChildOptions::Legend(_) => "legend",
            ChartChildOptions::Axis(_) => "axis",
            ChartChildOptions::Title(_) => "title",
            ChartChildOptions::Other(_) => "other",
        }
    }
}

/// A combo chart: bar and line children sharing one dimension axis. Each
/// sub-mark learns its siblings' names so hovering one fades the others.
#[derive(Debug, Clone, Default)]
pub struct ComboOptions {
    pub name: Option<String>,
    pub children: Vec<ComboChildOptions>,
}

#[derive(Debug, Clone)]
pub enum ComboChildOptions {
    Bar(BarOptions),
    Line(LineOptions),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TitleOptions {
    pub text: String,
    pub position: Option<String>,
    pub font_size: Option<f64>,
}
