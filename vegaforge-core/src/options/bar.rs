use crate::constants::{DEFAULT_DIMENSION, DEFAULT_METRIC, PADDING_RATIO};
use crate::options::area::default_static_color;
use crate::options::dialogs::{ChartPopoverOptions, ChartTooltipOptions};
use crate::options::{
    default_mark_name, ChartContext, ColorScheme, FacetRef, HighlightBy, MarkInteractionOptions,
    Orientation,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BarOptions {
    pub name: Option<String>,
    pub dimension: Option<String>,
    pub metric: Option<String>,
    pub color: Option<FacetRef>,
    pub opacity: Option<FacetRef>,
    pub orientation: Option<Orientation>,
    pub padding_ratio: Option<f64>,
    /// Explicit outer padding; otherwise derived from the ratio rule
    pub padding_outer: Option<f64>,
    /// Stack order column
    pub order: Option<String>,
    pub highlight_by: Option<HighlightBy>,
    pub chart_tooltips: Vec<ChartTooltipOptions>,
    pub chart_popovers: Vec<ChartPopoverOptions>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarSpecOptions {
    pub name: String,
    pub index: usize,
    pub dimension: String,
    pub metric: String,
    pub color: FacetRef,
    pub opacity: FacetRef,
    pub orientation: Orientation,
    pub padding_ratio: f64,
    pub padding_outer: Option<f64>,
    pub order: Option<String>,
    pub highlight_by: HighlightBy,
    pub chart_tooltips: Vec<ChartTooltipOptions>,
    pub chart_popovers: Vec<ChartPopoverOptions>,
    pub highlighted_item: Option<Value>,
    pub color_scheme: ColorScheme,
    pub animations: bool,
    pub sibling_hover_names: Vec<String>,
}

impl BarOptions {
    pub fn normalize(&self, index: usize, ctx: &ChartContext) -> BarSpecOptions {
        BarSpecOptions {
            name: default_mark_name(self.name.as_ref(), "bar", index),
            index,
            dimension: self
                .dimension
                .clone()
                .unwrap_or_else(|| DEFAULT_DIMENSION.to_string()),
            metric: self
                .metric
                .clone()
                .unwrap_or_else(|| DEFAULT_METRIC.to_string()),
            color: self
                .color
                .clone()
                .unwrap_or_else(|| default_static_color(&ctx.color_scheme)),
            opacity: self.opacity.clone().unwrap_or_else(|| FacetRef::value(1.0)),
            orientation: self.orientation.unwrap_or_default(),
            padding_ratio: self.padding_ratio.unwrap_or(PADDING_RATIO),
            padding_outer: self.padding_outer,
            order: self.order.clone(),
            highlight_by: self.highlight_by.clone().unwrap_or_default(),
            chart_tooltips: self.chart_tooltips.clone(),
            chart_popovers: self.chart_popovers.clone(),
            highlighted_item: ctx.highlighted_item.clone(),
            color_scheme: ctx.color_scheme.clone(),
            animations: ctx.animations,
            sibling_hover_names: Vec::new(),
        }
    }
}

impl MarkInteractionOptions for BarSpecOptions {
    fn name(&self) -> &str {
        &self.name
    }
    fn dimension_field(&self) -> &str {
        &self.dimension
    }
    fn chart_tooltips(&self) -> &[ChartTooltipOptions] {
        &self.chart_tooltips
    }
    fn chart_popovers(&self) -> &[ChartPopoverOptions] {
        &self.chart_popovers
    }
    fn highlight_by(&self) -> &HighlightBy {
        &self.highlight_by
    }
    fn highlighted_item(&self) -> Option<&Value> {
        self.highlighted_item.as_ref()
    }
    fn opacity_facet(&self) -> &FacetRef {
        &self.opacity
    }
    fn sibling_hover_names(&self) -> &[String] {
        &self.sibling_hover_names
    }
}
