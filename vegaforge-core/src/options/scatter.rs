use crate::constants::{DEFAULT_DIMENSION, DEFAULT_METRIC, DEFAULT_SYMBOL_SIZE};
use crate::options::area::default_static_color;
use crate::options::dialogs::{ChartPopoverOptions, ChartTooltipOptions};
use crate::options::trendline::{TrendlineOptions, TrendlineSpecOptions};
use crate::options::{
    default_mark_name, ChartContext, ColorScheme, DimensionScaleType, FacetRef, HighlightBy,
    MarkInteractionOptions,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScatterOptions {
    pub name: Option<String>,
    pub dimension: Option<String>,
    pub metric: Option<String>,
    pub color: Option<FacetRef>,
    pub line_type: Option<FacetRef>,
    pub opacity: Option<FacetRef>,
    pub size: Option<FacetRef>,
    pub dimension_scale_type: Option<DimensionScaleType>,
    pub highlight_by: Option<HighlightBy>,
    pub chart_tooltips: Vec<ChartTooltipOptions>,
    pub chart_popovers: Vec<ChartPopoverOptions>,
    pub trendlines: Vec<TrendlineOptions>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSpecOptions {
    pub name: String,
    pub index: usize,
    pub dimension: String,
    pub metric: String,
    pub color: FacetRef,
    pub line_type: FacetRef,
    pub opacity: FacetRef,
    pub size: FacetRef,
    pub dimension_scale_type: DimensionScaleType,
    pub highlight_by: HighlightBy,
    pub chart_tooltips: Vec<ChartTooltipOptions>,
    pub chart_popovers: Vec<ChartPopoverOptions>,
    pub trendlines: Vec<TrendlineSpecOptions>,
    pub highlighted_item: Option<Value>,
    pub color_scheme: ColorScheme,
    pub animations: bool,
    pub sibling_hover_names: Vec<String>,
}

impl ScatterOptions {
    pub fn normalize(&self, index: usize, ctx: &ChartContext) -> ScatterSpecOptions {
        let name = default_mark_name(self.name.as_ref(), "scatter", index);
        let trendlines = self
            .trendlines
            .iter()
            .enumerate()
            .map(|(i, t)| t.normalize(&name, i))
            .collect();
        ScatterSpecOptions {
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
            line_type: self
                .line_type
                .clone()
                .unwrap_or_else(|| FacetRef::value(Value::Array(Vec::new()))),
            opacity: self.opacity.clone().unwrap_or_else(|| FacetRef::value(1.0)),
            size: self
                .size
                .clone()
                .unwrap_or_else(|| FacetRef::value(DEFAULT_SYMBOL_SIZE)),
            dimension_scale_type: self
                .dimension_scale_type
                .unwrap_or(DimensionScaleType::Linear),
            highlight_by: self.highlight_by.clone().unwrap_or_default(),
            chart_tooltips: self.chart_tooltips.clone(),
            chart_popovers: self.chart_popovers.clone(),
            trendlines,
            highlighted_item: ctx.highlighted_item.clone(),
            color_scheme: ctx.color_scheme.clone(),
            animations: ctx.animations,
            sibling_hover_names: Vec::new(),
            name,
        }
    }
}

impl MarkInteractionOptions for ScatterSpecOptions {
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
