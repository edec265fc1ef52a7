use crate::constants::{DEFAULT_METRIC, DEFAULT_TIME_DIMENSION};
use crate::options::area::default_static_color;
use crate::options::dialogs::{ChartPopoverOptions, ChartTooltipOptions};
use crate::options::trendline::{TrendlineOptions, TrendlineSpecOptions};
use crate::options::{
    default_mark_name, ChartContext, ColorScheme, DimensionScaleType, FacetRef, HighlightBy,
    Interpolation, MarkInteractionOptions,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LineOptions {
    pub name: Option<String>,
    pub dimension: Option<String>,
    pub metric: Option<String>,
    pub color: Option<FacetRef>,
    pub line_type: Option<FacetRef>,
    pub line_width: Option<FacetRef>,
    pub opacity: Option<FacetRef>,
    pub scale_type: Option<DimensionScaleType>,
    pub interpolation: Option<Interpolation>,
    /// Always render point symbols, not just on hover
    pub static_points: Option<bool>,
    pub highlight_by: Option<HighlightBy>,
    pub chart_tooltips: Vec<ChartTooltipOptions>,
    pub chart_popovers: Vec<ChartPopoverOptions>,
    pub trendlines: Vec<TrendlineOptions>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineSpecOptions {
    pub name: String,
    pub index: usize,
    pub dimension: String,
    pub metric: String,
    pub color: FacetRef,
    pub line_type: FacetRef,
    pub line_width: FacetRef,
    pub opacity: FacetRef,
    pub scale_type: DimensionScaleType,
    pub interpolation: Interpolation,
    pub static_points: bool,
    pub highlight_by: HighlightBy,
    pub chart_tooltips: Vec<ChartTooltipOptions>,
    pub chart_popovers: Vec<ChartPopoverOptions>,
    pub trendlines: Vec<TrendlineSpecOptions>,
    pub highlighted_item: Option<Value>,
    pub color_scheme: ColorScheme,
    pub animations: bool,
    pub sibling_hover_names: Vec<String>,
}

impl LineOptions {
    pub fn normalize(&self, index: usize, ctx: &ChartContext) -> LineSpecOptions {
        let scale_type = self.scale_type.unwrap_or(DimensionScaleType::Time);
        let name = default_mark_name(self.name.as_ref(), "line", index);
        let trendlines = self
            .trendlines
            .iter()
            .enumerate()
            .map(|(i, t)| t.normalize(&name, i))
            .collect();
        LineSpecOptions {
            dimension: self.dimension.clone().unwrap_or_else(|| {
                match scale_type {
                    DimensionScaleType::Time => DEFAULT_TIME_DIMENSION,
                    _ => crate::constants::DEFAULT_DIMENSION,
                }
                .to_string()
            }),
            index,
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
            line_width: self
                .line_width
                .clone()
                .unwrap_or_else(|| FacetRef::value(2.0)),
            opacity: self.opacity.clone().unwrap_or_else(|| FacetRef::value(1.0)),
            scale_type,
            interpolation: self.interpolation.unwrap_or_default(),
            static_points: self.static_points.unwrap_or(false),
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

impl MarkInteractionOptions for LineSpecOptions {
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
