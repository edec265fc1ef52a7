use crate::constants::{DEFAULT_DONUT_HOLE_RATIO, DEFAULT_METRIC};
use crate::options::dialogs::{ChartPopoverOptions, ChartTooltipOptions};
use crate::options::{
    default_mark_name, ChartContext, ColorScheme, FacetRef, HighlightBy, MarkInteractionOptions,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DonutOptions {
    pub name: Option<String>,
    pub metric: Option<String>,
    /// Segment column; every donut needs a color facet for its wedges
    pub color: Option<FacetRef>,
    pub start_angle: Option<f64>,
    pub hole_ratio: Option<f64>,
    pub chart_tooltips: Vec<ChartTooltipOptions>,
    pub chart_popovers: Vec<ChartPopoverOptions>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DonutSpecOptions {
    pub name: String,
    pub index: usize,
    pub metric: String,
    pub color: FacetRef,
    pub start_angle: f64,
    pub hole_ratio: f64,
    pub opacity: FacetRef,
    pub highlight_by: HighlightBy,
    pub chart_tooltips: Vec<ChartTooltipOptions>,
    pub chart_popovers: Vec<ChartPopoverOptions>,
    pub highlighted_item: Option<Value>,
    pub color_scheme: ColorScheme,
    pub animations: bool,
}

impl DonutOptions {
    pub fn normalize(&self, index: usize, ctx: &ChartContext) -> DonutSpecOptions {
        let hole_ratio = match self.hole_ratio {
            Some(ratio) if (0.0..1.0).contains(&ratio) => ratio,
            Some(ratio) => {
                log::error!("donut holeRatio must be in [0, 1), got {ratio}; using default");
                DEFAULT_DONUT_HOLE_RATIO
            }
            None => DEFAULT_DONUT_HOLE_RATIO,
        };
        DonutSpecOptions {
            name: default_mark_name(self.name.as_ref(), "donut", index),
            index,
            metric: self
                .metric
                .clone()
                .unwrap_or_else(|| DEFAULT_METRIC.to_string()),
            color: self
                .color
                .clone()
                .unwrap_or_else(|| FacetRef::Field("id".to_string())),
            start_angle: self.start_angle.unwrap_or(0.0),
            hole_ratio,
            opacity: FacetRef::value(1.0),
            highlight_by: HighlightBy::default(),
            chart_tooltips: self.chart_tooltips.clone(),
            chart_popovers: self.chart_popovers.clone(),
            highlighted_item: ctx.highlighted_item.clone(),
            color_scheme: ctx.color_scheme.clone(),
            animations: ctx.animations,
        }
    }
}

impl DonutSpecOptions {
    /// Segment column used where other marks use their dimension
    pub fn segment_field(&self) -> String {
        self.color
            .fields()
            .first()
            .cloned()
            .unwrap_or_else(|| "id".to_string())
    }
}

impl MarkInteractionOptions for DonutSpecOptions {
    fn name(&self) -> &str {
        &self.name
    }
    fn dimension_field(&self) -> &str {
        match &self.color {
            FacetRef::Field(f) => f,
            _ => "id",
        }
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
}
