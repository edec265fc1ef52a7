use crate::constants::{DEFAULT_METRIC, DEFAULT_OPACITY, DEFAULT_TIME_DIMENSION};
use crate::options::dialogs::{ChartPopoverOptions, ChartTooltipOptions};
use crate::options::{
    default_mark_name, ChartContext, ColorScheme, DimensionScaleType, FacetRef, HighlightBy,
    MarkInteractionOptions,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AreaOptions {
    pub name: Option<String>,
    pub dimension: Option<String>,
    pub metric: Option<String>,
    /// Explicit band bounds; both must be set or neither
    pub metric_start: Option<String>,
    pub metric_end: Option<String>,
    pub color: Option<FacetRef>,
    pub opacity: Option<f64>,
    pub scale_type: Option<DimensionScaleType>,
    /// Stack order column for the implicit-metric mode
    pub order: Option<String>,
    pub highlight_by: Option<HighlightBy>,
    pub chart_tooltips: Vec<ChartTooltipOptions>,
    pub chart_popovers: Vec<ChartPopoverOptions>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AreaSpecOptions {
    pub name: String,
    pub index: usize,
    pub dimension: String,
    pub metric: String,
    pub metric_start: Option<String>,
    pub metric_end: Option<String>,
    pub color: FacetRef,
    pub opacity: FacetRef,
    pub scale_type: DimensionScaleType,
    pub order: Option<String>,
    pub highlight_by: HighlightBy,
    pub chart_tooltips: Vec<ChartTooltipOptions>,
    pub chart_popovers: Vec<ChartPopoverOptions>,
    pub highlighted_item: Option<Value>,
    pub color_scheme: ColorScheme,
    pub animations: bool,
    pub sibling_hover_names: Vec<String>,
}

impl AreaOptions {
    pub fn normalize(&self, index: usize, ctx: &ChartContext) -> AreaSpecOptions {
        let scale_type = self.scale_type.unwrap_or(DimensionScaleType::Time);
        let dimension = self.dimension.clone().unwrap_or_else(|| {
            match scale_type {
                DimensionScaleType::Time => DEFAULT_TIME_DIMENSION,
                _ => crate::constants::DEFAULT_DIMENSION,
            }
            .to_string()
        });

        // metricStart/metricEnd only make sense as a pair; a lone bound is
        // dropped and the mark falls back to single-metric stacking
        let (metric_start, metric_end) = match (&self.metric_start, &self.metric_end) {
            (Some(start), Some(end)) => (Some(start.clone()), Some(end.clone())),
            (None, None) => (None, None),
            (start, end) => {
                log::error!(
                    "area requires both metricStart and metricEnd, got start={start:?} end={end:?}; \
                     using metric instead"
                );
                (None, None)
            }
        };

        AreaSpecOptions {
            name: default_mark_name(self.name.as_ref(), "area", index),
            index,
            dimension,
            metric: self.metric.clone().unwrap_or_else(|| DEFAULT_METRIC.to_string()),
            metric_start,
            metric_end,
            color: self
                .color
                .clone()
                .unwrap_or_else(|| default_static_color(&ctx.color_scheme)),
            opacity: FacetRef::value(self.opacity.unwrap_or(DEFAULT_OPACITY)),
            scale_type,
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

impl AreaSpecOptions {
    /// Stacked mode unless explicit start/end bounds were configured
    pub fn is_stacked(&self) -> bool {
        self.metric_start.is_none()
    }

    /// Fields the area's y encodes read: explicit bounds, or stack outputs
    pub fn metric_fields(&self) -> (String, String) {
        match (&self.metric_start, &self.metric_end) {
            (Some(start), Some(end)) => (start.clone(), end.clone()),
            _ => (format!("{}0", self.metric), format!("{}1", self.metric)),
        }
    }
}

pub fn default_static_color(scheme: &ColorScheme) -> FacetRef {
    let colors = scheme.colors();
    FacetRef::Value(crate::options::StaticValue {
        value: colors.first().cloned().unwrap_or(Value::Null),
    })
}

impl MarkInteractionOptions for AreaSpecOptions {
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
