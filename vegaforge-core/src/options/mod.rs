//! Input option records: the raw, user-facing shapes (all fields optional)
//! and the fully-defaulted `*SpecOptions` records the compile pipeline
//! consumes. Normalization never fails; invalid combinations are logged and
//! degraded to the simpler mode.

pub mod area;
pub mod axis;
pub mod bar;
pub mod chart;
pub mod dialogs;
pub mod donut;
pub mod legend;
pub mod line;
pub mod scatter;
pub mod trendline;

use crate::constants::{CATEGORICAL_COLORS, SERIES_ID};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use dialogs::{ChartPopoverOptions, ChartTooltipOptions};

/// A visual-channel binding: either faceted by one or more data columns, or a
/// constant value. Static values never enter scale domains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FacetRef {
    Field(String),
    Fields(Vec<String>),
    Value(StaticValue),
}

impl FacetRef {
    pub fn value<V: Into<Value>>(value: V) -> Self {
        FacetRef::Value(StaticValue {
            value: value.into(),
        })
    }

    pub fn is_static(&self) -> bool {
        matches!(self, FacetRef::Value(_))
    }

    /// Facet columns, in order; empty for static values
    pub fn fields(&self) -> Vec<String> {
        match self {
            FacetRef::Field(f) => vec![f.clone()],
            FacetRef::Fields(fs) => fs.clone(),
            FacetRef::Value(_) => Vec::new(),
        }
    }
}

impl From<&str> for FacetRef {
    fn from(v: &str) -> Self {
        FacetRef::Field(v.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticValue {
    pub value: Value,
}

/// What a hover highlights: the hovered item alone, or a whole group of rows
/// sharing the dimension value, the series, or an explicit key set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HighlightBy {
    Mode(HighlightMode),
    Keys(Vec<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightMode {
    Item,
    Dimension,
    Series,
}

impl Default for HighlightBy {
    fn default() -> Self {
        HighlightBy::Mode(HighlightMode::Item)
    }
}

impl HighlightBy {
    pub fn is_group_based(&self) -> bool {
        !matches!(self, HighlightBy::Mode(HighlightMode::Item))
    }

    /// Columns whose joined values form the highlight group identity
    pub fn group_fields(&self, dimension: &str) -> Vec<String> {
        match self {
            HighlightBy::Mode(HighlightMode::Item) => Vec::new(),
            HighlightBy::Mode(HighlightMode::Dimension) => vec![dimension.to_string()],
            HighlightBy::Mode(HighlightMode::Series) => vec![SERIES_ID.to_string()],
            HighlightBy::Keys(keys) => keys.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

/// Dimension-axis scale type for continuous/band marks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DimensionScaleType {
    Time,
    Linear,
    Band,
    Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Interpolation {
    #[default]
    Monotone,
    Linear,
    StepAfter,
    Basis,
}

impl Interpolation {
    pub fn name(&self) -> &'static str {
        match self {
            Interpolation::Monotone => "monotone",
            Interpolation::Linear => "linear",
            Interpolation::StepAfter => "step-after",
            Interpolation::Basis => "basis",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorScheme {
    #[default]
    Categorical,
    Custom(Vec<String>),
}

impl ColorScheme {
    pub fn colors(&self) -> Vec<Value> {
        match self {
            ColorScheme::Categorical => CATEGORICAL_COLORS
                .iter()
                .map(|c| Value::String(c.to_string()))
                .collect(),
            ColorScheme::Custom(colors) => {
                colors.iter().map(|c| Value::String(c.clone())).collect()
            }
        }
    }
}

/// Chart-level context threaded into every mark normalization
#[derive(Debug, Clone, Default)]
pub struct ChartContext {
    pub color_scheme: ColorScheme,
    pub highlighted_item: Option<Value>,
    pub animations: bool,
}

/// Interaction surface shared by every series-mark options record; the data,
/// signal, and encoding builders are written against this trait rather than
/// the concrete mark types.
pub trait MarkInteractionOptions {
    fn name(&self) -> &str;
    fn dimension_field(&self) -> &str;
    fn chart_tooltips(&self) -> &[ChartTooltipOptions];
    fn chart_popovers(&self) -> &[ChartPopoverOptions];
    fn highlight_by(&self) -> &HighlightBy;
    fn highlighted_item(&self) -> Option<&Value>;
    fn opacity_facet(&self) -> &FacetRef;
    fn sibling_hover_names(&self) -> &[String] {
        &[]
    }
}

/// Tooltip children only; popovers are a separate interaction surface
pub fn get_tooltips<O: MarkInteractionOptions + ?Sized>(options: &O) -> &[ChartTooltipOptions] {
    options.chart_tooltips()
}

pub fn has_popover<O: MarkInteractionOptions + ?Sized>(options: &O) -> bool {
    !options.chart_popovers().is_empty()
}

pub fn is_interactive<O: MarkInteractionOptions + ?Sized>(options: &O) -> bool {
    !options.chart_tooltips().is_empty() || !options.chart_popovers().is_empty()
}

pub fn is_highlighted_by_group<O: MarkInteractionOptions + ?Sized>(options: &O) -> bool {
    options.highlight_by().is_group_based()
}

/// Mark names are camelCased so they stay valid in generated event selectors
/// and signal names.
pub fn to_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut capitalize_next = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if capitalize_next && !out.is_empty() {
                out.extend(c.to_uppercase());
            } else if out.is_empty() {
                out.extend(c.to_lowercase());
            } else {
                out.push(c);
            }
            capitalize_next = false;
        } else {
            capitalize_next = true;
        }
    }
    out
}

/// Default name for the `index`-th mark of a kind, unless the user set one
pub fn default_mark_name(user_name: Option<&String>, kind: &str, index: usize) -> String {
    match user_name {
        Some(name) if !name.is_empty() => to_camel_case(name),
        _ => format!("{kind}{index}"),
    }
}

#[cfg(test)]
mod tests {
    use super::{default_mark_name, to_camel_case};

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("My bar chart"), "myBarChart");
        assert_eq!(to_camel_case("revenue-by-region"), "revenueByRegion");
        assert_eq!(to_camel_case("bar0"), "bar0");
        assert_eq!(to_camel_case("Already Camel"), "alreadyCamel");
    }

    #[test]
    fn test_default_mark_name() {
        assert_eq!(default_mark_name(None, "area", 0), "area0");
        assert_eq!(
            default_mark_name(Some(&"My area".to_string()), "area", 3),
            "myArea"
        );
    }
}
