//! Names and numeric defaults shared across the compile pipeline.
//!
//! Generated per-datum fields carry a `vf` prefix so they never collide with
//! user data columns.

/// Unique row identity, produced by the identifier transform on the base table
pub const MARK_ID: &str = "vfMarkId";
/// Series identity, produced by the series-id formula when facets exist
pub const SERIES_ID: &str = "vfSeriesId";
/// Output field of every trendline data transform
pub const TRENDLINE_VALUE: &str = "vfTrendlineValue";

/// Base data source holding the raw input rows
pub const TABLE: &str = "table";
/// Derived data source with hidden series filtered out
pub const FILTERED_TABLE: &str = "filteredTable";

/// Hovered mark id, shared by every mark and tooltip
pub const HIGHLIGHTED_ITEM: &str = "highlightedItem";
/// Hovered series identity; legends write it, series marks read it
pub const HIGHLIGHTED_SERIES: &str = "highlightedSeries";
/// Hovered group identity for group-based highlighting
pub const HIGHLIGHTED_GROUP: &str = "highlightedGroup";
pub const SELECTED_ITEM: &str = "selectedItem";
pub const SELECTED_SERIES: &str = "selectedSeries";
pub const SELECTED_GROUP: &str = "selectedGroup";
/// Series toggled off by the legend; the filtered table consults this
pub const HIDDEN_SERIES: &str = "hiddenSeries";
pub const COLOR_ANIMATION: &str = "vfColorAnimation";
pub const COLOR_ANIMATION_DIRECTION: &str = "vfColorAnimationDirection";

pub const COLOR_SCALE: &str = "color";
pub const SECONDARY_COLOR_SCALE: &str = "secondaryColor";
pub const LINE_TYPE_SCALE: &str = "lineType";
pub const LINE_WIDTH_SCALE: &str = "lineWidth";
pub const OPACITY_SCALE: &str = "opacity";
pub const SYMBOL_SIZE_SCALE: &str = "symbolSize";

pub const DEFAULT_METRIC: &str = "value";
pub const DEFAULT_DIMENSION: &str = "category";
pub const DEFAULT_TIME_DIMENSION: &str = "datetime";

pub const DEFAULT_OPACITY: f64 = 0.8;
/// Divisor applied to a mark's opacity when another mark is highlighted
pub const HIGHLIGHT_CONTRAST_RATIO: f64 = 5.0;
/// Opacity applied to legend entries outside the highlighted series
pub const LEGEND_FADE_OPACITY: f64 = 0.3;

/// Base outer padding for band scales; the ratio rule subtracts half of the
/// non-inner remainder from this value
pub const DISCRETE_PADDING: f64 = 0.5;
/// Default paddingInner ratio for band scales
pub const PADDING_RATIO: f64 = 0.4;
/// Pixel padding for linear and time dimension scales
pub const LINEAR_PADDING: f64 = 32.0;
/// Outer padding for point scales
pub const POINT_PADDING: f64 = 0.5;

pub const DEFAULT_CHART_WIDTH: f64 = 600.0;
pub const DEFAULT_CHART_HEIGHT: f64 = 400.0;

pub const DEFAULT_TRENDLINE_LINE_WIDTH: f64 = 1.0;
pub const DEFAULT_DONUT_HOLE_RATIO: f64 = 0.85;
pub const DEFAULT_SYMBOL_SIZE: f64 = 100.0;

lazy_static! {
    /// Default categorical color cycle (hex), applied to the color scale range
    pub static ref CATEGORICAL_COLORS: Vec<&'static str> = vec![
        "#0fb5ae", "#4046ca", "#f68511", "#de3d82", "#7e84fa", "#72e06a",
        "#147af3", "#7326d3", "#e8c600", "#cb5d00", "#008f5d", "#bce931",
        "#de3d3d", "#d8b7ff", "#85d044", "#6c6c6c",
    ];

    /// Default stroke-dash cycle for the lineType scale
    pub static ref LINE_TYPE_DASHES: Vec<Vec<u32>> = vec![
        vec![],
        vec![7, 4],
        vec![2, 3],
        vec![2, 3, 7, 4],
        vec![3, 4],
        vec![11, 4],
    ];

    /// Default opacity cycle for the opacity scale
    pub static ref OPACITY_STEPS: Vec<f64> = vec![1.0, 0.75, 0.5, 0.25, 0.125];
}
