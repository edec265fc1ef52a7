use serde::{Deserialize, Serialize};

/// Hover tooltip child. Its presence makes the parent mark interactive; the
/// tooltip body itself is rendered by the host and is out of scope here.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartTooltipOptions {
    /// Rows carrying any of these keys are excluded from hover: the
    /// mouseover update becomes a ternary that produces null for them
    pub exclude_data_keys: Option<Vec<String>>,
}

/// Click popover child. Selection signals are only wired when at least one
/// popover is present.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartPopoverOptions {
    pub width: Option<f64>,
    pub height: Option<f64>,
}
