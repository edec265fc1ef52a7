//! Find-or-create scale registry.
//!
//! Scales are addressed by name, or by type plus axis convention when no
//! name applies. Domain field lists only grow and never duplicate: the
//! insertion position of the first field is what downstream consumers (e.g.
//! legend entry order) observe.

use crate::constants::{
    CATEGORICAL_COLORS, COLOR_SCALE, DISCRETE_PADDING, FILTERED_TABLE, LINEAR_PADDING,
    LINE_TYPE_DASHES, LINE_TYPE_SCALE, LINE_WIDTH_SCALE, OPACITY_SCALE, OPACITY_STEPS,
    POINT_PADDING, SECONDARY_COLOR_SCALE, SYMBOL_SIZE_SCALE,
};
use crate::options::FacetRef;
use crate::spec::scale::{
    ScaleDataFieldsRef, ScaleDomainSpec, ScaleRangeSpec, ScaleSpec, ScaleTypeSpec,
};
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleAxis {
    X,
    Y,
}

impl ScaleAxis {
    pub fn range_name(&self) -> &'static str {
        match self {
            ScaleAxis::X => "width",
            ScaleAxis::Y => "height",
        }
    }

    pub fn prefix(&self) -> &'static str {
        match self {
            ScaleAxis::X => "x",
            ScaleAxis::Y => "y",
        }
    }
}

/// Default name for a positional scale, e.g. `xBand`, `yLinear`
pub fn default_scale_name(scale_type: ScaleTypeSpec, axis: ScaleAxis) -> String {
    let type_name = match scale_type {
        ScaleTypeSpec::Linear => "Linear",
        ScaleTypeSpec::Log => "Log",
        ScaleTypeSpec::Sqrt => "Sqrt",
        ScaleTypeSpec::Symlog => "Symlog",
        ScaleTypeSpec::Time => "Time",
        ScaleTypeSpec::Utc => "Utc",
        ScaleTypeSpec::Ordinal => "Ordinal",
        ScaleTypeSpec::Band => "Band",
        ScaleTypeSpec::Point => "Point",
    };
    format!("{}{}", axis.prefix(), type_name)
}

pub fn get_scale_index_by_name(scales: &[ScaleSpec], name: &str) -> Option<usize> {
    scales.iter().position(|s| s.name == name)
}

/// Positional lookup by type + axis: the scale must have the right type and
/// span the axis's pixel range
pub fn get_scale_index_by_type(
    scales: &[ScaleSpec],
    scale_type: ScaleTypeSpec,
    axis: ScaleAxis,
) -> Option<usize> {
    scales.iter().position(|s| {
        s.scale_type() == scale_type
            && matches!(&s.range, Some(ScaleRangeSpec::Name(range)) if range == axis.range_name())
    })
}

/// Band padding from the ratio rule: the ratio becomes paddingInner, and the
/// outer padding makes the leftover whitespace symmetric unless explicitly
/// overridden.
pub fn get_band_padding(padding_ratio: f64, padding_outer: Option<f64>) -> (f64, f64) {
    let padding_inner = padding_ratio;
    let padding_outer = padding_outer.unwrap_or(DISCRETE_PADDING - (1.0 - padding_inner) / 2.0);
    (padding_inner, padding_outer)
}

fn empty_fields_domain() -> ScaleDomainSpec {
    ScaleDomainSpec::FieldsReference(ScaleDataFieldsRef {
        data: FILTERED_TABLE.to_string(),
        fields: Vec::new(),
        extra: Default::default(),
    })
}

/// Append fields not already present, preserving insertion order
pub fn add_domain_fields(scale: &mut ScaleSpec, fields: &[String]) {
    if scale.domain.is_none() {
        scale.domain = Some(empty_fields_domain());
    }
    if let Some(existing) = scale.domain_fields_mut() {
        for field in fields {
            if !existing.contains(field) {
                existing.push(field.clone());
            }
        }
    }
}

/// Default shape for a known facet scale name
fn default_facet_scale(scale_name: &str) -> ScaleSpec {
    let (scale_type, range) = match scale_name {
        COLOR_SCALE | SECONDARY_COLOR_SCALE => (
            ScaleTypeSpec::Ordinal,
            ScaleRangeSpec::Array(
                CATEGORICAL_COLORS
                    .iter()
                    .map(|c| Value::String(c.to_string()))
                    .collect(),
            ),
        ),
        LINE_TYPE_SCALE => (
            ScaleTypeSpec::Ordinal,
            ScaleRangeSpec::Array(LINE_TYPE_DASHES.iter().map(|d| json!(d)).collect()),
        ),
        OPACITY_SCALE => (
            ScaleTypeSpec::Ordinal,
            ScaleRangeSpec::Array(OPACITY_STEPS.iter().map(|o| json!(o)).collect()),
        ),
        LINE_WIDTH_SCALE => (
            ScaleTypeSpec::Ordinal,
            ScaleRangeSpec::Array(vec![json!(1.0), json!(2.0), json!(3.0), json!(4.0)]),
        ),
        SYMBOL_SIZE_SCALE => (
            ScaleTypeSpec::Linear,
            ScaleRangeSpec::Array(vec![json!(16.0), json!(400.0)]),
        ),
        _ => (ScaleTypeSpec::Ordinal, ScaleRangeSpec::Array(Vec::new())),
    };
    let mut scale = ScaleSpec::new(scale_name, scale_type);
    scale.range = Some(range);
    scale.domain = Some(empty_fields_domain());
    if scale_name == SYMBOL_SIZE_SCALE {
        scale.zero = Some(false);
    }
    scale
}

/// Accumulate a facet binding into a named scale's domain. Static-value
/// facets never reach scale domains.
pub fn add_field_to_facet_scale_domain(
    scales: &mut Vec<ScaleSpec>,
    scale_name: &str,
    facet: &FacetRef,
) {
    let fields = facet.fields();
    if fields.is_empty() {
        return;
    }
    let index = match get_scale_index_by_name(scales, scale_name) {
        Some(index) => index,
        None => {
            scales.push(default_facet_scale(scale_name));
            scales.len() - 1
        }
    };
    add_domain_fields(&mut scales[index], &fields);
}

/// Find-or-create the linear metric scale on an axis and grow its domain.
/// Returns the scale name for mark encoders.
pub fn add_metric_scale(
    scales: &mut Vec<ScaleSpec>,
    metric_keys: &[String],
    axis: ScaleAxis,
) -> String {
    let index = match get_scale_index_by_type(scales, ScaleTypeSpec::Linear, axis) {
        Some(index) => index,
        None => {
            let mut scale = ScaleSpec::new(
                default_scale_name(ScaleTypeSpec::Linear, axis),
                ScaleTypeSpec::Linear,
            );
            scale.range = Some(ScaleRangeSpec::Name(axis.range_name().to_string()));
            scale.domain = Some(empty_fields_domain());
            scale.nice = Some(true);
            scale.zero = Some(true);
            scales.push(scale);
            scales.len() - 1
        }
    };
    add_domain_fields(&mut scales[index], metric_keys);
    scales[index].name.clone()
}

/// Continuous (time or linear) dimension scale with fixed pixel padding
pub fn add_continuous_dimension_scale(
    scales: &mut Vec<ScaleSpec>,
    scale_type: ScaleTypeSpec,
    axis: ScaleAxis,
    dimension: &str,
) -> String {
    let index = match get_scale_index_by_type(scales, scale_type, axis) {
        Some(index) => index,
        None => {
            let mut scale = ScaleSpec::new(default_scale_name(scale_type, axis), scale_type);
            scale.range = Some(ScaleRangeSpec::Name(axis.range_name().to_string()));
            scale.domain = Some(empty_fields_domain());
            scale.padding = Some(LINEAR_PADDING);
            scales.push(scale);
            scales.len() - 1
        }
    };
    add_domain_fields(&mut scales[index], &[dimension.to_string()]);
    scales[index].name.clone()
}

/// Band dimension scale using the padding ratio rule
pub fn add_band_dimension_scale(
    scales: &mut Vec<ScaleSpec>,
    axis: ScaleAxis,
    dimension: &str,
    padding_ratio: f64,
    padding_outer: Option<f64>,
) -> String {
    let index = match get_scale_index_by_type(scales, ScaleTypeSpec::Band, axis) {
        Some(index) => index,
        None => {
            let (inner, outer) = get_band_padding(padding_ratio, padding_outer);
            let mut scale = ScaleSpec::new(
                default_scale_name(ScaleTypeSpec::Band, axis),
                ScaleTypeSpec::Band,
            );
            scale.range = Some(ScaleRangeSpec::Name(axis.range_name().to_string()));
            scale.domain = Some(empty_fields_domain());
            scale.padding_inner = Some(inner);
            scale.padding_outer = Some(outer);
            scales.push(scale);
            scales.len() - 1
        }
    };
    add_domain_fields(&mut scales[index], &[dimension.to_string()]);
    scales[index].name.clone()
}

/// Point dimension scale with fixed outer padding
pub fn add_point_dimension_scale(
    scales: &mut Vec<ScaleSpec>,
    axis: ScaleAxis,
    dimension: &str,
) -> String {
    let index = match get_scale_index_by_type(scales, ScaleTypeSpec::Point, axis) {
        Some(index) => index,
        None => {
            let mut scale = ScaleSpec::new(
                default_scale_name(ScaleTypeSpec::Point, axis),
                ScaleTypeSpec::Point,
            );
            scale.range = Some(ScaleRangeSpec::Name(axis.range_name().to_string()));
            scale.domain = Some(empty_fields_domain());
            scale.padding_outer = Some(POINT_PADDING);
            scales.push(scale);
            scales.len() - 1
        }
    };
    add_domain_fields(&mut scales[index], &[dimension.to_string()]);
    scales[index].name.clone()
}

/// Drop scales whose domain never accumulated a field. This is how default
/// facet scales (e.g. lineWidth with no line-width faceting anywhere) stay
/// out of the output.
pub fn prune_unused_scales(scales: &mut Vec<ScaleSpec>) {
    scales.retain(|scale| {
        let used = !scale.has_empty_domain();
        if !used {
            log::debug!("pruning unused scale '{}'", scale.name);
        }
        used
    });
}
