use crate::compile::scale::ScaleAxis;
use crate::options::axis::AxisSpecOptions;
use crate::spec::axis::{AxisFormatTypeSpec, AxisSpec};
use crate::spec::chart::ChartSpec;
use crate::spec::mark::MarkSpec;
use crate::spec::scale::{ScaleRangeSpec, ScaleSpec, ScaleTypeSpec};
use vegaforge_common::error::Result;

/// Axes bind to whichever positional scale the series marks already
/// registered for their direction; an axis with no backing scale is logged
/// and skipped rather than failing the build.
pub fn add_axis(spec: &mut ChartSpec, options: &AxisSpecOptions) -> Result<()> {
    let axis_direction = if options.is_vertical_axis() {
        ScaleAxis::Y
    } else {
        ScaleAxis::X
    };
    let Some(scale) = resolve_axis_scale(&spec.scales, None, axis_direction) else {
        log::error!(
            "no {} scale exists for an axis at position {:?}; skipping axis",
            axis_direction.range_name(),
            options.position
        );
        return Ok(());
    };
    let format_type = match scale.scale_type() {
        ScaleTypeSpec::Time => Some(AxisFormatTypeSpec::Time),
        ScaleTypeSpec::Utc => Some(AxisFormatTypeSpec::Utc),
        _ => None,
    };

    let mut axis = AxisSpec::new(scale.name.clone(), options.position);
    axis.title = options.title.clone();
    axis.grid = Some(options.grid);
    axis.ticks = Some(options.ticks);
    axis.tick_count = options.tick_count.clone();
    axis.labels = Some(options.labels);
    axis.label_angle = options.label_angle;
    axis.domain = Some(options.base_line);
    axis.format = options.format.clone();
    axis.format_type = format_type;
    spec.axes.push(axis);
    Ok(())
}

/// Scale resolution for an axis direction. Group-local scales shadow
/// top-level scales of the same direction, so a trellised group's axis sees
/// its own scale first.
pub fn resolve_axis_scale<'a>(
    top_level: &'a [ScaleSpec],
    group: Option<&'a MarkSpec>,
    axis: ScaleAxis,
) -> Option<&'a ScaleSpec> {
    if let Some(group) = group {
        if let Some(scale) = find_positional_scale(&group.scales, axis) {
            return Some(scale);
        }
    }
    find_positional_scale(top_level, axis)
}

fn find_positional_scale(scales: &[ScaleSpec], axis: ScaleAxis) -> Option<&ScaleSpec> {
    scales.iter().find(|s| {
        matches!(&s.range, Some(ScaleRangeSpec::Name(range)) if range == axis.range_name())
    })
}
