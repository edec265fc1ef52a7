use crate::compile::data;
use crate::compile::encoding::{
    facet_rule, mark_opacity_rules, scale_field_rule, value_rule, RuleChain,
};
use crate::compile::scale::{self, ScaleAxis};
use crate::compile::signal;
use crate::compile::trendline::{self, TrendlineParent};
use crate::constants::{
    COLOR_SCALE, FILTERED_TABLE, HIGHLIGHTED_ITEM, LINE_TYPE_SCALE, LINE_WIDTH_SCALE, MARK_ID,
    OPACITY_SCALE,
};
use crate::options::line::LineSpecOptions;
use crate::options::{has_popover, is_interactive, DimensionScaleType};
use crate::spec::chart::ChartSpec;
use crate::spec::mark::{MarkFacetSpec, MarkFromSpec, MarkSpec};
use crate::spec::scale::ScaleTypeSpec;
use itertools::Itertools;
use serde_json::json;
use vegaforge_common::error::{Result, ResultWithContext};

pub fn add_line(spec: &mut ChartSpec, options: &LineSpecOptions) -> Result<()> {
    // data
    if options.scale_type == DimensionScaleType::Time {
        let table = data::get_table_data_mut(&mut spec.data)
            .with_context(|| "missing table data source")?;
        data::add_time_transform(table, &options.dimension);
    }
    if is_interactive(options) {
        data::add_highlighted_data(&mut spec.data, options);
    }

    // signals; hover events come from the voronoi hit areas, one datum deep
    let (event_mark, datum_order) = if is_interactive(options) {
        (format!("{}_voronoi", options.name), 2)
    } else {
        (options.name.clone(), 1)
    };
    signal::add_interaction_signals(&mut spec.signals, options, &event_mark, datum_order, options.animations);

    // scales
    let dimension = data::dimension_field(&options.dimension, options.scale_type);
    let dimension_scale = add_dimension_scale(spec, options, &dimension);
    let metric_scale =
        scale::add_metric_scale(&mut spec.scales, &[options.metric.clone()], ScaleAxis::Y);
    scale::add_field_to_facet_scale_domain(&mut spec.scales, COLOR_SCALE, &options.color);
    scale::add_field_to_facet_scale_domain(&mut spec.scales, LINE_TYPE_SCALE, &options.line_type);
    scale::add_field_to_facet_scale_domain(&mut spec.scales, LINE_WIDTH_SCALE, &options.line_width);
    scale::add_field_to_facet_scale_domain(&mut spec.scales, OPACITY_SCALE, &options.opacity);

    // marks
    let facets = series_facets(options);
    spec.marks
        .push(line_group_mark(options, &facets, &dimension_scale, &metric_scale, &dimension));
    if is_interactive(options) || options.static_points {
        spec.marks
            .push(point_mark(options, &dimension_scale, &metric_scale, &dimension));
    }
    if is_interactive(options) {
        spec.marks.push(voronoi_mark(options));
    }

    // trendlines
    let parent = TrendlineParent {
        name: &options.name,
        dimension: dimension.clone(),
        metric: &options.metric,
        color: &options.color,
        facets,
        dimension_scale_name: dimension_scale,
        has_popover: has_popover(options),
    };
    trendline::add_trendlines(spec, &parent, &options.trendlines)?;
    Ok(())
}

/// Facet columns for line series, color first so it drives legend order
pub fn series_facets(options: &LineSpecOptions) -> Vec<String> {
    options
        .color
        .fields()
        .into_iter()
        .chain(options.line_type.fields())
        .chain(options.line_width.fields())
        .chain(options.opacity.fields())
        .unique()
        .collect()
}

fn add_dimension_scale(
    spec: &mut ChartSpec,
    options: &LineSpecOptions,
    dimension: &str,
) -> String {
    match options.scale_type {
        DimensionScaleType::Time => scale::add_continuous_dimension_scale(
            &mut spec.scales,
            ScaleTypeSpec::Time,
            ScaleAxis::X,
            dimension,
        ),
        DimensionScaleType::Linear => scale::add_continuous_dimension_scale(
            &mut spec.scales,
            ScaleTypeSpec::Linear,
            ScaleAxis::X,
            dimension,
        ),
        DimensionScaleType::Point | DimensionScaleType::Band => {
            scale::add_point_dimension_scale(&mut spec.scales, ScaleAxis::X, dimension)
        }
    }
}

fn line_group_mark(
    options: &LineSpecOptions,
    facets: &[String],
    dimension_scale: &str,
    metric_scale: &str,
    dimension: &str,
) -> MarkSpec {
    let facet_name = format!("{}_facet", options.name);
    let mut line = MarkSpec::new("line", options.name.clone());
    line.from = Some(MarkFromSpec::data(facet_name.clone()));
    line.interactive = Some(false);
    let encode = line.encode.get_or_insert_with(Default::default);
    let enter = encode.enter_mut();
    enter.set("y", scale_field_rule(metric_scale, options.metric.as_str()));
    enter.set("stroke", facet_rule(&options.color, COLOR_SCALE));
    enter.set("strokeDash", facet_rule(&options.line_type, LINE_TYPE_SCALE));
    enter.set("strokeWidth", facet_rule(&options.line_width, LINE_WIDTH_SCALE));
    let update = encode.update_mut();
    update.set("x", scale_field_rule(dimension_scale, dimension));
    update.set("opacity", mark_opacity_rules(options));
    update.set("interpolate", value_rule(options.interpolation.name()));

    let mut group = MarkSpec::new("group", format!("{}_group", options.name));
    group.from = Some(MarkFromSpec {
        data: None,
        facet: Some(MarkFacetSpec {
            data: FILTERED_TABLE.to_string(),
            name: facet_name,
            groupby: if facets.is_empty() {
                None
            } else {
                Some(facets.to_vec().into())
            },
            extra: Default::default(),
        }),
    });
    group.marks.push(line);
    group
}

/// Point symbols over the line: always visible with staticPoints, otherwise
/// only the hovered datum. Also the voronoi source geometry.
fn point_mark(
    options: &LineSpecOptions,
    dimension_scale: &str,
    metric_scale: &str,
    dimension: &str,
) -> MarkSpec {
    let mut mark = MarkSpec::new("symbol", format!("{}_point", options.name));
    mark.from = Some(MarkFromSpec::data(FILTERED_TABLE));
    mark.interactive = Some(false);
    let encode = mark.encode.get_or_insert_with(Default::default);
    let enter = encode.enter_mut();
    enter.set("y", scale_field_rule(metric_scale, options.metric.as_str()));
    enter.set("fill", facet_rule(&options.color, COLOR_SCALE));
    let update = encode.update_mut();
    update.set("x", scale_field_rule(dimension_scale, dimension));
    let opacity = if options.static_points {
        RuleChain::new().fallback(value_rule(1.0))
    } else {
        RuleChain::new()
            .rule(
                format!("{HIGHLIGHTED_ITEM} === datum.{MARK_ID}"),
                value_rule(1.0),
            )
            .fallback(value_rule(0.0))
    };
    update.set("opacity", opacity);
    mark
}

/// Invisible voronoi cells over the point geometry create generous hover
/// targets for sparse lines. Cell datums nest the source datum, hence the
/// deeper datum order in signal wiring.
fn voronoi_mark(options: &LineSpecOptions) -> MarkSpec {
    let mut mark = MarkSpec::new("path", format!("{}_voronoi", options.name));
    mark.from = Some(MarkFromSpec::data(format!("{}_point", options.name)));
    mark.interactive = Some(true);
    let encode = mark.encode.get_or_insert_with(Default::default);
    let enter = encode.enter_mut();
    enter.set("fill", value_rule("transparent"));
    enter.set("stroke", value_rule("transparent"));
    enter.set("isVoronoi", value_rule(true));
    mark.transform.push(json!({
        "type": "voronoi",
        "x": "datum.x",
        "y": "datum.y",
        "size": [{"signal": "width"}, {"signal": "height"}],
    }));
    mark
}
