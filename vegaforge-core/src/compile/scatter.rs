use crate::compile::data;
use crate::compile::encoding::{facet_rule, mark_opacity_rules, scale_field_rule, value_rule};
use crate::compile::scale::{self, ScaleAxis};
use crate::compile::signal;
use crate::compile::trendline::{self, TrendlineParent};
use crate::constants::{
    COLOR_SCALE, FILTERED_TABLE, LINE_TYPE_SCALE, OPACITY_SCALE, SYMBOL_SIZE_SCALE,
};
use crate::options::scatter::ScatterSpecOptions;
use crate::options::{has_popover, is_interactive, DimensionScaleType};
use crate::spec::chart::ChartSpec;
use crate::spec::mark::{MarkFromSpec, MarkSpec};
use crate::spec::scale::ScaleTypeSpec;
use itertools::Itertools;
use serde_json::json;
use vegaforge_common::error::{Result, ResultWithContext};

pub fn add_scatter(spec: &mut ChartSpec, options: &ScatterSpecOptions) -> Result<()> {
    // data
    if options.dimension_scale_type == DimensionScaleType::Time {
        let table = data::get_table_data_mut(&mut spec.data)
            .with_context(|| "missing table data source")?;
        data::add_time_transform(table, &options.dimension);
    }
    if is_interactive(options) {
        data::add_highlighted_data(&mut spec.data, options);
    }

    // signals; scatter hover goes through its voronoi paths
    let (event_mark, datum_order) = if is_interactive(options) {
        (format!("{}_voronoi", options.name), 2)
    } else {
        (options.name.clone(), 1)
    };
    signal::add_interaction_signals(&mut spec.signals, options, &event_mark, datum_order, options.animations);

    // scales
    let dimension = data::dimension_field(&options.dimension, options.dimension_scale_type);
    let dimension_scale = match options.dimension_scale_type {
        DimensionScaleType::Time => scale::add_continuous_dimension_scale(
            &mut spec.scales,
            ScaleTypeSpec::Time,
            ScaleAxis::X,
            &dimension,
        ),
        DimensionScaleType::Point | DimensionScaleType::Band => {
            scale::add_point_dimension_scale(&mut spec.scales, ScaleAxis::X, &dimension)
        }
        DimensionScaleType::Linear => scale::add_continuous_dimension_scale(
            &mut spec.scales,
            ScaleTypeSpec::Linear,
            ScaleAxis::X,
            &dimension,
        ),
    };
    let metric_scale =
        scale::add_metric_scale(&mut spec.scales, &[options.metric.clone()], ScaleAxis::Y);
    scale::add_field_to_facet_scale_domain(&mut spec.scales, COLOR_SCALE, &options.color);
    scale::add_field_to_facet_scale_domain(&mut spec.scales, LINE_TYPE_SCALE, &options.line_type);
    scale::add_field_to_facet_scale_domain(&mut spec.scales, OPACITY_SCALE, &options.opacity);
    scale::add_field_to_facet_scale_domain(&mut spec.scales, SYMBOL_SIZE_SCALE, &options.size);

    // marks
    spec.marks
        .push(scatter_mark(options, &dimension_scale, &metric_scale, &dimension));
    if is_interactive(options) {
        spec.marks.push(voronoi_mark(options));
    }

    // trendlines
    let parent = TrendlineParent {
        name: &options.name,
        dimension: dimension.clone(),
        metric: &options.metric,
        color: &options.color,
        facets: series_facets(options),
        dimension_scale_name: dimension_scale,
        has_popover: has_popover(options),
    };
    trendline::add_trendlines(spec, &parent, &options.trendlines)?;
    Ok(())
}

pub fn series_facets(options: &ScatterSpecOptions) -> Vec<String> {
    options
        .color
        .fields()
        .into_iter()
        .chain(options.line_type.fields())
        .chain(options.opacity.fields())
        .chain(options.size.fields())
        .unique()
        .collect()
}

fn scatter_mark(
    options: &ScatterSpecOptions,
    dimension_scale: &str,
    metric_scale: &str,
    dimension: &str,
) -> MarkSpec {
    let mut mark = MarkSpec::new("symbol", options.name.clone());
    mark.from = Some(MarkFromSpec::data(FILTERED_TABLE));
    mark.interactive = Some(false);
    let encode = mark.encode.get_or_insert_with(Default::default);
    let enter = encode.enter_mut();
    enter.set("y", scale_field_rule(metric_scale, options.metric.as_str()));
    enter.set("fill", facet_rule(&options.color, COLOR_SCALE));
    enter.set("size", facet_rule(&options.size, SYMBOL_SIZE_SCALE));
    enter.set("strokeDash", facet_rule(&options.line_type, LINE_TYPE_SCALE));
    let update = encode.update_mut();
    update.set("x", scale_field_rule(dimension_scale, dimension));
    update.set("opacity", mark_opacity_rules(options));
    mark
}

fn voronoi_mark(options: &ScatterSpecOptions) -> MarkSpec {
    let mut mark = MarkSpec::new("path", format!("{}_voronoi", options.name));
    mark.from = Some(MarkFromSpec::data(options.name.clone()));
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
