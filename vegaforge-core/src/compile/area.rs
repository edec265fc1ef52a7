use crate::compile::data;
use crate::compile::encoding::{facet_rule, mark_opacity_rules, scale_field_rule, value_rule};
use crate::compile::scale::{self, ScaleAxis};
use crate::compile::signal;
use crate::constants::{COLOR_SCALE, FILTERED_TABLE};
use crate::options::area::AreaSpecOptions;
use crate::options::{is_interactive, DimensionScaleType};
use crate::spec::chart::ChartSpec;
use crate::spec::mark::{MarkFacetSpec, MarkFromSpec, MarkSpec};
use crate::spec::scale::ScaleTypeSpec;
use vegaforge_common::error::{Result, ResultWithContext};

pub fn add_area(spec: &mut ChartSpec, options: &AreaSpecOptions) -> Result<()> {
    // data
    if options.scale_type == DimensionScaleType::Time {
        let table = data::get_table_data_mut(&mut spec.data)
            .with_context(|| "missing table data source")?;
        data::add_time_transform(table, &options.dimension);
    }
    if options.is_stacked() {
        let filtered = data::get_filtered_table_data_mut(&mut spec.data)
            .with_context(|| "missing filteredTable data source")?;
        data::add_stacked_data(
            filtered,
            &options.metric,
            &options.dimension,
            options.order.as_deref(),
        );
    }
    if is_interactive(options) {
        data::add_highlighted_data(&mut spec.data, options);
    }

    // signals
    signal::add_interaction_signals(&mut spec.signals, options, &options.name, 1, options.animations);

    // scales
    let dimension = data::dimension_field(&options.dimension, options.scale_type);
    let dimension_scale = match options.scale_type {
        DimensionScaleType::Time => scale::add_continuous_dimension_scale(
            &mut spec.scales,
            ScaleTypeSpec::Time,
            ScaleAxis::X,
            &dimension,
        ),
        DimensionScaleType::Linear => scale::add_continuous_dimension_scale(
            &mut spec.scales,
            ScaleTypeSpec::Linear,
            ScaleAxis::X,
            &dimension,
        ),
        DimensionScaleType::Point | DimensionScaleType::Band => {
            scale::add_point_dimension_scale(&mut spec.scales, ScaleAxis::X, &dimension)
        }
    };
    let (metric_start, metric_end) = options.metric_fields();
    let metric_scale = scale::add_metric_scale(
        &mut spec.scales,
        &[metric_start.clone(), metric_end.clone()],
        ScaleAxis::Y,
    );
    scale::add_field_to_facet_scale_domain(&mut spec.scales, COLOR_SCALE, &options.color);

    // marks
    spec.marks.push(area_group_mark(
        options,
        &dimension_scale,
        &metric_scale,
        &dimension,
        &metric_start,
        &metric_end,
    ));
    Ok(())
}

pub fn series_facets(options: &AreaSpecOptions) -> Vec<String> {
    options.color.fields()
}

fn area_group_mark(
    options: &AreaSpecOptions,
    dimension_scale: &str,
    metric_scale: &str,
    dimension: &str,
    metric_start: &str,
    metric_end: &str,
) -> MarkSpec {
    let facets = series_facets(options);
    let facet_name = format!("{}_facet", options.name);
    let mut area = MarkSpec::new("area", options.name.clone());
    area.from = Some(MarkFromSpec::data(facet_name.clone()));
    area.interactive = Some(is_interactive(options));
    let encode = area.encode.get_or_insert_with(Default::default);
    let enter = encode.enter_mut();
    enter.set("y", scale_field_rule(metric_scale, metric_start));
    enter.set("y2", scale_field_rule(metric_scale, metric_end));
    enter.set("fill", facet_rule(&options.color, COLOR_SCALE));
    let update = encode.update_mut();
    update.set("x", scale_field_rule(dimension_scale, dimension));
    // fill opacity carries the highlight state machine so series borders stay
    update.set("fillOpacity", mark_opacity_rules(options));
    update.set("interpolate", value_rule("monotone"));

    let mut group = MarkSpec::new("group", format!("{}_group", options.name));
    group.from = Some(MarkFromSpec {
        data: None,
        facet: Some(MarkFacetSpec {
            data: FILTERED_TABLE.to_string(),
            name: facet_name,
            groupby: if facets.is_empty() {
                None
            } else {
                Some(facets.into())
            },
            extra: Default::default(),
        }),
    });
    group.marks.push(area);
    group
}
