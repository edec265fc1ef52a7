use crate::compile::data;
use crate::compile::encoding::{band_rule, color_production_rule, mark_opacity_rules, scale_field_rule};
use crate::compile::scale::{self, ScaleAxis};
use crate::compile::signal;
use crate::constants::{COLOR_SCALE, OPACITY_SCALE};
use crate::options::bar::BarSpecOptions;
use crate::options::{is_interactive, Orientation};
use crate::spec::chart::ChartSpec;
use crate::spec::mark::{MarkFromSpec, MarkSpec};
use vegaforge_common::error::{Result, ResultWithContext};

pub fn add_bar(spec: &mut ChartSpec, options: &BarSpecOptions) -> Result<()> {
    // data
    {
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
    let (dimension_axis, metric_axis) = match options.orientation {
        Orientation::Vertical => (ScaleAxis::X, ScaleAxis::Y),
        Orientation::Horizontal => (ScaleAxis::Y, ScaleAxis::X),
    };
    let band_scale = scale::add_band_dimension_scale(
        &mut spec.scales,
        dimension_axis,
        &options.dimension,
        options.padding_ratio,
        options.padding_outer,
    );
    let stack_fields = vec![
        format!("{}0", options.metric),
        format!("{}1", options.metric),
    ];
    let metric_scale = scale::add_metric_scale(&mut spec.scales, &stack_fields, metric_axis);
    scale::add_field_to_facet_scale_domain(&mut spec.scales, COLOR_SCALE, &options.color);
    scale::add_field_to_facet_scale_domain(&mut spec.scales, OPACITY_SCALE, &options.opacity);

    // marks
    spec.marks
        .push(bar_mark(options, &band_scale, &metric_scale));
    Ok(())
}

fn bar_mark(options: &BarSpecOptions, band_scale: &str, metric_scale: &str) -> MarkSpec {
    let mut mark = MarkSpec::new("rect", options.name.clone());
    mark.from = Some(MarkFromSpec::data(crate::constants::FILTERED_TABLE));
    mark.interactive = Some(is_interactive(options));

    let metric0 = format!("{}0", options.metric);
    let metric1 = format!("{}1", options.metric);
    let encode = mark.encode.get_or_insert_with(Default::default);
    let enter = encode.enter_mut();
    enter.set("fill", color_production_rule(&options.color));
    let update = encode.update_mut();
    match options.orientation {
        Orientation::Vertical => {
            update.set("x", scale_field_rule(band_scale, options.dimension.as_str()));
            update.set("width", band_rule(band_scale));
            update.set("y", scale_field_rule(metric_scale, metric0));
            update.set("y2", scale_field_rule(metric_scale, metric1));
        }
        Orientation::Horizontal => {
            update.set("y", scale_field_rule(band_scale, options.dimension.as_str()));
            update.set("height", band_rule(band_scale));
            update.set("x", scale_field_rule(metric_scale, metric0));
            update.set("x2", scale_field_rule(metric_scale, metric1));
        }
    }
    update.set("opacity", mark_opacity_rules(options));
    mark
}
