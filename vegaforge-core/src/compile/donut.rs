use crate::compile::data;
use crate::compile::encoding::{facet_rule, mark_opacity_rules, signal_rule};
use crate::compile::scale;
use crate::compile::signal;
use crate::constants::{COLOR_SCALE, FILTERED_TABLE};
use crate::options::donut::DonutSpecOptions;
use crate::options::is_interactive;
use crate::spec::chart::ChartSpec;
use crate::spec::data::DataSpec;
use crate::spec::mark::{MarkFromSpec, MarkSpec};
use crate::spec::transform::aggregate::AggregateOpSpec;
use crate::spec::transform::stack::{StackOffsetSpec, StackTransformSpec};
use crate::spec::transform::window::{WindowTransformOpSpec, WindowTransformSpec};
use crate::spec::transform::TransformSpec;
use serde_json::Value;
use vegaforge_common::error::Result;

/// Donut wedges come from an angle-layout data source: a stack over the
/// metric (no grouping, so wedges abut) plus a full-frame window sum for the
/// total each wedge is normalized against.
pub fn add_donut(spec: &mut ChartSpec, options: &DonutSpecOptions) -> Result<()> {
    // data
    let layout_name = format!("{}_layout", options.name);
    if spec.data.iter().all(|d| d.name != layout_name) {
        spec.data.push(layout_data(options, &layout_name));
    }
    if is_interactive(options) {
        data::add_highlighted_data(&mut spec.data, options);
    }

    // signals
    signal::add_interaction_signals(&mut spec.signals, options, &options.name, 1, options.animations);

    // scales: only the color facet; a donut has no positional scales
    scale::add_field_to_facet_scale_domain(&mut spec.scales, COLOR_SCALE, &options.color);

    // marks
    spec.marks.push(arc_mark(options, &layout_name));
    Ok(())
}

fn layout_data(options: &DonutSpecOptions, layout_name: &str) -> DataSpec {
    let metric = &options.metric;
    let mut data = DataSpec::derived(layout_name, FILTERED_TABLE);
    data.transform
        .push(TransformSpec::Stack(StackTransformSpec {
            field: metric.as_str().into(),
            groupby: None,
            sort: None,
            as_: Some(vec![format!("{metric}0"), format!("{metric}1")]),
            offset: Some(StackOffsetSpec::Zero),
            extra: Default::default(),
        }));
    data.transform
        .push(TransformSpec::Window(WindowTransformSpec {
            sort: None,
            groupby: None,
            ops: vec![WindowTransformOpSpec::Aggregate(AggregateOpSpec::Sum)],
            fields: vec![Some(metric.as_str().into())],
            as_: Some(vec![Some(format!("{}_sum", options.name))]),
            frame: Some([Value::Null, Value::Null]),
            ignore_peers: None,
            extra: Default::default(),
        }));
    data
}

fn arc_mark(options: &DonutSpecOptions, layout_name: &str) -> MarkSpec {
    let name = &options.name;
    let metric = &options.metric;
    let sum = format!("{name}_sum");
    let start_angle = options.start_angle;

    let mut mark = MarkSpec::new("arc", name.clone());
    mark.from = Some(MarkFromSpec::data(layout_name));
    mark.interactive = Some(is_interactive(options));
    let encode = mark.encode.get_or_insert_with(Default::default);
    let enter = encode.enter_mut();
    enter.set("fill", facet_rule(&options.color, COLOR_SCALE));
    let update = encode.update_mut();
    update.set("x", signal_rule("width / 2"));
    update.set("y", signal_rule("height / 2"));
    update.set(
        "startAngle",
        signal_rule(format!(
            "datum['{metric}0'] / datum['{sum}'] * 2 * PI + {start_angle}"
        )),
    );
    update.set(
        "endAngle",
        signal_rule(format!(
            "datum['{metric}1'] / datum['{sum}'] * 2 * PI + {start_angle}"
        )),
    );
    update.set(
        "innerRadius",
        signal_rule(format!("min(width, height) / 2 * {}", options.hole_ratio)),
    );
    update.set("outerRadius", signal_rule("min(width, height) / 2"));
    update.set("opacity", mark_opacity_rules(options));
    mark
}
