//! Top-level orchestrator: folds chart children into one spec in the fixed
//! dependency order, then post-processes the accumulated document.

use crate::compile::{area, axis, bar, data, donut, legend, line, scale, scatter};
use crate::compile::signal::{get_or_create_signal, SignalId};
use crate::constants::{
    DEFAULT_CHART_HEIGHT, DEFAULT_CHART_WIDTH, HIGHLIGHTED_SERIES,
};
use crate::options::chart::{
    ChartChildOptions, ChartOptions, ComboChildOptions, ComboOptions, TitleOptions,
};
use crate::options::ChartContext;
use crate::spec::chart::ChartSpec;
use crate::spec::signal::SignalSpec;
use crate::spec::title::{TitleAnchorSpec, TitleSpec};
use crate::spec::values::{MissingNullOrValue, ValueOrSignal};
use serde_json::Value;
use vegaforge_common::error::{Result, ResultWithContext};

/// Compile a chart description into a complete specification document.
///
/// Children are processed in dependency order regardless of their order in
/// the input: series marks first, then the legend, then axes, then the
/// title. Later children read state (scale domains, marks) the earlier ones
/// produced.
pub fn build_chart_spec(options: &ChartOptions) -> Result<ChartSpec> {
    let ctx = ChartContext {
        color_scheme: options.color_scheme.clone(),
        highlighted_item: options.highlighted_item.clone(),
        animations: options.animations,
    };

    let mut spec = ChartSpec {
        width: Some(options.width.unwrap_or(DEFAULT_CHART_WIDTH)),
        height: Some(options.height.unwrap_or(DEFAULT_CHART_HEIGHT)),
        data: data::base_data(options.data.clone()),
        signals: base_signals(options),
        ..Default::default()
    };

    let mut sorted: Vec<&ChartChildOptions> = options.children.iter().collect();
    sorted.sort_by_key(|child| child.priority());

    let mut counters = ChildCounters::default();
    let mut facets: Vec<String> = Vec::new();
    for child in sorted {
        build_child(&mut spec, child, &mut counters, &mut facets, &ctx)?;
    }

    // post-processing over the accumulated document
    if !facets.is_empty() {
        let table = data::get_table_data_mut(&mut spec.data)
            .with_context(|| "missing table data source")?;
        data::append_series_id_formula(table, &facets);
        let filtered = data::get_filtered_table_data_mut(&mut spec.data)
            .with_context(|| "missing filteredTable data source")?;
        data::append_hidden_series_filter(filtered);
    }
    apply_static_series_highlight(&mut spec, options);
    scale::prune_unused_scales(&mut spec.scales);

    Ok(spec)
}

#[derive(Debug, Default)]
struct ChildCounters {
    area: usize,
    bar: usize,
    line: usize,
    scatter: usize,
    donut: usize,
    legend: usize,
    axis: usize,
}

fn build_child(
    spec: &mut ChartSpec,
    child: &ChartChildOptions,
    counters: &mut ChildCounters,
    facets: &mut Vec<String>,
    ctx: &ChartContext,
) -> Result<()> {
    match child {
        ChartChildOptions::Area(raw) => {
            let options = raw.normalize(counters.area, ctx);
            counters.area += 1;
            add_facets(facets, area::series_facets(&options));
            area::add_area(spec, &options)
        }
        ChartChildOptions::Bar(raw) => {
            let options = raw.normalize(counters.bar, ctx);
            counters.bar += 1;
            add_facets(facets, options.color.fields());
            add_facets(facets, options.opacity.fields());
            bar::add_bar(spec, &options)
        }
        ChartChildOptions::Line(raw) => {
            let options = raw.normalize(counters.line, ctx);
            counters.line += 1;
            add_facets(facets, line::series_facets(&options));
            line::add_line(spec, &options)
        }
        ChartChildOptions::Scatter(raw) => {
            let options = raw.normalize(counters.scatter, ctx);
            counters.scatter += 1;
            add_facets(facets, scatter::series_facets(&options));
            scatter::add_scatter(spec, &options)
        }
        ChartChildOptions::Donut(raw) => {
            let options = raw.normalize(counters.donut, ctx);
            counters.donut += 1;
            add_facets(facets, options.color.fields());
            donut::add_donut(spec, &options)
        }
        ChartChildOptions::Combo(combo) => build_combo(spec, combo, counters, facets, ctx),
        ChartChildOptions::Legend(raw) => {
            let options = raw.normalize(counters.legend);
            counters.legend += 1;
            legend::add_legend(spec, &options)
        }
        ChartChildOptions::Axis(raw) => {
            let options = raw.normalize(counters.axis);
            counters.axis += 1;
            axis::add_axis(spec, &options)
        }
        ChartChildOptions::Title(raw) => {
            spec.title = Some(title_spec(raw));
            Ok(())
        }
        ChartChildOptions::Other(value) => {
            // unrecognized children never fail the build
            log::error!("unrecognized chart child, skipping: {value}");
            Ok(())
        }
    }
}

/// Combo children share the chart but fade each other on hover, so each
/// normalized sub-mark learns its siblings' names before building.
fn build_combo(
    spec: &mut ChartSpec,
    combo: &ComboOptions,
    counters: &mut ChildCounters,
    facets: &mut Vec<String>,
    ctx: &ChartContext,
) -> Result<()> {
    enum Normalized {
        Bar(crate::options::bar::BarSpecOptions),
        Line(crate::options::line::LineSpecOptions),
    }

    let mut normalized: Vec<Normalized> = Vec::new();
    for child in &combo.children {
        match child {
            ComboChildOptions::Bar(raw) => {
                let options = raw.normalize(counters.bar, ctx);
                counters.bar += 1;
                normalized.push(Normalized::Bar(options));
            }
            ComboChildOptions::Line(raw) => {
                let options = raw.normalize(counters.line, ctx);
                counters.line += 1;
                normalized.push(Normalized::Line(options));
            }
        }
    }

    let names: Vec<String> = normalized
        .iter()
        .map(|child| match child {
            Normalized::Bar(o) => o.name.clone(),
            Normalized::Line(o) => o.name.clone(),
        })
        .collect();

    // sibling-fade rules consult each child's hover signal, so every child
    // needs one even when it has no interactive children of its own
    for name in &names {
        crate::compile::signal::ensure_hover_signal_stub(&mut spec.signals, name);
    }

    for (index, child) in normalized.iter_mut().enumerate() {
        let siblings: Vec<String> = names
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, name)| name.clone())
            .collect();
        match child {
            Normalized::Bar(options) => {
                options.sibling_hover_names = siblings;
                add_facets(facets, options.color.fields());
                bar::add_bar(spec, options)?;
            }
            Normalized::Line(options) => {
                options.sibling_hover_names = siblings;
                add_facets(facets, line::series_facets(options));
                line::add_line(spec, options)?;
            }
        }
    }
    Ok(())
}

fn add_facets(facets: &mut Vec<String>, new_facets: Vec<String>) {
    for facet in new_facets {
        if !facets.contains(&facet) {
            facets.push(facet);
        }
    }
}

fn title_spec(options: &TitleOptions) -> TitleSpec {
    let anchor = match options.position.as_deref() {
        Some("start") => Some(TitleAnchorSpec::Start),
        Some("end") => Some(TitleAnchorSpec::End),
        Some("middle") => Some(TitleAnchorSpec::Middle),
        Some(other) => {
            log::error!("unknown title position '{other}', using default");
            None
        }
        None => None,
    };
    TitleSpec {
        text: ValueOrSignal::Value(Value::String(options.text.clone())),
        anchor,
        font_size: options.font_size,
        extra: Default::default(),
    }
}

/// Reactive state every build carries. Values may be overridden by
/// chart-level props (forced highlight, hidden series).
fn base_signals(options: &ChartOptions) -> Vec<SignalSpec> {
    let highlighted_item = match &options.highlighted_item {
        Some(value) => MissingNullOrValue::Value(value.clone()),
        None => MissingNullOrValue::Null,
    };
    let highlighted_series = match &options.highlighted_series {
        Some(series) => MissingNullOrValue::Value(Value::String(series.clone())),
        None => MissingNullOrValue::Null,
    };
    let hidden_series = MissingNullOrValue::Value(Value::Array(
        options
            .hidden_series
            .iter()
            .map(|s| Value::String(s.clone()))
            .collect(),
    ));
    vec![
        SignalSpec::new(SignalId::HighlightedItem.name(), highlighted_item),
        SignalSpec::new(SignalId::HighlightedSeries.name(), highlighted_series),
        SignalSpec::new(SignalId::HighlightedGroup.name(), MissingNullOrValue::Null),
        SignalSpec::new(SignalId::SelectedItem.name(), MissingNullOrValue::Null),
        SignalSpec::new(SignalId::SelectedSeries.name(), MissingNullOrValue::Null),
        SignalSpec::new(SignalId::SelectedGroup.name(), MissingNullOrValue::Null),
        SignalSpec::new(SignalId::HiddenSeries.name(), hidden_series),
    ]
}

/// A forced highlighted series with no interactive legend still needs the
/// marks to fade: the legend's opacity rewrite is applied directly.
fn apply_static_series_highlight(spec: &mut ChartSpec, options: &ChartOptions) {
    if options.highlighted_series.is_none() {
        return;
    }
    let has_interactive_legend = options.children.iter().any(|child| {
        matches!(child, ChartChildOptions::Legend(l) if l.highlight.unwrap_or(false))
    });
    if has_interactive_legend {
        return;
    }
    legend::set_hover_opacity_for_marks(&mut spec.marks, HIGHLIGHTED_SERIES);
    let signal = get_or_create_signal(&mut spec.signals, &SignalId::HighlightedSeries);
    if let Some(series) = &options.highlighted_series {
        signal.value = MissingNullOrValue::Value(Value::String(series.clone()));
    }
}
