use crate::compile::encoding::{insert_before_fallback, highlight_fade_rule, value_rule, RuleChain};
use crate::compile::signal::{self, SignalId};
use crate::constants::{
    COLOR_SCALE, HIDDEN_SERIES, HIGHLIGHTED_SERIES, LEGEND_FADE_OPACITY, SERIES_ID,
};
use crate::options::legend::LegendSpecOptions;
use crate::spec::chart::ChartSpec;
use crate::spec::legend::{LegendEncodeSpec, LegendEntriesEncodeSpec, LegendSpec};
use crate::spec::mark::{MarkEncodingOrList, MarkSpec};
use crate::spec::signal::SignalOnSpec;
use vegaforge_common::error::Result;

pub fn add_legend(spec: &mut ChartSpec, options: &LegendSpecOptions) -> Result<()> {
    // highlight writes go to the shared series signal, unless custom keys
    // scope the legend to its own signal
    let highlight_signal = match &options.keys {
        Some(_) => {
            let id = SignalId::LegendHighlightedSeries(options.name.clone());
            signal::get_or_create_signal(&mut spec.signals, &id);
            id.name()
        }
        None => HIGHLIGHTED_SERIES.to_string(),
    };

    if options.highlight {
        add_legend_highlight_events(spec, options, &highlight_signal);
        // already-built series marks learn to fade against the signal
        set_hover_opacity_for_marks(&mut spec.marks, &highlight_signal);
    }
    if options.is_toggleable {
        add_legend_toggle_events(spec, options);
    }

    spec.legends.push(legend_spec(options, &highlight_signal));
    Ok(())
}

fn legend_spec(options: &LegendSpecOptions, highlight_signal: &str) -> LegendSpec {
    let mut legend = LegendSpec {
        fill: Some(COLOR_SCALE.to_string()),
        orient: Some(options.position),
        title: options.title.clone(),
        columns: options.columns.map(|c| c.into()),
        ..Default::default()
    };
    if options.is_interactive() {
        let entry_opacity = RuleChain::new()
            .rule(
                format!("isValid({highlight_signal}) && {highlight_signal} !== datum.value"),
                value_rule(LEGEND_FADE_OPACITY),
            )
            .fallback(value_rule(1.0));
        let mut update: crate::spec::mark::MarkEncodingsSpec = Default::default();
        update.set("opacity", entry_opacity);
        legend.encode = Some(LegendEncodeSpec {
            entries: Some(LegendEntriesEncodeSpec {
                name: Some(options.entry_mark_name()),
                interactive: Some(true),
                enter: None,
                update: Some(update),
                extra: Default::default(),
            }),
            labels: None,
            extra: Default::default(),
        });
    }
    legend
}

/// Hovering a legend entry publishes that entry's series identity
fn add_legend_highlight_events(
    spec: &mut ChartSpec,
    options: &LegendSpecOptions,
    highlight_signal: &str,
) {
    let entry = options.entry_mark_name();
    let Some(signal) = signal::find_signal_mut(&mut spec.signals, highlight_signal) else {
        return;
    };
    signal.push_on_unique(SignalOnSpec::selector(
        format!("@{entry}:mouseover"),
        "datum.value",
    ));
    signal.push_on_unique(SignalOnSpec::selector(format!("@{entry}:mouseout"), "null"));
}

/// Clicking a legend entry toggles the series in the hidden set
fn add_legend_toggle_events(spec: &mut ChartSpec, options: &LegendSpecOptions) {
    let entry = options.entry_mark_name();
    let signal = signal::get_or_create_signal(&mut spec.signals, &SignalId::HiddenSeries);
    signal.push_on_unique(SignalOnSpec::selector(
        format!("@{entry}:click"),
        format!(
            "indexof({HIDDEN_SERIES}, datum.value) === -1 ? \
             append({HIDDEN_SERIES}, datum.value) : without({HIDDEN_SERIES}, datum.value)"
        ),
    ));
}

/// Rewrite every non-group mark's opacity channel so an active series
/// highlight fades non-members. Applied by interactive legends, and by the
/// orchestrator when a static highlighted series is configured without one.
/// The fade rule slots in ahead of the existing fallback.
pub fn set_hover_opacity_for_marks(marks: &mut [MarkSpec], signal_name: &str) {
    let signal_name = signal_name.to_string();
    MarkSpec::walk_marks_mut(marks, &mut |mark| {
        let Some(encode) = mark.encode.as_mut() else {
            return;
        };
        for encodings in [encode.update.as_mut(), encode.enter.as_mut()]
            .into_iter()
            .flatten()
        {
            for channel in ["opacity", "fillOpacity"] {
                if let Some(rules) = encodings.channel_mut(channel) {
                    let fade = fade_rule_for(rules, &signal_name);
                    insert_before_fallback(rules, fade);
                }
            }
        }
    });
}

fn fade_rule_for(rules: &MarkEncodingOrList, signal_name: &str) -> crate::spec::mark::MarkEncodingSpec {
    let fallback = rules
        .to_vec()
        .into_iter()
        .last()
        .unwrap_or_else(|| value_rule(1.0));
    let mut fade = highlight_fade_rule(&fallback);
    fade.test = Some(format!(
        "isValid({signal_name}) && {signal_name} !== datum.{SERIES_ID}"
    ));
    fade
}
