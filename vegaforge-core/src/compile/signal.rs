//! Signal registry and event wiring.
//!
//! Signals are addressed through [`SignalId`] rather than raw strings so the
//! cross-component contract (legend writes, marks read) is carried by the
//! type system. All mutation goes through find-or-create lookups; wiring
//! functions targeting an absent signal are deliberate no-ops so features
//! compose without requiring every signal to exist.

use crate::constants::{
    COLOR_ANIMATION, COLOR_ANIMATION_DIRECTION, HIDDEN_SERIES, HIGHLIGHTED_GROUP,
    HIGHLIGHTED_ITEM, HIGHLIGHTED_SERIES, MARK_ID, SELECTED_GROUP, SELECTED_ITEM, SELECTED_SERIES,
    SERIES_ID,
};
use crate::options::{is_highlighted_by_group, is_interactive, MarkInteractionOptions};
use crate::spec::signal::{SignalOnSpec, SignalSpec};
use crate::spec::values::MissingNullOrValue;
use itertools::Itertools;
use serde_json::json;

/// Logical signal identity. `name()` is the single place the string
/// convention lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignalId {
    HighlightedItem,
    HighlightedSeries,
    HighlightedGroup,
    SelectedItem,
    SelectedSeries,
    SelectedGroup,
    HiddenSeries,
    ColorAnimation,
    ColorAnimationDirection,
    /// Uncontrolled hover state owned by one mark
    HoveredId(String),
    /// Host-driven hover state for one mark
    ControlledHoveredId(String),
    /// Host-driven group-hover state for one mark
    ControlledHoveredGroup(String),
    /// Per-legend highlight scope, used when the legend has custom keys
    LegendHighlightedSeries(String),
    /// Previous value of another signal, for animation transitions
    Prev(Box<SignalId>),
}

impl SignalId {
    pub fn name(&self) -> String {
        match self {
            SignalId::HighlightedItem => HIGHLIGHTED_ITEM.to_string(),
            SignalId::HighlightedSeries => HIGHLIGHTED_SERIES.to_string(),
            SignalId::HighlightedGroup => HIGHLIGHTED_GROUP.to_string(),
            SignalId::SelectedItem => SELECTED_ITEM.to_string(),
            SignalId::SelectedSeries => SELECTED_SERIES.to_string(),
            SignalId::SelectedGroup => SELECTED_GROUP.to_string(),
            SignalId::HiddenSeries => HIDDEN_SERIES.to_string(),
            SignalId::ColorAnimation => COLOR_ANIMATION.to_string(),
            SignalId::ColorAnimationDirection => COLOR_ANIMATION_DIRECTION.to_string(),
            SignalId::HoveredId(mark) => format!("{mark}_hoveredId"),
            SignalId::ControlledHoveredId(mark) => format!("{mark}_controlledHoveredId"),
            SignalId::ControlledHoveredGroup(mark) => format!("{mark}_controlledHoveredGroup"),
            SignalId::LegendHighlightedSeries(legend) => format!("{legend}_highlightedSeries"),
            SignalId::Prev(inner) => format!("{}_prev", inner.name()),
        }
    }
}

pub fn find_signal_mut<'a>(
    signals: &'a mut [SignalSpec],
    name: &str,
) -> Option<&'a mut SignalSpec> {
    signals.iter_mut().find(|s| s.name == name)
}

pub fn get_or_create_signal<'a>(
    signals: &'a mut Vec<SignalSpec>,
    id: &SignalId,
) -> &'a mut SignalSpec {
    let name = id.name();
    match signals.iter().position(|s| s.name == name) {
        Some(index) => &mut signals[index],
        None => {
            signals.push(SignalSpec::new(name, MissingNullOrValue::Null));
            signals.last_mut().unwrap()
        }
    }
}

/// Mouseover update expression: the datum's id key, nested one `datum` hop
/// deeper per indirection (voronoi paths source another mark, so their datum
/// wraps the original). Exclude keys null the hover out for matching rows.
fn hover_update_expr(id_key: &str, datum_order: usize, exclude_data_keys: Option<&[String]>) -> String {
    let datum = vec!["datum"; datum_order.max(1)].join(".");
    let base = format!("{datum}.{id_key}");
    match exclude_data_keys {
        Some(keys) if !keys.is_empty() => {
            let guard = keys.iter().map(|key| format!("{datum}.{key}")).join(" || ");
            format!("({guard}) ? null : {base}")
        }
        _ => base,
    }
}

fn add_mark_hover_events(
    signals: &mut [SignalSpec],
    signal_name: &str,
    mark_name: &str,
    id_key: &str,
    datum_order: usize,
    exclude_data_keys: Option<&[String]>,
) {
    // absent signal: leave the list untouched
    let Some(signal) = find_signal_mut(signals, signal_name) else {
        return;
    };
    signal.push_on_unique(SignalOnSpec::selector(
        format!("@{mark_name}:mouseover"),
        hover_update_expr(id_key, datum_order, exclude_data_keys),
    ));
    signal.push_on_unique(SignalOnSpec::selector(
        format!("@{mark_name}:mouseout"),
        "null",
    ));
}

/// Wire `@{mark}:mouseover`/`mouseout` clauses onto the highlighted-item
/// signal. No-op when the signal does not exist.
pub fn add_highlighted_item_signal_events(
    signals: &mut [SignalSpec],
    mark_name: &str,
    datum_order: usize,
    exclude_data_keys: Option<&[String]>,
) {
    add_mark_hover_events(
        signals,
        HIGHLIGHTED_ITEM,
        mark_name,
        MARK_ID,
        datum_order,
        exclude_data_keys,
    );
}

/// Same wiring against the highlighted-series signal
pub fn add_highlighted_series_signal_events(
    signals: &mut [SignalSpec],
    mark_name: &str,
    datum_order: usize,
) {
    add_mark_hover_events(signals, HIGHLIGHTED_SERIES, mark_name, SERIES_ID, datum_order, None);
}

/// Make sure a mark's hover signal exists without wiring any events. Combo
/// charts use this so sibling-fade rules never reference a missing signal.
pub fn ensure_hover_signal_stub(signals: &mut Vec<SignalSpec>, mark_name: &str) {
    get_or_create_signal(signals, &SignalId::HoveredId(mark_name.to_string()));
}

/// Per-mark hover signal with its own mouseover/mouseout wiring
fn ensure_hovered_id_signal(
    signals: &mut Vec<SignalSpec>,
    mark_name: &str,
    event_mark_name: &str,
    datum_order: usize,
) {
    let signal = get_or_create_signal(signals, &SignalId::HoveredId(mark_name.to_string()));
    signal.push_on_unique(SignalOnSpec::selector(
        format!("@{event_mark_name}:mouseover"),
        hover_update_expr(MARK_ID, datum_order, None),
    ));
    signal.push_on_unique(SignalOnSpec::selector(
        format!("@{event_mark_name}:mouseout"),
        "null",
    ));
}

/// Host-driven hover mirror of the global highlighted item
fn ensure_controlled_hover_signal(
    signals: &mut Vec<SignalSpec>,
    mark_name: &str,
    event_mark_name: &str,
) {
    let signal =
        get_or_create_signal(signals, &SignalId::ControlledHoveredId(mark_name.to_string()));
    signal.push_on_unique(SignalOnSpec::signal(
        HIGHLIGHTED_ITEM,
        format!("isValid({HIGHLIGHTED_ITEM}) ? {HIGHLIGHTED_ITEM} : null"),
    ));
    signal.push_on_unique(SignalOnSpec::selector(
        format!("@{event_mark_name}:mouseout"),
        "null",
    ));
}

/// Host-driven group-hover mirror of the global highlighted group
fn ensure_controlled_hover_group_signal(
    signals: &mut Vec<SignalSpec>,
    mark_name: &str,
    event_mark_name: &str,
) {
    let signal = get_or_create_signal(
        signals,
        &SignalId::ControlledHoveredGroup(mark_name.to_string()),
    );
    signal.push_on_unique(SignalOnSpec::signal(HIGHLIGHTED_GROUP, HIGHLIGHTED_GROUP));
    signal.push_on_unique(SignalOnSpec::selector(
        format!("@{event_mark_name}:mouseout"),
        "null",
    ));
}

/// All hover/select wiring for one series mark. `event_mark_name` is the
/// mark whose pointer events drive the signals (the voronoi hit-area mark
/// for lines and scatters); `datum_order` is 2 when that mark derives its
/// data from another mark.
pub fn add_interaction_signals<O: MarkInteractionOptions + ?Sized>(
    signals: &mut Vec<SignalSpec>,
    options: &O,
    event_mark_name: &str,
    datum_order: usize,
    animations: bool,
) {
    if !is_interactive(options) && options.highlighted_item().is_none() {
        return;
    }
    let name = options.name();
    let exclude_data_keys = tooltip_exclude_keys(options);
    let exclude = if exclude_data_keys.is_empty() {
        None
    } else {
        Some(exclude_data_keys.as_slice())
    };

    ensure_hovered_id_signal(signals, name, event_mark_name, datum_order);
    if is_highlighted_by_group(options) {
        ensure_controlled_hover_group_signal(signals, name, event_mark_name);
    } else {
        ensure_controlled_hover_signal(signals, name, event_mark_name);
    }

    add_highlighted_item_signal_events(signals, event_mark_name, datum_order, exclude);
    add_highlighted_series_signal_events(signals, event_mark_name, datum_order);

    if animations {
        add_animation_signals(signals);
    }
}

fn tooltip_exclude_keys<O: MarkInteractionOptions + ?Sized>(options: &O) -> Vec<String> {
    options
        .chart_tooltips()
        .iter()
        .filter_map(|t| t.exclude_data_keys.as_ref())
        .flatten()
        .unique()
        .cloned()
        .collect()
}

/// Additive animation signal set: a direction flag, an eased progress value,
/// and previous-state mirrors of the hover signals so fades can start from
/// the outgoing state.
pub fn add_animation_signals(signals: &mut Vec<SignalSpec>) {
    let direction = get_or_create_signal(signals, &SignalId::ColorAnimationDirection);
    direction.push_on_unique(SignalOnSpec::signal(
        HIGHLIGHTED_ITEM,
        format!("isValid({HIGHLIGHTED_ITEM}) ? 1 : -1"),
    ));
    direction.push_on_unique(SignalOnSpec::signal(
        HIGHLIGHTED_SERIES,
        format!("isValid({HIGHLIGHTED_SERIES}) ? 1 : -1"),
    ));

    let animation = get_or_create_signal(signals, &SignalId::ColorAnimation);
    if animation.value == MissingNullOrValue::Null {
        animation.value = MissingNullOrValue::Value(json!(1));
    }
    animation.push_on_unique(SignalOnSpec {
        events: crate::spec::signal::SignalOnEventSpec::Object(json!({
            "type": "timer",
            "throttle": 16.67,
        })),
        update: format!(
            "clamp({COLOR_ANIMATION} + {COLOR_ANIMATION_DIRECTION} * 0.1, 0, 1)"
        ),
        extra: Default::default(),
    });

    for base in [SignalId::HighlightedItem, SignalId::HighlightedSeries] {
        let base_name = base.name();
        let prev = get_or_create_signal(signals, &SignalId::Prev(Box::new(base)));
        let prev_name = prev.name.clone();
        prev.push_on_unique(SignalOnSpec::signal(
            base_name.clone(),
            format!("isValid({base_name}) ? {base_name} : {prev_name}"),
        ));
    }
}
