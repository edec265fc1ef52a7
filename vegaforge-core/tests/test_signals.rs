use vegaforge_core::compile::signal::{
    add_highlighted_item_signal_events, add_highlighted_series_signal_events, SignalId,
};
use vegaforge_core::constants::{HIGHLIGHTED_ITEM, HIGHLIGHTED_SERIES};
use vegaforge_core::spec::signal::{SignalOnEventSpec, SignalSpec};
use vegaforge_core::spec::values::MissingNullOrValue;

fn highlight_signals() -> Vec<SignalSpec> {
    vec![
        SignalSpec::new(HIGHLIGHTED_ITEM, MissingNullOrValue::Null),
        SignalSpec::new(HIGHLIGHTED_SERIES, MissingNullOrValue::Null),
    ]
}

fn selector(event: &SignalOnEventSpec) -> &str {
    match event {
        SignalOnEventSpec::Selector(s) => s,
        other => panic!("expected a selector event, got {other:?}"),
    }
}

#[test]
fn test_highlighted_item_events() {
    let mut signals = highlight_signals();
    add_highlighted_item_signal_events(&mut signals, "line0", 1, None);

    let signal = &signals[0];
    assert_eq!(signal.on.len(), 2);
    assert_eq!(selector(&signal.on[0].events), "@line0:mouseover");
    assert_eq!(signal.on[0].update, "datum.vfMarkId");
    assert_eq!(selector(&signal.on[1].events), "@line0:mouseout");
    assert_eq!(signal.on[1].update, "null");
    // the series signal is untouched
    assert!(signals[1].on.is_empty());
}

#[test]
fn test_wiring_is_noop_when_signal_absent() {
    let mut signals = vec![SignalSpec::new("somethingElse", MissingNullOrValue::Null)];
    let before = signals.clone();
    add_highlighted_item_signal_events(&mut signals, "line0", 1, None);
    assert_eq!(signals, before);
}

#[test]
fn test_event_wiring_is_idempotent() {
    let mut signals = highlight_signals();
    add_highlighted_item_signal_events(&mut signals, "bar0", 1, None);
    add_highlighted_item_signal_events(&mut signals, "bar0", 1, None);
    assert_eq!(signals[0].on.len(), 2);
}

#[test]
fn test_exclude_keys_null_out_hover() {
    let mut signals = highlight_signals();
    let exclude = vec!["excludeFromHover".to_string(), "isSummary".to_string()];
    add_highlighted_item_signal_events(&mut signals, "bar0", 1, Some(&exclude));
    assert_eq!(
        signals[0].on[0].update,
        "(datum.excludeFromHover || datum.isSummary) ? null : datum.vfMarkId"
    );
}

#[test]
fn test_voronoi_datum_nesting() {
    let mut signals = highlight_signals();
    add_highlighted_item_signal_events(&mut signals, "line0_voronoi", 2, None);
    assert_eq!(signals[0].on[0].update, "datum.datum.vfMarkId");
}

#[test]
fn test_highlighted_series_events() {
    let mut signals = highlight_signals();
    add_highlighted_series_signal_events(&mut signals, "line0", 1);
    let signal = &signals[1];
    assert_eq!(signal.on.len(), 2);
    assert_eq!(signal.on[0].update, "datum.vfSeriesId");
}

#[test]
fn test_signal_id_names() {
    assert_eq!(SignalId::HighlightedItem.name(), "highlightedItem");
    assert_eq!(
        SignalId::ControlledHoveredGroup("area0".to_string()).name(),
        "area0_controlledHoveredGroup"
    );
    assert_eq!(
        SignalId::Prev(Box::new(SignalId::HighlightedSeries)).name(),
        "highlightedSeries_prev"
    );
}
