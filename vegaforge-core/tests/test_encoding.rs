use serde_json::json;
use vegaforge_core::compile::encoding::{
    display_on_hover_rules, highlight_fade_rule, insert_before_fallback, mark_opacity_rules,
    scale_field_rule, value_rule, RuleChain,
};
use vegaforge_core::options::bar::{BarOptions, BarSpecOptions};
use vegaforge_core::options::dialogs::{ChartPopoverOptions, ChartTooltipOptions};
use vegaforge_core::options::{ChartContext, HighlightBy, HighlightMode};
use vegaforge_core::spec::mark::{MarkEncodingOrList, MarkEncodingSpec};

fn bar(f: impl FnOnce(&mut BarOptions)) -> BarSpecOptions {
    let mut raw = BarOptions::default();
    f(&mut raw);
    raw.normalize(0, &ChartContext::default())
}

fn rules_of(encoding: &MarkEncodingOrList) -> Vec<MarkEncodingSpec> {
    encoding.to_vec()
}

#[test]
fn test_non_interactive_mark_short_circuits() {
    let options = bar(|_| {});
    let encoding = mark_opacity_rules(&options);
    assert!(matches!(encoding, MarkEncodingOrList::Scalar(_)));
    let rules = rules_of(&encoding);
    assert_eq!(rules.len(), 1);
    assert!(rules[0].test.is_none());
}

#[test]
fn test_interactive_chain_ends_with_fallback() {
    let options = bar(|raw| {
        raw.chart_tooltips = vec![ChartTooltipOptions::default()];
        raw.chart_popovers = vec![ChartPopoverOptions::default()];
    });
    let rules = rules_of(&mark_opacity_rules(&options));
    assert!(rules.len() >= 3);
    // every rule except the last is conditional; the last always matches
    for rule in &rules[..rules.len() - 1] {
        assert!(rule.test.is_some());
    }
    assert!(rules.last().unwrap().test.is_none());
}

#[test]
fn test_item_highlight_rule_order() {
    let options = bar(|raw| {
        raw.chart_tooltips = vec![ChartTooltipOptions::default()];
    });
    let rules = rules_of(&mark_opacity_rules(&options));
    let first = rules[0].test.as_deref().unwrap();
    let second = rules[1].test.as_deref().unwrap();
    assert!(first.starts_with("isArray(highlightedItem)"));
    assert!(second.starts_with("!isArray(highlightedItem)"));
    assert!(second.contains("highlightedItem !== datum.vfMarkId"));
}

#[test]
fn test_group_highlight_uses_membership_test() {
    let options = bar(|raw| {
        raw.chart_tooltips = vec![ChartTooltipOptions::default()];
        raw.highlight_by = Some(HighlightBy::Mode(HighlightMode::Dimension));
    });
    let rules = rules_of(&mark_opacity_rules(&options));
    let first = rules[0].test.as_deref().unwrap();
    assert!(first.contains("data('bar0_highlightedData')"));
    assert!(first.contains("!indata('bar0_highlightedData', 'vfMarkId', datum.vfMarkId)"));
}

#[test]
fn test_popover_adds_selected_series_rule() {
    let with_popover = bar(|raw| {
        raw.chart_tooltips = vec![ChartTooltipOptions::default()];
        raw.chart_popovers = vec![ChartPopoverOptions::default()];
    });
    let without_popover = bar(|raw| {
        raw.chart_tooltips = vec![ChartTooltipOptions::default()];
    });
    let selected = |options: &BarSpecOptions| {
        rules_of(&mark_opacity_rules(options))
            .iter()
            .filter(|r| {
                r.test
                    .as_deref()
                    .is_some_and(|t| t.contains("selectedSeries"))
            })
            .count()
    };
    assert_eq!(selected(&with_popover), 1);
    assert_eq!(selected(&without_popover), 0);
}

#[test]
fn test_display_on_hover_inverts_the_machine() {
    let rules = rules_of(&display_on_hover_rules(0.8, true));
    // default invisible; hover and selection restore visibility
    let fallback = rules.last().unwrap();
    assert!(fallback.test.is_none());
    assert_eq!(fallback.value, Some(json!(0.0)));
    assert!(rules[0]
        .test
        .as_deref()
        .unwrap()
        .contains("highlightedSeries === datum.vfSeriesId"));
    assert_eq!(rules[0].value, Some(json!(0.8)));
}

#[test]
fn test_highlight_fade_divides_by_contrast_ratio() {
    let faded = highlight_fade_rule(&value_rule(1.0));
    assert_eq!(faded.value, Some(json!(0.2)));

    let faded = highlight_fade_rule(&scale_field_rule("opacity", "weight"));
    assert_eq!(
        faded.signal.as_deref(),
        Some("scale('opacity', datum.weight) / 5")
    );
}

#[test]
fn test_insert_before_fallback_keeps_fallback_last() {
    let mut encoding = RuleChain::new().fallback(value_rule(1.0));
    let mut rule = value_rule(0.5);
    rule.test = Some("isValid(highlightedSeries)".to_string());
    insert_before_fallback(&mut encoding, rule.clone());
    // inserting the identical rule again is a no-op
    insert_before_fallback(&mut encoding, rule);

    let rules = rules_of(&encoding);
    assert_eq!(rules.len(), 2);
    assert!(rules[0].test.is_some());
    assert!(rules[1].test.is_none());
}

#[test]
fn test_rule_chain_collapses_without_priority_rules() {
    let encoding = RuleChain::new().fallback(value_rule(0.75));
    assert!(matches!(encoding, MarkEncodingOrList::Scalar(_)));
}
