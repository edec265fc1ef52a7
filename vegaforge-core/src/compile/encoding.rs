//! Production-rule construction for visual channels.
//!
//! A conditional channel is an ordered list of `{test, ...}` rules evaluated
//! first-match-wins by the rendering engine, terminated by an unconditional
//! fallback. [`RuleChain`] makes that shape impossible to get wrong: priority
//! rules are appended through [`RuleChain::rule`], and the list only
//! materializes through [`RuleChain::fallback`], which always lands last.

use crate::constants::{
    COLOR_SCALE, HIGHLIGHTED_ITEM, HIGHLIGHTED_SERIES, HIGHLIGHT_CONTRAST_RATIO, MARK_ID,
    OPACITY_SCALE, SELECTED_SERIES, SERIES_ID,
};
use crate::options::{
    has_popover, is_highlighted_by_group, is_interactive, FacetRef, MarkInteractionOptions,
};
use crate::spec::mark::{MarkEncodingField, MarkEncodingOrList, MarkEncodingSpec};
use serde_json::Value;
use vegaforge_common::escape::datum_accessor;

pub fn value_rule<V: Into<Value>>(value: V) -> MarkEncodingSpec {
    MarkEncodingSpec {
        value: Some(value.into()),
        ..Default::default()
    }
}

pub fn signal_rule<S: Into<String>>(signal: S) -> MarkEncodingSpec {
    MarkEncodingSpec {
        signal: Some(signal.into()),
        ..Default::default()
    }
}

pub fn field_rule<F: Into<String>>(field: F) -> MarkEncodingSpec {
    MarkEncodingSpec {
        field: Some(MarkEncodingField::Field(field.into())),
        ..Default::default()
    }
}

pub fn scale_field_rule<S: Into<String>, F: Into<String>>(scale: S, field: F) -> MarkEncodingSpec {
    MarkEncodingSpec {
        scale: Some(scale.into()),
        field: Some(MarkEncodingField::Field(field.into())),
        ..Default::default()
    }
}

/// Full band width on a band scale, e.g. a bar's `width` channel
pub fn band_rule<S: Into<String>>(scale: S) -> MarkEncodingSpec {
    MarkEncodingSpec {
        scale: Some(scale.into()),
        band: Some(serde_json::Number::from(1)),
        ..Default::default()
    }
}

/// Ordered-rule builder. Priority rules accumulate in insertion order; the
/// chain can only be finished by supplying the unconditional fallback.
#[derive(Debug, Default)]
pub struct RuleChain {
    rules: Vec<MarkEncodingSpec>,
}

impl RuleChain {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn rule<T: Into<String>>(mut self, test: T, mut rule: MarkEncodingSpec) -> Self {
        rule.test = Some(test.into());
        self.rules.push(rule);
        self
    }

    pub fn rule_if<T: Into<String>>(self, cond: bool, test: T, rule: MarkEncodingSpec) -> Self {
        if cond {
            self.rule(test, rule)
        } else {
            self
        }
    }

    /// Terminate the chain. A chain with no priority rules collapses to a
    /// single scalar rule.
    pub fn fallback(mut self, mut rule: MarkEncodingSpec) -> MarkEncodingOrList {
        rule.test = None;
        if self.rules.is_empty() {
            return MarkEncodingOrList::Scalar(Box::new(rule));
        }
        self.rules.push(rule);
        MarkEncodingOrList::List(self.rules)
    }
}

/// Add a priority rule to an already-built channel, keeping the fallback
/// last. No-op when an identical rule is already present.
pub fn insert_before_fallback(encoding: &mut MarkEncodingOrList, rule: MarkEncodingSpec) {
    if rule.test.is_none() {
        // a test-less rule would shadow the fallback
        return;
    }
    match encoding {
        MarkEncodingOrList::Scalar(fallback) => {
            let fallback = fallback.as_ref().clone();
            *encoding = MarkEncodingOrList::List(vec![rule, fallback]);
        }
        MarkEncodingOrList::List(rules) => {
            if rules.contains(&rule) {
                return;
            }
            match rules.pop() {
                Some(fallback) => {
                    rules.push(rule);
                    rules.push(fallback);
                }
                None => rules.push(rule),
            }
        }
    }
}

/// Channel rule for a facet-or-static binding. The first facet field drives
/// the scale; static values bypass scales entirely.
pub fn facet_rule(facet: &FacetRef, scale_name: &str) -> MarkEncodingSpec {
    match facet {
        FacetRef::Field(field) => scale_field_rule(scale_name, field.as_str()),
        FacetRef::Fields(fields) => match fields.first() {
            Some(field) => scale_field_rule(scale_name, field.as_str()),
            None => value_rule(Value::Null),
        },
        FacetRef::Value(static_value) => value_rule(static_value.value.clone()),
    }
}

pub fn color_production_rule(color: &FacetRef) -> MarkEncodingSpec {
    facet_rule(color, COLOR_SCALE)
}

pub fn opacity_production_rule(opacity: &FacetRef) -> MarkEncodingSpec {
    facet_rule(opacity, OPACITY_SCALE)
}

/// The faded variant of an opacity rule: the configured value divided by the
/// highlight contrast ratio.
pub fn highlight_fade_rule(rule: &MarkEncodingSpec) -> MarkEncodingSpec {
    if let Some(Value::Number(n)) = &rule.value {
        return value_rule(n.as_f64().unwrap_or(1.0) / HIGHLIGHT_CONTRAST_RATIO);
    }
    if let (Some(scale), Some(MarkEncodingField::Field(field))) = (&rule.scale, &rule.field) {
        return signal_rule(format!(
            "scale('{scale}', {}) / {HIGHLIGHT_CONTRAST_RATIO}",
            datum_accessor(field)
        ));
    }
    if let Some(signal) = &rule.signal {
        return signal_rule(format!("({signal}) / {HIGHLIGHT_CONTRAST_RATIO}"));
    }
    value_rule(1.0 / HIGHLIGHT_CONTRAST_RATIO)
}

/// The opacity state machine for a series mark.
///
/// Non-interactive marks with no forced highlight short-circuit to a single
/// unconditional rule. Otherwise the fade rules run in a fixed priority
/// order: hovered item (or group membership), controlled hover, highlighted
/// series, selected series (popovers only), sibling hover suppression, and
/// finally the configured opacity. The order is load-bearing; tests pin it.
pub fn mark_opacity_rules<O: MarkInteractionOptions + ?Sized>(options: &O) -> MarkEncodingOrList {
    let fallback = opacity_production_rule(options.opacity_facet());
    let has_forced_highlight = options.highlighted_item().is_some();
    let has_siblings = !options.sibling_hover_names().is_empty();
    if !is_interactive(options) && !has_forced_highlight && !has_siblings {
        return RuleChain::new().fallback(fallback);
    }

    let name = options.name();
    let interactive = is_interactive(options);
    let faded = highlight_fade_rule(&fallback);
    let mut chain = RuleChain::new();

    if interactive && is_highlighted_by_group(options) {
        let table = format!("{name}_highlightedData");
        chain = chain.rule(
            format!(
                "length(data('{table}')) > 0 && !indata('{table}', '{MARK_ID}', datum.{MARK_ID})"
            ),
            faded.clone(),
        );
    } else {
        chain = chain
            .rule(
                format!(
                    "isArray({HIGHLIGHTED_ITEM}) && length({HIGHLIGHTED_ITEM}) > 0 && \
                     indexof({HIGHLIGHTED_ITEM}, datum.{MARK_ID}) === -1"
                ),
                faded.clone(),
            )
            .rule(
                format!(
                    "!isArray({HIGHLIGHTED_ITEM}) && isValid({HIGHLIGHTED_ITEM}) && \
                     {HIGHLIGHTED_ITEM} !== datum.{MARK_ID}"
                ),
                faded.clone(),
            );
    }

    // the controlled hover signal only exists for interactive marks
    chain = chain.rule_if(
        interactive && !is_highlighted_by_group(options),
        format!(
            "isValid({name}_controlledHoveredId) && {name}_controlledHoveredId !== datum.{MARK_ID}"
        ),
        faded.clone(),
    );

    chain = chain.rule(
        format!(
            "isValid({HIGHLIGHTED_SERIES}) && {HIGHLIGHTED_SERIES} !== datum.{SERIES_ID}"
        ),
        faded.clone(),
    );

    chain = chain.rule_if(
        has_popover(options),
        format!("isValid({SELECTED_SERIES}) && {SELECTED_SERIES} !== datum.{SERIES_ID}"),
        faded.clone(),
    );

    for sibling in options.sibling_hover_names() {
        chain = chain.rule(format!("isValid({sibling}_hoveredId)"), faded.clone());
    }

    chain.fallback(fallback)
}

/// Inverted visibility machine for displayOnHover marks (trendlines, metric
/// ranges): invisible unless an explicit hover/selection test restores them.
pub fn display_on_hover_rules(opacity: f64, has_popover: bool) -> MarkEncodingOrList {
    RuleChain::new()
        .rule(
            format!("isValid({HIGHLIGHTED_SERIES}) && {HIGHLIGHTED_SERIES} === datum.{SERIES_ID}"),
            value_rule(opacity),
        )
        .rule_if(
            has_popover,
            format!("isValid({SELECTED_SERIES}) && {SELECTED_SERIES} === datum.{SERIES_ID}"),
            value_rule(opacity),
        )
        .fallback(value_rule(0.0))
}
