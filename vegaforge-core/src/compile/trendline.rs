//! Trendline derivation: statistical overlays computed with data transforms
//! (regression, aggregate, window) rather than raw data, plus the marks that
//! draw them.

use crate::compile::encoding::{
    self, display_on_hover_rules, facet_rule, scale_field_rule, value_rule, RuleChain,
};
use crate::constants::{COLOR_SCALE, SERIES_ID, TRENDLINE_VALUE};
use crate::options::trendline::{TrendlineMethod, TrendlineSpecOptions};
use crate::options::FacetRef;
use crate::spec::chart::ChartSpec;
use crate::spec::data::DataSpec;
use crate::spec::mark::{MarkFacetSpec, MarkFromSpec, MarkSpec};
use crate::spec::transform::aggregate::{AggregateOpSpec, AggregateTransformSpec};
use crate::spec::transform::regression::{RegressionMethodSpec, RegressionTransformSpec};
use crate::spec::transform::window::{WindowTransformOpSpec, WindowTransformSpec};
use crate::spec::transform::TransformSpec;
use crate::spec::values::{CompareSpec, Field, SortOrderOrList, SortOrderSpec};
use serde_json::{json, Value};
use vegaforge_common::error::Result;

/// The slice of a parent mark's options a trendline needs
#[derive(Debug, Clone)]
pub struct TrendlineParent<'a> {
    pub name: &'a str,
    /// Transformed dimension field (e.g. `datetime0` for time scales)
    pub dimension: String,
    pub metric: &'a str,
    pub color: &'a FacetRef,
    /// Series facet columns of the parent
    pub facets: Vec<String>,
    pub dimension_scale_name: String,
    pub has_popover: bool,
}

pub fn add_trendlines(
    spec: &mut ChartSpec,
    parent: &TrendlineParent,
    trendlines: &[TrendlineSpecOptions],
) -> Result<()> {
    for trendline in trendlines {
        let data = trendline_data(parent, trendline)?;
        spec.data.push(data);
        spec.marks.push(trendline_mark(parent, trendline));
    }
    Ok(())
}

/// Group-by columns: the parent's facets plus the series id, so trendline
/// rows keep both their color identity and their series identity.
fn trendline_groupby(parent: &TrendlineParent) -> Vec<Field> {
    let mut groupby: Vec<Field> = parent.facets.iter().map(|f| Field::from(f.clone())).collect();
    if !parent.facets.is_empty() {
        groupby.push(Field::from(SERIES_ID));
    }
    groupby
}

fn trendline_data(parent: &TrendlineParent, trendline: &TrendlineSpecOptions) -> Result<DataSpec> {
    let mut data = DataSpec::derived(
        format!("{}_data", trendline.name),
        crate::constants::FILTERED_TABLE,
    );
    let groupby = trendline_groupby(parent);
    let transform = match &trendline.method {
        method if method.is_regression() => {
            TransformSpec::Regression(regression_transform(parent, method, groupby)?)
        }
        TrendlineMethod::Average | TrendlineMethod::Median => {
            let op = if trendline.method == TrendlineMethod::Average {
                AggregateOpSpec::Mean
            } else {
                AggregateOpSpec::Median
            };
            TransformSpec::Aggregate(AggregateTransformSpec {
                groupby,
                fields: Some(vec![Some(Field::from(parent.metric))]),
                ops: Some(vec![op]),
                as_: Some(vec![Some(TRENDLINE_VALUE.to_string())]),
                drop: None,
                extra: Default::default(),
            })
        }
        method => {
            let width = method.moving_average_window()?;
            TransformSpec::Window(WindowTransformSpec {
                sort: Some(CompareSpec {
                    field: parent.dimension.as_str().into(),
                    order: Some(SortOrderOrList::Order(SortOrderSpec::Ascending)),
                }),
                groupby: if groupby.is_empty() {
                    None
                } else {
                    Some(groupby)
                },
                ops: vec![WindowTransformOpSpec::Aggregate(AggregateOpSpec::Mean)],
                fields: vec![Some(Field::from(parent.metric))],
                as_: Some(vec![Some(TRENDLINE_VALUE.to_string())]),
                frame: Some([json!(1 - width as i64), json!(0)]),
                ignore_peers: None,
                extra: Default::default(),
            })
        }
    };
    data.transform.push(transform);
    Ok(data)
}

fn regression_transform(
    parent: &TrendlineParent,
    method: &TrendlineMethod,
    groupby: Vec<Field>,
) -> Result<RegressionTransformSpec> {
    let (spec_method, order) = match method {
        TrendlineMethod::Linear => (RegressionMethodSpec::Linear, None),
        TrendlineMethod::Logarithmic => (RegressionMethodSpec::Log, None),
        TrendlineMethod::Exponential => (RegressionMethodSpec::Exp, None),
        TrendlineMethod::Power => (RegressionMethodSpec::Pow, None),
        TrendlineMethod::Quadratic => (RegressionMethodSpec::Quad, None),
        method => (RegressionMethodSpec::Poly, Some(method.polynomial_order()?)),
    };
    Ok(RegressionTransformSpec {
        method: Some(spec_method),
        x: parent.dimension.as_str().into(),
        y: parent.metric.into(),
        groupby: if groupby.is_empty() {
            None
        } else {
            Some(groupby)
        },
        order,
        params: None,
        as_: Some(vec![parent.dimension.clone(), TRENDLINE_VALUE.to_string()]),
        extra: Default::default(),
    })
}

fn trendline_opacity(
    trendline: &TrendlineSpecOptions,
    parent: &TrendlineParent,
) -> crate::spec::mark::MarkEncodingOrList {
    if trendline.display_on_hover {
        display_on_hover_rules(trendline.opacity, parent.has_popover)
    } else {
        RuleChain::new().fallback(value_rule(trendline.opacity))
    }
}

fn trendline_stroke(trendline: &TrendlineSpecOptions, parent: &TrendlineParent) -> crate::spec::mark::MarkEncodingSpec {
    match &trendline.color {
        Some(color) => value_rule(Value::String(color.clone())),
        None => facet_rule(parent.color, COLOR_SCALE),
    }
}

fn trendline_mark(parent: &TrendlineParent, trendline: &TrendlineSpecOptions) -> MarkSpec {
    let data_name = format!("{}_data", trendline.name);
    if trendline.method.is_aggregate() {
        // aggregate methods produce one horizontal rule per series
        let mut mark = MarkSpec::new("rule", trendline.name.clone());
        mark.from = Some(MarkFromSpec::data(data_name));
        let encode = mark.encode.get_or_insert_with(Default::default);
        let enter = encode.enter_mut();
        enter.set("x", value_rule(0.0));
        enter.set("x2", encoding::signal_rule("width"));
        enter.set("y", scale_field_rule("yLinear", TRENDLINE_VALUE));
        enter.set("stroke", trendline_stroke(trendline, parent));
        enter.set("strokeDash", value_rule(json!(trendline.line_dash)));
        enter.set("strokeWidth", value_rule(trendline.line_width));
        let update = encode.update_mut();
        update.set("opacity", trendline_opacity(trendline, parent));
        return mark;
    }

    // regression and window methods draw one line per series facet
    let facet_name = format!("{}_facet", trendline.name);
    let mut line = MarkSpec::new("line", trendline.name.clone());
    line.from = Some(MarkFromSpec::data(facet_name.clone()));
    let encode = line.encode.get_or_insert_with(Default::default);
    let enter = encode.enter_mut();
    enter.set(
        "y",
        scale_field_rule("yLinear", TRENDLINE_VALUE),
    );
    enter.set("stroke", trendline_stroke(trendline, parent));
    enter.set("strokeDash", value_rule(json!(trendline.line_dash)));
    enter.set("strokeWidth", value_rule(trendline.line_width));
    let update = encode.update_mut();
    update.set(
        "x",
        scale_field_rule(parent.dimension_scale_name.clone(), parent.dimension.clone()),
    );
    update.set("opacity", trendline_opacity(trendline, parent));

    let mut group = MarkSpec::new("group", format!("{}_group", trendline.name));
    let mut groupby: Vec<String> = parent.facets.clone();
    if !parent.facets.is_empty() {
        groupby.push(SERIES_ID.to_string());
    }
    group.from = Some(MarkFromSpec {
        data: None,
        facet: Some(MarkFacetSpec {
            data: data_name,
            name: facet_name,
            groupby: if groupby.is_empty() {
                None
            } else {
                Some(groupby.into())
            },
            extra: Default::default(),
        }),
    });
    group.marks.push(line);
    group
}
