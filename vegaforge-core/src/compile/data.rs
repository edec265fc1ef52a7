//! Named data sources and their ordered transform chains.
//!
//! Two base sources exist for every chart: `table` holds the raw rows plus
//! row identity, `filteredTable` derives from it with hidden series removed.
//! Everything else (stacks, highlight tables, trendline data) chains off
//! these by name, and producers always land before their consumers in the
//! data array.

use crate::constants::{FILTERED_TABLE, HIDDEN_SERIES, MARK_ID, SELECTED_ITEM, SERIES_ID, TABLE};
use crate::options::{
    has_popover, is_highlighted_by_group, DimensionScaleType, MarkInteractionOptions,
};
use crate::spec::data::DataSpec;
use crate::spec::transform::filter::FilterTransformSpec;
use crate::spec::transform::formula::FormulaTransformSpec;
use crate::spec::transform::identifier::IdentifierTransformSpec;
use crate::spec::transform::stack::{StackOffsetSpec, StackTransformSpec};
use crate::spec::transform::timeunit::{TimeUnitTransformSpec, TimeUnitUnitSpec};
use crate::spec::transform::TransformSpec;
use crate::spec::values::{CompareSpec, SortOrderOrList, SortOrderSpec};
use itertools::Itertools;
use serde_json::Value;
use vegaforge_common::escape::datum_accessor;

/// The two base sources every build starts from
pub fn base_data(values: Vec<Value>) -> Vec<DataSpec> {
    let mut table = DataSpec::new(TABLE);
    table.values = Some(Value::Array(values));
    table
        .transform
        .push(TransformSpec::Identifier(IdentifierTransformSpec::new(
            MARK_ID,
        )));

    let filtered = DataSpec::derived(FILTERED_TABLE, TABLE);
    vec![table, filtered]
}

pub fn get_table_data_mut(data: &mut [DataSpec]) -> Option<&mut DataSpec> {
    data.iter_mut().find(|d| d.name == TABLE)
}

pub fn get_filtered_table_data_mut(data: &mut [DataSpec]) -> Option<&mut DataSpec> {
    data.iter_mut().find(|d| d.name == FILTERED_TABLE)
}

/// Canonical field a mark's dimension encodes read: the first timeunit
/// output for time scales, the raw column otherwise
pub fn dimension_field(dimension: &str, scale_type: DimensionScaleType) -> String {
    match scale_type {
        DimensionScaleType::Time => format!("{dimension}0"),
        _ => dimension.to_string(),
    }
}

/// Ensure exactly one timeunit transform on the base table for a time
/// dimension. Re-adding for a second time-scaled mark is a no-op.
pub fn add_time_transform(table: &mut DataSpec, dimension: &str) {
    let exists = table.transform.iter().any(|tx| {
        matches!(tx, TransformSpec::TimeUnit(t) if t.field == dimension)
    });
    if exists {
        return;
    }
    table
        .transform
        .push(TransformSpec::TimeUnit(TimeUnitTransformSpec {
            field: dimension.to_string(),
            units: Some(vec![
                TimeUnitUnitSpec::Year,
                TimeUnitUnitSpec::Month,
                TimeUnitUnitSpec::Date,
                TimeUnitUnitSpec::Hours,
                TimeUnitUnitSpec::Minutes,
            ]),
            timezone: None,
            interval: Some(false),
            as_: Some(vec![format!("{dimension}0"), format!("{dimension}1")]),
            extra: Default::default(),
        }));
}

/// Stack the implicit metric per dimension group with deterministic output
/// names `{metric}0`/`{metric}1`. Idempotent per metric.
pub fn add_stacked_data(
    filtered: &mut DataSpec,
    metric: &str,
    dimension: &str,
    order: Option<&str>,
) {
    let as_ = vec![format!("{metric}0"), format!("{metric}1")];
    let exists = filtered.transform.iter().any(|tx| {
        matches!(tx, TransformSpec::Stack(s) if s.as_() == as_)
    });
    if exists {
        return;
    }
    filtered
        .transform
        .push(TransformSpec::Stack(StackTransformSpec {
            field: metric.into(),
            groupby: Some(vec![dimension.into()]),
            sort: order.map(|order_field| CompareSpec {
                field: order_field.into(),
                order: Some(SortOrderOrList::Order(SortOrderSpec::Ascending)),
            }),
            as_: Some(as_),
            offset: Some(StackOffsetSpec::Zero),
            extra: Default::default(),
        }));
}

/// Joined group identity for group-based highlighting
pub fn group_id_formula(fields: &[String], name: &str) -> FormulaTransformSpec {
    let expr = fields.iter().map(|f| datum_accessor(f)).join(" + \" | \" + ");
    FormulaTransformSpec::new(expr, format!("{name}_highlightGroupId"))
}

/// Filter expression for a mark's highlighted-data source. Branches on group
/// vs item highlighting, and gives popover selection priority over hover.
pub fn highlight_filter_expr<O: MarkInteractionOptions + ?Sized>(options: &O) -> String {
    let name = options.name();
    let base = if is_highlighted_by_group(options) {
        format!("{name}_controlledHoveredGroup === datum.{name}_highlightGroupId")
    } else {
        format!("{name}_controlledHoveredId === datum.{MARK_ID}")
    };
    if has_popover(options) {
        format!(
            "{SELECTED_ITEM} && {SELECTED_ITEM} === datum.{MARK_ID} || !{SELECTED_ITEM} && {base}"
        )
    } else {
        base
    }
}

/// Derive `{name}_highlightedData` for an interactive mark, adding the group
/// id formula to the filtered table when highlighting is group-based.
pub fn add_highlighted_data<O: MarkInteractionOptions + ?Sized>(
    data: &mut Vec<DataSpec>,
    options: &O,
) {
    let name = options.name();
    if is_highlighted_by_group(options) {
        let group_fields = options
            .highlight_by()
            .group_fields(options.dimension_field());
        let as_ = format!("{name}_highlightGroupId");
        if let Some(filtered) = get_filtered_table_data_mut(data) {
            let exists = filtered.transform.iter().any(|tx| {
                matches!(tx, TransformSpec::Formula(f) if f.as_ == as_)
            });
            if !exists {
                filtered
                    .transform
                    .push(TransformSpec::Formula(group_id_formula(&group_fields, name)));
            }
        }
    }

    let highlighted_name = format!("{name}_highlightedData");
    if data.iter().any(|d| d.name == highlighted_name) {
        return;
    }
    let mut highlighted = DataSpec::derived(highlighted_name, FILTERED_TABLE);
    highlighted
        .transform
        .push(TransformSpec::Filter(FilterTransformSpec::new(
            highlight_filter_expr(options),
        )));
    data.push(highlighted);
}

/// Series identity formula on the base table, from the accumulated facets
pub fn append_series_id_formula(table: &mut DataSpec, facets: &[String]) {
    if facets.is_empty() {
        return;
    }
    let exists = table.transform.iter().any(|tx| {
        matches!(tx, TransformSpec::Formula(f) if f.as_ == SERIES_ID)
    });
    if exists {
        return;
    }
    let expr = facets.iter().map(|f| datum_accessor(f)).join(" + \" | \" + ");
    table
        .transform
        .push(TransformSpec::Formula(FormulaTransformSpec::new(
            expr, SERIES_ID,
        )));
}

/// Hidden-series filter on the filtered table, consulting the hiddenSeries
/// signal the legend toggles
pub fn append_hidden_series_filter(filtered: &mut DataSpec) {
    let expr = format!("indexof({HIDDEN_SERIES}, datum.{SERIES_ID}) === -1");
    let exists = filtered.transform.iter().any(|tx| {
        matches!(tx, TransformSpec::Filter(f) if f.expr == expr)
    });
    if exists {
        return;
    }
    // the filter must precede stacks so hidden series free their stack space
    filtered
        .transform
        .insert(0, TransformSpec::Filter(FilterTransformSpec::new(expr)));
}
