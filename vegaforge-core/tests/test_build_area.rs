use serde_json::json;
use vegaforge_core::build_chart_spec;
use vegaforge_core::options::area::AreaOptions;
use vegaforge_core::options::chart::{ChartChildOptions, ChartOptions};
use vegaforge_core::options::dialogs::{ChartPopoverOptions, ChartTooltipOptions};
use vegaforge_core::options::{ChartContext, FacetRef, HighlightBy, HighlightMode};
use vegaforge_core::spec::transform::TransformSpec;

fn area_chart(f: impl FnOnce(&mut AreaOptions)) -> ChartOptions {
    let mut area = AreaOptions::default();
    f(&mut area);
    ChartOptions {
        data: vec![
            json!({"datetime": 1, "value": 2, "series": "a"}),
            json!({"datetime": 2, "value": 3, "series": "a"}),
        ],
        children: vec![ChartChildOptions::Area(area)],
        ..Default::default()
    }
}

#[test]
fn test_group_highlight_formula_on_filtered_table() {
    let spec = build_chart_spec(&area_chart(|area| {
        area.highlight_by = Some(HighlightBy::Mode(HighlightMode::Dimension));
        area.chart_tooltips = vec![ChartTooltipOptions::default()];
    }))
    .unwrap();

    // the second data source is the filtered table
    let filtered = &spec.data[1];
    assert_eq!(filtered.name, "filteredTable");
    let group_id_formulas = filtered
        .transform
        .iter()
        .filter(|tx| {
            matches!(tx, TransformSpec::Formula(f) if f.as_ == "area0_highlightGroupId")
        })
        .count();
    assert_eq!(group_id_formulas, 1);

    let highlighted = spec
        .data
        .iter()
        .find(|d| d.name == "area0_highlightedData")
        .expect("highlighted data source");
    match &highlighted.transform[0] {
        TransformSpec::Filter(filter) => {
            assert_eq!(
                filter.expr,
                "area0_controlledHoveredGroup === datum.area0_highlightGroupId"
            );
        }
        other => panic!("expected a filter transform, got {other:?}"),
    }
}

#[test]
fn test_popover_gives_selection_priority_over_hover() {
    let spec = build_chart_spec(&area_chart(|area| {
        area.chart_tooltips = vec![ChartTooltipOptions::default()];
        area.chart_popovers = vec![ChartPopoverOptions::default()];
    }))
    .unwrap();
    let highlighted = spec
        .data
        .iter()
        .find(|d| d.name == "area0_highlightedData")
        .unwrap();
    match &highlighted.transform[0] {
        TransformSpec::Filter(filter) => {
            assert_eq!(
                filter.expr,
                "selectedItem && selectedItem === datum.vfMarkId || \
                 !selectedItem && area0_controlledHoveredId === datum.vfMarkId"
            );
        }
        other => panic!("expected a filter transform, got {other:?}"),
    }
}

#[test]
fn test_lone_metric_bound_degrades_to_metric_mode() {
    let raw = AreaOptions {
        metric_start: Some("low".to_string()),
        ..Default::default()
    };
    let normalized = raw.normalize(0, &ChartContext::default());
    assert_eq!(normalized.metric_start, None);
    assert_eq!(normalized.metric_end, None);
    assert!(normalized.is_stacked());
    assert_eq!(normalized.metric_fields(), ("value0".to_string(), "value1".to_string()));
}

#[test]
fn test_explicit_bounds_skip_stacking() {
    let raw = AreaOptions {
        metric_start: Some("low".to_string()),
        metric_end: Some("high".to_string()),
        ..Default::default()
    };
    let normalized = raw.normalize(0, &ChartContext::default());
    assert!(!normalized.is_stacked());
    assert_eq!(
        normalized.metric_fields(),
        ("low".to_string(), "high".to_string())
    );
}

#[test]
fn test_time_transform_added_exactly_once() {
    let mut options = area_chart(|_| {});
    options
        .children
        .push(ChartChildOptions::Area(AreaOptions::default()));
    let spec = build_chart_spec(&options).unwrap();

    let table = &spec.data[0];
    assert_eq!(table.name, "table");
    let timeunits = table
        .transform
        .iter()
        .filter(|tx| matches!(tx, TransformSpec::TimeUnit(_)))
        .count();
    assert_eq!(timeunits, 1);
    match table
        .transform
        .iter()
        .find(|tx| matches!(tx, TransformSpec::TimeUnit(_)))
        .unwrap()
    {
        TransformSpec::TimeUnit(t) => {
            assert_eq!(t.field, "datetime");
            assert_eq!(
                t.as_(),
                vec!["datetime0".to_string(), "datetime1".to_string()]
            );
        }
        _ => unreachable!(),
    }
}

#[test]
fn test_stacked_metric_naming() {
    let spec = build_chart_spec(&area_chart(|area| {
        area.color = Some(FacetRef::Field("series".to_string()));
    }))
    .unwrap();
    let filtered = &spec.data[1];
    match filtered
        .transform
        .iter()
        .find(|tx| matches!(tx, TransformSpec::Stack(_)))
        .expect("stack transform")
    {
        TransformSpec::Stack(stack) => {
            assert_eq!(stack.as_(), vec!["value0".to_string(), "value1".to_string()]);
            let groupby: Vec<String> = stack
                .groupby
                .as_ref()
                .unwrap()
                .iter()
                .map(|f| f.field())
                .collect();
            assert_eq!(groupby, vec!["datetime"]);
        }
        _ => unreachable!(),
    }
}

#[test]
fn test_area_group_mark_facets_by_color() {
    let spec = build_chart_spec(&area_chart(|area| {
        area.color = Some(FacetRef::Field("series".to_string()));
    }))
    .unwrap();
    let group = spec
        .marks
        .iter()
        .find(|m| m.name.as_deref() == Some("area0_group"))
        .expect("area group mark");
    let facet = group.from.as_ref().unwrap().facet.as_ref().unwrap();
    assert_eq!(facet.data, "filteredTable");
    assert_eq!(facet.groupby.as_ref().unwrap().to_vec(), vec!["series"]);
    assert_eq!(group.marks[0].type_, "area");
}
