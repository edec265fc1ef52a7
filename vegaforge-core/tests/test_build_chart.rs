use serde_json::json;
use vegaforge_core::build_chart_spec;
use vegaforge_core::options::axis::AxisOptions;
use vegaforge_core::options::bar::BarOptions;
use vegaforge_core::options::chart::{
    ChartChildOptions, ChartOptions, ComboChildOptions, ComboOptions, TitleOptions,
};
use vegaforge_core::options::donut::DonutOptions;
use vegaforge_core::options::legend::LegendOptions;
use vegaforge_core::options::line::LineOptions;
use vegaforge_core::options::FacetRef;
use vegaforge_core::spec::chart::ChartSpec;
use vegaforge_core::spec::mark::MarkSpec;
use vegaforge_core::spec::transform::TransformSpec;
use vegaforge_core::spec::values::ValueOrSignal;

fn rows() -> Vec<serde_json::Value> {
    vec![
        json!({"category": "A", "value": 1, "series": "x", "datetime": 1}),
        json!({"category": "B", "value": 2, "series": "y", "datetime": 2}),
    ]
}

fn faceted_bar() -> BarOptions {
    BarOptions {
        color: Some(FacetRef::Field("series".to_string())),
        ..Default::default()
    }
}

#[test]
fn test_axis_sees_scales_regardless_of_child_order() {
    // axis listed before the bar still binds to the bar's band scale
    let options = ChartOptions {
        data: rows(),
        children: vec![
            ChartChildOptions::Axis(AxisOptions::default()),
            ChartChildOptions::Bar(BarOptions::default()),
        ],
        ..Default::default()
    };
    let spec = build_chart_spec(&options).unwrap();
    assert_eq!(spec.axes.len(), 1);
    assert_eq!(spec.axes[0].scale, "xBand");
}

#[test]
fn test_unrecognized_child_is_skipped() {
    let options = ChartOptions {
        data: rows(),
        children: vec![
            ChartChildOptions::Other(json!({"type": "gauge"})),
            ChartChildOptions::Bar(BarOptions::default()),
        ],
        ..Default::default()
    };
    let spec = build_chart_spec(&options).unwrap();
    assert_eq!(spec.marks.len(), 1);
}

#[test]
fn test_series_id_formula_and_hidden_series_filter() {
    let options = ChartOptions {
        data: rows(),
        children: vec![ChartChildOptions::Bar(faceted_bar())],
        ..Default::default()
    };
    let spec = build_chart_spec(&options).unwrap();

    let table = &spec.data[0];
    let series_formula = table
        .transform
        .iter()
        .find_map(|tx| match tx {
            TransformSpec::Formula(f) if f.as_ == "vfSeriesId" => Some(f),
            _ => None,
        })
        .expect("series id formula");
    assert_eq!(series_formula.expr, "datum.series");

    let filtered = &spec.data[1];
    match &filtered.transform[0] {
        TransformSpec::Filter(filter) => {
            assert_eq!(
                filter.expr,
                "indexof(hiddenSeries, datum.vfSeriesId) === -1"
            );
        }
        other => panic!("expected the hidden-series filter first, got {other:?}"),
    }
}

#[test]
fn test_unfaceted_chart_has_no_series_plumbing() {
    let options = ChartOptions {
        data: rows(),
        children: vec![ChartChildOptions::Bar(BarOptions::default())],
        ..Default::default()
    };
    let spec = build_chart_spec(&options).unwrap();
    // the filtered table stacks the metric but carries no hidden-series filter
    assert!(spec.data[1]
        .transform
        .iter()
        .all(|tx| matches!(tx, TransformSpec::Stack(_))));
    let table_formulas = spec.data[0]
        .transform
        .iter()
        .filter(|tx| matches!(tx, TransformSpec::Formula(_)))
        .count();
    assert_eq!(table_formulas, 0);
}

#[test]
fn test_mark_identifier_on_base_table() {
    let spec = build_chart_spec(&ChartOptions {
        data: rows(),
        children: vec![ChartChildOptions::Bar(BarOptions::default())],
        ..Default::default()
    })
    .unwrap();
    match &spec.data[0].transform[0] {
        TransformSpec::Identifier(identifier) => assert_eq!(identifier.as_, "vfMarkId"),
        other => panic!("expected the identifier transform first, got {other:?}"),
    }
}

#[test]
fn test_legend_highlight_rewrites_mark_opacity() {
    let options = ChartOptions {
        data: rows(),
        children: vec![
            ChartChildOptions::Legend(LegendOptions {
                highlight: Some(true),
                ..Default::default()
            }),
            ChartChildOptions::Line(LineOptions {
                color: Some(FacetRef::Field("series".to_string())),
                ..Default::default()
            }),
        ],
        ..Default::default()
    };
    let spec = build_chart_spec(&options).unwrap();

    // legend hover writes the shared series signal
    let highlighted_series = spec.get_signal("highlightedSeries").unwrap();
    assert_eq!(highlighted_series.on.len(), 2);

    // the line (inside its facet group) gained a fade rule ahead of its fallback
    let group = spec
        .marks
        .iter()
        .find(|m| m.name.as_deref() == Some("line0_group"))
        .unwrap();
    let line = &group.marks[0];
    let opacity = line
        .encode
        .as_ref()
        .unwrap()
        .update
        .as_ref()
        .unwrap()
        .channel("opacity")
        .unwrap()
        .to_vec();
    assert!(opacity.len() >= 2);
    assert!(opacity[0]
        .test
        .as_deref()
        .unwrap()
        .contains("highlightedSeries !== datum.vfSeriesId"));
    assert!(opacity.last().unwrap().test.is_none());
}

#[test]
fn test_toggleable_legend_wires_hidden_series() {
    let options = ChartOptions {
        data: rows(),
        children: vec![
            ChartChildOptions::Bar(faceted_bar()),
            ChartChildOptions::Legend(LegendOptions {
                is_toggleable: Some(true),
                ..Default::default()
            }),
        ],
        ..Default::default()
    };
    let spec = build_chart_spec(&options).unwrap();
    let hidden = spec.get_signal("hiddenSeries").unwrap();
    assert_eq!(hidden.on.len(), 1);
    assert!(hidden.on[0].update.contains("indexof(hiddenSeries, datum.value)"));
}

#[test]
fn test_static_series_highlight_without_legend() {
    let options = ChartOptions {
        data: rows(),
        highlighted_series: Some("x".to_string()),
        children: vec![ChartChildOptions::Bar(faceted_bar())],
        ..Default::default()
    };
    let spec = build_chart_spec(&options).unwrap();

    let signal = spec.get_signal("highlightedSeries").unwrap();
    assert_eq!(signal.value.as_option(), Some(json!("x")));

    let opacity = spec
        .get_mark("bar0")
        .unwrap()
        .encode
        .as_ref()
        .unwrap()
        .update
        .as_ref()
        .unwrap()
        .channel("opacity")
        .unwrap()
        .to_vec();
    assert!(opacity.len() >= 2);
    assert!(opacity.last().unwrap().test.is_none());
}

#[test]
fn test_default_facet_scales_never_leak_unused() {
    let options = ChartOptions {
        data: rows(),
        children: vec![ChartChildOptions::Line(LineOptions {
            color: Some(FacetRef::Field("series".to_string())),
            ..Default::default()
        })],
        ..Default::default()
    };
    let spec = build_chart_spec(&options).unwrap();
    assert!(spec.get_scale("color").is_some());
    // no mark facets by line width, so that scale never appears
    assert!(spec.get_scale("lineWidth").is_none());
    assert!(spec.get_scale("symbolSize").is_none());
}

#[test]
fn test_donut_layout_and_arc_mark() {
    let options = ChartOptions {
        data: vec![
            json!({"id": "a", "value": 5}),
            json!({"id": "b", "value": 10}),
        ],
        children: vec![ChartChildOptions::Donut(DonutOptions {
            color: Some(FacetRef::Field("id".to_string())),
            ..Default::default()
        })],
        ..Default::default()
    };
    let spec = build_chart_spec(&options).unwrap();

    let layout = spec
        .data
        .iter()
        .find(|d| d.name == "donut0_layout")
        .expect("donut layout data");
    assert!(matches!(&layout.transform[0], TransformSpec::Stack(_)));
    match &layout.transform[1] {
        TransformSpec::Window(window) => {
            assert_eq!(window.frame, Some([json!(null), json!(null)]));
        }
        other => panic!("expected the total window transform, got {other:?}"),
    }

    let arc = spec.get_mark("donut0").expect("arc mark");
    assert_eq!(arc.type_, "arc");
    let update = arc.encode.as_ref().unwrap().update.as_ref().unwrap();
    let start = update.channel("startAngle").unwrap().to_vec();
    assert!(start[0].signal.as_deref().unwrap().contains("datum['value0']"));
}

#[test]
fn test_combo_children_fade_siblings() {
    let options = ChartOptions {
        data: rows(),
        children: vec![ChartChildOptions::Combo(ComboOptions {
            name: None,
            children: vec![
                ComboChildOptions::Bar(BarOptions::default()),
                ComboChildOptions::Line(LineOptions::default()),
            ],
        })],
        ..Default::default()
    };
    let spec = build_chart_spec(&options).unwrap();

    let opacity = spec
        .get_mark("bar0")
        .unwrap()
        .encode
        .as_ref()
        .unwrap()
        .update
        .as_ref()
        .unwrap()
        .channel("opacity")
        .unwrap()
        .to_vec();
    let sibling_rules: Vec<_> = opacity
        .iter()
        .filter_map(|r| r.test.as_deref())
        .filter(|t| t.contains("line0_hoveredId"))
        .collect();
    assert_eq!(sibling_rules, vec!["isValid(line0_hoveredId)"]);
}

#[test]
fn test_title_child() {
    let options = ChartOptions {
        data: rows(),
        children: vec![
            ChartChildOptions::Bar(BarOptions::default()),
            ChartChildOptions::Title(TitleOptions {
                text: "Revenue".to_string(),
                position: Some("start".to_string()),
                ..Default::default()
            }),
        ],
        ..Default::default()
    };
    let spec = build_chart_spec(&options).unwrap();
    match &spec.title.as_ref().unwrap().text {
        ValueOrSignal::Value(text) => assert_eq!(text, &json!("Revenue")),
        other => panic!("expected a literal title, got {other:?}"),
    }
}

#[test]
fn test_spec_round_trips_through_json() {
    let options = ChartOptions {
        data: rows(),
        children: vec![
            ChartChildOptions::Bar(faceted_bar()),
            ChartChildOptions::Legend(LegendOptions::default()),
            ChartChildOptions::Axis(AxisOptions::default()),
        ],
        ..Default::default()
    };
    let spec = build_chart_spec(&options).unwrap();
    let serialized = serde_json::to_string(&spec).unwrap();
    let deserialized: ChartSpec = serde_json::from_str(&serialized).unwrap();
    assert_eq!(spec, deserialized);
}

#[test]
fn test_chart_dimensions_default() {
    let spec = build_chart_spec(&ChartOptions {
        data: rows(),
        children: vec![ChartChildOptions::Bar(BarOptions::default())],
        ..Default::default()
    })
    .unwrap();
    assert_eq!(spec.width, Some(600.0));
    assert_eq!(spec.height, Some(400.0));
}

#[test]
fn test_marks_walk_reaches_nested_groups() {
    let mut marks = vec![MarkSpec::new("group", "g"), MarkSpec::new("rect", "r")];
    marks[0].marks.push(MarkSpec::new("line", "nested"));
    let mut seen: Vec<String> = Vec::new();
    MarkSpec::walk_marks_mut(&mut marks, &mut |mark| {
        seen.push(mark.name.clone().unwrap());
    });
    assert_eq!(seen, vec!["nested", "r"]);
}
