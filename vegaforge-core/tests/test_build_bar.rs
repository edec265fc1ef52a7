use serde_json::json;
use vegaforge_core::build_chart_spec;
use vegaforge_core::options::bar::BarOptions;
use vegaforge_core::options::chart::{ChartChildOptions, ChartOptions};
use vegaforge_core::options::dialogs::{ChartPopoverOptions, ChartTooltipOptions};
use vegaforge_core::options::{get_tooltips, ChartContext, FacetRef, Orientation};
use vegaforge_core::spec::mark::MarkEncodingField;
use vegaforge_core::spec::scale::ScaleTypeSpec;
use vegaforge_core::spec::transform::TransformSpec;

fn bar_chart(f: impl FnOnce(&mut BarOptions)) -> ChartOptions {
    let mut bar = BarOptions::default();
    f(&mut bar);
    ChartOptions {
        data: vec![
            json!({"category": "A", "value": 1}),
            json!({"category": "B", "value": 2}),
        ],
        children: vec![ChartChildOptions::Bar(bar)],
        ..Default::default()
    }
}

#[test]
fn test_default_bar_scales() {
    let spec = build_chart_spec(&bar_chart(|_| {})).unwrap();
    assert_eq!(spec.scales.len(), 2);

    let band = spec.get_scale("xBand").expect("band scale");
    assert_eq!(band.scale_type(), ScaleTypeSpec::Band);
    // ratio rule: paddingInner 0.4, paddingOuter 0.5 - 0.6 / 2
    assert_eq!(band.padding_inner, Some(0.4));
    assert_eq!(band.padding_outer, Some(0.5 - 0.3));

    let linear = spec.get_scale("yLinear").expect("metric scale");
    assert_eq!(linear.scale_type(), ScaleTypeSpec::Linear);
}

#[test]
fn test_bar_mark_shape() {
    let spec = build_chart_spec(&bar_chart(|_| {})).unwrap();
    let mark = spec.get_mark("bar0").expect("bar mark");
    assert_eq!(mark.type_, "rect");
    assert_eq!(mark.from.as_ref().unwrap().data.as_deref(), Some("filteredTable"));

    let update = mark.encode.as_ref().unwrap().update.as_ref().unwrap();
    let y = update.channel("y").unwrap().to_vec();
    assert_eq!(
        y[0].field,
        Some(MarkEncodingField::Field("value0".to_string()))
    );
    assert_eq!(y[0].scale.as_deref(), Some("yLinear"));
    let y2 = update.channel("y2").unwrap().to_vec();
    assert_eq!(
        y2[0].field,
        Some(MarkEncodingField::Field("value1".to_string()))
    );
}

#[test]
fn test_horizontal_bar_swaps_axes() {
    let spec = build_chart_spec(&bar_chart(|bar| {
        bar.orientation = Some(Orientation::Horizontal);
    }))
    .unwrap();
    assert!(spec.get_scale("yBand").is_some());
    assert!(spec.get_scale("xLinear").is_some());

    let mark = spec.get_mark("bar0").unwrap();
    let update = mark.encode.as_ref().unwrap().update.as_ref().unwrap();
    assert!(update.channel("height").is_some());
    assert!(update.channel("x2").is_some());
}

#[test]
fn test_stack_transform_on_filtered_table() {
    let spec = build_chart_spec(&bar_chart(|bar| {
        bar.order = Some("order".to_string());
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
            assert_eq!(stack.field.field(), "value");
            assert!(stack.sort.is_some());
        }
        _ => unreachable!(),
    }
}

#[test]
fn test_tooltips_exclude_popovers() {
    let options = BarOptions {
        chart_tooltips: vec![ChartTooltipOptions::default()],
        chart_popovers: vec![ChartPopoverOptions::default()],
        ..Default::default()
    }
    .normalize(0, &ChartContext::default());
    assert_eq!(get_tooltips(&options).len(), 1);
}

#[test]
fn test_interactive_bar_creates_hover_signals() {
    let spec = build_chart_spec(&bar_chart(|bar| {
        bar.chart_tooltips = vec![ChartTooltipOptions::default()];
    }))
    .unwrap();
    assert!(spec.get_signal("bar0_hoveredId").is_some());
    assert!(spec.get_signal("bar0_controlledHoveredId").is_some());
    let highlighted_item = spec.get_signal("highlightedItem").unwrap();
    assert_eq!(highlighted_item.on.len(), 2);
}

#[test]
fn test_non_interactive_bar_creates_no_hover_signals() {
    let spec = build_chart_spec(&bar_chart(|_| {})).unwrap();
    assert!(spec.get_signal("bar0_hoveredId").is_none());
    assert!(spec.get_signal("highlightedItem").unwrap().on.is_empty());
}

#[test]
fn test_color_facet_reaches_color_scale() {
    let spec = build_chart_spec(&bar_chart(|bar| {
        bar.color = Some(FacetRef::Field("series".to_string()));
    }))
    .unwrap();
    let color = spec.get_scale("color").expect("color scale");
    match &color.domain {
        Some(vegaforge_core::spec::scale::ScaleDomainSpec::FieldsReference(fields_ref)) => {
            assert_eq!(fields_ref.fields, vec!["series"]);
            assert_eq!(fields_ref.data, "filteredTable");
        }
        other => panic!("expected fields-reference domain, got {other:?}"),
    }

    let mark = spec.get_mark("bar0").unwrap();
    let enter = mark.encode.as_ref().unwrap().enter.as_ref().unwrap();
    let fill = enter.channel("fill").unwrap().to_vec();
    assert_eq!(fill[0].scale.as_deref(), Some("color"));
}
