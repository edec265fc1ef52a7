use rstest::rstest;
use serde_json::json;
use std::str::FromStr;
use vegaforge_core::build_chart_spec;
use vegaforge_core::options::chart::{ChartChildOptions, ChartOptions};
use vegaforge_core::options::line::LineOptions;
use vegaforge_core::options::trendline::{TrendlineMethod, TrendlineOptions};
use vegaforge_core::options::FacetRef;
use vegaforge_core::spec::transform::regression::RegressionMethodSpec;
use vegaforge_core::spec::transform::TransformSpec;

fn line_chart_with_trendline(method: &str) -> ChartOptions {
    ChartOptions {
        data: vec![json!({"datetime": 1, "value": 2, "series": "a"})],
        children: vec![ChartChildOptions::Line(LineOptions {
            color: Some(FacetRef::Field("series".to_string())),
            trendlines: vec![TrendlineOptions {
                method: Some(method.to_string()),
                ..Default::default()
            }],
            ..Default::default()
        })],
        ..Default::default()
    }
}

#[rstest]
#[case("linear", 1)]
#[case("quadratic", 2)]
#[case("polynomial-4", 4)]
fn test_polynomial_order(#[case] method: &str, #[case] expected: u32) {
    let method = TrendlineMethod::from_str(method).unwrap();
    assert_eq!(method.polynomial_order().unwrap(), expected);
}

#[test]
fn test_sub_one_polynomial_order_is_an_error() {
    let method = TrendlineMethod::from_str("polynomial-0").unwrap();
    assert!(method.polynomial_order().is_err());
}

#[test]
fn test_sub_one_moving_average_window_is_an_error() {
    assert!(TrendlineMethod::MovingAverage(0)
        .moving_average_window()
        .is_err());
    assert_eq!(
        TrendlineMethod::MovingAverage(7)
            .moving_average_window()
            .unwrap(),
        7
    );
}

#[test]
fn test_invalid_polynomial_fails_the_build() {
    let err = build_chart_spec(&line_chart_with_trendline("polynomial-0"));
    assert!(err.is_err());
}

#[test]
fn test_regression_trendline_data() {
    let spec = build_chart_spec(&line_chart_with_trendline("quadratic")).unwrap();
    let data = spec
        .data
        .iter()
        .find(|d| d.name == "line0Trendline0_data")
        .expect("trendline data source");
    assert_eq!(data.source.as_deref(), Some("filteredTable"));
    assert_eq!(data.transform.len(), 1);
    match &data.transform[0] {
        TransformSpec::Regression(regression) => {
            assert_eq!(regression.method(), RegressionMethodSpec::Quad);
            assert_eq!(regression.order, None);
            assert_eq!(
                regression.as_,
                Some(vec![
                    "datetime0".to_string(),
                    "vfTrendlineValue".to_string()
                ])
            );
            let groupby: Vec<String> = regression
                .groupby
                .as_ref()
                .unwrap()
                .iter()
                .map(|f| f.field())
                .collect();
            assert_eq!(groupby, vec!["series", "vfSeriesId"]);
        }
        other => panic!("expected a regression transform, got {other:?}"),
    }
}

#[test]
fn test_moving_average_trendline_data() {
    let spec = build_chart_spec(&line_chart_with_trendline("movingAverage-7")).unwrap();
    let data = spec
        .data
        .iter()
        .find(|d| d.name == "line0Trendline0_data")
        .expect("trendline data source");
    match &data.transform[0] {
        TransformSpec::Window(window) => {
            // trailing window covering the 7 preceding rows
            assert_eq!(window.frame, Some([json!(-6), json!(0)]));
            assert_eq!(
                window.as_,
                Some(vec![Some("vfTrendlineValue".to_string())])
            );
            assert!(window.sort.is_some());
        }
        other => panic!("expected a window transform, got {other:?}"),
    }
}

#[test]
fn test_average_trendline_emits_rule_mark() {
    let spec = build_chart_spec(&line_chart_with_trendline("average")).unwrap();
    let data = spec
        .data
        .iter()
        .find(|d| d.name == "line0Trendline0_data")
        .expect("trendline data source");
    assert!(matches!(&data.transform[0], TransformSpec::Aggregate(_)));

    let mark = spec
        .marks
        .iter()
        .find(|m| m.name.as_deref() == Some("line0Trendline0"))
        .expect("trendline rule mark");
    assert_eq!(mark.type_, "rule");
}

#[test]
fn test_regression_trendline_is_faceted_per_series() {
    let spec = build_chart_spec(&line_chart_with_trendline("linear")).unwrap();
    let group = spec
        .marks
        .iter()
        .find(|m| m.name.as_deref() == Some("line0Trendline0_group"))
        .expect("trendline group mark");
    assert_eq!(group.type_, "group");
    let facet = group.from.as_ref().unwrap().facet.as_ref().unwrap();
    assert_eq!(facet.data, "line0Trendline0_data");
    assert_eq!(group.marks.len(), 1);
    assert_eq!(group.marks[0].type_, "line");
}

#[test]
fn test_display_on_hover_trendline_defaults_invisible() {
    let mut options = line_chart_with_trendline("linear");
    if let ChartChildOptions::Line(line) = &mut options.children[0] {
        line.trendlines[0].display_on_hover = Some(true);
    }
    let spec = build_chart_spec(&options).unwrap();
    let group = spec
        .marks
        .iter()
        .find(|m| m.name.as_deref() == Some("line0Trendline0_group"))
        .unwrap();
    let encode = group.marks[0].encode.as_ref().unwrap();
    let opacity = encode
        .update
        .as_ref()
        .unwrap()
        .channel("opacity")
        .unwrap()
        .to_vec();
    let fallback = opacity.last().unwrap();
    assert!(fallback.test.is_none());
    assert_eq!(fallback.value, Some(json!(0.0)));
}

#[test]
fn test_unknown_method_degrades_to_linear() {
    let trendline = TrendlineOptions {
        method: Some("bogus".to_string()),
        ..Default::default()
    };
    let normalized = trendline.normalize("line0", 0);
    assert_eq!(normalized.method, TrendlineMethod::Linear);
    assert_eq!(normalized.name, "line0Trendline0");
}
