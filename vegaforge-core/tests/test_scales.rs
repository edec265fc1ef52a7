use rstest::rstest;
use vegaforge_core::compile::scale::{
    add_domain_fields, add_field_to_facet_scale_domain, add_metric_scale, get_band_padding,
    get_scale_index_by_name, prune_unused_scales, ScaleAxis,
};
use vegaforge_core::constants::{COLOR_SCALE, DISCRETE_PADDING, LINE_WIDTH_SCALE};
use vegaforge_core::options::FacetRef;
use vegaforge_core::spec::scale::{ScaleDomainSpec, ScaleSpec, ScaleTypeSpec};

fn domain_fields(scale: &ScaleSpec) -> Vec<String> {
    match &scale.domain {
        Some(ScaleDomainSpec::FieldsReference(fields_ref)) => fields_ref.fields.clone(),
        other => panic!("expected a data-fields domain, got {other:?}"),
    }
}

#[test]
fn test_domain_accumulation_is_idempotent() {
    let mut scales: Vec<ScaleSpec> = Vec::new();
    add_field_to_facet_scale_domain(&mut scales, COLOR_SCALE, &FacetRef::Field("series".into()));
    add_field_to_facet_scale_domain(&mut scales, COLOR_SCALE, &FacetRef::Field("region".into()));
    add_field_to_facet_scale_domain(&mut scales, COLOR_SCALE, &FacetRef::Field("series".into()));

    assert_eq!(scales.len(), 1);
    // the re-added field keeps its original insertion position
    assert_eq!(domain_fields(&scales[0]), vec!["series", "region"]);
}

#[test]
fn test_find_or_create_scale_uniqueness() {
    let mut scales: Vec<ScaleSpec> = Vec::new();
    for _ in 0..5 {
        add_field_to_facet_scale_domain(
            &mut scales,
            COLOR_SCALE,
            &FacetRef::Field("series".into()),
        );
    }
    assert_eq!(scales.len(), 1);
    assert_eq!(
        scales.iter().filter(|s| s.name == COLOR_SCALE).count(),
        1
    );
}

#[test]
fn test_static_value_facets_never_enter_domains() {
    let mut scales: Vec<ScaleSpec> = Vec::new();
    add_field_to_facet_scale_domain(&mut scales, COLOR_SCALE, &FacetRef::value("#ff0000"));
    assert!(scales.is_empty());
}

#[rstest]
#[case(0.2, None, 0.2, DISCRETE_PADDING - 0.4)]
#[case(0.4, None, 0.4, DISCRETE_PADDING - 0.3)]
#[case(0.5, Some(0.0), 0.5, 0.0)]
fn test_band_padding_ratio_rule(
    #[case] ratio: f64,
    #[case] outer: Option<f64>,
    #[case] expected_inner: f64,
    #[case] expected_outer: f64,
) {
    let (inner, computed_outer) = get_band_padding(ratio, outer);
    assert!((inner - expected_inner).abs() < 1e-9);
    assert!((computed_outer - expected_outer).abs() < 1e-9);
}

#[test]
fn test_metric_scale_find_or_create() {
    let mut scales: Vec<ScaleSpec> = Vec::new();
    let name_a = add_metric_scale(&mut scales, &["value0".to_string()], ScaleAxis::Y);
    let name_b = add_metric_scale(&mut scales, &["value1".to_string()], ScaleAxis::Y);
    assert_eq!(name_a, "yLinear");
    assert_eq!(name_a, name_b);
    assert_eq!(scales.len(), 1);
    assert_eq!(scales[0].scale_type(), ScaleTypeSpec::Linear);
    assert_eq!(domain_fields(&scales[0]), vec!["value0", "value1"]);
    assert_eq!(scales[0].nice, Some(true));
    assert_eq!(scales[0].zero, Some(true));
}

#[test]
fn test_unused_scales_are_pruned() {
    let mut scales: Vec<ScaleSpec> = Vec::new();
    add_field_to_facet_scale_domain(&mut scales, COLOR_SCALE, &FacetRef::Field("series".into()));
    // lineWidth scale exists but never accumulates a field
    add_field_to_facet_scale_domain(&mut scales, LINE_WIDTH_SCALE, &FacetRef::Field("w".into()));
    if let Some(fields) = scales[1].domain_fields_mut() {
        fields.clear();
    }

    prune_unused_scales(&mut scales);
    assert!(get_scale_index_by_name(&scales, COLOR_SCALE).is_some());
    assert!(get_scale_index_by_name(&scales, LINE_WIDTH_SCALE).is_none());
}

#[test]
fn test_domain_field_append_preserves_order() {
    let mut scale = ScaleSpec::new("color", ScaleTypeSpec::Ordinal);
    add_domain_fields(&mut scale, &["b".to_string()]);
    add_domain_fields(&mut scale, &["a".to_string(), "b".to_string()]);
    assert_eq!(domain_fields(&scale), vec!["b", "a"]);
}
