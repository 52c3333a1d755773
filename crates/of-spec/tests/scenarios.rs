use of_core::{QualityFlag, Region};
use of_spec::update::{remove_value, set_field, set_nested_field};
use of_spec::*;

fn replaced(t: Transition) -> FilterSpec {
    t.into_spec().expect("edit should replace the specification")
}

#[test]
fn single_region_gives_one_tag() {
    let spec = replaced(
        set_field(
            &FilterSpec::default(),
            FieldValue::from_literals(Dimension::Regions, &["North Pacific"]).unwrap(),
            EditPolicy::default(),
        )
        .unwrap(),
    );

    assert_eq!(active_filter_count(&spec), 1);
    assert_eq!(
        tags(&spec),
        vec![Tag {
            category: Dimension::Regions,
            value: "North Pacific".to_string(),
            removable: true,
        }]
    );
}

#[test]
fn temperature_bounds_make_one_aggregate_tag() {
    let spec = replaced(
        set_nested_field(
            &FilterSpec::default(),
            Dimension::Temperature,
            NestedKey::Min,
            &NestedValue::Number(10.0),
            EditPolicy::default(),
        )
        .unwrap(),
    );
    let spec = replaced(
        set_nested_field(
            &spec,
            Dimension::Temperature,
            NestedKey::Max,
            &NestedValue::Number(20.0),
            EditPolicy::default(),
        )
        .unwrap(),
    );

    assert_eq!(active_filter_count(&spec), 1);
    let tags = tags(&spec);
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].category, Dimension::Temperature);
    assert_eq!(tags[0].value, "10–20");
    assert_eq!(derive::range_display(&spec.temperature), "10–20 °C");
}

#[test]
fn preset_survives_clear_all() {
    let mut live = FilterSpec::default();
    live.regions = vec![Region::ArcticOcean];
    live.salinity.min = 30.0;

    let mut presets = PresetRegistry::new();
    presets
        .save("Arctic Survey", &live, DuplicatePresetPolicy::Upsert)
        .unwrap();

    let live = replaced(apply(&live, FilterEdit::ClearAll, EditPolicy::default()).unwrap());
    assert_eq!(live, FilterSpec::default());

    let restored = presets.load("Arctic Survey").cloned().unwrap();
    assert_eq!(restored.regions, vec![Region::ArcticOcean]);
    assert_eq!(restored.salinity.min, 30.0);
    assert_eq!(restored.coordinates, live.coordinates);
}

#[test]
fn removing_bad_data_keeps_order() {
    let mut spec = FilterSpec::default();
    spec.quality_flags = vec![QualityFlag::GoodData, QualityFlag::BadData];

    let next = replaced(remove_value(&spec, Dimension::QualityFlags, Some("Bad Data")).unwrap());
    assert_eq!(next.quality_flags, vec![QualityFlag::GoodData]);
}

#[test]
fn garbage_latitude_leaves_spec_untouched() {
    let spec = FilterSpec::default();
    let result = apply(
        &spec,
        FilterEdit::SetNested {
            dimension: Dimension::Coordinates,
            key: NestedKey::LatMin,
            value: NestedValue::Text("not-a-number".to_string()),
        },
        EditPolicy::default(),
    );
    assert!(result.is_err());
    assert_eq!(spec, FilterSpec::default());
}

#[test]
fn removing_each_tag_clears_everything() {
    let mut spec = FilterSpec::default();
    spec.regions = vec![Region::NorthAtlantic, Region::SouthAtlantic];
    spec.depth.max = 2000.0;
    spec.quality_flags = vec![QualityFlag::ProbablyGood];

    for tag in tags(&spec) {
        if let Transition::Replaced(next) =
            apply(&spec, tag.remove_edit(), EditPolicy::default()).unwrap()
        {
            spec = next;
        }
    }

    assert_eq!(active_filter_count(&spec), 0);
    assert_eq!(spec, FilterSpec::default());
}
