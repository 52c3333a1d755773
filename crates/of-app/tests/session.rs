use of_app::{
    FilterSession, SessionConfig, load_presets, load_spec, parse_script, save_presets, save_spec,
};
use of_core::{Region, Season};
use of_spec::{Dimension, FilterEdit, FilterSpec, NestedKey, NestedValue};
use std::cell::RefCell;
use std::rc::Rc;

fn watched_session() -> (FilterSession, Rc<RefCell<Vec<FilterSpec>>>) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut session = FilterSession::default();
    let sink = Rc::clone(&seen);
    session.subscribe(move |spec: &FilterSpec| sink.borrow_mut().push(spec.clone()));
    (session, seen)
}

#[test]
fn preset_restores_after_clear() {
    let (mut session, seen) = watched_session();
    session
        .edit(FilterEdit::AddValue {
            dimension: Dimension::Regions,
            value: "Arctic Ocean".to_string(),
        })
        .unwrap();
    session
        .edit(FilterEdit::SetNested {
            dimension: Dimension::Salinity,
            key: NestedKey::Min,
            value: NestedValue::Number(30.0),
        })
        .unwrap();
    session.save_preset("Arctic Survey").unwrap();

    session.clear_all();
    assert_eq!(session.current(), &FilterSpec::default());

    assert!(session.load_preset("Arctic Survey"));
    assert_eq!(session.current().regions, vec![Region::ArcticOcean]);
    assert_eq!(session.current().salinity.min, 30.0);

    // add, set, clear, load
    assert_eq!(seen.borrow().len(), 4);
    assert_eq!(seen.borrow().last(), Some(session.current()));
}

#[test]
fn removing_absent_value_does_not_notify() {
    let (mut session, seen) = watched_session();
    session
        .edit(FilterEdit::AddValue {
            dimension: Dimension::Seasons,
            value: "Summer".to_string(),
        })
        .unwrap();
    let changed = session
        .edit(FilterEdit::RemoveValue {
            dimension: Dimension::Seasons,
            value: Some("Winter".to_string()),
        })
        .unwrap();

    assert!(!changed);
    assert_eq!(seen.borrow().len(), 1);
    assert_eq!(session.current().seasons, vec![Season::Summer]);
}

#[test]
fn pending_save_keeps_request_time_snapshot() {
    let mut session = FilterSession::default();
    session
        .edit(FilterEdit::AddValue {
            dimension: Dimension::Regions,
            value: "Indian Ocean".to_string(),
        })
        .unwrap();
    let pending = session.request_preset_save();
    session
        .edit(FilterEdit::AddValue {
            dimension: Dimension::Regions,
            value: "Southern Ocean".to_string(),
        })
        .unwrap();
    session.commit_preset(pending, "Indian only").unwrap();

    let snapshot = session.presets().load("Indian only").unwrap();
    assert_eq!(snapshot.regions, vec![Region::IndianOcean]);
}

#[test]
fn script_then_tags() {
    let edits = parse_script(
        "# survey\n\
         add:regions=North Pacific\n\
         nested:temperature.min=10\n\
         nested:temperature.max=20\n\
         toggle:profiles=Deep\n",
    )
    .unwrap();
    let mut session = FilterSession::new(SessionConfig::default());
    assert_eq!(session.edit_all(edits).unwrap(), 4);

    let labels: Vec<String> = session.tags().iter().map(|t| t.label()).collect();
    assert_eq!(session.active_filter_count(), 3);
    assert!(labels.contains(&"Region: North Pacific".to_string()));
    assert!(labels.contains(&"Temperature: 10–20".to_string()));
}

#[test]
fn spec_and_presets_round_trip_through_files() {
    let dir = std::env::temp_dir().join(format!("of_app_files_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let mut session = FilterSession::default();
    session
        .edit(FilterEdit::AddValue {
            dimension: Dimension::FloatIds,
            value: "5904471".to_string(),
        })
        .unwrap();
    session.save_preset("One float").unwrap();

    let yaml = dir.join("spec.yml");
    save_spec(&yaml, session.current()).unwrap();
    assert_eq!(&load_spec(&yaml).unwrap(), session.current());

    let presets = dir.join("presets.json");
    save_presets(&presets, session.presets()).unwrap();
    let loaded = load_presets(&presets).unwrap();
    assert_eq!(&loaded, session.presets());

    std::fs::remove_dir_all(&dir).unwrap();
}
