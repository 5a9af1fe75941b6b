//! Session store integrity behaviour against real files.

use std::collections::BTreeMap;
use std::fs;

use rxqa_guard::{ChecksumPackage, Loaded, SessionStore};
use tempfile::tempdir;

type State = BTreeMap<String, Vec<String>>;

fn state(tags: &[&str]) -> State {
    BTreeMap::from([(
        "weight".to_string(),
        tags.iter().map(ToString::to_string).collect(),
    )])
}

#[test]
fn fresh_store_loads_nothing() {
    let dir = tempdir().expect("tempdir");
    let mut store = SessionStore::new(dir.path().join("session.json"));

    let loaded: Loaded<State> = store.load().expect("load");
    assert_eq!(
        loaded,
        Loaded {
            state: None,
            tampered: false,
            concurrent_session: false
        }
    );
}

#[test]
fn saved_state_loads_in_a_new_store() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("session.json");
    SessionStore::new(&path)
        .save(&state(&["nominal_value"]))
        .expect("save");

    let mut store = SessionStore::new(&path);
    let loaded: Loaded<State> = store.load().expect("load");
    assert_eq!(loaded.state, Some(state(&["nominal_value"])));
    assert!(!loaded.tampered);
    assert!(!loaded.concurrent_session);
    assert_eq!(store.revision(), Some(1));
}

#[test]
fn edited_primary_is_restored_from_backup() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("session.json");
    let mut store = SessionStore::new(&path);
    store.save(&state(&["nominal_value"])).expect("save");

    let mut package: ChecksumPackage =
        serde_json::from_str(&fs::read_to_string(&path).expect("read")).expect("package");
    package.data["state"]["weight"] = serde_json::json!(["nominal_value", "above_max"]);
    fs::write(&path, serde_json::to_string(&package).expect("json")).expect("write");

    let loaded: Loaded<State> = SessionStore::new(&path).load().expect("load");
    assert!(loaded.tampered);
    assert_eq!(loaded.state, Some(state(&["nominal_value"])));

    // The restored primary verifies again.
    let reloaded: Loaded<State> = SessionStore::new(&path).load().expect("reload");
    assert!(!reloaded.tampered);
}

#[test]
fn deleted_primary_with_backup_is_tampering() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("session.json");
    let mut store = SessionStore::new(&path);
    store.save(&state(&["empty_value"])).expect("save");
    fs::remove_file(&path).expect("remove");

    let loaded: Loaded<State> = SessionStore::new(&path).load().expect("load");
    assert!(loaded.tampered);
    assert_eq!(loaded.state, Some(state(&["empty_value"])));
    assert!(path.exists());
}

#[test]
fn garbage_without_backup_is_tampering_with_no_state() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("session.json");
    fs::write(&path, "{ not json").expect("write");

    let loaded: Loaded<State> = SessionStore::new(&path).load().expect("load");
    assert!(loaded.tampered);
    assert_eq!(loaded.state, None);
}

#[test]
fn foreign_write_is_a_concurrent_session() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("session.json");

    let mut ours = SessionStore::new(&path);
    ours.save(&state(&["nominal_value"])).expect("save");

    let mut theirs = SessionStore::new(&path);
    let _: Loaded<State> = theirs.load().expect("their load");
    theirs.save(&state(&["boundary_min"])).expect("their save");

    let loaded: Loaded<State> = ours.load().expect("load");
    assert!(loaded.concurrent_session);
    assert!(!loaded.tampered);
    assert_eq!(loaded.state, Some(state(&["boundary_min"])));

    // Once seen, the new revision is ours too.
    let loaded: Loaded<State> = ours.load().expect("load again");
    assert!(!loaded.concurrent_session);
}
