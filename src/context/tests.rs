use super::*;
use tempfile::tempdir;

#[test]
fn add_deduplicates_with_recency_reordering() {
    let mut list = vec!["red".to_string(), "blue".to_string()];
    add_element(&mut list, "red".to_string());
    assert_eq!(list, vec!["blue".to_string(), "red".to_string()]);
}

#[test]
fn add_appends_new_elements_in_order() {
    let mut list = Vec::new();
    add_element(&mut list, "red".to_string());
    add_element(&mut list, "blue".to_string());
    assert_eq!(list, vec!["red".to_string(), "blue".to_string()]);
}

#[test]
fn remove_of_absent_element_is_a_noop() {
    let mut list = vec!["red".to_string()];
    remove_element(&mut list, "green");
    assert_eq!(list, vec!["red".to_string()]);
}

#[test]
fn apply_overwrites_all_patch_keys() {
    let mut store = ContextStore::in_memory();
    let mut patch = ContextPatch::new();
    patch.insert("name".to_string(), ContextValue::Scalar("alex".to_string()));
    patch.insert(
        "colors".to_string(),
        ContextValue::List(vec!["red".to_string()]),
    );
    store.apply(patch);

    assert_eq!(
        store.committed().get("name").and_then(ContextValue::as_scalar),
        Some("alex")
    );
    assert_eq!(
        store.committed().get("colors").and_then(ContextValue::as_list),
        Some(&["red".to_string()][..])
    );
}

#[test]
fn snapshot_is_isolated_from_later_commits() {
    let mut store = ContextStore::in_memory();
    let snapshot = store.snapshot();
    let mut patch = ContextPatch::new();
    patch.insert("name".to_string(), ContextValue::Scalar("alex".to_string()));
    store.apply(patch);
    assert!(snapshot.is_empty());
    assert!(!store.committed().is_empty());
}

#[test]
fn round_trips_through_the_backing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("context.json");

    let mut store = ContextStore::open(&path).unwrap();
    assert!(store.committed().is_empty());

    let mut patch = ContextPatch::new();
    patch.insert("name".to_string(), ContextValue::Scalar("alex".to_string()));
    patch.insert(
        "colors".to_string(),
        ContextValue::List(vec!["red".to_string(), "blue".to_string()]),
    );
    store.commit(patch).unwrap();

    let reopened = ContextStore::open(&path).unwrap();
    assert_eq!(reopened.committed(), store.committed());
}

#[test]
fn missing_backing_file_starts_empty() {
    let dir = tempdir().unwrap();
    let store = ContextStore::open(dir.path().join("absent.json")).unwrap();
    assert!(store.committed().is_empty());
}

#[test]
fn persist_surfaces_storage_failure() {
    let dir = tempdir().unwrap();
    // Parent directory does not exist, so the write must fail.
    let mut store = ContextStore::open(dir.path().join("missing").join("ctx.json")).unwrap();
    let mut patch = ContextPatch::new();
    patch.insert("name".to_string(), ContextValue::Scalar("alex".to_string()));
    assert!(store.commit(patch).is_err());
}
