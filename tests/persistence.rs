//! Persisted page state across sessions on a real file.

use pagestate::pages::{StatePage, USER_NAME_KEY};
use pagestate::storage::{DurableMedium, FileMedium, PersistentValueStore, Update};
use std::sync::Arc;
use tempfile::TempDir;

fn file_store(dir: &TempDir) -> (FileMedium, PersistentValueStore) {
    let medium = FileMedium::new(dir.path().join("state").join("storage.json"));
    let store = PersistentValueStore::new(Arc::new(medium.clone()));
    (medium, store)
}

#[test]
fn name_survives_a_new_session() {
    let dir = TempDir::new().unwrap();
    {
        let (_, store) = file_store(&dir);
        let mut page = StatePage::open(&store);
        page.counter_mut().increase();
        page.on_name_change("Grace Hopper");
    }

    let (medium, store) = file_store(&dir);
    let page = StatePage::open(&store);
    assert_eq!(page.name(), "Grace Hopper");
    assert_eq!(page.counter().count(), 0);
    assert_eq!(
        medium.get(USER_NAME_KEY).unwrap().as_deref(),
        Some("\"Grace Hopper\"")
    );
}

#[test]
fn functional_update_is_stored() {
    let dir = TempDir::new().unwrap();
    let (medium, store) = file_store(&dir);

    let mut visits = store.open("visits", 5u32);
    visits.write(Update::with(|n: &u32| n + 1));
    assert_eq!(*visits.get(), 6);
    assert_eq!(medium.get("visits").unwrap().as_deref(), Some("6"));

    assert_eq!(store.read("visits", 0u32), 6);
}

#[test]
fn corrupted_file_falls_back_to_default() {
    let dir = TempDir::new().unwrap();
    let (medium, store) = file_store(&dir);
    std::fs::create_dir_all(medium.path().parent().unwrap()).unwrap();
    std::fs::write(medium.path(), "{ not json").unwrap();

    let page = StatePage::open(&store);
    assert_eq!(page.name_display(), "(empty)");
}

#[test]
fn quota_rejection_keeps_in_memory_value() {
    let dir = TempDir::new().unwrap();
    let medium = FileMedium::with_quota(dir.path().join("storage.json"), 24);
    let store = PersistentValueStore::new(Arc::new(medium.clone()));

    let mut page = StatePage::open(&store);
    page.on_name_change("Ada");
    page.on_name_change("a name far too long for the quota");

    assert_eq!(page.name(), "a name far too long for the quota");
    assert_eq!(medium.get(USER_NAME_KEY).unwrap().as_deref(), Some("\"Ada\""));
}

#[test]
fn removed_key_reads_default() {
    let dir = TempDir::new().unwrap();
    let (_, store) = file_store(&dir);
    assert!(store.persist("theme", &"dark"));

    store.remove("theme");
    assert_eq!(store.read("theme", String::from("light")), "light");
}

#[test]
fn cleared_name_is_gone_from_the_file() {
    let dir = TempDir::new().unwrap();
    {
        let (_, store) = file_store(&dir);
        StatePage::open(&store).on_name_change("Ada");
    }
    {
        let (_, store) = file_store(&dir);
        StatePage::open(&store).clear_name();
    }

    let (medium, store) = file_store(&dir);
    assert_eq!(medium.get(USER_NAME_KEY).unwrap(), None);
    assert_eq!(StatePage::open(&store).name_display(), "(empty)");
}
