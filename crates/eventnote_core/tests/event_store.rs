use eventnote_core::{Event, EventId, EventStore, StoreConfig};
use std::collections::HashSet;

fn event(id: i64, name: &str, date: &str, location: &str) -> Event {
    Event {
        id: EventId::new(id),
        name: name.to_string(),
        date: date.to_string(),
        location: location.to_string(),
    }
}

#[test]
fn fresh_store_lists_nothing() {
    let store = EventStore::open_in_memory().unwrap();
    assert_eq!(store.list().unwrap(), Vec::<Event>::new());
}

#[test]
fn first_insert_gets_id_one_and_round_trips() {
    let store = EventStore::open_in_memory().unwrap();

    let id = store.insert("Meetup", "2024-05-01", "Downtown").unwrap();

    assert_eq!(id, EventId::new(1));
    assert_eq!(
        store.list().unwrap(),
        vec![event(1, "Meetup", "2024-05-01", "Downtown")]
    );
    assert_eq!(
        store.get(id).unwrap(),
        Some(event(1, "Meetup", "2024-05-01", "Downtown"))
    );
}

#[test]
fn deleting_middle_event_preserves_order() {
    let store = EventStore::open_in_memory().unwrap();
    store.insert("Meetup", "2024-05-01", "Downtown").unwrap();
    let second = store.insert("Standup", "2024-05-02", "Office").unwrap();
    let third = store.insert("Retro", "2024-05-03", "Cafe").unwrap();
    assert_eq!(second, EventId::new(2));
    assert_eq!(third, EventId::new(3));

    assert!(store.delete(second).unwrap());

    let ids: Vec<_> = store.list().unwrap().iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![EventId::new(1), EventId::new(3)]);
}

#[test]
fn deleting_absent_id_is_a_silent_no_op() {
    let store = EventStore::open_in_memory().unwrap();
    store.insert("Meetup", "2024-05-01", "Downtown").unwrap();
    let before = store.list().unwrap();

    assert!(!store.delete(EventId::new(99)).unwrap());

    assert_eq!(store.list().unwrap(), before);
}

#[test]
fn deleting_twice_reports_absence_the_second_time() {
    let store = EventStore::open_in_memory().unwrap();
    let id = store.insert("Meetup", "2024-05-01", "Downtown").unwrap();

    assert!(store.delete(id).unwrap());
    assert!(!store.delete(id).unwrap());
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn delete_decreases_count_by_exactly_one() {
    let store = EventStore::open_in_memory().unwrap();
    let ids: Vec<_> = (0..5)
        .map(|n| {
            store
                .insert(&format!("event-{n}"), "2024-01-01", "Hall")
                .unwrap()
        })
        .collect();

    store.delete(ids[3]).unwrap();

    let remaining = store.list().unwrap();
    assert_eq!(remaining.len(), 4);
    assert!(remaining.iter().all(|e| e.id != ids[3]));
}

#[test]
fn ids_are_unique_and_strictly_increasing_across_deletes() {
    let store = EventStore::open_in_memory().unwrap();
    let mut issued = Vec::new();

    for round in 0..10 {
        let id = store
            .insert(&format!("event-{round}"), "2024-01-01", "Hall")
            .unwrap();
        issued.push(id);
        if round % 3 == 0 {
            store.delete(id).unwrap();
        }
    }

    let unique: HashSet<_> = issued.iter().copied().collect();
    assert_eq!(unique.len(), issued.len());
    assert!(issued.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn deleted_max_id_is_not_reissued() {
    let store = EventStore::open_in_memory().unwrap();
    store.insert("a", "2024-01-01", "x").unwrap();
    let last = store.insert("b", "2024-01-02", "y").unwrap();
    store.delete(last).unwrap();

    let next = store.insert("c", "2024-01-03", "z").unwrap();
    assert!(next > last);
}

#[test]
fn list_is_ordered_by_id_not_by_date_or_name() {
    let store = EventStore::open_in_memory().unwrap();
    store.insert("Zeta", "2030-12-31", "Far").unwrap();
    store.insert("Alpha", "2000-01-01", "Near").unwrap();
    let gone = store.insert("Mid", "2015-06-15", "Middle").unwrap();
    store.insert("Beta", "1999-01-01", "Old").unwrap();
    store.delete(gone).unwrap();

    let names: Vec<_> = store
        .list()
        .unwrap()
        .into_iter()
        .map(|e| e.name)
        .collect();
    assert_eq!(names, vec!["Zeta", "Alpha", "Beta"]);
}

#[test]
fn list_returns_an_independent_snapshot() {
    let store = EventStore::open_in_memory().unwrap();
    store.insert("Meetup", "2024-05-01", "Downtown").unwrap();

    let mut snapshot = store.list().unwrap();
    snapshot[0].name = "changed".to_string();
    snapshot.clear();

    let fresh = store.list().unwrap();
    assert_eq!(fresh.len(), 1);
    assert_eq!(fresh[0].name, "Meetup");
}

#[test]
fn reopening_file_store_preserves_events_and_ids() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::in_dir(dir.path());

    let store = EventStore::open(&config).unwrap();
    store.insert("Meetup", "2024-05-01", "Downtown").unwrap();
    let removed = store.insert("Standup", "2024-05-02", "Office").unwrap();
    store.insert("Retro", "2024-05-03", "Cafe").unwrap();
    store.delete(removed).unwrap();
    store.close().unwrap();

    let reopened = EventStore::open(&config).unwrap();
    assert_eq!(reopened.db_path(), Some(config.db_path()));
    assert_eq!(
        reopened.list().unwrap(),
        vec![
            event(1, "Meetup", "2024-05-01", "Downtown"),
            event(3, "Retro", "2024-05-03", "Cafe"),
        ]
    );
}

#[test]
fn ids_are_not_recycled_after_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::in_dir(dir.path());

    let store = EventStore::open(&config).unwrap();
    store.insert("a", "2024-01-01", "x").unwrap();
    let last = store.insert("b", "2024-01-02", "y").unwrap();
    store.delete(last).unwrap();
    drop(store);

    let reopened = EventStore::open(&config).unwrap();
    let next = reopened.insert("c", "2024-01-03", "z").unwrap();
    assert_eq!(next, EventId::new(3));
}

#[test]
fn fields_are_stored_verbatim() {
    let store = EventStore::open_in_memory().unwrap();
    let id = store
        .insert("  Встреча 🎉 ", "2024-02-30", "O'Brien's \"pub\"")
        .unwrap();

    let stored = store.get(id).unwrap().unwrap();
    assert_eq!(stored.name, "  Встреча 🎉 ");
    assert_eq!(stored.date, "2024-02-30");
    assert_eq!(stored.location, "O'Brien's \"pub\"");
}

#[test]
fn events_serialize_with_plain_integer_ids() {
    let store = EventStore::open_in_memory().unwrap();
    store.insert("Meetup", "2024-05-01", "Downtown").unwrap();

    let json = serde_json::to_value(store.list().unwrap()).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            {"id": 1, "name": "Meetup", "date": "2024-05-01", "location": "Downtown"}
        ])
    );
}
