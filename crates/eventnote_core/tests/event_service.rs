use eventnote_core::{
    EventField, EventId, EventService, EventStore, EventValidationError, NewEvent, ServiceError,
};

#[test]
fn create_event_trims_fields_before_storage() {
    let store = EventStore::open_in_memory().unwrap();
    let service = EventService::new(&store);

    let id = service
        .create_event(&NewEvent::new("  Meetup ", " 2024-05-01", "Downtown  "))
        .unwrap();

    let stored = store.get(id).unwrap().unwrap();
    assert_eq!(stored.name, "Meetup");
    assert_eq!(stored.date, "2024-05-01");
    assert_eq!(stored.location, "Downtown");
}

#[test]
fn incomplete_draft_never_reaches_storage() {
    let store = EventStore::open_in_memory().unwrap();
    let service = EventService::new(&store);

    let err = service
        .create_event(&NewEvent::new("Meetup", "2024-05-01", ""))
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(EventValidationError::EmptyField(EventField::Location))
    ));

    let err = service
        .create_event(&NewEvent::new("Meetup", "May 1st", "Downtown"))
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(EventValidationError::InvalidDateFormat(_))
    ));

    assert!(store.list().unwrap().is_empty());
}

#[test]
fn rejected_draft_does_not_consume_an_id() {
    let store = EventStore::open_in_memory().unwrap();
    let service = EventService::new(&store);

    service
        .create_event(&NewEvent::new("", "2024-05-01", "Downtown"))
        .unwrap_err();
    let id = service
        .create_event(&NewEvent::new("Meetup", "2024-05-01", "Downtown"))
        .unwrap();

    assert_eq!(id, EventId::new(1));
}

#[test]
fn list_items_carry_typed_ids_with_labels() {
    let store = EventStore::open_in_memory().unwrap();
    let service = EventService::new(&store);
    service
        .create_event(&NewEvent::new("Meetup", "2024-05-01", "Downtown"))
        .unwrap();
    service
        .create_event(&NewEvent::new("Retro", "2024-05-03", "Cafe"))
        .unwrap();

    let items = service.list_items().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id, EventId::new(1));
    assert_eq!(items[0].label, "1: Meetup on 2024-05-01 at Downtown");
    assert_eq!(items[1].label, "2: Retro on 2024-05-03 at Cafe");
}

#[test]
fn delete_by_list_item_id_removes_only_that_event() {
    let store = EventStore::open_in_memory().unwrap();
    let service = EventService::new(&store);
    for name in ["a", "b", "c"] {
        service
            .create_event(&NewEvent::new(name, "2024-01-01", "Hall"))
            .unwrap();
    }

    let target = service.list_items().unwrap()[1].id;
    assert!(service.delete_event(target).unwrap());
    assert!(!service.delete_event(target).unwrap());

    let names: Vec<_> = service
        .list_events()
        .unwrap()
        .into_iter()
        .map(|e| e.name)
        .collect();
    assert_eq!(names, vec!["a", "c"]);
    assert!(service.get_event(target).unwrap().is_none());
}

#[test]
fn service_can_own_the_store() {
    let service = EventService::new(EventStore::open_in_memory().unwrap());
    service
        .create_event(&NewEvent::new("Meetup", "2024-05-01", "Downtown"))
        .unwrap();

    let store = service.into_inner();
    assert_eq!(store.list().unwrap().len(), 1);
}

#[test]
fn malformed_identifier_text_is_rejected_before_the_store() {
    let err = "Meetup on 2024-05-01".parse::<EventId>().unwrap_err();
    assert!(err.to_string().contains("malformed event identifier"));
}
