use std::cell::RefCell;
use std::rc::Rc;

use serde_json::json;
use widget_rs::core::{FieldKind, PropertyStore};

#[test]
fn seeded_fields_start_plain() {
    let mut store = PropertyStore::new();
    store.seed("name", json!("World"), FieldKind::Plain);

    assert!(store.contains("name"));
    assert!(!store.is_watched("name"));
    assert_eq!(store.get("name"), Some(&json!("World")));
}

#[test]
fn register_marks_plain_fields_watched() {
    let mut store = PropertyStore::new();
    store.seed("name", json!("World"), FieldKind::Plain);

    assert!(store.register("name"));
    assert!(store.is_watched("name"));
}

#[test]
fn register_is_idempotent() {
    let mut store = PropertyStore::new();
    store.seed("name", json!("World"), FieldKind::Plain);

    assert!(store.register("name"));
    assert!(store.register("name"));
    assert!(store.is_watched("name"));
}

#[test]
fn register_skips_computed_and_unknown_names_silently() {
    let mut store = PropertyStore::new();
    store.seed("derived", json!(10), FieldKind::Computed);

    assert!(!store.register("derived"));
    assert!(!store.register("absent"));
    assert!(!store.is_watched("derived"));
    assert!(!store.contains("absent"));
}

#[test]
fn watched_writes_notify_subscribers_after_the_store() {
    let mut store = PropertyStore::new();
    store.seed("count", json!(0), FieldKind::Plain);
    store.register("count");

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    store.subscribe(move |name, value| {
        sink.borrow_mut().push((name.to_owned(), value.clone()));
    });

    assert!(store.write("count", json!(5)));
    assert_eq!(store.get("count"), Some(&json!(5)));
    assert_eq!(*seen.borrow(), vec![("count".to_owned(), json!(5))]);
}

#[test]
fn plain_writes_do_not_notify() {
    let mut store = PropertyStore::new();
    store.seed("quiet", json!("a"), FieldKind::Plain);

    let seen = Rc::new(RefCell::new(0_u32));
    let sink = seen.clone();
    store.subscribe(move |_, _| *sink.borrow_mut() += 1);

    assert!(!store.write("quiet", json!("b")));
    assert_eq!(*seen.borrow(), 0);
    assert_eq!(store.get("quiet"), Some(&json!("b")));
}

#[test]
fn unknown_writes_create_plain_slots() {
    let mut store = PropertyStore::new();
    assert!(!store.write("fresh", json!(1)));
    assert!(store.contains("fresh"));
    assert!(!store.is_watched("fresh"));
}

#[test]
fn seeding_again_keeps_watched_status() {
    let mut store = PropertyStore::new();
    store.seed("name", json!("a"), FieldKind::Plain);
    store.register("name");
    store.seed("name", json!("b"), FieldKind::Plain);

    assert!(store.is_watched("name"));
    assert_eq!(store.get("name"), Some(&json!("b")));
}

#[test]
fn names_iterate_in_insertion_order() {
    let mut store = PropertyStore::new();
    store.seed("zulu", json!(1), FieldKind::Plain);
    store.seed("alpha", json!(2), FieldKind::Plain);
    store.seed("mike", json!(3), FieldKind::Plain);

    let names: Vec<&str> = store.names().collect();
    assert_eq!(names, ["zulu", "alpha", "mike"]);
    assert_eq!(store.len(), 3);
    assert!(!store.is_empty());
}
