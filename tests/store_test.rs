//! Store CRUD integration tests against in-memory SQLite

use beanboard::store::beans::{self, BeanInput};
use beanboard::store::BeanDb;

fn input(class: &str, area: f64) -> BeanInput {
    BeanInput {
        bean_class: class.to_string(),
        area,
        perimeter: 610.291,
        major_axis_length: 208.178,
        minor_axis_length: 173.889,
        ..Default::default()
    }
}

#[test]
fn create_then_get_round_trip() {
    let db = BeanDb::open_in_memory().unwrap();

    let created = db
        .with_conn(|conn| beans::create_bean(conn, &input("SEKER", 28395.0)))
        .unwrap();
    assert!(created.id > 0);
    assert_eq!(created.bean_class, "SEKER");
    assert!(!created.created_at.is_empty());
    assert_eq!(created.created_at, created.updated_at);

    let fetched = db
        .with_conn(|conn| beans::get_bean(conn, created.id))
        .unwrap()
        .expect("bean should exist");
    assert_eq!(fetched, created);
}

#[test]
fn get_missing_bean_is_none() {
    let db = BeanDb::open_in_memory().unwrap();
    let missing = db.with_conn(|conn| beans::get_bean(conn, 999)).unwrap();
    assert!(missing.is_none());
}

#[test]
fn list_returns_all_rows_in_id_order() {
    let db = BeanDb::open_in_memory().unwrap();

    for (class, area) in [("SEKER", 100.0), ("BOMBAY", 200.0), ("HOROZ", 150.0)] {
        db.with_conn(|conn| beans::create_bean(conn, &input(class, area)))
            .unwrap();
    }

    let all = db.with_conn(beans::list_beans).unwrap();
    assert_eq!(all.len(), 3);
    let ids: Vec<_> = all.iter().map(|b| b.id).collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted);
}

#[test]
fn update_replaces_all_fields() {
    let db = BeanDb::open_in_memory().unwrap();

    let mut original = input("SEKER", 100.0);
    original.solidity = Some(0.989);
    let created = db
        .with_conn(|conn| beans::create_bean(conn, &original))
        .unwrap();
    assert_eq!(created.solidity, Some(0.989));

    // Replacement input without solidity: the optional goes back to NULL
    let replacement = input("BOMBAY", 999.0);
    let updated = db
        .with_conn(|conn| beans::update_bean(conn, created.id, &replacement))
        .unwrap()
        .expect("bean should exist");

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.bean_class, "BOMBAY");
    assert_eq!(updated.area, 999.0);
    assert_eq!(updated.solidity, None, "update is a replace, not a merge");
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);
}

#[test]
fn update_missing_bean_is_none() {
    let db = BeanDb::open_in_memory().unwrap();
    let result = db
        .with_conn(|conn| beans::update_bean(conn, 42, &input("SEKER", 1.0)))
        .unwrap();
    assert!(result.is_none());
}

#[test]
fn delete_removes_the_row() {
    let db = BeanDb::open_in_memory().unwrap();

    let created = db
        .with_conn(|conn| beans::create_bean(conn, &input("SEKER", 100.0)))
        .unwrap();

    let deleted = db
        .with_conn(|conn| beans::delete_bean(conn, created.id))
        .unwrap();
    assert!(deleted);

    let gone = db
        .with_conn(|conn| beans::get_bean(conn, created.id))
        .unwrap();
    assert!(gone.is_none());

    // Second delete reports nothing removed
    let again = db
        .with_conn(|conn| beans::delete_bean(conn, created.id))
        .unwrap();
    assert!(!again);
}

#[test]
fn ids_are_never_reused_after_delete() {
    let db = BeanDb::open_in_memory().unwrap();

    let first = db
        .with_conn(|conn| beans::create_bean(conn, &input("SEKER", 1.0)))
        .unwrap();
    let second = db
        .with_conn(|conn| beans::create_bean(conn, &input("BOMBAY", 2.0)))
        .unwrap();
    assert!(second.id > first.id);

    db.with_conn(|conn| beans::delete_bean(conn, second.id))
        .unwrap();

    let third = db
        .with_conn(|conn| beans::create_bean(conn, &input("HOROZ", 3.0)))
        .unwrap();
    assert!(
        third.id > second.id,
        "a deleted id must not be handed out again"
    );
}

#[test]
fn validation_rejects_nan_and_blank_class() {
    let mut nan_input = input("SEKER", f64::NAN);
    assert!(nan_input.validate().is_err());
    nan_input.area = 1.0;
    assert!(nan_input.validate().is_ok());

    let blank = input("   ", 1.0);
    assert!(blank.validate().is_err());
}

#[test]
fn bulk_create_collects_row_errors() {
    let db = BeanDb::open_in_memory().unwrap();

    let rows = vec![
        input("SEKER", 100.0),
        input("", 200.0),          // blank class
        input("BOMBAY", f64::NAN), // NaN area
        input("HOROZ", 300.0),
    ];

    let result = db
        .with_conn_mut(|conn| beans::bulk_create_beans(conn, rows))
        .unwrap();
    assert_eq!(result.inserted, 2);
    assert_eq!(result.errors.len(), 2);

    let stats = db.stats().unwrap();
    assert_eq!(stats.bean_count, 2);
    assert_eq!(stats.class_count, 2);
}

#[test]
fn database_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("beans.db");

    {
        let db = BeanDb::open(&path).unwrap();
        db.with_conn(|conn| beans::create_bean(conn, &input("SEKER", 100.0)))
            .unwrap();
    }

    let db = BeanDb::open(&path).unwrap();
    let all = db.with_conn(beans::list_beans).unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].bean_class, "SEKER");
}
