//! Behaviour of the todo store through the testing harness

#![allow(clippy::unwrap_used)] // Tests can unwrap
#![allow(clippy::expect_used)] // Tests can expect

use todo_store_core::{TodoError, TodoId, TodoStatus, ValidationError};
use todo_store_runtime::TodoStore;
use todo_store_testing::{
    StoreTest, assertions, completed_record, init_test_tracing, pending_record, test_environment,
};

fn id(raw: &str) -> TodoId {
    TodoId::parse(raw).unwrap()
}

#[test]
fn test_create_buy_groceries() {
    init_test_tracing();
    let store = TodoStore::new(test_environment());

    let todo = store
        .create("Buy groceries", Some("Milk, bread, eggs"))
        .unwrap();

    assert!(!todo.id().as_str().is_empty());
    assert_eq!(todo.title().as_str(), "Buy groceries");
    assert_eq!(todo.description().unwrap().as_str(), "Milk, bread, eggs");
    assert!(!todo.is_completed());
    assert_eq!(todo.created_at(), todo.updated_at());
}

#[test]
fn test_create_rejects_empty_and_oversized_titles() {
    StoreTest::new()
        .when(|store| store.create("", Some("x")))
        .then_result(|result| {
            assert_eq!(
                result.as_ref().unwrap_err(),
                &TodoError::Validation(ValidationError::EmptyTitle)
            );
        })
        .run();

    StoreTest::new()
        .when(|store| store.create(&"a".repeat(201), Some("x")))
        .then_result(assertions::assert_validation)
        .then_store(|store| assert_eq!(store.count(), 0))
        .run();
}

#[test]
fn test_create_accepts_boundary_lengths() {
    StoreTest::new()
        .when(|store| store.create(&"a".repeat(200), Some(&"d".repeat(1000))))
        .then_result(assertions::assert_ok)
        .run();
}

#[test]
fn test_description_normalization() {
    let store = TodoStore::new(test_environment());

    let empty = store.create("Empty", Some("")).unwrap();
    assert!(empty.description().is_none());

    let absent = store.create("Absent", None).unwrap();
    assert_eq!(empty.description(), absent.description());

    let blank = store.create("Blank", Some("   ")).unwrap();
    assert_eq!(blank.description().unwrap().as_str(), "   ");
}

#[test]
fn test_complete_twice() {
    let target = id("a");
    let again = target.clone();

    StoreTest::new()
        .given_todos([pending_record("a", "Task")])
        .when(move |store| {
            store.complete(&target)?;
            store.complete(&target)
        })
        .then_result(move |result| {
            assert_eq!(
                result.as_ref().unwrap_err(),
                &TodoError::InvalidState {
                    id: again,
                    status: TodoStatus::Completed,
                }
            );
        })
        .then_store(|store| {
            assert!(store.find_by_id(&id("a")).unwrap().is_completed());
        })
        .run();
}

#[test]
fn test_uncomplete_reverts_to_pending() {
    let target = id("a");
    StoreTest::new()
        .given_todos([completed_record("a", "Task")])
        .when(move |store| store.uncomplete(&target))
        .then_result(|result| {
            let todo = result.as_ref().unwrap();
            assert_eq!(todo.status(), TodoStatus::Pending);
            assert!(todo.updated_at() > todo.created_at());
        })
        .run();
}

#[test]
fn test_uncomplete_pending_fails() {
    let target = id("a");
    StoreTest::new()
        .given_todos([pending_record("a", "Task")])
        .when(move |store| store.uncomplete(&target))
        .then_result(assertions::assert_invalid_state)
        .then_store(|store| assert_eq!(store.find_pending().len(), 1))
        .run();
}

#[test]
fn test_delete_then_find() {
    let target = id("a");
    StoreTest::new()
        .given_todos([pending_record("a", "Task")])
        .when(move |store| store.delete(&target))
        .then_result(assertions::assert_ok)
        .then_store(|store| {
            assert!(store.find_by_id(&id("a")).is_none());
            assert!(!store.exists_by_id(&id("a")));
            assert!(matches!(
                store.delete(&id("a")),
                Err(TodoError::NotFound(_))
            ));
        })
        .run();
}

#[test]
fn test_find_by_completed_splits_by_status() {
    let store = TodoStore::new(test_environment());
    let first = store.create("First", None).unwrap();
    let second = store.create("Second", None).unwrap();
    let third = store.create("Third", None).unwrap();

    store.complete(first.id()).unwrap();
    store.complete(third.id()).unwrap();

    let completed: Vec<TodoId> = store
        .find_by_completed(true)
        .iter()
        .map(|t| t.id().clone())
        .collect();
    assert_eq!(completed, vec![first.id().clone(), third.id().clone()]);

    let pending = store.find_by_completed(false);
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id(), second.id());

    assert_eq!(store.find_all().len(), 3);
    assert_eq!(store.find_completed(), store.find_by_completed(true));
}

#[test]
fn test_update_missing_fails() {
    let target = id("ghost");
    StoreTest::new()
        .given_todos([pending_record("a", "Task")])
        .when(move |store| store.update(&target, "Title", None))
        .then_result(assertions::assert_not_found)
        .run();
}

#[test]
fn test_update_never_partially_applies() {
    let target = id("a");
    StoreTest::new()
        .given_todos([pending_record("a", "Original")])
        .when(move |store| store.update(&target, "Changed", Some(&"d".repeat(1001))))
        .then_result(assertions::assert_validation)
        .then_store(|store| {
            let todo = store.find_by_id(&id("a")).unwrap();
            assert_eq!(todo.title().as_str(), "Original");
            assert!(todo.description().is_none());
            assert_eq!(todo.created_at(), todo.updated_at());
        })
        .run();
}

#[test]
fn test_update_replaces_both_fields() {
    let target = id("a");
    StoreTest::new()
        .given_todos([pending_record("a", "Original")])
        .when(move |store| store.update(&target, "Changed", Some("now with details")))
        .then_result(|result| {
            let todo = result.as_ref().unwrap();
            assert_eq!(todo.title().as_str(), "Changed");
            assert_eq!(todo.description().unwrap().as_str(), "now with details");
            assert!(todo.updated_at() > todo.created_at());
        })
        .run();
}

#[test]
fn test_blank_id_is_a_validation_error() {
    assert_eq!(TodoId::parse("  "), Err(ValidationError::EmptyId));
}
