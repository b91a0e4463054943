//! Concurrent access to a shared store

#![allow(clippy::unwrap_used)] // Tests can unwrap
#![allow(clippy::expect_used)] // Tests can expect

use std::collections::HashSet;
use std::sync::Barrier;
use std::thread;
use todo_store_core::{ErrorKind, TodoId};
use todo_store_runtime::{StoreConfig, TodoEnvironment, TodoStore};
use todo_store_testing::test_environment;

const THREADS: usize = 8;

fn shared_store() -> TodoStore {
    TodoStore::with_config(test_environment(), StoreConfig::default().with_metrics(false))
}

#[test]
fn test_racing_completes_yield_exactly_one_success() {
    for _ in 0..50 {
        let store = shared_store();
        let todo = store.create("Contended", None).unwrap();
        let barrier = Barrier::new(THREADS);

        let outcomes: Vec<_> = thread::scope(|scope| {
            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    let store = store.clone();
                    let id = todo.id().clone();
                    let barrier = &barrier;
                    scope.spawn(move || {
                        barrier.wait();
                        store.complete(&id)
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let successes = outcomes.iter().filter(|r| r.is_ok()).count();
        assert_eq!(successes, 1);
        assert!(
            outcomes
                .iter()
                .filter_map(|r| r.as_ref().err())
                .all(|e| e.kind() == ErrorKind::InvalidState)
        );
        assert!(store.find_by_id(todo.id()).unwrap().is_completed());
    }
}

#[test]
fn test_racing_deletes_yield_exactly_one_success() {
    let store = shared_store();
    let todo = store.create("Delete me", None).unwrap();
    let barrier = Barrier::new(THREADS);

    let successes = thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let barrier = &barrier;
                let store = &store;
                let id = todo.id();
                scope.spawn(move || {
                    barrier.wait();
                    store.delete(id).is_ok()
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count()
    });

    assert_eq!(successes, 1);
    assert_eq!(store.count(), 0);
}

#[test]
fn test_parallel_creates_produce_unique_ids() {
    let store = TodoStore::with_config(
        TodoEnvironment::production(),
        StoreConfig::default().with_metrics(false),
    );
    let per_thread = 100;

    let ids: Vec<TodoId> = thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|t| {
                let store = &store;
                scope.spawn(move || {
                    (0..per_thread)
                        .map(|i| store.create(&format!("t{t}-{i}"), None).unwrap().id().clone())
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect()
    });

    let unique: HashSet<_> = ids.iter().collect();
    assert_eq!(unique.len(), THREADS * per_thread);
    assert_eq!(store.count(), THREADS * per_thread);
}

#[test]
fn test_mixed_operations_on_independent_ids() {
    let store = shared_store();
    let todos: Vec<_> = (0..THREADS)
        .map(|i| store.create(&format!("Todo {i}"), None).unwrap())
        .collect();

    thread::scope(|scope| {
        for (i, todo) in todos.iter().enumerate() {
            let store = &store;
            scope.spawn(move || {
                for _ in 0..25 {
                    store.complete(todo.id()).unwrap();
                    store.uncomplete(todo.id()).unwrap();
                }
                if i % 2 == 0 {
                    store.delete(todo.id()).unwrap();
                } else {
                    store.update(todo.id(), "Kept", Some("updated")).unwrap();
                }
            });
        }
    });

    assert_eq!(store.count(), THREADS / 2);
    assert!(store.find_all().iter().all(|t| t.title().as_str() == "Kept"));
    assert_eq!(store.completed_count(), 0);
}
