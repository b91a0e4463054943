//! Simple CLI demo for the todo store.
//!
//! Walks through the store operations, prints the todo list after each step,
//! then dumps a snapshot and the Prometheus metrics collected along the way.
//!
//! Set `RUST_LOG=debug` to see every command the store applies or rejects.

use anyhow::Context;
use todo_store_core::Todo;
use todo_store_runtime::metrics::MetricsExporter;
use todo_store_runtime::{TodoEnvironment, TodoStore};
use tracing_subscriber::EnvFilter;

fn print_todos(heading: &str, todos: &[Todo]) {
    println!("\n{heading}: {}", todos.len());
    for todo in todos {
        let status = if todo.is_completed() { "✓" } else { " " };
        match todo.description() {
            Some(description) => println!("  [{status}] {} ({description})", todo.title()),
            None => println!("  [{status}] {}", todo.title()),
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut exporter = MetricsExporter::new();
    exporter.install().context("installing metrics exporter")?;

    println!("=== Todo Store Demo ===");

    let store = TodoStore::new(TodoEnvironment::production());

    tracing::info!("Creating todos");
    let milk = store.create("Buy milk", Some("2 litres, semi-skimmed"))?;
    let docs = store.create("Write documentation", None)?;
    let deploy = store.create("Deploy to production", None)?;
    print_todos("Todos created", &store.find_all());

    // Rejected input never reaches the store
    if let Err(error) = store.create("   ", None) {
        tracing::warn!(%error, "Rejected blank title");
    }

    tracing::info!(id = %milk.id(), "Completing 'Buy milk'");
    store.complete(milk.id())?;
    if let Err(error) = store.complete(milk.id()) {
        tracing::warn!(%error, "Completing it again");
    }

    tracing::info!(id = %docs.id(), "Renaming 'Write documentation'");
    store.update(docs.id(), "Write better documentation", Some("API and examples"))?;

    print_todos("Completed", &store.find_completed());
    print_todos("Pending", &store.find_pending());
    println!("\nCompleted: {}/{}", store.completed_count(), store.count());

    tracing::info!(id = %deploy.id(), "Deleting 'Deploy to production'");
    store.delete(deploy.id())?;
    if let Err(error) = store.delete(deploy.id()) {
        tracing::warn!(%error, "Deleting it again");
    }
    print_todos("Final todos", &store.find_all());

    println!("\nSnapshot:");
    store
        .snapshot()
        .to_writer(std::io::stdout().lock())
        .context("writing snapshot")?;
    println!();

    if let Some(text) = exporter.render() {
        println!("\nMetrics:\n{text}");
    }

    println!("=== Demo Complete ===");
    Ok(())
}
