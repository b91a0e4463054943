//! Prometheus metrics for the todo store.
//!
//! The store records, per operation, how often it ran, whether it succeeded
//! and how long it took, plus a gauge with the number of stored todos:
//!
//! - `todo_store_operations_total{operation, outcome}`
//! - `todo_store_operation_duration_seconds{operation}`
//! - `todo_store_todos`
//!
//! Recording goes through the `metrics` facade, so nothing is collected until
//! a recorder is installed.
//!
//! # Example
//!
//! ```rust,no_run
//! use todo_store_runtime::metrics::MetricsExporter;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut exporter = MetricsExporter::new();
//! exporter.install()?;
//!
//! // ... use stores ...
//!
//! if let Some(text) = exporter.render() {
//!     println!("{text}");
//! }
//! # Ok(())
//! # }
//! ```

use metrics::{describe_counter, describe_gauge, describe_histogram};
use metrics_exporter_prometheus::{
    Matcher, PrometheusBuilder, PrometheusHandle, PrometheusRecorder,
};
use std::time::Duration;
use thiserror::Error;

// Re-export metrics macros for use in other modules
pub use metrics::{counter, gauge, histogram};

/// Counter of store operations, labelled by `operation` and `outcome`.
pub const OPERATIONS_TOTAL: &str = "todo_store_operations_total";

/// Histogram of store operation latency, labelled by `operation`.
pub const OPERATION_DURATION_SECONDS: &str = "todo_store_operation_duration_seconds";

/// Gauge holding the number of todos in the store.
pub const TODOS: &str = "todo_store_todos";

/// Errors from metrics operations.
#[derive(Error, Debug)]
pub enum MetricsError {
    /// Failed to build metrics exporter
    #[error("Failed to build metrics exporter: {0}")]
    Build(String),
    /// Failed to install metrics exporter
    #[error("Failed to install metrics exporter: {0}")]
    Install(String),
}

/// Prometheus exporter for store metrics.
///
/// Renders the Prometheus text format on demand; serving it over HTTP is left
/// to the embedding application.
#[derive(Default)]
pub struct MetricsExporter {
    handle: Option<PrometheusHandle>,
}

impl MetricsExporter {
    /// Create an exporter that has not been installed yet.
    #[must_use]
    pub const fn new() -> Self {
        Self { handle: None }
    }

    /// Register metric descriptions and install the global recorder.
    ///
    /// # Errors
    ///
    /// Returns error if the exporter cannot be built or installed.
    ///
    /// # Note
    ///
    /// If a global recorder is already installed (e.g., by another test), the
    /// call succeeds but [`Self::render`] keeps returning `None`.
    pub fn install(&mut self) -> Result<(), MetricsError> {
        register_metrics();

        let builder = builder()?;
        match builder.install_recorder() {
            Ok(handle) => {
                self.handle = Some(handle);
                tracing::info!("Metrics recorder installed");
                Ok(())
            }
            Err(e) => {
                let err_msg = e.to_string();
                if err_msg.contains("already initialized") {
                    tracing::warn!(
                        "Metrics recorder already initialized, skipping re-initialization"
                    );
                    Ok(())
                } else {
                    Err(MetricsError::Install(err_msg))
                }
            }
        }
    }

    /// Get the metrics handle for rendering.
    #[must_use]
    pub const fn handle(&self) -> Option<&PrometheusHandle> {
        self.handle.as_ref()
    }

    /// Render current metrics in Prometheus format.
    ///
    /// Returns `None` if the exporter hasn't been installed.
    #[must_use]
    pub fn render(&self) -> Option<String> {
        self.handle.as_ref().map(PrometheusHandle::render)
    }
}

/// Build a recorder without installing it globally.
///
/// Pair with [`metrics::with_local_recorder`] to scope collection to one
/// closure, which keeps parallel tests from seeing each other's numbers.
///
/// # Errors
///
/// Returns error if the histogram bucket configuration is rejected.
pub fn local_recorder() -> Result<PrometheusRecorder, MetricsError> {
    Ok(builder()?.build_recorder())
}

fn builder() -> Result<PrometheusBuilder, MetricsError> {
    PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Suffix("duration_seconds".to_string()),
            &[
                0.000_001, 0.000_005, 0.000_01, 0.000_05, 0.000_1, 0.000_5, 0.001, 0.005, 0.01,
            ],
        )
        .map_err(|e| MetricsError::Build(e.to_string()))
}

/// Register all metric descriptions.
pub fn register_metrics() {
    describe_counter!(
        OPERATIONS_TOTAL,
        "Total number of store operations, by operation and outcome"
    );
    describe_histogram!(
        OPERATION_DURATION_SECONDS,
        "Time taken by store operations"
    );
    describe_gauge!(TODOS, "Number of todos currently stored");
}

/// Store metrics recorder.
pub struct StoreMetrics;

impl StoreMetrics {
    /// Record one finished operation.
    ///
    /// `outcome` is `"ok"` or an [`ErrorKind`](todo_store_core::ErrorKind) label.
    pub fn record_operation(operation: &'static str, outcome: &'static str, duration: Duration) {
        counter!(OPERATIONS_TOTAL, "operation" => operation, "outcome" => outcome).increment(1);
        histogram!(OPERATION_DURATION_SECONDS, "operation" => operation)
            .record(duration.as_secs_f64());
    }

    /// Record the current number of stored todos.
    pub fn record_size(count: usize) {
        // Note: Precision loss acceptable for metrics (counts < 2^52)
        #[allow(clippy::cast_precision_loss)]
        gauge!(TODOS).set(count as f64);
    }
}
