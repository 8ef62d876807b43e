//! Operation counters for [`LruCache`](crate::policy::lru::LruCache),
//! compiled in with the `metrics` feature.

pub mod cell;
pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;

pub use exporter::PrometheusTextExporter;
pub use metrics_impl::LruMetrics;
pub use snapshot::LruMetricsSnapshot;
