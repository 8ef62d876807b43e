//! # Metrics Trait Hierarchy
//!
//! Recording, snapshotting and export are separate traits so the cache core
//! only ever writes counters and never knows who reads them.
//!
//! ```text
//!   ┌─────────────────────────────┐
//!   │     CoreMetricsRecorder     │   get hit/miss, insert, evict, clear
//!   └──────────────┬──────────────┘
//!                  │
//!                  ▼
//!   ┌─────────────────────────────┐   ┌─────────────────────────────┐
//!   │     LruMetricsRecorder      │   │   LruMetricsReadRecorder    │
//!   │  pop_lru, touch, remove     │   │  peek, peek_lru, rank scans │
//!   │  (&mut self)                │   │  (&self, interior counters) │
//!   └─────────────────────────────┘   └─────────────────────────────┘
//!
//!   Consumption (decoupled from recording):
//!   ┌──────────────────────────────┐    ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>   │    │ MetricsExporter<S>           │
//!   │ (bench/test)                 │    │ (production monitoring)      │
//!   └──────────────────────────────┘    └──────────────────────────────┘
//! ```

/// Common counters for any cache policy.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_insert_call(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    fn record_evict_call(&mut self);
    fn record_evicted_entry(&mut self);
    fn record_clear(&mut self);
}

/// Metrics for LRU behavior (recency order).
pub trait LruMetricsRecorder: CoreMetricsRecorder {
    fn record_pop_lru_call(&mut self);
    fn record_pop_lru_found(&mut self);
    fn record_touch_call(&mut self);
    fn record_touch_found(&mut self);
    fn record_remove_call(&mut self);
    fn record_remove_found(&mut self);
}

/// Read-only LRU metrics for `&self` methods (uses interior mutability).
pub trait LruMetricsReadRecorder {
    fn record_peek_call(&self);
    fn record_peek_found(&self);
    fn record_peek_lru_call(&self);
    fn record_peek_lru_found(&self);
    fn record_recency_rank_call(&self);
    fn record_recency_rank_found(&self);
    fn record_recency_rank_scan_step(&self);
}

/// Produce a point-in-time copy of the counters.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Export/publish metrics to production monitoring backends.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
