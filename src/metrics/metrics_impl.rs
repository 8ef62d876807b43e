use crate::metrics::cell::MetricsCell;
use crate::metrics::snapshot::LruMetricsSnapshot;
use crate::metrics::traits::{CoreMetricsRecorder, LruMetricsReadRecorder, LruMetricsRecorder};

/// Counters carried by every `LruCache` when the `metrics` feature is on.
#[derive(Debug, Default)]
pub struct LruMetrics {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,
    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,
    pub evict_calls: u64,
    pub evicted_entries: u64,
    pub remove_calls: u64,
    pub remove_found: u64,
    pub pop_lru_calls: u64,
    pub pop_lru_found: u64,
    pub touch_calls: u64,
    pub touch_found: u64,
    pub clear_calls: u64,
    pub peek_calls: MetricsCell,
    pub peek_found: MetricsCell,
    pub peek_lru_calls: MetricsCell,
    pub peek_lru_found: MetricsCell,
    pub recency_rank_calls: MetricsCell,
    pub recency_rank_found: MetricsCell,
    pub recency_rank_scan_steps: MetricsCell,
}

impl LruMetrics {
    /// Copies every counter plus the given gauges into a snapshot.
    pub fn snapshot(&self, cache_len: usize, capacity: usize) -> LruMetricsSnapshot {
        LruMetricsSnapshot {
            get_calls: self.get_calls,
            get_hits: self.get_hits,
            get_misses: self.get_misses,
            insert_calls: self.insert_calls,
            insert_updates: self.insert_updates,
            insert_new: self.insert_new,
            evict_calls: self.evict_calls,
            evicted_entries: self.evicted_entries,
            remove_calls: self.remove_calls,
            remove_found: self.remove_found,
            pop_lru_calls: self.pop_lru_calls,
            pop_lru_found: self.pop_lru_found,
            touch_calls: self.touch_calls,
            touch_found: self.touch_found,
            clear_calls: self.clear_calls,
            peek_calls: self.peek_calls.get(),
            peek_found: self.peek_found.get(),
            peek_lru_calls: self.peek_lru_calls.get(),
            peek_lru_found: self.peek_lru_found.get(),
            recency_rank_calls: self.recency_rank_calls.get(),
            recency_rank_found: self.recency_rank_found.get(),
            recency_rank_scan_steps: self.recency_rank_scan_steps.get(),
            cache_len,
            capacity,
        }
    }
}

impl CoreMetricsRecorder for LruMetrics {
    fn record_get_hit(&mut self) {
        self.get_calls += 1;
        self.get_hits += 1;
    }

    fn record_get_miss(&mut self) {
        self.get_calls += 1;
        self.get_misses += 1;
    }

    fn record_insert_call(&mut self) {
        self.insert_calls += 1;
    }

    fn record_insert_new(&mut self) {
        self.insert_new += 1;
    }

    fn record_insert_update(&mut self) {
        self.insert_updates += 1;
    }

    fn record_evict_call(&mut self) {
        self.evict_calls += 1;
    }

    fn record_evicted_entry(&mut self) {
        self.evicted_entries += 1;
    }

    fn record_clear(&mut self) {
        self.clear_calls += 1;
    }
}

impl LruMetricsRecorder for LruMetrics {
    fn record_pop_lru_call(&mut self) {
        self.pop_lru_calls += 1;
    }

    fn record_pop_lru_found(&mut self) {
        self.pop_lru_found += 1;
    }

    fn record_touch_call(&mut self) {
        self.touch_calls += 1;
    }

    fn record_touch_found(&mut self) {
        self.touch_found += 1;
    }

    fn record_remove_call(&mut self) {
        self.remove_calls += 1;
    }

    fn record_remove_found(&mut self) {
        self.remove_found += 1;
    }
}

impl LruMetricsReadRecorder for LruMetrics {
    fn record_peek_call(&self) {
        self.peek_calls.incr();
    }

    fn record_peek_found(&self) {
        self.peek_found.incr();
    }

    fn record_peek_lru_call(&self) {
        self.peek_lru_calls.incr();
    }

    fn record_peek_lru_found(&self) {
        self.peek_lru_found.incr();
    }

    fn record_recency_rank_call(&self) {
        self.recency_rank_calls.incr();
    }

    fn record_recency_rank_found(&self) {
        self.recency_rank_found.incr();
    }

    fn record_recency_rank_scan_step(&self) {
        self.recency_rank_scan_steps.incr();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hits_and_misses_both_count_as_calls() {
        let mut metrics = LruMetrics::default();
        metrics.record_get_hit();
        metrics.record_get_miss();
        metrics.record_get_miss();

        let snap = metrics.snapshot(0, 4);
        assert_eq!(snap.get_calls, 3);
        assert_eq!(snap.get_hits, 1);
        assert_eq!(snap.get_misses, 2);
        assert_eq!(snap.capacity, 4);
    }

    #[test]
    fn read_recorder_works_through_shared_ref() {
        let metrics = LruMetrics::default();
        let shared = &metrics;
        shared.record_peek_call();
        shared.record_recency_rank_scan_step();
        shared.record_recency_rank_scan_step();

        let snap = metrics.snapshot(0, 1);
        assert_eq!(snap.peek_calls, 1);
        assert_eq!(snap.recency_rank_scan_steps, 2);
    }
}
