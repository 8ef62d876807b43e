use std::io::Write;
use std::sync::Mutex;

use crate::metrics::snapshot::LruMetricsSnapshot;
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for cache metrics snapshots.
///
/// Writes the text exposition format so the output can be scraped by
/// Prometheus or forwarded to an OpenTelemetry collector.
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send + Sync> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send + Sync> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_metric(&self, kind: &str, suffix: &str, value: u64) {
        let name = self.metric_name(suffix);
        let mut writer = self
            .writer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        // Export is best-effort; a failed write must not disturb the cache.
        let _ = writeln!(writer, "# TYPE {} {}", name, kind);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn write_counter(&self, suffix: &str, value: u64) {
        self.write_metric("counter", suffix, value);
    }

    fn write_gauge(&self, suffix: &str, value: u64) {
        self.write_metric("gauge", suffix, value);
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send + Sync> MetricsExporter<LruMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &LruMetricsSnapshot) {
        let counters = [
            ("get_calls_total", snapshot.get_calls),
            ("get_hits_total", snapshot.get_hits),
            ("get_misses_total", snapshot.get_misses),
            ("insert_calls_total", snapshot.insert_calls),
            ("insert_updates_total", snapshot.insert_updates),
            ("insert_new_total", snapshot.insert_new),
            ("evict_calls_total", snapshot.evict_calls),
            ("evicted_entries_total", snapshot.evicted_entries),
            ("remove_calls_total", snapshot.remove_calls),
            ("remove_found_total", snapshot.remove_found),
            ("pop_lru_calls_total", snapshot.pop_lru_calls),
            ("pop_lru_found_total", snapshot.pop_lru_found),
            ("touch_calls_total", snapshot.touch_calls),
            ("touch_found_total", snapshot.touch_found),
            ("clear_calls_total", snapshot.clear_calls),
            ("peek_calls_total", snapshot.peek_calls),
            ("peek_found_total", snapshot.peek_found),
            ("peek_lru_calls_total", snapshot.peek_lru_calls),
            ("peek_lru_found_total", snapshot.peek_lru_found),
            ("recency_rank_calls_total", snapshot.recency_rank_calls),
            ("recency_rank_found_total", snapshot.recency_rank_found),
            ("recency_rank_scan_steps_total", snapshot.recency_rank_scan_steps),
        ];
        for (suffix, value) in counters {
            self.write_counter(suffix, value);
        }

        self.write_gauge("cache_len", snapshot.cache_len as u64);
        self.write_gauge("capacity", snapshot.capacity as u64);
    }
}
