use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for metrics recorded through `&self` (peeks, rank scans).
///
/// Read paths may run under a shared lock, so increments are atomic.
/// `Relaxed` is enough: counters are observational and never order other
/// memory accesses.
#[repr(transparent)]
#[derive(Debug, Default)]
pub struct MetricsCell(AtomicU64);

impl MetricsCell {
    #[inline]
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    #[inline]
    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn incr(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn reset(&self) {
        self.0.store(0, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incr_and_reset() {
        let cell = MetricsCell::new();
        cell.incr();
        cell.incr();
        assert_eq!(cell.get(), 2);
        cell.reset();
        assert_eq!(cell.get(), 0);
    }
}
