use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Usage counters for monitoring
#[derive(Clone)]
pub struct Metrics {
    pub records_created: Arc<AtomicU64>,
    pub records_updated: Arc<AtomicU64>,
    pub records_deleted: Arc<AtomicU64>,
    pub reorders: Arc<AtomicU64>,
    pub logins: Arc<AtomicU64>,
    pub start_time: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            records_created: Arc::new(AtomicU64::new(0)),
            records_updated: Arc::new(AtomicU64::new(0)),
            records_deleted: Arc::new(AtomicU64::new(0)),
            reorders: Arc::new(AtomicU64::new(0)),
            logins: Arc::new(AtomicU64::new(0)),
            start_time: Instant::now(),
        }
    }

    pub fn inc_records_created(&self) {
        self.records_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_records_updated(&self) {
        self.records_updated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_records_deleted(&self) {
        self.records_deleted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_reorders(&self) {
        self.reorders.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_logins(&self) {
        self.logins.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            records_created: self.records_created.load(Ordering::Relaxed),
            records_updated: self.records_updated.load(Ordering::Relaxed),
            records_deleted: self.records_deleted.load(Ordering::Relaxed),
            reorders: self.reorders.load(Ordering::Relaxed),
            logins: self.logins.load(Ordering::Relaxed),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
pub struct MetricsSnapshot {
    pub records_created: u64,
    pub records_updated: u64,
    pub records_deleted: u64,
    pub reorders: u64,
    pub logins: u64,
    pub uptime_seconds: u64,
}
