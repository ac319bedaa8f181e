use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Request counters for monitoring
#[derive(Clone)]
pub struct Metrics {
    pub songs_saved: Arc<AtomicU64>,
    pub songs_updated: Arc<AtomicU64>,
    pub songs_deleted: Arc<AtomicU64>,
    pub lookups: Arc<AtomicU64>,
    pub request_errors: Arc<AtomicU64>,
    pub start_time: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            songs_saved: Arc::new(AtomicU64::new(0)),
            songs_updated: Arc::new(AtomicU64::new(0)),
            songs_deleted: Arc::new(AtomicU64::new(0)),
            lookups: Arc::new(AtomicU64::new(0)),
            request_errors: Arc::new(AtomicU64::new(0)),
            start_time: Instant::now(),
        }
    }

    pub fn inc_songs_saved(&self) {
        self.songs_saved.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_songs_updated(&self) {
        self.songs_updated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_songs_deleted(&self) {
        self.songs_deleted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_lookups(&self) {
        self.lookups.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_request_errors(&self) {
        self.request_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            songs_saved: self.songs_saved.load(Ordering::Relaxed),
            songs_updated: self.songs_updated.load(Ordering::Relaxed),
            songs_deleted: self.songs_deleted.load(Ordering::Relaxed),
            lookups: self.lookups.load(Ordering::Relaxed),
            request_errors: self.request_errors.load(Ordering::Relaxed),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Serialize)]
pub struct MetricsSnapshot {
    pub songs_saved: u64,
    pub songs_updated: u64,
    pub songs_deleted: u64,
    pub lookups: u64,
    pub request_errors: u64,
    pub uptime_seconds: u64,
}
