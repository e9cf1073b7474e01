mod types;

pub use types::MetricsSnapshot;

use std::sync::{Arc, Mutex};

/// Process-wide counters for the write and scan paths. Cheap to clone and
/// hand to the logging loop; purely diagnostic, never consulted by the
/// aggregation math.
#[derive(Clone, Default)]
pub struct EngineMetrics {
    inner: Arc<Mutex<MetricsSnapshot>>,
}

impl EngineMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_append(&self) {
        self.lock().append_count += 1;
    }

    pub fn record_append_failure(&self) {
        self.lock().append_failure_count += 1;
    }

    /// Fold in the skip counts observed by one full scan.
    pub fn record_scan(&self, malformed_lines: u64, out_of_range: u64) {
        let mut state = self.lock();
        state.scan_count += 1;
        state.malformed_line_count += malformed_lines;
        state.out_of_range_count += out_of_range;
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MetricsSnapshot> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
