use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub append_count: u64,
    pub append_failure_count: u64,
    pub scan_count: u64,
    pub malformed_line_count: u64,
    pub out_of_range_count: u64,
}
