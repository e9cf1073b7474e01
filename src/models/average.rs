//! Aggregation result data model.

use serde::{Deserialize, Serialize};

/// Outcome of averaging one aggregation window (or a week of them).
///
/// `is_valid == false` means no qualifying records were found; all numeric
/// fields are NaN in that case so stale values can never leak into display.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AverageResult {
    pub temperature: f64,
    pub humidity: f64,
    pub pressure: f64,
    pub is_valid: bool,
}

impl AverageResult {
    pub fn new(temperature: f64, humidity: f64, pressure: f64) -> Self {
        Self {
            temperature,
            humidity,
            pressure,
            is_valid: true,
        }
    }

    /// The explicit "no data" marker.
    pub fn invalid() -> Self {
        Self {
            temperature: f64::NAN,
            humidity: f64::NAN,
            pressure: f64::NAN,
            is_valid: false,
        }
    }
}
