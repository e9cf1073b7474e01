use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::Record;

/// Plausible physical bounds for stored values, with tunable thresholds.
///
/// Anything outside these bounds is treated like a parse failure for
/// aggregation purposes: excluded and warned about, never counted as zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidRanges {
    /// Temperature bounds in °C, exclusive on both ends
    pub temperature_min: f64,
    pub temperature_max: f64,

    /// Relative humidity bounds in %, inclusive on both ends
    pub humidity_min: f64,
    pub humidity_max: f64,

    /// Pressure bounds in hPa, exclusive on both ends
    pub pressure_min: f64,
    pub pressure_max: f64,
}

impl Default for ValidRanges {
    fn default() -> Self {
        Self {
            temperature_min: -50.0,
            temperature_max: 100.0,
            humidity_min: 0.0,
            humidity_max: 100.0,
            pressure_min: 500.0,
            pressure_max: 1200.0,
        }
    }
}

impl ValidRanges {
    /// Check a record against the bounds. NaN fails every comparison, so
    /// invalid sensor readings that made it into the store are rejected here
    /// without a separate check.
    pub fn validate(&self, record: &Record) -> Result<(), EngineError> {
        if !(record.temperature > self.temperature_min
            && record.temperature < self.temperature_max)
        {
            return Err(EngineError::OutOfRangeValue {
                field: "temperature",
                value: record.temperature,
            });
        }
        if !(record.humidity >= self.humidity_min && record.humidity <= self.humidity_max) {
            return Err(EngineError::OutOfRangeValue {
                field: "humidity",
                value: record.humidity,
            });
        }
        if !(record.pressure > self.pressure_min && record.pressure < self.pressure_max) {
            return Err(EngineError::OutOfRangeValue {
                field: "pressure",
                value: record.pressure,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn record(temperature: f64, humidity: f64, pressure: f64) -> Record {
        Record {
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            temperature,
            humidity,
            pressure,
        }
    }

    #[test]
    fn accepts_in_range_values_and_humidity_endpoints() {
        let ranges = ValidRanges::default();
        assert!(ranges.validate(&record(21.0, 45.0, 1013.0)).is_ok());
        assert!(ranges.validate(&record(21.0, 0.0, 1013.0)).is_ok());
        assert!(ranges.validate(&record(21.0, 100.0, 1013.0)).is_ok());
    }

    #[test]
    fn rejects_boundary_and_outside_values() {
        let ranges = ValidRanges::default();
        assert!(ranges.validate(&record(-50.0, 45.0, 1013.0)).is_err());
        assert!(ranges.validate(&record(100.0, 45.0, 1013.0)).is_err());
        assert!(ranges.validate(&record(21.0, 100.1, 1013.0)).is_err());
        assert!(ranges.validate(&record(21.0, 45.0, 5000.0)).is_err());
        assert!(ranges.validate(&record(21.0, 45.0, 500.0)).is_err());
    }

    #[test]
    fn rejects_nan_in_any_field() {
        let ranges = ValidRanges::default();
        assert!(ranges.validate(&record(f64::NAN, 45.0, 1013.0)).is_err());
        assert!(ranges.validate(&record(21.0, f64::NAN, 1013.0)).is_err());
        assert!(ranges.validate(&record(21.0, 45.0, f64::NAN)).is_err());
    }
}
