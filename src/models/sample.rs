//! Sensor sample data model.
//!
//! Represents one instantaneous reading from the environmental sensor.
//! Samples are read-compute-discard: they are never persisted directly but
//! translated into a `Record` when the hourly trigger fires.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SensorSample {
    pub temperature: f64,
    pub humidity: f64,
    pub pressure: f64,
    pub is_valid: bool,
}

impl SensorSample {
    /// Build a sample from raw readings. The validity flag is derived: a
    /// sample is invalid as soon as any field is NaN.
    pub fn new(temperature: f64, humidity: f64, pressure: f64) -> Self {
        let is_valid = !(temperature.is_nan() || humidity.is_nan() || pressure.is_nan());
        Self {
            temperature,
            humidity,
            pressure,
            is_valid,
        }
    }

    /// The explicit "sensor failed" sample.
    pub fn invalid() -> Self {
        Self {
            temperature: f64::NAN,
            humidity: f64::NAN,
            pressure: f64::NAN,
            is_valid: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_in_any_field_invalidates_the_sample() {
        assert!(SensorSample::new(21.0, 45.0, 1013.0).is_valid);
        assert!(!SensorSample::new(f64::NAN, 45.0, 1013.0).is_valid);
        assert!(!SensorSample::new(21.0, f64::NAN, 1013.0).is_valid);
        assert!(!SensorSample::new(21.0, 45.0, f64::NAN).is_valid);
        assert!(!SensorSample::invalid().is_valid);
    }
}
