//! External collaborators: the clock and the sensor.
//!
//! The engine treats both as read-only oracles behind capability traits and
//! never owns or mutates the underlying device. The binary wires in the
//! system clock and a simulated sensor; tests substitute scripted ones.

use chrono::{Local, NaiveDateTime};
use rand::Rng;

use crate::models::SensorSample;

pub trait ClockSource: Send + Sync {
    /// Current wall-clock date and time. Monotonic and always valid once the
    /// process is up; start-up without a working clock is a precondition
    /// enforced by the caller, not here.
    fn now(&self) -> NaiveDateTime;
}

pub trait SensorSource: Send + Sync {
    /// Fresh instantaneous reading. May legitimately come back invalid.
    fn read(&self) -> SensorSample;
}

/// Local wall time, the stand-in for the original's battery-backed RTC.
pub struct SystemClock;

impl ClockSource for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Plausible indoor readings with a little jitter, so the full write path is
/// exercisable without the physical sensor attached.
pub struct SimulatedSensor {
    temperature: f64,
    humidity: f64,
    pressure: f64,
}

impl SimulatedSensor {
    pub fn new() -> Self {
        Self {
            temperature: 21.0,
            humidity: 45.0,
            pressure: 1013.0,
        }
    }
}

impl Default for SimulatedSensor {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorSource for SimulatedSensor {
    fn read(&self) -> SensorSample {
        let mut rng = rand::thread_rng();
        SensorSample::new(
            self.temperature + rng.gen_range(-0.5..0.5),
            (self.humidity + rng.gen_range(-2.0..2.0)).clamp(0.0, 100.0),
            self.pressure + rng.gen_range(-1.0..1.0),
        )
    }
}
