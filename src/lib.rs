//! Hourly environmental logger: an append-only record store, an
//! at-most-once-per-hour write trigger, and trailing daily/weekly averages
//! recomputed by scanning the store on demand.

pub mod aggregation;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod models;
pub mod screens;
pub mod sensing;
pub mod settings;
pub mod sources;
pub mod store;
mod utils;

pub use aggregation::ValidRanges;
pub use engine::Engine;
pub use error::EngineError;
pub use metrics::{EngineMetrics, MetricsSnapshot};
pub use models::{AverageResult, Record, SensorSample};
pub use screens::{Screen, ScreenView};
pub use sensing::{HourlyTrigger, LoggingController};
pub use settings::{LoggerSettings, SettingsStore};
pub use sources::{ClockSource, SensorSource, SimulatedSensor, SystemClock};
pub use store::RecordStore;
