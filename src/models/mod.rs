mod average;
mod record;
mod sample;

pub use average::AverageResult;
pub use record::{Record, RECORD_HEADER};
pub use sample::SensorSample;
