//! Engine error taxonomy.
//!
//! Every variant here is recoverable: a failed append degrades to a no-op,
//! a bad line is skipped during a scan, an implausible value is excluded from
//! the mean. Nothing in this module aborts the process.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// The backing file could not be opened. Writes report this and no-op;
    /// reads behave as an empty store.
    #[error("record store unavailable at {}: {source}", path.display())]
    StoreUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A write to an already-open store failed.
    #[error("record store write failed at {}: {source}", path.display())]
    StoreWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A scanned line does not parse as a record. Skipped, never fatal.
    #[error("malformed record line: {reason}")]
    MalformedRecord { reason: String },

    /// A parsed record carries a value outside the plausible physical range.
    #[error("out-of-range {field}: {value}")]
    OutOfRangeValue { field: &'static str, value: f64 },

    /// The sensor reported NaN for at least one field.
    #[error("sensor returned an invalid reading")]
    InvalidSensorReading,
}

impl EngineError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        EngineError::MalformedRecord {
            reason: reason.into(),
        }
    }
}
