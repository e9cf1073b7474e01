//! Record data model and line codec.
//!
//! A `Record` is the unit of persistence: one hourly observation with its
//! calendar date, wall time and the three physical values. The textual line
//! format is owned here so the write path and the scan path cannot drift
//! apart.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::SensorSample;

/// Header line written once when the store file is created.
pub const RECORD_HEADER: &str = "Date, Time, Temperature, Humidity, Pressure";

const FIELD_COUNT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub temperature: f64,
    pub humidity: f64,
    pub pressure: f64,
}

impl Record {
    /// Translate a sensor sample into a record stamped with the given clock
    /// reading. Invalid samples translate too: their NaN fields survive the
    /// round trip and are rejected later by range validation on read.
    pub fn from_sample(sample: &SensorSample, now: NaiveDateTime) -> Self {
        Self {
            date: now.date(),
            time: now.time(),
            temperature: sample.temperature,
            humidity: sample.humidity,
            pressure: sample.pressure,
        }
    }

    /// Serialize as one store line: `YYYY-MM-DD, HH:MM:SS, T.TT, H.HH, P.PP`
    /// (no trailing newline).
    pub fn format_line(&self) -> String {
        format!(
            "{}, {}, {:.2}, {:.2}, {:.2}",
            self.date.format("%Y-%m-%d"),
            self.time.format("%H:%M:%S"),
            self.temperature,
            self.humidity,
            self.pressure,
        )
    }

    /// Parse one store line back into a record.
    ///
    /// Tolerates whitespace variance around fields but not a different field
    /// count or order. Returns `MalformedRecord` on any deviation instead of
    /// panicking on odd input.
    pub fn parse_line(line: &str) -> Result<Self, EngineError> {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() != FIELD_COUNT {
            return Err(EngineError::malformed(format!(
                "expected {} fields, got {}",
                FIELD_COUNT,
                fields.len()
            )));
        }

        let date = NaiveDate::parse_from_str(fields[0], "%Y-%m-%d")
            .map_err(|err| EngineError::malformed(format!("bad date '{}': {err}", fields[0])))?;
        let time = NaiveTime::parse_from_str(fields[1], "%H:%M:%S")
            .map_err(|err| EngineError::malformed(format!("bad time '{}': {err}", fields[1])))?;

        let temperature = parse_value(fields[2], "temperature")?;
        let humidity = parse_value(fields[3], "humidity")?;
        let pressure = parse_value(fields[4], "pressure")?;

        Ok(Self {
            date,
            time,
            temperature,
            humidity,
            pressure,
        })
    }
}

fn parse_value(field: &str, name: &str) -> Result<f64, EngineError> {
    field
        .parse::<f64>()
        .map_err(|err| EngineError::malformed(format!("bad {name} '{field}': {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> Record {
        Record {
            date: NaiveDate::from_ymd_opt(y, mo, d).unwrap(),
            time: NaiveTime::from_hms_opt(h, mi, s).unwrap(),
            temperature: 21.50,
            humidity: 45.25,
            pressure: 1013.25,
        }
    }

    #[test]
    fn formats_with_zero_padding_and_two_decimals() {
        let rec = record(2024, 3, 7, 9, 0, 5);
        assert_eq!(rec.format_line(), "2024-03-07, 09:00:05, 21.50, 45.25, 1013.25");
    }

    #[test]
    fn round_trips_through_the_line_format() {
        let rec = record(2024, 11, 30, 23, 0, 0);
        let parsed = Record::parse_line(&rec.format_line()).unwrap();
        assert_eq!(parsed, rec);
    }

    #[test]
    fn parse_tolerates_whitespace_variance() {
        let parsed = Record::parse_line("2024-03-07,09:00:05 ,  21.50, 45.25,1013.25  ").unwrap();
        assert_eq!(parsed, record(2024, 3, 7, 9, 0, 5));
    }

    #[test]
    fn parse_rejects_wrong_field_count() {
        assert!(Record::parse_line("garbage").is_err());
        assert!(Record::parse_line("2024-03-07, 09:00:05, 21.50, 45.25").is_err());
        assert!(Record::parse_line("2024-03-07, 09:00:05, 21.50, 45.25, 1013.25, 7").is_err());
    }

    #[test]
    fn parse_rejects_non_numeric_fields() {
        assert!(Record::parse_line("2024-03-07, 09:00:05, warm, 45.25, 1013.25").is_err());
        assert!(Record::parse_line("2024-13-07, 09:00:05, 21.50, 45.25, 1013.25").is_err());
        assert!(Record::parse_line("2024-03-07, 25:00:05, 21.50, 45.25, 1013.25").is_err());
    }

    #[test]
    fn nan_values_survive_the_round_trip() {
        let rec = Record {
            temperature: f64::NAN,
            ..record(2024, 3, 7, 14, 0, 0)
        };
        let parsed = Record::parse_line(&rec.format_line()).unwrap();
        assert!(parsed.temperature.is_nan());
        assert_eq!(parsed.humidity, rec.humidity);
    }
}
