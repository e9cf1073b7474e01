use chrono::NaiveDateTime;
use log::warn;

use crate::metrics::EngineMetrics;
use crate::models::{AverageResult, Record};
use crate::store::RecordStore;

use super::config::ValidRanges;

/// Mean of all validated records dated exactly `days_back` whole days before
/// `now` (0 = today, 1 = yesterday, ...).
///
/// Streams the store line by line: unparseable lines and out-of-range values
/// are warned about and skipped, never aborting the pass. For a fixed store
/// content and a fixed `now` the result is exactly reproducible.
pub fn average_for_day(
    store: &RecordStore,
    now: NaiveDateTime,
    days_back: u32,
    ranges: &ValidRanges,
    metrics: &EngineMetrics,
) -> AverageResult {
    // One stable reference date for the whole pass, not re-read per record.
    let today = now.date();

    let mut temperature_sum = 0.0;
    let mut humidity_sum = 0.0;
    let mut pressure_sum = 0.0;
    let mut count: u32 = 0;

    let mut malformed_lines: u64 = 0;
    let mut out_of_range: u64 = 0;

    for line in store.scan() {
        let record = match Record::parse_line(&line) {
            Ok(record) => record,
            Err(err) => {
                malformed_lines += 1;
                warn!("skipping unparseable store line '{line}': {err}");
                continue;
            }
        };

        // Signed delta: records dated after "now" match no window.
        let delta_days = (today - record.date).num_days();
        if delta_days != i64::from(days_back) {
            continue;
        }

        if let Err(err) = ranges.validate(&record) {
            out_of_range += 1;
            warn!(
                "skipping record from {} {} (day offset {days_back}): {err}",
                record.date, record.time
            );
            continue;
        }

        temperature_sum += record.temperature;
        humidity_sum += record.humidity;
        pressure_sum += record.pressure;
        count += 1;
    }

    metrics.record_scan(malformed_lines, out_of_range);

    if count > 0 {
        let n = f64::from(count);
        AverageResult::new(temperature_sum / n, humidity_sum / n, pressure_sum / n)
    } else {
        AverageResult::invalid()
    }
}
