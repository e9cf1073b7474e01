use chrono::NaiveDateTime;

use crate::metrics::EngineMetrics;
use crate::models::AverageResult;
use crate::store::RecordStore;

use super::config::ValidRanges;
use super::daily::average_for_day;

/// Number of daily windows composing the weekly view (offsets 0..=6).
const WEEK_DAYS: u32 = 7;

/// Mean of the last seven daily means, counting only days that had data.
///
/// Each valid day contributes its already-averaged values once, so a day
/// with one record weighs the same as a day with twenty-four. Zero valid
/// days yields the same explicit no-data marker as the daily contract.
pub fn weekly_average(
    store: &RecordStore,
    now: NaiveDateTime,
    ranges: &ValidRanges,
    metrics: &EngineMetrics,
) -> AverageResult {
    let mut temperature_sum = 0.0;
    let mut humidity_sum = 0.0;
    let mut pressure_sum = 0.0;
    let mut valid_days: u32 = 0;

    for days_back in 0..WEEK_DAYS {
        let day = average_for_day(store, now, days_back, ranges, metrics);
        if day.is_valid {
            temperature_sum += day.temperature;
            humidity_sum += day.humidity;
            pressure_sum += day.pressure;
            valid_days += 1;
        }
    }

    if valid_days > 0 {
        let n = f64::from(valid_days);
        AverageResult::new(temperature_sum / n, humidity_sum / n, pressure_sum / n)
    } else {
        AverageResult::invalid()
    }
}
