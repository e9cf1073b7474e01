use std::sync::Arc;

use tokio::time::{Duration, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::metrics::EngineMetrics;
use crate::models::Record;
use crate::sources::{ClockSource, SensorSource};
use crate::store::RecordStore;

use super::trigger::HourlyTrigger;

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

// Import the logging macros (exported at crate root)
use crate::{log_error, log_info, log_warn};

/// The trigger only needs to observe every `minute == 0` instant; fifteen
/// seconds leaves plenty of margin and re-evaluation is idempotent.
const TICK_INTERVAL_SECS: u64 = 15;

pub async fn logging_loop(
    clock: Arc<dyn ClockSource>,
    sensor: Arc<dyn SensorSource>,
    store: RecordStore,
    metrics: EngineMetrics,
    cancel_token: CancellationToken,
) {
    let mut ticker = tokio::time::interval(Duration::from_secs(TICK_INTERVAL_SECS));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut trigger = HourlyTrigger::new();

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                evaluate_tick(clock.as_ref(), sensor.as_ref(), &store, &metrics, &mut trigger);
            }
            _ = cancel_token.cancelled() => {
                log_info!("logging loop shutting down");
                break;
            }
        }
    }
}

/// One trigger evaluation. Never aborts the loop: a failed append degrades
/// to a reported error and the next hour gets a fresh chance.
pub(crate) fn evaluate_tick(
    clock: &dyn ClockSource,
    sensor: &dyn SensorSource,
    store: &RecordStore,
    metrics: &EngineMetrics,
    trigger: &mut HourlyTrigger,
) {
    let now = clock.now();
    if !trigger.should_fire(now) {
        return;
    }

    // The hour is consumed before the sensor read. An invalid reading still
    // spends its hour and is written as-is; range validation on the read
    // path keeps it out of every average.
    trigger.mark_fired(now);

    let sample = sensor.read();
    if !sample.is_valid {
        log_warn!("sensor reading invalid at {now}; this hour will hold a NaN record");
    }

    let record = Record::from_sample(&sample, now);
    match store.append(&record) {
        Ok(()) => {
            metrics.record_append();
            log_info!("logged hourly record at {now}");
        }
        Err(err) => {
            metrics.record_append_failure();
            log_error!("hourly append failed: {err}");
        }
    }
}
