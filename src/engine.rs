//! The engine facade consumed by the presentation layer.
//!
//! Bundles the capability sources, the record store and the validation
//! ranges behind the three read operations plus the screen-view mapping.
//! Everything is recomputed on request; the engine holds no derived state.

use std::sync::Arc;

use crate::aggregation::{average_for_day, weekly_average, ValidRanges};
use crate::metrics::EngineMetrics;
use crate::models::{AverageResult, SensorSample};
use crate::screens::{Screen, ScreenView};
use crate::sources::{ClockSource, SensorSource};
use crate::store::RecordStore;

pub struct Engine {
    clock: Arc<dyn ClockSource>,
    sensor: Arc<dyn SensorSource>,
    store: RecordStore,
    ranges: ValidRanges,
    metrics: EngineMetrics,
}

impl Engine {
    pub fn new(
        clock: Arc<dyn ClockSource>,
        sensor: Arc<dyn SensorSource>,
        store: RecordStore,
        ranges: ValidRanges,
    ) -> Self {
        Self {
            clock,
            sensor,
            store,
            ranges,
            metrics: EngineMetrics::new(),
        }
    }

    /// Fresh instantaneous sample, straight from the sensor.
    pub fn current_reading(&self) -> SensorSample {
        self.sensor.read()
    }

    /// Trailing mean for one day window (0 = today, 1 = yesterday, ...).
    pub fn average_for_day(&self, days_back: u32) -> AverageResult {
        average_for_day(
            &self.store,
            self.clock.now(),
            days_back,
            &self.ranges,
            &self.metrics,
        )
    }

    /// Trailing mean-of-means over the last seven day windows.
    pub fn weekly_average(&self) -> AverageResult {
        weekly_average(&self.store, self.clock.now(), &self.ranges, &self.metrics)
    }

    /// Data for one screen, computed now. Also serves the refresh action.
    pub fn screen_view(&self, screen: Screen) -> ScreenView {
        match screen {
            Screen::Current => ScreenView::Live(self.current_reading()),
            Screen::TodayAverage => ScreenView::Average(self.average_for_day(0)),
            Screen::YesterdayAverage => ScreenView::Average(self.average_for_day(1)),
            Screen::WeeklyAverage => ScreenView::Average(self.weekly_average()),
        }
    }

    // Cheap handles for wiring the logging loop to the same collaborators.

    pub fn clock(&self) -> Arc<dyn ClockSource> {
        Arc::clone(&self.clock)
    }

    pub fn sensor(&self) -> Arc<dyn SensorSource> {
        Arc::clone(&self.sensor)
    }

    pub fn store(&self) -> RecordStore {
        self.store.clone()
    }

    pub fn metrics(&self) -> EngineMetrics {
        self.metrics.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Record;
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
    use tempfile::tempdir;

    struct FixedClock(NaiveDateTime);

    impl ClockSource for FixedClock {
        fn now(&self) -> NaiveDateTime {
            self.0
        }
    }

    struct FixedSensor(SensorSample);

    impl SensorSource for FixedSensor {
        fn read(&self) -> SensorSample {
            self.0
        }
    }

    fn engine_with_two_days() -> (tempfile::TempDir, Engine) {
        let dir = tempdir().unwrap();
        let store = RecordStore::open(dir.path().join("readings.csv"));
        for (day, temperature) in [(10, 20.0), (9, 30.0)] {
            store
                .append(&Record {
                    date: NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
                    time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
                    temperature,
                    humidity: 50.0,
                    pressure: 1000.0,
                })
                .unwrap();
        }

        let clock = FixedClock(
            NaiveDate::from_ymd_opt(2024, 5, 10)
                .unwrap()
                .and_hms_opt(15, 0, 0)
                .unwrap(),
        );
        let sensor = FixedSensor(SensorSample::new(21.5, 44.0, 1012.0));
        let engine = Engine::new(
            Arc::new(clock),
            Arc::new(sensor),
            store,
            ValidRanges::default(),
        );
        (dir, engine)
    }

    #[test]
    fn screen_views_map_to_the_right_windows() {
        let (_dir, engine) = engine_with_two_days();

        match engine.screen_view(Screen::Current) {
            ScreenView::Live(sample) => assert_eq!(sample.temperature, 21.5),
            other => panic!("expected live view, got {other:?}"),
        }
        match engine.screen_view(Screen::TodayAverage) {
            ScreenView::Average(avg) => assert_eq!(avg.temperature, 20.0),
            other => panic!("expected average view, got {other:?}"),
        }
        match engine.screen_view(Screen::YesterdayAverage) {
            ScreenView::Average(avg) => assert_eq!(avg.temperature, 30.0),
            other => panic!("expected average view, got {other:?}"),
        }
        match engine.screen_view(Screen::WeeklyAverage) {
            ScreenView::Average(avg) => assert_eq!(avg.temperature, 25.0),
            other => panic!("expected average view, got {other:?}"),
        }
    }
}
