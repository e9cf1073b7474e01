use std::sync::Arc;

use ambientlog::{
    ClockSource, Engine, EngineError, LoggerSettings, LoggingController, RecordStore, Screen,
    ScreenView, SensorSource, SettingsStore, SimulatedSensor, SystemClock,
};
use anyhow::Result;
use log::{info, warn};

const SETTINGS_FILE: &str = "ambientlog.json";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::init();

    let settings = SettingsStore::new(SETTINGS_FILE.into())?;
    let LoggerSettings {
        store_path,
        valid_ranges,
    } = settings.current();

    let clock: Arc<dyn ClockSource> = Arc::new(SystemClock);
    let sensor: Arc<dyn SensorSource> = Arc::new(SimulatedSensor::new());
    let store = RecordStore::open(store_path);

    let engine = Engine::new(clock, sensor, store, valid_ranges);

    let mut controller = LoggingController::new();
    controller.start(
        engine.clock(),
        engine.sensor(),
        engine.store(),
        engine.metrics(),
    )?;

    // Show the live view once on startup, like the device does.
    report_screen(&engine, Screen::Current);

    tokio::signal::ctrl_c().await?;
    info!("shutdown requested");
    controller.stop().await?;

    let totals = engine.metrics().snapshot();
    info!(
        "session totals: {} records appended, {} append failures, {} scans",
        totals.append_count, totals.append_failure_count, totals.scan_count
    );
    Ok(())
}

fn report_screen(engine: &Engine, screen: Screen) {
    match engine.screen_view(screen) {
        ScreenView::Live(sample) if sample.is_valid => info!(
            "[{}] {:.2} C, {:.2} %, {:.2} hPa",
            screen.label(),
            sample.temperature,
            sample.humidity,
            sample.pressure
        ),
        ScreenView::Live(_) => warn!("[{}] {}", screen.label(), EngineError::InvalidSensorReading),
        ScreenView::Average(avg) if avg.is_valid => info!(
            "[{}] avg {:.2} C, {:.2} %, {:.2} hPa",
            screen.label(),
            avg.temperature,
            avg.humidity,
            avg.pressure
        ),
        ScreenView::Average(_) => info!("[{}] no data", screen.label()),
    }
}
