use std::sync::Arc;

use anyhow::{bail, Context, Result};
use log::info;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::metrics::EngineMetrics;
use crate::sources::{ClockSource, SensorSource};
use crate::store::RecordStore;

use super::loop_worker::logging_loop;

/// Owns the background logging task. One logical loop at a time; starting a
/// second one is a caller bug.
pub struct LoggingController {
    handle: Option<JoinHandle<()>>,
    cancel_token: Option<CancellationToken>,
}

impl LoggingController {
    pub fn new() -> Self {
        Self {
            handle: None,
            cancel_token: None,
        }
    }

    pub fn start(
        &mut self,
        clock: Arc<dyn ClockSource>,
        sensor: Arc<dyn SensorSource>,
        store: RecordStore,
        metrics: EngineMetrics,
    ) -> Result<()> {
        if self.handle.is_some() {
            bail!("logging loop already active");
        }

        let cancel_token = CancellationToken::new();
        let token_clone = cancel_token.clone();

        let handle = tokio::spawn(logging_loop(clock, sensor, store, metrics, token_clone));

        self.handle = Some(handle);
        self.cancel_token = Some(cancel_token);
        info!("hourly logging loop started");
        Ok(())
    }

    pub async fn stop(&mut self) -> Result<()> {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }

        if let Some(handle) = self.handle.take() {
            handle
                .await
                .context("logging loop task failed to join")
                .map(|_| ())
        } else {
            Ok(())
        }
    }
}

impl Default for LoggingController {
    fn default() -> Self {
        Self::new()
    }
}
