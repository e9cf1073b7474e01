use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::RwLock};

use crate::aggregation::ValidRanges;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Backing file for the append-only record store.
    pub store_path: PathBuf,
    /// Plausibility bounds applied when aggregating stored records.
    pub valid_ranges: ValidRanges,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            store_path: "readings.csv".into(),
            valid_ranges: ValidRanges::default(),
        }
    }
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<LoggerSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_default()
        } else {
            LoggerSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn current(&self) -> LoggerSettings {
        self.data.read().unwrap().clone()
    }

    pub fn update(&self, settings: LoggerSettings) -> Result<()> {
        {
            let mut guard = self.data.write().unwrap();
            *guard = settings;
            self.persist(&guard)?;
        }
        Ok(())
    }

    fn persist(&self, data: &LoggerSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}
