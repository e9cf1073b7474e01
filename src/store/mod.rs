//! Append-only record store.
//!
//! One human-readable CSV file: a fixed header line followed by one record
//! per logged hour. The store owns the on-disk representation and the write
//! handle lifecycle; parsing policy for scanned lines belongs to the
//! aggregation layer.
//!
//! The store is deliberately tolerant of a missing backing medium: a failed
//! open degrades writes to reported no-ops and reads to an empty sequence,
//! and every append re-attempts the open once if the handle is missing.

use std::{
    fs::{File, OpenOptions},
    io::{BufRead, BufReader, Lines, Write},
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard},
};

use log::{error, info, warn};

use crate::error::EngineError;
use crate::models::{Record, RECORD_HEADER};

/// Handle to the backing file. Cheap to clone; all appends are serialized
/// behind one lock so interleaved partial writes cannot corrupt line framing.
#[derive(Clone)]
pub struct RecordStore {
    writer: Arc<Mutex<Option<File>>>,
    path: Arc<PathBuf>,
}

impl RecordStore {
    /// Open the backing file, creating it (and its parent directory) if
    /// absent. On first creation the header line is written before any data.
    ///
    /// A failed open is reported but not fatal: the returned store operates
    /// in degraded mode and each later `append` retries the open once.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let store = Self {
            writer: Arc::new(Mutex::new(None)),
            path: Arc::new(path.into()),
        };

        let mut guard = store.lock_writer();
        match store.ensure_writer(&mut guard) {
            Ok(_) => info!("record store ready at {}", store.path.display()),
            Err(err) => error!("{err}"),
        }
        drop(guard);

        store
    }

    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    /// Whether the write handle is currently open.
    pub fn is_available(&self) -> bool {
        self.lock_writer().is_some()
    }

    /// Serialize the record as one line and write it, flushing before
    /// returning so the record is durable once the call completes. Writes
    /// happen at most once per hour, so durability wins over throughput.
    pub fn append(&self, record: &Record) -> Result<(), EngineError> {
        let mut guard = self.lock_writer();
        self.ensure_writer(&mut guard)?;

        // ensure_writer just succeeded, the handle is present
        let file = guard.as_mut().expect("writer present after ensure");

        let result = writeln!(file, "{}", record.format_line()).and_then(|_| file.flush());
        if let Err(source) = result {
            // Drop the handle so the next append starts from a fresh open.
            *guard = None;
            return Err(EngineError::StoreWrite {
                path: self.path.as_ref().clone(),
                source,
            });
        }

        Ok(())
    }

    /// Start a fresh scan of the raw data lines, positioned after the header.
    ///
    /// Each call opens its own read cursor, so scans are restartable and
    /// always reflect the current file contents. An unreadable file yields an
    /// empty sequence: "no data", not an error.
    pub fn scan(&self) -> ScanLines {
        let file = match File::open(self.path.as_path()) {
            Ok(file) => file,
            Err(err) => {
                warn!(
                    "record store unreadable at {}: {err}; treating as empty",
                    self.path.display()
                );
                return ScanLines { lines: None };
            }
        };

        let mut lines = BufReader::new(file).lines();
        match lines.next() {
            // Header consumed (or the file is empty); data lines follow.
            Some(Ok(_)) | None => {}
            Some(Err(err)) => {
                error!("record store read failed at {}: {err}", self.path.display());
                return ScanLines { lines: None };
            }
        }

        ScanLines { lines: Some(lines) }
    }

    fn lock_writer(&self) -> MutexGuard<'_, Option<File>> {
        match self.writer.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Single open attempt, no retry loops or backoff.
    fn ensure_writer(&self, guard: &mut MutexGuard<'_, Option<File>>) -> Result<(), EngineError> {
        if guard.is_some() {
            return Ok(());
        }

        let unavailable = |source: std::io::Error| EngineError::StoreUnavailable {
            path: self.path.as_ref().clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(unavailable)?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.path.as_path())
            .map_err(unavailable)?;

        let is_new = file.metadata().map_err(unavailable)?.len() == 0;
        if is_new {
            writeln!(file, "{RECORD_HEADER}")
                .and_then(|_| file.flush())
                .map_err(unavailable)?;
        }

        **guard = Some(file);
        Ok(())
    }
}

/// Lazy sequence of raw data lines from one scan.
///
/// A read error mid-file ends the sequence early after logging; the next
/// scan starts over from a fresh cursor.
pub struct ScanLines {
    lines: Option<Lines<BufReader<File>>>,
}

impl Iterator for ScanLines {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        match self.lines.as_mut()?.next() {
            Some(Ok(line)) => Some(line),
            Some(Err(err)) => {
                error!("record store read failed mid-scan: {err}");
                self.lines = None;
                None
            }
            None => {
                self.lines = None;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use tempfile::tempdir;

    fn sample_record(day: u32, hour: u32, temperature: f64) -> Record {
        Record {
            date: NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
            time: NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
            temperature,
            humidity: 50.0,
            pressure: 1000.0,
        }
    }

    #[test]
    fn writes_header_exactly_once() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("readings.csv");

        let store = RecordStore::open(&path);
        store.append(&sample_record(1, 12, 20.0)).unwrap();
        drop(store);

        // Re-opening an existing file must not duplicate the header.
        let store = RecordStore::open(&path);
        store.append(&sample_record(1, 13, 21.0)).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], RECORD_HEADER);
        assert_eq!(lines.len(), 3);
        assert!(!lines[1..].iter().any(|l| *l == RECORD_HEADER));
    }

    #[test]
    fn append_is_durable_before_returning() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("readings.csv");
        let store = RecordStore::open(&path);

        store.append(&sample_record(1, 12, 20.0)).unwrap();

        // Read the file through an independent handle while the store's
        // writer is still open: the record must already be on disk.
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("2024-05-01, 12:00:00, 20.00, 50.00, 1000.00"));
    }

    #[test]
    fn scan_skips_header_and_is_restartable() {
        let dir = tempdir().unwrap();
        let store = RecordStore::open(dir.path().join("readings.csv"));
        store.append(&sample_record(1, 12, 20.0)).unwrap();
        store.append(&sample_record(1, 13, 21.0)).unwrap();

        let first: Vec<String> = store.scan().collect();
        let second: Vec<String> = store.scan().collect();
        assert_eq!(first.len(), 2);
        assert_eq!(first, second);
        assert!(first.iter().all(|line| line != RECORD_HEADER));
    }

    #[test]
    fn missing_file_scans_as_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("readings.csv");
        let store = RecordStore::open(&path);
        std::fs::remove_file(&path).unwrap();

        assert_eq!(store.scan().count(), 0);
    }

    #[test]
    fn unavailable_store_degrades_instead_of_failing() {
        let dir = tempdir().unwrap();
        // The target path is a directory: every open attempt fails.
        let store = RecordStore::open(dir.path());

        assert!(!store.is_available());
        let err = store.append(&sample_record(1, 12, 20.0)).unwrap_err();
        assert!(matches!(err, EngineError::StoreUnavailable { .. }));
        assert_eq!(store.scan().count(), 0);
    }

    #[test]
    fn append_self_heals_once_the_medium_returns() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("blocked");
        std::fs::create_dir(&path).unwrap();

        // Initial open fails (the path is occupied by a directory).
        let store = RecordStore::open(&path);
        assert!(store.append(&sample_record(1, 12, 20.0)).is_err());

        // Medium comes back: the next append re-opens and writes the header.
        std::fs::remove_dir(&path).unwrap();
        store.append(&sample_record(1, 13, 21.0)).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], RECORD_HEADER);
        assert_eq!(lines.len(), 2);
    }
}
