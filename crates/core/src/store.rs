#![allow(missing_docs)]

//! Best-effort persistence of the most recent booking.

use std::{
    collections::HashMap,
    fs,
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result};
use parking_lot::Mutex;
use tempfile::NamedTempFile;
use tracing::{debug, error, info, warn};

use crate::booking::BookingRecord;

/// Storage key holding the last booking.
pub const BOOKING_STORAGE_KEY: &str = "sugarlandLastBooking";

/// Minimal string key-value capability.
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>>;
    /// Replace the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// Volatile store for tests and for runs without a usable data directory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw value, bypassing any serialisation.
    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.entries.lock().insert(key.to_string(), value.to_string());
        self
    }

    /// Number of keys held.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One JSON file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", sanitize_key(key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err).with_context(|| format!("failed to read {}", path.display())),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.root)
            .with_context(|| format!("failed to create {}", self.root.display()))?;
        let path = self.path_for(key);
        let mut file = NamedTempFile::new_in(&self.root)
            .with_context(|| format!("failed to stage {}", path.display()))?;
        file.write_all(value.as_bytes())
            .with_context(|| format!("failed to write {}", path.display()))?;
        file.persist(&path)
            .with_context(|| format!("failed to replace {}", path.display()))?;
        debug!(path = %path.display(), "stored value");
        Ok(())
    }
}

fn sanitize_key(input: &str) -> String {
    let result: String = input
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_'))
        .collect();
    if result.is_empty() {
        "value".to_string()
    } else {
        result
    }
}

/// Single-slot booking persistence over a [`KeyValueStore`].
///
/// Failures never propagate: a save that cannot be written is logged and
/// the booking still counts as done, and unreadable data reads as empty.
#[derive(Debug)]
pub struct BookingStore<S> {
    backend: S,
}

impl<S: KeyValueStore> BookingStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Overwrite the stored booking. Returns whether the write went through.
    pub fn save(&self, record: &BookingRecord) -> bool {
        let serialised = match serde_json::to_string(record) {
            Ok(json) => json,
            Err(err) => {
                error!("Error serialising booking: {err}");
                return false;
            }
        };
        match self.backend.set(BOOKING_STORAGE_KEY, &serialised) {
            Ok(()) => {
                info!(seats = record.seats.len(), total = record.total, "Booking saved");
                true
            }
            Err(err) => {
                error!("Error saving booking: {err:#}");
                false
            }
        }
    }

    /// Most recent booking, if one is stored and readable.
    pub fn load_last(&self) -> Option<BookingRecord> {
        let raw = match self.backend.get(BOOKING_STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!("Error reading booking: {err:#}");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!("Error parsing booking JSON: {err}");
                None
            }
        }
    }
}
