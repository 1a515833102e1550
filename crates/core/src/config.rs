//! Application configuration.
//!
//! Values are layered: compiled defaults (via `serde(default)`), then the user's
//! `~/.config/sugarland/config.toml`, then `SUGARLAND_*` environment
//! variables (nested keys separated by `__`, e.g. `SUGARLAND_VENUE__BASE_PRICE`).

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{ensure, Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::layout::LayoutThresholds;

/// Directory under the platform config dir holding `config.toml`.
pub const CONFIG_DIR: &str = "sugarland";
/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "SUGARLAND";

const DEFAULT_CONFIG: &str = r#"# Sugarland Theaters seat selector configuration.

[venue]
# Number of seat rows (lettered from A, at most 26).
rows = 8
# Seats per row, numbered from 1.
cols = 12
# Price of a standard seat. Rows A-B cost base - 2, rows C-E cost base + 1.
base_price = 10
# Seats that are already sold.
occupied = [
  "A-5", "A-6", "A-7",
  "B-3", "B-4",
  "C-8", "C-9",
  "D-1", "D-2",
  "F-10", "F-11", "F-12",
]

[layout]
# Terminal widths (in columns) at or below which the compact layouts apply.
mobile_max = 54
tablet_max = 90

# [storage]
# data_dir = "/path/to/sugarland/data"
"#;

/// Fixed description of the auditorium.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VenueConfig {
    /// Number of rows, lettered from `A`.
    pub rows: u8,
    /// Number of seats per row, numbered from 1.
    pub cols: u8,
    /// Price of a standard seat.
    pub base_price: u32,
    /// Seat codes (e.g. `"A-5"`) that are already taken.
    pub occupied: Vec<String>,
}

impl Default for VenueConfig {
    fn default() -> Self {
        Self {
            rows: 8,
            cols: 12,
            base_price: 10,
            occupied: [
                "A-5", "A-6", "A-7", "B-3", "B-4", "C-8", "C-9", "D-1", "D-2", "F-10", "F-11",
                "F-12",
            ]
            .into_iter()
            .map(str::to_string)
            .collect(),
        }
    }
}

impl VenueConfig {
    /// Reject layouts the seat catalog cannot represent.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            (1..=26).contains(&self.rows),
            "venue.rows must be between 1 and 26, got {}",
            self.rows
        );
        ensure!(self.cols >= 1, "venue.cols must be at least 1");
        ensure!(
            self.base_price >= 2,
            "venue.base_price must be at least 2, got {}",
            self.base_price
        );
        Ok(())
    }
}

/// Where persisted data lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory for the booking store.
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(CONFIG_DIR),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Seat layout and pricing.
    pub venue: VenueConfig,
    /// Layout mode breakpoints.
    pub layout: LayoutThresholds,
    /// Persistence settings.
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Load configuration from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(config_path())
    }

    /// Load configuration layered over the file at `path` (which may be missing).
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        // Missing keys fall back to the serde defaults; seeding the builder
        // with them would merge list values element-wise.
        let settings = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: AppConfig = settings
            .try_deserialize()
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        config.venue.validate()?;
        config.layout.validate()?;
        Ok(config)
    }
}

/// Default location of `config.toml`.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR)
        .join("config.toml")
}

/// Write the commented default config file when none exists yet.
pub fn ensure_default_config() -> Result<()> {
    write_default_config(config_path())
}

fn write_default_config(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, DEFAULT_CONFIG).with_context(|| format!("failed to write {}", path.display()))
}
