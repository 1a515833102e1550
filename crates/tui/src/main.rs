mod app;
mod screen;

use anyhow::Result;
use std::{
    fs::{self, OpenOptions},
    sync::Mutex,
};

use sugarland_core::{
    config::{self, AppConfig},
    BookingStore, FileStore, KeyValueStore, MemoryStore, SeatCatalog, SeatSelector, Session,
};
use tracing::warn;
use tracing_subscriber::{prelude::*, EnvFilter};

use crate::screen::TerminalView;

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;

    config::ensure_default_config()?;
    let config = AppConfig::load()?;

    let session = Session::new(SeatCatalog::new(&config.venue));
    let store = BookingStore::new(open_store(&config));
    let selector = SeatSelector::new(session, store, TerminalView::default(), config.layout);

    let mut app = app::SugarlandApp::new(selector);
    app.run().await
}

/// Bookings go to the configured data directory; when it cannot be
/// created they are kept for this run only.
fn open_store(config: &AppConfig) -> Box<dyn KeyValueStore> {
    let data_dir = &config.storage.data_dir;
    match fs::create_dir_all(data_dir) {
        Ok(()) => Box::new(FileStore::new(data_dir)),
        Err(err) => {
            warn!(
                "Cannot use data directory {}: {err}; bookings will not survive a restart",
                data_dir.display()
            );
            Box::new(MemoryStore::new())
        }
    }
}

fn init_logging() -> Result<()> {
    let log_dir = std::env::current_dir()?.join("logs");
    fs::create_dir_all(&log_dir)?;
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("sugarland.log"))?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout belongs to the alternate screen while the UI runs
    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .compact()
        .with_writer(Mutex::new(log_file));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    Ok(())
}
