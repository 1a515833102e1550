#![warn(clippy::all, missing_docs)]

//! Core domain logic for the Sugarland Theaters seat selector.
//!
//! This crate hosts the seat catalog, selection state, pricing summary,
//! simulated booking flow and its persistence. Presentation lives behind
//! the [`View`] trait so the terminal UI and any future frontends share
//! the same behaviour.

pub mod booking;
pub mod catalog;
pub mod config;
pub mod controller;
pub mod grid;
pub mod layout;
pub mod sector;
pub mod selection;
pub mod session;
pub mod store;
pub mod summary;
pub mod view;

pub use booking::{BookingError, BookingFlow, BookingForm, BookingPrompt, BookingRecord, Checkout};
pub use catalog::{SeatCatalog, SeatCode};
pub use config::AppConfig;
pub use controller::SeatSelector;
pub use grid::{GridView, SeatCell};
pub use layout::{LayoutGuide, LayoutMode, LayoutThresholds};
pub use sector::Sector;
pub use selection::{Selection, Toggle};
pub use session::{Session, SessionError};
pub use store::{BookingStore, FileStore, KeyValueStore, MemoryStore};
pub use summary::{Controls, Summary};
pub use view::{Notice, View};
