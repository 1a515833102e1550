#![allow(missing_docs)]

//! Per-run seat selection state: catalog, active sector and selection.

use thiserror::Error;
use tracing::{debug, info};

use crate::{
    catalog::{SeatCatalog, SeatCode},
    grid::GridView,
    sector::Sector,
    selection::{Selection, Toggle},
    summary::Summary,
};

/// Rejected seat toggles. The selection is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The seat was sold before the session started.
    #[error("seat {0} is occupied")]
    SeatOccupied(SeatCode),
    /// The code is outside the venue.
    #[error("seat {0} does not exist")]
    UnknownSeat(SeatCode),
}

/// Mutable state owned by the selector.
#[derive(Debug, Clone)]
pub struct Session {
    catalog: SeatCatalog,
    sector: Sector,
    selection: Selection,
}

impl Session {
    /// Fresh session showing every sector with nothing selected.
    pub fn new(catalog: SeatCatalog) -> Self {
        Self {
            catalog,
            sector: Sector::All,
            selection: Selection::new(),
        }
    }

    pub fn catalog(&self) -> &SeatCatalog {
        &self.catalog
    }

    pub fn sector(&self) -> Sector {
        self.sector
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Select or deselect `code`. Occupied and unknown seats are refused.
    ///
    /// The active sector does not matter here; it only affects rendering.
    pub fn toggle_seat(&mut self, code: SeatCode) -> Result<Toggle, SessionError> {
        if !self.catalog.contains(code) {
            return Err(SessionError::UnknownSeat(code));
        }
        if self.catalog.is_occupied(code) {
            return Err(SessionError::SeatOccupied(code));
        }
        let toggle = self.selection.toggle(code, self.catalog.seat_info(code));
        debug!(%code, ?toggle, selected = self.selection.len(), "seat toggled");
        Ok(toggle)
    }

    /// Switch the visible sector. Returns `false` when it was already active.
    ///
    /// Seats selected outside the new sector stay selected.
    pub fn set_sector(&mut self, sector: Sector) -> bool {
        if self.sector == sector {
            return false;
        }
        self.sector = sector;
        info!(%sector, kept = self.selection.len(), "sector changed");
        true
    }

    /// Deselect everything.
    pub fn clear(&mut self) {
        self.selection.clear();
    }

    pub fn summary(&self) -> Summary {
        Summary::from_selection(&self.selection)
    }

    /// Full grid for the current sector.
    pub fn grid(&self) -> GridView {
        GridView::project(&self.catalog, self.sector, &self.selection)
    }
}
