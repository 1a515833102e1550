#![allow(missing_docs)]

//! Projection of catalog, sector and selection into a renderable grid.

use crate::{
    catalog::{row_label, SeatCatalog, SeatCode},
    sector::Sector,
    selection::Selection,
};

/// A visible seat and everything a renderer needs to draw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatCell {
    pub code: SeatCode,
    pub row: char,
    pub col: u8,
    pub price: u32,
    /// Occupied seats are drawn but never accept activation.
    pub occupied: bool,
    pub selected: bool,
}

impl SeatCell {
    /// Assistive text, e.g. `"Row A, Seat 5 (occupied)"`.
    pub fn accessible_label(&self) -> String {
        let state = if self.occupied { "occupied" } else { "available" };
        format!("Row {}, Seat {} ({state})", self.row, self.col)
    }

    /// Whether activating the cell may toggle it.
    pub fn is_interactive(&self) -> bool {
        !self.occupied
    }
}

/// One row of the grid. Rows are always present even when a sector hides
/// every seat in them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRow {
    pub label: String,
    pub seats: Vec<SeatCell>,
}

/// Full seat grid for the current sector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridView {
    pub sector: Sector,
    pub rows: Vec<GridRow>,
}

impl GridView {
    /// Build the grid from scratch.
    pub fn project(catalog: &SeatCatalog, sector: Sector, selection: &Selection) -> Self {
        let rows = (0..catalog.rows())
            .map(|row| GridRow {
                label: format!("Row {}", row_label(row)),
                seats: (1..=catalog.cols())
                    .filter(|col| sector.includes(*col))
                    .map(|col| {
                        let seat = catalog.seat(row, col);
                        SeatCell {
                            code: seat.code,
                            row: seat.code.row_label(),
                            col,
                            price: seat.price,
                            occupied: seat.occupied,
                            selected: selection.contains(seat.code),
                        }
                    })
                    .collect(),
            })
            .collect();
        Self { sector, rows }
    }

    /// Flip the selected marker on a visible cell. Returns `false` when the
    /// seat is not rendered under the current sector.
    pub fn mark(&mut self, code: SeatCode, selected: bool) -> bool {
        match self.cell_mut(code) {
            Some(cell) => {
                cell.selected = selected;
                true
            }
            None => false,
        }
    }

    /// Remove every selected marker.
    pub fn clear_marks(&mut self) {
        self.rows
            .iter_mut()
            .flat_map(|row| row.seats.iter_mut())
            .for_each(|cell| cell.selected = false);
    }

    pub fn cell(&self, code: SeatCode) -> Option<&SeatCell> {
        self.cells().find(|cell| cell.code == code)
    }

    fn cell_mut(&mut self, code: SeatCode) -> Option<&mut SeatCell> {
        self.rows
            .iter_mut()
            .flat_map(|row| row.seats.iter_mut())
            .find(|cell| cell.code == code)
    }

    /// Visible cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &SeatCell> + '_ {
        self.rows.iter().flat_map(|row| row.seats.iter())
    }

    /// Widest row, in seats.
    pub fn width(&self) -> usize {
        self.rows.iter().map(|row| row.seats.len()).max().unwrap_or(0)
    }
}
