#![allow(missing_docs)]

//! Seats the user has picked but not yet booked.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::SeatCode;

/// Metadata kept for a selected seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatInfo {
    /// Row letter.
    pub row: char,
    /// 1-based column.
    pub col: u8,
    /// Price at the time of selection.
    pub price: u32,
}

/// Result of [`Selection::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    /// The seat was added.
    Selected,
    /// The seat was removed.
    Deselected,
}

impl Toggle {
    /// Whether the seat is selected after the toggle.
    pub fn is_selected(self) -> bool {
        matches!(self, Toggle::Selected)
    }
}

/// Selected seats keyed by code.
///
/// Holds no opinion about occupancy or sector visibility; callers check
/// those before toggling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    seats: BTreeMap<SeatCode, SeatInfo>,
}

impl Selection {
    /// Empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove `code` if present, otherwise insert it with `info`.
    pub fn toggle(&mut self, code: SeatCode, info: SeatInfo) -> Toggle {
        if self.seats.remove(&code).is_some() {
            Toggle::Deselected
        } else {
            self.seats.insert(code, info);
            Toggle::Selected
        }
    }

    pub fn contains(&self, code: SeatCode) -> bool {
        self.seats.contains_key(&code)
    }

    pub fn get(&self, code: SeatCode) -> Option<&SeatInfo> {
        self.seats.get(&code)
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    /// Drop every selected seat.
    pub fn clear(&mut self) {
        self.seats.clear();
    }

    /// Selected seats ordered by row, then numeric column.
    pub fn iter(&self) -> impl Iterator<Item = (SeatCode, &SeatInfo)> + '_ {
        self.seats.iter().map(|(code, info)| (*code, info))
    }

    /// Sum of the selected seat prices.
    pub fn total(&self) -> u32 {
        self.seats.values().map(|info| info.price).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seat(raw: &str, price: u32) -> (SeatCode, SeatInfo) {
        let code: SeatCode = raw.parse().expect("valid seat code");
        let info = SeatInfo {
            row: code.row_label(),
            col: code.col(),
            price,
        };
        (code, info)
    }

    #[test]
    fn toggle_selects_then_deselects() {
        let mut selection = Selection::new();
        let (code, info) = seat("A-1", 8);

        assert_eq!(selection.toggle(code, info), Toggle::Selected);
        assert!(selection.contains(code));
        assert_eq!(selection.get(code), Some(&info));

        assert_eq!(selection.toggle(code, info), Toggle::Deselected);
        assert!(selection.is_empty());
    }

    #[test]
    fn double_toggle_restores_prior_content() {
        let mut selection = Selection::new();
        let (a, a_info) = seat("A-1", 8);
        let (c, c_info) = seat("C-3", 11);
        selection.toggle(a, a_info);
        let before = selection.clone();

        selection.toggle(c, c_info);
        selection.toggle(c, c_info);
        assert_eq!(selection, before);
    }

    #[test]
    fn total_tracks_every_toggle() {
        let mut selection = Selection::new();
        let seats = [seat("A-1", 8), seat("C-3", 11), seat("H-12", 10), seat("A-1", 8)];
        let mut expected = 0;
        for (code, info) in seats {
            if selection.toggle(code, info).is_selected() {
                expected += info.price;
            } else {
                expected -= info.price;
            }
            assert_eq!(selection.total(), expected);
            assert_eq!(
                selection.total(),
                selection.iter().map(|(_, info)| info.price).sum::<u32>()
            );
        }
        assert_eq!(selection.len(), 2);
        assert_eq!(selection.total(), 21);
    }

    #[test]
    fn clear_empties_selection() {
        let mut selection = Selection::new();
        let (code, info) = seat("B-2", 8);
        selection.toggle(code, info);
        selection.clear();
        assert!(selection.is_empty());
        assert_eq!(selection.total(), 0);
    }
}
