//! Seat identity, occupancy and pricing derived from the venue config.

use std::{collections::HashSet, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::{config::VenueConfig, selection::SeatInfo};

/// Errors raised while parsing a textual seat code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeatCodeError {
    /// Input is not of the form `<row>-<col>`.
    #[error("malformed seat code '{0}'")]
    Malformed(String),
    /// Row part is not a single letter `A`..=`Z`.
    #[error("invalid row in seat code '{0}'")]
    InvalidRow(String),
    /// Column part is not a positive number.
    #[error("invalid column in seat code '{0}'")]
    InvalidColumn(String),
}

/// Seat identifier: 0-based row index and 1-based column, shown as `"C-9"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SeatCode {
    row: u8,
    col: u8,
}

impl SeatCode {
    /// Build a code from a 0-based row index and 1-based column.
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// 0-based row index.
    pub fn row_index(&self) -> u8 {
        self.row
    }

    /// Row letter.
    pub fn row_label(&self) -> char {
        row_label(self.row)
    }

    /// 1-based column.
    pub fn col(&self) -> u8 {
        self.col
    }
}

impl fmt::Display for SeatCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.row_label(), self.col)
    }
}

impl FromStr for SeatCode {
    type Err = SeatCodeError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let (row_part, col_part) = trimmed
            .split_once('-')
            .ok_or_else(|| SeatCodeError::Malformed(input.to_string()))?;

        let mut letters = row_part.chars();
        let row = match (letters.next(), letters.next()) {
            (Some(letter), None) if letter.is_ascii_uppercase() => letter as u8 - b'A',
            _ => return Err(SeatCodeError::InvalidRow(input.to_string())),
        };
        let col = col_part
            .parse::<u8>()
            .ok()
            .filter(|col| *col >= 1)
            .ok_or_else(|| SeatCodeError::InvalidColumn(input.to_string()))?;

        Ok(Self { row, col })
    }
}

impl TryFrom<String> for SeatCode {
    type Error = SeatCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SeatCode> for String {
    fn from(code: SeatCode) -> Self {
        code.to_string()
    }
}

/// Letter for a 0-based row index (`0` is `A`).
pub fn row_label(index: u8) -> char {
    char::from(b'A' + index)
}

/// Front rows are cheaper, the middle block costs more, the back is standard.
pub fn price_for_row(index: u8, base_price: u32) -> u32 {
    match index {
        0..=1 => base_price - 2,
        2..=4 => base_price + 1,
        _ => base_price,
    }
}

/// A single seat as described by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seat {
    /// Seat identifier.
    pub code: SeatCode,
    /// Whether the seat was sold before the session started.
    pub occupied: bool,
    /// Ticket price for the seat's row.
    pub price: u32,
}

/// Static seat space for one auditorium.
#[derive(Debug, Clone)]
pub struct SeatCatalog {
    rows: u8,
    cols: u8,
    base_price: u32,
    occupied: HashSet<SeatCode>,
}

impl SeatCatalog {
    /// Build the catalog from an already validated venue config.
    pub fn new(venue: &VenueConfig) -> Self {
        let mut catalog = Self {
            rows: venue.rows,
            cols: venue.cols,
            base_price: venue.base_price,
            occupied: HashSet::with_capacity(venue.occupied.len()),
        };
        for raw in &venue.occupied {
            match raw.parse::<SeatCode>() {
                Ok(code) if catalog.contains(code) => {
                    catalog.occupied.insert(code);
                }
                Ok(code) => warn!(%code, "occupied seat outside the venue; ignoring"),
                Err(err) => warn!("skipping occupied entry: {err}"),
            }
        }
        catalog
    }

    /// Number of rows.
    pub fn rows(&self) -> u8 {
        self.rows
    }

    /// Seats per row.
    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Whether `code` lies inside the full seat space.
    pub fn contains(&self, code: SeatCode) -> bool {
        code.row < self.rows && (1..=self.cols).contains(&code.col)
    }

    /// Whether `code` is pre-sold.
    pub fn is_occupied(&self, code: SeatCode) -> bool {
        self.occupied.contains(&code)
    }

    /// Describe the seat at `row` (0-based) and `col` (1-based).
    ///
    /// Callers are expected to stay within `rows()` and `cols()`.
    pub fn seat(&self, row: u8, col: u8) -> Seat {
        let code = SeatCode::new(row, col);
        Seat {
            code,
            occupied: self.is_occupied(code),
            price: price_for_row(row, self.base_price),
        }
    }

    /// Selection metadata for `code`.
    pub fn seat_info(&self, code: SeatCode) -> SeatInfo {
        SeatInfo {
            row: code.row_label(),
            col: code.col,
            price: price_for_row(code.row, self.base_price),
        }
    }

    /// Every seat in row-major order.
    pub fn seats(&self) -> impl Iterator<Item = Seat> + '_ {
        (0..self.rows).flat_map(move |row| (1..=self.cols).map(move |col| self.seat(row, col)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(raw: &str) -> SeatCode {
        raw.parse().expect("valid seat code")
    }

    #[test]
    fn parses_and_displays_codes() {
        let parsed = code("C-9");
        assert_eq!(parsed.row_index(), 2);
        assert_eq!(parsed.col(), 9);
        assert_eq!(parsed.to_string(), "C-9");
        assert_eq!(code("F-12").to_string(), "F-12");
    }

    #[test]
    fn rejects_bad_codes() {
        assert!(matches!("C9".parse::<SeatCode>(), Err(SeatCodeError::Malformed(_))));
        assert!(matches!("c-9".parse::<SeatCode>(), Err(SeatCodeError::InvalidRow(_))));
        assert!(matches!("AB-1".parse::<SeatCode>(), Err(SeatCodeError::InvalidRow(_))));
        assert!(matches!("C-0".parse::<SeatCode>(), Err(SeatCodeError::InvalidColumn(_))));
        assert!(matches!("C-x".parse::<SeatCode>(), Err(SeatCodeError::InvalidColumn(_))));
    }

    #[test]
    fn prices_follow_row_bands() {
        let prices: Vec<u32> = (0..8).map(|row| price_for_row(row, 10)).collect();
        assert_eq!(prices, vec![8, 8, 11, 11, 11, 10, 10, 10]);
    }

    #[test]
    fn catalog_marks_default_occupied_seats() {
        let catalog = SeatCatalog::new(&VenueConfig::default());
        assert!(catalog.is_occupied(code("A-5")));
        assert!(catalog.is_occupied(code("F-12")));
        assert!(!catalog.is_occupied(code("A-1")));
        assert_eq!(catalog.seats().filter(|seat| seat.occupied).count(), 12);
        assert_eq!(catalog.seats().count(), 96);
    }

    #[test]
    fn catalog_ignores_invalid_occupied_entries() {
        let venue = VenueConfig {
            occupied: vec!["A-1".into(), "Z-1".into(), "junk".into(), "A-13".into()],
            ..VenueConfig::default()
        };
        let catalog = SeatCatalog::new(&venue);
        assert_eq!(catalog.seats().filter(|seat| seat.occupied).count(), 1);
    }

    #[test]
    fn row_labels_cover_the_alphabet() {
        assert_eq!(row_label(0), 'A');
        assert_eq!(row_label(7), 'H');
        assert_eq!(row_label(25), 'Z');
    }

    #[test]
    fn seat_codes_serialize_as_strings() -> serde_json::Result<()> {
        let json = serde_json::to_string(&code("D-5"))?;
        assert_eq!(json, "\"D-5\"");
        let back: SeatCode = serde_json::from_str(&json)?;
        assert_eq!(back, code("D-5"));
        Ok(())
    }
}
