//! Named column ranges that restrict which seats are shown.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Inclusive column range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRange {
    /// First column in the range.
    pub from: u8,
    /// Last column in the range.
    pub to: u8,
}

impl ColumnRange {
    /// Whether `col` falls inside the range.
    pub fn contains(&self, col: u8) -> bool {
        self.from <= col && col <= self.to
    }
}

/// Unknown sector name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sector '{0}'")]
pub struct UnknownSector(pub String);

/// Sector filter applied to the seat grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sector {
    /// No restriction.
    #[default]
    All,
    /// Columns 1-4.
    Left,
    /// Columns 5-8.
    Center,
    /// Columns 9-12.
    Right,
}

impl Sector {
    /// Sectors in display order.
    pub const ALL: [Sector; 4] = [Sector::All, Sector::Left, Sector::Center, Sector::Right];

    /// Column range for the sector, `None` for [`Sector::All`].
    pub fn range(self) -> Option<ColumnRange> {
        match self {
            Sector::All => None,
            Sector::Left => Some(ColumnRange { from: 1, to: 4 }),
            Sector::Center => Some(ColumnRange { from: 5, to: 8 }),
            Sector::Right => Some(ColumnRange { from: 9, to: 12 }),
        }
    }

    /// Whether seats in `col` are rendered under this sector.
    pub fn includes(self, col: u8) -> bool {
        self.range().map_or(true, |range| range.contains(col))
    }

    /// Stable lowercase key.
    pub fn as_str(self) -> &'static str {
        match self {
            Sector::All => "all",
            Sector::Left => "left",
            Sector::Center => "center",
            Sector::Right => "right",
        }
    }

    /// Button caption.
    pub fn label(self) -> &'static str {
        match self {
            Sector::All => "All",
            Sector::Left => "Left",
            Sector::Center => "Center",
            Sector::Right => "Right",
        }
    }

    /// Next sector in display order, wrapping around.
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sector {
    type Err = UnknownSector;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Sector::ALL
            .into_iter()
            .find(|sector| sector.as_str().eq_ignore_ascii_case(input.trim()))
            .ok_or_else(|| UnknownSector(input.to_string()))
    }
}
