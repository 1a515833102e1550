#![allow(missing_docs)]

//! Count, total and listing derived from the current selection.

use crate::{catalog::SeatCode, selection::Selection};

/// Text shown in the listing when nothing is selected.
pub const EMPTY_PLACEHOLDER: &str = "No seats selected yet.";

/// One entry in the selected-seat listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryLine {
    pub code: SeatCode,
    pub price: u32,
}

impl SummaryLine {
    /// Listing text, e.g. `"A-1 – $8"`.
    pub fn text(&self) -> String {
        format!("{} – ${}", self.code, self.price)
    }
}

/// Enabled state of the selection actions on every surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    /// Clear button on the side panel.
    pub clear: bool,
    /// Confirm button on the side panel.
    pub confirm: bool,
    /// Confirm button on the bottom bar.
    pub mobile_confirm: bool,
}

/// Snapshot pushed to the side panel and the bottom bar after every change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub count: usize,
    pub total: u32,
    /// Entries sorted by the textual seat code.
    pub lines: Vec<SummaryLine>,
}

impl Summary {
    /// Recompute from `selection`.
    ///
    /// Lines are ordered by plain string comparison of the codes, so
    /// `A-10` lists before `A-2`.
    pub fn from_selection(selection: &Selection) -> Self {
        let mut lines: Vec<SummaryLine> = selection
            .iter()
            .map(|(code, info)| SummaryLine {
                code,
                price: info.price,
            })
            .collect();
        lines.sort_by_cached_key(|line| line.code.to_string());

        Self {
            count: selection.len(),
            total: selection.total(),
            lines,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Codes joined for prompts, e.g. `"A-1, C-3"`.
    pub fn codes(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.code.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Every action is available iff at least one seat is selected.
    pub fn controls(&self) -> Controls {
        let enabled = !self.is_empty();
        Controls {
            clear: enabled,
            confirm: enabled,
            mobile_confirm: enabled,
        }
    }
}
