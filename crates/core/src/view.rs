//! Rendering adapter interface driven by the selector.

use crate::{
    booking::BookingPrompt,
    catalog::SeatCode,
    grid::GridView,
    layout::LayoutGuide,
    sector::Sector,
    summary::{Controls, Summary},
};

/// Blocking messages the user has to acknowledge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Booking was attempted with nothing selected.
    SelectSeatFirst,
    /// The simulated booking went through.
    BookingCompleted,
}

impl Notice {
    /// Message text.
    pub fn message(self) -> &'static str {
        match self {
            Notice::SelectSeatFirst => "Please select at least one seat.",
            Notice::BookingCompleted => {
                "Booking completed (fake)! It has been saved on this machine only."
            }
        }
    }
}

/// Presentation surface. The selector pushes state here and never reads
/// it back; implementations own how things look.
pub trait View {
    /// Replace the whole seat grid.
    fn rebuild_grid(&mut self, grid: &GridView);
    /// Update the selected marker of one seat without rebuilding.
    fn mark_seat(&mut self, code: SeatCode, selected: bool);
    /// Remove every selected marker without rebuilding.
    fn clear_marks(&mut self);
    /// Refresh both summary surfaces and their action buttons.
    fn show_summary(&mut self, summary: &Summary, controls: Controls);
    /// Highlight the active sector control.
    fn show_sector(&mut self, sector: Sector);
    /// Update the layout label and controls hint.
    fn show_layout(&mut self, guide: &LayoutGuide);
    /// Show the confirmation overlay with empty form fields.
    fn open_booking(&mut self, prompt: &BookingPrompt);
    /// Hide the confirmation overlay.
    fn close_booking(&mut self);
    /// Show a blocking notice.
    fn notify(&mut self, notice: Notice);
    /// Update the last-booking line; `None` blanks it.
    fn show_last_booking(&mut self, text: Option<&str>);
}
