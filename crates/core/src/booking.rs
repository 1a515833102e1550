//! Simulated checkout: confirmation step and the persisted booking record.

use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{catalog::SeatCode, selection::Selection, summary::Summary};

/// Reasons a booking transition is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BookingError {
    /// Opening the confirmation step requires at least one seat.
    #[error("select at least one seat before booking")]
    EmptySelection,
    /// Confirm or cancel without an open confirmation step.
    #[error("no booking confirmation is open")]
    NotOpen,
}

/// Which confirm control started the checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Checkout {
    /// Side panel button (desktop and tablet layouts).
    Desktop,
    /// Bottom bar button.
    Mobile,
}

impl Checkout {
    /// Human readable context name.
    pub fn label(self) -> &'static str {
        match self {
            Checkout::Desktop => "Desktop/Tablet",
            Checkout::Mobile => "Mobile",
        }
    }
}

/// Text shown while the confirmation step is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingPrompt {
    /// Checkout context.
    pub checkout: Checkout,
    /// `"2 seat(s): A-1, C-3 · Total $19"`.
    pub summary: String,
    /// Context hint for the simulated checkout.
    pub hint: String,
}

impl BookingPrompt {
    fn new(summary: &Summary, checkout: Checkout) -> Self {
        Self {
            checkout,
            summary: format!(
                "{} seat(s): {} · Total ${}",
                summary.count,
                summary.codes(),
                summary.total
            ),
            hint: format!(
                "This is a simulated {} checkout. Your booking will be saved locally on this machine.",
                checkout.label()
            ),
        }
    }
}

/// Customer details typed into the confirmation step. Both are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingForm {
    /// Customer name, not validated.
    pub name: String,
    /// Customer email, not validated.
    pub email: String,
}

/// A seat inside a persisted booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedSeat {
    /// Seat code, serialised as `"D-5"`.
    pub code: SeatCode,
    /// Row letter.
    pub row: char,
    /// 1-based column.
    pub col: u8,
    /// Price paid.
    pub price: u32,
}

/// The last completed booking, stored as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRecord {
    /// Trimmed customer name, possibly empty.
    pub name: String,
    /// Trimmed customer email, possibly empty.
    pub email: String,
    /// Booked seats.
    pub seats: Vec<BookedSeat>,
    /// Sum of the seat prices.
    pub total: u32,
    /// Epoch milliseconds.
    pub time: i64,
}

impl BookingRecord {
    /// Snapshot the selection and the trimmed form fields.
    pub fn from_selection(selection: &Selection, form: &BookingForm, time: i64) -> Self {
        let seats: Vec<BookedSeat> = selection
            .iter()
            .map(|(code, info)| BookedSeat {
                code,
                row: info.row,
                col: info.col,
                price: info.price,
            })
            .collect();
        let total = seats.iter().map(|seat| seat.price).sum();
        Self {
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            seats,
            total,
            time,
        }
    }

    /// Display line for the last-booking panel, or `None` when there is
    /// nothing worth showing.
    pub fn describe(&self) -> Option<String> {
        if self.seats.is_empty() {
            return None;
        }
        let seats = self
            .seats
            .iter()
            .map(|seat| seat.code.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let when = Local
            .timestamp_millis_opt(self.time)
            .single()
            .map(|time| time.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "unknown time".to_string());
        Some(format!("Last booking ({when}): {seats} · ${}", self.total))
    }
}

/// Confirmation state machine: `Idle` or a single open confirmation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BookingFlow {
    /// No confirmation step on screen.
    #[default]
    Idle,
    /// Waiting for the customer to confirm or cancel.
    ConfirmationOpen(BookingPrompt),
}

impl BookingFlow {
    /// Whether the confirmation step is showing.
    pub fn is_open(&self) -> bool {
        matches!(self, BookingFlow::ConfirmationOpen(_))
    }

    /// Open the confirmation step for the current selection.
    ///
    /// Re-opening while already open replaces the prompt.
    pub fn open(
        &mut self,
        selection: &Selection,
        checkout: Checkout,
    ) -> Result<&BookingPrompt, BookingError> {
        if selection.is_empty() {
            return Err(BookingError::EmptySelection);
        }
        let prompt = BookingPrompt::new(&Summary::from_selection(selection), checkout);
        *self = BookingFlow::ConfirmationOpen(prompt);
        match &*self {
            BookingFlow::ConfirmationOpen(prompt) => Ok(prompt),
            BookingFlow::Idle => Err(BookingError::NotOpen),
        }
    }

    /// Close without booking.
    pub fn cancel(&mut self) -> Result<(), BookingError> {
        match std::mem::take(self) {
            BookingFlow::ConfirmationOpen(_) => Ok(()),
            BookingFlow::Idle => Err(BookingError::NotOpen),
        }
    }

    /// Close for commit, returning the prompt that was confirmed.
    pub fn take_for_commit(&mut self) -> Result<BookingPrompt, BookingError> {
        match std::mem::take(self) {
            BookingFlow::ConfirmationOpen(prompt) => Ok(prompt),
            BookingFlow::Idle => Err(BookingError::NotOpen),
        }
    }
}
