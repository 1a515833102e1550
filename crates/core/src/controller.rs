#![allow(missing_docs)]

//! Command handlers tying session, booking flow, store and view together.
//!
//! Every handler runs synchronously to completion; the host calls them from
//! its single event loop and routes input to the booking overlay while it
//! is open.

use chrono::Utc;
use tracing::{info, warn};

use crate::{
    booking::{BookingError, BookingFlow, BookingForm, BookingRecord, Checkout},
    catalog::SeatCode,
    layout::{LayoutGuide, LayoutMode, LayoutThresholds},
    sector::Sector,
    selection::Toggle,
    session::{Session, SessionError},
    store::{BookingStore, KeyValueStore},
    view::{Notice, View},
};

/// Flow controller for one seat-selection screen.
pub struct SeatSelector<S, V> {
    session: Session,
    flow: BookingFlow,
    store: BookingStore<S>,
    view: V,
    thresholds: LayoutThresholds,
    layout: LayoutMode,
}

impl<S: KeyValueStore, V: View> SeatSelector<S, V> {
    /// Wire up a selector. Nothing is pushed to the view until [`Self::on_init`].
    pub fn new(
        session: Session,
        store: BookingStore<S>,
        view: V,
        thresholds: LayoutThresholds,
    ) -> Self {
        Self {
            session,
            flow: BookingFlow::Idle,
            store,
            view,
            thresholds,
            layout: LayoutMode::Desktop,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn flow(&self) -> &BookingFlow {
        &self.flow
    }

    pub fn store(&self) -> &BookingStore<S> {
        &self.store
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Layout mode from the most recent width.
    pub fn layout(&self) -> LayoutMode {
        self.layout
    }

    /// Confirm control matching the current layout: the bottom bar on
    /// mobile, the side panel otherwise.
    pub fn default_checkout(&self) -> Checkout {
        match self.layout {
            LayoutMode::Mobile => Checkout::Mobile,
            LayoutMode::Desktop | LayoutMode::Tablet => Checkout::Desktop,
        }
    }

    /// Initial render: grid, sector, layout text, summary and last booking.
    pub fn on_init(&mut self, width: u16) {
        self.view.rebuild_grid(&self.session.grid());
        self.view.show_sector(self.session.sector());
        self.on_resize(width);
        self.refresh_summary();
        self.refresh_last_booking();
    }

    /// Activate a seat. Occupied or unknown seats leave everything as is.
    pub fn on_toggle_seat(&mut self, code: SeatCode) -> Result<Toggle, SessionError> {
        let toggle = self.session.toggle_seat(code)?;
        self.view.mark_seat(code, toggle.is_selected());
        self.refresh_summary();
        Ok(toggle)
    }

    /// Switch sector, rebuilding the grid only when it actually changes.
    pub fn on_sector_change(&mut self, sector: Sector) -> bool {
        if !self.session.set_sector(sector) {
            return false;
        }
        self.view.show_sector(sector);
        self.view.rebuild_grid(&self.session.grid());
        true
    }

    /// Deselect every seat.
    pub fn on_clear(&mut self) {
        self.session.clear();
        self.view.clear_marks();
        self.refresh_summary();
    }

    /// Open the confirmation step. With nothing selected the user gets a
    /// blocking notice and the flow stays idle.
    pub fn on_open_booking(&mut self, checkout: Checkout) -> Result<(), BookingError> {
        match self.flow.open(self.session.selection(), checkout) {
            Ok(prompt) => {
                self.view.open_booking(prompt);
                Ok(())
            }
            Err(err) => {
                info!("booking refused: {err}");
                self.view.notify(Notice::SelectSeatFirst);
                Err(err)
            }
        }
    }

    /// Close the confirmation step, discarding the form.
    pub fn on_cancel(&mut self) -> Result<(), BookingError> {
        self.flow.cancel()?;
        self.view.close_booking();
        Ok(())
    }

    /// Book the selected seats, persist the record and reset the selection.
    ///
    /// A failed save is logged by the store and otherwise ignored.
    pub fn on_confirm(&mut self, form: &BookingForm) -> Result<BookingRecord, BookingError> {
        let prompt = self.flow.take_for_commit()?;
        self.view.close_booking();
        if self.session.selection().is_empty() {
            warn!("confirmation closed with an empty selection");
            self.view.notify(Notice::SelectSeatFirst);
            return Err(BookingError::EmptySelection);
        }

        let record = BookingRecord::from_selection(
            self.session.selection(),
            form,
            Utc::now().timestamp_millis(),
        );
        if !self.store.save(&record) {
            warn!("booking kept in memory only");
        }
        info!(checkout = prompt.checkout.label(), total = record.total, "booking confirmed");

        self.refresh_last_booking();
        self.view.notify(Notice::BookingCompleted);
        self.on_clear();
        Ok(record)
    }

    /// Re-derive the layout text for a new width.
    pub fn on_resize(&mut self, width: u16) {
        let guide = LayoutGuide::for_width(width, &self.thresholds);
        self.layout = guide.mode;
        self.view.show_layout(&guide);
    }

    fn refresh_summary(&mut self) {
        let summary = self.session.summary();
        self.view.show_summary(&summary, summary.controls());
    }

    fn refresh_last_booking(&mut self) {
        let text = self.store.load_last().and_then(|record| record.describe());
        self.view.show_last_booking(text.as_deref());
    }
}
