use std::sync::Arc;

use anyhow::Result;
use serde_json::{json, Value};
use sugarland_core::{
    config::VenueConfig,
    store::BOOKING_STORAGE_KEY,
    BookingError, BookingForm, BookingPrompt, BookingStore, Checkout, Controls, GridView,
    KeyValueStore, LayoutGuide, LayoutMode, LayoutThresholds, MemoryStore, Notice, SeatCatalog,
    SeatCode, SeatSelector, Sector, Session, SessionError, Summary, Toggle, View,
};

/// View double that keeps the last state pushed to each surface.
#[derive(Default)]
struct RecordingView {
    grid: GridView,
    rebuilds: usize,
    summary: Option<Summary>,
    controls: Option<Controls>,
    sector: Option<Sector>,
    layout: Option<LayoutMode>,
    prompt: Option<BookingPrompt>,
    notices: Vec<Notice>,
    last_booking: Option<String>,
}

impl View for RecordingView {
    fn rebuild_grid(&mut self, grid: &GridView) {
        self.grid = grid.clone();
        self.rebuilds += 1;
    }

    fn mark_seat(&mut self, code: SeatCode, selected: bool) {
        self.grid.mark(code, selected);
    }

    fn clear_marks(&mut self) {
        self.grid.clear_marks();
    }

    fn show_summary(&mut self, summary: &Summary, controls: Controls) {
        self.summary = Some(summary.clone());
        self.controls = Some(controls);
    }

    fn show_sector(&mut self, sector: Sector) {
        self.sector = Some(sector);
    }

    fn show_layout(&mut self, guide: &LayoutGuide) {
        self.layout = Some(guide.mode);
    }

    fn open_booking(&mut self, prompt: &BookingPrompt) {
        self.prompt = Some(prompt.clone());
    }

    fn close_booking(&mut self) {
        self.prompt = None;
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    fn show_last_booking(&mut self, text: Option<&str>) {
        self.last_booking = text.map(str::to_string);
    }
}

type Selector = SeatSelector<Arc<MemoryStore>, RecordingView>;

fn code(raw: &str) -> SeatCode {
    raw.parse().expect("valid seat code")
}

fn selector_with(backend: Arc<MemoryStore>) -> Selector {
    let session = Session::new(SeatCatalog::new(&VenueConfig::default()));
    let mut selector = SeatSelector::new(
        session,
        BookingStore::new(backend),
        RecordingView::default(),
        LayoutThresholds::default(),
    );
    selector.on_init(120);
    selector
}

fn selector() -> (Selector, Arc<MemoryStore>) {
    let backend = Arc::new(MemoryStore::new());
    (selector_with(backend.clone()), backend)
}

fn shown_summary(selector: &Selector) -> &Summary {
    selector.view().summary.as_ref().expect("summary pushed")
}

#[test]
fn init_pushes_every_surface() {
    let (selector, _) = selector();
    let view = selector.view();
    assert_eq!(view.rebuilds, 1);
    assert_eq!(view.grid.cells().count(), 96);
    assert_eq!(view.sector, Some(Sector::All));
    assert_eq!(view.layout, Some(LayoutMode::Desktop));
    assert_eq!(view.last_booking, None);
    assert_eq!(shown_summary(&selector).count, 0);
}

#[test]
fn front_and_middle_rows_are_priced_by_band() {
    let (mut selector, _) = selector();
    assert_eq!(selector.on_toggle_seat(code("A-1")), Ok(Toggle::Selected));
    assert_eq!(selector.on_toggle_seat(code("C-3")), Ok(Toggle::Selected));

    let summary = shown_summary(&selector);
    assert_eq!(summary.count, 2);
    assert_eq!(summary.total, 19);
    assert_eq!(summary.lines[0].price, 8);
    assert_eq!(summary.lines[1].price, 11);
    assert!(selector.view().grid.cell(code("A-1")).is_some_and(|cell| cell.selected));
    assert_eq!(selector.view().rebuilds, 1);
}

#[test]
fn occupied_seat_is_a_no_op() {
    let (mut selector, _) = selector();
    selector.on_toggle_seat(code("B-1")).expect("B-1 free");
    let before = shown_summary(&selector).clone();

    assert_eq!(
        selector.on_toggle_seat(code("A-5")),
        Err(SessionError::SeatOccupied(code("A-5")))
    );
    assert_eq!(shown_summary(&selector), &before);
    assert!(!selector.session().selection().contains(code("A-5")));
}

#[test]
fn sector_switch_keeps_hidden_selection() {
    let (mut selector, _) = selector();
    selector.on_toggle_seat(code("B-1")).expect("B-1 free");
    let total = shown_summary(&selector).total;

    assert!(selector.on_sector_change(Sector::Right));
    let view = selector.view();
    assert_eq!(view.rebuilds, 2);
    assert_eq!(view.sector, Some(Sector::Right));
    assert!(view.grid.cell(code("B-1")).is_none());
    assert_eq!(selector.session().selection().len(), 1);
    assert_eq!(selector.session().summary().total, total);

    assert!(!selector.on_sector_change(Sector::Right));
    assert_eq!(selector.view().rebuilds, 2);

    selector.on_sector_change(Sector::Left);
    assert!(selector.view().grid.cell(code("B-1")).is_some_and(|cell| cell.selected));
}

#[test]
fn controls_follow_the_selection_count() {
    let (mut selector, _) = selector();
    let disabled = Controls {
        clear: false,
        confirm: false,
        mobile_confirm: false,
    };
    assert_eq!(selector.view().controls, Some(disabled));

    selector.on_toggle_seat(code("H-8")).expect("H-8 free");
    let controls = selector.view().controls.expect("controls pushed");
    assert!(controls.clear && controls.confirm && controls.mobile_confirm);

    selector.on_toggle_seat(code("H-8")).expect("H-8 free");
    assert_eq!(selector.view().controls, Some(disabled));
}

#[test]
fn empty_selection_cannot_be_booked() {
    let (mut selector, backend) = selector();
    assert_eq!(
        selector.on_open_booking(Checkout::Desktop),
        Err(BookingError::EmptySelection)
    );
    assert_eq!(selector.view().notices, vec![Notice::SelectSeatFirst]);
    assert!(selector.view().prompt.is_none());

    assert_eq!(
        selector.on_confirm(&BookingForm::default()).map(|_| ()),
        Err(BookingError::NotOpen)
    );
    assert!(backend.is_empty());
}

#[test]
fn confirm_persists_record_and_resets_selection() -> Result<()> {
    let (mut selector, backend) = selector();
    selector.on_toggle_seat(code("D-5"))?;
    selector.on_open_booking(Checkout::Desktop)?;
    let prompt = selector.view().prompt.clone().expect("overlay open");
    assert_eq!(prompt.summary, "1 seat(s): D-5 · Total $10");

    let record = selector.on_confirm(&BookingForm {
        name: "Jane".into(),
        email: "jane@example.com".into(),
    })?;

    assert!(selector.session().selection().is_empty());
    assert!(selector.view().grid.cells().all(|cell| !cell.selected));
    assert!(selector.view().prompt.is_none());
    assert_eq!(selector.view().notices, vec![Notice::BookingCompleted]);
    assert_eq!(shown_summary(&selector).count, 0);

    let raw = backend
        .get(BOOKING_STORAGE_KEY)?
        .expect("booking persisted");
    let stored: Value = serde_json::from_str(&raw)?;
    assert_eq!(
        stored["seats"],
        json!([{"code": "D-5", "row": "D", "col": 5, "price": 10}])
    );
    assert_eq!(stored["total"], json!(10));
    assert_eq!(stored["name"], json!("Jane"));
    assert_eq!(stored["email"], json!("jane@example.com"));
    assert!(stored["time"].as_i64().is_some_and(|time| time > 0));

    assert_eq!(selector.store().load_last(), Some(record));
    assert_eq!(backend.len(), 1);
    assert!(selector
        .view()
        .last_booking
        .as_deref()
        .is_some_and(|text| text.ends_with("): D-5 · $10")));
    Ok(())
}

#[test]
fn cancel_keeps_selection() -> Result<()> {
    let (mut selector, backend) = selector();
    selector.on_toggle_seat(code("G-7"))?;
    selector.on_open_booking(Checkout::Mobile)?;
    assert!(selector.flow().is_open());

    selector.on_cancel()?;
    assert!(!selector.flow().is_open());
    assert!(selector.view().prompt.is_none());
    assert_eq!(selector.session().selection().len(), 1);
    assert!(backend.is_empty());
    assert_eq!(selector.on_cancel(), Err(BookingError::NotOpen));
    Ok(())
}

#[test]
fn new_booking_overwrites_previous_one() -> Result<()> {
    let (mut selector, backend) = selector();
    for seat in ["A-1", "H-12"] {
        selector.on_toggle_seat(code(seat))?;
        selector.on_open_booking(Checkout::Desktop)?;
        selector.on_confirm(&BookingForm::default())?;
    }
    let last = selector.store().load_last().expect("booking stored");
    assert_eq!(last.seats.len(), 1);
    assert_eq!(last.seats[0].code, code("H-12"));
    assert_eq!(backend.len(), 1);
    Ok(())
}

#[test]
fn corrupt_stored_booking_is_ignored_on_init() {
    let backend = Arc::new(MemoryStore::new().with_entry(BOOKING_STORAGE_KEY, "{oops"));
    let selector = selector_with(backend);
    assert_eq!(selector.view().last_booking, None);
    assert_eq!(selector.store().load_last(), None);
}

#[test]
fn resize_switches_checkout_surface() {
    let (mut selector, _) = selector();
    assert_eq!(selector.default_checkout(), Checkout::Desktop);

    selector.on_resize(40);
    assert_eq!(selector.layout(), LayoutMode::Mobile);
    assert_eq!(selector.view().layout, Some(LayoutMode::Mobile));
    assert_eq!(selector.default_checkout(), Checkout::Mobile);

    selector.on_resize(70);
    assert_eq!(selector.layout(), LayoutMode::Tablet);
    assert_eq!(selector.default_checkout(), Checkout::Desktop);
}
