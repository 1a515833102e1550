//! Terminal-side state fed by the selector through [`View`].

use sugarland_core::{
    booking::BookingPrompt,
    summary::{Controls, Summary},
    BookingForm, GridView, LayoutGuide, LayoutMode, Notice, SeatCell, SeatCode, Sector, View,
};

const MAX_FIELD_CHARS: usize = 64;

/// Single-line text input. The cursor counts chars, not bytes.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    value: String,
    cursor: usize,
}

impl TextInput {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_offset(&self, index: usize) -> usize {
        self.value
            .char_indices()
            .nth(index)
            .map_or(self.value.len(), |(offset, _)| offset)
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.char_len() as isize;
        self.cursor = (self.cursor as isize + delta).clamp(0, len) as usize;
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_len();
    }

    pub fn insert(&mut self, ch: char) {
        if ch.is_control() || self.char_len() >= MAX_FIELD_CHARS {
            return;
        }
        let offset = self.byte_offset(self.cursor);
        self.value.insert(offset, ch);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let offset = self.byte_offset(self.cursor);
        self.value.remove(offset);
    }

    pub fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let offset = self.byte_offset(self.cursor);
            self.value.remove(offset);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
}

/// Confirmation overlay with its two optional fields.
#[derive(Debug, Clone)]
pub struct BookingModal {
    pub prompt: BookingPrompt,
    pub name: TextInput,
    pub email: TextInput,
    pub focus: FormField,
}

impl BookingModal {
    fn new(prompt: BookingPrompt) -> Self {
        Self {
            prompt,
            name: TextInput::default(),
            email: TextInput::default(),
            focus: FormField::Name,
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            FormField::Name => FormField::Email,
            FormField::Email => FormField::Name,
        };
    }

    pub fn focused_mut(&mut self) -> &mut TextInput {
        match self.focus {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
        }
    }

    pub fn form(&self) -> BookingForm {
        BookingForm {
            name: self.name.value().to_string(),
            email: self.email.value().to_string(),
        }
    }
}

/// Everything the terminal draws, plus the grid cursor.
pub struct TerminalView {
    pub grid: GridView,
    /// (row, position within the visible seats of that row)
    cursor: (usize, usize),
    pub summary: Summary,
    pub controls: Controls,
    pub sector: Sector,
    pub guide: LayoutGuide,
    pub booking: Option<BookingModal>,
    pub notice: Option<Notice>,
    pub last_booking: Option<String>,
}

impl Default for TerminalView {
    fn default() -> Self {
        let summary = Summary::from_selection(&Default::default());
        let controls = summary.controls();
        Self {
            grid: GridView::default(),
            cursor: (0, 0),
            summary,
            controls,
            sector: Sector::All,
            guide: LayoutGuide::for_mode(LayoutMode::Desktop),
            booking: None,
            notice: None,
            last_booking: None,
        }
    }
}

impl TerminalView {
    pub fn cursor(&self) -> (usize, usize) {
        self.cursor
    }

    pub fn focused_cell(&self) -> Option<&SeatCell> {
        self.grid
            .rows
            .get(self.cursor.0)
            .and_then(|row| row.seats.get(self.cursor.1))
    }

    pub fn move_cursor(&mut self, delta_row: isize, delta_col: isize) {
        let rows = self.grid.rows.len();
        if rows == 0 {
            return;
        }
        let row = (self.cursor.0 as isize + delta_row).clamp(0, rows as isize - 1) as usize;
        let seats = self.grid.rows[row].seats.len();
        let col = if seats == 0 {
            0
        } else {
            (self.cursor.1 as isize + delta_col).clamp(0, seats as isize - 1) as usize
        };
        self.cursor = (row, col);
    }

    /// Keep the cursor on the same seat code after a rebuild when it is
    /// still visible, otherwise clamp it into the new grid.
    fn restore_cursor(&mut self, previous: Option<SeatCode>) {
        if let Some(code) = previous {
            for (row_index, row) in self.grid.rows.iter().enumerate() {
                if let Some(seat_index) = row.seats.iter().position(|cell| cell.code == code) {
                    self.cursor = (row_index, seat_index);
                    return;
                }
            }
        }
        self.move_cursor(0, 0);
    }

    pub fn is_mobile(&self) -> bool {
        self.guide.mode == LayoutMode::Mobile
    }
}

impl View for TerminalView {
    fn rebuild_grid(&mut self, grid: &GridView) {
        let previous = self.focused_cell().map(|cell| cell.code);
        self.grid = grid.clone();
        self.restore_cursor(previous);
    }

    fn mark_seat(&mut self, code: SeatCode, selected: bool) {
        self.grid.mark(code, selected);
    }

    fn clear_marks(&mut self) {
        self.grid.clear_marks();
    }

    fn show_summary(&mut self, summary: &Summary, controls: Controls) {
        self.summary = summary.clone();
        self.controls = controls;
    }

    fn show_sector(&mut self, sector: Sector) {
        self.sector = sector;
    }

    fn show_layout(&mut self, guide: &LayoutGuide) {
        self.guide = guide.clone();
    }

    fn open_booking(&mut self, prompt: &BookingPrompt) {
        self.booking = Some(BookingModal::new(prompt.clone()));
    }

    fn close_booking(&mut self) {
        self.booking = None;
    }

    fn notify(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    fn show_last_booking(&mut self, text: Option<&str>) {
        self.last_booking = text.map(str::to_string);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sugarland_core::{config::VenueConfig, SeatCatalog, Selection};

    fn grid(sector: Sector) -> GridView {
        GridView::project(
            &SeatCatalog::new(&VenueConfig::default()),
            sector,
            &Selection::new(),
        )
    }

    #[test]
    fn text_input_edits_at_cursor() {
        let mut input = TextInput::default();
        for ch in "Jne".chars() {
            input.insert(ch);
        }
        input.move_cursor(-2);
        input.insert('a');
        assert_eq!(input.value(), "Jane");
        input.move_end();
        input.backspace();
        input.move_home();
        input.delete();
        assert_eq!(input.value(), "an");
        input.insert('\u{7}');
        assert_eq!(input.value(), "an");
    }

    #[test]
    fn text_input_keeps_non_ascii_letters() {
        let mut input = TextInput::default();
        for ch in "José Zoë".chars() {
            input.insert(ch);
        }
        assert_eq!(input.value(), "José Zoë");
        assert_eq!(input.cursor(), 8);

        input.move_cursor(-4);
        input.backspace();
        input.insert('e');
        assert_eq!(input.value(), "Jose Zoë");
        input.move_end();
        input.backspace();
        input.insert('e');
        assert_eq!(input.value(), "Jose Zoe");
    }

    #[test]
    fn text_input_caps_length_in_chars() {
        let mut input = TextInput::default();
        for _ in 0..100 {
            input.insert('é');
        }
        assert_eq!(input.value().chars().count(), MAX_FIELD_CHARS);
        assert_eq!(input.cursor(), MAX_FIELD_CHARS);
    }

    #[test]
    fn cursor_stays_on_seat_across_rebuilds() {
        let mut view = TerminalView::default();
        view.rebuild_grid(&grid(Sector::All));
        view.move_cursor(2, 9);
        assert_eq!(view.focused_cell().map(|cell| cell.code.to_string()), Some("C-10".into()));

        view.rebuild_grid(&grid(Sector::Right));
        assert_eq!(view.focused_cell().map(|cell| cell.code.to_string()), Some("C-10".into()));

        view.rebuild_grid(&grid(Sector::Left));
        assert_eq!(view.cursor(), (2, 3));
    }

    #[test]
    fn opening_booking_resets_fields() {
        let mut view = TerminalView::default();
        let prompt = BookingPrompt {
            checkout: sugarland_core::Checkout::Desktop,
            summary: "1 seat(s): D-5 · Total $10".into(),
            hint: String::new(),
        };
        view.open_booking(&prompt);
        if let Some(modal) = view.booking.as_mut() {
            modal.focused_mut().insert('x');
        }
        view.open_booking(&prompt);
        let modal = view.booking.as_ref().expect("modal open");
        assert_eq!(modal.form(), BookingForm::default());
    }
}
