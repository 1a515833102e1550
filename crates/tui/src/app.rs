use std::{cmp, io, thread, time::Duration};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Tabs, Wrap},
    Frame, Terminal,
};
use sugarland_core::{summary::EMPTY_PLACEHOLDER, KeyValueStore, SeatSelector, Sector};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::screen::{FormField, TerminalView};

const POLL_RATE: Duration = Duration::from_millis(250);
const SEAT_WIDTH: u16 = 4;
const ROW_LABEL_WIDTH: u16 = 7;

#[derive(Debug, Clone)]
struct Theme {
    primary_fg: Color,
    accent: Color,
    muted: Color,
    selection_bg: Color,
    selection_fg: Color,
    success: Color,
    warning: Color,
    danger: Color,
    on_accent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_fg: Color::White,
            accent: Color::Cyan,
            muted: Color::DarkGray,
            selection_bg: Color::DarkGray,
            selection_fg: Color::White,
            success: Color::Green,
            warning: Color::Yellow,
            danger: Color::Red,
            on_accent: Color::Black,
        }
    }
}

enum AppEvent {
    Input(Event),
}

/// Terminal host for the seat selector.
pub struct SugarlandApp<S: KeyValueStore> {
    selector: SeatSelector<S, TerminalView>,
    theme: Theme,
    status: String,
    should_quit: bool,
}

impl<S: KeyValueStore> SugarlandApp<S> {
    pub fn new(selector: SeatSelector<S, TerminalView>) -> Self {
        Self {
            selector,
            theme: Theme::default(),
            status: "Ready".to_string(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut stdout = io::stdout();
        enable_raw_mode().context("failed to enter raw mode")?;
        execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

        let result = self.event_loop(&mut terminal).await;
        restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> Result<()> {
        terminal.hide_cursor()?;
        terminal.clear()?;

        let width = terminal.size()?.width;
        self.selector.on_init(width);
        info!(width, "seat selector ready");

        let (event_tx, mut event_rx) = mpsc::channel::<AppEvent>(128);
        spawn_input_thread(event_tx);

        loop {
            terminal.draw(|frame| self.draw(frame))?;
            if self.should_quit {
                break;
            }
            match event_rx.recv().await {
                Some(AppEvent::Input(event)) => self.handle_input(event),
                None => break,
            }
            if self.should_quit {
                break;
            }
        }
        Ok(())
    }

    fn view(&self) -> &TerminalView {
        self.selector.view()
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status = message.into();
    }

    fn handle_input(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if self.view().notice.is_some() {
                    self.handle_notice_key(key);
                } else if self.view().booking.is_some() {
                    self.handle_booking_key(key);
                } else {
                    self.handle_grid_key(key);
                }
            }
            Event::Resize(width, _) => self.selector.on_resize(width),
            _ => {}
        }
    }

    fn handle_notice_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            self.selector.view_mut().notice = None;
        }
    }

    fn handle_booking_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                if self.selector.on_cancel().is_ok() {
                    self.set_status("Booking cancelled");
                }
            }
            KeyCode::Enter => {
                let Some(form) = self.view().booking.as_ref().map(|modal| modal.form()) else {
                    return;
                };
                match self.selector.on_confirm(&form) {
                    Ok(record) => self.set_status(format!(
                        "Booked {} seat(s) for ${}",
                        record.seats.len(),
                        record.total
                    )),
                    Err(err) => self.set_status(format!("Booking failed: {err}")),
                }
            }
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                if let Some(modal) = self.selector.view_mut().booking.as_mut() {
                    modal.toggle_focus();
                }
            }
            code => {
                let Some(modal) = self.selector.view_mut().booking.as_mut() else {
                    return;
                };
                let input = modal.focused_mut();
                match code {
                    KeyCode::Left => input.move_cursor(-1),
                    KeyCode::Right => input.move_cursor(1),
                    KeyCode::Home => input.move_home(),
                    KeyCode::End => input.move_end(),
                    KeyCode::Backspace => input.backspace(),
                    KeyCode::Delete => input.delete(),
                    KeyCode::Char(ch)
                        if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT =>
                    {
                        input.insert(ch)
                    }
                    _ => {}
                }
            }
        }
    }

    fn handle_grid_key(&mut self, key: KeyEvent) {
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') => self.selector.view_mut().move_cursor(-1, 0),
            KeyCode::Down | KeyCode::Char('j') => self.selector.view_mut().move_cursor(1, 0),
            KeyCode::Left | KeyCode::Char('h') => self.selector.view_mut().move_cursor(0, -1),
            KeyCode::Right | KeyCode::Char('l') => self.selector.view_mut().move_cursor(0, 1),
            KeyCode::Char(' ') => self.activate_focused_seat(),
            KeyCode::Char(digit @ '1'..='4') => {
                let index = digit as usize - '1' as usize;
                self.change_sector(Sector::ALL[index]);
            }
            KeyCode::Tab => {
                let next = self.view().sector.next();
                self.change_sector(next);
            }
            KeyCode::Char('c') => {
                if self.view().controls.clear {
                    self.selector.on_clear();
                    self.set_status("Selection cleared");
                }
            }
            // Not gated on `controls.confirm`: with nothing selected the
            // selector answers with the "select a seat" notice.
            KeyCode::Enter | KeyCode::Char('b') => {
                let checkout = self.selector.default_checkout();
                if let Err(err) = self.selector.on_open_booking(checkout) {
                    debug!("booking not opened: {err}");
                }
            }
            _ => {}
        }
    }

    fn activate_focused_seat(&mut self) {
        let Some((code, interactive)) = self
            .view()
            .focused_cell()
            .map(|cell| (cell.code, cell.is_interactive()))
        else {
            return;
        };
        if !interactive {
            self.set_status(format!("Seat {code} is occupied"));
            return;
        }
        match self.selector.on_toggle_seat(code) {
            Ok(toggle) if toggle.is_selected() => self.set_status(format!("Selected {code}")),
            Ok(_) => self.set_status(format!("Released {code}")),
            Err(err) => self.set_status(format!("Error: {err}")),
        }
    }

    fn change_sector(&mut self, sector: Sector) {
        if self.selector.on_sector_change(sector) {
            self.set_status(format!("Showing {} seats", sector.label().to_lowercase()));
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let area = frame.size();
        let mobile = self.view().is_mobile();

        let mut constraints = vec![
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(10),
        ];
        if mobile {
            constraints.push(Constraint::Length(3));
        }
        constraints.push(Constraint::Length(3));
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        self.render_header(frame, rows[0]);
        self.render_sectors(frame, rows[1]);
        if mobile {
            self.render_grid(frame, rows[2]);
            self.render_mobile_bar(frame, rows[3]);
            self.render_status(frame, rows[4]);
        } else {
            let body = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Min(40), Constraint::Length(34)])
                .split(rows[2]);
            self.render_grid(frame, body[0]);
            self.render_side_panel(frame, body[1]);
            self.render_status(frame, rows[3]);
        }

        if self.view().booking.is_some() {
            self.render_booking_modal(frame);
        }
        if self.view().notice.is_some() {
            self.render_notice(frame);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let guide = &self.view().guide;
        let paragraph = Paragraph::new(vec![
            Line::from(Span::styled(
                guide.label,
                Style::default().fg(self.theme.accent),
            )),
            Line::from(Span::styled(guide.hint, Style::default().fg(self.theme.muted))),
        ])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Sugarland Theaters"),
        )
        .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn render_sectors(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = Sector::ALL
            .iter()
            .enumerate()
            .map(|(index, sector)| Line::from(format!("{} {}", index + 1, sector.label())))
            .collect();
        let selected = Sector::ALL
            .iter()
            .position(|sector| *sector == self.view().sector)
            .unwrap_or(0);
        let tabs = Tabs::new(titles)
            .block(Block::default().borders(Borders::ALL).title("Sector"))
            .select(selected)
            .highlight_style(
                Style::default()
                    .fg(self.theme.on_accent)
                    .bg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(tabs, area);
    }

    fn render_grid(&self, frame: &mut Frame, area: Rect) {
        let view = self.view();
        let cursor = view.cursor();
        let grid_width = ROW_LABEL_WIDTH + SEAT_WIDTH * view.grid.width() as u16;

        let mut lines = vec![
            Line::from(Span::styled(
                format!("{:^width$}", "SCREEN", width = grid_width as usize),
                Style::default()
                    .fg(self.theme.muted)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        for (row_index, row) in view.grid.rows.iter().enumerate() {
            let mut spans = vec![Span::styled(
                format!("{:<width$}", row.label, width = ROW_LABEL_WIDTH as usize),
                Style::default().fg(self.theme.muted),
            )];
            for (seat_index, cell) in row.seats.iter().enumerate() {
                let mut style = if cell.occupied {
                    Style::default().fg(self.theme.danger)
                } else if cell.selected {
                    Style::default()
                        .fg(self.theme.on_accent)
                        .bg(self.theme.success)
                } else {
                    Style::default().fg(self.theme.primary_fg)
                };
                if cursor == (row_index, seat_index) {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                let glyph = if cell.occupied {
                    " ×".to_string()
                } else {
                    format!("{:>2}", cell.col)
                };
                spans.push(Span::styled(format!("[{glyph}]"), style));
            }
            lines.push(Line::from(spans));
        }

        lines.push(Line::from(""));
        let focus = view
            .focused_cell()
            .map(|cell| format!("{} · ${}", cell.accessible_label(), cell.price))
            .unwrap_or_else(|| "No seats in this sector".to_string());
        lines.push(Line::from(Span::styled(
            focus,
            Style::default().fg(self.theme.warning),
        )));

        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Seats"))
            .alignment(Alignment::Left);
        frame.render_widget(paragraph, area);
    }

    fn render_side_panel(&self, frame: &mut Frame, area: Rect) {
        let view = self.view();
        let sections = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(5),
                Constraint::Length(5),
                Constraint::Length(4),
            ])
            .split(area);

        let items: Vec<ListItem> = if view.summary.is_empty() {
            vec![ListItem::new(Span::styled(
                EMPTY_PLACEHOLDER,
                Style::default().fg(self.theme.muted),
            ))]
        } else {
            view.summary
                .lines
                .iter()
                .map(|line| ListItem::new(line.text()))
                .collect()
        };
        let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Selected"));
        frame.render_widget(list, sections[0]);

        let controls = view.controls;
        let totals = Paragraph::new(vec![
            Line::from(format!(
                "Seats: {}   Total: ${}",
                view.summary.count, view.summary.total
            )),
            Line::from(vec![
                self.button_span("c", "Clear", controls.clear),
                Span::raw("  "),
                self.button_span("Enter", "Continue", controls.confirm),
            ]),
        ])
        .block(Block::default().borders(Borders::ALL).title("Summary"))
        .wrap(Wrap { trim: true });
        frame.render_widget(totals, sections[1]);

        self.render_last_booking(frame, sections[2]);
    }

    fn render_mobile_bar(&self, frame: &mut Frame, area: Rect) {
        let view = self.view();
        let line = Line::from(vec![
            Span::raw(format!(
                "{} seat(s) · ${}   ",
                view.summary.count, view.summary.total
            )),
            self.button_span("Enter", "Book", view.controls.mobile_confirm),
        ]);
        let paragraph =
            Paragraph::new(line).block(Block::default().borders(Borders::ALL).title("Booking"));
        frame.render_widget(paragraph, area);
    }

    fn render_last_booking(&self, frame: &mut Frame, area: Rect) {
        let text = self.view().last_booking.clone().unwrap_or_default();
        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(self.theme.muted))
            .block(Block::default().borders(Borders::ALL).title("Last booking"))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn button_span(&self, key: &str, label: &str, enabled: bool) -> Span<'static> {
        let style = if enabled {
            Style::default()
                .fg(self.theme.selection_fg)
                .bg(self.theme.selection_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(self.theme.muted)
                .add_modifier(Modifier::DIM)
        };
        Span::styled(format!("[{key}] {label}"), style)
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let mut line = vec![Span::raw(self.status.clone())];
        if self.view().is_mobile() {
            if let Some(last) = self.view().last_booking.as_ref() {
                line.push(Span::raw(" • "));
                line.push(Span::styled(
                    last.clone(),
                    Style::default().fg(self.theme.muted),
                ));
            }
        }
        let paragraph = Paragraph::new(Line::from(line))
            .block(Block::default().borders(Borders::ALL).title("Status"))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn render_booking_modal(&self, frame: &mut Frame) {
        let Some(modal) = self.view().booking.as_ref() else {
            return;
        };
        let frame_area = frame.size();
        let width = cmp::max(cmp::min(64_u16, frame_area.width.saturating_sub(4)), 30_u16);
        let area = centered_rect(width, 12, frame_area);
        frame.render_widget(Clear, area);

        let field_line = |label: &str, value: &str, focused: bool| {
            let label_style = if focused {
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::styled(format!("{label:<7}"), label_style),
                Span::raw(value.to_string()),
            ])
        };
        let helper = Line::from(vec![
            Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" confirm  "),
            Span::styled("Tab", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" switch field  "),
            Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" cancel"),
        ]);

        // Fields come first so the cursor rows stay fixed when the hint wraps.
        let paragraph = Paragraph::new(vec![
            field_line("Name", modal.name.value(), modal.focus == FormField::Name),
            field_line("Email", modal.email.value(), modal.focus == FormField::Email),
            Line::from(""),
            Line::from(Span::styled(
                modal.prompt.summary.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                modal.prompt.hint.clone(),
                Style::default().fg(self.theme.muted),
            )),
            Line::from(""),
            helper,
        ])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Confirm booking"),
        )
        .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);

        let (input, row) = match modal.focus {
            FormField::Name => (&modal.name, 0),
            FormField::Email => (&modal.email, 1),
        };
        let cursor_y = area.y + 1 + row;
        let cursor_x =
            (area.x + 8 + input.cursor() as u16).min(area.x + area.width.saturating_sub(2));
        frame.set_cursor(cursor_x, cursor_y);
    }

    fn render_notice(&self, frame: &mut Frame) {
        let Some(notice) = self.view().notice else {
            return;
        };
        let area = centered_rect(52, 6, frame.size());
        frame.render_widget(Clear, area);
        let paragraph = Paragraph::new(vec![
            Line::from(notice.message()),
            Line::from(""),
            Line::from(Span::styled(
                "Press Enter to continue",
                Style::default().fg(self.theme.muted),
            )),
        ])
        .block(Block::default().borders(Borders::ALL).title("Notice"))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor()?;
    Ok(())
}

fn spawn_input_thread(sender: mpsc::Sender<AppEvent>) {
    thread::spawn(move || loop {
        match event::poll(POLL_RATE) {
            Ok(true) => match event::read() {
                Ok(evt) => {
                    if sender.blocking_send(AppEvent::Input(evt)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            },
            Ok(false) => {
                if sender.is_closed() {
                    break;
                }
            }
            Err(_) => break,
        }
    });
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
