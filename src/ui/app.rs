use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::actions::ActionProcessor;
use crate::clock::Clock;
use crate::storage::Storage;

use super::forms::{ActionForm, FIELD_ORDER};
use super::helpers::{action_selector_line, surface_error};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Action tabs plus their border.
const SELECTOR_HEIGHT: u16 = 3;
/// Four fields, a spacer, the hint/error line, and the border.
const FORM_HEIGHT: u16 = 8;

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state for the TUI.
pub struct App<S, C> {
    processor: ActionProcessor<S, C>,
    form: ActionForm,
    result: String,
    result_scroll: u16,
    status: Option<StatusMessage>,
}

impl<S: Storage, C: Clock> App<S, C> {
    pub fn new(processor: ActionProcessor<S, C>) -> Self {
        Self {
            processor,
            form: ActionForm::default(),
            result: String::new(),
            result_scroll: 0,
            status: None,
        }
    }

    pub fn processor(&self) -> &ActionProcessor<S, C> {
        &self.processor
    }

    /// Text currently shown in the result panel.
    pub fn result_text(&self) -> &str {
        &self.result
    }

    /// Process one key press. Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Esc => return true,
            KeyCode::Left => self.form.shift_action(-1),
            KeyCode::Right => self.form.shift_action(1),
            KeyCode::Tab | KeyCode::Down => self.form.shift_focus(true),
            KeyCode::BackTab | KeyCode::Up => self.form.shift_focus(false),
            KeyCode::PageDown => self.result_scroll = self.result_scroll.saturating_add(5),
            KeyCode::PageUp => self.result_scroll = self.result_scroll.saturating_sub(5),
            KeyCode::Backspace => self.form.backspace(),
            KeyCode::Enter => self.submit(),
            KeyCode::Char(ch) => {
                if self.form.push_char(ch) {
                    self.form.error = None;
                }
            }
            _ => {}
        }
        false
    }

    /// Run the selected action with the current inputs.
    fn submit(&mut self) {
        let action = self.form.action;
        match self.processor.perform(action, &self.form.values) {
            Ok(outcome) => {
                self.result = outcome.to_string();
                self.result_scroll = 0;
                self.form.clear();
                let done = if action.mutates() {
                    format!("{} completed.", action.label())
                } else {
                    format!("{} books in catalog.", self.processor.store().len())
                };
                self.set_status(done, StatusKind::Info);
            }
            Err(err) => {
                let message = surface_error(&err);
                self.form.error = Some(message.clone());
                self.set_status(message, StatusKind::Error);
            }
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(SELECTOR_HEIGHT),
                Constraint::Length(FORM_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(area);

        self.draw_selector(frame, chunks[0]);
        self.draw_form(frame, chunks[1]);
        self.draw_result(frame, chunks[2]);
        self.draw_footer(frame, chunks[3]);
    }

    fn draw_selector(&self, frame: &mut Frame, area: Rect) {
        let title = format!(
            "Library Management System ({} books)",
            self.processor.store().len()
        );
        let block = Block::default().title(title).borders(Borders::ALL);
        let paragraph = Paragraph::new(action_selector_line(self.form.action)).block(block);
        frame.render_widget(paragraph, area);
    }

    fn draw_form(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(self.form.action.label())
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let mut lines: Vec<Line> = FIELD_ORDER
            .into_iter()
            .map(|field| self.form.build_line(field))
            .collect();
        lines.push(Line::from(""));

        if let Some(error) = &self.form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else if self.form.has_inputs() {
            lines.push(Line::from(Span::styled(
                "Enter to submit • Tab to switch field",
                Style::default().fg(Color::Gray),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to list the catalog",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        if !self.form.has_inputs() {
            return;
        }
        if let Some(row) = FIELD_ORDER.iter().position(|field| *field == self.form.active) {
            let prefix = self.form.active.label().len() + 2;
            let column = (prefix + self.form.value_len(self.form.active)) as u16;
            let cursor_x = inner.x + column.min(inner.width.saturating_sub(1));
            let cursor_y = inner.y + row as u16;
            if cursor_y < inner.y + inner.height {
                frame.set_cursor_position((cursor_x, cursor_y));
            }
        }
    }

    fn draw_result(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().title("Result").borders(Borders::ALL);
        let lines: Vec<Line> = self.result.lines().map(Line::from).collect();
        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((self.result_scroll, 0));
        frame.render_widget(paragraph, area);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph =
            Paragraph::new(vec![status_line, footer_instructions()]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn set_status<T: Into<String>>(&mut self, text: T, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }
}

fn footer_instructions() -> Line<'static> {
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    Line::from(vec![
        Span::styled("[←→]", key_style),
        Span::raw(" Action   "),
        Span::styled("[Tab]", key_style),
        Span::raw(" Field   "),
        Span::styled("[Enter]", key_style),
        Span::raw(" Submit   "),
        Span::styled("[PgUp/PgDn]", key_style),
        Span::raw(" Scroll   "),
        Span::styled("[Esc]", key_style),
        Span::raw(" Quit"),
    ])
}
