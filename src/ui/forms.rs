use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::actions::{Action, ActionRequest};
use crate::error::Field;

/// Display order of the input fields.
pub(crate) const FIELD_ORDER: [Field; 4] = [Field::BookId, Field::Title, Field::Author, Field::Student];

/// The action selector plus the four text inputs.
#[derive(Clone)]
pub(crate) struct ActionForm {
    pub(crate) action: Action,
    pub(crate) values: ActionRequest,
    pub(crate) active: Field,
    pub(crate) error: Option<String>,
}

impl Default for ActionForm {
    fn default() -> Self {
        Self {
            action: Action::Add,
            values: ActionRequest::default(),
            active: Field::BookId,
            error: None,
        }
    }
}

impl ActionForm {
    /// Whether `field` is read by the selected action.
    pub(crate) fn enabled(&self, field: Field) -> bool {
        self.action.required_fields().contains(&field)
    }

    pub(crate) fn has_inputs(&self) -> bool {
        !self.action.required_fields().is_empty()
    }

    /// Cycle the selected action. Focus jumps to the first field the new
    /// action uses when the current one no longer applies.
    pub(crate) fn shift_action(&mut self, delta: isize) {
        let count = Action::ALL.len() as isize;
        let current = Action::ALL
            .iter()
            .position(|action| *action == self.action)
            .unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(count) as usize;
        self.action = Action::ALL[next];
        self.error = None;

        if !self.enabled(self.active) {
            if let Some(first) = self.action.required_fields().first() {
                self.active = *first;
            }
        }
    }

    /// Move focus to the next (or previous) enabled field, wrapping around.
    pub(crate) fn shift_focus(&mut self, forward: bool) {
        let enabled: Vec<Field> = FIELD_ORDER
            .into_iter()
            .filter(|field| self.enabled(*field))
            .collect();
        if enabled.is_empty() {
            return;
        }

        let next = match enabled.iter().position(|field| *field == self.active) {
            Some(idx) if forward => (idx + 1) % enabled.len(),
            Some(idx) => (idx + enabled.len() - 1) % enabled.len(),
            None => 0,
        };
        self.active = enabled[next];
    }

    /// Append a character to the active field. Returns false when nothing
    /// accepted the keystroke.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() || !self.enabled(self.active) {
            return false;
        }
        self.value_mut(self.active).push(ch);
        true
    }

    pub(crate) fn backspace(&mut self) {
        if self.enabled(self.active) {
            self.value_mut(self.active).pop();
        }
    }

    /// Empty every input after a successful action and focus the first field
    /// of the selected action, which stays selected.
    pub(crate) fn clear(&mut self) {
        self.values = ActionRequest::default();
        self.error = None;
        if let Some(first) = self.action.required_fields().first() {
            self.active = *first;
        }
    }

    pub(crate) fn value_len(&self, field: Field) -> usize {
        self.values.value(field).chars().count()
    }

    /// Render a single `Label: value` line for the form widget.
    pub(crate) fn build_line(&self, field: Field) -> Line<'static> {
        let value = self.values.value(field);
        let enabled = self.enabled(field);
        let is_active = enabled && self.active == field;

        let display = if !enabled {
            "-".to_string()
        } else if value.is_empty() {
            "<required>".to_string()
        } else {
            value.to_string()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if !enabled || value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        let label_style = if enabled {
            Style::default()
        } else {
            Style::default().fg(Color::DarkGray)
        };

        Line::from(vec![
            Span::styled(format!("{}: ", field.label()), label_style),
            Span::styled(display, style),
        ])
    }

    fn value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::BookId => &mut self.values.id,
            Field::Title => &mut self.values.title,
            Field::Author => &mut self.values.author,
            Field::Student => &mut self.values.student,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_skips_fields_the_action_ignores() {
        let mut form = ActionForm::default();
        form.shift_action(2);
        assert_eq!(form.action, Action::Issue);

        form.shift_focus(true);
        assert_eq!(form.active, Field::Student);
        form.shift_focus(true);
        assert_eq!(form.active, Field::BookId);
        form.shift_focus(false);
        assert_eq!(form.active, Field::Student);
    }

    #[test]
    fn switching_action_moves_focus_off_disabled_field() {
        let mut form = ActionForm::default();
        form.shift_focus(true);
        assert_eq!(form.active, Field::Title);

        form.shift_action(1);
        assert_eq!(form.action, Action::Remove);
        assert_eq!(form.active, Field::BookId);
    }

    #[test]
    fn action_selection_wraps_both_ways() {
        let mut form = ActionForm::default();
        form.shift_action(-1);
        assert_eq!(form.action, Action::View);
        form.shift_action(1);
        assert_eq!(form.action, Action::Add);
    }

    #[test]
    fn view_accepts_no_input() {
        let mut form = ActionForm::default();
        form.shift_action(-1);
        assert!(!form.has_inputs());
        assert!(!form.push_char('x'));
        assert_eq!(form.values, ActionRequest::default());
    }

    #[test]
    fn typing_and_backspace_edit_the_active_field() {
        let mut form = ActionForm::default();
        for ch in "B12".chars() {
            assert!(form.push_char(ch));
        }
        form.backspace();
        assert!(!form.push_char('\n'));
        assert_eq!(form.values.id, "B1");
        assert_eq!(form.value_len(Field::BookId), 2);
    }

    #[test]
    fn clear_returns_focus_to_the_first_field() {
        let mut form = ActionForm::default();
        form.shift_focus(true);
        form.shift_focus(true);
        assert_eq!(form.active, Field::Author);
        form.push_char('x');

        form.clear();

        assert_eq!(form.active, Field::BookId);
        assert_eq!(form.values, ActionRequest::default());
        assert_eq!(form.action, Action::Add);
    }
}
