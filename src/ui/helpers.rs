use std::error::Error;

use anyhow::Chain;

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::actions::Action;

/// Tab strip showing every action with the selected one highlighted.
pub(crate) fn action_selector_line(selected: Action) -> Line<'static> {
    let mut spans = Vec::with_capacity(Action::ALL.len() * 2);
    for (idx, action) in Action::ALL.into_iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw("  "));
        }
        let style = if action == selected {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} ", action.label()), style));
    }
    Line::from(spans)
}

/// Message for the footer: the top-level description, plus the innermost
/// cause when the error wraps one.
pub(crate) fn surface_error(err: &(dyn Error + 'static)) -> String {
    match Chain::new(err).skip(1).last() {
        Some(root) => format!("{err} ({root})"),
        None => err.to_string(),
    }
}
