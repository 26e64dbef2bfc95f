//! Experiment input form.

use super::{Component, EventResult};
use crate::state::{AppState, FORM_FIELDS};
use crate::util::styles::{FOCUS_COLOR, HEADER_COLOR, HELP_COLOR, focused_block_with_help};
use crossterm::event::{KeyCode, KeyEvent};
use dqcalc_core::InputField;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
};

/// Section heading shown above the first field of each group
fn section_title(field: InputField) -> Option<&'static str> {
    match field {
        InputField::SampleSize => Some("Experiment"),
        InputField::ControlEventLoss => Some("Control Group"),
        InputField::VariationEventLoss => Some("Variation Group"),
        InputField::SegmentationError => Some("Other Factors (not modeled)"),
        _ => None,
    }
}

/// Label text without the group prefix, since the section header names it
fn short_label(field: InputField) -> &'static str {
    match field {
        InputField::ControlEventLoss | InputField::VariationEventLoss => "Event Loss (%)",
        InputField::ControlIdError | InputField::VariationIdError => "User ID Errors (%)",
        InputField::ControlPartialData | InputField::VariationPartialData => "Partial Data (%)",
        InputField::Confidence => "Confidence Level",
        other => other.label(),
    }
}

pub struct InputForm;

impl InputForm {
    pub fn new() -> Self {
        Self
    }

    fn handle_editing_key(key: KeyEvent, state: &mut AppState) -> EventResult {
        match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => {
                state.form.push_char(c);
            }
            KeyCode::Char('-') => state.form.toggle_sign(),
            KeyCode::Backspace => state.form.backspace(),
            KeyCode::Enter => state.commit_edit(),
            KeyCode::Esc => state.form.cancel_edit(),
            KeyCode::Up => state.form.select_prev(),
            KeyCode::Down => state.form.select_next(),
            _ => return EventResult::NotHandled,
        }
        EventResult::Handled
    }
}

impl Default for InputForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for InputForm {
    fn handle_key(&mut self, key: KeyEvent, state: &mut AppState) -> EventResult {
        if state.form.is_editing() {
            return Self::handle_editing_key(key, state);
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => state.form.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => state.form.select_next(),
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('-') => state.step_selected(-1),
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('+') => state.step_selected(1),
            KeyCode::PageDown => state.step_selected(-10),
            KeyCode::PageUp => state.step_selected(10),
            KeyCode::Enter | KeyCode::Char('e') => state.form.begin_edit(),
            _ => return EventResult::NotHandled,
        }
        EventResult::Handled
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let mut items: Vec<ListItem> = Vec::new();

        for (idx, spec) in FORM_FIELDS.iter().enumerate() {
            if let Some(title) = section_title(spec.field) {
                if idx > 0 {
                    items.push(ListItem::new(Line::from("")));
                }
                items.push(ListItem::new(Line::from(Span::styled(
                    title,
                    Style::default()
                        .fg(HEADER_COLOR)
                        .add_modifier(Modifier::BOLD),
                ))));
            }

            let selected = idx == state.form.selected;
            let value_text = match (&state.form.buffer, selected) {
                (Some(buffer), true) => format!("{buffer}_"),
                _ => spec.format(spec.field.value(&state.input)),
            };

            let (marker, style) = if selected {
                (
                    "> ",
                    Style::default().fg(FOCUS_COLOR).add_modifier(Modifier::BOLD),
                )
            } else {
                ("  ", Style::default())
            };

            items.push(ListItem::new(Line::from(vec![
                Span::styled(marker, style),
                Span::styled(format!("{:<22}", short_label(spec.field)), style),
                Span::styled(format!("{:>10}", value_text), style),
            ])));
        }

        let spec = state.form.selected_spec();
        items.push(ListItem::new(Line::from("")));
        items.push(ListItem::new(Line::from(Span::styled(
            format!(
                "  range {} to {}",
                spec.format(spec.min),
                spec.format(spec.max)
            ),
            Style::default().fg(HELP_COLOR),
        ))));

        let block = focused_block_with_help(" INPUTS ", true, "Enter: edit  r: reset");
        frame.render_widget(List::new(items).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(form: &mut InputForm, state: &mut AppState, code: KeyCode) -> EventResult {
        form.handle_key(KeyEvent::new(code, KeyModifiers::NONE), state)
    }

    #[test]
    fn test_every_field_has_a_section() {
        let mut current = None;
        for spec in FORM_FIELDS {
            current = section_title(spec.field).or(current);
            assert!(current.is_some(), "{:?} has no section", spec.field);
        }
    }

    #[test]
    fn test_typed_edit_flow() {
        let mut form = InputForm::new();
        let mut state = AppState::default();

        // Expected lift is the third field
        press(&mut form, &mut state, KeyCode::Down);
        press(&mut form, &mut state, KeyCode::Down);
        press(&mut form, &mut state, KeyCode::Enter);
        for c in ['8', '.', '5'] {
            press(&mut form, &mut state, KeyCode::Char(c));
        }
        press(&mut form, &mut state, KeyCode::Char('-'));
        press(&mut form, &mut state, KeyCode::Enter);

        assert_eq!(state.input.expected_lift, -8.5);
        assert!(!state.form.is_editing());
    }

    #[test]
    fn test_minus_steps_when_not_editing() {
        let mut form = InputForm::new();
        let mut state = AppState::default();

        assert_eq!(
            press(&mut form, &mut state, KeyCode::Char('-')),
            EventResult::Handled
        );
        assert_eq!(state.input.sample_size, 9_000);

        press(&mut form, &mut state, KeyCode::PageUp);
        assert_eq!(state.input.sample_size, 19_000);
    }

    #[test]
    fn test_unrelated_key_passes_through() {
        let mut form = InputForm::new();
        let mut state = AppState::default();
        assert_eq!(
            press(&mut form, &mut state, KeyCode::Char('q')),
            EventResult::NotHandled
        );
    }
}
