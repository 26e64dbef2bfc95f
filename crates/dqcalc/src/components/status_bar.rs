use super::{Component, EventResult};
use crate::state::{AppState, TabId};
use crate::util::styles::{HELP_COLOR, NEGATIVE_COLOR, POSITIVE_COLOR};
use crossterm::event::KeyEvent;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub struct StatusBar;

impl StatusBar {
    pub fn new() -> Self {
        Self
    }

    fn help_text(state: &AppState) -> &'static str {
        if state.form.is_editing() {
            return "0-9 .: type | -: sign | Backspace: delete | Enter: apply | Esc: cancel";
        }
        match state.active_tab {
            TabId::Calculator => {
                "j/k: field | h/l or -/+: step | Enter: edit | r: reset | Ctrl+S: save defaults | 1-3: tabs | q: quit"
            }
            TabId::Sensitivity => "j/k or h/l: parameter | m: metric | 1-3: tabs | q: quit",
            TabId::Guide => "1-3: tabs | q: quit",
        }
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for StatusBar {
    fn handle_key(&mut self, _key: KeyEvent, _state: &mut AppState) -> EventResult {
        EventResult::NotHandled
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let content = if let Some(error) = &state.error_message {
            Line::from(vec![
                Span::styled("Error: ", Style::default().fg(NEGATIVE_COLOR)),
                Span::raw(error.as_str()),
            ])
        } else if let Err(err) = &state.result {
            Line::from(vec![
                Span::styled("Engine: ", Style::default().fg(NEGATIVE_COLOR)),
                Span::raw(err.to_string()),
            ])
        } else if let Some(info) = &state.info_message {
            Line::from(Span::styled(info.as_str(), Style::default().fg(POSITIVE_COLOR)))
        } else {
            Line::from(Span::styled(
                Self::help_text(state),
                Style::default().fg(HELP_COLOR),
            ))
        };

        let paragraph = Paragraph::new(content).block(Block::default().borders(Borders::TOP));

        frame.render_widget(paragraph, area);
    }
}
