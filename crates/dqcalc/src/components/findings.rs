//! Conclusion and recommendation panels, plus the engine failure panel.

use super::{Component, EventResult};
use crate::insights::recommendations;
use crate::state::AppState;
use crate::util::styles::{HELP_COLOR, NEGATIVE_COLOR, WARNING_COLOR, severity_color};
use crossterm::event::KeyEvent;
use dqcalc_core::{EngineError, ExperimentResult};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Headline and explanation for an engine failure. Bad input and undefined
/// arithmetic read differently.
pub fn failure_text(err: &EngineError) -> (&'static str, String) {
    match err {
        EngineError::Validation(e) => ("Input out of range", e.to_string()),
        EngineError::Arithmetic(e) => (
            "Metrics undefined for these inputs",
            format!("{e}. Adjust the error rates or conversion inputs."),
        ),
    }
}

pub fn render_conclusion(frame: &mut Frame, area: Rect, result: &ExperimentResult) {
    let conclusion = result.conclusion;
    let color = severity_color(conclusion.severity());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(" ANALYSIS CONCLUSION ");

    let lines = vec![
        Line::from(Span::styled(
            conclusion.label(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(conclusion.detail()),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

pub fn render_failure(frame: &mut Frame, area: Rect, err: &EngineError) {
    let (headline, detail) = failure_text(err);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(NEGATIVE_COLOR))
        .title(" CANNOT COMPUTE ");

    let lines = vec![
        Line::from(Span::styled(
            headline,
            Style::default().fg(NEGATIVE_COLOR).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(detail),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

pub struct RecommendationsPanel;

impl RecommendationsPanel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RecommendationsPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for RecommendationsPanel {
    fn handle_key(&mut self, _key: KeyEvent, _state: &mut AppState) -> EventResult {
        EventResult::NotHandled
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let block = Block::default().borders(Borders::ALL).title(" RECOMMENDATIONS ");
        let Ok(result) = &state.result else {
            frame.render_widget(block, area);
            return;
        };

        let recs = recommendations(&state.input, result);
        let lines: Vec<Line> = if recs.is_empty() {
            vec![Line::from(Span::styled(
                "No data quality concerns at these settings.",
                Style::default().fg(HELP_COLOR),
            ))]
        } else {
            recs.iter()
                .flat_map(|rec| {
                    [
                        Line::from(Span::styled(
                            format!("! {}", rec.headline()),
                            Style::default()
                                .fg(WARNING_COLOR)
                                .add_modifier(Modifier::BOLD),
                        )),
                        Line::from(format!("  {}", rec.advice())),
                    ]
                })
                .collect()
        };

        frame.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
            area,
        );
    }
}
