use crate::components::{Component, EventResult};
use crate::insights::BEST_PRACTICES;
use crate::state::AppState;
use crate::util::styles::HEADER_COLOR;
use crossterm::event::KeyEvent;
use dqcalc_core::Conclusion;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::Screen;

const GLOSSARY: [(&str, &str); 9] = [
    ("Event Loss", "Complete failure to track events. Shrinks the usable sample."),
    (
        "User ID Errors",
        "Users attributed to the wrong identity or group, causing cross-contamination.",
    ),
    (
        "Partial Data",
        "Events recorded without key properties, so conversions go uncounted.",
    ),
    ("Segmentation Errors", "Users placed in the wrong segment. Recorded, not modeled."),
    ("Timeframe Bias", "Inconsistent measurement windows. Recorded, not modeled."),
    (
        "Statistical Power",
        "Chance of detecting the expected lift if it is real. 80% is the usual target.",
    ),
    (
        "Detection Threshold",
        "Smallest lift distinguishable from noise at the chosen confidence.",
    ),
    (
        "Bias Risk Score",
        "Difference between the two groups' quality scores. Asymmetry biases the result.",
    ),
    (
        "Error Rate Curve",
        "Observed lift as the partial-data rate scales from 0% to 20%.",
    ),
];

fn heading(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        text,
        Style::default().fg(HEADER_COLOR).add_modifier(Modifier::BOLD),
    ))
}

pub struct GuideScreen;

impl GuideScreen {
    pub fn new() -> Self {
        Self
    }

    fn glossary_lines() -> Vec<Line<'static>> {
        let mut lines = vec![heading("Key Concepts"), Line::from("")];
        for (term, meaning) in GLOSSARY {
            lines.push(Line::from(Span::styled(
                term,
                Style::default().add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(format!("  {meaning}")));
        }
        lines
    }

    fn practice_lines() -> Vec<Line<'static>> {
        let mut lines = vec![heading("Best Practices"), Line::from("")];
        lines.extend(BEST_PRACTICES.iter().map(|p| Line::from(format!("- {p}"))));
        lines.push(Line::from(""));
        lines.push(heading("Conclusions"));
        lines.push(Line::from(""));
        for conclusion in Conclusion::ALL {
            lines.push(Line::from(Span::styled(
                conclusion.label(),
                Style::default().add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(format!("  {}", conclusion.detail())));
        }
        lines
    }
}

impl Default for GuideScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for GuideScreen {
    fn handle_key(&mut self, _key: KeyEvent, _state: &mut AppState) -> EventResult {
        EventResult::NotHandled
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, _state: &AppState) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        let glossary = Paragraph::new(Self::glossary_lines())
            .block(Block::default().borders(Borders::ALL).title(" GLOSSARY "))
            .wrap(Wrap { trim: false });
        let practices = Paragraph::new(Self::practice_lines())
            .block(Block::default().borders(Borders::ALL).title(" GUIDANCE "))
            .wrap(Wrap { trim: false });

        frame.render_widget(glossary, columns[0]);
        frame.render_widget(practices, columns[1]);
    }
}

impl Screen for GuideScreen {
    fn title(&self) -> &str {
        "Guide"
    }
}
