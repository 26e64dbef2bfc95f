//! Common styling utilities for TUI components

use dqcalc_core::Severity;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders};

use crate::insights::Tone;

/// Standard color for focused panels
pub const FOCUS_COLOR: Color = Color::Yellow;

/// Standard color for help text
pub const HELP_COLOR: Color = Color::DarkGray;

/// Standard color for headers
pub const HEADER_COLOR: Color = Color::Cyan;

pub const POSITIVE_COLOR: Color = Color::Green;
pub const NEGATIVE_COLOR: Color = Color::Red;
pub const WARNING_COLOR: Color = Color::Yellow;

/// Color of the true-lift reference series
pub const TRUE_LIFT_COLOR: Color = Color::Blue;

/// Create a block with a title that shows focused state via border color.
pub fn focused_block(title: &str, focused: bool) -> Block<'static> {
    let border_style = if focused {
        Style::default().fg(FOCUS_COLOR)
    } else {
        Style::default()
    };

    Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title.to_string())
}

/// Like [`focused_block`], with bottom help text shown only while focused.
pub fn focused_block_with_help(title: &str, focused: bool, help_text: &str) -> Block<'static> {
    let mut block = focused_block(title, focused);
    if focused && !help_text.is_empty() {
        block = block.title_bottom(Line::from(format!(" {} ", help_text)).fg(HELP_COLOR));
    }
    block
}

pub fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Good => POSITIVE_COLOR,
        Tone::Fair => Color::LightGreen,
        Tone::Caution => WARNING_COLOR,
        Tone::Bad => NEGATIVE_COLOR,
    }
}

pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Success => POSITIVE_COLOR,
        Severity::Info => Color::LightBlue,
        Severity::Warning => WARNING_COLOR,
        Severity::Danger => NEGATIVE_COLOR,
    }
}

/// Green for a positive lift, red otherwise
pub fn lift_color(lift: f64) -> Color {
    if lift > 0.0 {
        POSITIVE_COLOR
    } else {
        NEGATIVE_COLOR
    }
}

/// Significant curve points are green, the rest red
pub fn significance_color(is_significant: bool) -> Color {
    if is_significant {
        POSITIVE_COLOR
    } else {
        NEGATIVE_COLOR
    }
}
