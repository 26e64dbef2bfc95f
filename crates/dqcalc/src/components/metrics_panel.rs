//! Key Metrics, Statistical Measures and Risk Analysis columns.

use super::{Component, EventResult};
use crate::insights::{
    bias_band, conversion_capture, lift_progress, power_band, quality_band, risk_band,
    sample_retention,
};
use crate::state::AppState;
use crate::util::format::{format_count, format_percent, format_ratio, format_signed_percent};
use crate::util::styles::{HEADER_COLOR, HELP_COLOR, lift_color, tone_color};
use crossterm::event::KeyEvent;
use dqcalc_core::{ExperimentInput, ExperimentResult};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Gauge, Paragraph},
};

/// Rows taken by one metric card: label, value, gauge, caption
const CARD_HEIGHT: u16 = 4;

/// Height of the whole panel including borders
pub const PANEL_HEIGHT: u16 = CARD_HEIGHT * 3 + 2;

struct Card<'a> {
    label: &'static str,
    value: Span<'a>,
    gauge: Option<(f64, Color)>,
    caption: String,
}

fn render_card(frame: &mut Frame, area: Rect, card: Card) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            card.label,
            Style::default().add_modifier(Modifier::BOLD),
        ))),
        rows[0],
    );
    frame.render_widget(Paragraph::new(Line::from(card.value)), rows[1]);

    if let Some((ratio, color)) = card.gauge {
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(color).bg(Color::Black))
            .ratio(ratio.clamp(0.0, 1.0))
            .label("");
        frame.render_widget(gauge, rows[2]);
    }

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            card.caption,
            Style::default().fg(HELP_COLOR),
        ))),
        rows[3],
    );
}

fn column_areas(block: Block, frame: &mut Frame, area: Rect) -> std::rc::Rc<[Rect]> {
    let inner = block.inner(area);
    frame.render_widget(block, area);
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(CARD_HEIGHT),
            Constraint::Length(CARD_HEIGHT),
            Constraint::Length(CARD_HEIGHT),
        ])
        .split(inner)
}

fn column_block(title: &'static str) -> Block<'static> {
    Block::default().borders(Borders::ALL).title(Span::styled(
        title,
        Style::default().fg(HEADER_COLOR).add_modifier(Modifier::BOLD),
    ))
}

pub struct MetricsPanel;

impl MetricsPanel {
    pub fn new() -> Self {
        Self
    }

    fn render_key_metrics(
        frame: &mut Frame,
        area: Rect,
        input: &ExperimentInput,
        result: &ExperimentResult,
    ) {
        let cards = column_areas(column_block(" Key Metrics "), frame, area);

        let retention = sample_retention(input, result);
        render_card(
            frame,
            cards[0],
            Card {
                label: "Effective Sample Size",
                value: Span::raw(format!("{} users", format_count(result.effective_sample_size))),
                gauge: Some((retention, Color::Cyan)),
                caption: format!("{} of original sample", format_ratio(retention)),
            },
        );

        let capture = conversion_capture(input, result);
        render_card(
            frame,
            cards[1],
            Card {
                label: "Observed Conversion",
                value: Span::raw(format!(
                    "{} vs {}",
                    format_percent(result.control_observed_conversion, 2),
                    format_percent(result.variation_observed_conversion, 2)
                )),
                gauge: Some((capture, Color::Cyan)),
                caption: format!("{} of true conversion captured", format_ratio(capture)),
            },
        );

        let progress = lift_progress(input.expected_lift, result.actual_lift);
        render_card(
            frame,
            cards[2],
            Card {
                label: "Actual Lift",
                value: Span::styled(
                    format_signed_percent(result.actual_lift, 2),
                    Style::default()
                        .fg(lift_color(result.actual_lift))
                        .add_modifier(Modifier::BOLD),
                ),
                gauge: progress.as_ref().map(|p| (p.ratio, Color::Cyan)),
                caption: progress.map(|p| p.text).unwrap_or_default(),
            },
        );
    }

    fn render_statistics(frame: &mut Frame, area: Rect, result: &ExperimentResult) {
        let cards = column_areas(column_block(" Statistical Measures "), frame, area);

        let power = power_band(result.stat_power);
        render_card(
            frame,
            cards[0],
            Card {
                label: "Statistical Power",
                value: Span::styled(
                    format_percent(result.stat_power, 1),
                    Style::default().fg(tone_color(power.tone)),
                ),
                gauge: Some((result.stat_power / 100.0, tone_color(power.tone))),
                caption: power.label.to_string(),
            },
        );

        let bias = bias_band(result.bias_risk_score);
        render_card(
            frame,
            cards[1],
            Card {
                label: "Bias Risk Score",
                value: Span::styled(
                    format!("{:.1}", result.bias_risk_score),
                    Style::default().fg(tone_color(bias.tone)),
                ),
                gauge: Some((result.bias_risk_score / 20.0, tone_color(bias.tone))),
                caption: bias.label.to_string(),
            },
        );

        render_card(
            frame,
            cards[2],
            Card {
                label: "Detection Threshold",
                value: Span::raw(format_percent(result.detection_threshold, 2)),
                gauge: None,
                caption: "Minimum detectable effect at chosen confidence".to_string(),
            },
        );
    }

    fn score_bar(label: &'static str, value: f64, color: Color) -> Bar<'static> {
        Bar::default()
            .value(value.max(0.0).round() as u64)
            .label(Line::from(label))
            .text_value(format!("{value:.1}"))
            .style(Style::default().fg(color))
            .value_style(Style::default().fg(Color::Black).bg(color))
    }

    fn render_risk(frame: &mut Frame, area: Rect, result: &ExperimentResult) {
        let block = column_block(" Risk Analysis ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let halves = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(2),
            ])
            .split(inner);

        let heading = |text: &'static str| {
            Paragraph::new(Line::from(Span::styled(
                text,
                Style::default().add_modifier(Modifier::BOLD),
            )))
        };

        frame.render_widget(heading("Data Quality Scores"), halves[0]);
        let quality_bars = [
            Self::score_bar(
                "Control",
                result.control_quality_score,
                tone_color(quality_band(result.control_quality_score).tone),
            ),
            Self::score_bar(
                "Variation",
                result.variation_quality_score,
                tone_color(quality_band(result.variation_quality_score).tone),
            ),
        ];
        frame.render_widget(
            BarChart::default()
                .data(BarGroup::default().bars(&quality_bars))
                .direction(Direction::Horizontal)
                .bar_width(1)
                .bar_gap(0)
                .max(100),
            halves[1],
        );

        frame.render_widget(heading("Decision Risk"), halves[3]);
        let risk_bars = [
            Self::score_bar(
                "False Pos",
                result.false_positive_risk,
                tone_color(risk_band(result.false_positive_risk).tone),
            ),
            Self::score_bar(
                "False Neg",
                result.false_negative_risk,
                tone_color(risk_band(result.false_negative_risk).tone),
            ),
        ];
        frame.render_widget(
            BarChart::default()
                .data(BarGroup::default().bars(&risk_bars))
                .direction(Direction::Horizontal)
                .bar_width(1)
                .bar_gap(0)
                .max(20),
            halves[4],
        );
    }
}

impl Default for MetricsPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for MetricsPanel {
    fn handle_key(&mut self, _key: KeyEvent, _state: &mut AppState) -> EventResult {
        EventResult::NotHandled
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let Ok(result) = &state.result else {
            return;
        };

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(area);

        Self::render_key_metrics(frame, columns[0], &state.input, result);
        Self::render_statistics(frame, columns[1], result);
        Self::render_risk(frame, columns[2], result);
    }
}
