//! One-parameter sensitivity sweep around the current inputs.

use crate::components::{Component, EventResult};
use crate::state::{AppState, sweepable_specs};
use crate::util::styles::{FOCUS_COLOR, HEADER_COLOR, NEGATIVE_COLOR, focused_block_with_help};
use crossterm::event::{KeyCode, KeyEvent};
use dqcalc_core::analysis::{AnalysisMetric, SweepResults};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, List, ListItem, Paragraph},
};

use super::Screen;

/// Y-axis bounds for a metric series, padded by 10% of the range
pub fn metric_bounds(metric: AnalysisMetric, values: &[f64]) -> [f64; 2] {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return [0.0, 1.0];
    }

    let padding = (max - min).abs().max(1.0) * 0.1;
    match metric {
        // Power is a percentage; keep the axis inside [0, 100]
        AnalysisMetric::StatPower => [(min - padding).max(0.0), (max + padding).min(100.0)],
        _ => [min - padding, max + padding],
    }
}

pub struct SensitivityScreen;

impl SensitivityScreen {
    pub fn new() -> Self {
        Self
    }

    fn render_parameters(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let selected = state.sensitivity.selected_spec().field;
        let mut items: Vec<ListItem> = vec![ListItem::new(Line::from(Span::styled(
            "Parameter",
            Style::default().fg(HEADER_COLOR).add_modifier(Modifier::BOLD),
        )))];

        items.extend(sweepable_specs().map(|spec| {
            if spec.field == selected {
                ListItem::new(Line::from(Span::styled(
                    format!("> {}", spec.label()),
                    Style::default().fg(FOCUS_COLOR).add_modifier(Modifier::BOLD),
                )))
            } else {
                ListItem::new(Line::from(format!("  {}", spec.label())))
            }
        }));

        items.push(ListItem::new(Line::from("")));
        items.push(ListItem::new(Line::from(Span::styled(
            "Metric",
            Style::default().fg(HEADER_COLOR).add_modifier(Modifier::BOLD),
        ))));
        items.push(ListItem::new(Line::from(format!(
            "  {}",
            state.sensitivity.metric.label()
        ))));
        items.push(ListItem::new(Line::from(format!(
            "  {} points",
            state.sensitivity.steps
        ))));

        let block = focused_block_with_help(" SWEEP ", true, "j/k: parameter  m: metric");
        frame.render_widget(List::new(items).block(block), area);
    }

    fn render_chart(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let block = Block::default().borders(Borders::ALL).title(" SENSITIVITY ");

        let results = match &state.sensitivity.results {
            Some(Ok(results)) => results,
            Some(Err(err)) => {
                let paragraph = Paragraph::new(Line::from(Span::styled(
                    format!("  Sweep failed: {err}"),
                    Style::default().fg(NEGATIVE_COLOR),
                )))
                .block(block);
                frame.render_widget(paragraph, area);
                return;
            }
            None => {
                frame.render_widget(Paragraph::new("  No sweep has run.").block(block), area);
                return;
            }
        };

        let data = results.series_1d();
        if data.is_empty() {
            let paragraph =
                Paragraph::new("  Every point of this sweep was invalid.").block(block);
            frame.render_widget(paragraph, area);
            return;
        }

        render_series(frame, area, block, results, &data);
    }
}

fn render_series(
    frame: &mut Frame,
    area: Rect,
    block: Block,
    results: &SweepResults,
    data: &[(f64, f64)],
) {
    let xs = &results.param_values[0];
    let x_min = xs.first().copied().unwrap_or(0.0);
    let x_max = xs.last().copied().unwrap_or(1.0);
    let values: Vec<f64> = data.iter().map(|&(_, y)| y).collect();
    let [y_min, y_max] = metric_bounds(results.metric, &values);

    let dataset = Dataset::default()
        .name(results.metric.short_label())
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(data);

    let x_label = results.param_labels.first().cloned().unwrap_or_default();
    let x_axis = Axis::default()
        .title(x_label.dark_gray())
        .bounds([x_min, x_max])
        .labels(vec![
            Span::raw(format!("{x_min:.1}")),
            Span::raw(format!("{:.1}", (x_min + x_max) / 2.0)),
            Span::raw(format!("{x_max:.1}")),
        ]);
    let y_axis = Axis::default()
        .title(results.metric.short_label().dark_gray())
        .bounds([y_min, y_max])
        .labels(vec![
            Span::raw(format!("{y_min:.1}")),
            Span::raw(format!("{:.1}", (y_min + y_max) / 2.0)),
            Span::raw(format!("{y_max:.1}")),
        ]);

    let failed = results.failed_points();
    let block = if failed > 0 {
        block.title_bottom(format!(" {failed} invalid point(s) skipped ").fg(NEGATIVE_COLOR))
    } else {
        block
    };

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(x_axis)
        .y_axis(y_axis);
    frame.render_widget(chart, area);
}

impl Default for SensitivityScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for SensitivityScreen {
    fn handle_key(&mut self, key: KeyEvent, state: &mut AppState) -> EventResult {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Right | KeyCode::Char('l') => {
                state.sensitivity.next_param();
            }
            KeyCode::Up | KeyCode::Char('k') | KeyCode::Left | KeyCode::Char('h') => {
                state.sensitivity.prev_param();
            }
            KeyCode::Char('m') => state.sensitivity.next_metric(),
            _ => return EventResult::NotHandled,
        }
        state.rerun_sweep();
        EventResult::Handled
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(34), Constraint::Min(0)])
            .split(area);

        self.render_parameters(frame, columns[0], state);
        self.render_chart(frame, columns[1], state);
    }
}

impl Screen for SensitivityScreen {
    fn title(&self) -> &str {
        "Sensitivity"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use dqcalc_core::InputField;

    #[test]
    fn test_power_bounds_stay_in_percent_range() {
        assert_eq!(
            metric_bounds(AnalysisMetric::StatPower, &[2.0, 99.5]),
            [0.0, 100.0]
        );
        let [lo, hi] = metric_bounds(AnalysisMetric::ActualLift, &[-2.0, 3.0]);
        assert!((lo - -2.5).abs() < 1e-12);
        assert!((hi - 3.5).abs() < 1e-12);
        assert_eq!(metric_bounds(AnalysisMetric::BiasRisk, &[]), [0.0, 1.0]);
    }

    #[test]
    fn test_keys_change_sweep() {
        let mut screen = SensitivityScreen::new();
        let mut state = AppState::default();

        screen.handle_key(KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE), &mut state);
        assert_eq!(
            state.sensitivity.selected_spec().field,
            InputField::BaselineConversion
        );

        screen.handle_key(KeyEvent::new(KeyCode::Char('m'), KeyModifiers::NONE), &mut state);
        let Some(Ok(results)) = &state.sensitivity.results else {
            panic!("sweep did not rerun");
        };
        assert_eq!(results.metric, AnalysisMetric::ActualLift);
        assert_eq!(results.param_labels, vec!["Baseline Conversion (%)".to_string()]);
    }
}
