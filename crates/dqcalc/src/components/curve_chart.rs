//! Error rate vs. observed lift chart.

use super::{Component, EventResult};
use crate::state::AppState;
use crate::util::styles::{HELP_COLOR, NEGATIVE_COLOR, TRUE_LIFT_COLOR, significance_color};
use crossterm::event::KeyEvent;
use dqcalc_core::CurvePoint;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style, Stylize},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
};

/// Y-axis bounds: every plotted value with one point of padding
pub fn lift_bounds(curve: &[CurvePoint]) -> [f64; 2] {
    let values = curve
        .iter()
        .flat_map(|p| [p.observed_lift, p.true_lift])
        .chain(std::iter::once(0.0));
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    [min - 1.0, max + 1.0]
}

pub struct CurveChart;

impl CurveChart {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CurveChart {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for CurveChart {
    fn handle_key(&mut self, _key: KeyEvent, _state: &mut AppState) -> EventResult {
        EventResult::NotHandled
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" DATA QUALITY IMPACT ")
            .title_bottom(
                " green: still significant  red: significance lost  blue: true lift ".fg(HELP_COLOR),
            );

        let Ok(result) = &state.result else {
            frame.render_widget(Paragraph::new("  No curve to display.").block(block), area);
            return;
        };
        let curve = &result.curve;
        if curve.is_empty() {
            frame.render_widget(Paragraph::new("  No curve to display.").block(block), area);
            return;
        }

        let point = |p: &CurvePoint| (f64::from(p.error_rate), p.observed_lift);
        let observed: Vec<(f64, f64)> = curve.iter().map(point).collect();
        let significant: Vec<(f64, f64)> =
            curve.iter().filter(|p| p.is_significant).map(point).collect();
        let lost: Vec<(f64, f64)> = curve.iter().filter(|p| !p.is_significant).map(point).collect();
        let true_lift: Vec<(f64, f64)> = curve
            .iter()
            .map(|p| (f64::from(p.error_rate), p.true_lift))
            .collect();

        let x_min = f64::from(curve[0].error_rate);
        let x_max = f64::from(curve[curve.len() - 1].error_rate);
        let zero: Vec<(f64, f64)> = vec![(x_min, 0.0), (x_max, 0.0)];

        let datasets = vec![
            Dataset::default()
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::DarkGray))
                .data(&zero),
            // Dotted markers stand in for a dashed reference line
            Dataset::default()
                .name("True Lift")
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(TRUE_LIFT_COLOR))
                .data(&true_lift),
            Dataset::default()
                .name("Observed Lift")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(NEGATIVE_COLOR))
                .data(&observed),
            Dataset::default()
                .marker(symbols::Marker::Block)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(significance_color(true)))
                .data(&significant),
            Dataset::default()
                .marker(symbols::Marker::Block)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(significance_color(false)))
                .data(&lost),
        ];

        let [y_min, y_max] = lift_bounds(curve);
        let x_axis = Axis::default()
            .title("Error Rate (%)".dark_gray())
            .bounds([x_min, x_max])
            .labels(vec![
                Span::raw(format!("{x_min:.0}")),
                Span::raw(format!("{:.0}", (x_min + x_max) / 2.0)),
                Span::raw(format!("{x_max:.0}")),
            ]);
        let y_axis = Axis::default()
            .title("Lift (%)".dark_gray())
            .bounds([y_min, y_max])
            .labels(vec![
                Span::raw(format!("{y_min:.1}")),
                Span::raw(format!("{:.1}", (y_min + y_max) / 2.0)),
                Span::raw(format!("{y_max:.1}")),
            ]);

        let chart = Chart::new(datasets)
            .block(block)
            .x_axis(x_axis)
            .y_axis(y_axis);

        frame.render_widget(chart, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_include_zero_and_true_lift() {
        let curve = vec![
            CurvePoint {
                error_rate: 0,
                true_lift: 5.0,
                observed_lift: 4.0,
                is_significant: true,
            },
            CurvePoint {
                error_rate: 20,
                true_lift: 5.0,
                observed_lift: 1.5,
                is_significant: false,
            },
        ];
        assert_eq!(lift_bounds(&curve), [-1.0, 6.0]);
    }

    #[test]
    fn test_bounds_for_negative_curve() {
        let result = dqcalc_core::compute(&Default::default()).unwrap();
        let [lo, hi] = lift_bounds(&result.curve);
        assert!((lo - (-1.3174 - 1.0)).abs() < 1e-3);
        assert_eq!(hi, 6.0);
    }
}
