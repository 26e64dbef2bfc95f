use crate::components::curve_chart::CurveChart;
use crate::components::findings::{RecommendationsPanel, render_conclusion, render_failure};
use crate::components::input_form::InputForm;
use crate::components::metrics_panel::{MetricsPanel, PANEL_HEIGHT};
use crate::components::{Component, EventResult};
use crate::state::AppState;
use crossterm::event::KeyEvent;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

use super::Screen;

/// Width of the input form column
const FORM_WIDTH: u16 = 40;

pub struct CalculatorScreen {
    form: InputForm,
    metrics: MetricsPanel,
    chart: CurveChart,
    recommendations: RecommendationsPanel,
}

impl CalculatorScreen {
    pub fn new() -> Self {
        Self {
            form: InputForm::new(),
            metrics: MetricsPanel::new(),
            chart: CurveChart::new(),
            recommendations: RecommendationsPanel::new(),
        }
    }

    fn render_results(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let result = match &state.result {
            Ok(result) => result,
            Err(err) => {
                render_failure(frame, area, err);
                return;
            }
        };

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(PANEL_HEIGHT),
                Constraint::Length(4),
                Constraint::Min(10),
                Constraint::Length(7),
            ])
            .split(area);

        self.metrics.render(frame, rows[0], state);
        render_conclusion(frame, rows[1], result);
        self.chart.render(frame, rows[2], state);
        self.recommendations.render(frame, rows[3], state);
    }
}

impl Default for CalculatorScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for CalculatorScreen {
    fn handle_key(&mut self, key: KeyEvent, state: &mut AppState) -> EventResult {
        self.form.handle_key(key, state)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(FORM_WIDTH), Constraint::Min(0)])
            .split(area);

        self.form.render(frame, columns[0], state);
        self.render_results(frame, columns[1], state);
    }
}

impl Screen for CalculatorScreen {
    fn title(&self) -> &str {
        "Calculator"
    }
}
