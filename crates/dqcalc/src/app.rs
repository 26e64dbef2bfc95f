use std::io;
use std::path::{Path, PathBuf};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

use crate::components::{Component, EventResult, status_bar::StatusBar, tab_bar::TabBar};
use crate::data::{DataConfig, DataDirectory, load_input_file};
use crate::screens::{
    Screen, calculator::CalculatorScreen, guide::GuideScreen, sensitivity::SensitivityScreen,
};
use crate::state::{AppState, TabId};

pub struct App {
    state: AppState,
    tab_bar: TabBar,
    status_bar: StatusBar,
    calculator_screen: CalculatorScreen,
    sensitivity_screen: SensitivityScreen,
    guide_screen: GuideScreen,
}

impl Default for App {
    fn default() -> Self {
        Self::from_state(AppState::default())
    }
}

impl App {
    fn from_state(state: AppState) -> Self {
        Self {
            state,
            tab_bar: TabBar::new(),
            status_bar: StatusBar::new(),
            calculator_screen: CalculatorScreen::new(),
            sensitivity_screen: SensitivityScreen::new(),
            guide_screen: GuideScreen::new(),
        }
    }

    /// Create the app from the data directory's config.yaml, optionally
    /// starting from an experiment file instead of the saved defaults.
    ///
    /// Load failures are shown in the status bar and built-in defaults used.
    pub fn with_data_dir(data_dir: PathBuf, input_file: Option<&Path>) -> Self {
        let storage = DataDirectory::new(data_dir.clone());
        let (config, config_error) = match storage.load_config() {
            Ok(config) => (config, None),
            Err(e) => {
                tracing::warn!("Failed to load config from {:?}: {}", data_dir, e);
                (DataConfig::default(), Some(e.to_string()))
            }
        };

        let mut state = AppState::from_config(config, Some(data_dir));

        if let Some(path) = input_file {
            match load_input_file(path) {
                Ok(input) => {
                    tracing::info!("Loaded experiment from {}", path.display());
                    state = state.with_input(input);
                }
                Err(e) => state.set_error(e.to_string()),
            }
        }
        if let Some(message) = config_error {
            state.set_error(format!("{message} (using built-in defaults)"));
        }

        Self::from_state(state)
    }

    /// runs the application's main loop until the user quits
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        tracing::info!("Starting TUI");
        while !self.state.exit {
            terminal.draw(|frame| self.draw(frame))?;
            self.handle_events()?;
        }
        Ok(())
    }

    fn draw(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Tab bar
                Constraint::Min(0),    // Content
                Constraint::Length(2), // Status bar
            ])
            .split(frame.area());

        self.tab_bar.render(frame, chunks[0], &self.state);
        self.render_active_screen(frame, chunks[1]);
        self.status_bar.render(frame, chunks[2], &self.state);
    }

    fn render_active_screen(&mut self, frame: &mut Frame, area: Rect) {
        match self.state.active_tab {
            TabId::Calculator => self.calculator_screen.render(frame, area, &self.state),
            TabId::Sensitivity => self.sensitivity_screen.render(frame, area, &self.state),
            TabId::Guide => self.guide_screen.render(frame, area, &self.state),
        }
    }

    fn active_title(&self) -> &str {
        match self.state.active_tab {
            TabId::Calculator => self.calculator_screen.title(),
            TabId::Sensitivity => self.sensitivity_screen.title(),
            TabId::Guide => self.guide_screen.title(),
        }
    }

    fn handle_events(&mut self) -> io::Result<()> {
        match event::read()? {
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                self.handle_key_event(key_event)
            }
            _ => {}
        };
        Ok(())
    }

    fn save_defaults(&mut self) {
        match self.state.save_defaults() {
            Ok(()) => self.state.set_info("Saved current inputs as defaults".to_string()),
            Err(e) => self.state.set_error(format!("Failed to save: {}", e)),
        }
    }

    fn handle_key_event(&mut self, key_event: KeyEvent) {
        // Global key bindings
        match key_event.code {
            KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state.exit = true;
                return;
            }
            KeyCode::Char('s') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                self.save_defaults();
                return;
            }
            _ => {}
        }

        // An open edit takes every other key
        if !self.state.form.is_editing() {
            match key_event.code {
                KeyCode::Char('q') if key_event.modifiers.is_empty() => {
                    self.state.exit = true;
                    return;
                }
                KeyCode::Char('r') if key_event.modifiers.is_empty() => {
                    self.state.reset_to_defaults();
                    return;
                }
                KeyCode::Esc => {
                    self.state.clear_error();
                    return;
                }
                _ => {}
            }

            let result = self.tab_bar.handle_key(key_event, &mut self.state);
            if result != EventResult::NotHandled {
                tracing::debug!(screen = self.active_title(), "Switched screen");
                return;
            }
        }

        let result = match self.state.active_tab {
            TabId::Calculator => self.calculator_screen.handle_key(key_event, &mut self.state),
            TabId::Sensitivity => self.sensitivity_screen.handle_key(key_event, &mut self.state),
            TabId::Guide => self.guide_screen.handle_key(key_event, &mut self.state),
        };

        if result == EventResult::Exit {
            self.state.exit = true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_digits_switch_tabs_unless_editing() {
        let mut app = App::default();

        app.handle_key_event(key(KeyCode::Char('2')));
        assert_eq!(app.state.active_tab, TabId::Sensitivity);
        app.handle_key_event(key(KeyCode::Char('1')));
        assert_eq!(app.state.active_tab, TabId::Calculator);

        // Sample size: Enter, type, Enter
        app.handle_key_event(key(KeyCode::Enter));
        for c in ['2', '0', '0', '0', '0'] {
            app.handle_key_event(key(KeyCode::Char(c)));
        }
        assert_eq!(app.state.active_tab, TabId::Calculator);
        app.handle_key_event(key(KeyCode::Enter));
        assert_eq!(app.state.input.sample_size, 20_000);
    }

    #[test]
    fn test_q_and_r_are_text_while_editing() {
        let mut app = App::default();
        app.handle_key_event(key(KeyCode::Enter));
        app.handle_key_event(key(KeyCode::Char('q')));
        assert!(!app.state.exit);

        app.handle_key_event(key(KeyCode::Esc));
        assert!(!app.state.form.is_editing());
        app.handle_key_event(key(KeyCode::Char('q')));
        assert!(app.state.exit);
    }

    #[test]
    fn test_reset_key() {
        let mut app = App::default();
        app.handle_key_event(key(KeyCode::Right));
        assert_eq!(app.state.input.sample_size, 11_000);
        app.handle_key_event(key(KeyCode::Char('r')));
        assert_eq!(app.state.input.sample_size, 10_000);
    }

    #[test]
    fn test_malformed_config_falls_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("config.yaml"), "defaults: [oops\n").unwrap();

        let app = App::with_data_dir(temp_dir.path().to_path_buf(), None);
        assert!(app.state.error_message.is_some());
        assert_eq!(app.state.input, dqcalc_core::ExperimentInput::default());
    }

    #[test]
    fn test_ctrl_s_saves_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = App::with_data_dir(temp_dir.path().to_path_buf(), None);
        app.handle_key_event(key(KeyCode::Right));
        app.handle_key_event(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));

        assert!(app.state.info_message.is_some());
        let saved = DataDirectory::new(temp_dir.path().to_path_buf())
            .load_config()
            .unwrap();
        assert_eq!(saved.defaults.sample_size, 11_000);
    }
}
