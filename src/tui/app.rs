//! Main TUI application

use anyhow::Result;
use chrono::Local;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use std::time::{Duration, Instant};

use super::list_screen::{ListScreen, ScreenSettings};
use super::styles::Theme;
use crate::config::Config;
use crate::task::IdGenerator;

// Roughly 30 frames per second while something animates
const FRAME_INTERVAL: Duration = Duration::from_millis(33);

pub struct App {
    screen: ListScreen,
    should_quit: bool,
    theme: Theme,
    needs_redraw: bool,
}

impl App {
    pub fn new(config: &Config) -> Result<Self> {
        let mut ids = IdGenerator::new();
        let tasks = config.starting_tasks(&mut ids)?;
        tracing::info!(count = tasks.len(), theme = %config.theme, "starting to-do screen");

        let screen = ListScreen::new(
            tasks,
            ScreenSettings::from(config),
            Local::now().date_naive(),
            Instant::now(),
        );

        Ok(Self {
            screen,
            should_quit: false,
            theme: Theme::by_name(&config.theme),
            needs_redraw: false,
        })
    }

    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    ) -> Result<()> {
        // Initial render
        terminal.clear()?;
        terminal.draw(|f| self.render(f))?;

        loop {
            let mut dirty = false;

            // Poll with short timeout for responsive input
            if event::poll(FRAME_INTERVAL)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key);
                        dirty = true;
                    }
                    Event::Mouse(mouse) => {
                        if let Some(action) = self.screen.handle_mouse(mouse) {
                            self.apply(action);
                        }
                        dirty = true;
                    }
                    Event::Resize(_, _) => {
                        self.needs_redraw = true;
                        dirty = true;
                    }
                    _ => {}
                }
            }

            if self.should_quit {
                break;
            }

            if self.screen.tick(Instant::now(), Local::now().date_naive()) {
                dirty = true;
            }

            // Full clear after a resize so no stale cells survive
            if self.needs_redraw {
                terminal.clear()?;
                self.needs_redraw = false;
            }

            // Single draw per iteration to avoid flicker
            if dirty {
                terminal.draw(|f| self.render(f))?;
            }
        }

        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        self.screen.render(frame, frame.area(), &self.theme);
    }

    fn handle_key(&mut self, key: KeyEvent) {
        // Global keybindings
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if let Some(action) = self.screen.handle_key(key) {
            self.apply(action);
        }
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::Quit => {
                tracing::debug!("quit requested");
                self.should_quit = true;
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    fn quiet_config() -> Config {
        Config {
            seed_demo_tasks: true,
            animations: false,
            ..Config::default()
        }
    }

    #[test]
    fn test_action_enum() {
        assert_eq!(Action::Quit, Action::Quit.clone());
    }

    #[test]
    fn test_new_seeds_demo_tasks() {
        let app = App::new(&quiet_config()).unwrap();
        assert_eq!(app.screen.tasks().len(), 3);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_new_with_seeding_disabled() {
        let config = Config {
            seed_demo_tasks: false,
            ..quiet_config()
        };
        let app = App::new(&config).unwrap();
        assert!(app.screen.tasks().is_empty());
    }

    #[test]
    fn test_q_quits() {
        let mut app = App::new(&quiet_config()).unwrap();
        app.handle_key(key(KeyCode::Char('q'), KeyModifiers::NONE));
        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits_while_editing() {
        let mut app = App::new(&quiet_config()).unwrap();
        app.handle_key(key(KeyCode::Enter, KeyModifiers::NONE));
        assert!(app.screen.editor().is_some());
        app.handle_key(key(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn test_render_draws_screen() {
        use ratatui::backend::TestBackend;

        let mut app = App::new(&quiet_config()).unwrap();
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Write the report"));
    }
}
