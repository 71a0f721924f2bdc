//! Input dispatch.

use crate::commands::{self, CommandError};
use crate::config::AppConfig;
use crate::navigation::Page;
use crate::state::AppState;
use crate::store::ProfileRepository;
use lesson_core::{Catalog, LessonHost, LessonRegistry, LessonView, RegistryError, Severity, Surface};
use std::time::{Duration, Instant};
use tracing::debug;

/// A parsed page command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command<'a> {
    Show(Page),
    Open(&'a str),
    Buy(&'a str),
    Theme,
    Reload,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Command<'_>, CommandError> {
    let mut words = line.split_whitespace();
    let verb = words.next().unwrap_or_default().to_lowercase();
    let arg = words.next();

    let command = match (verb.as_str(), arg) {
        ("open", Some(selector)) => Command::Open(selector),
        ("buy", Some(selector)) => Command::Buy(selector),
        ("open", None) => return Err(CommandError::new("Usage: open <number|id>")),
        ("buy", None) => return Err(CommandError::new("Usage: buy <number|id>")),
        ("theme", _) => Command::Theme,
        ("reload", _) => Command::Reload,
        ("help" | "?", _) => Command::Help,
        ("quit" | "exit", _) => Command::Quit,
        (name, _) => match Page::parse(name) {
            Some(page) => Command::Show(page),
            None => {
                return Err(CommandError::new(format!(
                    "Unknown command '{name}'. Type `help` for commands."
                )))
            }
        },
    };
    Ok(command)
}

/// The running application: state, lesson catalog and the open lesson.
pub struct App {
    config: AppConfig,
    registry: LessonRegistry,
    catalog: Catalog,
    state: AppState,
    view: Option<Box<dyn LessonView>>,
    show_help: bool,
    running: bool,
}

impl App {
    /// Load the profile and scan the lessons directory.
    pub fn new(config: AppConfig, store: Box<dyn ProfileRepository>) -> Result<Self, RegistryError> {
        let registry = LessonRegistry::default();
        let catalog = registry.scan(&config.lessons_dir)?;
        Ok(Self {
            config,
            registry,
            catalog,
            state: AppState::new(store),
            view: None,
            show_help: false,
            running: true,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    #[cfg(test)]
    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    pub fn view(&self) -> Option<&dyn LessonView> {
        self.view.as_deref()
    }

    pub fn show_help(&self) -> bool {
        self.show_help
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advance animations and toast expiry. Returns whether the screen changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.state.tick(now)
    }

    /// Nothing on screen will change until the next input.
    pub fn is_idle(&self) -> bool {
        self.state.is_idle()
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Jump animations to their end values.
    pub fn settle(&mut self) {
        self.state.animations.finish_all();
    }

    /// Handle one line of input. Inside a lesson everything goes to the view.
    pub fn handle_line(&mut self, line: &str) {
        self.show_help = false;

        if let Some(view) = self.view.as_mut() {
            view.handle(line.trim(), &mut self.state);
            if !self.state.nav.in_lesson() {
                self.view = None;
            }
            return;
        }

        let line = line.trim();
        if line.is_empty() {
            return;
        }
        if let Err(e) = self.dispatch(line) {
            debug!(input = line, error = %e, "command failed");
        }
    }

    fn dispatch(&mut self, line: &str) -> Result<(), CommandError> {
        let command = parse_command(line).map_err(|e| {
            self.state
                .notify(&e.message, Severity::Warn, Duration::from_millis(2200));
            e
        })?;

        match command {
            Command::Show(page) => {
                self.state.nav.show_page(page);
                self.state.slide_page();
            }
            Command::Open(selector) => {
                let surface = Surface {
                    width: self.config.surface_width,
                };
                let view = commands::catalog::open_lesson(&mut self.state, &self.catalog, &surface, selector)?;
                self.view = Some(view);
            }
            Command::Buy(selector) => {
                commands::shop::buy_item(&mut self.state, selector)?;
            }
            Command::Theme => {
                commands::settings::toggle_theme(&mut self.state);
            }
            Command::Reload => {
                self.catalog = commands::catalog::reload_lessons(
                    &mut self.state,
                    &self.registry,
                    &self.config.lessons_dir,
                )?;
            }
            Command::Help => self.show_help = true,
            Command::Quit => self.quit(),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::Screen;
    use crate::store::JsonProfileStore;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    const STORY: &str = "\
---
id: s01
title: Mini Story
category: stories
builder: choice
gems: 18
xp: 18
message: Story completed!
---
Q: What does Alex order?
C: A pizza | A cold drink | A map
A: A cold drink
";

    fn app_in(dir: &TempDir) -> App {
        let config = AppConfig::in_dir(dir.path());
        fs::create_dir_all(&config.lessons_dir).unwrap();
        fs::write(config.lessons_dir.join("s01.md"), STORY).unwrap();
        let store = JsonProfileStore::open(&config.data_file);
        App::new(config, Box::new(store)).unwrap()
    }

    fn toast(app: &App) -> Option<&str> {
        app.state().toast.visible().map(|t| t.message.as_str())
    }

    #[test]
    fn commands_parse() {
        assert_eq!(parse_command("Shop").unwrap(), Command::Show(Page::Shop));
        assert_eq!(parse_command("open 2").unwrap(), Command::Open("2"));
        assert_eq!(parse_command("buy owl_hat").unwrap(), Command::Buy("owl_hat"));
        assert_eq!(parse_command("exit").unwrap(), Command::Quit);
        assert!(parse_command("open").is_err());
        assert!(parse_command("dance").is_err());
    }

    #[test]
    fn story_lesson_completes_back_to_stories() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);

        app.handle_line("stories");
        app.handle_line("open 1");
        assert!(app.view().is_some());
        assert_eq!(app.state().nav.screen(), &Screen::Lesson { id: "s01".to_string() });

        app.handle_line("2");

        assert!(app.view().is_none());
        assert_eq!(app.state().nav.screen(), &Screen::Page(Page::Stories));
        assert_eq!(app.state().profile.gems, 18);
        assert_eq!(toast(&app), Some("Story completed!  +18💎  +18⭐"));

        let saved = JsonProfileStore::open(&app.config().data_file).load();
        assert_eq!(saved.completion("s01").map(|c| c.times), Some(1));
    }

    #[test]
    fn back_leaves_lesson_without_reward() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        app.handle_line("open s01");
        app.handle_line("back");
        assert!(app.view().is_none());
        assert_eq!(app.state().nav.screen(), &Screen::Page(Page::Learn));
        assert_eq!(app.state().profile.gems, 0);
    }

    #[test]
    fn unknown_command_warns() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        app.handle_line("dance");
        let shown = app.state().toast.visible().unwrap();
        assert_eq!(shown.severity, Severity::Warn);
        assert!(shown.message.starts_with("Unknown command 'dance'"));
    }

    #[test]
    fn help_shows_until_next_input() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        app.handle_line("help");
        assert!(app.show_help());
        app.handle_line("shop");
        assert!(!app.show_help());
    }

    #[test]
    fn quit_stops_the_app() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        app.handle_line("quit");
        assert!(!app.is_running());
    }

    #[test]
    fn bundled_lessons_all_load_and_build() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig {
            lessons_dir: std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../lessons"),
            ..AppConfig::in_dir(dir.path())
        };
        let store = JsonProfileStore::open(&config.data_file);
        let mut app = App::new(config, Box::new(store)).unwrap();

        assert!(app.catalog().diagnostics().is_empty());
        let ids: Vec<_> = app.catalog().iter().map(|e| e.descriptor.id.clone()).collect();
        assert_eq!(
            ids,
            vec![
                "l01_greetings_mcq",
                "l02_order_food_match",
                "l03_plans_fillblank",
                "p01_speed_review",
                "p02_listening_choice",
                "s01_mini_story",
            ]
        );

        let listening = app.catalog().get("p02_listening_choice").unwrap();
        assert!(listening.builder.source().items.iter().all(|item| item.audio.is_some()));

        for id in ids {
            app.handle_line(&format!("open {id}"));
            assert!(app.view().is_some(), "{id} failed to build");
            app.handle_line("back");
        }
    }

    #[test]
    fn missing_lessons_dir_is_empty_catalog() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::in_dir(dir.path());
        let store = JsonProfileStore::open(&config.data_file);
        let app = App::new(config, Box::new(store)).unwrap();
        assert!(app.catalog().is_empty());
    }

    #[test]
    fn unknown_lesson_shows_error_toast() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        app.handle_line("open nope");
        assert_eq!(toast(&app), Some("No lesson 'nope' here."));
        app.handle_line("stories");
        app.handle_line("open 5");
        let shown = app.state().toast.visible().unwrap();
        assert_eq!(shown.severity, Severity::Error);
        assert_eq!(shown.message, "No lesson '5' here.");
        assert!(app.view().is_none());
    }

    #[test]
    fn idle_once_toast_expires() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        assert!(app.is_idle());

        app.handle_line("dance");
        assert!(!app.is_idle());
        assert!(app.tick(Instant::now() + Duration::from_secs(3)));
        assert!(toast(&app).is_none());
        assert!(app.is_idle());
        assert!(!app.tick(Instant::now() + Duration::from_secs(4)));
    }
}
