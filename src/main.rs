//! Terminal entry point.
//!
//! This is the thin shim between the terminal and the lyst library. It parses
//! arguments, opens the database, puts the terminal into raw mode and turns
//! crossterm key presses into library [`Event`]s.
//!
//! # Lifecycle
//!
//! 1. **Configure**: Parse CLI flags, load the config file, initialize logging
//! 2. **Open**: Open the SQLite file (fatal on failure, before touching the terminal)
//! 3. **Startup**: Find or create the list named on the command line
//! 4. **Loop**: Draw, read one key, hand it to `handle_event`
//! 5. **Restore**: Leave the alternate screen and raw mode, even on error
//!
//! # Event Mapping
//!
//! - `Ctrl+C` → `Event::Interrupt`
//! - `Shift+Tab` → `Event::BackTab`
//! - Printable keys → `Event::Char`
//! - Other modified keys are ignored

#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use crossterm::event::{self, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::Terminal;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use lyst::infrastructure::paths;
use lyst::storage::SqliteStorage;
use lyst::{handle_event, Config, Event, Flow, SessionState, Theme};

/// A terminal checklist manager.
#[derive(Debug, Parser)]
#[command(name = "lyst", version, about)]
struct Cli {
    /// List to open at startup; created if no list has this title.
    #[arg(value_name = "LIST_NAME")]
    list_name: Vec<String>,

    /// Database file (default: <data dir>/lyst/lyst.db).
    #[arg(long, value_name = "PATH")]
    db: Option<PathBuf>,

    /// Built-in theme: ayu-mirage, catppuccin-mocha, catppuccin-latte.
    #[arg(long, value_name = "NAME")]
    theme: Option<String>,

    /// Config file (default: <config dir>/lyst/config.toml).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log filter directive, e.g. `debug`.
    #[arg(long, value_name = "LEVEL")]
    trace_level: Option<String>,
}

impl Cli {
    /// Words of the list name joined with single spaces; blank means none.
    fn start_list(&self) -> Option<String> {
        let joined = self.list_name.join(" ");
        let trimmed = joined.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    fn overrides(&self) -> Config {
        Config {
            db_path: self.db.clone(),
            theme_name: self.theme.clone(),
            theme_file: None,
            trace_level: self.trace_level.clone(),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let file_config = match cli.config.clone().or_else(paths::default_config_path) {
        Some(path) => Config::load(&path).unwrap_or_else(|e| {
            eprintln!("Warning: {e}; using defaults");
            Config::default()
        }),
        None => Config::default(),
    };
    let config = file_config.merge(cli.overrides());
    lyst::observability::init_tracing(&config);

    let db_path = match config.db_path() {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut storage = match SqliteStorage::open(&db_path) {
        Ok(storage) => storage,
        Err(e) => {
            tracing::error!(path = %db_path.display(), error = %e, "cannot open database");
            eprintln!("Error: unable to open database at {}: {e}", db_path.display());
            return ExitCode::FAILURE;
        }
    };

    let start_list = cli.start_list();
    let (mut session, theme) = match lyst::initialize(&config, &mut storage, start_list.as_deref()) {
        Ok(initialized) => initialized,
        Err(e) => {
            tracing::error!(error = %e, "startup failed");
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(&mut session, &mut storage, &theme) {
        Ok(()) => {
            tracing::info!("exiting");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "terminal failure");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Owns the terminal for the lifetime of the UI and restores it afterwards.
fn run(session: &mut SessionState, storage: &mut SqliteStorage, theme: &Theme) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e);
    }
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = run_loop(&mut terminal, session, storage, theme);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop(
    terminal: &mut Terminal<impl Backend>,
    session: &mut SessionState,
    storage: &mut SqliteStorage,
    theme: &Theme,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| lyst::ui::draw(frame, session, theme))?;

        let event::Event::Key(key) = event::read()? else {
            continue;
        };
        let Some(event) = map_key_event(key) else {
            continue;
        };

        if handle_event(session, storage, &event) == Flow::Quit {
            return Ok(());
        }
    }
}

/// Maps a crossterm key press to a library event.
fn map_key_event(key: KeyEvent) -> Option<Event> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl || key.modifiers.contains(KeyModifiers::ALT) {
        return match key.code {
            KeyCode::Char('c') if ctrl => Some(Event::Interrupt),
            _ => None,
        };
    }

    Some(match key.code {
        KeyCode::Char(c) => Event::Char(c),
        KeyCode::Enter => Event::Enter,
        KeyCode::Esc => Event::Esc,
        KeyCode::Tab => Event::Tab,
        KeyCode::BackTab => Event::BackTab,
        KeyCode::Up => Event::Up,
        KeyCode::Down => Event::Down,
        KeyCode::Left => Event::Left,
        KeyCode::Right => Event::Right,
        KeyCode::Home => Event::Home,
        KeyCode::End => Event::End,
        KeyCode::Backspace => Event::Backspace,
        KeyCode::Delete => Event::Delete,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn list_name_words_are_joined_and_trimmed() {
        let cli = Cli::parse_from(["lyst", "Weekly", "", "shopping "]);
        assert_eq!(cli.start_list().as_deref(), Some("Weekly  shopping"));

        let cli = Cli::parse_from(["lyst", "  "]);
        assert_eq!(cli.start_list(), None);

        let cli = Cli::parse_from(["lyst"]);
        assert_eq!(cli.start_list(), None);
    }

    #[test]
    fn flags_become_overrides() {
        let cli = Cli::parse_from(["lyst", "--db", "/tmp/x.db", "--theme", "catppuccin-latte", "Today"]);
        let overrides = cli.overrides();
        assert_eq!(overrides.db_path, Some(PathBuf::from("/tmp/x.db")));
        assert_eq!(overrides.theme_name.as_deref(), Some("catppuccin-latte"));
        assert_eq!(cli.start_list().as_deref(), Some("Today"));
    }

    #[test]
    fn ctrl_c_interrupts_and_other_chords_are_ignored() {
        assert_eq!(
            map_key_event(press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Event::Interrupt)
        );
        assert_eq!(map_key_event(press(KeyCode::Char('d'), KeyModifiers::CONTROL)), None);
        assert_eq!(map_key_event(press(KeyCode::Char('q'), KeyModifiers::ALT)), None);
    }

    #[test]
    fn shifted_chars_pass_through() {
        assert_eq!(
            map_key_event(press(KeyCode::Char('G'), KeyModifiers::SHIFT)),
            Some(Event::Char('G'))
        );
        assert_eq!(
            map_key_event(press(KeyCode::BackTab, KeyModifiers::SHIFT)),
            Some(Event::BackTab)
        );
    }

    #[test]
    fn releases_are_ignored() {
        let mut key = press(KeyCode::Enter, KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert_eq!(map_key_event(key), None);
    }
}
