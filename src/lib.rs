//! lyst: a terminal checklist manager.
//!
//! lyst keeps named checklists in a single SQLite file and edits them in a
//! two-panel terminal UI:
//! - Lists panel on the left, most recently touched first
//! - Items panel on the right, in the list's own order
//! - Confirm and prompt modals for destructive or text-entry actions
//! - Vim-like navigation, with `[`/`]` to reorder items

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal Shim (main.rs)                            │  ← Entry point
//! │  - CLI parsing, raw mode, key → Event mapping       │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Focus and selection                              │
//! │  - Modal requests and continuations                 │
//! │  - Action dispatching                               │
//! └─────────────────────────────────────────────────────┘
//!         │                                     │
//! ┌───────────────┐                    ┌───────────────┐
//! │ UI Layer      │                    │ Storage Layer │
//! │ (ui/)         │                    │ (storage/)    │
//! │ - View model  │                    │ - SQLite      │
//! │ - Theming     │                    │ - Ordering    │
//! │ - Components  │                    │ - Backend API │
//! └───────────────┘                    └───────────────┘
//!         │                                     │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Platform paths (infrastructure/)                 │
//! │  - Error types (domain/error)                       │
//! │  - Lists, items, ordering (domain/)                 │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - tracing subscriber, rotating log file            │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! An optional TOML file at `<config dir>/lyst/config.toml`:
//!
//! ```toml
//! db_path = "~/notes/lyst.db"
//! theme = "catppuccin-mocha"
//! theme_file = "~/.config/lyst/my-theme.toml"
//! trace_level = "debug"
//! ```
//!
//! Command-line flags override file values.
//!
//! # Examples
//!
//! ```rust
//! use lyst::storage::SqliteStorage;
//! use lyst::{handle_event, initialize, Config, Event, Flow};
//!
//! let mut storage = SqliteStorage::open_in_memory()?;
//! let (mut session, _theme) = initialize(&Config::default(), &mut storage, Some("Groceries"))?;
//!
//! for event in [Event::Char('a'), Event::Char('M'), Event::Char('i'), Event::Enter] {
//!     assert_eq!(handle_event(&mut session, &mut storage, &event), Flow::Continue);
//! }
//! assert_eq!(session.visible_items[0].text, "Mi");
//! # Ok::<(), lyst::LystError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod storage;
pub mod ui;

pub use app::{handle_event, startup, Action, Event, FocusPanel, Flow, PendingModal, SessionState};
pub use domain::{Checklist, Item, LystError, Result};
pub use ui::Theme;

use crate::infrastructure::paths;
use crate::storage::Storage;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// User configuration, read from TOML and overridden by CLI flags.
///
/// Every field is optional; an empty or missing file yields
/// [`Config::default`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Database file. Default: `<data dir>/lyst/lyst.db`. A leading `~` is
    /// expanded.
    pub db_path: Option<PathBuf>,

    /// Built-in theme name.
    ///
    /// Options: `ayu-mirage`, `catppuccin-mocha`, `catppuccin-latte`. Ignored if
    /// `theme_file` is set.
    #[serde(alias = "theme")]
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. Takes precedence over `theme_name`.
    pub theme_file: Option<PathBuf>,

    /// Log filter directive, e.g. `debug` or `lyst=trace`. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Config {
    /// Loads configuration from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`LystError::Config`] if the file exists but cannot be read or
    /// is not valid TOML for this struct. A missing file is not an error.
    ///
    /// # Example
    ///
    /// ```rust
    /// use lyst::Config;
    /// use std::path::Path;
    ///
    /// let config = Config::load(Path::new("/nonexistent/lyst/config.toml"))?;
    /// assert_eq!(config, Config::default());
    /// # Ok::<(), lyst::LystError>(())
    /// ```
    pub fn load(path: &Path) -> Result<Self> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(LystError::Config(format!(
                    "cannot read {}: {e}",
                    path.display()
                )))
            }
        };
        Self::parse(&text).map_err(|e| match e {
            LystError::Config(msg) => LystError::Config(format!("{}: {msg}", path.display())),
            other => other,
        })
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`LystError::Config`] on malformed TOML or mistyped values.
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| LystError::Config(e.message().to_string()))
    }

    /// Layers `overrides` on top of `self`; set fields in `overrides` win.
    #[must_use]
    pub fn merge(self, overrides: Self) -> Self {
        Self {
            db_path: overrides.db_path.or(self.db_path),
            theme_name: overrides.theme_name.or(self.theme_name),
            theme_file: overrides.theme_file.or(self.theme_file),
            trace_level: overrides.trace_level.or(self.trace_level),
        }
    }

    /// Resolves the database path, expanding `~` and falling back to the
    /// platform default.
    ///
    /// # Errors
    ///
    /// Returns [`LystError::Config`] if no path is configured and the
    /// platform has no user data directory.
    pub fn db_path(&self) -> Result<PathBuf> {
        match &self.db_path {
            Some(path) => Ok(paths::expand_tilde(path)),
            None => paths::default_db_path(),
        }
    }

    /// Resolves the theme: file first, then name, then the default.
    #[must_use]
    pub fn theme(&self) -> Theme {
        let theme_file = self.theme_file.as_deref().map(paths::expand_tilde);
        Theme::resolve(theme_file.as_deref(), self.theme_name.as_deref())
    }
}

/// Builds the initial session and theme for an opened store.
///
/// # Parameters
///
/// * `config` - Resolved configuration
/// * `storage` - Opened store
/// * `list_name` - Optional list to open at startup (found or created by title)
///
/// # Errors
///
/// Propagates storage failures from the startup selection.
pub fn initialize(
    config: &Config,
    storage: &mut dyn Storage,
    list_name: Option<&str>,
) -> Result<(SessionState, Theme)> {
    tracing::debug!(list_name = ?list_name, "initializing session");

    let theme = config.theme();
    tracing::debug!(theme = %theme.name, "theme resolved");

    let mut session = SessionState::new();
    startup(&mut session, storage, list_name)?;
    Ok((session, theme))
}
