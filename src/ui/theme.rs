//! Theme management and hex-to-terminal color conversion.
//!
//! This module defines the color scheme system for the UI, supporting both
//! built-in themes and custom themes loaded from TOML files. Colors are
//! stored as hex strings and converted to [`ratatui::style::Color::Rgb`] at
//! render time.
//!
//! # Built-in Themes
//!
//! - `ayu-mirage`: Muted dark theme with a warm yellow accent (default)
//! - `catppuccin-mocha`: Dark theme with warm tones
//! - `catppuccin-latte`: Light theme with soft pastels
//!
//! # TOML Format
//!
//! Every color is optional; missing keys fall back to the `ayu-mirage` value.
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! background = "#1f2430"
//! text = "#cccac2"
//! accent = "#ffcc66"
//! checked = "#505868"
//! muted = "#707a8c"
//! highlight_bg = "#2b3245"
//! modal_bg = "#282e3b"
//! border = "#171b24"
//! footer_bg = "#1c212c"
//! error = "#f28779"
//! ```
//!
//! # Example
//!
//! ```rust
//! use lyst::ui::theme::Theme;
//! use ratatui::style::Color;
//!
//! let theme = Theme::from_name("ayu-mirage").unwrap();
//! assert_eq!(Theme::color(&theme.colors.accent), Color::Rgb(0xff, 0xcc, 0x66));
//! ```

use crate::domain::error::{LystError, Result};
use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "ayu-mirage";

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    #[serde(default)]
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements, as hex strings (e.g. `"#cccac2"`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ThemeColors {
    /// Screen background.
    pub background: String,
    /// Normal text.
    pub text: String,
    /// Focused panel border, panel titles, modal border.
    pub accent: String,
    /// Checked item text.
    pub checked: String,
    /// Placeholders and help lines.
    pub muted: String,
    /// Highlighted row background.
    pub highlight_bg: String,
    /// Modal dialog background.
    pub modal_bg: String,
    /// Unfocused panel border.
    pub border: String,
    /// Footer bar background.
    pub footer_bg: String,
    /// Status message text.
    pub error: String,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            background: "#1f2430".to_string(),
            text: "#cccac2".to_string(),
            accent: "#ffcc66".to_string(),
            checked: "#505868".to_string(),
            muted: "#707a8c".to_string(),
            highlight_bg: "#2b3245".to_string(),
            modal_bg: "#282e3b".to_string(),
            border: "#171b24".to_string(),
            footer_bg: "#1c212c".to_string(),
            error: "#f28779".to_string(),
        }
    }
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// # Returns
    ///
    /// - `Some(Theme)` if the theme name is recognized
    /// - `None` if the theme name is unknown
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "ayu-mirage" => include_str!("../../themes/ayu-mirage.toml"),
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`LystError::Theme`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| LystError::Theme(format!("failed to read {}: {e}", path.display())))?;

        toml::from_str(&contents)
            .map_err(|e| LystError::Theme(format!("failed to parse {}: {e}", path.display())))
    }

    /// Picks the theme for this run.
    ///
    /// A theme file wins over a theme name. Any failure falls back to the
    /// default theme.
    #[must_use]
    pub fn resolve(theme_file: Option<&Path>, theme_name: Option<&str>) -> Self {
        if let Some(path) = theme_file {
            match Self::from_file(path) {
                Ok(theme) => return theme,
                Err(e) => tracing::debug!(error = %e, "theme file unusable, trying theme name"),
            }
        }

        if let Some(name) = theme_name {
            if let Some(theme) = Self::from_name(name) {
                return theme;
            }
            tracing::debug!(theme = %name, "unknown theme name, using default");
        }

        Self::default()
    }

    /// Converts a hex color to a terminal color.
    ///
    /// Strips `#` prefix if present. Unparseable input yields [`Color::Reset`]
    /// so a typo in a theme file degrades to the terminal's own colors.
    #[must_use]
    pub fn color(hex: &str) -> Color {
        let hex = hex.trim().trim_start_matches('#');

        if hex.len() != 6 || !hex.is_ascii() {
            return Color::Reset;
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        match (channel(0..2), channel(2..4), channel(4..6)) {
            (Some(r), Some(g), Some(b)) => Color::Rgb(r, g, b),
            _ => Color::Reset,
        }
    }

    /// Base style: normal text on the screen background.
    #[must_use]
    pub fn base(&self) -> Style {
        Style::default()
            .fg(Self::color(&self.colors.text))
            .bg(Self::color(&self.colors.background))
    }

    /// Border style for a panel.
    #[must_use]
    pub fn border(&self, focused: bool) -> Style {
        let color = if focused {
            &self.colors.accent
        } else {
            &self.colors.border
        };
        Style::default().fg(Self::color(color))
    }

    /// Bold accent style used for panel titles.
    #[must_use]
    pub fn title(&self) -> Style {
        Style::default()
            .fg(Self::color(&self.colors.accent))
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn muted(&self) -> Style {
        Style::default().fg(Self::color(&self.colors.muted))
    }

    #[must_use]
    pub fn checked(&self) -> Style {
        Style::default().fg(Self::color(&self.colors.checked))
    }

    #[must_use]
    pub fn highlight(&self) -> Style {
        Style::default().bg(Self::color(&self.colors.highlight_bg))
    }
}

impl Default for Theme {
    /// Returns the default theme (Ayu Mirage).
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).unwrap_or_else(|| Self {
            name: DEFAULT_THEME.to_string(),
            colors: ThemeColors::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_themes_parse() {
        for name in ["ayu-mirage", "catppuccin-mocha", "catppuccin-latte"] {
            let theme = Theme::from_name(name).unwrap_or_else(|| panic!("{name} must parse"));
            assert_eq!(theme.name, name);
        }
        assert!(Theme::from_name("solarized").is_none());
    }

    #[test]
    fn default_theme_matches_embedded_palette() {
        let theme = Theme::default();
        assert_eq!(theme.name, DEFAULT_THEME);
        assert_eq!(theme.colors, ThemeColors::default());
    }

    #[test]
    fn hex_conversion() {
        assert_eq!(Theme::color("#1f2430"), Color::Rgb(0x1f, 0x24, 0x30));
        assert_eq!(Theme::color("ffcc66"), Color::Rgb(0xff, 0xcc, 0x66));
        assert_eq!(Theme::color("#fff"), Color::Reset);
        assert_eq!(Theme::color("#zzzzzz"), Color::Reset);
        assert_eq!(Theme::color("#ééé"), Color::Reset);
    }

    #[test]
    fn partial_theme_file_fills_missing_colors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name = \"mine\"\n\n[colors]\naccent = \"#00ff00\"").unwrap();

        let theme = Theme::from_file(file.path()).unwrap();
        assert_eq!(theme.name, "mine");
        assert_eq!(theme.colors.accent, "#00ff00");
        assert_eq!(theme.colors.text, ThemeColors::default().text);
    }

    #[test]
    fn resolve_prefers_file_then_name_then_default() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name = \"from-file\"").unwrap();

        let theme = Theme::resolve(Some(file.path()), Some("catppuccin-latte"));
        assert_eq!(theme.name, "from-file");

        let theme = Theme::resolve(Some(Path::new("/nonexistent/theme.toml")), Some("catppuccin-latte"));
        assert_eq!(theme.name, "catppuccin-latte");

        let theme = Theme::resolve(None, Some("nope"));
        assert_eq!(theme.name, DEFAULT_THEME);
    }

    #[test]
    fn unreadable_file_is_a_theme_error() {
        let err = Theme::from_file("/nonexistent/theme.toml").unwrap_err();
        assert!(matches!(err, LystError::Theme(_)));
    }
}
