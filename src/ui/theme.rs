//! Theme management and ANSI escape sequence generation.
//!
//! Two themes ship with the plugin, and custom ones can be loaded from TOML files.
//!
//! # Built-in Themes
//!
//! - `portal`: dark theme in portal-fluid greens (default)
//! - `citadel`: light theme in muted council blues
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#e6f7d4"
//! brand_fg = "#97ce4c"
//! selection_fg = "#0b1a0f"
//! selection_bg = "#97ce4c"
//! text_normal = "#e6f7d4"
//! text_dim = "#6b7f63"
//! border = "#2f4a33"
//! search_bar_border = "#44a6c6"
//! search_bar_focused = "#97ce4c"
//! match_highlight_fg = "#0b1a0f"
//! match_highlight_bg = "#f0e14a"
//! empty_state_fg = "#44a6c6"
//! loading_fg = "#f0e14a"
//! card_border = "#2f4a33"
//! easter_egg_fg = "#f0e14a"
//! button_enabled_fg = "#97ce4c"
//! button_disabled_fg = "#3a4a36"
//! overlay_fg = "#e6f7d4"
//! overlay_bg = "#14261a"
//! overlay_border = "#f0e14a"
//! ```

use crate::domain::error::{BrowserError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements, as hex strings (e.g. `"#97ce4c"`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,
    /// Brand label on the right of the header.
    pub brand_fg: String,

    /// Selected card foreground.
    pub selection_fg: String,
    /// Selected card background.
    pub selection_bg: String,

    pub text_normal: String,
    /// Secondary text (subtitles, image addresses, footer).
    pub text_dim: String,

    /// Separator lines.
    pub border: String,

    pub search_bar_border: String,
    /// Search box border while it has focus.
    pub search_bar_focused: String,
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    pub empty_state_fg: String,
    pub loading_fg: String,

    pub card_border: String,
    /// Marker on cards whose image opens the overlay.
    pub easter_egg_fg: String,

    /// Pagination buttons that can be pressed.
    pub button_enabled_fg: String,
    /// Pagination buttons at a boundary.
    pub button_disabled_fg: String,

    pub overlay_fg: String,
    pub overlay_bg: String,
    pub overlay_border: String,
}

impl Theme {
    /// Loads a built-in theme by name (`portal` or `citadel`).
    ///
    /// # Example
    ///
    /// ```
    /// use mortydex::ui::Theme;
    ///
    /// let theme = Theme::from_name("citadel").unwrap();
    /// assert_eq!(theme.name, "citadel");
    /// assert!(Theme::from_name("gazorpazorp").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "portal" => include_str!("../../themes/portal.toml"),
            "citadel" => include_str!("../../themes/citadel.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`BrowserError::Theme`] if the file cannot be read or does not
    /// describe a complete theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| BrowserError::Theme(format!("Failed to read theme file: {e}")))?;

        toml::from_str(&contents)
            .map_err(|e| BrowserError::Theme(format!("Failed to parse theme TOML: {e}")))
    }

    /// Converts a hex color to an RGB tuple, white on malformed input.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// ANSI 24-bit foreground color escape sequence.
    ///
    /// ```
    /// use mortydex::ui::Theme;
    ///
    /// assert_eq!(Theme::fg("#97ce4c"), "\u{1b}[38;2;151;206;76m");
    /// ```
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// ANSI 24-bit background color escape sequence.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Clears all styling.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Returns the `portal` theme.
    ///
    /// # Panics
    ///
    /// Panics if the bundled theme fails to parse, which the theme tests rule out.
    fn default() -> Self {
        Self::from_name("portal").expect("bundled portal theme should always parse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn bundled_themes_parse() {
        assert_eq!(Theme::default().name, "portal");
        assert_eq!(Theme::from_name("citadel").unwrap().name, "citadel");
    }

    #[test]
    fn custom_theme_loads_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        let mut theme = Theme::default();
        theme.name = "squanch".to_string();
        theme.colors.header_bg = Some("#000000".to_string());
        write!(file, "{}", toml::to_string(&theme).unwrap()).unwrap();

        assert_eq!(Theme::from_file(file.path()).unwrap(), theme);
    }

    #[test]
    fn incomplete_theme_file_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "name = \"broken\"\n[colors]\nheader_fg = \"#ffffff\"").unwrap();

        let err = Theme::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse theme TOML"));
    }

    #[test]
    fn missing_theme_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = Theme::from_file(dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, BrowserError::Theme(_)));
    }

    #[test]
    fn malformed_hex_falls_back_to_white() {
        assert_eq!(Theme::hex_to_rgb("#abc"), (255, 255, 255));
        assert_eq!(Theme::hex_to_rgb("zzzzzz"), (255, 255, 255));
        assert_eq!(Theme::hex_to_rgb("#f0e14a"), (240, 225, 74));
    }
}
