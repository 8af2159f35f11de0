//! Terminal styles derived from the live palette
//!
//! Colors come from the style variables the theme manager wrote onto the
//! document root, so toggling the theme restyles every panel on the next frame.

use ratatui::style::{Color, Modifier, Style};

use crate::theme::DocumentRoot;

/// Theme configuration for the journal screen
#[derive(Debug, Clone)]
pub struct Theme {
    /// Border color
    pub border: Color,
    /// Title / accent color
    pub title: Color,
    /// Bullish slice color
    pub bullish: Color,
    /// Bearish slice color
    pub bearish: Color,
    /// Focus highlight color
    pub highlight: Color,
    /// Inactive/dim color
    pub inactive: Color,
    /// Normal text color
    pub text: Color,
    /// Panel background
    pub bg: Color,
    /// Header background
    pub header_bg: Color,
    /// Input background
    pub input_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            border: Color::Gray,
            title: Color::Blue,
            bullish: Color::Green,
            bearish: Color::Red,
            highlight: Color::Yellow,
            inactive: Color::DarkGray,
            text: Color::Reset,
            bg: Color::Reset,
            header_bg: Color::Reset,
            input_bg: Color::Reset,
        }
    }
}

/// Parse `#rrggbb` into an RGB color
pub fn hex_color(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

impl Theme {
    /// Styles for the palette currently applied to `root`
    pub fn from_root(root: &DocumentRoot) -> Self {
        let fallback = Self::default();
        let pick = |var: &str, default: Color| {
            root.property(var).and_then(hex_color).unwrap_or(default)
        };

        Self {
            border: pick("--border-color", fallback.border),
            title: pick("--accent-color", fallback.title),
            bullish: pick("--bullish-color", fallback.bullish),
            bearish: pick("--bearish-color", fallback.bearish),
            highlight: pick("--accent-color", fallback.highlight),
            inactive: fallback.inactive,
            text: pick("--text-color", fallback.text),
            bg: pick("--bg-color", fallback.bg),
            header_bg: pick("--header-bg", fallback.header_bg),
            input_bg: pick("--input-bg", fallback.input_bg),
        }
    }

    /// Get style for borders
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Get style for titles
    pub fn title_style(&self) -> Style {
        Style::default().fg(self.title).add_modifier(Modifier::BOLD)
    }

    pub fn bullish_style(&self) -> Style {
        Style::default().fg(self.bullish)
    }

    pub fn bearish_style(&self) -> Style {
        Style::default().fg(self.bearish)
    }

    /// Get style for the focused input
    pub fn focus_style(&self) -> Style {
        Style::default()
            .fg(self.highlight)
            .bg(self.input_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Get style for inactive/dim text
    pub fn inactive_style(&self) -> Style {
        Style::default().fg(self.inactive)
    }

    /// Get style for normal text
    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    /// Background fill for the whole screen
    pub fn base_style(&self) -> Style {
        Style::default().fg(self.text).bg(self.bg)
    }

    pub fn header_style(&self) -> Style {
        Style::default().fg(self.title).bg(self.header_bg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::theme::{ThemeManager, ThemeName};
    use std::rc::Rc;

    #[test]
    fn test_hex_color() {
        assert_eq!(hex_color("#4CAF50"), Some(Color::Rgb(0x4c, 0xaf, 0x50)));
        assert_eq!(hex_color("4CAF50"), None);
        assert_eq!(hex_color("#zzzzzz"), None);
        assert_eq!(hex_color("#fff"), None);
    }

    #[test]
    fn test_theme_tracks_applied_palette() {
        let mut mgr = ThemeManager::new(Rc::new(MemoryStore::new()));
        let mut root = DocumentRoot::new();

        mgr.apply(ThemeName::Dark, &mut root);
        let dark = Theme::from_root(&root);
        assert_eq!(dark.bullish, Color::Rgb(0x4c, 0xaf, 0x50));
        assert_eq!(dark.bg, Color::Rgb(0x12, 0x12, 0x12));

        mgr.apply(ThemeName::Light, &mut root);
        let light = Theme::from_root(&root);
        assert_eq!(light.bearish, Color::Rgb(0xdc, 0x35, 0x45));
    }

    #[test]
    fn test_empty_root_falls_back() {
        let theme = Theme::from_root(&DocumentRoot::new());
        assert_eq!(theme.bullish, Color::Green);
    }
}
