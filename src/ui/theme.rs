use std::fs;
use std::path::Path;

use ratatui::style::Color;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::Config;
use crate::engine::progression::ToastKind;

#[derive(Embed)]
#[folder = "assets/themes/"]
struct ThemeAssets;

pub const DEFAULT_THEME: &str = "catppuccin-mocha";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThemeColors {
    pub bg: String,
    pub fg: String,
    pub text_correct: String,
    pub text_incorrect: String,
    pub text_incorrect_bg: String,
    pub text_pending: String,
    pub text_cursor_bg: String,
    pub text_cursor_fg: String,
    pub accent: String,
    pub accent_dim: String,
    pub border: String,
    pub border_focused: String,
    pub header_bg: String,
    pub header_fg: String,
    pub bar_filled: String,
    pub bar_empty: String,
    pub error: String,
    pub warning: String,
    pub success: String,
    #[serde(default = "default_info")]
    pub info: String,
}

fn default_info() -> String {
    "#89dceb".to_string()
}

impl Theme {
    /// User themes in `<config_dir>/thundertype/themes/` shadow the bundled ones.
    pub fn load(name: &str) -> Option<Self> {
        Self::load_with_user_dir(name, &Config::config_dir().join("themes"))
    }

    pub fn load_with_user_dir(name: &str, user_dir: &Path) -> Option<Self> {
        let filename = format!("{name}.toml");

        if let Ok(content) = fs::read_to_string(user_dir.join(&filename)) {
            match toml::from_str::<Theme>(&content) {
                Ok(theme) => return Some(theme),
                Err(e) => warn!(theme = name, error = %e, "ignoring malformed user theme"),
            }
        }

        let file = ThemeAssets::get(&filename)?;
        let content = std::str::from_utf8(file.data.as_ref()).ok()?;
        toml::from_str::<Theme>(content).ok()
    }

    /// Named theme, else the default, else built-in colors.
    pub fn resolve(name: &str) -> Self {
        Self::load(name).unwrap_or_else(|| {
            warn!(theme = name, "unknown theme, using default");
            Self::default()
        })
    }

    pub fn available_themes() -> Vec<String> {
        let mut names: Vec<String> = ThemeAssets::iter()
            .filter_map(|f| f.strip_suffix(".toml").map(|n| n.to_string()))
            .collect();
        names.sort();
        names
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::load(DEFAULT_THEME).unwrap_or_else(|| Self {
            name: "default".to_string(),
            colors: ThemeColors::default(),
        })
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            bg: "#1e1e2e".to_string(),
            fg: "#cdd6f4".to_string(),
            text_correct: "#a6e3a1".to_string(),
            text_incorrect: "#f38ba8".to_string(),
            text_incorrect_bg: "#45273a".to_string(),
            text_pending: "#585b70".to_string(),
            text_cursor_bg: "#f5e0dc".to_string(),
            text_cursor_fg: "#1e1e2e".to_string(),
            accent: "#89b4fa".to_string(),
            accent_dim: "#45475a".to_string(),
            border: "#45475a".to_string(),
            border_focused: "#89b4fa".to_string(),
            header_bg: "#313244".to_string(),
            header_fg: "#cdd6f4".to_string(),
            bar_filled: "#89b4fa".to_string(),
            bar_empty: "#313244".to_string(),
            error: "#f38ba8".to_string(),
            warning: "#f9e2af".to_string(),
            success: "#a6e3a1".to_string(),
            info: default_info(),
        }
    }
}

impl ThemeColors {
    pub fn parse_color(hex: &str) -> Color {
        let hex = hex.trim_start_matches('#');
        if hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return Color::Rgb(r, g, b);
            }
        }
        Color::White
    }

    pub fn bg(&self) -> Color { Self::parse_color(&self.bg) }
    pub fn fg(&self) -> Color { Self::parse_color(&self.fg) }
    pub fn text_correct(&self) -> Color { Self::parse_color(&self.text_correct) }
    pub fn text_incorrect(&self) -> Color { Self::parse_color(&self.text_incorrect) }
    pub fn text_incorrect_bg(&self) -> Color { Self::parse_color(&self.text_incorrect_bg) }
    pub fn text_pending(&self) -> Color { Self::parse_color(&self.text_pending) }
    pub fn text_cursor_bg(&self) -> Color { Self::parse_color(&self.text_cursor_bg) }
    pub fn text_cursor_fg(&self) -> Color { Self::parse_color(&self.text_cursor_fg) }
    pub fn accent(&self) -> Color { Self::parse_color(&self.accent) }
    pub fn accent_dim(&self) -> Color { Self::parse_color(&self.accent_dim) }
    pub fn border(&self) -> Color { Self::parse_color(&self.border) }
    pub fn border_focused(&self) -> Color { Self::parse_color(&self.border_focused) }
    pub fn header_bg(&self) -> Color { Self::parse_color(&self.header_bg) }
    pub fn header_fg(&self) -> Color { Self::parse_color(&self.header_fg) }
    pub fn bar_filled(&self) -> Color { Self::parse_color(&self.bar_filled) }
    pub fn bar_empty(&self) -> Color { Self::parse_color(&self.bar_empty) }
    pub fn error(&self) -> Color { Self::parse_color(&self.error) }
    pub fn warning(&self) -> Color { Self::parse_color(&self.warning) }
    pub fn success(&self) -> Color { Self::parse_color(&self.success) }
    pub fn info(&self) -> Color { Self::parse_color(&self.info) }

    pub fn toast(&self, kind: ToastKind) -> Color {
        match kind {
            ToastKind::Info => self.info(),
            ToastKind::Success => self.success(),
            ToastKind::Warning => self.warning(),
            ToastKind::Error => self.error(),
        }
    }

    /// Green from 95%, amber from 85%, red below.
    pub fn accuracy(&self, accuracy: u32) -> Color {
        if accuracy >= 95 {
            self.success()
        } else if accuracy >= 85 {
            self.warning()
        } else {
            self.error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn bundled_themes_parse() {
        let names = Theme::available_themes();
        assert!(names.contains(&DEFAULT_THEME.to_string()));
        assert!(names.contains(&"terminal-default".to_string()));
        let empty = TempDir::new().unwrap();
        for name in names {
            assert!(
                Theme::load_with_user_dir(&name, empty.path()).is_some(),
                "theme {name} failed to parse"
            );
        }
    }

    #[test]
    fn user_theme_shadows_bundled() {
        let dir = TempDir::new().unwrap();
        let mut theme = Theme {
            name: "mine".to_string(),
            colors: ThemeColors::default(),
        };
        theme.colors.accent = "#010203".to_string();
        fs::write(
            dir.path().join(format!("{DEFAULT_THEME}.toml")),
            toml::to_string(&theme).unwrap(),
        )
        .unwrap();

        let loaded = Theme::load_with_user_dir(DEFAULT_THEME, dir.path()).unwrap();
        assert_eq!(loaded.colors.accent(), Color::Rgb(1, 2, 3));
    }

    #[test]
    fn unknown_theme_is_none() {
        let dir = TempDir::new().unwrap();
        assert!(Theme::load_with_user_dir("no-such-theme", dir.path()).is_none());
    }

    #[test]
    fn bad_hex_falls_back_to_white() {
        assert_eq!(ThemeColors::parse_color("#zzzzzz"), Color::White);
        assert_eq!(ThemeColors::parse_color("#fff"), Color::White);
        assert_eq!(ThemeColors::parse_color("#ff0000"), Color::Rgb(255, 0, 0));
    }
}
