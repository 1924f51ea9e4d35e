//! Panel colors, loaded from `theme.toml`. Any field left out keeps its
//! default.

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
    pub frame: FrameStyle,
    pub panel: PanelStyle,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            colors: ThemeColors::default(),
            frame: FrameStyle::default(),
            panel: PanelStyle::default(),
        }
    }
}

impl Theme {
    /// High-contrast variant for light or washed-out terminals
    pub fn contrast() -> Self {
        Self {
            name: "contrast".to_string(),
            colors: ThemeColors {
                text: HexColor::new("#ffffff"),
                value: HexColor::new("#ffd75f"),
                info: HexColor::new("#5fd7ff"),
                accent: HexColor::new("#ff5f87"),
                muted: HexColor::new("#a8a8a8"),
            },
            frame: FrameStyle {
                border: HexColor::new("#ffd75f"),
                border_dim: HexColor::new("#6c6c6c"),
                title: HexColor::new("#ffffff"),
                title_dim: HexColor::new("#a8a8a8"),
                bold_when_focused: true,
            },
            ..Default::default()
        }
    }

    /// Built-in theme for a `general.theme` name; unknown names get the default
    pub fn by_name(name: &str) -> Self {
        match name {
            "contrast" => Self::contrast(),
            _ => Self::default(),
        }
    }

    pub fn border_style(&self, focused: bool) -> Style {
        let color = if focused { &self.frame.border } else { &self.frame.border_dim };
        self.frame_style(color, focused)
    }

    pub fn title_style(&self, focused: bool) -> Style {
        let color = if focused { &self.frame.title } else { &self.frame.title_dim };
        self.frame_style(color, focused)
    }

    fn frame_style(&self, color: &HexColor, focused: bool) -> Style {
        let style = Style::default().fg(color.to_color());
        if focused && self.frame.bold_when_focused {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }

    /// Row label; the focused row is highlighted
    pub fn label_style(&self, selected: bool) -> Style {
        if selected {
            Style::default()
                .fg(self.colors.accent.to_color())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.colors.text.to_color())
        }
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.colors.muted.to_color())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeColors {
    /// Row labels
    pub text: HexColor,
    /// Field values
    pub value: HexColor,
    /// Model info figures
    pub info: HexColor,
    /// Focus marker and cursor
    pub accent: HexColor,
    /// Hints and decorations
    pub muted: HexColor,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            text: HexColor::new("#c0caf5"),
            value: HexColor::new("#7aa2f7"),
            info: HexColor::new("#9ece6a"),
            accent: HexColor::new("#bb9af7"),
            muted: HexColor::new("#565f89"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameStyle {
    pub border: HexColor,
    pub border_dim: HexColor,
    pub title: HexColor,
    pub title_dim: HexColor,
    pub bold_when_focused: bool,
}

impl Default for FrameStyle {
    fn default() -> Self {
        Self {
            border: HexColor::new("#7aa2f7"),
            border_dim: HexColor::new("#3b4261"),
            title: HexColor::new("#bb9af7"),
            title_dim: HexColor::new("#565f89"),
            bold_when_focused: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelStyle {
    pub label_width: usize,
    pub selector_marker: String,
    pub mask_char: char,
}

impl Default for PanelStyle {
    fn default() -> Self {
        Self {
            label_width: 12,
            selector_marker: "▸".to_string(),
            mask_char: '•',
        }
    }
}

/// `#rrggbb` color as written in `theme.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HexColor(String);

impl HexColor {
    pub fn new(hex: &str) -> Self {
        Self(hex.to_string())
    }

    /// Malformed values render with the terminal's own color
    pub fn to_color(&self) -> Color {
        let digits = self.0.strip_prefix('#').unwrap_or(&self.0);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Color::Reset;
        }
        match u32::from_str_radix(digits, 16) {
            Ok(rgb) => Color::Rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8),
            Err(_) => Color::Reset,
        }
    }
}

impl Default for HexColor {
    fn default() -> Self {
        Self("#ffffff".to_string())
    }
}
