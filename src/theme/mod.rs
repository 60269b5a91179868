//! Color themes.

use ratatui::style::Color;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// A complete theme definition.
///
/// All fields are public for direct access. Field names are self-documenting
/// (e.g., `bg_dark` = dark background, `text_muted` = muted text color).
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct Theme {
    // Base colors
    pub bg_dark: Color,
    pub bg_elevated: Color,
    pub bg_selected: Color,

    // Text
    pub text_muted: Color,
    pub text_dim: Color,
    pub text_normal: Color,
    pub text_bright: Color,

    // Accent
    pub accent: Color,
    pub accent_dim: Color,

    // Commit rows
    pub hash: Color,
    pub branch: Color,
    pub tag: Color,
    pub reference: Color,

    // Diff lines
    pub diff_add: Color,
    pub diff_delete: Color,
    pub diff_hunk: Color,

    // Status
    pub success: Color,
    pub error: Color,
    pub warning: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::builtin_default()
    }
}

/// JSON theme file format.
#[derive(Debug, Deserialize)]
#[allow(missing_docs)]
pub struct ThemeJson {
    #[serde(default)]
    pub defs: HashMap<String, String>,
    pub theme: ThemeColorsJson,
}

/// Theme color definitions from JSON.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct ThemeColorsJson {
    pub bg_dark: Option<String>,
    pub bg_elevated: Option<String>,
    pub bg_selected: Option<String>,

    pub text_muted: Option<String>,
    pub text_dim: Option<String>,
    pub text_normal: Option<String>,
    pub text_bright: Option<String>,

    pub accent: Option<String>,
    pub accent_dim: Option<String>,

    pub hash: Option<String>,
    pub branch: Option<String>,
    pub tag: Option<String>,
    pub reference: Option<String>,

    pub diff_add: Option<String>,
    pub diff_delete: Option<String>,
    pub diff_hunk: Option<String>,

    pub success: Option<String>,
    pub error: Option<String>,
    pub warning: Option<String>,
}


impl Theme {
    /// Load a theme by name. Checks `themes_dir` first, then builtin.
    ///
    /// Unknown names fall back to the default theme.
    pub fn load(name: &str, themes_dir: &Path) -> Self {
        if let Some(theme) = load_user_theme(name, themes_dir) {
            return theme;
        }

        match name {
            "dracula" => Self::dracula(),
            "nord" => Self::nord(),
            "gruvbox" => Self::gruvbox(),
            "default" => Self::builtin_default(),
            other => {
                log::warn!("unknown theme '{}', using default", other);
                Self::builtin_default()
            }
        }
    }

    /// Default dark theme.
    pub fn builtin_default() -> Self {
        Self {
            bg_dark: Color::Rgb(18, 18, 22),
            bg_elevated: Color::Rgb(36, 36, 44),
            bg_selected: Color::Rgb(45, 45, 55),

            text_muted: Color::Rgb(80, 80, 92),
            text_dim: Color::Rgb(110, 110, 125),
            text_normal: Color::Rgb(175, 175, 185),
            text_bright: Color::Rgb(230, 230, 235),

            accent: Color::Rgb(80, 200, 200),
            accent_dim: Color::Rgb(55, 130, 130),

            hash: Color::Rgb(209, 154, 102),
            branch: Color::Rgb(85, 185, 105),
            tag: Color::Rgb(229, 192, 123),
            reference: Color::Rgb(97, 175, 239),

            diff_add: Color::Rgb(85, 185, 105),
            diff_delete: Color::Rgb(215, 85, 85),
            diff_hunk: Color::Rgb(86, 182, 194),

            success: Color::Rgb(85, 185, 105),
            error: Color::Rgb(215, 85, 85),
            warning: Color::Rgb(215, 175, 80),
        }
    }

    /// Dracula theme.
    pub fn dracula() -> Self {
        Self {
            bg_dark: Color::Rgb(40, 42, 54),
            bg_elevated: Color::Rgb(68, 71, 90),
            bg_selected: Color::Rgb(68, 71, 90),

            text_muted: Color::Rgb(98, 114, 164),
            text_dim: Color::Rgb(128, 134, 174),
            text_normal: Color::Rgb(248, 248, 242),
            text_bright: Color::Rgb(255, 255, 255),

            accent: Color::Rgb(139, 233, 253),
            accent_dim: Color::Rgb(80, 150, 170),

            hash: Color::Rgb(189, 147, 249),
            branch: Color::Rgb(80, 250, 123),
            tag: Color::Rgb(241, 250, 140),
            reference: Color::Rgb(255, 121, 198),

            diff_add: Color::Rgb(80, 250, 123),
            diff_delete: Color::Rgb(255, 85, 85),
            diff_hunk: Color::Rgb(139, 233, 253),

            success: Color::Rgb(80, 250, 123),
            error: Color::Rgb(255, 85, 85),
            warning: Color::Rgb(241, 250, 140),
        }
    }

    /// Nord theme.
    pub fn nord() -> Self {
        Self {
            bg_dark: Color::Rgb(46, 52, 64),
            bg_elevated: Color::Rgb(67, 76, 94),
            bg_selected: Color::Rgb(76, 86, 106),

            text_muted: Color::Rgb(96, 106, 126),
            text_dim: Color::Rgb(150, 160, 180),
            text_normal: Color::Rgb(216, 222, 233),
            text_bright: Color::Rgb(236, 239, 244),

            accent: Color::Rgb(136, 192, 208),
            accent_dim: Color::Rgb(129, 161, 193),

            hash: Color::Rgb(208, 135, 112),
            branch: Color::Rgb(163, 190, 140),
            tag: Color::Rgb(235, 203, 139),
            reference: Color::Rgb(129, 161, 193),

            diff_add: Color::Rgb(163, 190, 140),
            diff_delete: Color::Rgb(191, 97, 106),
            diff_hunk: Color::Rgb(180, 142, 173),

            success: Color::Rgb(163, 190, 140),
            error: Color::Rgb(191, 97, 106),
            warning: Color::Rgb(235, 203, 139),
        }
    }

    /// Gruvbox Dark theme.
    pub fn gruvbox() -> Self {
        Self {
            bg_dark: Color::Rgb(40, 40, 40),
            bg_elevated: Color::Rgb(60, 56, 54),
            bg_selected: Color::Rgb(80, 73, 69),

            text_muted: Color::Rgb(146, 131, 116),
            text_dim: Color::Rgb(168, 153, 132),
            text_normal: Color::Rgb(235, 219, 178),
            text_bright: Color::Rgb(251, 241, 199),

            accent: Color::Rgb(215, 153, 33),
            accent_dim: Color::Rgb(152, 151, 26),

            hash: Color::Rgb(254, 128, 25),
            branch: Color::Rgb(184, 187, 38),
            tag: Color::Rgb(250, 189, 47),
            reference: Color::Rgb(131, 165, 152),

            diff_add: Color::Rgb(184, 187, 38),
            diff_delete: Color::Rgb(251, 73, 52),
            diff_hunk: Color::Rgb(142, 192, 124),

            success: Color::Rgb(152, 151, 26),
            error: Color::Rgb(204, 36, 29),
            warning: Color::Rgb(250, 189, 47),
        }
    }
}

/// Load a theme from the user themes directory.
fn load_user_theme(name: &str, themes_dir: &Path) -> Option<Theme> {
    let path = themes_dir.join(format!("{}.json", name));

    if !path.exists() {
        return None;
    }

    let content = std::fs::read_to_string(&path).ok()?;
    match serde_json::from_str::<ThemeJson>(&content) {
        Ok(json) => Some(resolve_theme(&json)),
        Err(e) => {
            log::warn!("ignoring theme {}: {}", path.display(), e);
            None
        }
    }
}

/// Parse a hex color string to Color.
fn parse_hex(s: &str) -> Option<Color> {
    let s = s.trim_start_matches('#');
    if s.len() != 6 || !s.is_ascii() {
        return None;
    }

    let r = u8::from_str_radix(&s[0..2], 16).ok()?;
    let g = u8::from_str_radix(&s[2..4], 16).ok()?;
    let b = u8::from_str_radix(&s[4..6], 16).ok()?;

    Some(Color::Rgb(r, g, b))
}

/// Resolve a color value (hex or reference).
fn resolve_color(value: &str, defs: &HashMap<String, String>, fallback: Color) -> Color {
    if value.starts_with('#') {
        parse_hex(value).unwrap_or(fallback)
    } else if let Some(def) = defs.get(value) {
        parse_hex(def).unwrap_or(fallback)
    } else {
        fallback
    }
}

/// Resolve a theme JSON to a Theme struct, filling gaps from the default.
fn resolve_theme(json: &ThemeJson) -> Theme {
    let d = Theme::builtin_default();
    let defs = &json.defs;
    let t = &json.theme;
    let pick = |value: &Option<String>, fallback: Color| {
        value
            .as_deref()
            .map_or(fallback, |v| resolve_color(v, defs, fallback))
    };

    Theme {
        bg_dark: pick(&t.bg_dark, d.bg_dark),
        bg_elevated: pick(&t.bg_elevated, d.bg_elevated),
        bg_selected: pick(&t.bg_selected, d.bg_selected),
        text_muted: pick(&t.text_muted, d.text_muted),
        text_dim: pick(&t.text_dim, d.text_dim),
        text_normal: pick(&t.text_normal, d.text_normal),
        text_bright: pick(&t.text_bright, d.text_bright),
        accent: pick(&t.accent, d.accent),
        accent_dim: pick(&t.accent_dim, d.accent_dim),
        hash: pick(&t.hash, d.hash),
        branch: pick(&t.branch, d.branch),
        tag: pick(&t.tag, d.tag),
        reference: pick(&t.reference, d.reference),
        diff_add: pick(&t.diff_add, d.diff_add),
        diff_delete: pick(&t.diff_delete, d.diff_delete),
        diff_hunk: pick(&t.diff_hunk, d.diff_hunk),
        success: pick(&t.success, d.success),
        error: pick(&t.error, d.error),
        warning: pick(&t.warning, d.warning),
    }
}
