//! Rose Pine Color Palette Module
//! Based on the official Rose Pine theme: https://rosepinetheme.com/

use once_cell::sync::Lazy;
use ratatui::style::Color;
use std::collections::HashMap;

pub struct RosePine;

impl RosePine {
    pub const BASE: Color = Color::Rgb(25, 23, 36);
    pub const SURFACE: Color = Color::Rgb(31, 29, 46);
    pub const TEXT: Color = Color::Rgb(224, 222, 244);
    pub const SUBTLE: Color = Color::Rgb(144, 140, 170);
    pub const MUTED: Color = Color::Rgb(110, 106, 134);
    pub const LOVE: Color = Color::Rgb(235, 111, 146);
    pub const GOLD: Color = Color::Rgb(246, 193, 119);
    pub const ROSE: Color = Color::Rgb(235, 188, 186);
    pub const PINE: Color = Color::Rgb(49, 116, 143);
    pub const FOAM: Color = Color::Rgb(156, 207, 216);
    pub const IRIS: Color = Color::Rgb(196, 167, 231);
    pub const HIGHLIGHT_MED: Color = Color::Rgb(64, 61, 82);
    pub const HIGHLIGHT_HIGH: Color = Color::Rgb(82, 79, 103);
    pub const HIGHLIGHT_LOW: Color = Color::Rgb(33, 32, 46);
}

static DEFAULT_TAG_COLORS: Lazy<HashMap<&'static str, Color>> = Lazy::new(|| {
    HashMap::from([
        ("Web Development", RosePine::IRIS),
        ("Web Design", RosePine::ROSE),
        ("Javascript", RosePine::FOAM),
        ("React-Redux", Color::Rgb(234, 154, 151)),
        ("Typescript", RosePine::GOLD),
        ("Database", Color::Rgb(62, 143, 176)),
        ("Package", RosePine::LOVE),
        ("Git", RosePine::SUBTLE),
        ("Network", Color::Rgb(158, 206, 106)),
    ])
});

/// Tag label to colour mapping handed to the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct TagPalette {
    colors: HashMap<String, Color>,
    fallback: Color,
}

impl Default for TagPalette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_TAG_COLORS
                .iter()
                .map(|(tag, color)| (tag.to_string(), *color))
                .collect(),
            fallback: RosePine::TEXT,
        }
    }
}

impl TagPalette {
    /// Default palette with `#rrggbb` overrides applied; bad values are skipped
    pub fn with_overrides<'a, I>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        let mut palette = Self::default();
        for (tag, hex) in overrides {
            match parse_hex_color(hex) {
                Some(color) => {
                    palette.colors.insert(tag.clone(), color);
                }
                None => tracing::warn!(%tag, %hex, "ignoring invalid tag colour"),
            }
        }
        palette
    }

    pub fn color_for(&self, tag: &str) -> Color {
        self.colors.get(tag).copied().unwrap_or(self.fallback)
    }
}

/// Parses `#rrggbb` (the leading `#` is optional)
pub fn parse_hex_color(raw: &str) -> Option<Color> {
    let hex = raw.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}
