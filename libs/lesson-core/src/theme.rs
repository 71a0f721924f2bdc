//! Colour palettes for the light and dark themes.

use crate::types::ThemeName;

/// Palette tokens, as `#RRGGBB` strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub name: ThemeName,
    pub bg: &'static str,
    pub panel: &'static str,
    pub text: &'static str,
    pub muted: &'static str,
    pub border: &'static str,
    pub shadow: &'static str,
    pub bubble: &'static str,
    pub nav_hover: &'static str,
    pub nav_selected: &'static str,
    pub green: &'static str,
    pub green_dark: &'static str,
    pub blue: &'static str,
    pub blue_dark: &'static str,
    pub orange: &'static str,
    pub red: &'static str,
    pub disabled: &'static str,
}

pub const LIGHT: Theme = Theme {
    name: ThemeName::Light,
    bg: "#F6F7FB",
    panel: "#FFFFFF",
    text: "#1F2A37",
    muted: "#6B7280",
    border: "#E5E7EB",
    shadow: "#000000",
    bubble: "#EEF2F7",
    nav_hover: "#F3F4F6",
    nav_selected: "#EAF8D8",
    green: "#58CC02",
    green_dark: "#46A302",
    blue: "#1CB0F6",
    blue_dark: "#0F96D5",
    orange: "#FF9600",
    red: "#FF4B4B",
    disabled: "#E5E7EB",
};

pub const DARK: Theme = Theme {
    name: ThemeName::Dark,
    bg: "#0B1220",
    panel: "#111A2E",
    text: "#E5E7EB",
    muted: "#9CA3AF",
    border: "#23304A",
    shadow: "#000000",
    bubble: "#0F1A33",
    nav_hover: "#182444",
    nav_selected: "#14331B",
    green: "#58CC02",
    green_dark: "#46A302",
    blue: "#1CB0F6",
    blue_dark: "#0F96D5",
    orange: "#FF9600",
    red: "#FF4B4B",
    disabled: "#23304A",
};

impl Theme {
    pub fn for_name(name: ThemeName) -> Self {
        match name {
            ThemeName::Light => LIGHT,
            ThemeName::Dark => DARK,
        }
    }
}

/// Split a `#RRGGBB` token into its channels.
pub fn rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}
