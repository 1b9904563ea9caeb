//! Styles built from the `[menu_colors]` palette.

use ratatui::style::{Color, Modifier, Style};
use tmenu_types::config::PaletteRole;
use tmenu_types::Palette;
use tracing::warn;

/// Bullet drawn in front of every selectable entry.
pub const BULLET: &str = "  \u{2022} ";
/// Fill character for divider lines.
pub const DIVIDER: &str = "\u{2581}";

/// Resolved terminal styles, one per palette role.
#[derive(Debug, Clone)]
pub struct Theme {
    styles: [Style; PaletteRole::ALL.len()],
}

impl Theme {
    pub fn from_palette(palette: &Palette) -> Self {
        let styles = PaletteRole::ALL.map(|role| {
            let (fg, bg) = palette.colors(role);
            Style::default().fg(color_or_reset(fg)).bg(color_or_reset(bg))
        });
        Self { styles }
    }

    pub fn style(&self, role: PaletteRole) -> Style {
        self.styles[role as usize]
    }

    pub fn hint(&self) -> Style {
        self.style(PaletteRole::Default).add_modifier(Modifier::DIM)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_palette(&Palette::default())
    }
}

fn color_or_reset(name: &str) -> Color {
    parse_color(name).unwrap_or_else(|| {
        warn!(color = %name, "Unknown color name, using terminal default");
        Color::Reset
    })
}

/// Parse a palette color: one of the classic 16 names or `#rgb`/`#rrggbb`.
pub fn parse_color(name: &str) -> Option<Color> {
    let name = name.trim().to_ascii_lowercase();
    if let Some(hex) = name.strip_prefix('#') {
        return parse_hex(hex);
    }
    let color = match name.as_str() {
        "default" => Color::Reset,
        "black" => Color::Black,
        "dark red" => Color::Red,
        "dark green" => Color::Green,
        "brown" => Color::Yellow,
        "dark blue" => Color::Blue,
        "dark magenta" => Color::Magenta,
        "dark cyan" => Color::Cyan,
        "light gray" | "light grey" => Color::Gray,
        "dark gray" | "dark grey" => Color::DarkGray,
        "light red" => Color::LightRed,
        "light green" => Color::LightGreen,
        "yellow" => Color::LightYellow,
        "light blue" => Color::LightBlue,
        "light magenta" => Color::LightMagenta,
        "light cyan" => Color::LightCyan,
        "white" => Color::White,
        _ => return None,
    };
    Some(color)
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        6 => Some(Color::Rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        3 => {
            let expand = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
            Some(Color::Rgb(expand(0)?, expand(1)?, expand(2)?))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_names() {
        assert_eq!(parse_color("light gray"), Some(Color::Gray));
        assert_eq!(parse_color("Dark Blue"), Some(Color::Blue));
        assert_eq!(parse_color("brown"), Some(Color::Yellow));
        assert_eq!(parse_color("default"), Some(Color::Reset));
        assert_eq!(parse_color("chartreuse"), None);
    }

    #[test]
    fn hex_colors() {
        assert_eq!(parse_color("#ff0000"), Some(Color::Rgb(255, 0, 0)));
        assert_eq!(parse_color("#fff"), Some(Color::Rgb(255, 255, 255)));
        assert_eq!(parse_color("#12"), None);
        assert_eq!(parse_color("#zzzzzz"), None);
        assert_eq!(parse_color("#a\u{e9}aaa"), None);
        assert_eq!(parse_color("#\u{e9}a"), None);
    }

    #[test]
    fn theme_uses_palette_defaults() {
        let theme = Theme::default();
        let plain = theme.style(PaletteRole::Options);
        assert_eq!(plain.fg, Some(Color::Black));
        assert_eq!(plain.bg, Some(Color::Gray));
        let selected = theme.style(PaletteRole::Selected);
        assert_eq!(selected.fg, Some(Color::White));
        assert_eq!(selected.bg, Some(Color::Blue));
    }

    #[test]
    fn unknown_palette_color_falls_back() {
        let palette = Palette {
            heading_fg: Some("not-a-color".to_string()),
            ..Palette::default()
        };
        let theme = Theme::from_palette(&palette);
        assert_eq!(theme.style(PaletteRole::Heading).fg, Some(Color::Reset));
    }
}
