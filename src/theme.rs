use ratatui::style::{Color, Modifier, Style};
use std::str::FromStr;

/// Named color schemes selectable with `--theme`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dracula,
    Solarized,
    Gruvbox,
}

impl Theme {
    pub const NAMES: [&'static str; 3] = ["dracula", "solarized", "gruvbox"];

    pub fn name(self) -> &'static str {
        match self {
            Theme::Dracula => "dracula",
            Theme::Solarized => "solarized",
            Theme::Gruvbox => "gruvbox",
        }
    }

    pub fn config(self) -> ThemeConfig {
        match self {
            Theme::Dracula => dracula_theme(),
            Theme::Solarized => solarized_dark(),
            Theme::Gruvbox => gruvbox_theme(),
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dracula" => Ok(Theme::Dracula),
            "solarized" | "solarized_dark" => Ok(Theme::Solarized),
            "gruvbox" => Ok(Theme::Gruvbox),
            other => Err(format!(
                "unknown theme '{}', expected one of: {}",
                other,
                Theme::NAMES.join(", ")
            )),
        }
    }
}

/// Complete theme configuration for ratatui
#[derive(Debug, Clone)]
pub struct ThemeConfig {
    pub background: Color,
    pub list_normal: Style,
    pub list_selected: Style,
    pub border: Style,
    pub border_selected: Style,
    pub title: Style,
    pub text: Style,
    /// Dimmed secondary text (hints, empty states)
    pub muted: Style,
    /// Numbers that matter: rank, rating
    pub accent: Style,
    /// Inline error box
    pub error: Style,
}

/// Returns a ThemeConfig based on the Solarized Dark color palette.
pub fn solarized_dark() -> ThemeConfig {
    // Solarized Dark palette
    let base03 = Color::Rgb(0, 43, 54);
    let base02 = Color::Rgb(7, 54, 66);
    let base01 = Color::Rgb(88, 110, 117);
    let base0 = Color::Rgb(131, 148, 150);
    let base3 = Color::Rgb(253, 246, 227);
    let yellow = Color::Rgb(181, 137, 0);
    let red = Color::Rgb(220, 50, 47);
    let blue = Color::Rgb(38, 139, 210);

    ThemeConfig {
        background: base03,
        list_normal: Style::default().fg(base0).bg(base02),
        list_selected: Style::default()
            .fg(base3)
            .bg(blue)
            .add_modifier(Modifier::BOLD),
        border: Style::default().fg(base01),
        border_selected: Style::default().fg(blue),
        title: Style::default().fg(blue).add_modifier(Modifier::BOLD),
        text: Style::default().fg(base0).bg(base02),
        muted: Style::default().fg(base01).bg(base02),
        accent: Style::default().fg(yellow),
        error: Style::default().fg(red).add_modifier(Modifier::BOLD),
    }
}

/// Returns a ThemeConfig based on the Dracula color palette.
pub fn dracula_theme() -> ThemeConfig {
    // Dracula palette
    let bg = Color::Rgb(40, 42, 54);
    let selection = Color::Rgb(68, 71, 90);
    let fg = Color::Rgb(248, 248, 242);
    let comment = Color::Rgb(98, 114, 164);
    let purple = Color::Rgb(189, 147, 249);
    let orange = Color::Rgb(255, 184, 108);
    let red = Color::Rgb(255, 85, 85);

    ThemeConfig {
        background: bg,
        list_normal: Style::default().fg(fg).bg(bg),
        list_selected: Style::default()
            .fg(fg)
            .bg(selection)
            .add_modifier(Modifier::BOLD),
        border: Style::default().fg(comment),
        border_selected: Style::default().fg(purple),
        title: Style::default().fg(purple).add_modifier(Modifier::BOLD),
        text: Style::default().fg(fg).bg(bg),
        muted: Style::default().fg(comment).bg(bg),
        accent: Style::default().fg(orange),
        error: Style::default().fg(red).add_modifier(Modifier::BOLD),
    }
}

/// Returns a ThemeConfig based on the Gruvbox Dark color palette.
pub fn gruvbox_theme() -> ThemeConfig {
    // Gruvbox Dark palette
    let bg0 = Color::Rgb(40, 40, 40);
    let fg1 = Color::Rgb(235, 219, 178);
    let gray = Color::Rgb(146, 131, 116);
    let yellow = Color::Rgb(215, 153, 33);
    let orange = Color::Rgb(214, 93, 14);
    let red = Color::Rgb(204, 36, 29);

    ThemeConfig {
        background: bg0,
        list_normal: Style::default().fg(fg1).bg(bg0),
        list_selected: Style::default()
            .fg(bg0)
            .bg(fg1)
            .add_modifier(Modifier::BOLD),
        border: Style::default().fg(gray),
        border_selected: Style::default().fg(orange),
        title: Style::default().fg(orange).add_modifier(Modifier::BOLD),
        text: Style::default().fg(fg1).bg(bg0),
        muted: Style::default().fg(gray).bg(bg0),
        accent: Style::default().fg(yellow),
        error: Style::default().fg(red).add_modifier(Modifier::BOLD),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_from_str() {
        assert_eq!(Theme::from_str("Gruvbox"), Ok(Theme::Gruvbox));
        assert_eq!(Theme::from_str("solarized_dark"), Ok(Theme::Solarized));
        let err = Theme::from_str("neon").unwrap_err();
        assert!(err.contains("dracula, solarized, gruvbox"));
    }
}
