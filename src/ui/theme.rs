//! # Theme System
//!
//! Colour themes for the support viewer.
//!
//! ## Overview
//!
//! Rendering code never hardcodes `ratatui::style::Color` values; it reads
//! them from the active [`Theme`]. Pressing `t` cycles through the built-in
//! themes and the choice is persisted in the config file.
//!
//! ## Built-in Themes
//!
//! - **Catppuccin Mocha** (default)
//! - **Catppuccin Latte** - light, closest to the printed page
//! - **Dracula**
//! - **Nord**
//! - **Gruvbox Dark**

use ratatui::style::Color;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,

    pub bg: Color,
    /// Body text.
    pub fg: Color,
    /// Hints, footer, line numbers, code comments.
    pub fg_dim: Color,
    /// Headings, focused borders, selected sidebar entry.
    pub accent: Color,
    pub link: Color,

    // Search highlight
    pub mark_bg: Color,
    pub mark_fg: Color,

    /// Background of the focused FAQ entry or code block.
    pub selection_bg: Color,

    // Status
    pub success: Color,
    pub warning: Color,
    pub error: Color,

    // Code
    pub keyword: Color,
    pub string: Color,
    pub number: Color,
    pub function: Color,
    pub property: Color,
}

impl Theme {
    /// All built-in themes, in cycling order.
    pub fn all() -> &'static [Theme] {
        &BUILT_IN_THEMES
    }

    /// Find a built-in theme by name (case-insensitive).
    pub fn by_name(name: &str) -> Option<&'static Theme> {
        BUILT_IN_THEMES
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }

    pub fn default_theme() -> &'static Theme {
        &BUILT_IN_THEMES[0]
    }

    /// The theme after this one, wrapping around.
    pub fn next(&self) -> &'static Theme {
        let pos = BUILT_IN_THEMES
            .iter()
            .position(|t| t.name == self.name)
            .unwrap_or(0);
        &BUILT_IN_THEMES[(pos + 1) % BUILT_IN_THEMES.len()]
    }
}

static BUILT_IN_THEMES: [Theme; 5] = [
    Theme {
        name: "Catppuccin Mocha",
        bg: Color::Rgb(30, 30, 46),
        fg: Color::Rgb(205, 214, 244),
        fg_dim: Color::Rgb(108, 112, 134),
        accent: Color::Rgb(137, 180, 250),
        link: Color::Rgb(116, 199, 236),
        mark_bg: Color::Rgb(249, 226, 175),
        mark_fg: Color::Rgb(17, 17, 27),
        selection_bg: Color::Rgb(69, 71, 90),
        success: Color::Rgb(166, 227, 161),
        warning: Color::Rgb(250, 179, 135),
        error: Color::Rgb(243, 139, 168),
        keyword: Color::Rgb(203, 166, 247),
        string: Color::Rgb(166, 227, 161),
        number: Color::Rgb(250, 179, 135),
        function: Color::Rgb(137, 180, 250),
        property: Color::Rgb(180, 190, 254),
    },
    Theme {
        name: "Catppuccin Latte",
        bg: Color::Rgb(239, 241, 245),
        fg: Color::Rgb(76, 79, 105),
        fg_dim: Color::Rgb(156, 160, 176),
        accent: Color::Rgb(30, 102, 245),
        link: Color::Rgb(32, 159, 181),
        mark_bg: Color::Rgb(223, 142, 29),
        mark_fg: Color::Rgb(220, 224, 232),
        selection_bg: Color::Rgb(188, 192, 204),
        success: Color::Rgb(64, 160, 43),
        warning: Color::Rgb(254, 100, 11),
        error: Color::Rgb(210, 15, 57),
        keyword: Color::Rgb(136, 57, 239),
        string: Color::Rgb(64, 160, 43),
        number: Color::Rgb(254, 100, 11),
        function: Color::Rgb(30, 102, 245),
        property: Color::Rgb(114, 135, 253),
    },
    Theme {
        name: "Dracula",
        bg: Color::Rgb(40, 42, 54),
        fg: Color::Rgb(248, 248, 242),
        fg_dim: Color::Rgb(98, 114, 164),
        accent: Color::Rgb(139, 233, 253),
        link: Color::Rgb(189, 147, 249),
        mark_bg: Color::Rgb(241, 250, 140),
        mark_fg: Color::Rgb(40, 42, 54),
        selection_bg: Color::Rgb(68, 71, 90),
        success: Color::Rgb(80, 250, 123),
        warning: Color::Rgb(255, 184, 108),
        error: Color::Rgb(255, 85, 85),
        keyword: Color::Rgb(255, 121, 198),
        string: Color::Rgb(241, 250, 140),
        number: Color::Rgb(189, 147, 249),
        function: Color::Rgb(80, 250, 123),
        property: Color::Rgb(139, 233, 253),
    },
    Theme {
        name: "Nord",
        bg: Color::Rgb(46, 52, 64),
        fg: Color::Rgb(216, 222, 233),
        fg_dim: Color::Rgb(76, 86, 106),
        accent: Color::Rgb(136, 192, 208),
        link: Color::Rgb(129, 161, 193),
        mark_bg: Color::Rgb(235, 203, 139),
        mark_fg: Color::Rgb(46, 52, 64),
        selection_bg: Color::Rgb(67, 76, 94),
        success: Color::Rgb(163, 190, 140),
        warning: Color::Rgb(208, 135, 112),
        error: Color::Rgb(191, 97, 106),
        keyword: Color::Rgb(129, 161, 193),
        string: Color::Rgb(163, 190, 140),
        number: Color::Rgb(180, 142, 173),
        function: Color::Rgb(136, 192, 208),
        property: Color::Rgb(143, 188, 187),
    },
    Theme {
        name: "Gruvbox Dark",
        bg: Color::Rgb(40, 40, 40),
        fg: Color::Rgb(235, 219, 178),
        fg_dim: Color::Rgb(146, 131, 116),
        accent: Color::Rgb(131, 165, 152),
        link: Color::Rgb(142, 192, 124),
        mark_bg: Color::Rgb(250, 189, 47),
        mark_fg: Color::Rgb(40, 40, 40),
        selection_bg: Color::Rgb(80, 73, 69),
        success: Color::Rgb(184, 187, 38),
        warning: Color::Rgb(254, 128, 25),
        error: Color::Rgb(251, 73, 52),
        keyword: Color::Rgb(251, 73, 52),
        string: Color::Rgb(184, 187, 38),
        number: Color::Rgb(211, 134, 155),
        function: Color::Rgb(250, 189, 47),
        property: Color::Rgb(131, 165, 152),
    },
];
