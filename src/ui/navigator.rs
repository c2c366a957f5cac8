//! # Section Navigator
//!
//! Tracks which section the reader is in and whether the sidebar is shown.
//!
//! All five sections are always part of the document; navigating only moves
//! the scroll position to a section's anchor. The sidebar can be hidden only
//! on narrow terminals, where it behaves like a drawer: choosing a section
//! closes it.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    General,
    Registration,
    Faq,
    Guides,
    ApiReference,
}

impl Section {
    /// Sections in document order.
    pub const ALL: [Section; 5] = [
        Section::General,
        Section::Registration,
        Section::Faq,
        Section::Guides,
        Section::ApiReference,
    ];

    /// Anchor id, as used in `#general` links.
    pub fn id(self) -> &'static str {
        match self {
            Section::General => "general",
            Section::Registration => "registration",
            Section::Faq => "faq",
            Section::Guides => "guides",
            Section::ApiReference => "api",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Section::General => "General",
            Section::Registration => "Registration",
            Section::Faq => "FAQ",
            Section::Guides => "Guides",
            Section::ApiReference => "API Reference",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Section::General => "📖",
            Section::Registration => "@",
            Section::Faq => "❓",
            Section::Guides => "📄",
            Section::ApiReference => "⚙",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Section::General => 0,
            Section::Registration => 1,
            Section::Faq => 2,
            Section::Guides => 3,
            Section::ApiReference => 4,
        }
    }

    pub fn from_index(index: usize) -> Option<Section> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    current: Section,
    sidebar_open: bool,
    narrow: bool,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            current: Section::General,
            sidebar_open: false,
            narrow: false,
        }
    }

    pub fn current(&self) -> Section {
        self.current
    }

    pub fn is_narrow(&self) -> bool {
        self.narrow
    }

    pub fn set_narrow(&mut self, narrow: bool) {
        self.narrow = narrow;
    }

    pub fn is_sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    /// Whether the sidebar is on screen. Wide layouts always show it.
    pub fn sidebar_visible(&self) -> bool {
        !self.narrow || self.sidebar_open
    }

    /// Follow a sidebar link. On narrow layouts the sidebar closes.
    pub fn select(&mut self, section: Section) {
        self.current = section;
        if self.narrow {
            self.sidebar_open = false;
        }
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    pub fn close_sidebar(&mut self) {
        self.sidebar_open = false;
    }

    /// Record the section under the top of the viewport after scrolling.
    /// Unlike [`Navigator::select`], this never touches the sidebar.
    pub fn scrolled_to(&mut self, section: Section) {
        self.current = section;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_index_round_trip() {
        for section in Section::ALL {
            assert_eq!(Section::from_index(section.index()), Some(section));
        }
        assert_eq!(Section::from_index(5), None);
        assert_eq!(Section::ApiReference.to_string(), "API Reference");
    }

    #[test]
    fn test_defaults() {
        let nav = Navigator::new();
        assert_eq!(nav.current(), Section::General);
        assert!(!nav.is_sidebar_open());
        assert!(nav.sidebar_visible());
    }

    #[test]
    fn test_select_closes_sidebar_when_narrow() {
        let mut nav = Navigator::new();
        nav.set_narrow(true);
        assert!(!nav.sidebar_visible());

        nav.toggle_sidebar();
        assert!(nav.sidebar_visible());

        nav.select(Section::Faq);
        assert_eq!(nav.current(), Section::Faq);
        assert!(!nav.is_sidebar_open());
    }

    #[test]
    fn test_select_keeps_sidebar_when_wide() {
        let mut nav = Navigator::new();
        nav.toggle_sidebar();
        nav.select(Section::Guides);
        assert!(nav.is_sidebar_open());
        assert!(nav.sidebar_visible());
    }

    #[test]
    fn test_scroll_spy_leaves_sidebar() {
        let mut nav = Navigator::new();
        nav.set_narrow(true);
        nav.toggle_sidebar();
        nav.scrolled_to(Section::ApiReference);
        assert_eq!(nav.current(), Section::ApiReference);
        assert!(nav.is_sidebar_open());
    }
}
