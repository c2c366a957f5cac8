use crate::content::{ContentStore, FaqEntry};
use crate::search::{filter_faqs, SearchQuery};
use crate::ui::clipboard::{CopyOutcome, CopyRequest};
use crate::ui::code_block::CodeBlock;
use crate::ui::config::DEFAULT_NARROW_WIDTH;
use crate::ui::document::{Document, Target};
use crate::ui::faq::FaqToggles;
use crate::ui::navigator::{Navigator, Section};
use crate::ui::theme::Theme;
use crate::ui::timer::{Clock, SystemClock};
use anyhow::Result;
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};

/// Lines moved per mouse wheel notch.
const WHEEL_STEP: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPane {
    Sidebar,
    Document,
}

/// Side effects the event loop performs on behalf of the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    /// Write a code block to the clipboard.
    Copy(CopyRequest),
    /// The theme changed and should be persisted.
    ThemeChanged(&'static str),
}

pub struct App {
    pub store: ContentStore,
    pub search: SearchQuery,
    pub search_mode: bool,
    pub navigator: Navigator,
    pub faq: FaqToggles,
    pub code_blocks: Vec<CodeBlock>,
    pub focus: FocusPane,
    /// Highlighted entry in the sidebar section list.
    pub sidebar_index: usize,
    /// First document line shown in the viewport.
    pub scroll: usize,
    /// Index into [`App::targets`] of the focused FAQ entry or code block.
    pub cursor: usize,
    pub theme: Theme,
    pub show_help: bool,
    pub should_quit: bool,
    /// Transient footer message, cleared by the next key press.
    pub status: Option<String>,
    narrow_width: u16,
    viewport_height: usize,
    document_len: usize,
    pending_anchor: Option<Section>,
    follow_cursor: bool,
    scroll_spy: bool,
    pending_g: bool,
    clock: Box<dyn Clock>,
}

impl App {
    pub fn new(store: ContentStore, theme: Theme) -> Result<Self> {
        Self::with_clock(store, theme, Box::new(SystemClock))
    }

    pub fn with_clock(store: ContentStore, theme: Theme, clock: Box<dyn Clock>) -> Result<Self> {
        let code_blocks = store
            .code_samples()
            .iter()
            .map(CodeBlock::new)
            .collect::<Result<Vec<_>>>()?;
        let faq = FaqToggles::new(store.faqs().len());

        Ok(Self {
            store,
            search: SearchQuery::default(),
            search_mode: false,
            navigator: Navigator::new(),
            faq,
            code_blocks,
            focus: FocusPane::Document,
            sidebar_index: 0,
            scroll: 0,
            cursor: 0,
            theme,
            show_help: false,
            should_quit: false,
            status: None,
            narrow_width: DEFAULT_NARROW_WIDTH,
            viewport_height: 0,
            document_len: 0,
            pending_anchor: None,
            follow_cursor: false,
            scroll_spy: false,
            pending_g: false,
            clock,
        })
    }

    pub fn set_narrow_width(&mut self, width: u16) {
        self.narrow_width = width;
    }

    /// Adapt the layout to the terminal width.
    pub fn set_terminal_width(&mut self, width: u16) {
        let narrow = width < self.narrow_width;
        if narrow != self.navigator.is_narrow() {
            tracing::debug!(width, narrow, "Layout changed");
            self.navigator.set_narrow(narrow);
            if !narrow {
                self.navigator.close_sidebar();
            }
        }
        if !self.navigator.sidebar_visible() {
            self.focus = FocusPane::Document;
        }
    }

    // Search

    pub fn query(&self) -> &str {
        self.search.as_str()
    }

    pub fn enter_search_mode(&mut self) {
        self.search_mode = true;
    }

    /// Leave search mode, keeping the query.
    pub fn confirm_search(&mut self) {
        self.search_mode = false;
    }

    /// Leave search mode and clear the query.
    pub fn exit_search_mode(&mut self) {
        self.search_mode = false;
        self.set_query("");
    }

    pub fn search_push_char(&mut self, c: char) {
        self.search.push(c);
        self.query_changed();
    }

    pub fn search_pop_char(&mut self) {
        self.search.pop();
        self.query_changed();
    }

    pub fn set_query(&mut self, text: &str) {
        self.search.set(text);
        self.query_changed();
    }

    fn query_changed(&mut self) {
        tracing::trace!(query = self.search.as_str(), "Search query changed");
        self.clamp_cursor();
    }

    /// FAQ entries matching the current query, with their store index.
    pub fn visible_faqs(&self) -> Vec<(usize, &FaqEntry)> {
        filter_faqs(self.store.faqs(), self.search.as_str())
    }

    // Targets

    /// Interactive elements in document order: visible FAQ entries, then
    /// code blocks.
    pub fn targets(&self) -> Vec<Target> {
        let faqs = self
            .visible_faqs()
            .into_iter()
            .map(|(index, _)| Target::Faq(index));
        let blocks = (0..self.code_blocks.len()).map(Target::Code);
        faqs.chain(blocks).collect()
    }

    pub fn selected_target(&self) -> Option<Target> {
        self.targets().get(self.cursor).copied()
    }

    fn clamp_cursor(&mut self) {
        let count = self.targets().len();
        self.cursor = self.cursor.min(count.saturating_sub(1));
    }

    pub fn next_target(&mut self) {
        let count = self.targets().len();
        if count > 0 {
            self.cursor = (self.cursor + 1) % count;
            self.follow_cursor = true;
        }
    }

    pub fn previous_target(&mut self) {
        let count = self.targets().len();
        if count > 0 {
            self.cursor = (self.cursor + count - 1) % count;
            self.follow_cursor = true;
        }
    }

    /// Move the cursor to `target` if it is currently visible.
    pub fn select_target(&mut self, target: Target) -> bool {
        match self.targets().iter().position(|t| *t == target) {
            Some(pos) => {
                self.cursor = pos;
                self.follow_cursor = true;
                true
            }
            None => false,
        }
    }

    /// Toggle the focused FAQ entry or copy the focused code block.
    pub fn activate(&mut self) -> Option<CopyRequest> {
        match self.selected_target()? {
            Target::Faq(index) => {
                self.toggle_faq(index);
                None
            }
            Target::Code(block) => self.request_copy(block),
        }
    }

    pub fn toggle_faq(&mut self, index: usize) -> Option<bool> {
        let expanded = self.faq.toggle(index)?;
        tracing::debug!(index, expanded, "FAQ toggled");
        Some(expanded)
    }

    pub fn request_copy(&self, block: usize) -> Option<CopyRequest> {
        self.code_blocks.get(block).map(|b| b.copy_request(block))
    }

    /// The copy request for the focused code block, if a code block is
    /// focused.
    pub fn copy_selected(&self) -> Option<CopyRequest> {
        match self.selected_target()? {
            Target::Code(block) => self.request_copy(block),
            Target::Faq(_) => None,
        }
    }

    /// Apply the result of a clipboard write.
    pub fn complete_copy(&mut self, outcome: CopyOutcome) {
        let now = self.clock.now();
        match outcome.result {
            Ok(_) => {
                if let Some(block) = self.code_blocks.get_mut(outcome.block) {
                    block.copy_succeeded(now);
                    tracing::info!(block = outcome.block, "Code copied to clipboard");
                }
            }
            Err(e) => {
                tracing::warn!(block = outcome.block, "Failed to copy code: {e:#}");
                self.status = Some(format!("Copy failed: {e}"));
            }
        }
    }

    /// Expire copy feedback whose time is up. Returns true if anything
    /// changed.
    pub fn tick(&mut self) -> bool {
        let now = self.clock.now();
        let mut changed = false;
        for block in &mut self.code_blocks {
            changed |= block.tick(now);
        }
        changed
    }

    // Navigation

    /// Jump to a section and mark it current.
    pub fn navigate(&mut self, section: Section) {
        tracing::debug!(section = section.id(), "Navigating");
        self.navigator.select(section);
        self.sidebar_index = section.index();
        self.pending_anchor = Some(section);
        self.follow_cursor = false;
        self.scroll_spy = false;
        if !self.navigator.sidebar_visible() {
            self.focus = FocusPane::Document;
        }
    }

    pub fn toggle_sidebar(&mut self) {
        if !self.navigator.is_narrow() {
            return;
        }
        self.navigator.toggle_sidebar();
        self.focus = if self.navigator.is_sidebar_open() {
            self.sidebar_index = self.navigator.current().index();
            FocusPane::Sidebar
        } else {
            FocusPane::Document
        };
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            FocusPane::Sidebar => FocusPane::Document,
            FocusPane::Document if self.navigator.sidebar_visible() => {
                self.sidebar_index = self.navigator.current().index();
                FocusPane::Sidebar
            }
            FocusPane::Document => FocusPane::Document,
        };
    }

    pub fn sidebar_next(&mut self) {
        if self.sidebar_index + 1 < Section::ALL.len() {
            self.sidebar_index += 1;
        }
    }

    pub fn sidebar_previous(&mut self) {
        self.sidebar_index = self.sidebar_index.saturating_sub(1);
    }

    pub fn sidebar_activate(&mut self) {
        if let Some(section) = Section::from_index(self.sidebar_index) {
            self.navigate(section);
        }
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn cycle_theme(&mut self) -> &'static str {
        let next = self.theme.next();
        self.theme = next.clone();
        tracing::info!(theme = next.name, "Theme changed");
        next.name
    }

    // Scrolling

    fn max_scroll(&self) -> usize {
        self.document_len.saturating_sub(self.viewport_height.max(1))
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll = (self.scroll + lines).min(self.max_scroll());
        self.user_scrolled();
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll = self.scroll.saturating_sub(lines);
        self.user_scrolled();
    }

    pub fn half_page_down(&mut self) {
        self.scroll_down((self.viewport_height / 2).max(1));
    }

    pub fn half_page_up(&mut self) {
        self.scroll_up((self.viewport_height / 2).max(1));
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.viewport_height.saturating_sub(1).max(1));
    }

    pub fn page_up(&mut self) {
        self.scroll_up(self.viewport_height.saturating_sub(1).max(1));
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll = 0;
        self.user_scrolled();
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll = self.max_scroll();
        self.user_scrolled();
    }

    fn user_scrolled(&mut self) {
        self.pending_anchor = None;
        self.follow_cursor = false;
        self.scroll_spy = true;
    }

    pub fn viewport_height(&self) -> usize {
        self.viewport_height
    }

    /// Reconcile scroll state with a freshly built document.
    ///
    /// Resolves a pending section jump, keeps the focused target on screen
    /// after target navigation, clamps the scroll offset, and updates the
    /// current section from the top visible line after manual scrolling.
    pub fn sync_viewport(&mut self, document: &Document, height: usize) {
        self.viewport_height = height;
        self.document_len = document.len();

        if let Some(section) = self.pending_anchor.take() {
            self.scroll = document.anchor(section);
        }

        if self.follow_cursor {
            self.follow_cursor = false;
            if let Some(line) = self.selected_target().and_then(|t| document.target_line(t)) {
                if line < self.scroll {
                    self.scroll = line;
                } else if height > 0 && line >= self.scroll + height {
                    self.scroll = line + 1 - height;
                }
                self.scroll_spy = true;
            }
        }

        self.scroll = self.scroll.min(self.max_scroll());

        if self.scroll_spy {
            self.scroll_spy = false;
            let section = document.section_at(self.scroll);
            if section != self.navigator.current() {
                self.navigator.scrolled_to(section);
                if self.focus != FocusPane::Sidebar {
                    self.sidebar_index = section.index();
                }
            }
        }
    }

    // Input

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollDown => self.scroll_down(WHEEL_STEP),
            MouseEventKind::ScrollUp => self.scroll_up(WHEEL_STEP),
            _ => {}
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.kind != KeyEventKind::Press {
            return Action::None;
        }
        self.status = None;
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if ctrl && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return Action::None;
        }

        if self.show_help {
            if matches!(
                key.code,
                KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Esc
            ) {
                self.toggle_help();
            }
            return Action::None;
        }

        if self.search_mode {
            match key.code {
                KeyCode::Esc => self.exit_search_mode(),
                KeyCode::Enter => self.confirm_search(),
                KeyCode::Backspace => self.search_pop_char(),
                KeyCode::Down => self.next_target(),
                KeyCode::Up => self.previous_target(),
                KeyCode::Char('u') if ctrl => self.set_query(""),
                KeyCode::Char(c) if !ctrl => self.search_push_char(c),
                _ => {}
            }
            return Action::None;
        }

        let was_g = std::mem::take(&mut self.pending_g);

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
                return Action::None;
            }
            KeyCode::Char('/') => {
                self.enter_search_mode();
                return Action::None;
            }
            KeyCode::Char('?') => {
                self.toggle_help();
                return Action::None;
            }
            KeyCode::Char('m') => {
                self.toggle_sidebar();
                return Action::None;
            }
            KeyCode::Char('t') => return Action::ThemeChanged(self.cycle_theme()),
            KeyCode::Char(c @ '1'..='5') => {
                let index = usize::from(c as u8 - b'1');
                if let Some(section) = Section::from_index(index) {
                    self.navigate(section);
                }
                return Action::None;
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.toggle_focus();
                return Action::None;
            }
            KeyCode::Esc => {
                if self.navigator.is_narrow() && self.navigator.is_sidebar_open() {
                    self.toggle_sidebar();
                } else if !self.search.is_empty() {
                    self.set_query("");
                }
                return Action::None;
            }
            _ => {}
        }

        if self.focus == FocusPane::Sidebar && self.navigator.sidebar_visible() {
            match key.code {
                KeyCode::Char('j') | KeyCode::Down => self.sidebar_next(),
                KeyCode::Char('k') | KeyCode::Up => self.sidebar_previous(),
                KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => self.sidebar_activate(),
                _ => {}
            }
            return Action::None;
        }

        match key.code {
            KeyCode::Char('d') if ctrl => self.half_page_down(),
            KeyCode::Char('u') if ctrl => self.half_page_up(),
            KeyCode::Char('j') | KeyCode::Down => self.scroll_down(1),
            KeyCode::Char('k') | KeyCode::Up => self.scroll_up(1),
            KeyCode::PageDown => self.page_down(),
            KeyCode::PageUp => self.page_up(),
            KeyCode::Home => self.scroll_to_top(),
            KeyCode::End | KeyCode::Char('G') => self.scroll_to_bottom(),
            KeyCode::Char('g') => {
                if was_g {
                    self.scroll_to_top();
                } else {
                    self.pending_g = true;
                }
            }
            KeyCode::Char('n') => self.next_target(),
            KeyCode::Char('N') => self.previous_target(),
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(request) = self.activate() {
                    return Action::Copy(request);
                }
            }
            KeyCode::Char('y') => {
                if let Some(request) = self.copy_selected() {
                    return Action::Copy(request);
                }
            }
            _ => {}
        }
        Action::None
    }
}
