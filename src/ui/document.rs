//! # Document Builder
//!
//! Lays out the whole support page as styled, pre-wrapped lines for the main
//! pane.
//!
//! The document is rebuilt from [`App`] state on every frame, so search
//! highlighting is applied exactly once per render pass and always reflects
//! the latest keystroke. While building, the line index of every section
//! heading (its anchor) and of every interactive [`Target`] is recorded for
//! navigation and scrolling.
//!
//! Lines are wrapped here rather than by `ratatui::widgets::Paragraph` so that
//! anchor positions are exact.

use crate::content::{SubdomainStatus, TopicId};
use crate::ui::app::App;
use crate::ui::code_block::CodeBlock;
use crate::ui::navigator::Section;
use crate::ui::rich_text::{self, Block, BlockKind, Run};
use crate::ui::syntax::TokenKind;
use crate::ui::theme::Theme;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

/// The message shown in place of FAQ entries when none match.
pub const NO_FAQ_RESULTS: &str = "No FAQs match your search.";

/// An interactive element of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// FAQ entry, by position in the content store.
    Faq(usize),
    /// Code block, by position in [`App::code_blocks`].
    Code(usize),
}

#[derive(Debug, Default)]
pub struct Document {
    pub lines: Vec<Line<'static>>,
    anchors: Vec<(Section, usize)>,
    targets: Vec<(Target, usize)>,
}

impl Document {
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Line index of a section heading.
    pub fn anchor(&self, section: Section) -> usize {
        self.anchors
            .iter()
            .find(|(s, _)| *s == section)
            .map_or(0, |(_, line)| *line)
    }

    pub fn target_line(&self, target: Target) -> Option<usize> {
        self.targets
            .iter()
            .find(|(t, _)| *t == target)
            .map(|(_, line)| *line)
    }

    /// The section that `line` belongs to.
    pub fn section_at(&self, line: usize) -> Section {
        self.anchors
            .iter()
            .take_while(|(_, anchor)| *anchor <= line)
            .last()
            .map_or(Section::General, |(s, _)| *s)
    }

    /// Text of every line, without styling.
    pub fn plain_lines(&self) -> Vec<String> {
        self.lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }
}

/// Build the document for a pane `width` columns wide.
pub fn build(app: &App, width: u16) -> Document {
    let mut builder = DocBuilder {
        doc: Document::default(),
        theme: &app.theme,
        width: usize::from(width).max(20),
        query: app.search.as_str(),
        selected: app.selected_target(),
    };

    builder.general(app);
    builder.registration(app);
    builder.faq(app);
    builder.guides(app);
    builder.api_reference(app);
    builder.doc
}

struct DocBuilder<'a> {
    doc: Document,
    theme: &'a Theme,
    width: usize,
    query: &'a str,
    selected: Option<Target>,
}

impl DocBuilder<'_> {
    fn text_style(&self) -> Style {
        Style::default().fg(self.theme.fg)
    }

    fn dim_style(&self) -> Style {
        Style::default().fg(self.theme.fg_dim)
    }

    fn blank(&mut self) {
        self.doc.lines.push(Line::default());
    }

    fn heading(&mut self, section: Section) {
        if !self.doc.lines.is_empty() {
            self.blank();
        }
        self.doc.anchors.push((section, self.doc.lines.len()));
        self.doc.lines.push(Line::from(Span::styled(
            section.label().to_string(),
            Style::default()
                .fg(self.theme.accent)
                .add_modifier(Modifier::BOLD),
        )));
        self.doc.lines.push(Line::from(Span::styled(
            "─".repeat(self.width.min(60)),
            self.dim_style(),
        )));
    }

    fn subheading(&mut self, text: &str) {
        self.blank();
        self.doc.lines.push(Line::from(Span::styled(
            text.to_string(),
            Style::default()
                .fg(self.theme.fg)
                .add_modifier(Modifier::BOLD),
        )));
    }

    fn run_style(&self, run: &Run) -> Style {
        let mut style = self.text_style();
        if run.style.link {
            style = style
                .fg(self.theme.link)
                .add_modifier(Modifier::UNDERLINED);
        }
        if run.style.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        if run.marked {
            style = style
                .fg(self.theme.mark_fg)
                .bg(self.theme.mark_bg)
                .add_modifier(Modifier::BOLD);
        }
        style
    }

    /// Rich text blocks, separated by blank lines; bullets stay together.
    fn blocks(&mut self, blocks: &[Block], indent: usize) {
        let mut previous: Option<BlockKind> = None;
        for block in blocks {
            let separate = match (previous, block.kind) {
                (None, _) => false,
                (Some(BlockKind::Bullet), BlockKind::Bullet) => false,
                _ => true,
            };
            if separate {
                self.blank();
            }
            let pieces: Vec<(String, Style)> = block
                .runs
                .iter()
                .map(|run| (run.text.clone(), self.run_style(run)))
                .collect();
            let (prefix, cont) = match block.kind {
                BlockKind::Paragraph => (" ".repeat(indent), indent),
                BlockKind::Bullet => (format!("{}  • ", " ".repeat(indent)), indent + 4),
            };
            let prefix = vec![Span::styled(prefix, self.text_style())];
            let lines = wrap(&pieces, self.width, prefix, cont, Style::default());
            self.doc.lines.extend(lines);
            previous = Some(block.kind);
        }
    }

    fn topic(&mut self, app: &App, id: TopicId) {
        let blocks = rich_text::parse(app.store.topic(id), self.query);
        self.blocks(&blocks, 0);
    }

    fn general(&mut self, app: &App) {
        self.heading(Section::General);
        self.topic(app, TopicId::General);

        let contacts = app.store.contacts();
        if !contacts.is_empty() {
            self.blank();
        }
        for contact in contacts {
            let icon = if contact.href.starts_with("mailto:") { "✉" } else { "➤" };
            let mut spans = vec![
                Span::styled(format!("{icon} "), Style::default().fg(self.theme.accent)),
                Span::styled(format!("{}: ", contact.label), self.text_style()),
                Span::styled(
                    contact.display.clone(),
                    Style::default()
                        .fg(self.theme.link)
                        .add_modifier(Modifier::UNDERLINED),
                ),
            ];
            if contact.display != contact.href.trim_start_matches("mailto:") {
                spans.push(Span::styled(format!(" ({})", contact.href), self.dim_style()));
            }
            self.doc.lines.push(Line::from(spans));
        }

        self.subheading("Domain Services");
        self.topic(app, TopicId::DomainServices);

        let subdomains = app.store.subdomains();
        if subdomains.is_empty() {
            return;
        }
        self.blank();
        let name_width = subdomains.iter().map(|s| s.name.chars().count()).max().unwrap_or(0);
        for subdomain in subdomains {
            let status_color = match subdomain.status {
                SubdomainStatus::Active => self.theme.success,
                SubdomainStatus::Maintenance => self.theme.warning,
                SubdomainStatus::Inactive => self.theme.error,
            };
            let mut prefix = vec![Span::styled("  ● ", Style::default().fg(status_color))];
            prefix.extend(self.highlighted_spans(&subdomain.name, self.text_style()));
            let pad = name_width - subdomain.name.chars().count();
            prefix.push(Span::raw(" ".repeat(pad + 2)));
            prefix.push(Span::styled(
                format!("{:<12}", subdomain.status.label()),
                Style::default().fg(status_color),
            ));
            let cont = 4 + name_width + 2 + 12;
            let pieces: Vec<(String, Style)> = self
                .highlighted_spans(&subdomain.purpose, self.dim_style())
                .into_iter()
                .map(|s| (s.content.into_owned(), s.style))
                .collect();
            let lines = wrap(&pieces, self.width, prefix, cont, Style::default());
            self.doc.lines.extend(lines);
        }
    }

    fn highlighted_spans(&self, text: &str, base: Style) -> Vec<Span<'static>> {
        crate::search::highlight_segments(text, self.query)
            .into_iter()
            .filter(|seg| !seg.text().is_empty())
            .map(|seg| {
                let style = if seg.is_marked() {
                    base.fg(self.theme.mark_fg)
                        .bg(self.theme.mark_bg)
                        .add_modifier(Modifier::BOLD)
                } else {
                    base
                };
                Span::styled(seg.text().to_string(), style)
            })
            .collect()
    }

    fn registration(&mut self, app: &App) {
        self.heading(Section::Registration);
        self.topic(app, TopicId::Registration);
    }

    fn faq(&mut self, app: &App) {
        self.heading(Section::Faq);

        let visible = app.visible_faqs();
        if visible.is_empty() {
            self.doc.lines.push(Line::from(Span::styled(
                NO_FAQ_RESULTS.to_string(),
                self.dim_style(),
            )));
            return;
        }

        for (n, (index, entry)) in visible.into_iter().enumerate() {
            if n > 0 {
                self.blank();
            }
            let target = Target::Faq(index);
            let expanded = app.faq.is_expanded(index);
            let line_style = if self.selected == Some(target) {
                Style::default().bg(self.theme.selection_bg)
            } else {
                Style::default()
            };

            self.doc.targets.push((target, self.doc.lines.len()));
            let chevron = if expanded { "▼ " } else { "▶ " };
            let prefix = vec![Span::styled(chevron, Style::default().fg(self.theme.accent))];
            let question: Vec<(String, Style)> = self
                .highlighted_spans(&entry.question, self.text_style())
                .into_iter()
                .map(|s| (s.content.into_owned(), s.style))
                .collect();
            let lines = wrap(&question, self.width, prefix, 2, line_style);
            self.doc.lines.extend(lines);

            // Collapsed answers are left out of the document entirely.
            if expanded {
                self.blank();
                let blocks = rich_text::parse(&entry.answer, self.query);
                self.blocks(&blocks, 2);
            }
        }
    }

    fn guides(&mut self, app: &App) {
        self.heading(Section::Guides);
        // One guide per source line after the intro, led by its bold title.
        let mut blocks = rich_text::parse_lines(app.store.topic(TopicId::Guides), self.query);
        for block in blocks.iter_mut().skip(1) {
            block.kind = BlockKind::Bullet;
            block.embolden_lead(':');
        }
        self.blocks(&blocks, 0);
    }

    fn api_reference(&mut self, app: &App) {
        self.heading(Section::ApiReference);
        self.topic(app, TopicId::ApiDescription);

        for (index, block) in app.code_blocks.iter().enumerate() {
            self.blank();
            self.doc.lines.push(Line::from(Span::styled(
                format!("{} ({}):", block.caption, block.language.display_name()),
                Style::default()
                    .fg(self.theme.fg)
                    .add_modifier(Modifier::BOLD),
            )));
            self.code_block(index, block);
        }

        self.blank();
        self.topic(app, TopicId::ApiInstructions);
    }

    fn code_block(&mut self, index: usize, block: &CodeBlock) {
        let target = Target::Code(index);
        let selected = self.selected == Some(target);
        let border = if selected {
            Style::default().fg(self.theme.accent)
        } else {
            self.dim_style()
        };

        let (label, label_style) = if block.is_copied() {
            ("[✓ Copied!]", Style::default().fg(self.theme.success))
        } else {
            ("[⧉ Copy]", Style::default().fg(self.theme.accent))
        };
        let language = format!(" {} ", block.language.name());
        let used = 2 + language.chars().count() + label.chars().count() + 2;
        let fill = self.width.saturating_sub(used).max(1);

        let mut header = Line::from(vec![
            Span::styled("╭─", border),
            Span::styled(language, self.dim_style()),
            Span::styled("─".repeat(fill), border),
            Span::raw(" "),
            Span::styled(label, label_style.add_modifier(Modifier::BOLD)),
            Span::raw(" "),
        ]);
        if selected {
            header = header.style(Style::default().bg(self.theme.selection_bg));
        }
        self.doc.targets.push((target, self.doc.lines.len()));
        self.doc.lines.push(header);

        let digits = block.lines().len().to_string().len();
        for (n, tokens) in block.lines().iter().enumerate() {
            let mut spans = vec![
                Span::styled("│", border),
                Span::styled(format!(" {:>digits$}  ", n + 1), self.dim_style()),
            ];
            spans.extend(
                tokens
                    .iter()
                    .map(|t| Span::styled(t.text.clone(), self.token_style(t.kind))),
            );
            self.doc.lines.push(Line::from(spans));
        }

        self.doc.lines.push(Line::from(Span::styled(
            format!("╰{}", "─".repeat(self.width.saturating_sub(1))),
            border,
        )));
    }

    fn token_style(&self, kind: TokenKind) -> Style {
        let color = match kind {
            TokenKind::Plain | TokenKind::Punctuation => self.theme.fg,
            TokenKind::Comment => self.theme.fg_dim,
            TokenKind::String => self.theme.string,
            TokenKind::Number | TokenKind::Literal => self.theme.number,
            TokenKind::Keyword => self.theme.keyword,
            TokenKind::Function => self.theme.function,
            TokenKind::Property => self.theme.property,
        };
        let style = Style::default().fg(color);
        if kind == TokenKind::Comment {
            style.add_modifier(Modifier::ITALIC)
        } else {
            style
        }
    }
}

enum Item {
    Space(Style),
    /// Adjacent non-space fragments, kept together when wrapping.
    Word(Vec<(String, Style)>),
}

fn items(pieces: &[(String, Style)]) -> Vec<Item> {
    let mut items: Vec<Item> = Vec::new();
    for (text, style) in pieces {
        let mut rest = text.as_str();
        while let Some(c) = rest.chars().next() {
            let is_space = c.is_whitespace();
            let end = rest
                .find(|ch: char| ch.is_whitespace() != is_space)
                .unwrap_or(rest.len());
            let chunk = &rest[..end];
            if is_space {
                if !matches!(items.last(), Some(Item::Space(_))) {
                    items.push(Item::Space(*style));
                }
            } else if let Some(Item::Word(parts)) = items.last_mut() {
                parts.push((chunk.to_string(), *style));
            } else {
                items.push(Item::Word(vec![(chunk.to_string(), *style)]));
            }
            rest = &rest[end..];
        }
    }
    items
}

fn span_width(text: &str) -> usize {
    Span::raw(text).width()
}

/// Greedy word wrap of styled pieces.
///
/// The first line starts with `prefix`; continuation lines are indented by
/// `indent` spaces. Whitespace collapses to single spaces and never starts a
/// line. Words longer than a line are split.
fn wrap(
    pieces: &[(String, Style)],
    width: usize,
    prefix: Vec<Span<'static>>,
    indent: usize,
    line_style: Style,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut current: Vec<Span<'static>> = prefix;
    let mut used: usize = current.iter().map(Span::width).sum();
    let mut content = false;
    let mut pending_space: Option<Style> = None;

    let new_line = |current: &mut Vec<Span<'static>>, lines: &mut Vec<Line<'static>>| {
        let done = std::mem::replace(current, vec![Span::raw(" ".repeat(indent))]);
        lines.push(Line::from(done).style(line_style));
    };

    for item in items(pieces) {
        match item {
            Item::Space(style) => {
                if content {
                    pending_space = Some(style);
                }
            }
            Item::Word(parts) => {
                let word_width: usize = parts.iter().map(|(t, _)| span_width(t)).sum();
                let space = usize::from(pending_space.is_some());
                if content && used + space + word_width > width {
                    new_line(&mut current, &mut lines);
                    used = indent;
                    pending_space = None;
                } else if let Some(style) = pending_space.take() {
                    current.push(Span::styled(" ", style));
                    used += 1;
                }

                for (text, style) in parts {
                    if used + span_width(&text) <= width {
                        used += span_width(&text);
                        current.push(Span::styled(text, style));
                        continue;
                    }
                    // Split a fragment that cannot fit on any line.
                    let mut chunk = String::new();
                    for c in text.chars() {
                        let w = span_width(c.encode_utf8(&mut [0; 4]));
                        if used + w > width && used > indent {
                            current.push(Span::styled(std::mem::take(&mut chunk), style));
                            new_line(&mut current, &mut lines);
                            used = indent;
                        }
                        chunk.push(c);
                        used += w;
                    }
                    if !chunk.is_empty() {
                        current.push(Span::styled(chunk, style));
                    }
                }
                content = true;
            }
        }
    }

    lines.push(Line::from(current).style(line_style));
    lines
}
