use crate::ui::app::{App, FocusPane};
use crate::ui::document;
use crate::ui::navigator::Section;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Clear, List, ListItem, Paragraph, Scrollbar, ScrollbarOrientation,
        ScrollbarState, Wrap,
    },
    Frame,
};

const SIDEBAR_WIDTH: u16 = 30;

pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    app.set_terminal_width(area.width);

    frame.render_widget(
        Block::default().style(Style::default().bg(app.theme.bg).fg(app.theme.fg)),
        area,
    );

    // Main layout: Header + Body + Footer
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Footer
        ])
        .split(area);

    render_header(frame, app, main_chunks[0]);

    if app.navigator.is_narrow() {
        render_document(frame, app, main_chunks[1]);
        if app.navigator.is_sidebar_open() {
            // Drawer over the document
            let drawer = Rect {
                width: SIDEBAR_WIDTH.min(main_chunks[1].width),
                ..main_chunks[1]
            };
            frame.render_widget(Clear, drawer);
            render_sidebar(frame, app, drawer);
        }
    } else {
        let body_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(main_chunks[1]);

        render_sidebar(frame, app, body_chunks[0]);
        render_document(frame, app, body_chunks[1]);
    }

    render_footer(frame, app, main_chunks[2]);

    if app.show_help {
        render_help(frame, app, area);
    }
}

fn border_style(app: &App, pane: FocusPane) -> Style {
    if app.focus == pane {
        Style::default().fg(app.theme.accent)
    } else {
        Style::default().fg(app.theme.fg_dim)
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = Vec::new();
    if app.navigator.is_narrow() {
        let toggle = if app.navigator.is_sidebar_open() { "✕" } else { "☰" };
        spans.push(Span::styled(
            format!(" {toggle} "),
            Style::default().fg(app.theme.accent),
        ));
    }
    spans.push(Span::styled(
        format!(" {} ", app.store.title),
        Style::default()
            .fg(app.theme.accent)
            .add_modifier(Modifier::BOLD),
    ));
    spans.push(Span::styled(
        format!("· {}", app.navigator.current()),
        Style::default().fg(app.theme.fg_dim),
    ));

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.accent)),
    );
    frame.render_widget(header, area);
}

fn render_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" 📚 Contents ")
        .border_style(border_style(app, FocusPane::Sidebar))
        .style(Style::default().bg(app.theme.bg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(inner);

    render_search_box(frame, app, chunks[0]);

    let items: Vec<ListItem> = Section::ALL
        .iter()
        .enumerate()
        .map(|(i, section)| {
            let is_current = *section == app.navigator.current();
            let is_selected = app.focus == FocusPane::Sidebar && i == app.sidebar_index;
            let style = if is_selected {
                Style::default()
                    .fg(app.theme.bg)
                    .bg(app.theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else if is_current {
                Style::default()
                    .fg(app.theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(app.theme.fg)
            };
            let marker = if is_current { "▌" } else { " " };
            ListItem::new(format!("{marker}{} {}  {}", i + 1, section.icon(), section.label()))
                .style(style)
        })
        .collect();

    frame.render_widget(List::new(items), chunks[1]);
}

fn render_search_box(frame: &mut Frame, app: &App, area: Rect) {
    let (text, style) = if app.search.is_empty() && !app.search_mode {
        ("Search...".to_string(), Style::default().fg(app.theme.fg_dim))
    } else {
        let cursor = if app.search_mode { "▏" } else { "" };
        (
            format!("{}{cursor}", app.search.as_str()),
            Style::default().fg(app.theme.fg),
        )
    };
    let border = if app.search_mode {
        Style::default().fg(app.theme.accent)
    } else {
        Style::default().fg(app.theme.fg_dim)
    };

    let search = Paragraph::new(Line::from(vec![Span::raw("🔍 "), Span::styled(text, style)]))
        .block(Block::default().borders(Borders::ALL).border_style(border));
    frame.render_widget(search, area);
}

fn render_document(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} {} ", app.navigator.current().icon(), app.navigator.current()))
        .border_style(border_style(app, FocusPane::Document));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Leave a column for the scrollbar and one of padding on the left.
    let text_area = Rect {
        x: inner.x.saturating_add(1),
        width: inner.width.saturating_sub(3),
        ..inner
    };
    let height = usize::from(text_area.height);

    let doc = document::build(app, text_area.width);
    app.sync_viewport(&doc, height);

    let visible: Vec<Line> = doc
        .lines
        .iter()
        .skip(app.scroll)
        .take(height)
        .cloned()
        .collect();
    frame.render_widget(Paragraph::new(visible), text_area);

    if doc.len() > height {
        let mut state = ScrollbarState::new(doc.len().saturating_sub(height)).position(app.scroll);
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .style(Style::default().fg(app.theme.fg_dim)),
            inner,
            &mut state,
        );
    }
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let line = if let Some(status) = &app.status {
        Line::from(Span::styled(
            status.clone(),
            Style::default().fg(app.theme.error),
        ))
    } else if app.search_mode {
        Line::from(vec![
            Span::styled("/", Style::default().fg(app.theme.accent)),
            Span::raw(app.search.as_str().to_string()),
            Span::styled(
                "   [Enter] Keep  [Esc] Clear  [↑↓] Move",
                Style::default().fg(app.theme.fg_dim),
            ),
        ])
    } else {
        let hints = match app.focus {
            FocusPane::Sidebar => "[↑↓/jk] Select  [Enter] Go  [1-5] Jump  [Tab] Document  [/] Search  [?] Help  [q] Quit",
            FocusPane::Document => "[jk] Scroll  [n/N] Next/Prev  [Enter] Toggle/Copy  [y] Copy  [/] Search  [m] Menu  [?] Help  [q] Quit",
        };
        Line::from(Span::styled(hints, Style::default().fg(app.theme.fg_dim)))
    };

    frame.render_widget(Paragraph::new(line), area);
}

fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let popup = centered_rect(60, 70, area);
    let key = |k: &str, desc: &str| {
        Line::from(vec![
            Span::styled(
                format!("{k:>12}  "),
                Style::default()
                    .fg(app.theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(desc.to_string(), Style::default().fg(app.theme.fg)),
        ])
    };

    let text = vec![
        key("Tab", "Switch between sidebar and document"),
        key("1-5", "Jump to a section"),
        key("/", "Search FAQs (Enter keeps, Esc clears)"),
        key("m", "Show or hide the sidebar (narrow terminals)"),
        key("j/k", "Scroll or move selection"),
        key("Ctrl+d/u", "Scroll half a page"),
        key("gg / G", "Top / bottom"),
        key("n / N", "Next / previous question or code block"),
        key("Enter", "Expand question or copy code"),
        key("y", "Copy the selected code block"),
        key("t", format!("Next theme (now {})", app.theme.name).as_str()),
        key("?", "Close this help"),
        key("q", "Quit"),
    ];

    frame.render_widget(Clear, popup);
    let help = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" ⌨ Keys ")
                .border_style(Style::default().fg(app.theme.accent))
                .style(Style::default().bg(app.theme.bg)),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(help, popup);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
