//! # Static HTML Export
//!
//! Renders the support page, in its current search and FAQ state, as one
//! self-contained HTML file.
//!
//! Author markup in topic texts is trusted and passed through with matches
//! wrapped in `<mark class="highlight">`. Everything else (questions,
//! answers, code) is escaped before it is written.

use crate::content::{SubdomainStatus, TopicId};
use crate::search::{highlight_markup, highlight_segments, MARK_CLOSE, MARK_OPEN};
use crate::ui::app::App;
use crate::ui::document::NO_FAQ_RESULTS;
use crate::ui::navigator::Section;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use ratatui::style::Color;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Make `s` safe inside a quoted attribute or a `<pre>` block: all five
/// of `&`, `<`, `>`, `"` and `'` become character references.
pub fn escape_html(s: &str) -> String {
    escape_with(s, true)
}

/// Make `s` safe as element text. Quotes pass through untouched.
pub fn escape_html_text(s: &str) -> String {
    escape_with(s, false)
}

fn escape_with(s: &str, quotes: bool) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if quotes => out.push_str("&quot;"),
            '\'' if quotes => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Write the page to `path`.
pub fn export_to(app: &App, path: &Path) -> Result<()> {
    let html = render_page(app, Utc::now());
    fs::write(path, html)
        .with_context(|| format!("Failed to write export file: {}", path.display()))?;
    tracing::info!(path = %path.display(), query = app.query(), "Exported HTML page");
    Ok(())
}

/// The full HTML document.
pub fn render_page(app: &App, generated_at: DateTime<Utc>) -> String {
    let title = escape_html_text(&app.store.title);
    let mut body = String::new();

    general(&mut body, app);
    section(&mut body, Section::Registration, &topic(app, TopicId::Registration));
    faq(&mut body, app);
    section(&mut body, Section::Guides, &guides(app));
    api_reference(&mut body, app);

    let mut nav = String::new();
    for s in Section::ALL {
        let _ = writeln!(
            nav,
            r##"      <li><a href="#{id}">{icon} {label}</a></li>"##,
            id = s.id(),
            icon = s.icon(),
            label = escape_html_text(s.label()),
        );
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title}</title>
  <style>
{css}  </style>
</head>
<body>
  <nav class="sidebar">
    <h1>{title}</h1>
    <p class="query">{query}</p>
    <ul>
{nav}    </ul>
  </nav>
  <main>
{body}  </main>
  <footer>Generated {generated}</footer>
</body>
</html>
"#,
        css = stylesheet(app),
        query = if app.search.is_empty() {
            String::new()
        } else {
            format!("Search: “{}”", escape_html_text(app.query()))
        },
        generated = generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
    )
}

fn css_color(color: Color) -> String {
    match color {
        Color::Rgb(r, g, b) => format!("#{r:02x}{g:02x}{b:02x}"),
        _ => "inherit".to_string(),
    }
}

fn stylesheet(app: &App) -> String {
    let t = &app.theme;
    format!(
        "    body {{ margin: 0; display: flex; font-family: sans-serif; background: {bg}; color: {fg}; }}
    a {{ color: {link}; }}
    .sidebar {{ position: sticky; top: 0; height: 100vh; width: 16rem; padding: 1rem; box-sizing: border-box; }}
    .sidebar ul {{ list-style: none; padding: 0; }}
    .query {{ color: {dim}; }}
    main {{ flex: 1; max-width: 60rem; padding: 1rem 2rem; }}
    h2 {{ color: {accent}; }}
    mark.highlight {{ background: {mark_bg}; color: {mark_fg}; }}
    .faq-item {{ border-bottom: 1px solid {dim}; padding: 0.5rem 0; }}
    .empty {{ color: {dim}; }}
    .status-active {{ color: {success}; }}
    .status-maintenance {{ color: {warning}; }}
    .status-inactive {{ color: {error}; }}
    pre {{ background: {sel}; padding: 0.75rem; overflow-x: auto; }}
    .ln {{ color: {dim}; user-select: none; display: inline-block; width: 2.5em; }}
    .hl-comment {{ color: {dim}; font-style: italic; }}
    .hl-string {{ color: {string}; }}
    .hl-number, .hl-constant {{ color: {number}; }}
    .hl-keyword {{ color: {keyword}; }}
    .hl-function {{ color: {function}; }}
    .hl-property {{ color: {property}; }}
    footer {{ position: fixed; bottom: 0; right: 0; padding: 0.5rem; color: {dim}; font-size: 0.8rem; }}
",
        bg = css_color(t.bg),
        fg = css_color(t.fg),
        dim = css_color(t.fg_dim),
        link = css_color(t.link),
        accent = css_color(t.accent),
        mark_bg = css_color(t.mark_bg),
        mark_fg = css_color(t.mark_fg),
        sel = css_color(t.selection_bg),
        success = css_color(t.success),
        warning = css_color(t.warning),
        error = css_color(t.error),
        string = css_color(t.string),
        number = css_color(t.number),
        keyword = css_color(t.keyword),
        function = css_color(t.function),
        property = css_color(t.property),
    )
}

/// Escape plain text and mark matches.
fn highlight_text(text: &str, query: &str) -> String {
    highlight_segments(text, query)
        .into_iter()
        .map(|segment| {
            let escaped = escape_html_text(segment.text());
            if segment.is_marked() && !escaped.is_empty() {
                format!("{MARK_OPEN}{escaped}{MARK_CLOSE}")
            } else {
                escaped
            }
        })
        .collect()
}

/// Blank-line separated paragraphs of trusted markup, with matches marked.
fn paragraphs(markup: &str, query: &str) -> String {
    let mut out = String::new();
    let mut current: Vec<&str> = Vec::new();
    for line in markup.lines() {
        if line.trim().is_empty() {
            flush_paragraph(&mut current, query, &mut out);
        } else {
            current.push(line);
        }
    }
    flush_paragraph(&mut current, query, &mut out);
    out
}

fn flush_paragraph(lines: &mut Vec<&str>, query: &str, out: &mut String) {
    if lines.is_empty() {
        return;
    }
    let text = lines.join("\n");
    let tag = if text.contains("<ul") || text.contains("<ol") {
        "div"
    } else {
        "p"
    };
    let _ = writeln!(out, "      <{tag}>{}</{tag}>", highlight_markup(&text, query));
    lines.clear();
}

fn topic(app: &App, id: TopicId) -> String {
    paragraphs(app.store.topic(id), app.query())
}

/// Guides keep their source line breaks.
fn guides(app: &App) -> String {
    let text = highlight_markup(app.store.topic(TopicId::Guides).trim(), app.query());
    format!("      <p>{}</p>\n", text.replace('\n', "<br>\n"))
}

fn section(out: &mut String, section: Section, inner: &str) {
    let _ = write!(
        out,
        "    <section id=\"{id}\">\n      <h2>{label}</h2>\n{inner}    </section>\n",
        id = section.id(),
        label = escape_html_text(section.label()),
    );
}

fn general(out: &mut String, app: &App) {
    let query = app.query();
    let mut inner = topic(app, TopicId::General);

    inner.push_str("      <ul class=\"contacts\">\n");
    for contact in app.store.contacts() {
        let _ = writeln!(
            inner,
            r#"        <li>{label}: <a href="{href}">{display}</a></li>"#,
            label = escape_html_text(&contact.label),
            href = escape_html(&contact.href),
            display = escape_html_text(&contact.display),
        );
    }
    inner.push_str("      </ul>\n      <h3>Domain Services</h3>\n");
    inner.push_str(&topic(app, TopicId::DomainServices));

    if !app.store.subdomains().is_empty() {
        inner.push_str(
            "      <table>\n        <tr><th>Subdomain</th><th>Purpose</th><th>Status</th></tr>\n",
        );
        for subdomain in app.store.subdomains() {
            let class = match subdomain.status {
                SubdomainStatus::Active => "status-active",
                SubdomainStatus::Maintenance => "status-maintenance",
                SubdomainStatus::Inactive => "status-inactive",
            };
            let _ = writeln!(
                inner,
                r#"        <tr><td>{}</td><td>{}</td><td class="{class}">{}</td></tr>"#,
                highlight_text(&subdomain.name, query),
                highlight_text(&subdomain.purpose, query),
                subdomain.status.label(),
            );
        }
        inner.push_str("      </table>\n");
    }

    section(out, Section::General, &inner);
}

fn faq(out: &mut String, app: &App) {
    let query = app.query();
    let visible = app.visible_faqs();
    let mut inner = String::new();

    if visible.is_empty() {
        let _ = writeln!(inner, "      <p class=\"empty\">{NO_FAQ_RESULTS}</p>");
    }
    for (index, entry) in visible {
        let expanded = app.faq.is_expanded(index);
        let _ = writeln!(
            inner,
            "      <div class=\"faq-item\">\n        <h3>{} {}</h3>",
            if expanded { "▼" } else { "▶" },
            highlight_text(&entry.question, query),
        );
        if expanded {
            for para in entry.answer.split("\n\n").map(str::trim).filter(|p| !p.is_empty()) {
                let text = para.split_whitespace().collect::<Vec<_>>().join(" ");
                let _ = writeln!(inner, "        <p>{}</p>", highlight_text(&text, query));
            }
        }
        inner.push_str("      </div>\n");
    }

    section(out, Section::Faq, &inner);
}

fn api_reference(out: &mut String, app: &App) {
    let mut inner = topic(app, TopicId::ApiDescription);

    for block in &app.code_blocks {
        let _ = writeln!(
            inner,
            "      <h3>{} ({}):</h3>\n      <pre><code class=\"language-{}\">",
            escape_html_text(&block.caption),
            block.language.display_name(),
            block.language.name(),
        );
        for (n, line) in block.lines().iter().enumerate() {
            let _ = write!(inner, r#"<span class="ln">{}</span>"#, n + 1);
            for token in line {
                let text = escape_html(&token.text);
                match token.kind {
                    crate::ui::syntax::TokenKind::Plain => inner.push_str(&text),
                    kind => {
                        let _ = write!(inner, r#"<span class="{}">{text}</span>"#, kind.css_class());
                    }
                }
            }
            inner.push('\n');
        }
        inner.push_str("</code></pre>\n");
    }

    inner.push_str(&topic(app, TopicId::ApiInstructions));
    section(out, Section::ApiReference, &inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentStore;
    use crate::ui::theme::Theme;
    use chrono::TimeZone;

    fn app() -> App {
        let store = ContentStore::builtin().expect("builtin content");
        App::new(store, Theme::default_theme().clone()).expect("app")
    }

    fn timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0)
            .single()
            .expect("valid date")
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#x27;&amp;&#x27;&lt;/a&gt;"
        );
        assert_eq!(escape_html_text(r#"a "b" <c>"#), r#"a "b" &lt;c&gt;"#);
    }

    #[test]
    fn test_page_has_section_anchors() {
        let html = render_page(&app(), timestamp());
        for id in ["general", "registration", "faq", "guides", "api"] {
            assert!(html.contains(&format!(r##"href="#{id}""##)), "missing link to {id}");
            assert!(html.contains(&format!(r#"<section id="{id}">"#)), "missing section {id}");
        }
        assert!(html.contains("Generated 2024-05-01 12:30:00 UTC"));
    }

    #[test]
    fn test_collapsed_answers_are_omitted() {
        let mut app = app();
        let html = render_page(&app, timestamp());
        assert!(!html.contains("Forgot Password"));

        app.faq.toggle(0);
        let html = render_page(&app, timestamp());
        assert!(html.contains("Forgot Password"));
    }

    #[test]
    fn test_query_marks_matches_and_filters() {
        let mut app = app();
        app.set_query("billing");
        app.faq.expand_all();
        let html = render_page(&app, timestamp());

        assert!(html.contains(r#"<mark class="highlight">billing</mark>"#));
        assert!(!html.contains("How do I reset my password?"));
        // Links inside trusted markup survive highlighting.
        assert!(html.contains(r#"<a href="https://accounts.dovuchcha.uz">"#));
    }

    #[test]
    fn test_guides_keep_line_breaks() {
        let mut app = app();
        app.set_query("guide: learn");
        let html = render_page(&app, timestamp());
        assert!(html.contains("workflow.<br>"));
        assert!(html.contains(r#"Integration <mark class="highlight">Guide: Learn</mark>"#));
    }

    #[test]
    fn test_query_across_line_break_is_not_marked() {
        let mut app = app();
        app.set_query(". If you wish");
        let html = render_page(&app, timestamp());
        assert!(!html.contains("<mark"));
    }

    #[test]
    fn test_no_results_message() {
        let mut app = app();
        app.set_query("ZZZ");
        let html = render_page(&app, timestamp());
        assert!(html.contains(NO_FAQ_RESULTS));
    }

    #[test]
    fn test_code_is_escaped() {
        let html = render_page(&app(), timestamp());
        assert!(html.contains(r#"<span class="hl-function">fetch</span>"#));
        assert!(html.contains(
            r#"<span class="hl-string">&#x27;Authorization&#x27;</span>"#
        ));
        assert!(html.contains(r#"<span class="hl-property">&quot;items&quot;</span>"#));
        assert!(!html.contains("response =>"));
    }

    #[test]
    fn test_export_to_writes_file() {
        let temp_dir = tempfile::TempDir::new().expect("create temp dir");
        let path = temp_dir.path().join("support.html");
        export_to(&app(), &path).expect("export");
        let contents = fs::read_to_string(&path).expect("read");
        assert!(contents.starts_with("<!DOCTYPE html>"));
    }
}
