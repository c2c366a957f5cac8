//! Application state tests
//!
//! Search filtering and highlighting as rendered, FAQ toggles, copy feedback
//! timing and section navigation, driven through the public `App` API.

use ratatui::style::Color;
use support::content::{ContentStore, TopicId};
use support::search::{highlight, MARK_CLOSE, MARK_OPEN};
use support::ui::app::FocusPane;
use support::ui::clipboard::{CopyOutcome, Delivery};
use support::ui::code_block::COPY_FEEDBACK;
use support::ui::document::{self, Document, Target, NO_FAQ_RESULTS};
use support::ui::navigator::Section;
use support::ui::theme::Theme;
use support::ui::timer::ManualClock;
use support::ui::App;
use std::time::Duration;

/// Helper to create an app over the built-in content with a manual clock
fn create_test_app() -> (App, ManualClock) {
    let clock = ManualClock::new();
    let store = ContentStore::builtin().expect("builtin content");
    let app = App::with_clock(
        store,
        Theme::default_theme().clone(),
        Box::new(clock.clone()),
    )
    .expect("app");
    (app, clock)
}

fn marked_texts(doc: &Document, mark_bg: Color) -> Vec<String> {
    doc.lines
        .iter()
        .flat_map(|line| line.spans.iter())
        .filter(|span| span.style.bg == Some(mark_bg))
        .map(|span| span.content.to_string())
        .collect()
}

fn faq_questions(app: &App) -> Vec<String> {
    app.visible_faqs()
        .into_iter()
        .map(|(_, entry)| entry.question.clone())
        .collect()
}

#[test]
fn test_password_query_shows_only_reset_entry() {
    let (mut app, _) = create_test_app();
    app.set_query("password");

    assert_eq!(faq_questions(&app), vec!["How do I reset my password?"]);

    app.toggle_faq(0);
    let doc = document::build(&app, 100);
    let marked = marked_texts(&doc, app.theme.mark_bg);
    assert!(marked.iter().any(|m| m == "Password"), "answer match keeps its case");
    assert!(marked.iter().any(|m| m == "password"));

    let answer = &app.store.faqs()[0].answer;
    let html = highlight(answer, "password");
    assert!(html.contains(&format!("{MARK_OPEN}Password{MARK_CLOSE}")));
    assert!(html.contains(&format!("{MARK_OPEN}password{MARK_CLOSE}")));
}

#[test]
fn test_empty_query_shows_all_entries_without_marks() {
    let (mut app, _) = create_test_app();
    app.faq.expand_all();

    assert_eq!(app.visible_faqs().len(), 4);
    let doc = document::build(&app, 100);
    assert!(marked_texts(&doc, app.theme.mark_bg).is_empty());
    assert!(!doc.plain_lines().iter().any(|l| l.contains(NO_FAQ_RESULTS)));
}

#[test]
fn test_unmatched_query_shows_no_results_message() {
    let (mut app, _) = create_test_app();
    app.set_query("ZZZ");

    assert!(app.visible_faqs().is_empty());
    let doc = document::build(&app, 100);
    let lines = doc.plain_lines();
    assert!(lines.iter().any(|l| l == NO_FAQ_RESULTS));
    assert!(!lines.iter().any(|l| l.contains("How do I")));
    assert!(doc.target_line(Target::Faq(0)).is_none());
}

#[test]
fn test_query_is_literal() {
    let (mut app, _) = create_test_app();
    for query in ["(", ".*", "[", "?"] {
        app.set_query(query);
        let expected = app
            .store
            .faqs()
            .iter()
            .filter(|e| e.question.contains(query) || e.answer.contains(query))
            .count();
        assert_eq!(app.visible_faqs().len(), expected, "query {query:?}");
    }
}

#[test]
fn test_query_spanning_line_break_marks_nothing() {
    let (mut app, _) = create_test_app();
    let query = ". If you wish";
    let raw = app.store.topic(TopicId::DomainServices).to_string();
    assert_eq!(highlight(&raw, query), raw);

    app.set_query(query);
    let doc = document::build(&app, 100);
    assert!(marked_texts(&doc, app.theme.mark_bg).is_empty());
}

#[test]
fn test_guides_render_one_line_per_guide() {
    let (mut app, _) = create_test_app();
    app.set_query("Guide: Learn");
    let doc = document::build(&app, 100);

    let lines = doc.plain_lines();
    assert!(lines.iter().any(|l| l.contains("• Integration Guide: Learn how")));
    assert!(lines.iter().any(|l| l.contains("• Customization Guide: Tailor")));
    let marked = marked_texts(&doc, app.theme.mark_bg);
    assert_eq!(marked.concat(), "Guide: Learn");
}

#[test]
fn test_faq_toggles_are_independent() {
    let (mut app, _) = create_test_app();
    app.toggle_faq(0);
    app.toggle_faq(1);
    assert!(app.faq.is_expanded(0));
    assert!(app.faq.is_expanded(1));

    app.toggle_faq(1);
    assert!(app.faq.is_expanded(0));
    assert!(!app.faq.is_expanded(1));
}

#[test]
fn test_expansion_survives_filtering() {
    let (mut app, _) = create_test_app();
    app.toggle_faq(3);
    app.set_query("billing");
    assert!(!app.targets().contains(&Target::Faq(3)));

    app.set_query("");
    assert!(app.faq.is_expanded(3));
}

#[test]
fn test_collapsed_answer_not_rendered() {
    let (mut app, _) = create_test_app();
    let doc = document::build(&app, 100);
    assert!(!doc.plain_lines().iter().any(|l| l.contains("Forgot Password")));

    app.toggle_faq(0);
    let doc = document::build(&app, 100);
    assert!(doc.plain_lines().iter().any(|l| l.contains("Forgot Password")));
}

#[test]
fn test_copy_feedback_reverts_after_timeout() {
    let (mut app, clock) = create_test_app();
    assert!(!app.code_blocks[0].is_copied());

    app.complete_copy(CopyOutcome {
        block: 0,
        result: Ok(Delivery::Native),
    });
    assert!(app.code_blocks[0].is_copied());

    clock.advance(COPY_FEEDBACK - Duration::from_millis(1));
    app.tick();
    assert!(app.code_blocks[0].is_copied());

    clock.advance(Duration::from_millis(1));
    assert!(app.tick());
    assert!(!app.code_blocks[0].is_copied());
}

#[test]
fn test_recopy_restarts_feedback() {
    let (mut app, clock) = create_test_app();
    let ok = |block| CopyOutcome {
        block,
        result: Ok(Delivery::Native),
    };

    app.complete_copy(ok(1));
    clock.advance(Duration::from_millis(1500));
    app.complete_copy(ok(1));

    // 2.5s after the first copy, 1s after the second.
    clock.advance(Duration::from_millis(1000));
    app.tick();
    assert!(app.code_blocks[1].is_copied());

    clock.advance(Duration::from_millis(1000));
    app.tick();
    assert!(!app.code_blocks[1].is_copied());
}

#[test]
fn test_copied_label_in_document() {
    let (mut app, _) = create_test_app();
    let doc = document::build(&app, 100);
    assert!(doc.plain_lines().iter().any(|l| l.contains("[⧉ Copy]")));

    app.complete_copy(CopyOutcome {
        block: 0,
        result: Ok(Delivery::Native),
    });
    let doc = document::build(&app, 100);
    assert!(doc.plain_lines().iter().any(|l| l.contains("[✓ Copied!]")));
}

#[test]
fn test_document_sections_in_order() {
    let (app, _) = create_test_app();
    let doc = document::build(&app, 100);

    let anchors: Vec<usize> = Section::ALL.iter().map(|s| doc.anchor(*s)).collect();
    assert!(anchors.windows(2).all(|w| w[0] < w[1]));
    for section in Section::ALL {
        assert_eq!(doc.section_at(doc.anchor(section)), section);
        assert_eq!(doc.plain_lines()[doc.anchor(section)], section.label());
    }
}

#[test]
fn test_document_lines_fit_width() {
    let (mut app, _) = create_test_app();
    app.faq.expand_all();
    let doc = document::build(&app, 60);

    for line in &doc.lines {
        let is_code = line.spans.first().is_some_and(|s| s.content == "│");
        if !is_code {
            assert!(line.width() <= 60, "line too wide: {line:?}");
        }
    }
}

#[test]
fn test_navigate_selects_section_and_focuses_document_when_narrow() {
    let (mut app, _) = create_test_app();
    app.set_terminal_width(70);
    app.toggle_sidebar();
    assert_eq!(app.focus, FocusPane::Sidebar);

    app.navigate(Section::ApiReference);
    assert_eq!(app.navigator.current(), Section::ApiReference);
    assert!(!app.navigator.is_sidebar_open());
    assert_eq!(app.focus, FocusPane::Document);
}

#[test]
fn test_scroll_spy_updates_current_section() {
    let (mut app, _) = create_test_app();
    let doc = document::build(&app, 100);
    app.sync_viewport(&doc, 10);

    let faq_line = doc.anchor(Section::Faq);
    app.scroll_down(faq_line);
    app.sync_viewport(&doc, 10);
    assert_eq!(app.navigator.current(), Section::Faq);
    assert_eq!(app.sidebar_index, Section::Faq.index());
}

#[test]
fn test_navigate_resolves_anchor_on_sync() {
    let (mut app, _) = create_test_app();
    let doc = document::build(&app, 100);
    app.sync_viewport(&doc, 10);

    app.navigate(Section::Registration);
    app.sync_viewport(&doc, 10);
    assert_eq!(app.scroll, doc.anchor(Section::Registration));
    assert_eq!(app.navigator.current(), Section::Registration);
}

#[test]
fn test_next_target_scrolls_into_view() {
    let (mut app, _) = create_test_app();
    app.set_query("zzz");
    let doc = document::build(&app, 100);
    app.sync_viewport(&doc, 5);

    // First target is the request code block, far below the top.
    app.next_target();
    app.previous_target();
    let doc = document::build(&app, 100);
    app.sync_viewport(&doc, 5);

    let line = doc.target_line(Target::Code(0)).expect("code block line");
    assert!(app.scroll <= line && line < app.scroll + 5);
    assert_eq!(app.navigator.current(), Section::ApiReference);
}
