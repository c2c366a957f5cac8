//! Highlighted projections of text for a search query.
//!
//! Highlighting is applied once per render pass. Running it again over its own
//! output would wrap the markers a second time.

use super::find_matches;
use crate::markup::{self, Token};

pub const MARK_OPEN: &str = r#"<mark class="highlight">"#;
pub const MARK_CLOSE: &str = "</mark>";

/// A borrowed piece of highlighted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Plain(&'a str),
    Marked(&'a str),
}

impl<'a> Segment<'a> {
    pub fn text(&self) -> &'a str {
        match self {
            Segment::Plain(s) | Segment::Marked(s) => *s,
        }
    }

    pub fn is_marked(&self) -> bool {
        matches!(self, Segment::Marked(_))
    }
}

/// Split `text` into plain and marked segments.
///
/// Concatenating the segment texts gives back `text`. An empty query yields a
/// single plain segment.
pub fn highlight_segments<'a>(text: &'a str, query: &str) -> Vec<Segment<'a>> {
    let mut segments = Vec::new();
    let mut last = 0;

    for range in find_matches(text, query) {
        if range.start > last {
            segments.push(Segment::Plain(&text[last..range.start]));
        }
        segments.push(Segment::Marked(&text[range.clone()]));
        last = range.end;
    }

    if last < text.len() || segments.is_empty() {
        segments.push(Segment::Plain(&text[last..]));
    }
    segments
}

/// Wrap every occurrence of `query` in `text` with a `<mark>` element.
///
/// The matched text keeps its original casing; everything else is copied
/// unchanged. Nothing is escaped.
pub fn highlight(text: &str, query: &str) -> String {
    if query.is_empty() {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    push_highlighted(&mut out, text, query);
    out
}

fn push_highlighted(out: &mut String, text: &str, query: &str) {
    for segment in highlight_segments(text, query) {
        match segment {
            Segment::Plain(s) => out.push_str(s),
            Segment::Marked(s) => {
                out.push_str(MARK_OPEN);
                out.push_str(s);
                out.push_str(MARK_CLOSE);
            }
        }
    }
}

/// Like [`highlight`], for text that carries author markup.
///
/// Tags and entity references are copied verbatim; only the text between them
/// is searched, so a query can never split an attribute or a reference.
pub fn highlight_markup(text: &str, query: &str) -> String {
    if query.is_empty() {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    for token in markup::tokenize(text) {
        match token {
            Token::Text(s) => push_highlighted(&mut out, s, query),
            other => out.push_str(other.raw()),
        }
    }
    out
}
