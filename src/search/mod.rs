//! # Search Module
//!
//! Case-insensitive literal substring search over the content store.
//!
//! ## Overview
//!
//! The query is never compiled into a pattern. Characters such as `(`, `*` or
//! `[` are matched as themselves, so no user input can make matching fail.
//!
//! Case folding is done one character at a time with [`char::to_lowercase`].
//! Offsets returned by [`find_matches`] are byte offsets into the original
//! text, which stays valid even when a character's lowercase form has a
//! different UTF-8 length.
//!
//! - [`SearchQuery`] - the live query string owned by the UI controller
//! - [`matches`] / [`filter_faqs`] - FAQ filtering
//! - [`highlight`] - marked projections of matched text

pub mod highlight;

pub use highlight::{
    highlight, highlight_markup, highlight_segments, Segment, MARK_CLOSE, MARK_OPEN,
};

use crate::content::FaqEntry;
use std::ops::Range;

/// The current search text. An empty query means "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    text: String,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn push(&mut self, c: char) {
        self.text.push(c);
    }

    pub fn pop(&mut self) -> Option<char> {
        self.text.pop()
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn set(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
    }
}

fn chars_eq(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// End offset of a case-insensitive match of `needle` starting at `start`.
fn match_at(haystack: &str, start: usize, needle: &str) -> Option<usize> {
    let mut hay = haystack[start..].char_indices();
    let mut end = start;
    for n in needle.chars() {
        let (offset, h) = hay.next()?;
        if !chars_eq(h, n) {
            return None;
        }
        end = start + offset + h.len_utf8();
    }
    Some(end)
}

/// First case-insensitive occurrence of `needle` at or after byte `from`.
pub fn find_from(haystack: &str, needle: &str, from: usize) -> Option<Range<usize>> {
    if needle.is_empty() || from > haystack.len() {
        return None;
    }
    haystack[from..]
        .char_indices()
        .find_map(|(offset, _)| {
            let start = from + offset;
            match_at(haystack, start, needle).map(|end| start..end)
        })
}

/// All leftmost, non-overlapping occurrences of `query` in `text`.
pub fn find_matches(text: &str, query: &str) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut from = 0;
    while let Some(range) = find_from(text, query, from) {
        from = range.end;
        ranges.push(range);
    }
    ranges
}

/// Whether `query` occurs in `text`, ignoring case. The empty query occurs
/// everywhere.
pub fn contains_ignore_case(text: &str, query: &str) -> bool {
    query.is_empty() || find_from(text, query, 0).is_some()
}

/// Whether an FAQ entry should be shown for `query`.
pub fn matches(entry: &FaqEntry, query: &str) -> bool {
    contains_ignore_case(&entry.question, query) || contains_ignore_case(&entry.answer, query)
}

/// Entries matching `query`, paired with their position in `entries`.
/// Original order is preserved.
pub fn filter_faqs<'a>(entries: &'a [FaqEntry], query: &str) -> Vec<(usize, &'a FaqEntry)> {
    entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| matches(entry, query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries() -> Vec<FaqEntry> {
        vec![
            FaqEntry::new("How do I reset my password?", "Contact support."),
            FaqEntry::new("Billing?", "See the Billing section."),
            FaqEntry::new("Support hours", "We reply within a day (usually)."),
        ]
    }

    #[test]
    fn test_find_matches_case_insensitive() {
        let ranges = find_matches("Password, PASSWORD and password", "password");
        assert_eq!(ranges, vec![0..8, 10..18, 23..31]);
    }

    #[test]
    fn test_find_matches_non_overlapping() {
        assert_eq!(find_matches("aaaa", "aa"), vec![0..2, 2..4]);
        assert_eq!(find_matches("aaa", "aa"), vec![0..2]);
    }

    #[test]
    fn test_find_matches_empty_query() {
        assert!(find_matches("anything", "").is_empty());
    }

    #[test]
    fn test_metacharacters_are_literal() {
        assert!(find_matches("a (b) c", "(").len() == 1);
        assert!(find_matches("abc", ".*").is_empty());
        assert_eq!(find_matches("x[1]", "[1]"), vec![1..4]);
        assert!(contains_ignore_case("we reply (usually)", "(USUALLY)"));
    }

    #[test]
    fn test_non_ascii_offsets() {
        let text = "Dovuchcha’s SERVİCE and service";
        let ranges = find_matches(text, "service");
        assert_eq!(ranges.len(), 1);
        assert_eq!(&text[ranges[0].clone()], "service");

        let ranges = find_matches("ÄPFEL und äpfel", "äpfel");
        assert_eq!(ranges.len(), 2);
        assert_eq!(&"ÄPFEL und äpfel"[ranges[0].clone()], "ÄPFEL");
    }

    #[test]
    fn test_matches_question_or_answer() {
        let faqs = entries();
        assert!(matches(&faqs[0], "PASSWORD"));
        assert!(matches(&faqs[1], "section"));
        assert!(!matches(&faqs[1], "password"));
        assert!(matches(&faqs[1], ""));
    }

    #[test]
    fn test_filter_preserves_order() {
        let faqs = entries();
        let hits: Vec<usize> = filter_faqs(&faqs, "s").iter().map(|(i, _)| *i).collect();
        assert_eq!(hits, vec![0, 1, 2]);

        let hits: Vec<usize> = filter_faqs(&faqs, "support").iter().map(|(i, _)| *i).collect();
        assert_eq!(hits, vec![0, 2]);
    }

    #[test]
    fn test_filter_no_results() {
        assert!(filter_faqs(&entries(), "ZZZ").is_empty());
    }

    #[test]
    fn test_search_query_editing() {
        let mut query = SearchQuery::default();
        assert!(query.is_empty());
        query.push('p');
        query.push('w');
        assert_eq!(query.as_str(), "pw");
        assert_eq!(query.pop(), Some('w'));
        query.set("billing");
        assert_eq!(query.as_str(), "billing");
        query.clear();
        assert!(query.is_empty());
    }
}
