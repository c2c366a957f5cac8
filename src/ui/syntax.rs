//! # Syntax Colouring
//!
//! A small regex tokenizer for the JavaScript and JSON samples shown in code
//! blocks. It classifies tokens well enough for colouring; it is not a parser.
//!
//! Identifiers are classified after matching because the `regex` crate has no
//! look-around: an identifier followed by `(` is a function call, one preceded
//! by `.` is a property, and a JSON string followed by `:` is an object key.

use crate::content::Language;
use anyhow::{Context, Result};
use regex::{Captures, Regex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Plain,
    Comment,
    String,
    Number,
    Keyword,
    /// `true`, `false`, `null`, `undefined`
    Literal,
    Function,
    Property,
    Punctuation,
}

impl TokenKind {
    /// CSS class used by the HTML export.
    pub fn css_class(self) -> &'static str {
        match self {
            TokenKind::Plain => "hl-plain",
            TokenKind::Comment => "hl-comment",
            TokenKind::String => "hl-string",
            TokenKind::Number => "hl-number",
            TokenKind::Keyword => "hl-keyword",
            TokenKind::Literal => "hl-constant",
            TokenKind::Function => "hl-function",
            TokenKind::Property => "hl-property",
            TokenKind::Punctuation => "hl-punctuation",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeToken {
    pub kind: TokenKind,
    pub text: String,
}

/// One source line as coloured tokens. Never contains `\n`.
pub type CodeLine = Vec<CodeToken>;

const JS_KEYWORDS: &[&str] = &[
    "async", "await", "break", "case", "catch", "class", "const", "continue", "default", "do",
    "else", "export", "finally", "for", "from", "function", "if", "import", "let", "new",
    "return", "switch", "this", "throw", "try", "typeof", "var", "while",
];

const LITERALS: &[&str] = &["true", "false", "null", "undefined"];

const JS_PATTERN: &str = r#"(?P<comment>//[^\n]*|/\*(?s:.*?)\*/)|(?P<string>'(?:[^'\\\n]|\\.)*'|"(?:[^"\\\n]|\\.)*"|`(?:[^`\\]|\\.)*`)|(?P<number>\b\d+(?:\.\d+)?\b)|(?P<ident>[A-Za-z_$][\w$]*)|(?P<punct>[{}\[\]().,;:=<>+\-*/!&|?%])"#;

const JSON_PATTERN: &str = r#"(?P<string>"(?:[^"\\\n]|\\.)*")|(?P<number>-?\d+(?:\.\d+)?(?:[eE][+-]?\d+)?)|(?P<ident>true|false|null)|(?P<punct>[{}\[\],:])"#;

pub struct Highlighter {
    language: Language,
    regex: Regex,
}

impl Highlighter {
    pub fn new(language: Language) -> Result<Self> {
        let pattern = match language {
            Language::JavaScript => JS_PATTERN,
            Language::Json => JSON_PATTERN,
        };
        let regex = Regex::new(pattern).with_context(|| {
            format!(
                "Failed to compile {} syntax pattern",
                language.display_name()
            )
        })?;
        Ok(Self { language, regex })
    }

    /// Tokenize `source` and split the result into lines.
    pub fn highlight(&self, source: &str) -> Vec<CodeLine> {
        let mut tokens = Vec::new();
        let mut last = 0;

        for caps in self.regex.captures_iter(source) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            if whole.start() > last {
                tokens.push((TokenKind::Plain, &source[last..whole.start()]));
            }
            let kind = self.classify(&caps, source, whole.start(), whole.end());
            tokens.push((kind, whole.as_str()));
            last = whole.end();
        }
        if last < source.len() {
            tokens.push((TokenKind::Plain, &source[last..]));
        }

        split_lines(&tokens)
    }

    fn classify(&self, caps: &Captures<'_>, source: &str, start: usize, end: usize) -> TokenKind {
        let followed_by = |c: char| source[end..].trim_start_matches([' ', '\t']).starts_with(c);

        if caps.name("comment").is_some() {
            TokenKind::Comment
        } else if caps.name("string").is_some() {
            if self.language == Language::Json && followed_by(':') {
                TokenKind::Property
            } else {
                TokenKind::String
            }
        } else if caps.name("number").is_some() {
            TokenKind::Number
        } else if caps.name("punct").is_some() {
            TokenKind::Punctuation
        } else {
            let word = &source[start..end];
            if LITERALS.contains(&word) {
                TokenKind::Literal
            } else if JS_KEYWORDS.contains(&word) {
                TokenKind::Keyword
            } else if source[..start].ends_with('.') {
                if followed_by('(') {
                    TokenKind::Function
                } else {
                    TokenKind::Property
                }
            } else if followed_by('(') {
                TokenKind::Function
            } else {
                TokenKind::Plain
            }
        }
    }
}

fn split_lines(tokens: &[(TokenKind, &str)]) -> Vec<CodeLine> {
    let mut lines: Vec<CodeLine> = vec![Vec::new()];
    for (kind, text) in tokens {
        for (i, part) in text.split('\n').enumerate() {
            if i > 0 {
                lines.push(Vec::new());
            }
            if part.is_empty() {
                continue;
            }
            if let Some(line) = lines.last_mut() {
                line.push(CodeToken {
                    kind: *kind,
                    text: part.to_string(),
                });
            }
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds_of(line: &CodeLine) -> Vec<(TokenKind, &str)> {
        line.iter().map(|t| (t.kind, t.text.as_str())).collect()
    }

    fn find(lines: &[CodeLine], text: &str) -> Option<TokenKind> {
        lines
            .iter()
            .flatten()
            .find(|t| t.text == text)
            .map(|t| t.kind)
    }

    #[test]
    fn test_line_count_matches_source() {
        let hl = Highlighter::new(Language::JavaScript).expect("js");
        let source = "a\n\nb /* x\ny */\n";
        assert_eq!(hl.highlight(source).len(), source.split('\n').count());
    }

    #[test]
    fn test_js_tokens() {
        let hl = Highlighter::new(Language::JavaScript).expect("js");
        let lines = hl.highlight("// get items\nfetch('/api').then(r => r.json());");

        assert_eq!(kinds_of(&lines[0]), vec![(TokenKind::Comment, "// get items")]);
        assert_eq!(find(&lines, "fetch"), Some(TokenKind::Function));
        assert_eq!(find(&lines, "'/api'"), Some(TokenKind::String));
        assert_eq!(find(&lines, "then"), Some(TokenKind::Function));
        assert_eq!(find(&lines, "r"), Some(TokenKind::Plain));
    }

    #[test]
    fn test_js_keywords_and_properties() {
        let hl = Highlighter::new(Language::JavaScript).expect("js");
        let lines = hl.highlight("const n = console.log; return null;");
        assert_eq!(find(&lines, "const"), Some(TokenKind::Keyword));
        assert_eq!(find(&lines, "return"), Some(TokenKind::Keyword));
        assert_eq!(find(&lines, "log"), Some(TokenKind::Property));
        assert_eq!(find(&lines, "null"), Some(TokenKind::Literal));
    }

    #[test]
    fn test_json_keys_and_values() {
        let hl = Highlighter::new(Language::Json).expect("json");
        let lines = hl.highlight("{\n  \"count\": 2,\n  \"id\": \"item_1\",\n  \"ok\": true\n}");
        assert_eq!(lines.len(), 5);
        assert_eq!(find(&lines, "\"count\""), Some(TokenKind::Property));
        assert_eq!(find(&lines, "\"item_1\""), Some(TokenKind::String));
        assert_eq!(find(&lines, "2"), Some(TokenKind::Number));
        assert_eq!(find(&lines, "true"), Some(TokenKind::Literal));
    }

    #[test]
    fn test_tokens_reassemble_each_line() {
        let hl = Highlighter::new(Language::JavaScript).expect("js");
        let source = "fetch('x', {\n  headers: { 'A': 'B' }\n})";
        let lines = hl.highlight(source);
        let rebuilt: Vec<String> = lines
            .iter()
            .map(|l| l.iter().map(|t| t.text.as_str()).collect())
            .collect();
        assert_eq!(rebuilt.join("\n"), source);
    }
}
