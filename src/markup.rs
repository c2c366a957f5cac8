//! # Author Markup Tokenizer
//!
//! Splits topic text into plain text, tags and entity references.
//!
//! Topic texts carry a handful of trusted HTML fragments written by the page
//! authors. The tokenizer does not validate or balance them; it only finds
//! their boundaries so that search highlighting never lands inside a tag and
//! the terminal renderer can style the text between them.

/// A lexical piece of a topic string. Concatenating the raw slices of all
/// tokens yields the input unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Text(&'a str),
    Tag(Tag<'a>),
    /// A character reference such as `&amp;` or `&#39;`, including `&` and `;`.
    Entity(&'a str),
}

impl<'a> Token<'a> {
    pub fn raw(&self) -> &'a str {
        match self {
            Token::Text(s) | Token::Entity(s) => *s,
            Token::Tag(tag) => tag.raw,
        }
    }
}

/// An opening, closing or self-closing tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag<'a> {
    /// The full tag text, `<` through `>`.
    pub raw: &'a str,
    pub name: &'a str,
    pub closing: bool,
    pub self_closing: bool,
}

impl<'a> Tag<'a> {
    fn parse(raw: &'a str) -> Self {
        let inner = raw
            .strip_prefix('<')
            .and_then(|s| s.strip_suffix('>'))
            .unwrap_or(raw);
        let (closing, inner) = match inner.strip_prefix('/') {
            Some(rest) => (true, rest),
            None => (false, inner),
        };
        let self_closing = inner.trim_end().ends_with('/');
        let name_end = inner
            .find(|c: char| c.is_whitespace() || c == '/')
            .unwrap_or(inner.len());

        Self {
            raw,
            name: &inner[..name_end],
            closing,
            self_closing,
        }
    }

    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// Split `text` into tokens.
///
/// A `<` with no closing `>` and a `&` that does not start a well-formed
/// reference are treated as ordinary text.
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut text_start = 0;
    let mut i = 0;
    let bytes = text.as_bytes();

    while i < bytes.len() {
        let special_len = match bytes[i] {
            b'<' => text[i..].find('>').map(|end| end + 1),
            b'&' => entity_len(&text[i..]),
            _ => None,
        };

        match special_len {
            Some(len) => {
                if text_start < i {
                    tokens.push(Token::Text(&text[text_start..i]));
                }
                let raw = &text[i..i + len];
                tokens.push(if bytes[i] == b'<' {
                    Token::Tag(Tag::parse(raw))
                } else {
                    Token::Entity(raw)
                });
                i += len;
                text_start = i;
            }
            None => i += 1,
        }
    }

    if text_start < text.len() {
        tokens.push(Token::Text(&text[text_start..]));
    }
    tokens
}

fn entity_len(s: &str) -> Option<usize> {
    let body = s.strip_prefix('&')?;
    let end = body.find(';')?;
    let name = &body[..end];
    let valid = !name.is_empty()
        && name.len() <= 10
        && name
            .strip_prefix('#')
            .unwrap_or(name)
            .chars()
            .all(|c| c.is_ascii_alphanumeric());
    valid.then_some(end + 2)
}

/// Decode an entity token into the character it names.
pub fn decode_entity(raw: &str) -> Option<char> {
    let name = raw.strip_prefix('&')?.strip_suffix(';')?;
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let num = name.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}
