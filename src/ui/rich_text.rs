//! # Rich Text
//!
//! Turns topic text (plain or with author markup) into blocks of styled runs
//! with search matches marked.
//!
//! Whitespace is collapsed the way a browser would, except that a blank line
//! starts a new paragraph. Supported tags: `<a>` (link), `<strong>`/`<b>`
//! (bold), `<ul>`/`<li>` (bullets), `<p>` and `<br>` (breaks). Other tags are
//! dropped and their text kept.
//!
//! Matches are found in the raw text between tags, before whitespace is
//! collapsed, the same rule the HTML export follows. A match never spans a
//! tag or an entity.

use crate::markup::{self, decode_entity, Token};
use crate::search::find_matches;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunStyle {
    pub bold: bool,
    pub link: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub style: RunStyle,
    pub marked: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Paragraph,
    Bullet,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    pub runs: Vec<Run>,
}

impl Block {
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Bold everything up to and including the first `delimiter`.
    pub fn embolden_lead(&mut self, delimiter: char) {
        if !self.runs.iter().any(|r| r.text.contains(delimiter)) {
            return;
        }
        let mut runs = Vec::with_capacity(self.runs.len() + 1);
        let mut done = false;
        for run in self.runs.drain(..) {
            if done {
                runs.push(run);
                continue;
            }
            let bold = RunStyle {
                bold: true,
                ..run.style
            };
            match run.text.find(delimiter) {
                Some(i) => {
                    let (head, tail) = run.text.split_at(i + delimiter.len_utf8());
                    runs.push(Run {
                        text: head.to_string(),
                        style: bold,
                        marked: run.marked,
                    });
                    if !tail.is_empty() {
                        runs.push(Run {
                            text: tail.to_string(),
                            style: run.style,
                            marked: run.marked,
                        });
                    }
                    done = true;
                }
                None => runs.push(Run { style: bold, ..run }),
            }
        }
        self.runs = runs;
    }
}

/// Parse `text` and mark occurrences of `query`.
pub fn parse(text: &str, query: &str) -> Vec<Block> {
    parse_with(text, query, false)
}

/// Like [`parse`], but every line break in the source ends a block.
pub fn parse_lines(text: &str, query: &str) -> Vec<Block> {
    parse_with(text, query, true)
}

fn parse_with(text: &str, query: &str, hard_breaks: bool) -> Vec<Block> {
    let mut builder = Builder::new(query, hard_breaks);
    for token in markup::tokenize(text) {
        match token {
            Token::Text(s) => builder.push_text(s),
            Token::Entity(raw) => match decode_entity(raw) {
                Some(c) => builder.push_char(c, false),
                None => raw.chars().for_each(|c| builder.push_char(c, false)),
            },
            Token::Tag(tag) => {
                if tag.is("a") {
                    builder.settle_space();
                    builder.link = adjust(builder.link, tag.closing);
                } else if tag.is("strong") || tag.is("b") {
                    builder.settle_space();
                    builder.bold = adjust(builder.bold, tag.closing);
                } else if tag.is("li") {
                    builder.flush();
                    if !tag.closing {
                        builder.kind = BlockKind::Bullet;
                    }
                } else if tag.is("ul") || tag.is("ol") || tag.is("p") || tag.is("br") {
                    builder.flush();
                }
            }
        }
    }
    builder.flush();
    builder.blocks
}

fn adjust(depth: usize, closing: bool) -> usize {
    if closing {
        depth.saturating_sub(1)
    } else {
        depth + 1
    }
}

struct Builder<'q> {
    query: &'q str,
    hard_breaks: bool,
    blocks: Vec<Block>,
    kind: BlockKind,
    runs: Vec<Run>,
    bold: usize,
    link: usize,
    pending_space: bool,
    /// Every whitespace character behind `pending_space` lies inside a match.
    pending_marked: bool,
    pending_newlines: usize,
}

impl<'q> Builder<'q> {
    fn new(query: &'q str, hard_breaks: bool) -> Self {
        Self {
            query,
            hard_breaks,
            blocks: Vec::new(),
            kind: BlockKind::Paragraph,
            runs: Vec::new(),
            bold: 0,
            link: 0,
            pending_space: false,
            pending_marked: false,
            pending_newlines: 0,
        }
    }

    fn style(&self) -> RunStyle {
        RunStyle {
            bold: self.bold > 0,
            link: self.link > 0,
        }
    }

    /// Matches are located in the raw text before whitespace is collapsed,
    /// so a query only marks what literally occurs in the source.
    fn push_text(&mut self, s: &str) {
        let matches = find_matches(s, self.query);
        let mut ranges = matches.iter().peekable();
        for (offset, c) in s.char_indices() {
            while ranges.next_if(|r| r.end <= offset).is_some() {}
            let marked = ranges.peek().is_some_and(|r| r.contains(&offset));

            if c.is_whitespace() && c != '\u{a0}' {
                self.pending_marked = if self.pending_space {
                    self.pending_marked && marked
                } else {
                    marked
                };
                self.pending_space = true;
                if c == '\n' {
                    if self.hard_breaks {
                        self.flush();
                        continue;
                    }
                    self.pending_newlines += 1;
                }
            } else {
                self.push_char(c, marked);
            }
        }
    }

    /// Resolve buffered whitespace before the style changes, so a space is
    /// never pulled inside a link or bold run.
    fn settle_space(&mut self) {
        if self.pending_newlines >= 2 {
            self.flush();
        } else if self.pending_space && !self.runs.is_empty() {
            self.append(' ', self.pending_marked);
        }
        self.pending_space = false;
        self.pending_marked = false;
        self.pending_newlines = 0;
    }

    fn push_char(&mut self, c: char, marked: bool) {
        self.settle_space();
        self.append(c, marked);
    }

    fn append(&mut self, c: char, marked: bool) {
        let style = self.style();
        match self.runs.last_mut() {
            Some(run) if run.style == style && run.marked == marked => run.text.push(c),
            _ => self.runs.push(Run {
                text: c.to_string(),
                style,
                marked,
            }),
        }
    }

    fn flush(&mut self) {
        self.pending_space = false;
        self.pending_marked = false;
        self.pending_newlines = 0;

        let kind = std::mem::replace(&mut self.kind, BlockKind::Paragraph);
        let mut runs = std::mem::take(&mut self.runs);
        if let Some(run) = runs.last_mut() {
            let trimmed = run.text.trim_end().len();
            run.text.truncate(trimmed);
        }
        runs.retain(|run| !run.text.is_empty());
        if runs.iter().all(|run| run.text.trim().is_empty()) {
            return;
        }
        self.blocks.push(Block { kind, runs });
    }
}
