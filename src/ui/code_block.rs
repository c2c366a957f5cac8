//! # Code Block Widget
//!
//! A read-only code sample with a one-shot copy action.
//!
//! ## States
//!
//! ```text
//! Idle --(copy succeeded)--> Copied --(2s elapsed)--> Idle
//!                              |  ^
//!                              +--+ copy again: timer restarts
//! ```
//!
//! A failed clipboard write leaves the block Idle.

use crate::content::{CodeSample, Language};
use crate::ui::clipboard::CopyRequest;
use crate::ui::syntax::{CodeLine, Highlighter};
use crate::ui::timer::ResetTimer;
use anyhow::Result;
use std::time::{Duration, Instant};

/// How long "Copied!" stays visible after a successful copy.
pub const COPY_FEEDBACK: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyState {
    Idle,
    Copied,
}

#[derive(Debug, Clone)]
pub struct CodeBlock {
    pub caption: String,
    pub language: Language,
    source: String,
    lines: Vec<CodeLine>,
    state: CopyState,
    reset: ResetTimer,
}

impl CodeBlock {
    /// Build a block from a sample. The source is trimmed and coloured once.
    pub fn new(sample: &CodeSample) -> Result<Self> {
        let source = sample.source.trim().to_string();
        let lines = Highlighter::new(sample.language)?.highlight(&source);
        Ok(Self {
            caption: sample.caption.clone(),
            language: sample.language,
            source,
            lines,
            state: CopyState::Idle,
            reset: ResetTimer::new(COPY_FEEDBACK),
        })
    }

    /// Exactly what the copy action puts on the clipboard.
    pub fn copy_text(&self) -> &str {
        &self.source
    }

    pub fn lines(&self) -> &[CodeLine] {
        &self.lines
    }

    pub fn copy_request(&self, block: usize) -> CopyRequest {
        CopyRequest {
            block,
            text: self.source.clone(),
        }
    }

    pub fn state(&self) -> CopyState {
        self.state
    }

    pub fn is_copied(&self) -> bool {
        self.state == CopyState::Copied
    }

    /// Enter (or stay in) the copied state and restart the feedback timer.
    pub fn copy_succeeded(&mut self, now: Instant) {
        self.state = CopyState::Copied;
        self.reset.arm(now);
    }

    /// Revert to idle once the feedback timer has elapsed. Returns whether the
    /// state changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.reset.poll(now) {
            self.state = CopyState::Idle;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::timer::{Clock, ManualClock};

    fn block() -> CodeBlock {
        CodeBlock::new(&CodeSample {
            caption: "Example Response".to_string(),
            language: Language::Json,
            source: "\n\n  {\n  \"count\": 2\n}\n  \n".to_string(),
        })
        .expect("block")
    }

    #[test]
    fn test_copy_text_is_trimmed() {
        let block = block();
        assert_eq!(block.copy_text(), "{\n  \"count\": 2\n}");
        assert_eq!(block.lines().len(), 3);
        assert_eq!(block.copy_request(4).block, 4);
    }

    #[test]
    fn test_feedback_reverts_after_timeout() {
        let clock = ManualClock::new();
        let mut block = block();
        assert_eq!(block.state(), CopyState::Idle);

        block.copy_succeeded(clock.now());
        assert!(block.is_copied());

        clock.advance(Duration::from_millis(1900));
        assert!(!block.tick(clock.now()));
        assert!(block.is_copied());

        clock.advance(Duration::from_millis(100));
        assert!(block.tick(clock.now()));
        assert!(!block.is_copied());
    }

    #[test]
    fn test_recopy_restarts_timer() {
        let clock = ManualClock::new();
        let mut block = block();

        block.copy_succeeded(clock.now());
        clock.advance(Duration::from_millis(1500));
        block.copy_succeeded(clock.now());

        clock.advance(Duration::from_millis(1000));
        block.tick(clock.now());
        assert!(block.is_copied(), "stale reset must not fire");

        clock.advance(Duration::from_millis(1000));
        block.tick(clock.now());
        assert!(!block.is_copied());
    }
}
