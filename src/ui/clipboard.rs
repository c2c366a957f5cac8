//! # Clipboard Access
//!
//! Write-only clipboard used by the code block "copy" action.
//!
//! [`SystemClipboard`] talks to the native clipboard through `arboard`
//! (X11/Wayland on Linux, native APIs on macOS and Windows). When no native
//! clipboard is reachable, for example over SSH, it falls back to an OSC 52
//! escape sequence so the hosting terminal can set its own clipboard.
//!
//! Writes run on tokio's blocking pool via [`spawn_copy`]; the result comes
//! back to the UI loop as a [`CopyOutcome`] on a channel. An OSC 52 sequence
//! travels back inside the outcome and is written by the UI loop between
//! draws, so it never lands in the middle of a frame.

use anyhow::{anyhow, Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::io::Write;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc::UnboundedSender;

/// How copied text reached the clipboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Owned by the native clipboard.
    Native,
    /// An escape sequence the terminal must still receive.
    Terminal(String),
}

/// Something that can receive plain text.
pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str) -> Result<Delivery>;
}

/// The platform clipboard, with an OSC 52 fallback.
///
/// On X11 the copied text lives only as long as its owner, so the
/// `arboard` handle is kept for the lifetime of this value.
#[derive(Default)]
pub struct SystemClipboard {
    native: Mutex<Option<arboard::Clipboard>>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<Delivery> {
        let mut native = self
            .native
            .lock()
            .map_err(|_| anyhow!("clipboard lock poisoned"))?;

        let mut clipboard = match native.take() {
            Some(clipboard) => clipboard,
            None => match arboard::Clipboard::new() {
                Ok(clipboard) => clipboard,
                Err(e) => {
                    tracing::debug!("Native clipboard unavailable ({e}), using OSC 52");
                    return Ok(Delivery::Terminal(osc52_sequence(text)));
                }
            },
        };

        match clipboard.set_text(text) {
            Ok(()) => {
                *native = Some(clipboard);
                Ok(Delivery::Native)
            }
            Err(e) => {
                tracing::debug!("Native clipboard write failed ({e}), using OSC 52");
                Ok(Delivery::Terminal(osc52_sequence(text)))
            }
        }
    }
}

/// The OSC 52 "set clipboard" sequence for `text`.
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

/// Send a terminal escape sequence.
pub fn write_sequence<W: Write + ?Sized>(out: &mut W, sequence: &str) -> Result<()> {
    out.write_all(sequence.as_bytes())
        .context("Failed to write OSC 52 sequence")?;
    out.flush().context("Failed to flush OSC 52 sequence")?;
    Ok(())
}

/// A request to copy the text of one code block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyRequest {
    pub block: usize,
    pub text: String,
}

/// Completion of a [`CopyRequest`].
#[derive(Debug)]
pub struct CopyOutcome {
    pub block: usize,
    pub result: Result<Delivery>,
}

/// Perform `request` on the blocking pool and report back on `outcomes`.
pub fn spawn_copy(
    clipboard: Arc<dyn Clipboard>,
    request: CopyRequest,
    outcomes: UnboundedSender<CopyOutcome>,
) {
    tokio::task::spawn_blocking(move || {
        let result = clipboard.write_text(&request.text);
        // The receiver is gone only while the app is shutting down.
        let _ = outcomes.send(CopyOutcome {
            block: request.block,
            result,
        });
    });
}
