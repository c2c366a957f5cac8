//! # UI Module
//!
//! The terminal interface of the support viewer.
//!
//! ## Components
//!
//! - [`App`] - Viewer state: search, navigation, FAQ toggles, copy feedback
//! - [`mod@render`] - Drawing the frame
//! - [`document`] - Laying out the support page as styled lines
//!
//! ## Layout
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │ Header (title, current section)                 │
//! ├──────────────┬──────────────────────────────────┤
//! │ Search box   │                                  │
//! │              │   Document                       │
//! │ 1 General    │   (General, Registration, FAQ,   │
//! │ 2 Register.. │    Guides, API Reference)        │
//! │ 3 FAQ        │                                  │
//! │ 4 Guides     │                                  │
//! │ 5 API        │                                  │
//! ├──────────────┴──────────────────────────────────┤
//! │ Footer (key hints, status)                      │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! Below the configured width the sidebar is hidden and opens as a drawer
//! over the document with `m`.

pub mod app;
pub mod clipboard;
pub mod code_block;
pub mod config;
pub mod document;
pub mod faq;
pub mod navigator;
pub mod render;
pub mod rich_text;
pub mod syntax;
pub mod theme;
pub mod timer;

pub use app::App;
pub use render::render;
