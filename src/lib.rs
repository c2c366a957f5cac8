//! Dovuchcha Support - the Dovuchcha support documentation as a terminal UI
//!
//! This library holds the page content, the literal FAQ search and match
//! highlighting, the terminal interface, and a static HTML export of the
//! same page.

pub mod content;
pub mod export;
pub mod logging;
pub mod markup;
pub mod search;
pub mod ui;
