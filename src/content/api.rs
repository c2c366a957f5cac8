//! # ArtLab API Response Shape
//!
//! Typed form of the JSON payload documented in the API Reference section.
//! Nothing here calls the API; the types exist so that the example response
//! shown to readers is generated from real values and always matches the
//! documented shape.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Endpoint shown in the example request.
pub const ITEMS_ENDPOINT: &str = "https://artlab.dovuchcha.uz/api/items";

/// A single artwork in an items listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArtItem {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub url: String,
    pub tags: Vec<String>,
}

impl ArtItem {
    fn new(id: &str, title: &str, artist: &str, tags: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            artist: artist.to_string(),
            url: format!("https://artlab.dovuchcha.uz/items/{id}"),
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
        }
    }
}

/// Body returned by `GET /api/items`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemsResponse {
    pub items: Vec<ArtItem>,
    pub count: usize,
}

impl ItemsResponse {
    pub fn new(items: Vec<ArtItem>) -> Self {
        let count = items.len();
        Self { items, count }
    }
}

/// The two-item listing used as the documented example.
pub fn sample_response() -> ItemsResponse {
    ItemsResponse::new(vec![
        ArtItem::new(
            "item_12345",
            "Sunset in Green",
            "A. Novas",
            &["sunset", "nature", "green"],
        ),
        ArtItem::new("item_67890", "Abstract Blue", "Z. Uvarov", &["abstract", "blue"]),
    ])
}

/// Pretty-printed JSON for [`sample_response`], as displayed in the code block.
pub fn sample_response_json() -> Result<String> {
    serde_json::to_string_pretty(&sample_response())
        .context("Failed to serialize example API response")
}

/// JavaScript snippet showing how to call the items endpoint.
pub fn sample_request_js() -> String {
    format!(
        r#"// Using fetch to get ArtLab items
fetch('{ITEMS_ENDPOINT}', {{
  headers: {{
    'Authorization': 'Bearer YOUR_ACCESS_TOKEN'
  }}
}})
.then(response => response.json())
.then(data => {{
  console.log('ArtLab Items:', data);
}})
.catch(error => console.error('Error fetching ArtLab items:', error));"#
    )
}
