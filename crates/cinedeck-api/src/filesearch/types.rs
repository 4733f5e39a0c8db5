//! File-search response types.

use serde::Deserialize;

/// A single file returned by the search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileSearchItem {
    /// Link to the file (absolute URL or endpoint-relative path).
    pub link: String,
    /// File name as listed by the index.
    #[serde(default)]
    pub name: Option<String>,
    /// Human-readable size (e.g. "2.4 GB").
    #[serde(default)]
    pub size: Option<String>,
    /// MIME type reported by the index.
    #[serde(default, rename = "mimeType")]
    pub mime_type: Option<String>,
}

impl FileSearchItem {
    /// Creates an item with only a link, as used by filters and tests.
    #[must_use]
    pub fn from_link(link: impl Into<String>) -> Self {
        Self {
            link: link.into(),
            name: None,
            size: None,
            mime_type: None,
        }
    }
}
