//! Book-level metadata shown on the cover, header and sidebar

use serde::{Deserialize, Serialize};

/// Metadata describing the whole book
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookInfo {
    /// Book title
    pub title: String,

    /// Subtitle shown on the cover
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    /// Edition badge (e.g. "First Edition")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edition: Option<String>,

    /// One-line theme of the book
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    /// Authors, in display order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,

    /// Cover blurb
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Copyright line shown in the sidebar footer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,

    /// Highlights shown as a grid on the cover
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<Feature>,
}

/// A cover highlight
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub label: String,
    pub description: String,
}
