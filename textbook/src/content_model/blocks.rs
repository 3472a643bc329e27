//! Block-level content elements
//!
//! A section's content is an ordered sequence of these blocks. The set is
//! closed, so every renderer matches on it exhaustively.

use serde::{Deserialize, Serialize};

/// Level of a heading inside a chapter
///
/// The chapter title itself is the page's h1, so content headings are
/// limited to h2 and h3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum HeadingLevel {
    H2,
    H3,
}

impl HeadingLevel {
    /// Numeric level (2 or 3)
    pub fn as_u8(self) -> u8 {
        match self {
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }
}

impl TryFrom<u8> for HeadingLevel {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            2 => Ok(HeadingLevel::H2),
            3 => Ok(HeadingLevel::H3),
            other => Err(format!("heading level must be 2 or 3, found {}", other)),
        }
    }
}

impl From<HeadingLevel> for u8 {
    fn from(level: HeadingLevel) -> Self {
        level.as_u8()
    }
}

/// Kind of a callout aside
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalloutKind {
    #[default]
    Info,
    Warning,
    Tip,
    Danger,
    Note,
}

impl CalloutKind {
    /// Title shown when the callout has none of its own
    pub fn default_title(self) -> &'static str {
        match self {
            CalloutKind::Info => "Info",
            CalloutKind::Warning => "Warning",
            CalloutKind::Tip => "Tip",
            CalloutKind::Danger => "Danger",
            CalloutKind::Note => "Note",
        }
    }

    /// Lowercase name, as written in content files
    pub fn as_str(self) -> &'static str {
        match self {
            CalloutKind::Info => "info",
            CalloutKind::Warning => "warning",
            CalloutKind::Tip => "tip",
            CalloutKind::Danger => "danger",
            CalloutKind::Note => "note",
        }
    }
}

/// A single unit of chapter content
///
/// Authored in TOML as a table with a `type` discriminant:
///
/// ```toml
/// [[chapters.sections.content]]
/// type = "callout"
/// kind = "tip"
/// text = "Digital twins allow for safe experimentation."
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    /// A sub-heading, addressable by its anchor id
    Heading {
        level: HeadingLevel,
        text: String,
        /// Anchor id, unique across the whole book
        id: String,
    },

    /// A paragraph of plain text
    Paragraph { text: String },

    /// An ordered or bulleted list of plain-text items
    List {
        #[serde(default)]
        ordered: bool,
        items: Vec<String>,
    },

    /// A code listing
    Code {
        code: String,
        language: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
    },

    /// A highlighted aside
    Callout {
        #[serde(default)]
        kind: CalloutKind,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        text: String,
    },

    /// A table; every row has exactly `headers.len()` cells
    Table {
        headers: Vec<String>,
        #[serde(default)]
        rows: Vec<Vec<String>>,
    },

    /// An image with alternative text and optional caption
    Image {
        src: String,
        alt: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
    },
}

impl ContentBlock {
    /// Discriminant name, as written in content files
    pub fn kind(&self) -> &'static str {
        match self {
            ContentBlock::Heading { .. } => "heading",
            ContentBlock::Paragraph { .. } => "paragraph",
            ContentBlock::List { .. } => "list",
            ContentBlock::Code { .. } => "code",
            ContentBlock::Callout { .. } => "callout",
            ContentBlock::Table { .. } => "table",
            ContentBlock::Image { .. } => "image",
        }
    }

    /// Number of prose words in this block
    ///
    /// Code listings are not prose and count as zero.
    pub fn word_count(&self) -> usize {
        fn words(text: &str) -> usize {
            text.split_whitespace().count()
        }

        match self {
            ContentBlock::Heading { text, .. } | ContentBlock::Paragraph { text } => words(text),
            ContentBlock::List { items, .. } => items.iter().map(|i| words(i)).sum(),
            ContentBlock::Code { .. } => 0,
            ContentBlock::Callout { title, text, .. } => {
                title.as_deref().map_or(0, words) + words(text)
            }
            ContentBlock::Table { headers, rows } => {
                let header_count: usize = headers.iter().map(|h| words(h)).sum();
                let row_count: usize = rows.iter().flatten().map(|c| words(c)).sum();
                header_count + row_count
            }
            ContentBlock::Image { caption, .. } => caption.as_deref().map_or(0, words),
        }
    }
}
