//! Chapters and sections

use super::blocks::{ContentBlock, HeadingLevel};
use serde::{Deserialize, Serialize};

/// One chapter of the book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    /// Stable slug, unique across the book; also the chapter's page name
    pub id: String,

    /// 1-based label shown to the reader
    pub number: u32,

    /// Chapter title
    pub title: String,

    /// Optional subtitle shown under the title and in the sidebar
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    /// Authored reading-time label (e.g. "15 min read")
    ///
    /// When absent, renderers show an estimate from the word count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_time: Option<String>,

    /// Sections in reading order
    pub sections: Vec<Section>,
}

/// A section of a chapter, addressable by anchor id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Anchor id, unique within the chapter
    pub id: String,

    /// Content blocks in reading order
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

/// An entry of a chapter's "On this page" list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TocEntry<'a> {
    pub id: &'a str,
    pub text: &'a str,
    pub level: HeadingLevel,
}

impl Chapter {
    /// All content blocks of the chapter, in reading order
    pub fn blocks(&self) -> impl Iterator<Item = &ContentBlock> {
        self.sections.iter().flat_map(|s| s.content.iter())
    }

    /// Headings of the chapter, in reading order
    pub fn toc(&self) -> Vec<TocEntry<'_>> {
        self.blocks()
            .filter_map(|block| match block {
                ContentBlock::Heading { level, text, id } => Some(TocEntry {
                    id,
                    text,
                    level: *level,
                }),
                _ => None,
            })
            .collect()
    }

    /// Number of prose words in the chapter
    pub fn word_count(&self) -> usize {
        self.blocks().map(ContentBlock::word_count).sum()
    }

    /// Reading-time label: the authored one, or an estimate
    ///
    /// The estimate rounds up and is never below one minute.
    pub fn read_time(&self, words_per_minute: u32) -> String {
        if let Some(ref read_time) = self.read_time {
            return read_time.clone();
        }
        let wpm = words_per_minute.max(1) as usize;
        let minutes = self.word_count().div_ceil(wpm).max(1);
        format!("{} min read", minutes)
    }
}
