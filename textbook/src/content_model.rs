//! Content model of a textbook
//!
//! A [`Book`] is an ordered, non-empty sequence of chapters, each made of
//! sections of typed content blocks. It is validated once on construction
//! and is read-only afterwards: the navigator and the renderers only ever
//! see it through shared references.

use itertools::Itertools;
use std::collections::{HashMap, HashSet};

// Submodules
mod blocks;
mod book_info;
mod chapter;
mod validation;

// Re-export public types
pub use blocks::{CalloutKind, ContentBlock, HeadingLevel};
pub use book_info::{BookInfo, Feature};
pub use chapter::{Chapter, Section, TocEntry};
pub use validation::ValidationError;

/// A validated, immutable book
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    info: BookInfo,
    chapters: Vec<Chapter>,
}

impl Book {
    /// Build a book, validating every structural invariant
    ///
    /// # Parameters
    /// * `info` - Book metadata
    /// * `chapters` - Chapters in reading order
    ///
    /// # Returns
    /// * `Ok(Book)` - The chapters are non-empty, ids are unique and well formed, and tables are rectangular
    /// * `Err(ValidationError)` - Every violation found, citing the offending ids
    pub fn new(info: BookInfo, chapters: Vec<Chapter>) -> Result<Self, ValidationError> {
        let book = Self { info, chapters };
        book.validate()?;

        log::debug!(
            "Validated book '{}': {} chapters, {} headings, {} tables",
            book.info.title,
            book.chapters.len(),
            book.heading_count(),
            book.table_count()
        );

        Ok(book)
    }

    /// Book metadata
    pub fn info(&self) -> &BookInfo {
        &self.info
    }

    /// All chapters, in reading order
    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    /// Number of chapters (always at least one)
    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    /// Whether the book has no chapters
    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }

    /// The first chapter of the book
    pub fn first_chapter(&self) -> &Chapter {
        &self.chapters[0]
    }

    /// Chapter at a reading-order position
    pub fn chapter_at(&self, index: usize) -> Option<&Chapter> {
        self.chapters.get(index)
    }

    /// Chapter with the given id
    pub fn chapter(&self, id: &str) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.id == id)
    }

    /// Reading-order position of the chapter with the given id
    pub fn position(&self, id: &str) -> Option<usize> {
        self.chapters.iter().position(|c| c.id == id)
    }

    /// Total number of prose words
    pub fn word_count(&self) -> usize {
        self.chapters.iter().map(Chapter::word_count).sum()
    }

    /// Total number of heading blocks
    pub fn heading_count(&self) -> usize {
        self.count_blocks(|b| matches!(b, ContentBlock::Heading { .. }))
    }

    /// Total number of table blocks
    pub fn table_count(&self) -> usize {
        self.count_blocks(|b| matches!(b, ContentBlock::Table { .. }))
    }

    /// Total number of content blocks
    pub fn block_count(&self) -> usize {
        self.count_blocks(|_| true)
    }

    fn count_blocks(&self, predicate: impl Fn(&ContentBlock) -> bool) -> usize {
        self.chapters
            .iter()
            .flat_map(Chapter::blocks)
            .filter(|b| predicate(b))
            .count()
    }

    /// Validate all invariants, collecting every violation
    fn validate(&self) -> Result<(), ValidationError> {
        if self.chapters.is_empty() {
            return Err(ValidationError::EmptyBook);
        }

        self.log_soft_issues();

        let errors: Vec<ValidationError> = self
            .validate_ids()
            .into_iter()
            .chain(self.validate_non_empty_chapters())
            .chain(self.validate_unique_chapter_ids())
            .chain(self.validate_unique_section_ids())
            .chain(self.validate_unique_heading_ids())
            .chain(self.validate_section_heading_collisions())
            .chain(self.validate_table_shapes())
            .collect();

        match ValidationError::from_errors(errors) {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    /// Check that every chapter, section and heading id is a usable slug
    fn validate_ids(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        for chapter in &self.chapters {
            check_id("chapter", &chapter.id, &mut errors);
            for section in &chapter.sections {
                check_id("section", &section.id, &mut errors);
            }
            for entry in chapter.toc() {
                check_id("heading", entry.id, &mut errors);
            }
        }

        errors
    }

    fn validate_non_empty_chapters(&self) -> Vec<ValidationError> {
        self.chapters
            .iter()
            .filter(|c| c.sections.is_empty())
            .map(|c| ValidationError::EmptyChapter {
                chapter: c.id.clone(),
            })
            .collect()
    }

    fn validate_unique_chapter_ids(&self) -> Vec<ValidationError> {
        self.chapters
            .iter()
            .map(|c| c.id.as_str())
            .duplicates()
            .map(|id| ValidationError::DuplicateChapterId { id: id.to_string() })
            .collect()
    }

    fn validate_unique_section_ids(&self) -> Vec<ValidationError> {
        self.chapters
            .iter()
            .flat_map(|chapter| {
                chapter
                    .sections
                    .iter()
                    .map(|s| s.id.as_str())
                    .duplicates()
                    .map(|id| ValidationError::DuplicateSectionId {
                        chapter: chapter.id.clone(),
                        id: id.to_string(),
                    })
            })
            .collect()
    }

    /// Heading anchors must be unique across the whole book
    fn validate_unique_heading_ids(&self) -> Vec<ValidationError> {
        let mut first_seen: HashMap<&str, &str> = HashMap::new();
        let mut errors = Vec::new();

        for chapter in &self.chapters {
            for entry in chapter.toc() {
                match first_seen.get(entry.id) {
                    Some(first) => errors.push(ValidationError::DuplicateHeadingId {
                        id: entry.id.to_string(),
                        first: first.to_string(),
                        second: chapter.id.clone(),
                    }),
                    None => {
                        first_seen.insert(entry.id, &chapter.id);
                    }
                }
            }
        }

        errors
    }

    /// Sections and headings of one chapter are anchors on the same page
    fn validate_section_heading_collisions(&self) -> Vec<ValidationError> {
        self.chapters
            .iter()
            .flat_map(|chapter| {
                let section_ids: HashSet<&str> =
                    chapter.sections.iter().map(|s| s.id.as_str()).collect();
                chapter
                    .toc()
                    .into_iter()
                    .filter(move |entry| section_ids.contains(entry.id))
                    .map(|entry| ValidationError::SectionHeadingCollision {
                        chapter: chapter.id.clone(),
                        id: entry.id.to_string(),
                    })
            })
            .collect()
    }

    fn validate_table_shapes(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        for chapter in &self.chapters {
            for section in &chapter.sections {
                for block in &section.content {
                    let ContentBlock::Table { headers, rows } = block else {
                        continue;
                    };
                    for (row, cells) in rows.iter().enumerate() {
                        if cells.len() != headers.len() {
                            errors.push(ValidationError::TableRowLength {
                                chapter: chapter.id.clone(),
                                section: section.id.clone(),
                                row,
                                expected: headers.len(),
                                found: cells.len(),
                            });
                        }
                    }
                }
            }
        }

        errors
    }

    /// Log content that is legal but probably unintended
    fn log_soft_issues(&self) {
        for (index, chapter) in self.chapters.iter().enumerate() {
            if chapter.number as usize != index + 1 {
                log::debug!(
                    "Chapter '{}' is labelled {} but is at position {}",
                    chapter.id,
                    chapter.number,
                    index + 1
                );
            }

            for block in chapter.blocks() {
                if let ContentBlock::List { items, .. } = block {
                    if items.is_empty() {
                        log::warn!("Chapter '{}' contains an empty list", chapter.id);
                    }
                }
            }
        }
    }
}

fn check_id(kind: &'static str, id: &str, errors: &mut Vec<ValidationError>) {
    if !validation::is_valid_id(id) {
        errors.push(ValidationError::InvalidId {
            kind,
            id: id.to_string(),
        });
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// A one-section chapter with a single h2 heading anchored at `<id>-title`
    pub fn chapter(id: &str, number: u32) -> Chapter {
        Chapter {
            id: id.to_string(),
            number,
            title: format!("Chapter {}", id),
            subtitle: None,
            read_time: None,
            sections: vec![Section {
                id: "overview".to_string(),
                content: vec![
                    ContentBlock::Heading {
                        level: HeadingLevel::H2,
                        text: format!("About {}", id),
                        id: format!("{}-title", id),
                    },
                    ContentBlock::Paragraph {
                        text: format!("Text of {}.", id),
                    },
                ],
            }],
        }
    }

    pub fn info() -> BookInfo {
        BookInfo {
            title: "Test Book".to_string(),
            ..BookInfo::default()
        }
    }

    /// A valid book whose chapters have the given ids
    pub fn book(ids: &[&str]) -> Book {
        let chapters = ids
            .iter()
            .enumerate()
            .map(|(i, id)| chapter(id, i as u32 + 1))
            .collect();
        Book::new(info(), chapters).unwrap()
    }
}
