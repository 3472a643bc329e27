//! Validation error types

use itertools::Itertools;
use thiserror::Error;

/// Violations of the book's structural invariants
///
/// Raised once, when a [`Book`](super::Book) is constructed. A book that
/// fails validation is never handed to the navigator or a renderer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The book has no chapters to navigate
    #[error("Book must contain at least one chapter")]
    EmptyBook,

    /// A chapter has no sections
    #[error("Chapter '{chapter}' must contain at least one section")]
    EmptyChapter { chapter: String },

    /// Two chapters share an id
    #[error("Duplicate chapter id '{id}'")]
    DuplicateChapterId { id: String },

    /// Two sections of one chapter share an id
    #[error("Duplicate section id '{id}' in chapter '{chapter}'")]
    DuplicateSectionId { chapter: String, id: String },

    /// Two headings anywhere in the book share an anchor id
    #[error("Duplicate heading id '{id}' (first in chapter '{first}', again in chapter '{second}')")]
    DuplicateHeadingId {
        id: String,
        first: String,
        second: String,
    },

    /// A section and a heading of one chapter share an id
    #[error("Section id '{id}' in chapter '{chapter}' is also used as a heading id")]
    SectionHeadingCollision { chapter: String, id: String },

    /// A table row does not have one cell per header
    #[error(
        "Table in section '{section}' of chapter '{chapter}': row {row} has {found} cells, expected {expected}"
    )]
    TableRowLength {
        chapter: String,
        section: String,
        /// Zero-based row index
        row: usize,
        expected: usize,
        found: usize,
    },

    /// An id cannot be used as an anchor or file name
    #[error(
        "Invalid {kind} id '{id}': ids must start with a letter or digit and contain only letters, digits, '-' or '_'"
    )]
    InvalidId { kind: &'static str, id: String },

    /// Multiple validation errors
    #[error("Multiple validation errors:\n{}", list_errors(.0))]
    Multiple(Vec<ValidationError>),
}

impl ValidationError {
    /// Collapse a list of errors into a single error
    ///
    /// Returns `None` when the list is empty.
    pub fn from_errors(mut errors: Vec<ValidationError>) -> Option<Self> {
        match errors.len() {
            0 => None,
            1 => errors.pop(),
            _ => Some(ValidationError::Multiple(errors)),
        }
    }

    /// Iterate over the individual errors, flattening `Multiple`
    pub fn iter(&self) -> Box<dyn Iterator<Item = &ValidationError> + '_> {
        match self {
            ValidationError::Multiple(errors) => Box::new(errors.iter().flat_map(|e| e.iter())),
            single => Box::new(std::iter::once(single)),
        }
    }
}

fn list_errors(errors: &[ValidationError]) -> String {
    errors.iter().map(|e| format!("  - {}", e)).join("\n")
}

/// Check that an id is usable as a URL fragment and a file name
pub(crate) fn is_valid_id(id: &str) -> bool {
    let mut chars = id.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphanumeric() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_ids() {
        assert!(is_valid_id("module-2"));
        assert!(is_valid_id("weeks_3_5"));
        assert!(is_valid_id("1-introduction"));
    }

    #[test]
    fn test_invalid_ids() {
        assert!(!is_valid_id(""));
        assert!(!is_valid_id("-leading-dash"));
        assert!(!is_valid_id("has space"));
        assert!(!is_valid_id("../escape"));
        assert!(!is_valid_id("anchor#frag"));
    }

    #[test]
    fn test_from_errors() {
        assert_eq!(ValidationError::from_errors(Vec::new()), None);
        assert_eq!(
            ValidationError::from_errors(vec![ValidationError::EmptyBook]),
            Some(ValidationError::EmptyBook)
        );

        let multiple = ValidationError::from_errors(vec![
            ValidationError::DuplicateChapterId { id: "a".to_string() },
            ValidationError::DuplicateChapterId { id: "b".to_string() },
        ])
        .unwrap();
        assert_eq!(multiple.iter().count(), 2);
        assert!(multiple.to_string().contains("  - Duplicate chapter id 'b'"));
    }
}
