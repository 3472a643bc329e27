//! Book directory loading
//!
//! A book directory holds `textbook.toml` (configuration, book info and
//! optional inline chapters) and an optional `chapters/` directory with one
//! TOML file per chapter. Inline chapters come first, followed by chapter
//! files in file-name order, so `01_intro.toml` precedes `02_basics.toml`.

use crate::config::{ConfigError, TextbookConfig, CONFIG_FILE};
use crate::content_model::{Book, Chapter, ValidationError};
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Directory holding one TOML file per chapter
pub const CHAPTERS_DIR: &str = "chapters";

/// A validated book together with the configuration it was loaded from
#[derive(Debug, Clone)]
pub struct LoadedBook {
    /// Book directory; relative asset paths resolve against it
    pub root: PathBuf,
    pub config: TextbookConfig,
    pub book: Book,
}

/// Load and validate a book directory
///
/// # Parameters
/// * `root` - Directory containing textbook.toml
///
/// # Returns
/// * `Ok(LoadedBook)` - The configuration and the validated book
/// * `Err(LoadError)` - Missing or malformed files, or content that fails validation
pub fn load_book(root: &Path) -> Result<LoadedBook, LoadError> {
    let config_path = root.join(CONFIG_FILE);
    let config = TextbookConfig::load(&config_path).map_err(|e| LoadError::Config {
        path: config_path.clone(),
        source: Box::new(e),
    })?;

    let sources = read_chapter_files(&root.join(CHAPTERS_DIR))?;
    let book = assemble(&config, &sources)?;

    log::info!(
        "Loaded '{}' from {}: {} chapters",
        book.info().title,
        root.display(),
        book.len()
    );

    Ok(LoadedBook {
        root: root.to_path_buf(),
        config,
        book,
    })
}

/// Build a book from a configuration and chapter file contents
///
/// # Parameters
/// * `config` - Parsed configuration; its inline chapters come first
/// * `sources` - `(path, content)` pairs in reading order; paths are only used in errors
///
/// # Returns
/// * `Ok(Book)` - The validated book
/// * `Err(LoadError)` - A chapter file is malformed or the book fails validation
pub fn assemble<P: AsRef<Path>, S: AsRef<str>>(
    config: &TextbookConfig,
    sources: &[(P, S)],
) -> Result<Book, LoadError> {
    let mut chapters = config.chapters.clone();

    for (path, content) in sources {
        let chapter: Chapter =
            toml::from_str(content.as_ref()).map_err(|e| LoadError::Chapter {
                path: path.as_ref().to_path_buf(),
                source: e,
            })?;
        log::debug!(
            "Parsed chapter '{}' from {}",
            chapter.id,
            path.as_ref().display()
        );
        chapters.push(chapter);
    }

    Ok(Book::new(config.book.clone(), chapters)?)
}

/// Read every `*.toml` file directly inside `dir`, sorted by file name
///
/// A missing directory yields no files.
fn read_chapter_files(dir: &Path) -> Result<Vec<(PathBuf, String)>, LoadError> {
    if !dir.is_dir() {
        log::debug!("No chapter directory at {}", dir.display());
        return Ok(Vec::new());
    }

    let mut sources = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = entry?;
        let path = entry.path();

        if !entry.file_type().is_file() || path.extension().and_then(|s| s.to_str()) != Some("toml")
        {
            log::debug!("Skipping {}", path.display());
            continue;
        }

        let content = std::fs::read_to_string(path).map_err(|e| LoadError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        sources.push((path.to_path_buf(), content));
    }

    Ok(sources)
}

/// Errors that can occur while loading a book directory
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Config error loading {path}: {source}", path = .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: Box<ConfigError>,
    },

    #[error("IO error reading {path}: {source}", path = .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error parsing chapter {path}: {source}", path = .path.display())]
    Chapter {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Error walking chapter directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Invalid book: {0}")]
    Validation(#[from] ValidationError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const CONFIG: &str = r#"
[book]
title = "Loader Test"
"#;

    fn chapter_toml(id: &str, number: u32) -> String {
        format!(
            r#"
id = "{id}"
number = {number}
title = "Chapter {id}"

[[sections]]
id = "overview"

[[sections.content]]
type = "heading"
level = 2
text = "About {id}"
id = "{id}-about"
"#
        )
    }

    fn write_book(files: &[(&str, String)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), CONFIG).unwrap();
        fs::create_dir(dir.path().join(CHAPTERS_DIR)).unwrap();
        for (name, content) in files {
            fs::write(dir.path().join(CHAPTERS_DIR).join(name), content).unwrap();
        }
        dir
    }

    fn ids(book: &Book) -> Vec<&str> {
        book.chapters().iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_chapter_files_load_in_file_name_order() {
        let dir = write_book(&[
            ("02_second.toml", chapter_toml("second", 2)),
            ("01_first.toml", chapter_toml("first", 1)),
            ("10_tenth.toml", chapter_toml("tenth", 3)),
            ("README.md", "not a chapter".to_string()),
        ]);

        let loaded = load_book(dir.path()).unwrap();
        assert_eq!(ids(&loaded.book), vec!["first", "second", "tenth"]);
        assert_eq!(loaded.book.info().title, "Loader Test");
        assert_eq!(loaded.root, dir.path());
    }

    #[test]
    fn test_inline_chapters_come_first() {
        let dir = write_book(&[("01_files.toml", chapter_toml("files", 2))]);
        let inline = format!(
            "{}\n[[chapters]]\n{}",
            CONFIG,
            chapter_toml("inline", 1)
                .replace("[[sections]]", "[[chapters.sections]]")
                .replace("[[sections.content]]", "[[chapters.sections.content]]")
        );
        fs::write(dir.path().join(CONFIG_FILE), inline).unwrap();

        let loaded = load_book(dir.path()).unwrap();
        assert_eq!(ids(&loaded.book), vec!["inline", "files"]);
    }

    #[test]
    fn test_missing_chapters_directory_with_inline_chapters() {
        let dir = TempDir::new().unwrap();
        let config = format!(
            "{}\n[[chapters]]\n{}",
            CONFIG,
            chapter_toml("only", 1)
                .replace("[[sections]]", "[[chapters.sections]]")
                .replace("[[sections.content]]", "[[chapters.sections.content]]")
        );
        fs::write(dir.path().join(CONFIG_FILE), config).unwrap();

        let loaded = load_book(dir.path()).unwrap();
        assert_eq!(ids(&loaded.book), vec!["only"]);
    }

    #[test]
    fn test_missing_config() {
        let dir = TempDir::new().unwrap();
        let err = load_book(dir.path()).unwrap_err();
        assert!(matches!(err, LoadError::Config { .. }));
    }

    #[test]
    fn test_empty_book_is_rejected() {
        let dir = write_book(&[]);
        let err = load_book(dir.path()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Validation(ValidationError::EmptyBook)
        ));
    }

    #[test]
    fn test_malformed_chapter_names_its_file() {
        let dir = write_book(&[("01_broken.toml", "id = ".to_string())]);
        let err = load_book(dir.path()).unwrap_err();
        match err {
            LoadError::Chapter { path, .. } => assert!(path.ends_with("01_broken.toml")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_duplicate_ids_across_files() {
        let dir = write_book(&[
            ("01_a.toml", chapter_toml("same", 1)),
            ("02_b.toml", chapter_toml("same", 2)),
        ]);
        let err = load_book(dir.path()).unwrap_err();
        let LoadError::Validation(validation) = err else {
            panic!("expected a validation error");
        };
        assert!(validation
            .iter()
            .any(|e| matches!(e, ValidationError::DuplicateChapterId { id } if id == "same")));
    }

    #[test]
    fn test_assemble_from_strings() {
        let config = TextbookConfig::parse(CONFIG).unwrap();
        let sources = [("a.toml", chapter_toml("a", 1)), ("b.toml", chapter_toml("b", 2))];
        let book = assemble(&config, &sources).unwrap();
        assert_eq!(ids(&book), vec!["a", "b"]);
    }
}
