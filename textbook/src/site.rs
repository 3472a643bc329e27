//! Static site output
//!
//! Writes rendered pages to disk. The HTML site is produced by driving a
//! [`Navigator`] through the book the way a reader would: the cover first,
//! then "Start Reading" and "Next" until the last chapter.

use crate::content_model::Book;
use crate::markdown_renderer::MarkdownRenderer;
use crate::navigator::{Direction, Navigator};
use crate::render::Renderer;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the cover page
pub const INDEX_FILE: &str = "index.html";

/// File name of the single-file Markdown output
pub const MARKDOWN_FILE: &str = "book.md";

/// Write the cover and one page per chapter
///
/// # Parameters
/// * `book` - The validated book
/// * `renderer` - Page renderer
/// * `out_dir` - Output directory; created if missing
///
/// # Returns
/// * `Ok(Vec<PathBuf>)` - Paths of the written pages, cover first
/// * `Err(SiteError)` - A directory or page could not be written
pub fn write_html<R: Renderer>(
    book: &Book,
    renderer: &R,
    out_dir: &Path,
) -> Result<Vec<PathBuf>, SiteError> {
    let chapters_dir = out_dir.join("chapters");
    create_dir(&chapters_dir)?;

    let mut navigator = Navigator::new(book);
    let mut written = Vec::with_capacity(book.len() + 1);

    let index_path = out_dir.join(INDEX_FILE);
    write_page(&index_path, &renderer.render_chapter(book, &navigator.state()))?;
    written.push(index_path);

    navigator.start_reading();
    loop {
        let page_path = chapters_dir.join(format!("{}.html", navigator.current_chapter_id()));
        write_page(&page_path, &renderer.render_chapter(book, &navigator.state()))?;
        written.push(page_path);

        if !navigator.has_next() {
            break;
        }
        navigator.navigate(Direction::Next);
    }

    log::info!(
        "Wrote {} pages to {}",
        written.len(),
        out_dir.display()
    );
    Ok(written)
}

/// Write the whole book as a single Markdown file
///
/// # Returns
/// * `Ok(PathBuf)` - Path of the written file
/// * `Err(SiteError)` - The directory or file could not be written
pub fn write_markdown(
    book: &Book,
    renderer: &MarkdownRenderer,
    out_dir: &Path,
) -> Result<PathBuf, SiteError> {
    create_dir(out_dir)?;

    let path = out_dir.join(MARKDOWN_FILE);
    write_page(&path, &renderer.render_book(book))?;

    log::info!("Wrote {}", path.display());
    Ok(path)
}

fn create_dir(dir: &Path) -> Result<(), SiteError> {
    fs::create_dir_all(dir).map_err(|e| SiteError::Io {
        path: dir.to_path_buf(),
        source: e,
    })
}

fn write_page(path: &Path, content: &str) -> Result<(), SiteError> {
    log::debug!("Writing {}", path.display());
    fs::write(path, content).map_err(|e| SiteError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Errors that can occur while writing output
#[derive(Error, Debug)]
pub enum SiteError {
    #[error("IO error writing {path}: {source}", path = .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
