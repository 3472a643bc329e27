//! Markdown renderer
//!
//! Renders pages and whole books as Markdown. The same output is used by
//! the `markdown` build format and by the terminal reader, so a page keeps
//! the navigation context as plain text: the chapter list when the sidebar
//! is open, and a previous/next footer.

use crate::content_model::{Book, CalloutKind, Chapter, ContentBlock, HeadingLevel};
use crate::navigator::{NavState, Screen};
use crate::render::Renderer;
use itertools::Itertools;

/// Renders pages as Markdown
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    words_per_minute: u32,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new(200)
    }
}

impl MarkdownRenderer {
    /// Create a renderer that estimates read times at `words_per_minute`
    pub fn new(words_per_minute: u32) -> Self {
        Self { words_per_minute }
    }

    /// Render the whole book as one document: cover, then every chapter
    pub fn render_book(&self, book: &Book) -> String {
        let mut output = String::new();
        write_cover(&mut output, book);
        write_contents(&mut output, book);

        for chapter in book.chapters() {
            output.push_str("---\n\n");
            self.write_chapter(&mut output, chapter);
        }

        output
    }

    /// Write a chapter title block and its sections
    fn write_chapter(&self, output: &mut String, chapter: &Chapter) {
        output.push_str(&format!(
            "# Chapter {}: {}\n\n",
            chapter.number, chapter.title
        ));
        if let Some(ref subtitle) = chapter.subtitle {
            output.push_str(&format!("*{}*\n\n", subtitle));
        }
        output.push_str(&format!(
            "_{}_\n\n",
            chapter.read_time(self.words_per_minute)
        ));

        for block in chapter.blocks() {
            write_block(output, block);
        }
    }
}

impl Renderer for MarkdownRenderer {
    fn render_block(&self, block: &ContentBlock) -> String {
        let mut output = String::new();
        write_block(&mut output, block);
        output
    }

    fn render_chapter(&self, book: &Book, state: &NavState) -> String {
        let mut output = String::new();

        let index = match state.screen {
            Screen::Cover => {
                write_cover(&mut output, book);
                output.push_str(&format!(
                    "Start reading: {}\n",
                    book.first_chapter().title
                ));
                return output;
            }
            Screen::Chapter(index) => index,
        };

        let chapter = book.chapter_at(index).unwrap_or_else(|| {
            log::warn!(
                "Chapter position {} is out of range, showing the first chapter",
                index
            );
            book.first_chapter()
        });

        if state.sidebar_open {
            write_sidebar(&mut output, book, &chapter.id);
        }

        self.write_chapter(&mut output, chapter);
        write_chapter_nav(&mut output, book, state);

        output
    }
}

/// Write the title, badges and blurb of the book
fn write_cover(output: &mut String, book: &Book) {
    let info = book.info();

    output.push_str(&format!("# {}\n\n", info.title));

    if let Some(ref subtitle) = info.subtitle {
        output.push_str(&format!("**{}**\n\n", subtitle));
    }
    if let Some(ref edition) = info.edition {
        output.push_str(&format!("_{}_\n\n", edition));
    }
    if let Some(ref theme) = info.theme {
        output.push_str(&format!("{}\n\n", theme));
    }
    if !info.authors.is_empty() {
        output.push_str(&format!("By {}\n\n", info.authors.join(", ")));
    }
    if let Some(ref description) = info.description {
        output.push_str(&format!("{}\n\n", description));
    }
    for feature in &info.features {
        output.push_str(&format!("- **{}**: {}\n", feature.label, feature.description));
    }
    if !info.features.is_empty() {
        output.push('\n');
    }
}

/// Write a numbered list of all chapters
fn write_contents(output: &mut String, book: &Book) {
    output.push_str("## Contents\n\n");
    for chapter in book.chapters() {
        output.push_str(&format!("{}. {}", chapter.number, chapter.title));
        if let Some(ref subtitle) = chapter.subtitle {
            output.push_str(&format!(" - {}", subtitle));
        }
        output.push('\n');
    }
    output.push('\n');
}

/// Write the chapter list with a marker on the current chapter
fn write_sidebar(output: &mut String, book: &Book, current_id: &str) {
    output.push_str("## Table of Contents\n\n");
    for chapter in book.chapters() {
        let marker = if chapter.id == current_id { ">" } else { " " };
        output.push_str(&format!(
            "{} {:>2}. {} ({})\n",
            marker, chapter.number, chapter.title, chapter.id
        ));
    }
    if let Some(ref copyright) = book.info().copyright {
        output.push_str(&format!("\n{}\n", copyright));
    }
    output.push_str("\n---\n\n");
}

/// Write the previous/next footer; missing neighbours are left out
fn write_chapter_nav(output: &mut String, book: &Book, state: &NavState) {
    let index = state.chapter_index();
    let mut links = Vec::new();

    if state.has_prev() {
        if let Some(prev) = book.chapter_at(index - 1) {
            links.push(format!("← Previous: {}", prev.title));
        }
    }
    if state.has_next(book.len()) {
        if let Some(next) = book.chapter_at(index + 1) {
            links.push(format!("Next: {} →", next.title));
        }
    }

    if !links.is_empty() {
        output.push_str("---\n\n");
        output.push_str(&links.join(" | "));
        output.push('\n');
    }
}

/// Write a single block to the output
fn write_block(output: &mut String, block: &ContentBlock) {
    match block {
        ContentBlock::Heading { level, text, id } => {
            let prefix = match level {
                HeadingLevel::H2 => "##",
                HeadingLevel::H3 => "###",
            };
            // Keeps the same fragment as the HTML page
            output.push_str(&format!("<a id=\"{}\"></a>\n\n", id));
            output.push_str(&format!("{} {}\n\n", prefix, text));
        }

        ContentBlock::Paragraph { text } => {
            output.push_str(&format!("{}\n\n", escape_text(text)));
        }

        ContentBlock::List { ordered, items } => {
            for (i, item) in items.iter().enumerate() {
                let item = escape_line_start(item);
                if *ordered {
                    output.push_str(&format!("{}. {}\n", i + 1, item));
                } else {
                    output.push_str(&format!("- {}\n", item));
                }
            }
            output.push('\n');
        }

        ContentBlock::Code {
            code,
            language,
            title,
        } => {
            if let Some(title) = title {
                output.push_str(&format!("**{}**\n\n", title));
            }
            let code = code.trim_start_matches('\n').trim_end();
            let fence = code_fence(code);
            output.push_str(&format!("{}{}\n{}\n{}\n\n", fence, language, code, fence));
        }

        ContentBlock::Callout { kind, title, text } => {
            write_callout(output, *kind, title.as_deref(), text);
        }

        ContentBlock::Table { headers, rows } => {
            write_table(output, headers, rows);
        }

        ContentBlock::Image { src, alt, caption } => {
            output.push_str(&format!(
                "![{}]({})\n",
                escape_link_text(alt),
                escape_link_destination(src)
            ));
            if let Some(caption) = caption {
                output.push_str(&format!("\n*{}*\n", caption.replace('*', "\\*")));
            }
            output.push('\n');
        }
    }
}

/// Write a callout as a blockquote with a bold title line
fn write_callout(output: &mut String, kind: CalloutKind, title: Option<&str>, text: &str) {
    output.push_str(&format!(
        "> **{}**\n>\n",
        title.unwrap_or(kind.default_title())
    ));
    for line in text.lines() {
        if line.is_empty() {
            output.push_str(">\n");
        } else {
            output.push_str(&format!("> {}\n", escape_line_start(line)));
        }
    }
    output.push('\n');
}

/// Write a pipe table
fn write_table(output: &mut String, headers: &[String], rows: &[Vec<String>]) {
    output.push('|');
    for header in headers {
        output.push_str(&format!(" {} |", escape_cell(header)));
    }
    output.push('\n');

    output.push('|');
    for _ in headers {
        output.push_str(" --- |");
    }
    output.push('\n');

    for row in rows {
        output.push('|');
        for cell in row {
            output.push_str(&format!(" {} |", escape_cell(cell)));
        }
        output.push('\n');
    }

    output.push('\n');
}

/// Pipes and newlines would break the row
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

/// Escape every line of `text` that would otherwise start a Markdown block
fn escape_text(text: &str) -> String {
    text.split('\n').map(escape_line_start).join("\n")
}

/// Backslash-escape a heading, quote, list or rule marker at the start of a line
fn escape_line_start(line: &str) -> String {
    let content = line.trim_start();
    let indent = &line[..line.len() - content.len()];

    if content.starts_with(['#', '>', '-', '+', '*', '=']) {
        return format!("{}\\{}", indent, content);
    }

    // "1." and "1)" open an ordered list
    let digits = content.len() - content.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if (1..=9).contains(&digits) && content[digits..].starts_with(['.', ')']) {
        return format!("{}{}\\{}", indent, &content[..digits], &content[digits..]);
    }

    line.to_string()
}

/// Brackets would end the alt text early
fn escape_link_text(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('[', "\\[")
        .replace(']', "\\]")
}

/// Parentheses and spaces would end the link destination early
fn escape_link_destination(src: &str) -> String {
    src.replace('(', "\\(")
        .replace(')', "\\)")
        .replace(' ', "%20")
}

/// A backtick fence longer than any backtick run inside `code`
fn code_fence(code: &str) -> String {
    let longest = code
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    "`".repeat(longest.max(2) + 1)
}
