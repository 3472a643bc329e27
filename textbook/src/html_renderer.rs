//! HTML renderer
//!
//! Renders the cover and chapter pages of a book as standalone HTML5
//! documents with:
//! - A header bar and a chapter sidebar (a CSS checkbox toggle, no script)
//! - Section and heading anchors plus an "On this page" list
//! - Callouts, tables, figures and code listings with optional line numbers
//! - Previous/next controls that are disabled at the ends of the book
//!
//! Page layout of a built site: the cover is `index.html` and chapter `id`
//! is `chapters/<id>.html`, so links are relative to the page being drawn.

use crate::config::RenderOptions;
use crate::content_model::{Book, CalloutKind, Chapter, ContentBlock, HeadingLevel};
use crate::navigator::{NavState, Screen};
use crate::render::Renderer;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Element id of the sidebar checkbox
///
/// Ids owned by the page layout start with `_`. Content ids must start with a
/// letter or digit, so a section or heading can never shadow them.
const SIDEBAR_TOGGLE_ID: &str = "_sidebar-toggle";

/// Renders pages as HTML
#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer {
    options: RenderOptions,
    /// Directory that relative image paths are resolved against
    asset_root: Option<PathBuf>,
}

impl HtmlRenderer {
    /// Create a renderer with the given options
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            asset_root: None,
        }
    }

    /// Resolve relative image paths against `root` when embedding images
    pub fn with_asset_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.asset_root = Some(root.into());
        self
    }

    /// Write the cover page
    fn write_cover(&self, output: &mut String, book: &Book) {
        let info = book.info();

        write_html_header(output, &info.title);
        output.push_str("<body class=\"cover-page\">\n");
        output.push_str("<div class=\"cover\">\n");

        if let Some(ref edition) = info.edition {
            output.push_str(&format!(
                "<div class=\"edition-badge\">{}</div>\n",
                escape_html(edition)
            ));
        }

        // Accent the part of the title before an ampersand
        match info.title.split_once('&') {
            Some((accent, rest)) => output.push_str(&format!(
                "<h1 class=\"cover-title\"><span class=\"title-accent\">{}</span><br>&amp;{}</h1>\n",
                escape_html(accent.trim_end()),
                escape_html(rest)
            )),
            None => output.push_str(&format!(
                "<h1 class=\"cover-title\"><span class=\"title-accent\">{}</span></h1>\n",
                escape_html(&info.title)
            )),
        }

        if let Some(ref subtitle) = info.subtitle {
            output.push_str(&format!(
                "<p class=\"cover-subtitle\">{}</p>\n",
                escape_html(subtitle)
            ));
        }

        if let Some(ref theme) = info.theme {
            output.push_str(&format!(
                "<p class=\"cover-theme\">{}</p>\n",
                escape_html(theme)
            ));
        }

        if let Some(ref description) = info.description {
            output.push_str(&format!(
                "<p class=\"cover-description\">{}</p>\n",
                escape_html(description)
            ));
        }

        if !info.authors.is_empty() {
            output.push_str(&format!(
                "<p class=\"cover-authors\">By {}</p>\n",
                escape_html(&info.authors.join(", "))
            ));
        }

        // "Start Reading" lands on the first chapter
        output.push_str(&format!(
            "<a class=\"start-reading\" href=\"{}\">Start Reading &rarr;</a>\n",
            chapter_href(Screen::Cover, &book.first_chapter().id)
        ));

        if !info.features.is_empty() {
            output.push_str("<div class=\"feature-grid\">\n");
            for feature in &info.features {
                output.push_str(&format!(
                    "<div class=\"feature\"><p class=\"feature-label\">{}</p><p class=\"feature-description\">{}</p></div>\n",
                    escape_html(&feature.label),
                    escape_html(&feature.description)
                ));
            }
            output.push_str("</div>\n");
        }

        output.push_str("</div>\n");
        output.push_str("</body>\n");
        output.push_str("</html>\n");
    }

    /// Write a chapter page
    fn write_chapter_page(&self, output: &mut String, book: &Book, state: &NavState) {
        let index = state.chapter_index();
        let chapter = book.chapter_at(index).unwrap_or_else(|| {
            log::warn!(
                "Chapter position {} is out of range, showing the first chapter",
                index
            );
            book.first_chapter()
        });

        write_html_header(
            output,
            &format!("{} | {}", chapter.title, book.info().title),
        );
        output.push_str("<body>\n");

        // The checkbox carries the sidebar state; labels toggle it
        output.push_str(&format!(
            "<input type=\"checkbox\" id=\"{}\" class=\"sidebar-toggle\"{}>\n",
            SIDEBAR_TOGGLE_ID,
            if state.sidebar_open { " checked" } else { "" }
        ));

        write_header_bar(output, book);
        output.push_str(&format!(
            "<label for=\"{}\" class=\"sidebar-overlay\" aria-hidden=\"true\"></label>\n",
            SIDEBAR_TOGGLE_ID
        ));
        write_sidebar(output, book, state.screen, &chapter.id);

        output.push_str("<main class=\"content\">\n");
        output.push_str(&format!(
            "<article class=\"chapter\" id=\"_chapter-{}\">\n",
            escape_html(&chapter.id)
        ));

        self.write_chapter_header(output, chapter);

        output.push_str("<div class=\"chapter-layout\">\n");
        output.push_str("<div class=\"chapter-body\">\n");
        for section in &chapter.sections {
            output.push_str(&format!(
                "<div class=\"section\" id=\"{}\">\n",
                escape_html(&section.id)
            ));
            for block in &section.content {
                self.write_block(output, block);
            }
            output.push_str("</div>\n");
        }
        output.push_str("</div>\n");
        write_page_toc(output, chapter);
        output.push_str("</div>\n");

        write_chapter_nav(output, book, state);

        output.push_str("</article>\n");
        output.push_str("</main>\n");

        if self.options.copy_button {
            output.push_str("<script>\n");
            output.push_str(COPY_SCRIPT);
            output.push_str("</script>\n");
        }

        output.push_str("</body>\n");
        output.push_str("</html>\n");
    }

    /// Write the "Chapter N" badge, reading time, title and subtitle
    fn write_chapter_header(&self, output: &mut String, chapter: &Chapter) {
        output.push_str("<header class=\"chapter-header\">\n");
        output.push_str(&format!(
            "<div class=\"chapter-meta\"><span class=\"chapter-label\">Chapter {}</span><span class=\"read-time\">{}</span></div>\n",
            chapter.number,
            escape_html(&chapter.read_time(self.options.words_per_minute))
        ));
        output.push_str(&format!(
            "<h1 class=\"chapter-title\">{}</h1>\n",
            escape_html(&chapter.title)
        ));
        if let Some(ref subtitle) = chapter.subtitle {
            output.push_str(&format!(
                "<p class=\"chapter-subtitle\">{}</p>\n",
                escape_html(subtitle)
            ));
        }
        output.push_str("</header>\n");
    }

    /// Write a single block to the output
    fn write_block(&self, output: &mut String, block: &ContentBlock) {
        match block {
            ContentBlock::Heading { level, text, id } => {
                let (tag, class) = match level {
                    HeadingLevel::H2 => ("h2", "content-heading level-2"),
                    HeadingLevel::H3 => ("h3", "content-heading level-3"),
                };
                output.push_str(&format!(
                    "<{tag} id=\"{}\" class=\"{class}\"><a class=\"anchor\" href=\"#{}\">{}</a></{tag}>\n",
                    escape_html(id),
                    escape_html(id),
                    escape_html(text)
                ));
            }

            ContentBlock::Paragraph { text } => {
                output.push_str(&format!("<p>{}</p>\n", escape_html(text)));
            }

            ContentBlock::List { ordered, items } => {
                let tag = if *ordered { "ol" } else { "ul" };
                output.push_str(&format!("<{} class=\"content-list\">\n", tag));
                for item in items {
                    output.push_str(&format!("<li>{}</li>\n", escape_html(item)));
                }
                output.push_str(&format!("</{}>\n", tag));
            }

            ContentBlock::Code {
                code,
                language,
                title,
            } => {
                self.write_code(output, code, language, title.as_deref());
            }

            ContentBlock::Callout { kind, title, text } => {
                write_callout(output, *kind, title.as_deref(), text);
            }

            ContentBlock::Table { headers, rows } => {
                write_table(output, headers, rows);
            }

            ContentBlock::Image { src, alt, caption } => {
                self.write_image(output, src, alt, caption.as_deref());
            }
        }
    }

    /// Write a code listing
    fn write_code(&self, output: &mut String, code: &str, language: &str, title: Option<&str>) {
        let code = code.trim_start_matches('\n').trim_end();

        output.push_str("<div class=\"code-block\">\n");

        if let Some(title) = title {
            output.push_str(&format!(
                "<div class=\"code-header\"><span class=\"code-title\">{}</span><span class=\"code-language\">{}</span></div>\n",
                escape_html(title),
                escape_html(language)
            ));
        }

        if self.options.copy_button {
            output.push_str(&format!(
                "<button type=\"button\" class=\"copy-button\" data-code=\"{}\" aria-label=\"Copy code\">Copy</button>\n",
                escape_html(code)
            ));
        }

        output.push_str(&format!(
            "<pre><code class=\"language-{}\">",
            escape_html(language)
        ));
        if self.options.line_numbers {
            for (number, line) in code.lines().enumerate() {
                output.push_str(&format!(
                    "<span class=\"code-line\"><span class=\"line-number\">{}</span><span class=\"line-content\">{}</span></span>\n",
                    number + 1,
                    escape_html(line)
                ));
            }
        } else {
            output.push_str(&escape_html(code));
        }
        output.push_str("</code></pre>\n");
        output.push_str("</div>\n");
    }

    /// Write an image block as a figure
    fn write_image(&self, output: &mut String, src: &str, alt: &str, caption: Option<&str>) {
        let (src, size) = match self.embedded_image(src) {
            Some((data_url, size)) => (data_url, Some(size)),
            None => (escape_html(src), None),
        };

        let size_attrs = size
            .map(|(width, height)| format!(" width=\"{}\" height=\"{}\"", width, height))
            .unwrap_or_default();

        output.push_str(&format!(
            "<figure class=\"figure\"><img src=\"{}\" alt=\"{}\"{} loading=\"lazy\">",
            src,
            escape_html(alt),
            size_attrs
        ));
        if let Some(caption) = caption {
            output.push_str(&format!("<figcaption>{}</figcaption>", escape_html(caption)));
        }
        output.push_str("</figure>\n");
    }

    /// Read a local image and encode it as a data URL
    ///
    /// # Returns
    /// * `Some((data_url, (width, height)))` - The image was read and its format recognised
    /// * `None` - Embedding is off, the source is not a file inside the asset root,
    ///   or the file could not be read as an image
    fn embedded_image(&self, src: &str) -> Option<(String, (usize, usize))> {
        if !self.options.embed_images || !is_local_path(src) {
            return None;
        }
        let root = self.asset_root.as_ref()?;
        let path = root.join(src);

        // Symlinks may still point elsewhere
        match (fs::canonicalize(root), fs::canonicalize(&path)) {
            (Ok(root), Ok(resolved)) if resolved.starts_with(&root) => {}
            (Ok(_), Ok(resolved)) => {
                log::warn!("Not embedding {}, it resolves outside the book", resolved.display());
                return None;
            }
            (_, Err(e)) | (Err(e), _) => {
                log::warn!("Failed to read image {}: {}", path.display(), e);
                return None;
            }
        }

        let data = match fs::read(&path) {
            Ok(data) => data,
            Err(e) => {
                log::warn!("Failed to read image {}: {}", path.display(), e);
                return None;
            }
        };

        let size = match imagesize::blob_size(&data) {
            Ok(size) => (size.width, size.height),
            Err(e) => {
                log::warn!("Not embedding {}, not a known image format: {}", path.display(), e);
                return None;
            }
        };

        let data_url = format!("data:{};base64,{}", mime_type(&path), STANDARD.encode(&data));
        Some((data_url, size))
    }
}

impl Renderer for HtmlRenderer {
    fn render_block(&self, block: &ContentBlock) -> String {
        let mut output = String::new();
        self.write_block(&mut output, block);
        output
    }

    fn render_chapter(&self, book: &Book, state: &NavState) -> String {
        let mut output = String::new();
        match state.screen {
            Screen::Cover => self.write_cover(&mut output, book),
            Screen::Chapter(_) => self.write_chapter_page(&mut output, book, state),
        }
        output
    }
}

/// Link to a chapter page, relative to the page shown for `from`
fn chapter_href(from: Screen, id: &str) -> String {
    match from {
        Screen::Cover => format!("chapters/{}.html", id),
        Screen::Chapter(_) => format!("{}.html", id),
    }
}

/// Write HTML header with CSS styling
fn write_html_header(output: &mut String, title: &str) {
    output.push_str("<!DOCTYPE html>\n");
    output.push_str("<html lang=\"en\">\n");
    output.push_str("<head>\n");
    output.push_str("<meta charset=\"UTF-8\">\n");
    output.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    output.push_str(&format!("<title>{}</title>\n", escape_html(title)));
    output.push_str("<style>\n");
    output.push_str(CSS_STYLES);
    output.push_str("</style>\n");
    output.push_str("</head>\n");
}

/// Write the fixed header bar with the sidebar toggle
fn write_header_bar(output: &mut String, book: &Book) {
    let info = book.info();

    output.push_str("<header class=\"book-header\">\n");
    output.push_str(&format!(
        "<label for=\"{}\" class=\"menu-button\" aria-label=\"Toggle table of contents\">&#9776;</label>\n",
        SIDEBAR_TOGGLE_ID
    ));
    output.push_str(&format!(
        "<a class=\"brand\" href=\"../index.html\"><span class=\"brand-title\">{}</span>",
        escape_html(&info.title)
    ));
    if let Some(ref edition) = info.edition {
        output.push_str(&format!(
            "<span class=\"brand-edition\">Textbook &middot; {}</span>",
            escape_html(edition)
        ));
    }
    output.push_str("</a>\n");
    if !info.authors.is_empty() {
        output.push_str(&format!(
            "<span class=\"header-authors\">{}</span>\n",
            escape_html(&info.authors.join(", "))
        ));
    }
    output.push_str("</header>\n");
}

/// Write the chapter list, highlighting the current chapter
fn write_sidebar(output: &mut String, book: &Book, screen: Screen, current_id: &str) {
    output.push_str("<aside class=\"sidebar\">\n");
    output.push_str("<div class=\"sidebar-title\">Table of Contents</div>\n");
    output.push_str("<nav>\n<ul class=\"chapter-list\">\n");

    for chapter in book.chapters() {
        let current = chapter.id == current_id;
        output.push_str(&format!(
            "<li><a class=\"chapter-link{}\" href=\"{}\"{}>",
            if current { " current" } else { "" },
            escape_html(&chapter_href(screen, &chapter.id)),
            if current { " aria-current=\"page\"" } else { "" }
        ));
        output.push_str(&format!(
            "<span class=\"chapter-badge\">{}</span><span class=\"chapter-text\"><span class=\"chapter-name\">{}</span>",
            chapter.number,
            escape_html(&chapter.title)
        ));
        if let Some(ref subtitle) = chapter.subtitle {
            output.push_str(&format!(
                "<span class=\"chapter-subtitle\">{}</span>",
                escape_html(subtitle)
            ));
        }
        output.push_str("</span></a></li>\n");
    }

    output.push_str("</ul>\n</nav>\n");
    if let Some(ref copyright) = book.info().copyright {
        output.push_str(&format!(
            "<div class=\"sidebar-footer\">{}</div>\n",
            escape_html(copyright)
        ));
    }
    output.push_str("</aside>\n");
}

/// Write the "On this page" heading list, if the chapter has headings
fn write_page_toc(output: &mut String, chapter: &Chapter) {
    let toc = chapter.toc();
    if toc.is_empty() {
        return;
    }

    output.push_str("<nav class=\"page-toc\">\n");
    output.push_str("<p class=\"page-toc-title\">On this page</p>\n<ul>\n");
    for entry in toc {
        output.push_str(&format!(
            "<li class=\"toc-level-{}\"><a href=\"#{}\">{}</a></li>\n",
            entry.level.as_u8(),
            escape_html(entry.id),
            escape_html(entry.text)
        ));
    }
    output.push_str("</ul>\n</nav>\n");
}

/// Write previous/next controls; missing neighbours render disabled
fn write_chapter_nav(output: &mut String, book: &Book, state: &NavState) {
    let index = state.chapter_index();
    let prev = state
        .has_prev()
        .then(|| book.chapter_at(index - 1))
        .flatten();
    let next = state
        .has_next(book.len())
        .then(|| book.chapter_at(index + 1))
        .flatten();

    output.push_str("<nav class=\"chapter-nav\">\n");

    match prev {
        Some(chapter) => output.push_str(&format!(
            "<a class=\"nav-button prev\" href=\"{}\" rel=\"prev\" title=\"{}\">&larr; Previous</a>\n",
            escape_html(&chapter_href(state.screen, &chapter.id)),
            escape_html(&chapter.title)
        )),
        None => output.push_str(
            "<span class=\"nav-button prev disabled\" aria-disabled=\"true\">&larr; Previous</span>\n",
        ),
    }

    match next {
        Some(chapter) => output.push_str(&format!(
            "<a class=\"nav-button next\" href=\"{}\" rel=\"next\" title=\"{}\">Next &rarr;</a>\n",
            escape_html(&chapter_href(state.screen, &chapter.id)),
            escape_html(&chapter.title)
        )),
        None => output.push_str(
            "<span class=\"nav-button next disabled\" aria-disabled=\"true\">Next &rarr;</span>\n",
        ),
    }

    output.push_str("</nav>\n");
}

/// Write a callout aside
fn write_callout(output: &mut String, kind: CalloutKind, title: Option<&str>, text: &str) {
    // Notes share the info palette
    let (class, icon) = match kind {
        CalloutKind::Info => ("info", "&#8505;"),
        CalloutKind::Warning => ("warning", "&#9888;"),
        CalloutKind::Tip => ("tip", "&#128161;"),
        CalloutKind::Danger => ("danger", "&#9940;"),
        CalloutKind::Note => ("info", "&#128214;"),
    };

    output.push_str(&format!(
        "<div class=\"callout callout-{}\" data-kind=\"{}\">\n",
        class,
        kind.as_str()
    ));
    output.push_str(&format!(
        "<span class=\"callout-icon\" aria-hidden=\"true\">{}</span>\n",
        icon
    ));
    output.push_str(&format!(
        "<div class=\"callout-content\"><p class=\"callout-title\">{}</p><div class=\"callout-body\">{}</div></div>\n",
        escape_html(title.unwrap_or(kind.default_title())),
        escape_html(text)
    ));
    output.push_str("</div>\n");
}

/// Write a table
fn write_table(output: &mut String, headers: &[String], rows: &[Vec<String>]) {
    output.push_str("<div class=\"table-wrapper\">\n<table>\n<thead>\n<tr>\n");

    for header in headers {
        output.push_str(&format!("<th>{}</th>\n", escape_html(header)));
    }

    output.push_str("</tr>\n</thead>\n<tbody>\n");

    for row in rows {
        output.push_str("<tr>\n");
        for cell in row {
            output.push_str(&format!("<td>{}</td>\n", escape_html(cell)));
        }
        output.push_str("</tr>\n");
    }

    output.push_str("</tbody>\n</table>\n</div>\n");
}

/// Whether an image source refers to a file relative to the book root
/// A relative path that stays below the directory it is joined to
fn is_local_path(src: &str) -> bool {
    if src.is_empty() || src.contains("://") || src.starts_with("data:") {
        return false;
    }
    Path::new(src)
        .components()
        .all(|component| matches!(component, Component::Normal(_) | Component::CurDir))
}

/// MIME type from an image file extension
fn mime_type(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// Escape HTML special characters
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Copy-to-clipboard handler for code listings
const COPY_SCRIPT: &str = r#"
document.querySelectorAll('.copy-button').forEach(function (button) {
    button.addEventListener('click', function () {
        navigator.clipboard.writeText(button.dataset.code).then(function () {
            button.textContent = 'Copied';
            setTimeout(function () { button.textContent = 'Copy'; }, 2000);
        });
    });
});
"#;

/// Dark book theme
const CSS_STYLES: &str = r#"
:root {
    --background: #0f1115;
    --card: #161a21;
    --secondary: #1d222b;
    --muted: #262c36;
    --border: #2c3340;
    --foreground: #e6e8eb;
    --muted-foreground: #9aa3b2;
    --primary: #e0b04c;
    --primary-foreground: #1a1405;
    --info: #4aa3ff;
    --warning: #f2a541;
    --tip: #3ecf8e;
    --danger: #ef5350;
    --header-height: 57px;
    --sidebar-width: 18rem;
}

* {
    margin: 0;
    padding: 0;
    box-sizing: border-box;
}

body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Roboto', 'Oxygen',
                 'Ubuntu', 'Cantarell', 'Fira Sans', 'Droid Sans', 'Helvetica Neue',
                 sans-serif;
    line-height: 1.6;
    color: var(--foreground);
    background-color: var(--background);
}

a {
    color: var(--primary);
    text-decoration: none;
}

a:hover {
    text-decoration: underline;
}

/* Cover */

.cover-page {
    min-height: 100vh;
    display: flex;
    align-items: center;
    background: radial-gradient(ellipse at top right, #2a2110 0%, var(--background) 60%);
}

.cover {
    max-width: 48rem;
    margin: 0 auto;
    padding: 5rem 1.5rem;
}

.edition-badge {
    display: inline-block;
    margin-bottom: 1.5rem;
    padding: 0.4rem 1rem;
    border: 1px solid rgba(224, 176, 76, 0.3);
    border-radius: 999px;
    background: rgba(224, 176, 76, 0.1);
    color: var(--primary);
    font-size: 0.875rem;
    font-weight: 500;
}

.cover-title {
    font-size: 3.5rem;
    line-height: 1.1;
    font-weight: 700;
    margin-bottom: 1rem;
}

.title-accent {
    color: var(--primary);
}

.cover-subtitle {
    font-size: 1.5rem;
    color: var(--muted-foreground);
    margin-bottom: 0.75rem;
}

.cover-theme {
    font-size: 0.95rem;
    color: var(--muted-foreground);
    margin-bottom: 1.5rem;
}

.cover-description {
    font-size: 1.125rem;
    max-width: 42rem;
    margin-bottom: 1rem;
}

.cover-authors {
    color: var(--muted-foreground);
    margin-bottom: 2rem;
}

.start-reading {
    display: inline-block;
    margin-bottom: 3rem;
    padding: 1rem 2rem;
    border-radius: 0.75rem;
    background: var(--primary);
    color: var(--primary-foreground);
    font-size: 1.125rem;
    font-weight: 600;
    box-shadow: 0 0 40px rgba(224, 176, 76, 0.25);
}

.start-reading:hover {
    text-decoration: none;
    opacity: 0.9;
}

.feature-grid {
    display: grid;
    grid-template-columns: repeat(4, 1fr);
    gap: 1rem;
}

.feature {
    padding: 1rem;
    border: 1px solid var(--border);
    border-radius: 0.75rem;
    background: rgba(22, 26, 33, 0.5);
}

.feature-label {
    font-weight: 600;
}

.feature-description {
    font-size: 0.75rem;
    color: var(--muted-foreground);
}

/* Header and sidebar */

.sidebar-toggle {
    display: none;
}

.book-header {
    position: fixed;
    top: 0;
    left: 0;
    right: 0;
    z-index: 50;
    height: var(--header-height);
    display: flex;
    align-items: center;
    gap: 0.75rem;
    padding: 0 1rem;
    border-bottom: 1px solid var(--border);
    background: rgba(15, 17, 21, 0.85);
    backdrop-filter: blur(12px);
}

.menu-button {
    display: none;
    cursor: pointer;
    font-size: 1.25rem;
    padding: 0.25rem 0.5rem;
}

.brand {
    display: flex;
    flex-direction: column;
    color: var(--foreground);
}

.brand-title {
    font-weight: 600;
}

.brand-edition {
    font-size: 0.75rem;
    color: var(--muted-foreground);
}

.header-authors {
    margin-left: auto;
    font-size: 0.875rem;
    color: var(--muted-foreground);
}

.sidebar {
    position: fixed;
    top: var(--header-height);
    left: 0;
    z-index: 40;
    width: var(--sidebar-width);
    height: calc(100vh - var(--header-height));
    display: flex;
    flex-direction: column;
    border-right: 1px solid var(--border);
    background: var(--card);
    transition: transform 0.3s;
}

.sidebar-title {
    padding: 1rem;
    border-bottom: 1px solid var(--border);
    color: var(--primary);
    font-weight: 600;
}

.sidebar nav {
    flex: 1;
    overflow-y: auto;
    padding: 1rem;
}

.chapter-list {
    list-style: none;
}

.chapter-link {
    display: flex;
    align-items: center;
    gap: 0.75rem;
    padding: 0.6rem 0.75rem;
    border-radius: 0.5rem;
    color: var(--muted-foreground);
}

.chapter-link:hover {
    text-decoration: none;
    background: var(--secondary);
    color: var(--foreground);
}

.chapter-link.current {
    background: rgba(224, 176, 76, 0.1);
    color: var(--foreground);
}

.chapter-badge {
    flex-shrink: 0;
    width: 1.75rem;
    height: 1.75rem;
    display: flex;
    align-items: center;
    justify-content: center;
    border-radius: 0.375rem;
    background: var(--muted);
    font-size: 0.875rem;
}

.chapter-link.current .chapter-badge {
    background: var(--primary);
    color: var(--primary-foreground);
}

.chapter-text {
    display: flex;
    flex-direction: column;
    min-width: 0;
}

.chapter-name,
.chapter-text .chapter-subtitle {
    white-space: nowrap;
    overflow: hidden;
    text-overflow: ellipsis;
}

.chapter-name {
    font-size: 0.875rem;
    font-weight: 500;
}

.chapter-text .chapter-subtitle {
    font-size: 0.75rem;
}

.sidebar-footer {
    padding: 1rem;
    border-top: 1px solid var(--border);
    text-align: center;
    font-size: 0.75rem;
    color: var(--muted-foreground);
}

.sidebar-overlay {
    display: none;
}

/* Chapter */

.content {
    padding-top: var(--header-height);
    margin-left: var(--sidebar-width);
}

.chapter-header {
    padding: 4rem 3rem;
    border-bottom: 1px solid var(--border);
    background: linear-gradient(to bottom, rgba(29, 34, 43, 0.5), transparent);
}

.chapter-meta {
    display: flex;
    align-items: center;
    gap: 0.75rem;
    margin-bottom: 1rem;
}

.chapter-label {
    padding: 0.25rem 1rem;
    border-radius: 999px;
    background: rgba(224, 176, 76, 0.2);
    color: var(--primary);
    font-size: 0.875rem;
    font-weight: 500;
}

.read-time {
    font-size: 0.875rem;
    color: var(--muted-foreground);
}

.chapter-title {
    font-size: 3rem;
    font-weight: 700;
    margin-bottom: 0.75rem;
}

.chapter-header .chapter-subtitle {
    font-size: 1.25rem;
    color: var(--muted-foreground);
}

.chapter-layout {
    display: flex;
    gap: 2rem;
    padding: 3rem;
}

.chapter-body {
    flex: 1;
    max-width: 56rem;
    min-width: 0;
}

.content-heading {
    scroll-margin-top: 5rem;
    font-weight: 600;
}

.content-heading .anchor {
    color: inherit;
}

h2.content-heading {
    font-size: 1.875rem;
    margin: 2.5rem 0 1rem;
    padding-bottom: 0.5rem;
    border-bottom: 1px solid var(--border);
}

h3.content-heading {
    font-size: 1.5rem;
    margin: 2rem 0 0.75rem;
}

.chapter-body p {
    margin-bottom: 1rem;
    color: rgba(230, 232, 235, 0.9);
}

.content-list {
    margin: 0 0 1rem 1.5rem;
}

.content-list li {
    margin-bottom: 0.5rem;
}

.page-toc {
    position: sticky;
    top: 6rem;
    align-self: flex-start;
    width: 16rem;
    flex-shrink: 0;
    padding-left: 1rem;
    border-left: 1px solid var(--border);
}

.page-toc-title {
    font-size: 0.875rem;
    font-weight: 600;
    margin-bottom: 1rem;
}

.page-toc ul {
    list-style: none;
}

.page-toc li {
    margin-bottom: 0.5rem;
    font-size: 0.875rem;
}

.page-toc a {
    color: var(--muted-foreground);
}

.page-toc .toc-level-3 {
    padding-left: 1rem;
}

/* Callouts */

.callout {
    display: flex;
    gap: 1rem;
    margin-bottom: 1.5rem;
    padding: 1rem 1.25rem;
    border-left: 4px solid var(--info);
    border-radius: 0.5rem;
    background: rgba(74, 163, 255, 0.08);
}

.callout-warning {
    border-color: var(--warning);
    background: rgba(242, 165, 65, 0.08);
}

.callout-tip {
    border-color: var(--tip);
    background: rgba(62, 207, 142, 0.08);
}

.callout-danger {
    border-color: var(--danger);
    background: rgba(239, 83, 80, 0.08);
}

.callout-title {
    font-weight: 600;
    margin-bottom: 0.25rem;
}

.callout-info .callout-title { color: var(--info); }
.callout-warning .callout-title { color: var(--warning); }
.callout-tip .callout-title { color: var(--tip); }
.callout-danger .callout-title { color: var(--danger); }

/* Code */

.code-block {
    position: relative;
    margin-bottom: 1.5rem;
    border: 1px solid var(--border);
    border-radius: 0.5rem;
    overflow: hidden;
    background: var(--secondary);
}

.code-header {
    display: flex;
    justify-content: space-between;
    padding: 0.5rem 1rem;
    border-bottom: 1px solid var(--border);
    background: rgba(38, 44, 54, 0.5);
    font-size: 0.875rem;
    color: var(--muted-foreground);
}

.code-language {
    font-size: 0.75rem;
    text-transform: uppercase;
}

.copy-button {
    position: absolute;
    right: 0.5rem;
    bottom: 0.5rem;
    padding: 0.25rem 0.6rem;
    border: none;
    border-radius: 0.375rem;
    background: var(--muted);
    color: var(--muted-foreground);
    cursor: pointer;
    opacity: 0;
    transition: opacity 0.2s;
}

.code-block:hover .copy-button {
    opacity: 1;
}

pre {
    padding: 1rem;
    overflow-x: auto;
    font-size: 0.875rem;
    line-height: 1.6;
}

code {
    font-family: 'Monaco', 'Menlo', 'Ubuntu Mono', 'Consolas', monospace;
}

.code-line {
    display: table-row;
}

.line-number {
    display: table-cell;
    width: 2rem;
    padding-right: 1rem;
    text-align: right;
    color: rgba(154, 163, 178, 0.5);
    user-select: none;
}

.line-content {
    display: table-cell;
    white-space: pre;
}

/* Tables and figures */

.table-wrapper {
    margin-bottom: 1.5rem;
    overflow-x: auto;
}

table {
    width: 100%;
    border-collapse: collapse;
    font-size: 0.875rem;
}

th {
    padding: 0.75rem 1rem;
    text-align: left;
    font-weight: 600;
    border: 1px solid var(--border);
    background: rgba(38, 44, 54, 0.5);
}

td {
    padding: 0.75rem 1rem;
    border: 1px solid var(--border);
}

tbody tr:nth-child(even) {
    background: rgba(38, 44, 54, 0.2);
}

.figure {
    margin: 1.5rem 0;
    text-align: center;
}

.figure img {
    max-width: 100%;
    height: auto;
    border: 1px solid var(--border);
    border-radius: 0.5rem;
}

figcaption {
    margin-top: 0.5rem;
    font-size: 0.875rem;
    color: var(--muted-foreground);
    font-style: italic;
}

/* Previous / next */

.chapter-nav {
    display: flex;
    justify-content: space-between;
    max-width: 56rem;
    padding: 1.5rem 3rem;
    border-top: 1px solid var(--border);
}

.nav-button {
    padding: 0.5rem 1rem;
    border: 1px solid var(--border);
    border-radius: 0.5rem;
    color: var(--foreground);
}

.nav-button:hover {
    text-decoration: none;
    background: var(--secondary);
}

.nav-button.disabled {
    opacity: 0.4;
    cursor: not-allowed;
}

@media screen and (max-width: 1280px) {
    .page-toc {
        display: none;
    }
}

@media screen and (max-width: 1024px) {
    .menu-button {
        display: block;
    }

    .content {
        margin-left: 0;
    }

    .sidebar {
        transform: translateX(-100%);
    }

    .sidebar-toggle:checked ~ .sidebar {
        transform: none;
    }

    .sidebar-toggle:checked ~ .sidebar-overlay {
        display: block;
        position: fixed;
        inset: 0;
        z-index: 30;
        background: rgba(15, 17, 21, 0.8);
    }

    .chapter-header,
    .chapter-layout {
        padding: 2rem 1.5rem;
    }

    .feature-grid {
        grid-template-columns: repeat(2, 1fr);
    }

    .cover-title {
        font-size: 2.5rem;
    }
}

@media print {
    .book-header,
    .sidebar,
    .chapter-nav,
    .copy-button {
        display: none;
    }

    .content {
        margin-left: 0;
        padding-top: 0;
    }
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content_model::test_support::book;
    use crate::content_model::{BookInfo, Feature, Section};
    use itertools::Itertools;

    /// In-page fragment targets, first occurrence order
    fn anchors(html: &str) -> Vec<String> {
        html.split("href=\"#")
            .skip(1)
            .filter_map(|rest| rest.split('"').next())
            .map(str::to_string)
            .unique()
            .collect()
    }

    fn renderer() -> HtmlRenderer {
        HtmlRenderer::new(RenderOptions::default())
    }

    fn chapter_state(index: usize) -> NavState {
        NavState {
            screen: Screen::Chapter(index),
            sidebar_open: false,
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<div>"), "&lt;div&gt;");
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html("\"quoted\""), "&quot;quoted&quot;");
    }

    #[test]
    fn test_heading_has_anchor_id() {
        let html = renderer().render_block(&ContentBlock::Heading {
            level: HeadingLevel::H3,
            text: "Core <Concepts>".to_string(),
            id: "core-concepts".to_string(),
        });
        assert_eq!(
            html,
            "<h3 id=\"core-concepts\" class=\"content-heading level-3\"><a class=\"anchor\" href=\"#core-concepts\">Core &lt;Concepts&gt;</a></h3>\n"
        );
    }

    #[test]
    fn test_paragraph_is_escaped() {
        let html = renderer().render_block(&ContentBlock::Paragraph {
            text: "Price < $249 & rising".to_string(),
        });
        assert_eq!(html, "<p>Price &lt; $249 &amp; rising</p>\n");
    }

    #[test]
    fn test_ordered_and_unordered_lists() {
        let items = vec!["One".to_string(), "Two".to_string()];
        let ordered = renderer().render_block(&ContentBlock::List {
            ordered: true,
            items: items.clone(),
        });
        let unordered = renderer().render_block(&ContentBlock::List {
            ordered: false,
            items,
        });

        assert!(ordered.starts_with("<ol class=\"content-list\">"));
        assert!(ordered.contains("<li>One</li>\n<li>Two</li>"));
        assert!(unordered.starts_with("<ul class=\"content-list\">"));
        assert!(unordered.ends_with("</ul>\n"));
    }

    #[test]
    fn test_callout_uses_default_title() {
        let html = renderer().render_block(&ContentBlock::Callout {
            kind: CalloutKind::Warning,
            title: None,
            text: "Technically demanding.".to_string(),
        });
        assert!(html.contains("callout-warning"));
        assert!(html.contains("<p class=\"callout-title\">Warning</p>"));
        assert!(html.contains("Technically demanding."));
    }

    #[test]
    fn test_note_callout_shares_info_style() {
        let html = renderer().render_block(&ContentBlock::Callout {
            kind: CalloutKind::Note,
            title: Some("Remember".to_string()),
            text: "Read the docs.".to_string(),
        });
        assert!(html.contains("class=\"callout callout-info\" data-kind=\"note\""));
        assert!(html.contains(">Remember</p>"));
    }

    #[test]
    fn test_code_with_line_numbers_and_title() {
        let html = renderer().render_block(&ContentBlock::Code {
            code: "\nimport rclpy\nrclpy.init()\n\n".to_string(),
            language: "python".to_string(),
            title: Some("node.py".to_string()),
        });

        assert!(html.contains("<span class=\"code-title\">node.py</span>"));
        assert!(html.contains("<span class=\"code-language\">python</span>"));
        assert!(html.contains("<code class=\"language-python\">"));
        assert!(html.contains("<span class=\"line-number\">1</span><span class=\"line-content\">import rclpy</span>"));
        assert!(html.contains("<span class=\"line-number\">2</span>"));
        assert!(!html.contains("<span class=\"line-number\">3</span>"));
        assert!(html.contains("data-code=\"import rclpy\nrclpy.init()\""));
    }

    #[test]
    fn test_code_without_line_numbers_or_copy_button() {
        let renderer = HtmlRenderer::new(RenderOptions {
            line_numbers: false,
            copy_button: false,
            ..RenderOptions::default()
        });
        let html = renderer.render_block(&ContentBlock::Code {
            code: "a < b".to_string(),
            language: "rust".to_string(),
            title: None,
        });

        assert!(!html.contains("code-header"));
        assert!(!html.contains("copy-button"));
        assert!(html.contains("<pre><code class=\"language-rust\">a &lt; b</code></pre>"));
    }

    #[test]
    fn test_table() {
        let html = renderer().render_block(&ContentBlock::Table {
            headers: vec!["Component".to_string(), "Price".to_string()],
            rows: vec![vec!["The Brain".to_string(), "$249".to_string()]],
        });
        assert!(html.contains("<thead>\n<tr>\n<th>Component</th>\n<th>Price</th>\n</tr>\n</thead>"));
        assert!(html.contains("<td>The Brain</td>\n<td>$249</td>"));
    }

    #[test]
    fn test_image_with_caption() {
        let html = renderer().render_block(&ContentBlock::Image {
            src: "https://example.com/robot.jpg".to_string(),
            alt: "Humanoid \"robot\"".to_string(),
            caption: Some("A humanoid".to_string()),
        });
        assert_eq!(
            html,
            "<figure class=\"figure\"><img src=\"https://example.com/robot.jpg\" alt=\"Humanoid &quot;robot&quot;\" loading=\"lazy\"><figcaption>A humanoid</figcaption></figure>\n"
        );
    }

    #[test]
    fn test_embedded_image() {
        let dir = tempfile::TempDir::new().unwrap();
        // Smallest valid GIF header: 2x3 pixels
        let gif = b"GIF89a\x02\x00\x03\x00\x00\x00\x00;";
        std::fs::write(dir.path().join("pixel.gif"), gif).unwrap();

        let renderer = HtmlRenderer::new(RenderOptions {
            embed_images: true,
            ..RenderOptions::default()
        })
        .with_asset_root(dir.path());

        let html = renderer.render_block(&ContentBlock::Image {
            src: "pixel.gif".to_string(),
            alt: "pixel".to_string(),
            caption: None,
        });
        assert!(html.contains("src=\"data:image/gif;base64,"));
        assert!(html.contains("width=\"2\" height=\"3\""));
    }

    #[test]
    fn test_missing_embedded_image_falls_back_to_src() {
        let dir = tempfile::TempDir::new().unwrap();
        let renderer = HtmlRenderer::new(RenderOptions {
            embed_images: true,
            ..RenderOptions::default()
        })
        .with_asset_root(dir.path());

        let html = renderer.render_block(&ContentBlock::Image {
            src: "missing.png".to_string(),
            alt: "missing".to_string(),
            caption: None,
        });
        assert!(html.contains("src=\"missing.png\""));
    }

    #[test]
    fn test_image_outside_book_is_not_embedded() {
        let dir = tempfile::TempDir::new().unwrap();
        let root = dir.path().join("book");
        std::fs::create_dir(&root).unwrap();
        std::fs::write(dir.path().join("secret.txt"), "TOP-SECRET").unwrap();
        std::fs::write(dir.path().join("pixel.gif"), b"GIF89a\x02\x00\x03\x00\x00\x00\x00;").unwrap();

        let renderer = HtmlRenderer::new(RenderOptions {
            embed_images: true,
            ..RenderOptions::default()
        })
        .with_asset_root(&root);

        for src in ["../secret.txt", "./../pixel.gif", "img/../../pixel.gif"] {
            let html = renderer.render_block(&ContentBlock::Image {
                src: src.to_string(),
                alt: "outside".to_string(),
                caption: None,
            });
            assert!(!html.contains("data:"), "{} was embedded", src);
            assert!(html.contains(&format!("src=\"{}\"", src)));
        }
    }

    #[test]
    fn test_non_image_file_is_not_embedded() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("notes.txt"), "private notes").unwrap();

        let renderer = HtmlRenderer::new(RenderOptions {
            embed_images: true,
            ..RenderOptions::default()
        })
        .with_asset_root(dir.path());

        let html = renderer.render_block(&ContentBlock::Image {
            src: "notes.txt".to_string(),
            alt: "notes".to_string(),
            caption: None,
        });
        assert!(!html.contains("data:"));
        assert!(html.contains("src=\"notes.txt\""));
    }

    #[test]
    fn test_local_path() {
        assert!(is_local_path("img/robot.png"));
        assert!(is_local_path("./robot.png"));
        assert!(!is_local_path("../robot.png"));
        assert!(!is_local_path("img/../../robot.png"));
        assert!(!is_local_path("/etc/passwd"));
        assert!(!is_local_path("https://example.com/robot.png"));
        assert!(!is_local_path("data:image/png;base64,AAAA"));
        assert!(!is_local_path(""));
    }

    #[test]
    fn test_cover_page() {
        let mut info = BookInfo {
            title: "Physical AI & Humanoid Robotics".to_string(),
            subtitle: Some("A Comprehensive Textbook".to_string()),
            edition: Some("First Edition".to_string()),
            features: vec![Feature {
                label: "ROS 2".to_string(),
                description: "Robot Operating System".to_string(),
            }],
            ..BookInfo::default()
        };
        info.authors.push("Panaversity".to_string());
        let chapters = book(&["introduction", "module-1"]).chapters().to_vec();
        let book = Book::new(info, chapters).unwrap();

        let html = renderer().render_chapter(&book, &NavState::new());

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<span class=\"title-accent\">Physical AI</span><br>&amp; Humanoid Robotics"));
        assert!(html.contains("<div class=\"edition-badge\">First Edition</div>"));
        assert!(html.contains("href=\"chapters/introduction.html\">Start Reading"));
        assert!(html.contains("<p class=\"feature-label\">ROS 2</p>"));
        assert!(html.contains("By Panaversity"));
    }

    #[test]
    fn test_first_chapter_disables_previous() {
        let book = book(&["a", "b", "c"]);
        let html = renderer().render_chapter(&book, &chapter_state(0));

        assert!(html.contains("<span class=\"nav-button prev disabled\" aria-disabled=\"true\">"));
        assert!(html.contains("<a class=\"nav-button next\" href=\"b.html\" rel=\"next\""));
        assert!(html.contains("<span class=\"chapter-label\">Chapter 1</span>"));
    }

    #[test]
    fn test_last_chapter_disables_next() {
        let book = book(&["a", "b", "c"]);
        let html = renderer().render_chapter(&book, &chapter_state(2));

        assert!(html.contains("<a class=\"nav-button prev\" href=\"b.html\" rel=\"prev\""));
        assert!(html.contains("<span class=\"nav-button next disabled\" aria-disabled=\"true\">"));
    }

    #[test]
    fn test_sidebar_highlights_current_chapter() {
        let book = book(&["a", "b", "c"]);
        let html = renderer().render_chapter(&book, &chapter_state(1));

        assert!(html.contains("<a class=\"chapter-link current\" href=\"b.html\" aria-current=\"page\">"));
        assert!(html.contains("<a class=\"chapter-link\" href=\"a.html\">"));
        assert!(html.contains("class=\"sidebar-toggle\">"));
    }

    #[test]
    fn test_open_sidebar_is_checked() {
        let book = book(&["a", "b"]);
        let state = NavState {
            screen: Screen::Chapter(0),
            sidebar_open: true,
        };
        let html = renderer().render_chapter(&book, &state);
        assert!(html.contains("class=\"sidebar-toggle\" checked>"));
    }

    #[test]
    fn test_out_of_range_state_falls_back_to_first_chapter() {
        let book = book(&["a", "b"]);
        let html = renderer().render_chapter(&book, &chapter_state(9));
        assert!(html.contains("id=\"_chapter-a\""));
    }

    #[test]
    fn test_sections_and_toc_in_authored_order() {
        let mut chapters = book(&["a"]).chapters().to_vec();
        chapters[0].sections.push(Section {
            id: "details".to_string(),
            content: vec![ContentBlock::Heading {
                level: HeadingLevel::H3,
                text: "Details".to_string(),
                id: "details-heading".to_string(),
            }],
        });
        let book = Book::new(BookInfo::default(), chapters).unwrap();

        let html = renderer().render_chapter(&book, &chapter_state(0));
        let overview = html.find("<div class=\"section\" id=\"overview\">").unwrap();
        let details = html.find("<div class=\"section\" id=\"details\">").unwrap();
        assert!(overview < details);

        assert!(html.contains("<p class=\"page-toc-title\">On this page</p>"));
        assert!(html.contains("<li class=\"toc-level-3\"><a href=\"#details-heading\">Details</a></li>"));
        assert_eq!(anchors(&html), vec!["a-title", "details-heading"]);
    }

    #[test]
    fn test_element_ids_are_unique_on_a_page() {
        let mut chapters = book(&["a"]).chapters().to_vec();
        chapters[0].sections[0].id = "sidebar-toggle".to_string();
        chapters[0].sections[0].content.push(ContentBlock::Heading {
            level: HeadingLevel::H3,
            text: "Chapter A".to_string(),
            id: "chapter-a".to_string(),
        });
        let book = Book::new(BookInfo::default(), chapters).unwrap();

        let html = renderer().render_chapter(&book, &chapter_state(0));
        let ids: Vec<&str> = html
            .split(" id=\"")
            .skip(1)
            .filter_map(|rest| rest.split('"').next())
            .collect();
        assert_eq!(ids.iter().duplicates().count(), 0, "{:?}", ids);
        assert!(ids.contains(&"sidebar-toggle"));
        assert!(ids.contains(&"_sidebar-toggle"));
        assert!(html.contains("<label for=\"_sidebar-toggle\" class=\"menu-button\""));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let book = book(&["a", "b", "c"]);
        let state = chapter_state(1);
        assert_eq!(
            renderer().render_chapter(&book, &state),
            renderer().render_chapter(&book, &state)
        );
    }
}
