//! textbook - static textbook renderer
//!
//! A CLI tool for creating, validating and rendering book-style textbooks
//! written as TOML content blocks.

#![deny(unsafe_code)]

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use textbook::cli::{Cli, Commands, OutputFormat};
use textbook::config::{TextbookConfig, CONFIG_FILE};
use textbook::html_renderer::HtmlRenderer;
use textbook::loader::{self, LoadedBook};
use textbook::markdown_renderer::MarkdownRenderer;
use textbook::{session, site, templates};

/// Main entry point for the textbook CLI application
fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}

/// Run the CLI application
fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init {
            template,
            path,
            force,
            title,
        } => {
            init_logging(false);
            handle_init_command(&template, path, force, title)?;
        }

        Commands::Build {
            input,
            output,
            format,
            verbose,
        } => {
            init_logging(verbose);
            handle_build_command(&input, output, format, verbose)?;
        }

        Commands::Validate { input, verbose } => {
            init_logging(verbose);
            handle_validate_command(&input, verbose)?;
        }

        Commands::Read { input } => {
            init_logging(false);
            handle_read_command(&input)?;
        }

        Commands::ListTemplates => {
            handle_list_templates_command();
        }
    }

    Ok(())
}

/// Initialize logging from RUST_LOG, raised to info with --verbose
fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(log::LevelFilter::Info);
    }
    builder.init();
}

/// Handle the init command
fn handle_init_command(
    template: &str,
    path: Option<PathBuf>,
    force: bool,
    title: Option<String>,
) -> Result<()> {
    let target_path = path.unwrap_or_else(|| PathBuf::from("."));

    // Look up the template
    let template_info = templates::get_template(template).with_context(|| {
        format!(
            "Template '{}' not found. Run 'textbook list-templates' to see available templates",
            template
        )
    })?;

    println!("Initializing book from template: {}", template_info.id);
    println!("Target path: {}", target_path.display());
    if let Some(ref title_text) = title {
        println!("Title: {}", title_text);
    }

    // Create the target directory if it doesn't exist
    if !target_path.exists() {
        std::fs::create_dir_all(&target_path)
            .with_context(|| format!("Failed to create directory {}", target_path.display()))?;
    }

    // Check if directory is empty (unless force flag is set)
    if !force {
        check_directory_empty(&target_path)?;
    }

    let files_created = create_template_files(&template_info, &target_path)?;

    if let Some(title_text) = title {
        set_book_title(&target_path.join(CONFIG_FILE), title_text)?;
    }

    println!("\n✓ Successfully created {} files", files_created);
    println!("\nNext steps:");
    println!("  1. Edit {} to describe your book", CONFIG_FILE);
    println!("  2. Write chapters in the {}/ directory", loader::CHAPTERS_DIR);
    println!("  3. Run 'textbook build' to render the book");

    Ok(())
}

/// Handle the build command
fn handle_build_command(
    input: &Path,
    output: Option<PathBuf>,
    format: OutputFormat,
    verbose: bool,
) -> Result<()> {
    let loaded = load(input)?;
    let out_dir = output.unwrap_or_else(|| loaded.root.join(&loaded.config.output));

    println!("Building textbook...");
    println!("Input: {}", input.display());
    println!("Output: {}", out_dir.display());
    if verbose {
        print_book_summary(&loaded);
    }

    match format {
        OutputFormat::Html => {
            let renderer =
                HtmlRenderer::new(loaded.config.render.clone()).with_asset_root(&loaded.root);
            let pages = site::write_html(&loaded.book, &renderer, &out_dir)
                .with_context(|| format!("Failed to write HTML to {}", out_dir.display()))?;
            println!("✓ Wrote {} pages", pages.len());
        }
        OutputFormat::Markdown => {
            let renderer = MarkdownRenderer::new(loaded.config.render.words_per_minute);
            let path = site::write_markdown(&loaded.book, &renderer, &out_dir)
                .with_context(|| format!("Failed to write Markdown to {}", out_dir.display()))?;
            println!("✓ Successfully wrote: {}", path.display());
        }
    }

    println!("\n✓ Build completed successfully!");

    Ok(())
}

/// Handle the validate command
fn handle_validate_command(input: &Path, verbose: bool) -> Result<()> {
    println!("Validating book structure...");
    println!("Input: {}", input.display());

    let loaded = load(input)?;
    let book = &loaded.book;

    println!(
        "✓ '{}' is valid: {} chapters, {} sections, {} headings, {} tables, {} words",
        book.info().title,
        book.len(),
        book.chapters()
            .iter()
            .map(|chapter| chapter.sections.len())
            .sum::<usize>(),
        book.heading_count(),
        book.table_count(),
        book.word_count()
    );

    if verbose {
        print_book_summary(&loaded);
    }

    Ok(())
}

/// Handle the read command
fn handle_read_command(input: &Path) -> Result<()> {
    let loaded = load(input)?;
    let renderer = MarkdownRenderer::new(loaded.config.render.words_per_minute);

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    session::run(&loaded.book, &renderer, stdin.lock(), &mut stdout)
        .context("Terminal reader failed")?;

    Ok(())
}

/// Handle the list-templates command
fn handle_list_templates_command() {
    println!("Available templates:\n");

    for template in templates::get_all_templates() {
        println!("  {} - {}", template.id, template.description);
        if !template.aliases.is_empty() {
            println!("    Aliases: {}", template.aliases.join(", "));
        }
        println!();
    }

    println!("Usage: textbook init <template> [path]");
    println!("Example: textbook init physical-ai ./my-book");
}

/// Load and validate a book directory
fn load(input: &Path) -> Result<LoadedBook> {
    loader::load_book(input)
        .with_context(|| format!("Failed to load book from {}", input.display()))
}

/// Check if a directory is empty
fn check_directory_empty(path: &Path) -> Result<()> {
    if let Ok(entries) = std::fs::read_dir(path) {
        if entries.count() > 0 {
            anyhow::bail!("Target directory is not empty. Use --force to overwrite existing files");
        }
    }
    Ok(())
}

/// Write every file of a template below `target_path`
fn create_template_files(
    template_info: &templates::TemplateInfo,
    target_path: &Path,
) -> Result<usize> {
    for (file_path, content) in &template_info.files {
        let full_path = target_path.join(file_path);

        // Create parent directories if needed
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        std::fs::write(&full_path, content)
            .with_context(|| format!("Failed to write file {}", full_path.display()))?;
    }

    Ok(template_info.files.len())
}

/// Replace the book title in a freshly written textbook.toml
fn set_book_title(config_path: &Path, title: String) -> Result<()> {
    let mut config = TextbookConfig::load(config_path)
        .with_context(|| format!("Failed to read {}", config_path.display()))?;
    config.book.title = title;
    config
        .save(config_path)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    Ok(())
}

/// Print per-chapter statistics
fn print_book_summary(loaded: &LoadedBook) {
    let words_per_minute = loaded.config.render.words_per_minute;

    println!("\n{} chapters:", loaded.book.len());
    for chapter in loaded.book.chapters() {
        println!(
            "  {:>2}. {} ({}) - {} sections, {} words, {}",
            chapter.number,
            chapter.title,
            chapter.id,
            chapter.sections.len(),
            chapter.word_count(),
            chapter.read_time(words_per_minute)
        );
    }
    println!();
}
