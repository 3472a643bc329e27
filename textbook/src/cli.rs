//! Command-line interface definitions for textbook

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for the build command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Static HTML site: index.html plus one page per chapter
    Html,
    /// A single Markdown file
    Markdown,
}

/// CLI structure for the textbook application
#[derive(Parser)]
#[command(name = "textbook")]
#[command(version)]
#[command(about = "Static textbook renderer", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for textbook
#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new book from a starter template
    Init {
        /// Template identifier or alias (see list-templates)
        template: String,

        /// Directory to initialize (defaults to current directory)
        path: Option<PathBuf>,

        /// Overwrite existing files
        #[arg(short, long)]
        force: bool,

        /// Book title
        #[arg(short, long)]
        title: Option<String>,
    },

    /// Render the book to HTML or Markdown
    Build {
        /// Book directory (defaults to current directory)
        #[arg(value_name = "PATH", default_value = ".")]
        input: PathBuf,

        /// Output directory (defaults to `output` in textbook.toml, relative to the book)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "html")]
        format: OutputFormat,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Validate book structure and ids
    Validate {
        /// Book directory (defaults to current directory)
        #[arg(value_name = "PATH", default_value = ".")]
        input: PathBuf,

        /// Show detailed validation results
        #[arg(short, long)]
        verbose: bool,
    },

    /// Page through the book in the terminal
    Read {
        /// Book directory (defaults to current directory)
        #[arg(value_name = "PATH", default_value = ".")]
        input: PathBuf,
    },

    /// List available starter templates
    ListTemplates,
}
