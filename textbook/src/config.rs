//! Book configuration from textbook.toml

use crate::content_model::{BookInfo, Chapter};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the configuration file at the root of a book directory
pub const CONFIG_FILE: &str = "textbook.toml";

/// Main book configuration from textbook.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextbookConfig {
    /// Default output directory, relative to the book root
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Book metadata (title, cover text, authors)
    pub book: BookInfo,

    /// Rendering options
    #[serde(default)]
    pub render: RenderOptions,

    /// Chapters written inline, before any files in `chapters/`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub chapters: Vec<Chapter>,
}

/// Options shared by all renderers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Number the lines of code listings
    pub line_numbers: bool,

    /// Add a copy-to-clipboard button to code listings (HTML only)
    pub copy_button: bool,

    /// Reading speed used to estimate chapter reading time
    pub words_per_minute: u32,

    /// Inline local images as data URLs (HTML only)
    pub embed_images: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            line_numbers: true,
            copy_button: true,
            words_per_minute: 200,
            embed_images: false,
        }
    }
}

fn default_output() -> PathBuf {
    PathBuf::from("book")
}

impl TextbookConfig {
    /// Load configuration from a textbook.toml file
    ///
    /// # Parameters
    /// * `path` - Path to the textbook.toml configuration file
    ///
    /// # Returns
    /// * `Ok(TextbookConfig)` - Successfully loaded configuration
    /// * `Err(ConfigError)` - Error reading or parsing the configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(&path)?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Save configuration to a textbook.toml file
    ///
    /// # Parameters
    /// * `path` - Path where the textbook.toml file will be written
    ///
    /// # Returns
    /// * `Ok(())` - Successfully saved configuration
    /// * `Err(ConfigError)` - Error serializing or writing the configuration file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }
}

/// Errors that can occur when loading or saving book configuration
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum ConfigError {
    /// IO error when reading or writing file
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing TOML
    #[error("TOML parse error: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Error serializing to TOML
    #[error("TOML serialize error: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content_model::{ContentBlock, Feature, Section};

    #[test]
    fn test_config_roundtrip() {
        let config = TextbookConfig {
            output: PathBuf::from("site"),
            book: BookInfo {
                title: "Physical AI & Humanoid Robotics".to_string(),
                subtitle: Some("A Comprehensive Textbook".to_string()),
                edition: Some("First Edition".to_string()),
                authors: vec!["Panaversity".to_string()],
                features: vec![Feature {
                    label: "ROS 2".to_string(),
                    description: "Robot Operating System".to_string(),
                }],
                ..BookInfo::default()
            },
            render: RenderOptions {
                words_per_minute: 180,
                ..RenderOptions::default()
            },
            chapters: vec![Chapter {
                id: "introduction".to_string(),
                number: 1,
                title: "Introduction".to_string(),
                subtitle: None,
                read_time: None,
                sections: vec![Section {
                    id: "overview".to_string(),
                    content: vec![ContentBlock::Paragraph {
                        text: "Hello".to_string(),
                    }],
                }],
            }],
        };

        // Serialize to TOML
        let toml_str = toml::to_string_pretty(&config).unwrap();
        println!("Generated TOML:\n{}", toml_str);

        // Deserialize back
        let parsed: TextbookConfig = toml::from_str(&toml_str).unwrap();

        assert_eq!(parsed.book, config.book);
        assert_eq!(parsed.render.words_per_minute, 180);
        assert_eq!(parsed.output, PathBuf::from("site"));
        assert_eq!(parsed.chapters, config.chapters);
    }

    #[test]
    fn test_parse_minimal_toml_uses_defaults() {
        let config = TextbookConfig::parse(
            r#"
[book]
title = "Minimal"
"#,
        )
        .unwrap();

        assert_eq!(config.book.title, "Minimal");
        assert_eq!(config.render, RenderOptions::default());
        assert_eq!(config.output, PathBuf::from("book"));
        assert!(config.chapters.is_empty());
    }

    #[test]
    fn test_parse_partial_render_options() {
        let config = TextbookConfig::parse(
            r#"
output = "public"

[book]
title = "Partial"
authors = ["A", "B"]

[render]
line_numbers = false
"#,
        )
        .unwrap();

        assert!(!config.render.line_numbers);
        assert!(config.render.copy_button);
        assert_eq!(config.render.words_per_minute, 200);
        assert_eq!(config.book.authors, vec!["A", "B"]);
        assert_eq!(config.output, PathBuf::from("public"));
    }

    #[test]
    fn test_missing_book_table_is_an_error() {
        let err = TextbookConfig::parse("output = \"x\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);

        let mut config = TextbookConfig::parse("[book]\ntitle = \"Draft\"\n").unwrap();
        config.book.title = "Final".to_string();
        config.save(&path).unwrap();

        let loaded = TextbookConfig::load(&path).unwrap();
        assert_eq!(loaded.book.title, "Final");
    }
}
