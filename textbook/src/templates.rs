//! Embedded starter books
//!
//! Every template is a complete book directory compiled into the binary, so
//! `textbook init` works offline and the starter content is always valid.

use crate::config::{TextbookConfig, CONFIG_FILE};
use crate::content_model::Book;
use crate::loader::{self, LoadError};
use std::collections::HashMap;
use std::path::Path;

/// Template metadata for display and lookup
#[derive(Debug, Clone)]
pub struct TemplateInfo {
    /// Template identifier (e.g., "physical-ai")
    pub id: String,
    /// Other names accepted by `init`
    pub aliases: Vec<String>,
    /// One-line summary for `list-templates`
    pub description: String,
    /// Files to write, relative to the book root (path, content)
    pub files: Vec<(&'static str, &'static str)>,
}

impl TemplateInfo {
    /// Content of the template's textbook.toml
    pub fn config_source(&self) -> Option<&'static str> {
        self.files
            .iter()
            .find(|(path, _)| *path == CONFIG_FILE)
            .map(|(_, content)| *content)
    }

    /// Chapter files in reading order
    fn chapter_sources(&self) -> Vec<(&'static str, &'static str)> {
        let mut chapters: Vec<_> = self
            .files
            .iter()
            .filter(|(path, _)| Path::new(path).starts_with(loader::CHAPTERS_DIR))
            .copied()
            .collect();
        chapters.sort_by_key(|(path, _)| *path);
        chapters
    }
}

/// Get all available templates
///
/// # Returns
/// * `Vec<TemplateInfo>` - Vector of all built-in template definitions
pub fn get_all_templates() -> Vec<TemplateInfo> {
    vec![
        TemplateInfo {
            id: "physical-ai".to_string(),
            aliases: vec!["robotics".to_string(), "default".to_string()],
            description: "Physical AI & Humanoid Robotics, an eight-chapter course textbook"
                .to_string(),
            files: vec![
                (CONFIG_FILE, include_str!("templates/physical-ai/textbook.toml")),
                (
                    "chapters/01_introduction.toml",
                    include_str!("templates/physical-ai/chapters/01_introduction.toml"),
                ),
                (
                    "chapters/02_module-1.toml",
                    include_str!("templates/physical-ai/chapters/02_module-1.toml"),
                ),
                (
                    "chapters/03_module-2.toml",
                    include_str!("templates/physical-ai/chapters/03_module-2.toml"),
                ),
                (
                    "chapters/04_module-3.toml",
                    include_str!("templates/physical-ai/chapters/04_module-3.toml"),
                ),
                (
                    "chapters/05_module-4.toml",
                    include_str!("templates/physical-ai/chapters/05_module-4.toml"),
                ),
                (
                    "chapters/06_humanoid-development.toml",
                    include_str!("templates/physical-ai/chapters/06_humanoid-development.toml"),
                ),
                (
                    "chapters/07_hardware.toml",
                    include_str!("templates/physical-ai/chapters/07_hardware.toml"),
                ),
                (
                    "chapters/08_assessments.toml",
                    include_str!("templates/physical-ai/chapters/08_assessments.toml"),
                ),
            ],
        },
        TemplateInfo {
            id: "minimal".to_string(),
            aliases: vec!["blank".to_string()],
            description: "Two short chapters written inline in textbook.toml".to_string(),
            files: vec![(CONFIG_FILE, include_str!("templates/minimal/textbook.toml"))],
        },
    ]
}

/// Get a template by ID or alias
///
/// # Parameters
/// * `id` - Template identifier or alias, case-insensitive
///
/// # Returns
/// * `Some(TemplateInfo)` - Template information if found
/// * `None` - No template found matching the given identifier
pub fn get_template(id: &str) -> Option<TemplateInfo> {
    let mut lookup: HashMap<String, TemplateInfo> = HashMap::new();

    for template in get_all_templates() {
        lookup.insert(template.id.clone(), template.clone());
        for alias in &template.aliases {
            lookup.insert(alias.clone(), template.clone());
        }
    }

    lookup.get(&id.to_lowercase()).cloned()
}

/// Parse a template's configuration
///
/// # Parameters
/// * `template_info` - Template information containing the TOML sources
///
/// # Returns
/// * `Ok(TextbookConfig)` - Successfully parsed template configuration
/// * `Err(LoadError)` - The template has no textbook.toml or it does not parse
pub fn parse_template(template_info: &TemplateInfo) -> Result<TextbookConfig, LoadError> {
    let content = template_info.config_source().unwrap_or_default();
    TextbookConfig::parse(content).map_err(|e| LoadError::Config {
        path: CONFIG_FILE.into(),
        source: Box::new(e),
    })
}

/// Build the validated book a template would produce
///
/// # Returns
/// * `Ok(Book)` - The starter book
/// * `Err(LoadError)` - A template file does not parse or the book fails validation
pub fn load_template_book(template_info: &TemplateInfo) -> Result<Book, LoadError> {
    let config = parse_template(template_info)?;
    loader::assemble(&config, &template_info.chapter_sources())
}
