use std::path::PathBuf;
use textbook::config::TextbookConfig;

fn template_dir(id: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("src/templates")
        .join(id)
}

/// Test that the embedded physical-ai template exists in src/templates
#[test]
fn test_physical_ai_template_exists() {
    let root = template_dir("physical-ai");

    assert!(
        root.join("textbook.toml").exists(),
        "physical-ai template should have a textbook.toml at {:?}",
        root
    );
    assert_eq!(
        std::fs::read_dir(root.join("chapters"))
            .expect("Should be able to list chapter files")
            .count(),
        8,
        "physical-ai template should have eight chapter files"
    );
}

/// Test that every template config file parses as a textbook.toml
#[test]
fn test_template_configs_parse() {
    for id in ["physical-ai", "minimal"] {
        let config_path = template_dir(id).join("textbook.toml");
        let config = TextbookConfig::load(&config_path)
            .unwrap_or_else(|e| panic!("Template {} should parse: {}", id, e));
        assert!(!config.book.title.is_empty());
    }
}

/// Test that the template directories on disk load like a user's book
#[test]
fn test_template_directories_load_as_books() {
    let loaded = textbook::loader::load_book(&template_dir("physical-ai"))
        .expect("physical-ai template should load");
    assert_eq!(loaded.book.len(), 8);

    let loaded =
        textbook::loader::load_book(&template_dir("minimal")).expect("minimal template should load");
    assert_eq!(loaded.book.len(), 2);
}

/// Test that embedded copies match the files on disk
#[test]
fn test_embedded_files_match_disk() {
    for template in textbook::templates::get_all_templates() {
        for (path, content) in &template.files {
            let on_disk = std::fs::read_to_string(template_dir(&template.id).join(path))
                .unwrap_or_else(|e| panic!("{}/{} should exist: {}", template.id, path, e));
            assert_eq!(&on_disk, content, "{}/{} differs", template.id, path);
        }
    }
}
