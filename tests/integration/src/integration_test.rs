//! End-to-end flow across the workspace
//!
//! config file -> registry -> load -> mutate -> dump -> reload

use std::fs;

use matter_content::{
    Destination, Format, FormatOptions, Metadata, Parser, Registry, RegistryConfig, Source,
};
use matter_fs::ConfigStore;
use matter_test_utils::{TestDir, fixtures, logging};
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;

/// A site directory with a handler config and a few posts
fn setup_site() -> TempDir {
    let temp = TempDir::new().unwrap();
    let posts = temp.path().join("posts");
    fs::create_dir(&posts).unwrap();

    fs::write(
        temp.path().join("frontmatter.toml"),
        r#"
[[handlers]]
format = "yaml"

[[handlers]]
format = "toml"
start_delimiter = "+++"
end_delimiter = "+++"
"#,
    )
    .unwrap();

    fs::write(posts.join("hello.md"), fixtures::YAML_POST).unwrap();
    fs::write(posts.join("settings.md"), fixtures::TOML_POST).unwrap();
    fs::write(posts.join("notes.md"), fixtures::PLAIN_POST).unwrap();

    temp
}

#[test]
fn test_config_to_registry() {
    let temp = setup_site();

    let config = RegistryConfig::load(&temp.path().join("frontmatter.toml")).unwrap();
    assert_eq!(config.handlers.len(), 2);

    let registry = Registry::from_config(&config).unwrap();
    let formats: Vec<_> = registry.handlers().iter().map(|h| h.format()).collect();
    assert_eq!(formats, vec![Format::Yaml, Format::Toml]);
}

#[test]
fn test_load_mutate_dump_reload() {
    logging::init();
    let temp = setup_site();
    let registry =
        Registry::from_config(&RegistryConfig::load(&temp.path().join("frontmatter.toml")).unwrap())
            .unwrap();
    let parser = Parser::new(&registry);
    let options = FormatOptions::default();

    for name in ["hello.md", "settings.md"] {
        let path = temp.path().join("posts").join(name);
        let mut doc = parser.load(&path, &Metadata::new(), None).unwrap();
        let format = doc.format().unwrap();

        doc.insert("reviewed", true);
        doc.remove("tags").unwrap();
        doc.content.push_str("\n\nAddendum.");
        matter_content::dump(&doc, &path, None, &options).unwrap();

        let reloaded = parser.load(&path, &Metadata::new(), None).unwrap();
        assert_eq!(reloaded, doc, "{name} did not survive a round trip");
        assert_eq!(reloaded.format(), Some(format));
        assert_eq!(reloaded.keys().collect::<Vec<_>>(), vec!["title", "reviewed"]);
    }
}

#[test]
fn test_plain_document_gains_frontmatter() {
    let temp = setup_site();
    let path = temp.path().join("posts/notes.md");
    let registry = Registry::global();
    let parser = Parser::new(registry);

    assert!(!parser.check(&path).unwrap());

    let mut defaults = Metadata::new();
    defaults.insert("layout".into(), json!("note"));
    let doc = parser.load(&path, &defaults, None).unwrap();
    assert_eq!(doc.format(), None);
    assert_eq!(doc.get("layout"), Some(&json!("note")));

    let toml = registry.get(Format::Toml).cloned().unwrap();
    matter_content::dump(&doc, &path, Some(&toml), &FormatOptions::default()).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(predicate::str::starts_with("+++\nlayout = \"note\"\n+++\n\n").eval(text.as_str()));
    assert!(parser.check(&path).unwrap());
}

#[test]
fn test_streams_and_config_store_share_formats() {
    let dir = TestDir::new();
    let path = dir.write("meta.json", r#"{"title": "From JSON", "count": 3}"#);

    // Metadata kept in a side file, merged as defaults
    let defaults: Metadata = ConfigStore::new().load(&path).unwrap();
    let mut input = fixtures::YAML_POST.as_bytes();
    let doc = matter_content::load(Source::reader(&mut input), &defaults, None).unwrap();

    assert_eq!(doc.get("title"), Some(&json!("Hello")));
    assert_eq!(doc.get("count"), Some(&json!(3)));

    let mut out = Vec::new();
    matter_content::dump(&doc, Destination::writer(&mut out), None, &FormatOptions::default())
        .unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("---\n"));
    assert!(text.ends_with("Body text."));
}
