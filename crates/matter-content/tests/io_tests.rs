//! load / dump / check over paths and streams

use std::io::Cursor;

use matter_content::{
    Destination, Error, Format, FormatOptions, Metadata, Registry, Source, check, dump, load,
};
use matter_test_utils::{TestDir, fixtures, logging};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_load_from_path() {
    logging::init();
    let dir = TestDir::new();
    let path = dir.write("post.md", fixtures::YAML_POST);

    let doc = load(&path, &Metadata::new(), None).unwrap();

    assert_eq!(doc.get("title"), Some(&json!("Hello")));
    assert_eq!(doc.content, "Body text.");
    assert_eq!(doc.format(), Some(Format::Yaml));
}

#[test]
fn test_load_from_str_path() {
    let dir = TestDir::new();
    let path = dir.write("post.md", fixtures::TOML_POST);

    let doc = load(path.to_str().unwrap(), &Metadata::new(), None).unwrap();

    assert_eq!(doc.format(), Some(Format::Toml));
}

#[test]
fn test_load_from_reader() {
    let mut reader = Cursor::new(fixtures::TOML_POST);

    let doc = load(Source::reader(&mut reader), &Metadata::new(), None).unwrap();

    assert_eq!(doc.get("tags"), Some(&json!(["a", "b"])));
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = TestDir::new();
    let err = load(&dir.path("missing.md"), &Metadata::new(), None).unwrap_err();
    assert!(err.is_io());
    assert!(matches!(err, Error::Fs(_)));
}

#[test]
fn test_load_invalid_utf8_reader() {
    let mut reader = Cursor::new(vec![b'-', b'-', b'-', 0xff]);
    let err = load(Source::reader(&mut reader), &Metadata::new(), None).unwrap_err();
    assert!(matches!(err, Error::Io(ref e) if e.kind() == std::io::ErrorKind::InvalidData));
}

#[test]
fn test_dump_to_path_and_reload() {
    logging::init();
    let dir = TestDir::new();
    let source = dir.write("in.md", fixtures::TOML_POST);
    let target = dir.path("out/post.md");

    let mut doc = load(&source, &Metadata::new(), None).unwrap();
    doc.insert("draft", true);
    dump(&doc, &target, None, &FormatOptions::default()).unwrap();

    dir.assert_file_contains("out/post.md", "draft = true");
    let reloaded = load(&target, &Metadata::new(), None).unwrap();
    assert_eq!(reloaded, doc);
    assert_eq!(reloaded.format(), Some(Format::Toml));
}

#[test]
fn test_dump_to_writer() {
    let doc = matter_content::loads(fixtures::YAML_POST, &Metadata::new(), None);
    let mut out = Vec::new();

    dump(&doc, Destination::writer(&mut out), None, &FormatOptions::default()).unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "---\ntitle: Hello\ntags:\n- a\n- b\n---\n\nBody text."
    );
}

#[test]
fn test_dump_failure_leaves_destination_untouched() {
    let dir = TestDir::new();
    let mut doc = matter_content::loads(fixtures::TOML_POST, &Metadata::new(), None);
    doc.insert("nothing", serde_json::Value::Null);

    let err = dump(&doc, &dir.path("post.md"), None, &FormatOptions::default()).unwrap_err();

    assert!(matches!(err, Error::Format { .. }));
    dir.assert_file_not_exists("post.md");
}

#[test]
fn test_dump_explicit_toml_handler() {
    let dir = TestDir::new();
    let doc = matter_content::loads(fixtures::YAML_POST, &Metadata::new(), None);
    let toml = Registry::global().get(Format::Toml).cloned().unwrap();

    dump(&doc, &dir.path("post.md"), Some(&toml), &FormatOptions::default()).unwrap();

    dir.assert_file_contains("post.md", "+++\ntitle = \"Hello\"");
}

#[test]
fn test_check() {
    let dir = TestDir::new();
    let with = dir.write("with.md", fixtures::YAML_POST);
    let without = dir.write("without.md", fixtures::PLAIN_POST);

    assert!(check(&with).unwrap());
    assert!(!check(&without).unwrap());
    assert!(check(Source::reader(&mut Cursor::new(fixtures::TOML_POST))).unwrap());
    assert!(check(&dir.path("missing.md")).unwrap_err().is_io());
}
