//! Integration tests for parsing CMS payloads from files, bytes and readers.

use std::io::Write;

use lexrender::detect::{detect_shape_from_path, DEFAULT_FIELD};
use lexrender::render::to_html;
use lexrender::{
    parse_bytes, parse_file, parse_file_with_options, DocumentParser, Error, InputShape,
    Lexrender, ParseOptions,
};
use serde_json::{json, Value};
use tempfile::NamedTempFile;

fn editor_state(text: &str) -> Value {
    json!({
        "root": {
            "type": "root",
            "children": [{
                "type": "paragraph",
                "children": [{ "type": "text", "text": text, "format": 0 }]
            }],
            "direction": "ltr",
            "format": "",
            "indent": 0,
            "version": 1
        }
    })
}

fn write_json(value: &Value) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(value.to_string().as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn collection() -> Value {
    json!({
        "docs": [
            { "id": 1, "slug": "first", "title": "First", "content": editor_state("one") },
            { "id": "b2", "slug": "second", "content": null },
            { "id": 3, "slug": "third", "title": "Third", "content": editor_state("three") }
        ],
        "totalDocs": 3,
        "limit": 100,
        "page": 1
    })
}

#[test]
fn test_parse_file_editor_state() {
    let file = write_json(&editor_state("Hello"));
    let doc = parse_file(file.path()).unwrap();
    assert_eq!(to_html(&doc), "<p>Hello</p>");
}

#[test]
fn test_parse_file_entry() {
    let file = write_json(&json!({ "id": 9, "title": "Post", "content": editor_state("body") }));
    let doc = parse_file(file.path()).unwrap();
    assert_eq!(to_html(&doc), "<p>body</p>");
}

#[test]
fn test_parse_file_missing() {
    let result = parse_file("/nonexistent/post.json");
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_detect_shape_from_path() {
    let file = write_json(&collection());
    let shape = detect_shape_from_path(file.path(), DEFAULT_FIELD).unwrap();
    assert_eq!(shape, InputShape::Collection { count: 3 });
}

#[test]
fn test_collection_entries_in_order() {
    let file = write_json(&collection());
    let parser = DocumentParser::open(file.path()).unwrap();
    let entries = parser.parse_entries().unwrap();

    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].id.as_deref(), Some("1"));
    assert_eq!(entries[0].slug.as_deref(), Some("first"));
    assert_eq!(entries[1].id.as_deref(), Some("b2"));
    assert!(entries[1].document.is_empty());
    assert_eq!(entries[2].title.as_deref(), Some("Third"));

    let html: Vec<String> = parser.parse_all().unwrap().iter().map(to_html).collect();
    assert_eq!(html, vec!["<p>one</p>", "", "<p>three</p>"]);
}

#[test]
fn test_collection_first_document() {
    let doc = parse_bytes(collection().to_string().as_bytes()).unwrap();
    assert_eq!(to_html(&doc), "<p>one</p>");
}

#[test]
fn test_collection_missing_field_strict_and_lenient() {
    let value = json!({
        "docs": [
            { "id": 1, "content": editor_state("kept") },
            { "id": 2, "title": "No content" }
        ]
    });
    let file = write_json(&value);

    let err = DocumentParser::open(file.path())
        .unwrap()
        .parse_all()
        .unwrap_err();
    assert!(matches!(err, Error::MissingField { index: 1, ref field } if field == "content"));

    let docs = DocumentParser::open_with_options(file.path(), ParseOptions::new().lenient())
        .unwrap()
        .parse_all()
        .unwrap();
    assert_eq!(docs.len(), 1);
}

#[test]
fn test_custom_field_from_file() {
    let file = write_json(&json!({ "docs": [{ "body": editor_state("custom") }] }));
    let doc =
        parse_file_with_options(file.path(), ParseOptions::new().with_field("body")).unwrap();
    assert_eq!(to_html(&doc), "<p>custom</p>");
}

#[test]
fn test_unknown_shapes() {
    for input in [json!([]), json!("text"), json!({ "data": {} })] {
        let result = parse_bytes(input.to_string().as_bytes());
        assert!(
            matches!(result, Err(Error::UnknownShape(_))),
            "input {}",
            input
        );
    }
}

#[test]
fn test_invalid_json_bytes() {
    assert!(matches!(parse_bytes(b"{\"root\": "), Err(Error::Json(_))));
}

#[test]
fn test_builder_parse_file() {
    let file = write_json(&json!({ "docs": [{ "id": 1 }, { "content": editor_state("Hi there friend") }] }));
    let result = Lexrender::new().lenient().parse(file.path()).unwrap();

    assert_eq!(result.to_html(), "<p>Hi there friend</p>");
    assert_eq!(result.excerpt(9), "Hi there…");
}

#[test]
fn test_json_round_trip_from_file() {
    let file = write_json(&editor_state("round"));
    let doc = parse_file(file.path()).unwrap();
    let json = lexrender::to_json(file.path(), lexrender::JsonFormat::Compact).unwrap();
    assert_eq!(lexrender::parse_str(&json).unwrap(), doc);
}
