//! Extraction module tests
//!
//! These tests verify h1/title/description extraction over well-formed,
//! malformed and partial markup in the encodings sites declare.

use sitecheck::check::ErrorLog;
use sitecheck::extraction::{Field, FieldOutcome, FieldQuery, PageDocument, SeoExtractor, SeoFields};

fn extract(html: &str) -> (SeoFields, ErrorLog) {
    let mut log = ErrorLog::new();
    let fields =
        SeoExtractor::new().extract(html.as_bytes(), Some("text/html; charset=utf-8"), &mut log);
    (fields, log)
}

#[test]
fn test_full_document() {
    let (fields, log) = extract(
        r#"<!DOCTYPE html>
        <html>
        <head>
            <title>  Example Domain </title>
            <meta name="description" content="  A test page.  ">
        </head>
        <body><h1>
            Hello
        </h1></body>
        </html>"#,
    );

    assert_eq!(fields.h1.as_deref(), Some("Hello"));
    assert_eq!(fields.title.as_deref(), Some("Example Domain"));
    assert_eq!(fields.description.as_deref(), Some("A test page."));
    assert!(log.is_empty());
}

#[test]
fn test_missing_h1_is_absent_not_empty() {
    let doc = PageDocument::parse(b"<html><head><title>No heading</title></head></html>", None);
    assert_eq!(SeoExtractor::new().extract_h1(&doc), FieldOutcome::Absent);
}

#[test]
fn test_empty_document() {
    let (fields, log) = extract("");
    assert!(fields.is_empty());
    assert!(log.is_empty());
}

#[test]
fn test_binary_garbage_does_not_fail() {
    let mut log = ErrorLog::new();
    let bytes: Vec<u8> = (0u8..=255).cycle().take(4096).collect();
    let fields = SeoExtractor::new().extract(&bytes, None, &mut log);
    assert!(fields.description.is_none());
    assert!(log.is_empty());
}

#[test]
fn test_malformed_markup() {
    let (fields, log) = extract(
        "<html><head><title>Unclosed title<body><h1>Heading <span>with <i>nesting</h1><p>para",
    );
    // an unclosed <title> swallows the rest of the document as raw text
    assert!(fields.title.as_deref().unwrap().starts_with("Unclosed title"));
    assert!(log.is_empty());
}

#[test]
fn test_nested_h1_text_is_concatenated() {
    let (fields, _) = extract("<h1>Hello <em>brave</em> <a href='#'>world</a></h1>");
    assert_eq!(fields.h1.as_deref(), Some("Hello brave world"));
}

#[test]
fn test_first_description_wins_and_other_meta_ignored() {
    let (fields, _) = extract(
        r#"<meta name="keywords" content="a,b">
           <meta property="og:description" content="og">
           <meta name="description" content="first">
           <meta name="description" content="second">"#,
    );
    assert_eq!(fields.description.as_deref(), Some("first"));
}

#[test]
fn test_description_in_body_still_found() {
    let (fields, _) = extract(r#"<body><meta name="description" content="late"></body>"#);
    assert_eq!(fields.description.as_deref(), Some("late"));
}

#[test]
fn test_whitespace_only_values_are_absent() {
    let (fields, _) = extract(r#"<title>   </title><meta name="description" content="   ">"#);
    assert!(fields.title.is_none());
    assert!(fields.description.is_none());
}

#[test]
fn test_broken_query_logs_only_its_field() {
    let extractor = SeoExtractor::new()
        .with_query(FieldQuery::attr(Field::Description, "meta[name=", "content"));
    let mut log = ErrorLog::new();
    let fields = extractor.extract(
        br#"<title>T</title><h1>H</h1><meta name="description" content="D">"#,
        None,
        &mut log,
    );

    assert_eq!(fields.h1.as_deref(), Some("H"));
    assert_eq!(fields.title.as_deref(), Some("T"));
    assert!(fields.description.is_none());
    assert_eq!(log.len(), 1);
    assert!(log.entries()[0].contains("description"));
}

#[test]
fn test_extraction_does_not_truncate() {
    let (fields, _) = extract(&format!("<title>{}</title>", "t".repeat(1000)));
    assert_eq!(fields.title.map(|t| t.len()), Some(1000));
}

#[test]
fn test_header_charset_is_honoured() {
    let (body, _, _) = encoding_rs::KOI8_R.encode("<title>Заголовок</title><h1>Текст</h1>");
    let mut log = ErrorLog::new();
    let fields = SeoExtractor::new().extract(&body, Some("text/html; charset=KOI8-R"), &mut log);

    assert_eq!(fields.title.as_deref(), Some("Заголовок"));
    assert_eq!(fields.h1.as_deref(), Some("Текст"));
    assert!(log.is_empty());
}

#[test]
fn test_http_equiv_charset_is_honoured() {
    let (body, _, _) = encoding_rs::WINDOWS_1252.encode(
        r#"<meta http-equiv="Content-Type" content="text/html; charset=windows-1252"><title>Café crème</title>"#,
    );
    let mut log = ErrorLog::new();
    let fields = SeoExtractor::new().extract(&body, None, &mut log);
    assert_eq!(fields.title.as_deref(), Some("Café crème"));
}
