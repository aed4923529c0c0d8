// API error path tests
// These test error handling, conversions, and edge cases in the API layer

use jtree_core::policy::Policy;
use jtree_core::{decode_file, decode_str, load, load_file, JtreeError};
use std::io::Write;

#[test]
fn test_api_load_parse_error() {
    let result = load(b"{ invalid syntax", "test.json");
    assert!(result.is_err());
    if let Err(JtreeError::Parse(_)) = result {
        // Success
    } else {
        panic!("Expected parse error");
    }
}

#[test]
fn test_api_decode_error() {
    let result = decode_str::<Vec<u32>>(r#"["1", "x"]"#);
    if let Err(JtreeError::Decode(err)) = result {
        assert!(err.to_string().contains("`x`"));
    } else {
        panic!("Expected decode error");
    }
}

#[test]
fn test_api_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("does-not-exist.json");
    match load_file(&path) {
        Err(JtreeError::Io { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("Expected io error, got {:?}", other.map(|t| t.len())),
    }
}

#[test]
fn test_api_load_file_from_tempfile() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"Version": "2012-10-17", "Statement": []}}"#).unwrap();

    let policy: Policy = decode_file(file.path()).unwrap();
    assert_eq!(policy.version, "2012-10-17");
    assert!(policy.statement.is_empty());
}

#[test]
fn test_api_broken_file_names_source() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, "{{\n  \"a\": [1, 2\n}}").unwrap();

    let err = load_file(file.path()).unwrap_err();
    let JtreeError::Parse(parse_err) = &err else {
        panic!("Expected parse error");
    };
    assert_eq!(parse_err.position().0, 3);
    let rendered = format!("{:?}", miette::Report::new(err));
    let file_name = file.path().file_name().unwrap().to_string_lossy().to_string();
    assert!(rendered.contains(&file_name));
}

#[test]
fn test_api_empty_input() {
    assert!(matches!(load(b"", "empty.json"), Err(JtreeError::Parse(_))));
    assert!(matches!(load(b"   \n ", "blank.json"), Err(JtreeError::Parse(_))));
}

#[test]
fn test_api_error_display() {
    if let Err(err) = load(b"{ invalid", "test.json") {
        let error_string = format!("{}", err);
        assert!(!error_string.is_empty());
    } else {
        panic!("Should have errored");
    }
}
