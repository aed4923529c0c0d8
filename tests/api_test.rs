use jtree_core::api::{load, load_file};
use jtree_core::value::ValueKind;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("ok")
        .join(name)
}

#[test]
fn test_simple_load_to_json() {
    let source = br#"
        {
            "name": "My App",
            "version": 1.0,
            "is_enabled": true,
            "features": ["a", "b", "c"],
            "config": {
                "host": "localhost",
                "port": 8080
            }
        }
    "#;

    let expected_json = serde_json::json!({
        "name": "My App",
        "version": 1.0,
        "is_enabled": true,
        "features": ["a", "b", "c"],
        "config": {
            "host": "localhost",
            "port": 8080,
        }
    });

    let tree = load(source, "test.json").unwrap();
    let result = tree.to_json().unwrap();
    let result_json: serde_json::Value = serde_json::from_str(&result).unwrap();

    assert_eq!(result_json, expected_json);
}

#[test]
fn test_simple_load_to_yaml() {
    let source = br#"{"name": "My App", "version": 1.5, "is_enabled": true}"#;

    // Document order is kept, not sorted.
    let expected_yaml = "name: My App\nversion: 1.5\nis_enabled: true\n";

    let tree = load(source, "test.json").unwrap();
    assert_eq!(tree.to_yaml().unwrap(), expected_yaml);
}

#[test]
fn test_child_text_round_trips_canonical_values() {
    let source = br#"{"s": "plain", "n": 12, "f": 2.5, "b": false, "z": null, "a": [1, "x"], "o": {"k": [true]}}"#;
    let tree = load(source, "test.json").unwrap();
    let root = tree.root();

    let original: serde_json::Value = serde_json::from_slice(source).unwrap();
    for (key, value) in original.as_object().unwrap() {
        let expected = match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        assert_eq!(root.child_text(key), Some(expected.as_str()), "key {key}");
    }
}

#[test]
fn test_primitives_fixture_kinds() {
    let tree = load_file(fixture("primitives.json")).unwrap();
    let root = tree.root();
    let kind = |name: &str| root.find_one(name).unwrap().kind();

    assert_eq!(kind("string"), ValueKind::String);
    assert_eq!(kind("integer"), ValueKind::Number);
    assert_eq!(kind("yes"), ValueKind::Bool);
    assert_eq!(kind("nothing"), ValueKind::Null);
    assert_eq!(root.child_text("escaped"), Some("line\nbreak \"quoted\" é"));
    assert_eq!(root.child_text("exponent"), Some("1000.0"));
    assert_eq!(root.child_text("nothing"), Some("null"));
}

#[test]
fn test_collections_fixture_shapes() {
    let tree = load_file(fixture("collections.json")).unwrap();
    let root = tree.root();

    let empty_array = root.find_one("empty_array").unwrap();
    assert!(empty_array.is_array());
    assert_eq!(empty_array.children().len(), 0);

    let empty_object = root.find_one("empty_object").unwrap();
    assert!(empty_object.is_object());
    assert_eq!(empty_object.text(), "{}");

    let mixed = root.find_one("mixed").unwrap();
    assert_eq!(
        mixed.array_elements(),
        vec![r#""a""#, "1", "true", "null", r#"{"k":"v"}"#, "[1,2]"]
    );
    let child_texts: Vec<&str> = mixed.children().map(|c| c.text()).collect();
    assert_eq!(child_texts[0], "a");
}

#[test]
fn test_duplicates_fixture() {
    let tree = load_file(fixture("duplicates.json")).unwrap();
    let root = tree.root();

    let values: Vec<&str> = root.find("a").map(|n| n.text()).collect();
    assert_eq!(values, vec!["1", "2", "3"]);

    let b = root.find_one("b").unwrap();
    let xs: Vec<&str> = b.find("x").map(|n| n.text()).collect();
    assert_eq!(xs, vec!["first", "second"]);
    assert_eq!(b.text(), r#"{"x":"first","x":"second"}"#);

    let names: Vec<&str> = root.children().map(|n| n.name()).collect();
    assert_eq!(names, vec!["a", "b", "a", "a"]);
}

#[test]
fn test_iterator_cursor_api() {
    let tree = load(br#"{"k": 1, "k": 2}"#, "test.json").unwrap();
    let mut iter = tree.root().find("k");
    let mut seen = Vec::new();
    while !iter.is_end() {
        seen.push(iter.get().unwrap().text().to_string());
        iter.advance();
    }
    assert_eq!(seen, vec!["1", "2"]);
}
