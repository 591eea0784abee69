// tests/path_tests.rs

use xjson::path::resolve;
use xjson::{Decoder, Kind, KeyCharset, Options, QueryError, Value, decode, get};
use yare::parameterized;

const PEOPLE: &str = r#"{
    "name": "bob",
    "age": 10,
    "magic": 10.1,
    "score": {"math": [1, 2]},
    "people": [{"bob": {"age": 10}}, {"alice": {"age": "20"}}],
    "matrix": [[1, 2], [3, 4]],
    "a.b": "dotted",
    "sp ace": true,
    "ключ": "значение",
    "x": null
}"#;

// ============================================================================
// Resolution
// ============================================================================

#[parameterized(
    top_level_string = { "name", "bob" },
    top_level_int = { "age", "10" },
    top_level_float = { "magic", "10.1" },
    nested_index = { "score.math[1]", "2" },
    index_then_keys = { "people[0].bob.age", "10" },
    string_number = { "people[1].alice.age", "20" },
    chained_indices = { "matrix[1][0]", "3" },
    escaped_dot = { r"a\.b", "dotted" },
    escaped_space = { r"sp\ ace", "true" },
    non_ascii_key = { "ключ", "значение" },
    null = { "x", "" },
    container = { "score", r#"{"math":[1,2]}"# },
)]
fn test_get(path: &str, expected: &str) {
    assert_eq!(get(PEOPLE, path).string(), expected);
}

#[test]
fn test_get_kinds() {
    let test_cases = vec![
        ("name", Kind::String),
        ("age", Kind::Integer),
        ("magic", Kind::Float),
        ("sp\\ ace", Kind::Bool),
        ("x", Kind::Null),
        ("score", Kind::Object),
        ("score.math", Kind::Array),
        ("missing", Kind::Empty),
    ];

    for (path, kind) in test_cases {
        assert_eq!(get(PEOPLE, path).kind(), kind, "Failed for path: {}", path);
    }
}

#[parameterized(
    missing_key = { "nobody" },
    index_out_of_range = { "score.math[2]" },
    key_on_array = { "score.math.first" },
    index_on_object = { "score[0]" },
    key_on_scalar = { "age.value" },
    dangling_dot = { "score." },
    leading_dot = { ".age" },
    double_dot = { "score..math" },
    bare_index = { "[0]" },
    empty_path = { "" },
    letter_in_index = { "l[10.a" },
    unescaped_dot_key = { "a.b" },
)]
fn test_unresolvable_paths_are_empty(path: &str) {
    let result = get(PEOPLE, path);
    assert!(!result.exists(), "resolved: {}", path);
    assert_eq!(result.kind(), Kind::Empty);
    assert_eq!(result.string(), "");
    assert_eq!(result.int(), 0);
}

#[test]
fn test_invalid_json_is_empty() {
    assert!(!get(r#"{"name":[}"#, "name").exists());
    assert!(!get("", "name").exists());
}

#[test]
fn test_array_root_has_no_keys() {
    assert!(!get("[1,2]", "x").exists());
}

// ============================================================================
// Failure reasons
// ============================================================================

#[test]
fn test_lookup_errors() {
    let doc = decode(PEOPLE).unwrap();

    assert_eq!(
        doc.lookup("nobody"),
        Err(QueryError::MissingKey("nobody".to_string()))
    );
    assert_eq!(
        doc.lookup("score.math[2]"),
        Err(QueryError::IndexOutOfRange {
            index: "2".to_string(),
            len: 2
        })
    );
    assert_eq!(
        doc.lookup("score[0]"),
        Err(QueryError::NotAnArray("0".to_string()))
    );
    assert!(matches!(doc.lookup("l[10.a"), Err(QueryError::Path(_))));
    assert!(matches!(doc.lookup("score."), Err(QueryError::Syntax(_))));
}

#[test]
fn test_resolve_borrows_from_tree() {
    let doc = decode(PEOPLE).unwrap();
    let math = resolve(&doc, "score.math", KeyCharset::default()).unwrap();
    assert_eq!(math, &Value::Array(vec![Value::Integer(1), Value::Integer(2)]));
}

#[test]
fn test_legacy_charset() {
    let json = r#"{"a^b":1}"#;
    assert!(!get(json, "a^b").exists());

    let options = Options {
        key_charset: KeyCharset::Legacy,
        ..Options::default()
    };
    assert_eq!(Decoder::with_options(options).get(json, "a^b").int(), 1);
}
