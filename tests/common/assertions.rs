//! Custom assertions for integration tests

use serde_json::Value;

/// Assert that output is valid JSON and return parsed value
pub fn assert_valid_json(output: &str, context: &str) -> Value {
    serde_json::from_str(output).unwrap_or_else(|e| {
        panic!(
            "Expected valid JSON ({}): {}\nOutput:\n{}",
            context, e, output
        )
    })
}

/// Assert that output contains a substring
pub fn assert_contains(output: &str, needle: &str) {
    assert!(
        output.contains(needle),
        "Expected output to contain '{}'\nOutput:\n{}",
        needle,
        output
    );
}

/// Assert that `alias` maps to exactly `qids` in a document-layout index
pub fn assert_alias(index: &Value, alias: &str, qids: &[&str]) {
    let actual: Vec<&str> = index[alias]
        .as_array()
        .unwrap_or_else(|| panic!("alias '{}' missing from index: {}", alias, index))
        .iter()
        .filter_map(|v| v.as_str())
        .collect();
    assert_eq!(actual, qids, "entities for alias '{}'", alias);
}

/// Assert that `alias` is not a key of a document-layout index
pub fn assert_no_alias(index: &Value, alias: &str) {
    assert!(
        index.get(alias).is_none(),
        "alias '{}' should not be indexed: {}",
        alias,
        index
    );
}
