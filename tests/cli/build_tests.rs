//! Tests for the `build` CLI command

use crate::common::{assert_alias, assert_contains, assert_no_alias, assert_valid_json, TestCorpus};

const OUT: &str = "out/alias2qid.json";

// ============================================================================
// BUILD BASICS
// ============================================================================

#[test]
fn test_build_default_output_file() {
    let corpus = TestCorpus::new();
    corpus.with_people();

    let output = corpus.run_cli_success(&["build", "--data", &corpus.path_str()]);

    assert_contains(&output, "Alias index build complete");
    let index = corpus.read_json("augmented_alias_map_large_uncased.json");
    assert_alias(&index, "jane doe", &["Q1"]);
    assert_alias(&index, "jane", &["Q1"]);
    assert_alias(&index, "doe", &["Q1"]);
    assert_no_alias(&index, "doe run");
}

#[test]
fn test_build_json_report() {
    let corpus = TestCorpus::new();
    corpus.with_people();

    let output = corpus.run_cli_success(&[
        "build",
        "--data",
        &corpus.path_str(),
        "--out-file",
        OUT,
        "-f",
        "json",
    ]);

    let report = assert_valid_json(&output, "build report");
    assert_eq!(report["alias_shards"], 1);
    assert_eq!(report["relation_shards"], 2);
    assert_eq!(report["entities"], 2);
    assert_eq!(report["human_entities"], 1);
    assert_eq!(report["batch_size"], 100000);
    assert!(report["generated_at"].is_string());
    assert!(report["bytes_written"].as_u64().unwrap() > 0);
}

#[test]
fn test_build_toon_report() {
    let corpus = TestCorpus::new();
    corpus.with_people();

    let output = corpus.run_cli_success(&[
        "--format",
        "toon",
        "build",
        "--data",
        &corpus.path_str(),
        "--out-file",
        OUT,
    ]);

    assert_contains(&output, "indexed_aliases");
}

#[test]
fn test_logs_go_to_stderr() {
    let corpus = TestCorpus::new();
    corpus.with_people();

    let output = corpus
        .run_cli(&["build", "--data", &corpus.path_str(), "--out-file", OUT, "-f", "json"])
        .unwrap();

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_contains(&stderr, "Step 9 of 9");
    assert_contains(&stderr, "Found");
    // stdout stays machine readable
    assert_valid_json(&String::from_utf8_lossy(&output.stdout), "stdout");
}

// ============================================================================
// BUILD OPTIONS
// ============================================================================

#[test]
fn test_build_with_qid_filter_object() {
    let corpus = TestCorpus::new();
    corpus
        .with_people()
        .add_file("qids.json", r#"{"Q3": "The Doe Run", "Q99": "unused"}"#);

    corpus.run_cli_success(&[
        "build",
        "--data",
        &corpus.path_str(),
        "--out-file",
        OUT,
        "--qids",
        "qids.json",
    ]);

    let index = corpus.read_json(OUT);
    assert_alias(&index, "the doe run", &["Q3"]);
    assert_no_alias(&index, "jane doe");
    assert_eq!(index.as_object().unwrap().len(), 1);
}

#[test]
fn test_build_keep_case_and_punctuation() {
    let corpus = TestCorpus::new();
    corpus
        .add_aliases("a.jsonl", &[("Q1", "Jane Doe-Smith")])
        .add_relations("r.jsonl", &[("Q1", "P31", "Q5")]);

    corpus.run_cli_success(&[
        "build",
        "--data",
        &corpus.path_str(),
        "--out-file",
        OUT,
        "--not-strip",
        "--not-lower",
    ]);

    let index = corpus.read_json(OUT);
    assert_alias(&index, "Jane Doe-Smith", &["Q1"]);
    assert_alias(&index, "Jane", &["Q1"]);
    assert_alias(&index, "Doe-Smith", &["Q1"]);
    assert_no_alias(&index, "jane doe smith");
}

#[test]
fn test_build_ensure_ascii() {
    let corpus = TestCorpus::new();
    corpus.add_aliases("a.jsonl", &[("Q1", "Zoë")]);

    corpus.run_cli_success(&[
        "build",
        "--data",
        &corpus.path_str(),
        "--out-file",
        OUT,
        "--not-strip",
        "--ensure-ascii",
    ]);

    let raw = corpus.read_to_string(OUT);
    assert!(raw.is_ascii(), "output should be pure ASCII: {}", raw);
    assert_contains(&raw, r"zo\u00eb");
    let index = corpus.read_json(OUT);
    assert_alias(&index, "zoë", &["Q1"]);
}

#[test]
fn test_build_lines_layout() {
    let corpus = TestCorpus::new();
    corpus.with_people();

    corpus.run_cli_success(&[
        "build",
        "--data",
        &corpus.path_str(),
        "--out-file",
        "out/alias2qid.jsonl",
        "--layout",
        "lines",
    ]);

    let raw = corpus.read_to_string("out/alias2qid.jsonl");
    let mut seen = false;
    for line in raw.lines() {
        let record = assert_valid_json(line, "index line");
        assert!(record["qids"].is_array());
        if record["alias"] == "jane doe" {
            assert_eq!(record["qids"][0], "Q1");
            seen = true;
        }
    }
    assert!(seen, "jane doe missing from lines output:\n{}", raw);
}

#[test]
fn test_build_skip_relation_aliases() {
    let corpus = TestCorpus::new();
    corpus
        .add_aliases("a.jsonl", &[("Q7", "Acme")])
        .add_relations("r.jsonl", &[("Q7", "P1449", "Acme Works")]);

    corpus.run_cli_success(&[
        "build",
        "--data",
        &corpus.path_str(),
        "--out-file",
        OUT,
        "--skip-relation-aliases",
    ]);

    let index = corpus.read_json(OUT);
    assert_alias(&index, "acme", &["Q7"]);
    assert_no_alias(&index, "acme works");
}

#[test]
fn test_build_single_worker() {
    let corpus = TestCorpus::new();
    corpus.with_people();

    corpus.run_cli_success(&["-w", "1", "build", "--data", &corpus.path_str(), "--out-file", OUT]);

    assert_alias(&corpus.read_json(OUT), "jane doe", &["Q1"]);
}
