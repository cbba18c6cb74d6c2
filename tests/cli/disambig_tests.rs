//! Tests for the `disambig` CLI command

use crate::common::{assert_contains, assert_valid_json, TestCorpus};

#[test]
fn test_disambig_writes_sorted_array() {
    let corpus = TestCorpus::new();
    corpus.with_people();

    let output = corpus.run_cli_success(&["disambig", "--data", &corpus.path_str()]);

    assert_contains(&output, "Disambiguation extraction complete");
    assert_eq!(
        corpus.read_to_string("disambig_qids/disambig_qids.json"),
        "[\"Q2\",\"Q4\"]\n"
    );
}

#[test]
fn test_disambig_json_report() {
    let corpus = TestCorpus::new();
    corpus.with_people();

    let output = corpus.run_cli_success(&[
        "disambig",
        "--data",
        &corpus.path_str(),
        "--out-dir",
        "dis",
        "--format",
        "json",
    ]);

    let report = assert_valid_json(&output, "disambig report");
    assert_eq!(report["qids_written"], 2);
    assert_eq!(report["shards"], 2);
    assert!(report["out_file"]
        .as_str()
        .unwrap()
        .ends_with("disambig_qids.json"));
}

#[test]
fn test_disambig_human_is_not_a_disambiguation_page() {
    let corpus = TestCorpus::new();
    corpus.add_relations("r.jsonl", &[("Q1", "P31", "Q5")]);

    corpus.run_cli_success(&["disambig", "--data", &corpus.path_str()]);

    assert_eq!(
        corpus.read_to_string("disambig_qids/disambig_qids.json"),
        "[]\n"
    );
}

#[test]
fn test_disambig_does_not_need_alias_shards() {
    let corpus = TestCorpus::new();
    corpus
        .with_people()
        .remove_dir(crate::common::ShardKind::Aliases)
        .remove_dir(crate::common::ShardKind::Values);

    corpus.run_cli_success(&["disambig", "--data", &corpus.path_str()]);
}
