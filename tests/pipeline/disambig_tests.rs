//! Disambiguation pipeline tests

use alias_index::{DisambigConfig, DisambigPipeline};

use crate::common::TestCorpus;

#[test]
fn test_marker_entities_extracted() {
    let corpus = TestCorpus::new();
    corpus.with_people();

    let config = DisambigConfig::new(corpus.path());
    let (qids, shards) = DisambigPipeline::new(&config).extract().unwrap();

    assert_eq!(shards, 2);
    assert_eq!(qids, vec!["Q2", "Q4"]);
}

#[test]
fn test_entity_with_marker_and_other_type_included() {
    let corpus = TestCorpus::new();
    corpus.add_relations(
        "r.jsonl",
        &[
            ("Q9", "P31", "Q5"),
            ("Q9", "P31", "Q4167410"),
            ("Q10", "P279", "Q4167410"),
        ],
    );

    let config = DisambigConfig::new(corpus.path());
    let (qids, _) = DisambigPipeline::new(&config).extract().unwrap();

    // only instance-of counts, so the subclass triple is ignored
    assert_eq!(qids, vec!["Q9"]);
}

#[test]
fn test_run_writes_artifact_under_data_dir() {
    let corpus = TestCorpus::new();
    corpus.with_people();

    let mut config = DisambigConfig::new(corpus.path());
    config.out_dir = "disambig_out".into();
    let report = DisambigPipeline::new(&config).run().unwrap();

    assert_eq!(report.qids_written, 2);
    assert_eq!(
        corpus.read_to_string("disambig_out/disambig_qids.json"),
        "[\"Q2\",\"Q4\"]\n"
    );
}
