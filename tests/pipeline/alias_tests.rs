//! Alias pipeline tests

use std::collections::BTreeSet;

use ahash::AHashSet;
use alias_index::augment::AliasAugmenter;
use alias_index::merge::merge_aliases;
use alias_index::schema::PartialAliases;
use alias_index::{AliasPipeline, BuildConfig, NormalizeOptions, QidFilter, RuleNameParser};

use crate::common::TestCorpus;

fn config_for(corpus: &TestCorpus) -> BuildConfig {
    BuildConfig::new(corpus.path(), corpus.join("out/alias2qid.json"))
}

// ============================================================================
// AUGMENTATION
// ============================================================================

#[test]
fn test_jane_doe_with_custom_stopwords() {
    let mut partial = PartialAliases::new();
    partial.push("Q1", "Jane Doe".to_string());
    let mut aliases = merge_aliases([&partial], NormalizeOptions::default()).aliases;

    let stopwords: AHashSet<String> = ["the", "of"].iter().map(|w| w.to_string()).collect();
    let humans: AHashSet<String> = ["Q1".to_string()].into_iter().collect();
    AliasAugmenter::new(RuleNameParser, &stopwords).augment(&mut aliases, &humans);

    let got: BTreeSet<&str> = aliases["Q1"].iter().map(String::as_str).collect();
    assert_eq!(got, BTreeSet::from(["jane doe", "jane", "doe"]));
}

#[test]
fn test_jane_doe_index_entries() {
    let corpus = TestCorpus::new();
    corpus.with_people();

    let (index, stats) = AliasPipeline::new(&config_for(&corpus))
        .build_index(&QidFilter::allow_all())
        .unwrap();

    assert_eq!(index["jane doe"], vec!["Q1"]);
    assert_eq!(index["jane"], vec!["Q1"]);
    assert_eq!(index["doe"], vec!["Q1"]);
    assert_eq!(index["the doe run"], vec!["Q3"]);
    assert!(!index.contains_key("doe run"));
    assert_eq!(stats.human_entities, 1);
    assert_eq!(stats.relation_shards, 2);
}

// ============================================================================
// INVERSION PROPERTIES
// ============================================================================

#[test]
fn test_index_membership_matches_alias_sets() {
    let corpus = TestCorpus::new();
    corpus
        .add_aliases(
            "a.jsonl",
            &[("Q1", "Ann Lee"), ("Q2", "Ann Lee"), ("Q2", "Lee Corp")],
        )
        .add_aliases("b.jsonl", &[("Q3", "Ann"), ("Q1", "ann lee")])
        .add_relations("r.jsonl", &[("Q1", "P31", "Q5"), ("Q3", "P31", "Q5")]);

    let (index, _) = AliasPipeline::new(&config_for(&corpus))
        .build_index(&QidFilter::allow_all())
        .unwrap();

    // "ann" comes from Q3's own alias and from Q1's given name
    let mut ann = index["ann"].clone();
    ann.sort();
    assert_eq!(ann, vec!["Q1", "Q3"]);
    // both entities keep the shared alias, each once
    let mut shared = index["ann lee"].clone();
    shared.sort();
    assert_eq!(shared, vec!["Q1", "Q2"]);
    // Q2 is not human, so its aliases are never split
    assert_eq!(index["lee"], vec!["Q1"]);
    assert!(!index.contains_key("corp"));
}

#[test]
fn test_filter_restricts_index() {
    let corpus = TestCorpus::new();
    corpus.with_people();

    let filter = QidFilter::from_qids(["Q3"]);
    let (index, stats) = AliasPipeline::new(&config_for(&corpus))
        .build_index(&filter)
        .unwrap();

    assert_eq!(index.len(), 1);
    assert_eq!(index["the doe run"], vec!["Q3"]);
    assert_eq!(stats.filter_qids, 1);
}

#[test]
fn test_output_identical_across_worker_counts() {
    let corpus = TestCorpus::new();
    for shard in 0..6 {
        let rows: Vec<(String, String)> = (0..20)
            .map(|i| (format!("Q{}", shard * 100 + i), format!("Name{} Family{}", i, shard)))
            .collect();
        let rows: Vec<(&str, &str)> = rows.iter().map(|(q, a)| (q.as_str(), a.as_str())).collect();
        corpus.add_aliases(&format!("part-{:05}.jsonl", shard), &rows);
    }
    corpus.add_relations("r.jsonl", &[("Q3", "P31", "Q5"), ("Q205", "P31", "Q5")]);

    let mut outputs = Vec::new();
    for workers in [1, 4] {
        let mut config = config_for(&corpus);
        config.workers = workers;
        config.out_file = corpus.join(&format!("out/workers-{}.json", workers));
        AliasPipeline::new(&config).run().unwrap();
        outputs.push(std::fs::read(&config.out_file).unwrap());
    }
    assert_eq!(outputs[0], outputs[1]);
}

#[test]
fn test_skip_relation_aliases() {
    let corpus = TestCorpus::new();
    corpus
        .add_aliases("a.jsonl", &[("Q7", "Acme")])
        .add_relations("r.jsonl", &[("Q7", "P1449", "Acme Works")]);

    let mut config = config_for(&corpus);
    let (with_rels, _) = AliasPipeline::new(&config)
        .build_index(&QidFilter::allow_all())
        .unwrap();
    assert_eq!(with_rels["acme works"], vec!["Q7"]);

    config.relation_aliases = false;
    let (without_rels, _) = AliasPipeline::new(&config)
        .build_index(&QidFilter::allow_all())
        .unwrap();
    assert!(!without_rels.contains_key("acme works"));
    assert_eq!(without_rels["acme"], vec!["Q7"]);
}
