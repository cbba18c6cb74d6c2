//! Disambiguation-page extraction
//!
//! Independent of the alias pipeline: scans the entity-relation shards for
//! instance-of triples whose value is a disambiguation marker, unions the
//! per-shard sets and writes the result as one sorted JSON array.

use std::path::PathBuf;
use std::time::Instant;

use ahash::AHashSet;
use serde::Serialize;

use crate::classify::DisambigClassifier;
use crate::config::DisambigConfig;
use crate::error::Result;
use crate::indexing::{dispatch_shards, StageProgressFactory};
use crate::output::write_qid_list;
use crate::pipeline::millis;
use crate::schema::{DisambigPartial, Qid};
use crate::shard::discover_shards;

/// Summary of a completed extraction
#[derive(Debug, Clone, Serialize)]
pub struct DisambigReport {
    pub shards: usize,
    pub qids_written: usize,
    pub out_file: PathBuf,
    pub bytes_written: u64,
    pub elapsed_ms: u64,
}

/// Union per-shard results. An entity tagged by any shard is included.
pub fn union_disambig_qids<'a, I>(partials: I) -> AHashSet<Qid>
where
    I: IntoIterator<Item = &'a DisambigPartial>,
{
    let mut all = AHashSet::new();
    for partial in partials {
        all.extend(partial.qids.iter().cloned());
    }
    all
}

/// Extracts disambiguation-page entities for a [`DisambigConfig`]
pub struct DisambigPipeline<'a> {
    config: &'a DisambigConfig,
    classifier: DisambigClassifier,
    progress: Option<&'a StageProgressFactory>,
}

impl<'a> DisambigPipeline<'a> {
    pub fn new(config: &'a DisambigConfig) -> Self {
        Self {
            config,
            classifier: DisambigClassifier::default(),
            progress: None,
        }
    }

    /// Replace the disambiguation marker set
    pub fn with_classifier(mut self, classifier: DisambigClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_progress(mut self, factory: &'a StageProgressFactory) -> Self {
        self.progress = Some(factory);
        self
    }

    /// Collect the disambiguation entities, sorted by identifier
    pub fn extract(&self) -> Result<(Vec<Qid>, usize)> {
        let shards = discover_shards(&self.config.sources.relations_dir())?;
        tracing::info!("Starting with {} processes", self.config.workers);

        let progress = self
            .progress
            .map(|factory| factory("disambiguation", shards.len()));
        let partials = dispatch_shards(&shards, self.config.workers, &self.classifier, progress)?;

        let mut qids: Vec<Qid> = union_disambig_qids(&partials).into_iter().collect();
        qids.sort_unstable();
        Ok((qids, shards.len()))
    }

    /// Validate, extract and write the artifact
    pub fn run(&self) -> Result<DisambigReport> {
        let start = Instant::now();
        self.config.validate()?;

        let (qids, shards) = self.extract()?;
        let out_file = self.config.out_file();
        let bytes_written = write_qid_list(&out_file, &qids, self.config.ensure_ascii)?;

        let elapsed = start.elapsed();
        tracing::info!(
            "Written {} to {} in {:.2}s",
            qids.len(),
            out_file.display(),
            elapsed.as_secs_f64()
        );

        Ok(DisambigReport {
            shards,
            qids_written: qids.len(),
            out_file,
            bytes_written,
            elapsed_ms: millis(elapsed),
        })
    }
}
