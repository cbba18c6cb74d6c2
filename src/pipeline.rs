//! Alias index pipeline
//!
//! Stages, each a parallel map over shards followed by a single-threaded
//! reduce on the calling thread:
//!
//! 1. validate configuration and load the entity filter
//! 2. alias-table shards -> partial alias maps
//! 3. entity-value shards -> partial alias maps
//! 4. entity-relation shards -> partial alias + type maps
//! 5. type maps -> human-entity set
//! 6. merge all partial alias maps (normalize + deduplicate)
//! 7. name augmentation for human entities
//! 8. inversion under the entity filter
//! 9. write the alias index

use std::path::PathBuf;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::augment::{AliasAugmenter, RuleNameParser, BASE_STOPWORD_SET};
use crate::classify::{
    AliasProperties, AliasTableClassifier, RelationClassifier, ShardClassifier,
    ValueTableClassifier,
};
use crate::config::BuildConfig;
use crate::error::Result;
use crate::filter::QidFilter;
use crate::indexing::{dispatch_shards, StageProgressFactory};
use crate::invert::invert_aliases;
use crate::merge::AliasMerger;
use crate::output::write_alias_index;
use crate::schema::{AliasIndex, HUMAN_TYPE};
use crate::shard::discover_shards;
use crate::types::resolve_human_entities;

const STAGES: usize = 9;

/// Whole milliseconds, saturating at `u64::MAX`
pub(crate) fn millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

/// Cardinalities gathered while building the index
#[derive(Debug, Clone, Default, Serialize)]
pub struct BuildStats {
    pub alias_shards: usize,
    pub value_shards: usize,
    pub relation_shards: usize,
    pub entities: usize,
    pub distinct_aliases: usize,
    pub human_entities: usize,
    pub augmented_aliases: usize,
    pub filter_qids: usize,
    pub indexed_aliases: usize,
}

/// Summary of a completed build
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    #[serde(flatten)]
    pub stats: BuildStats,
    pub out_file: PathBuf,
    pub bytes_written: u64,
    pub batch_size: usize,
    pub elapsed_ms: u64,
    pub generated_at: String,
}

/// Builds the alias index described by a [`BuildConfig`]
pub struct AliasPipeline<'a> {
    config: &'a BuildConfig,
    properties: AliasProperties,
    progress: Option<&'a StageProgressFactory>,
}

impl<'a> AliasPipeline<'a> {
    pub fn new(config: &'a BuildConfig) -> Self {
        Self {
            config,
            properties: AliasProperties::default(),
            progress: None,
        }
    }

    /// Replace the alias-bearing property table
    pub fn with_properties(mut self, properties: AliasProperties) -> Self {
        self.properties = properties;
        self
    }

    /// Report per-shard progress through callbacks made by `factory`
    pub fn with_progress(mut self, factory: &'a StageProgressFactory) -> Self {
        self.progress = Some(factory);
        self
    }

    fn stage<C: ShardClassifier>(
        &self,
        label: &str,
        shards: &[PathBuf],
        classifier: &C,
    ) -> Result<Vec<C::Output>> {
        let progress = self.progress.map(|factory| factory(label, shards.len()));
        dispatch_shards(shards, self.config.workers, classifier, progress)
    }

    /// Validate, build and write the index
    pub fn run(&self) -> Result<BuildReport> {
        let start = Instant::now();

        tracing::info!("Step 1 of {}: (optional) - loading qids (if got file)", STAGES);
        let filter = self.config.validate()?;

        let (index, stats) = self.build_index(&filter)?;

        tracing::info!(
            "Step 9 of {}: Saving to file {}...",
            STAGES,
            self.config.out_file.display()
        );
        let bytes_written = write_alias_index(
            &self.config.out_file,
            &index,
            self.config.layout,
            self.config.ensure_ascii,
        )?;

        Ok(BuildReport {
            stats,
            out_file: self.config.out_file.clone(),
            bytes_written,
            batch_size: self.config.batch_size,
            elapsed_ms: millis(start.elapsed()),
            generated_at: chrono::Utc::now().to_rfc3339(),
        })
    }

    /// Run stages 2 to 8 and return the inverted index.
    ///
    /// Shard directories are resolved before any shard is read, so a missing
    /// source fails the run before parallel work starts.
    pub fn build_index(&self, filter: &QidFilter) -> Result<(AliasIndex, BuildStats)> {
        let sources = &self.config.sources;
        let alias_files = discover_shards(&sources.aliases_dir())?;
        let value_files = discover_shards(&sources.values_dir())?;
        let relation_files = discover_shards(&sources.relations_dir())?;

        let mut stats = BuildStats {
            alias_shards: alias_files.len(),
            value_shards: value_files.len(),
            relation_shards: relation_files.len(),
            filter_qids: filter.len(),
            ..BuildStats::default()
        };

        tracing::info!("Step 2 of {}: loading aliases ...", STAGES);
        let alias_partials = self.stage("aliases", &alias_files, &AliasTableClassifier)?;

        tracing::info!("Step 3 of {}: process entity values", STAGES);
        let value_classifier = ValueTableClassifier::new(self.properties.clone());
        let value_partials = self.stage("entity values", &value_files, &value_classifier)?;

        tracing::info!("Step 4 of {}: entity rels", STAGES);
        let relation_classifier = RelationClassifier::new(self.properties.clone());
        let relation_partials =
            self.stage("entity rels", &relation_files, &relation_classifier)?;

        tracing::info!("Step 5 of {}: Building human type map", STAGES);
        let humans = resolve_human_entities(
            relation_partials.iter().map(|partial| &partial.types),
            HUMAN_TYPE,
        );
        stats.human_entities = humans.len();

        tracing::info!("Step 6 of {}: merging aliases", STAGES);
        let mut merger = AliasMerger::new(self.config.normalize);
        for partial in alias_partials.iter().chain(value_partials.iter()) {
            merger.add(partial);
        }
        if self.config.relation_aliases {
            for partial in &relation_partials {
                merger.add(&partial.aliases);
            }
        } else {
            tracing::debug!("Relation aliases skipped by configuration");
        }
        drop(alias_partials);
        drop(value_partials);
        drop(relation_partials);
        let merged = merger.finish();
        stats.entities = merged.aliases.len();
        stats.distinct_aliases = merged.distinct_aliases;

        tracing::info!("Step 7 of {}: augmenting human names", STAGES);
        let mut aliases = merged.aliases;
        let augment = AliasAugmenter::new(RuleNameParser, &BASE_STOPWORD_SET)
            .augment(&mut aliases, &humans);
        stats.augmented_aliases = augment.aliases_added;

        tracing::info!("Step 8 of {}: Inverting qid2alias...", STAGES);
        let index = invert_aliases(&aliases, filter);
        stats.indexed_aliases = index.len();

        Ok((index, stats))
    }
}
