//! Run configuration for the alias and disambiguation pipelines
//!
//! The CLI is translated into these plain structs; the library never sees
//! clap types. `validate()` runs before any parallel work so configuration
//! problems fail fast.

use std::path::{Path, PathBuf};

use crate::error::{AliasIndexError, Result};
use crate::filter::QidFilter;
use crate::normalize::NormalizeOptions;
use crate::output::IndexLayout;

pub const DEFAULT_WORKERS: usize = 10;
pub const DEFAULT_BATCH_SIZE: usize = 100_000;
pub const DEFAULT_ALIAS_OUT_FILE: &str = "augmented_alias_map_large_uncased.json";
pub const DEFAULT_DISAMBIG_OUT_DIR: &str = "disambig_qids";
pub const DISAMBIG_FILE_NAME: &str = "disambig_qids.json";

/// Where the upstream extraction stage leaves its shard directories
#[derive(Debug, Clone)]
pub struct SourceLayout {
    pub data_dir: PathBuf,
}

impl SourceLayout {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn batches(&self) -> PathBuf {
        self.data_dir.join("processed_batches")
    }

    /// Alias-table shards (`qid`, `alias`)
    pub fn aliases_dir(&self) -> PathBuf {
        self.batches().join("aliases")
    }

    /// Entity-value shards (`qid`, `property_id`, `value`)
    pub fn values_dir(&self) -> PathBuf {
        self.batches().join("entity_values")
    }

    /// Entity-relation shards (`qid`, `property_id`, `value`)
    pub fn relations_dir(&self) -> PathBuf {
        self.batches().join("entity_rels")
    }

    fn check(&self) -> Result<()> {
        if !self.data_dir.is_dir() {
            return Err(AliasIndexError::config(format!(
                "data directory not found: {}",
                self.data_dir.display()
            )));
        }
        Ok(())
    }
}

fn check_workers(workers: usize) -> Result<()> {
    if workers == 0 {
        return Err(AliasIndexError::config("workers must be at least 1"));
    }
    Ok(())
}

/// Configuration of the alias index build
#[derive(Debug, Clone)]
pub struct BuildConfig {
    pub sources: SourceLayout,
    pub out_file: PathBuf,
    pub workers: usize,
    /// Upstream batching parameter; only echoed in the report
    pub batch_size: usize,
    pub normalize: NormalizeOptions,
    pub qid_filter: Option<PathBuf>,
    pub layout: IndexLayout,
    pub ensure_ascii: bool,
    /// Whether entity-relation shards contribute aliases as well as types
    pub relation_aliases: bool,
}

impl BuildConfig {
    pub fn new(data_dir: impl Into<PathBuf>, out_file: impl Into<PathBuf>) -> Self {
        Self {
            sources: SourceLayout::new(data_dir),
            out_file: out_file.into(),
            workers: DEFAULT_WORKERS,
            batch_size: DEFAULT_BATCH_SIZE,
            normalize: NormalizeOptions::default(),
            qid_filter: None,
            layout: IndexLayout::default(),
            ensure_ascii: false,
            relation_aliases: true,
        }
    }

    /// Check the configuration and load the entity filter.
    ///
    /// Creates the output directory if needed.
    pub fn validate(&self) -> Result<QidFilter> {
        check_workers(self.workers)?;
        self.sources.check()?;

        if self.out_file.as_os_str().is_empty() || self.out_file.is_dir() {
            return Err(AliasIndexError::config(format!(
                "invalid output file: {}",
                self.out_file.display()
            )));
        }
        crate::fs_utils::ensure_parent_dir(&self.out_file).map_err(|e| {
            AliasIndexError::config(format!(
                "cannot create output directory for {}: {}",
                self.out_file.display(),
                e
            ))
        })?;

        match &self.qid_filter {
            Some(path) => {
                let filter = QidFilter::load(path)?;
                tracing::info!("Loaded {} qids.", filter.len());
                Ok(filter)
            }
            None => {
                tracing::info!("no qids file");
                Ok(QidFilter::allow_all())
            }
        }
    }
}

/// Configuration of the disambiguation extraction
#[derive(Debug, Clone)]
pub struct DisambigConfig {
    pub sources: SourceLayout,
    /// Output directory name, resolved under the data directory
    pub out_dir: PathBuf,
    pub workers: usize,
    pub ensure_ascii: bool,
}

impl DisambigConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            sources: SourceLayout::new(data_dir),
            out_dir: PathBuf::from(DEFAULT_DISAMBIG_OUT_DIR),
            workers: DEFAULT_WORKERS,
            ensure_ascii: false,
        }
    }

    /// Full path of the disambiguation artifact
    pub fn out_file(&self) -> PathBuf {
        self.sources
            .data_dir
            .join(&self.out_dir)
            .join(DISAMBIG_FILE_NAME)
    }

    pub fn validate(&self) -> Result<()> {
        check_workers(self.workers)?;
        self.sources.check()?;
        let out_file = self.out_file();
        crate::fs_utils::ensure_parent_dir(&out_file).map_err(|e| {
            AliasIndexError::config(format!(
                "cannot create output directory {}: {}",
                display_parent(&out_file),
                e
            ))
        })
    }
}

fn display_parent(path: &Path) -> String {
    path.parent()
        .map(|p| p.display().to_string())
        .unwrap_or_default()
}
