//! alias-index: bidirectional alias indexes over sharded knowledge-graph triples
//!
//! Upstream extraction leaves three families of JSON-lines shards under
//! `<data>/processed_batches/`: an alias table, entity values and entity
//! relations. This crate turns them into
//!
//! - an alias index mapping each normalized alias to the entities it may
//!   refer to, with given and family names added for human entities, and
//! - the set of entities that are disambiguation pages.
//!
//! Every stage is a parallel map over shards on a bounded worker pool
//! followed by a deterministic reduce on the calling thread.
//!
//! # Example
//!
//! ```ignore
//! use alias_index::{AliasPipeline, BuildConfig};
//!
//! let config = BuildConfig::new("/data/wikidata", "alias2qid.json");
//! let report = AliasPipeline::new(&config).run()?;
//! println!("{} aliases indexed", report.stats.indexed_aliases);
//! ```

pub mod augment;
pub mod classify;
pub mod cli;
pub mod commands;
pub mod config;
pub mod disambig;
pub mod error;
pub mod filter;
pub mod fs_utils;
pub mod indexing;
pub mod invert;
pub mod merge;
pub mod normalize;
pub mod output;
pub mod pipeline;
pub mod schema;
pub mod shard;
pub mod types;

// Re-export commonly used types
pub use augment::{AliasAugmenter, NameDecomposer, NameParts, RuleNameParser};
pub use cli::{Cli, OutputFormat};
pub use config::{BuildConfig, DisambigConfig, SourceLayout};
pub use disambig::{DisambigPipeline, DisambigReport};
pub use error::{AliasIndexError, Result};
pub use filter::QidFilter;
pub use normalize::{normalize_alias, NormalizeOptions};
pub use output::IndexLayout;
pub use pipeline::{AliasPipeline, BuildReport, BuildStats};
pub use schema::{AliasIndex, EntityAliases, Qid, Triple};
