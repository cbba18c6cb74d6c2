//! Shard-level parallelism
//!
//! The "parallel map" half of every stage: classifiers run per shard on a
//! bounded worker pool, and the collected partials are reduced afterwards on
//! the calling thread.

mod dispatch;

pub use dispatch::{dispatch_shards, ShardProgressCallback};

/// Creates the progress callback for one dispatcher stage, given the stage
/// label and its shard count
pub type StageProgressFactory = dyn Fn(&str, usize) -> ShardProgressCallback + Sync;
