//! Parallel shard dispatch with progress reporting
//!
//! Fans one classifier out over a list of shards on a bounded Rayon pool and
//! fans the partial results back in. Results come back in shard-submission
//! order regardless of completion order. The first failing shard fails the
//! whole stage.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;

use crate::classify::ShardClassifier;
use crate::error::{AliasIndexError, Result};
use crate::schema::EntityCount;

/// Progress callback type for shard dispatch.
///
/// The callback receives (completed_count, total_count) after each shard.
pub type ShardProgressCallback = Box<dyn Fn(usize, usize) + Send + Sync>;

/// Run `classifier` over every shard using `workers` threads.
///
/// Each worker exclusively owns the partial result of its shard; nothing is
/// shared between workers except the read-only classifier.
///
/// # Example
///
/// ```ignore
/// use alias_index::classify::AliasTableClassifier;
/// use alias_index::indexing::{dispatch_shards, ShardProgressCallback};
///
/// let progress: ShardProgressCallback = Box::new(|done, total| {
///     eprintln!("{}/{} shards", done, total);
/// });
/// let partials = dispatch_shards(&shards, 8, &AliasTableClassifier, Some(progress))?;
/// ```
pub fn dispatch_shards<C>(
    shards: &[PathBuf],
    workers: usize,
    classifier: &C,
    progress: Option<ShardProgressCallback>,
) -> Result<Vec<C::Output>>
where
    C: ShardClassifier,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map_err(|e| AliasIndexError::WorkerPool {
            message: e.to_string(),
        })?;

    let total = shards.len();
    let completed = AtomicUsize::new(0);

    let results: Result<Vec<C::Output>> = pool.install(|| {
        shards
            .par_iter()
            .enumerate()
            .map(|(index, path)| {
                let partial = classifier.classify_shard(path)?;

                tracing::info!(
                    "Finished {} / {}...{}. Found {} entities.",
                    index,
                    total,
                    path.display(),
                    partial.entity_count()
                );

                let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                if let Some(ref cb) = progress {
                    cb(done, total);
                }

                Ok(partial)
            })
            .collect()
    });

    if let Err(ref e) = results {
        tracing::error!("Shard stage aborted: {}", e);
    }
    results
}
