//! Type resolver: partial entity -> type maps -> human-entity set

use ahash::AHashSet;

use crate::schema::{PartialTypes, Qid};

/// Collect every entity whose type value equals `human_marker`.
///
/// Only membership matters, so conflicting non-human types reported by
/// different shards for the same entity never interfere.
pub fn resolve_human_entities<'a, I>(partials: I, human_marker: &str) -> AHashSet<Qid>
where
    I: IntoIterator<Item = &'a PartialTypes>,
{
    let mut humans = AHashSet::new();
    for partial in partials {
        for (qid, type_value) in &partial.entries {
            if type_value == human_marker {
                humans.insert(qid.clone());
            }
        }
    }
    tracing::info!("Found {} entities of type individual.", humans.len());
    humans
}
