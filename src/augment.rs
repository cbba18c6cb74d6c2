//! Human-name alias augmentation
//!
//! For entities of the human type, every alias is decomposed into a given
//! name and a family name, and each non-empty component that is not a stop
//! word becomes an additional alias. The decomposition itself sits behind
//! [`NameDecomposer`] so the rule set can be swapped without touching the
//! pipeline.

use ahash::AHashSet;
use once_cell::sync::Lazy;

use crate::schema::{EntityAliases, Qid};

/// Given/family components of a personal name. Either may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameParts {
    pub given: String,
    pub family: String,
}

/// Splits a free-text personal name into components
pub trait NameDecomposer: Sync {
    fn decompose(&self, name: &str) -> NameParts;
}

/// Name particles, honorifics and filler words that do not identify anyone
pub const BASE_STOPWORDS: &[&str] = &[
    "a", "an", "and", "as", "at", "by", "de", "del", "der", "di", "dr", "du", "for", "from",
    "in", "is", "jr", "la", "le", "lord", "lady", "miss", "mr", "mrs", "ms", "of", "on", "or",
    "prof", "saint", "sir", "sr", "st", "the", "to", "van", "von", "with",
];

pub static BASE_STOPWORD_SET: Lazy<AHashSet<String>> =
    Lazy::new(|| BASE_STOPWORDS.iter().map(|w| w.to_string()).collect());

const TITLES: &[&str] = &[
    "mr", "mrs", "ms", "miss", "mx", "dr", "prof", "professor", "sir", "dame", "lord", "lady",
    "rev", "reverend", "fr", "father", "sister", "brother", "saint", "king", "queen",
    "prince", "princess", "emperor", "empress", "pope", "president", "general", "gen", "capt",
    "captain", "col", "sgt", "hon", "honorable", "rabbi", "imam", "sheikh", "count", "countess",
    "duke", "duchess", "baron", "baroness",
];

const SUFFIXES: &[&str] = &[
    "jr", "sr", "ii", "iii", "iv", "v", "phd", "md", "esq", "obe", "mbe", "kbe", "cbe", "dds",
    "jnr", "snr",
];

const PARTICLES: &[&str] = &[
    "van", "von", "der", "den", "de", "del", "della", "di", "da", "dos", "das", "du", "la", "le",
    "bin", "ibn", "al", "el", "ter", "ten", "vander", "mac", "st",
];

static TITLE_SET: Lazy<AHashSet<&'static str>> = Lazy::new(|| TITLES.iter().copied().collect());
static SUFFIX_SET: Lazy<AHashSet<&'static str>> =
    Lazy::new(|| SUFFIXES.iter().copied().collect());
static PARTICLE_SET: Lazy<AHashSet<&'static str>> =
    Lazy::new(|| PARTICLES.iter().copied().collect());

fn bare(token: &str) -> String {
    token
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase()
}

fn is_title(token: &str) -> bool {
    TITLE_SET.contains(bare(token).as_str())
}

fn is_suffix(token: &str) -> bool {
    SUFFIX_SET.contains(bare(token).as_str())
}

fn is_particle(token: &str) -> bool {
    PARTICLE_SET.contains(bare(token).as_str())
}

/// Rule-based personal name parser.
///
/// - `"family, given"` when the name contains a comma
/// - leading titles and trailing suffixes are dropped
/// - given name: first remaining token
/// - family name: phrase from the first particle (after the given name) to
///   the end, otherwise the last token
/// - a name that opens with a particle is a family name only; a lone token
///   is a given name only
///
/// Every component it returns decomposes to itself, so augmenting twice adds
/// nothing the first pass did not.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleNameParser;

impl RuleNameParser {
    fn strip_affixes<'a>(mut tokens: &'a [&'a str]) -> &'a [&'a str] {
        while let Some((first, rest)) = tokens.split_first() {
            if !is_title(first) {
                break;
            }
            tokens = rest;
        }
        while let Some((last, rest)) = tokens.split_last() {
            if !is_suffix(last) {
                break;
            }
            tokens = rest;
        }
        tokens
    }

    /// Family name of a token run, searching for particles from `from` onwards
    fn family_of(tokens: &[&str], from: usize) -> String {
        match (from..tokens.len()).find(|&i| is_particle(tokens[i]) && i + 1 < tokens.len()) {
            Some(start) => tokens[start..].join(" "),
            None => tokens.last().map(|t| t.to_string()).unwrap_or_default(),
        }
    }
}

impl NameDecomposer for RuleNameParser {
    fn decompose(&self, name: &str) -> NameParts {
        if let Some((before, after)) = name.split_once(',') {
            let family_tokens: Vec<&str> = before.split_whitespace().collect();
            let given_tokens: Vec<&str> = after.split_whitespace().collect();
            let family_tokens = Self::strip_affixes(&family_tokens);
            let given_tokens = Self::strip_affixes(&given_tokens);
            return NameParts {
                given: given_tokens.first().map(|t| t.to_string()).unwrap_or_default(),
                family: Self::family_of(family_tokens, 0),
            };
        }

        let tokens: Vec<&str> = name.split_whitespace().collect();
        let tokens = Self::strip_affixes(&tokens);

        match tokens {
            [] => NameParts::default(),
            [only] => NameParts {
                given: only.to_string(),
                family: String::new(),
            },
            [first, ..] if is_particle(first) => NameParts {
                given: String::new(),
                family: tokens.join(" "),
            },
            [first, ..] => NameParts {
                given: first.to_string(),
                family: Self::family_of(tokens, 1),
            },
        }
    }
}

/// Counters reported after augmentation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AugmentStats {
    /// Human entities present in the alias map
    pub entities: usize,
    /// New aliases inserted
    pub aliases_added: usize,
}

/// Adds given/family name components as aliases of human entities
pub struct AliasAugmenter<'a, D: NameDecomposer> {
    decomposer: D,
    stopwords: &'a AHashSet<String>,
}

impl<'a, D: NameDecomposer> AliasAugmenter<'a, D> {
    pub fn new(decomposer: D, stopwords: &'a AHashSet<String>) -> Self {
        Self {
            decomposer,
            stopwords,
        }
    }

    fn accepts(&self, component: &str) -> bool {
        !component.is_empty() && !self.stopwords.contains(component)
    }

    /// Grow the alias sets of human entities in place.
    ///
    /// Entities outside `humans` are untouched. Sets only ever grow.
    pub fn augment(&self, aliases: &mut EntityAliases, humans: &AHashSet<Qid>) -> AugmentStats {
        let mut stats = AugmentStats::default();

        for (qid, set) in aliases.iter_mut() {
            if !humans.contains(qid) {
                continue;
            }
            stats.entities += 1;

            let original: Vec<String> = set.iter().cloned().collect();
            for alias in &original {
                let parts = self.decomposer.decompose(alias);
                for component in [parts.given, parts.family] {
                    if self.accepts(&component) && set.insert(component) {
                        stats.aliases_added += 1;
                    }
                }
            }
        }

        tracing::info!(
            "Finished augmentation. {} QIDS ({} human, {} aliases added).",
            aliases.len(),
            stats.entities,
            stats.aliases_added
        );
        stats
    }
}
