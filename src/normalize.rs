//! Alias normalization
//!
//! Two raw strings that normalize to the same value are the same alias.
//! Normalization is pure and idempotent:
//! - lower-casing (Unicode aware)
//! - punctuation stripping: canonical decomposition, diacritic removal and
//!   removal of everything that is neither alphanumeric nor whitespace
//! - whitespace collapsing (runs become one space, ends trimmed)

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Normalization flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Remove diacritics and non-alphanumeric characters
    pub strip: bool,
    /// Lower-case the alias
    pub lower: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            strip: true,
            lower: true,
        }
    }
}

impl NormalizeOptions {
    /// Leaves raw strings untouched
    pub const RAW: Self = Self {
        strip: false,
        lower: false,
    };
}

/// Normalize a raw alias string.
///
/// With both flags off the input is returned unchanged.
///
/// # Examples
///
/// ```
/// use alias_index::normalize::{normalize_alias, NormalizeOptions};
///
/// let opts = NormalizeOptions::default();
/// assert_eq!(normalize_alias("  Gödel,  Kurt ", opts), "godel kurt");
/// ```
pub fn normalize_alias(raw: &str, opts: NormalizeOptions) -> String {
    if !opts.strip && !opts.lower {
        return raw.to_string();
    }

    let lowered;
    let mut text = raw;
    if opts.lower {
        lowered = raw.to_lowercase();
        text = &lowered;
    }

    let stripped: String;
    if opts.strip {
        stripped = text
            .nfd()
            .filter(|c| !is_combining_mark(*c))
            .filter(|c| c.is_alphanumeric() || c.is_whitespace())
            .collect();
        text = &stripped;
    }

    collapse_whitespace(text)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
