//! Optional entity filter for the inversion stage
//!
//! The filter file is JSON: either an object (its keys are the filter) or an
//! array of entity identifiers. An empty filter restricts nothing.

use std::fs;
use std::path::Path;

use ahash::AHashSet;
use serde_json::Value;

use crate::error::{AliasIndexError, Result};
use crate::schema::Qid;

/// Set of entities allowed to contribute to the alias index
#[derive(Debug, Clone, Default)]
pub struct QidFilter {
    qids: AHashSet<Qid>,
}

impl QidFilter {
    /// A filter that lets every entity through
    pub fn allow_all() -> Self {
        Self::default()
    }

    pub fn from_qids<I, S>(qids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Qid>,
    {
        Self {
            qids: qids.into_iter().map(Into::into).collect(),
        }
    }

    /// Load a filter file. Any problem with the file is a configuration error.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            AliasIndexError::config(format!("cannot read qid filter {}: {}", path.display(), e))
        })?;
        let value: Value = serde_json::from_str(&content).map_err(|e| {
            AliasIndexError::config(format!("invalid qid filter {}: {}", path.display(), e))
        })?;
        Self::from_json(value).map_err(|message| {
            AliasIndexError::config(format!("invalid qid filter {}: {}", path.display(), message))
        })
    }

    fn from_json(value: Value) -> std::result::Result<Self, String> {
        match value {
            Value::Object(map) => Ok(Self::from_qids(map.into_iter().map(|(k, _)| k))),
            Value::Array(items) => {
                let mut qids = AHashSet::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::String(qid) => {
                            qids.insert(qid);
                        }
                        other => return Err(format!("expected a string entry, found {}", other)),
                    }
                }
                Ok(Self { qids })
            }
            other => Err(format!(
                "expected an object or an array, found {}",
                json_kind(&other)
            )),
        }
    }

    /// True when the filter restricts nothing
    pub fn is_empty(&self) -> bool {
        self.qids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.qids.len()
    }

    /// Whether `qid` may contribute to the index
    pub fn allows(&self, qid: &str) -> bool {
        self.qids.is_empty() || self.qids.contains(qid)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
