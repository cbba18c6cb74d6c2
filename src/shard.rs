//! Shard reader and shard discovery
//!
//! A shard is one JSON-lines file holding a disjoint slice of the triple
//! corpus. [`ShardReader`] lazily yields one [`Triple`] per record in file
//! order. A record that fails to parse is reported as
//! [`AliasIndexError::ShardCorrupt`] and the caller is expected to abandon the
//! shard (and the run) rather than skip the record.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Lines};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use crate::error::{AliasIndexError, Result};
use crate::schema::{ShardRecord, Triple};

/// Lazy iterator over the triples of one shard file
pub struct ShardReader<R> {
    path: PathBuf,
    lines: Lines<BufReader<File>>,
    line_no: usize,
    failed: bool,
    _record: PhantomData<fn() -> R>,
}

impl<R: ShardRecord> ShardReader<R> {
    /// Open a shard for reading
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| AliasIndexError::ShardIo {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            lines: BufReader::new(file).lines(),
            line_no: 0,
            failed: false,
            _record: PhantomData,
        })
    }

    /// Open a fresh reader over the same shard, starting from the first record
    pub fn reopen(&self) -> Result<Self> {
        Self::open(&self.path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn corrupt(&mut self, message: String) -> AliasIndexError {
        self.failed = true;
        AliasIndexError::ShardCorrupt {
            path: self.path.clone(),
            line: self.line_no,
            message,
        }
    }
}

impl<R: ShardRecord> Iterator for ShardReader<R> {
    type Item = Result<Triple>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                // undecodable bytes are bad input, anything else is a read failure
                Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                    self.line_no += 1;
                    return Some(Err(self.corrupt(e.to_string())));
                }
                Err(source) => {
                    self.failed = true;
                    return Some(Err(AliasIndexError::ShardIo {
                        path: self.path.clone(),
                        source,
                    }));
                }
            };
            self.line_no += 1;

            // Blank lines (usually a trailing newline) carry no record
            if line.trim().is_empty() {
                continue;
            }

            return Some(match serde_json::from_str::<R>(&line) {
                Ok(record) => Ok(record.into_triple()),
                Err(e) => Err(self.corrupt(e.to_string())),
            });
        }
    }
}

/// List the shard files of a source directory, sorted by file name.
///
/// Hidden files and subdirectories are ignored. A missing directory is a
/// configuration error since it is detected before any shard work starts.
pub fn discover_shards(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(AliasIndexError::config(format!(
            "shard directory not found: {}",
            dir.display()
        )));
    }

    let mut shards = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        if hidden || !entry.file_type()?.is_file() {
            tracing::debug!("Skipping non-shard entry {}", path.display());
            continue;
        }
        shards.push(path);
    }

    shards.sort();
    Ok(shards)
}
