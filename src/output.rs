//! Artifact serialization
//!
//! The alias index is written either as one JSON document (`alias -> [qid]`)
//! or as JSON lines (`{"alias": ..., "qids": [...]}` per line). With
//! `ensure_ascii` every non-ASCII code point is written as a `\uXXXX` escape.

use std::io::{self, Write};
use std::path::Path;

use clap::ValueEnum;
use serde::Serialize;
use serde_json::ser::{CompactFormatter, Formatter};

use crate::error::{AliasIndexError, Result};
use crate::fs_utils::write_atomically;
use crate::schema::{AliasIndex, Qid};

/// On-disk layout of the alias index
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum IndexLayout {
    /// One JSON object mapping alias to entity list
    #[default]
    Document,
    /// One JSON object per alias, newline separated
    Lines,
}

/// Compact JSON formatter that escapes all non-ASCII characters
#[derive(Debug, Clone, Copy, Default)]
pub struct AsciiFormatter;

impl Formatter for AsciiFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        let mut start = 0;
        for (i, c) in fragment.char_indices() {
            if c.is_ascii() {
                continue;
            }
            if start < i {
                writer.write_all(fragment[start..i].as_bytes())?;
            }
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = i + c.len_utf8();
        }
        if start < fragment.len() {
            writer.write_all(fragment[start..].as_bytes())?;
        }
        Ok(())
    }
}

/// Serialize `value` as compact JSON, honoring the ASCII policy
pub fn write_json<W, T>(writer: &mut W, value: &T, ensure_ascii: bool) -> Result<()>
where
    W: Write,
    T: Serialize + ?Sized,
{
    if ensure_ascii {
        let mut ser = serde_json::Serializer::with_formatter(writer, AsciiFormatter);
        value.serialize(&mut ser)?;
    } else {
        let mut ser = serde_json::Serializer::with_formatter(writer, CompactFormatter);
        value.serialize(&mut ser)?;
    }
    Ok(())
}

/// Serialize `value` to a JSON string, honoring the ASCII policy
pub fn to_json_string<T>(value: &T, ensure_ascii: bool) -> Result<String>
where
    T: Serialize + ?Sized,
{
    let mut buf = Vec::new();
    write_json(&mut buf, value, ensure_ascii)?;
    String::from_utf8(buf).map_err(|e| AliasIndexError::Serialization {
        message: e.to_string(),
    })
}

#[derive(Serialize)]
struct AliasLine<'a> {
    alias: &'a str,
    qids: &'a [Qid],
}

fn into_io(e: AliasIndexError) -> io::Error {
    match e {
        AliasIndexError::Io(e) => e,
        other => io::Error::new(io::ErrorKind::Other, other.to_string()),
    }
}

/// Write the alias index to `path`. Returns the number of bytes written.
pub fn write_alias_index(
    path: &Path,
    index: &AliasIndex,
    layout: IndexLayout,
    ensure_ascii: bool,
) -> Result<u64> {
    let bytes = write_atomically(path, |w| {
        match layout {
            IndexLayout::Document => {
                write_json(w, index, ensure_ascii).map_err(into_io)?;
                w.write_all(b"\n")?;
            }
            IndexLayout::Lines => {
                for (alias, qids) in index {
                    let line = AliasLine { alias, qids };
                    write_json(w, &line, ensure_ascii).map_err(into_io)?;
                    w.write_all(b"\n")?;
                }
            }
        }
        Ok(())
    })?;
    Ok(bytes)
}

/// Write a set of entity identifiers as one JSON array line
pub fn write_qid_list(path: &Path, qids: &[Qid], ensure_ascii: bool) -> Result<u64> {
    let bytes = write_atomically(path, |w| {
        write_json(w, qids, ensure_ascii).map_err(into_io)?;
        w.write_all(b"\n")
    })?;
    Ok(bytes)
}
