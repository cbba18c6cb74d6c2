//! Command modules for the alias-index CLI
//!
//! Each command module implements a single top-level command:
//! - `build` - Build the alias -> entity index
//! - `disambig` - Extract disambiguation-page entities
//!
//! All command handlers take their respective `Args` struct from `cli.rs`
//! and a shared `CommandContext` for output format, verbosity and worker count.

pub mod build;
pub mod disambig;

pub use build::run_build;
pub use disambig::run_disambig;

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use crate::cli::OutputFormat;
use crate::config::DEFAULT_WORKERS;
use crate::indexing::{ShardProgressCallback, StageProgressFactory};

/// Shared context passed to all command handlers
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Output format (text, toon, or json)
    pub format: OutputFormat,
    /// Show verbose output
    pub verbose: bool,
    /// Show progress during long operations
    pub progress: bool,
    /// Worker threads per shard stage
    pub workers: usize,
}

impl Default for CommandContext {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            verbose: false,
            progress: false,
            workers: DEFAULT_WORKERS,
        }
    }
}

impl CommandContext {
    /// Create a new CommandContext from CLI args
    pub fn from_cli(format: OutputFormat, verbose: bool, progress: bool, workers: usize) -> Self {
        Self {
            format,
            verbose,
            progress,
            workers,
        }
    }

    /// Progress bar factory for shard stages, if `--progress` was given
    pub fn progress_bars(&self) -> Option<Box<StageProgressFactory>> {
        if !self.progress {
            return None;
        }

        let multi = MultiProgress::new();
        let style = ProgressStyle::with_template("{prefix:16} [{bar:30}] {pos}/{len} shards")
            .map(|style| style.progress_chars("=>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());

        Some(Box::new(
            move |label: &str, total: usize| -> ShardProgressCallback {
                let bar = multi.add(ProgressBar::new(total as u64));
                bar.set_style(style.clone());
                bar.set_prefix(label.to_string());
                Box::new(move |done, total| {
                    bar.set_position(done as u64);
                    if done == total {
                        bar.finish();
                    }
                })
            },
        ))
    }
}

/// Encode a JSON value as proper TOON using the rtoon library
pub fn encode_toon(value: &serde_json::Value) -> String {
    rtoon::encode_default(value).unwrap_or_else(|e| format!("TOON encoding error: {}", e))
}

/// Render a serializable report in the requested format.
///
/// `text` receives the report as a JSON object and renders the human form.
pub fn render_report<T, F>(report: &T, format: OutputFormat, text: F) -> crate::Result<String>
where
    T: serde::Serialize,
    F: FnOnce(&serde_json::Value) -> String,
{
    let value = serde_json::to_value(report)?;
    let output = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&value)?,
        OutputFormat::Toon => encode_toon(&value),
        OutputFormat::Text => text(&value),
    };
    Ok(output)
}

/// One `  key: value` line per field of a JSON object, in field order
pub(crate) fn text_fields(value: &serde_json::Value) -> String {
    let mut output = String::new();
    if let Some(fields) = value.as_object() {
        for (key, field) in fields {
            match field {
                serde_json::Value::String(s) => output.push_str(&format!("  {}: {}\n", key, s)),
                other => output.push_str(&format!("  {}: {}\n", key, other)),
            }
        }
    }
    output
}
