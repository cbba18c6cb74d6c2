//! CLI argument definitions using clap with subcommand architecture
//!
//! The parsed arguments are converted into the plain configuration structs in
//! [`crate::config`]; nothing below the command layer sees clap types.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::{
    BuildConfig, DisambigConfig, DEFAULT_ALIAS_OUT_FILE, DEFAULT_BATCH_SIZE,
    DEFAULT_DISAMBIG_OUT_DIR, DEFAULT_WORKERS,
};
use crate::normalize::NormalizeOptions;
use crate::output::IndexLayout;

/// Alias index builder for sharded knowledge-graph triples
#[derive(Parser, Debug)]
#[command(name = "alias-index")]
#[command(about = "Builds alias -> entity indexes from sharded knowledge-graph triples")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Report format (applies to all commands)
    #[arg(short, long, default_value = "text", value_enum, global = true)]
    pub format: OutputFormat,

    /// Show debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Show per-shard progress bars on stderr
    #[arg(long, global = true)]
    pub progress: bool,

    /// Number of worker threads
    #[arg(
        short,
        long,
        global = true,
        default_value_t = DEFAULT_WORKERS,
        env = "ALIAS_INDEX_WORKERS"
    )]
    pub workers: usize,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the alias -> entity index
    #[command(visible_alias = "b")]
    Build(BuildArgs),

    /// Extract the entities that are disambiguation pages
    #[command(visible_alias = "d")]
    Disambig(DisambigArgs),
}

// ============================================
// Build Subcommand
// ============================================

/// Arguments for the build command
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Data directory holding processed_batches/
    #[arg(long, value_name = "DIR", env = "ALIAS_INDEX_DATA")]
    pub data: PathBuf,

    /// Output file for the alias index
    #[arg(long, value_name = "PATH", default_value = DEFAULT_ALIAS_OUT_FILE)]
    pub out_file: PathBuf,

    /// Restrict the index to the entities listed in this JSON file
    #[arg(long, value_name = "PATH")]
    pub qids: Option<PathBuf>,

    /// Upstream batch size (recorded in the report)
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// Keep punctuation and diacritics in aliases
    #[arg(long)]
    pub not_strip: bool,

    /// Keep alias casing
    #[arg(long)]
    pub not_lower: bool,

    /// On-disk layout of the index
    #[arg(long, default_value = "document", value_enum)]
    pub layout: IndexLayout,

    /// Escape every non-ASCII character in the output
    #[arg(long)]
    pub ensure_ascii: bool,

    /// Use entity-relation shards for types only
    #[arg(long)]
    pub skip_relation_aliases: bool,
}

// ============================================
// Disambig Subcommand
// ============================================

/// Arguments for the disambig command
#[derive(Args, Debug)]
pub struct DisambigArgs {
    /// Data directory holding processed_batches/
    #[arg(long, value_name = "DIR", env = "ALIAS_INDEX_DATA")]
    pub data: PathBuf,

    /// Output directory name, created under the data directory
    #[arg(long, value_name = "NAME", default_value = DEFAULT_DISAMBIG_OUT_DIR)]
    pub out_dir: PathBuf,

    /// Escape every non-ASCII character in the output
    #[arg(long)]
    pub ensure_ascii: bool,
}

// ============================================
// Output Format
// ============================================

/// Output format for command reports
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text (default for terminal)
    #[default]
    #[value(alias = "pretty")]
    Text,
    /// TOON (Token-Oriented Object Notation)
    Toon,
    /// JSON for machine parsing
    Json,
}

// ============================================
// Helper Implementations
// ============================================

impl BuildArgs {
    /// Convert into a library build configuration
    pub fn to_config(&self, workers: usize) -> BuildConfig {
        let mut config = BuildConfig::new(&self.data, &self.out_file);
        config.workers = workers;
        config.batch_size = self.batch_size;
        config.normalize = NormalizeOptions {
            strip: !self.not_strip,
            lower: !self.not_lower,
        };
        config.qid_filter = self.qids.clone();
        config.layout = self.layout;
        config.ensure_ascii = self.ensure_ascii;
        config.relation_aliases = !self.skip_relation_aliases;
        config
    }
}

impl DisambigArgs {
    /// Convert into a library disambiguation configuration
    pub fn to_config(&self, workers: usize) -> DisambigConfig {
        let mut config = DisambigConfig::new(&self.data);
        config.out_dir = self.out_dir.clone();
        config.workers = workers;
        config.ensure_ascii = self.ensure_ascii;
        config
    }
}
