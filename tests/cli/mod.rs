//! CLI command integration tests
//!
//! Verify both subcommands, their arguments, and report formats
//! (text, toon, json).

pub mod build_tests;
pub mod disambig_tests;
