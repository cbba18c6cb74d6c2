//! Common test utilities and fixtures for alias-index integration tests
//!
//! This module provides:
//! - `TestCorpus` builder for laying out shard directories in a temp dir
//! - Assertions for validating CLI reports and written artifacts

#![allow(unused_imports)]
#![allow(dead_code)]

pub mod assertions;

pub use assertions::*;
pub use test_corpus::{ShardKind, TestCorpus};
