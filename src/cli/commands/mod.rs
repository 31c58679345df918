//! CLI command handlers for Glossmap.
//!
//! This module provides handlers for various CLI subcommands.
//! Each command is implemented in its own submodule.

pub mod annotate;
pub mod config;
pub mod mindmap;
