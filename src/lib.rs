//! Shared library for Glossmap
//! Contains the annotation pipeline, mindmap layout engine, backend client,
//! and configuration used by the CLI.

pub mod backend;
pub mod core;
pub mod shared;

pub use shared::*;
