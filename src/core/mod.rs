//! Core pipeline stages shared by the CLI and library consumers

pub mod annotate;
pub mod error;
pub mod extract;
pub mod flatten;
pub mod layout;
pub mod lookup;
mod markup;
pub mod models;
pub mod pipeline;
pub mod render;
