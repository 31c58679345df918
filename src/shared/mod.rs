//! Shared module for common functionality across the library and CLI

pub mod config;

/// Returns the current version of the `glossmap` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
