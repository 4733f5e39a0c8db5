//! File-search endpoint client module.
//!
//! Queries a third-party file index by free-text title and returns the
//! raw candidate list. Picking a usable candidate is left to callers.

mod api;
mod client;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{FileSearchApi, LocalFileSearchApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{DEFAULT_ENDPOINT, FileSearchClient, FileSearchClientBuilder};
#[allow(clippy::module_name_repetitions)]
pub use types::FileSearchItem;
