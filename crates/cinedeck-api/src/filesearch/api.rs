//! `FileSearchApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::types::FileSearchItem;

/// File-search API trait.
///
/// Abstracts the endpoint for mock substitution in tests.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(FileSearchApi: Send)]
pub trait LocalFileSearchApi {
    /// Searches the file index for `query`, returning candidates in
    /// endpoint order.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, the endpoint answers with
    /// a non-success status, or the JSON body cannot be decoded.
    async fn search(&self, query: &str) -> Result<Vec<FileSearchItem>>;
}
