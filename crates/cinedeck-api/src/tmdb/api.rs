//! `TmdbApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::types::{SearchMovieParams, TmdbMovieDetails, TmdbSearchMovieResponse};

/// TMDB API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(TmdbApi: Send)]
pub trait LocalTmdbApi {
    /// Fetches movie details with the `videos` list appended.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, TMDB answers with a
    /// non-success status, or the JSON body cannot be decoded.
    async fn movie_details(&self, movie_id: u64, language: &str) -> Result<TmdbMovieDetails>;

    /// Searches for movies.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn search_movie(&self, params: &SearchMovieParams) -> Result<TmdbSearchMovieResponse>;
}
