//! Detail fetcher: one catalog request per page load.

use std::fmt;

use cinedeck_api::tmdb::{LocalTmdbApi, TmdbMovieDetails};
use tracing::instrument;

/// Failure to retrieve a movie's details.
///
/// Covers transport errors, non-success HTTP statuses and undecodable
/// bodies alike. Terminal for the page load it belongs to.
#[derive(Debug)]
pub struct RetrievalError {
    /// Movie that was requested.
    movie_id: u64,
    /// Underlying client error.
    cause: anyhow::Error,
}

impl RetrievalError {
    /// Wraps a client error for `movie_id`.
    #[must_use]
    pub const fn new(movie_id: u64, cause: anyhow::Error) -> Self {
        Self { movie_id, cause }
    }

    /// Returns the requested movie ID.
    #[must_use]
    pub const fn movie_id(&self) -> u64 {
        self.movie_id
    }
}

impl fmt::Display for RetrievalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "failed to retrieve details for movie {}: {:#}",
            self.movie_id, self.cause
        )
    }
}

impl std::error::Error for RetrievalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&*self.cause)
    }
}

/// Fetches details (with the video list appended) for `movie_id`.
///
/// # Errors
///
/// Returns `RetrievalError` if the request fails or the response cannot be
/// decoded. No retry is attempted here.
#[instrument(skip_all, fields(movie_id = movie_id))]
pub async fn fetch_details(
    api: &(impl LocalTmdbApi + Sync),
    movie_id: u64,
    language: &str,
) -> Result<TmdbMovieDetails, RetrievalError> {
    api.movie_details(movie_id, language)
        .await
        .map_err(|cause| RetrievalError::new(movie_id, cause))
}
