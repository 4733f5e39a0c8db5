//! Page load pipeline: details, then trailer, then download.
//!
//! [`load_details`] stops after the trailer so a renderer can show the page
//! while the download lookup is still running; [`load_page`] runs every
//! stage.

use cinedeck_api::filesearch::LocalFileSearchApi;
use cinedeck_api::tmdb::{LocalTmdbApi, TmdbMovieDetails};
use tracing::instrument;

use crate::details::{RetrievalError, fetch_details};
use crate::download::{DownloadFilter, DownloadOutcome, resolve_download};
use crate::trailer::resolve_trailer;

/// Everything one movie page displays.
#[derive(Debug)]
pub struct MoviePage {
    /// Catalog details, replaced wholesale on refetch.
    pub details: TmdbMovieDetails,
    /// Key of the first trailer, if any.
    pub trailer_key: Option<String>,
    /// Download lookup outcome, `Pending` until the lookup finishes.
    pub download: DownloadOutcome,
}

/// Inputs for one page load.
#[derive(Debug, Clone)]
pub struct PageRequest {
    /// Catalog movie ID.
    pub movie_id: u64,
    /// Response language for catalog requests.
    pub language: String,
    /// Download extension allow-list.
    pub filter: DownloadFilter,
}

impl PageRequest {
    /// Creates a request with the default language and extension filter.
    #[must_use]
    pub fn new(movie_id: u64) -> Self {
        Self {
            movie_id,
            language: String::from("en-US"),
            filter: DownloadFilter::default(),
        }
    }

    /// Sets the response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Sets the download extension filter.
    #[must_use]
    pub fn filter(mut self, filter: DownloadFilter) -> Self {
        self.filter = filter;
        self
    }
}

/// Fetches the details and resolves the trailer.
///
/// The returned page carries [`DownloadOutcome::Pending`].
///
/// # Errors
///
/// Returns `RetrievalError` if the detail fetch fails.
#[instrument(skip_all, fields(movie_id = request.movie_id))]
pub async fn load_details(
    tmdb: &(impl LocalTmdbApi + Sync),
    request: &PageRequest,
) -> Result<MoviePage, RetrievalError> {
    let details = fetch_details(tmdb, request.movie_id, &request.language).await?;
    let trailer_key = resolve_trailer(&details).map(String::from);
    tracing::debug!(
        title = %details.title,
        has_trailer = trailer_key.is_some(),
        "Movie details loaded"
    );

    Ok(MoviePage {
        details,
        trailer_key,
        download: DownloadOutcome::Pending,
    })
}

/// Loads a movie page, download lookup included.
///
/// The download lookup only starts once the details are in, and never
/// starts at all when the details fail.
///
/// # Errors
///
/// Returns `RetrievalError` if the detail fetch fails. Download lookup
/// failures are carried inside [`MoviePage::download`] instead.
#[instrument(skip_all, fields(movie_id = request.movie_id))]
pub async fn load_page(
    tmdb: &(impl LocalTmdbApi + Sync),
    files: &(impl LocalFileSearchApi + Sync),
    request: &PageRequest,
) -> Result<MoviePage, RetrievalError> {
    let mut page = load_details(tmdb, request).await?;
    page.download = resolve_download(
        tmdb,
        files,
        &page.details.title,
        &request.language,
        &request.filter,
    )
    .await;
    tracing::debug!(has_download = page.download.link().is_some(), "Movie page loaded");
    Ok(page)
}
