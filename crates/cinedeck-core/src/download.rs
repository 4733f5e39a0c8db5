//! Download resolver: title search, then file search, then extension filter.
//!
//! The lookup is best-effort and non-authoritative. The first title-search
//! result is trusted verbatim and the first file with an accepted extension
//! wins. Failures never escape as errors; they become
//! [`DownloadOutcome::LookupFailed`] so callers can tell them apart from a
//! genuine miss while still rendering both the same way.

use std::fmt;

use cinedeck_api::filesearch::{FileSearchItem, LocalFileSearchApi};
use cinedeck_api::tmdb::{LocalTmdbApi, SearchMovieParams};
use tracing::instrument;
use url::Url;

/// Extensions accepted by default.
pub const DEFAULT_EXTENSIONS: &[&str] = &[".mkv", ".mp4", ".avi"];

/// Result of a download lookup.
#[derive(Debug)]
pub enum DownloadOutcome {
    /// The lookup has not finished yet.
    Pending,
    /// A link with an accepted extension was found.
    Found(String),
    /// Both stages answered, but nothing usable came back.
    NotFound,
    /// One of the stages failed.
    LookupFailed(DownloadLookupError),
}

impl DownloadOutcome {
    /// Returns the link when one was found.
    ///
    /// `Pending`, `NotFound` and `LookupFailed` all map to `None`.
    #[must_use]
    pub fn link(&self) -> Option<&str> {
        match self {
            Self::Found(link) => Some(link),
            Self::Pending | Self::NotFound | Self::LookupFailed(_) => None,
        }
    }

    /// Returns `true` while the lookup is still running.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

/// Lookup stage that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupStage {
    /// Catalog title search.
    TitleSearch,
    /// File-search query.
    FileSearch,
}

impl fmt::Display for LookupStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TitleSearch => write!(f, "title search"),
            Self::FileSearch => write!(f, "file search"),
        }
    }
}

/// Failure of one download lookup stage.
#[derive(Debug)]
pub struct DownloadLookupError {
    /// Stage that failed.
    pub stage: LookupStage,
    /// Rendered cause chain.
    pub message: String,
}

impl fmt::Display for DownloadLookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: {}", self.stage, self.message)
    }
}

impl std::error::Error for DownloadLookupError {}

/// Suffix allow-list applied to file-search links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadFilter {
    /// Accepted suffixes, matched exactly and case-sensitively.
    extensions: Vec<String>,
}

impl Default for DownloadFilter {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSIONS.iter().copied())
    }
}

impl DownloadFilter {
    /// Creates a filter from a list of suffixes such as `".mkv"`.
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            extensions: extensions.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the accepted suffixes.
    #[must_use]
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Returns `true` if `link` ends with one of the accepted suffixes.
    #[must_use]
    pub fn accepts(&self, link: &str) -> bool {
        self.extensions.iter().any(|ext| link.ends_with(ext.as_str()))
    }

    /// Returns the first item whose link is accepted, in list order.
    #[must_use]
    pub fn select<'a>(&self, items: &'a [FileSearchItem]) -> Option<&'a FileSearchItem> {
        items.iter().find(|item| self.accepts(&item.link))
    }
}

/// Resolves a download link for a movie titled `title`.
///
/// Stage 1 searches the catalog for `title` and takes the first result's
/// title. Stage 2 queries the file index with that title and applies
/// `filter`. The stages run strictly in sequence.
#[instrument(skip_all, fields(title = title))]
pub async fn resolve_download(
    tmdb: &(impl LocalTmdbApi + Sync),
    files: &(impl LocalFileSearchApi + Sync),
    title: &str,
    language: &str,
    filter: &DownloadFilter,
) -> DownloadOutcome {
    let params = SearchMovieParams::new(title).language(language);
    let matched_title = match tmdb.search_movie(&params).await {
        Ok(response) => match response.results.into_iter().next() {
            Some(first) => first.title,
            None => {
                tracing::debug!("Title search returned no results");
                return DownloadOutcome::NotFound;
            }
        },
        Err(e) => return lookup_failed(LookupStage::TitleSearch, &e),
    };

    let items = match files.search(&matched_title).await {
        Ok(items) => items,
        Err(e) => return lookup_failed(LookupStage::FileSearch, &e),
    };

    match filter.select(&items) {
        Some(item) => {
            tracing::debug!(link = %item.link, candidates = items.len(), "Download link found");
            DownloadOutcome::Found(item.link.clone())
        }
        None => {
            tracing::debug!(
                candidates = items.len(),
                "No candidate with an accepted extension"
            );
            DownloadOutcome::NotFound
        }
    }
}

/// Resolves a file-search link against the endpoint it came from.
///
/// Absolute URLs are returned unchanged. Relative links are appended one
/// path segment at a time, so `#`, `?` and spaces in file names are
/// percent-encoded instead of starting a fragment or query.
#[must_use]
pub fn resolve_link(base: &Url, link: &str) -> String {
    if link.contains("://")
        && let Ok(url) = Url::parse(link)
    {
        return url.to_string();
    }

    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);
    let Ok(mut segments) = url.path_segments_mut() else {
        return link.to_owned();
    };
    if link.starts_with('/') {
        segments.clear();
    } else {
        segments.pop();
    }
    segments.extend(link.split('/').filter(|segment| !segment.is_empty()));
    drop(segments);
    url.to_string()
}

/// Converts a stage error into a masked outcome.
///
/// Logged at debug level only: a failed lookup is not user-facing.
fn lookup_failed(stage: LookupStage, error: &anyhow::Error) -> DownloadOutcome {
    tracing::debug!(%stage, error = %format!("{error:#}"), "Download lookup failed");
    DownloadOutcome::LookupFailed(DownloadLookupError {
        stage,
        message: format!("{error:#}"),
    })
}
