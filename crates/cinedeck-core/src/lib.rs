//! Movie page pipeline and view model for cinedeck.
//!
//! Fetches one movie's details, resolves its trailer and a best-effort
//! download link, and turns the result into display-ready values.

/// Static placeholder credits.
pub mod credits;
/// Detail fetcher.
pub mod details;
/// Download link resolver.
pub mod download;
/// Display formatting helpers.
pub mod format;
/// Page load pipeline.
pub mod page;
/// Per-page state and stale-result guard.
pub mod session;
/// Trailer resolver.
pub mod trailer;
/// View model.
pub mod view;

pub use credits::StaticCredits;
pub use details::{RetrievalError, fetch_details};
pub use download::{
    DEFAULT_EXTENSIONS, DownloadFilter, DownloadLookupError, DownloadOutcome, LookupStage,
    resolve_download, resolve_link,
};
pub use page::{MoviePage, PageRequest, load_details, load_page};
pub use session::{LoadTicket, PageSession, PageState, TrailerPlayback};
pub use trailer::resolve_trailer;
pub use view::{
    DEFAULT_EMBED_BASE_URL, DEFAULT_IMAGE_BASE_URL, MovieView, TrailerRegion, ViewOptions,
};
