//! Trailer resolver.

use cinedeck_api::tmdb::TmdbMovieDetails;

/// Video type label that marks a trailer (exact, case-sensitive).
const TRAILER_TYPE: &str = "Trailer";

/// Returns the key of the first video labelled `"Trailer"`, in list order.
#[must_use]
pub fn resolve_trailer(details: &TmdbMovieDetails) -> Option<&str> {
    details
        .videos
        .results
        .iter()
        .find(|video| video.video_type == TRAILER_TYPE)
        .map(|video| video.key.as_str())
}
