//! Display formatting for movie fields.

use chrono::NaiveDate;
use cinedeck_api::tmdb::TmdbGenre;

/// Maximum number of genres shown in the metadata strip.
const MAX_GENRES: usize = 2;

/// Formats a runtime as `"{h}h {m}m"`. A missing runtime reads as zero.
#[must_use]
pub fn format_runtime(minutes: Option<u32>) -> String {
    let minutes = minutes.unwrap_or(0);
    format!("{}h {}m", minutes / 60, minutes % 60)
}

/// Formats a `YYYY-MM-DD` release date as `"Month D, YYYY"`.
///
/// Works on the calendar date alone, so no time zone can shift the day.
/// Returns `None` for empty or unparseable input.
#[must_use]
pub fn format_release_date(date: &str) -> Option<String> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .ok()
        .map(|d| d.format("%B %-d, %Y").to_string())
}

/// Returns the first two genre names in list order.
#[must_use]
pub fn leading_genres(genres: &[TmdbGenre]) -> Vec<&str> {
    genres
        .iter()
        .take(MAX_GENRES)
        .map(|g| g.name.as_str())
        .collect()
}

/// Formats a vote average with one decimal place.
#[must_use]
pub fn format_vote_average(average: f64) -> String {
    format!("{average:.1}")
}

/// Formats a vote count as hundreds, zero-padded to three digits, plus `"k"`.
///
/// Lossy by construction: 245000 reads as `"2450k"`.
#[must_use]
pub fn format_vote_count(count: u32) -> String {
    format!("{:03}k", count / 100)
}
