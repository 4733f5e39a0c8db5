//! View model for a resolved movie page.
//!
//! Pure: turns a [`MoviePage`] plus the trailer playback state into
//! display-ready strings. Renderers only lay these out.

use url::Url;
use url::form_urlencoded::byte_serialize;

use crate::credits::StaticCredits;
use crate::format::{
    format_release_date, format_runtime, format_vote_average, format_vote_count, leading_genres,
};
use crate::page::MoviePage;
use crate::session::TrailerPlayback;

/// Default image host for backdrops.
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/original";

/// Default video embed host.
pub const DEFAULT_EMBED_BASE_URL: &str = "https://www.youtube.com/embed";

/// Rendering options that are not part of the fetched data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewOptions {
    /// Image host prefix for backdrop paths.
    pub image_base_url: String,
    /// Embed host prefix for trailer keys.
    pub embed_base_url: String,
    /// Placeholder credits.
    pub credits: StaticCredits,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            image_base_url: String::from(DEFAULT_IMAGE_BASE_URL),
            embed_base_url: String::from(DEFAULT_EMBED_BASE_URL),
            credits: StaticCredits::default(),
        }
    }
}

/// Trailer region contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrailerRegion {
    /// No trailer: the region is empty.
    Hidden,
    /// "Watch Trailer" prompt.
    Prompt,
    /// Embedded player pointed at the trailer, autoplaying.
    Player {
        /// Player URL.
        embed_url: String,
    },
}

/// Display-ready movie page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieView {
    /// Movie title.
    pub title: String,
    /// Tagline, if any.
    pub tagline: Option<String>,
    /// Long-form release date, `"-"` when unknown.
    pub release_date: String,
    /// Certification label.
    pub certification: String,
    /// Runtime as `"{h}h {m}m"`.
    pub runtime: String,
    /// Up to two genre names.
    pub genres: Vec<String>,
    /// Overview text.
    pub overview: String,
    /// Placeholder credits.
    pub credits: StaticCredits,
    /// Vote average with one decimal.
    pub rating: String,
    /// Approximate vote count label (e.g. `"2450k"`).
    pub votes: String,
    /// Backdrop image URL.
    pub backdrop_url: Option<String>,
    /// Trailer region.
    pub trailer: TrailerRegion,
    /// Download link; `None` hides the region.
    pub download_link: Option<String>,
}

impl MovieView {
    /// Builds the view for `page` given the trailer playback state.
    #[must_use]
    pub fn build(page: &MoviePage, playback: TrailerPlayback, options: &ViewOptions) -> Self {
        let details = &page.details;

        let trailer = match (page.trailer_key.as_deref(), playback) {
            (None, _) => TrailerRegion::Hidden,
            (Some(_), TrailerPlayback::Idle) => TrailerRegion::Prompt,
            (Some(key), TrailerPlayback::Playing) => TrailerRegion::Player {
                embed_url: embed_url(&options.embed_base_url, key, true),
            },
        };

        Self {
            title: details.title.clone(),
            tagline: details.tagline.clone().filter(|t| !t.is_empty()),
            release_date: details
                .release_date
                .as_deref()
                .and_then(format_release_date)
                .unwrap_or_else(|| String::from("-")),
            certification: options.credits.certification.clone(),
            runtime: format_runtime(details.runtime),
            genres: leading_genres(&details.genres)
                .into_iter()
                .map(String::from)
                .collect(),
            overview: details.overview.clone().unwrap_or_default(),
            credits: options.credits.clone(),
            rating: format_vote_average(details.vote_average),
            votes: format_vote_count(details.vote_count),
            backdrop_url: details
                .backdrop_path
                .as_deref()
                .map(|path| image_url(&options.image_base_url, path)),
            trailer,
            download_link: page.download.link().map(String::from),
        }
    }
}

/// Builds a player URL for a trailer key.
///
/// The key is percent-encoded as a single path segment.
#[must_use]
pub fn embed_url(base: &str, key: &str, autoplay: bool) -> String {
    let query = autoplay.then_some("autoplay=1");
    let Ok(mut url) = Url::parse(base) else {
        let key: String = byte_serialize(key.as_bytes()).collect();
        let base = base.trim_end_matches('/');
        return query.map_or_else(|| format!("{base}/{key}"), |q| format!("{base}/{key}?{q}"));
    };
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push(key);
    }
    url.set_query(query);
    url.to_string()
}

/// Builds an image URL from a catalog image path such as `"/abc.jpg"`.
#[must_use]
pub fn image_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
