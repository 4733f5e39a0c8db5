//! Per-page display state.
//!
//! A session owns the state of the page currently on screen. Every
//! navigation hands out a [`LoadTicket`]; results are applied only when
//! their ticket is still the latest one, so a slow response for a movie the
//! user already left can never overwrite the page they are looking at.

use crate::details::RetrievalError;
use crate::download::DownloadOutcome;
use crate::page::MoviePage;

/// Identifies one page load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    /// Monotonic navigation counter.
    generation: u64,
    /// Movie the load was started for.
    movie_id: u64,
}

impl LoadTicket {
    /// Returns the movie this load was started for.
    #[must_use]
    pub const fn movie_id(&self) -> u64 {
        self.movie_id
    }
}

/// What the page currently shows.
#[derive(Debug)]
pub enum PageState {
    /// Nothing requested yet.
    Idle,
    /// A load is in flight.
    Loading,
    /// The detail fetch failed; nothing to show.
    Failed(RetrievalError),
    /// Details resolved. The download outcome may still be pending.
    Ready(Box<MoviePage>),
}

/// Trailer playback state. `Idle -> Playing` only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrailerPlayback {
    /// Showing the "Watch Trailer" prompt.
    #[default]
    Idle,
    /// The embedded player is active.
    Playing,
}

/// State of the movie page on screen.
#[derive(Debug)]
pub struct PageSession {
    /// Generation of the latest navigation.
    generation: u64,
    /// Movie of the latest navigation.
    movie_id: Option<u64>,
    /// Current page state.
    state: PageState,
    /// Trailer playback state.
    playback: TrailerPlayback,
}

impl Default for PageSession {
    fn default() -> Self {
        Self::new()
    }
}

impl PageSession {
    /// Creates an empty session.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            generation: 0,
            movie_id: None,
            state: PageState::Idle,
            playback: TrailerPlayback::Idle,
        }
    }

    /// Starts a new page for `movie_id` and returns the ticket its load
    /// result must carry.
    ///
    /// Resets the page to `Loading` and the trailer to `Idle`. Any earlier
    /// ticket becomes stale.
    pub fn navigate(&mut self, movie_id: u64) -> LoadTicket {
        self.generation = self.generation.wrapping_add(1);
        self.movie_id = Some(movie_id);
        self.state = PageState::Loading;
        self.playback = TrailerPlayback::Idle;
        LoadTicket {
            generation: self.generation,
            movie_id,
        }
    }

    /// Applies a load result. Returns `false` and drops the result when the
    /// ticket is stale.
    pub fn apply(
        &mut self,
        ticket: LoadTicket,
        result: Result<MoviePage, RetrievalError>,
    ) -> bool {
        if !self.is_current(ticket) {
            return false;
        }

        self.state = match result {
            Ok(page) => PageState::Ready(Box::new(page)),
            Err(e) => PageState::Failed(e),
        };
        true
    }

    /// Fills in the download outcome of the page on screen.
    ///
    /// Returns `false` and drops the outcome when the ticket is stale or the
    /// page is not `Ready`.
    pub fn apply_download(&mut self, ticket: LoadTicket, outcome: DownloadOutcome) -> bool {
        if !self.is_current(ticket) {
            return false;
        }

        match &mut self.state {
            PageState::Ready(page) => {
                page.download = outcome;
                true
            }
            PageState::Idle | PageState::Loading | PageState::Failed(_) => false,
        }
    }

    /// Returns `true` if `ticket` belongs to the latest navigation.
    fn is_current(&self, ticket: LoadTicket) -> bool {
        if ticket.generation == self.generation {
            return true;
        }
        tracing::debug!(
            stale_movie_id = ticket.movie_id,
            current_movie_id = self.movie_id,
            "Discarding stale page result"
        );
        false
    }

    /// Switches the trailer to `Playing`.
    ///
    /// Only possible once the page is ready and has a trailer key. Returns
    /// `true` on the transition itself; further calls change nothing and
    /// return `false`.
    pub fn trigger_trailer(&mut self) -> bool {
        let has_trailer = matches!(
            &self.state,
            PageState::Ready(page) if page.trailer_key.is_some()
        );
        if !has_trailer || self.playback == TrailerPlayback::Playing {
            return false;
        }
        self.playback = TrailerPlayback::Playing;
        true
    }

    /// Returns the current page state.
    #[must_use]
    pub const fn state(&self) -> &PageState {
        &self.state
    }

    /// Returns the trailer playback state.
    #[must_use]
    pub const fn playback(&self) -> TrailerPlayback {
        self.playback
    }

    /// Returns the movie of the latest navigation.
    #[must_use]
    pub const fn movie_id(&self) -> Option<u64> {
        self.movie_id
    }

    /// Returns the resolved page, if ready.
    #[must_use]
    pub fn page(&self) -> Option<&MoviePage> {
        match &self.state {
            PageState::Ready(page) => Some(page.as_ref()),
            PageState::Idle | PageState::Loading | PageState::Failed(_) => None,
        }
    }
}
