//! Movie viewer TUI state.

use cinedeck_core::{LoadTicket, MovieView, PageSession, TrailerRegion, ViewOptions};

/// Input mode for the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Normal key handling.
    Normal,
    /// Typing another movie ID.
    MovieId,
}

/// State for the movie viewer TUI.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct ViewerState {
    /// Page currently on screen.
    pub session: PageSession,
    /// Rendering options.
    pub options: ViewOptions,
    /// Current input mode.
    pub input_mode: InputMode,
    /// Movie ID being typed in `MovieId` mode.
    pub id_input: String,
    /// One-line status message for the footer.
    pub status: Option<String>,
}

impl ViewerState {
    /// Creates a state with no page loaded.
    #[must_use]
    pub fn new(options: ViewOptions) -> Self {
        Self {
            session: PageSession::new(),
            options,
            input_mode: InputMode::Normal,
            id_input: String::new(),
            status: None,
        }
    }

    /// Starts a new page and returns the ticket its load must carry.
    pub fn navigate(&mut self, movie_id: u64) -> LoadTicket {
        self.status = None;
        self.session.navigate(movie_id)
    }

    /// Builds the view model for the ready page.
    #[must_use]
    pub fn view(&self) -> Option<MovieView> {
        self.session
            .page()
            .map(|page| MovieView::build(page, self.session.playback(), &self.options))
    }

    /// Switches the trailer to playing. Returns the player URL on the
    /// transition, `None` when nothing changed.
    pub fn trigger_trailer(&mut self) -> Option<String> {
        if !self.session.trigger_trailer() {
            return None;
        }
        match self.view()?.trailer {
            TrailerRegion::Player { embed_url } => Some(embed_url),
            TrailerRegion::Hidden | TrailerRegion::Prompt => None,
        }
    }

    /// Enters movie ID input mode.
    pub fn begin_input(&mut self) {
        self.id_input.clear();
        self.input_mode = InputMode::MovieId;
    }

    /// Leaves movie ID input mode without navigating.
    pub fn cancel_input(&mut self) {
        self.id_input.clear();
        self.input_mode = InputMode::Normal;
    }

    /// Appends a digit to the movie ID input. Other characters are ignored.
    pub fn input_push(&mut self, ch: char) {
        if ch.is_ascii_digit() {
            self.id_input.push(ch);
        }
    }

    /// Removes the last character from the movie ID input.
    pub fn input_pop(&mut self) {
        self.id_input.pop();
    }

    /// Leaves input mode and returns the parsed movie ID, if valid.
    pub fn take_input(&mut self) -> Option<u64> {
        let input = std::mem::take(&mut self.id_input);
        self.input_mode = InputMode::Normal;
        match input.parse::<u64>() {
            Ok(id) => Some(id),
            Err(_) => {
                if !input.is_empty() {
                    self.status = Some(format!("Invalid movie ID: {input}"));
                }
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use cinedeck_core::{DownloadOutcome, MoviePage, PageState, TrailerPlayback};

    use super::*;

    fn page(trailer_key: Option<&str>) -> MoviePage {
        let json = include_str!("../../../../fixtures/tmdb/movie_details_361743.json");
        MoviePage {
            details: serde_json::from_str(json).unwrap(),
            trailer_key: trailer_key.map(String::from),
            download: DownloadOutcome::Found(String::from("/0:/Top.Gun.mkv")),
        }
    }

    #[test]
    fn test_initial_state() {
        // Arrange & Act
        let state = ViewerState::new(ViewOptions::default());

        // Assert
        assert_eq!(state.input_mode, InputMode::Normal);
        assert!(matches!(state.session.state(), PageState::Idle));
        assert!(state.view().is_none());
    }

    #[test]
    fn test_view_after_load() {
        // Arrange
        let mut state = ViewerState::new(ViewOptions::default());
        let ticket = state.navigate(361_743);

        // Act
        state.session.apply(ticket, Ok(page(Some("giXco2jaZ_4"))));
        let view = state.view().unwrap();

        // Assert
        assert_eq!(view.title, "Top Gun: Maverick");
        assert_eq!(view.download_link.as_deref(), Some("/0:/Top.Gun.mkv"));
    }

    #[test]
    fn test_trigger_trailer_returns_url_once() {
        // Arrange
        let mut state = ViewerState::new(ViewOptions::default());
        let ticket = state.navigate(361_743);
        state.session.apply(ticket, Ok(page(Some("giXco2jaZ_4"))));

        // Act
        let first = state.trigger_trailer();
        let second = state.trigger_trailer();

        // Assert
        assert_eq!(
            first.as_deref(),
            Some("https://www.youtube.com/embed/giXco2jaZ_4?autoplay=1")
        );
        assert_eq!(second, None);
        assert_eq!(state.session.playback(), TrailerPlayback::Playing);
    }

    #[test]
    fn test_trigger_trailer_without_key() {
        // Arrange
        let mut state = ViewerState::new(ViewOptions::default());
        let ticket = state.navigate(1);
        state.session.apply(ticket, Ok(page(None)));

        // Act & Assert
        assert_eq!(state.trigger_trailer(), None);
    }

    #[test]
    fn test_input_accepts_digits_only() {
        // Arrange
        let mut state = ViewerState::new(ViewOptions::default());
        state.begin_input();

        // Act
        for ch in "5a5x0".chars() {
            state.input_push(ch);
        }
        state.input_pop();
        state.input_push('0');

        // Assert
        assert_eq!(state.id_input, "550");
        assert_eq!(state.take_input(), Some(550));
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_take_empty_input() {
        // Arrange
        let mut state = ViewerState::new(ViewOptions::default());
        state.begin_input();

        // Act
        let id = state.take_input();

        // Assert
        assert_eq!(id, None);
        assert_eq!(state.status, None);
    }

    #[test]
    fn test_take_overflowing_input_sets_status() {
        // Arrange
        let mut state = ViewerState::new(ViewOptions::default());
        state.begin_input();
        for ch in "99999999999999999999999".chars() {
            state.input_push(ch);
        }

        // Act
        let id = state.take_input();

        // Assert
        assert_eq!(id, None);
        assert!(state.status.unwrap().starts_with("Invalid movie ID"));
    }

    #[test]
    fn test_cancel_input() {
        // Arrange
        let mut state = ViewerState::new(ViewOptions::default());
        state.begin_input();
        state.input_push('7');

        // Act
        state.cancel_input();

        // Assert
        assert!(state.id_input.is_empty());
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_navigate_clears_status() {
        // Arrange
        let mut state = ViewerState::new(ViewOptions::default());
        state.status = Some(String::from("Opened something"));

        // Act
        state.navigate(2);

        // Assert
        assert_eq!(state.status, None);
        assert!(matches!(state.session.state(), PageState::Loading));
    }
}
