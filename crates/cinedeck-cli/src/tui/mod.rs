//! Movie viewer TUI.
//!
//! Uses `ratatui` + `crossterm` for rendering. Page loads run on a
//! background loader so the screen stays responsive while requests are in
//! flight.

/// Background page loader.
pub mod loader;
/// Viewer state types.
pub mod state;
mod ui;

use std::io;

use anyhow::{Context, Result};
use cinedeck_api::filesearch::LocalFileSearchApi;
use cinedeck_api::tmdb::LocalTmdbApi;
use cinedeck_core::{PageRequest, ViewOptions, resolve_link};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use url::Url;

use self::loader::PageLoader;
use self::state::{InputMode, ViewerState};

/// Runs the movie viewer TUI, starting with `request.movie_id`.
///
/// `link_base` resolves relative download links into openable URLs.
///
/// # Errors
///
/// Returns an error if terminal setup, the loader or event handling fails.
pub fn run_movie_viewer<T, F>(
    tmdb: T,
    files: F,
    request: PageRequest,
    options: ViewOptions,
    link_base: Url,
) -> Result<()>
where
    T: LocalTmdbApi + Send + Sync + 'static,
    F: LocalFileSearchApi + Send + Sync + 'static,
{
    let loader = PageLoader::spawn(tmdb, files)?;
    let first_movie_id = request.movie_id;
    let mut viewer = Viewer {
        state: ViewerState::new(options),
        loader,
        request,
        link_base,
    };
    viewer.navigate(first_movie_id)?;

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let result = run_event_loop(&mut terminal, &mut viewer);

    // Cleanup (always attempt even if event loop failed)
    disable_raw_mode().context("failed to disable raw mode")?;
    crossterm::execute!(io::stdout(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;

    result
}

/// Viewer state plus the plumbing needed to start loads.
#[derive(Debug)]
struct Viewer {
    /// Display state.
    state: ViewerState,
    /// Background loader.
    loader: PageLoader,
    /// Template for new page requests (language, filter).
    request: PageRequest,
    /// Base for relative download links.
    link_base: Url,
}

impl Viewer {
    /// Starts loading `movie_id`.
    fn navigate(&mut self, movie_id: u64) -> Result<()> {
        let ticket = self.state.navigate(movie_id);
        let mut request = self.request.clone();
        request.movie_id = movie_id;
        self.loader.request(ticket, request)
    }

    /// Applies every pending load event.
    fn drain_events(&mut self) {
        while let Some(event) = self.loader.try_next() {
            event.apply_to(&mut self.state.session);
        }
    }

    /// Opens `url` in the system browser and reports the outcome in the footer.
    fn open_url(&mut self, url: &str) {
        self.state.status = Some(match open::that(url) {
            Ok(()) => format!("Opened {url}"),
            Err(e) => {
                tracing::debug!(url, error = %e, "Failed to open URL");
                format!("Failed to open {url}: {e}")
            }
        });
    }
}

/// Main event loop.
fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    viewer: &mut Viewer,
) -> Result<()> {
    loop {
        viewer.drain_events();

        terminal
            .draw(|frame| ui::draw(frame, &viewer.state))
            .context("failed to draw TUI")?;

        if event::poll(std::time::Duration::from_millis(100)).context("failed to poll events")?
            && let Event::Key(key) = event::read().context("failed to read event")?
            && key.kind == KeyEventKind::Press
        {
            match viewer.state.input_mode {
                InputMode::MovieId => handle_movie_id_input(viewer, key.code)?,
                InputMode::Normal => {
                    if handle_normal_input(viewer, key.code, key.modifiers) {
                        return Ok(());
                    }
                }
            }
        }
    }
}

/// Handles key input in movie ID mode.
fn handle_movie_id_input(viewer: &mut Viewer, key: KeyCode) -> Result<()> {
    match key {
        KeyCode::Esc => viewer.state.cancel_input(),
        KeyCode::Enter => {
            if let Some(movie_id) = viewer.state.take_input() {
                viewer.navigate(movie_id)?;
            }
        }
        KeyCode::Backspace => viewer.state.input_pop(),
        KeyCode::Char(c) => viewer.state.input_push(c),
        _ => {}
    }
    Ok(())
}

/// Handles key input in normal mode. Returns `true` to exit.
fn handle_normal_input(viewer: &mut Viewer, key: KeyCode, modifiers: KeyModifiers) -> bool {
    match key {
        KeyCode::Char('q') => return true,
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return true,
        KeyCode::Char('/') => viewer.state.begin_input(),
        KeyCode::Char('t') => {
            if let Some(url) = viewer.state.trigger_trailer() {
                viewer.open_url(&url);
            }
        }
        KeyCode::Char('d') => {
            let link = viewer
                .state
                .view()
                .and_then(|view| view.download_link)
                .map(|link| resolve_link(&viewer.link_base, &link));
            if let Some(url) = link {
                viewer.open_url(&url);
            }
        }
        KeyCode::Char('b') => {
            if let Some(url) = viewer.state.view().and_then(|view| view.backdrop_url) {
                viewer.open_url(&url);
            }
        }
        _ => {}
    }
    false
}
