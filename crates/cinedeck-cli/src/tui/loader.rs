//! Background page loader.
//!
//! Page loads run on a dedicated thread that owns a current-thread tokio
//! runtime, so the draw loop never blocks on the network. Requests go in
//! over an unbounded channel; load events come back over a std channel
//! that the draw loop drains without blocking.
//!
//! Each load reports twice: once when the details are in and once when
//! the download lookup finishes. Only the newest request is ever worked
//! on. A request that arrives while another load is running cancels it.

use std::sync::mpsc;

use anyhow::{Context, Result};
use cinedeck_api::filesearch::LocalFileSearchApi;
use cinedeck_api::tmdb::LocalTmdbApi;
use cinedeck_core::{
    DownloadOutcome, LoadTicket, MoviePage, PageRequest, PageSession, RetrievalError,
    load_details, resolve_download,
};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

/// A page load to run.
#[derive(Debug)]
struct LoadCommand {
    /// Ticket the events must carry.
    ticket: LoadTicket,
    /// Load inputs.
    request: PageRequest,
}

/// Progress of a page load.
#[derive(Debug)]
pub enum LoadEvent {
    /// The detail fetch finished. A page carries a pending download.
    Details {
        /// Ticket handed out when the load started.
        ticket: LoadTicket,
        /// Page or retrieval failure.
        result: Result<MoviePage, RetrievalError>,
    },
    /// The download lookup finished.
    Download {
        /// Ticket handed out when the load started.
        ticket: LoadTicket,
        /// Lookup outcome.
        outcome: DownloadOutcome,
    },
}

impl LoadEvent {
    /// Returns the ticket this event belongs to.
    #[must_use]
    pub const fn ticket(&self) -> LoadTicket {
        match self {
            Self::Details { ticket, .. } | Self::Download { ticket, .. } => *ticket,
        }
    }

    /// Applies the event to `session`. Returns `false` if it was dropped.
    pub fn apply_to(self, session: &mut PageSession) -> bool {
        match self {
            Self::Details { ticket, result } => session.apply(ticket, result),
            Self::Download { ticket, outcome } => session.apply_download(ticket, outcome),
        }
    }
}

/// Handle to the loader thread. Dropping it stops the thread.
#[derive(Debug)]
pub struct PageLoader {
    /// Command sender.
    commands: UnboundedSender<LoadCommand>,
    /// Event receiver.
    events: mpsc::Receiver<LoadEvent>,
}

impl PageLoader {
    /// Spawns the loader thread.
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime or the thread cannot be created.
    pub fn spawn<T, F>(tmdb: T, files: F) -> Result<Self>
    where
        T: LocalTmdbApi + Send + Sync + 'static,
        F: LocalFileSearchApi + Send + Sync + 'static,
    {
        let (command_tx, command_rx) = unbounded_channel::<LoadCommand>();
        let (event_tx, event_rx) = mpsc::channel();

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("failed to build loader runtime")?;

        std::thread::Builder::new()
            .name(String::from("page-loader"))
            .spawn(move || {
                runtime.block_on(serve(&tmdb, &files, command_rx, &event_tx));
            })
            .context("failed to spawn loader thread")?;

        Ok(Self {
            commands: command_tx,
            events: event_rx,
        })
    }

    /// Queues a page load, superseding any earlier one.
    ///
    /// # Errors
    ///
    /// Returns an error if the loader thread has exited.
    pub fn request(&self, ticket: LoadTicket, request: PageRequest) -> Result<()> {
        self.commands
            .send(LoadCommand { ticket, request })
            .ok()
            .context("page loader has stopped")
    }

    /// Returns the next load event without blocking.
    pub fn try_next(&self) -> Option<LoadEvent> {
        self.events.try_recv().ok()
    }
}

/// Command loop of the loader thread.
///
/// Runs until the handle is dropped or nobody listens for events anymore.
async fn serve<T, F>(
    tmdb: &T,
    files: &F,
    mut commands: UnboundedReceiver<LoadCommand>,
    events: &mpsc::Sender<LoadEvent>,
) where
    T: LocalTmdbApi + Sync,
    F: LocalFileSearchApi + Sync,
{
    let mut next = commands.recv().await;
    while let Some(mut command) = next.take() {
        while let Ok(newer) = commands.try_recv() {
            tracing::debug!(
                movie_id = command.ticket.movie_id(),
                "Skipping superseded page load"
            );
            command = newer;
        }

        let movie_id = command.ticket.movie_id();
        tokio::select! {
            biased;
            newer = commands.recv() => {
                tracing::debug!(movie_id, "Cancelling superseded page load");
                next = newer;
            }
            delivered = run_load(tmdb, files, command, events) => {
                if !delivered {
                    break;
                }
                next = commands.recv().await;
            }
        }
    }
}

/// Runs one load and reports its events. Returns `false` once the event
/// receiver is gone.
async fn run_load<T, F>(
    tmdb: &T,
    files: &F,
    command: LoadCommand,
    events: &mpsc::Sender<LoadEvent>,
) -> bool
where
    T: LocalTmdbApi + Sync,
    F: LocalFileSearchApi + Sync,
{
    let LoadCommand { ticket, request } = command;
    tracing::debug!(movie_id = ticket.movie_id(), "Loading page");

    let result = load_details(tmdb, &request).await;
    let title = result.as_ref().ok().map(|page| page.details.title.clone());
    if events.send(LoadEvent::Details { ticket, result }).is_err() {
        return false;
    }
    let Some(title) = title else {
        return true;
    };

    let outcome = resolve_download(tmdb, files, &title, &request.language, &request.filter).await;
    events.send(LoadEvent::Download { ticket, outcome }).is_ok()
}
