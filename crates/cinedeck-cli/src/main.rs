//! cinedeck - movie details viewer.

/// Application configuration (TOML).
mod config;
/// Terminal UI components.
mod tui;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;
use url::Url;

use crate::config::{AppConfig, resolve_config_path};
use crate::tui::run_movie_viewer;
use cinedeck_api::filesearch::{FileSearchClient, LocalFileSearchApi};
use cinedeck_api::tmdb::{LocalTmdbApi, SearchMovieParams, TmdbClient};
use cinedeck_core::view::embed_url;
use cinedeck_core::{
    MoviePage, MovieView, PageRequest, TrailerPlayback, load_page, resolve_link,
};

/// User-Agent sent with every request.
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Show a movie page.
    Movie(MovieCommand),
    /// Query TMDB API.
    Tmdb(TmdbCommand),
    /// Query the file-search endpoint.
    Files(FilesCommand),
    /// Manage the config file.
    Config(ConfigCommand),
    /// Generate shell completions.
    Completions(CompletionsArgs),
}

/// Arguments for the `movie` subcommand.
#[derive(clap::Args)]
struct MovieCommand {
    /// Movie subcommand to run.
    #[command(subcommand)]
    command: MovieSubcommands,
}

/// Available movie subcommands.
#[derive(Subcommand)]
enum MovieSubcommands {
    /// Print a movie page to the log.
    Show(MovieArgs),
    /// Browse movie pages in the terminal UI.
    View(MovieArgs),
}

/// Arguments for `movie show` and `movie view`.
#[derive(clap::Args)]
struct MovieArgs {
    /// TMDB movie ID (e.g. 361743).
    #[arg(long, required = true)]
    id: u64,
    /// Response language (default: config `tmdb.language`).
    #[arg(long)]
    language: Option<String>,
}

/// Arguments for the `tmdb` subcommand.
#[derive(clap::Args)]
struct TmdbCommand {
    /// TMDB subcommand to run.
    #[command(subcommand)]
    command: TmdbSubcommands,
}

/// Available TMDB subcommands.
#[derive(Subcommand)]
enum TmdbSubcommands {
    /// Search for movies on TMDB.
    SearchMovie(TmdbSearchMovieArgs),
    /// Get movie details (with videos) from TMDB.
    MovieDetails(TmdbMovieDetailsArgs),
}

/// Arguments for the `tmdb search-movie` subcommand.
#[derive(clap::Args)]
struct TmdbSearchMovieArgs {
    /// Search query (e.g. "Top Gun: Maverick").
    #[arg(long, required = true)]
    query: String,
    /// Response language (default: "en-US").
    #[arg(long, default_value = "en-US")]
    language: String,
    /// Filter by year.
    #[arg(long)]
    year: Option<u32>,
}

/// Arguments for the `tmdb movie-details` subcommand.
#[derive(clap::Args)]
struct TmdbMovieDetailsArgs {
    /// TMDB movie ID.
    #[arg(long, required = true)]
    id: u64,
    /// Response language (default: "en-US").
    #[arg(long, default_value = "en-US")]
    language: String,
}

/// Arguments for the `files` subcommand.
#[derive(clap::Args)]
struct FilesCommand {
    /// Files subcommand to run.
    #[command(subcommand)]
    command: FilesSubcommands,
}

/// Available file-search subcommands.
#[derive(Subcommand)]
enum FilesSubcommands {
    /// Search the file index by title.
    Search(FilesSearchArgs),
}

/// Arguments for the `files search` subcommand.
#[derive(clap::Args)]
struct FilesSearchArgs {
    /// Search query (usually a movie title).
    #[arg(long, required = true)]
    query: String,
}

/// Arguments for the `config` subcommand.
#[derive(clap::Args)]
struct ConfigCommand {
    /// Config subcommand to run.
    #[command(subcommand)]
    command: ConfigSubcommands,
}

/// Available config subcommands.
#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Print the resolved config file path.
    Path,
    /// Write a config file with default values.
    Init(ConfigInitArgs),
}

/// Arguments for the `config init` subcommand.
#[derive(clap::Args)]
struct ConfigInitArgs {
    /// Overwrite an existing config file.
    #[arg(long)]
    force: bool,
}

/// Arguments for the `completions` subcommand.
#[derive(clap::Args)]
struct CompletionsArgs {
    /// Target shell.
    #[arg(long, required = true)]
    shell: Shell,
}

/// Loads the config file for `dir`.
///
/// # Errors
///
/// Returns an error if the path cannot be resolved or the file is invalid.
fn load_config(dir: Option<&PathBuf>) -> Result<AppConfig> {
    let path = resolve_config_path(dir)?;
    AppConfig::load(&path)
}

/// Builds a `TmdbClient` from the `TMDB_API_TOKEN` environment variable.
///
/// # Errors
///
/// Returns an error if `TMDB_API_TOKEN` is not set or the client fails to build.
#[instrument(skip_all)]
fn build_tmdb_client(config: &AppConfig) -> Result<TmdbClient> {
    let api_token = std::env::var("TMDB_API_TOKEN")
        .context("TMDB_API_TOKEN environment variable is required")?;
    let base_url = Url::parse(&config.tmdb.base_url)
        .with_context(|| format!("invalid tmdb.base_url: {}", config.tmdb.base_url))?;

    TmdbClient::builder()
        .base_url(base_url)
        .api_token(api_token)
        .user_agent(USER_AGENT)
        .build()
        .context("failed to build TMDB client")
}

/// Builds a `FileSearchClient` from the config.
///
/// # Errors
///
/// Returns an error if the endpoint URL is invalid or the client fails to build.
#[instrument(skip_all)]
fn build_file_search_client(config: &AppConfig) -> Result<FileSearchClient> {
    let endpoint = Url::parse(&config.file_search.base_url)
        .with_context(|| format!("invalid file_search.base_url: {}", config.file_search.base_url))?;

    FileSearchClient::builder()
        .endpoint(endpoint)
        .user_agent(USER_AGENT)
        .timeout(config.file_search.timeout())
        .build()
        .context("failed to build file search client")
}

/// Builds the page request for `args`.
fn page_request(config: &AppConfig, args: &MovieArgs) -> PageRequest {
    let language = args
        .language
        .clone()
        .unwrap_or_else(|| config.tmdb.language.clone());
    PageRequest::new(args.id)
        .language(language)
        .filter(config.download_filter())
}

/// Runs the `movie show` subcommand.
///
/// A failed detail fetch is reported as the "no data" state, not as an error.
///
/// # Errors
///
/// Returns an error if the config is invalid or a client fails to build.
#[instrument(skip_all, fields(movie_id = args.id))]
async fn run_movie_show(args: &MovieArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let tmdb = build_tmdb_client(&config)?;
    let files = build_file_search_client(&config)?;
    let request = page_request(&config, args);

    match load_page(&tmdb, &files, &request).await {
        Ok(page) => log_page(&page, &config, files.endpoint()),
        Err(e) => {
            tracing::info!("No data available for movie {}", args.id);
            tracing::warn!("{e}");
        }
    }

    Ok(())
}

/// Logs a resolved movie page.
fn log_page(page: &MoviePage, config: &AppConfig, link_base: &Url) {
    let view = MovieView::build(page, TrailerPlayback::Idle, &config.view_options());

    tracing::info!("{}", view.title);
    if let Some(tagline) = &view.tagline {
        tracing::info!("{tagline}");
    }
    tracing::info!(
        "{} · {} · {} · {}",
        view.release_date,
        view.certification,
        view.runtime,
        view.genres.join(", ")
    );
    tracing::info!("Rating: {}/10 ({} votes)", view.rating, view.votes);
    tracing::info!("Top rated movie #{}", view.credits.top_rated_rank);
    tracing::info!("{}", view.credits.awards);
    tracing::info!("Overview: {}", view.overview);
    tracing::info!("Director: {}", view.credits.directors.join(", "));
    tracing::info!("Writers: {}", view.credits.writers.join(", "));
    tracing::info!("Stars: {}", view.credits.stars.join(", "));

    if let Some(key) = &page.trailer_key {
        tracing::info!(
            "Trailer: {}",
            embed_url(&config.trailer.embed_base_url, key, false)
        );
    }
    if let Some(link) = &view.download_link {
        tracing::info!("Download: {}", resolve_link(link_base, link));
    }
    if let Some(backdrop) = &view.backdrop_url {
        tracing::info!("Backdrop: {backdrop}");
    }
}

/// Runs the `movie view` subcommand.
///
/// # Errors
///
/// Returns an error if the config is invalid, a client fails to build or the TUI fails.
#[instrument(skip_all, fields(movie_id = args.id))]
fn run_movie_view(args: &MovieArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let tmdb = build_tmdb_client(&config)?;
    let files = build_file_search_client(&config)?;
    let link_base = files.endpoint().clone();
    let request = page_request(&config, args);

    run_movie_viewer(tmdb, files, request, config.view_options(), link_base)
        .context("movie viewer TUI failed")
}

/// Runs the `tmdb search-movie` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_tmdb_search_movie(args: &TmdbSearchMovieArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_tmdb_client(&config)?;

    let mut params = SearchMovieParams::new(&args.query).language(&args.language);
    if let Some(year) = args.year {
        params = params.year(year);
    }

    let response = client
        .search_movie(&params)
        .await
        .context("TMDB search/movie request failed")?;

    tracing::info!("Total results: {}", response.total_results);
    tracing::info!("ID\tTitle\t\t\tReleaseDate");
    for result in &response.results {
        tracing::info!(
            "{}\t{}\t{}",
            result.id,
            result.title,
            result.release_date.as_deref().unwrap_or("-"),
        );
    }

    Ok(())
}

/// Runs the `tmdb movie-details` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build or the API request fails.
#[instrument(skip_all, fields(movie_id = args.id))]
async fn run_tmdb_movie_details(
    args: &TmdbMovieDetailsArgs,
    dir: Option<&PathBuf>,
) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_tmdb_client(&config)?;

    let details = client
        .movie_details(args.id, &args.language)
        .await
        .context("TMDB movie details request failed")?;

    tracing::info!("ID: {}", details.id);
    tracing::info!("Title: {}", details.title);
    tracing::info!(
        "Release date: {}",
        details.release_date.as_deref().unwrap_or("-")
    );
    tracing::info!(
        "Runtime: {}",
        details
            .runtime
            .map_or_else(|| String::from("-"), |m| format!("{m} min"))
    );
    tracing::info!(
        "Genres: {}",
        details
            .genres
            .iter()
            .map(|g| g.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    tracing::info!(
        "Votes: {} ({} votes)",
        details.vote_average,
        details.vote_count
    );
    tracing::info!("Videos: {}", details.videos.results.len());
    tracing::info!("Type\t\tKey\t\tName");
    for video in &details.videos.results {
        tracing::info!(
            "{}\t\t{}\t{}",
            video.video_type,
            video.key,
            video.name.as_deref().unwrap_or("-"),
        );
    }

    Ok(())
}

/// Runs the `files search` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the request fails.
#[instrument(skip_all)]
async fn run_files_search(args: &FilesSearchArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_file_search_client(&config)?;
    let filter = config.download_filter();

    let items = client
        .search(&args.query)
        .await
        .context("file search request failed")?;

    tracing::info!("Total results: {}", items.len());
    for item in &items {
        let marker = if filter.accepts(&item.link) { "*" } else { " " };
        tracing::info!(
            "{marker} {}\t{}",
            item.link,
            item.size.as_deref().unwrap_or("-"),
        );
    }

    Ok(())
}

/// Runs the `config path` subcommand.
///
/// # Errors
///
/// Returns an error if the path cannot be resolved.
fn run_config_path(dir: Option<&PathBuf>) -> Result<()> {
    let path = resolve_config_path(dir)?;
    tracing::info!("{}", path.display());
    Ok(())
}

/// Runs the `config init` subcommand.
///
/// # Errors
///
/// Returns an error if the file exists (without `--force`) or cannot be written.
#[instrument(skip_all)]
fn run_config_init(args: &ConfigInitArgs, dir: Option<&PathBuf>) -> Result<()> {
    let path = resolve_config_path(dir)?;
    if path.exists() && !args.force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    AppConfig::default().save(&path)?;
    tracing::info!("Wrote {}", path.display());
    Ok(())
}

/// Runs the `completions` subcommand.
fn run_completions(args: &CompletionsArgs) {
    let mut cmd = Cli::command();
    clap_complete::generate(args.shell, &mut cmd, env!("CARGO_BIN_NAME"), &mut io::stdout());
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    let cli = Cli::parse();
    let dir = cli.dir.as_ref();
    match cli.command {
        Commands::Movie(movie) => match movie.command {
            MovieSubcommands::Show(args) => run_movie_show(&args, dir).await,
            MovieSubcommands::View(args) => run_movie_view(&args, dir),
        },
        Commands::Tmdb(tmdb) => match tmdb.command {
            TmdbSubcommands::SearchMovie(args) => run_tmdb_search_movie(&args, dir).await,
            TmdbSubcommands::MovieDetails(args) => run_tmdb_movie_details(&args, dir).await,
        },
        Commands::Files(files) => match files.command {
            FilesSubcommands::Search(args) => run_files_search(&args, dir).await,
        },
        Commands::Config(config) => match config.command {
            ConfigSubcommands::Path => run_config_path(dir),
            ConfigSubcommands::Init(args) => run_config_init(&args, dir),
        },
        Commands::Completions(args) => {
            run_completions(&args);
            Ok(())
        }
    }
}
