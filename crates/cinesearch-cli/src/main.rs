//! cinesearch - OMDb movie search CLI and terminal browser.

/// Application configuration (TOML).
mod config;
/// Tracing subscriber setup.
mod logging;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use cinesearch_api::omdb::{
    DetailParams, MediaKind, NOT_AVAILABLE, OmdbApi, OmdbClient, PlotLength, SearchParams,
    imdb_url,
};
use clap::{Parser, Subcommand};
use tracing::instrument;
use url::Url;

use crate::config::{AppConfig, OmdbConfig, resolve_config_path, resolve_log_path};

/// Request timeout for OMDb calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config/data directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// OMDb access key (overrides `OMDB_API_KEY` and the config file).
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Search OMDb by title and print one page of results.
    Search(SearchArgs),
    /// Print the full record for one IMDb ID.
    Details(DetailsArgs),
    /// Browse search results in an interactive TUI.
    Browse(BrowseArgs),
    /// Inspect or edit the config file.
    Config(ConfigCommand),
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Title to search for (e.g. "batman").
    #[arg(long, required = true)]
    query: String,
    /// Result page (10 results per page).
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    page: u32,
    /// Restrict to one kind: movie, series, episode or game.
    #[arg(long = "type")]
    kind: Option<MediaKind>,
    /// Filter by release year.
    #[arg(long)]
    year: Option<u32>,
}

/// Arguments for the `details` subcommand.
#[derive(clap::Args)]
struct DetailsArgs {
    /// IMDb ID (e.g. "tt0111161").
    #[arg(long, required = true)]
    id: String,
    /// Request the short plot instead of the full one.
    #[arg(long)]
    short_plot: bool,
}

/// Arguments for the `browse` subcommand.
#[derive(clap::Args)]
struct BrowseArgs {
    /// Search to run on startup.
    #[arg(long)]
    query: Option<String>,
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
    /// Show the config path and where the access key comes from.
    Show,
    /// Store an access key in the config file.
    SetKey(SetKeyArgs),
}

/// Arguments for the `config set-key` subcommand.
#[derive(clap::Args)]
struct SetKeyArgs {
    /// OMDb access key.
    key: String,
}

/// Resolved connection settings for OMDb.
struct Settings {
    api_key: String,
    base_url: Option<String>,
}

/// Loads the config file and applies the access key precedence.
///
/// # Errors
///
/// Returns an error if the config path cannot be resolved or the file is invalid.
fn load_settings(cli: &Cli) -> Result<Settings> {
    let path = resolve_config_path(cli.dir.as_ref())?;
    let config = AppConfig::load(&path)?;
    let env_key = std::env::var("OMDB_API_KEY").ok();
    let (api_key, source) = config.resolve_api_key(cli.api_key.as_deref(), env_key.as_deref());
    tracing::debug!(source = %source, "resolved OMDb access key");
    Ok(Settings {
        api_key,
        base_url: config.omdb.base_url,
    })
}

/// Builds an OMDb client from resolved settings.
///
/// # Errors
///
/// Returns an error if the base URL is invalid or the client fails to build.
#[instrument(skip_all)]
fn build_omdb_client(settings: &Settings) -> Result<OmdbClient> {
    let mut builder = OmdbClient::builder()
        .api_key(settings.api_key.as_str())
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .timeout(REQUEST_TIMEOUT);
    if let Some(base_url) = &settings.base_url {
        let url = Url::parse(base_url)
            .with_context(|| format!("invalid OMDb base_url in config: {base_url}"))?;
        builder = builder.base_url(url);
    }
    builder.build().context("failed to build OMDb client")
}

/// Runs the `search` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build, the request fails, or
/// OMDb rejects the search.
#[instrument(skip_all)]
async fn run_search(args: &SearchArgs, settings: &Settings) -> Result<()> {
    let query = args.query.trim();
    anyhow::ensure!(!query.is_empty(), "search query must not be empty");
    let client = build_omdb_client(settings)?;

    let mut params = SearchParams::new(query).page(args.page);
    if let Some(kind) = args.kind {
        params = params.kind(kind);
    }
    if let Some(year) = args.year {
        params = params.year(year);
    }

    let response = client
        .search(&params)
        .await
        .context("OMDb search request failed")?;
    let page = response.into_page(args.page)?;

    tracing::info!(
        "Total results: {} (page {}, {} shown)",
        page.total_results,
        page.page,
        page.items.len()
    );
    tracing::info!("imdbID\t\tYear\t\tType\tTitle");
    for item in &page.items {
        tracing::info!(
            "{}\t{}\t\t{}\t{}",
            item.id,
            item.year,
            item.kind.as_str(),
            item.title,
        );
    }

    Ok(())
}

/// Runs the `details` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build, the request fails, or
/// OMDb rejects the lookup.
#[instrument(skip_all)]
async fn run_details(args: &DetailsArgs, settings: &Settings) -> Result<()> {
    let client = build_omdb_client(settings)?;

    let plot = if args.short_plot {
        PlotLength::Short
    } else {
        PlotLength::Full
    };
    let params = DetailParams::new(args.id.trim()).plot(plot);

    let response = client
        .details(&params)
        .await
        .context("OMDb detail request failed")?;
    let record = response.into_record(&params.id)?;

    let show = |value: Option<&str>| String::from(value.unwrap_or(NOT_AVAILABLE));
    tracing::info!("{} ({})", record.title, show(record.year.as_deref()));
    tracing::info!("Type:      {}", record.kind.as_str());
    tracing::info!(
        "Rating:    {}",
        record.rating().unwrap_or_else(|| String::from(NOT_AVAILABLE))
    );
    tracing::info!("Rated:     {}", show(record.rated.as_deref()));
    tracing::info!("Runtime:   {}", show(record.runtime.as_deref()));
    tracing::info!("Released:  {}", show(record.released.as_deref()));
    tracing::info!("Genre:     {}", record.genres.join(", "));
    tracing::info!("Director:  {}", show(record.director.as_deref()));
    tracing::info!("Cast:      {}", record.cast.join(", "));
    tracing::info!("Plot:      {}", show(record.plot.as_deref()));
    for rating in &record.ratings {
        tracing::info!("Score:     {} ({})", rating.value, rating.source);
    }
    tracing::info!("Poster:    {}", record.poster_url());
    tracing::info!("IMDb:      {}", imdb_url(&record.id));

    Ok(())
}

/// Runs the `browse` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the TUI fails.
#[instrument(skip_all)]
async fn run_browse(args: &BrowseArgs, settings: &Settings) -> Result<()> {
    let client = build_omdb_client(settings)?;
    tracing::info!("starting browser");
    cinesearch_tui::run_browser(client, args.query.as_deref()).await
}

/// Runs the `config show` subcommand.
///
/// # Errors
///
/// Returns an error if the config path cannot be resolved or the file is invalid.
fn run_config_show(cli: &Cli) -> Result<()> {
    let path = resolve_config_path(cli.dir.as_ref())?;
    let config = AppConfig::load(&path)?;
    let env_key = std::env::var("OMDB_API_KEY").ok();
    let (_, source) = config.resolve_api_key(cli.api_key.as_deref(), env_key.as_deref());

    tracing::info!("Config file: {}", path.display());
    tracing::info!(
        "Config file exists: {}",
        if path.exists() { "yes" } else { "no" }
    );
    tracing::info!("Access key source: {source}");
    tracing::info!(
        "Base URL: {}",
        config
            .omdb
            .base_url
            .as_deref()
            .unwrap_or(cinesearch_api::omdb::DEFAULT_BASE_URL)
    );
    Ok(())
}

/// Runs the `config set-key` subcommand.
///
/// # Errors
///
/// Returns an error if the key is blank or the config file cannot be written.
fn run_config_set_key(args: &SetKeyArgs, dir: Option<&PathBuf>) -> Result<()> {
    let key = args.key.trim();
    anyhow::ensure!(!key.is_empty(), "access key must not be empty");

    let path = resolve_config_path(dir)?;
    let config = AppConfig::load(&path)?;
    let updated = AppConfig {
        omdb: OmdbConfig {
            api_key: Some(String::from(key)),
            ..config.omdb
        },
    };
    updated.save(&path)?;

    tracing::info!("Saved access key to {}", path.display());
    Ok(())
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_file = match &cli.command {
        Commands::Browse(_) => Some(resolve_log_path(cli.dir.as_ref())?),
        _ => None,
    };
    let _guard = logging::init_logging(log_file.as_deref())?;

    match &cli.command {
        Commands::Search(args) => run_search(args, &load_settings(&cli)?).await,
        Commands::Details(args) => run_details(args, &load_settings(&cli)?).await,
        Commands::Browse(args) => run_browse(args, &load_settings(&cli)?).await,
        Commands::Config(cmd) => match &cmd.command {
            ConfigSubcommands::Show => run_config_show(&cli),
            ConfigSubcommands::SetKey(args) => run_config_set_key(args, cli.dir.as_ref()),
        },
    }
}
