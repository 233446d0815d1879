use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use ride_compare::aggregate::ResultsView;
use ride_compare::compare::{CompareClient, CompareError, CompareOrchestrator, ComparisonState};
use ride_compare::config::{AppConfig, ConfigError, Target, load_app_config};
use ride_compare::domain::{Coordinates, RideCategory, TripDraft};
use ride_compare::geocode::{
    AddressSuggestion, CachedProvider, GeocodeError, LocationProvider, SuggestionProvider,
};
use ride_compare::search::LocationSearch;

/// How long to wait for a suggestion lookup after the debounce.
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(15);

/// Compare ride-hailing prices between two places.
#[derive(Debug, Parser)]
#[command(name = "ride-compare", version)]
struct Cli {
    /// Comparison backend base URL
    #[arg(long, global = true, env = "API_URL")]
    api_url: Option<String>,

    /// Use the Android emulator's view of the host for the default backend URL
    #[arg(long, global = true)]
    android_emulator: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Resolve two places and compare prices between them
    Compare {
        /// Pickup address
        #[arg(long)]
        from: String,

        /// Dropoff address
        #[arg(long)]
        to: String,

        /// Standard, XL or Premium
        #[arg(long, default_value = "Standard")]
        category: RideCategory,

        /// Swap pickup and dropoff
        #[arg(long)]
        swap: bool,
    },

    /// List address suggestions for a query
    Suggest { query: String },

    /// Check whether the comparison backend is up
    Health,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Geocode(#[from] GeocodeError),

    #[error(transparent)]
    Compare(#[from] CompareError),

    #[error("{0:?} is too short to search")]
    TooShort(String),

    #[error("no places found for {0:?}")]
    NoMatch(String),

    #[error("timed out looking up {0:?}")]
    Timeout(String),

    #[error("{0}")]
    Failed(String),
}

type Provider = CachedProvider<LocationProvider>;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let target = if cli.android_emulator {
        Target::AndroidEmulator
    } else {
        Target::Device
    };

    let mut config = load_app_config(target)?;
    if let Some(url) = cli.api_url {
        config.compare.api_url = url;
    }

    match cli.command {
        Command::Compare {
            from,
            to,
            category,
            swap,
        } => compare(&config, &from, &to, category, swap).await,
        Command::Suggest { query } => suggest(&config, &query).await,
        Command::Health => health(&config).await,
    }
}

fn provider(config: &AppConfig) -> Result<Arc<Provider>, CliError> {
    let inner = config.location_provider()?;
    Ok(Arc::new(CachedProvider::new(inner, &config.cache)))
}

/// Type `text` into a search and wait for its suggestions.
async fn lookup<P: SuggestionProvider + 'static>(
    search: &LocationSearch<P>,
    text: &str,
) -> Result<Vec<AddressSuggestion>, CliError> {
    if !search.config().is_searchable(text) {
        return Err(CliError::TooShort(text.to_string()));
    }

    let generation = search.on_input_changed(text);
    let view = tokio::time::timeout(LOOKUP_TIMEOUT, search.settled(generation))
        .await
        .map_err(|_| CliError::Timeout(text.to_string()))?;

    if view.suggestions.is_empty() {
        return Err(CliError::NoMatch(text.to_string()));
    }
    Ok(view.suggestions)
}

/// Resolve `text` to its first suggestion.
async fn resolve<P: SuggestionProvider + 'static>(
    search: &LocationSearch<P>,
    text: &str,
) -> Result<Coordinates, CliError> {
    let suggestions = lookup(search, text).await?;
    let first = &suggestions[0];
    debug!(query = text, selected = %first.display_name, "picked first suggestion");

    Ok(search.on_suggestion_selected(first).await?)
}

async fn compare(
    config: &AppConfig,
    from: &str,
    to: &str,
    category: RideCategory,
    swap: bool,
) -> Result<(), CliError> {
    let provider = provider(config)?;
    let pickup_search = LocationSearch::new(Arc::clone(&provider), config.search.clone());
    let dropoff_search = LocationSearch::new(Arc::clone(&provider), config.search.clone());

    let (pickup, dropoff) = futures::future::try_join(
        resolve(&pickup_search, from),
        resolve(&dropoff_search, to),
    )
    .await?;

    let mut draft = TripDraft::new(category);
    draft.pickup = Some(pickup);
    draft.dropoff = Some(dropoff);
    if swap {
        draft.swap();
    }

    let request = draft
        .to_request()
        .ok_or_else(|| CliError::Failed("pickup and dropoff are required".to_string()))?;

    if let (Some(pickup), Some(dropoff)) = (&draft.pickup, &draft.dropoff) {
        info!(%pickup, %dropoff, %category, "comparing");
    }

    let client = CompareClient::new(config.compare.clone())?;
    let orchestrator = CompareOrchestrator::new(Arc::new(client));

    orchestrator.compare(request);

    match orchestrator.settled().await {
        ComparisonState::Failed(message) => Err(CliError::Failed(message)),
        state => {
            match ResultsView::from_state(&state) {
                Some(view) if !view.is_empty() => print!("{view}"),
                _ => println!("No rides available"),
            }
            Ok(())
        }
    }
}

async fn suggest(config: &AppConfig, query: &str) -> Result<(), CliError> {
    let provider = provider(config)?;
    info!(provider = provider.inner().name(), "searching");

    let search = LocationSearch::new(provider, config.search.clone());
    let suggestions = lookup(&search, query).await?;

    for suggestion in suggestions {
        if suggestion.has_inline_coordinates() {
            println!("{}  ({}, {})", suggestion.display_name, suggestion.lat, suggestion.lon);
        } else {
            println!("{}", suggestion.display_name);
        }
    }

    Ok(())
}

async fn health(config: &AppConfig) -> Result<(), CliError> {
    let client = CompareClient::new(config.compare.clone())?;
    let orchestrator = CompareOrchestrator::new(Arc::new(client));

    if orchestrator.health().await {
        println!("{} is up", config.compare.api_url);
        Ok(())
    } else {
        Err(CliError::Failed(format!("{} is down", config.compare.api_url)))
    }
}
