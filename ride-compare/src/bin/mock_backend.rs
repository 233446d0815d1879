use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use ride_compare::mock::{EstimateFixtures, MockState, create_router};

/// Local comparison backend serving canned estimates.
#[derive(Debug, Parser)]
#[command(name = "mock-backend", version)]
struct Args {
    /// Address to listen on
    #[arg(long, env = "MOCK_BIND", default_value = "127.0.0.1:8000")]
    bind: SocketAddr,

    /// JSON file with the estimates to serve
    #[arg(long, env = "MOCK_FIXTURES", default_value = "data/mock_estimates.json")]
    fixtures: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let fixtures = match EstimateFixtures::load(&args.fixtures) {
        Ok(fixtures) => fixtures,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    info!(count = fixtures.len(), path = ?args.fixtures, "loaded fixtures");

    let app = create_router(MockState::new(fixtures));

    let listener = match tokio::net::TcpListener::bind(args.bind).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %args.bind, "failed to bind: {e}");
            return ExitCode::FAILURE;
        }
    };

    info!("mock backend listening on http://{}", args.bind);
    info!("  GET  /health   - Health check");
    info!("  POST /compare  - Compare ride estimates");

    if let Err(e) = axum::serve(listener, app).await {
        error!("server error: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
