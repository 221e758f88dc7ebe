use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use directory_engine::config::DirectoryConfig;
use directory_engine::fetch::fetch_doctors;
use directory_engine::types::FilterState;
use directory_engine::{card, DirectoryEngine};

/// Usage: directory [QUERY]
/// QUERY uses the page's parameters, e.g. "name=rao&specialties=Dentist&sort=fees"
fn main() -> ExitCode {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = DirectoryConfig::from_env();
    let query = std::env::args().nth(1).unwrap_or_default();
    let state = FilterState::from_query(&query);

    let (engine, status) = match fetch_doctors(&config.api_url) {
        Ok(doctors) => (DirectoryEngine::new(doctors, state, config), ExitCode::SUCCESS),
        Err(e) => {
            error!("Error fetching doctors data: {}", e);
            eprintln!("{}", e.user_message());
            (DirectoryEngine::empty(state, config), ExitCode::FAILURE)
        }
    };

    info!("{}", card::result_summary(engine.results().len()));
    info!("query: ?{}", engine.query());

    match serde_json::to_string_pretty(&engine.cards()) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            error!("Failed to serialize cards: {}", e);
            return ExitCode::FAILURE;
        }
    }

    status
}
