use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use directory_core::{DirectoryConfig, load_catalogue};

/// Main entry point for the doctor directory
///
/// Loads the doctor data once, then serves the directory page and JSON API.
/// A failed load does not stop the server: every page shows the load-failure
/// notice and the JSON endpoints answer 503.
///
/// # Environment Variables
/// - `DOCTORS_SOURCE`: URL or JSON file path of the doctor data (default: the published data set)
/// - `DIRECTORY_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration is invalid or the server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("directory=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = DirectoryConfig::from_env_values(
        std::env::var("DOCTORS_SOURCE").ok(),
        std::env::var("DIRECTORY_REST_ADDR").ok(),
    )?;

    tracing::info!(
        "-- Doctor data source: {}, REST address: {}",
        config.source(),
        config.rest_addr()
    );

    let state = AppState::new(load_catalogue(config.source()).await)?;

    api_rest::serve(config.rest_addr(), state).await
}
