use cubby_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    cubby_api::telemetry::init_telemetry();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize the application (storage client, routes)
    let (_state, router) = cubby_api::setup::initialize_app(config.clone()).await?;

    // Start the server
    cubby_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
