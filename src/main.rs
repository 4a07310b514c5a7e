use caballus_fares::config::Settings;
use caballus_fares::engine::Engine;
use caballus_fares::error::Error;
use caballus_fares::server::serve;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::from_env()?;

    tracing::info!(currency = %settings.currency, "starting fare estimation service");

    let engine = Engine::from_settings(&settings).await?;

    serve(engine, settings.listen_addr).await
}
