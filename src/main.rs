//! loginstore binary entrypoint.

use loginstore::{config::Config, console, server, state};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    tracing::info!(
        addr = %config.bind_addr,
        store = %config.store.redacted_uri(),
        password_policy = %config.password_policy,
        store_required = config.store_required,
        "starting loginstore"
    );

    console::print_banner();
    let state = state::build_state(&config).await?;
    console::print_startup(
        &config.bind_addr,
        state.backend(),
        &config.password_policy.to_string(),
    );

    server::run(state, &config.bind_addr).await?;
    Ok(())
}
