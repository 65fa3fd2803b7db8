//! Server entrypoint: picks the environment profile, opens the store, and
//! serves the API.

use pizzaapp::{build_app, connect, AppState, Config, PizzaStore};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("pizzaapp=info".parse()?))
        .init();

    let config = Config::from_env()?;
    tracing::info!(profile = config.profile.as_str(), "starting");

    let pool = connect(&config.database_url).await?;
    let store = PizzaStore::new(pool);
    store.init_schema().await?;

    let state = AppState {
        store,
        profile: config.profile,
    };
    let app = build_app(state);

    let listener = TcpListener::bind(config.listen_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
