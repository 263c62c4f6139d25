//! Entry point: load config, wire dependencies, and run the server.

use authgate::auth::JwtSecret;
use authgate::config::Config;
use authgate::db;
use authgate::{create_app, AppState};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Fails fast when JWT_SECRET is absent: no token is ever issued or
    // verified with a default secret.
    let config = Config::from_env().map_err(|e| anyhow::anyhow!("config: {}", e))?;

    let filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let db_pool = db::create_pool(&config.database_url).await?;
    let jwt_secret = JwtSecret::new(config.jwt_secret.clone(), config.token_ttl_secs);

    let state = AppState {
        db: db_pool,
        jwt_secret,
    };

    let app = create_app(state).layer(TraceLayer::new_for_http());

    tracing::info!(addr = %config.server_addr, "listening");
    let listener = tokio::net::TcpListener::bind(config.server_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
