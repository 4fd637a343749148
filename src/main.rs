use anyhow::Context;
use dotenvy::dotenv;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use activities_directory::config::Config;
use activities_directory::database::{seed, ActivityDirectory};
use activities_directory::web::{self, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // 1. Logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("activities_directory=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer().compact())
        .init();

    // 2. Config + seed
    let config = Config::from_env().context("invalid configuration")?;
    let activities = match &config.seed_path {
        Some(path) => seed::load_seed(path).context("cannot load activities seed")?,
        None => seed::default_seed(),
    };
    let directory = ActivityDirectory::new(activities);
    let names = directory.names();
    tracing::info!(
        activities = names.len(),
        names = ?names,
        enforce_capacity = config.capacity.enforce,
        "activity directory seeded"
    );

    let app = web::router(
        AppState::new(directory, config.capacity),
        config.static_dir.as_deref(),
    );

    // 3. Bind (with fallback port)
    let addr = config.listen_addr()?;
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            let fallback = config.fallback_addr()?;
            tracing::warn!(%addr, error = %e, %fallback, "bind failed, trying fallback port");
            tokio::net::TcpListener::bind(fallback)
                .await
                .with_context(|| format!("cannot bind {} or {}", addr, fallback))?
        }
    };

    let bound_addr = listener.local_addr()?;
    tracing::info!("listening on http://{}", bound_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "cannot listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
