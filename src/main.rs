use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use recipe_box::config::Config;
use recipe_box::db::{self, RecipeStorage};
use recipe_box::router::{RecipeState, recipe_router};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::load()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.basic.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database_url = %cfg.storage.database_url,
        upload_dir = %cfg.storage.upload_dir.display(),
        max_upload_bytes = cfg.basic.max_upload_bytes,
        loglevel = %cfg.basic.loglevel
    );

    let pool = db::connect(&cfg.storage.database_url).await?;
    let storage = RecipeStorage::new(pool);
    // Keep serving on failure; requests will surface the storage error.
    match storage.init_schema().await {
        Ok(()) => info!("database ready"),
        Err(e) => error!(error = %e, "failed to set up database schema"),
    }

    let state = RecipeState::new(storage, &cfg);
    state.images.ensure_dir().await?;
    let app = recipe_router(state);

    let listener = TcpListener::bind(cfg.basic.listen_addr.as_str()).await?;
    info!("HTTP server listening on {}", cfg.basic.listen_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for ctrl-c");
    }
    info!("shutting down");
}
