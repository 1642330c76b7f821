//! Charforge Engine - Main entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::header::{HeaderName, AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use charforge_engine::api;
use charforge_engine::app::App;
use charforge_engine::infrastructure::{
    clock::SystemClock,
    config::EngineConfig,
    importers::ReferenceDumpSource,
    memory::{InMemoryCharacterRepo, InMemoryReferenceRepo},
    ports::{CharacterRepo, ClockPort, ReferenceRepo},
    sqlite::{self, SqliteCharacterRepo, SqliteReferenceRepo},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the engine may be started from `crates/engine`).
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "charforge_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Charforge Engine");

    let config = EngineConfig::from_env();
    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());

    let character_repo: Arc<dyn CharacterRepo>;
    let reference_repo: Arc<dyn ReferenceRepo>;
    match &config.character_db {
        Some(path) => {
            tracing::info!(path = %path.display(), "Using SQLite storage");
            let pool = sqlite::connect(&path.to_string_lossy()).await?;
            character_repo = Arc::new(SqliteCharacterRepo::new(pool.clone()).await?);
            reference_repo = Arc::new(SqliteReferenceRepo::new(pool, clock.clone()).await?);
        }
        None => {
            tracing::warn!("CHARACTER_DB not set, characters are kept in memory only");
            character_repo = Arc::new(InMemoryCharacterRepo::new());
            reference_repo = Arc::new(InMemoryReferenceRepo::new());
        }
    }

    tracing::info!(
        path = %config.reference_data_path.display(),
        batch_size = config.import_batch_size,
        "Reference dumps configured"
    );
    let reference_source = Arc::new(ReferenceDumpSource::new(&config.reference_data_path));

    let app = Arc::new(App::new(
        character_repo,
        reference_repo,
        reference_source,
        clock,
        config.import_batch_size,
    ));

    let mut router = api::http::routes()
        .with_state(app)
        .layer(TraceLayer::new_for_http());

    if let Some(cors) = build_cors_layer(config.cors_allowed_origins.as_deref()) {
        router = router.layer(cors);
    }

    // Start server
    let addr: SocketAddr = config.bind_address().parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

fn build_cors_layer(allowed_origins: Option<&str>) -> Option<CorsLayer> {
    let allowed_origins = allowed_origins?.trim();
    if allowed_origins.is_empty() {
        return None;
    }

    let mut cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            AUTHORIZATION,
            CONTENT_TYPE,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
        ]);

    if allowed_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();
        if origins.is_empty() {
            return None;
        }
        cors = cors.allow_origin(origins);
    }

    Some(cors)
}
