use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bus_bot::cache::CachedResolver;
use bus_bot::chat::Conversation;
use bus_bot::config::{BotConfig, ResolverSource};
use bus_bot::resolver::{GeminiClient, MockResolver, ResolverBackend};
use bus_bot::schedule::ScheduleStore;
use bus_bot::web::{AppState, create_router};

/// Log filter used when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "info,hyper=warn,reqwest=warn";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = BotConfig::from_env()?;

    // A missing or broken schedule is not fatal: every question then gets
    // "no matches".
    let store = Arc::new(ScheduleStore::load_or_empty(&config.schedule_path));

    let backend: ResolverBackend = match &config.resolver {
        ResolverSource::Gemini(resolver_config) => {
            info!(model = %resolver_config.model, "using language model resolver");
            GeminiClient::new(resolver_config.clone())?.into()
        }
        ResolverSource::Mock(path) => {
            info!(path = %path.display(), "using mock resolver");
            MockResolver::from_file(path)?.into()
        }
    };
    let resolver = CachedResolver::new(backend, &config.cache);

    let lines = store.lines().into_iter().map(String::from).collect();
    let hints = config.hints(lines);
    let conversation =
        Conversation::new(store, resolver, hints).with_query_config(config.query.clone());

    let state = AppState::new(conversation);
    let app = create_router(state, &config.static_dir);

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "bus schedule assistant listening");
    info!("  GET  /health  - Health check");
    info!("  GET  /start   - Greeting");
    info!("  POST /chat    - Ask a question");

    axum::serve(listener, app).await?;
    Ok(())
}
