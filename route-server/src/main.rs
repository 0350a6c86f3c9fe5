use route_server::config::ServerConfig;
use route_server::graph::{load_network, sample_network};
use route_server::rules::RuleEngine;
use route_server::web::{AppState, create_router};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("route_server=info")),
        )
        .init();

    let config = ServerConfig::from_env().expect("Invalid configuration");

    // Build the base network once; requests only ever read it
    let network = match &config.network_path {
        Some(path) => load_network(path),
        None => {
            info!("no network file configured, using the sample network");
            sample_network()
        }
    }
    .expect("Failed to build network");
    info!(
        stations = network.station_count(),
        segments = network.segment_count(),
        "network ready"
    );

    let engine = RuleEngine::standard();
    info!(rules = ?engine.rule_names().collect::<Vec<_>>(), "rule engine ready");

    // Build app state and router
    let state = AppState::new(network, engine);
    let app = create_router(state);

    // Bind and serve
    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .expect("Failed to bind listener");
    info!("Route planner listening on http://{}", config.addr);
    info!("  GET  /health  - Health check");
    info!("  GET  /graph   - Base network");
    info!("  POST /route   - Plan a route");

    axum::serve(listener, app).await.expect("Server error");
}
