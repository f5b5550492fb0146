use roomly_api::metrics::ApiMetrics;
use roomly_api::{app, AppState};
use roomly_catalog::HotelCatalog;
use roomly_flags::FliptClient;
use roomly_store::BookingStore;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roomly_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = roomly_store::Config::load().expect("Failed to load config");
    tracing::info!("Starting Roomly API on port {}", config.server.port);

    let flags = FliptClient::new(
        &config.flipt.url,
        &config.flipt.namespace,
        Duration::from_millis(config.flipt.timeout_ms),
    )
    .expect("Failed to build Flipt client");

    let state = AppState {
        catalog: Arc::new(HotelCatalog::with_seed_data()),
        bookings: Arc::new(BookingStore::new()),
        flags: Arc::new(flags),
        metrics: Arc::new(ApiMetrics::new().expect("Failed to register metrics")),
    };

    let app = app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}
