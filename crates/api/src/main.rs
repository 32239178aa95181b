//! `booking-api` -- booking notification service.
//!
//! Receives booking document hooks, publishes them on the in-process event
//! bus and dispatches push notifications to customers and vendors.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use booking_core::push::PushSender;
use booking_events::{DispatchCore, Dispatcher, EventBus, FcmConfig, FcmSender, LogOnlySender};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use booking_api::config::ServerConfig;
use booking_api::router::build_app;
use booking_api::state::AppState;

/// How long to wait for the dispatcher after cancelling it.
const CANCEL_GRACE: Duration = Duration::from_secs(1);

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    init_tracing();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let max_connections: u32 = std::env::var("DB_MAX_CONNECTIONS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(booking_db::DEFAULT_MAX_CONNECTIONS);

    let pool = booking_db::create_pool(&database_url, max_connections)
        .await
        .expect("Failed to connect to database");
    tracing::info!(max_connections, "Database connection pool created");

    booking_db::health_check(&pool)
        .await
        .expect("Database health check failed");

    booking_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Push delivery ---
    let sender: Arc<dyn PushSender> = match FcmConfig::from_env() {
        Some(fcm) => Arc::new(FcmSender::from_config(&fcm).expect("Invalid FCM configuration")),
        None => {
            tracing::warn!("FCM_CREDENTIALS_FILE not set, notifications will only be logged");
            Arc::new(LogOnlySender)
        }
    };

    // --- Dispatch ---
    let resolver = Arc::new(booking_db::PgRecipientResolver::new(pool.clone()));
    let core = Arc::new(DispatchCore::new(resolver, sender));

    let event_bus = Arc::new(EventBus::default());
    let dispatch_cancel = CancellationToken::new();
    let mut dispatcher_handle = tokio::spawn(
        Dispatcher::new(core).run(event_bus.subscribe(), dispatch_cancel.clone()),
    );
    tracing::info!("Dispatcher started");

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        event_bus: Arc::clone(&event_bus),
    };
    let app = build_app(state);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting hooks, draining dispatches");

    // Closing the bus lets the dispatcher work through queued events and exit.
    drop(event_bus);
    let drain = Duration::from_secs(config.shutdown_timeout_secs);
    if tokio::time::timeout(drain, &mut dispatcher_handle).await.is_err() {
        tracing::warn!(
            timeout_secs = config.shutdown_timeout_secs,
            "Dispatches did not finish before shutdown timeout, cancelling"
        );
        dispatch_cancel.cancel();
        let _ = tokio::time::timeout(CANCEL_GRACE, dispatcher_handle).await;
    }

    tracing::info!("Graceful shutdown complete");
}

/// Install the global subscriber. `LOG_FORMAT=json` selects JSON lines.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "booking_api=debug,booking_events=debug,booking_db=info,tower_http=debug".into()
    });
    let registry = tracing_subscriber::registry().with(filter);

    if std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")) {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
