//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire up middleware (tracing, timeout, request ID, CORS)
//! - Own the shared application state injected into handlers
//! - Serve with graceful shutdown

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::{AppConfig, CorsConfig};
use crate::detection::{Detector, ResultStore};
use crate::http::handlers;
use crate::security::{SignatureValidator, SlidingWindowLimiter};

/// Application state injected into handlers.
///
/// All shared mutable state (rate-limit records, result store) lives here,
/// behind its own synchronization, instead of ambient globals.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub validator: Arc<SignatureValidator>,
    pub limiter: Arc<SlidingWindowLimiter>,
    pub detector: Arc<Detector>,
    pub store: ResultStore,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let validator = SignatureValidator::new(
            config.security.secret_key.clone(),
            config.security.max_timestamp_skew_ms,
        );
        let detector = Detector::new(&config.detection);

        Self {
            config: Arc::new(config),
            validator: Arc::new(validator),
            limiter: Arc::new(SlidingWindowLimiter::new()),
            detector: Arc::new(detector),
            store: ResultStore::new(),
        }
    }
}

/// HTTP server for the detection API.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        let cors = build_cors_layer(&config.cors);
        let request_timeout = Duration::from_secs(config.timeouts.request_secs);
        let state = AppState::new(config);

        let router = Router::new()
            .route("/", get(handlers::index))
            .route("/api/detect", post(handlers::detect))
            .route("/api/result/{video_id}", get(handlers::get_result))
            .with_state(state)
            .layer(TimeoutLayer::new(request_timeout))
            .layer(cors)
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http());

        Self { router }
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Stops when the shutdown channel fires or closes. OS signals reach
    /// here through the watcher in `main` triggering the coordinator.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the CORS layer from the configured allow-list.
///
/// OPTIONS preflights are answered by this layer; any-origin wildcards are
/// rejected at config validation, never widened here.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Skipping unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}
