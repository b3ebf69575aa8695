//! # venuectl: reservation service for a themed entertainment venue
//!
//! `venuectl` exposes the venue's bookable facilities (bowling lanes, billiard tables, the
//! arcade), computes hourly availability for any facility and day, and accepts reservations
//! and contact form messages over a small JSON API.
//!
//! ## Overview
//!
//! The interesting part is the booking path. A reservation request is validated field by
//! field, the facility is looked up, the day's existing reservations are checked for the
//! requested hour, the price is computed from the facility's hourly rate and the customer's
//! pricing tier, and the record is stored. At most one reservation exists for any
//! (facility, date, time); see [`booking`] for how that is enforced.
//!
//! Availability is derived, never stored: the day is a fixed grid of thirteen hourly slots
//! from 10:00 to 22:00, and a slot is free unless a reservation holds exactly that time.
//!
//! ## Architecture
//!
//! HTTP is served by [Axum](https://github.com/tokio-rs/axum). Persistence sits behind the
//! [`db::store::Store`] trait with two backends chosen at startup:
//!
//! - **memory** (default): everything in process, lost on restart. Good for development and tests.
//! - **postgres**: schema managed by embedded migrations, runtime-checked SQLx queries.
//!
//! ```text
//! HTTP ──▶ api::handlers ──▶ booking / contact ──▶ Arc<dyn Store> ──▶ memory | postgres
//! ```
//!
//! ## Endpoints
//!
//! | Route | Purpose |
//! |---|---|
//! | `GET /api/facilities` | Facility catalog |
//! | `GET /api/availability/{facility_id}/{date}` | Slot calendar |
//! | `POST /api/reservations` | Book a slot |
//! | `GET /api/reservations` | List bookings |
//! | `PATCH /api/reservations/{id}` | Change status |
//! | `DELETE /api/reservations/{id}` | Remove a booking |
//! | `POST /api/contact` | Contact form |
//! | `GET /healthz` | Liveness |
//! | `GET /docs`, `GET /api-docs/openapi.json` | API reference |
//! | `GET /internal/metrics` | Prometheus metrics (when `enable_metrics` is set) |
//!
//! ## Configuration
//!
//! See [`config`]. The shortest path to a Postgres-backed instance is:
//!
//! ```bash
//! DATABASE_URL=postgres://localhost/venue venuectl
//! ```
//!
//! ## Getting Started
//!
//! ```no_run
//! use venuectl::{Application, Config, telemetry};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     telemetry::init_telemetry(config.enable_otel_export)?;
//!
//!     let app = Application::new(config).await?;
//!     app.serve(async {
//!         tokio::signal::ctrl_c().await.ok();
//!     })
//!     .await
//! }
//! ```

pub mod api;
pub mod booking;
pub mod config;
pub mod contact;
pub mod db;
pub mod errors;
mod openapi;
pub mod telemetry;
pub mod types;

#[cfg(test)]
pub mod test_utils;

use crate::{
    api::handlers::{contact as contact_handlers, facilities, reservations},
    booking::BookingService,
    config::{CorsOrigin, PoolSettings, StoreConfig},
    db::{
        models::facilities::default_facilities,
        store::{InMemoryStore, PostgresStore, Store},
    },
    openapi::ApiDoc,
};
use axum::{
    Json, Router,
    http::{self, HeaderValue},
    routing::{get, patch, post},
};
use axum_prometheus::PrometheusMetricLayer;
use bon::Builder;
pub use config::Config;
use sqlx::{PgPool, postgres::PgPoolOptions};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, debug, info, instrument};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

/// Shared state handed to every handler.
///
/// ```ignore
/// let store: Arc<dyn Store> = Arc::new(InMemoryStore::new());
/// let state = AppState::builder()
///     .store(store.clone())
///     .bookings(BookingService::new(store))
///     .config(config)
///     .build();
/// ```
#[derive(Clone, Builder)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub bookings: BookingService,
    pub config: Config,
}

/// Embedded schema migrations for the Postgres store.
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

async fn connect_pool(url: &str, settings: &PoolSettings) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(settings.acquire_timeout())
        .idle_timeout(settings.idle_timeout())
        .max_lifetime(settings.max_lifetime())
        .connect(url)
        .await?;
    Ok(pool)
}

/// Build the configured store. For Postgres, connects and runs migrations; the pool is
/// returned as well so it can be closed on shutdown.
#[instrument(skip_all)]
async fn setup_store(config: &Config) -> anyhow::Result<(Arc<dyn Store>, Option<PgPool>)> {
    match &config.store {
        StoreConfig::Memory => {
            info!("Using in-memory store; data will be lost on shutdown");
            Ok((Arc::new(InMemoryStore::new()), None))
        }
        StoreConfig::Postgres { url, pool } => {
            info!("Using postgres store");
            let pool = connect_pool(url, pool).await?;
            migrator().run(&pool).await?;
            Ok((Arc::new(PostgresStore::new(pool.clone())), Some(pool)))
        }
    }
}

/// Insert the default facility catalog if the store has none. Safe to run on every start.
#[instrument(skip_all, fields(backend = store.backend()))]
pub async fn seed_database(store: &dyn Store) -> anyhow::Result<()> {
    let inserted = store.seed_facilities(&default_facilities()).await?;
    if inserted > 0 {
        info!("Seeded {} default facilities", inserted);
    } else {
        debug!("Facility catalog already populated, skipping seed");
    }
    Ok(())
}

/// Create CORS layer from configuration
fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let cors = &config.cors;

    let allow_origin = if cors.allowed_origins.iter().any(|o| matches!(o, CorsOrigin::Wildcard)) {
        AllowOrigin::any()
    } else {
        let mut origins = Vec::new();
        for origin in &cors.allowed_origins {
            if let CorsOrigin::Url(url) = origin {
                origins.push(url.as_str().trim_end_matches('/').parse::<HeaderValue>()?);
            }
        }
        AllowOrigin::list(origins)
    };

    let mut layer = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([http::Method::GET, http::Method::POST, http::Method::PATCH, http::Method::DELETE])
        .allow_headers([http::header::CONTENT_TYPE])
        .allow_credentials(cors.allow_credentials);

    if let Some(max_age) = cors.max_age {
        layer = layer.max_age(std::time::Duration::from_secs(max_age));
    }

    Ok(layer)
}

/// Routes mounted under `/api`.
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/facilities", get(facilities::list_facilities))
        .route("/availability/{facility_id}/{date}", get(facilities::get_availability))
        .route(
            "/reservations",
            post(reservations::create_reservation).get(reservations::list_reservations),
        )
        .route(
            "/reservations/{id}",
            patch(reservations::update_reservation).delete(reservations::delete_reservation),
        )
        .route("/contact", post(contact_handlers::create_contact_message))
}

/// Build the main application router with all endpoints and middleware.
///
/// - Booking API under `/api`
/// - `/healthz` liveness probe
/// - OpenAPI JSON and the Scalar reference UI
/// - Optional Prometheus metrics at `/internal/metrics`
/// - CORS and request tracing
#[instrument(skip_all)]
pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    let cors_layer = create_cors_layer(&state.config)?;
    let enable_metrics = state.config.enable_metrics;

    let mut router = Router::new()
        .nest("/api", api_routes())
        .route("/healthz", get(|| async { "OK" }))
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
        .with_state(state)
        .layer(cors_layer);

    if enable_metrics {
        let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();
        router = router
            .route("/internal/metrics", get(|| async move { metric_handle.render() }))
            .layer(prometheus_layer);
    }

    let router = router.layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    Ok(router)
}

/// The running service: store, booking core and router.
///
/// 1. **Create**: [`Application::new`] builds the store (running migrations for Postgres),
///    seeds the facility catalog and builds the router
/// 2. **Serve**: [`Application::serve`] binds and handles requests until `shutdown` resolves
/// 3. **Shutdown**: in-flight requests finish, the pool is closed, spans are flushed
pub struct Application {
    router: Router,
    config: Config,
    pool: Option<PgPool>,
}

impl Application {
    /// Create a new application instance with all resources initialized
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        debug!("Starting venuectl with configuration: {:#?}", config);

        let (store, pool) = setup_store(&config).await?;
        seed_database(store.as_ref()).await?;

        let state = AppState::builder()
            .store(store.clone())
            .bookings(BookingService::new(store))
            .config(config.clone())
            .build();

        let router = build_router(state)?;

        Ok(Self { router, config, pool })
    }

    /// Convert application into a test server (for tests)
    #[cfg(test)]
    pub fn into_test_server(self) -> axum_test::TestServer {
        axum_test::TestServer::new(self.router.into_make_service()).expect("Failed to create test server")
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!(
            "venuectl listening on http://{}, available at http://localhost:{}",
            bind_addr, self.config.port
        );

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        if let Some(pool) = self.pool {
            info!("Closing database connections...");
            pool.close().await;
        }

        info!("Shutting down telemetry...");
        telemetry::shutdown_telemetry();

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test_log::test(tokio::test)]
    async fn test_seed_database_is_idempotent() {
        let store = InMemoryStore::new();
        seed_database(&store).await.unwrap();
        seed_database(&store).await.unwrap();
        assert_eq!(store.list_facilities().await.unwrap().len(), 3);
    }

    #[test]
    fn test_cors_layer_accepts_wildcard_and_urls() {
        let mut config = Config::default();
        assert!(create_cors_layer(&config).is_ok());

        config.cors.allowed_origins = vec![CorsOrigin::Wildcard];
        assert!(create_cors_layer(&config).is_ok());
    }

    #[test_log::test(tokio::test)]
    async fn test_application_starts_with_memory_store() {
        let app = Application::new(Config::default()).await.unwrap();
        assert!(app.pool.is_none());

        let server = app.into_test_server();
        let response = server.get("/healthz").await;
        response.assert_status_ok();
        response.assert_text("OK");
    }

    #[test_log::test(tokio::test)]
    async fn test_openapi_document_served() {
        let (server, _) = test_utils::create_test_app().await;

        let response = server.get("/api-docs/openapi.json").await;
        response.assert_status_ok();
        let doc: serde_json::Value = response.json();
        assert!(doc["paths"]["/reservations/{id}"].is_object());

        server.get("/internal/metrics").await.assert_status_not_found();
    }

    // The Prometheus recorder is process-global, so this is the only test that enables it.
    #[test_log::test(tokio::test)]
    async fn test_metrics_endpoint_when_enabled() {
        let config = Config {
            enable_metrics: true,
            ..Config::default()
        };
        let (server, _) = test_utils::create_test_app_with_config(config).await;

        server.get("/api/facilities").await.assert_status_ok();
        let response = server.get("/internal/metrics").await;
        response.assert_status_ok();
        assert!(response.text().contains("axum_http_requests"));
    }
}
