//! Gympoint API
//!
//! Gym management backend: plan catalog, enrollments, check-ins and help
//! orders.
//!
//! ## REST Endpoints
//!
//! - `GET|POST /plans`, `GET|PUT|DELETE /plans/{id}` - Plan catalog
//! - `GET|POST /enrollments`, `GET|PUT|DELETE /enrollments/{id}` - Enrollments
//! - `GET|POST /students/{id}/checkins` - Check-ins (5 per rolling week)
//! - `GET|POST /students/{id}/help-orders` - A student's help orders
//! - `GET /help-orders` - Unanswered help orders
//! - `PUT /help-orders/{id}/answer` - Answer a help order
//!
//! ## Health Endpoints
//!
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe
//! - `GET /metrics` - Prometheus metrics

mod config;
mod error;
mod handlers;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, put};
use axum::Router;
use gympoint_core::{HttpMailer, LogMailer, Notifier};
use gympoint_db::{PoolOptions, Repositories};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::handlers::{health, ready};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("gympoint_api=debug".parse()?))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Gympoint API");

    let config = Config::from_env()?;
    tracing::info!(
        http_port = config.http_port,
        checkin_limit = config.rules.checkin_limit,
        mail_relay = config.mail.is_some(),
        "Configuration loaded"
    );

    let metrics_handle = if config.metrics_enabled {
        Some(setup_metrics()?)
    } else {
        None
    };

    let pool_options = PoolOptions {
        max_connections: config.db_max_connections,
        ..PoolOptions::default()
    };
    let pool = gympoint_db::create_pool_with_options(&config.database_url, &pool_options).await?;
    tracing::info!("Database pool created");

    if config.run_migrations {
        gympoint_db::run_migrations(&pool).await?;
    }

    let notifier: Arc<dyn Notifier> = match &config.mail {
        Some(mail) => Arc::new(HttpMailer::new(mail.clone())),
        None => {
            tracing::warn!("MAIL_API_URL not set, notifications will only be logged");
            Arc::new(LogMailer)
        }
    };

    let http_addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let state = AppState::new(Repositories::new(pool.clone()), notifier, pool, config);
    let app = build_router(state, metrics_handle);

    tracing::info!("HTTP server listening on {}", http_addr);
    let listener = tokio::net::TcpListener::bind(http_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn build_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    let request_timeout = state.request_timeout();

    let api = Router::new()
        // Plan catalog
        .route(
            "/plans",
            get(handlers::list_plans).post(handlers::create_plan),
        )
        .route(
            "/plans/{id}",
            get(handlers::get_plan)
                .put(handlers::update_plan)
                .delete(handlers::delete_plan),
        )
        // Enrollments
        .route(
            "/enrollments",
            get(handlers::list_enrollments).post(handlers::create_enrollment),
        )
        .route(
            "/enrollments/{id}",
            get(handlers::get_enrollment)
                .put(handlers::update_enrollment)
                .delete(handlers::delete_enrollment),
        )
        // Check-ins
        .route(
            "/students/{id}/checkins",
            get(handlers::list_checkins).post(handlers::create_checkin),
        )
        // Help orders
        .route(
            "/students/{id}/help-orders",
            get(handlers::list_student_help_orders).post(handlers::create_help_order),
        )
        .route("/help-orders", get(handlers::list_unanswered_help_orders))
        .route("/help-orders/{id}/answer", put(handlers::answer_help_order));

    // Health routes (no timeout - must always respond quickly)
    let health_routes = Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready));

    let metrics_route = if let Some(handle) = metrics_handle {
        Router::new().route("/metrics", get(move || async move { handle.render() }))
    } else {
        Router::new()
    };

    // Outermost first
    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TimeoutLayer::new(request_timeout));

    Router::new()
        .merge(api)
        .layer(middleware)
        .merge(health_routes)
        .merge(metrics_route)
        .with_state(state)
}

fn setup_metrics() -> anyhow::Result<PrometheusHandle> {
    // Most operations are a handful of queries
    let latency_buckets = &[0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5];

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("gympoint_operation_duration_seconds".to_string()),
            latency_buckets,
        )?
        .install_recorder()?;

    metrics::describe_counter!(
        "gympoint_checkins_created_total",
        "Total check-ins admitted"
    );
    metrics::describe_counter!(
        "gympoint_checkins_rejected_total",
        "Total check-ins rejected by the weekly limit"
    );
    metrics::describe_counter!(
        "gympoint_enrollments_created_total",
        "Total enrollments created"
    );
    metrics::describe_counter!(
        "gympoint_notifications_failed_total",
        "Total notifications that could not be delivered"
    );
    metrics::describe_histogram!(
        "gympoint_operation_duration_seconds",
        "Operation latency in seconds by operation and result"
    );

    Ok(handle)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = ?e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = ?e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
