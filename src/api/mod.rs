//! HTTP API.
//!
//! Routes fall into three groups: public, token-protected and admin-only. The
//! gates are route layers, so unknown paths still answer 404 rather than 401.
//! CORS is open to any origin and every request is traced.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;

use axum::{
    Router,
    http::{Method, header},
    middleware as axum_middleware,
    routing::{get, post, put},
};
use sea_orm::DatabaseConnection;
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use crate::{auth::TokenKeys, errors::Result};

/// Application state shared across handlers
pub struct AppState {
    pub db: DatabaseConnection,
    pub tokens: TokenKeys,
}

/// Builds the full router.
pub fn build_router(state: Arc<AppState>) -> Router {
    // PUBLIC routes (no authentication required)
    let public_router = Router::new()
        .route("/api/health", get(handlers::health_check))
        .route("/api/users/register", post(handlers::users::register))
        .route("/api/users/login", post(handlers::users::login))
        .route(
            "/api/users/forgot-password",
            post(handlers::users::forgot_password),
        )
        .route(
            "/api/users/forgot-password/reset",
            post(handlers::users::reset_password),
        )
        .route("/api/packages", get(handlers::packages::list_packages))
        .route("/api/track", get(handlers::tracking::get_tracking))
        .route("/api/admin/login", post(handlers::admin::login));

    // PROTECTED routes (any valid token)
    let protected_router = Router::new()
        .route(
            "/api/users/me",
            get(handlers::users::get_me).put(handlers::users::update_me),
        )
        .route(
            "/api/order",
            get(handlers::orders::list_orders).post(handlers::orders::create_order),
        )
        .route(
            "/api/order/{id}",
            get(handlers::orders::get_order)
                .put(handlers::orders::update_order)
                .delete(handlers::orders::delete_order),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::require_auth,
        ));

    // ADMIN routes
    let admin_router = Router::new()
        .route("/api/packages", post(handlers::packages::create_package))
        .route("/api/track", post(handlers::tracking::add_tracking))
        .route("/api/admin/dashboard", get(handlers::admin::dashboard))
        .route("/api/admin/orders", get(handlers::admin::list_orders))
        .route(
            "/api/admin/orders/{id}",
            get(handlers::admin::get_order).patch(handlers::admin::update_order_status),
        )
        .route(
            "/api/admin/packages",
            get(handlers::packages::list_packages).post(handlers::packages::create_package),
        )
        .route(
            "/api/admin/packages/{id}",
            axum::routing::delete(handlers::packages::delete_package),
        )
        .route("/api/admin/users", get(handlers::admin::list_users))
        .route("/api/admin/settings", put(handlers::admin::change_password))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::require_admin,
        ));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    public_router
        .merge(protected_router)
        .merge(admin_router)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Binds `addr` and serves the API until the process exits.
///
/// # Errors
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(addr: SocketAddr, state: Arc<AppState>) -> Result<()> {
    let router = build_router(state);

    info!("Starting API server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
