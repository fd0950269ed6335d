use axum::{routing::get, Router};
use sqlx::PgPool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::health::health_check;
use super::metrics::metrics_routes;
use super::plans::plans_routes;
use super::sessions::sessions_routes;
use super::templates::templates_routes;

pub fn create_routes(db: PgPool) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/plans", plans_routes(db.clone()))
        .nest("/api/sessions", sessions_routes(db.clone()))
        .nest("/api/templates", templates_routes(db.clone()))
        .nest("/api/metrics", metrics_routes(db))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
