//! API routes module

pub mod admin;
pub mod files;
pub mod health;
pub mod products;

use axum::Router;

use crate::state::AppState;

/// Routes without the `/api` prefix, which `create_router` adds.
pub fn routes(state: &AppState) -> Router {
    let router = Router::new()
        .nest("/products", products::router(state))
        .nest("/files", files::router(state));

    if state.config.admin_enabled {
        tracing::warn!("Admin routes enabled at /api/admin");
        router.nest("/admin", admin::router(state))
    } else {
        router
    }
}

/// `/ready` with a real PostgreSQL probe, merged next to `/health`.
pub fn ready_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
