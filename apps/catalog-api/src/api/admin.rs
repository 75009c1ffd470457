use axum::Router;
use domain_products::handlers;

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    handlers::admin_router(super::products::service(state))
}
