use axum::Router;
use domain_products::{PgProductRepository, ProductService, handlers};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    handlers::router(service(state))
}

pub(crate) fn service(state: &AppState) -> ProductService<PgProductRepository> {
    let repository = PgProductRepository::new(state.db.clone())
        .with_transaction_timeout(state.config.database.transaction_timeout());
    ProductService::new(repository)
}
