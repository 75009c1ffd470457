use tracing::{error, info};

/// Closes a SeaORM pool during shutdown and logs the outcome.
///
/// ```ignore
/// close_postgres(db, "catalog").await;
/// ```
pub async fn close_postgres(db: sea_orm::DatabaseConnection, name: &str) {
    match db.close().await {
        Ok(_) => info!(connection = name, "PostgreSQL connection closed"),
        Err(e) => error!(connection = name, error = %e, "Error closing PostgreSQL connection"),
    }
}
