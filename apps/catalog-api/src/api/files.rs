use axum::Router;
use domain_files::{FileService, LocalFileStorage, handlers};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let uploads = &state.config.uploads;
    let storage = LocalFileStorage::new(uploads.dir.clone());
    let service = FileService::new(storage, uploads.public_path.clone());
    handlers::router(service, uploads.body_limit_bytes)
}
