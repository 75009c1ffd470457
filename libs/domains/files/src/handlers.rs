use axum::{
    Json, Router,
    extract::{
        DefaultBodyLimit, Multipart, Path, State,
        multipart::MultipartRejection,
    },
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::errors::responses::{
    BadRequestResponse, InternalServerErrorResponse, NotFoundResponse,
};
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

use crate::error::{FileError, FileResult};
use crate::models::{IncomingFile, UploadedFile};
use crate::service::FileService;
use crate::storage::FileStorage;

const TAG: &str = "Files";

/// Multipart field carrying the upload
pub const FILE_FIELD: &str = "file";

/// OpenAPI documentation for the Files API
#[derive(OpenApi)]
#[openapi(
    paths(upload_product_image, serve_product_image),
    components(
        schemas(UploadedFile, UploadForm),
        responses(BadRequestResponse, NotFoundResponse, InternalServerErrorResponse)
    ),
    tags((name = TAG, description = "Product image uploads"))
)]
pub struct ApiDoc;

#[allow(dead_code)]
#[derive(ToSchema)]
struct UploadForm {
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
}

/// Upload routes, nested at `/files` by the app.
///
/// `body_limit` caps the upload request size; `None` removes axum's default.
pub fn router<S: FileStorage + 'static>(service: FileService<S>, body_limit: Option<usize>) -> Router {
    let shared_service = Arc::new(service);
    let limit = match body_limit {
        Some(bytes) => DefaultBodyLimit::max(bytes),
        None => DefaultBodyLimit::disable(),
    };

    Router::new()
        .route("/product", post(upload_product_image).layer(limit))
        .route("/product/{file_name}", get(serve_product_image))
        .with_state(shared_service)
}

/// Upload a product image (`image/jpeg` only)
#[utoipa::path(
    post,
    path = "/product",
    tag = TAG,
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Image stored", body = UploadedFile),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn upload_product_image<S: FileStorage>(
    State(service): State<Arc<FileService<S>>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> FileResult<impl IntoResponse> {
    let file = read_file_field(multipart?).await?;
    let uploaded = service.upload(file).await?;
    Ok((StatusCode::CREATED, Json(uploaded)))
}

/// Serve a stored product image
#[utoipa::path(
    get,
    path = "/product/{file_name}",
    tag = TAG,
    params(
        ("file_name" = String, Path, description = "Stored name, `{uuid}.jpg`")
    ),
    responses(
        (status = 200, description = "Image bytes", content_type = "image/jpeg", body = Vec<u8>),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn serve_product_image<S: FileStorage>(
    State(service): State<Arc<FileService<S>>>,
    Path(file_name): Path<String>,
) -> FileResult<impl IntoResponse> {
    let bytes = service.open(&file_name).await?;
    Ok(([(header::CONTENT_TYPE, "image/jpeg")], bytes))
}

/// First part named [`FILE_FIELD`]; other parts are skipped
async fn read_file_field(mut multipart: Multipart) -> FileResult<IncomingFile> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let original_name = field.file_name().unwrap_or_default().to_string();
        let mime_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await?;

        return Ok(IncomingFile {
            field_name: FILE_FIELD.to_string(),
            original_name,
            mime_type,
            bytes,
        });
    }

    Err(FileError::MissingFile)
}
