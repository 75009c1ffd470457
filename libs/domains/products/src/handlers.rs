use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use axum_helpers::{
    UuidPath, ValidatedJson, ValidatedQuery,
    errors::responses::{
        BadRequestQueryResponse, BadRequestUuidResponse, BadRequestValidationResponse,
        ConflictResponse, InternalServerErrorResponse, NotFoundResponse,
    },
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

use crate::error::ProductResult;
use crate::models::{CreateProduct, Gender, PaginationQuery, Product, UpdateProduct};
use crate::repository::ProductRepository;
use crate::seed::initial_catalog;
use crate::service::ProductService;

const TAG: &str = "Products";
const ADMIN_TAG: &str = "Admin";

/// OpenAPI documentation for the Products API
#[derive(OpenApi)]
#[openapi(
    paths(list_products, create_product, find_product, update_product, remove_product),
    components(
        schemas(Product, CreateProduct, UpdateProduct, Gender),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            BadRequestQueryResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags((name = TAG, description = "Product catalog endpoints"))
)]
pub struct ApiDoc;

/// OpenAPI documentation for the catalog admin routes
#[derive(OpenApi)]
#[openapi(
    paths(delete_all_products, seed_products),
    components(
        schemas(DeletedResponse, SeededResponse),
        responses(InternalServerErrorResponse)
    ),
    tags((name = ADMIN_TAG, description = "Catalog maintenance endpoints"))
)]
pub struct AdminApiDoc;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeletedResponse {
    pub deleted: u64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SeededResponse {
    pub inserted: usize,
}

/// Public product routes, nested at `/products` by the app.
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{term}",
            get(find_product).patch(update_product).delete(remove_product),
        )
        .with_state(shared_service)
}

/// Maintenance routes, nested at `/admin` only when enabled.
pub fn admin_router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/products", delete(delete_all_products))
        .route("/seed", post(seed_products))
        .with_state(shared_service)
}

/// List products, oldest first
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(PaginationQuery),
    responses(
        (status = 200, description = "Page of products", body = Vec<Product>),
        (status = 400, response = BadRequestQueryResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedQuery(page): ValidatedQuery<PaginationQuery>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.list_products(page).await?;
    Ok(Json(products))
}

/// Create a product with its images
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> ProductResult<impl IntoResponse> {
    let product = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Find a product by id, slug or title
#[utoipa::path(
    get,
    path = "/{term}",
    tag = TAG,
    params(
        ("term" = String, Path, description = "Product id, slug or title (case-insensitive)")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn find_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(term): Path<String>,
) -> ProductResult<Json<Product>> {
    let product = service.find_one_plain(&term).await?;
    Ok(Json(product))
}

/// Update a product; `images`, when present, replaces the image set
#[utoipa::path(
    patch,
    path = "/{term}",
    tag = TAG,
    params(
        ("term" = Uuid, Path, description = "Product id")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(patch): ValidatedJson<UpdateProduct>,
) -> ProductResult<Json<Product>> {
    let product = service.update_product(id, patch).await?;
    Ok(Json(product))
}

/// Delete a product and its images
#[utoipa::path(
    delete,
    path = "/{term}",
    tag = TAG,
    params(
        ("term" = Uuid, Path, description = "Product id")
    ),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn remove_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
) -> ProductResult<StatusCode> {
    service.remove_product(&id.to_string()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete every product
#[utoipa::path(
    delete,
    path = "/products",
    tag = ADMIN_TAG,
    responses(
        (status = 200, description = "All products deleted", body = DeletedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_all_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<DeletedResponse>> {
    let deleted = service.delete_all_products().await?;
    Ok(Json(DeletedResponse { deleted }))
}

/// Replace the catalog with the bundled seed data
#[utoipa::path(
    post,
    path = "/seed",
    tag = ADMIN_TAG,
    responses(
        (status = 200, description = "Catalog seeded", body = SeededResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn seed_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<SeededResponse>> {
    let inserted = service.seed(initial_catalog()).await?;
    Ok(Json(SeededResponse { inserted }))
}
