//! OpenAPI documentation configuration

use domain_products::handlers::AdminApiDoc;
use utoipa::OpenApi;

/// Public OpenAPI documentation for Catalog API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog API",
        version = "0.1.0",
        description = "Product catalog with image uploads",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/products", api = domain_products::handlers::ApiDoc),
        (path = "/api/files", api = domain_files::handlers::ApiDoc)
    ),
    tags(
        (name = "Products", description = "Product catalog endpoints"),
        (name = "Files", description = "Product image uploads")
    )
)]
pub struct ApiDoc;

/// The served document. Admin paths are listed only when the admin routes
/// are mounted.
pub fn api_doc(admin_enabled: bool) -> utoipa::openapi::OpenApi {
    let doc = ApiDoc::openapi();
    if admin_enabled {
        doc.nest("/api/admin", AdminApiDoc::openapi())
    } else {
        doc
    }
}
