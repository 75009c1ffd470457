//! Handler tests for the files domain
//!
//! Multipart bodies are assembled by hand and sent through the router with
//! `oneshot` over the in-memory storage.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use domain_files::*;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt; // For oneshot()

const BOUNDARY: &str = "catalog-test-boundary";
const JPEG: &[u8] = b"\xff\xd8\xff\xe0\x00\x10JFIF\x00";

fn app(storage: InMemoryFileStorage, body_limit: Option<usize>) -> Router {
    handlers::router(FileService::new(storage, "/api/files/product"), body_limit)
}

fn multipart_body(field: &str, file_name: &str, content_type: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn upload_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/product")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_png_rejected_then_jpeg_accepted() {
    let storage = InMemoryFileStorage::new();
    let app = app(storage.clone(), None);

    let response = app
        .clone()
        .oneshot(upload_request(multipart_body("file", "chair.png", "image/png", b"\x89PNG")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "BAD_REQUEST");
    assert_eq!(body["message"], "Validation failed (expected type is image/jpeg)");
    assert!(storage.is_empty().await);

    let response = app
        .oneshot(upload_request(multipart_body("file", "chair.jpeg", "image/jpeg", JPEG)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = json_body(response).await;
    assert_eq!(body["field_name"], "file");
    assert_eq!(body["original_name"], "chair.jpeg");
    assert_eq!(body["mime_type"], "image/jpeg");
    assert_eq!(body["size"], JPEG.len() as u64);
    let file_name = body["file_name"].as_str().unwrap();
    assert!(file_name.ends_with(".jpg"));
    assert_eq!(body["location"], format!("/api/files/product/{}", file_name));
    assert_eq!(storage.len().await, 1);
}

#[tokio::test]
async fn test_missing_file_field_is_400() {
    let app = app(InMemoryFileStorage::new(), None);

    let response = app
        .oneshot(upload_request(multipart_body("avatar", "chair.jpeg", "image/jpeg", JPEG)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["message"], "File is required");
}

#[tokio::test]
async fn test_non_multipart_body_is_400_json() {
    let app = app(InMemoryFileStorage::new(), None);

    let request = Request::builder()
        .method("POST")
        .uri("/product")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{}"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_uploaded_file_is_served_back() {
    let app = app(InMemoryFileStorage::new(), None);

    let response = app
        .clone()
        .oneshot(upload_request(multipart_body("file", "lamp.jpg", "image/jpeg", JPEG)))
        .await
        .unwrap();
    let uploaded = json_body(response).await;
    let file_name = uploaded["file_name"].as_str().unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/product/{}", file_name))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/jpeg");
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], JPEG);
}

#[tokio::test]
async fn test_serve_unknown_and_malformed_names() {
    let app = app(InMemoryFileStorage::new(), None);

    let unknown = format!("/product/{}.jpg", uuid::Uuid::now_v7());
    let response = app
        .clone()
        .oneshot(Request::builder().uri(unknown).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/product/chair.jpg")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_configured_body_limit_applies() {
    let app = app(InMemoryFileStorage::new(), Some(64));

    let oversized = vec![0u8; 1024];
    let response = app
        .oneshot(upload_request(multipart_body("file", "big.jpg", "image/jpeg", &oversized)))
        .await
        .unwrap();
    assert!(response.status().is_client_error());
}
