//! Products Domain
//!
//! Catalog products and their image rows.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints (public + admin routers)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, term lookup, seeding
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Trait + Postgres/in-memory implementations
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← DTOs, entities, enums
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{InMemoryProductRepository, ProductService, handlers};
//!
//! let service = ProductService::new(InMemoryProductRepository::new());
//! let router = handlers::router(service.clone());
//! let admin = handlers::admin_router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod lookup;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod seed;
pub mod service;

pub use error::{ProductError, ProductResult};
pub use lookup::{LookupTerm, classify};
pub use models::{CreateProduct, Gender, PaginationQuery, Product, UpdateProduct, normalize_slug};
pub use postgres::PgProductRepository;
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::ProductService;
