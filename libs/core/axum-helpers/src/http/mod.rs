//! Cross-cutting HTTP layers applied by [`create_router`](crate::server::create_router).

pub mod cors;
pub mod security;

pub use cors::{cors_layer_from_env, parse_allowed_origins};
pub use security::security_headers;
