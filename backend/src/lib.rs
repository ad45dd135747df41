//! Gradebook backend: role-gated student, subject and score management over a
//! primary or replica MySQL node.
//!
//! The crate follows a hexagonal layout. [`domain`] holds validated types,
//! guards and use-case services; [`inbound`] adapts them to HTTP;
//! [`outbound`] implements the repository ports with Diesel.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
