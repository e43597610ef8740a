//! REST surface of the fall documentation backend.
//!
//! Routes are nested under `/api/`; generated reports are served as static
//! files under `/reports/`. `api_router()` returns a `Router` that can be
//! mounted on any axum server instance.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;

pub use router::api_router;
pub use server::serve;
pub use types::ApiContext;
