//! API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Health, narrative and PDF export live under `/api/`. Residents and
//! incident reports sit at the root, where the mobile client calls them.
//! Report PDFs are served from the reports directory under `/reports/`.

use std::sync::Arc;

use axum::http::{header, HeaderValue};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::api::endpoints;
use crate::api::types::ApiContext;
use crate::core_state::CoreState;
use crate::report::export::PUBLIC_PREFIX;

/// Build the API router.
///
/// Endpoint handlers use `State<ApiContext>` (provided via `with_state`).
///
/// NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
pub fn api_router(core: Arc<CoreState>) -> Router {
    let reports = Router::new()
        .nest_service(PUBLIC_PREFIX, ServeDir::new(core.reports_dir()))
        // Reports hold resident health data; never cache them in between.
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ));

    let ctx = ApiContext::new(core);
    let api = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/narrative", post(endpoints::narrative::build))
        .route("/report/pdf", post(endpoints::reports::generate_pdf))
        .with_state(ctx.clone());

    let records = Router::new()
        .route(
            "/residents",
            get(endpoints::residents::list).post(endpoints::residents::create),
        )
        .route("/incident-reports", post(endpoints::incident_reports::create))
        .route(
            "/incident-reports/resident/:id",
            get(endpoints::incident_reports::list_for_resident),
        )
        .with_state(ctx);

    Router::new()
        .nest("/api", api)
        .merge(records)
        .merge(reports)
        .layer(CorsLayer::permissive())
}
