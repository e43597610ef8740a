//! API endpoint handlers.
//!
//! Handlers stay thin: they decode the request, call into `narrative`,
//! `report` or `db`, and map errors through `ApiError`.

pub mod health;
pub mod incident_reports;
pub mod narrative;
pub mod reports;
pub mod residents;
