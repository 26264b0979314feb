//! Routers per resource plus the operational endpoints and 404 fallback.

pub mod common;
pub mod companies;
pub mod industries;
pub mod invoices;

pub use common::common_routes;
pub use companies::company_routes;
pub use industries::industry_routes;
pub use invoices::invoice_routes;

use crate::error::ApiError;
use crate::state::AppState;
use axum::Router;
use tower_http::trace::TraceLayer;

/// Unmatched paths get the same envelope with a fixed 404 body.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// The full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(company_routes(state.clone()))
        .merge(industry_routes(state.clone()))
        .merge(invoice_routes(state))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
}
