//! /invoices routes.

use crate::handlers::invoices;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn invoice_routes(state: AppState) -> Router {
    Router::new()
        .route("/invoices", get(invoices::list).post(invoices::create))
        .route(
            "/invoices/:id",
            get(invoices::get).put(invoices::update).delete(invoices::delete),
        )
        .with_state(state)
}
