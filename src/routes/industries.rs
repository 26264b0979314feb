//! /industries routes, including the nested company association.

use crate::handlers::industries;
use crate::state::AppState;
use axum::{routing::get, routing::post, Router};

pub fn industry_routes(state: AppState) -> Router {
    Router::new()
        .route("/industries", get(industries::list).post(industries::create))
        .route("/industries/:code", get(industries::get))
        .route("/industries/:code/companies", post(industries::associate))
        .with_state(state)
}
