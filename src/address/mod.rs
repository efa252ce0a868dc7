use axum::{routing::post, Router};

use crate::state::AppState;

pub mod client;
mod dto;
pub mod handlers;
pub mod service;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/address/search", post(handlers::search))
        .route("/api/address/geocode", post(handlers::geocode))
}
