use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::state::AppState;

mod dto;
pub mod handlers;
pub mod jwt;
pub mod password;
pub mod repo;
pub mod service;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/register", post(handlers::register))
        .route("/api/login", post(handlers::login))
        .route("/api/users/list", get(handlers::list_users))
        .route("/api/users/:id", get(handlers::get_user))
        .route("/api/users/update/:id", post(handlers::update_user))
        .route("/api/users/delete/:id", delete(handlers::delete_user))
}
