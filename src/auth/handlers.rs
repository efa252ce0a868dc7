use axum::{
    extract::{rejection::JsonRejection, FromRef, Path, State},
    http::{header, HeaderName, StatusCode},
    Json,
};
use tracing::{info, instrument};

use crate::auth::dto::{Credentials, TokenResponse};
use crate::auth::jwt::JwtKeys;
use crate::auth::repo::User;
use crate::error::ApiError;
use crate::state::AppState;

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(payload) = payload?;
    state
        .users
        .register(&payload.username, &payload.password)
        .await?;
    info!(username = %payload.username, "user registered");
    Ok(StatusCode::OK)
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<([(HeaderName, String); 1], Json<TokenResponse>), ApiError> {
    let Json(payload) = payload?;

    if !state
        .users
        .authenticate(&payload.username, &payload.password)
        .await
    {
        return Err(ApiError::AuthFailure);
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(&payload.username).map_err(ApiError::Store)?;

    info!(username = %payload.username, "user logged in");
    Ok((
        [(header::AUTHORIZATION, format!("Bearer {token}"))],
        Json(TokenResponse { token }),
    ))
}

#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    let users = state.users.list().await?;
    Ok(Json(users))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<User>, ApiError> {
    let user = state.users.get(id).await?;
    Ok(Json(user))
}

#[instrument(skip(state, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<&'static str, ApiError> {
    let Json(payload) = payload?;
    state
        .users
        .update(id, &payload.username, &payload.password)
        .await?;
    info!(%id, "user updated");
    Ok("user updated")
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<&'static str, ApiError> {
    state.users.delete(id).await?;
    info!(%id, "user deleted");
    Ok("user deleted")
}
