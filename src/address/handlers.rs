use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::{debug, instrument};

use crate::address::dto::{GeocodeRequest, GeocodeResponse, SearchRequest, SearchResponse};
use crate::auth::jwt::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

#[instrument(skip(state, payload))]
pub async fn search(
    State(state): State<AppState>,
    AuthUser(username): AuthUser,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Json(payload) = payload?;
    debug!(user = %username, query = %payload.query, "address search");
    let response = state.address.search(&payload.query).await?;
    Ok(Json(response))
}

#[instrument(skip(state, payload))]
pub async fn geocode(
    State(state): State<AppState>,
    AuthUser(username): AuthUser,
    payload: Result<Json<GeocodeRequest>, JsonRejection>,
) -> Result<Json<GeocodeResponse>, ApiError> {
    let Json(payload) = payload?;
    debug!(user = %username, lat = %payload.lat, lng = %payload.lng, "geocode");
    let response = state.address.geocode(&payload).await?;
    Ok(Json(response))
}
