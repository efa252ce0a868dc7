use serde::{Deserialize, Serialize};

/// Request body for free-text address search.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

/// Request body for reverse geocoding.
#[derive(Debug, Deserialize)]
pub struct GeocodeRequest {
    pub lat: String,
    pub lng: String,
}

/// Normalized address record returned by search.
#[derive(Debug, Serialize)]
pub struct Address {
    pub result: String,
    pub postal_code: String,
    pub country: String,
    pub region: String,
    pub street: String,
    pub lat: String,
    pub lon: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub addresses: Vec<Address>,
}

/// Human-readable suggestion returned by reverse geocoding.
#[derive(Debug, Serialize)]
pub struct Suggestion {
    pub lat: String,
    pub lon: String,
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct GeocodeResponse {
    pub suggestions: Vec<Suggestion>,
}
