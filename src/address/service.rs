use std::sync::Arc;

use crate::address::client::GeocodeClient;
use crate::address::dto::{Address, GeocodeRequest, GeocodeResponse, SearchResponse, Suggestion};
use crate::error::ApiError;

/// Reshapes provider suggestions into this service's own records. Provider
/// failures surface as a single generic upstream error.
#[derive(Clone)]
pub struct AddressService {
    client: Arc<dyn GeocodeClient>,
}

impl AddressService {
    pub fn new(client: Arc<dyn GeocodeClient>) -> Self {
        Self { client }
    }

    pub async fn search(&self, query: &str) -> Result<SearchResponse, ApiError> {
        let suggestions = self
            .client
            .suggest(query)
            .await
            .map_err(|e| ApiError::Upstream(e.to_string()))?;

        let addresses = suggestions
            .into_iter()
            .map(|s| Address {
                result: s.value,
                postal_code: s.data.postal_code.unwrap_or_default(),
                country: s.data.country.unwrap_or_default(),
                region: s.data.region.unwrap_or_default(),
                street: s.data.street.unwrap_or_default(),
                lat: s.data.geo_lat.unwrap_or_default(),
                lon: s.data.geo_lon.unwrap_or_default(),
            })
            .collect();
        Ok(SearchResponse { addresses })
    }

    pub async fn geocode(&self, request: &GeocodeRequest) -> Result<GeocodeResponse, ApiError> {
        if request.lat.is_empty() || request.lng.is_empty() {
            return Err(ApiError::Validation(
                "latitude and longitude cannot be empty".into(),
            ));
        }

        let suggestions = self
            .client
            .geolocate(&request.lat, &request.lng)
            .await
            .map_err(|e| ApiError::Upstream(e.to_string()))?;

        let suggestions = suggestions
            .into_iter()
            .map(|s| Suggestion {
                lat: s.data.geo_lat.unwrap_or_default(),
                lon: s.data.geo_lon.unwrap_or_default(),
                value: s.value,
            })
            .collect();
        Ok(GeocodeResponse { suggestions })
    }
}
