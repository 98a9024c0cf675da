use serde::Deserialize;

use crate::core::config::GeocodingConfig;
use crate::core::error::{AppError, Result};
use crate::features::location::dtos::AddressResponse;

/// Nominatim reverse geocoding response structure
#[derive(Debug, Deserialize)]
pub struct NominatimReverseResponse {
    pub display_name: Option<String>,
    pub address: Option<NominatimAddress>,
}

/// Nominatim address components
#[derive(Debug, Default, Deserialize)]
pub struct NominatimAddress {
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
    pub country: Option<String>,
}

impl NominatimAddress {
    /// Get city, falling back to town or village
    pub fn get_city(&self) -> Option<String> {
        self.city
            .clone()
            .or_else(|| self.town.clone())
            .or_else(|| self.village.clone())
    }
}

/// Service for reverse geocoding coordinates using Nominatim
pub struct GeocodingService {
    client: reqwest::Client,
    base_url: String,
}

impl GeocodingService {
    pub fn new(config: GeocodingConfig) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(&config.user_agent)
                .build()
                .expect("Failed to build HTTP client"),
            base_url: config.base_url,
        }
    }

    /// Resolve a human-readable address for a coordinate pair.
    ///
    /// Lookup failures degrade to an address string carrying the raw
    /// coordinates, so callers always get a displayable value.
    pub async fn reverse_geocode(&self, lat: f64, lng: f64) -> AddressResponse {
        let response = match self.execute_reverse(lat, lng).await {
            Ok(response) => Some(response),
            Err(e) => {
                tracing::warn!("Reverse geocoding failed: {}", e);
                None
            }
        };
        Self::to_address(lat, lng, response)
    }

    /// Execute HTTP request to Nominatim and parse response
    async fn execute_reverse(&self, lat: f64, lng: f64) -> Result<NominatimReverseResponse> {
        let url = format!(
            "{}/reverse?lat={}&lon={}&format=json",
            self.base_url, lat, lng
        );

        tracing::debug!("Reverse geocoding: {},{} -> {}", lat, lng, url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            AppError::ExternalServiceError(format!("Nominatim request failed: {}", e))
        })?;

        if !response.status().is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "Nominatim returned status: {}",
                response.status()
            )));
        }

        response.json().await.map_err(|e| {
            AppError::ExternalServiceError(format!("Failed to parse Nominatim response: {}", e))
        })
    }

    /// Convert a Nominatim response to the address payload
    fn to_address(
        lat: f64,
        lng: f64,
        response: Option<NominatimReverseResponse>,
    ) -> AddressResponse {
        match response {
            Some(r) => {
                let address = r.address.as_ref();
                AddressResponse {
                    address: r
                        .display_name
                        .clone()
                        .unwrap_or_else(|| "Unknown location".to_string()),
                    city: address.and_then(|a| a.get_city()).unwrap_or_default(),
                    country: address
                        .and_then(|a| a.country.clone())
                        .unwrap_or_default(),
                }
            }
            None => AddressResponse {
                address: format!("{:.6}, {:.6}", lat, lng),
                city: String::new(),
                country: String::new(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nominatim_address_get_city() {
        let addr = NominatimAddress {
            city: Some("New Delhi".to_string()),
            ..Default::default()
        };
        assert_eq!(addr.get_city(), Some("New Delhi".to_string()));

        let addr2 = NominatimAddress {
            town: Some("Gurugram".to_string()),
            ..Default::default()
        };
        assert_eq!(addr2.get_city(), Some("Gurugram".to_string()));

        let addr3 = NominatimAddress {
            village: Some("Mandawa".to_string()),
            ..Default::default()
        };
        assert_eq!(addr3.get_city(), Some("Mandawa".to_string()));
    }

    #[test]
    fn test_to_address_uses_display_name() {
        let response = NominatimReverseResponse {
            display_name: Some("Connaught Place, New Delhi, Delhi, India".to_string()),
            address: Some(NominatimAddress {
                city: Some("New Delhi".to_string()),
                country: Some("India".to_string()),
                ..Default::default()
            }),
        };
        let address = GeocodingService::to_address(28.6315, 77.2167, Some(response));
        assert_eq!(address.address, "Connaught Place, New Delhi, Delhi, India");
        assert_eq!(address.city, "New Delhi");
        assert_eq!(address.country, "India");
    }

    #[test]
    fn test_to_address_defaults_missing_fields() {
        let response = NominatimReverseResponse {
            display_name: None,
            address: None,
        };
        let address = GeocodingService::to_address(28.6315, 77.2167, Some(response));
        assert_eq!(address.address, "Unknown location");
        assert_eq!(address.city, "");
        assert_eq!(address.country, "");
    }

    #[test]
    fn test_to_address_falls_back_to_coordinates() {
        let address = GeocodingService::to_address(28.7041, 77.1025, None);
        assert_eq!(address.address, "28.704100, 77.102500");
        assert_eq!(address.city, "");
        assert_eq!(address.country, "");
    }
}
