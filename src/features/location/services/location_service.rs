use std::future::Future;
use std::time::Duration;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::config::GeolocationConfig;
use crate::core::error::AppError;

/// A resolved position, either from the provider or the configured fallback
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct ResolvedLocation {
    pub latitude: f64,
    pub longitude: f64,
    /// Reported accuracy in meters, 0 for the fallback coordinate
    pub accuracy: f64,
    pub is_default: bool,
}

/// Classified failure reasons from the position provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    #[error("Geolocation is not supported by your browser")]
    Unsupported,
    #[error("Location permission denied. Please enable location access.")]
    PermissionDenied,
    #[error("Location information unavailable.")]
    Unavailable,
    #[error("Location request timed out. Using default location.")]
    Timeout,
    #[error("An unknown error occurred.")]
    Unknown,
}

impl From<PositionError> for AppError {
    fn from(err: PositionError) -> Self {
        match err {
            PositionError::Unsupported => AppError::BadRequest(err.to_string()),
            PositionError::PermissionDenied => AppError::Forbidden(err.to_string()),
            PositionError::Unavailable
            | PositionError::Timeout
            | PositionError::Unknown => AppError::ExternalServiceError(err.to_string()),
        }
    }
}

/// Position payload returned by the provider
#[derive(Debug, Deserialize)]
struct ProviderPosition {
    lat: f64,
    lng: f64,
    accuracy: Option<f64>,
}

/// Resolves the submitter's position through an optional HTTP provider.
///
/// Two variants exist: `resolve_precise` (long timeout, high accuracy,
/// failures surface except timeout which falls back) and `resolve_quick`
/// (short timeout, low accuracy, never fails). The submission pipeline uses
/// neither directly but `resolve_for_submission`, which races the precise
/// lookup against a single budget and absorbs every failure, so a slow or
/// denied resolver can never block a report.
pub struct LocationService {
    client: reqwest::Client,
    provider_url: Option<String>,
    precise_timeout: Duration,
    quick_timeout: Duration,
    submission_budget: Duration,
    default_location: ResolvedLocation,
}

impl LocationService {
    pub fn new(config: GeolocationConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            provider_url: config.provider_url,
            precise_timeout: config.precise_timeout,
            quick_timeout: config.quick_timeout,
            submission_budget: config.submission_budget,
            default_location: ResolvedLocation {
                latitude: config.default_latitude,
                longitude: config.default_longitude,
                accuracy: 0.0,
                is_default: true,
            },
        }
    }

    /// High-accuracy resolution. Permission and availability failures
    /// surface to the caller; only a timeout falls back to the default
    /// coordinate.
    pub async fn resolve_precise(&self) -> Result<ResolvedLocation, PositionError> {
        Self::fallback_on_timeout(
            self.precise_timeout,
            self.fetch_position(true),
            self.default_location,
        )
        .await
    }

    /// Low-accuracy resolution that always produces a location
    pub async fn resolve_quick(&self) -> ResolvedLocation {
        Self::absorb_within(
            self.quick_timeout,
            self.fetch_position(false),
            self.default_location,
        )
        .await
    }

    /// Resolution policy for the submission pipeline: the precise lookup
    /// raced against one budget, every failure absorbed into the default
    /// coordinate.
    pub async fn resolve_for_submission(&self) -> ResolvedLocation {
        Self::absorb_within(
            self.submission_budget,
            self.resolve_precise(),
            self.default_location,
        )
        .await
    }

    async fn fallback_on_timeout<F>(
        timeout: Duration,
        fetch: F,
        fallback: ResolvedLocation,
    ) -> Result<ResolvedLocation, PositionError>
    where
        F: Future<Output = Result<ResolvedLocation, PositionError>>,
    {
        match tokio::time::timeout(timeout, fetch).await {
            Ok(result) => result,
            Err(_) => {
                tracing::debug!("Position lookup timed out, using default location");
                Ok(fallback)
            }
        }
    }

    async fn absorb_within<F>(
        budget: Duration,
        fetch: F,
        fallback: ResolvedLocation,
    ) -> ResolvedLocation
    where
        F: Future<Output = Result<ResolvedLocation, PositionError>>,
    {
        match tokio::time::timeout(budget, fetch).await {
            Ok(Ok(location)) => location,
            Ok(Err(reason)) => {
                tracing::debug!("Position lookup failed ({}), using default location", reason);
                fallback
            }
            Err(_) => {
                tracing::debug!("Position lookup exceeded budget, using default location");
                fallback
            }
        }
    }

    async fn fetch_position(&self, high_accuracy: bool) -> Result<ResolvedLocation, PositionError> {
        let base = self
            .provider_url
            .as_deref()
            .ok_or(PositionError::Unsupported)?;
        let accuracy = if high_accuracy { "high" } else { "low" };
        let url = format!("{}/position?accuracy={}", base, accuracy);

        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::warn!("Position provider request failed: {}", e);
            if e.is_timeout() {
                PositionError::Timeout
            } else {
                PositionError::Unavailable
            }
        })?;

        match response.status() {
            StatusCode::FORBIDDEN => return Err(PositionError::PermissionDenied),
            StatusCode::NOT_FOUND | StatusCode::SERVICE_UNAVAILABLE => {
                return Err(PositionError::Unavailable)
            }
            status if !status.is_success() => {
                tracing::warn!("Position provider returned status: {}", status);
                return Err(PositionError::Unknown);
            }
            _ => {}
        }

        let position: ProviderPosition = response.json().await.map_err(|e| {
            tracing::warn!("Failed to parse position provider response: {}", e);
            PositionError::Unknown
        })?;

        Ok(ResolvedLocation {
            latitude: position.lat,
            longitude: position.lng,
            accuracy: position.accuracy.unwrap_or(0.0),
            is_default: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELHI: ResolvedLocation = ResolvedLocation {
        latitude: 28.7041,
        longitude: 77.1025,
        accuracy: 0.0,
        is_default: true,
    };

    fn service_without_provider() -> LocationService {
        LocationService::new(GeolocationConfig {
            provider_url: None,
            precise_timeout: Duration::from_secs(30),
            quick_timeout: Duration::from_secs(10),
            submission_budget: Duration::from_secs(5),
            default_latitude: 28.7041,
            default_longitude: 77.1025,
        })
    }

    fn fix(latitude: f64, longitude: f64) -> ResolvedLocation {
        ResolvedLocation {
            latitude,
            longitude,
            accuracy: 12.5,
            is_default: false,
        }
    }

    async fn never_resolves() -> Result<ResolvedLocation, PositionError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(fix(0.0, 0.0))
    }

    #[tokio::test(start_paused = true)]
    async fn test_precise_falls_back_on_timeout() {
        let result = LocationService::fallback_on_timeout(
            Duration::from_secs(30),
            never_resolves(),
            DELHI,
        )
        .await;
        assert_eq!(result, Ok(DELHI));
    }

    #[tokio::test]
    async fn test_precise_surfaces_permission_denial() {
        let result = LocationService::fallback_on_timeout(
            Duration::from_secs(30),
            async { Err(PositionError::PermissionDenied) },
            DELHI,
        )
        .await;
        assert_eq!(result, Err(PositionError::PermissionDenied));
    }

    #[tokio::test]
    async fn test_precise_passes_through_a_fix() {
        let result = LocationService::fallback_on_timeout(
            Duration::from_secs(30),
            async { Ok(fix(48.8566, 2.3522)) },
            DELHI,
        )
        .await;
        assert_eq!(result, Ok(fix(48.8566, 2.3522)));
    }

    #[tokio::test]
    async fn test_absorb_swallows_every_failure() {
        let denied = LocationService::absorb_within(
            Duration::from_secs(5),
            async { Err(PositionError::PermissionDenied) },
            DELHI,
        )
        .await;
        assert_eq!(denied, DELHI);

        let unavailable = LocationService::absorb_within(
            Duration::from_secs(5),
            async { Err(PositionError::Unavailable) },
            DELHI,
        )
        .await;
        assert_eq!(unavailable, DELHI);
    }

    #[tokio::test(start_paused = true)]
    async fn test_absorb_falls_back_when_budget_is_exceeded() {
        let result =
            LocationService::absorb_within(Duration::from_secs(5), never_resolves(), DELHI).await;
        assert_eq!(result, DELHI);
    }

    #[tokio::test]
    async fn test_unconfigured_provider_is_unsupported() {
        let service = service_without_provider();
        assert_eq!(
            service.resolve_precise().await,
            Err(PositionError::Unsupported)
        );
    }

    #[tokio::test]
    async fn test_quick_resolution_never_fails() {
        let service = service_without_provider();
        assert_eq!(service.resolve_quick().await, DELHI);
    }

    #[tokio::test]
    async fn test_submission_resolution_never_fails() {
        let service = service_without_provider();
        assert_eq!(service.resolve_for_submission().await, DELHI);
    }

    #[test]
    fn test_position_errors_keep_their_user_messages() {
        assert_eq!(
            PositionError::PermissionDenied.to_string(),
            "Location permission denied. Please enable location access."
        );
        assert_eq!(
            PositionError::Unavailable.to_string(),
            "Location information unavailable."
        );
        assert_eq!(
            PositionError::Timeout.to_string(),
            "Location request timed out. Using default location."
        );
        assert_eq!(
            PositionError::Unknown.to_string(),
            "An unknown error occurred."
        );
    }
}
