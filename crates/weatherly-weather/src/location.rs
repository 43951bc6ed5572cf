//! Decide which location to query: the device position when permitted,
//! otherwise the configured default city.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::types::{Location, LocationError};

/// Tri-state answer of a permission query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionState {
    Granted,
    Denied,
    Prompt,
}

/// Platform geolocation capability
#[async_trait]
pub trait Geolocation: Send + Sync {
    /// `None` when the platform has no permission-query capability
    async fn query_permission(&self) -> Option<Result<PermissionState, LocationError>>;

    async fn current_position(&self) -> Result<(f64, f64), LocationError>;
}

/// Picks the location for a fetch cycle. Never fails: every problem falls
/// back to the default city.
pub struct LocationResolver {
    default_city: String,
    geolocation: Option<Box<dyn Geolocation>>,
}

impl LocationResolver {
    pub fn new(default_city: impl Into<String>, geolocation: Option<Box<dyn Geolocation>>) -> Self {
        Self {
            default_city: default_city.into(),
            geolocation,
        }
    }

    pub fn default_city(&self) -> &str {
        &self.default_city
    }

    fn fallback(&self) -> Location {
        Location::City(self.default_city.clone())
    }

    pub async fn resolve(&self) -> Location {
        let Some(geo) = self.geolocation.as_deref() else {
            tracing::debug!("No geolocation capability, using {}", self.default_city);
            return self.fallback();
        };

        match geo.query_permission().await {
            None => {
                tracing::debug!("No permission query capability, using {}", self.default_city);
                self.fallback()
            }
            Some(Err(e)) => {
                tracing::debug!("Permission query failed ({}), using {}", e, self.default_city);
                self.fallback()
            }
            Some(Ok(PermissionState::Granted)) => match geo.current_position().await {
                Ok((latitude, longitude)) => {
                    tracing::info!("Got location: {}, {}", latitude, longitude);
                    Location::coordinates(latitude, longitude)
                }
                Err(e) => {
                    tracing::debug!("Position unavailable ({}), using {}", e, self.default_city);
                    self.fallback()
                }
            },
            Some(Ok(state)) => {
                tracing::debug!(
                    "Location permission is {:?}, not prompting; using {}",
                    state,
                    self.default_city
                );
                self.fallback()
            }
        }
    }
}

const LOOKUP_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Deserialize)]
struct IpLookupResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

/// Approximate position from the public IP address, gated by a stored
/// permission answer
pub struct IpGeolocation {
    client: Client,
    lookup_url: String,
    permission: PermissionState,
}

impl IpGeolocation {
    pub fn new(lookup_url: impl Into<String>, permission: PermissionState) -> Result<Self, LocationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(LOOKUP_TIMEOUT_SECS))
            .build()
            .map_err(|e| LocationError::Other(e.to_string()))?;

        Ok(Self {
            client,
            lookup_url: lookup_url.into(),
            permission,
        })
    }
}

#[async_trait]
impl Geolocation for IpGeolocation {
    async fn query_permission(&self) -> Option<Result<PermissionState, LocationError>> {
        Some(Ok(self.permission))
    }

    async fn current_position(&self) -> Result<(f64, f64), LocationError> {
        if self.permission != PermissionState::Granted {
            return Err(LocationError::PermissionDenied);
        }

        let response = self
            .client
            .get(&self.lookup_url)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LocationError::Timeout
                } else {
                    LocationError::ServiceUnavailable
                }
            })?;

        if !response.status().is_success() {
            tracing::debug!("IP lookup returned status {}", response.status());
            return Err(LocationError::ServiceUnavailable);
        }

        let body: IpLookupResponse = response
            .json()
            .await
            .map_err(|e| LocationError::Other(format!("IP lookup parse error: {}", e)))?;

        match (body.status.as_str(), body.lat, body.lon) {
            ("success", Some(lat), Some(lon)) => Ok((lat, lon)),
            _ => Err(LocationError::Other(
                body.message.unwrap_or_else(|| "lookup failed".to_string()),
            )),
        }
    }
}
