//! Shared services for fetch cycles, built once from configuration.

use std::time::Duration;

use anyhow::{Context, Result};
use weatherly_core::{Config, PermissionSetting};
use weatherly_weather::{
    Geolocation, IpGeolocation, LocationResolver, PermissionState, ProviderSettings,
    WeatherProvider,
};

/// Provider client and location resolver, shared by every fetch cycle
pub struct WeatherServices {
    provider: WeatherProvider,
    resolver: LocationResolver,
}

impl WeatherServices {
    pub fn new(provider: WeatherProvider, resolver: LocationResolver) -> Self {
        Self { provider, resolver }
    }

    /// Build services from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let weather = &config.weather;
        let location = &config.location;

        let settings = ProviderSettings {
            api_key: weather.is_configured().then(|| weather.api_key.clone()),
            base_url: weather.base_url.clone(),
            timeout: Duration::from_secs(weather.timeout_secs),
            demo_delay: Duration::from_millis(weather.demo_delay_ms),
            demo_city: location.default_city.clone(),
        };
        if settings.api_key.is_none() {
            tracing::warn!("No weather API key configured, showing demo data");
        }
        let provider = WeatherProvider::new(settings).context("Failed to create weather client")?;

        let geolocation = location.lookup_url().and_then(|url| {
            match IpGeolocation::new(url, permission_state(location.permission)) {
                Ok(geo) => Some(Box::new(geo) as Box<dyn Geolocation>),
                Err(e) => {
                    tracing::warn!("Geolocation unavailable: {}", e);
                    None
                }
            }
        });
        let resolver = LocationResolver::new(location.default_city.clone(), geolocation);

        Ok(Self::new(provider, resolver))
    }

    pub fn provider(&self) -> &WeatherProvider {
        &self.provider
    }

    pub fn resolver(&self) -> &LocationResolver {
        &self.resolver
    }
}

fn permission_state(setting: PermissionSetting) -> PermissionState {
    match setting {
        PermissionSetting::Granted => PermissionState::Granted,
        PermissionSetting::Denied => PermissionState::Denied,
        PermissionSetting::Prompt => PermissionState::Prompt,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_key_builds_demo_provider() {
        let config = Config::default();
        let services = WeatherServices::from_config(&config).unwrap();
        assert!(services.provider().is_demo());
        assert_eq!(services.resolver().default_city(), "Kolkata");
    }

    #[test]
    fn configured_key_builds_live_provider() {
        let mut config = Config::default();
        config.weather.api_key = "abc123".to_string();
        let services = WeatherServices::from_config(&config).unwrap();
        assert!(!services.provider().is_demo());
    }

    #[test]
    fn permission_mapping() {
        assert_eq!(permission_state(PermissionSetting::Granted), PermissionState::Granted);
        assert_eq!(permission_state(PermissionSetting::Denied), PermissionState::Denied);
        assert_eq!(permission_state(PermissionSetting::Prompt), PermissionState::Prompt);
    }
}
