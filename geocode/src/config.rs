use std::time::Duration;

use serde::Deserialize;

use crate::GeocodeError;

const DEFAULT_ENDPOINT: &str = "https://nominatim.openstreetmap.org";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for [`NominatimGeocoder`](crate::NominatimGeocoder).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GeocoderConfig {
    /// Base URL of the Nominatim instance.
    pub endpoint: String,
    /// `User-Agent` sent with every request. Nominatim rejects anonymous clients.
    pub user_agent: String,
    /// Preferred address language as a BCP 47 tag. `None` uses the system locale.
    pub language: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_agent: concat!("wherekit/", env!("CARGO_PKG_VERSION")).to_string(),
            language: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl GeocoderConfig {
    /// Load the configuration from `WHEREKIT_*` environment variables,
    /// falling back to the defaults for anything unset.
    ///
    /// # Errors
    /// Returns [`GeocodeError::Config`] if `WHEREKIT_TIMEOUT_SECS` is not a
    /// whole number of seconds.
    pub fn from_env() -> Result<Self, GeocodeError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_vars(
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, GeocodeError> {
        let mut config = Self::default();

        if let Some(endpoint) = var("WHEREKIT_GEOCODER_URL") {
            config.endpoint = endpoint;
        }
        if let Some(user_agent) = var("WHEREKIT_USER_AGENT") {
            config.user_agent = user_agent;
        }
        config.language = var("WHEREKIT_LANGUAGE").filter(|lang| !lang.is_empty());
        if let Some(timeout) = var("WHEREKIT_TIMEOUT_SECS") {
            config.timeout_secs = timeout.trim().parse().map_err(|_| {
                GeocodeError::Config(format!("WHEREKIT_TIMEOUT_SECS must be seconds, got {timeout:?}"))
            })?;
        }

        Ok(config)
    }

    /// The request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The language to request: the configured one, else the system locale.
    #[must_use]
    pub fn effective_language(&self) -> Option<String> {
        self.language.clone().or_else(|| {
            ["LC_ALL", "LC_MESSAGES", "LANG"]
                .into_iter()
                .find_map(|key| std::env::var(key).ok().and_then(|v| locale_to_tag(&v)))
        })
    }
}

/// Convert a POSIX locale such as `pt_BR.UTF-8` into a language tag (`pt-BR`).
fn locale_to_tag(locale: &str) -> Option<String> {
    let name = locale.split(['.', '@']).next().unwrap_or_default();
    match name {
        "" | "C" | "POSIX" => None,
        name => Some(name.replace('_', "-")),
    }
}
