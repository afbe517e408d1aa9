use std::sync::OnceLock;

use reqwest::blocking::Client;
use reqwest::header::ACCEPT_LANGUAGE;
use serde::Deserialize;

use crate::{AddressCandidate, AddressLookup, GeocodeError, GeocoderConfig, Position};

/// Street-level detail.
const ZOOM: &str = "18";

/// Reverse geocoder backed by a Nominatim server.
///
/// The HTTP client is built on the first lookup, so the geocoder can be
/// created from async code and used from a worker thread.
#[derive(Debug)]
pub struct NominatimGeocoder {
    config: GeocoderConfig,
    reverse_url: String,
    language: Option<String>,
    client: OnceLock<Client>,
}

impl NominatimGeocoder {
    /// Create a geocoder from `config`.
    ///
    /// # Errors
    /// Returns [`GeocodeError::Config`] if the endpoint or user agent is empty.
    pub fn new(config: GeocoderConfig) -> Result<Self, GeocodeError> {
        let endpoint = config.endpoint.trim().trim_end_matches('/');
        if endpoint.is_empty() {
            return Err(GeocodeError::Config("endpoint cannot be empty".into()));
        }
        if config.user_agent.trim().is_empty() {
            return Err(GeocodeError::Config("user agent cannot be empty".into()));
        }

        Ok(Self {
            reverse_url: format!("{endpoint}/reverse"),
            language: config.effective_language(),
            config,
            client: OnceLock::new(),
        })
    }

    /// The configuration this geocoder was created with.
    #[must_use]
    pub const fn config(&self) -> &GeocoderConfig {
        &self.config
    }

    fn client(&self) -> Result<&Client, GeocodeError> {
        if let Some(client) = self.client.get() {
            return Ok(client);
        }
        let client = Client::builder()
            .user_agent(self.config.user_agent.clone())
            .timeout(self.config.timeout())
            .build()
            .map_err(|e| GeocodeError::Network(e.to_string()))?;
        Ok(self.client.get_or_init(|| client))
    }
}

impl AddressLookup for NominatimGeocoder {
    fn reverse_geocode(
        &self,
        position: Position,
        max_results: usize,
    ) -> Result<Vec<AddressCandidate>, GeocodeError> {
        let mut request = self.client()?.get(&self.reverse_url).query(&[
            ("format", "jsonv2".to_string()),
            ("lat", position.latitude.to_string()),
            ("lon", position.longitude.to_string()),
            ("zoom", ZOOM.to_string()),
            ("addressdetails", "1".to_string()),
        ]);
        if let Some(language) = &self.language {
            request = request.header(ACCEPT_LANGUAGE, language);
        }

        log::debug!("reverse geocoding {position} via {}", self.reverse_url);
        let response = request
            .send()
            .map_err(|e| GeocodeError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::Status(status.as_u16()));
        }

        let reply: ReverseReply = response.json().map_err(|e| {
            if e.is_decode() {
                GeocodeError::Decode(e.to_string())
            } else {
                GeocodeError::Network(e.to_string())
            }
        })?;

        let mut candidates: Vec<AddressCandidate> = reply.into_candidate().into_iter().collect();
        candidates.truncate(max_results);
        Ok(candidates)
    }
}

/// Body of a `/reverse?format=jsonv2` reply.
#[derive(Debug, Default, Deserialize)]
struct ReverseReply {
    error: Option<String>,
    display_name: Option<String>,
    address: Option<ReverseAddress>,
}

#[derive(Debug, Default, Deserialize)]
struct ReverseAddress {
    house_number: Option<String>,
    road: Option<String>,
    suburb: Option<String>,
    neighbourhood: Option<String>,
    quarter: Option<String>,
    residential: Option<String>,
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    district: Option<String>,
    hamlet: Option<String>,
    municipality: Option<String>,
    state: Option<String>,
    postcode: Option<String>,
    country: Option<String>,
}

impl ReverseReply {
    fn into_candidate(self) -> Option<AddressCandidate> {
        if let Some(error) = self.error {
            log::debug!("nominatim found no address: {error}");
            return None;
        }

        let lines = self.address.map(ReverseAddress::lines).unwrap_or_default();
        if !lines.is_empty() {
            return Some(AddressCandidate::new(lines));
        }

        self.display_name
            .filter(|name| !name.trim().is_empty())
            .map(|name| AddressCandidate::new(vec![name]))
    }
}

fn first<'a>(fields: &[&'a Option<String>]) -> Option<&'a str> {
    fields
        .iter()
        .copied()
        .flatten()
        .map(String::as_str)
        .find(|value| !value.trim().is_empty())
}

impl ReverseAddress {
    /// Street, neighbourhood, locality and country, skipping what is missing.
    fn lines(self) -> Vec<String> {
        let street = match (&self.house_number, &self.road) {
            (Some(number), Some(road)) => Some(format!("{number} {road}")),
            (None, Some(road)) => Some(road.clone()),
            _ => None,
        };

        let neighbourhood = first(&[
            &self.suburb,
            &self.neighbourhood,
            &self.quarter,
            &self.residential,
        ])
        .map(str::to_string);

        let mut locality = first(&[
            &self.city,
            &self.town,
            &self.village,
            &self.district,
            &self.hamlet,
            &self.municipality,
        ])
        .map(str::to_string)
        .unwrap_or_default();
        if let Some(state) = first(&[&self.state]) {
            if !locality.is_empty() {
                locality.push_str(", ");
            }
            locality.push_str(state);
        }
        if let Some(postcode) = first(&[&self.postcode]) {
            if !locality.is_empty() {
                locality.push(' ');
            }
            locality.push_str(postcode);
        }

        [street, neighbourhood, Some(locality), self.country]
            .into_iter()
            .flatten()
            .filter(|line| !line.trim().is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(json: &str) -> ReverseReply {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn full_address_becomes_ordered_lines() {
        let candidate = reply(
            r#"{
                "display_name": "1600, Amphitheatre Parkway, Mountain View, California, 94043, United States",
                "address": {
                    "house_number": "1600",
                    "road": "Amphitheatre Parkway",
                    "city": "Mountain View",
                    "state": "California",
                    "postcode": "94043",
                    "country": "United States"
                }
            }"#,
        )
        .into_candidate()
        .unwrap();

        assert_eq!(
            candidate.lines(),
            [
                "1600 Amphitheatre Parkway",
                "Mountain View, California 94043",
                "United States"
            ]
        );
    }

    #[test]
    fn neighbourhood_and_town_fallbacks() {
        let candidate = reply(
            r#"{
                "address": {
                    "road": "Rua da Bahia",
                    "neighbourhood": "Lourdes",
                    "town": "Serro",
                    "country": "Brasil"
                }
            }"#,
        )
        .into_candidate()
        .unwrap();

        assert_eq!(candidate.lines(), ["Rua da Bahia", "Lourdes", "Serro", "Brasil"]);
    }

    #[test]
    fn blank_state_and_postcode_add_no_separators() {
        let candidate = reply(
            r#"{
                "address": {
                    "town": "Serro",
                    "state": " ",
                    "postcode": "",
                    "country": "Brasil"
                }
            }"#,
        )
        .into_candidate()
        .unwrap();

        assert_eq!(candidate.lines(), ["Serro", "Brasil"]);
    }

    #[test]
    fn district_is_a_locality() {
        let candidate = reply(
            r#"{
                "address": {
                    "district": "Milho Verde",
                    "state": "Minas Gerais"
                }
            }"#,
        )
        .into_candidate()
        .unwrap();

        assert_eq!(candidate.lines(), ["Milho Verde, Minas Gerais"]);
    }

    #[test]
    fn display_name_used_when_address_is_empty() {
        let candidate = reply(r#"{"display_name": "Atlantic Ocean", "address": {}}"#)
            .into_candidate()
            .unwrap();
        assert_eq!(candidate.lines(), ["Atlantic Ocean"]);
    }

    #[test]
    fn error_reply_has_no_candidate() {
        assert!(
            reply(r#"{"error": "Unable to geocode"}"#)
                .into_candidate()
                .is_none()
        );
        assert!(reply("{}").into_candidate().is_none());
    }

    #[test]
    fn empty_configuration_is_rejected() {
        let config = GeocoderConfig {
            endpoint: " / ".into(),
            ..GeocoderConfig::default()
        };
        assert!(matches!(
            NominatimGeocoder::new(config),
            Err(GeocodeError::Config(_))
        ));

        let config = GeocoderConfig {
            user_agent: String::new(),
            ..GeocoderConfig::default()
        };
        assert!(matches!(
            NominatimGeocoder::new(config),
            Err(GeocodeError::Config(_))
        ));
    }
}
