//! Reverse geocoding.
//!
//! Converts a [`Position`] into postal address candidates. The [`AddressLookup`]
//! trait is deliberately blocking: implementations may perform network I/O on
//! the calling thread, and callers are expected to run them off any
//! interactive thread.
//!
//! [`NominatimGeocoder`] is the bundled implementation, backed by the
//! OpenStreetMap Nominatim `/reverse` endpoint.

#![warn(missing_docs)]

use std::sync::Arc;

mod config;
mod nominatim;

pub use config::GeocoderConfig;
pub use nominatim::NominatimGeocoder;
pub use wherekit_location::Position;

/// One address returned by a reverse geocode.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AddressCandidate {
    lines: Vec<String>,
}

impl AddressCandidate {
    /// Create a candidate from its printable lines, in service order.
    #[must_use]
    pub const fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// The address lines in the order the service returned them.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Consume the candidate, returning its lines.
    #[must_use]
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl<S: Into<String>> FromIterator<S> for AddressCandidate {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

/// Errors that can occur during a reverse geocode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeocodeError {
    /// The service could not be reached or the connection failed.
    #[error("network error: {0}")]
    Network(String),
    /// The service answered with a non-success HTTP status.
    #[error("geocoding service returned HTTP {0}")]
    Status(u16),
    /// The service response could not be decoded.
    #[error("invalid geocoding response: {0}")]
    Decode(String),
    /// The geocoder configuration is invalid.
    #[error("invalid geocoder configuration: {0}")]
    Config(String),
}

/// Blocking reverse-geocoding service.
pub trait AddressLookup: Send + Sync {
    /// Resolve `position` into at most `max_results` address candidates,
    /// best match first.
    ///
    /// An empty vector means the service knows no address for the position.
    ///
    /// # Errors
    /// Returns a [`GeocodeError`] on transport, status or decoding failures.
    fn reverse_geocode(
        &self,
        position: Position,
        max_results: usize,
    ) -> Result<Vec<AddressCandidate>, GeocodeError>;
}

impl<T: AddressLookup + ?Sized> AddressLookup for Arc<T> {
    fn reverse_geocode(
        &self,
        position: Position,
        max_results: usize,
    ) -> Result<Vec<AddressCandidate>, GeocodeError> {
        (**self).reverse_geocode(position, max_results)
    }
}

impl<T: AddressLookup + ?Sized> AddressLookup for Box<T> {
    fn reverse_geocode(
        &self,
        position: Position,
        max_results: usize,
    ) -> Result<Vec<AddressCandidate>, GeocodeError> {
        (**self).reverse_geocode(position, max_results)
    }
}
