//! Last-known device position.
//!
//! This crate reads the position the platform location subsystem already has
//! cached. It never waits for a fresh GPS fix and applies no accuracy or age
//! filtering: whatever the platform hands back is returned as-is.
//!
//! The [`PositionSource`] trait is the seam the resolver depends on.
//! [`SystemPositionSource`] talks to GeoClue2 on Linux and the WinRT
//! `Geolocator` on Windows; [`FixedPositionSource`] serves a known value.

#![warn(missing_docs)]

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

/// Platform-specific implementations.
pub mod sys;

/// A geographic position in decimal degrees.
///
/// No range validation is applied; the values are passed through exactly as
/// the platform reported them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

impl Position {
    /// Create a position from latitude and longitude.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

/// Errors that can occur when accessing location.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocationError {
    /// Location permission was not granted.
    #[error("location permission denied")]
    PermissionDenied,
    /// Location services are disabled on the device.
    #[error("location services disabled")]
    ServiceDisabled,
    /// Location is not available on this platform.
    #[error("location not available")]
    NotAvailable,
    /// An unknown error occurred.
    #[error("unknown error: {0}")]
    Unknown(String),
}

/// Source of the device's last known position.
#[async_trait]
pub trait PositionSource: Send + Sync {
    /// Return the last cached position, or `Ok(None)` when the platform has
    /// no fix on record.
    ///
    /// # Errors
    /// Returns a [`LocationError`] if the platform provider fails.
    async fn last_known(&self) -> Result<Option<Position>, LocationError>;
}

#[async_trait]
impl<T: PositionSource + ?Sized> PositionSource for Box<T> {
    async fn last_known(&self) -> Result<Option<Position>, LocationError> {
        (**self).last_known().await
    }
}

#[async_trait]
impl<T: PositionSource + ?Sized> PositionSource for Arc<T> {
    async fn last_known(&self) -> Result<Option<Position>, LocationError> {
        (**self).last_known().await
    }
}

/// [`PositionSource`] backed by the platform location service.
///
/// Callers are expected to have checked permission beforehand.
///
/// No fresh fix is requested. On Linux a GeoClue client that has only just
/// started usually has no location yet, so a cold call commonly yields
/// `Ok(None)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemPositionSource;

#[async_trait]
impl PositionSource for SystemPositionSource {
    async fn last_known(&self) -> Result<Option<Position>, LocationError> {
        sys::last_known().await
    }
}

/// [`PositionSource`] that always yields the same answer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FixedPositionSource(pub Option<Position>);

impl FixedPositionSource {
    /// A source reporting `position`.
    #[must_use]
    pub const fn at(position: Position) -> Self {
        Self(Some(position))
    }

    /// A source with no cached fix.
    #[must_use]
    pub const fn empty() -> Self {
        Self(None)
    }
}

#[async_trait]
impl PositionSource for FixedPositionSource {
    async fn last_known(&self) -> Result<Option<Position>, LocationError> {
        Ok(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_display_keeps_full_precision() {
        let position = Position::new(37.421_999_9, -122.084_057_5);
        assert_eq!(position.to_string(), "37.4219999, -122.0840575");
    }

    #[tokio::test]
    async fn fixed_source_reports_its_value() {
        let position = Position::new(-19.9167, -43.9345);
        assert_eq!(
            FixedPositionSource::at(position).last_known().await,
            Ok(Some(position))
        );
        assert_eq!(FixedPositionSource::empty().last_known().await, Ok(None));
    }
}
