//! Location-to-address resolution.
//!
//! [`LocationResolver`] runs one strictly sequential flow per call: the
//! permission gate settles, then the last known position is read, then that
//! position is reverse-geocoded. Every failure along the way is folded into a
//! [`ResolutionResult`]; nothing is propagated to the caller.
//!
//! ```rust,no_run
//! use wherekit_location::{FixedPositionSource, Position};
//! use wherekit_permission::StaticPermissionGate;
//! use wherekit_geocode::{GeocoderConfig, NominatimGeocoder};
//! use wherekit_resolver::{DisplayText, LocationResolver};
//!
//! # async fn run() -> Result<(), wherekit_geocode::GeocodeError> {
//! let resolver = LocationResolver::new(
//!     StaticPermissionGate::granted(),
//!     FixedPositionSource::at(Position::new(-19.9167, -43.9345)),
//!     NominatimGeocoder::new(GeocoderConfig::default())?,
//! );
//! let text = DisplayText::render(&resolver.resolve().await);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

use std::fmt;
use std::sync::Arc;

use futures::channel::oneshot;
use wherekit_geocode::{
    AddressCandidate, AddressLookup, GeocodeError, GeocoderConfig, NominatimGeocoder,
};
use wherekit_location::{PositionSource, SystemPositionSource};
use wherekit_permission::{PermissionGate, SystemPermissionGate};

mod display;

pub use display::{
    DisplayText, LOOKUP_FAILED_TEXT, NO_ADDRESS_TEXT, PERMISSION_DENIED_NOTICE,
    POSITION_UNAVAILABLE_TEXT,
};
pub use wherekit_location::Position;

/// The number of address candidates requested from the lookup.
///
/// Only the single best match is ever used.
pub const MAX_ADDRESS_RESULTS: usize = 1;

const WORKER_NAME: &str = "wherekit-geocode";

/// Printable address lines in the order the geocoding service returned them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressLines(Vec<String>);

impl AddressLines {
    /// Wrap `lines`, returning `None` when there are none.
    #[must_use]
    pub fn new(lines: Vec<String>) -> Option<Self> {
        if lines.is_empty() {
            None
        } else {
            Some(Self(lines))
        }
    }

    /// The lines, in service order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// The lines joined with newlines.
    #[must_use]
    pub fn joined(&self) -> String {
        self.0.join("\n")
    }
}

impl fmt::Display for AddressLines {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.joined())
    }
}

/// Outcome of one resolution flow.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolutionResult {
    /// Location permission was denied.
    NoPermission,
    /// Permission was granted but no last known position exists.
    PositionUnavailable,
    /// Both the position and an address were obtained.
    Resolved {
        /// The last known position.
        position: Position,
        /// The best matching address.
        address: AddressLines,
    },
    /// The position was obtained but the geocoder knows no address for it.
    ResolvedNoAddress {
        /// The last known position.
        position: Position,
    },
    /// The position was obtained but the address lookup failed.
    LookupFailed {
        /// The last known position.
        position: Position,
        /// Diagnostic description of the failure.
        reason: String,
    },
}

impl ResolutionResult {
    /// The position, when one was obtained.
    #[must_use]
    pub const fn position(&self) -> Option<Position> {
        match self {
            Self::NoPermission | Self::PositionUnavailable => None,
            Self::Resolved { position, .. }
            | Self::ResolvedNoAddress { position }
            | Self::LookupFailed { position, .. } => Some(*position),
        }
    }

    /// The resolved address, when one was found.
    #[must_use]
    pub const fn address(&self) -> Option<&AddressLines> {
        match self {
            Self::Resolved { address, .. } => Some(address),
            _ => None,
        }
    }
}

/// Sequences the permission gate, position source and address lookup.
///
/// The resolver holds no mutable state. Each [`resolve`](Self::resolve) call
/// is an independent flow; overlapping calls are neither serialized nor
/// cancelled.
#[derive(Clone)]
pub struct LocationResolver {
    permission: Arc<dyn PermissionGate>,
    positions: Arc<dyn PositionSource>,
    addresses: Arc<dyn AddressLookup>,
}

impl fmt::Debug for LocationResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocationResolver").finish_non_exhaustive()
    }
}

impl LocationResolver {
    /// Create a resolver from its three collaborators.
    pub fn new(
        permission: impl PermissionGate + 'static,
        positions: impl PositionSource + 'static,
        addresses: impl AddressLookup + 'static,
    ) -> Self {
        Self {
            permission: Arc::new(permission),
            positions: Arc::new(positions),
            addresses: Arc::new(addresses),
        }
    }

    /// Create a resolver using the platform permission gate and position
    /// source, and a Nominatim geocoder configured from the environment.
    ///
    /// # Errors
    /// Returns a [`GeocodeError::Config`] if the geocoder configuration is invalid.
    pub fn system() -> Result<Self, GeocodeError> {
        let geocoder = NominatimGeocoder::new(GeocoderConfig::from_env()?)?;
        Ok(Self::new(
            SystemPermissionGate::new(),
            SystemPositionSource,
            geocoder,
        ))
    }

    /// Run the resolution flow once.
    pub async fn resolve(&self) -> ResolutionResult {
        if !self.ensure_permission().await {
            log::warn!("location permission denied");
            return ResolutionResult::NoPermission;
        }

        let position = match self.positions.last_known().await {
            Ok(Some(position)) => position,
            Ok(None) => {
                log::debug!("no last known position");
                return ResolutionResult::PositionUnavailable;
            }
            Err(e) => {
                log::warn!("failed to read last known position: {e}");
                return ResolutionResult::PositionUnavailable;
            }
        };
        log::debug!("last known position: {position}");

        match self.lookup(position).await {
            Ok(candidates) => match first_address(candidates) {
                Some(address) => ResolutionResult::Resolved { position, address },
                None => ResolutionResult::ResolvedNoAddress { position },
            },
            Err(reason) => {
                log::error!("error getting address for {position}: {reason}");
                ResolutionResult::LookupFailed { position, reason }
            }
        }
    }

    async fn ensure_permission(&self) -> bool {
        if self.permission.is_granted().await {
            return true;
        }
        log::debug!("location permission not granted, requesting");
        self.permission.request_grant().await
    }

    /// Run the blocking lookup on a worker thread and await its answer.
    async fn lookup(&self, position: Position) -> Result<Vec<AddressCandidate>, String> {
        let (tx, rx) = oneshot::channel();
        let addresses = Arc::clone(&self.addresses);

        std::thread::Builder::new()
            .name(WORKER_NAME.into())
            .spawn(move || {
                let _ = tx.send(addresses.reverse_geocode(position, MAX_ADDRESS_RESULTS));
            })
            .map_err(|e| format!("failed to start address lookup: {e}"))?;

        rx.await
            .map_err(|_| "address lookup worker terminated".to_string())?
            .map_err(|e| e.to_string())
    }
}

/// The lines of the first candidate; further candidates are ignored.
fn first_address(candidates: Vec<AddressCandidate>) -> Option<AddressLines> {
    candidates
        .into_iter()
        .next()
        .and_then(|candidate| AddressLines::new(candidate.into_lines()))
}
