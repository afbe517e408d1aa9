//! Rendering of a [`ResolutionResult`] into the two on-screen text regions.

use crate::{Position, ResolutionResult};

/// Shown in the location region when no last known position exists.
pub const POSITION_UNAVAILABLE_TEXT: &str =
    "Unable to get location. Make sure location is enabled.";
/// Shown in the address region when the geocoder found nothing.
pub const NO_ADDRESS_TEXT: &str = "No address found for these coordinates.";
/// Shown in the address region when the lookup failed.
pub const LOOKUP_FAILED_TEXT: &str =
    "Unable to get address. Please check your internet connection.";
/// Transient notice raised when permission is denied.
pub const PERMISSION_DENIED_NOTICE: &str = "Location permission denied";

/// Text for the location and address regions of the display.
///
/// A `None` region keeps whatever it showed before.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplayText {
    /// Coordinates or a status message.
    pub location_text: Option<String>,
    /// The address or a status message.
    pub address_text: Option<String>,
    /// Short-lived notice, shown outside the two regions.
    pub notice: Option<&'static str>,
}

impl DisplayText {
    /// Render `result` for display.
    #[must_use]
    pub fn render(result: &ResolutionResult) -> Self {
        match result {
            ResolutionResult::NoPermission => Self {
                notice: Some(PERMISSION_DENIED_NOTICE),
                ..Self::default()
            },
            ResolutionResult::PositionUnavailable => Self::regions(
                POSITION_UNAVAILABLE_TEXT.to_string(),
                String::new(),
            ),
            ResolutionResult::Resolved { position, address } => {
                Self::regions(coordinates(*position), address.joined())
            }
            ResolutionResult::ResolvedNoAddress { position } => {
                Self::regions(coordinates(*position), NO_ADDRESS_TEXT.to_string())
            }
            ResolutionResult::LookupFailed { position, .. } => {
                Self::regions(coordinates(*position), LOOKUP_FAILED_TEXT.to_string())
            }
        }
    }

    const fn regions(location: String, address: String) -> Self {
        Self {
            location_text: Some(location),
            address_text: Some(address),
            notice: None,
        }
    }
}

/// Whole degrees keep their trailing `.0`.
fn coordinates(position: Position) -> String {
    format!(
        "Latitude: {:?}\nLongitude: {:?}",
        position.latitude, position.longitude
    )
}
