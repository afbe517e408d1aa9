//! Rendering of resolution results into the display regions.

use wherekit_resolver::{
    AddressLines, DisplayText, LOOKUP_FAILED_TEXT, NO_ADDRESS_TEXT, PERMISSION_DENIED_NOTICE,
    POSITION_UNAVAILABLE_TEXT, Position, ResolutionResult,
};

fn position() -> Position {
    Position::new(37.421_999_9, -122.084_057_5)
}

const COORDINATES: &str = "Latitude: 37.4219999\nLongitude: -122.0840575";

#[test]
fn denied_permission_only_raises_a_notice() {
    let text = DisplayText::render(&ResolutionResult::NoPermission);
    assert_eq!(text.notice, Some(PERMISSION_DENIED_NOTICE));
    assert_eq!(text.location_text, None);
    assert_eq!(text.address_text, None);
}

#[test]
fn unavailable_position_clears_the_address() {
    let text = DisplayText::render(&ResolutionResult::PositionUnavailable);
    assert_eq!(
        text.location_text.as_deref(),
        Some("Unable to get location. Make sure location is enabled.")
    );
    assert_eq!(text.location_text.as_deref(), Some(POSITION_UNAVAILABLE_TEXT));
    assert_eq!(text.address_text.as_deref(), Some(""));
    assert_eq!(text.notice, None);
}

#[test]
fn resolved_shows_coordinates_and_address() {
    let address = AddressLines::new(vec![
        "1600 Amphitheatre Pkwy".into(),
        "Mountain View, CA 94043".into(),
        "USA".into(),
    ])
    .unwrap();

    let text = DisplayText::render(&ResolutionResult::Resolved {
        position: position(),
        address,
    });
    assert_eq!(text.location_text.as_deref(), Some(COORDINATES));
    assert_eq!(
        text.address_text.as_deref(),
        Some("1600 Amphitheatre Pkwy\nMountain View, CA 94043\nUSA")
    );
}

#[test]
fn missing_address_keeps_coordinates() {
    let text = DisplayText::render(&ResolutionResult::ResolvedNoAddress {
        position: position(),
    });
    assert_eq!(text.location_text.as_deref(), Some(COORDINATES));
    assert_eq!(
        text.address_text.as_deref(),
        Some("No address found for these coordinates.")
    );
    assert_eq!(text.address_text.as_deref(), Some(NO_ADDRESS_TEXT));
}

#[test]
fn failed_lookup_hides_the_raw_reason() {
    let text = DisplayText::render(&ResolutionResult::LookupFailed {
        position: position(),
        reason: "network error: dns failure".into(),
    });
    assert_eq!(text.location_text.as_deref(), Some(COORDINATES));
    assert_eq!(
        text.address_text.as_deref(),
        Some("Unable to get address. Please check your internet connection.")
    );
    assert_eq!(text.address_text.as_deref(), Some(LOOKUP_FAILED_TEXT));
}

#[test]
fn whole_degrees_keep_a_decimal_point() {
    let text = DisplayText::render(&ResolutionResult::ResolvedNoAddress {
        position: Position::new(1.0, 0.5),
    });
    assert_eq!(
        text.location_text.as_deref(),
        Some("Latitude: 1.0\nLongitude: 0.5")
    );
}
