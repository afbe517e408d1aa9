//! # Wherekit
//!
//! Turns the device's last known location into a human-readable postal address.
//!
//! Wherekit sequences three collaborators: a permission gate, a position source
//! and an address lookup. The resolver asks for location permission, reads the
//! last cached fix, reverse-geocodes it and hands back a [`resolver::ResolutionResult`]
//! ready for display.
//!
//! ## Features
//!
//! - `permission`: Unified location permission handling.
//! - `location`: Last-known position access (GeoClue2 on Linux, WinRT on Windows).
//! - `geocode`: Reverse geocoding through Nominatim.
//! - `resolver`: The resolution flow and its display rendering (enabled by default).
//!
//! Use the `full` feature to enable everything.
//!
//! ## Example
//!
//! ```toml
//! [dependencies]
//! wherekit = { version = "0.1", features = ["full"] }
//! ```
//!
//! ```rust,no_run
//! use wherekit::resolver::{DisplayText, LocationResolver};
//!
//! async fn on_button_press() -> Result<(), wherekit::geocode::GeocodeError> {
//!     let resolver = LocationResolver::system()?;
//!     let text = DisplayText::render(&resolver.resolve().await);
//!     if let Some(address) = text.address_text {
//!         println!("{address}");
//!     }
//!     Ok(())
//! }
//! ```

#[cfg(feature = "geocode")]
pub use wherekit_geocode as geocode;

#[cfg(feature = "location")]
pub use wherekit_location as location;

#[cfg(feature = "permission")]
pub use wherekit_permission as permission;

#[cfg(feature = "resolver")]
pub use wherekit_resolver as resolver;
