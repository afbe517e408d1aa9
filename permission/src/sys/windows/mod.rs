//! Windows permission implementation using WinRT.

use crate::{Permission, PermissionError, PermissionStatus};

pub(crate) async fn check(permission: Permission) -> PermissionStatus {
    match permission {
        Permission::Location => location_access().unwrap_or_else(|e| {
            log::debug!("geolocation access query failed: {e}");
            PermissionStatus::NotDetermined
        }),
    }
}

pub(crate) async fn request(permission: Permission) -> Result<PermissionStatus, PermissionError> {
    match permission {
        // RequestAccessAsync prompts when needed and reports the settled status
        Permission::Location => location_access(),
    }
}

fn location_access() -> Result<PermissionStatus, PermissionError> {
    use windows::Devices::Geolocation::{GeolocationAccessStatus, Geolocator};

    let status = Geolocator::RequestAccessAsync()
        .map_err(|e| PermissionError::Unknown(e.message().to_string()))?
        .get()
        .map_err(|e| PermissionError::Unknown(e.message().to_string()))?;

    Ok(match status {
        GeolocationAccessStatus::Allowed => PermissionStatus::Granted,
        GeolocationAccessStatus::Denied => PermissionStatus::Denied,
        _ => PermissionStatus::NotDetermined,
    })
}
