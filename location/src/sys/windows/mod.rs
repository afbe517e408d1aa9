//! Windows location implementation using the WinRT `Geolocator`.

use crate::{LocationError, Position};

fn winrt(e: &windows::core::Error) -> LocationError {
    LocationError::Unknown(e.message().to_string())
}

pub(crate) async fn last_known() -> Result<Option<Position>, LocationError> {
    use windows::Devices::Geolocation::{GeolocationAccessStatus, Geolocator, PositionStatus};

    let access = Geolocator::RequestAccessAsync()
        .map_err(|e| winrt(&e))?
        .get()
        .map_err(|e| winrt(&e))?;

    match access {
        GeolocationAccessStatus::Allowed => {}
        GeolocationAccessStatus::Denied => return Err(LocationError::PermissionDenied),
        _ => return Err(LocationError::NotAvailable),
    }

    let geolocator = Geolocator::new().map_err(|e| winrt(&e))?;

    if geolocator.LocationStatus().map_err(|e| winrt(&e))? == PositionStatus::Disabled {
        return Err(LocationError::ServiceDisabled);
    }

    // Requests a current fix; Windows may answer from its own cache.
    let geoposition = match geolocator.GetGeopositionAsync().and_then(|op| op.get()) {
        Ok(geoposition) => geoposition,
        Err(e) => {
            log::debug!("no position from Geolocator: {}", e.message());
            return Ok(None);
        }
    };

    let point = geoposition
        .Coordinate()
        .and_then(|coordinate| coordinate.Point())
        .and_then(|point| point.Position())
        .map_err(|e| winrt(&e))?;

    Ok(Some(Position::new(point.Latitude, point.Longitude)))
}
