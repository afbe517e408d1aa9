//! Linux location implementation using the GeoClue2 D-Bus service.

use zbus::Connection;
use zbus::zvariant::{OwnedObjectPath, OwnedValue, Value};

use crate::{LocationError, Position};

const SERVICE: &str = "org.freedesktop.GeoClue2";
const MANAGER_PATH: &str = "/org/freedesktop/GeoClue2/Manager";
const MANAGER_IFACE: &str = "org.freedesktop.GeoClue2.Manager";
const CLIENT_IFACE: &str = "org.freedesktop.GeoClue2.Client";
const LOCATION_IFACE: &str = "org.freedesktop.GeoClue2.Location";
const PROPERTIES_IFACE: &str = "org.freedesktop.DBus.Properties";

const DESKTOP_ID: &str = "wherekit";
/// `GCLUE_ACCURACY_LEVEL_EXACT`
const ACCURACY_EXACT: u32 = 8;
/// GeoClue reports this path until the client has a fix.
const NO_LOCATION: &str = "/";

pub(crate) async fn last_known() -> Result<Option<Position>, LocationError> {
    let connection = Connection::system()
        .await
        .map_err(|e| LocationError::Unknown(format!("D-Bus connection failed: {e}")))?;

    let (client_path,): (OwnedObjectPath,) = connection
        .call_method(Some(SERVICE), MANAGER_PATH, Some(MANAGER_IFACE), "GetClient", &())
        .await
        .map_err(|e| {
            log::debug!("GeoClue2 GetClient failed: {e}");
            LocationError::ServiceDisabled
        })?
        .body()
        .deserialize()
        .map_err(|e| LocationError::Unknown(format!("failed to parse client path: {e}")))?;
    let client = client_path.as_str();

    set_client_property(&connection, client, "DesktopId", Value::from(DESKTOP_ID)).await?;
    set_client_property(
        &connection,
        client,
        "RequestedAccuracyLevel",
        Value::from(ACCURACY_EXACT),
    )
    .await?;

    connection
        .call_method(Some(SERVICE), client, Some(CLIENT_IFACE), "Start", &())
        .await
        .map_err(|e| match e {
            zbus::Error::MethodError(name, _, _) if name.as_str().ends_with("AccessDenied") => {
                LocationError::PermissionDenied
            }
            e => LocationError::Unknown(format!("failed to start GeoClue client: {e}")),
        })?;

    let position = read_cached(&connection, client).await;

    if let Err(e) = connection
        .call_method(Some(SERVICE), client, Some(CLIENT_IFACE), "Stop", &())
        .await
    {
        log::debug!("failed to stop GeoClue client: {e}");
    }

    position
}

async fn read_cached(
    connection: &Connection,
    client: &str,
) -> Result<Option<Position>, LocationError> {
    let location = get_property(connection, client, CLIENT_IFACE, "Location")
        .await
        .map_err(|e| LocationError::Unknown(format!("failed to get location: {e}")))?;
    let location = OwnedObjectPath::try_from(location)
        .map_err(|e| LocationError::Unknown(format!("failed to parse location path: {e}")))?;

    if location.as_str() == NO_LOCATION {
        return Ok(None);
    }

    let latitude = get_degrees(connection, location.as_str(), "Latitude").await?;
    let longitude = get_degrees(connection, location.as_str(), "Longitude").await?;

    Ok(Some(Position::new(latitude, longitude)))
}

async fn get_degrees(
    connection: &Connection,
    location: &str,
    name: &str,
) -> Result<f64, LocationError> {
    let value = get_property(connection, location, LOCATION_IFACE, name)
        .await
        .map_err(|e| LocationError::Unknown(format!("failed to get {name}: {e}")))?;
    f64::try_from(value).map_err(|e| LocationError::Unknown(format!("invalid {name}: {e}")))
}

async fn get_property(
    connection: &Connection,
    path: &str,
    interface: &str,
    name: &str,
) -> zbus::Result<OwnedValue> {
    connection
        .call_method(
            Some(SERVICE),
            path,
            Some(PROPERTIES_IFACE),
            "Get",
            &(interface, name),
        )
        .await?
        .body()
        .deserialize()
}

async fn set_client_property(
    connection: &Connection,
    client: &str,
    name: &str,
    value: Value<'_>,
) -> Result<(), LocationError> {
    connection
        .call_method(
            Some(SERVICE),
            client,
            Some(PROPERTIES_IFACE),
            "Set",
            &(CLIENT_IFACE, name, value),
        )
        .await
        .map_err(|e| LocationError::Unknown(format!("failed to set {name}: {e}")))?;
    Ok(())
}
