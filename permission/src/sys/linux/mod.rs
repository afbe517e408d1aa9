//! Linux permission implementation.
//!
//! Desktop Linux has no runtime location prompt. GeoClue2 delegates
//! authorization to its agent when a client starts, so the gate reports
//! access as granted and any refusal surfaces later as a missing fix.
//! Flatpak sandboxes are the exception: without the location portal the
//! system bus is unreachable, which is reported as restricted.

use std::path::Path;

use crate::{Permission, PermissionError, PermissionStatus};

const FLATPAK_INFO: &str = "/.flatpak-info";

fn sandboxed() -> bool {
    Path::new(FLATPAK_INFO).exists()
}

pub(crate) async fn check(permission: Permission) -> PermissionStatus {
    match permission {
        Permission::Location if sandboxed() => PermissionStatus::Restricted,
        Permission::Location => PermissionStatus::Granted,
    }
}

pub(crate) async fn request(permission: Permission) -> Result<PermissionStatus, PermissionError> {
    let status = check(permission).await;
    if status == PermissionStatus::Restricted {
        log::warn!("running inside a Flatpak sandbox; location access is restricted");
    }
    Ok(status)
}
