//! Platform-specific location implementations.

#[cfg(target_os = "windows")]
mod windows;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "windows")]
pub(crate) use windows::last_known;

#[cfg(target_os = "linux")]
pub(crate) use linux::last_known;

// Fallback for platforms without a location backend
#[cfg(not(any(target_os = "windows", target_os = "linux")))]
pub(crate) async fn last_known() -> Result<Option<crate::Position>, crate::LocationError> {
    Err(crate::LocationError::NotAvailable)
}
