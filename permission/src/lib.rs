//! Location permission handling.
//!
//! This crate answers one question for the resolver: may the application read
//! the device's fine location? It exposes the raw platform [`check`] and
//! [`request`] calls and wraps them in the [`PermissionGate`] trait so hosts
//! can substitute their own prompt flow.

#![warn(missing_docs)]

use std::sync::Arc;

use async_trait::async_trait;

/// Platform-specific implementations.
pub mod sys;

/// Types of permissions that can be requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Permission {
    /// Access to the device's fine (GPS-grade) location.
    Location,
}

/// The current status of a permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PermissionStatus {
    /// Permission has been granted by the user.
    Granted,
    /// Permission has been denied by the user.
    Denied,
    /// Permission is restricted by policy (group policy, parental controls).
    Restricted,
    /// Permission has not been requested yet.
    NotDetermined,
}

impl PermissionStatus {
    /// Whether this status allows access.
    #[must_use]
    pub const fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// Errors that can occur when requesting permissions.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PermissionError {
    /// The permission type is not supported on this platform.
    #[error("permission not supported on this platform")]
    NotSupported,
    /// An unknown error occurred.
    #[error("unknown error: {0}")]
    Unknown(String),
}

/// Check the current status of a permission without requesting it.
pub async fn check(permission: Permission) -> PermissionStatus {
    sys::check(permission).await
}

/// Request a permission from the user.
///
/// If the permission has already been granted or denied, this returns
/// the current status without showing a prompt.
///
/// # Errors
/// Returns a `PermissionError` if:
/// - The permission type is not supported on this platform.
/// - An underlying platform error occurs.
pub async fn request(permission: Permission) -> Result<PermissionStatus, PermissionError> {
    sys::request(permission).await
}

/// Gate consulted before any position is read.
///
/// `request_grant` may suspend for as long as the user takes to answer a
/// prompt. A gate never retries on its own.
#[async_trait]
pub trait PermissionGate: Send + Sync {
    /// Whether fine-location access is currently granted.
    async fn is_granted(&self) -> bool;

    /// Ask for fine-location access, resolving to `true` when granted.
    async fn request_grant(&self) -> bool;
}

#[async_trait]
impl<T: PermissionGate + ?Sized> PermissionGate for Box<T> {
    async fn is_granted(&self) -> bool {
        (**self).is_granted().await
    }

    async fn request_grant(&self) -> bool {
        (**self).request_grant().await
    }
}

#[async_trait]
impl<T: PermissionGate + ?Sized> PermissionGate for Arc<T> {
    async fn is_granted(&self) -> bool {
        (**self).is_granted().await
    }

    async fn request_grant(&self) -> bool {
        (**self).request_grant().await
    }
}

/// [`PermissionGate`] backed by the platform permission APIs.
#[derive(Debug, Clone, Copy)]
pub struct SystemPermissionGate {
    permission: Permission,
}

impl SystemPermissionGate {
    /// Create a gate for [`Permission::Location`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            permission: Permission::Location,
        }
    }
}

impl Default for SystemPermissionGate {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PermissionGate for SystemPermissionGate {
    async fn is_granted(&self) -> bool {
        check(self.permission).await.is_granted()
    }

    async fn request_grant(&self) -> bool {
        match request(self.permission).await {
            Ok(status) => {
                log::debug!("permission request for {:?} settled: {status:?}", self.permission);
                status.is_granted()
            }
            Err(e) => {
                log::warn!("permission request for {:?} failed: {e}", self.permission);
                false
            }
        }
    }
}

/// [`PermissionGate`] with a fixed answer.
///
/// Useful for hosts that run their own consent flow, and for denying access
/// outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticPermissionGate {
    granted: bool,
}

impl StaticPermissionGate {
    /// A gate that always grants.
    #[must_use]
    pub const fn granted() -> Self {
        Self { granted: true }
    }

    /// A gate that always denies, including on request.
    #[must_use]
    pub const fn denied() -> Self {
        Self { granted: false }
    }
}

#[async_trait]
impl PermissionGate for StaticPermissionGate {
    async fn is_granted(&self) -> bool {
        self.granted
    }

    async fn request_grant(&self) -> bool {
        self.granted
    }
}
