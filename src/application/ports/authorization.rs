//! Camera permission port

use crate::domain::AuthorizationStatus;

/// Completion handed to [`AuthorizationProvider::request_access`].
/// Receives `true` when the user granted access.
pub type AccessCallback = Box<dyn FnOnce(bool) + Send + 'static>;

/// Port for querying and requesting camera-use permission
pub trait AuthorizationProvider: Send + Sync {
    /// Current permission status. Never blocks.
    fn status(&self) -> AuthorizationStatus;

    /// Ask the user for camera access.
    ///
    /// Only meaningful while [`status`](Self::status) is `NotDetermined`.
    /// Implementations must invoke `completion` exactly once, on a thread of
    /// their choosing, and may do so before this call returns.
    fn request_access(&self, completion: AccessCallback);
}
