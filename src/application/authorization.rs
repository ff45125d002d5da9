//! Camera authorization gate

use std::sync::Arc;

use crate::domain::{AuthorizationStatus, RecorderState};

use super::ports::AuthorizationProvider;

/// Outcome of evaluating camera permission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Permission granted
    Authorized,
    /// Permission denied or restricted; only a new `start()` retries
    Unauthorized,
    /// No decision yet, or the user declined the request; state stays put
    Undecided,
}

impl GateDecision {
    /// The state this decision moves the recorder into, if any
    pub fn state(&self) -> Option<RecorderState> {
        match self {
            Self::Authorized => Some(RecorderState::Authorized),
            Self::Unauthorized => Some(RecorderState::Unauthorized),
            Self::Undecided => None,
        }
    }
}

impl From<AuthorizationStatus> for GateDecision {
    fn from(status: AuthorizationStatus) -> Self {
        match status {
            AuthorizationStatus::Granted => Self::Authorized,
            AuthorizationStatus::Denied | AuthorizationStatus::Restricted => Self::Unauthorized,
            AuthorizationStatus::NotDetermined => Self::Undecided,
        }
    }
}

/// Queries and requests camera-use permission
pub struct AuthorizationGate {
    provider: Arc<dyn AuthorizationProvider>,
}

impl AuthorizationGate {
    pub fn new(provider: Arc<dyn AuthorizationProvider>) -> Self {
        Self { provider }
    }

    /// Map the current status without prompting the user.
    /// `Undecided` means [`request_access`](Self::request_access) should follow.
    pub fn check_status(&self) -> GateDecision {
        let status = self.provider.status();
        tracing::debug!(%status, "camera authorization status");
        GateDecision::from(status)
    }

    /// Prompt the user and report the decision through `on_decided`.
    ///
    /// A grant triggers exactly one re-check of the status; a status that is
    /// still undetermined after a grant counts as `Unauthorized`. A refusal
    /// reports `Undecided`, leaving the recorder where it was.
    /// `on_decided` runs on whatever thread the provider completes on.
    pub fn request_access<F>(&self, on_decided: F)
    where
        F: FnOnce(GateDecision) + Send + 'static,
    {
        let provider = Arc::clone(&self.provider);
        tracing::info!("requesting camera access");
        self.provider.request_access(Box::new(move |granted: bool| {
            if !granted {
                tracing::warn!("camera access request declined");
                on_decided(GateDecision::Undecided);
                return;
            }
            let decision = match GateDecision::from(provider.status()) {
                GateDecision::Undecided => GateDecision::Unauthorized,
                decided => decided,
            };
            on_decided(decision);
        }));
    }
}
