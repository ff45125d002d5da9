//! Shared, sequenced recorder state

use parking_lot::RwLock;

use crate::domain::{RecorderState, StateClass};

#[derive(Debug, Clone, Copy)]
struct Snapshot {
    state: RecorderState,
    sequence: u64,
}

/// The single cross-thread copy of the recorder state.
///
/// Every write bumps a monotonic sequence number under the same lock, so
/// readers always see a committed `(state, sequence)` pair.
#[derive(Debug)]
pub(crate) struct StateCell {
    inner: RwLock<Snapshot>,
}

impl StateCell {
    pub(crate) fn new(state: RecorderState) -> Self {
        Self {
            inner: RwLock::new(Snapshot { state, sequence: 0 }),
        }
    }

    pub(crate) fn get(&self) -> RecorderState {
        self.inner.read().state
    }

    pub(crate) fn class(&self) -> StateClass {
        self.inner.read().state.class()
    }

    pub(crate) fn sequence(&self) -> u64 {
        self.inner.read().sequence
    }

    /// Unconditional write; returns the new sequence number
    pub(crate) fn set(&self, state: RecorderState) -> u64 {
        let mut guard = self.inner.write();
        guard.state = state;
        guard.sequence += 1;
        guard.sequence
    }

    /// Write only if the current class is one of `expected`.
    /// Returns the new sequence number on success.
    pub(crate) fn set_if(&self, expected: &[StateClass], state: RecorderState) -> Option<u64> {
        let mut guard = self.inner.write();
        if !expected.contains(&guard.state.class()) {
            return None;
        }
        guard.state = state;
        guard.sequence += 1;
        Some(guard.sequence)
    }
}
