//! Per-key regeneration claims.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

/// Keys currently being regenerated.
pub(crate) type InFlight = Arc<Mutex<HashSet<String>>>;

/// Proof that the holder is the only regenerator of a key.
///
/// The claim is released when the guard is dropped, including on panic.
#[derive(Debug)]
#[must_use = "the claim is released as soon as the guard is dropped"]
pub struct RegenerationGuard {
    claim: Option<(InFlight, String)>,
}

impl RegenerationGuard {
    /// Claim `key` unless it is already claimed.
    pub(crate) fn acquire(in_flight: &InFlight, key: &str) -> Option<Self> {
        let mut keys = in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if !keys.insert(key.to_owned()) {
            return None;
        }
        Some(Self {
            claim: Some((Arc::clone(in_flight), key.to_owned())),
        })
    }

    /// Guard that tracks nothing.
    pub(crate) fn untracked() -> Self {
        Self { claim: None }
    }
}

impl Drop for RegenerationGuard {
    fn drop(&mut self) {
        if let Some((in_flight, key)) = self.claim.take() {
            in_flight
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(&key);
        }
    }
}
