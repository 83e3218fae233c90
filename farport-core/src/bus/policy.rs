//! Pluggable bus-failure policy
//!
//! No retry/backoff behaviour is mandated by the queue itself: what happens
//! to a failed transfer is decided at the bus-controller boundary. Whatever
//! the decision, the queue has already cleared the slot's busy flag and
//! recorded the outcome, so a request is never silently duplicated and never
//! silently dropped.

use farport_hal::BusError;

use super::queue::MAX_TRANSFERS;
use super::transfer::TransferHandle;

/// Decision returned by a [`FailurePolicy`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FailureAction {
    /// Leave the transfer idle; the recorded outcome is the signal
    Drop,
    /// Re-enqueue the transfer at the tail of the pending chain
    Retry,
}

/// Per-failure decision hook
pub trait FailurePolicy {
    /// Called once for each failed completion
    fn on_failure(&mut self, handle: TransferHandle, error: BusError) -> FailureAction;

    /// Called once for each successful completion
    fn on_success(&mut self, _handle: TransferHandle) {}
}

/// Default policy: record the outcome and move on
pub struct DropOnFailure;

impl FailurePolicy for DropOnFailure {
    fn on_failure(&mut self, _handle: TransferHandle, _error: BusError) -> FailureAction {
        FailureAction::Drop
    }
}

/// Retry a failed transfer up to a fixed number of consecutive times
///
/// The counter is per slot and resets on success, so a flaky peripheral gets
/// `limit` fresh attempts per failure burst rather than `limit` for the
/// lifetime of the slot.
pub struct RetryLimited {
    limit: u8,
    attempts: [u8; MAX_TRANSFERS],
}

impl RetryLimited {
    /// Policy allowing `limit` consecutive retries per slot
    pub const fn new(limit: u8) -> Self {
        Self {
            limit,
            attempts: [0; MAX_TRANSFERS],
        }
    }
}

impl FailurePolicy for RetryLimited {
    fn on_failure(&mut self, handle: TransferHandle, _error: BusError) -> FailureAction {
        let attempts = &mut self.attempts[handle.index()];
        if *attempts < self.limit {
            *attempts += 1;
            FailureAction::Retry
        } else {
            *attempts = 0;
            FailureAction::Drop
        }
    }

    fn on_success(&mut self, handle: TransferHandle) {
        self.attempts[handle.index()] = 0;
    }
}
