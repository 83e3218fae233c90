//! Transfer queue engine
//!
//! Serializes bus-transaction requests onto one physical bus, one in flight
//! at a time, in arrival order, without blocking the enqueuing caller.
//! Requests live in a fixed slot arena owned by the queue; declaring
//! components claim a slot once at init and keep the returned
//! [`TransferHandle`]. The pending chain is an index ring buffer, so nothing
//! here allocates and nothing shares request storage across contexts.

mod policy;
mod queue;
mod transfer;

#[cfg(test)]
pub(crate) mod mock;

pub use policy::{DropOnFailure, FailureAction, FailurePolicy, RetryLimited};
pub use queue::{Admission, TransferQueue, MAX_TRANSFERS};
pub use transfer::{TransferHandle, MAX_TRANSFER_LEN};
