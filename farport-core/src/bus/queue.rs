//! Slot arena and pending ring

use core::sync::atomic::Ordering;

use farport_hal::{BusController, BusError};
use heapless::{Deque, Vec};

use super::policy::{DropOnFailure, FailureAction, FailurePolicy};
use super::transfer::{TransferHandle, TransferSlot, MAX_TRANSFER_LEN};

/// Capacity of the slot arena and of the pending ring
///
/// The busy admission rule bounds ring occupancy to one entry per claimed
/// slot, so a single capacity covers both.
pub const MAX_TRANSFERS: usize = 8;

/// Outcome of a [`TransferQueue::enqueue`] call
///
/// `InFlight` is not a fault: the transfer is already queued or on the wire,
/// and the caller retries on a later loop iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Admission {
    /// Appended to the tail of the pending chain
    Queued,
    /// Already queued or on the wire; nothing changed
    InFlight,
}

/// Serializes transfer requests onto one physical bus
///
/// One queue owns one [`BusController`]; a system with several buses runs
/// one queue per bus. Components claim slots at init, fill the payload while
/// the slot is idle, and enqueue. [`TransferQueue::service`] runs once per
/// loop iteration: it consumes the controller's completion event, then, with
/// the wire idle, starts the next pending transfer in arrival order.
pub struct TransferQueue<B: BusController, P: FailurePolicy = DropOnFailure> {
    bus: B,
    policy: P,
    slots: Vec<TransferSlot, MAX_TRANSFERS>,
    pending: Deque<u8, MAX_TRANSFERS>,
    /// Slot index currently on the wire
    active: Option<u8>,
}

impl<B: BusController> TransferQueue<B> {
    /// Create a queue with the default drop-on-failure policy
    pub fn new(bus: B) -> Self {
        Self::with_policy(bus, DropOnFailure)
    }
}

impl<B: BusController, P: FailurePolicy> TransferQueue<B, P> {
    /// Create a queue with an explicit failure policy
    pub fn with_policy(bus: B, policy: P) -> Self {
        Self {
            bus,
            policy,
            slots: Vec::new(),
            pending: Deque::new(),
            active: None,
        }
    }

    /// Claim a transfer slot from the arena
    ///
    /// One-time allocation, typically at init. `addr` is the wire-format
    /// address byte with the direction in bit 0; it fixes the slot's
    /// direction for its lifetime. Returns `None` when the arena is
    /// exhausted.
    pub fn claim(&mut self, addr: u8, stop: bool) -> Option<TransferHandle> {
        let index = self.slots.len() as u8;
        self.slots.push(TransferSlot::new(addr, stop)).ok()?;
        Some(TransferHandle(index))
    }

    /// Store payload bytes (and the transfer's byte count) into an idle slot
    ///
    /// For write slots this is the data to transmit; for read slots it sets
    /// the receive length and the bytes reported until the first completion.
    /// Returns false, leaving the slot untouched, if it is busy or `data`
    /// exceeds [`MAX_TRANSFER_LEN`].
    pub fn set_payload(&mut self, handle: TransferHandle, data: &[u8]) -> bool {
        let slot = &mut self.slots[handle.index()];
        if slot.is_busy() || data.len() > MAX_TRANSFER_LEN {
            return false;
        }
        slot.data[..data.len()].copy_from_slice(data);
        slot.len = data.len() as u8;
        true
    }

    /// The slot's payload: last bytes stored, or received on completion
    pub fn payload(&self, handle: TransferHandle) -> &[u8] {
        let slot = &self.slots[handle.index()];
        &slot.data[..slot.len as usize]
    }

    /// Whether the slot is queued or on the wire
    pub fn is_busy(&self, handle: TransferHandle) -> bool {
        self.slots[handle.index()].is_busy()
    }

    /// Result of the slot's most recent completion
    pub fn outcome(&self, handle: TransferHandle) -> Option<Result<(), BusError>> {
        self.slots[handle.index()].outcome
    }

    /// Request a transfer
    ///
    /// The sole admission rule: a busy slot is not re-admitted. Otherwise
    /// the slot joins the tail of the pending chain and its busy flag flips
    /// on; the call returns immediately either way. The payload must not be
    /// mutated until busy is observed false again.
    pub fn enqueue(&mut self, handle: TransferHandle) -> Admission {
        let slot = &self.slots[handle.index()];
        if slot.is_busy() {
            return Admission::InFlight;
        }
        slot.busy.store(true, Ordering::Release);
        // Cannot overflow: one ring entry per claimed slot, same capacity
        let _ = self.pending.push_back(handle.0);
        Admission::Queued
    }

    /// Run the engine for one loop iteration
    ///
    /// Consumes a pending completion event, then starts the next transfer if
    /// the wire is idle. Level-triggered: calling this while the bus is
    /// mid-transaction or the chain is empty changes no observable state, so
    /// the loop invokes it unconditionally.
    pub fn service(&mut self) {
        self.harvest_completion();
        self.start_next();
    }

    /// Number of transfers waiting behind the active one
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Handle of the transfer currently on the wire
    pub fn in_flight(&self) -> Option<TransferHandle> {
        self.active.map(TransferHandle)
    }

    /// Access the bus controller
    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Mutable access to the bus controller
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    fn harvest_completion(&mut self) {
        let Some(index) = self.active else { return };
        let slot = &mut self.slots[index as usize];
        let len = slot.len as usize;
        let Some(result) = self.bus.poll_complete(&mut slot.data[..len]) else {
            return;
        };

        // Publish outcome and received bytes before busy is observed false
        slot.outcome = Some(result);
        slot.busy.store(false, Ordering::Release);
        self.active = None;

        let handle = TransferHandle(index);
        match result {
            Ok(()) => self.policy.on_success(handle),
            Err(error) => {
                if self.policy.on_failure(handle, error) == FailureAction::Retry {
                    // A retry is an ordinary fresh enqueue at the tail
                    let _ = self.enqueue(handle);
                }
            }
        }
    }

    fn start_next(&mut self) {
        if self.active.is_some() || !self.bus.is_idle() {
            return;
        }
        let Some(index) = self.pending.pop_front() else { return };
        self.active = Some(index);

        let slot = &self.slots[index as usize];
        let len = slot.len as usize;
        if slot.is_read() {
            self.bus.begin_read(slot.addr, len, slot.stop);
        } else {
            self.bus.begin_write(slot.addr, &slot.data[..len], slot.stop);
        }
    }
}
