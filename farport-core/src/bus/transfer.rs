//! Transfer slot records

use core::sync::atomic::{AtomicBool, Ordering};

use farport_hal::BusError;

/// Capacity of a transfer slot's payload buffer in bytes
pub const MAX_TRANSFER_LEN: usize = 8;

/// Handle to a claimed transfer slot
///
/// Cheap to copy; the slot itself stays inside the queue's arena for the
/// life of the program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TransferHandle(pub(crate) u8);

impl TransferHandle {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// One arena slot: a reusable transfer record
///
/// `busy` is the only field observable from outside the loop context, so it
/// is the only atomic: release on clear pairs with acquire on observe, which
/// also publishes the received payload bytes.
pub(crate) struct TransferSlot {
    /// Wire-format address byte, direction in bit 0
    pub(crate) addr: u8,
    /// Payload buffer: bytes to transmit, or receive destination
    pub(crate) data: [u8; MAX_TRANSFER_LEN],
    /// Byte count of the transfer
    pub(crate) len: u8,
    /// Whether to issue a stop condition at the end
    pub(crate) stop: bool,
    /// Queued or in progress
    pub(crate) busy: AtomicBool,
    /// Result of the most recent completion
    pub(crate) outcome: Option<Result<(), BusError>>,
}

impl TransferSlot {
    pub(crate) fn new(addr: u8, stop: bool) -> Self {
        Self {
            addr,
            data: [0; MAX_TRANSFER_LEN],
            len: 0,
            stop,
            busy: AtomicBool::new(false),
            outcome: None,
        }
    }

    /// Direction comes from the address byte's LSB
    pub(crate) fn is_read(&self) -> bool {
        self.addr & 0x01 != 0
    }

    pub(crate) fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}
