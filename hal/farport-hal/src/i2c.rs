//! Non-blocking bus controller seam
//!
//! The transfer queue hands one transaction at a time to a [`BusController`]
//! and polls it for the completion event. Nothing here blocks: `begin_*`
//! returns once the transaction is started, and `poll_complete` reports
//! `None` while the wire is busy.

/// Failure causes surfaced by a bus controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// Bus error (misplaced start/stop)
    Bus,
    /// Arbitration lost to another master
    ArbitrationLost,
    /// Address or data byte not acknowledged
    Nack,
    /// Transaction exceeded the controller's deadline
    Timeout,
    /// Receive data overrun
    Overrun,
    /// Controller-specific failure
    Other,
}

/// Non-blocking master-mode bus controller
///
/// One controller drives one physical bus. The address byte is the wire
/// format: 7-bit target address in bits 7:1, direction in bit 0 (set for
/// read). Exactly one transaction may be on the wire at a time; the caller
/// (the transfer queue) enforces this by checking [`BusController::is_idle`]
/// before a new `begin_*`.
///
/// Controllers that finish transactions in interrupt context latch the
/// completion internally and hand it out at the next poll, so
/// `poll_complete` yields each completion exactly once.
pub trait BusController {
    /// true when no transaction is on the wire
    fn is_idle(&self) -> bool;

    /// Begin a write transaction
    ///
    /// # Arguments
    /// - `addr`: wire-format address byte, direction bit clear
    /// - `data`: payload bytes to transmit
    /// - `stop`: whether to issue a stop condition at the end
    fn begin_write(&mut self, addr: u8, data: &[u8], stop: bool);

    /// Begin a read transaction
    ///
    /// # Arguments
    /// - `addr`: wire-format address byte, direction bit set
    /// - `len`: number of bytes to receive
    /// - `stop`: whether to issue a stop condition at the end
    fn begin_read(&mut self, addr: u8, len: usize, stop: bool);

    /// Poll for completion of the active transaction
    ///
    /// Returns `None` while the transaction is still in flight, and the
    /// outcome exactly once when it finishes. On a completed read the
    /// received bytes are copied into `rx` before the outcome is returned.
    fn poll_complete(&mut self, rx: &mut [u8]) -> Option<Result<(), BusError>>;
}
