//! Scripted bus-controller double shared by queue and port tests

use farport_hal::{BusController, BusError};
use heapless::Vec;

/// Scripted bus controller
///
/// Records every started transaction, holds it open until the test calls
/// [`MockBus::complete`], and hands scripted bytes back on read completions.
pub(crate) struct MockBus {
    /// (addr, len, stop) per started transaction
    pub(crate) started: Vec<(u8, usize, bool), 32>,
    /// Payload of the most recent write transaction
    pub(crate) last_write: Vec<u8, 8>,
    /// Bytes handed back on the next successful read completion
    pub(crate) rx_data: Vec<u8, 8>,
    /// Times a begin_* arrived while a transaction was already open
    pub(crate) overlaps: u32,
    in_flight: Option<bool>,
    result: Option<Result<(), BusError>>,
}

impl MockBus {
    pub(crate) fn new() -> Self {
        Self {
            started: Vec::new(),
            last_write: Vec::new(),
            rx_data: Vec::new(),
            overlaps: 0,
            in_flight: None,
            result: None,
        }
    }

    /// Let the active transaction finish with `result` at the next poll
    pub(crate) fn complete(&mut self, result: Result<(), BusError>) {
        self.result = Some(result);
    }

    pub(crate) fn set_rx(&mut self, data: &[u8]) {
        self.rx_data = Vec::from_slice(data).unwrap();
    }

    fn begin(&mut self, addr: u8, len: usize, stop: bool, is_read: bool) {
        if self.in_flight.is_some() {
            self.overlaps += 1;
        }
        let _ = self.started.push((addr, len, stop));
        self.in_flight = Some(is_read);
    }
}

impl BusController for MockBus {
    fn is_idle(&self) -> bool {
        self.in_flight.is_none()
    }

    fn begin_write(&mut self, addr: u8, data: &[u8], stop: bool) {
        self.begin(addr, data.len(), stop, false);
        self.last_write = Vec::from_slice(data).unwrap();
    }

    fn begin_read(&mut self, addr: u8, len: usize, stop: bool) {
        self.begin(addr, len, stop, true);
    }

    fn poll_complete(&mut self, rx: &mut [u8]) -> Option<Result<(), BusError>> {
        self.in_flight?;
        let result = self.result.take()?;
        let is_read = self.in_flight.take().unwrap_or(false);
        if is_read && result.is_ok() {
            let n = rx.len().min(self.rx_data.len());
            rx[..n].copy_from_slice(&self.rx_data[..n]);
        }
        Some(result)
    }
}
