//! Adapter over a blocking `embedded-hal` I2C bus
//!
//! Some target HALs only expose blocking bus transactions. This adapter
//! runs each transfer synchronously inside `begin_*` and hands the outcome
//! back at the next poll, which keeps the queue's enqueue/poll contract
//! intact at the cost of the begin call's duration. Good enough for
//! bring-up and low-rate expander traffic; a real non-blocking controller
//! belongs in the chip HAL.

use embedded_hal::i2c::{Error as _, ErrorKind, I2c};
use farport_hal::{BusController, BusError};
use heapless::Vec;

/// Largest read this adapter buffers between begin and poll
const RX_CAPACITY: usize = 8;

/// Blocking-bus adapter
///
/// The blocking API always terminates a transaction with a stop condition,
/// so the request's stop flag is accepted and ignored; expander traffic is
/// stop-terminated anyway.
pub struct BlockingBus<I> {
    i2c: I,
    result: Option<Result<(), BusError>>,
    rx: Vec<u8, RX_CAPACITY>,
}

impl<I: I2c> BlockingBus<I> {
    /// Wrap a blocking I2C bus
    pub fn new(i2c: I) -> Self {
        Self {
            i2c,
            result: None,
            rx: Vec::new(),
        }
    }

    /// Release the wrapped bus
    pub fn release(self) -> I {
        self.i2c
    }
}

fn map_error(kind: ErrorKind) -> BusError {
    match kind {
        ErrorKind::Bus => BusError::Bus,
        ErrorKind::ArbitrationLoss => BusError::ArbitrationLost,
        ErrorKind::NoAcknowledge(_) => BusError::Nack,
        ErrorKind::Overrun => BusError::Overrun,
        _ => BusError::Other,
    }
}

impl<I: I2c> BusController for BlockingBus<I> {
    fn is_idle(&self) -> bool {
        // A transaction is open until its outcome has been polled
        self.result.is_none()
    }

    fn begin_write(&mut self, addr: u8, data: &[u8], _stop: bool) {
        let result = self
            .i2c
            .write(addr >> 1, data)
            .map_err(|e| map_error(e.kind()));
        self.rx.clear();
        self.result = Some(result);
    }

    fn begin_read(&mut self, addr: u8, len: usize, _stop: bool) {
        let mut buf = [0u8; RX_CAPACITY];
        let len = len.min(RX_CAPACITY);
        let result = self
            .i2c
            .read(addr >> 1, &mut buf[..len])
            .map_err(|e| map_error(e.kind()));
        self.rx.clear();
        if result.is_ok() {
            let _ = self.rx.extend_from_slice(&buf[..len]);
        }
        self.result = Some(result);
    }

    fn poll_complete(&mut self, rx: &mut [u8]) -> Option<Result<(), BusError>> {
        let result = self.result.take()?;
        if result.is_ok() && !self.rx.is_empty() {
            let n = rx.len().min(self.rx.len());
            rx[..n].copy_from_slice(&self.rx[..n]);
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use embedded_hal::i2c::{ErrorType, NoAcknowledgeSource, Operation};

    use super::*;

    /// One-register fake peripheral behind a blocking bus
    struct FakeI2c {
        mem: u8,
        fail: Option<ErrorKind>,
    }

    #[derive(Debug)]
    struct FakeError(ErrorKind);

    impl embedded_hal::i2c::Error for FakeError {
        fn kind(&self) -> ErrorKind {
            self.0
        }
    }

    impl ErrorType for FakeI2c {
        type Error = FakeError;
    }

    impl I2c for FakeI2c {
        fn transaction(
            &mut self,
            _address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), FakeError> {
            if let Some(kind) = self.fail {
                return Err(FakeError(kind));
            }
            for op in operations.iter_mut() {
                match op {
                    Operation::Write(data) => self.mem = *data.last().unwrap_or(&0xFF),
                    Operation::Read(buf) => buf.fill(self.mem),
                }
            }
            Ok(())
        }
    }

    #[test]
    fn test_write_read_cycle() {
        let mut bus = BlockingBus::new(FakeI2c {
            mem: 0xFF,
            fail: None,
        });
        let mut rx = [0u8; 1];

        bus.begin_write(0x70, &[0x3C], true);
        assert!(!bus.is_idle());
        assert_eq!(bus.poll_complete(&mut rx), Some(Ok(())));
        assert!(bus.is_idle());

        bus.begin_read(0x73, 1, true);
        assert_eq!(bus.poll_complete(&mut rx), Some(Ok(())));
        assert_eq!(rx, [0x3C]);
    }

    #[test]
    fn test_poll_yields_outcome_once() {
        let mut bus = BlockingBus::new(FakeI2c {
            mem: 0x00,
            fail: None,
        });
        let mut rx = [0u8; 1];

        bus.begin_write(0x70, &[0x01], true);
        assert!(bus.poll_complete(&mut rx).is_some());
        assert_eq!(bus.poll_complete(&mut rx), None);
    }

    #[test]
    fn test_error_mapping() {
        let mut bus = BlockingBus::new(FakeI2c {
            mem: 0x00,
            fail: Some(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)),
        });
        let mut rx = [0u8; 1];

        bus.begin_read(0x73, 1, true);
        assert_eq!(bus.poll_complete(&mut rx), Some(Err(BusError::Nack)));

        bus.i2c.fail = Some(ErrorKind::ArbitrationLoss);
        bus.begin_write(0x70, &[0x00], true);
        assert_eq!(
            bus.poll_complete(&mut rx),
            Some(Err(BusError::ArbitrationLost))
        );
    }
}
