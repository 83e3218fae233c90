//! Interrupt-to-loop event flag

use core::sync::atomic::{AtomicBool, Ordering};

use super::EdgeHandler;

/// A word-sized event flag crossing the interrupt/loop boundary
///
/// The canonical callback payload: the handler side sets it, the loop side
/// consumes it with [`EdgeFlag::take`]. `take` is a single atomic
/// read-modify-write, so an edge arriving between the loop's observation and
/// its clear is never lost.
#[derive(Debug)]
pub struct EdgeFlag(AtomicBool);

impl EdgeFlag {
    /// Create a cleared flag
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    /// Set the flag
    pub fn set(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Consume the flag, returning whether it was set
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }

    /// Observe the flag without consuming it
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

impl Default for EdgeFlag {
    fn default() -> Self {
        Self::new()
    }
}

impl EdgeHandler for EdgeFlag {
    fn on_edge(&self) {
        self.set();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_consumes() {
        let flag = EdgeFlag::new();
        assert!(!flag.take());

        flag.set();
        assert!(flag.is_set());
        assert!(flag.take());
        assert!(!flag.is_set());
        assert!(!flag.take());
    }

    #[test]
    fn test_handler_sets() {
        let flag = EdgeFlag::new();
        let handler: &dyn EdgeHandler = &flag;
        handler.on_edge();
        assert!(flag.take());
    }
}
