//! Callback table and per-line dispatch

use farport_hal::{Edge, EdgeSense, Pin};

/// Number of detection-unit lines (one per port bit index)
pub const LINE_COUNT: usize = 16;

/// Callback slots per line: one falling, one rising
const EDGE_COUNT: usize = 2;

/// A registered edge callback
///
/// Handlers run at interrupt priority and take `&self`: they may only set or
/// read individually-atomic, word-sized values (see
/// [`EdgeFlag`](super::EdgeFlag)). Mutating compound state from a handler
/// requires masking the interrupt source first, which is the chip layer's
/// business, not this crate's.
pub trait EdgeHandler: Sync {
    /// Invoked once per detected edge
    fn on_edge(&self);
}

/// Closures over atomics make fine handlers
impl<F: Fn() + Sync> EdgeHandler for F {
    fn on_edge(&self) {
        self()
    }
}

/// Routes a hardware edge event on a given line to its registered handler
///
/// One dispatcher owns the edge-detection unit and a `(line, edge)` table of
/// handler references. [`EdgeDispatcher::bind`] runs in loop context during
/// init; [`EdgeDispatcher::dispatch`] runs at interrupt priority.
pub struct EdgeDispatcher<'a, E: EdgeSense> {
    sense: E,
    slots: [[Option<&'a dyn EdgeHandler>; EDGE_COUNT]; LINE_COUNT],
}

impl<'a, E: EdgeSense> EdgeDispatcher<'a, E> {
    /// Create a dispatcher with no handlers bound
    pub fn new(sense: E) -> Self {
        Self {
            sense,
            slots: [[None; EDGE_COUNT]; LINE_COUNT],
        }
    }

    /// Bind a handler to a `(pin, edge)` pair
    ///
    /// Idempotent per slot; a later bind for the same pair replaces the
    /// earlier handler. Configures edge sensitivity for the pin's line,
    /// routes the pin into the shared detection unit, unmasks it, and
    /// enables its vector entry. No ordering constraint between binds.
    pub fn bind(&mut self, pin: Pin, edge: Edge, handler: &'a dyn EdgeHandler) {
        let line = pin.line() as usize;
        if line >= LINE_COUNT {
            return;
        }
        self.slots[line][edge as usize] = Some(handler);
        self.sense.enable_line(pin, edge);
    }

    /// Handle the interrupt for one line
    ///
    /// Acknowledges the controller-level pending state first, so a toggle
    /// after return re-triggers, then checks the rising and falling latches
    /// independently: both may be set if the line toggled quickly, and both
    /// matching handlers fire in the same dispatch. An unregistered slot or
    /// an un-latched edge is a silent no-op.
    pub fn dispatch(&mut self, line: u8) {
        let index = line as usize;
        if index >= LINE_COUNT {
            return;
        }

        self.sense.acknowledge(line);

        // Rising edge
        if self.sense.take_pending(line, Edge::Rising) {
            if let Some(handler) = self.slots[index][Edge::Rising as usize] {
                handler.on_edge();
            }
        }

        // Falling edge
        if self.sense.take_pending(line, Edge::Falling) {
            if let Some(handler) = self.slots[index][Edge::Falling as usize] {
                handler.on_edge();
            }
        }
    }

    /// Access the edge-detection unit
    pub fn sense_mut(&mut self) -> &mut E {
        &mut self.sense
    }
}
