//! Edge interrupt dispatch
//!
//! Binds application callbacks to `(pin, edge)` pairs and invokes them from
//! interrupt context when the edge is electrically detected. The chip layer
//! wires each vector entry to [`EdgeDispatcher::dispatch`] with the line
//! index; everything register-shaped sits behind the
//! [`EdgeSense`](farport_hal::EdgeSense) trait.

mod dispatch;
mod flag;

pub use dispatch::{EdgeDispatcher, EdgeHandler, LINE_COUNT};
pub use flag::EdgeFlag;
