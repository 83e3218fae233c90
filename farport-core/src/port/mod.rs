//! Virtual 16-bit port
//!
//! Presents a parallel-port interface whose storage lives on two 8-bit
//! bus-attached expanders reachable only asynchronously: bits 7:0 drive the
//! output expander, bits 15:8 mirror the input expander. Shadow registers
//! hide the bus latency; the active-low wire convention is complemented away
//! at the transfer boundary, so callers work in plain logic levels.

mod bridge;
pub mod mapping;

pub use bridge::VirtualPort;
