//! Bus-controller implementations

mod blocking;
mod loopback;

pub use blocking::BlockingBus;
pub use loopback::LoopbackBus;
