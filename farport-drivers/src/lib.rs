//! Bus-controller implementations for the Farport firmware layer
//!
//! Two host-friendly implementations of
//! [`BusController`](farport_hal::BusController):
//!
//! - [`bus::LoopbackBus`] - an in-memory loop from the output expander to
//!   the input expander, for bring-up and tests without hardware
//! - [`bus::BlockingBus`] - an adapter over any blocking `embedded-hal`
//!   I2C bus, for targets whose HAL has no non-blocking controller

#![no_std]
#![deny(unsafe_code)]

pub mod bus;

pub use bus::{BlockingBus, LoopbackBus};
