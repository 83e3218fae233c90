//! Farport Hardware Abstraction Layer
//!
//! This crate defines the trait seams between the board-agnostic core
//! (`farport-core`) and chip-specific code. The core never touches a
//! peripheral register; everything register-shaped arrives through one of
//! these traits, so host tests can substitute doubles and the same core runs
//! on different MCUs.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (polling loop, callbacks)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  farport-core (dispatch, queue, port)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  farport-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  chip HAL     │       │ farport-      │
//! │  (out of tree)│       │ drivers (host)│
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::EdgeSense`] - Edge-detection unit (latch, acknowledge, unmask)
//! - [`i2c::BusController`] - Non-blocking bus transactions
//! - [`time::MillisClock`] - Monotonic millisecond time source

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod i2c;
pub mod time;

// Re-export key types at crate root for convenience
pub use gpio::{Edge, EdgeSense, Pin, PinState, PortId};
pub use i2c::{BusController, BusError};
pub use time::MillisClock;
