//! Shadow-register bridge between the port API and the transfer queue

use farport_hal::{BusController, PinState};

use crate::bus::{FailurePolicy, TransferHandle, TransferQueue};
use crate::config::ExpanderConfig;

use super::mapping;

/// A 16-bit parallel port backed by two bus-attached 8-bit expanders
///
/// Reads and writes hit in-memory shadows and return immediately; the
/// shadows converge toward the wire one [`VirtualPort::refresh`] at a time.
/// A written value becomes wire-visible when the next write-channel
/// transaction completes; an input change becomes readable when a
/// read-channel transaction has completed and the following refresh has
/// harvested it, so reads are at most one refresh interval stale. If the
/// bus stalls, reads serve the last harvested value indefinitely; freshness
/// watchdogs belong to the caller.
pub struct VirtualPort {
    /// Intended logic levels of the output lines
    output_shadow: u16,
    /// Last harvested logic levels of the input lines
    input_shadow: u16,
    write_channel: TransferHandle,
    read_channel: TransferHandle,
}

impl VirtualPort {
    /// Claim the port's two transfer slots and set both channels to the
    /// electrical idle state (wire high, logical 0)
    ///
    /// Returns `None` when the queue's arena cannot hold two more slots.
    pub fn new<B: BusController, P: FailurePolicy>(
        queue: &mut TransferQueue<B, P>,
        config: ExpanderConfig,
    ) -> Option<Self> {
        let write_channel = queue.claim(config.output_addr, true)?;
        let read_channel = queue.claim(config.input_addr, true)?;
        queue.set_payload(write_channel, &[0xFF]);
        queue.set_payload(read_channel, &[0xFF]);
        Some(Self {
            output_shadow: 0,
            input_shadow: 0,
            write_channel,
            read_channel,
        })
    }

    /// Drive the whole port
    ///
    /// Stores `value` in the output shadow and returns; bits 7:0 reach the
    /// wire after the next successful write-channel transaction.
    pub fn write(&mut self, value: u16) {
        self.output_shadow = value;
    }

    /// Observe the whole port
    ///
    /// Bits 15:8 are the last harvested input byte; bits 7:0 are the input
    /// channel's resting level (the output lines are not read back).
    pub fn read(&self) -> u16 {
        self.input_shadow
    }

    /// The output shadow as last written
    pub fn output(&self) -> u16 {
        self.output_shadow
    }

    /// Drive a single output line
    pub fn set_pin(&mut self, bit: u8, state: PinState) {
        let mask = mapping::line_mask(bit);
        if state.is_high() {
            self.output_shadow |= mask;
        } else {
            self.output_shadow &= !mask;
        }
    }

    /// Toggle a single output line
    pub fn toggle_pin(&mut self, bit: u8) {
        self.output_shadow ^= mapping::line_mask(bit);
    }

    /// Observe a single input line
    pub fn pin(&self, bit: u8) -> PinState {
        PinState::from(self.input_shadow & mapping::line_mask(bit) != 0)
    }

    /// Converge the shadows toward the wire; call once per loop iteration
    ///
    /// Recomputes the wire-format output byte (active-low complement) and,
    /// per channel, enqueues a fresh transaction only if that channel's slot
    /// is idle; a channel still in flight is simply picked up on a later
    /// iteration. Harvests the most recently received input byte on the way.
    /// Never blocks.
    pub fn refresh<B: BusController, P: FailurePolicy>(&mut self, queue: &mut TransferQueue<B, P>) {
        // Output channel: latest shadow, complemented onto the wire
        if !queue.is_busy(self.write_channel) {
            let wire = !(self.output_shadow as u8);
            queue.set_payload(self.write_channel, &[wire]);
            let _ = queue.enqueue(self.write_channel);
        }

        // Input channel: harvest the last received byte, then request a
        // fresh one
        if !queue.is_busy(self.read_channel) {
            if let Some(&wire) = queue.payload(self.read_channel).first() {
                self.input_shadow =
                    (self.input_shadow & mapping::OUTPUT_MASK) | (((!wire) as u16) << 8);
            }
            let _ = queue.enqueue(self.read_channel);
        }
    }
}
