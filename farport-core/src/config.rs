//! Configuration type definitions

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Wire-format address of the output (LED) expander, direction bit clear
pub const OUTPUT_EXPANDER_ADDR: u8 = 0x70;

/// Wire-format address of the input (push-button) expander, direction bit set
pub const INPUT_EXPANDER_ADDR: u8 = 0x73;

/// Addresses of the expander pair backing a virtual port
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExpanderConfig {
    /// Output expander address byte (direction bit clear)
    pub output_addr: u8,
    /// Input expander address byte (direction bit set)
    pub input_addr: u8,
}

impl Default for ExpanderConfig {
    fn default() -> Self {
        Self {
            output_addr: OUTPUT_EXPANDER_ADDR,
            input_addr: INPUT_EXPANDER_ADDR,
        }
    }
}
