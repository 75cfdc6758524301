//! Decode failure reasons.

use std::os::raw::c_int;

/// Reason a call could not be decoded.
///
/// Every variant means the call must be rejected without any state change; the
/// kind only exists for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// A fixed-width or declared read does not fit into the call
    #[error("Reading {width} bytes at offset {offset} exceeds call length {len}")]
    OutOfBounds {
        /// Start of the attempted read
        offset: usize,
        /// Number of bytes requested
        width: usize,
        /// Length of the call
        len: usize,
    },
    /// Meta field holds a value above `i32::MAX`
    #[error("Meta value {value:#x} does not fit into 31 bits")]
    ValueTooLarge {
        /// Decoded 128-bit value
        value: u128,
    },
    /// Arithmetic on a meta value overflowed
    #[error("Arithmetic overflow while decoding meta value")]
    Overflow,
    /// Declared list length is above the configured cap
    #[error("List length {length} exceeds maximum {max}")]
    TooLarge {
        /// Declared length
        length: u32,
        /// Configured cap
        max: u32,
    },
    /// Parallel lists have different lengths
    #[error("Parallel list length mismatch: expected {expected}, got {actual}")]
    LengthMismatch {
        /// Length of the first list in the group
        expected: usize,
        /// Length of the list that differs
        actual: usize,
    },
    /// Word is not a user-class address
    #[error("Invalid address header {header:#04x}")]
    InvalidAddress {
        /// First byte of the rejected word
        header: u8,
    },
}

impl DecodeError {
    /// Stable numeric code, as reported through the C ABI.
    pub const fn code(&self) -> c_int {
        match self {
            Self::OutOfBounds { .. } => 1,
            Self::ValueTooLarge { .. } => 2,
            Self::Overflow => 3,
            Self::TooLarge { .. } => 4,
            Self::LengthMismatch { .. } => 5,
            Self::InvalidAddress { .. } => 6,
        }
    }

    /// Short name of the failure kind, used in logs.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::OutOfBounds { .. } => "out_of_bounds",
            Self::ValueTooLarge { .. } => "value_too_large",
            Self::Overflow => "overflow",
            Self::TooLarge { .. } => "too_large",
            Self::LengthMismatch { .. } => "length_mismatch",
            Self::InvalidAddress { .. } => "invalid_address",
        }
    }
}
