//! Decoder configuration.

use crate::constants::BUNDLE_LIST_SIZE_MAX;

/// Limits applied while decoding lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Largest accepted number of elements in a single list
    pub max_list_length: u32,
    /// Whether `max_list_length` is applied at all
    pub enforce_list_cap: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self::strict()
    }
}

impl DecoderConfig {
    /// Caps every list at [`BUNDLE_LIST_SIZE_MAX`] elements.
    pub const fn strict() -> Self {
        Self {
            max_list_length: BUNDLE_LIST_SIZE_MAX,
            enforce_list_cap: true,
        }
    }

    /// Historical behaviour of the deployed bridge: the cap check compared the
    /// constant against itself and never rejected anything, so lists are only
    /// bounded by the call length.
    pub const fn legacy() -> Self {
        Self {
            max_list_length: BUNDLE_LIST_SIZE_MAX,
            enforce_list_cap: false,
        }
    }

    /// Returns `true` if a list of `length` elements exceeds the cap.
    pub const fn exceeds_cap(&self, length: u32) -> bool {
        self.enforce_list_cap && length > self.max_list_length
    }
}
