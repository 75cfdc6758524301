//! Readers for fixed-width fields and dynamic lists in bridge call data.
//!
//! Call data follows a Solidity-like layout: a 4-byte function selector, then
//! 32-byte scalar words and, for every dynamic list, a 16-byte offset pointer
//! (relative to [`CALL_OFFSET`]) to a 16-byte length followed by the packed
//! elements:
//!
//! ```text
//! [selector][...][list offset]...[list length][element 0][element 1]...
//! ```
//!
//! Everything here operates on untrusted bytes. Every read is bounds-checked
//! before it happens, and all arithmetic on decoded values is checked, so a
//! malformed call produces a [`DecodeError`] rather than a panic or an
//! oversized allocation.

use revm::primitives::B256;
use tracing::{debug, trace};

use crate::address::Address;
use crate::config::DecoderConfig;
use crate::constants::{
    ADDRESS_SIZE, CALL_OFFSET, DWORD_SIZE, LIST_CALL_MIN_LEN, LIST_META_SIZE, META_VALUE_MAX,
};
use crate::error::DecodeError;

/// Checks that `width` bytes starting at `offset` lie within `call`.
pub(crate) fn ensure_len(call: &[u8], offset: usize, width: usize) -> Result<(), DecodeError> {
    match offset.checked_add(width) {
        Some(end) if end <= call.len() => Ok(()),
        _ => Err(DecodeError::OutOfBounds {
            offset,
            width,
            len: call.len(),
        }),
    }
}

/// Reads a 16-byte big-endian meta field (list offset or list length).
///
/// Values above `i32::MAX` are rejected rather than truncated.
pub fn read_meta(call: &[u8], offset: usize) -> Result<u32, DecodeError> {
    let bytes = read_word::<LIST_META_SIZE>(call, offset)?;
    let value = u128::from_be_bytes(bytes);

    if value > u128::from(META_VALUE_MAX) {
        return Err(DecodeError::ValueTooLarge { value });
    }

    // Must stay exact even if META_VALUE_MAX changes
    i32::try_from(value)
        .ok()
        .and_then(|value| u32::try_from(value).ok())
        .ok_or(DecodeError::Overflow)
}

/// Copies `N` bytes at `offset` out of `call`.
pub fn read_word<const N: usize>(call: &[u8], offset: usize) -> Result<[u8; N], DecodeError> {
    ensure_len(call, offset, N)?;

    let mut word = [0u8; N];
    word.copy_from_slice(&call[offset..offset + N]);
    Ok(word)
}

/// Reads the 32-byte word directly following the function selector.
pub fn parse_dword_from_call(call: &[u8]) -> Result<B256, DecodeError> {
    read_word::<DWORD_SIZE>(call, CALL_OFFSET).map(B256::from)
}

/// Parses a call whose single argument is an address, externally known as
/// `changeOwner`.
pub fn parse_address_from_call(call: &[u8]) -> Result<Address, DecodeError> {
    parse_dword_from_call(call)
        .and_then(Address::try_from_word)
        .inspect_err(|error| reject("address", call, error))
}

/// Parses a ring initialization call using the default configuration.
///
/// See [`CallDecoder::parse_address_list`].
pub fn parse_address_list(call: &[u8]) -> Result<Vec<Address>, DecodeError> {
    CallDecoder::default().parse_address_list(call)
}

pub(crate) fn reject(entry_point: &'static str, call: &[u8], error: &DecodeError) {
    debug!(
        entry_point,
        kind = error.kind(),
        call_len = call.len(),
        %error,
        "Rejected bridge call"
    );
}

/// Number of bytes taken by `length` elements of `width` bytes.
///
/// The product has to stay within the same 31-bit range as meta values, which
/// stops a huge declared length from wrapping into a small one.
fn consumed_len(length: u32, width: usize) -> Result<usize, DecodeError> {
    let width = u32::try_from(width).map_err(|_| DecodeError::Overflow)?;

    length
        .checked_mul(width)
        .filter(|consumed| *consumed <= META_VALUE_MAX)
        .map(|consumed| consumed as usize)
        .ok_or(DecodeError::Overflow)
}

/// Decoder for list-carrying bridge calls.
///
/// Holds nothing but its configuration, so a single instance can be shared by
/// any number of threads decoding unrelated calls.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CallDecoder {
    config: DecoderConfig,
}

impl CallDecoder {
    /// Creates a decoder with the given limits.
    pub const fn new(config: DecoderConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub const fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decodes the list whose offset pointer is stored at `offset`, with `N`
    /// bytes per element.
    ///
    /// Elements are returned in encoding order and the result always has
    /// exactly the declared length. Nothing is allocated until the declared
    /// length has been checked against the call.
    pub fn read_list<const N: usize>(
        &self,
        call: &[u8],
        offset: usize,
    ) -> Result<Vec<[u8; N]>, DecodeError> {
        const { assert!(N > 0, "List elements must not be empty") };

        // Room for the offset pointer and at least one length field
        ensure_len(call, offset, LIST_META_SIZE * 2)?;

        // Validate the pointer before rebasing it onto the selector
        let list_offset = read_meta(call, offset)? as usize + CALL_OFFSET;
        ensure_len(call, list_offset, LIST_META_SIZE)?;

        let list_length = read_meta(call, list_offset)?;
        let consumed = consumed_len(list_length, N)?;

        if self.config.exceeds_cap(list_length) {
            return Err(DecodeError::TooLarge {
                length: list_length,
                max: self.config.max_list_length,
            });
        }

        let start = list_offset + LIST_META_SIZE;
        ensure_len(call, start, consumed)?;

        trace!(offset, list_offset, list_length, width = N, "Decoded list");

        Ok(call[start..start + consumed]
            .chunks_exact(N)
            .map(|chunk| {
                let mut element = [0u8; N];
                element.copy_from_slice(chunk);
                element
            })
            .collect())
    }

    /// Parses a list of addresses, currently only used by ring initialization.
    ///
    /// Every element must be a user address; a single non-user entry rejects
    /// the whole call.
    pub fn parse_address_list(&self, call: &[u8]) -> Result<Vec<Address>, DecodeError> {
        self.address_list(call)
            .inspect_err(|error| reject("address_list", call, error))
    }

    fn address_list(&self, call: &[u8]) -> Result<Vec<Address>, DecodeError> {
        ensure_len(call, 0, LIST_CALL_MIN_LEN)?;

        self.read_list::<ADDRESS_SIZE>(call, CALL_OFFSET)?
            .into_iter()
            .map(|word| Address::try_from_word(B256::from(word)))
            .collect()
    }
}
