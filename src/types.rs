//! FFI-compatible types for the bridge decoder
//!
//! These structs are the only format shared with the execution engine across
//! the C ABI. They use `#[repr(C)]` and plain value fields; do not change their
//! layout without bumping the crate major version.

use std::ffi::CString;
use std::os::raw::c_int;

use crate::config::DecoderConfig;
use crate::constants::{BUNDLE_LIST_SIZE_MAX, DWORD_SIZE, SIGNATURE_SIZE};
use crate::decoder::CallDecoder;

/// Decoder handle owned by the foreign caller
pub struct DecoderInstance {
    pub decoder: CallDecoder,
    pub last_error: Option<CString>,
    pub last_error_code: c_int,
}

impl DecoderInstance {
    pub fn new(config: DecoderConfig) -> Self {
        Self {
            decoder: CallDecoder::new(config),
            last_error: None,
            last_error_code: 0,
        }
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
        self.last_error_code = 0;
    }
}

/// 32-byte word (hash, address or big-endian integer).
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FFIWord {
    pub bytes: [u8; DWORD_SIZE],
}

/// 96-byte reassembled signature.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FFISignature {
    pub bytes: [u8; SIGNATURE_SIZE],
}

/// FFI-compatible transfer record
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BridgeTransferFFI {
    /// Amount as a 256-bit big-endian integer
    pub amount: FFIWord,
    pub recipient: FFIWord,
    pub source_transaction_hash: FFIWord,
}

/// FFI-compatible bundle request
///
/// Arrays are null when empty. Release with `bridge_free_bundle_request`.
#[repr(C)]
pub struct BundleRequestFFI {
    pub block_hash: FFIWord,
    pub transfers_count: u32,
    pub transfers: *mut BridgeTransferFFI,
    pub signatures_count: u32,
    pub signatures: *mut FFISignature,
}

/// FFI-compatible address list
///
/// `addresses` is null when empty. Release with `bridge_free_address_list`.
#[repr(C)]
pub struct AddressListFFI {
    pub count: u32,
    pub addresses: *mut FFIWord,
}

/// Configuration for decoder instance creation
#[repr(C)]
pub struct DecoderConfigFFI {
    /// Largest accepted number of elements in one list (0 for default 512)
    pub max_list_length: u32,
    /// Whether `max_list_length` is enforced at all
    pub enforce_list_cap: bool,
}

impl Default for DecoderConfigFFI {
    fn default() -> Self {
        Self {
            max_list_length: BUNDLE_LIST_SIZE_MAX,
            enforce_list_cap: true,
        }
    }
}

impl From<&DecoderConfigFFI> for DecoderConfig {
    fn from(config: &DecoderConfigFFI) -> Self {
        Self {
            max_list_length: if config.max_list_length == 0 {
                BUNDLE_LIST_SIZE_MAX
            } else {
                config.max_list_length
            },
            enforce_list_cap: config.enforce_list_cap,
        }
    }
}

/// Predefined decoder configurations
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecoderPreset {
    /// Lists capped at 512 elements
    Strict = 0,
    /// No list cap, matching the historical bridge deployment
    Legacy = 1,
    /// Custom configuration
    Custom = 255,
}

impl From<DecoderPreset> for DecoderConfig {
    fn from(preset: DecoderPreset) -> Self {
        match preset {
            DecoderPreset::Strict => Self::strict(),
            DecoderPreset::Legacy => Self::legacy(),
            DecoderPreset::Custom => Self::default(), // Fallback to default
        }
    }
}
