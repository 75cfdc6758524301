//! Decoder for cross-chain bridge contract call data
//!
//! Bridge calls arrive as raw bytes from untrusted transaction senders. This
//! crate turns them into strongly-typed structures (bundle requests, ring
//! member lists, single addresses) or rejects them. Nothing is verified beyond
//! structural well-formedness: signature checks, replay protection and state
//! changes are up to the execution engine consuming the result.
//!
//! The decoder is usable directly from Rust through [`CallDecoder`] and the
//! free `parse_*` functions, and from other languages through the C ABI
//! exported below.
//!
//! # Safety
//!
//! All FFI functions that take pointers are marked as `unsafe` and require
//! careful handling of memory and pointer lifetimes. Every result returned by
//! pointer must be released with the matching `bridge_free_*` function.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

use std::os::raw::{c_char, c_int, c_uint};
use std::ptr;

mod address;
mod bundle;
mod config;
mod constants;
mod decoder;
mod error;
mod types;
mod utils;

pub use address::*;
pub use bundle::*;
pub use config::*;
pub use constants::*;
pub use decoder::*;
pub use error::*;
pub use types::*;
pub use utils::*;

/// Create a new decoder instance with the default (strict) configuration
#[no_mangle]
pub extern "C" fn bridge_decoder_new() -> *mut DecoderInstance {
    let config = DecoderConfigFFI::default();
    bridge_decoder_new_with_config(&config)
}

/// Create a new decoder instance with a predefined configuration
#[no_mangle]
pub extern "C" fn bridge_decoder_new_with_preset(preset: DecoderPreset) -> *mut DecoderInstance {
    Box::into_raw(Box::new(DecoderInstance::new(DecoderConfig::from(preset))))
}

/// Create a new decoder instance with custom configuration
#[no_mangle]
pub extern "C" fn bridge_decoder_new_with_config(
    config: *const DecoderConfigFFI,
) -> *mut DecoderInstance {
    if config.is_null() {
        return ptr::null_mut();
    }

    let config = unsafe { &*config };

    Box::into_raw(Box::new(DecoderInstance::new(DecoderConfig::from(config))))
}

/// Free a decoder instance
#[no_mangle]
pub unsafe extern "C" fn bridge_decoder_free(instance: *mut DecoderInstance) {
    if !instance.is_null() {
        let _ = Box::from_raw(instance);
    }
}

/// Decode a bundle request call
/// Returns null if the call is malformed, see `bridge_decoder_last_error`
#[no_mangle]
pub unsafe extern "C" fn bridge_decode_bundle_request(
    instance: *mut DecoderInstance,
    data: *const u8,
    data_len: c_uint,
) -> *mut BundleRequestFFI {
    if instance.is_null() {
        return ptr::null_mut();
    }

    let instance = &mut *instance;
    instance.clear_error();

    match decode_bundle_request_impl(instance, data, data_len) {
        Ok(bundle) => Box::into_raw(Box::new(bundle)),
        Err(e) => {
            set_last_error(instance, &e);
            ptr::null_mut()
        }
    }
}

/// Free a bundle request together with its transfer and signature arrays
#[no_mangle]
pub unsafe extern "C" fn bridge_free_bundle_request(bundle: *mut BundleRequestFFI) {
    if !bundle.is_null() {
        let bundle = Box::from_raw(bundle);
        free_raw_array(bundle.transfers, bundle.transfers_count);
        free_raw_array(bundle.signatures, bundle.signatures_count);
    }
}

/// Decode a ring initialization call (list of user addresses)
#[no_mangle]
pub unsafe extern "C" fn bridge_decode_address_list(
    instance: *mut DecoderInstance,
    data: *const u8,
    data_len: c_uint,
) -> *mut AddressListFFI {
    if instance.is_null() {
        return ptr::null_mut();
    }

    let instance = &mut *instance;
    instance.clear_error();

    match decode_address_list_impl(instance, data, data_len) {
        Ok(list) => Box::into_raw(Box::new(list)),
        Err(e) => {
            set_last_error(instance, &e);
            ptr::null_mut()
        }
    }
}

/// Free an address list
#[no_mangle]
pub unsafe extern "C" fn bridge_free_address_list(list: *mut AddressListFFI) {
    if !list.is_null() {
        let list = Box::from_raw(list);
        free_raw_array(list.addresses, list.count);
    }
}

/// Decode a single user address argument (e.g. `changeOwner`)
/// Returns 0 on success and writes the address to `out`
#[no_mangle]
pub unsafe extern "C" fn bridge_decode_address(
    instance: *mut DecoderInstance,
    data: *const u8,
    data_len: c_uint,
    out: *mut FFIWord,
) -> c_int {
    if instance.is_null() || out.is_null() {
        return -1;
    }

    let instance = &mut *instance;
    instance.clear_error();

    match decode_address_impl(data, data_len) {
        Ok(address) => {
            *out = address;
            0
        }
        Err(e) => {
            set_last_error(instance, &e);
            -1
        }
    }
}

/// Decode a single 32-byte word argument without validating it
/// Returns 0 on success and writes the word to `out`
#[no_mangle]
pub unsafe extern "C" fn bridge_decode_dword(
    instance: *mut DecoderInstance,
    data: *const u8,
    data_len: c_uint,
    out: *mut FFIWord,
) -> c_int {
    if instance.is_null() || out.is_null() {
        return -1;
    }

    let instance = &mut *instance;
    instance.clear_error();

    match decode_dword_impl(data, data_len) {
        Ok(word) => {
            *out = word;
            0
        }
        Err(e) => {
            set_last_error(instance, &e);
            -1
        }
    }
}

/// Check whether a word is a user-class address
/// Returns 1 if valid, 0 if invalid or null
#[no_mangle]
pub unsafe extern "C" fn bridge_is_valid_address(word: *const FFIWord) -> c_int {
    if word.is_null() {
        return 0;
    }

    c_int::from(is_valid_address(&(*word).bytes))
}

/// Get the last error message
/// The pointer stays valid until the next call on the same instance
#[no_mangle]
pub unsafe extern "C" fn bridge_decoder_last_error(instance: *const DecoderInstance) -> *const c_char {
    if instance.is_null() {
        return ptr::null();
    }

    let instance = &*instance;

    match &instance.last_error {
        Some(error) => error.as_ptr(),
        None => ptr::null(),
    }
}

/// Get the code of the last error
/// 0 if the last call succeeded, -1 for invalid arguments, otherwise the
/// decode failure kind
#[no_mangle]
pub unsafe extern "C" fn bridge_decoder_last_error_code(instance: *const DecoderInstance) -> c_int {
    if instance.is_null() {
        return -1;
    }

    (*instance).last_error_code
}

/// Get the list cap of a decoder instance
/// Returns 0 if the cap is not enforced
#[no_mangle]
pub extern "C" fn bridge_decoder_max_list_length(instance: *const DecoderInstance) -> u32 {
    if instance.is_null() {
        return 0;
    }

    let instance = unsafe { &*instance };
    let config = instance.decoder.config();
    if config.enforce_list_cap {
        config.max_list_length
    } else {
        0
    }
}
