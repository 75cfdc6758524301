//! Utility functions for FFI operations

use std::ffi::CString;
use std::os::raw::c_uint;
use std::ptr;
use std::slice;

use anyhow::{anyhow, Result};
use revm::primitives::B256;

use crate::address::Address;
use crate::bundle::{BridgeTransfer, BundleRequestCall, Signature};
use crate::error::DecodeError;
use crate::types::{
    AddressListFFI, BridgeTransferFFI, BundleRequestFFI, DecoderInstance, FFISignature, FFIWord,
};

/// Borrow call data handed over by the caller
///
/// A null pointer is only accepted together with a zero length.
pub unsafe fn call_data<'a>(data: *const u8, data_len: c_uint) -> Result<&'a [u8]> {
    if data_len == 0 {
        return Ok(&[]);
    }
    if data.is_null() {
        return Err(anyhow!("Null call data with length {}", data_len));
    }

    Ok(slice::from_raw_parts(data, data_len as usize))
}

/// Record a failure in the instance's last error slot
pub fn set_last_error(instance: &mut DecoderInstance, error: &anyhow::Error) {
    instance.last_error_code = error
        .downcast_ref::<DecodeError>()
        .map_or(-1, DecodeError::code);
    // Messages are produced by this crate and never contain NUL bytes
    instance.last_error = CString::new(error.to_string()).ok();
}

/// Convert bytes to hex string
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

pub fn b256_to_ffi(word: B256) -> FFIWord {
    FFIWord { bytes: word.0 }
}

pub fn address_to_ffi(address: Address) -> FFIWord {
    FFIWord {
        bytes: address.to_bytes(),
    }
}

pub fn signature_to_ffi(signature: &Signature) -> FFISignature {
    FFISignature {
        bytes: *signature.as_bytes(),
    }
}

pub fn transfer_to_ffi(transfer: &BridgeTransfer) -> BridgeTransferFFI {
    BridgeTransferFFI {
        amount: FFIWord {
            bytes: transfer.amount.to_be_bytes(),
        },
        recipient: address_to_ffi(transfer.recipient),
        source_transaction_hash: b256_to_ffi(transfer.source_transaction_hash),
    }
}

/// Move a vector to the heap as a raw array, null when empty
fn into_raw_array<T>(items: Vec<T>) -> (*mut T, u32) {
    if items.is_empty() {
        return (ptr::null_mut(), 0);
    }

    // Bounded by the list cap and the 31-bit meta range
    let len = items.len() as u32;
    let boxed = items.into_boxed_slice();
    (Box::into_raw(boxed) as *mut T, len)
}

/// Release an array handed out in a bundle or address list
pub unsafe fn free_raw_array<T>(items: *mut T, len: u32) {
    if !items.is_null() {
        let _ = Box::from_raw(ptr::slice_from_raw_parts_mut(items, len as usize));
    }
}

/// Convert a decoded bundle to its FFI representation
pub fn convert_bundle_request(bundle: BundleRequestCall) -> BundleRequestFFI {
    let (transfers, transfers_count) =
        into_raw_array(bundle.transfers.iter().map(transfer_to_ffi).collect());
    let (signatures, signatures_count) =
        into_raw_array(bundle.signatures.iter().map(signature_to_ffi).collect());

    BundleRequestFFI {
        block_hash: b256_to_ffi(bundle.block_hash),
        transfers_count,
        transfers,
        signatures_count,
        signatures,
    }
}

/// Convert a decoded address list to its FFI representation
pub fn convert_address_list(addresses: Vec<Address>) -> AddressListFFI {
    let (addresses, count) = into_raw_array(addresses.into_iter().map(address_to_ffi).collect());
    AddressListFFI { count, addresses }
}

/// Decode a bundle request
pub unsafe fn decode_bundle_request_impl(
    instance: &DecoderInstance,
    data: *const u8,
    data_len: c_uint,
) -> Result<BundleRequestFFI> {
    let call = call_data(data, data_len)?;
    let bundle = instance.decoder.parse_bundle_request(call)?;
    Ok(convert_bundle_request(bundle))
}

/// Decode a ring initialization address list
pub unsafe fn decode_address_list_impl(
    instance: &DecoderInstance,
    data: *const u8,
    data_len: c_uint,
) -> Result<AddressListFFI> {
    let call = call_data(data, data_len)?;
    let addresses = instance.decoder.parse_address_list(call)?;
    Ok(convert_address_list(addresses))
}

/// Decode a single address argument
pub unsafe fn decode_address_impl(data: *const u8, data_len: c_uint) -> Result<FFIWord> {
    let call = call_data(data, data_len)?;
    let address = crate::decoder::parse_address_from_call(call)?;
    Ok(address_to_ffi(address))
}

/// Decode a single unvalidated word argument
pub unsafe fn decode_dword_impl(data: *const u8, data_len: c_uint) -> Result<FFIWord> {
    let call = call_data(data, data_len)?;
    let word = crate::decoder::parse_dword_from_call(call)?;
    Ok(b256_to_ffi(word))
}
