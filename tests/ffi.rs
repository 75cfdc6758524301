mod common;

use std::ffi::CStr;
use std::ptr;

use bridge_decoder::{
    bridge_decode_address, bridge_decode_address_list, bridge_decode_bundle_request,
    bridge_decode_dword, bridge_decoder_free, bridge_decoder_last_error,
    bridge_decoder_last_error_code, bridge_decoder_max_list_length, bridge_decoder_new,
    bridge_decoder_new_with_config, bridge_decoder_new_with_preset, bridge_free_address_list,
    bridge_free_bundle_request, bridge_is_valid_address, DecodeError, DecoderConfigFFI,
    DecoderPreset, FFIWord,
};
use common::{address_list_call, user_address, word_call, BundleCall};

#[test]
fn bundle_request_round_trip_through_c_abi() {
    unsafe {
        let inst = bridge_decoder_new();
        assert!(!inst.is_null());

        let call = BundleCall::sample(2, 3).encode();
        let bundle = bridge_decode_bundle_request(inst, call.as_ptr(), call.len() as u32);
        assert!(!bundle.is_null());
        assert!(bridge_decoder_last_error(inst).is_null());
        assert_eq!(bridge_decoder_last_error_code(inst), 0);

        let bundle_ref = &*bundle;
        assert_eq!(bundle_ref.block_hash.bytes, [0xbb; 32]);
        assert_eq!(bundle_ref.transfers_count, 2);
        assert_eq!(bundle_ref.signatures_count, 3);

        let transfers =
            std::slice::from_raw_parts(bundle_ref.transfers, bundle_ref.transfers_count as usize);
        assert_eq!(transfers[1].recipient.bytes, user_address(1));
        assert_eq!(transfers[1].source_transaction_hash.bytes, [0x51; 32]);
        // 2000 as a 256-bit big-endian integer
        assert_eq!(transfers[1].amount.bytes[30..], [0x07, 0xd0]);

        let signatures = std::slice::from_raw_parts(
            bundle_ref.signatures,
            bundle_ref.signatures_count as usize,
        );
        assert_eq!(signatures[2].bytes[0], 0x12);
        assert_eq!(signatures[2].bytes[32], 0x22);
        assert_eq!(signatures[2].bytes[64], 0x32);

        bridge_free_bundle_request(bundle);
        bridge_decoder_free(inst);
    }
}

#[test]
fn failure_sets_last_error() {
    unsafe {
        let inst = bridge_decoder_new();

        let mut call = BundleCall::sample(3, 1);
        call.amounts.pop();
        let call = call.encode();

        let bundle = bridge_decode_bundle_request(inst, call.as_ptr(), call.len() as u32);
        assert!(bundle.is_null());

        let code = bridge_decoder_last_error_code(inst);
        assert_eq!(
            code,
            DecodeError::LengthMismatch {
                expected: 0,
                actual: 0
            }
            .code()
        );
        let message = CStr::from_ptr(bridge_decoder_last_error(inst));
        assert_eq!(
            message.to_str().unwrap(),
            "Parallel list length mismatch: expected 3, got 2"
        );

        // The next successful call clears the error
        let call = BundleCall::sample(1, 1).encode();
        let bundle = bridge_decode_bundle_request(inst, call.as_ptr(), call.len() as u32);
        assert!(!bundle.is_null());
        assert!(bridge_decoder_last_error(inst).is_null());
        assert_eq!(bridge_decoder_last_error_code(inst), 0);

        bridge_free_bundle_request(bundle);
        bridge_decoder_free(inst);
    }
}

#[test]
fn null_call_data() {
    unsafe {
        let inst = bridge_decoder_new();

        // Empty call is merely too short
        let bundle = bridge_decode_bundle_request(inst, ptr::null(), 0);
        assert!(bundle.is_null());
        assert_eq!(bridge_decoder_last_error_code(inst), 1);

        // Null with a length is a caller bug
        let bundle = bridge_decode_bundle_request(inst, ptr::null(), 200);
        assert!(bundle.is_null());
        assert_eq!(bridge_decoder_last_error_code(inst), -1);
        assert!(!bridge_decoder_last_error(inst).is_null());

        assert!(bridge_decode_bundle_request(ptr::null_mut(), ptr::null(), 0).is_null());

        bridge_decoder_free(inst);
    }
}

#[test]
fn address_list_through_c_abi() {
    unsafe {
        let inst = bridge_decoder_new();

        let elements = [user_address(7), user_address(8)];
        let call = address_list_call(&elements);
        let list = bridge_decode_address_list(inst, call.as_ptr(), call.len() as u32);
        assert!(!list.is_null());

        let addresses = std::slice::from_raw_parts((*list).addresses, (*list).count as usize);
        assert_eq!(addresses[0].bytes, elements[0]);
        assert_eq!(addresses[1].bytes, elements[1]);
        bridge_free_address_list(list);

        let call = address_list_call(&[[0xb0; 32]]);
        let list = bridge_decode_address_list(inst, call.as_ptr(), call.len() as u32);
        assert!(list.is_null());
        assert_eq!(bridge_decoder_last_error_code(inst), 6);

        let call = address_list_call(&[]);
        let list = bridge_decode_address_list(inst, call.as_ptr(), call.len() as u32);
        assert!(!list.is_null());
        assert_eq!((*list).count, 0);
        assert!((*list).addresses.is_null());
        bridge_free_address_list(list);

        bridge_decoder_free(inst);
    }
}

#[test]
fn single_word_arguments() {
    unsafe {
        let inst = bridge_decoder_new();
        let mut out = FFIWord { bytes: [0; 32] };

        let call = word_call(user_address(3));
        assert_eq!(
            bridge_decode_address(inst, call.as_ptr(), call.len() as u32, &mut out),
            0
        );
        assert_eq!(out.bytes, user_address(3));

        let call = word_call([0xb0; 32]);
        assert_eq!(
            bridge_decode_address(inst, call.as_ptr(), call.len() as u32, &mut out),
            -1
        );
        assert_eq!(bridge_decoder_last_error_code(inst), 6);

        // Raw words are not validated
        assert_eq!(
            bridge_decode_dword(inst, call.as_ptr(), call.len() as u32, &mut out),
            0
        );
        assert_eq!(out.bytes, [0xb0; 32]);

        assert_eq!(bridge_decode_dword(inst, call.as_ptr(), 35, &mut out), -1);
        assert_eq!(bridge_decoder_last_error_code(inst), 1);

        assert_eq!(
            bridge_decode_dword(inst, call.as_ptr(), call.len() as u32, ptr::null_mut()),
            -1
        );

        bridge_decoder_free(inst);
    }
}

#[test]
fn address_validity() {
    unsafe {
        let valid = FFIWord {
            bytes: user_address(0xff),
        };
        let invalid = FFIWord { bytes: [0xa1; 32] };
        assert_eq!(bridge_is_valid_address(&valid), 1);
        assert_eq!(bridge_is_valid_address(&invalid), 0);
        assert_eq!(bridge_is_valid_address(ptr::null()), 0);
    }
}

#[test]
fn presets_and_config() {
    unsafe {
        let strict = bridge_decoder_new_with_preset(DecoderPreset::Strict);
        let legacy = bridge_decoder_new_with_preset(DecoderPreset::Legacy);
        assert_eq!(bridge_decoder_max_list_length(strict), 512);
        assert_eq!(bridge_decoder_max_list_length(legacy), 0);

        let config = DecoderConfigFFI {
            max_list_length: 2,
            enforce_list_cap: true,
        };
        let small = bridge_decoder_new_with_config(&config);
        assert_eq!(bridge_decoder_max_list_length(small), 2);

        let call = BundleCall::sample(3, 1).encode();
        let bundle = bridge_decode_bundle_request(small, call.as_ptr(), call.len() as u32);
        assert!(bundle.is_null());
        assert_eq!(bridge_decoder_last_error_code(small), 4);

        let bundle = bridge_decode_bundle_request(strict, call.as_ptr(), call.len() as u32);
        assert!(!bundle.is_null());
        bridge_free_bundle_request(bundle);

        assert!(bridge_decoder_new_with_config(ptr::null()).is_null());
        assert_eq!(bridge_decoder_max_list_length(ptr::null()), 0);

        bridge_decoder_free(small);
        bridge_decoder_free(legacy);
        bridge_decoder_free(strict);
    }
}
