//! Bundle request decoding.
//!
//! A bundle request carries the hash of the source chain block the transfers
//! come from, three parallel lists describing the transfers and three parallel
//! lists holding the relayer signatures split into 32-byte chunks:
//!
//! ```text
//! [selector][block hash]
//! [source tx hashes][recipients][amounts]
//! [signature chunk 1][signature chunk 2][signature chunk 3]
//! ```

use std::fmt;

use revm::primitives::{B256, U256};

use crate::address::Address;
use crate::constants::{
    ADDRESS_SIZE, AMOUNT_SIZE, BUNDLE_REQUEST_MIN_LEN, CALL_OFFSET, DWORD_SIZE, LIST_META_SIZE,
    SIGNATURE_SIZE,
};
use crate::decoder::{ensure_len, parse_dword_from_call, reject, CallDecoder};
use crate::error::DecodeError;

/// Position of the offset pointer of the `index`-th list argument.
const fn list_pointer(index: usize) -> usize {
    CALL_OFFSET + DWORD_SIZE + LIST_META_SIZE * index
}

const SOURCE_TRANSACTIONS: usize = list_pointer(0);
const RECIPIENTS: usize = list_pointer(1);
const AMOUNTS: usize = list_pointer(2);
const SIGNATURE_CHUNK_1: usize = list_pointer(3);
const SIGNATURE_CHUNK_2: usize = list_pointer(4);
const SIGNATURE_CHUNK_3: usize = list_pointer(5);

/// Relayer signature, transmitted as three consecutive 32-byte chunks.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature([u8; SIGNATURE_SIZE]);

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature(0x{})", hex::encode(self.0))
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Signature {
    /// Concatenates three chunks in order.
    pub fn from_chunks(
        first: &[u8; DWORD_SIZE],
        second: &[u8; DWORD_SIZE],
        third: &[u8; DWORD_SIZE],
    ) -> Self {
        let mut bytes = [0u8; SIGNATURE_SIZE];
        bytes[..DWORD_SIZE].copy_from_slice(first);
        bytes[DWORD_SIZE..DWORD_SIZE * 2].copy_from_slice(second);
        bytes[DWORD_SIZE * 2..].copy_from_slice(third);
        Self(bytes)
    }

    /// Raw signature bytes.
    pub const fn as_bytes(&self) -> &[u8; SIGNATURE_SIZE] {
        &self.0
    }
}

/// Single cross-chain transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BridgeTransfer {
    /// Amount to release, decoded from 16 big-endian bytes
    pub amount: U256,
    /// Receiving user address
    pub recipient: Address,
    /// Hash of the transaction on the source chain, used for replay protection
    pub source_transaction_hash: B256,
}

/// Decoded bundle request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleRequestCall {
    /// Source chain block containing the bundled transactions
    pub block_hash: B256,
    /// Transfers in encoding order
    pub transfers: Vec<BridgeTransfer>,
    /// Relayer signatures in encoding order
    pub signatures: Vec<Signature>,
}

fn ensure_same_len<A, B>(first: &[A], other: &[B]) -> Result<(), DecodeError> {
    if first.len() == other.len() {
        Ok(())
    } else {
        Err(DecodeError::LengthMismatch {
            expected: first.len(),
            actual: other.len(),
        })
    }
}

/// Parses a bundle request using the default configuration.
///
/// See [`CallDecoder::parse_bundle_request`].
pub fn parse_bundle_request(call: &[u8]) -> Result<BundleRequestCall, DecodeError> {
    CallDecoder::default().parse_bundle_request(call)
}

impl CallDecoder {
    /// Parses a bundle request.
    ///
    /// The three transfer lists must have the same length, as must the three
    /// signature chunk lists, and every recipient must be a user address. The
    /// number of signatures is not related to the number of transfers here;
    /// that is up to signature verification.
    pub fn parse_bundle_request(&self, call: &[u8]) -> Result<BundleRequestCall, DecodeError> {
        self.bundle_request(call)
            .inspect_err(|error| reject("bundle_request", call, error))
    }

    fn bundle_request(&self, call: &[u8]) -> Result<BundleRequestCall, DecodeError> {
        // Block hash plus pointer and length of four lists
        ensure_len(call, 0, BUNDLE_REQUEST_MIN_LEN)?;

        let block_hash = parse_dword_from_call(call)?;

        let source_transactions = self.read_list::<DWORD_SIZE>(call, SOURCE_TRANSACTIONS)?;
        let recipients = self.read_list::<ADDRESS_SIZE>(call, RECIPIENTS)?;
        let amounts = self.read_list::<AMOUNT_SIZE>(call, AMOUNTS)?;

        ensure_same_len(&recipients, &amounts)?;
        ensure_same_len(&recipients, &source_transactions)?;

        let chunks_1 = self.read_list::<DWORD_SIZE>(call, SIGNATURE_CHUNK_1)?;
        let chunks_2 = self.read_list::<DWORD_SIZE>(call, SIGNATURE_CHUNK_2)?;
        let chunks_3 = self.read_list::<DWORD_SIZE>(call, SIGNATURE_CHUNK_3)?;

        ensure_same_len(&chunks_1, &chunks_2)?;
        ensure_same_len(&chunks_1, &chunks_3)?;

        let signatures = chunks_1
            .iter()
            .zip(&chunks_2)
            .zip(&chunks_3)
            .map(|((first, second), third)| Signature::from_chunks(first, second, third))
            .collect();

        let recipients = recipients
            .into_iter()
            .map(|word| Address::try_from_word(B256::from(word)))
            .collect::<Result<Vec<_>, _>>()?;

        let transfers = amounts
            .iter()
            .zip(recipients)
            .zip(source_transactions)
            .map(|((amount, recipient), source_transaction)| BridgeTransfer {
                amount: U256::from_be_slice(amount),
                recipient,
                source_transaction_hash: B256::from(source_transaction),
            })
            .collect();

        Ok(BundleRequestCall {
            block_hash,
            transfers,
            signatures,
        })
    }
}
