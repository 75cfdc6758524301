//! User-class bridge addresses.

use std::fmt;

use revm::primitives::B256;

use crate::constants::{ADDRESS_HEADER, ADDRESS_SIZE};
use crate::error::DecodeError;

/// Returns `true` if `word` is a 32-byte user-class address (starts with `0xa0`).
///
/// No other byte is constrained. Enforcing the header means only user accounts
/// can become ring members or transfer recipients.
pub fn is_valid_address(word: &[u8]) -> bool {
    word.len() == ADDRESS_SIZE && word[0] == ADDRESS_HEADER
}

/// 32-byte word known to carry the user address header.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address(B256);

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl TryFrom<B256> for Address {
    type Error = DecodeError;

    fn try_from(word: B256) -> Result<Self, Self::Error> {
        Self::try_from_word(word)
    }
}

impl From<Address> for B256 {
    fn from(address: Address) -> Self {
        address.0
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        self.0.as_slice()
    }
}

impl Address {
    /// Validates `word` as a user address.
    pub fn try_from_word(word: B256) -> Result<Self, DecodeError> {
        if is_valid_address(word.as_slice()) {
            Ok(Self(word))
        } else {
            Err(DecodeError::InvalidAddress { header: word[0] })
        }
    }

    /// Underlying word.
    pub const fn as_word(&self) -> &B256 {
        &self.0
    }

    /// Raw bytes.
    pub fn to_bytes(self) -> [u8; ADDRESS_SIZE] {
        self.0 .0
    }
}
