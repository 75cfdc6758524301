//! Layout constants of bridge contract call data.

/// Bytes taken by the function selector at the start of every call.
pub const CALL_OFFSET: usize = 4;

/// Size of a scalar argument word.
pub const DWORD_SIZE: usize = 32;

/// Size of an encoded address.
pub const ADDRESS_SIZE: usize = 32;

/// Size of an encoded transfer amount.
pub const AMOUNT_SIZE: usize = 16;

/// Size of a "meta" field used to describe lists.
///
/// There are two kinds: an offset pointing at the list (relative to
/// [`CALL_OFFSET`]) and the length stored at that location. Both are 16 bytes,
/// but only values that fit into a non-negative 32-bit signed integer are
/// accepted.
pub const LIST_META_SIZE: usize = 16;

/// Largest value a meta field may hold.
pub const META_VALUE_MAX: u32 = i32::MAX as u32;

/// Default upper bound on the number of elements in a decoded list.
///
/// A token transfer costs roughly 30k-50k gas, so 512 transfers already exceed
/// a typical block gas limit.
pub const BUNDLE_LIST_SIZE_MAX: u32 = 512;

/// First byte of every user-class address.
pub const ADDRESS_HEADER: u8 = 0xa0;

/// Number of 32-byte chunks a signature is split into on the wire.
pub const SIGNATURE_CHUNKS: usize = 3;

/// Size of a reassembled signature.
pub const SIGNATURE_SIZE: usize = DWORD_SIZE * SIGNATURE_CHUNKS;

/// Shortest call that can hold a bundle request: the block hash followed by
/// the offset and length meta pairs of four lists.
pub const BUNDLE_REQUEST_MIN_LEN: usize = CALL_OFFSET + DWORD_SIZE + LIST_META_SIZE * 2 * 4;

/// Shortest call that can hold a single list argument.
pub const LIST_CALL_MIN_LEN: usize = CALL_OFFSET + LIST_META_SIZE * 2;
