//! Builds bridge call data for tests.

#![allow(dead_code)]

pub const SELECTOR: [u8; 4] = [0x1a, 0x2b, 0x3c, 0x4d];

/// Size of the fixed head of a bundle request after the selector: the block
/// hash and six list pointers.
const BUNDLE_HEAD_LEN: usize = 32 + 16 * 6;

pub fn meta(value: u128) -> [u8; 16] {
    value.to_be_bytes()
}

pub fn user_address(seed: u8) -> [u8; 32] {
    let mut address = [seed; 32];
    address[0] = 0xa0;
    address
}

pub fn amount(value: u128) -> [u8; 16] {
    value.to_be_bytes()
}

/// Plain field values of a bundle request, encoded by [`BundleCall::encode`].
#[derive(Debug, Clone, Default)]
pub struct BundleCall {
    pub block_hash: [u8; 32],
    pub source_transactions: Vec<[u8; 32]>,
    pub recipients: Vec<[u8; 32]>,
    pub amounts: Vec<[u8; 16]>,
    pub signature_chunks: [Vec<[u8; 32]>; 3],
}

impl BundleCall {
    /// Bundle of `transfers` transfers signed by `signers` relayers.
    pub fn sample(transfers: usize, signers: usize) -> Self {
        let mut call = Self {
            block_hash: [0xbb; 32],
            ..Self::default()
        };

        for i in 0..transfers {
            let i = i as u8;
            call.source_transactions.push([0x50 + i; 32]);
            call.recipients.push(user_address(i));
            call.amounts.push(amount(1_000 * (u128::from(i) + 1)));
        }

        for i in 0..signers {
            let i = i as u8;
            call.signature_chunks[0].push([0x10 + i; 32]);
            call.signature_chunks[1].push([0x20 + i; 32]);
            call.signature_chunks[2].push([0x30 + i; 32]);
        }

        call
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut head = SELECTOR.to_vec();
        head.extend_from_slice(&self.block_hash);
        let mut tail = Vec::new();

        let mut push_list = |elements: Vec<&[u8]>, head: &mut Vec<u8>| {
            let pointer = BUNDLE_HEAD_LEN + tail.len();
            head.extend_from_slice(&meta(pointer as u128));
            tail.extend_from_slice(&meta(elements.len() as u128));
            for element in elements {
                tail.extend_from_slice(element);
            }
        };

        push_list(slices(&self.source_transactions), &mut head);
        push_list(slices(&self.recipients), &mut head);
        push_list(slices(&self.amounts), &mut head);
        for chunks in &self.signature_chunks {
            push_list(slices(chunks), &mut head);
        }

        head.extend_from_slice(&tail);
        head
    }
}

fn slices<const N: usize>(elements: &[[u8; N]]) -> Vec<&[u8]> {
    elements.iter().map(|element| element.as_slice()).collect()
}

/// Selector followed by a single list of `elements`.
pub fn address_list_call(elements: &[[u8; 32]]) -> Vec<u8> {
    let mut call = SELECTOR.to_vec();
    call.extend_from_slice(&meta(16));
    call.extend_from_slice(&meta(elements.len() as u128));
    for element in elements {
        call.extend_from_slice(element);
    }
    call
}

/// Selector followed by a single word.
pub fn word_call(word: [u8; 32]) -> Vec<u8> {
    let mut call = SELECTOR.to_vec();
    call.extend_from_slice(&word);
    call
}
