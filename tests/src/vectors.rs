// Copyright (c) 2024-2025 The Ethvault Developers

//! Reference key material and transaction builders
//!
//! The mock blob plaintext places well-known private keys at fixed slots so
//! device outputs can be checked byte-for-byte against reference values.

/// AES-256 key used to encrypt the mock blob
pub const TEST_AES_KEY: [u8; 32] = [
    0x60, 0x3d, 0xeb, 0x10, 0x15, 0xca, 0x71, 0xbe, 0x2b, 0x73, 0xae, 0xf0, 0x85, 0x7d, 0x77,
    0x81, 0x1f, 0x35, 0x2c, 0x07, 0x3b, 0x61, 0x08, 0xd7, 0x2d, 0x98, 0x10, 0xa3, 0x09, 0x14,
    0xdf, 0xf4,
];

/// CBC IV used for the mock blob
pub const TEST_IV: [u8; 16] = [
    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e,
    0x0f,
];

/// Mock blob plaintext length
pub const PLAINTEXT_LEN: usize = 128;

/// Slot of [`private_key_one`] in the mock blob
pub const SLOT_KEY_ONE: u8 = 0;

/// Slot of [`private_key_two`] in the mock blob
pub const SLOT_KEY_TWO: u8 = 32;

/// The scalar `1`: its public key is the secp256k1 generator point
pub fn private_key_one() -> [u8; 32] {
    let mut k = [0u8; 32];
    k[31] = 1;
    k
}

/// The scalar `2`
pub fn private_key_two() -> [u8; 32] {
    let mut k = [0u8; 32];
    k[31] = 2;
    k
}

/// Uncompressed secp256k1 generator point: the reference public key for
/// [`private_key_one`]
pub fn generator_pubkey() -> [u8; 65] {
    let mut out = [0u8; 65];
    hex::decode_to_slice(
        "0479be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798\
         483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8",
        &mut out,
    )
    .expect("static vector");
    out
}

/// Mock blob plaintext: known private keys at slots 0 and 32, filler after
pub fn plaintext_blob() -> [u8; PLAINTEXT_LEN] {
    let mut blob = [0u8; PLAINTEXT_LEN];
    blob[..32].copy_from_slice(&private_key_one());
    blob[32..64].copy_from_slice(&private_key_two());
    for (i, b) in blob[64..].iter_mut().enumerate() {
        *b = 0xe0 | (i as u8 & 0x0f);
    }
    blob
}

/// Append one RLP-encoded string item to `out`
pub fn rlp_push_item(out: &mut Vec<u8>, payload: &[u8]) {
    match payload {
        // single byte below 0x80 encodes as itself
        [b] if *b < 0x80 => out.push(*b),
        p if p.len() < 56 => {
            out.push(0x80 + p.len() as u8);
            out.extend_from_slice(p);
        }
        p => {
            let len_bytes = be_trimmed(p.len());
            out.push(0xb7 + len_bytes.len() as u8);
            out.extend_from_slice(&len_bytes);
            out.extend_from_slice(p);
        }
    }
}

/// Wrap already-encoded list contents in an RLP list header
pub fn rlp_wrap_list(contents: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(contents.len() + 4);
    if contents.len() < 56 {
        out.push(0xc0 + contents.len() as u8);
    } else {
        let len_bytes = be_trimmed(contents.len());
        out.push(0xf7 + len_bytes.len() as u8);
        out.extend_from_slice(&len_bytes);
    }
    out.extend_from_slice(contents);
    out
}

fn be_trimmed(len: usize) -> Vec<u8> {
    let be = (len as u64).to_be_bytes();
    let skip = be.iter().take_while(|b| **b == 0).count();
    be[skip..].to_vec()
}

/// Eight reference EIP-1559 field values, chainId through data
pub struct TxFields {
    pub chain_id: Vec<u8>,
    pub nonce: Vec<u8>,
    pub max_priority_fee: Vec<u8>,
    pub max_fee: Vec<u8>,
    pub gas_limit: Vec<u8>,
    pub to: Vec<u8>,
    pub value: Vec<u8>,
    pub data: Vec<u8>,
}

impl Default for TxFields {
    fn default() -> Self {
        Self {
            chain_id: vec![0x01],
            nonce: vec![0x09],
            max_priority_fee: vec![0x3b, 0x9a, 0xca, 0x00],
            max_fee: vec![0x07, 0x73, 0x59, 0x40, 0x00],
            gas_limit: vec![0x52, 0x08],
            to: vec![0x11; 20],
            value: vec![0x0d, 0xe0, 0xb6, 0xb3, 0xa7, 0x64, 0x00, 0x00],
            data: vec![],
        }
    }
}

impl TxFields {
    /// Ordered field payloads
    pub fn ordered(&self) -> [&[u8]; 8] {
        [
            &self.chain_id,
            &self.nonce,
            &self.max_priority_fee,
            &self.max_fee,
            &self.gas_limit,
            &self.to,
            &self.value,
            &self.data,
        ]
    }
}

/// Build a type-2 transaction envelope: `0x02 || rlp([fields.., trailing])`
///
/// `trailing` items (access list, signature values) are appended to the
/// list after the eight standard fields.
pub fn build_eip1559(fields: &TxFields, trailing: &[&[u8]]) -> Vec<u8> {
    let mut contents = Vec::new();
    for f in fields.ordered() {
        rlp_push_item(&mut contents, f);
    }
    for t in trailing {
        rlp_push_item(&mut contents, t);
    }

    let mut tx = vec![0x02];
    tx.extend_from_slice(&rlp_wrap_list(&contents));
    tx
}

/// ABI-encode an ERC-20 `transfer(address,uint256)` call
pub fn erc20_transfer_data(to: &[u8; 20], amount: &[u8; 32]) -> Vec<u8> {
    let mut data = vec![0xa9, 0x05, 0x9c, 0xbb];
    data.extend_from_slice(&[0u8; 12]);
    data.extend_from_slice(to);
    data.extend_from_slice(amount);
    data
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn transfer_data_is_68_bytes() {
        let data = erc20_transfer_data(&[0x22; 20], &[0x01; 32]);
        assert_eq!(data.len(), 68);
        assert_eq!(&data[..4], &[0xa9, 0x05, 0x9c, 0xbb]);
    }

    #[test]
    fn rlp_long_string_header() {
        let mut out = Vec::new();
        rlp_push_item(&mut out, &[0x55; 60]);

        assert_eq!(out[0], 0xb8);
        assert_eq!(out[1], 60);
        assert_eq!(out.len(), 62);
    }
}
