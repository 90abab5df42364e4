// Copyright (c) 2024-2025 The Ethvault Developers

//! Public key request / response
//!
//! Derives the private key selected by `(aes_key, slot)` from the device's
//! encrypted key blob and returns the matching uncompressed public key.

use encdec::{DecodeOwned, Encode};

use crate::{Opcode, Request, Status, WireError, AES_KEY_LEN, PUBLIC_KEY_LEN};

/// Public key request
///
/// ## Encoding:
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                                                               |
/// /                           AES_KEY                             /
/// /                       (32-byte AES-256 key)                   /
/// |                                                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |     SLOT      |
/// +-+-+-+-+-+-+-+-+
/// ```
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct PubkeyReq {
    /// Caller-supplied AES-256 blob decryption key
    pub aes_key: [u8; AES_KEY_LEN],
    /// Byte offset of the 32-byte key window in the decrypted blob
    pub slot: u8,
}

/// Encoded length of a [`PubkeyReq`]
pub const PUBKEY_REQ_LEN: usize = AES_KEY_LEN + 1;

impl PubkeyReq {
    /// Create a new [`PubkeyReq`]
    pub fn new(aes_key: [u8; AES_KEY_LEN], slot: u8) -> Self {
        Self { aes_key, slot }
    }
}

impl Request for PubkeyReq {
    const OPCODE: Opcode = Opcode::GetPubkey;
}

impl Encode for PubkeyReq {
    type Error = WireError;

    fn encode_len(&self) -> Result<usize, Self::Error> {
        Ok(PUBKEY_REQ_LEN)
    }

    fn encode(&self, buff: &mut [u8]) -> Result<usize, Self::Error> {
        if buff.len() < PUBKEY_REQ_LEN {
            return Err(WireError::InvalidLength);
        }

        buff[..AES_KEY_LEN].copy_from_slice(&self.aes_key);
        buff[AES_KEY_LEN] = self.slot;

        Ok(PUBKEY_REQ_LEN)
    }
}

impl DecodeOwned for PubkeyReq {
    type Output = Self;
    type Error = WireError;

    fn decode_owned(buff: &[u8]) -> Result<(Self::Output, usize), Self::Error> {
        if buff.len() < PUBKEY_REQ_LEN {
            return Err(WireError::InvalidLength);
        }

        let mut aes_key = [0u8; AES_KEY_LEN];
        aes_key.copy_from_slice(&buff[..AES_KEY_LEN]);

        Ok((
            Self {
                aes_key,
                slot: buff[AES_KEY_LEN],
            },
            PUBKEY_REQ_LEN,
        ))
    }
}

/// Public key response
///
/// ## Encoding:
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |    STATUS     |                                               |
/// +-+-+-+-+-+-+-+-+                                               /
/// /                         PUBLIC_KEY                            /
/// /              (65-byte uncompressed secp256k1 point)           /
/// |                                                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct PubkeyResp {
    /// Uncompressed SEC1 public key, `0x04 || X || Y`
    pub public_key: [u8; PUBLIC_KEY_LEN],
}

/// Encoded length of a [`PubkeyResp`]
pub const PUBKEY_RESP_LEN: usize = 1 + PUBLIC_KEY_LEN;

impl PubkeyResp {
    /// Create a new [`PubkeyResp`]
    pub fn new(public_key: [u8; PUBLIC_KEY_LEN]) -> Self {
        Self { public_key }
    }
}

impl Encode for PubkeyResp {
    type Error = WireError;

    fn encode_len(&self) -> Result<usize, Self::Error> {
        Ok(PUBKEY_RESP_LEN)
    }

    fn encode(&self, buff: &mut [u8]) -> Result<usize, Self::Error> {
        if buff.len() < PUBKEY_RESP_LEN {
            return Err(WireError::InvalidLength);
        }

        buff[0] = Status::Success as u8;
        buff[1..PUBKEY_RESP_LEN].copy_from_slice(&self.public_key);

        Ok(PUBKEY_RESP_LEN)
    }
}

impl DecodeOwned for PubkeyResp {
    type Output = Self;
    type Error = WireError;

    fn decode_owned(buff: &[u8]) -> Result<(Self::Output, usize), Self::Error> {
        match Status::parse(buff)? {
            Status::Success => (),
            s => return Err(WireError::Device(s)),
        }

        if buff.len() < PUBKEY_RESP_LEN {
            return Err(WireError::InvalidLength);
        }

        let mut public_key = [0u8; PUBLIC_KEY_LEN];
        public_key.copy_from_slice(&buff[1..PUBKEY_RESP_LEN]);

        Ok((Self { public_key }, PUBKEY_RESP_LEN))
    }
}
