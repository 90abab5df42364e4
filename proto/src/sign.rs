// Copyright (c) 2024-2025 The Ethvault Developers

//! Signing request / response
//!
//! The device hashes the message with keccak-256 and signs the digest with
//! the private key selected by `(aes_key, slot)`. On display-equipped
//! devices the response is withheld until the user approves the decoded
//! transaction; rejection yields a [`Status::TxRejected`] byte instead.

use encdec::{Decode, DecodeOwned, Encode};
use zeroize::Zeroize;

use crate::{Opcode, Request, Status, WireError, AES_KEY_LEN, MAX_MSG_LEN, SIGNATURE_LEN};

/// Signing request
///
/// The message length is carried big-endian and must be in
/// `1..=`[`MAX_MSG_LEN`]; out-of-range lengths are rejected before any
/// message byte is read.
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
/// |     SLOT      |          MSG_LEN (BE)         |               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+               /
/// /                           MESSAGE                             /
/// /                      (MSG_LEN bytes)                          /
/// |                                                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SignReq<'a> {
    /// Caller-supplied AES-256 blob decryption key
    pub aes_key: [u8; AES_KEY_LEN],
    /// Byte offset of the 32-byte key window in the decrypted blob
    pub slot: u8,
    /// Message to hash and sign, `1..=MAX_MSG_LEN` bytes
    pub message: &'a [u8],
}

/// Fixed header length of a [`SignReq`] (key + slot + length field)
pub const SIGN_REQ_HDR_LEN: usize = AES_KEY_LEN + 1 + 2;

impl<'a> SignReq<'a> {
    /// Create a new [`SignReq`]
    pub fn new(aes_key: [u8; AES_KEY_LEN], slot: u8, message: &'a [u8]) -> Self {
        Self {
            aes_key,
            slot,
            message,
        }
    }
}

impl<'a> Request for SignReq<'a> {
    const OPCODE: Opcode = Opcode::Sign;
}

impl<'a> Encode for SignReq<'a> {
    type Error = WireError;

    fn encode_len(&self) -> Result<usize, Self::Error> {
        Ok(SIGN_REQ_HDR_LEN + self.message.len())
    }

    fn encode(&self, buff: &mut [u8]) -> Result<usize, Self::Error> {
        let n = self.encode_len()?;

        if self.message.is_empty() || self.message.len() > MAX_MSG_LEN {
            return Err(WireError::InvalidMessageLength);
        }
        if buff.len() < n {
            return Err(WireError::InvalidLength);
        }

        buff[..AES_KEY_LEN].copy_from_slice(&self.aes_key);
        buff[AES_KEY_LEN] = self.slot;
        buff[AES_KEY_LEN + 1..SIGN_REQ_HDR_LEN]
            .copy_from_slice(&(self.message.len() as u16).to_be_bytes());
        buff[SIGN_REQ_HDR_LEN..n].copy_from_slice(self.message);

        Ok(n)
    }
}

impl<'a> Decode<'a> for SignReq<'a> {
    type Output = SignReq<'a>;
    type Error = WireError;

    fn decode(buff: &'a [u8]) -> Result<(Self::Output, usize), Self::Error> {
        if buff.len() < SIGN_REQ_HDR_LEN {
            return Err(WireError::InvalidLength);
        }

        let mut aes_key = [0u8; AES_KEY_LEN];
        aes_key.copy_from_slice(&buff[..AES_KEY_LEN]);

        let slot = buff[AES_KEY_LEN];

        let len = u16::from_be_bytes([buff[AES_KEY_LEN + 1], buff[AES_KEY_LEN + 2]]) as usize;
        if len == 0 || len > MAX_MSG_LEN {
            return Err(WireError::InvalidMessageLength);
        }

        let n = SIGN_REQ_HDR_LEN + len;
        if buff.len() < n {
            return Err(WireError::InvalidLength);
        }

        Ok((
            Self {
                aes_key,
                slot,
                message: &buff[SIGN_REQ_HDR_LEN..n],
            },
            n,
        ))
    }
}

/// Signing response
///
/// Signature material: callers holding a decoded [`SignResp`] are expected
/// to [`Zeroize`] it once the signature has been consumed.
///
/// ## Encoding:
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |    STATUS     |                                               |
/// +-+-+-+-+-+-+-+-+                                               /
/// /                          SIGNATURE                            /
/// /                  (64-byte compact r || s)                     /
/// |                                                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |    REC_ID     |
/// +-+-+-+-+-+-+-+-+
/// ```
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SignResp {
    /// Compact `(r, s)` signature
    pub signature: [u8; SIGNATURE_LEN],
    /// Recovery id, `0..=3`
    pub recovery_id: u8,
}

/// Encoded length of a [`SignResp`]
pub const SIGN_RESP_LEN: usize = 1 + SIGNATURE_LEN + 1;

impl SignResp {
    /// Create a new [`SignResp`]
    pub fn new(signature: [u8; SIGNATURE_LEN], recovery_id: u8) -> Self {
        Self {
            signature,
            recovery_id,
        }
    }
}

impl Zeroize for SignResp {
    fn zeroize(&mut self) {
        self.signature.zeroize();
        self.recovery_id.zeroize();
    }
}

impl Encode for SignResp {
    type Error = WireError;

    fn encode_len(&self) -> Result<usize, Self::Error> {
        Ok(SIGN_RESP_LEN)
    }

    fn encode(&self, buff: &mut [u8]) -> Result<usize, Self::Error> {
        if buff.len() < SIGN_RESP_LEN {
            return Err(WireError::InvalidLength);
        }

        buff[0] = Status::Success as u8;
        buff[1..1 + SIGNATURE_LEN].copy_from_slice(&self.signature);
        buff[1 + SIGNATURE_LEN] = self.recovery_id;

        Ok(SIGN_RESP_LEN)
    }
}

impl DecodeOwned for SignResp {
    type Output = Self;
    type Error = WireError;

    fn decode_owned(buff: &[u8]) -> Result<(Self::Output, usize), Self::Error> {
        match Status::parse(buff)? {
            Status::Success => (),
            s => return Err(WireError::Device(s)),
        }

        if buff.len() < SIGN_RESP_LEN {
            return Err(WireError::InvalidLength);
        }

        let mut signature = [0u8; SIGNATURE_LEN];
        signature.copy_from_slice(&buff[1..1 + SIGNATURE_LEN]);

        Ok((
            Self {
                signature,
                recovery_id: buff[1 + SIGNATURE_LEN],
            },
            SIGN_RESP_LEN,
        ))
    }
}
