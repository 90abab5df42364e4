// Copyright (c) 2024-2025 The Ethvault Developers

//! Firmware-constant key material and the built-in [Driver]
//!
//! The encrypted key blob and its CBC IV are compiled into the firmware
//! image and never leave it; a caller holding the matching AES key selects
//! 32-byte private-key windows out of the decrypted blob by slot offset.

use const_decoder::Decoder;
use static_assertions::{const_assert, const_assert_eq};

use crate::engine::vault::{KeyBlob, IV_LEN, PRIVATE_KEY_LEN};
use crate::engine::Driver;

/// Built-in AES-256-CBC encrypted key blob, nine blocks
pub const ENCRYPTED_KEY_BLOB: [u8; 144] = Decoder::Hex.decode(
    b"8918fd7902ae8d3132b348b20d06cf425d1ca5cdf307f5f26ec07346449005fa\
      cbda03f5cb31fb510c0cedb0ef0d37b53ec8d7f34c5c7478a545f7d2a304684a\
      9777be1e14456998966f97d32620855118071ff142bf944abab61dd3a8bb8b87\
      e7774a0020b00c9180300717f384ce87022eee1662aeaeb01be88733f4510a13\
      de19ef2fe651101fa4392c48dab8ed5e",
);

/// CBC initialisation vector for [`ENCRYPTED_KEY_BLOB`]
pub const KEY_BLOB_IV: [u8; IV_LEN] =
    Decoder::Hex.decode(b"f74885a632908266b6e9c78200d308cf");

// blob is whole AES blocks and holds at least one key slot
const_assert_eq!(ENCRYPTED_KEY_BLOB.len() % 16, 0);
const_assert!(ENCRYPTED_KEY_BLOB.len() >= PRIVATE_KEY_LEN);

/// Highest valid slot offset for the built-in blob
pub const MAX_SLOT: usize = ENCRYPTED_KEY_BLOB.len() - PRIVATE_KEY_LEN;

/// [Driver] backed by the compiled-in key blob
pub struct StaticDriver;

impl Driver for StaticDriver {
    fn key_blob(&self) -> KeyBlob<'_> {
        KeyBlob {
            ciphertext: &ENCRYPTED_KEY_BLOB,
            iv: &KEY_BLOB_IV,
        }
    }
}
