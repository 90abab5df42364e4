// Copyright (c) 2024-2025 The Ethvault Developers

//! Crypto primitive wiring: keccak-256 hashing, secp256k1 public key
//! derivation and deterministic recoverable ECDSA signing.
//!
//! Signing uses RFC6979 nonce derivation, so a given `(key, hash)` pair
//! always yields the same signature.

use k256::{ecdsa::SigningKey, elliptic_curve::sec1::ToEncodedPoint};
use sha3::{Digest, Keccak256};

use ethvault_proto::{PUBLIC_KEY_LEN, SIGNATURE_LEN};

use super::{vault::PrivateKey, Error};

/// Keccak-256 digest length
pub const MESSAGE_HASH_LEN: usize = 32;

/// Compute the keccak-256 digest of a message
pub fn keccak256(message: &[u8]) -> [u8; MESSAGE_HASH_LEN] {
    let mut hasher = Keccak256::new();
    hasher.update(message);
    hasher.finalize().into()
}

/// Derive the uncompressed SEC1 public key (`0x04 || X || Y`) for a private
/// key. Fails if the scalar is zero or not below the curve order.
#[cfg_attr(feature = "noinline", inline(never))]
pub fn public_key_from_private(private: &PrivateKey) -> Result<[u8; PUBLIC_KEY_LEN], Error> {
    let signing_key =
        SigningKey::from_slice(private.as_bytes()).map_err(|_| Error::PubkeyCreate)?;

    let point = signing_key.verifying_key().to_encoded_point(false);
    let bytes = point.as_bytes();
    if bytes.len() != PUBLIC_KEY_LEN {
        return Err(Error::PubkeySerialize);
    }

    let mut public_key = [0u8; PUBLIC_KEY_LEN];
    public_key.copy_from_slice(bytes);

    Ok(public_key)
}

/// Sign a 32-byte message hash, returning the compact `(r, s)` signature
/// and the recovery id.
///
/// The recovery id is logically in `0..=3` but travels in a full wire byte;
/// anything outside that range is rejected before transmission.
#[cfg_attr(feature = "noinline", inline(never))]
pub fn sign_recoverable(
    private: &PrivateKey,
    hash: &[u8; MESSAGE_HASH_LEN],
) -> Result<([u8; SIGNATURE_LEN], u8), Error> {
    let signing_key =
        SigningKey::from_slice(private.as_bytes()).map_err(|_| Error::SignFailed)?;

    let (signature, recovery_id) = signing_key
        .sign_prehash_recoverable(hash)
        .map_err(|_| Error::SignFailed)?;

    let mut compact = [0u8; SIGNATURE_LEN];
    compact.copy_from_slice(signature.to_bytes().as_slice());

    let recovery_id = recovery_id.to_byte();
    if recovery_id > 3 {
        return Err(Error::WrongRecoveryId);
    }

    Ok((compact, recovery_id))
}
