// Copyright (c) 2024-2025 The Ethvault Developers

//! Key vault: AES-256-CBC decryption of the built-in key blob and
//! extraction of per-slot private keys.
//!
//! The blob is a fixed ciphertext compiled into the firmware together with
//! its CBC IV; it is never transmitted or mutated. The caller supplies the
//! AES key over the wire for every privileged command, and a slot offset
//! selecting which 32-byte window of the decrypted blob acts as the private
//! key. The decrypted scratch buffer is zeroed on every exit path.

use aes::cipher::{block_padding::NoPadding, BlockDecryptMut, KeyIvInit};
use zeroize::Zeroize;

use super::Error;

/// CBC initialisation vector length
pub const IV_LEN: usize = 16;

/// Derived private key length
pub const PRIVATE_KEY_LEN: usize = 32;

/// Maximum encrypted blob length supported by the vault
pub const MAX_BLOB_LEN: usize = 256;

type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Encrypted key blob reference, supplied through the
/// [Driver][super::Driver] seam.
#[derive(Copy, Clone, Debug)]
pub struct KeyBlob<'a> {
    /// AES-256-CBC ciphertext, a whole number of blocks
    pub ciphertext: &'a [u8],
    /// Fixed CBC initialisation vector
    pub iv: &'a [u8; IV_LEN],
}

/// Derived 32-byte secp256k1 private key. Zeroed on drop.
pub struct PrivateKey([u8; PRIVATE_KEY_LEN]);

impl PrivateKey {
    fn from_window(window: &[u8]) -> Self {
        let mut k = [0u8; PRIVATE_KEY_LEN];
        k.copy_from_slice(window);
        Self(k)
    }

    /// Raw scalar bytes
    pub fn as_bytes(&self) -> &[u8; PRIVATE_KEY_LEN] {
        &self.0
    }
}

impl Zeroize for PrivateKey {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl core::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        // key material stays out of logs
        write!(f, "PrivateKey(..)")
    }
}

/// Decrypt the key blob with the caller's AES key and extract the 32-byte
/// private key window at `slot`.
///
/// Decryption failures are reported before the slot is inspected; an
/// out-of-range slot is a hard error, never a clamp. The caller is
/// responsible for zeroing `aes_key` once this returns, success or failure.
#[cfg_attr(feature = "noinline", inline(never))]
pub fn derive_private_key(
    blob: &KeyBlob<'_>,
    aes_key: &[u8; 32],
    slot: u8,
) -> Result<PrivateKey, Error> {
    let cipher =
        Aes256CbcDec::new_from_slices(aes_key, blob.iv).map_err(|_| Error::KeySetup)?;

    if blob.ciphertext.len() > MAX_BLOB_LEN {
        return Err(Error::Decryption);
    }

    let mut plain = [0u8; MAX_BLOB_LEN];
    let n = blob.ciphertext.len();
    plain[..n].copy_from_slice(blob.ciphertext);

    // Raw blocks, no padding: plaintext length equals ciphertext length
    if cipher.decrypt_padded_mut::<NoPadding>(&mut plain[..n]).is_err() {
        plain.zeroize();
        return Err(Error::Decryption);
    }

    let slot = slot as usize;
    if slot + PRIVATE_KEY_LEN > n {
        plain.zeroize();
        return Err(Error::InvalidPosition);
    }

    let key = PrivateKey::from_window(&plain[slot..slot + PRIVATE_KEY_LEN]);
    plain.zeroize();

    Ok(key)
}
