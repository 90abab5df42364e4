// Copyright (c) 2024-2025 The Ethvault Developers

//! Device test suite
//!
//! Runs the protocol-level checks against anything speaking the serial
//! protocol, typically the simulator over TCP. The device must be loaded
//! with the standard mock blob ([`TestDriver::standard`][crate::driver::TestDriver::standard])
//! and, for signing, an approval policy that approves.

use std::io::{Read, Write};

use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use sha3::{Digest, Keccak256};

use ethvault_proto::Status;

use crate::client::Client;
use crate::vectors::{
    build_eip1559, generator_pubkey, TxFields, SLOT_KEY_ONE, TEST_AES_KEY,
};
use crate::Error;

/// Version probe answers a success byte
pub fn version<S: Read + Write>(c: &mut Client<S>) -> Result<(), Error> {
    let status = c.get_version()?;

    match status {
        Status::Success => Ok(()),
        s => Err(Error::UnexpectedStatus(s)),
    }
}

/// Public key for the known slot matches the reference point
pub fn pubkey<S: Read + Write>(c: &mut Client<S>) -> Result<(), Error> {
    let pk = c.get_pubkey(&TEST_AES_KEY, SLOT_KEY_ONE)?;

    if pk != generator_pubkey() {
        return Err(Error::Mismatch("public key"));
    }

    Ok(())
}

/// Signature over a reference transaction is deterministic and recovers to
/// the device's public key
pub fn sign<S: Read + Write>(c: &mut Client<S>) -> Result<(), Error> {
    let tx = build_eip1559(&TxFields::default(), &[]);

    let (sig, rec_id) = c.sign(&TEST_AES_KEY, SLOT_KEY_ONE, &tx)?;
    let (sig2, rec_id2) = c.sign(&TEST_AES_KEY, SLOT_KEY_ONE, &tx)?;

    // RFC6979 nonces: identical request, identical signature
    if sig != sig2 || rec_id != rec_id2 {
        return Err(Error::Mismatch("signature determinism"));
    }

    // recovering the signer from the signature must yield the device key
    let hash = Keccak256::digest(&tx);
    let signature = Signature::from_slice(&sig).map_err(|_| Error::Mismatch("signature"))?;
    let rec_id = RecoveryId::from_byte(rec_id).ok_or(Error::Mismatch("recovery id"))?;

    let recovered = VerifyingKey::recover_from_prehash(hash.as_slice(), &signature, rec_id)
        .map_err(|_| Error::Mismatch("recovery"))?;

    let expected = VerifyingKey::from_sec1_bytes(&generator_pubkey())
        .map_err(|_| Error::Mismatch("reference key"))?;

    if recovered != expected {
        return Err(Error::Mismatch("recovered public key"));
    }

    Ok(())
}

/// Out-of-range slot is refused with `InvalidPosition`
pub fn slot_bounds<S: Read + Write>(c: &mut Client<S>) -> Result<(), Error> {
    match c.get_pubkey(&TEST_AES_KEY, 0xff) {
        Err(Error::UnexpectedStatus(Status::InvalidPosition)) => Ok(()),
        Ok(_) => Err(Error::Mismatch("out-of-range slot accepted")),
        Err(e) => Err(e),
    }
}

/// Non-transaction messages are refused before the approval gate
pub fn sign_rejects_raw_message<S: Read + Write>(c: &mut Client<S>) -> Result<(), Error> {
    match c.sign(&TEST_AES_KEY, SLOT_KEY_ONE, b"not a transaction") {
        Err(Error::UnexpectedStatus(Status::NotType2Tx)) => Ok(()),
        Ok(_) => Err(Error::Mismatch("raw message accepted")),
        Err(e) => Err(e),
    }
}
