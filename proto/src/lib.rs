// Copyright (c) 2024-2025 The Ethvault Developers

//! Serial protocol definitions for ethvault signing devices
//!
//! The device speaks a minimal byte-oriented protocol over its serial link:
//! a single opcode byte followed by a fixed or length-prefixed payload, and
//! a single response per request. A response is either the full success
//! payload for the command or exactly one [`Status`] error byte, never a
//! partial payload.
//!
//! Requests and responses use a primitive binary encoding (roughly packed c
//! structures) to keep host implementations trivial on any platform. The
//! only multi-byte integer on the wire is the big-endian message length
//! carried by [`SignReq`][sign::SignReq].
//!
//! | Opcode | Request | Success response |
//! |--------|---------|------------------|
//! | `0x01` [`GetVersion`][Opcode::GetVersion] | none | status byte |
//! | `0x02` [`GetPubkey`][Opcode::GetPubkey] | 32-byte AES key, 1-byte slot | status + 65-byte public key |
//! | `0x03` [`Sign`][Opcode::Sign] | 32-byte AES key, 1-byte slot, 2-byte length, message | status + 64-byte signature + recovery id |

#![no_std]

#[cfg(feature = "std")]
extern crate std;

use num_enum::TryFromPrimitive;

pub mod status;
pub use status::Status;

pub mod version;
pub mod pubkey;
pub mod sign;

mod error;
pub use error::WireError;

/// Protocol version, reported by host tooling
pub const PROTO_VERSION: u8 = 0x01;

/// Maximum message length accepted by [`Sign`][Opcode::Sign], in bytes
pub const MAX_MSG_LEN: usize = 1024;

/// Length of the caller-supplied AES-256 key
pub const AES_KEY_LEN: usize = 32;

/// Length of an uncompressed secp256k1 public key (`0x04 || X || Y`)
pub const PUBLIC_KEY_LEN: usize = 65;

/// Length of a compact `(r, s)` signature
pub const SIGNATURE_LEN: usize = 64;

/// Command opcodes
#[derive(Copy, Clone, Debug, PartialEq, TryFromPrimitive)]
#[repr(u8)]
pub enum Opcode {
    /// Liveness / version probe
    GetVersion = 0x01,

    /// Derive and return an uncompressed public key
    GetPubkey = 0x02,

    /// Sign the keccak-256 hash of a caller-supplied message
    Sign = 0x03,
}

/// Request trait, binding each request body to its [`Opcode`]
pub trait Request {
    const OPCODE: Opcode;
}
