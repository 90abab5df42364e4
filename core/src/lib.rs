// Copyright (c) 2024-2025 The Ethvault Developers

//! Ethvault hardware signer core
//!
//! This provides a common [Engine][engine] supporting key derivation and
//! transaction signing for execution on serial-attached signing devices.
//!
//! Interactions with the [Engine][engine] are performed via
//! [Event][engine::Event]s and [Output][engine::Output]s; see
//! [ethvault_proto] for the wire protocol and encodings. The
//! [dispatch] module connects the engine to a byte [Transport][dispatch::Transport],
//! applying the per-command framing and the secure-erase discipline.
//!
//! ## Operations
//!
//! - `GET_VERSION` probes device liveness, answering a single status byte.
//! - `GET_PUBKEY` decrypts the built-in key blob with the caller's AES key,
//!   extracts the 32-byte private key at the requested slot and returns the
//!   matching uncompressed public key.
//! - `SIGN` derives a private key the same way, hashes the caller's message
//!   with keccak-256 and produces a deterministic recoverable ECDSA
//!   signature. With the `confirm` feature (display-equipped devices) the
//!   message is decoded as an EIP-1559 transaction and the response is
//!   withheld until the user approves; rejection scrubs the signature and
//!   answers a single failure byte.
//!
//! Every buffer holding an AES key, a derived private key or a pending
//! signature is zeroed on all exit paths, error paths included.

#![cfg_attr(not(feature = "std"), no_std)]

pub use ethvault_proto as proto;

pub mod consts;

pub mod engine;

pub mod rlp;

pub mod tx;

pub mod dispatch;
