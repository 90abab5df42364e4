// Copyright (c) 2024-2025 The Ethvault Developers

//! Common tests and vectors for ethvault signing devices
//!
//! Provides reference key material, transaction builders and transports
//! for exercising the [engine][ethvault_core::engine] directly or a live
//! device / simulator over its serial protocol. The suite functions in
//! [suite] run against anything implementing the wire protocol, see
//! `src/main.rs` for the CLI runner.

use ethvault_proto::{Status, WireError};

pub mod vectors;


pub mod transport;

pub mod client;

pub mod suite;

/// Test helper errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("wire error: {0}")]
    Wire(WireError),

    #[error("unexpected status: {0}")]
    UnexpectedStatus(Status),

    #[error("value mismatch: {0}")]
    Mismatch(&'static str),
}

impl From<WireError> for Error {
    fn from(e: WireError) -> Self {
        match e {
            WireError::Device(s) => Error::UnexpectedStatus(s),
            _ => Error::Wire(e),
        }
    }
}
