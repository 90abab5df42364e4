// Copyright (c) 2024-2025 The Ethvault Developers

//! Canonical status / error byte taxonomy
//!
//! Every response leads with one of these bytes. Error responses consist of
//! the byte alone; success responses follow [`Status::Success`] with the
//! command's payload.

use num_enum::TryFromPrimitive;
use strum::{Display, EnumIter, EnumString};

/// Response status byte
#[derive(Copy, Clone, PartialEq, Debug, Display, EnumString, EnumIter, TryFromPrimitive)]
#[repr(u8)]
pub enum Status {
    /// Operation completed successfully
    Success = 0x01,

    /// Unrecognized command opcode
    UnknownCommand = 0x02,

    /// Input data framing is incorrect (short read, bad length)
    WrongDataFormat = 0x03,

    /// Recovery id is out of the valid `0..=3` range
    WrongRecoveryId = 0x04,

    /// Required parameter missing or empty
    InvalidParams = 0x05,

    /// Key slot offset exceeds the decrypted blob
    InvalidPosition = 0x06,

    /// Failed to set up the decryption key schedule
    KeySetup = 0x07,

    /// Decryption operation failed
    Decryption = 0x08,

    /// Failed to create a public key from the derived scalar
    PubkeyCreate = 0x09,

    /// Failed to serialize the public key
    PubkeySerialize = 0x0a,

    /// Failed to create a signature
    SignFailed = 0x0b,

    /// Failed to serialize the signature
    SerializeFailed = 0x0c,

    /// Transaction was rejected by the user
    TxRejected = 0x0d,

    /// Message is not a type-2 (EIP-1559) transaction
    NotType2Tx = 0x0e,

    /// Failed to parse the outer RLP list header
    RlpListParse = 0x0f,

    /// Declared RLP list length exceeds the message
    RlpListLength = 0x10,

    /// Failed to parse an RLP field
    RlpFieldParse = 0x11,

    /// Transaction data is not an ERC-20 transfer
    NotErc20Transfer = 0x12,

    /// A signature is pending approval; command refused
    Busy = 0x13,
}

impl Status {
    /// Read a leading status byte from a response buffer
    pub fn parse(buff: &[u8]) -> Result<Self, crate::WireError> {
        let b = *buff.first().ok_or(crate::WireError::InvalidLength)?;
        Self::try_from(b).map_err(|_| crate::WireError::InvalidEncoding)
    }
}
