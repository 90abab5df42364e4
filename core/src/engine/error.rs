// Copyright (c) 2024-2025 The Ethvault Developers

use ethvault_proto::Status;

/// [Engine][super::Engine] errors
///
/// Discriminants match the wire [`Status`] taxonomy so every error maps to
/// exactly one response byte.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "thiserror", derive(thiserror::Error))]
#[repr(u8)]
pub enum Error {
    /// Unrecognized command opcode
    #[cfg_attr(feature = "thiserror", error("unknown command"))]
    UnknownCommand = 0x02,

    /// Short read or malformed command framing
    #[cfg_attr(feature = "thiserror", error("wrong data format"))]
    WrongDataFormat = 0x03,

    /// Recovery id outside the legal `0..=3` range
    #[cfg_attr(feature = "thiserror", error("recovery id out of range"))]
    WrongRecoveryId = 0x04,

    /// Key slot offset exceeds the decrypted blob
    #[cfg_attr(feature = "thiserror", error("invalid key slot position"))]
    InvalidPosition = 0x06,

    /// AES key schedule setup failed
    #[cfg_attr(feature = "thiserror", error("key setup failed"))]
    KeySetup = 0x07,

    /// Blob decryption failed
    #[cfg_attr(feature = "thiserror", error("decryption failed"))]
    Decryption = 0x08,

    /// Derived scalar is not a valid secp256k1 private key
    #[cfg_attr(feature = "thiserror", error("public key creation failed"))]
    PubkeyCreate = 0x09,

    /// Public key serialization failed
    #[cfg_attr(feature = "thiserror", error("public key serialization failed"))]
    PubkeySerialize = 0x0a,

    /// Signing operation failed
    #[cfg_attr(feature = "thiserror", error("signing failed"))]
    SignFailed = 0x0b,

    /// Response serialization failed
    #[cfg_attr(feature = "thiserror", error("response serialization failed"))]
    SerializeFailed = 0x0c,

    /// User rejected the transaction
    #[cfg_attr(feature = "thiserror", error("transaction rejected by user"))]
    Rejected = 0x0d,

    /// Message is not a type-2 (EIP-1559) transaction
    #[cfg_attr(feature = "thiserror", error("not a type-2 transaction"))]
    NotType2Tx = 0x0e,

    /// Outer RLP list header is malformed
    #[cfg_attr(feature = "thiserror", error("RLP list parsing failed"))]
    RlpListParse = 0x0f,

    /// Declared RLP list length exceeds the message
    #[cfg_attr(feature = "thiserror", error("RLP list length invalid"))]
    RlpListLength = 0x10,

    /// An RLP field failed to parse
    #[cfg_attr(feature = "thiserror", error("RLP field parsing failed"))]
    RlpFieldParse = 0x11,

    /// A signature is pending approval, command refused
    #[cfg_attr(feature = "thiserror", error("approval pending"))]
    Busy = 0x13,
}

impl Error {
    /// Map an error to its wire status byte
    pub fn status(&self) -> Status {
        match self {
            Error::UnknownCommand => Status::UnknownCommand,
            Error::WrongDataFormat => Status::WrongDataFormat,
            Error::WrongRecoveryId => Status::WrongRecoveryId,
            Error::InvalidPosition => Status::InvalidPosition,
            Error::KeySetup => Status::KeySetup,
            Error::Decryption => Status::Decryption,
            Error::PubkeyCreate => Status::PubkeyCreate,
            Error::PubkeySerialize => Status::PubkeySerialize,
            Error::SignFailed => Status::SignFailed,
            Error::SerializeFailed => Status::SerializeFailed,
            Error::Rejected => Status::TxRejected,
            Error::NotType2Tx => Status::NotType2Tx,
            Error::RlpListParse => Status::RlpListParse,
            Error::RlpListLength => Status::RlpListLength,
            Error::RlpFieldParse => Status::RlpFieldParse,
            Error::Busy => Status::Busy,
        }
    }
}
