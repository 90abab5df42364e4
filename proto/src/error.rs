// Copyright (c) 2024-2025 The Ethvault Developers

use crate::Status;

/// Wire encode / decode errors
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum WireError {
    /// Buffer too short for the expected encoding
    InvalidLength,

    /// Byte value outside the encodable range
    InvalidEncoding,

    /// Message length outside `1..=MAX_MSG_LEN`
    InvalidMessageLength,

    /// Device answered with an error status instead of a payload
    Device(Status),
}

impl From<encdec::Error> for WireError {
    fn from(e: encdec::Error) -> Self {
        match e {
            encdec::Error::Length => WireError::InvalidLength,
            encdec::Error::Utf8 => WireError::InvalidEncoding,
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for WireError {}

impl core::fmt::Display for WireError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            WireError::InvalidLength => write!(f, "buffer too short"),
            WireError::InvalidEncoding => write!(f, "invalid byte encoding"),
            WireError::InvalidMessageLength => write!(f, "message length out of range"),
            WireError::Device(s) => write!(f, "device error status: {s}"),
        }
    }
}
