// Copyright (c) 2024-2025 The Ethvault Developers

//! Version probe, for checking device liveness

use encdec::{DecodeOwned, Encode};

use crate::{Opcode, Request, Status, WireError};

/// Version request. Carries no payload.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct VersionReq;

impl Request for VersionReq {
    const OPCODE: Opcode = Opcode::GetVersion;
}

impl Encode for VersionReq {
    type Error = WireError;

    fn encode_len(&self) -> Result<usize, Self::Error> {
        Ok(0)
    }

    fn encode(&self, _buff: &mut [u8]) -> Result<usize, Self::Error> {
        Ok(0)
    }
}

impl DecodeOwned for VersionReq {
    type Output = Self;
    type Error = WireError;

    fn decode_owned(_buff: &[u8]) -> Result<(Self::Output, usize), Self::Error> {
        Ok((VersionReq, 0))
    }
}

/// Version response
///
/// ## Encoding:
/// ```text
///  0
///  0 1 2 3 4 5 6 7
/// +-+-+-+-+-+-+-+-+
/// |    STATUS     |
/// +-+-+-+-+-+-+-+-+
/// ```
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct VersionResp {
    /// Status byte, [`Status::Success`] on a live device
    pub status: Status,
}

impl VersionResp {
    /// Create a new [`VersionResp`]
    pub fn new(status: Status) -> Self {
        Self { status }
    }
}

impl Encode for VersionResp {
    type Error = WireError;

    fn encode_len(&self) -> Result<usize, Self::Error> {
        Ok(1)
    }

    fn encode(&self, buff: &mut [u8]) -> Result<usize, Self::Error> {
        if buff.is_empty() {
            return Err(WireError::InvalidLength);
        }
        buff[0] = self.status as u8;
        Ok(1)
    }
}

impl DecodeOwned for VersionResp {
    type Output = Self;
    type Error = WireError;

    fn decode_owned(buff: &[u8]) -> Result<(Self::Output, usize), Self::Error> {
        let status = Status::parse(buff)?;
        Ok((Self { status }, 1))
    }
}
