// Copyright (c) 2024-2025 The Ethvault Developers

use encdec::Decode;
use zeroize::Zeroize;

use ethvault_proto::{pubkey::PubkeyReq, sign::SignReq, Opcode, WireError, AES_KEY_LEN};

use super::Error;

/// [`Engine`][super::Engine] input events, decoded from request payloads
#[derive(Clone, PartialEq)]
pub enum Event<'a> {
    /// Liveness / version probe
    GetVersion,

    /// Derive and return a public key
    GetPubkey {
        aes_key: [u8; AES_KEY_LEN],
        slot: u8,
    },

    /// Hash and sign a message
    Sign {
        aes_key: [u8; AES_KEY_LEN],
        slot: u8,
        message: &'a [u8],
    },
}

/// Helper for decoding request payloads to events
fn decode_event<'a, T>(buff: &'a [u8]) -> Result<Event<'a>, Error>
where
    T: Decode<'a, Error = WireError>,
    Event<'a>: From<T::Output>,
{
    T::decode(buff)
        .map(|(v, _n)| Event::from(v))
        .map_err(|_| Error::WrongDataFormat)
}

impl<'a> Event<'a> {
    /// Parse an incoming request payload to an engine event
    #[cfg_attr(feature = "noinline", inline(never))]
    pub fn parse(opcode: Opcode, buff: &'a [u8]) -> Result<Self, Error> {
        match opcode {
            Opcode::GetVersion => Ok(Event::GetVersion),
            Opcode::GetPubkey => decode_event::<PubkeyReq>(buff),
            Opcode::Sign => decode_event::<SignReq>(buff),
        }
    }
}

impl<'a> From<PubkeyReq> for Event<'a> {
    fn from(r: PubkeyReq) -> Self {
        Event::GetPubkey {
            aes_key: r.aes_key,
            slot: r.slot,
        }
    }
}

impl<'a> From<SignReq<'a>> for Event<'a> {
    fn from(r: SignReq<'a>) -> Self {
        Event::Sign {
            aes_key: r.aes_key,
            slot: r.slot,
            message: r.message,
        }
    }
}

impl Zeroize for Event<'_> {
    fn zeroize(&mut self) {
        match self {
            Event::GetVersion => (),
            Event::GetPubkey { aes_key, slot } => {
                aes_key.zeroize();
                slot.zeroize();
            }
            Event::Sign { aes_key, slot, .. } => {
                aes_key.zeroize();
                slot.zeroize();
            }
        }
    }
}

// Events carry the wire AES key, keep it out of logs
impl core::fmt::Debug for Event<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Event::GetVersion => write!(f, "GetVersion"),
            Event::GetPubkey { slot, .. } => write!(f, "GetPubkey {{ slot: {slot} }}"),
            Event::Sign { slot, message, .. } => {
                write!(f, "Sign {{ slot: {}, message: {} bytes }}", slot, message.len())
            }
        }
    }
}
