// Copyright (c) 2024-2025 The Ethvault Developers

//! The [Engine] provides the signing functionality required by ethvault
//! devices.
//!
//! This handles [Event] inputs and returns [Output] responses to the
//! caller, see [proto][crate::proto] for the wire protocol / encoding
//! specifications. Platform integration happens through the [Driver] seam
//! (key blob storage) and, on display-equipped builds, the
//! [`approve`][Engine::approve] / [`deny`][Engine::deny] entry points fed
//! by button input.

use heapless::Vec;
use strum::{Display, EnumIter, EnumString};
use zeroize::Zeroize;

use ethvault_proto::{Status, MAX_MSG_LEN, SIGNATURE_LEN};

#[cfg(feature = "confirm")]
use crate::tx::DecodedTransaction;

mod event;
pub use event::Event;

mod output;
pub use output::{Output, RESP_BUF_LEN};

mod error;
pub use error::Error;

pub mod vault;
use vault::KeyBlob;

pub mod crypto;

/// Engine internal state enumeration
#[derive(Copy, Clone, PartialEq, Debug, EnumString, Display, EnumIter)]
pub enum State {
    /// Idle, ready for the next command
    Idle,

    /// Signature computed, transaction pending user approval
    Pending,
}

/// [`Driver`] trait provides platform key storage for [`Engine`] instances
pub trait Driver {
    /// Fetch the encrypted key blob and its CBC IV
    fn key_blob(&self) -> KeyBlob<'_>;
}

impl<T: Driver> Driver for &T {
    fn key_blob(&self) -> KeyBlob<'_> {
        T::key_blob(self)
    }
}

/// [Engine] provides hardware-independent key derivation and signing
pub struct Engine<DRV: Driver> {
    state: State,

    message: Vec<u8, MAX_MSG_LEN>,
    signature: [u8; SIGNATURE_LEN],
    recovery_id: u8,

    #[cfg(feature = "confirm")]
    decoded: Option<DecodedTransaction>,

    drv: DRV,
}

impl<DRV: Driver> Engine<DRV> {
    /// Create a new engine instance with the provided driver
    pub const fn new(drv: DRV) -> Self {
        Self {
            state: State::Idle,
            message: Vec::new(),
            signature: [0u8; SIGNATURE_LEN],
            recovery_id: 0,
            #[cfg(feature = "confirm")]
            decoded: None,
            drv,
        }
    }

    /// Fetch current engine state
    pub fn state(&self) -> State {
        self.state
    }

    /// Handle an incoming event
    #[cfg_attr(feature = "noinline", inline(never))]
    pub fn update(&mut self, evt: &Event) -> Result<Output, Error> {
        #[cfg(feature = "log")]
        log::debug!("event: {:?}", evt);

        match (self.state, evt) {
            // While a signature is pending approval only the approve /
            // reject signals may resolve it; everything else is refused
            (State::Pending, _) => Err(Error::Busy),

            (_, Event::GetVersion) => Ok(Output::Version {
                status: Status::Success,
            }),

            (_, Event::GetPubkey { aes_key, slot }) => self.get_pubkey(aes_key, *slot),

            (_, Event::Sign {
                aes_key,
                slot,
                message,
            }) => self.sign(aes_key, *slot, message),
        }
    }

    #[cfg_attr(feature = "noinline", inline(never))]
    fn get_pubkey(&mut self, aes_key: &[u8; 32], slot: u8) -> Result<Output, Error> {
        let private = vault::derive_private_key(&self.drv.key_blob(), aes_key, slot)?;

        // private key is zeroed on drop, both paths
        let public_key = crypto::public_key_from_private(&private)?;

        Ok(Output::PubKey { public_key })
    }

    #[cfg_attr(feature = "noinline", inline(never))]
    fn sign(&mut self, aes_key: &[u8; 32], slot: u8, message: &[u8]) -> Result<Output, Error> {
        // Framing enforces the length bounds on the wire path, but the
        // engine is also driven directly by tests and the simulator
        if message.is_empty() || message.len() > MAX_MSG_LEN {
            return Err(Error::WrongDataFormat);
        }

        let private = vault::derive_private_key(&self.drv.key_blob(), aes_key, slot)?;

        let hash = crypto::keccak256(message);
        let (mut signature, recovery_id) = crypto::sign_recoverable(&private, &hash)?;
        drop(private);

        #[cfg(feature = "confirm")]
        {
            // Signing has already happened, so a decode failure must scrub
            // the signature before reporting
            let decoded = match DecodedTransaction::decode(message) {
                Ok(v) => v,
                Err(e) => {
                    signature.zeroize();
                    return Err(e);
                }
            };

            self.message.clear();
            if self.message.extend_from_slice(message).is_err() {
                signature.zeroize();
                return Err(Error::WrongDataFormat);
            }

            self.signature = signature;
            signature.zeroize();
            self.recovery_id = recovery_id;
            self.decoded = Some(decoded);
            self.state = State::Pending;

            return Ok(Output::Pending);
        }

        #[cfg(not(feature = "confirm"))]
        {
            let out = Output::Signature {
                signature,
                recovery_id,
            };
            signature.zeroize();

            return Ok(out);
        }
    }

    /// Resolve a pending approval.
    ///
    /// Approve and reject both route through here so exactly one signal can
    /// resolve a given pending signature; the held signature and message
    /// are destroyed on either outcome. Returns `None` when nothing is
    /// pending.
    #[cfg_attr(feature = "noinline", inline(never))]
    pub fn resolve(&mut self, approve: bool) -> Option<Output> {
        if self.state != State::Pending {
            return None;
        }

        let out = match approve {
            true => Output::Signature {
                signature: self.signature,
                recovery_id: self.recovery_id,
            },
            false => Output::Rejected,
        };

        self.scrub();
        self.state = State::Idle;

        Some(out)
    }

    /// Approve the pending transaction, releasing the held signature
    pub fn approve(&mut self) -> Option<Output> {
        self.resolve(true)
    }

    /// Reject the pending transaction, destroying the held signature
    pub fn deny(&mut self) -> Option<Output> {
        self.resolve(false)
    }

    /// Reset engine state, destroying any held material
    pub fn reset(&mut self) {
        self.scrub();
        self.state = State::Idle;
    }

    /// Message under approval, for display rendering
    #[cfg(feature = "confirm")]
    pub fn message(&self) -> Option<&[u8]> {
        match self.state {
            State::Pending => Some(&self.message),
            _ => None,
        }
    }

    /// Decoded transaction under approval, for display rendering
    #[cfg(feature = "confirm")]
    pub fn pending_tx(&self) -> Option<&DecodedTransaction> {
        match self.state {
            State::Pending => self.decoded.as_ref(),
            _ => None,
        }
    }

    /// Zero the held signature and message copy
    fn scrub(&mut self) {
        self.signature.zeroize();
        self.recovery_id = 0;

        self.message.iter_mut().for_each(|b| *b = 0);
        self.message.clear();

        #[cfg(feature = "confirm")]
        {
            self.decoded = None;
        }
    }
}
