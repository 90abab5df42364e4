// Copyright (c) 2024-2025 The Ethvault Developers

use encdec::Encode;
use zeroize::Zeroize;

use ethvault_proto::{
    pubkey::PubkeyResp, sign::SignResp, version::VersionResp, Status, WireError, PUBLIC_KEY_LEN,
    SIGNATURE_LEN,
};

/// [`Engine`][super::Engine] outputs (in response to events), encoded to
/// wire responses by the dispatcher.
#[derive(Clone, PartialEq, Debug)]
pub enum Output {
    /// Version / liveness status
    Version {
        status: Status,
    },

    /// Derived public key
    PubKey {
        public_key: [u8; PUBLIC_KEY_LEN],
    },

    /// Completed signature
    Signature {
        signature: [u8; SIGNATURE_LEN],
        recovery_id: u8,
    },

    /// Signature computed but awaiting user approval, no response yet
    Pending,

    /// User rejected the transaction, failure byte only
    Rejected,
}

/// Largest encoded response (status + signature + recovery id)
pub const RESP_BUF_LEN: usize = 1 + SIGNATURE_LEN + 1;

impl Output {
    /// Encode an [`Output`] to a wire response.
    ///
    /// [`Output::Pending`] encodes to nothing: the response is withheld
    /// until the approval gate resolves.
    #[cfg_attr(feature = "noinline", inline(never))]
    pub fn encode(&self, buff: &mut [u8]) -> Result<usize, WireError> {
        match self {
            Output::Version { status } => VersionResp::new(*status).encode(buff),
            Output::PubKey { public_key } => PubkeyResp::new(*public_key).encode(buff),
            Output::Signature {
                signature,
                recovery_id,
            } => SignResp::new(*signature, *recovery_id).encode(buff),
            Output::Pending => Ok(0),
            Output::Rejected => {
                if buff.is_empty() {
                    return Err(WireError::InvalidLength);
                }
                buff[0] = Status::TxRejected as u8;
                Ok(1)
            }
        }
    }
}

impl Zeroize for Output {
    fn zeroize(&mut self) {
        if let Output::Signature {
            signature,
            recovery_id,
        } = self
        {
            signature.zeroize();
            recovery_id.zeroize();
        }
    }
}
