// Copyright (c) 2024-2025 The Ethvault Developers

//! Host-side protocol client
//!
//! Speaks the serial protocol over any [`Read`] + [`Write`] byte stream
//! (TCP to the simulator, a serial port to real hardware).

use std::io::{Read, Write};

use encdec::{DecodeOwned, Encode};
use zeroize::Zeroize;

use ethvault_proto::{
    pubkey::{PubkeyReq, PubkeyResp, PUBKEY_RESP_LEN},
    sign::{SignReq, SignResp, SIGN_RESP_LEN},
    version::VersionResp,
    Request, Status, PUBLIC_KEY_LEN, SIGNATURE_LEN,
};

use crate::Error;

/// Protocol client over a byte stream
pub struct Client<S> {
    stream: S,
}

impl<S: Read + Write> Client<S> {
    pub fn new(stream: S) -> Self {
        Self { stream }
    }

    /// Probe device liveness
    pub fn get_version(&mut self) -> Result<Status, Error> {
        self.send(&ethvault_proto::version::VersionReq)?;

        let mut resp = [0u8; 1];
        self.stream.read_exact(&mut resp)?;

        let (v, _) = VersionResp::decode_owned(&resp)?;
        Ok(v.status)
    }

    /// Request the uncompressed public key for `(aes_key, slot)`
    pub fn get_pubkey(
        &mut self,
        aes_key: &[u8; 32],
        slot: u8,
    ) -> Result<[u8; PUBLIC_KEY_LEN], Error> {
        self.send(&PubkeyReq::new(*aes_key, slot))?;

        let resp = self.read_response(PUBKEY_RESP_LEN)?;
        let (v, _) = PubkeyResp::decode_owned(&resp)?;

        Ok(v.public_key)
    }

    /// Request a signature over `message`. On display devices this blocks
    /// until the user resolves the approval prompt.
    pub fn sign(
        &mut self,
        aes_key: &[u8; 32],
        slot: u8,
        message: &[u8],
    ) -> Result<([u8; SIGNATURE_LEN], u8), Error> {
        self.send(&SignReq::new(*aes_key, slot, message))?;

        let resp = self.read_response(SIGN_RESP_LEN)?;
        let (mut v, _) = SignResp::decode_owned(&resp)?;

        let out = (v.signature, v.recovery_id);
        v.zeroize();

        Ok(out)
    }

    /// Encode and send one request: opcode byte, then the body
    fn send<R: Request + Encode>(&mut self, req: &R) -> Result<(), Error>
    where
        Error: From<<R as Encode>::Error>,
    {
        let mut body = vec![0u8; req.encode_len()?];
        let n = req.encode(&mut body)?;

        self.stream.write_all(&[R::OPCODE as u8])?;
        self.stream.write_all(&body[..n])?;
        self.stream.flush()?;

        body.zeroize();

        Ok(())
    }

    /// Read a response: a single error byte, or `full_len` bytes when the
    /// leading status is [`Status::Success`]
    fn read_response(&mut self, full_len: usize) -> Result<Vec<u8>, Error> {
        let mut status = [0u8; 1];
        self.stream.read_exact(&mut status)?;

        let mut resp = vec![0u8; full_len];
        resp[0] = status[0];

        if status[0] == Status::Success as u8 {
            self.stream.read_exact(&mut resp[1..])?;
        } else {
            resp.truncate(1);
        }

        Ok(resp)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;

    // Read/Write shim over separate in/out buffers
    struct Loopback {
        rx: Cursor<Vec<u8>>,
        tx: Vec<u8>,
    }

    impl Read for Loopback {
        fn read(&mut self, buff: &mut [u8]) -> std::io::Result<usize> {
            self.rx.read(buff)
        }
    }

    impl Write for Loopback {
        fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
            self.tx.write(data)
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn version_request_frames_opcode() {
        let lb = Loopback {
            rx: Cursor::new(vec![Status::Success as u8]),
            tx: Vec::new(),
        };

        let mut c = Client::new(lb);
        let s = c.get_version().unwrap();

        assert_eq!(s, Status::Success);
        assert_eq!(c.stream.tx, vec![0x01]);
    }

    #[test]
    fn error_byte_surfaces_as_status() {
        let lb = Loopback {
            rx: Cursor::new(vec![Status::InvalidPosition as u8]),
            tx: Vec::new(),
        };

        let mut c = Client::new(lb);
        let err = c.get_pubkey(&[0u8; 32], 99).unwrap_err();

        match err {
            Error::UnexpectedStatus(Status::InvalidPosition) => (),
            e => panic!("unexpected error: {e:?}"),
        }
    }
}
