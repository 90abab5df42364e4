// Copyright (c) 2024-2025 The Ethvault Developers

//! Command dispatcher: reads framed commands from a [Transport] and drives
//! the [Engine], enforcing per-opcode framing and the secure-erase
//! discipline around every command.
//!
//! One poll handles at most one complete command. Transport reads block
//! until the requested bytes arrive or the link's read timeout elapses; a
//! short read aborts the in-flight command with a single
//! [`WrongDataFormat`][Status::WrongDataFormat] byte, there is no
//! partial-command resumption across polls. Responses are all-or-nothing:
//! the full success payload or exactly one error byte.

use zeroize::Zeroize;

use ethvault_proto::{
    pubkey::PUBKEY_REQ_LEN, sign::SIGN_REQ_HDR_LEN, Opcode, Status, AES_KEY_LEN, MAX_MSG_LEN,
};

use crate::engine::{Driver, Engine, Error, Event, Output, State, RESP_BUF_LEN};

/// Byte transport abstraction over the serial link
pub trait Transport {
    type Error: core::fmt::Debug;

    /// Read up to `buff.len()` bytes, blocking until they arrive or the
    /// transport's read timeout elapses. Returns the number of bytes read;
    /// fewer than requested constitutes a short read.
    fn read(&mut self, buff: &mut [u8]) -> Result<usize, Self::Error>;

    /// Write the whole buffer
    fn write_all(&mut self, data: &[u8]) -> Result<(), Self::Error>;
}

/// Staging capacity for one command payload: AES key, slot, length field
/// and a maximum-size message
pub const CMD_BUF_LEN: usize = AES_KEY_LEN + 1 + 2 + MAX_MSG_LEN;

static_assertions::const_assert_eq!(CMD_BUF_LEN, SIGN_REQ_HDR_LEN + MAX_MSG_LEN);
static_assertions::const_assert!(PUBKEY_REQ_LEN <= CMD_BUF_LEN);

/// Staging buffer for one in-flight command.
///
/// Holds the wire copy of the caller's AES key and message; zeroed by the
/// dispatcher after every command, success or failure.
pub struct CommandBuffer {
    buff: [u8; CMD_BUF_LEN],
}

impl CommandBuffer {
    pub const fn new() -> Self {
        Self {
            buff: [0u8; CMD_BUF_LEN],
        }
    }

    /// Staged bytes, exposed for inspection in tests
    pub fn as_bytes(&self) -> &[u8] {
        &self.buff
    }
}

impl Default for CommandBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Zeroize for CommandBuffer {
    fn zeroize(&mut self) {
        self.buff.zeroize();
    }
}

/// Poll the transport for one command and execute it, writing the response
/// (or deferring it to the approval gate). Returns `true` if a command was
/// handled this iteration.
#[cfg_attr(feature = "noinline", inline(never))]
pub fn poll<T, DRV>(
    engine: &mut Engine<DRV>,
    transport: &mut T,
    buff: &mut CommandBuffer,
) -> Result<bool, T::Error>
where
    T: Transport,
    DRV: Driver,
{
    // at most one opcode per loop iteration
    let mut opcode = [0u8; 1];
    if transport.read(&mut opcode)? == 0 {
        return Ok(false);
    }

    let r = execute(engine, transport, buff, opcode[0]);

    // the staging buffer held the AES key and message; scrub it before
    // surfacing any transport error
    buff.zeroize();
    let r = r?;

    match r {
        // response withheld until the approval gate resolves
        Ok(Output::Pending) => (),
        Ok(mut output) => respond(transport, &mut output)?,
        Err(e) => {
            #[cfg(feature = "log")]
            log::warn!("command 0x{:02x} failed: {:?}", opcode[0], e);

            transport.write_all(&[e.status() as u8])?;
        }
    }

    Ok(true)
}

/// Resolve a pending approval, emitting the deferred SIGN response: the
/// full signature payload on approve, a single
/// [`TxRejected`][Status::TxRejected] byte on reject. Returns `true` if a
/// pending signature was resolved.
#[cfg_attr(feature = "noinline", inline(never))]
pub fn resolve_approval<T, DRV>(
    engine: &mut Engine<DRV>,
    transport: &mut T,
    approve: bool,
) -> Result<bool, T::Error>
where
    T: Transport,
    DRV: Driver,
{
    let mut output = match engine.resolve(approve) {
        Some(o) => o,
        None => return Ok(false),
    };

    respond(transport, &mut output)?;

    Ok(true)
}

/// Read the command payload for `opcode` and run it through the engine
fn execute<T, DRV>(
    engine: &mut Engine<DRV>,
    transport: &mut T,
    buff: &mut CommandBuffer,
    opcode: u8,
) -> Result<Result<Output, Error>, T::Error>
where
    T: Transport,
    DRV: Driver,
{
    // refuse everything while a signature is pending, before consuming
    // any payload bytes
    if engine.state() == State::Pending {
        return Ok(Err(Error::Busy));
    }

    let opcode = match Opcode::try_from(opcode) {
        Ok(v) => v,
        Err(_) => return Ok(Err(Error::UnknownCommand)),
    };

    let n = match opcode {
        Opcode::GetVersion => 0,

        Opcode::GetPubkey => {
            if !read_exact(transport, &mut buff.buff[..PUBKEY_REQ_LEN])? {
                return Ok(Err(Error::WrongDataFormat));
            }
            PUBKEY_REQ_LEN
        }

        Opcode::Sign => {
            // fixed header: AES key, slot, big-endian message length
            if !read_exact(transport, &mut buff.buff[..SIGN_REQ_HDR_LEN])? {
                return Ok(Err(Error::WrongDataFormat));
            }

            let len = u16::from_be_bytes([
                buff.buff[SIGN_REQ_HDR_LEN - 2],
                buff.buff[SIGN_REQ_HDR_LEN - 1],
            ]) as usize;

            // bounds are enforced before a single message byte is read
            if len == 0 || len > MAX_MSG_LEN {
                return Ok(Err(Error::WrongDataFormat));
            }

            if !read_exact(
                transport,
                &mut buff.buff[SIGN_REQ_HDR_LEN..SIGN_REQ_HDR_LEN + len],
            )? {
                return Ok(Err(Error::WrongDataFormat));
            }

            SIGN_REQ_HDR_LEN + len
        }
    };

    let mut evt = match Event::parse(opcode, &buff.buff[..n]) {
        Ok(v) => v,
        Err(e) => return Ok(Err(e)),
    };

    let r = engine.update(&evt);

    // the event carried its own copy of the AES key
    evt.zeroize();

    Ok(r)
}

/// Encode and transmit an output, zeroing the response buffer and the
/// output afterwards
fn respond<T: Transport>(transport: &mut T, output: &mut Output) -> Result<(), T::Error> {
    let mut resp = [0u8; RESP_BUF_LEN];

    let r = match output.encode(&mut resp) {
        Ok(0) => Ok(()),
        Ok(n) => transport.write_all(&resp[..n]),
        Err(_) => transport.write_all(&[Status::SerializeFailed as u8]),
    };

    resp.zeroize();
    output.zeroize();

    r
}

/// Fill `buff` from the transport, reporting a short read as `false`
fn read_exact<T: Transport>(transport: &mut T, buff: &mut [u8]) -> Result<bool, T::Error> {
    let mut n = 0;
    while n < buff.len() {
        let r = transport.read(&mut buff[n..])?;
        if r == 0 {
            return Ok(false);
        }
        n += r;
    }
    Ok(true)
}
