// Copyright (c) 2024-2025 The Ethvault Developers

//! Ethvault device simulator
//!
//! Runs the signing engine behind a TCP listener standing in for the UART,
//! with a CLI approval policy standing in for the physical buttons. The
//! main loop follows the device firmware: input devices first, then the
//! transport, at most one command or one approval resolution per iteration.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::time::Duration;

use clap::{Parser, ValueEnum};
use log::{debug, info, warn, LevelFilter};

use ethvault_core::consts::StaticDriver;
use ethvault_core::dispatch::{self, CommandBuffer, Transport};
use ethvault_core::engine::{Driver, Engine, State};
use ethvault_core::tx::Classification;

use ethvault_tests::driver::TestDriver;

/// Ethvault device simulator
#[derive(Clone, Debug, Parser)]
pub struct Args {
    /// Listen address for the serial-over-TCP bridge
    #[clap(long, default_value = "127.0.0.1:1339", env = "ETHVAULT_BIND")]
    bind: String,

    /// Poll tick / transport read timeout in milliseconds
    #[clap(long, default_value_t = 1000)]
    tick_ms: u64,

    /// Approval policy standing in for the device buttons
    #[clap(long, value_enum, default_value = "ask")]
    approval: Approval,

    /// Serve the standard mock blob instead of the built-in one
    #[clap(long)]
    mock_blob: bool,

    /// Log level
    #[clap(long, default_value = "debug")]
    log_level: LevelFilter,
}

#[derive(Copy, Clone, Debug, PartialEq, ValueEnum)]
pub enum Approval {
    /// Approve every transaction
    Approve,
    /// Reject every transaction
    Reject,
    /// Prompt on stdin
    Ask,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let _ = simplelog::SimpleLogger::init(args.log_level, Default::default());

    if args.mock_blob {
        info!("serving the standard mock blob");
        run(Engine::new(TestDriver::standard()), &args)
    } else {
        run(Engine::new(StaticDriver), &args)
    }
}

fn run<DRV: Driver>(mut engine: Engine<DRV>, args: &Args) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&args.bind)?;
    info!("listening on {}", args.bind);

    let mut buff = CommandBuffer::new();

    for stream in listener.incoming() {
        let stream = stream?;
        info!("host connected: {:?}", stream.peer_addr());

        stream.set_read_timeout(Some(Duration::from_millis(args.tick_ms)))?;
        stream.set_nodelay(true)?;

        let mut transport = TcpTransport { stream };

        if let Err(e) = serve(&mut engine, &mut transport, &mut buff, args) {
            warn!("host disconnected: {e}");
        }

        // a dropped link must not leave a signature behind
        engine.reset();
    }

    Ok(())
}

/// Drive one connection: buttons (approval policy), then transport, one
/// event per iteration
fn serve<DRV: Driver>(
    engine: &mut Engine<DRV>,
    transport: &mut TcpTransport,
    buff: &mut CommandBuffer,
    args: &Args,
) -> anyhow::Result<()> {
    loop {
        if engine.state() == State::Pending {
            render_pending(engine);

            let approve = match args.approval {
                Approval::Approve => true,
                Approval::Reject => false,
                Approval::Ask => prompt()?,
            };

            info!(
                "transaction {}",
                if approve { "approved" } else { "rejected" }
            );
            dispatch::resolve_approval(engine, transport, approve)?;
            continue;
        }

        if dispatch::poll(engine, transport, buff)? {
            debug!("command handled, state: {}", engine.state());
        }
    }
}

/// Render the decoded transaction the way the device display would
fn render_pending<DRV: Driver>(engine: &Engine<DRV>) {
    let (message, decoded) = match (engine.message(), engine.pending_tx()) {
        (Some(m), Some(d)) => (m, d),
        _ => return,
    };

    info!("transaction pending approval:");
    for (label, span) in decoded.fields() {
        info!("  {:>22}: {}", label, hex::encode(span.bytes(message)));
    }
    if let Some(t) = decoded.trailing() {
        info!("  {:>22}: {}", "(trailing)", hex::encode(t.bytes(message)));
    }

    match decoded.classification() {
        Classification::RawTransaction => (),
        Classification::Erc20Transfer { to, amount } => {
            info!("  ERC-20 transfer");
            info!("  {:>22}: 0x{}", "token to", hex::encode(to.bytes(message)));
            info!("  {:>22}: 0x{}", "amount", hex::encode(amount.bytes(message)));
        }
    }
}

fn prompt() -> anyhow::Result<bool> {
    print!("approve transaction? [y/N] ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;

    Ok(matches!(line.trim(), "y" | "Y" | "yes"))
}

/// Serial-over-TCP transport: read timeouts present as short reads, which
/// the dispatcher maps to its framing rules
struct TcpTransport {
    stream: TcpStream,
}

impl Transport for TcpTransport {
    type Error = std::io::Error;

    fn read(&mut self, buff: &mut [u8]) -> Result<usize, Self::Error> {
        match self.stream.read(buff) {
            // a zero-length TCP read is end-of-stream, not a timeout
            Ok(0) => Err(std::io::ErrorKind::UnexpectedEof.into()),
            Ok(n) => Ok(n),
            Err(e)
                if matches!(
                    e.kind(),
                    std::io::ErrorKind::WouldBlock | std::io::ErrorKind::TimedOut
                ) =>
            {
                Ok(0)
            }
            Err(e) => Err(e),
        }
    }

    fn write_all(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.stream.write_all(data)?;
        self.stream.flush()
    }
}
