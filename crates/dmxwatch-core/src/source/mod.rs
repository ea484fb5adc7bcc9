//! Packet delivery into the monitor.
//!
//! A [`PacketSource`] hands raw datagrams to the dispatch loop one at a
//! time. The live implementation is a blocking UDP socket; tests use
//! in-memory replay sources behind the same trait.

mod udp;

pub use udp::UdpSource;

use std::net::SocketAddr;

use thiserror::Error;

/// One received datagram, undecoded.
#[derive(Debug, Clone)]
pub struct PacketEvent {
    /// Receive time as fractional UNIX seconds, when known.
    pub ts: Option<f64>,
    pub from: SocketAddr,
    pub data: Vec<u8>,
}

pub trait PacketSource {
    /// Next datagram, or `Ok(None)` once the source is exhausted.
    fn next_packet(&mut self) -> Result<Option<PacketEvent>, SourceError>;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
