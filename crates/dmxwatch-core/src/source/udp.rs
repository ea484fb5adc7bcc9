use std::net::{SocketAddr, UdpSocket};
use std::time::{SystemTime, UNIX_EPOCH};

use super::{PacketEvent, PacketSource, SourceError};

// Largest ArtDmx frame is 530 bytes; leave headroom for other opcodes.
const MAX_DATAGRAM: usize = 1024;

/// Blocking UDP packet source.
///
/// Bind failure is fatal to the caller: without a bound listener there is
/// nothing to monitor, and the standard Art-Net port is frequently held by
/// another tool.
pub struct UdpSource {
    socket: UdpSocket,
    buf: Vec<u8>,
}

impl UdpSource {
    pub fn bind(addr: SocketAddr) -> Result<Self, SourceError> {
        let socket = UdpSocket::bind(addr)?;
        Ok(Self {
            socket,
            buf: vec![0; MAX_DATAGRAM],
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, SourceError> {
        Ok(self.socket.local_addr()?)
    }
}

impl PacketSource for UdpSource {
    fn next_packet(&mut self) -> Result<Option<PacketEvent>, SourceError> {
        let (len, from) = self.socket.recv_from(&mut self.buf)?;
        Ok(Some(PacketEvent {
            ts: unix_ts(),
            from,
            data: self.buf[..len].to_vec(),
        }))
    }
}

fn unix_ts() -> Option<f64> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()
        .map(|d| d.as_secs_f64())
}
