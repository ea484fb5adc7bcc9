//! dmxwatch core library: live Art-Net monitoring without the terminal.
//!
//! This crate implements everything the CLI needs short of pixels: the
//! UDP packet source, Art-Net decoding (ArtDmx and ArtTimeCode), the
//! change-tracked channel grids, the universe filter, and the rendering
//! protocol a display surface implements. Parsing is byte-oriented and
//! side-effect free; all I/O is isolated in `source` modules; all shared
//! state lives behind the [`Monitor`] handle.
//!
//! Invariants:
//! - Packet ingestion never blocks on rendering.
//! - A drained redraw batch is a consistent cut: values match the dirty
//!   set collected with them.
//! - Incremental paint cost is bounded by the number of changed cells,
//!   not by the packet rate.
//!
//! Version française (résumé):
//! Cœur du moniteur Art-Net : source UDP -> décodage (ArtDmx,
//! ArtTimeCode) -> grilles à suivi de changements -> protocole de rendu.
//! L'ingestion ne bloque jamais le rendu ; un drain livre une coupe
//! cohérente ; le coût d'un rafraîchissement est borné par le nombre de
//! cellules modifiées.
//!
//! # Examples
//! ```no_run
//! use std::net::SocketAddr;
//!
//! use dmxwatch_core::{ARTNET_PORT, Monitor, UdpSource, run_receiver};
//!
//! let source = UdpSource::bind(SocketAddr::from(([0, 0, 0, 0], ARTNET_PORT)))?;
//! let monitor = Monitor::new();
//! run_receiver(source, &monitor)?;
//! # Ok::<(), dmxwatch_core::SourceError>(())
//! ```

use std::net::SocketAddr;

use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

mod monitor;
mod protocols;
mod render;
mod source;

pub use monitor::{
    CellChange, ChannelGrid, DMX_CHANNELS, DisplayFilter, Monitor, RedrawBatch, Snapshot,
    TIMECODE_FIELDS, run_receiver,
};
pub use protocols::artnet::{
    ARTNET_PORT, ArtDmx, ArtNetError, ArtNetPacket, ArtTimecode, parse_packet,
};
pub use render::{
    CellStyle, RenderSurface, dmx_cell_style, format_dmx_value, format_timecode_field,
    frame_rate_label,
};
pub use source::{PacketEvent, PacketSource, SourceError, UdpSource};

/// One-line summary of a displayed packet, for headless (NDJSON) output.
///
/// # Examples
/// ```
/// use dmxwatch_core::{ArtNetPacket, ArtTimecode, PacketRecord};
///
/// let packet = ArtNetPacket::Timecode(ArtTimecode {
///     frames: 12,
///     seconds: 30,
///     minutes: 4,
///     hours: 1,
///     frame_type: 1,
/// });
/// let record = PacketRecord::from_packet(&packet, "10.0.0.9:6454".parse().unwrap(), None);
/// let json = serde_json::to_string(&record).unwrap();
/// assert!(json.contains("\"time\":\"01:04:30:12\""));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PacketRecord {
    Dmx {
        /// RFC3339 receive time, when the source stamped one.
        #[serde(skip_serializing_if = "Option::is_none")]
        ts: Option<String>,
        /// Sender endpoint in `ip:port` form.
        source: String,
        net: u8,
        subnet: u8,
        universe: u8,
        #[serde(skip_serializing_if = "Option::is_none")]
        sequence: Option<u8>,
        /// Slots carried by this frame (512 for a full frame).
        slots: usize,
        /// Slots with a non-zero level.
        active: usize,
        /// Highest level in the frame.
        peak: u8,
    },
    Timecode {
        #[serde(skip_serializing_if = "Option::is_none")]
        ts: Option<String>,
        source: String,
        /// `HH:MM:SS:FF`.
        time: String,
        frame_type: u8,
        frame_rate: String,
    },
}

impl PacketRecord {
    pub fn from_packet(packet: &ArtNetPacket, from: SocketAddr, ts: Option<f64>) -> Self {
        match packet {
            ArtNetPacket::Dmx(dmx) => {
                let data = dmx.data();
                PacketRecord::Dmx {
                    ts: ts_to_rfc3339(ts),
                    source: from.to_string(),
                    net: dmx.net_id(),
                    subnet: dmx.subnet_id(),
                    universe: dmx.universe_id(),
                    sequence: dmx.sequence,
                    slots: data.len(),
                    active: data.iter().filter(|v| **v != 0).count(),
                    peak: data.iter().copied().max().unwrap_or(0),
                }
            }
            ArtNetPacket::Timecode(tc) => PacketRecord::Timecode {
                ts: ts_to_rfc3339(ts),
                source: from.to_string(),
                time: format!(
                    "{:02}:{:02}:{:02}:{:02}",
                    tc.hours, tc.minutes, tc.seconds, tc.frames
                ),
                frame_type: tc.frame_type,
                frame_rate: tc.frame_rate_label().to_string(),
            },
        }
    }
}

fn ts_to_rfc3339(ts: Option<f64>) -> Option<String> {
    let ts = ts?;
    let nanos = (ts * 1_000_000_000.0) as i128;
    OffsetDateTime::from_unix_timestamp_nanos(nanos)
        .ok()
        .and_then(|dt| dt.format(&Rfc3339).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocols::artnet::layout;

    fn peer() -> SocketAddr {
        "192.168.1.20:6454".parse().expect("socket addr")
    }

    #[test]
    fn dmx_record_summarizes_frame() {
        let mut payload = vec![0u8; layout::DMX_DATA_OFFSET + 4];
        payload[..layout::ARTNET_ID.len()].copy_from_slice(layout::ARTNET_ID);
        payload[layout::OP_CODE_RANGE].copy_from_slice(&layout::ARTDMX_OPCODE.to_le_bytes());
        payload[layout::SEQUENCE_OFFSET] = 7;
        payload[layout::PORT_ADDRESS_RANGE].copy_from_slice(&0x0015u16.to_le_bytes());
        payload[layout::LENGTH_RANGE].copy_from_slice(&4u16.to_be_bytes());
        payload[layout::DMX_DATA_OFFSET..].copy_from_slice(&[0, 128, 0, 255]);

        let packet = parse_packet(&payload).unwrap().unwrap();
        let record = PacketRecord::from_packet(&packet, peer(), Some(0.0));
        let value = serde_json::to_value(&record).expect("record json");

        assert_eq!(value["type"], "dmx");
        assert_eq!(value["ts"], "1970-01-01T00:00:00Z");
        assert_eq!(value["source"], "192.168.1.20:6454");
        assert_eq!(value["subnet"], 1);
        assert_eq!(value["universe"], 5);
        assert_eq!(value["sequence"], 7);
        assert_eq!(value["slots"], 4);
        assert_eq!(value["active"], 2);
        assert_eq!(value["peak"], 255);
    }

    #[test]
    fn record_omits_absent_timestamp_and_sequence() {
        let packet = ArtNetPacket::Timecode(ArtTimecode {
            frames: 0,
            seconds: 0,
            minutes: 0,
            hours: 0,
            frame_type: 2,
        });
        let record = PacketRecord::from_packet(&packet, peer(), None);
        let value = serde_json::to_value(&record).expect("record json");

        assert!(value.get("ts").is_none());
        assert_eq!(value["time"], "00:00:00:00");
        assert_eq!(value["frame_rate"], "29.97");
    }
}
