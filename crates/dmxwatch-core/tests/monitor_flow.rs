//! End-to-end dispatch: replayed datagrams through parsing, filtering, and
//! the change-tracked grids.

use std::net::SocketAddr;

use dmxwatch_core::{
    DMX_CHANNELS, DisplayFilter, Monitor, PacketEvent, PacketSource, SourceError, run_receiver,
};

struct ReplaySource {
    datagrams: std::vec::IntoIter<Vec<u8>>,
}

impl ReplaySource {
    fn new(datagrams: Vec<Vec<u8>>) -> Self {
        Self {
            datagrams: datagrams.into_iter(),
        }
    }
}

impl PacketSource for ReplaySource {
    fn next_packet(&mut self) -> Result<Option<PacketEvent>, SourceError> {
        Ok(self.datagrams.next().map(|data| PacketEvent {
            ts: None,
            from: peer(),
            data,
        }))
    }
}

fn peer() -> SocketAddr {
    "10.0.0.1:6454".parse().expect("socket addr")
}

fn artdmx_datagram(universe: u8, slots: &[u8]) -> Vec<u8> {
    let mut payload = vec![0u8; 18 + slots.len()];
    payload[..8].copy_from_slice(b"Art-Net\0");
    payload[8..10].copy_from_slice(&0x5000u16.to_le_bytes());
    payload[12] = 1;
    payload[14..16].copy_from_slice(&u16::from(universe).to_le_bytes());
    payload[16..18].copy_from_slice(&(slots.len() as u16).to_be_bytes());
    payload[18..].copy_from_slice(slots);
    payload
}

fn timecode_datagram(hours: u8, minutes: u8, seconds: u8, frames: u8, frame_type: u8) -> Vec<u8> {
    let mut payload = vec![0u8; 19];
    payload[..8].copy_from_slice(b"Art-Net\0");
    payload[8..10].copy_from_slice(&0x9700u16.to_le_bytes());
    payload[14] = frames;
    payload[15] = seconds;
    payload[16] = minutes;
    payload[17] = hours;
    payload[18] = frame_type;
    payload
}

#[test]
fn replayed_frames_reach_the_grids() {
    let mut slots = vec![0u8; DMX_CHANNELS];
    slots[5] = 200;
    let source = ReplaySource::new(vec![
        artdmx_datagram(0, &slots),
        timecode_datagram(1, 2, 3, 4, 0),
    ]);

    let monitor = Monitor::new();
    run_receiver(source, &monitor).expect("replay");

    let snapshot = monitor.snapshot();
    assert_eq!(snapshot.dmx[5], 200);
    assert_eq!(snapshot.dmx[4], 0);
    assert_eq!(snapshot.timecode, vec![1, 2, 3, 4, 0]);
    assert_eq!(snapshot.last_universe, Some(0));
}

#[test]
fn noise_on_the_wire_is_skipped() {
    let source = ReplaySource::new(vec![
        b"definitely not artnet".to_vec(),
        // Truncated ArtDmx: claims 8 slots, carries none.
        {
            let mut broken = artdmx_datagram(0, &[1; 8]);
            broken.truncate(18);
            broken
        },
        artdmx_datagram(0, &[9, 9]),
    ]);

    let monitor = Monitor::new();
    run_receiver(source, &monitor).expect("replay");

    let snapshot = monitor.snapshot();
    assert_eq!(&snapshot.dmx[..2], &[9, 9]);
}

#[test]
fn specific_filter_applies_across_the_flow() {
    let source = ReplaySource::new(vec![
        artdmx_datagram(5, &[99; 8]),
        artdmx_datagram(3, &[10, 20]),
    ]);

    let monitor = Monitor::new();
    monitor.set_filter(DisplayFilter::Only(3));
    run_receiver(source, &monitor).expect("replay");

    let snapshot = monitor.snapshot();
    assert_eq!(&snapshot.dmx[..2], &[10, 20]);
    assert_eq!(snapshot.dmx[2], 0);
    // The indicator tracks the wire, not the filter.
    assert_eq!(snapshot.last_universe, Some(3));
}

#[test]
fn partial_frames_leave_the_tail_alone() {
    let source = ReplaySource::new(vec![
        artdmx_datagram(0, &[50u8; DMX_CHANNELS]),
        artdmx_datagram(0, &[60u8; 10]),
    ]);

    let monitor = Monitor::new();
    run_receiver(source, &monitor).expect("replay");

    let snapshot = monitor.snapshot();
    assert_eq!(snapshot.dmx[9], 60);
    assert_eq!(snapshot.dmx[10], 50);
    assert_eq!(snapshot.dmx[DMX_CHANNELS - 1], 50);
}
