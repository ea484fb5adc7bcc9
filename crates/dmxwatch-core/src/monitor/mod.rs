//! Live monitor state: packet dispatch, change tracking, redraw coalescing.
//!
//! Two threads meet here. The receive thread calls [`Monitor::ingest`] for
//! every decoded packet; the render thread calls [`Monitor::take_redraw`]
//! (or [`Monitor::snapshot`] for the first paint). One mutex guards the
//! grids, the universe filter, and the pending-redraw flag, so a drain
//! always sees values consistent with the dirty set it collects.
//!
//! Invariants:
//! - `ingest` never waits on a paint; it holds the lock only to merge.
//! - At most one redraw is pending at a time; servicing it drains whatever
//!   accumulated since the previous drain.
//! - After `take_redraw` or `snapshot`, both dirty sets are empty.

mod filter;
mod grid;

pub use filter::DisplayFilter;
pub use grid::{CellChange, ChannelGrid};

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::protocols::artnet::{ArtNetPacket, layout, parse_packet};
use crate::source::{PacketSource, SourceError};

/// Channels tracked per DMX universe.
pub const DMX_CHANNELS: usize = layout::DMX_MAX_SLOTS;
/// Timecode cells: hours, minutes, seconds, frames, frame type.
pub const TIMECODE_FIELDS: usize = 5;

#[derive(Debug)]
struct MonitorState {
    dmx: ChannelGrid,
    timecode: ChannelGrid,
    filter: DisplayFilter,
    last_universe: Option<u8>,
    redraw_pending: bool,
}

/// Shared handle over the monitor state.
///
/// Clone one handle per thread; all clones observe the same state.
#[derive(Debug, Clone)]
pub struct Monitor {
    state: Arc<Mutex<MonitorState>>,
}

/// Everything that changed since the last drain, in one consistent cut.
#[derive(Debug, Clone)]
pub struct RedrawBatch {
    pub dmx: Vec<CellChange>,
    pub timecode: Vec<CellChange>,
    pub last_universe: Option<u8>,
}

/// Full shown state, for a paint-everything pass.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub dmx: Vec<u8>,
    pub timecode: Vec<u8>,
    pub filter: DisplayFilter,
    pub last_universe: Option<u8>,
}

impl Monitor {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MonitorState {
                dmx: ChannelGrid::new(DMX_CHANNELS),
                timecode: ChannelGrid::new(TIMECODE_FIELDS),
                filter: DisplayFilter::All,
                last_universe: None,
                redraw_pending: false,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MonitorState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Merge one decoded packet into the display state.
    ///
    /// DMX frames always refresh the last-received-universe indicator, and
    /// update the channel grid only when the filter passes. Timecode frames
    /// update unconditionally. Returns whether anything visible changed
    /// (and therefore whether a redraw is now pending).
    pub fn ingest(&self, packet: &ArtNetPacket) -> bool {
        let mut state = self.lock();
        let news = match packet {
            ArtNetPacket::Dmx(dmx) => {
                let universe = dmx.universe_id();
                let mut news = state.last_universe != Some(universe);
                state.last_universe = Some(universe);
                if state.filter.should_display(u16::from(universe)) && state.dmx.update(dmx.data())
                {
                    news = true;
                }
                news
            }
            ArtNetPacket::Timecode(tc) => state.timecode.update(&tc.fields()),
        };
        if news {
            state.redraw_pending = true;
        }
        news
    }

    /// Drain pending changes, or `None` when nothing needs repainting.
    ///
    /// Any number of `ingest` calls between two drains coalesce into a
    /// single batch.
    pub fn take_redraw(&self) -> Option<RedrawBatch> {
        let mut state = self.lock();
        if !state.redraw_pending {
            return None;
        }
        state.redraw_pending = false;
        let dmx = state.dmx.drain_dirty();
        let timecode = state.timecode.drain_dirty();
        Some(RedrawBatch {
            dmx,
            timecode,
            last_universe: state.last_universe,
        })
    }

    /// Full shown state for an initial or post-resize paint.
    ///
    /// Also clears the dirty sets and the pending flag: the caller is about
    /// to paint every cell, so the drained-after-render invariant holds.
    pub fn snapshot(&self) -> Snapshot {
        let mut state = self.lock();
        state.dmx.clear_dirty();
        state.timecode.clear_dirty();
        state.redraw_pending = false;
        Snapshot {
            dmx: state.dmx.snapshot().to_vec(),
            timecode: state.timecode.snapshot().to_vec(),
            filter: state.filter,
            last_universe: state.last_universe,
        }
    }

    pub fn set_filter(&self, filter: DisplayFilter) {
        self.lock().filter = filter;
    }

    pub fn filter(&self) -> DisplayFilter {
        self.lock().filter
    }

    pub fn last_universe(&self) -> Option<u8> {
        self.lock().last_universe
    }
}

impl Default for Monitor {
    fn default() -> Self {
        Self::new()
    }
}

/// Drive a packet source until it is exhausted.
///
/// Malformed datagrams and opcodes the monitor does not display are
/// skipped; they are background noise on a show network, not errors.
/// Transport errors propagate to the caller.
pub fn run_receiver<S: PacketSource>(mut source: S, monitor: &Monitor) -> Result<(), SourceError> {
    while let Some(event) = source.next_packet()? {
        if let Ok(Some(packet)) = parse_packet(&event.data) {
            monitor.ingest(&packet);
        }
    }
    Ok(())
}
