//! Rendering protocol between the monitor state and a display surface.
//!
//! The surface owns its geometry (cells per row, cell size); the monitor
//! owns the values. The contract has two paint modes: a full paint for the
//! first frame or after a resize, and an incremental paint that touches
//! only the cells a [`RedrawBatch`] reports. The value-to-visual rules live
//! here as pure functions so they can be tested without a terminal.

use crate::monitor::{RedrawBatch, Snapshot};

/// A display surface the monitor can paint onto.
pub trait RenderSurface {
    type Error;

    /// Clear the canvas and paint every cell from the snapshot.
    fn paint_all(&mut self, snapshot: &Snapshot) -> Result<(), Self::Error>;

    /// Paint only the cells in the batch, leaving all others untouched.
    fn paint_changed(&mut self, batch: &RedrawBatch) -> Result<(), Self::Error>;
}

/// Visual treatment of a DMX channel cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    /// Background gray level; the channel value maps to it directly.
    pub gray: u8,
    /// Dark text on bright backgrounds, light text on dark ones.
    pub dark_text: bool,
}

pub fn dmx_cell_style(value: u8) -> CellStyle {
    CellStyle {
        gray: value,
        dark_text: value > 0x80,
    }
}

/// Three-digit zero-padded channel value.
pub fn format_dmx_value(value: u8) -> String {
    format!("{value:03}")
}

/// Two-digit zero-padded timecode field (low two digits).
///
/// Timecode cells are always white-on-black; no value-driven coloring.
pub fn format_timecode_field(value: u8) -> String {
    format!("{:02}", value % 100)
}

/// Frame-rate label for an ArtTimeCode type code.
pub fn frame_rate_label(code: u8) -> &'static str {
    match code {
        0 => "24",
        1 => "25",
        2 => "29.97",
        3 => "30",
        _ => "?",
    }
}

#[cfg(test)]
mod tests {
    use super::{dmx_cell_style, format_dmx_value, format_timecode_field, frame_rate_label};

    #[test]
    fn gray_level_tracks_value() {
        assert_eq!(dmx_cell_style(0).gray, 0);
        assert_eq!(dmx_cell_style(200).gray, 200);
    }

    #[test]
    fn text_contrast_flips_above_midpoint() {
        assert!(!dmx_cell_style(0).dark_text);
        assert!(!dmx_cell_style(0x80).dark_text);
        assert!(dmx_cell_style(0x81).dark_text);
        assert!(dmx_cell_style(255).dark_text);
    }

    #[test]
    fn dmx_values_are_three_digits() {
        assert_eq!(format_dmx_value(0), "000");
        assert_eq!(format_dmx_value(42), "042");
        assert_eq!(format_dmx_value(255), "255");
    }

    #[test]
    fn timecode_fields_are_two_digits() {
        assert_eq!(format_timecode_field(7), "07");
        assert_eq!(format_timecode_field(59), "59");
        // Out-of-range wire values keep the low two digits.
        assert_eq!(format_timecode_field(255), "55");
    }

    #[test]
    fn frame_rate_labels() {
        assert_eq!(frame_rate_label(0), "24");
        assert_eq!(frame_rate_label(1), "25");
        assert_eq!(frame_rate_label(2), "29.97");
        assert_eq!(frame_rate_label(3), "30");
        assert_eq!(frame_rate_label(200), "?");
    }
}
