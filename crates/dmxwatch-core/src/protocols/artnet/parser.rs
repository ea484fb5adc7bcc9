use super::error::ArtNetError;
use super::layout;
use super::reader::ArtNetReader;

/// A decoded Art-Net datagram of a kind the monitor displays.
#[derive(Debug, Clone)]
pub enum ArtNetPacket {
    Dmx(ArtDmx),
    Timecode(ArtTimecode),
}

/// One ArtDmx frame: a universe worth of channel levels.
///
/// The slot count from the wire is preserved; partial frames (fewer than
/// 512 slots) are legal and `data()` returns only what was carried.
#[derive(Debug, Clone)]
pub struct ArtDmx {
    pub port_address: u16,
    pub sequence: Option<u8>,
    slots: [u8; layout::DMX_MAX_SLOTS],
    len: usize,
}

impl ArtDmx {
    /// Low nibble of the port address.
    pub fn universe_id(&self) -> u8 {
        (self.port_address & 0x0f) as u8
    }

    /// Second nibble of the port address.
    pub fn subnet_id(&self) -> u8 {
        ((self.port_address >> 4) & 0x0f) as u8
    }

    /// High seven bits of the port address.
    pub fn net_id(&self) -> u8 {
        ((self.port_address >> 8) & 0x7f) as u8
    }

    /// Channel levels actually carried by this frame.
    pub fn data(&self) -> &[u8] {
        &self.slots[..self.len]
    }

    pub fn slot_count(&self) -> usize {
        self.len
    }
}

/// One ArtTimeCode frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtTimecode {
    pub frames: u8,
    pub seconds: u8,
    pub minutes: u8,
    pub hours: u8,
    pub frame_type: u8,
}

impl ArtTimecode {
    /// Fields in display order: hours, minutes, seconds, frames, type.
    pub fn fields(&self) -> [u8; 5] {
        [
            self.hours,
            self.minutes,
            self.seconds,
            self.frames,
            self.frame_type,
        ]
    }

    /// Frame-rate label for the type code (film/EBU/drop-frame/SMPTE).
    pub fn frame_rate_label(&self) -> &'static str {
        crate::render::frame_rate_label(self.frame_type)
    }
}

/// Decode a UDP payload into a displayable Art-Net packet.
///
/// `Ok(None)` covers both non-Art-Net payloads and Art-Net opcodes the
/// monitor does not display (ArtPoll and friends). Errors are reserved for
/// payloads that claim to be a displayable packet but cannot be decoded.
pub fn parse_packet(payload: &[u8]) -> Result<Option<ArtNetPacket>, ArtNetError> {
    let reader = ArtNetReader::new(payload);
    reader.require_len(layout::OP_CODE_RANGE.end)?;

    let signature = reader.read_signature()?;
    if signature != layout::ARTNET_ID {
        return Ok(None);
    }

    let opcode = reader.read_u16_le(layout::OP_CODE_RANGE)?;
    match opcode {
        layout::ARTDMX_OPCODE => parse_artdmx(&reader).map(|p| Some(ArtNetPacket::Dmx(p))),
        layout::ARTTIMECODE_OPCODE => {
            parse_arttimecode(&reader).map(|p| Some(ArtNetPacket::Timecode(p)))
        }
        _ => Ok(None),
    }
}

fn parse_artdmx(reader: &ArtNetReader<'_>) -> Result<ArtDmx, ArtNetError> {
    reader.require_len(layout::DMX_DATA_OFFSET)?;

    let sequence = reader.read_optional_nonzero_u8(layout::SEQUENCE_OFFSET)?;
    let port_address = reader.read_u16_le(layout::PORT_ADDRESS_RANGE)?;
    let length = reader.read_u16_be(layout::LENGTH_RANGE)?;
    if length == 0 || length as usize > layout::DMX_MAX_SLOTS {
        return Err(ArtNetError::InvalidLength { length });
    }

    let len = length as usize;
    let needed = layout::DMX_DATA_OFFSET + len;
    reader.require_len(needed)?;
    let data = reader.read_slice(layout::DMX_DATA_OFFSET..needed)?;
    let mut slots = [0u8; layout::DMX_MAX_SLOTS];
    slots[..len].copy_from_slice(data);

    Ok(ArtDmx {
        port_address,
        sequence,
        slots,
        len,
    })
}

fn parse_arttimecode(reader: &ArtNetReader<'_>) -> Result<ArtTimecode, ArtNetError> {
    reader.require_len(layout::TIMECODE_LEN)?;

    Ok(ArtTimecode {
        frames: reader.read_u8(layout::TIMECODE_FRAMES_OFFSET)?,
        seconds: reader.read_u8(layout::TIMECODE_SECONDS_OFFSET)?,
        minutes: reader.read_u8(layout::TIMECODE_MINUTES_OFFSET)?,
        hours: reader.read_u8(layout::TIMECODE_HOURS_OFFSET)?,
        frame_type: reader.read_u8(layout::TIMECODE_TYPE_OFFSET)?,
    })
}
