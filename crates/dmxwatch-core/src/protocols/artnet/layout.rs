pub const ARTNET_PORT: u16 = 6454;

pub const ARTNET_ID: &[u8; 8] = b"Art-Net\0";

pub const OP_CODE_RANGE: std::ops::Range<usize> = 8..10;

pub const ARTDMX_OPCODE: u16 = 0x5000;
pub const ARTTIMECODE_OPCODE: u16 = 0x9700;

pub const SEQUENCE_OFFSET: usize = 12;
pub const PORT_ADDRESS_RANGE: std::ops::Range<usize> = 14..16;
pub const LENGTH_RANGE: std::ops::Range<usize> = 16..18;
pub const DMX_DATA_OFFSET: usize = 18;
pub const DMX_MAX_SLOTS: usize = 512;

pub const TIMECODE_FRAMES_OFFSET: usize = 14;
pub const TIMECODE_SECONDS_OFFSET: usize = 15;
pub const TIMECODE_MINUTES_OFFSET: usize = 16;
pub const TIMECODE_HOURS_OFFSET: usize = 17;
pub const TIMECODE_TYPE_OFFSET: usize = 18;
pub const TIMECODE_LEN: usize = 19;
