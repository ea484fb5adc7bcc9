//! Art-Net protocol decoding.
//!
//! The parser validates the Art-Net signature, then dispatches on the
//! opcode: ArtDmx payloads decode into channel-level frames, ArtTimeCode
//! payloads into the five timecode fields. Every other opcode is reported
//! as "nothing to display" rather than an error, since a busy lighting
//! network carries plenty of traffic a monitor has no business rejecting.
//!
//! Byte offsets and protocol conventions live in `layout` and `reader`
//! respectively; errors are explicit and actionable.
//!
//! Version française (résumé):
//! Décodage Art-Net : signature puis opcode (ArtDmx, ArtTimeCode). Les
//! autres opcodes sont ignorés silencieusement. Les positions sont dans
//! `layout`, les conventions dans `reader`.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use error::ArtNetError;
pub use layout::ARTNET_PORT;
pub use parser::{ArtDmx, ArtNetPacket, ArtTimecode, parse_packet};
