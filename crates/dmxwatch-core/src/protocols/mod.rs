//! Protocol decoding modules.
//!
//! Decoding follows a layered structure:
//! - `layout`: byte offsets and ranges (source of truth)
//! - `reader`: safe byte access and protocol conventions
//! - `parser`: domain-level decoding (no direct byte indexing)
//! - `error`: explicit, actionable errors
//!
//! Parsers are pure and contain no I/O; sources deliver datagrams and the
//! monitor layer owns all state.

pub mod artnet;
