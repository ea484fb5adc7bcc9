use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArtNetError {
    #[error("payload too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
    #[error("invalid ArtDmx length {length}: expected 1..=512")]
    InvalidLength { length: u16 },
}
