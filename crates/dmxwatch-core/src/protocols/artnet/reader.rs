use super::error::ArtNetError;
use super::layout;

pub struct ArtNetReader<'a> {
    payload: &'a [u8],
}

impl<'a> ArtNetReader<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self { payload }
    }

    pub fn require_len(&self, needed: usize) -> Result<(), ArtNetError> {
        if self.payload.len() < needed {
            return Err(ArtNetError::TooShort {
                needed,
                actual: self.payload.len(),
            });
        }
        Ok(())
    }

    pub fn read_u16_le(&self, range: std::ops::Range<usize>) -> Result<u16, ArtNetError> {
        let bytes = self.read_slice(range)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_u16_be(&self, range: std::ops::Range<usize>) -> Result<u16, ArtNetError> {
        let bytes = self.read_slice(range)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, ArtNetError> {
        self.payload
            .get(offset)
            .copied()
            .ok_or(ArtNetError::TooShort {
                needed: offset + 1,
                actual: self.payload.len(),
            })
    }

    /// A zero on the wire means "field not used" for sequence numbers.
    pub fn read_optional_nonzero_u8(&self, offset: usize) -> Result<Option<u8>, ArtNetError> {
        let value = self.read_u8(offset)?;
        Ok(if value == 0 { None } else { Some(value) })
    }

    pub fn read_slice(&self, range: std::ops::Range<usize>) -> Result<&'a [u8], ArtNetError> {
        self.payload
            .get(range.clone())
            .ok_or(ArtNetError::TooShort {
                needed: range.end,
                actual: self.payload.len(),
            })
    }

    pub fn read_signature(&self) -> Result<&'a [u8], ArtNetError> {
        self.read_slice(0..layout::ARTNET_ID.len())
    }
}

#[cfg(test)]
mod tests {
    use super::ArtNetReader;

    #[test]
    fn read_optional_nonzero_u8_zero() {
        let reader = ArtNetReader::new(&[0]);
        assert_eq!(reader.read_optional_nonzero_u8(0).unwrap(), None);
    }

    #[test]
    fn read_optional_nonzero_u8_value() {
        let reader = ArtNetReader::new(&[12]);
        assert_eq!(reader.read_optional_nonzero_u8(0).unwrap(), Some(12));
    }

    #[test]
    fn read_u16_be_and_le_differ() {
        let reader = ArtNetReader::new(&[0x12, 0x34]);
        assert_eq!(reader.read_u16_be(0..2).unwrap(), 0x1234);
        assert_eq!(reader.read_u16_le(0..2).unwrap(), 0x3412);
    }

    #[test]
    fn read_past_end_reports_needed_bytes() {
        let reader = ArtNetReader::new(&[0]);
        let err = reader.read_u8(4).unwrap_err();
        assert!(err.to_string().contains("payload too short"));
    }
}
