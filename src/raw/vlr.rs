//! Raw variable length records, standard and extended.

use crate::Result;
use byteorder::{LittleEndian, WriteBytesExt};
use std::io::Write;

/// A raw vlr or evlr that maps directly onto the las specification.
#[derive(Clone, Debug, Default, PartialEq)]
#[allow(missing_docs)]
pub struct Vlr {
    pub reserved: u16,
    pub user_id: [u8; 16],
    pub record_id: u16,
    pub record_length_after_header: RecordLength,
    pub description: [u8; 32],
    pub data: Vec<u8>,
}

/// The length of the data in the vlr.
///
/// Regular vlrs store it as a `u16`, extended ones as a `u64`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[allow(missing_docs)]
pub enum RecordLength {
    Vlr(u16),
    Evlr(u64),
}

impl Vlr {
    /// Writes a raw vlr.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use las_writer::raw::Vlr;
    /// let mut cursor = Cursor::new(Vec::new());
    /// Vlr::default().write_to(&mut cursor).unwrap();
    /// assert_eq!(54, cursor.into_inner().len());
    /// ```
    pub fn write_to<W: Write>(&self, mut write: W) -> Result<()> {
        write.write_u16::<LittleEndian>(self.reserved)?;
        write.write_all(&self.user_id)?;
        write.write_u16::<LittleEndian>(self.record_id)?;
        match self.record_length_after_header {
            RecordLength::Vlr(n) => write.write_u16::<LittleEndian>(n)?,
            RecordLength::Evlr(n) => write.write_u64::<LittleEndian>(n)?,
        }
        write.write_all(&self.description)?;
        write.write_all(&self.data)?;
        Ok(())
    }

    /// Is this an extended vlr?
    pub fn is_extended(&self) -> bool {
        matches!(self.record_length_after_header, RecordLength::Evlr(_))
    }
}

impl Default for RecordLength {
    fn default() -> RecordLength {
        RecordLength::Vlr(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evlr_header_is_sixty_bytes() {
        let vlr = Vlr {
            record_length_after_header: RecordLength::Evlr(3),
            data: vec![1, 2, 3],
            ..Default::default()
        };
        let mut bytes = Vec::new();
        vlr.write_to(&mut bytes).unwrap();
        assert_eq!(63, bytes.len());
        assert_eq!(&[3, 0, 0, 0, 0, 0, 0, 0], &bytes[20..28]);
    }

    #[test]
    fn reserved_first() {
        let vlr = Vlr {
            reserved: 0xAABB,
            ..Default::default()
        };
        let mut bytes = Vec::new();
        vlr.write_to(&mut bytes).unwrap();
        assert_eq!(&[0xBB, 0xAA], &bytes[0..2]);
    }
}
