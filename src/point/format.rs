use crate::{Error, Result};
use std::fmt;

/// The return count limit of the legacy point formats.
const LEGACY_MAX_RETURN_COUNT: u8 = 5;
/// The return count limit of the extended point formats.
const EXTENDED_MAX_RETURN_COUNT: u8 = 15;

/// Point record format descriptor.
///
/// This is a small closed table: each format id maps to its base record length, whether it carries
/// gps time and color, and whether this crate can encode it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Format {
    id: u8,
    len: u16,
    /// Does this point format include gps time?
    pub has_gps_time: bool,
    /// Does this point format include red, green, and blue colors?
    pub has_color: bool,
    /// Can the writer encode points of this format?
    pub is_supported: bool,
}

const FORMATS: [Format; 11] = [
    Format::entry(0, 20, false, false, true),
    Format::entry(1, 28, true, false, true),
    Format::entry(2, 26, false, true, true),
    Format::entry(3, 34, true, true, true),
    Format::entry(4, 57, true, false, false),
    Format::entry(5, 63, true, true, false),
    Format::entry(6, 30, true, false, false),
    Format::entry(7, 36, true, true, false),
    Format::entry(8, 38, true, true, false),
    Format::entry(9, 59, true, false, false),
    Format::entry(10, 67, true, true, false),
];

impl Format {
    const fn entry(id: u8, len: u16, has_gps_time: bool, has_color: bool, is_supported: bool) -> Format {
        Format {
            id,
            len,
            has_gps_time,
            has_color,
            is_supported,
        }
    }

    /// Looks up a point format.
    ///
    /// Unknown ids, and known ids the encoder can't write, are both an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_writer::point::Format;
    /// assert!(Format::new(3).is_ok());
    /// assert!(Format::new(6).is_err());
    /// assert!(Format::new(11).is_err());
    /// ```
    pub fn new(id: u8) -> Result<Format> {
        FORMATS
            .get(usize::from(id))
            .filter(|format| format.is_supported)
            .copied()
            .ok_or(Error::UnsupportedPointFormat(id))
    }

    /// Returns the descriptor for any known format, supported or not.
    pub fn describe(id: u8) -> Option<Format> {
        FORMATS.get(usize::from(id)).copied()
    }

    /// Returns this format's id.
    pub fn to_u8(&self) -> u8 {
        self.id
    }

    /// The length of a standard point in this format, without extra bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_writer::point::Format;
    /// assert_eq!(20, Format::new(0).unwrap().len());
    /// assert_eq!(34, Format::new(3).unwrap().len());
    /// ```
    pub fn len(&self) -> u16 {
        self.len
    }

    /// Is this one of the extended (las 1.4) formats?
    pub fn is_extended(&self) -> bool {
        self.id >= 6
    }

    /// The largest return number and return count this format can store.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_writer::point::Format;
    /// assert_eq!(5, Format::new(1).unwrap().max_return_count());
    /// assert_eq!(15, Format::describe(6).unwrap().max_return_count());
    /// ```
    pub fn max_return_count(&self) -> u8 {
        if self.is_extended() {
            EXTENDED_MAX_RETURN_COUNT
        } else {
            LEGACY_MAX_RETURN_COUNT
        }
    }
}

impl Default for Format {
    fn default() -> Format {
        FORMATS[3]
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "point format {}", self.id)
    }
}
