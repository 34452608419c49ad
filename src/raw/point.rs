//! Raw las points, as laid out in point formats zero through three.

use crate::{Result, point::Format};
use byteorder::{LittleEndian, WriteBytesExt};
use std::io::Write;

/// A raw point.
///
/// The documentation for struct members is taken from the las 1.2 spec.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Point {
    /// The X, Y, and Z values are stored as long integers.
    ///
    /// The X, Y, and Z values are used in conjunction with the scale values and the offset values
    /// to determine the coordinate for each point as described in the Public Header Block section.
    pub x: i32,
    #[allow(missing_docs)]
    pub y: i32,
    #[allow(missing_docs)]
    pub z: i32,

    /// The intensity value is the integer representation of the pulse return magnitude.
    pub intensity: u16,

    /// Return number, number of returns, scan direction flag and edge of flight line, packed into
    /// one byte.
    pub flags: Flags,

    /// The classification code.
    pub classification: u8,

    /// The angle, rounded to the nearest integer, of the output of the laser pulse, including the
    /// roll of the aircraft.
    pub scan_angle_rank: i8,

    /// This field may be used at the user's discretion.
    pub user_data: u8,

    /// This value indicates the file from which this point originated.
    pub point_source_id: u16,

    /// The GPS Time is the double floating point time tag value at which the point was acquired.
    pub gps_time: f64,

    /// Red, green and blue image channels associated with this point.
    pub color: [u16; 3],
}

/// The bit fields of a legacy point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Flags {
    /// The pulse return number, three bits.
    pub return_number: u8,
    /// The number of returns of the pulse, three bits.
    pub number_of_returns: u8,
    /// The scan direction flag, one bit.
    pub scan_direction: u8,
    /// The edge of flight line flag, one bit.
    pub edge_of_flight_line: u8,
}

impl Flags {
    /// Packs these flags into one byte. Bits that don't fit their field are dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_writer::raw::point::Flags;
    /// let flags = Flags {
    ///     return_number: 2,
    ///     number_of_returns: 3,
    ///     scan_direction: 1,
    ///     edge_of_flight_line: 0,
    /// };
    /// assert_eq!(0b0101_1010, flags.to_u8());
    /// ```
    pub fn to_u8(&self) -> u8 {
        (self.return_number & 0b111)
            | (self.number_of_returns & 0b111) << 3
            | (self.scan_direction & 1) << 6
            | (self.edge_of_flight_line & 1) << 7
    }
}

impl Point {
    /// Writes a raw point.
    ///
    /// Gps time and color are only written if the format has them.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_writer::{point::Format, raw::Point};
    /// let mut bytes = Vec::new();
    /// Point::default().write_to(&mut bytes, Format::new(1).unwrap()).unwrap();
    /// assert_eq!(28, bytes.len());
    /// ```
    pub fn write_to<W: Write>(&self, mut write: W, format: Format) -> Result<()> {
        write.write_i32::<LittleEndian>(self.x)?;
        write.write_i32::<LittleEndian>(self.y)?;
        write.write_i32::<LittleEndian>(self.z)?;
        write.write_u16::<LittleEndian>(self.intensity)?;
        write.write_u8(self.flags.to_u8())?;
        write.write_u8(self.classification)?;
        write.write_i8(self.scan_angle_rank)?;
        write.write_u8(self.user_data)?;
        write.write_u16::<LittleEndian>(self.point_source_id)?;
        if format.has_gps_time {
            write.write_f64::<LittleEndian>(self.gps_time)?;
        }
        if format.has_color {
            for channel in self.color {
                write.write_u16::<LittleEndian>(channel)?;
            }
        }
        Ok(())
    }
}
