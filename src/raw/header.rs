//! The raw public header block.

use crate::{
    Result, Version,
    feature::{Evlrs, LargeFiles, Waveforms},
};
use byteorder::{LittleEndian, WriteBytesExt};
use std::io::Write;

/// A las header, laid out as in the file.
///
/// Fields that only exist in some versions are `Option`s, and are written as zeros when the
/// version has them but the value is `None`.
#[derive(Clone, Debug, PartialEq)]
pub struct Header {
    /// Always `LASF`.
    pub file_signature: [u8; 4],

    /// The flight line or other source of these points. Reserved in las 1.0.
    pub file_source_id: u16,

    /// A bit field of global properties. Reserved before las 1.2.
    pub global_encoding: u16,

    /// The project id.
    pub guid: [u8; 16],

    /// The las version.
    pub version: Version,

    /// The system that produced these points, nul filled.
    pub system_identifier: [u8; 32],

    /// The software that wrote this file, nul filled.
    pub generating_software: [u8; 32],

    /// Day of the year of file creation. January 1 is day 1.
    pub file_creation_day_of_year: u16,

    /// The four digit year of file creation.
    pub file_creation_year: u16,

    /// The size of this header block, in bytes.
    pub header_size: u16,

    /// The offset from the start of the file to the first point record.
    pub offset_to_point_data: u32,

    /// The number of regular vlrs.
    pub number_of_variable_length_records: u32,

    /// The point record format id.
    pub point_data_record_format: u8,

    /// The size of one point record, including extra bytes.
    pub point_data_record_length: u16,

    /// The legacy point count, zero in las 1.4 if it doesn't fit.
    pub number_of_point_records: u32,

    /// The legacy per-return counts, for returns one through five.
    pub number_of_points_by_return: [u32; 5],

    #[allow(missing_docs)]
    pub x_scale_factor: f64,
    #[allow(missing_docs)]
    pub y_scale_factor: f64,
    #[allow(missing_docs)]
    pub z_scale_factor: f64,
    #[allow(missing_docs)]
    pub x_offset: f64,
    #[allow(missing_docs)]
    pub y_offset: f64,
    #[allow(missing_docs)]
    pub z_offset: f64,
    #[allow(missing_docs)]
    pub max_x: f64,
    #[allow(missing_docs)]
    pub min_x: f64,
    #[allow(missing_docs)]
    pub max_y: f64,
    #[allow(missing_docs)]
    pub min_y: f64,
    #[allow(missing_docs)]
    pub max_z: f64,
    #[allow(missing_docs)]
    pub min_z: f64,

    /// **las 1.3 and 1.4**: The offset to the waveform data packet record.
    pub start_of_waveform_data_packet_record: Option<u64>,

    #[allow(missing_docs)]
    pub evlr: Option<Evlr>,

    #[allow(missing_docs)]
    pub large_file: Option<LargeFile>,
}

/// The evlr block of a las 1.4 header.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Evlr {
    /// The offset from the start of the file to the first evlr.
    pub start_of_first_evlr: u64,

    /// The number of evlrs.
    pub number_of_evlrs: u32,
}

/// The 64-bit counts of a las 1.4 header.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LargeFile {
    /// The number of point records.
    pub number_of_point_records: u64,

    /// Point counts for returns one through fifteen.
    pub number_of_points_by_return: [u64; 15],
}

impl Header {
    /// Writes a raw header to a `Write`.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_writer::raw::Header;
    /// let mut bytes = Vec::new();
    /// Header::default().write_to(&mut bytes).unwrap();
    /// assert_eq!(227, bytes.len());
    /// ```
    pub fn write_to<W: Write>(&self, mut write: W) -> Result<()> {
        write.write_all(&self.file_signature)?;
        write.write_u16::<LittleEndian>(self.file_source_id)?;
        write.write_u16::<LittleEndian>(self.global_encoding)?;
        write.write_all(&self.guid)?;
        write.write_u8(self.version.major)?;
        write.write_u8(self.version.minor)?;
        write.write_all(&self.system_identifier)?;
        write.write_all(&self.generating_software)?;
        write.write_u16::<LittleEndian>(self.file_creation_day_of_year)?;
        write.write_u16::<LittleEndian>(self.file_creation_year)?;
        write.write_u16::<LittleEndian>(self.header_size)?;
        write.write_u32::<LittleEndian>(self.offset_to_point_data)?;
        write.write_u32::<LittleEndian>(self.number_of_variable_length_records)?;
        write.write_u8(self.point_data_record_format)?;
        write.write_u16::<LittleEndian>(self.point_data_record_length)?;
        write.write_u32::<LittleEndian>(self.number_of_point_records)?;
        for n in &self.number_of_points_by_return {
            write.write_u32::<LittleEndian>(*n)?;
        }
        for n in [
            self.x_scale_factor,
            self.y_scale_factor,
            self.z_scale_factor,
            self.x_offset,
            self.y_offset,
            self.z_offset,
            self.max_x,
            self.min_x,
            self.max_y,
            self.min_y,
            self.max_z,
            self.min_z,
        ] {
            write.write_f64::<LittleEndian>(n)?;
        }
        if self.version.supports::<Waveforms>() {
            write.write_u64::<LittleEndian>(self.start_of_waveform_data_packet_record.unwrap_or(0))?;
        }
        if self.version.supports::<Evlrs>() {
            let evlr = self.evlr.unwrap_or_default();
            write.write_u64::<LittleEndian>(evlr.start_of_first_evlr)?;
            write.write_u32::<LittleEndian>(evlr.number_of_evlrs)?;
        }
        if self.version.supports::<LargeFiles>() {
            let large_file = self.large_file.unwrap_or_default();
            write.write_u64::<LittleEndian>(large_file.number_of_point_records)?;
            for n in &large_file.number_of_points_by_return {
                write.write_u64::<LittleEndian>(*n)?;
            }
        }
        Ok(())
    }
}

impl Default for Header {
    fn default() -> Header {
        let version = Version::default();
        Header {
            file_signature: super::LASF,
            file_source_id: 0,
            global_encoding: 0,
            guid: [0; 16],
            version,
            system_identifier: [0; 32],
            generating_software: [0; 32],
            file_creation_day_of_year: 0,
            file_creation_year: 0,
            header_size: version.header_size(),
            offset_to_point_data: u32::from(version.header_size()),
            number_of_variable_length_records: 0,
            point_data_record_format: 0,
            point_data_record_length: 0,
            number_of_point_records: 0,
            number_of_points_by_return: [0; 5],
            x_scale_factor: 0.,
            y_scale_factor: 0.,
            z_scale_factor: 0.,
            x_offset: 0.,
            y_offset: 0.,
            z_offset: 0.,
            max_x: 0.,
            min_x: 0.,
            max_y: 0.,
            min_y: 0.,
            max_z: 0.,
            min_z: 0.,
            start_of_waveform_data_packet_record: None,
            evlr: None,
            large_file: None,
        }
    }
}
