//! The resolved public header block.
//!
//! A [Header] holds what the writer decided when it became ready: the version, point format and
//! identifying fields. Counts, bounds and offsets only exist once the points are written, so the
//! raw header is built from a [Header] plus a [Summary] every time it is written.

mod builder;

pub use self::builder::Builder;

use crate::{
    Error, Result, Summary, Transform, Vector, Version,
    feature::{FileSourceId, GlobalEncoding, LargeFiles},
    point::Format,
    raw,
    utils::FromLasStr,
};
use uuid::Uuid;

/// The bit that laszip sets in the point format byte of compressed files.
const IS_COMPRESSED_MASK: u8 = 0x80;

/// Metadata describing the layout, source, and interpretation of the points.
#[derive(Clone, Debug, PartialEq)]
pub struct Header {
    /// The las version of this file.
    pub version: Version,

    /// The format of the point records.
    pub point_format: Format,

    /// The length of one point record, including extra bytes.
    pub point_data_record_length: u16,

    /// The four digit year of file creation.
    pub file_creation_year: u16,

    /// Day of the year of file creation, January 1 is day 1.
    pub file_creation_day_of_year: u16,

    /// The system that produced these points.
    pub system_identifier: String,

    /// The software that wrote this file.
    pub generating_software: String,

    /// The project id.
    pub guid: Uuid,

    /// Global properties, as a bit field.
    pub global_encoding: u16,

    /// The flight line or other source of these points.
    pub file_source_id: u16,

    /// Are the point records compressed?
    pub is_compressed: bool,
}

/// Where the variable length records ended up, relative to the start of the header.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Layout {
    pub(crate) number_of_vlrs: usize,
    pub(crate) offset_to_point_data: u64,
    pub(crate) evlr: Option<raw::header::Evlr>,
}

impl Header {
    /// Returns the number of bytes of extra data at the end of each point record.
    pub fn extra_bytes_len(&self) -> u16 {
        self.point_data_record_length
            .saturating_sub(self.point_format.len())
    }

    /// Builds the raw header for the points summarized so far.
    ///
    /// Bounds are zero until there's a point. Before las 1.4 the point count must fit into 32
    /// bits, and in 1.4 the legacy counts are zero when they don't.
    pub(crate) fn to_raw(
        &self,
        transforms: &Vector<Transform>,
        summary: &Summary,
        layout: &Layout,
    ) -> Result<raw::Header> {
        let number_of_points = summary.number_of_points();
        let by_return = summary.number_of_points_by_return();
        let large_file = self.version.supports::<LargeFiles>();
        let number_of_point_records = match u32::try_from(number_of_points) {
            Ok(n) => n,
            Err(_) if large_file => 0,
            Err(_) => {
                return Err(Error::TooManyPoints {
                    version: self.version,
                    count: number_of_points,
                });
            }
        };
        let mut number_of_points_by_return = [0; 5];
        for (legacy, &n) in number_of_points_by_return.iter_mut().zip(by_return) {
            *legacy = if number_of_point_records == 0 {
                0
            } else {
                u32::try_from(n).unwrap_or(0)
            };
        }

        let mut system_identifier = [0; 32];
        system_identifier.from_las_str(&self.system_identifier)?;
        let mut generating_software = [0; 32];
        generating_software.from_las_str(&self.generating_software)?;

        let bounds = summary.bounds();
        let (min, max) = if bounds.empty() {
            (Vector::default(), Vector::default())
        } else {
            (bounds.min, bounds.max)
        };
        let header_size = self.version.header_size();
        let mut point_data_record_format = self.point_format.to_u8();
        if self.is_compressed {
            point_data_record_format |= IS_COMPRESSED_MASK;
        }
        Ok(raw::Header {
            file_signature: raw::LASF,
            file_source_id: if self.version.supports::<FileSourceId>() {
                self.file_source_id
            } else {
                0
            },
            global_encoding: if self.version.supports::<GlobalEncoding>() {
                self.global_encoding
            } else {
                0
            },
            guid: self.guid.to_bytes_le(),
            version: self.version,
            system_identifier,
            generating_software,
            file_creation_day_of_year: self.file_creation_day_of_year,
            file_creation_year: self.file_creation_year,
            header_size,
            offset_to_point_data: u32::try_from(layout.offset_to_point_data)
                .map_err(|_| Error::OffsetToPointDataTooLarge(layout.offset_to_point_data))?,
            number_of_variable_length_records: layout.number_of_vlrs as u32,
            point_data_record_format,
            point_data_record_length: self.point_data_record_length,
            number_of_point_records,
            number_of_points_by_return,
            x_scale_factor: transforms.x.scale,
            y_scale_factor: transforms.y.scale,
            z_scale_factor: transforms.z.scale,
            x_offset: transforms.x.offset,
            y_offset: transforms.y.offset,
            z_offset: transforms.z.offset,
            max_x: max.x,
            min_x: min.x,
            max_y: max.y,
            min_y: min.y,
            max_z: max.z,
            min_z: min.z,
            start_of_waveform_data_packet_record: None,
            evlr: layout.evlr,
            large_file: large_file.then(|| raw::header::LargeFile {
                number_of_point_records: number_of_points,
                number_of_points_by_return: *by_return,
            }),
        })
    }
}

impl Default for Header {
    fn default() -> Header {
        let point_format = Format::default();
        Header {
            version: Version::default(),
            point_format,
            point_data_record_length: point_format.len(),
            file_creation_year: 0,
            file_creation_day_of_year: 0,
            system_identifier: builder::SYSTEM_IDENTIFIER.to_string(),
            generating_software: builder::generating_software(),
            guid: Uuid::nil(),
            global_encoding: 0,
            file_source_id: 0,
            is_compressed: false,
        }
    }
}
