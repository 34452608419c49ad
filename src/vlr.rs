//! Variable length records are used to store additional metadata not defined in the header.
//!
//! Variable length records (vlrs) can be "regular" or "extended". Regular vlrs are stored right
//! after the header, before the point records. Extended vlrs (evlrs) are stored at the end of the
//! file, after the point records. A record becomes extended only because its data is too large
//! for a regular one:
//!
//! ```
//! use las_writer::vlr::{Vlr, Vlrs, MAX_DATA_SIZE};
//!
//! let mut vlrs = Vlrs::default();
//! vlrs.add(Vlr::new("gadomski", 42, "small", vec![0; 3]));
//! vlrs.add(Vlr::new("gadomski", 43, "big", vec![0; MAX_DATA_SIZE + 1]));
//! assert_eq!(1, vlrs.vlrs().len());
//! assert_eq!(1, vlrs.evlrs().len());
//! ```

use crate::{Error, Result, raw, utils::FromLasStr};

/// The largest data payload a regular vlr can carry.
pub const MAX_DATA_SIZE: usize = u16::MAX as usize;

/// The size of a regular vlr header.
pub const HEADER_SIZE: usize = 54;

/// The size of an extended vlr header.
pub const EVLR_HEADER_SIZE: usize = 60;

/// User id of records defined by the las specification.
pub const SPEC_USER_ID: &str = "LASF_Spec";
/// Record id of the extra bytes descriptor.
pub const EXTRA_BYTES_RECORD_ID: u16 = 4;
/// User id of the projection records.
pub const TRANSFORM_USER_ID: &str = "LASF_Projection";
/// User id of the liblas copy of the wkt record.
pub const LIBLAS_USER_ID: &str = "liblas";
/// Record id of the GeoKeyDirectoryTag record.
pub const GEOTIFF_DIRECTORY_RECORD_ID: u16 = 34735;
/// Record id of the GeoDoubleParamsTag record.
pub const GEOTIFF_DOUBLES_RECORD_ID: u16 = 34736;
/// Record id of the GeoAsciiParamsTag record.
pub const GEOTIFF_ASCII_RECORD_ID: u16 = 34737;
/// Record id of the ogc wkt record.
pub const WKT_RECORD_ID: u16 = 2112;

/// A variable length record.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Vlr {
    /// The user that created this record.
    ///
    /// This value is often an official, "registered" user_id, such as "LASF_Spec" or
    /// "LASF_Projection".
    pub user_id: String,

    /// This value specifies the type of record, and depends on the user id.
    pub record_id: u16,

    /// Textual description of these data.
    pub description: String,

    /// The data themselves.
    pub data: Vec<u8>,
}

impl Vlr {
    /// Creates a new vlr.
    pub fn new(user_id: &str, record_id: u16, description: &str, data: Vec<u8>) -> Vlr {
        Vlr {
            user_id: user_id.to_string(),
            record_id,
            description: description.to_string(),
            data,
        }
    }

    /// Converts this vlr to a raw vlr.
    ///
    /// `reserved` is written as-is at the start of the record.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_writer::Vlr;
    /// let raw_vlr = Vlr::default().into_raw(false, 0).unwrap();
    /// let raw_evlr = Vlr::default().into_raw(true, 0).unwrap();
    /// assert!(raw_evlr.is_extended());
    /// ```
    pub fn into_raw(self, is_extended: bool, reserved: u16) -> Result<raw::Vlr> {
        let mut user_id = [0; 16];
        user_id.from_las_str(&self.user_id)?;
        let mut description = [0; 32];
        description.from_las_str(&self.description)?;
        let record_length_after_header = if is_extended {
            raw::vlr::RecordLength::Evlr(self.data.len() as u64)
        } else if self.data.len() > MAX_DATA_SIZE {
            return Err(Error::VlrDataTooLong(self.data.len()));
        } else {
            raw::vlr::RecordLength::Vlr(self.data.len() as u16)
        };
        Ok(raw::Vlr {
            reserved,
            user_id,
            record_id: self.record_id,
            record_length_after_header,
            description,
            data: self.data,
        })
    }

    /// Returns the total length of this vlr, header and data.
    ///
    /// # Examples
    ///
    /// ```
    /// # use las_writer::Vlr;
    /// let vlr = Vlr::default();
    /// assert_eq!(54, vlr.len(false));
    /// assert_eq!(60, vlr.len(true));
    /// ```
    pub fn len(&self, is_extended: bool) -> usize {
        self.data.len()
            + if is_extended {
                EVLR_HEADER_SIZE
            } else {
                HEADER_SIZE
            }
    }

    /// Returns true if the data of this vlr is too long for a regular vlr.
    pub fn has_large_data(&self) -> bool {
        self.data.len() > MAX_DATA_SIZE
    }
}

/// The ordered vlrs and evlrs of one file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Vlrs {
    vlrs: Vec<Vlr>,
    evlrs: Vec<Vlr>,
}

impl Vlrs {
    /// Adds a record, as an evlr if its data is too large for a regular vlr.
    ///
    /// The choice is final, and both lists keep insertion order.
    pub fn add(&mut self, vlr: Vlr) {
        if vlr.has_large_data() {
            self.evlrs.push(vlr);
        } else {
            self.vlrs.push(vlr);
        }
    }

    /// The regular vlrs, written after the header.
    pub fn vlrs(&self) -> &[Vlr] {
        &self.vlrs
    }

    /// The extended vlrs, written after the points.
    pub fn evlrs(&self) -> &[Vlr] {
        &self.evlrs
    }

    /// The number of bytes the regular vlrs take up in the file.
    pub fn vlrs_len(&self) -> usize {
        self.vlrs.iter().map(|vlr| vlr.len(false)).sum()
    }
}
