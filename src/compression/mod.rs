//! Laszip compression of point records.
//!
//! Compression is optional at build time. Without the `laz` feature, [is_available] is false
//! and a writer refuses to be configured for compressed output.

use crate::Vlr;
#[cfg(feature = "laz")]
use crate::{Error, Result, point::Format};
#[cfg(feature = "laz")]
use std::fmt::Display;

/// The user id of the laszip vlr.
pub const LASZIP_USER_ID: &str = "laszip encoded";

/// The record id of the laszip vlr.
pub const LASZIP_RECORD_ID: u16 = 22204;

#[cfg(feature = "laz")]
const UNKNOWN_ERROR: &str = "(unknown error)";

/// Returns true if this build can write compressed points.
///
/// # Examples
///
/// ```
/// assert_eq!(cfg!(feature = "laz"), las_writer::compression::is_available());
/// ```
pub fn is_available() -> bool {
    cfg!(feature = "laz")
}

/// Returns true if this [Vlr] is the laszip vlr.
///
/// # Examples
///
/// ```
/// use las_writer::{compression, Vlr};
///
/// let mut vlr = Vlr::default();
/// assert!(!compression::is_laszip_vlr(&vlr));
/// vlr.user_id = "laszip encoded".to_string();
/// vlr.record_id = 22204;
/// assert!(compression::is_laszip_vlr(&vlr));
/// ```
pub fn is_laszip_vlr(vlr: &Vlr) -> bool {
    vlr.user_id == LASZIP_USER_ID && vlr.record_id == LASZIP_RECORD_ID
}

/// Wraps a codec failure, keeping the codec's own message.
#[cfg(feature = "laz")]
pub(crate) fn error(context: &'static str, err: impl Display) -> Error {
    let message = err.to_string();
    Error::Compression {
        context,
        message: if message.trim().is_empty() {
            UNKNOWN_ERROR.to_string()
        } else {
            message
        },
    }
}

/// Builds the laszip vlr for legacy point records with `extra_bytes` trailing bytes.
///
/// # Examples
///
/// ```
/// # #[cfg(feature = "laz")]
/// # {
/// use las_writer::{compression, point::Format};
/// let vlr = compression::laszip_vlr(Format::new(3).unwrap(), 2).unwrap();
/// assert!(compression::is_laszip_vlr(&vlr));
/// # }
/// ```
#[cfg(feature = "laz")]
pub fn laszip_vlr(format: Format, extra_bytes: u16) -> Result<Vlr> {
    use laz::{LazItemRecordBuilder, LazItemType, LazVlr};

    let mut laz_items = LazItemRecordBuilder::new();
    let _ = laz_items.add_item(LazItemType::Point10);
    if format.has_gps_time {
        let _ = laz_items.add_item(LazItemType::GpsTime);
    }
    if format.has_color {
        let _ = laz_items.add_item(LazItemType::RGB12);
    }
    if extra_bytes > 0 {
        let _ = laz_items.add_item(LazItemType::Byte(extra_bytes));
    }
    let laz_vlr = LazVlr::from_laz_items(laz_items.build());
    let mut data = Vec::new();
    laz_vlr.write_to(&mut data)?;
    Ok(Vlr::new(
        LASZIP_USER_ID,
        LASZIP_RECORD_ID,
        LazVlr::DESCRIPTION,
        data,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "laz")]
    #[test]
    fn error_message() {
        let err = error("Error opening compressor", "bad items");
        assert_eq!("Error opening compressor: bad items", err.to_string());
    }

    #[cfg(feature = "laz")]
    #[test]
    fn error_placeholder() {
        let err = error("Error writing point", "");
        assert_eq!("Error writing point: (unknown error)", err.to_string());
    }

    #[cfg(feature = "laz")]
    #[test]
    fn item_sizes() {
        use laz::LazVlr;
        for (id, extra, len) in [(0, 0, 20), (1, 0, 28), (2, 0, 26), (3, 4, 38)] {
            let vlr = laszip_vlr(Format::new(id).unwrap(), extra).unwrap();
            let laz_vlr = LazVlr::from_buffer(&vlr.data).unwrap();
            assert_eq!(len, laz_vlr.items_size());
        }
    }
}
