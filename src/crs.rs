//! Coordinate reference system data, stored in the header's variable length records.
//!
//! A CRS is written as [WKT](https://en.wikipedia.org/wiki/Well-known_text_representation_of_geometry)
//! and, when a translator has already produced them, as the three
//! [GeoTiff tags](https://docs.ogc.org/is/19-008r4/19-008r4.html) records. The writer never
//! interprets either one.

use crate::{
    Vlr,
    vlr::{
        GEOTIFF_ASCII_RECORD_ID, GEOTIFF_DIRECTORY_RECORD_ID, GEOTIFF_DOUBLES_RECORD_ID,
        LIBLAS_USER_ID, TRANSFORM_USER_ID, WKT_RECORD_ID,
    },
};
use log::{Level, log};

/// Pre-translated GeoTiff key blobs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GeoTiffKeys {
    /// GeoKeyDirectoryTag data.
    pub directory: Vec<u8>,
    /// GeoDoubleParamsTag data.
    pub doubles: Vec<u8>,
    /// GeoAsciiParamsTag data.
    pub ascii: Vec<u8>,
}

/// A spatial reference, carried opaquely.
///
/// # Examples
///
/// ```
/// use las_writer::SpatialReference;
///
/// let srs = SpatialReference::from_wkt("GEOGCS[\"WGS 84\"]");
/// let vlrs = srs.vlrs();
/// assert_eq!(2, vlrs.len());
/// assert_eq!(b"GEOGCS[\"WGS 84\"]\0", vlrs[0].data.as_slice());
/// assert!(SpatialReference::default().vlrs().is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpatialReference {
    /// The well known text.
    pub wkt: String,
    /// GeoTiff keys, if something translated the wkt.
    pub geotiff: Option<GeoTiffKeys>,
}

impl SpatialReference {
    /// Creates a spatial reference from well known text.
    pub fn from_wkt(wkt: &str) -> SpatialReference {
        SpatialReference {
            wkt: wkt.trim().to_string(),
            geotiff: None,
        }
    }

    /// Returns true if there's nothing to write.
    pub fn is_empty(&self) -> bool {
        self.wkt.is_empty() && self.geotiff.is_none()
    }

    /// Builds the projection vlrs: the GeoTiff records that have data, then the wkt twice, under
    /// the projection and liblas user ids. The wkt is nul terminated.
    pub fn vlrs(&self) -> Vec<Vlr> {
        let mut vlrs = Vec::new();
        if let Some(geotiff) = &self.geotiff {
            for (record_id, description, data) in [
                (
                    GEOTIFF_DIRECTORY_RECORD_ID,
                    "GeoTiff GeoKeyDirectoryTag",
                    &geotiff.directory,
                ),
                (
                    GEOTIFF_DOUBLES_RECORD_ID,
                    "GeoTiff GeoDoubleParamsTag",
                    &geotiff.doubles,
                ),
                (
                    GEOTIFF_ASCII_RECORD_ID,
                    "GeoTiff GeoAsciiParamsTag",
                    &geotiff.ascii,
                ),
            ] {
                if data.is_empty() {
                    log!(Level::Debug, "skipping empty geotiff record {}", record_id);
                    continue;
                }
                vlrs.push(Vlr::new(TRANSFORM_USER_ID, record_id, description, data.clone()));
            }
        }
        if !self.wkt.is_empty() {
            let mut data = self.wkt.as_bytes().to_vec();
            data.push(0);
            vlrs.push(Vlr::new(
                TRANSFORM_USER_ID,
                WKT_RECORD_ID,
                "OGC Transformation Record",
                data.clone(),
            ));
            vlrs.push(Vlr::new(
                LIBLAS_USER_ID,
                WKT_RECORD_ID,
                "OGR variant of OpenGIS WKT SRS",
                data,
            ));
        }
        vlrs
    }
}
