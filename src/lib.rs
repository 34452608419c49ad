//! Write [ASPRS LAS](https://www.asprs.org/committee-general/laser-las-file-format-exchange-activities.html)
//! point cloud data.
//!
//! Points come from a [PointTable], which describes their dimensions, and are read through a
//! [PointView]. A [PointBuffer] is a simple in-memory implementation of both:
//!
//! ```
//! use las_writer::{PointBuffer, table::{DataType, Layout, dimension}};
//!
//! let mut layout = Layout::xyz();
//! let _ = layout.add(dimension::INTENSITY, DataType::Unsigned16);
//! let mut buffer = PointBuffer::new(layout);
//! buffer.push(&[1., 2., 3., 42.]).unwrap();
//! ```
//!
//! # Writing
//!
//! A [Writer] writes to anything that implements `Write` and `Seek`, since the header is rewritten
//! once all the points are known:
//!
//! ```
//! use std::io::Cursor;
//! use las_writer::{Options, PointBuffer, Writer};
//!
//! let mut buffer = PointBuffer::xyz();
//! buffer.push_xyz(1., 2., 3.).unwrap();
//!
//! let mut writer = Writer::new(Cursor::new(Vec::new()));
//! writer.write_all_from(&Options::default(), &buffer, &buffer).unwrap();
//! let bytes = writer.into_inner().unwrap().into_inner();
//! assert_eq!(b"LASF", &bytes[0..4]);
//! ```
//!
//! You can also write to the file named in the options (automatically buffered with
//! `BufWriter`):
//!
//! ```
//! use las_writer::{Options, Writer};
//! let options = Options::from_pairs([("filename", "/dev/null"), ("format", "1")]).unwrap();
//! let writer = Writer::from_options(options).unwrap();
//! ```
//!
//! ## Header values
//!
//! Most header fields can be set explicitly, or forwarded from the [Metadata] of the point
//! table, or left to a default. See [HeaderValue].
//!
//! ## Compression
//!
//! If compiled with laz you can compress the points:
//!
//! ```
//! use std::io::Cursor;
//! use las_writer::{Options, PointBuffer, Writer};
//!
//! let options = Options {
//!     compression: true,
//!     ..Default::default()
//! };
//! let mut writer = Writer::new(Cursor::new(Vec::new()));
//! let result = writer.write_all_from(&options, &PointBuffer::xyz(), &PointBuffer::xyz());
//! assert_eq!(cfg!(feature = "laz"), result.is_ok());
//! ```

#![deny(
    missing_docs,
    missing_debug_implementations,
    trivial_casts,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications
)]

pub mod compression;
pub mod feature;
pub mod header;
pub mod options;
pub mod point;
pub mod raw;
pub mod table;
pub mod vlr;
pub mod writer;

mod bounds;
mod crs;
mod error;
mod metadata;
mod summary;
mod transform;
mod utils;
mod vector;
mod version;

pub use crate::bounds::Bounds;
pub use crate::crs::{GeoTiffKeys, SpatialReference};
pub use crate::error::Error;
pub use crate::feature::Feature;
pub use crate::header::Header;
pub use crate::metadata::{Metadata, VlrEntry};
pub use crate::options::{HeaderValue, Options, VlrOption};
pub use crate::summary::Summary;
pub use crate::table::{PointBuffer, PointTable, PointView};
pub use crate::transform::{Offset, Transform};
pub use crate::vector::{Axis, Vector};
pub use crate::version::Version;
pub use crate::vlr::Vlr;
pub use crate::writer::{State, Writer};

/// Crate-specific result type.
pub type Result<T> = std::result::Result<T, Error>;
