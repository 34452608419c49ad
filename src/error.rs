use crate::{Axis, Transform, Version, writer::State};
use thiserror::Error;

/// Crate-specific error enum.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The base64 payload of a vlr option could not be decoded.
    #[error("invalid base64 data for vlr with user id {user_id} and record id {record_id}: {source}")]
    Base64 {
        /// The vlr user id.
        user_id: String,
        /// The vlr record id.
        record_id: u16,
        /// The decoding error.
        source: base64::DecodeError,
    },

    /// Compression was requested, but this build does not include a codec.
    #[error("can't write laz output, compression is unsupported in this build (enable the laz feature)")]
    CompressionUnsupported,

    /// The compressor failed.
    #[error("{context}: {message}")]
    Compression {
        /// What the writer was doing, e.g. "Error opening compressor".
        context: &'static str,
        /// The codec's own error text.
        message: String,
    },

    /// A coordinate can't be represented as an `i32` with this transform.
    #[error("the {axis} coordinate {value} is out of range for transform {transform}")]
    CoordinateOverflow {
        /// The axis of the coordinate.
        axis: Axis,
        /// The real-world value.
        value: f64,
        /// The transform that was applied.
        transform: Transform,
    },

    /// A field value doesn't fit into the type the las format stores it as.
    #[error("value {value} of dimension {name} does not fit into the las field")]
    FieldOverflow {
        /// The dimension name.
        name: String,
        /// The value.
        value: f64,
    },

    /// This las version doesn't have this point format.
    #[error("las {version} does not support point format {format}")]
    Format {
        /// The las version.
        version: Version,
        /// The point format id.
        format: u8,
    },

    /// The text is not a bracketed bounds description.
    #[error("invalid bounds: {0}")]
    InvalidBounds(String),

    /// A lifecycle method was called out of order.
    #[error("the writer is in state {actual:?}, but this operation requires {expected:?}")]
    InvalidState {
        /// The state the operation needs.
        expected: State,
        /// The state the writer is in.
        actual: State,
    },

    /// An option could not be parsed.
    #[error("invalid value for option {key}: {value}")]
    InvalidOption {
        /// The option name.
        key: String,
        /// The offending value.
        value: String,
    },

    /// Wrapper around `std::io::Error`.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// No file name was given to a writer that has to create its own file.
    #[error("no filename was provided")]
    MissingFilename,

    /// This string is not ASCII.
    #[error("this string is not ascii: {0}")]
    NotAscii(String),

    /// The vlrs are too long for the header's 32-bit offset to the point data.
    #[error("the offset to point data is too large: {0}")]
    OffsetToPointDataTooLarge(u64),

    /// The number of points can't be stored in the header of this version.
    #[error("las {version} can't store {count} points")]
    TooManyPoints {
        /// The las version.
        version: Version,
        /// The number of points.
        count: u64,
    },

    /// The string is too long for its fixed-width field.
    #[error("string is too long for a field of length {len}: {string}")]
    StringTooLong {
        /// The string.
        string: String,
        /// The field length.
        len: usize,
    },

    /// The vlr data is too long for a regular vlr.
    #[error("the vlr is too long: {0}")]
    VlrDataTooLong(usize),

    /// The dimension named in the extra dimensions list is not part of the point table.
    #[error("dimension '{0}' specified in 'extra_dims' option not found")]
    UnknownExtraDimension(String),

    /// The type named for an extra dimension is not known.
    #[error("unknown type '{type_name}' for extra dimension '{name}'")]
    UnknownDataType {
        /// The dimension name.
        name: String,
        /// The type name.
        type_name: String,
    },

    /// Only las 1.0 through 1.4 can be written.
    #[error("unsupported las version: {0}")]
    UnsupportedVersion(Version),

    /// The point format can't be written.
    #[error("unsupported las output point format: {0}")]
    UnsupportedPointFormat(u8),
}
