//! Point record formats and the encoding of points into records.

mod encoder;
pub mod extra_bytes;
mod format;
mod returns;

pub use self::extra_bytes::ExtraDim;
pub use self::format::Format;

pub(crate) use self::encoder::{Encoded, Encoder};
pub(crate) use self::extra_bytes::ExtraBytes;
