//! Raw structures that map directly onto structures as defined in the las format specifications.
//!
//! These structures are "dumb": they do no validity checking, they just write themselves out
//! byte for byte. The [Header](crate::Header) and [Vlr](crate::Vlr) types convert into them.

pub mod header;
pub mod point;
pub mod vlr;

pub use self::header::Header;
pub use self::point::Point;
pub use self::vlr::Vlr;

/// The file magic number used for all las files.
pub const LASF: [u8; 4] = *b"LASF";

/// The point data start signature required by las 1.0, `0xCCDD` as a little-endian `u16`.
pub const POINT_DATA_START_SIGNATURE: [u8; 2] = [0xDD, 0xCC];
