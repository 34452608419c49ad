//! The optional header blocks and fields, by the las version that introduced them.
//!
//! ```
//! use las_writer::feature::{LargeFiles, Waveforms};
//! use las_writer::Version;
//!
//! assert!(!Version::new(1, 2).supports::<Waveforms>());
//! assert!(Version::new(1, 3).supports::<Waveforms>());
//! assert!(Version::new(1, 4).supports::<LargeFiles>());
//! ```

use crate::Version;

/// A part of the header that only exists from some las 1.x version on.
pub trait Feature {
    /// The first minor version that has it.
    const SINCE: u8;
}

/// The header carries a file source id, rather than a reserved field (1.1).
#[derive(Clone, Copy, Debug)]
pub struct FileSourceId;

impl Feature for FileSourceId {
    const SINCE: u8 = 1;
}

/// The header carries a global encoding bit field (1.2).
#[derive(Clone, Copy, Debug)]
pub struct GlobalEncoding;

impl Feature for GlobalEncoding {
    const SINCE: u8 = 2;
}

/// The header carries the start of the waveform data packet record (1.3).
#[derive(Clone, Copy, Debug)]
pub struct Waveforms;

impl Feature for Waveforms {
    const SINCE: u8 = 3;
}

/// The header carries 64-bit point counts (1.4).
#[derive(Clone, Copy, Debug)]
pub struct LargeFiles;

impl Feature for LargeFiles {
    const SINCE: u8 = 4;
}

/// The header carries the location and count of extended variable length records (1.4).
#[derive(Clone, Copy, Debug)]
pub struct Evlrs;

impl Feature for Evlrs {
    const SINCE: u8 = 4;
}

pub(crate) fn is_supported_by<F: Feature>(version: Version) -> bool {
    version.major == 1 && version.minor >= F::SINCE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_source_id() {
        assert!(!is_supported_by::<FileSourceId>(Version::new(1, 0)));
        assert!(is_supported_by::<FileSourceId>(Version::new(1, 1)));
        assert!(is_supported_by::<FileSourceId>(Version::new(1, 4)));
    }

    #[test]
    fn evlrs_are_1_4_only() {
        for minor in 0..4 {
            assert!(!is_supported_by::<Evlrs>(Version::new(1, minor)));
        }
        assert!(is_supported_by::<Evlrs>(Version::new(1, 4)));
        assert!(!is_supported_by::<Evlrs>(Version::new(2, 4)));
    }
}
