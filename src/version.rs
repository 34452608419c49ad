use crate::{
    feature::{self, Evlrs, Feature, LargeFiles, Waveforms},
    point::Format,
};
use std::fmt;

/// LAS version.
///
/// Defaults to 1.2.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    /// The major version.
    ///
    /// Should always be 1.
    pub major: u8,
    /// The minor version.
    ///
    /// Should be between 0 and 4.
    pub minor: u8,
}

impl Version {
    /// Creates a new version.
    ///
    /// # Examples
    ///
    /// ```
    /// # use las_writer::Version;
    /// let version = Version::new(1, 2);
    /// ```
    pub fn new(major: u8, minor: u8) -> Version {
        Version { major, minor }
    }

    /// Checks whether this version supports the feature.
    ///
    /// # Examples
    ///
    /// ```
    /// # use las_writer::{feature::Evlrs, Version};
    /// assert!(!Version::new(1, 2).supports::<Evlrs>());
    /// assert!(Version::new(1, 4).supports::<Evlrs>());
    /// ```
    pub fn supports<F: Feature>(&self) -> bool {
        feature::is_supported_by::<F>(*self)
    }

    /// Returns the size of the public header block for this version.
    ///
    /// # Examples
    ///
    /// ```
    /// # use las_writer::Version;
    /// assert_eq!(227, Version::new(1, 2).header_size());
    /// assert_eq!(235, Version::new(1, 3).header_size());
    /// assert_eq!(375, Version::new(1, 4).header_size());
    /// ```
    pub fn header_size(&self) -> u16 {
        if self.supports::<LargeFiles>() {
            375
        } else if self.supports::<Evlrs>() || self.supports::<Waveforms>() {
            235
        } else {
            227
        }
    }

    /// Returns true if this is a las version this crate can write, 1.0 through 1.4.
    pub fn is_supported(&self) -> bool {
        self.major == 1 && self.minor <= 4
    }

    /// Does this version have this point format?
    ///
    /// # Examples
    ///
    /// ```
    /// # use las_writer::{point::Format, Version};
    /// let format = Format::new(3).unwrap();
    /// assert!(!Version::new(1, 1).supports_point_format(format));
    /// assert!(Version::new(1, 2).supports_point_format(format));
    /// ```
    pub fn supports_point_format(&self, format: Format) -> bool {
        let minor = match format.to_u8() {
            0 | 1 => 0,
            2 | 3 => 2,
            4 | 5 => 3,
            _ => 4,
        };
        self.major == 1 && self.minor >= minor
    }

    /// Las 1.0 files mark the end of the vlrs with a two-byte signature.
    pub fn requires_point_data_start_signature(&self) -> bool {
        *self == Version::new(1, 0)
    }

    /// The value of the reserved field at the start of each vlr.
    ///
    /// # Examples
    ///
    /// ```
    /// # use las_writer::Version;
    /// assert_eq!(0xAABB, Version::new(1, 0).vlr_reserved());
    /// assert_eq!(0, Version::new(1, 2).vlr_reserved());
    /// ```
    pub fn vlr_reserved(&self) -> u16 {
        if self.requires_point_data_start_signature() {
            0xAABB
        } else {
            0
        }
    }
}

impl Default for Version {
    fn default() -> Version {
        Version::new(1, 2)
    }
}

impl From<(u8, u8)> for Version {
    fn from((major, minor): (u8, u8)) -> Version {
        Version { major, minor }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}
