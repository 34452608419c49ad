use super::Header;
use crate::{Error, Metadata, Options, Result, Version, point::Format};
use chrono::{Datelike, Utc};
use uuid::Uuid;

/// The system identifier used when none is configured or forwarded.
pub(crate) const SYSTEM_IDENTIFIER: &str = "las-writer";

pub(crate) fn generating_software() -> String {
    format!("las-writer {}", env!("CARGO_PKG_VERSION"))
}

/// Builds a [Header] from writer options and source metadata.
///
/// Each field is resolved in order from: the source metadata, if forwarding is asked for and the
/// value is there; the explicit option; a computed default. Default creation dates are taken from
/// the clock, and the default project id is random.
///
/// # Examples
///
/// ```
/// use las_writer::{header::Builder, HeaderValue, Metadata, Options};
///
/// let mut metadata = Metadata::default();
/// metadata.set_header_value("minor_version", "4");
/// let options = Options {
///     format: HeaderValue::Value(1),
///     minor_version: HeaderValue::Forward,
///     ..Default::default()
/// };
/// let header = Builder::new(&options)
///     .metadata(Some(&metadata))
///     .into_header(0)
///     .unwrap();
/// assert_eq!(1, header.point_format.to_u8());
/// assert_eq!(4, header.version.minor);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Builder<'a> {
    options: &'a Options,
    metadata: Option<&'a Metadata>,
}

impl<'a> Builder<'a> {
    /// Creates a builder that resolves against these options.
    pub fn new(options: &'a Options) -> Builder<'a> {
        Builder {
            options,
            metadata: None,
        }
    }

    /// Sets the metadata that forwarded values are copied from.
    pub fn metadata(mut self, metadata: Option<&'a Metadata>) -> Builder<'a> {
        self.metadata = metadata;
        self
    }

    /// Resolves every field and validates the version and point format.
    ///
    /// `extra_bytes_len` is added to the format's base record length.
    pub fn into_header(self, extra_bytes_len: u16) -> Result<Header> {
        let options = self.options;
        let forward = options.forward_metadata;
        let metadata = self.metadata;
        let now = Utc::now();

        let format_id = options.format.resolve("format", forward, metadata, || 3);
        let minor = options
            .minor_version
            .resolve("minor_version", forward, metadata, || 2);
        let version = Version::new(options.major_version, minor);
        if !version.is_supported() {
            return Err(Error::UnsupportedVersion(version));
        }
        let point_format = Format::new(format_id)?;
        if !version.supports_point_format(point_format) {
            return Err(Error::Format {
                version,
                format: format_id,
            });
        }
        let point_data_record_length = point_format
            .len()
            .checked_add(extra_bytes_len)
            .ok_or_else(|| Error::InvalidOption {
                key: "extra_dims".to_string(),
                value: format!("{} extra bytes", extra_bytes_len),
            })?;

        Ok(Header {
            version,
            point_format,
            point_data_record_length,
            file_creation_year: options.creation_year.resolve(
                "creation_year",
                forward,
                metadata,
                || now.year() as u16,
            ),
            file_creation_day_of_year: options.creation_doy.resolve(
                "creation_doy",
                forward,
                metadata,
                || now.ordinal() as u16,
            ),
            system_identifier: options.system_id.resolve("system_id", forward, metadata, || {
                SYSTEM_IDENTIFIER.to_string()
            }),
            generating_software: options.software_id.resolve(
                "software_id",
                forward,
                metadata,
                generating_software,
            ),
            guid: options
                .project_id
                .resolve("project_id", forward, metadata, Uuid::new_v4),
            global_encoding: options
                .global_encoding
                .resolve("global_encoding", forward, metadata, || 0),
            file_source_id: options
                .filesource_id
                .resolve("filesource_id", forward, metadata, || 0),
            is_compressed: options.compression,
        })
    }
}
