//! Writer configuration.
//!
//! [Options] has one public field per setting, so it can be built in code:
//!
//! ```
//! use las_writer::{HeaderValue, Options};
//!
//! let options = Options {
//!     format: HeaderValue::Value(1),
//!     minor_version: HeaderValue::Value(4),
//!     ..Default::default()
//! };
//! ```
//!
//! or from string key/value pairs:
//!
//! ```
//! use las_writer::{HeaderValue, Options, Offset};
//!
//! let mut options = Options::default();
//! options.set("format", "1").unwrap();
//! options.set("minor_version", "FORWARD").unwrap();
//! options.set("offset_x", "auto").unwrap();
//! assert_eq!(HeaderValue::Value(1), options.format);
//! assert_eq!(HeaderValue::Forward, options.minor_version);
//! assert_eq!(Offset::Auto, options.offset.x);
//! assert!(options.set("format", "three").is_err());
//! ```

use crate::{
    Axis, Error, Metadata, Offset, Result, SpatialReference, Vector,
    point::{ExtraDim, extra_bytes},
    transform::DEFAULT_SCALE,
};
use std::{path::PathBuf, str::FromStr};
use uuid::Uuid;

/// The marker that asks for a value to be forwarded from source metadata.
pub const FORWARD: &str = "FORWARD";

/// Where a header field's value comes from.
#[derive(Clone, Debug, PartialEq)]
pub enum HeaderValue<T> {
    /// Computed by the writer.
    Default,
    /// Copied from the source metadata if it's there, otherwise computed by the writer.
    Forward,
    /// Set explicitly.
    Value(T),
}

impl<T> Default for HeaderValue<T> {
    fn default() -> HeaderValue<T> {
        HeaderValue::Default
    }
}

impl<T: FromStr> HeaderValue<T> {
    /// Parses a value, or the case-insensitive [FORWARD] marker.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_writer::HeaderValue;
    /// assert_eq!(HeaderValue::Forward, HeaderValue::<u8>::parse("forward").unwrap());
    /// assert_eq!(HeaderValue::Value(3), HeaderValue::<u8>::parse(" 3 ").unwrap());
    /// assert!(HeaderValue::<u8>::parse("256").is_none());
    /// ```
    pub fn parse(s: &str) -> Option<HeaderValue<T>> {
        let s = s.trim();
        if s.eq_ignore_ascii_case(FORWARD) {
            Some(HeaderValue::Forward)
        } else {
            s.parse().ok().map(HeaderValue::Value)
        }
    }

    /// Resolves this value: forwarded metadata first, then the explicit value, then the default.
    ///
    /// A forwarded value that's missing or doesn't parse falls back to the default.
    pub(crate) fn resolve<F>(
        &self,
        name: &str,
        forward_all: bool,
        metadata: Option<&Metadata>,
        default: F,
    ) -> T
    where
        T: Clone,
        F: FnOnce() -> T,
    {
        let forward = match self {
            HeaderValue::Forward => true,
            HeaderValue::Default => forward_all,
            HeaderValue::Value(_) => false,
        };
        if forward {
            match metadata.and_then(|metadata| metadata.header_value(name)) {
                Some(value) => match value.trim().parse() {
                    Ok(value) => return value,
                    Err(_) => log::warn!("could not forward {}, invalid value: {}", name, value),
                },
                None => log::debug!("no metadata to forward for {}, using default", name),
            }
        }
        match self {
            HeaderValue::Value(value) => value.clone(),
            _ => default(),
        }
    }
}

/// A vlr to add to the file, from explicit data or forwarded from source metadata.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VlrOption {
    /// The record id.
    pub record_id: u16,
    /// The user id.
    pub user_id: String,
    /// The description.
    pub description: String,
    /// The base64 encoded data. Ignored when forwarding.
    pub value: String,
    /// Copy the data from the source metadata's vlr with the same record and user id.
    ///
    /// If there's no such vlr, nothing is written.
    pub forward: bool,
}

impl FromStr for VlrOption {
    type Err = Error;

    /// Parses `user_id,record_id,value[,description]`, where a value of `FORWARD` forwards.
    fn from_str(s: &str) -> Result<VlrOption> {
        let invalid = || Error::InvalidOption {
            key: "vlr".to_string(),
            value: s.to_string(),
        };
        let mut parts = s.splitn(4, ',').map(str::trim);
        let user_id = parts.next().filter(|s| !s.is_empty()).ok_or_else(invalid)?;
        let record_id = parts
            .next()
            .and_then(|s| s.parse().ok())
            .ok_or_else(invalid)?;
        let value = parts.next().ok_or_else(invalid)?;
        let description = parts.next().unwrap_or("");
        let forward = value.eq_ignore_ascii_case(FORWARD);
        Ok(VlrOption {
            record_id,
            user_id: user_id.to_string(),
            description: description.to_string(),
            value: if forward { String::new() } else { value.to_string() },
            forward,
        })
    }
}

/// Writer configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct Options {
    /// The output path, used when the writer creates its own file.
    pub filename: Option<PathBuf>,

    /// Laszip compress the points.
    pub compression: bool,

    /// The point format, defaults to 3.
    pub format: HeaderValue<u8>,

    /// The las major version. Only 1 is valid.
    pub major_version: u8,

    /// The las minor version, defaults to 2.
    pub minor_version: HeaderValue<u8>,

    /// Day of year of file creation, defaults to today.
    pub creation_doy: HeaderValue<u16>,

    /// Year of file creation, defaults to this year.
    pub creation_year: HeaderValue<u16>,

    /// The system identifier.
    pub system_id: HeaderValue<String>,

    /// The generating software.
    pub software_id: HeaderValue<String>,

    /// The project id, defaults to a random uuid.
    pub project_id: HeaderValue<Uuid>,

    /// The global encoding bits.
    pub global_encoding: HeaderValue<u16>,

    /// The file source id.
    pub filesource_id: HeaderValue<u16>,

    /// Forward every header field that isn't set explicitly.
    pub forward_metadata: bool,

    /// Dimensions to write as extra bytes, in order.
    pub extra_dims: Vec<ExtraDim>,

    /// Overrides the point table's spatial reference.
    pub spatial_reference: Option<SpatialReference>,

    /// Drop points whose return number is too high for the point format.
    pub discard_high_return_numbers: bool,

    /// Per-axis scale.
    pub scale: Vector<f64>,

    /// Per-axis offset.
    pub offset: Vector<Offset>,

    /// Extra vlrs.
    pub vlrs: Vec<VlrOption>,
}

impl Options {
    /// Sets an option from its string form.
    ///
    /// Unknown keys are ignored.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "filename" => {
                self.filename = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                }
            }
            "compression" => self.compression = parse_bool(key, value)?,
            "format" => self.format = parse_header_value(key, value)?,
            "major_version" => self.major_version = parse(key, value)?,
            "minor_version" => self.minor_version = parse_header_value(key, value)?,
            "creation_doy" => self.creation_doy = parse_header_value(key, value)?,
            "creation_year" => self.creation_year = parse_header_value(key, value)?,
            "system_id" => self.system_id = parse_header_value(key, value)?,
            "software_id" => self.software_id = parse_header_value(key, value)?,
            "project_id" => self.project_id = parse_header_value(key, value)?,
            "global_encoding" => self.global_encoding = parse_header_value(key, value)?,
            "filesource_id" => self.filesource_id = parse_header_value(key, value)?,
            "forward_metadata" => self.forward_metadata = parse_bool(key, value)?,
            "extra_dims" => self.extra_dims = extra_bytes::parse_list(value)?,
            "a_srs" => {
                self.spatial_reference = if value.trim().is_empty() {
                    None
                } else {
                    Some(SpatialReference::from_wkt(value))
                }
            }
            "discard_high_return_numbers" => {
                self.discard_high_return_numbers = parse_bool(key, value)?
            }
            "vlr" => self.vlrs.push(value.parse()?),
            _ => {
                if let Some((axis, is_scale)) = axis_key(key) {
                    if is_scale {
                        let scale: f64 = parse(key, value)?;
                        if scale == 0. || !scale.is_finite() {
                            return Err(invalid(key, value));
                        }
                        *self.scale.get_mut(axis) = scale;
                    } else if value.trim().eq_ignore_ascii_case("auto") {
                        *self.offset.get_mut(axis) = Offset::Auto;
                    } else {
                        *self.offset.get_mut(axis) = Offset::Value(parse(key, value)?);
                    }
                } else {
                    log::debug!("ignoring unknown option {}={}", key, value);
                }
            }
        }
        Ok(())
    }

    /// Creates options from key/value pairs, applied in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_writer::Options;
    /// let options = Options::from_pairs([("compression", "false"), ("scale_x", "0.001")]).unwrap();
    /// assert_eq!(0.001, options.scale.x);
    /// ```
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Options>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut options = Options::default();
        for (key, value) in pairs {
            options.set(key.as_ref(), value.as_ref())?;
        }
        Ok(options)
    }
}

impl Default for Options {
    fn default() -> Options {
        Options {
            filename: None,
            compression: false,
            format: HeaderValue::Default,
            major_version: 1,
            minor_version: HeaderValue::Default,
            creation_doy: HeaderValue::Default,
            creation_year: HeaderValue::Default,
            system_id: HeaderValue::Default,
            software_id: HeaderValue::Default,
            project_id: HeaderValue::Default,
            global_encoding: HeaderValue::Default,
            filesource_id: HeaderValue::Default,
            forward_metadata: false,
            extra_dims: Vec::new(),
            spatial_reference: None,
            discard_high_return_numbers: false,
            scale: Vector::splat(DEFAULT_SCALE),
            offset: Vector::default(),
            vlrs: Vec::new(),
        }
    }
}

fn axis_key(key: &str) -> Option<(Axis, bool)> {
    let (prefix, axis) = key.rsplit_once('_')?;
    let axis = match axis {
        "x" => Axis::X,
        "y" => Axis::Y,
        "z" => Axis::Z,
        _ => return None,
    };
    match prefix {
        "scale" => Some((axis, true)),
        "offset" => Some((axis, false)),
        _ => None,
    }
}

fn invalid(key: &str, value: &str) -> Error {
    Error::InvalidOption {
        key: key.to_string(),
        value: value.to_string(),
    }
}

fn parse<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| invalid(key, value))
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" | "" => Ok(false),
        _ => Err(invalid(key, value)),
    }
}

fn parse_header_value<T: FromStr>(key: &str, value: &str) -> Result<HeaderValue<T>> {
    HeaderValue::parse(value).ok_or_else(|| invalid(key, value))
}
