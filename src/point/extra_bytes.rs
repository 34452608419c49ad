//! Extra per-point dimensions appended after the standard point fields.
//!
//! Extra dimensions are configured by name, optionally with a type override (`name=type`), and
//! resolved against the point table's layout before any point is written. Each resolved dimension
//! adds its type's width to the point record and one 192 byte descriptor to the extra bytes vlr.

use crate::{
    Error, Result, Vlr,
    table::{DataType, DimId, Layout, PointView},
    utils::FromLasStr,
    vlr::{EXTRA_BYTES_RECORD_ID, SPEC_USER_ID},
};
use byteorder::{LittleEndian, WriteBytesExt};
use std::{fmt, io::Write, str::FromStr};

/// The size of one extra bytes descriptor.
pub const DESCRIPTOR_SIZE: usize = 192;

/// An extra dimension as configured, before it's resolved.
///
/// # Examples
///
/// ```
/// use las_writer::point::ExtraDim;
/// use las_writer::table::DataType;
///
/// let dim: ExtraDim = "Amplitude".parse().unwrap();
/// assert_eq!(None, dim.data_type);
/// let dim: ExtraDim = "Reflectance = float".parse().unwrap();
/// assert_eq!("Reflectance", dim.name);
/// assert_eq!(Some(DataType::Float), dim.data_type);
/// assert!("Reflectance=quaternion".parse::<ExtraDim>().is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ExtraDim {
    /// The dimension name in the point table.
    pub name: String,
    /// The type to write, or `None` to use the table's type.
    pub data_type: Option<DataType>,
}

impl FromStr for ExtraDim {
    type Err = Error;

    fn from_str(s: &str) -> Result<ExtraDim> {
        match s.split_once('=') {
            Some((name, type_name)) => {
                let name = name.trim();
                let data_type =
                    DataType::from_name(type_name).ok_or_else(|| Error::UnknownDataType {
                        name: name.to_string(),
                        type_name: type_name.trim().to_string(),
                    })?;
                Ok(ExtraDim {
                    name: name.to_string(),
                    data_type: Some(data_type),
                })
            }
            None => Ok(ExtraDim {
                name: s.trim().to_string(),
                data_type: None,
            }),
        }
    }
}

impl fmt::Display for ExtraDim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.data_type {
            Some(data_type) => write!(f, "{}={:?}", self.name, data_type),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Parses a comma-separated list of extra dimensions, skipping empty entries.
pub fn parse_list(s: &str) -> Result<Vec<ExtraDim>> {
    s.split(',')
        .filter(|entry| !entry.trim().is_empty())
        .map(str::parse)
        .collect()
}

#[derive(Clone, Debug, PartialEq)]
struct Resolved {
    name: String,
    id: DimId,
    source_type: DataType,
    data_type: DataType,
    description: String,
}

/// Extra dimensions resolved against a layout.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct ExtraBytes {
    dims: Vec<Resolved>,
    len: u16,
}

impl ExtraBytes {
    /// Resolves each dimension, in order.
    ///
    /// An unknown name is an error, and so are dimensions that together don't fit in a point record.
    pub(crate) fn resolve(dims: &[ExtraDim], layout: &Layout) -> Result<ExtraBytes> {
        let dims = dims
            .iter()
            .map(|dim| {
                let id = layout
                    .find(&dim.name)
                    .ok_or_else(|| Error::UnknownExtraDimension(dim.name.clone()))?;
                let info = layout.dim(id);
                Ok(Resolved {
                    name: dim.name.clone(),
                    id,
                    source_type: info.data_type,
                    data_type: dim.data_type.unwrap_or(info.data_type),
                    description: info.description.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let total: usize = dims.iter().map(|dim| dim.data_type.size()).sum();
        let len = u16::try_from(total).map_err(|_| Error::InvalidOption {
            key: "extra_dims".to_string(),
            value: format!("{} extra bytes", total),
        })?;
        Ok(ExtraBytes { dims, len })
    }

    /// The number of bytes these dimensions add to each point.
    pub(crate) fn len(&self) -> u16 {
        self.len
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.dims.is_empty()
    }

    /// Builds the descriptor vlr, or `None` if there are no extra dimensions.
    pub(crate) fn vlr(&self) -> Result<Option<Vlr>> {
        if self.is_empty() {
            return Ok(None);
        }
        let mut data = Vec::with_capacity(DESCRIPTOR_SIZE * self.dims.len());
        for dim in &self.dims {
            write_descriptor(&mut data, dim)?;
        }
        Ok(Some(Vlr::new(
            SPEC_USER_ID,
            EXTRA_BYTES_RECORD_ID,
            "Extra Bytes Record",
            data,
        )))
    }

    /// Appends the extra dimension values of one point.
    ///
    /// Values whose type wasn't overridden are copied byte for byte.
    pub(crate) fn encode(&self, view: &dyn PointView, index: usize, out: &mut Vec<u8>) -> Result<()> {
        for dim in &self.dims {
            if dim.source_type == dim.data_type {
                out.extend_from_slice(view.get_raw(dim.id, index));
            } else {
                let value = view.get_f64(dim.id, index);
                dim.data_type
                    .encode(value, out)
                    .ok_or_else(|| Error::FieldOverflow {
                        name: dim.name.clone(),
                        value,
                    })?;
            }
        }
        Ok(())
    }
}

/// The extra bytes data type code of a [DataType].
pub fn type_code(data_type: DataType) -> u8 {
    match data_type {
        DataType::Unsigned8 => 1,
        DataType::Signed8 => 2,
        DataType::Unsigned16 => 3,
        DataType::Signed16 => 4,
        DataType::Unsigned32 => 5,
        DataType::Signed32 => 6,
        DataType::Unsigned64 => 7,
        DataType::Signed64 => 8,
        DataType::Float => 9,
        DataType::Double => 10,
    }
}

fn write_descriptor(data: &mut Vec<u8>, dim: &Resolved) -> Result<()> {
    let mut name = [0; 32];
    name.from_las_str(&dim.name)?;
    // cut to fit the 32 byte field
    let mut description = [0; 32];
    let text: String = dim
        .description
        .chars()
        .map(|c| if c.is_ascii() { c } else { '?' })
        .take(description.len())
        .collect();
    description.from_las_str(&text)?;
    data.write_u16::<LittleEndian>(0)?;
    data.write_u8(type_code(dim.data_type))?;
    // options: no no_data, min, max, scale or offset
    data.write_u8(0)?;
    data.write_all(&name)?;
    // unused, no_data, min, max, scale, offset
    data.write_all(&[0; 4 + 5 * 24])?;
    data.write_all(&description)?;
    Ok(())
}
