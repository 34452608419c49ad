//! The upstream point table the writer consumes.
//!
//! A writer never owns point data. It asks a [PointTable] for the dimension registry (the
//! [Layout]), forwarded [Metadata] and the [SpatialReference], and it reads per-point values
//! through a [PointView]. [PointBuffer] is a small in-memory implementation of both:
//!
//! ```
//! use las_writer::table::{dimension, DataType, Layout, PointBuffer, PointView};
//!
//! let mut layout = Layout::xyz();
//! let intensity = layout.add(dimension::INTENSITY, DataType::Unsigned16);
//! let mut buffer = PointBuffer::new(layout);
//! buffer.push(&[1., 2., 3., 42.]).unwrap();
//! assert_eq!(42., buffer.get_f64(intensity, 0));
//! ```

use crate::{Error, Metadata, Result, SpatialReference};
use byteorder::{ByteOrder, LittleEndian};
use num_traits::cast;

/// Names of the dimensions that map onto fixed las point fields.
pub mod dimension {
    #![allow(missing_docs)]
    pub const X: &str = "X";
    pub const Y: &str = "Y";
    pub const Z: &str = "Z";
    pub const INTENSITY: &str = "Intensity";
    pub const RETURN_NUMBER: &str = "ReturnNumber";
    pub const NUMBER_OF_RETURNS: &str = "NumberOfReturns";
    pub const SCAN_DIRECTION_FLAG: &str = "ScanDirectionFlag";
    pub const EDGE_OF_FLIGHT_LINE: &str = "EdgeOfFlightLine";
    pub const CLASSIFICATION: &str = "Classification";
    pub const SCAN_ANGLE_RANK: &str = "ScanAngleRank";
    pub const USER_DATA: &str = "UserData";
    pub const POINT_SOURCE_ID: &str = "PointSourceId";
    pub const GPS_TIME: &str = "GpsTime";
    pub const RED: &str = "Red";
    pub const GREEN: &str = "Green";
    pub const BLUE: &str = "Blue";
}

/// The storage type of a dimension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum DataType {
    Unsigned8,
    Signed8,
    Unsigned16,
    Signed16,
    Unsigned32,
    Signed32,
    Unsigned64,
    Signed64,
    Float,
    Double,
}

impl DataType {
    /// The width of one value, in bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_writer::table::DataType;
    /// assert_eq!(2, DataType::Signed16.size());
    /// assert_eq!(8, DataType::Double.size());
    /// ```
    pub fn size(&self) -> usize {
        match self {
            DataType::Unsigned8 | DataType::Signed8 => 1,
            DataType::Unsigned16 | DataType::Signed16 => 2,
            DataType::Unsigned32 | DataType::Signed32 | DataType::Float => 4,
            DataType::Unsigned64 | DataType::Signed64 | DataType::Double => 8,
        }
    }

    /// Parses a type name, e.g. `uint16` or `double`.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_writer::table::DataType;
    /// assert_eq!(Some(DataType::Unsigned16), DataType::from_name("uint16_t"));
    /// assert_eq!(Some(DataType::Float), DataType::from_name("Float"));
    /// assert_eq!(None, DataType::from_name("quaternion"));
    /// ```
    pub fn from_name(name: &str) -> Option<DataType> {
        let name = name.trim().to_ascii_lowercase();
        let name = name.strip_suffix("_t").unwrap_or(&name);
        match name {
            "uint8" | "uchar" => Some(DataType::Unsigned8),
            "int8" | "char" => Some(DataType::Signed8),
            "uint16" | "ushort" => Some(DataType::Unsigned16),
            "int16" | "short" => Some(DataType::Signed16),
            "uint32" | "ulong" => Some(DataType::Unsigned32),
            "int32" | "long" => Some(DataType::Signed32),
            "uint64" | "ulonglong" => Some(DataType::Unsigned64),
            "int64" | "longlong" => Some(DataType::Signed64),
            "float" | "float32" => Some(DataType::Float),
            "double" | "float64" => Some(DataType::Double),
            _ => None,
        }
    }

    /// Decodes one little-endian value.
    ///
    /// Panics if `bytes` is shorter than [DataType::size].
    pub fn decode(&self, bytes: &[u8]) -> f64 {
        match self {
            DataType::Unsigned8 => f64::from(bytes[0]),
            DataType::Signed8 => f64::from(bytes[0] as i8),
            DataType::Unsigned16 => f64::from(LittleEndian::read_u16(bytes)),
            DataType::Signed16 => f64::from(LittleEndian::read_i16(bytes)),
            DataType::Unsigned32 => f64::from(LittleEndian::read_u32(bytes)),
            DataType::Signed32 => f64::from(LittleEndian::read_i32(bytes)),
            DataType::Unsigned64 => LittleEndian::read_u64(bytes) as f64,
            DataType::Signed64 => LittleEndian::read_i64(bytes) as f64,
            DataType::Float => f64::from(LittleEndian::read_f32(bytes)),
            DataType::Double => LittleEndian::read_f64(bytes),
        }
    }

    /// Appends one little-endian value, or returns `None` if the value doesn't fit.
    ///
    /// Integer types truncate toward zero.
    pub fn encode(&self, value: f64, out: &mut Vec<u8>) -> Option<()> {
        match self {
            DataType::Unsigned8 => out.push(cast::<f64, u8>(value)?),
            DataType::Signed8 => out.extend_from_slice(&cast::<f64, i8>(value)?.to_le_bytes()),
            DataType::Unsigned16 => out.extend_from_slice(&cast::<f64, u16>(value)?.to_le_bytes()),
            DataType::Signed16 => out.extend_from_slice(&cast::<f64, i16>(value)?.to_le_bytes()),
            DataType::Unsigned32 => out.extend_from_slice(&cast::<f64, u32>(value)?.to_le_bytes()),
            DataType::Signed32 => out.extend_from_slice(&cast::<f64, i32>(value)?.to_le_bytes()),
            DataType::Unsigned64 => out.extend_from_slice(&cast::<f64, u64>(value)?.to_le_bytes()),
            DataType::Signed64 => out.extend_from_slice(&cast::<f64, i64>(value)?.to_le_bytes()),
            DataType::Float => out.extend_from_slice(&(value as f32).to_le_bytes()),
            DataType::Double => out.extend_from_slice(&value.to_le_bytes()),
        }
        Some(())
    }
}

/// An index into a [Layout].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DimId(usize);

/// One registered dimension.
#[derive(Clone, Debug, PartialEq)]
pub struct DimInfo {
    /// The dimension name.
    pub name: String,
    /// How the values are stored.
    pub data_type: DataType,
    /// A human-readable description.
    pub description: String,
}

/// The dimension registry of a point table.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layout {
    dims: Vec<DimInfo>,
}

impl Layout {
    /// Creates a layout with X, Y and Z stored as doubles.
    pub fn xyz() -> Layout {
        let mut layout = Layout::default();
        let _ = layout.add(dimension::X, DataType::Double);
        let _ = layout.add(dimension::Y, DataType::Double);
        let _ = layout.add(dimension::Z, DataType::Double);
        layout
    }

    /// Registers a dimension, returning its id.
    ///
    /// Registering an existing name returns the existing id and keeps its type.
    pub fn add(&mut self, name: &str, data_type: DataType) -> DimId {
        self.add_with_description(name, data_type, "")
    }

    /// Registers a dimension with a description.
    pub fn add_with_description(&mut self, name: &str, data_type: DataType, description: &str) -> DimId {
        if let Some(id) = self.find(name) {
            return id;
        }
        self.dims.push(DimInfo {
            name: name.to_string(),
            data_type,
            description: description.to_string(),
        });
        DimId(self.dims.len() - 1)
    }

    /// Finds a dimension by name, preferring an exact match over a case-insensitive one.
    pub fn find(&self, name: &str) -> Option<DimId> {
        self.dims
            .iter()
            .position(|dim| dim.name == name)
            .or_else(|| {
                self.dims
                    .iter()
                    .position(|dim| dim.name.eq_ignore_ascii_case(name))
            })
            .map(DimId)
    }

    /// Returns a registered dimension.
    ///
    /// Panics if the id is from another layout with more dimensions.
    pub fn dim(&self, id: DimId) -> &DimInfo {
        &self.dims[id.0]
    }

    /// Iterates over the registered dimensions, in registration order.
    pub fn dims(&self) -> impl Iterator<Item = (DimId, &DimInfo)> {
        self.dims.iter().enumerate().map(|(i, dim)| (DimId(i), dim))
    }

    /// The size of one point with every dimension, in bytes.
    pub fn point_size(&self) -> usize {
        self.dims.iter().map(|dim| dim.data_type.size()).sum()
    }
}

/// The table a batch of points comes from.
pub trait PointTable {
    /// The dimension registry.
    fn layout(&self) -> &Layout;

    /// Metadata recorded by whatever produced these points, used for forwarding.
    fn metadata(&self) -> Option<&Metadata> {
        None
    }

    /// The spatial reference of the points.
    fn spatial_reference(&self) -> Option<&SpatialReference> {
        None
    }
}

/// Read access to one batch of points.
pub trait PointView {
    /// The number of points in this batch.
    fn len(&self) -> usize;

    /// Returns true if this batch has no points.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reads a value as a double.
    fn get_f64(&self, dim: DimId, index: usize) -> f64;

    /// Returns the little-endian bytes of a value, in the dimension's own [DataType].
    fn get_raw(&self, dim: DimId, index: usize) -> &[u8];
}

/// A columnar, in-memory point table.
#[derive(Clone, Debug, Default)]
pub struct PointBuffer {
    layout: Layout,
    columns: Vec<Vec<u8>>,
    len: usize,
    metadata: Option<Metadata>,
    spatial_reference: Option<SpatialReference>,
}

impl PointBuffer {
    /// Creates an empty buffer for this layout.
    pub fn new(layout: Layout) -> PointBuffer {
        let columns = vec![Vec::new(); layout.dims.len()];
        PointBuffer {
            layout,
            columns,
            len: 0,
            metadata: None,
            spatial_reference: None,
        }
    }

    /// Creates an empty buffer with only X, Y and Z.
    pub fn xyz() -> PointBuffer {
        PointBuffer::new(Layout::xyz())
    }

    /// Appends one point, with one value per dimension in layout order.
    ///
    /// Missing trailing values are zero. Values that don't fit their dimension's type are an
    /// error, and nothing is appended.
    pub fn push(&mut self, values: &[f64]) -> Result<()> {
        let mut encoded = Vec::with_capacity(self.columns.len());
        for (i, dim) in self.layout.dims.iter().enumerate() {
            let value = values.get(i).copied().unwrap_or(0.);
            let mut bytes = Vec::with_capacity(dim.data_type.size());
            dim.data_type
                .encode(value, &mut bytes)
                .ok_or_else(|| Error::FieldOverflow {
                    name: dim.name.clone(),
                    value,
                })?;
            encoded.push(bytes);
        }
        for (column, bytes) in self.columns.iter_mut().zip(encoded) {
            column.extend_from_slice(&bytes);
        }
        self.len += 1;
        Ok(())
    }

    /// Appends one point, setting only X, Y and Z. Every other dimension is zero.
    pub fn push_xyz(&mut self, x: f64, y: f64, z: f64) -> Result<()> {
        let mut values = vec![0.; self.layout.dims.len()];
        for (name, value) in [(dimension::X, x), (dimension::Y, y), (dimension::Z, z)] {
            if let Some(id) = self.layout.find(name) {
                values[id.0] = value;
            }
        }
        self.push(&values)
    }

    /// Sets the metadata returned by [PointTable::metadata].
    pub fn set_metadata(&mut self, metadata: Metadata) {
        self.metadata = Some(metadata);
    }

    /// Sets the spatial reference returned by [PointTable::spatial_reference].
    pub fn set_spatial_reference(&mut self, spatial_reference: SpatialReference) {
        self.spatial_reference = Some(spatial_reference);
    }
}

impl PointTable for PointBuffer {
    fn layout(&self) -> &Layout {
        &self.layout
    }

    fn metadata(&self) -> Option<&Metadata> {
        self.metadata.as_ref()
    }

    fn spatial_reference(&self) -> Option<&SpatialReference> {
        self.spatial_reference.as_ref()
    }
}

impl PointView for PointBuffer {
    fn len(&self) -> usize {
        self.len
    }

    fn get_f64(&self, dim: DimId, index: usize) -> f64 {
        self.layout.dim(dim).data_type.decode(self.get_raw(dim, index))
    }

    fn get_raw(&self, dim: DimId, index: usize) -> &[u8] {
        let size = self.layout.dim(dim).data_type.size();
        &self.columns[dim.0][index * size..(index + 1) * size]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_is_case_insensitive_fallback() {
        let mut layout = Layout::xyz();
        let a = layout.add("Amplitude", DataType::Float);
        assert_eq!(Some(a), layout.find("amplitude"));
        assert_eq!(None, layout.find("Reflectance"));
    }

    #[test]
    fn add_existing_keeps_type() {
        let mut layout = Layout::xyz();
        let x = layout.add(dimension::X, DataType::Signed32);
        assert_eq!(DataType::Double, layout.dim(x).data_type);
        assert_eq!(24, layout.point_size());
    }

    #[test]
    fn push_and_read() {
        let mut layout = Layout::xyz();
        let class = layout.add(dimension::CLASSIFICATION, DataType::Unsigned8);
        let angle = layout.add(dimension::SCAN_ANGLE_RANK, DataType::Signed8);
        let mut buffer = PointBuffer::new(layout);
        buffer.push(&[1., 2., 3., 2., -12.]).unwrap();
        buffer.push_xyz(4., 5., 6.).unwrap();
        assert_eq!(2, buffer.len());
        assert_eq!(2., buffer.get_f64(class, 0));
        assert_eq!(-12., buffer.get_f64(angle, 0));
        assert_eq!(&[0xF4], buffer.get_raw(angle, 0));
        assert_eq!(0., buffer.get_f64(class, 1));
    }

    #[test]
    fn push_rejects_overflow() {
        let mut layout = Layout::xyz();
        let _ = layout.add(dimension::USER_DATA, DataType::Unsigned8);
        let mut buffer = PointBuffer::new(layout);
        assert!(buffer.push(&[0., 0., 0., 256.]).is_err());
        assert!(buffer.is_empty());
    }

    #[test]
    fn encode_decode() {
        let mut out = Vec::new();
        DataType::Signed16.encode(-2., &mut out).unwrap();
        assert_eq!(vec![0xFE, 0xFF], out);
        assert_eq!(-2., DataType::Signed16.decode(&out));
        assert!(DataType::Unsigned32.encode(-1., &mut out).is_none());
    }
}
