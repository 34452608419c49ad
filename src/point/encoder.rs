use super::{
    ExtraBytes, Format,
    returns::{self, Check, Warnings},
};
use crate::{
    Error, Result, Vector, raw,
    table::{DimId, Layout, PointView, dimension},
    transform::Quantizer,
};
use num_traits::cast;

/// The ids of the standard dimensions a point table has.
#[derive(Clone, Copy, Debug, Default)]
struct Dims {
    x: Option<DimId>,
    y: Option<DimId>,
    z: Option<DimId>,
    intensity: Option<DimId>,
    return_number: Option<DimId>,
    number_of_returns: Option<DimId>,
    scan_direction: Option<DimId>,
    edge_of_flight_line: Option<DimId>,
    classification: Option<DimId>,
    scan_angle_rank: Option<DimId>,
    user_data: Option<DimId>,
    point_source_id: Option<DimId>,
    gps_time: Option<DimId>,
    red: Option<DimId>,
    green: Option<DimId>,
    blue: Option<DimId>,
}

impl Dims {
    fn new(layout: &Layout) -> Dims {
        Dims {
            x: layout.find(dimension::X),
            y: layout.find(dimension::Y),
            z: layout.find(dimension::Z),
            intensity: layout.find(dimension::INTENSITY),
            return_number: layout.find(dimension::RETURN_NUMBER),
            number_of_returns: layout.find(dimension::NUMBER_OF_RETURNS),
            scan_direction: layout.find(dimension::SCAN_DIRECTION_FLAG),
            edge_of_flight_line: layout.find(dimension::EDGE_OF_FLIGHT_LINE),
            classification: layout.find(dimension::CLASSIFICATION),
            scan_angle_rank: layout.find(dimension::SCAN_ANGLE_RANK),
            user_data: layout.find(dimension::USER_DATA),
            point_source_id: layout.find(dimension::POINT_SOURCE_ID),
            gps_time: layout.find(dimension::GPS_TIME),
            red: layout.find(dimension::RED),
            green: layout.find(dimension::GREEN),
            blue: layout.find(dimension::BLUE),
        }
    }
}

/// A point that made it into the output.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Encoded {
    /// The real-world coordinates, before quantization.
    pub(crate) xyz: Vector<f64>,
    pub(crate) return_number: u8,
}

/// Encodes points from a view into las point records.
#[derive(Clone, Debug)]
pub(crate) struct Encoder {
    format: Format,
    dims: Dims,
    extra_bytes: ExtraBytes,
    max_return_count: u8,
    discard_high_return_numbers: bool,
    warnings: Warnings,
}

impl Encoder {
    pub(crate) fn new(
        format: Format,
        layout: &Layout,
        extra_bytes: ExtraBytes,
        discard_high_return_numbers: bool,
    ) -> Encoder {
        Encoder {
            format,
            dims: Dims::new(layout),
            extra_bytes,
            max_return_count: format.max_return_count(),
            discard_high_return_numbers,
            warnings: Warnings::default(),
        }
    }

    /// The length of one record, standard fields plus extra bytes.
    pub(crate) fn record_len(&self) -> usize {
        usize::from(self.format.len()) + usize::from(self.extra_bytes.len())
    }

    /// The real coordinates of a point.
    pub(crate) fn xyz(&self, view: &dyn PointView, index: usize) -> Vector<f64> {
        let get = |dim: Option<DimId>| dim.map_or(0., |dim| view.get_f64(dim, index));
        Vector {
            x: get(self.dims.x),
            y: get(self.dims.y),
            z: get(self.dims.z),
        }
    }

    /// Appends one point record to `out`, or returns `None` if the point is discarded.
    pub(crate) fn encode(
        &mut self,
        view: &dyn PointView,
        index: usize,
        quantizer: &Quantizer,
        out: &mut Vec<u8>,
    ) -> Result<Option<Encoded>> {
        let return_number = field(view, self.dims.return_number, index, "ReturnNumber", 1u8)?;
        let number_of_returns =
            field(view, self.dims.number_of_returns, index, "NumberOfReturns", 1u8)?;
        let number_of_returns = match returns::check(
            return_number,
            number_of_returns,
            self.max_return_count,
            self.discard_high_return_numbers,
            &mut self.warnings,
        ) {
            Check::Keep(n) => n,
            Check::Discard => return Ok(None),
        };

        let xyz = self.xyz(view, index);
        let quantized = quantizer.quantize(xyz.x, xyz.y, xyz.z)?;
        let dims = &self.dims;
        let point = raw::Point {
            x: quantized.x,
            y: quantized.y,
            z: quantized.z,
            intensity: field(view, dims.intensity, index, "Intensity", 0)?,
            flags: raw::point::Flags {
                return_number,
                number_of_returns,
                scan_direction: field(view, dims.scan_direction, index, "ScanDirectionFlag", 0)?,
                edge_of_flight_line: field(
                    view,
                    dims.edge_of_flight_line,
                    index,
                    "EdgeOfFlightLine",
                    0,
                )?,
            },
            classification: field(view, dims.classification, index, "Classification", 0)?,
            scan_angle_rank: field(view, dims.scan_angle_rank, index, "ScanAngleRank", 0)?,
            user_data: field(view, dims.user_data, index, "UserData", 0)?,
            point_source_id: field(view, dims.point_source_id, index, "PointSourceId", 0)?,
            gps_time: field(view, dims.gps_time, index, "GpsTime", 0.)?,
            color: [
                field(view, dims.red, index, "Red", 0)?,
                field(view, dims.green, index, "Green", 0)?,
                field(view, dims.blue, index, "Blue", 0)?,
            ],
        };
        point.write_to(&mut *out, self.format)?;
        self.extra_bytes.encode(view, index, out)?;
        Ok(Some(Encoded { xyz, return_number }))
    }

    pub(crate) fn warnings(&self) -> &Warnings {
        &self.warnings
    }
}

fn field<T: num_traits::NumCast>(
    view: &dyn PointView,
    dim: Option<DimId>,
    index: usize,
    name: &str,
    default: T,
) -> Result<T> {
    match dim {
        Some(dim) => {
            let value = view.get_f64(dim, index);
            cast(value).ok_or_else(|| Error::FieldOverflow {
                name: name.to_string(),
                value,
            })
        }
        None => Ok(default),
    }
}
