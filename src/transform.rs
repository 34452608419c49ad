use crate::{Axis, Error, Result, Vector};
use std::fmt;

/// The scale that is used when none is configured.
pub const DEFAULT_SCALE: f64 = 0.01;

/// A scale and an offset that transforms xyz coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// The scale.
    pub scale: f64,
    /// The offset.
    pub offset: f64,
}

impl Transform {
    /// Applies this transform to an i32, returning a float.
    ///
    /// # Examples
    ///
    /// ```
    /// # use las_writer::Transform;
    /// let transform = Transform { scale: 2., offset: 1. };
    /// assert_eq!(3., transform.direct(1));
    /// ```
    pub fn direct(&self, n: i32) -> f64 {
        self.scale * f64::from(n) + self.offset
    }

    /// Quantizes a coordinate, `round((n - offset) / scale)`.
    ///
    /// Returns an error if the resultant value can't be represented as an i32.
    ///
    /// # Examples
    ///
    /// ```
    /// # use las_writer::{Axis, Transform};
    /// let transform = Transform { scale: 2., offset: 1. };
    /// assert_eq!(1, transform.inverse(2.9, Axis::X).unwrap());
    /// assert!(transform.inverse(1e12, Axis::X).is_err());
    /// ```
    pub fn inverse(&self, n: f64, axis: Axis) -> Result<i32> {
        let value = ((n - self.offset) / self.scale).round();
        if value.is_nan() || value > f64::from(i32::MAX) || value < f64::from(i32::MIN) {
            Err(Error::CoordinateOverflow {
                axis,
                value: n,
                transform: *self,
            })
        } else {
            Ok(value as i32)
        }
    }
}

impl Default for Transform {
    fn default() -> Transform {
        Transform {
            scale: DEFAULT_SCALE,
            offset: 0.,
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{} * x + {}`", self.scale, self.offset)
    }
}

/// The configured offset for one axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Offset {
    /// A fixed offset.
    Value(f64),
    /// Derive the offset from the first batch of points.
    Auto,
}

impl Default for Offset {
    fn default() -> Offset {
        Offset::Value(0.)
    }
}

/// The per-axis transforms owned by a writer, plus the pending auto-offset decisions.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Quantizer {
    transforms: Vector<Transform>,
    auto: Vector<bool>,
}

impl Quantizer {
    pub(crate) fn new(scale: Vector<f64>, offset: Vector<Offset>) -> Quantizer {
        let mut transforms = Vector::splat(Transform::default());
        let mut auto = Vector::splat(false);
        for axis in Axis::ALL {
            let transform = transforms.get_mut(axis);
            transform.scale = scale.get(axis);
            match offset.get(axis) {
                Offset::Value(value) => transform.offset = value,
                Offset::Auto => *auto.get_mut(axis) = true,
            }
        }
        Quantizer { transforms, auto }
    }

    pub(crate) fn transforms(&self) -> &Vector<Transform> {
        &self.transforms
    }

    /// Settles any automatic offsets from the extent of a batch.
    ///
    /// The offset becomes the floor of the midpoint of the batch on that axis. Once decided, an
    /// offset never changes again. Empty batches (`min > max`) decide nothing.
    pub(crate) fn settle(&mut self, min: Vector<f64>, max: Vector<f64>) {
        for axis in Axis::ALL {
            if !self.auto.get(axis) || min.get(axis) > max.get(axis) {
                continue;
            }
            let offset = ((min.get(axis) + max.get(axis)) / 2.).floor();
            log::debug!("automatic {} offset: {}", axis, offset);
            self.transforms.get_mut(axis).offset = offset;
            *self.auto.get_mut(axis) = false;
        }
    }

    /// Stops any further automatic offset decisions, keeping current values.
    pub(crate) fn freeze(&mut self) {
        self.auto = Vector::splat(false);
    }

    pub(crate) fn quantize(&self, x: f64, y: f64, z: f64) -> Result<Vector<i32>> {
        Ok(Vector {
            x: self.transforms.x.inverse(x, Axis::X)?,
            y: self.transforms.y.inverse(y, Axis::Y)?,
            z: self.transforms.z.inverse(z, Axis::Z)?,
        })
    }
}
