//! Axis-aligned bounding boxes.
//!
//! A [Bounds] is six doubles. Two-dimensional bounds carry an undefined z interval, which is
//! ignored by every comparison and left out of the text form:
//!
//! ```
//! use las_writer::Bounds;
//! let bounds = Bounds::new_2d(1., 2., 101., 102.);
//! assert_eq!("([1, 101], [2, 102])", bounds.to_string());
//! assert_eq!(bounds, "([1, 101], [2, 102])".parse().unwrap());
//! ```
//!
//! # Clipping is not normalized
//!
//! [Bounds::clip] intersects intervals without checking that the result is still a valid
//! interval. Clipping two disjoint boxes leaves `min > max` on the offending axis, which makes the
//! result [Bounds::empty], and the inverted interval is kept as-is. Callers rely on this to detect
//! disjointness after the fact.

use crate::{Error, Result, Vector};
use std::{fmt, str::FromStr};

/// Minimum and maximum bounds in two or three dimensions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    /// The minimum values.
    pub min: Vector<f64>,

    /// The maximum values.
    pub max: Vector<f64>,
}

impl Bounds {
    /// Creates three-dimensional bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_writer::Bounds;
    /// let bounds = Bounds::new(1., 2., 3., 4., 5., 6.);
    /// assert_eq!(3., bounds.min.z);
    /// assert_eq!(4., bounds.max.x);
    /// ```
    pub fn new(min_x: f64, min_y: f64, min_z: f64, max_x: f64, max_y: f64, max_z: f64) -> Bounds {
        Bounds {
            min: Vector {
                x: min_x,
                y: min_y,
                z: min_z,
            },
            max: Vector {
                x: max_x,
                y: max_y,
                z: max_z,
            },
        }
    }

    /// Creates two-dimensional bounds, with an undefined z interval.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_writer::Bounds;
    /// let bounds = Bounds::new_2d(1., 2., 3., 4.);
    /// assert!(!bounds.has_z());
    /// assert!(!bounds.empty());
    /// ```
    pub fn new_2d(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Bounds {
        Bounds::new(min_x, min_y, f64::MAX, max_x, max_y, f64::MIN)
    }

    /// Bounds that cover every representable value.
    pub fn everything() -> Bounds {
        Bounds::new(f64::MIN, f64::MIN, f64::MIN, f64::MAX, f64::MAX, f64::MAX)
    }

    /// Returns true if the z interval is defined.
    pub fn has_z(&self) -> bool {
        !(self.min.z == f64::MAX && self.max.z == f64::MIN)
    }

    /// Returns true if min is greater than max on any defined axis.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_writer::Bounds;
    /// assert!(Bounds::default().empty());
    /// assert!(!Bounds::new(0., 0., 0., 0., 0., 0.).empty());
    /// ```
    pub fn empty(&self) -> bool {
        self.min.x > self.max.x
            || self.min.y > self.max.y
            || (self.has_z() && self.min.z > self.max.z)
    }

    /// Resets these bounds to the empty sentinel.
    pub fn clear(&mut self) {
        *self = Bounds::default();
    }

    /// Intersects these bounds with another.
    ///
    /// The result is not normalized, see the [module documentation](self).
    ///
    /// # Examples
    ///
    /// ```
    /// use las_writer::Bounds;
    /// let mut bounds = Bounds::new_2d(0., 0., 10., 10.);
    /// bounds.clip(&Bounds::new_2d(1., 1., 11., 11.));
    /// assert_eq!(Bounds::new_2d(1., 1., 10., 10.), bounds);
    /// ```
    pub fn clip(&mut self, other: &Bounds) {
        self.min.x = self.min.x.max(other.min.x);
        self.max.x = self.max.x.min(other.max.x);
        self.min.y = self.min.y.max(other.min.y);
        self.max.y = self.max.y.min(other.max.y);
        if self.has_z() && other.has_z() {
            self.min.z = self.min.z.max(other.min.z);
            self.max.z = self.max.z.min(other.max.z);
        }
    }

    /// Grows these bounds to the union with another.
    ///
    /// Empty bounds are the identity.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_writer::Bounds;
    /// let mut bounds = Bounds::default();
    /// bounds.grow(&Bounds::new_2d(50., 51., 100., 101.));
    /// bounds.grow(&Bounds::new_2d(0., 1., 10., 201.));
    /// assert_eq!(Bounds::new_2d(0., 1., 100., 201.), bounds);
    /// ```
    pub fn grow(&mut self, other: &Bounds) {
        self.min.x = self.min.x.min(other.min.x);
        self.min.y = self.min.y.min(other.min.y);
        self.min.z = self.min.z.min(other.min.z);
        self.max.x = self.max.x.max(other.max.x);
        self.max.y = self.max.y.max(other.max.y);
        self.max.z = self.max.z.max(other.max.z);
    }

    /// Grows the bounds to encompass this point in xyz space.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_writer::Bounds;
    /// let mut bounds = Bounds::default();
    /// bounds.grow_point(1., 2., 3.);
    /// assert_eq!(Bounds::new(1., 2., 3., 1., 2., 3.), bounds);
    /// ```
    pub fn grow_point(&mut self, x: f64, y: f64, z: f64) {
        if x < self.min.x {
            self.min.x = x;
        }
        if y < self.min.y {
            self.min.y = y;
        }
        if z < self.min.z {
            self.min.z = z;
        }
        if x > self.max.x {
            self.max.x = x;
        }
        if y > self.max.y {
            self.max.y = y;
        }
        if z > self.max.z {
            self.max.z = z;
        }
    }

    /// Returns true if the intervals intersect on every defined axis, boundaries included.
    pub fn overlaps(&self, other: &Bounds) -> bool {
        let overlap = |a_min: f64, a_max: f64, b_min: f64, b_max: f64| {
            a_min <= b_max && b_min <= a_max
        };
        overlap(self.min.x, self.max.x, other.min.x, other.max.x)
            && overlap(self.min.y, self.max.y, other.min.y, other.max.y)
            && (!self.has_z()
                || !other.has_z()
                || overlap(self.min.z, self.max.z, other.min.z, other.max.z))
    }

    /// Returns true if the other bounds lie inside these on every defined axis, boundaries
    /// included.
    pub fn contains(&self, other: &Bounds) -> bool {
        let inside = |a_min: f64, a_max: f64, b_min: f64, b_max: f64| {
            a_min <= b_min && b_max <= a_max
        };
        inside(self.min.x, self.max.x, other.min.x, other.max.x)
            && inside(self.min.y, self.max.y, other.min.y, other.max.y)
            && (!self.has_z()
                || !other.has_z()
                || inside(self.min.z, self.max.z, other.min.z, other.max.z))
    }

    /// Renders the xy footprint as a closed well-known-text polygon.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_writer::Bounds;
    /// let bounds = Bounds::new(1.1, 2.2, 3.3, 101.1, 102.2, 103.3);
    /// assert_eq!(
    ///     "POLYGON ((1.1 2.2, 1.1 102.2, 101.1 102.2, 101.1 2.2, 1.1 2.2))",
    ///     bounds.to_wkt(1)
    /// );
    /// ```
    pub fn to_wkt(&self, precision: usize) -> String {
        let (x0, y0, x1, y1) = (self.min.x, self.min.y, self.max.x, self.max.y);
        format!(
            "POLYGON (({x0:.p$} {y0:.p$}, {x0:.p$} {y1:.p$}, {x1:.p$} {y1:.p$}, {x1:.p$} {y0:.p$}, {x0:.p$} {y0:.p$}))",
            p = precision
        )
    }
}

impl Default for Bounds {
    fn default() -> Bounds {
        Bounds::new(f64::MAX, f64::MAX, f64::MAX, f64::MIN, f64::MIN, f64::MIN)
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "([{}, {}], [{}, {}]",
            self.min.x, self.max.x, self.min.y, self.max.y
        )?;
        if self.has_z() {
            write!(f, ", [{}, {}]", self.min.z, self.max.z)?;
        }
        f.write_str(")")
    }
}

impl FromStr for Bounds {
    type Err = Error;

    fn from_str(s: &str) -> Result<Bounds> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Bounds::default());
        }
        let invalid = || Error::InvalidBounds(s.to_string());
        let inner = s
            .strip_prefix('(')
            .and_then(|s| s.strip_suffix(')'))
            .ok_or_else(invalid)?;
        let mut values = Vec::with_capacity(6);
        let mut rest = inner.trim();
        while !rest.is_empty() {
            let open = rest.strip_prefix('[').ok_or_else(invalid)?;
            let close = open.find(']').ok_or_else(invalid)?;
            let (min, max) = open[..close].split_once(',').ok_or_else(invalid)?;
            let min: f64 = min.trim().parse().map_err(|_| invalid())?;
            let max: f64 = max.trim().parse().map_err(|_| invalid())?;
            values.push((min, max));
            rest = open[close + 1..].trim_start();
            if let Some(after_comma) = rest.strip_prefix(',') {
                rest = after_comma.trim_start();
                if rest.is_empty() {
                    return Err(invalid());
                }
            } else if !rest.is_empty() {
                return Err(invalid());
            }
        }
        match values.as_slice() {
            [(x0, x1), (y0, y1)] => Ok(Bounds::new_2d(*x0, *y0, *x1, *y1)),
            [(x0, x1), (y0, y1), (z0, z1)] => Ok(Bounds::new(*x0, *y0, *z0, *x1, *y1, *z1)),
            _ => Err(invalid()),
        }
    }
}
