use crate::Bounds;

/// The number of return slots in a las 1.4 header.
pub const MAX_RETURNS: usize = 15;

/// Running statistics of the points that have been written.
///
/// # Examples
///
/// ```
/// use las_writer::Summary;
///
/// let mut summary = Summary::new(5);
/// summary.add_point(1., 2., 3., 1);
/// summary.add_point(4., 5., 6., 2);
/// summary.add_point(0., 0., 0., 6);
/// assert_eq!(3, summary.number_of_points());
/// assert_eq!(1, summary.number_of_points_by_return()[0]);
/// assert_eq!(0, summary.number_of_points_by_return()[5]);
/// assert_eq!(0., summary.bounds().min.x);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Summary {
    bounds: Bounds,
    by_return: [u64; MAX_RETURNS],
    number_of_points: u64,
    max_return_count: u8,
}

impl Summary {
    /// Creates an empty summary. Returns above `max_return_count` aren't counted by return.
    pub fn new(max_return_count: u8) -> Summary {
        Summary {
            bounds: Bounds::default(),
            by_return: [0; MAX_RETURNS],
            number_of_points: 0,
            max_return_count: max_return_count.min(MAX_RETURNS as u8),
        }
    }

    /// Adds one point, by its real coordinates.
    pub fn add_point(&mut self, x: f64, y: f64, z: f64, return_number: u8) {
        self.bounds.grow_point(x, y, z);
        self.number_of_points += 1;
        if return_number >= 1 && return_number <= self.max_return_count {
            self.by_return[usize::from(return_number - 1)] += 1;
        }
    }

    /// The bounds of every added point.
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Point counts for returns one through fifteen.
    pub fn number_of_points_by_return(&self) -> &[u64; MAX_RETURNS] {
        &self.by_return
    }

    /// The number of points added.
    pub fn number_of_points(&self) -> u64 {
        self.number_of_points
    }
}

impl Default for Summary {
    fn default() -> Summary {
        Summary::new(5)
    }
}
