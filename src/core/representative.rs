//! Representative points for polygon-interior queries.
//!
//! Each connected region carries a running arithmetic mean of its inserted
//! coordinates. The mean is not a true centroid, but it is a cheap interior
//! seed adequate for point-in-polygon containment tests.

use crate::geometry::point::Point;
use serde::{Deserialize, Serialize};

/// Running centroid accumulator for one region.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RepresentativeCoordinates {
    x: f64,
    y: f64,
    count: usize,
}

impl RepresentativeCoordinates {
    /// Creates an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds a coordinate into the running mean.
    pub fn add_point(&mut self, p: Point) {
        self.count += 1;
        let n = self.count as f64;
        self.x += (p.x - self.x) / n;
        self.y += (p.y - self.y) / n;
    }

    /// Removes a previously added coordinate from the running mean.
    pub fn remove_point(&mut self, p: Point) {
        match self.count {
            0 => {}
            1 => *self = Self::default(),
            _ => {
                let n = self.count as f64;
                self.count -= 1;
                let m = self.count as f64;
                self.x = (self.x * n - p.x) / m;
                self.y = (self.y * n - p.y) / m;
            }
        }
    }

    /// The current mean coordinate, or `None` if nothing was accumulated.
    #[must_use]
    pub fn coordinates(&self) -> Option<Point> {
        (self.count > 0).then(|| Point::new(self.x, self.y))
    }

    /// Number of accumulated coordinates.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Resets the accumulator.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn running_mean_matches_batch_mean() {
        let mut rep = RepresentativeCoordinates::new();
        let points = [
            Point::new(0.0, 0.0),
            Point::new(3.0, 0.0),
            Point::new(0.0, 3.0),
            Point::new(3.0, 3.0),
        ];
        for p in points {
            rep.add_point(p);
        }
        let mean = rep.coordinates().unwrap();
        assert_relative_eq!(mean.x, 1.5);
        assert_relative_eq!(mean.y, 1.5);
        assert_eq!(rep.count(), 4);
    }

    #[test]
    fn removal_undoes_addition() {
        let mut rep = RepresentativeCoordinates::new();
        rep.add_point(Point::new(1.0, 2.0));
        rep.add_point(Point::new(5.0, 6.0));
        rep.remove_point(Point::new(5.0, 6.0));
        let mean = rep.coordinates().unwrap();
        assert_relative_eq!(mean.x, 1.0);
        assert_relative_eq!(mean.y, 2.0);
        rep.remove_point(Point::new(1.0, 2.0));
        assert!(rep.coordinates().is_none());
    }
}
