//! Coordinates and Euclidean distance helpers
//!
//! Orderings compare squared distances in `i128` so that ties are exact and
//! no floating point rounding can reorder affiliations.

use super::types::NO_VALUE;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Integer 2D location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    /// Returned for coordinates of unknown affiliations
    pub const NONE: Coord = Coord { x: NO_VALUE, y: NO_VALUE };

    pub const ORIGIN: Coord = Coord { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Coord { x, y }
    }

    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }

    /// Squared Euclidean distance to `other`
    pub fn squared_distance_to(&self, other: &Coord) -> i128 {
        let dx = i128::from(self.x) - i128::from(other.x);
        let dy = i128::from(self.y) - i128::from(other.y);
        dx * dx + dy * dy
    }

    /// Euclidean distance to `other`
    pub fn distance_to(&self, other: &Coord) -> f64 {
        (self.squared_distance_to(other) as f64).sqrt()
    }

    /// Euclidean distance from the origin
    pub fn distance_from_origin(&self) -> f64 {
        self.distance_to(&Self::ORIGIN)
    }
}

impl Default for Coord {
    fn default() -> Self {
        Self::NONE
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Coord { x, y }
    }
}

/// Coordinates order by y first, then x
impl Ord for Coord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl PartialOrd for Coord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Sort key ordering points by distance to a fixed reference point, then by
/// coordinate (y, then x)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DistanceKey {
    squared: i128,
    coord: Coord,
}

impl DistanceKey {
    pub fn new(coord: Coord, reference: &Coord) -> Self {
        DistanceKey {
            squared: coord.squared_distance_to(reference),
            coord,
        }
    }

    /// Key relative to the origin
    pub fn from_origin(coord: Coord) -> Self {
        Self::new(coord, &Coord::ORIGIN)
    }

    pub fn squared_distance(&self) -> i128 {
        self.squared
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distances() {
        let a = Coord::new(3, 4);
        assert_eq!(a.squared_distance_to(&Coord::ORIGIN), 25);
        assert_eq!(a.distance_from_origin(), 5.0);
        assert_eq!(a.distance_to(&Coord::new(6, 8)), 5.0);
    }

    #[test]
    fn test_extreme_coordinates_do_not_overflow() {
        let a = Coord::new(i32::MAX, i32::MAX);
        let b = Coord::new(i32::MIN + 1, i32::MIN + 1);
        assert!(a.squared_distance_to(&b) > 0);
    }

    #[test]
    fn test_coord_ordering_is_y_then_x() {
        let mut coords = vec![Coord::new(5, 1), Coord::new(0, 2), Coord::new(1, 1)];
        coords.sort();
        assert_eq!(coords, vec![Coord::new(1, 1), Coord::new(5, 1), Coord::new(0, 2)]);
    }

    #[test]
    fn test_distance_key_ties() {
        // Same distance from origin: lower y first
        let a = DistanceKey::from_origin(Coord::new(5, 0));
        let b = DistanceKey::from_origin(Coord::new(0, 5));
        let c = DistanceKey::from_origin(Coord::new(-5, 0));
        assert!(c < a);
        assert!(a < b);
        assert_eq!(a.squared_distance(), 25);

        let near = DistanceKey::from_origin(Coord::new(1, 1));
        assert!(near < c);
    }

    #[test]
    fn test_default_is_sentinel() {
        assert!(Coord::default().is_none());
        assert_eq!(format!("{}", Coord::new(1, -2)), "(1,-2)");
    }
}
