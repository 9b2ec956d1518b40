//! This module contains a struct, [`Coord`], that models a 3D coordinate space and supports limited
//! math in 3 dimensions with scalars and other coordinates. Tristimulus sums, the color matching
//! functions at one wavelength, and linear RGB triples all share this shape, so they share the math.

use num::{Num, NumCast};
use std::ops::{Add, Div, Mul};

/// Represents a scalar value that can be easily converted, described using the common numeric traits
/// in [`num`]. Anything that falls under this category can be multiplied by a [`Coord`] to scale
/// it.
pub trait Scalar: NumCast + Num {}

impl<T: NumCast + Num> Scalar for T {}

/// A point in 3D space, with axes `x`, `y`, and `z`. Which quantity lives on which axis is purely
/// conventional: an XYZ color maps X, Y, Z in order, and an RGB color maps r, g, b in order.
///
/// # Example
/// ```
/// # use spectrocie::coord::Coord;
/// let cmf = Coord{x: 0.3362, y: 0.038, z: 1.77211};
/// let weighted = cmf * 2u8 + cmf;
/// assert!((weighted.y - 0.114).abs() <= 1e-10);
/// assert!((weighted.sum() - 3. * cmf.sum()).abs() <= 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
pub struct Coord {
    /// The first axis.
    pub x: f64,
    /// The second axis.
    pub y: f64,
    /// The third axis.
    pub z: f64,
}

impl Add for Coord {
    type Output = Coord;
    fn add(self, rhs: Coord) -> Coord {
        Coord {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}

// Scalar multiplication and division: (a, b, c) * s = (sa, sb, sc). Not commutative, but it'll do.
impl<U: Scalar> Mul<U> for Coord {
    type Output = Coord;
    fn mul(self, rhs: U) -> Coord {
        let r: f64 = num::cast(rhs).unwrap_or(std::f64::NAN);
        Coord {
            x: self.x * r,
            y: self.y * r,
            z: self.z * r,
        }
    }
}

/// Division by zero follows IEEE rules and yields infinities or NaN: callers that care check the
/// divisor first.
impl<U: Scalar> Div<U> for Coord {
    type Output = Coord;
    fn div(self, rhs: U) -> Coord {
        let r: f64 = num::cast(rhs).unwrap_or(std::f64::NAN);
        Coord {
            x: self.x / r,
            y: self.y / r,
            z: self.z / r,
        }
    }
}

impl Coord {
    /// The sum of the three components.
    pub fn sum(&self) -> f64 {
        self.x + self.y + self.z
    }

    /// Whether every component is a finite number.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Applies a function to every component.
    pub fn map<F: Fn(f64) -> f64>(self, f: F) -> Coord {
        Coord {
            x: f(self.x),
            y: f(self.y),
            z: f(self.z),
        }
    }
}

impl From<[f64; 3]> for Coord {
    fn from(vals: [f64; 3]) -> Coord {
        Coord {
            x: vals[0],
            y: vals[1],
            z: vals[2],
        }
    }
}

impl From<Coord> for [f64; 3] {
    fn from(c: Coord) -> [f64; 3] {
        [c.x, c.y, c.z]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_ops() {
        let point = Coord {
            x: 1.,
            y: 8.,
            z: 7.,
        };
        assert_eq!(point * 2u8, Coord { x: 2., y: 16., z: 14. });
        assert_eq!(point / 2., Coord { x: 0.5, y: 4., z: 3.5 });
        assert_eq!(point + point, point * 2);
    }

    #[test]
    fn test_division_by_zero_is_not_finite() {
        let point = Coord {
            x: 1.,
            y: 0.,
            z: -1.,
        };
        assert!(!(point / 0.).is_finite());
        assert!(point.is_finite());
    }

    #[test]
    fn test_array_conversion() {
        let point: Coord = [0.25, 0.5, 0.75].into();
        assert_eq!(point.map(|v| v * 4.), Coord { x: 1., y: 2., z: 3. });
        let back: [f64; 3] = point.into();
        assert_eq!(back, [0.25, 0.5, 0.75]);
    }
}
