//! This module describes the Bound trait, which allows for a description of what values a color
//! space can represent. The sRGB gamut only supports components from 0 to 1, which covers only part
//! of the chromaticity diagram: saturated emission lines routinely land outside of it. Rather than
//! reject those, they are clamped to the nearest displayable value.

use crate::color::RGBColor;
use crate::coord::Coord;

/// Describes a color space in which the total space of representable colors has explicit bounds on
/// each component.
/// # Example
/// ```
/// # use spectrocie::bound::Bound;
/// # use spectrocie::color::RGBColor;
/// let out_of_bounds = RGBColor{r: 1.3, g: -0.2, b: 0.5};
/// let in_bounds = RGBColor::clamp(out_of_bounds);
/// assert_eq!(in_bounds, RGBColor{r: 1., g: 0., b: 0.5});
/// ```
pub trait Bound: Sized + From<Coord> + Into<Coord> {
    /// Returns an array [(min1, max1), (min2, max2), (min3, max3)] that represents the bounds on each
    /// component of the color space, in the order that they appear in the Coord representation. If
    /// some parts of the bounds don't exist, using infinity or negative infinity works.
    fn bounds() -> [(f64, f64); 3];
    /// Given a Coord, returns a Coord such that each component has been clamped to the correct
    /// bounds. Each component is clamped on its own.
    fn clamp_coord(point: Coord) -> Coord {
        let ranges = Self::bounds();
        let mut point_vals = [0.; 3];
        for (i, &component) in [point.x, point.y, point.z].iter().enumerate() {
            let (min, max) = ranges[i];
            point_vals[i] = if component < min {
                min
            } else if component > max {
                max
            } else {
                component
            };
        }
        Coord::from(point_vals)
    }
    /// Returns a new version of the color whose components are all within bounds. If the color is
    /// already in the gamut, it comes back unchanged.
    fn clamp(color: Self) -> Self {
        Self::from(Self::clamp_coord(color.into()))
    }
}

impl Bound for RGBColor {
    fn bounds() -> [(f64, f64); 3] {
        [(0., 1.), (0., 1.), (0., 1.)]
    }
}

#[cfg(test)]
mod tests {
    use super::Bound;
    use crate::color::RGBColor;

    #[test]
    fn test_zero_one_bounds() {
        let color1 = RGBColor {
            r: 0.1,
            g: -0.2,
            b: 1.2,
        };
        assert_eq!(
            RGBColor::clamp(color1),
            RGBColor {
                r: 0.1,
                g: 0.,
                b: 1.
            }
        );
    }

    #[test]
    fn test_in_gamut_is_untouched() {
        let color = RGBColor {
            r: 0.,
            g: 0.5,
            b: 1.,
        };
        assert_eq!(RGBColor::clamp(color), color);
    }
}
