//! This file defines the color values a spectrum is reduced to: a point in CIE 1931 XYZ space, its
//! chromaticity on the CIE 1931 diagram, and an approximate sRGB color for drawing it. Together they
//! make up [`ColorCoordinates`], which is computed once per spectrum and never changed afterwards.

use std::fmt;

use crate::bound::Bound;
use crate::consts::{BRADFORD_INVERSE, BRADFORD_TRANSFORM, STANDARD_RGB_TRANSFORM};
use crate::coord::Coord;
use crate::error::SpectrumError;
use crate::illuminants::Illuminant;

/// A point in the CIE 1931 XYZ color space, on the usual scale where the illuminant's own white has
/// Y = 100.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct XYZColor {
    /// The X axis of the CIE 1931 XYZ space, roughly representing the long-wavelength receptors in
    /// the human eye.
    pub x: f64,
    /// The Y axis of the CIE 1931 XYZ space, roughly representing the middle-wavelength receptors in
    /// the human eye. In CIE 1931, this is fudged to correspond exactly with perceived luminance.
    pub y: f64,
    /// The Z axis of the CIE 1931 XYZ space, roughly representing the short-wavelength receptors in
    /// the human eye.
    pub z: f64,
    /// The illuminant the spectrum was weighted by.
    pub illuminant: Illuminant,
}

impl XYZColor {
    /// Builds an XYZ color from a coordinate, using `x`, `y` and `z` in that order.
    pub fn from_coord(coord: Coord, illuminant: Illuminant) -> XYZColor {
        XYZColor {
            x: coord.x,
            y: coord.y,
            z: coord.z,
            illuminant,
        }
    }

    /// The three tristimulus values as a coordinate.
    pub fn to_coord(&self) -> Coord {
        Coord {
            x: self.x,
            y: self.y,
            z: self.z,
        }
    }

    /// Chromatically adapts the color to another illuminant with the Bradford transform, so that
    /// the white of the current illuminant lands on the white of `target`.
    pub fn color_adapt(&self, target: Illuminant) -> XYZColor {
        if self.illuminant == target {
            return *self;
        }
        let cones = |xyz: [f64; 3]| &*BRADFORD_TRANSFORM * vector![xyz[0], xyz[1], xyz[2]];
        let source_white = cones(self.illuminant.white_point());
        let target_white = cones(target.white_point());
        let response = cones([self.x, self.y, self.z]);
        let scaled = vector![
            response[0] * target_white[0] / source_white[0],
            response[1] * target_white[1] / source_white[1],
            response[2] * target_white[2] / source_white[2]
        ];
        let adapted = &*BRADFORD_INVERSE * scaled;
        XYZColor {
            x: adapted[0],
            y: adapted[1],
            z: adapted[2],
            illuminant: target,
        }
    }

    /// Projects onto the CIE 1931 chromaticity diagram: `(X / (X + Y + Z), Y / (X + Y + Z))`. A color
    /// whose components sum to zero (no light at all) has no chromaticity.
    pub fn chromaticity(&self) -> Result<Chromaticity, SpectrumError> {
        let sum = self.to_coord().sum();
        if sum == 0. || !sum.is_finite() {
            return Err(SpectrumError::DegenerateSpectrum);
        }
        Ok(Chromaticity {
            x: self.x / sum,
            y: self.y / sum,
        })
    }

    /// Scales the color so that Y = 1, which keeps the hue but brings it to the brightness of a
    /// display white. Fails if Y is zero.
    pub fn normalized(&self) -> Result<XYZColor, SpectrumError> {
        let scaled = self.to_coord() / self.y;
        if self.y == 0. || !scaled.is_finite() {
            return Err(SpectrumError::DegenerateSpectrum);
        }
        Ok(XYZColor::from_coord(scaled, self.illuminant))
    }
}

/// A point on the CIE 1931 chromaticity diagram.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chromaticity {
    /// The CIE x coordinate.
    pub x: f64,
    /// The CIE y coordinate.
    pub y: f64,
}

impl Chromaticity {
    /// The implied third coordinate, `1 - x - y`.
    pub fn z(&self) -> f64 {
        1. - self.x - self.y
    }
}

/// An sRGB color, gamma encoded, with each component nominally from 0 to 1.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct RGBColor {
    /// The red component.
    pub r: f64,
    /// The green component.
    pub g: f64,
    /// The blue component.
    pub b: f64,
}

/// The sRGB transfer function: linear below a small threshold, a 1/2.4 power curve above it.
fn srgb_gamma(linear: f64) -> f64 {
    if linear <= 0.0031308 {
        12.92 * linear
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    }
}

impl RGBColor {
    /// Approximates an XYZ color in sRGB. sRGB is defined against a D65 white, so colors computed
    /// under any other illuminant are chromatically adapted to D65 first. The color is then
    /// normalized so that Y = 1, otherwise dim spectra would all come out nearly black. Out-of-gamut
    /// colors, which includes most narrow emission lines, are clamped component by component rather
    /// than rejected.
    pub fn from_xyz(xyz: &XYZColor) -> Result<RGBColor, SpectrumError> {
        let normalized = xyz.color_adapt(Illuminant::D65).normalized()?;
        let linear = &*STANDARD_RGB_TRANSFORM * vector![normalized.x, normalized.y, normalized.z];
        let encoded = Coord {
            x: linear[0],
            y: linear[1],
            z: linear[2],
        }
        .map(srgb_gamma);
        Ok(RGBColor::clamp(RGBColor::from(encoded)))
    }

    /// Gets an (R, G, B) tuple of integers from 0 to 255. Components are truncated, not rounded, so
    /// only a component of exactly 1 reaches 255. Out of range values are clamped first.
    pub fn int_rgb_tup(&self) -> (u8, u8, u8) {
        let clamped = RGBColor::clamp(*self);
        let to_byte = |c: f64| (c * 255.) as u8;
        (to_byte(clamped.r), to_byte(clamped.g), to_byte(clamped.b))
    }
}

/// Displays the color as a hex code, such as `#FF8000`.
impl fmt::Display for RGBColor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (r, g, b) = self.int_rgb_tup();
        write!(f, "#{:02X}{:02X}{:02X}", r, g, b)
    }
}

impl From<Coord> for RGBColor {
    fn from(c: Coord) -> RGBColor {
        RGBColor {
            r: c.x,
            g: c.y,
            b: c.z,
        }
    }
}

impl From<RGBColor> for Coord {
    fn from(val: RGBColor) -> Self {
        Coord {
            x: val.r,
            y: val.g,
            z: val.b,
        }
    }
}

/// Everything a spectrum is reduced to. Produced together, from one XYZ value, and immutable.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorCoordinates {
    /// Tristimulus values.
    pub xyz: XYZColor,
    /// CIE 1931 chromaticity.
    pub xy: Chromaticity,
    /// Approximate sRGB color, clamped to the gamut.
    pub rgb: RGBColor,
}

impl ColorCoordinates {
    /// Derives the chromaticity and sRGB color of an XYZ color. Fails with
    /// [`SpectrumError::DegenerateSpectrum`] if either is undefined.
    pub fn from_xyz(xyz: XYZColor) -> Result<ColorCoordinates, SpectrumError> {
        let xy = xyz.chromaticity()?;
        let rgb = RGBColor::from_xyz(&xyz)?;
        Ok(ColorCoordinates { xyz, xy, rgb })
    }
}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;
    use crate::consts::TEST_PRECISION;

    fn d65_white() -> XYZColor {
        let wp = Illuminant::D65.white_point();
        XYZColor {
            x: wp[0],
            y: wp[1],
            z: wp[2],
            illuminant: Illuminant::D65,
        }
    }

    #[test]
    fn test_white_point_chromaticity() {
        let xy = d65_white().chromaticity().unwrap();
        assert!((xy.x - 0.3127).abs() <= TEST_PRECISION);
        assert!((xy.y - 0.3290).abs() <= TEST_PRECISION);
        assert!((xy.z() - 0.3583).abs() <= TEST_PRECISION);
    }

    #[test]
    fn test_white_is_white() {
        let rgb = RGBColor::from_xyz(&d65_white()).unwrap();
        assert!((rgb.r - 1.).abs() <= TEST_PRECISION);
        assert!((rgb.g - 1.).abs() <= TEST_PRECISION);
        assert!((rgb.b - 1.).abs() <= TEST_PRECISION);
    }

    #[test]
    fn test_equal_energy_white_adapts_to_display_white() {
        let e_white = XYZColor::from_coord(Coord::from([100., 100., 100.]), Illuminant::E);
        let adapted = e_white.color_adapt(Illuminant::D65);
        assert_eq!(adapted.illuminant, Illuminant::D65);
        assert!(approx_eq!(f64, adapted.x, 95.047, epsilon = TEST_PRECISION));
        assert!(approx_eq!(f64, adapted.y, 100., epsilon = TEST_PRECISION));
        assert!(approx_eq!(f64, adapted.z, 108.883, epsilon = TEST_PRECISION));
        assert_eq!(d65_white().color_adapt(Illuminant::D65), d65_white());

        let rgb = RGBColor::from_xyz(&e_white).unwrap();
        assert!((rgb.r - 1.).abs() <= TEST_PRECISION);
        assert!((rgb.g - 1.).abs() <= TEST_PRECISION);
        assert!((rgb.b - 1.).abs() <= TEST_PRECISION);
    }

    #[test]
    fn test_brightness_does_not_matter() {
        let dim = XYZColor::from_coord(d65_white().to_coord() / 1000., Illuminant::D65);
        let bright = RGBColor::from_xyz(&d65_white()).unwrap();
        assert_eq!(RGBColor::from_xyz(&dim).unwrap().to_string(), bright.to_string());
    }

    #[test]
    fn test_saturated_green_is_clamped() {
        // chromaticity of 520 nm light, well outside the sRGB triangle
        let xyz = XYZColor {
            x: 0.06327,
            y: 0.71,
            z: 0.07825,
            illuminant: Illuminant::D65,
        };
        let rgb = RGBColor::from_xyz(&xyz).unwrap();
        assert_eq!(rgb.r, 0.);
        assert_eq!(rgb.g, 1.);
        assert!(rgb.b >= 0. && rgb.b <= 1.);
    }

    #[test]
    fn test_degenerate() {
        let black = XYZColor {
            x: 0.,
            y: 0.,
            z: 0.,
            illuminant: Illuminant::D65,
        };
        assert_eq!(black.chromaticity(), Err(SpectrumError::DegenerateSpectrum));
        assert_eq!(
            ColorCoordinates::from_xyz(black),
            Err(SpectrumError::DegenerateSpectrum)
        );
        let no_luminance = XYZColor { x: 1., ..black };
        assert!(no_luminance.chromaticity().is_ok());
        assert_eq!(
            no_luminance.normalized(),
            Err(SpectrumError::DegenerateSpectrum)
        );
    }

    #[test]
    fn test_hex_and_bytes() {
        let color = RGBColor {
            r: 1.,
            g: 0.5,
            b: 0.,
        };
        assert_eq!(color.int_rgb_tup(), (255, 127, 0));
        assert_eq!(color.to_string(), "#FF7F00");
    }
}
