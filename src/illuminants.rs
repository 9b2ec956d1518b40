//! This module provides an enum of the illuminants a spectrum can be weighted by, as well as a table
//! of their white points. Emission spectra are conventionally reported under D65, the same daylight
//! the sRGB display space is built around. The equal-energy illuminant E is offered for callers who
//! want the plain color matching integral, with no ambient lighting correction at all. The white
//! point table is from the [ASTM E308 standard](https://www.astm.org/Standards/E308.htm) and is
//! normalized so that the Y (luminance) value is 100.

use crate::observer::{CIE_ILLUMINANT_D65, OBSERVER_END, OBSERVER_START};

/// A listing of the supported illuminants.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Illuminant {
    /// Average noon daylight, about 6504 K. The default.
    D65,
    /// The hypothetical equal-energy radiator: constant power at every wavelength.
    E,
}

/// White points of the illuminants, in the order of the enum definition. Each is an array of 3 `f64`
/// values X, Y, and Z, normalized so that Y is 100.
pub static ILLUMINANT_WHITE_POINTS: [[f64; 3]; 2] = [
    [95.047, 100.000, 108.883],
    [100.000, 100.000, 100.000],
];

impl Default for Illuminant {
    fn default() -> Illuminant {
        Illuminant::D65
    }
}

impl Illuminant {
    /// Gets the XYZ coordinates of the white point of the illuminant.
    pub fn white_point(&self) -> [f64; 3] {
        match *self {
            Illuminant::D65 => ILLUMINANT_WHITE_POINTS[0],
            Illuminant::E => ILLUMINANT_WHITE_POINTS[1],
        }
    }

    /// The relative spectral power of the illuminant at a given wavelength, in nanometers. Only
    /// defined on the domain of the standard observer; `None` elsewhere.
    pub fn power(&self, wavelength: usize) -> Option<f64> {
        match *self {
            Illuminant::D65 => CIE_ILLUMINANT_D65.at(wavelength),
            Illuminant::E => {
                if wavelength >= OBSERVER_START && wavelength <= OBSERVER_END {
                    Some(1.0)
                } else {
                    None
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_white_points_are_normalized() {
        for illuminant in &[Illuminant::D65, Illuminant::E] {
            assert_eq!(illuminant.white_point()[1], 100.);
        }
    }

    #[test]
    fn test_power_domain() {
        assert_eq!(Illuminant::E.power(555), Some(1.0));
        assert_eq!(Illuminant::E.power(900), None);
        assert_eq!(Illuminant::D65.power(560), Some(100.0));
        assert_eq!(Illuminant::D65.power(200), None);
        assert_eq!(Illuminant::default(), Illuminant::D65);
    }
}
