//! This module turns a resampled spectrum into a color, by weighting it with an illuminant and the
//! CIE 1931 standard observer and summing over wavelength:
//!
//! X = k Σ S(λ) R(λ) x̄(λ) Δλ, and likewise for Y and Z, with k = 100 / Σ S(λ) ȳ(λ) Δλ
//!
//! where S is the illuminant and R the spectrum. The normalization puts the illuminant's own white
//! at Y = 100. The sums run over the 1 nm grid the spectrum was resampled onto; wherever the
//! spectrum has no samples it contributes nothing.

use crate::color::{Chromaticity, ColorCoordinates, XYZColor};
use crate::consts::{GRID_STEP, LUMINANCE_SCALE};
use crate::coord::Coord;
use crate::error::SpectrumError;
use crate::illuminants::Illuminant;
use crate::observer::{CIE_OBSERVER_2DEG_1931, OBSERVER_END, OBSERVER_START};
use crate::spectrum::CorrectedSpectrum;

fn color_matching(wavelength: usize) -> Coord {
    CIE_OBSERVER_2DEG_1931.at(wavelength).unwrap_or_default()
}

/// Σ S(λ) ȳ(λ) Δλ over the whole observer domain: the luminance of the illuminant itself.
fn illuminant_luminance(illuminant: Illuminant) -> f64 {
    (OBSERVER_START..=OBSERVER_END)
        .map(|w| illuminant.power(w).unwrap_or(0.) * color_matching(w).y)
        .sum::<f64>()
        * GRID_STEP
}

/// Computes the tristimulus values of a spectrum seen under the given illuminant. Never fails, but
/// the result may be all zeros (for a spectrum that is zero everywhere, or lies outside of the
/// visible range), which has no chromaticity.
pub fn spectrum_to_xyz(spectrum: &CorrectedSpectrum, illuminant: Illuminant) -> XYZColor {
    let sum = spectrum
        .iter()
        .fold(Coord::default(), |acc, (wavelength, intensity)| {
            let power = illuminant.power(wavelength).unwrap_or(0.);
            acc + color_matching(wavelength) * (power * intensity)
        });
    let k = LUMINANCE_SCALE / illuminant_luminance(illuminant);
    XYZColor::from_coord(sum * (k * GRID_STEP), illuminant)
}

impl ColorCoordinates {
    /// Computes XYZ, xy and sRGB for a resampled spectrum. Fails with
    /// [`SpectrumError::DegenerateSpectrum`] if the spectrum integrates to nothing.
    ///
    /// # Example
    /// ```
    /// # use spectrocie::prelude::*;
    /// // a perfect reflector under daylight is daylight white
    /// let flat: RawSpectrum = (380..=780).step_by(10).map(|w| (w as f64, 1.0)).collect();
    /// let corrected = flat.resample(&ConversionSettings::default()).unwrap();
    /// let coords = ColorCoordinates::from_spectrum(&corrected, Illuminant::D65).unwrap();
    /// assert!((coords.xy.x - 0.3127).abs() < 1e-3);
    /// assert!((coords.xy.y - 0.3290).abs() < 1e-3);
    /// ```
    pub fn from_spectrum(
        spectrum: &CorrectedSpectrum,
        illuminant: Illuminant,
    ) -> Result<ColorCoordinates, SpectrumError> {
        ColorCoordinates::from_xyz(spectrum_to_xyz(spectrum, illuminant))
    }
}

/// The tristimulus values of monochromatic light of unit power, with the color matching functions
/// interpolated linearly between whole nanometers. `None` outside of 360-830 nm.
pub fn wavelength_to_xyz(wavelength: f64) -> Option<XYZColor> {
    if !(wavelength >= OBSERVER_START as f64 && wavelength <= OBSERVER_END as f64) {
        return None;
    }
    let below = wavelength.floor() as usize;
    let fraction = wavelength - below as f64;
    let mut cmf = color_matching(below);
    if fraction > 0. {
        cmf = cmf * (1. - fraction) + color_matching(below + 1) * fraction;
    }
    Some(XYZColor::from_coord(cmf, Illuminant::E))
}

/// The point on the edge of the CIE 1931 diagram where monochromatic light of this wavelength
/// lands. Useful for labeling the spectral locus in plots.
///
/// # Example
/// ```
/// # use spectrocie::colorimetry::spectral_locus;
/// let blue = spectral_locus(450.).unwrap();
/// assert!((blue.x - 0.1566).abs() < 1e-3);
/// assert!(spectral_locus(900.).is_none());
/// ```
pub fn spectral_locus(wavelength: f64) -> Option<Chromaticity> {
    wavelength_to_xyz(wavelength)?.chromaticity().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::TEST_PRECISION;
    use crate::observer::CIE_ILLUMINANT_D65;
    use crate::settings::ConversionSettings;
    use crate::spectrum::RawSpectrum;

    fn resample(raw: RawSpectrum) -> CorrectedSpectrum {
        raw.resample(&ConversionSettings::default()).unwrap()
    }

    fn gaussian(center: f64) -> CorrectedSpectrum {
        resample(
            (400..=700)
                .step_by(5)
                .map(|w| {
                    let w = w as f64;
                    (w, (-(w - center).powi(2) / 200.).exp())
                })
                .collect(),
        )
    }

    #[test]
    fn test_flat_spectrum_under_d65() {
        let flat = resample((360..=830).step_by(5).map(|w| (w as f64, 1.)).collect());
        let xyz = spectrum_to_xyz(&flat, Illuminant::D65);
        assert!((xyz.y - 100.).abs() < 1e-9);
        let xy = xyz.chromaticity().unwrap();
        assert!(approx_eq!(f64, xy.x, 0.3127, epsilon = TEST_PRECISION));
        assert!(approx_eq!(f64, xy.y, 0.3290, epsilon = TEST_PRECISION));
    }

    #[test]
    fn test_d65_spectrum_under_e() {
        let d65 = resample(CIE_ILLUMINANT_D65.iter().map(|(w, p)| (w as f64, p)).collect());
        let xy = spectrum_to_xyz(&d65, Illuminant::E).chromaticity().unwrap();
        assert!(approx_eq!(f64, xy.x, 0.3127, epsilon = TEST_PRECISION));
        assert!(approx_eq!(f64, xy.y, 0.3290, epsilon = TEST_PRECISION));
    }

    #[test]
    fn test_flat_spectrum_under_e() {
        let flat = resample((360..=830).step_by(5).map(|w| (w as f64, 1.)).collect());
        let xy = spectrum_to_xyz(&flat, Illuminant::E).chromaticity().unwrap();
        assert!(approx_eq!(f64, xy.x, 1. / 3., epsilon = TEST_PRECISION));
        assert!(approx_eq!(f64, xy.y, 1. / 3., epsilon = TEST_PRECISION));
        // its own white, adapted to the display white
        let rgb = ColorCoordinates::from_spectrum(&flat, Illuminant::E).unwrap().rgb;
        for c in &[rgb.r, rgb.g, rgb.b] {
            assert!(approx_eq!(f64, *c, 1., epsilon = TEST_PRECISION));
        }
    }

    #[test]
    fn test_narrow_lines_are_clamped() {
        let green = ColorCoordinates::from_spectrum(&gaussian(520.), Illuminant::D65).unwrap();
        assert_eq!(green.rgb.r, 0.);
        assert_eq!(green.rgb.g, 1.);
        assert!(green.rgb.b < 0.05);
        let blue = ColorCoordinates::from_spectrum(&gaussian(460.), Illuminant::D65).unwrap();
        assert_eq!(blue.rgb.g, 0.);
        assert_eq!(blue.rgb.b, 1.);
        for c in &[green.rgb.r, green.rgb.g, green.rgb.b, blue.rgb.r] {
            assert!(*c >= 0. && *c <= 1.);
        }
    }

    #[test]
    fn test_dark_spectrum_is_degenerate() {
        let dark = resample((400..=700).step_by(10).map(|w| (w as f64, 0.)).collect());
        assert_eq!(
            ColorCoordinates::from_spectrum(&dark, Illuminant::D65),
            Err(SpectrumError::DegenerateSpectrum)
        );
        let invisible = resample((900..=1000).step_by(10).map(|w| (w as f64, 1.)).collect());
        assert!(invisible.is_empty());
        assert_eq!(
            ColorCoordinates::from_spectrum(&invisible, Illuminant::D65),
            Err(SpectrumError::DegenerateSpectrum)
        );
    }

    #[test]
    fn test_spectral_locus() {
        let xy = spectral_locus(450.).unwrap();
        assert!(approx_eq!(f64, xy.x, 0.15664, epsilon = TEST_PRECISION));
        assert!(approx_eq!(f64, xy.y, 0.01770, epsilon = TEST_PRECISION));
        // halfway between two whole nanometers lands between their locus points
        let between = wavelength_to_xyz(450.5).unwrap();
        let (lo, hi) = (
            wavelength_to_xyz(450.).unwrap(),
            wavelength_to_xyz(451.).unwrap(),
        );
        assert!((between.z - (lo.z + hi.z) / 2.).abs() < 1e-12);
        assert!(wavelength_to_xyz(359.9).is_none());
        assert!(wavelength_to_xyz(830.).is_some());
        assert!(wavelength_to_xyz(std::f64::NAN).is_none());
    }

    #[test]
    fn test_pipeline_is_deterministic() {
        let a = ColorCoordinates::from_spectrum(&gaussian(600.), Illuminant::D65).unwrap();
        let b = ColorCoordinates::from_spectrum(&gaussian(600.), Illuminant::D65).unwrap();
        assert_eq!(a, b);
    }
}
