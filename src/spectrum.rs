//! This module contains the two forms a spectrum takes: [`RawSpectrum`], exactly what was read from a
//! file, and [`CorrectedSpectrum`], the same spectrum resampled onto the 1 nm grid the colorimetric
//! integration runs over. Both are plain values that never change once built.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::iter::FromIterator;

use crate::error::SpectrumError;
use crate::interpolation::{
    is_uniform, CubicSpline, InterpolationMethod, Interpolator, SpragueInterpolator,
    SPRAGUE_MIN_SAMPLES,
};
use crate::settings::ConversionSettings;

/// A measured spectrum: intensity by wavelength (in nanometers), in the order the wavelengths were
/// first seen. Wavelengths are unique. Intensities may be zero or negative, as background-subtracted
/// measurements often are.
///
/// # Example
/// ```
/// # use spectrocie::spectrum::RawSpectrum;
/// let raw = RawSpectrum::from_pairs(vec![(500., 0.1), (450., 0.2), (500., 0.4)]);
/// assert_eq!(raw.len(), 2);
/// // a repeated wavelength keeps its place but takes the later value
/// assert_eq!(raw.points(), &[(500., 0.4), (450., 0.2)]);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawSpectrum {
    points: Vec<(f64, f64)>,
}

impl RawSpectrum {
    /// Builds a spectrum from (wavelength, intensity) pairs. When a wavelength shows up more than
    /// once, the first occurrence fixes its position and the last one its value.
    pub fn from_pairs<I: IntoIterator<Item = (f64, f64)>>(pairs: I) -> RawSpectrum {
        let mut points: Vec<(f64, f64)> = Vec::new();
        // keyed on the bit pattern, so -0 and 0 are folded together first
        let mut seen: HashMap<u64, usize> = HashMap::new();
        for (wavelength, intensity) in pairs {
            let wavelength = if wavelength == 0. { 0. } else { wavelength };
            match seen.get(&wavelength.to_bits()) {
                Some(&index) => points[index].1 = intensity,
                None => {
                    seen.insert(wavelength.to_bits(), points.len());
                    points.push((wavelength, intensity));
                }
            }
        }
        RawSpectrum { points }
    }

    /// The number of distinct wavelengths.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether no data was found at all.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The intensity recorded at exactly this wavelength, if any.
    pub fn get(&self, wavelength: f64) -> Option<f64> {
        self.points
            .iter()
            .find(|(w, _)| *w == wavelength)
            .map(|&(_, intensity)| intensity)
    }

    /// Iterates over (wavelength, intensity) pairs in file order.
    pub fn iter<'a>(&'a self) -> impl Iterator<Item = (f64, f64)> + 'a {
        self.points.iter().cloned()
    }

    /// The (wavelength, intensity) pairs in file order.
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// The smallest and largest wavelength, or `None` for an empty spectrum.
    pub fn wavelength_range(&self) -> Option<(f64, f64)> {
        self.points.iter().fold(None, |range, &(w, _)| match range {
            None => Some((w, w)),
            Some((lo, hi)) => Some((lo.min(w), hi.max(w))),
        })
    }

    /// Resamples the spectrum at every integral nanometer it covers inside the configured
    /// wavelength range. Evenly spaced data with enough samples goes through Sprague interpolation,
    /// everything else through a not-a-knot cubic spline. Nothing is extrapolated: wavelengths outside
    /// of the measured range are left out of the result, and so count as zero.
    ///
    /// Fails with [`SpectrumError::InsufficientSamples`] if there are fewer than 2 wavelengths. A
    /// spectrum that doesn't overlap the range at all resamples to an empty spectrum.
    pub fn resample(
        &self,
        settings: &ConversionSettings,
    ) -> Result<CorrectedSpectrum, SpectrumError> {
        if self.len() < 2 {
            return Err(SpectrumError::InsufficientSamples(self.len()));
        }
        let mut sorted = self.points.clone();
        sorted.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
        let (xs, ys): (Vec<f64>, Vec<f64>) = sorted.into_iter().unzip();

        let first = xs[0];
        let last = xs[xs.len() - 1];
        let (range_start, range_end) = settings.wavelength_range();
        let grid_start = first.ceil().max(range_start as f64);
        let grid_end = last.floor().min(range_end as f64);

        let uniform =
            xs.len() >= SPRAGUE_MIN_SAMPLES && is_uniform(&xs, settings.uniformity_tolerance);
        let sprague = if uniform {
            let step = (last - first) / (xs.len() - 1) as f64;
            SpragueInterpolator::new(first, step, &ys)
        } else {
            None
        };
        let (method, interpolator): (InterpolationMethod, Box<dyn Interpolator>) = match sprague {
            Some(sprague) => (InterpolationMethod::Sprague, Box::new(sprague)),
            None => {
                let n = xs.len();
                let spline =
                    CubicSpline::new(xs, ys).ok_or(SpectrumError::InsufficientSamples(n))?;
                (InterpolationMethod::CubicSpline, Box::new(spline))
            }
        };

        let start = grid_start.max(0.) as usize;
        let values: Vec<f64> = if grid_start > grid_end {
            Vec::new()
        } else {
            (start..=grid_end as usize)
                .map(|w| interpolator.interpolate(w as f64))
                .collect()
        };
        debug!(
            "resampled {} points to {} using {:?}",
            self.len(),
            values.len(),
            method
        );
        Ok(CorrectedSpectrum {
            start,
            values,
            method,
        })
    }
}

impl FromIterator<(f64, f64)> for RawSpectrum {
    fn from_iter<I: IntoIterator<Item = (f64, f64)>>(iter: I) -> RawSpectrum {
        RawSpectrum::from_pairs(iter)
    }
}

/// A spectrum sampled at every integral nanometer from `start()` through `end()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectedSpectrum {
    start: usize,
    values: Vec<f64>,
    method: InterpolationMethod,
}

impl CorrectedSpectrum {
    /// The first wavelength, in nanometers.
    pub fn start(&self) -> usize {
        self.start
    }

    /// The last wavelength, in nanometers (inclusive).
    pub fn end(&self) -> usize {
        self.start + self.values.len().saturating_sub(1)
    }

    /// The number of samples.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the spectrum has no samples, which happens when the measurement lies entirely
    /// outside of the visible range.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The intensity at the given wavelength, or `None` outside of the spectrum.
    pub fn at(&self, wavelength: usize) -> Option<f64> {
        wavelength
            .checked_sub(self.start)
            .and_then(|index| self.values.get(index))
            .copied()
    }

    /// Iterates over (wavelength, intensity) pairs, one nanometer apart.
    pub fn iter<'a>(&'a self) -> impl Iterator<Item = (usize, f64)> + 'a {
        let start = self.start;
        self.values
            .iter()
            .enumerate()
            .map(move |(i, v)| (start + i, *v))
    }

    /// The intensities, starting at `start()`.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// How the samples were interpolated from the raw data.
    pub fn method(&self) -> InterpolationMethod {
        self.method
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(start: f64, step: f64, n: usize) -> RawSpectrum {
        (0..n)
            .map(|i| {
                let w = start + step * i as f64;
                (w, (-(w - 550.).powi(2) / 5000.).exp())
            })
            .collect()
    }

    #[test]
    fn test_dedup_keeps_first_position() {
        let raw = RawSpectrum::from_pairs(vec![(450., 0.2), (500., 0.5), (450., 0.7)]);
        assert_eq!(raw.points(), &[(450., 0.7), (500., 0.5)]);
        assert_eq!(raw.get(450.), Some(0.7));
        assert_eq!(raw.get(451.), None);
        assert_eq!(raw.wavelength_range(), Some((450., 500.)));
        assert_eq!(RawSpectrum::default().wavelength_range(), None);
    }

    #[test]
    fn test_too_few_samples() {
        let settings = ConversionSettings::default();
        let raw = RawSpectrum::from_pairs(vec![(500., 1.), (500., 2.)]);
        assert_eq!(
            raw.resample(&settings),
            Err(SpectrumError::InsufficientSamples(1))
        );
        assert_eq!(
            RawSpectrum::default().resample(&settings),
            Err(SpectrumError::InsufficientSamples(0))
        );
    }

    #[test]
    fn test_uniform_uses_sprague() {
        let raw = uniform(400., 5., 61);
        let corrected = raw.resample(&ConversionSettings::default()).unwrap();
        assert_eq!(corrected.method(), InterpolationMethod::Sprague);
        assert_eq!(corrected.start(), 400);
        assert_eq!(corrected.end(), 700);
        assert_eq!(corrected.len(), 301);
        // knots are reproduced
        assert!((corrected.at(550).unwrap() - 1.).abs() < 1e-12);
    }

    #[test]
    fn test_nonuniform_uses_spline() {
        let raw = RawSpectrum::from_pairs(vec![
            (450., 0.2),
            (500., 0.5),
            (550., 0.9),
            (600., 0.3),
            (610., 0.1),
        ]);
        let corrected = raw.resample(&ConversionSettings::default()).unwrap();
        assert_eq!(corrected.method(), InterpolationMethod::CubicSpline);
        assert_eq!((corrected.start(), corrected.end()), (450, 610));
        assert_eq!(corrected.len(), 161);
        assert!((corrected.at(500).unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_short_uniform_uses_spline() {
        let raw = uniform(450., 50., 4);
        let corrected = raw.resample(&ConversionSettings::default()).unwrap();
        assert_eq!(corrected.method(), InterpolationMethod::CubicSpline);
        assert_eq!(corrected.len(), 151);
    }

    #[test]
    fn test_grid_is_clipped_and_integral() {
        let raw = uniform(300.5, 5., 120);
        let corrected = raw.resample(&ConversionSettings::default()).unwrap();
        assert_eq!(corrected.start(), 360);
        assert_eq!(corrected.end(), 830);
        let wavelengths: Vec<usize> = corrected.iter().map(|(w, _)| w).collect();
        assert!(wavelengths.windows(2).all(|pair| pair[1] == pair[0] + 1));

        let settings = ConversionSettings {
            wavelength_start: 380,
            wavelength_end: 780,
            ..ConversionSettings::default()
        };
        let corrected = raw.resample(&settings).unwrap();
        assert_eq!((corrected.start(), corrected.end()), (380, 780));
    }

    #[test]
    fn test_no_overlap_is_empty() {
        let raw = uniform(900., 10., 10);
        let corrected = raw.resample(&ConversionSettings::default()).unwrap();
        assert!(corrected.is_empty());
        assert_eq!(corrected.at(900), None);
    }

    #[test]
    fn test_resampling_is_repeatable() {
        let raw = uniform(380., 2.5, 100);
        let settings = ConversionSettings::default();
        assert_eq!(raw.resample(&settings), raw.resample(&settings));
    }
}
