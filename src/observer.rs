//! Reference spectral data: the CIE 1931 2° standard observer and the D65 illuminant. Both ship with
//! the crate as 5 nm CSV tables under `data/` and are expanded to 1 nm resolution the first time
//! they are used. The color matching functions are expanded with Sprague interpolation; D65 is
//! expanded linearly, which is how the CIE derives its own 1 nm D65 table.
//!
//! The expanded tables live for the rest of the process and are never written to again.

use crate::coord::Coord;
use crate::interpolation::{Interpolator, LinearInterpolator, SpragueInterpolator};
use serde::de::DeserializeOwned;

/// First wavelength, in nanometers, covered by the standard observer.
pub const OBSERVER_START: usize = 360;
/// Last wavelength, in nanometers, covered by the standard observer.
pub const OBSERVER_END: usize = 830;

static CIE_1931_2DEG_CSV: &str = include_str!("../data/cie_1931_2deg.csv");
static CIE_D65_CSV: &str = include_str!("../data/cie_d65.csv");

#[derive(Debug, Deserialize)]
struct CmfRecord {
    wavelength: u16,
    xbar: f64,
    ybar: f64,
    zbar: f64,
}

#[derive(Debug, Deserialize)]
struct SpdRecord {
    wavelength: u16,
    power: f64,
}

/// A spectral distribution tabulated at every integral nanometer from `start()` through `end()`.
#[derive(Debug, Clone)]
pub struct TabulatedDistribution<V> {
    label: &'static str,
    start: usize,
    values: Vec<V>,
}

impl<V: Copy> TabulatedDistribution<V> {
    fn new(label: &'static str, start: usize, values: Vec<V>) -> TabulatedDistribution<V> {
        TabulatedDistribution {
            label,
            start,
            values,
        }
    }

    /// A descriptive label.
    pub fn label(&self) -> &str {
        self.label
    }

    /// The first wavelength with a value.
    pub fn start(&self) -> usize {
        self.start
    }

    /// The last wavelength with a value (inclusive).
    pub fn end(&self) -> usize {
        self.start + self.values.len().saturating_sub(1)
    }

    /// The number of wavelengths with a value.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the distribution has no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The value at the given wavelength, or `None` outside of the table.
    pub fn at(&self, wavelength: usize) -> Option<V> {
        wavelength
            .checked_sub(self.start)
            .and_then(|index| self.values.get(index))
            .copied()
    }

    /// Iterates over `(wavelength, value)` pairs in increasing wavelength order.
    pub fn iter<'a>(&'a self) -> impl Iterator<Item = (usize, V)> + 'a {
        let start = self.start;
        self.values
            .iter()
            .enumerate()
            .map(move |(i, v)| (start + i, *v))
    }
}

lazy_static! {
    /// The CIE 1931 2° color matching functions x̄, ȳ, z̄, stored as the x, y, z of a [`Coord`].
    pub static ref CIE_OBSERVER_2DEG_1931: TabulatedDistribution<Coord> = load_observer();
    /// The relative spectral power distribution of CIE illuminant D65, 100 at 560 nm.
    pub static ref CIE_ILLUMINANT_D65: TabulatedDistribution<f64> = load_d65();
}

// these files are compiled into the crate: malformed data is a bug, not something to recover from
fn read_table<T: DeserializeOwned>(data: &str) -> Vec<T> {
    let mut reader = csv::Reader::from_reader(data.as_bytes());
    reader
        .deserialize()
        .map(|result| result.expect("embedded CIE table is malformed"))
        .collect()
}

fn output_grid() -> impl Iterator<Item = f64> {
    (OBSERVER_START..=OBSERVER_END).map(|w| w as f64)
}

fn load_observer() -> TabulatedDistribution<Coord> {
    let records: Vec<CmfRecord> = read_table(CIE_1931_2DEG_CSV);
    let start = f64::from(records[0].wavelength);
    let step = f64::from(records[1].wavelength - records[0].wavelength);

    let expand = |component: fn(&CmfRecord) -> f64| -> Vec<f64> {
        let samples: Vec<f64> = records.iter().map(component).collect();
        let sprague = SpragueInterpolator::new(start, step, &samples)
            .expect("embedded CIE observer table is too short");
        // the quintic overshoots a hair below zero where z̄ dies out
        sprague
            .interpolate_all(output_grid())
            .into_iter()
            .map(|v| v.max(0.))
            .collect()
    };
    let xbar = expand(|r| r.xbar);
    let ybar = expand(|r| r.ybar);
    let zbar = expand(|r| r.zbar);

    let values = xbar
        .into_iter()
        .zip(ybar)
        .zip(zbar)
        .map(|((x, y), z)| Coord { x, y, z })
        .collect();
    TabulatedDistribution::new("CIE 1931 2 Degree Standard Observer", OBSERVER_START, values)
}

fn load_d65() -> TabulatedDistribution<f64> {
    let records: Vec<SpdRecord> = read_table(CIE_D65_CSV);
    let (wavelengths, powers): (Vec<f64>, Vec<f64>) = records
        .iter()
        .map(|r| (f64::from(r.wavelength), r.power))
        .unzip();
    let linear =
        LinearInterpolator::new(wavelengths, powers).expect("embedded D65 table is malformed");
    TabulatedDistribution::new(
        "CIE Illuminant D65",
        OBSERVER_START,
        linear.interpolate_all(output_grid()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observer_covers_domain() {
        let observer = &*CIE_OBSERVER_2DEG_1931;
        assert_eq!(observer.start(), OBSERVER_START);
        assert_eq!(observer.end(), OBSERVER_END);
        assert_eq!(observer.len(), OBSERVER_END - OBSERVER_START + 1);
        assert!(observer.at(359).is_none());
        assert!(observer.at(831).is_none());
        assert!(observer
            .iter()
            .all(|(_, cmf)| cmf.x >= 0. && cmf.y >= 0. && cmf.z >= 0.));
    }

    #[test]
    fn test_observer_keeps_tabulated_values() {
        // the 5 nm knots survive the expansion untouched
        let cmf = CIE_OBSERVER_2DEG_1931.at(555).unwrap();
        assert!((cmf.x - 0.5120501).abs() < 1e-9);
        assert!((cmf.y - 1.0).abs() < 1e-9);
        let cmf = CIE_OBSERVER_2DEG_1931.at(450).unwrap();
        assert!((cmf.z - 1.77211).abs() < 1e-9);
    }

    #[test]
    fn test_d65_linear_expansion() {
        let d65 = &*CIE_ILLUMINANT_D65;
        assert_eq!(d65.label(), "CIE Illuminant D65");
        assert!((d65.at(560).unwrap() - 100.).abs() < 1e-12);
        // two fifths of the way from 104.405 at 540 to 104.225 at 545
        assert!((d65.at(542).unwrap() - 104.333).abs() < 1e-9);
        assert_eq!(d65.iter().count(), d65.len());
    }
}
