//! Knobs for the spectrum-to-color conversion. The defaults reproduce the standard behavior (D65,
//! full observer range), so most callers never need to touch these. The struct deserializes with
//! serde, with every field optional, so it can be loaded from whatever configuration format the
//! surrounding application already uses.

use crate::illuminants::Illuminant;
use crate::observer::{OBSERVER_END, OBSERVER_START};

/// Default relative tolerance when deciding whether raw wavelengths are evenly spaced.
pub const DEFAULT_UNIFORMITY_TOLERANCE: f64 = 1e-6;

/// Settings shared by every record in an import.
///
/// # Example
/// ```
/// # use spectrocie::settings::ConversionSettings;
/// # use spectrocie::illuminants::Illuminant;
/// let settings = ConversionSettings {
///     illuminant: Illuminant::E,
///     ..ConversionSettings::default()
/// };
/// assert_eq!(settings.wavelength_range(), (360, 830));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionSettings {
    /// The illuminant the spectrum is weighted by.
    pub illuminant: Illuminant,
    /// First wavelength, in nanometers, of the resampled grid. Values below the standard observer's
    /// range are raised to it.
    pub wavelength_start: usize,
    /// Last wavelength, in nanometers, of the resampled grid. Values above the standard observer's
    /// range are lowered to it.
    pub wavelength_end: usize,
    /// Relative tolerance on the step between raw wavelengths for the spectrum to count as uniformly
    /// sampled, and so to get Sprague interpolation instead of a cubic spline.
    pub uniformity_tolerance: f64,
}

impl Default for ConversionSettings {
    fn default() -> ConversionSettings {
        ConversionSettings {
            illuminant: Illuminant::D65,
            wavelength_start: OBSERVER_START,
            wavelength_end: OBSERVER_END,
            uniformity_tolerance: DEFAULT_UNIFORMITY_TOLERANCE,
        }
    }
}

impl ConversionSettings {
    /// The inclusive range of wavelengths to resample onto, limited to where the standard observer
    /// is defined.
    pub fn wavelength_range(&self) -> (usize, usize) {
        (
            self.wavelength_start.max(OBSERVER_START),
            self.wavelength_end.min(OBSERVER_END),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_is_clamped_to_observer() {
        let settings = ConversionSettings {
            wavelength_start: 300,
            wavelength_end: 1000,
            ..ConversionSettings::default()
        };
        assert_eq!(settings.wavelength_range(), (360, 830));
        let settings = ConversionSettings {
            wavelength_start: 380,
            wavelength_end: 780,
            ..ConversionSettings::default()
        };
        assert_eq!(settings.wavelength_range(), (380, 780));
    }

    #[test]
    fn test_deserialize_with_missing_fields() {
        let data = "illuminant,wavelength_end\nE,780\n";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let settings: ConversionSettings = reader.deserialize().next().unwrap().unwrap();
        assert_eq!(settings.illuminant, Illuminant::E);
        assert_eq!(settings.wavelength_end, 780);
        assert_eq!(settings.wavelength_start, OBSERVER_START);
        assert_eq!(settings.uniformity_tolerance, DEFAULT_UNIFORMITY_TOLERANCE);
    }
}
