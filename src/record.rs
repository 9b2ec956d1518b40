//! A [`SpectrumRecord`] is one spectrum file taken all the way through the pipeline: parsed,
//! resampled, and reduced to color coordinates. Construction does all of the work at once and a
//! record never changes afterwards. If any step fails the record is still built, but is marked as
//! unsuccessful and carries the error instead of any of the derived data.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::color::{Chromaticity, ColorCoordinates, RGBColor, XYZColor};
use crate::error::SpectrumError;
use crate::parser;
use crate::settings::ConversionSettings;
use crate::spectrum::{CorrectedSpectrum, RawSpectrum};

static NEXT_RECORD_ID: AtomicUsize = AtomicUsize::new(0);

/// Identifies a record for as long as the process runs. No two records share one, even if they were
/// read from the same file.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(usize);

impl RecordId {
    fn next() -> RecordId {
        RecordId(NEXT_RECORD_ID.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Conversion {
    raw: RawSpectrum,
    corrected: CorrectedSpectrum,
    coordinates: ColorCoordinates,
}

impl Conversion {
    fn run(
        parsed: Result<RawSpectrum, SpectrumError>,
        settings: &ConversionSettings,
    ) -> Result<Conversion, SpectrumError> {
        let raw = parsed?;
        if raw.is_empty() {
            return Err(SpectrumError::ParseEmpty);
        }
        let corrected = raw.resample(settings)?;
        let coordinates = ColorCoordinates::from_spectrum(&corrected, settings.illuminant)?;
        Ok(Conversion {
            raw,
            corrected,
            coordinates,
        })
    }
}

/// One imported spectrum and everything derived from it.
///
/// # Example
/// ```
/// # use spectrocie::record::SpectrumRecord;
/// # use spectrocie::settings::ConversionSettings;
/// let text = "nm;counts\n450;0.2\n500 0.5\n550\t0.9\n600;0,3\n610;0.1\n";
/// let settings = ConversionSettings::default();
/// let record = SpectrumRecord::from_text("sample.txt", text, &settings);
/// assert!(record.success());
/// assert_eq!(record.file_name(), "sample");
/// let (x, y) = (record.x().unwrap(), record.y().unwrap());
/// assert!(x > 0.25 && x < 0.35 && y > 0.5);
///
/// let header_only = SpectrumRecord::from_text("empty.txt", "nm;counts\n", &settings);
/// assert!(!header_only.success());
/// assert!(header_only.coordinates().is_none());
/// ```
#[derive(Debug)]
pub struct SpectrumRecord {
    id: RecordId,
    file_path: PathBuf,
    file_name: String,
    outcome: Result<Conversion, SpectrumError>,
}

impl SpectrumRecord {
    /// Imports the spectrum file at `path` with the default settings.
    pub fn from_file<P: AsRef<Path>>(path: P) -> SpectrumRecord {
        SpectrumRecord::from_file_with(path, &ConversionSettings::default())
    }

    /// Imports the spectrum file at `path`.
    pub fn from_file_with<P: AsRef<Path>>(
        path: P,
        settings: &ConversionSettings,
    ) -> SpectrumRecord {
        let path = path.as_ref();
        SpectrumRecord::build(path, parser::parse_file(path), settings)
    }

    /// Builds a record from text that is already in memory. `path` only names the record.
    pub fn from_text<P: AsRef<Path>>(
        path: P,
        text: &str,
        settings: &ConversionSettings,
    ) -> SpectrumRecord {
        SpectrumRecord::build(path.as_ref(), Ok(parser::parse_str(text)), settings)
    }

    fn build(
        path: &Path,
        parsed: Result<RawSpectrum, SpectrumError>,
        settings: &ConversionSettings,
    ) -> SpectrumRecord {
        let outcome = Conversion::run(parsed, settings);
        match outcome {
            Ok(ref conversion) => debug!(
                "{}: {} points, xy = ({:.4}, {:.4}), {}",
                path.display(),
                conversion.raw.len(),
                conversion.coordinates.xy.x,
                conversion.coordinates.xy.y,
                conversion.coordinates.rgb
            ),
            Err(ref err) => warn!("could not import {}: {}", path.display(), err),
        }
        SpectrumRecord {
            id: RecordId::next(),
            file_path: path.to_path_buf(),
            file_name: path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default(),
            outcome,
        }
    }

    /// This record's identity.
    pub fn id(&self) -> RecordId {
        self.id
    }

    /// Where the spectrum was read from.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// The file name without its extension, for labels and legends.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Whether the spectrum made it all the way to color coordinates.
    pub fn success(&self) -> bool {
        self.outcome.is_ok()
    }

    /// What went wrong, for an unsuccessful record.
    pub fn error(&self) -> Option<&SpectrumError> {
        self.outcome.as_ref().err()
    }

    /// The spectrum as read from the file.
    pub fn raw(&self) -> Option<&RawSpectrum> {
        self.outcome.as_ref().ok().map(|c| &c.raw)
    }

    /// The spectrum resampled to 1 nm.
    pub fn corrected(&self) -> Option<&CorrectedSpectrum> {
        self.outcome.as_ref().ok().map(|c| &c.corrected)
    }

    /// All of the color coordinates.
    pub fn coordinates(&self) -> Option<&ColorCoordinates> {
        self.outcome.as_ref().ok().map(|c| &c.coordinates)
    }

    /// CIE XYZ tristimulus values.
    pub fn xyz(&self) -> Option<XYZColor> {
        self.coordinates().map(|c| c.xyz)
    }

    /// CIE 1931 chromaticity.
    pub fn xy(&self) -> Option<Chromaticity> {
        self.coordinates().map(|c| c.xy)
    }

    /// CIE x.
    pub fn x(&self) -> Option<f64> {
        self.xy().map(|xy| xy.x)
    }

    /// CIE y.
    pub fn y(&self) -> Option<f64> {
        self.xy().map(|xy| xy.y)
    }

    /// CIE z, which is `1 - x - y`.
    pub fn z(&self) -> Option<f64> {
        self.xy().map(|xy| xy.z())
    }

    /// The clamped sRGB color.
    pub fn rgb(&self) -> Option<RGBColor> {
        self.coordinates().map(|c| c.rgb)
    }

    /// The sRGB color as 0-255 integers.
    pub fn rgb_u8(&self) -> Option<(u8, u8, u8)> {
        self.rgb().map(|rgb| rgb.int_rgb_tup())
    }

    /// The sRGB color as a hex code like `#1A2B3C`.
    pub fn hex(&self) -> Option<String> {
        self.rgb().map(|rgb| rgb.to_string())
    }
}
