//! The failures a single spectrum file can run into on its way from text to color. None of these are
//! fatal to a batch: a record that hits one is simply marked as unsuccessful, and its siblings carry
//! on.

use std::error::Error;
use std::fmt;
use std::path::PathBuf;

/// An error in turning one spectrum file into color coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum SpectrumError {
    /// The file does not exist or could not be opened.
    NotFound(PathBuf),
    /// The file could be opened, but its contents are not plain text (binary data, or an encoding
    /// that isn't UTF-8).
    NotText(PathBuf),
    /// The file is text, but not a single line in it looks like a (wavelength, intensity) pair.
    ParseEmpty,
    /// There are too few distinct wavelengths to interpolate between. Holds the number found.
    InsufficientSamples(usize),
    /// The spectrum integrates to nothing (or to something that isn't a number), so there is no
    /// chromaticity to speak of.
    DegenerateSpectrum,
}

impl fmt::Display for SpectrumError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            SpectrumError::NotFound(ref path) => write!(f, "file not found - {}", path.display()),
            SpectrumError::NotText(ref path) => write!(
                f,
                "file could not be opened as a plain text document - {}",
                path.display()
            ),
            SpectrumError::ParseEmpty => write!(f, "no spectral data found"),
            SpectrumError::InsufficientSamples(n) => write!(
                f,
                "at least 2 distinct wavelengths are needed, found {}",
                n
            ),
            SpectrumError::DegenerateSpectrum => {
                write!(f, "spectrum has no tristimulus response")
            }
        }
    }
}

impl Error for SpectrumError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_file() {
        let err = SpectrumError::NotFound(PathBuf::from("missing.txt"));
        assert_eq!(err.to_string(), "file not found - missing.txt");
        let err = SpectrumError::InsufficientSamples(1);
        assert!(err.to_string().contains("found 1"));
    }
}
