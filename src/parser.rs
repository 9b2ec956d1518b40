//! This module reads spectra out of the loosely formatted text files that spectrometer software
//! exports. There is no fixed layout to rely on: files come with or without headers, with spaces,
//! tabs or semicolons between columns, and with either a point or a comma as the decimal separator.
//! A line counts as data if it holds exactly two numbers and nothing else; every other line (titles,
//! column names, instrument settings) is skipped without complaint.
//!
//! The comma handling has one known limitation: a comma is always read as a decimal separator,
//! never as a thousands separator, so `1,234.5` is not understood.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use regex::Regex;

use crate::error::SpectrumError;
use crate::spectrum::RawSpectrum;

/// File extensions that spectra are commonly saved with. The parser doesn't look at the extension;
/// this list is for file pickers and directory scans.
pub static SPECTRUM_EXTENSIONS: [&str; 4] = ["txt", "csv", "prn", "dat"];

lazy_static! {
    static ref DATA_LINE: Regex = Regex::new(
        r"(?i)^[\s;]*([+-]?\d+[.,]?\d*(?:e[+-]?\d+)?)[\s;]+([+-]?\d+[.,]?\d*(?:e[+-]?\d+)?)[\s;]*$"
    )
    .expect("data line pattern is valid");
}

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Parses a number as written in a spectrum file, accepting a comma as the decimal separator.
/// Returns `None` for anything that isn't a finite number.
fn parse_number(token: &str) -> Option<f64> {
    let value: f64 = token.replacen(',', ".", 1).parse().ok()?;
    if value.is_finite() {
        Some(value)
    } else {
        None
    }
}

fn parse_lines(text: &str, source: &str) -> RawSpectrum {
    let text = text.trim_start_matches(BYTE_ORDER_MARK).replace("\r\n", "\n");
    let mut pairs = Vec::new();
    for (i, line) in text.split(|c: char| c == '\n' || c == '\r').enumerate() {
        let captures = match DATA_LINE.captures(line) {
            Some(captures) => captures,
            None => continue,
        };
        match (parse_number(&captures[1]), parse_number(&captures[2])) {
            (Some(wavelength), Some(intensity)) => pairs.push((wavelength, intensity)),
            _ => warn!(
                "not a valid floating point number at line {} of {}",
                i + 1,
                source
            ),
        }
    }
    RawSpectrum::from_pairs(pairs)
}

/// Extracts a spectrum from text already in memory. Never fails: text without a single data line
/// just gives an empty spectrum.
///
/// # Example
/// ```
/// # use spectrocie::parser::parse_str;
/// let text = "Wavelength (nm)\tIntensity\n450;0.2\n500 0.5\n550\t0.9\nsome junk\n600;0,3\n";
/// let spectrum = parse_str(text);
/// assert_eq!(spectrum.len(), 4);
/// assert_eq!(spectrum.get(600.), Some(0.3));
/// ```
pub fn parse_str(text: &str) -> RawSpectrum {
    parse_lines(text, "<text>")
}

/// Reads a whole spectrum file from `reader`. `path` is only used to label errors and log
/// messages. Fails with [`SpectrumError::NotText`] if the content isn't UTF-8 text, and with
/// [`SpectrumError::NotFound`] if it can't be read at all.
pub fn parse_reader<R: Read>(mut reader: R, path: &Path) -> Result<RawSpectrum, SpectrumError> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|_| SpectrumError::NotFound(path.to_path_buf()))?;
    let text = String::from_utf8(bytes).map_err(|_| SpectrumError::NotText(path.to_path_buf()))?;
    // NUL never shows up in a text export, but is all over binary formats that happen to be UTF-8
    if text.contains('\0') {
        return Err(SpectrumError::NotText(path.to_path_buf()));
    }
    Ok(parse_lines(&text, &path.display().to_string()))
}

/// Opens and parses the spectrum file at `path`.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<RawSpectrum, SpectrumError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|_| SpectrumError::NotFound(path.to_path_buf()))?;
    parse_reader(file, path)
}
