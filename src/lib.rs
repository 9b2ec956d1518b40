//! Spectrocie turns measured emission spectra into color. Point it at the text files a spectrometer
//! exports, in whatever loose format they come in, and it finds the data, resamples it to the 1 nm
//! grid that colorimetry wants (Sprague interpolation for evenly spaced data, a cubic spline
//! otherwise, as CIE 167:2005 recommends), and computes CIE 1931 XYZ, the (x, y) chromaticity, and
//! an approximate sRGB color that can be drawn on screen.
//!
//! Files that can't be read or hold no usable data don't stop anything: they come back as
//! unsuccessful [`SpectrumRecord`](record::SpectrumRecord)s, and a
//! [`SpectrumCollection`](collection::SpectrumCollection) simply leaves them out.
//!
//! ```
//! use spectrocie::prelude::*;
//!
//! let text = "Wavelength\tIntensity\n450\t0.2\n500\t0.5\n550\t0.9\n600\t0.3\n610\t0.1\n";
//! let record = SpectrumRecord::from_text("green.txt", text, &ConversionSettings::default());
//! let xy = record.xy().unwrap();
//! assert!(xy.y > 0.5);
//! assert_eq!(record.rgb().unwrap().g, 1.);
//! ```
//!
//! The crate logs through the `log` facade and never installs a logger of its own.

#![doc(html_root_url = "https://docs.rs/spectrocie/0.1.0")]
// we don't mess around with documentation
#![deny(missing_docs)]
// Clippy doesn't like long decimals, but adding separators in decimals isn't any more readable
// compare -0.9689307 with -0.968_930_7
#![allow(clippy::unreadable_literal)]

extern crate csv;
#[macro_use]
extern crate rulinalg;
extern crate num;
extern crate regex;
extern crate serde;
#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
#[cfg(test)]
#[macro_use]
extern crate float_cmp;

pub mod bound;
pub mod collection;
pub mod color;
pub mod colorimetry;
mod consts;
pub mod coord;
pub mod error;
pub mod illuminants;
pub mod interpolation;
pub mod observer;
pub mod parser;
pub mod prelude;
pub mod record;
pub mod settings;
pub mod spectrum;
