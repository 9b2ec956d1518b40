//! This module simply brings the most common functionality under a single namespace, to prevent
//! excessive imports. It includes the record and collection types, the value types a spectrum turns
//! into, the settings and illuminants that control the conversion, and the [`Bound`] trait. The
//! interpolators and reference tables are not included.

pub use crate::bound::Bound;
pub use crate::collection::{ImportListener, SpectrumCollection};
pub use crate::color::{Chromaticity, ColorCoordinates, RGBColor, XYZColor};
pub use crate::error::SpectrumError;
pub use crate::illuminants::Illuminant;
pub use crate::record::{RecordId, SpectrumRecord};
pub use crate::settings::ConversionSettings;
pub use crate::spectrum::{CorrectedSpectrum, RawSpectrum};
