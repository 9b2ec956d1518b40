//! This file provides constants that are used for matrix multiplication and color space conversion.
//! The matrices are built once and shared, so repeated conversions never pay for setting them up
//! again.

use rulinalg::matrix::Matrix;

/// Width of one step of the resampled grid, in nanometers. Every integration in the crate sums over
/// this grid.
pub const GRID_STEP: f64 = 1.0;

/// Y of the illuminant's white after normalization. XYZ values come out on a 0-100 scale.
pub const LUMINANCE_SCALE: f64 = 100.0;

lazy_static! {
    /// Converts CIE XYZ (D65 white) to linear sRGB. These are the IEC 61966-2-1 values derived from
    /// the sRGB primaries, carried to seven decimals instead of the four the standard prints, so that
    /// white maps to (1, 1, 1) to within rounding.
    pub static ref STANDARD_RGB_TRANSFORM: Matrix<f64> = matrix![
        3.2406255, -1.5372080, -0.4986286;
        -0.9689307, 1.8757561, 0.0415175;
        0.0557101, -0.2040211, 1.0569959
    ];

    /// The Bradford cone response matrix, which takes XYZ to a space where chromatic adaptation is a
    /// simple per-channel scaling.
    pub static ref BRADFORD_TRANSFORM: Matrix<f64> = matrix![
        0.8951, 0.2664, -0.1614;
        -0.7502, 1.7135, 0.0367;
        0.0389, -0.0685, 1.0296
    ];

    /// The inverse of [`BRADFORD_TRANSFORM`].
    pub static ref BRADFORD_INVERSE: Matrix<f64> = matrix![
        0.9869929, -0.1470543, 0.1599627;
        0.4323053, 0.5183603, 0.0492912;
        -0.0085287, 0.0400428, 0.9684867
    ];
}

/// How close two floating point results have to be for tests to call them equal.
#[cfg(test)]
pub const TEST_PRECISION: f64 = 1e-3;
