//! This module holds the numerical methods used to move spectral data from whatever grid it was
//! measured on onto the 1 nm grid that colorimetric integration wants. Following the CIE 167:2005
//! recommendation, there are two main workhorses: Sprague interpolation for evenly spaced data and
//! a cubic spline for everything else. A plain linear interpolator rounds out the set, since that is
//! how the CIE itself derives its 1 nm illuminant tables from the 5 nm ones.
//!
//! All of them implement [`Interpolator`], so the resampling code doesn't need to care which one it
//! got handed.

/// Something that, given a set of samples, can estimate the value between them.
pub trait Interpolator {
    /// The (inclusive) range of x values that this interpolator was built from. Evaluating outside
    /// of it is allowed, but the result is an extrapolation of the boundary polynomial and should
    /// not be trusted.
    fn domain(&self) -> (f64, f64);
    /// Estimates the value at `x`.
    fn interpolate(&self, x: f64) -> f64;
    /// Evaluates the interpolator at every given point, in order.
    fn interpolate_all<I: IntoIterator<Item = f64>>(&self, xs: I) -> Vec<f64>
    where
        Self: Sized,
    {
        xs.into_iter().map(|x| self.interpolate(x)).collect()
    }
}

/// Which interpolation method was used to resample a measured spectrum.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterpolationMethod {
    /// Fifth-order Sprague interpolation, for uniformly spaced data.
    Sprague,
    /// Not-a-knot cubic spline, for irregularly spaced data (or uniform data too short for Sprague).
    CubicSpline,
}

/// Returns whether the given, strictly increasing, x values are evenly spaced. Steps are compared to
/// the first one with a relative tolerance, which absorbs the noise of wavelengths written out as
/// decimals. Fewer than two points have no spacing at all and are never considered uniform.
pub fn is_uniform(xs: &[f64], tolerance: f64) -> bool {
    if xs.len() < 2 {
        return false;
    }
    let step = xs[1] - xs[0];
    xs.windows(2)
        .all(|pair| ((pair[1] - pair[0]) - step).abs() <= tolerance * step.abs())
}

/// Coefficients used to extend the data by two points on each side, as given by CIE 167:2005. Every
/// row sums to 209, the common denominator.
const SPRAGUE_COEFFICIENTS: [[f64; 6]; 4] = [
    [884., -1960., 3033., -2648., 1080., -180.],
    [508., -540., 488., -367., 144., -24.],
    [-24., 144., -367., 488., -540., 508.],
    [-180., 1080., -2648., 3033., -1960., 884.],
];

/// The number of samples Sprague interpolation needs to extend the data at both ends.
pub const SPRAGUE_MIN_SAMPLES: usize = 6;

/// Sprague interpolation of uniformly spaced data. Each interval is a fifth-degree polynomial fit to
/// the six nearest samples, which keeps the overall spectral shape without the ringing of a global
/// polynomial. The data is padded by two extrapolated points per side so that the first and last
/// intervals have neighbours too.
#[derive(Debug, Clone)]
pub struct SpragueInterpolator {
    start: f64,
    step: f64,
    len: usize,
    // padded: two extra samples before and after the real ones
    padded: Vec<f64>,
}

impl SpragueInterpolator {
    /// Builds a Sprague interpolator over `ys`, sampled every `step` starting at `start`. Returns
    /// `None` if there are fewer than [`SPRAGUE_MIN_SAMPLES`] values or the step isn't positive.
    pub fn new(start: f64, step: f64, ys: &[f64]) -> Option<SpragueInterpolator> {
        if ys.len() < SPRAGUE_MIN_SAMPLES || !(step > 0.) {
            return None;
        }
        let extend = |coefficients: &[f64; 6], window: &[f64]| -> f64 {
            coefficients
                .iter()
                .zip(window.iter())
                .map(|(c, y)| c * y)
                .sum::<f64>()
                / 209.
        };
        let head = &ys[..SPRAGUE_MIN_SAMPLES];
        let tail = &ys[ys.len() - SPRAGUE_MIN_SAMPLES..];

        let mut padded = Vec::with_capacity(ys.len() + 4);
        padded.push(extend(&SPRAGUE_COEFFICIENTS[0], head));
        padded.push(extend(&SPRAGUE_COEFFICIENTS[1], head));
        padded.extend_from_slice(ys);
        padded.push(extend(&SPRAGUE_COEFFICIENTS[2], tail));
        padded.push(extend(&SPRAGUE_COEFFICIENTS[3], tail));

        Some(SpragueInterpolator {
            start,
            step,
            len: ys.len(),
            padded,
        })
    }
}

impl Interpolator for SpragueInterpolator {
    fn domain(&self) -> (f64, f64) {
        (self.start, self.start + self.step * (self.len - 1) as f64)
    }

    fn interpolate(&self, x: f64) -> f64 {
        let t = (x - self.start) / self.step;
        // index of the interval's left sample, in unpadded terms
        let j = (t.floor().max(0.) as usize).min(self.len - 2);
        let big_x = t - j as f64;
        let i = j + 2;
        let r = &self.padded;

        let a0 = r[i];
        let a1 = (2. * r[i - 2] - 16. * r[i - 1] + 16. * r[i + 1] - 2. * r[i + 2]) / 24.;
        let a2 = (-r[i - 2] + 16. * r[i - 1] - 30. * r[i] + 16. * r[i + 1] - r[i + 2]) / 24.;
        let a3 = (-9. * r[i - 2] + 39. * r[i - 1] - 70. * r[i] + 66. * r[i + 1] - 33. * r[i + 2]
            + 7. * r[i + 3])
            / 24.;
        let a4 = (13. * r[i - 2] - 64. * r[i - 1] + 126. * r[i] - 124. * r[i + 1]
            + 61. * r[i + 2]
            - 12. * r[i + 3])
            / 24.;
        let a5 = (-5. * r[i - 2] + 25. * r[i - 1] - 50. * r[i] + 50. * r[i + 1] - 25. * r[i + 2]
            + 5. * r[i + 3])
            / 24.;

        // Horner's scheme
        a0 + big_x * (a1 + big_x * (a2 + big_x * (a3 + big_x * (a4 + big_x * a5))))
    }
}

/// A cubic spline with not-a-knot end conditions: piecewise cubics with continuous first and second
/// derivatives, where the first two pieces (and the last two) are the same cubic. With only three
/// points this is the parabola through them, and with two it is a straight line.
#[derive(Debug, Clone)]
pub struct CubicSpline {
    xs: Vec<f64>,
    ys: Vec<f64>,
    // second derivatives at each knot
    y2s: Vec<f64>,
}

impl CubicSpline {
    /// Constructs a not-a-knot cubic spline through the given points. Returns `None` if the lengths
    /// differ, if there are fewer than 2 points, or if `xs` is not strictly increasing.
    ///
    /// # Example
    /// ```
    /// # use spectrocie::interpolation::{CubicSpline, Interpolator};
    /// // a cubic is reproduced exactly
    /// let f = |x: f64| x * x * x - 2. * x;
    /// let xs = vec![0., 1., 3., 4., 7.];
    /// let ys = xs.iter().map(|&x| f(x)).collect();
    /// let spline = CubicSpline::new(xs, ys).unwrap();
    /// assert!((spline.interpolate(5.5) - f(5.5)).abs() < 1e-9);
    /// ```
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> Option<CubicSpline> {
        if xs.len() != ys.len() || xs.len() < 2 || xs.windows(2).any(|w| !(w[1] > w[0])) {
            return None;
        }

        let y2s = match xs.len() {
            2 => vec![0.0; 2],
            3 => {
                let slopes = [
                    (ys[1] - ys[0]) / (xs[1] - xs[0]),
                    (ys[2] - ys[1]) / (xs[2] - xs[1]),
                ];
                vec![2.0 * (slopes[1] - slopes[0]) / (xs[2] - xs[0]); 3]
            }
            _ => not_a_knot_curvatures(&xs, &ys),
        };

        Some(CubicSpline { xs, ys, y2s })
    }
}

/// Solves for the second derivatives of a not-a-knot spline through at least 4 points.
///
/// Every interior knot gives the usual continuity equation
/// `h[i-1] M[i-1] + 2 (h[i-1] + h[i]) M[i] + h[i] M[i+1] = 6 (d[i] - d[i-1])`, and the end
/// conditions ask for a continuous third derivative at the second and second to last knots. Those
/// are used to eliminate `M[0]` and `M[n-1]`, which leaves a tridiagonal system in the rest.
fn not_a_knot_curvatures(xs: &[f64], ys: &[f64]) -> Vec<f64> {
    let n = xs.len();
    let h: Vec<f64> = xs.windows(2).map(|w| w[1] - w[0]).collect();
    let d: Vec<f64> = (0..n - 1).map(|i| (ys[i + 1] - ys[i]) / h[i]).collect();

    // row k of the reduced system is the equation for knot k + 1
    let m = n - 2;
    let mut sub = vec![0.0; m];
    let mut diag = vec![0.0; m];
    let mut sup = vec![0.0; m];
    let mut rhs = vec![0.0; m];
    for k in 0..m {
        let i = k + 1;
        sub[k] = h[i - 1];
        diag[k] = 2.0 * (h[i - 1] + h[i]);
        sup[k] = h[i];
        rhs[k] = 6.0 * (d[i] - d[i - 1]);
    }

    let (h0, h1) = (h[0], h[1]);
    diag[0] = (h0 + h1) * (h0 + 2.0 * h1) / h1;
    sup[0] = (h1 * h1 - h0 * h0) / h1;
    let (a, b) = (h[n - 3], h[n - 2]);
    sub[m - 1] = (a * a - b * b) / a;
    diag[m - 1] = (a + b) * (2.0 * a + b) / a;

    // Thomas algorithm
    for k in 1..m {
        let w = sub[k] / diag[k - 1];
        diag[k] -= w * sup[k - 1];
        rhs[k] -= w * rhs[k - 1];
    }
    let mut inner = vec![0.0; m];
    inner[m - 1] = rhs[m - 1] / diag[m - 1];
    for k in (0..m - 1).rev() {
        inner[k] = (rhs[k] - sup[k] * inner[k + 1]) / diag[k];
    }

    let mut y2s = Vec::with_capacity(n);
    y2s.push(((h0 + h1) * inner[0] - h0 * inner[1]) / h1);
    y2s.extend_from_slice(&inner);
    y2s.push(((a + b) * inner[m - 1] - b * inner[m - 2]) / a);
    y2s
}

impl Interpolator for CubicSpline {
    fn domain(&self) -> (f64, f64) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }

    fn interpolate(&self, x: f64) -> f64 {
        let (lo, hi) = bracket(&self.xs, x);
        let h = self.xs[hi] - self.xs[lo];
        let a = (self.xs[hi] - x) / h;
        let b = (x - self.xs[lo]) / h;

        a * self.ys[lo]
            + b * self.ys[hi]
            + ((a * a * a - a) * self.y2s[lo] + (b * b * b - b) * self.y2s[hi]) * h * h / 6.0
    }
}

/// Piecewise linear interpolation.
#[derive(Debug, Clone)]
pub struct LinearInterpolator {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl LinearInterpolator {
    /// Same preconditions as [`CubicSpline::new`].
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> Option<LinearInterpolator> {
        if xs.len() != ys.len() || xs.len() < 2 || xs.windows(2).any(|w| !(w[1] > w[0])) {
            return None;
        }
        Some(LinearInterpolator { xs, ys })
    }
}

impl Interpolator for LinearInterpolator {
    fn domain(&self) -> (f64, f64) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }

    fn interpolate(&self, x: f64) -> f64 {
        let (lo, hi) = bracket(&self.xs, x);
        let t = (x - self.xs[lo]) / (self.xs[hi] - self.xs[lo]);
        self.ys[lo] + t * (self.ys[hi] - self.ys[lo])
    }
}

/// Binary search for the pair of neighbouring knots enclosing `x`. Values outside the knots get the
/// first or last interval.
fn bracket(xs: &[f64], x: f64) -> (usize, usize) {
    let mut lo = 0;
    let mut hi = xs.len() - 1;
    while hi - lo > 1 {
        let mid = (lo + hi) / 2;
        if xs[mid] > x {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    (lo, hi)
}
