//! Gaussian smoothing of sampled spectra down to a target resolving power.
//!
//! The filter follows the conventions of `scipy.ndimage.gaussian_filter1d`
//! so results line up with published reductions of the same data:
//!
//! - Kernel radius `floor(4 sigma + 0.5)` samples, weights normalised to sum 1
//! - Boundary mode "reflect": `d c b a | a b c d | d c b a`, repeated when the
//!   kernel is wider than the signal
//!
//! # Resolution model
//!
//! A spectrum sampled every `dl` around a mean wavelength `l` is degraded to
//! resolving power `R = l / FWHM` by a Gaussian of width
//!
//! ```text
//! sigma [samples] = FWHM / (2.355 dl) = l / (2.355 dl R)
//! ```

use ndarray::{Array1, ArrayView1};
use shared::algo::{mean, mean_spacing};
use thiserror::Error;

use super::Spectrum;

/// Kernel half-width in units of sigma
pub const TRUNCATE: f64 = 4.0;

/// FWHM of a Gaussian in units of sigma (2 sqrt(2 ln 2))
pub const FWHM_PER_SIGMA: f64 = 2.355;

/// Below this width the filter is the identity
const MIN_SIGMA: f64 = 1e-15;

/// Largest kernel radius, in samples, [`gaussian_kernel_1d`] will build
pub const MAX_KERNEL_RADIUS: i64 = 1 << 24;

/// Errors from resolution-matching calculations
#[derive(Debug, Error, PartialEq)]
pub enum SmoothingError {
    #[error("At least two samples are required, got {0}")]
    TooFewSamples(usize),

    #[error("Sample spacing is zero")]
    ZeroSpacing,

    #[error("Resolving power must be positive and finite, got {0}")]
    InvalidResolution(f64),

    #[error("Filter sigma of {sigma} samples is wider than the {samples}-sample spectrum")]
    SigmaTooWide { sigma: f64, samples: usize },
}

/// Normalised 1-D Gaussian kernel of radius `floor(truncate * sigma + 0.5)`.
///
/// # Panics
/// If `sigma` is not positive and finite, or the radius exceeds [`MAX_KERNEL_RADIUS`].
pub fn gaussian_kernel_1d(sigma: f64, truncate: f64) -> Array1<f64> {
    assert!(
        sigma.is_finite() && sigma > 0.0,
        "Gaussian sigma must be positive and finite, got {sigma}"
    );
    let radius = truncate * sigma + 0.5;
    assert!(
        radius <= MAX_KERNEL_RADIUS as f64,
        "Gaussian kernel radius {radius:.0} exceeds {MAX_KERNEL_RADIUS} samples"
    );
    let radius = radius as i64;
    let inv_two_var = -0.5 / (sigma * sigma);

    let mut kernel: Array1<f64> = (-radius..=radius)
        .map(|x| (inv_two_var * (x * x) as f64).exp())
        .collect();
    let sum = kernel.sum();
    kernel /= sum;
    kernel
}

/// Map an out-of-range index into `[0, n)` by mirror reflection about the edges.
fn reflect_index(i: i64, n: i64) -> usize {
    let period = 2 * n;
    let j = i.rem_euclid(period);
    if j < n {
        j as usize
    } else {
        (period - 1 - j) as usize
    }
}

/// Smooth `signal` with a Gaussian of standard deviation `sigma` samples.
///
/// A `sigma` of zero returns the signal unchanged.
///
/// # Panics
/// If `sigma` is negative or NaN, or too wide for [`gaussian_kernel_1d`].
///
/// ```rust
/// use hires::spectra::gaussian_filter1d;
/// use ndarray::array;
///
/// let smoothed = gaussian_filter1d(array![1.0, 2.0, 3.0, 4.0, 5.0].view(), 1.0);
/// assert!((smoothed[0] - 1.42704095).abs() < 1e-7);
/// assert!((smoothed[2] - 3.0).abs() < 1e-12);
/// ```
pub fn gaussian_filter1d(signal: ArrayView1<f64>, sigma: f64) -> Array1<f64> {
    assert!(sigma >= 0.0, "Gaussian sigma must be non-negative, got {sigma}");
    let n = signal.len() as i64;
    if n == 0 || sigma <= MIN_SIGMA {
        return signal.to_owned();
    }

    let kernel = gaussian_kernel_1d(sigma, TRUNCATE);
    let radius = (kernel.len() / 2) as i64;

    (0..n)
        .map(|i| {
            kernel
                .iter()
                .enumerate()
                .map(|(k, w)| w * signal[reflect_index(i + k as i64 - radius, n)])
                .sum::<f64>()
        })
        .collect()
}

/// Gaussian sigma, in samples, that smooths a spectrum sampled at `wavelengths` to `resolution`.
///
/// The axis may run in either direction. A sigma wider than the whole
/// spectrum is rejected.
pub fn resolution_sigma(
    wavelengths: ArrayView1<f64>,
    resolution: f64,
) -> Result<f64, SmoothingError> {
    if !resolution.is_finite() || resolution <= 0.0 {
        return Err(SmoothingError::InvalidResolution(resolution));
    }

    let samples = wavelengths.to_vec();
    let spacing = mean_spacing(&samples).ok_or(SmoothingError::TooFewSamples(samples.len()))?;
    if spacing == 0.0 {
        return Err(SmoothingError::ZeroSpacing);
    }
    let center = mean(&samples).ok_or(SmoothingError::TooFewSamples(samples.len()))?;

    let sigma = (1.0 / FWHM_PER_SIGMA * center / spacing / resolution).abs();
    if sigma > samples.len() as f64 {
        return Err(SmoothingError::SigmaTooWide {
            sigma,
            samples: samples.len(),
        });
    }
    Ok(sigma)
}

/// Degrade `spectrum` (x in wavelength units) to the given resolving power.
///
/// Returns the smoothed spectrum and the sigma, in samples, it was filtered with.
pub fn smooth_to_resolution(
    spectrum: &Spectrum,
    resolution: f64,
) -> Result<(Spectrum, f64), SmoothingError> {
    let sigma = resolution_sigma(spectrum.x.view(), resolution)?;
    log::debug!(
        "Smoothing {} samples to R={resolution} with sigma={sigma:.3}",
        spectrum.len()
    );

    let smoothed = Spectrum {
        x: spectrum.x.clone(),
        y: gaussian_filter1d(spectrum.y.view(), sigma),
    };
    Ok((smoothed, sigma))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_kernel_shape() {
        let kernel = gaussian_kernel_1d(1.0, TRUNCATE);
        assert_eq!(kernel.len(), 9);
        assert_relative_eq!(kernel.sum(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(kernel[0], kernel[8], epsilon = 1e-15);
        assert!(kernel[4] > kernel[3]);

        // radius rounds half up: 4 * 0.375 + 0.5 = 2
        assert_eq!(gaussian_kernel_1d(0.375, TRUNCATE).len(), 5);
    }

    #[test]
    fn test_reflect_index() {
        // d c b a | a b c d | d c b a
        let n = 4;
        let mapped: Vec<usize> = (-4..8).map(|i| reflect_index(i, n)).collect();
        assert_eq!(mapped, vec![3, 2, 1, 0, 0, 1, 2, 3, 3, 2, 1, 0]);
        assert_eq!(reflect_index(-9, n), 0);
        assert_eq!(reflect_index(5, 1), 0);
    }

    #[test]
    fn test_matches_reference_values() {
        // Values from the scipy.ndimage documentation
        let signal = array![1.0, 2.0, 3.0, 4.0, 5.0];

        let narrow = gaussian_filter1d(signal.view(), 1.0);
        let expected = [1.42704095, 2.06782203, 3.0, 3.93217797, 4.57295905];
        for (got, want) in narrow.iter().zip(expected) {
            assert_relative_eq!(*got, want, epsilon = 1e-7);
        }

        // Kernel wider than the signal exercises repeated reflection
        let wide = gaussian_filter1d(signal.view(), 4.0);
        let expected = [2.91948343, 2.95023502, 3.0, 3.04976498, 3.08051657];
        for (got, want) in wide.iter().zip(expected) {
            assert_relative_eq!(*got, want, epsilon = 1e-7);
        }
    }

    #[test]
    fn test_constant_signal_unchanged() {
        let signal = Array1::from_elem(50, 0.8);
        let smoothed = gaussian_filter1d(signal.view(), 3.3);
        for v in smoothed.iter() {
            assert_relative_eq!(*v, 0.8, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_zero_sigma_and_empty_are_identity() {
        let signal = array![0.1, 0.9, 0.3];
        assert_eq!(gaussian_filter1d(signal.view(), 0.0), signal);
        let empty: Array1<f64> = Array1::zeros(0);
        assert!(gaussian_filter1d(empty.view(), 2.0).is_empty());
    }

    #[test]
    fn test_impulse_conserves_area() {
        let mut signal = Array1::zeros(101);
        signal[50] = 1.0;
        let smoothed = gaussian_filter1d(signal.view(), 2.5);
        assert_relative_eq!(smoothed.sum(), 1.0, epsilon = 1e-12);
        assert!(smoothed[50] < 1.0);
        assert_relative_eq!(smoothed[48], smoothed[52], epsilon = 1e-15);
    }

    #[test]
    fn test_resolution_sigma() {
        // 1.0..=3.0 um in 0.001 um steps: mean 2.0 um
        let wl: Array1<f64> = (0..=2000).map(|i| 1.0 + i as f64 * 0.001).collect();
        let sigma = resolution_sigma(wl.view(), 40_000.0).unwrap();
        assert_relative_eq!(sigma, 2.0 / 0.001 / 40_000.0 / 2.355, epsilon = 1e-9);
    }

    #[test]
    fn test_resolution_sigma_errors() {
        assert_eq!(
            resolution_sigma(array![1.0].view(), 100.0),
            Err(SmoothingError::TooFewSamples(1))
        );
        assert_eq!(
            resolution_sigma(array![1.0, 1.0].view(), 100.0),
            Err(SmoothingError::ZeroSpacing)
        );
        assert_eq!(
            resolution_sigma(array![1.0, 2.0].view(), 0.0),
            Err(SmoothingError::InvalidResolution(0.0))
        );

        // R = 1e-6 would need a kernel millions of samples wide
        let wl: Array1<f64> = (0..200).map(|i| 2.0 + i as f64 * 1e-4).collect();
        assert!(matches!(
            resolution_sigma(wl.view(), 1e-6),
            Err(SmoothingError::SigmaTooWide { samples: 200, .. })
        ));
    }

    #[test]
    fn test_resolution_sigma_descending_axis() {
        let ascending: Array1<f64> = (0..200).map(|i| 2.0001 + i as f64 * 1e-4).collect();
        let descending: Array1<f64> = ascending.iter().rev().copied().collect();

        let up = resolution_sigma(ascending.view(), 5_000.0).unwrap();
        let down = resolution_sigma(descending.view(), 5_000.0).unwrap();
        assert!(down > 0.0);
        assert_relative_eq!(down, up, epsilon = 1e-9);
    }

    #[test]
    fn test_smooth_descending_axis_broadens_line() {
        let x: Vec<f64> = (0..200).map(|i| 2.02 - i as f64 * 1e-4).collect();
        let y: Vec<f64> = (0..200).map(|i| if i == 100 { 0.0 } else { 1.0 }).collect();
        let spectrum = Spectrum::new(x, y);

        let (smoothed, sigma) = smooth_to_resolution(&spectrum, 5_000.0).unwrap();
        assert!(sigma > 1.0);
        assert!(smoothed.y[100] > 0.0);
        assert!(smoothed.y[99] < 1.0);
        assert_relative_eq!(smoothed.y[99], smoothed.y[101], epsilon = 1e-12);
    }

    #[test]
    #[should_panic(expected = "positive and finite")]
    fn test_kernel_rejects_zero_sigma() {
        gaussian_kernel_1d(0.0, TRUNCATE);
    }

    #[test]
    #[should_panic(expected = "exceeds")]
    fn test_kernel_rejects_huge_radius() {
        gaussian_kernel_1d(1e300, TRUNCATE);
    }

    #[test]
    #[should_panic(expected = "non-negative")]
    fn test_filter_rejects_negative_sigma() {
        gaussian_filter1d(array![1.0, 2.0, 3.0].view(), -1.7);
    }

    #[test]
    fn test_smooth_to_resolution_keeps_axis() {
        let x: Vec<f64> = (0..200).map(|i| 2.0 + i as f64 * 1e-4).collect();
        let y: Vec<f64> = (0..200).map(|i| if i == 100 { 0.0 } else { 1.0 }).collect();
        let spectrum = Spectrum::new(x, y);

        let (smoothed, sigma) = smooth_to_resolution(&spectrum, 5_000.0).unwrap();
        assert_relative_eq!(sigma, resolution_sigma(spectrum.x.view(), 5_000.0).unwrap());
        assert_eq!(smoothed.x, spectrum.x);
        // The absorption line is broadened: shallower core, wider wings
        assert!(smoothed.y[100] > 0.0);
        assert!(smoothed.y[101] < 1.0);
    }
}
