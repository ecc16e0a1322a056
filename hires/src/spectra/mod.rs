//! Sampled spectra: loading, slicing and smoothing.
//!
//! A [`Spectrum`] is a pair of equal-length sample arrays. The meaning of the
//! axes depends on the source file:
//!
//! - **Cross-section tables**: x is wavenumber (cm⁻¹), y is absorption cross-section
//! - **Transmission tables**: x is wavelength (um), y is fractional transmission
//!
//! # Pipeline
//!
//! ```text
//! open_cross_section / load_columns -> slice -> smooth_to_resolution -> formulas
//! ```

pub mod io;
pub mod smoothing;

pub use io::{load_columns, open_cross_section, parse_cross_section, CrossSectionOptions};
pub use smoothing::{gaussian_filter1d, resolution_sigma, smooth_to_resolution};

use ndarray::{s, Array1};
use shared::algo::nearest_index;
use shared::units::wavenumber_to_micrometers;

/// Two-column sampled dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    /// Abscissa samples (wavenumber or wavelength)
    pub x: Array1<f64>,
    /// Ordinate samples, same length as `x`
    pub y: Array1<f64>,
}

impl Spectrum {
    /// Build a spectrum from parallel sample vectors.
    ///
    /// Panics when the lengths differ; callers construct these from parsed
    /// rows so a mismatch is a programming error.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        assert_eq!(
            x.len(),
            y.len(),
            "Spectrum axes must have equal length ({} vs {})",
            x.len(),
            y.len()
        );
        Self {
            x: Array1::from(x),
            y: Array1::from(y),
        }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    fn nearest_bounds(&self, start: f64, end: f64) -> Option<(usize, usize)> {
        let xs = self.x.as_slice()?;
        Some((nearest_index(xs, start)?, nearest_index(xs, end)?))
    }

    fn select(&self, from: usize, to: usize) -> Spectrum {
        if to <= from {
            return Spectrum::new(Vec::new(), Vec::new());
        }
        Spectrum {
            x: self.x.slice(s![from..to]).to_owned(),
            y: self.y.slice(s![from..to]).to_owned(),
        }
    }

    /// Samples from the one nearest `start` up to, but excluding, the one nearest `end`.
    ///
    /// Empty when the end sample precedes or equals the start sample.
    ///
    /// ```rust
    /// use hires::spectra::Spectrum;
    ///
    /// let spectrum = Spectrum::new(vec![1.0, 2.0, 3.0, 4.0], vec![10.0, 20.0, 30.0, 40.0]);
    /// let sliced = spectrum.slice_half_open(1.9, 3.8);
    /// assert_eq!(sliced.x.to_vec(), vec![2.0, 3.0]);
    /// ```
    pub fn slice_half_open(&self, start: f64, end: f64) -> Spectrum {
        match self.nearest_bounds(start, end) {
            Some((from, to)) => self.select(from, to),
            None => self.clone(),
        }
    }

    /// Samples from the one nearest `start` through the one nearest `end`, inclusive.
    pub fn slice_inclusive(&self, start: f64, end: f64) -> Spectrum {
        match self.nearest_bounds(start, end) {
            Some((from, to)) if to >= from => self.select(from, to + 1),
            Some(_) => Spectrum::new(Vec::new(), Vec::new()),
            None => self.clone(),
        }
    }

    /// Convert a wavenumber (cm⁻¹) axis into wavelength (um).
    ///
    /// The sample order is reversed so the wavelength axis stays ascending
    /// when the wavenumber axis was.
    pub fn to_wavelength_um(&self) -> Spectrum {
        let x: Vec<f64> = self
            .x
            .iter()
            .rev()
            .map(|&wn| wavenumber_to_micrometers(wn))
            .collect();
        let y: Vec<f64> = self.y.iter().rev().copied().collect();
        Spectrum::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ramp() -> Spectrum {
        Spectrum::new(
            vec![10.0, 11.0, 12.0, 13.0, 14.0, 15.0],
            vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0],
        )
    }

    #[test]
    fn test_slice_half_open_excludes_end() {
        let sliced = ramp().slice_half_open(11.2, 13.9);
        assert_eq!(sliced.x.to_vec(), vec![11.0, 12.0, 13.0]);
        assert_eq!(sliced.y.to_vec(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_slice_inclusive_keeps_end() {
        let sliced = ramp().slice_inclusive(11.2, 13.9);
        assert_eq!(sliced.x.to_vec(), vec![11.0, 12.0, 13.0, 14.0]);
    }

    #[test]
    fn test_slice_clamps_to_data() {
        // Bounds beyond the data snap to the first and last samples
        let sliced = ramp().slice_half_open(0.0, 100.0);
        assert_eq!(sliced.len(), 5);
        let sliced = ramp().slice_inclusive(0.0, 100.0);
        assert_eq!(sliced.len(), 6);
    }

    #[test]
    fn test_reversed_bounds_are_empty() {
        assert!(ramp().slice_half_open(14.0, 11.0).is_empty());
        assert!(ramp().slice_inclusive(14.0, 11.0).is_empty());
        // Same nearest sample: half-open is empty, inclusive has one sample
        assert!(ramp().slice_half_open(12.1, 11.9).is_empty());
        assert_eq!(ramp().slice_inclusive(12.1, 11.9).len(), 1);
    }

    #[test]
    fn test_to_wavelength_reverses_axis() {
        let wn = Spectrum::new(vec![4000.0, 5000.0, 6250.0], vec![1.0, 2.0, 3.0]);
        let wl = wn.to_wavelength_um();
        assert_relative_eq!(wl.x[0], 1.6, epsilon = 1e-12);
        assert_relative_eq!(wl.x[1], 2.0, epsilon = 1e-12);
        assert_relative_eq!(wl.x[2], 2.5, epsilon = 1e-12);
        assert_eq!(wl.y.to_vec(), vec![3.0, 2.0, 1.0]);
    }

    #[test]
    #[should_panic(expected = "equal length")]
    fn test_mismatched_axes_panic() {
        Spectrum::new(vec![1.0, 2.0], vec![1.0]);
    }
}
