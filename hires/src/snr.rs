//! Cross-correlation signal-to-noise estimates for planet detection.
//!
//! Scales a reference detection (IGRINS on Gemini South) to other apertures
//! and exposure times. The number of usable absorption lines is estimated
//! from a telluric transmission spectrum smoothed to the instrument's
//! resolving power:
//!
//! ```text
//! N_lines = sqrt( Σ (1 - T) / 3 )
//! SNR_cc  = SNR_ref · sqrt(t / t_ref) · (D / D_ref) · C · sqrt(N_lines)
//! ```
//!
//! where C is the planet/star contrast. The aperture term is linear in
//! diameter, i.e. photon-noise limited scaling with sqrt(collecting area).

use ndarray::ArrayView1;
use serde::Serialize;

use crate::hardware::TelescopeConfig;
use crate::spectra::smoothing::{smooth_to_resolution, SmoothingError};
use crate::spectra::Spectrum;

/// Default resolving power of the proposed instrument
pub const DEFAULT_RESOLUTION: f64 = 40_000.0;

/// Effective number of absorption lines in a (smoothed) transmission spectrum.
pub fn line_count(transmission: ArrayView1<f64>) -> f64 {
    (transmission.iter().map(|t| 1.0 - t).sum::<f64>() / 3.0).sqrt()
}

/// Samples per resolution element, halved for Nyquist sampling.
pub fn oversampling(samples: usize, resolution: f64) -> f64 {
    0.5 * samples as f64 / resolution
}

/// Reference detection that other configurations are scaled from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossCorrelationSnr {
    /// SNR of the reference observation
    pub reference_snr: f64,
    /// Exposure time of the reference observation, seconds
    pub reference_exposure_s: f64,
    /// Aperture of the reference telescope, meters
    pub reference_aperture_m: f64,
    /// Planet/star flux contrast
    pub planet_contrast: f64,
}

impl Default for CrossCorrelationSnr {
    /// IGRINS on Gemini South: SNR 200 in 120 s, planet contrast 1e-3
    fn default() -> Self {
        Self {
            reference_snr: 200.0,
            reference_exposure_s: 120.0,
            reference_aperture_m: 8.1,
            planet_contrast: 1e-3,
        }
    }
}

impl CrossCorrelationSnr {
    /// Cross-correlation SNR for `n_lines` lines, an exposure and an aperture.
    pub fn snr(&self, n_lines: f64, exposure_s: f64, aperture_m: f64) -> f64 {
        self.reference_snr
            * (exposure_s / self.reference_exposure_s).sqrt()
            * (aperture_m / self.reference_aperture_m)
            * self.planet_contrast
            * n_lines.sqrt()
    }

    /// Evaluate every platform at one exposure time.
    pub fn estimate(
        &self,
        analysis: &TransmissionAnalysis,
        exposure_s: f64,
        platforms: &[TelescopeConfig],
    ) -> Vec<SnrEstimate> {
        platforms
            .iter()
            .map(|telescope| SnrEstimate {
                platform: telescope.name.clone(),
                aperture_m: telescope.aperture_m,
                exposure_s,
                snr: self.snr(analysis.n_lines, exposure_s, telescope.aperture_m),
            })
            .collect()
    }
}

/// A transmission spectrum degraded to the instrument resolution.
#[derive(Debug, Clone)]
pub struct TransmissionAnalysis {
    /// Resolving power the spectrum was smoothed to
    pub resolution: f64,
    /// Gaussian sigma used, in samples
    pub sigma: f64,
    /// Samples per Nyquist-sampled resolution element
    pub oversample: f64,
    /// Effective number of absorption lines
    pub n_lines: f64,
    /// Smoothed transmission on the input wavelength grid
    pub filtered: Spectrum,
}

impl TransmissionAnalysis {
    /// Smooth `transmission` (x in microns) to `resolution` and count lines.
    pub fn new(transmission: &Spectrum, resolution: f64) -> Result<Self, SmoothingError> {
        let (filtered, sigma) = smooth_to_resolution(transmission, resolution)?;
        let n_lines = line_count(filtered.y.view());
        log::info!(
            "R={resolution}: sigma={sigma:.3} samples, N_lines={n_lines:.2} over {} samples",
            transmission.len()
        );

        Ok(Self {
            resolution,
            sigma,
            oversample: oversampling(transmission.len(), resolution),
            n_lines,
            filtered,
        })
    }
}

/// SNR of one platform at one exposure time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnrEstimate {
    pub platform: String,
    pub aperture_m: f64,
    pub exposure_s: f64,
    pub snr: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::telescope::models::{ALL_PLATFORMS, GEMINI_SOUTH, SUPERBIT};
    use approx::assert_relative_eq;
    use ndarray::{array, Array1};

    #[test]
    fn test_line_count() {
        assert_eq!(line_count(Array1::ones(100).view()), 0.0);
        // 10 samples at 70% transmission: sum(1 - T) = 3
        let t = Array1::from_elem(10, 0.7);
        assert_relative_eq!(line_count(t.view()), 1.0, epsilon = 1e-12);
        assert_relative_eq!(line_count(array![0.0, 0.0, 0.0].view()), 1.0);
    }

    #[test]
    fn test_oversampling() {
        assert_relative_eq!(oversampling(80_000, 40_000.0), 1.0);
        assert_relative_eq!(oversampling(1000, 40_000.0), 0.0125);
    }

    #[test]
    fn test_reference_reproduces_itself() {
        let model = CrossCorrelationSnr::default();
        // One line, reference exposure, reference aperture: SNR_ref * contrast
        assert_relative_eq!(model.snr(1.0, 120.0, 8.1), 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_snr_scaling() {
        let model = CrossCorrelationSnr::default();
        let base = model.snr(4.0, 120.0, 8.1);
        assert_relative_eq!(model.snr(4.0, 480.0, 8.1), 2.0 * base, epsilon = 1e-12);
        assert_relative_eq!(model.snr(16.0, 120.0, 8.1), 2.0 * base, epsilon = 1e-12);
        assert_relative_eq!(model.snr(4.0, 120.0, 0.5), base * 0.5 / 8.1, epsilon = 1e-12);
    }

    #[test]
    fn test_analysis_and_estimates() {
        let n = 4000;
        let x: Vec<f64> = (0..n).map(|i| 2.0 + i as f64 * 5e-6).collect();
        let y: Vec<f64> = (0..n).map(|i| if i % 400 == 200 { 0.0 } else { 1.0 }).collect();
        let transmission = Spectrum::new(x, y);

        let analysis = TransmissionAnalysis::new(&transmission, DEFAULT_RESOLUTION).unwrap();
        assert!(analysis.sigma > 1.0);
        let (smoothed, sigma) = smooth_to_resolution(&transmission, DEFAULT_RESOLUTION).unwrap();
        assert_eq!(analysis.sigma, sigma);
        assert_eq!(analysis.filtered, smoothed);
        assert_relative_eq!(analysis.oversample, 0.05);
        // Smoothing conserves the line area away from the edges
        assert_relative_eq!(analysis.n_lines, (10.0f64 / 3.0).sqrt(), epsilon = 1e-6);

        let model = CrossCorrelationSnr::default();
        let estimates = model.estimate(&analysis, 120.0, &ALL_PLATFORMS);
        assert_eq!(estimates.len(), 3);
        assert_eq!(estimates[0].platform, GEMINI_SOUTH.name);
        assert_eq!(estimates[1].platform, SUPERBIT.name);
        assert!(estimates[0].snr > estimates[2].snr);
        assert!(estimates[2].snr > estimates[1].snr);
    }
}
