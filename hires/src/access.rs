//! Spectral access of ground-based versus balloon-borne observations.
//!
//! Water is a prime target for exoplanet atmospheres, but Earth's own water
//! makes the atmosphere opaque across most of the strongest H₂O bands. A
//! ground-based spectrograph only sees the part of a planet's water spectrum
//! that falls in telluric windows; a balloon platform above most of the water
//! vapour sees nearly all of it.
//!
//! [`SpectralAccess`] quantifies that gain by weighting the planet's
//! cross-section spectrum with the ground transmission.

use std::path::Path;

use ndarray::Array1;
use shared::algo::{interp_or_zero, InterpError};
use shared::units::micrometers_to_wavenumber;
use thiserror::Error;

use crate::spectra::io::SpectrumIoError;
use crate::spectra::{open_cross_section, CrossSectionOptions, Spectrum};
use crate::transit::{mean_molecular_mass, AtmosphereModel, TransitError, MASS_H2, MASS_H2O};

/// Shortest wavelength covered by IGRINS, um
pub const BAND_START_UM: f64 = 1.47;

/// Longest wavelength covered by IGRINS, um
pub const BAND_END_UM: f64 = 2.5;

/// log10 water volume mixing ratio in a hot Jupiter (Peter et al. 2024)
pub const LOG_WATER_FRACTION: f64 = -3.80;

/// Errors from the access comparison
#[derive(Debug, Error)]
pub enum AccessError {
    #[error("Transmission spectrum cannot be resampled: {0}")]
    Interp(#[from] InterpError),

    #[error("Cross-section spectrum has no positive opacity to weight by")]
    NoOpacity,
}

/// Wavenumber window (cm⁻¹) covering `lower_um..upper_um`.
///
/// Wavenumber runs opposite to wavelength, so the long-wavelength end gives
/// the lower bound.
pub fn wavenumber_window(lower_um: f64, upper_um: f64) -> (f64, f64) {
    (
        micrometers_to_wavenumber(upper_um),
        micrometers_to_wavenumber(lower_um),
    )
}

/// Load a water cross-section table restricted to `lower_um..upper_um`,
/// returned on an ascending wavelength axis in microns.
pub fn water_spectrum<P: AsRef<Path>>(
    path: P,
    lower_um: f64,
    upper_um: f64,
    skip_lines: Option<usize>,
) -> Result<Spectrum, SpectrumIoError> {
    let options = CrossSectionOptions {
        skip_lines,
        wn_range: Some(wavenumber_window(lower_um, upper_um)),
    };
    let wavenumbers = open_cross_section(path, options)?;
    log::debug!(
        "{} water samples between {lower_um} and {upper_um} um",
        wavenumbers.len()
    );
    Ok(wavenumbers.to_wavelength_um())
}

/// Transit height spectrum of water diluted in H₂ on a hot Jupiter.
///
/// Uses a 1 R_J planet at Jovian gravity with the mean molecular mass of the mix.
pub fn water_transit_heights(
    cross_section: &Spectrum,
    log10_fraction: f64,
    temperature_k: f64,
    p0_bar: f64,
) -> Result<Array1<f64>, TransitError> {
    let mass = mean_molecular_mass(log10_fraction, MASS_H2O, MASS_H2);
    let model = AtmosphereModel {
        p0_bar,
        ..AtmosphereModel::hot_jupiter(mass, temperature_k)
    };
    log::info!(
        "Water atmosphere: mu={mass:.4} amu, H={:.1} km",
        model.scale_height() / 1e3
    );
    model.z_lambda_single(cross_section.y.view(), 10f64.powf(log10_fraction))
}

/// How much of a cross-section spectrum each platform can observe.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralAccess {
    /// Transmission level that counts as an open window
    pub threshold: f64,
    /// Opacity-weighted mean ground transmission
    pub ground_weighted: f64,
    /// Share of total opacity in samples with transmission at or above `threshold`
    pub ground_windowed: f64,
    /// Balloon platform access, taken as unobstructed
    pub balloon: f64,
    /// Balloon over ground access
    pub gain: f64,
}

impl SpectralAccess {
    /// Compare a cross-section spectrum against ground transmission.
    ///
    /// Both spectra must have ascending wavelength axes in the same units.
    /// Transmission is linearly resampled onto the cross-section grid, and
    /// samples it does not cover count as opaque.
    pub fn compare(
        cross_section: &Spectrum,
        transmission: &Spectrum,
        threshold: f64,
    ) -> Result<Self, AccessError> {
        let grid = cross_section.x.to_vec();
        let resampled = interp_or_zero(
            &grid,
            &transmission.x.to_vec(),
            &transmission.y.to_vec(),
        )?;

        let total: f64 = cross_section.y.iter().sum();
        if total <= 0.0 {
            return Err(AccessError::NoOpacity);
        }

        let weighted: f64 = cross_section
            .y
            .iter()
            .zip(&resampled)
            .map(|(sigma, t)| sigma * t)
            .sum();
        let windowed: f64 = cross_section
            .y
            .iter()
            .zip(&resampled)
            .filter(|&(_, &t)| t >= threshold)
            .map(|(sigma, _)| sigma)
            .sum();

        let ground_weighted = weighted / total;
        let balloon = 1.0;
        Ok(Self {
            threshold,
            ground_weighted,
            ground_windowed: windowed / total,
            balloon,
            gain: balloon / ground_weighted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use test_helpers::two_column_file;

    #[test]
    fn test_wavenumber_window() {
        let (lo, hi) = wavenumber_window(BAND_START_UM, BAND_END_UM);
        assert_relative_eq!(lo, 4000.0, epsilon = 1e-9);
        assert_relative_eq!(hi, 1e4 / 1.47, epsilon = 1e-9);
    }

    #[test]
    fn test_water_spectrum_window_and_axis() {
        // 2.6 um .. 1.4 um in wavenumber order
        let rows: Vec<(f64, f64)> = (0..=30)
            .map(|i| {
                let wn = 3850.0 + i as f64 * 110.0;
                (wn, 1e-22 * (1.0 + i as f64))
            })
            .collect();
        let file = two_column_file(&rows);

        let spectrum = water_spectrum(file.path(), BAND_START_UM, BAND_END_UM, None).unwrap();
        assert!(!spectrum.is_empty());
        assert!(spectrum.x.windows(2).into_iter().all(|w| w[1] > w[0]));
        assert!(spectrum.x[0] >= 1.4 && spectrum.x[spectrum.len() - 1] <= 2.6);
    }

    #[test]
    fn test_compare() {
        let cross = Spectrum::new(vec![1.0, 2.0, 3.0, 4.0], vec![1.0, 1.0, 1.0, 1.0]);
        let transmission = Spectrum::new(vec![1.0, 4.0], vec![1.0, 0.0]);

        let access = SpectralAccess::compare(&cross, &transmission, 0.5).unwrap();
        assert_relative_eq!(access.ground_weighted, 0.5, epsilon = 1e-12);
        assert_relative_eq!(access.ground_windowed, 0.5, epsilon = 1e-12);
        assert_relative_eq!(access.gain, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_compare_weights_by_opacity() {
        // All opacity sits where the ground is opaque
        let cross = Spectrum::new(vec![1.0, 2.0, 3.0], vec![0.0, 0.0, 5.0]);
        let transmission = Spectrum::new(vec![1.0, 2.0, 3.0], vec![1.0, 1.0, 0.0]);
        let access = SpectralAccess::compare(&cross, &transmission, 0.5).unwrap();
        assert_eq!(access.ground_weighted, 0.0);
        assert!(access.gain.is_infinite());

        // Samples outside the transmission coverage count as opaque
        let cross = Spectrum::new(vec![0.5, 2.0], vec![1.0, 1.0]);
        let access = SpectralAccess::compare(&cross, &transmission, 0.5).unwrap();
        assert_relative_eq!(access.ground_weighted, 0.5);
    }

    #[test]
    fn test_compare_errors() {
        let cross = Spectrum::new(vec![1.0, 2.0], vec![0.0, 0.0]);
        let transmission = Spectrum::new(vec![1.0, 2.0], vec![1.0, 1.0]);
        assert!(matches!(
            SpectralAccess::compare(&cross, &transmission, 0.5),
            Err(AccessError::NoOpacity)
        ));

        let short = Spectrum::new(vec![1.0], vec![1.0]);
        assert!(matches!(
            SpectralAccess::compare(&transmission, &short, 0.5),
            Err(AccessError::Interp(InterpError::InsufficientData))
        ));
    }

    #[test]
    fn test_water_transit_heights() {
        let cross = Spectrum::new(vec![1.5, 2.0], vec![1e-26, 1e-25]);
        let z = water_transit_heights(&cross, LOG_WATER_FRACTION, 1500.0, 1.0).unwrap();
        assert_eq!(z.len(), 2);
        // Stronger absorption raises the opaque radius
        assert!(z[1] > z[0]);
    }
}
