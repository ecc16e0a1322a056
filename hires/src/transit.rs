//! Transmission spectroscopy model for a hot Jupiter atmosphere.
//!
//! Computes how far the opaque disk of a transiting planet extends above its
//! reference radius as a function of wavelength, following the isothermal
//! treatment of Line & Parmentier (2016):
//!
//! ```text
//! H      = k T / (μ m_u g)
//! β      = P₀ / τ_eq · sqrt(2π R_p)
//! z(λ)   = H ln( σ(λ) β / sqrt(k μ m_u T g) )
//! δ(λ)   = (R_p / R_s)² + 2 R_p z(λ) / R_s²
//! ```
//!
//! with τ_eq = 0.56 the equivalent optical depth of the transit radius and
//! σ(λ) the abundance-weighted cross-section of the absorbing species,
//! optionally diluted in a grey filler gas (H₂).
//!
//! All quantities are SI except where noted: planet radius in Jupiter radii,
//! stellar radius in solar radii, pressure in bar, masses in amu.

use ndarray::{Array1, ArrayView1, ArrayView2};
use thiserror::Error;

/// Physical constants used by the transit model.
pub struct Constants {}

impl Constants {
    /// Boltzmann constant, J/K
    pub const K_BOLTZMANN: f64 = 1.38e-23;

    /// Atomic mass unit, kg/amu
    pub const AMU_KG: f64 = 1.66e-27;

    /// Surface gravity of Jupiter, m/s²
    pub const G_JOVIAN: f64 = 24.79;

    /// Jupiter equatorial radius, m
    pub const R_JOVIAN: f64 = 7.1492e7;

    /// Solar radius, m
    pub const R_SUN: f64 = 6.957e8;

    /// Pascals per bar
    pub const BAR_TO_PA: f64 = 1e5;

    /// Equivalent optical depth of the transit radius (Line & Parmentier 2016)
    pub const TAU_EQ: f64 = 0.56;
}

/// Molecular mass of water in amu
pub const MASS_H2O: f64 = 18.0;

/// Mean molecular mass of a solar H₂/He mix, used as the filler gas
pub const MASS_H2: f64 = 2.3;

/// Errors from the transit model
#[derive(Debug, Error, PartialEq)]
pub enum TransitError {
    #[error("Got {abundances} abundances for {species} cross-section rows")]
    AbundanceMismatch { abundances: usize, species: usize },

    #[error("Trace abundances sum to {0}, leaving no room for the filler gas")]
    FillerFraction(f64),
}

/// Atmospheric scale height in meters.
///
/// # Arguments
/// * `mass_amu` - Mean molecular mass in amu
/// * `temperature_k` - Atmosphere temperature in Kelvin
/// * `gravity` - Surface gravity in m/s²
pub fn scale_height(mass_amu: f64, temperature_k: f64, gravity: f64) -> f64 {
    Constants::K_BOLTZMANN * temperature_k / (mass_amu * Constants::AMU_KG * gravity)
}

/// Mean molecular mass of a trace species mixed into a filler gas.
///
/// `log10_fraction` is the base-10 log of the trace volume mixing ratio,
/// e.g. -3.80 for water in a hot Jupiter (Peter et al. 2024).
pub fn mean_molecular_mass(log10_fraction: f64, trace_mass: f64, filler_mass: f64) -> f64 {
    let x = 10f64.powf(log10_fraction);
    (1.0 - x) * filler_mass + x * trace_mass
}

/// Transit depth for a planet whose opaque radius is raised by `z` meters.
pub fn eclipse_depth(
    z: ArrayView1<f64>,
    planet_radius_rj: f64,
    star_radius_rsun: f64,
) -> Array1<f64> {
    let r_planet = Constants::R_JOVIAN * planet_radius_rj;
    let r_star = Constants::R_SUN * star_radius_rsun;
    let base = (r_planet / r_star).powi(2);
    z.mapv(|z| base + 2.0 * r_planet * z / (r_star * r_star))
}

/// Isothermal atmosphere used to evaluate [`AtmosphereModel::z_lambda`].
#[derive(Debug, Clone, PartialEq)]
pub struct AtmosphereModel {
    /// Reference pressure at z = 0, in bar
    pub p0_bar: f64,
    /// Reference planet radius in Jupiter radii
    pub planet_radius_rj: f64,
    /// Mean molecular mass in amu
    pub mass_amu: f64,
    /// Effective temperature in Kelvin
    pub temperature_k: f64,
    /// Surface gravity in m/s²
    pub gravity: f64,
    /// Cross-section of the filler gas; `None` treats the trace species as the whole atmosphere
    pub sigma_filler: Option<f64>,
}

impl AtmosphereModel {
    /// Hot Jupiter defaults: 1 bar, 1 R_J, Jovian gravity, no filler opacity.
    pub fn hot_jupiter(mass_amu: f64, temperature_k: f64) -> Self {
        Self {
            p0_bar: 1.0,
            planet_radius_rj: 1.0,
            mass_amu,
            temperature_k,
            gravity: Constants::G_JOVIAN,
            sigma_filler: None,
        }
    }

    pub fn scale_height(&self) -> f64 {
        scale_height(self.mass_amu, self.temperature_k, self.gravity)
    }

    /// Height above the reference radius at which the atmosphere turns opaque.
    ///
    /// # Arguments
    /// * `sigma_trace` - Cross-sections, one row per species, one column per wavelength
    /// * `xi` - Volume mixing ratio of each species
    ///
    /// Wavelengths with a non-positive weighted cross-section produce
    /// non-finite heights; they are counted in a warning rather than rejected.
    pub fn z_lambda(
        &self,
        sigma_trace: ArrayView2<f64>,
        xi: &[f64],
    ) -> Result<Array1<f64>, TransitError> {
        let species = sigma_trace.nrows();
        if xi.len() != species {
            return Err(TransitError::AbundanceMismatch {
                abundances: xi.len(),
                species,
            });
        }

        let xi = ArrayView1::from(xi);
        let trace = xi.dot(&sigma_trace);
        let sigma = match self.sigma_filler {
            Some(filler) => {
                let total = xi.sum();
                if total > 1.0 {
                    return Err(TransitError::FillerFraction(total));
                }
                trace + (1.0 - total) * filler
            }
            None => trace,
        };

        let r_p = Constants::R_JOVIAN * self.planet_radius_rj;
        let pressure = self.p0_bar * Constants::BAR_TO_PA;
        let h = self.scale_height();
        let beta = pressure / Constants::TAU_EQ * (2.0 * std::f64::consts::PI * r_p).sqrt();
        let column = (Constants::K_BOLTZMANN
            * self.mass_amu
            * Constants::AMU_KG
            * self.temperature_k
            * self.gravity)
            .sqrt();

        let opaque = sigma.iter().filter(|&&s| s <= 0.0).count();
        if opaque > 0 {
            log::warn!(
                "{opaque} wavelengths have non-positive opacity; their heights are undefined"
            );
        }

        Ok(sigma.mapv(|s| h * (s / column * beta).ln()))
    }

    /// [`Self::z_lambda`] for a single absorbing species.
    pub fn z_lambda_single(
        &self,
        sigma: ArrayView1<f64>,
        xi: f64,
    ) -> Result<Array1<f64>, TransitError> {
        let rows = sigma.insert_axis(ndarray::Axis(0));
        self.z_lambda(rows, &[xi])
    }
}
