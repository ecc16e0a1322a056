//! Telescope platforms feeding the spectrograph.
//!
//! The feasibility study compares one ground-based reference against two
//! balloon platforms:
//!
//! - **GEMINI_SOUTH**: 8.1 m, f/16 Cassegrain focus (IGRINS host)
//! - **SUPERBIT**: 0.5 m balloon telescope
//! - **GIGABIT**: 1.35 m balloon telescope
//!
//! The balloon platforms are assumed to feed the spectrograph at f/12.
//!
//! # Optics
//!
//! - **Collecting area**: A = π(D/2)²
//! - **Plate scale**: arcsec/mm = 206265/f (f in mm)
//! - **Diffraction-limited slit**: φ = 2λ/D, twice the λ/D core so the slit
//!   passes the bulk of the PSF
//!
//! # Examples
//!
//! ```rust
//! use hires::hardware::telescope::models::{GEMINI_SOUTH, SUPERBIT};
//!
//! let ratio = SUPERBIT.aperture_m / GEMINI_SOUTH.aperture_m;
//! println!("Superbit collects {:.4} of Gemini's light", ratio * ratio);
//!
//! let slit_arcsec = SUPERBIT.diffraction_slit_angle_arcsec(1.5e-6);
//! assert!((slit_arcsec - 1.2376).abs() < 1e-3);
//! ```

use once_cell::sync::Lazy;
use shared::units::{Angle, AngleExt};
use std::f64::consts::PI;

/// Arcseconds per radian
const ARCSEC_PER_RAD: f64 = 206_264.8;

/// Telescope optical configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct TelescopeConfig {
    /// Telescope or platform name
    pub name: String,
    /// Primary mirror diameter in meters (clear aperture)
    pub aperture_m: f64,
    /// Effective focal length in meters at the instrument focus
    pub focal_length_m: f64,
}

impl TelescopeConfig {
    /// Create a new telescope configuration
    pub fn new(name: impl Into<String>, aperture_m: f64, focal_length_m: f64) -> Self {
        Self {
            name: name.into(),
            aperture_m,
            focal_length_m,
        }
    }

    /// Create a telescope from its aperture and focal ratio
    pub fn from_f_number(name: impl Into<String>, aperture_m: f64, f_number: f64) -> Self {
        Self::new(name, aperture_m, aperture_m * f_number)
    }

    /// Get the f-number of the telescope
    pub fn f_number(&self) -> f64 {
        self.focal_length_m / self.aperture_m
    }

    pub fn aperture_radius_m(&self) -> f64 {
        self.aperture_m / 2.0
    }

    /// Calculate the collecting area in square meters
    pub fn collecting_area_m2(&self) -> f64 {
        PI * self.aperture_radius_m().powi(2)
    }

    /// Calculate the plate scale in arcseconds per mm
    pub fn plate_scale_arcsec_per_mm(&self) -> f64 {
        // focal length in mm is 1000 * f
        ARCSEC_PER_RAD / (self.focal_length_m * 1000.0)
    }

    /// Sky angle of a slit set to twice the diffraction limit at `wavelength_m`, in radians.
    pub fn diffraction_slit_angle_rad(&self, wavelength_m: f64) -> f64 {
        2.0 * wavelength_m / self.aperture_m
    }

    /// Same as [`Self::diffraction_slit_angle_rad`], in arcseconds.
    pub fn diffraction_slit_angle_arcsec(&self, wavelength_m: f64) -> f64 {
        Angle::from_radians(self.diffraction_slit_angle_rad(wavelength_m)).as_arcseconds()
    }

    /// Create a new telescope configuration with modified focal length
    pub fn with_focal_length(&self, focal_length_m: f64) -> TelescopeConfig {
        TelescopeConfig {
            focal_length_m,
            ..self.clone()
        }
    }
}

/// Standard telescope models
pub mod models {
    use super::*;

    /// Focal ratio assumed for the balloon platforms' spectrograph feed
    pub const BALLOON_F_NUMBER: f64 = 12.0;

    /// Gemini South, 8.1 m at f/16
    pub static GEMINI_SOUTH: Lazy<TelescopeConfig> =
        Lazy::new(|| TelescopeConfig::from_f_number("Gemini South", 8.1, 16.0));

    /// Superbit balloon telescope, 0.5 m
    pub static SUPERBIT: Lazy<TelescopeConfig> =
        Lazy::new(|| TelescopeConfig::from_f_number("Superbit", 0.5, BALLOON_F_NUMBER));

    /// Gigabit balloon telescope, 1.35 m
    pub static GIGABIT: Lazy<TelescopeConfig> =
        Lazy::new(|| TelescopeConfig::from_f_number("Gigabit", 1.35, BALLOON_F_NUMBER));

    /// Every platform in the study, ground reference first
    pub static ALL_PLATFORMS: Lazy<Vec<TelescopeConfig>> = Lazy::new(|| {
        vec![
            GEMINI_SOUTH.clone(),
            SUPERBIT.clone(),
            GIGABIT.clone(),
        ]
    });
}
