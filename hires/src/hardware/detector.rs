//! Focal-plane array configuration for spectrograph layout checks

use once_cell::sync::Lazy;
use shared::units::{Length, LengthExt};

/// Configuration for a detector array
#[derive(Debug, Clone, PartialEq)]
pub struct DetectorConfig {
    /// Name/model of the detector
    pub name: String,
    /// Width in pixels (dispersion direction)
    pub width_px: u32,
    /// Height in pixels (cross-dispersion direction)
    pub height_px: u32,
    /// Pixel pitch in microns
    pub pixel_pitch_um: f64,
}

impl DetectorConfig {
    pub fn new(
        name: impl Into<String>,
        width_px: u32,
        height_px: u32,
        pixel_pitch_um: f64,
    ) -> Self {
        Self {
            name: name.into(),
            width_px,
            height_px,
            pixel_pitch_um,
        }
    }

    /// Pixel pitch in meters
    pub fn pixel_pitch_m(&self) -> f64 {
        Length::from_micrometers(self.pixel_pitch_um).as_meters()
    }

    /// Get detector dimensions in millimeters
    pub fn dimensions_mm(&self) -> (f64, f64) {
        let side = |px: u32| Length::from_micrometers(px as f64 * self.pixel_pitch_um);
        (
            side(self.width_px).as_millimeters(),
            side(self.height_px).as_millimeters(),
        )
    }

    /// Whether a spectrum `pixels` long fits along the dispersion axis
    pub fn fits_dispersion(&self, pixels: f64) -> bool {
        pixels <= self.width_px as f64
    }
}

/// Standard detector models
pub mod models {
    use super::*;

    /// Teledyne HAWAII-2RG, the 2K x 2K array used by IGRINS
    pub static H2RG: Lazy<DetectorConfig> =
        Lazy::new(|| DetectorConfig::new("HAWAII-2RG", 2048, 2048, 18.0));
}
