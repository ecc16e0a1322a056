//! Silicon immersion echelle geometry.
//!
//! An immersion grating is ruled on the back face of a high-index prism, so
//! light diffracts inside the medium and every wavelength quantity scales by
//! the refractive index n. The relations used here, for groove spacing σ,
//! blaze angle δ, off-Littrow angle θ and order m:
//!
//! ```text
//! α = δ + θ,  β = δ − θ                       incidence / diffraction angles
//! r = cos α / cos β                           anamorphic magnification
//! λ_b(m) = 2 σ n sin δ / m                    blaze wavelength
//! λ_b(m, θ) = 2 σ n sin δ cos θ / m           blaze wavelength off Littrow
//! FSR(m) = λ_b(m) / m                         free spectral range
//! W = d₁ / sin α                              illuminated grating length
//! ```

use once_cell::sync::Lazy;
use serde::Serialize;
use shared::units::{Angle, AngleExt};

/// Nanometers per millimeter
const NM_PER_MM: f64 = 1e6;

/// Ruled immersion grating
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImmersionGrating {
    /// Groove density, lines per mm
    pub groove_density_per_mm: f64,
    /// Refractive index of the immersion medium at operating temperature
    pub refractive_index: f64,
    /// Blaze angle δ, radians
    pub blaze_angle_rad: f64,
}

/// Incidence and diffraction angles for a given off-Littrow angle
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GratingGeometry {
    /// Blaze angle δ, radians
    pub blaze_rad: f64,
    /// Off-Littrow angle θ, radians
    pub theta_rad: f64,
    /// Incidence angle α = δ + θ, radians
    pub alpha_rad: f64,
    /// Diffraction angle at blaze β = δ − θ, radians
    pub beta_rad: f64,
}

impl GratingGeometry {
    /// Anamorphic magnification r = cos α / cos β; close to 1 near Littrow
    pub fn anamorphic_factor(&self) -> f64 {
        self.alpha_rad.cos() / self.beta_rad.cos()
    }

    /// Length of grating illuminated by a collimated beam of `beam_mm` diameter
    pub fn illuminated_length_mm(&self, beam_mm: f64) -> f64 {
        beam_mm / self.alpha_rad.sin()
    }

    /// `cos α / (sin δ cos θ)`, the geometric factor relating beam size to resolving power
    pub fn resolution_factor(&self) -> f64 {
        self.alpha_rad.cos() / (self.blaze_rad.sin() * self.theta_rad.cos())
    }
}

impl ImmersionGrating {
    pub fn new(groove_density_per_mm: f64, refractive_index: f64, blaze_angle_deg: f64) -> Self {
        Self {
            groove_density_per_mm,
            refractive_index,
            blaze_angle_rad: Angle::from_degrees(blaze_angle_deg).as_radians(),
        }
    }

    /// Groove spacing σ in millimeters
    pub fn groove_spacing_mm(&self) -> f64 {
        1.0 / self.groove_density_per_mm
    }

    pub fn geometry(&self, theta_rad: f64) -> GratingGeometry {
        GratingGeometry {
            blaze_rad: self.blaze_angle_rad,
            theta_rad,
            alpha_rad: self.blaze_angle_rad + theta_rad,
            beta_rad: self.blaze_angle_rad - theta_rad,
        }
    }

    /// Littrow blaze wavelength of `order`, nanometers
    pub fn blaze_wavelength_nm(&self, order: u32) -> f64 {
        2.0 * self.groove_spacing_mm() / order as f64
            * self.refractive_index
            * self.blaze_angle_rad.sin()
            * NM_PER_MM
    }

    /// Blaze wavelength of `order` at off-Littrow angle `theta_rad`, nanometers
    pub fn blaze_wavelength_off_plane_nm(&self, order: u32, theta_rad: f64) -> f64 {
        self.blaze_wavelength_nm(order) * theta_rad.cos()
    }

    /// Free spectral range of `order` around its blaze wavelength, nanometers
    pub fn free_spectral_range_nm(&self, order: u32) -> f64 {
        self.blaze_wavelength_nm(order) / order as f64
    }

    /// Order whose blaze peak sits closest to `wavelength_m`
    pub fn critical_order(&self, wavelength_m: f64, theta_rad: f64) -> u32 {
        let g = self.geometry(theta_rad);
        let spacing_m = self.groove_spacing_mm() * 1e-3;
        (self.refractive_index * spacing_m / wavelength_m * (g.beta_rad.sin() + g.alpha_rad.sin()))
            .round() as u32
    }
}

/// Orders `first..=last` in steps of `step`
pub fn orders(first: u32, last: u32, step: usize) -> Vec<u32> {
    (first..=last).step_by(step).collect()
}

/// Standard grating models
pub mod models {
    use super::*;

    /// IGRINS R3 silicon immersion echelle at 130 K (n = 3.435 longward of 1 um)
    pub static IGRINS_R3: Lazy<ImmersionGrating> =
        Lazy::new(|| ImmersionGrating::new(36.5, 3.435, 71.56));
}

#[cfg(test)]
mod tests {
    use super::models::IGRINS_R3;
    use super::*;
    use approx::assert_relative_eq;

    fn theta() -> f64 {
        1.6_f64.to_radians()
    }

    #[test]
    fn test_geometry() {
        let g = IGRINS_R3.geometry(theta());
        assert_relative_eq!(g.alpha_rad, 73.16_f64.to_radians(), epsilon = 1e-12);
        assert_relative_eq!(g.beta_rad, 69.96_f64.to_radians(), epsilon = 1e-12);
        // Near Littrow the beam is only mildly compressed
        let r = g.anamorphic_factor();
        assert!(r > 0.8 && r < 1.0, "r = {r}");

        assert_relative_eq!(
            g.illuminated_length_mm(25.0),
            25.0 / 73.16_f64.to_radians().sin(),
            epsilon = 1e-12
        );
        // Littrow: no magnification
        assert_relative_eq!(IGRINS_R3.geometry(0.0).anamorphic_factor(), 1.0);
    }

    #[test]
    fn test_blaze_wavelengths_track_published_table() {
        // Published H-band blaze wavelengths for orders 98 and 122
        let red = IGRINS_R3.blaze_wavelength_nm(98);
        let blue = IGRINS_R3.blaze_wavelength_nm(122);
        assert!((red - 1823.59).abs() < 5.0, "order 98 blaze {red}");
        assert!((blue - 1474.85).abs() < 15.0, "order 122 blaze {blue}");

        assert_relative_eq!(red * 98.0, blue * 122.0, max_relative = 1e-12);
        assert_relative_eq!(
            IGRINS_R3.free_spectral_range_nm(98),
            red / 98.0,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            IGRINS_R3.blaze_wavelength_off_plane_nm(98, theta()),
            red * theta().cos(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_critical_order() {
        // 1.5 um lands near order 119 on the IGRINS grating
        assert_eq!(IGRINS_R3.critical_order(1.5e-6, theta()), 119);
        assert!(IGRINS_R3.critical_order(2.4e-6, theta()) < 80);
    }

    #[test]
    fn test_orders() {
        assert_eq!(orders(98, 122, 2).len(), 13);
        assert_eq!(orders(72, 92, 2).first(), Some(&72));
        assert_eq!(orders(72, 92, 2).last(), Some(&92));
        assert_eq!(orders(72, 122, 1).len(), 51);
    }
}
