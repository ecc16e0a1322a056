//! Spectrograph layouts: the IGRINS reference and the proposed hires instrument.
//!
//! IGRINS reaches R ~ 45,000 but only ~20,000 resolution elements, because H
//! and K band are split around the atmospheric absorption between them and
//! imaged onto separate 2K x 2K arrays. The hires concept reuses the IGRINS
//! silicon immersion grating, drops the H/K gap (orders 72-122 continuous),
//! and sizes the optics for a diffraction-limited slit on a balloon telescope.
//!
//! # Beam size
//!
//! For an immersion echelle the resolving power is set by the collimated beam
//! diameter d₁ and the slit's angle on the sky φ:
//!
//! ```text
//! d₁ = R · (φ D / 2) · cos α / (sin δ cos θ)
//! ```
//!
//! With a diffraction-limited slit φ = 2λ/D the telescope aperture cancels,
//! so both balloon platforms need the same spectrograph.

use serde::Serialize;
use shared::units::{Angle, AngleExt, Length, LengthExt};

use super::grating::{models::IGRINS_R3, orders, GratingGeometry, ImmersionGrating};
use crate::hardware::detector::{models::H2RG, DetectorConfig};
use crate::hardware::telescope::{models::GEMINI_SOUTH, TelescopeConfig};

/// Default off-Littrow angle, degrees
pub const DEFAULT_THETA_DEG: f64 = 1.6;

/// Pixels per resolution element at Nyquist sampling
pub const NYQUIST_PIXELS: f64 = 2.0;

/// Published IGRINS H-band blaze wavelengths, orders 98-122 (step 2), nm
pub const IGRINS_H_BLAZE_NM: [f64; 13] = [
    1823.59, 1788.03, 1753.89, 1721.08, 1689.52, 1659.15, 1629.15, 1601.71, 1574.53, 1548.30,
    1522.97, 1498.50, 1474.85,
];

/// Published IGRINS K-band blaze wavelengths, nm
///
/// The table lists ten wavelengths against eleven K orders (72-92, step 2).
pub const IGRINS_K_BLAZE_NM: [f64; 10] = [
    2467.88, 2402.10, 2339.80, 2224.62, 2171.27, 2120.49, 2072.09, 2025.92, 1981.81, 1939.65,
];

/// The IGRINS instrument on Gemini South, as built.
#[derive(Debug, Clone)]
pub struct IgrinsReference {
    pub telescope: TelescopeConfig,
    pub grating: ImmersionGrating,
    /// Off-Littrow angle θ, radians
    pub theta_rad: f64,
    /// Focal ratio of the beam entering the spectrograph
    pub feed_f_number: f64,
    pub collimator_focal_length_mm: f64,
    /// Collimated beam diameter d₁
    pub beam_diameter_mm: f64,
    pub camera_focal_length_mm: f64,
    /// Detector pixels per resolution element
    pub pixels_per_element: f64,
    pub resolution: f64,
    /// Slit width on the sky, radians (typical K-band seeing is 0.4-0.6")
    pub slit_angle_rad: f64,
    pub h_orders: Vec<u32>,
    pub k_orders: Vec<u32>,
}

impl IgrinsReference {
    pub fn new(theta_rad: f64) -> Self {
        Self {
            telescope: GEMINI_SOUTH.clone(),
            grating: *IGRINS_R3,
            theta_rad,
            feed_f_number: 8.8,
            collimator_focal_length_mm: 250.0,
            beam_diameter_mm: 25.0,
            camera_focal_length_mm: 126.6,
            pixels_per_element: 3.66,
            resolution: 45_000.0,
            slit_angle_rad: Angle::from_arcseconds(0.34).as_radians(),
            h_orders: orders(98, 122, 2),
            k_orders: orders(72, 92, 2),
        }
    }

    pub fn geometry(&self) -> GratingGeometry {
        self.grating.geometry(self.theta_rad)
    }

    /// Clearance of the first fold mirror, small-angle approximation `2 F d₁ θ`
    pub fn fold_mirror_clearance_mm(&self) -> f64 {
        2.0 * self.feed_f_number * self.beam_diameter_mm * self.theta_rad
    }

    /// Illuminated grating length W
    pub fn grating_length_mm(&self) -> f64 {
        self.geometry().illuminated_length_mm(self.beam_diameter_mm)
    }

    /// Camera focal ratio F₂ = f_camera / d₁
    pub fn camera_f_number(&self) -> f64 {
        self.camera_focal_length_mm / self.beam_diameter_mm
    }

    /// Off-Littrow blaze wavelengths of the H-band orders, nm
    pub fn h_blaze_off_plane_nm(&self) -> Vec<f64> {
        self.h_orders
            .iter()
            .map(|&m| self.grating.blaze_wavelength_off_plane_nm(m, self.theta_rad))
            .collect()
    }

    /// Littrow blaze wavelengths of the H-band orders, nm
    ///
    /// These run slightly short of the published values, by an amount that
    /// grows toward the blue; the dispersion of n is not modeled.
    pub fn h_blaze_nm(&self) -> Vec<f64> {
        self.h_orders
            .iter()
            .map(|&m| self.grating.blaze_wavelength_nm(m))
            .collect()
    }

    /// Free spectral range of each H-band order, nm
    pub fn h_free_spectral_range_nm(&self) -> Vec<f64> {
        self.h_orders
            .iter()
            .map(|&m| self.grating.free_spectral_range_nm(m))
            .collect()
    }

    /// Resolving power per order, `λ_b / (φ D) · m / (σ cos α) · d₁`
    ///
    /// Orders and blaze wavelengths are paired positionally; extra entries on
    /// either side are ignored.
    pub fn order_resolution(&self, order_list: &[u32], blaze_nm: &[f64]) -> Vec<f64> {
        let g = self.geometry();
        let sigma_mm = self.grating.groove_spacing_mm();
        order_list
            .iter()
            .zip(blaze_nm)
            .map(|(&m, &lam_nm)| {
                let lam_m = Length::from_nanometers(lam_nm).as_meters();
                lam_m / (self.slit_angle_rad * self.telescope.aperture_m) * m as f64
                    / (sigma_mm * g.alpha_rad.cos())
                    * self.beam_diameter_mm
            })
            .collect()
    }

    /// [`Self::order_resolution`] for the published H-band blaze table
    pub fn h_resolution(&self) -> Vec<f64> {
        self.order_resolution(&self.h_orders, &IGRINS_H_BLAZE_NM)
    }

    /// Collimated beam diameter the IGRINS design needs behind Gemini, mm.
    ///
    /// Scales the f/8.8 design beam to Gemini's f/16 feed.
    pub fn gemini_beam_diameter_mm(&self) -> f64 {
        let g = self.geometry();
        let d1_m = self.resolution * self.telescope.aperture_m / 2.0 * g.resolution_factor()
            * self.slit_angle_rad
            / 2.0
            * self.feed_f_number
            / self.telescope.f_number();
        Length::from_meters(d1_m).as_millimeters()
    }

    pub fn summary(&self) -> IgrinsSummary {
        IgrinsSummary {
            anamorphic_factor: self.geometry().anamorphic_factor(),
            fold_mirror_clearance_mm: self.fold_mirror_clearance_mm(),
            grating_length_mm: self.grating_length_mm(),
            camera_f_number: self.camera_f_number(),
            h_orders: self.h_orders.clone(),
            h_blaze_nm: self.h_blaze_nm(),
            h_blaze_off_plane_nm: self.h_blaze_off_plane_nm(),
            h_free_spectral_range_nm: self.h_free_spectral_range_nm(),
            h_resolution: self.h_resolution(),
            gemini_beam_diameter_mm: self.gemini_beam_diameter_mm(),
        }
    }
}

/// Derived IGRINS quantities for reporting
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IgrinsSummary {
    pub anamorphic_factor: f64,
    pub fold_mirror_clearance_mm: f64,
    pub grating_length_mm: f64,
    pub camera_f_number: f64,
    pub h_orders: Vec<u32>,
    pub h_blaze_nm: Vec<f64>,
    pub h_blaze_off_plane_nm: Vec<f64>,
    pub h_free_spectral_range_nm: Vec<f64>,
    pub h_resolution: Vec<f64>,
    pub gemini_beam_diameter_mm: f64,
}

/// The proposed balloon-borne instrument.
#[derive(Debug, Clone)]
pub struct HiresDesign {
    pub resolution: f64,
    /// Focal ratio at the slit
    pub f_number: f64,
    /// Wavelength the slit is diffraction-limited at, meters
    pub critical_wavelength_m: f64,
    /// Off-Littrow angle θ, radians
    pub theta_rad: f64,
    pub grating: ImmersionGrating,
    pub detector: DetectorConfig,
    /// Continuous order coverage, no H/K gap
    pub orders: Vec<u32>,
}

impl Default for HiresDesign {
    fn default() -> Self {
        Self {
            resolution: 40_000.0,
            f_number: 12.0,
            critical_wavelength_m: 1.5e-6,
            theta_rad: Angle::from_degrees(DEFAULT_THETA_DEG).as_radians(),
            grating: *IGRINS_R3,
            detector: H2RG.clone(),
            orders: orders(72, 122, 1),
        }
    }
}

impl HiresDesign {
    pub fn geometry(&self) -> GratingGeometry {
        self.grating.geometry(self.theta_rad)
    }

    /// Physical slit width `2 λ F`, microns
    pub fn slit_width_um(&self) -> f64 {
        Length::from_meters(2.0 * self.critical_wavelength_m * self.f_number).as_micrometers()
    }

    /// Collimated beam diameter for a diffraction-limited slit, mm
    pub fn beam_diameter_mm(&self) -> f64 {
        let half_wavelength = self.critical_wavelength_m / 2.0;
        let d1_m = self.resolution * half_wavelength * self.geometry().resolution_factor();
        Length::from_meters(d1_m).as_millimeters()
    }

    /// Camera focal length that puts a resolution element on two pixels, mm
    pub fn camera_focal_length_mm(&self) -> f64 {
        self.beam_diameter_mm() / self.critical_wavelength_m
            * NYQUIST_PIXELS
            * self.detector.pixel_pitch_m()
    }

    /// Collimator focal length `d₁ F`, mm
    pub fn collimator_focal_length_mm(&self) -> f64 {
        self.beam_diameter_mm() * self.f_number
    }

    /// Order blazed at the critical wavelength
    pub fn critical_order(&self) -> u32 {
        self.grating.critical_order(self.critical_wavelength_m, self.theta_rad)
    }

    /// Lay the instrument out behind `telescope`.
    pub fn design_for(&self, telescope: &TelescopeConfig) -> PlatformDesign {
        PlatformDesign {
            platform: telescope.name.clone(),
            aperture_m: telescope.aperture_m,
            slit_angle_arcsec: telescope.diffraction_slit_angle_arcsec(self.critical_wavelength_m),
            slit_width_um: self.slit_width_um(),
            beam_diameter_mm: self.beam_diameter_mm(),
            camera_focal_length_mm: self.camera_focal_length_mm(),
            collimator_focal_length_mm: self.collimator_focal_length_mm(),
            critical_order: self.critical_order(),
        }
    }

    /// Detector length each order occupies at Nyquist sampling.
    ///
    /// An order's free spectral range holds `R / m` resolution elements.
    pub fn footprint(&self) -> DetectorFootprint {
        let orders: Vec<OrderFootprint> = self
            .orders
            .iter()
            .map(|&m| {
                let elements = self.resolution / m as f64;
                OrderFootprint {
                    order: m,
                    blaze_nm: self.grating.blaze_wavelength_nm(m),
                    free_spectral_range_nm: self.grating.free_spectral_range_nm(m),
                    resolution_elements: elements,
                    pixels: elements * NYQUIST_PIXELS,
                }
            })
            .collect();

        let longest_order_px = orders.iter().map(|o| o.pixels).fold(0.0, f64::max);
        let fits_detector = self.detector.fits_dispersion(longest_order_px);
        if !fits_detector {
            log::warn!(
                "Longest order needs {longest_order_px:.0} px, more than the {} px {} provides",
                self.detector.width_px,
                self.detector.name
            );
        }

        DetectorFootprint {
            detector: self.detector.name.clone(),
            total_resolution_elements: orders.iter().map(|o| o.resolution_elements).sum(),
            longest_order_px,
            fits_detector,
            orders,
        }
    }
}

/// The hires layout behind one telescope
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlatformDesign {
    pub platform: String,
    pub aperture_m: f64,
    pub slit_angle_arcsec: f64,
    pub slit_width_um: f64,
    pub beam_diameter_mm: f64,
    pub camera_focal_length_mm: f64,
    pub collimator_focal_length_mm: f64,
    pub critical_order: u32,
}

/// Space one echelle order takes along the dispersion axis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderFootprint {
    pub order: u32,
    pub blaze_nm: f64,
    pub free_spectral_range_nm: f64,
    pub resolution_elements: f64,
    pub pixels: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectorFootprint {
    pub detector: String,
    pub total_resolution_elements: f64,
    pub longest_order_px: f64,
    pub fits_detector: bool,
    pub orders: Vec<OrderFootprint>,
}

/// Everything the design tool reports, ready for JSON output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpectrographReport {
    pub theta_deg: f64,
    pub igrins: IgrinsSummary,
    pub platforms: Vec<PlatformDesign>,
    pub footprint: DetectorFootprint,
}

impl SpectrographReport {
    pub fn build(
        reference: &IgrinsReference,
        design: &HiresDesign,
        platforms: &[TelescopeConfig],
    ) -> Self {
        Self {
            theta_deg: Angle::from_radians(design.theta_rad).as_degrees(),
            igrins: reference.summary(),
            platforms: platforms.iter().map(|t| design.design_for(t)).collect(),
            footprint: design.footprint(),
        }
    }
}
