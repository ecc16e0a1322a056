//! Type-safe physical units for the feasibility calculations
//!
//! Thin extension traits over the `uom` SI quantities so call sites can say
//! `Length::from_micrometers(1.5)` or `Angle::from_arcseconds(0.34)` instead of
//! carrying bare scale factors around.

use uom::si::angle::{degree, radian, second as arcsecond};
use uom::si::f64::{Angle as UomAngle, Length as UomLength};
use uom::si::length::{centimeter, meter, micrometer, millimeter, nanometer};

/// Type alias for length measurements with convenient methods
pub type Length = UomLength;

/// Type alias for plane angles with convenient methods
pub type Angle = UomAngle;

/// Extension trait for length conversions used in optics and spectroscopy
pub trait LengthExt {
    /// Create length from nanometers (blaze wavelengths)
    fn from_nanometers(nm: f64) -> Self;

    /// Create length from micrometers (NIR wavelengths, pixel pitches)
    fn from_micrometers(um: f64) -> Self;
    fn as_micrometers(&self) -> f64;

    /// Millimeters (beam diameters, focal lengths, detector sizes)
    fn as_millimeters(&self) -> f64;

    fn from_meters(m: f64) -> Self;
    fn as_meters(&self) -> f64;

    /// Create a wavelength from a wavenumber in cm⁻¹
    fn from_wavenumber(wavenumber_per_cm: f64) -> Self;

    /// Wavenumber in cm⁻¹ of this wavelength
    fn as_wavenumber(&self) -> f64;
}

/// Extension trait for angle conversions
pub trait AngleExt {
    fn from_radians(rad: f64) -> Self;
    fn as_radians(&self) -> f64;
    fn from_degrees(deg: f64) -> Self;
    fn as_degrees(&self) -> f64;
    /// Create angle from arcseconds (seeing, slit widths on sky)
    fn from_arcseconds(arcsec: f64) -> Self;
    fn as_arcseconds(&self) -> f64;
}

impl LengthExt for Length {
    fn from_nanometers(nm: f64) -> Self {
        Length::new::<nanometer>(nm)
    }

    fn from_micrometers(um: f64) -> Self {
        Length::new::<micrometer>(um)
    }

    fn as_micrometers(&self) -> f64 {
        self.get::<micrometer>()
    }

    fn as_millimeters(&self) -> f64 {
        self.get::<millimeter>()
    }

    fn from_meters(m: f64) -> Self {
        Length::new::<meter>(m)
    }

    fn as_meters(&self) -> f64 {
        self.get::<meter>()
    }

    fn from_wavenumber(wavenumber_per_cm: f64) -> Self {
        Length::new::<centimeter>(1.0 / wavenumber_per_cm)
    }

    fn as_wavenumber(&self) -> f64 {
        1.0 / self.get::<centimeter>()
    }
}

impl AngleExt for Angle {
    fn from_radians(rad: f64) -> Self {
        Angle::new::<radian>(rad)
    }

    fn as_radians(&self) -> f64 {
        self.get::<radian>()
    }

    fn from_degrees(deg: f64) -> Self {
        Angle::new::<degree>(deg)
    }

    fn as_degrees(&self) -> f64 {
        self.get::<degree>()
    }

    fn from_arcseconds(arcsec: f64) -> Self {
        Angle::new::<arcsecond>(arcsec)
    }

    fn as_arcseconds(&self) -> f64 {
        self.get::<arcsecond>()
    }
}

/// Convert a wavenumber in cm⁻¹ to a wavelength in micrometers (`1e4 / wn`).
pub fn wavenumber_to_micrometers(wavenumber_per_cm: f64) -> f64 {
    Length::from_wavenumber(wavenumber_per_cm).as_micrometers()
}

/// Convert a wavelength in micrometers to a wavenumber in cm⁻¹ (`1e4 / wl`).
pub fn micrometers_to_wavenumber(wavelength_um: f64) -> f64 {
    Length::from_micrometers(wavelength_um).as_wavenumber()
}
