//! Echelle spectrograph optics

pub mod grating;
pub mod spectrograph;

pub use grating::{GratingGeometry, ImmersionGrating};
pub use spectrograph::{HiresDesign, IgrinsReference, PlatformDesign, SpectrographReport};
