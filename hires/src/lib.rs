//! Feasibility calculations for a balloon-borne high-resolution NIR spectrograph
//!
//! This crate estimates cross-correlation signal-to-noise for exoplanet
//! atmospheres, sizes an immersion-echelle spectrograph for the Superbit and
//! Gigabit balloon telescopes against the IGRINS/Gemini reference, and
//! quantifies how much of the water spectrum a balloon platform recovers
//! from behind Earth's atmosphere.

pub mod access;
pub mod hardware;
pub mod optics;
pub mod shared_args;
pub mod snr;
pub mod spectra;
pub mod transit;

// Re-exports for easier access
pub use access::SpectralAccess;
pub use hardware::telescope::TelescopeConfig;
pub use optics::{HiresDesign, IgrinsReference, SpectrographReport};
pub use snr::{CrossCorrelationSnr, TransmissionAnalysis};
pub use spectra::Spectrum;
pub use transit::AtmosphereModel;
