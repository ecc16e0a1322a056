//! Command-line arguments shared by the feasibility binaries

use std::fmt;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::hardware::telescope::models::{GEMINI_SOUTH, GIGABIT, SUPERBIT};
use crate::hardware::TelescopeConfig;
use crate::snr::DEFAULT_RESOLUTION;

/// Telescope platforms selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Platform {
    Gemini,
    Superbit,
    Gigabit,
}

impl Platform {
    /// Every platform, ground reference first
    pub const ALL: [Platform; 3] = [Platform::Gemini, Platform::Superbit, Platform::Gigabit];

    /// The balloon-borne platforms
    pub const BALLOON: [Platform; 2] = [Platform::Superbit, Platform::Gigabit];

    pub fn telescope(&self) -> &'static TelescopeConfig {
        match self {
            Platform::Gemini => &*GEMINI_SOUTH,
            Platform::Superbit => &*SUPERBIT,
            Platform::Gigabit => &*GIGABIT,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Gemini => "gemini",
            Platform::Superbit => "superbit",
            Platform::Gigabit => "gigabit",
        };
        write!(f, "{name}")
    }
}

/// Telescope configurations for the selected platforms, in order
pub fn telescopes(platforms: &[Platform]) -> Vec<TelescopeConfig> {
    platforms.iter().map(|p| p.telescope().clone()).collect()
}

/// Arguments common to the binaries that smooth spectra and write plots
#[derive(Parser, Debug, Clone)]
pub struct SharedArgs {
    /// Resolving power to smooth spectra to
    #[arg(long, default_value_t = DEFAULT_RESOLUTION)]
    pub resolution: f64,

    /// Directory for plots
    #[arg(long, default_value = "plots")]
    pub plot_dir: PathBuf,
}

impl SharedArgs {
    /// Path of `file_name` inside the plot directory, creating the directory.
    pub fn plot_path(&self, file_name: &str) -> std::io::Result<PathBuf> {
        std::fs::create_dir_all(&self.plot_dir)?;
        Ok(self.plot_dir.join(file_name))
    }
}
