//! Lay out the hires immersion-grating spectrograph for each platform
//!
//! Reproduces the IGRINS reference numbers for the shared R3 grating, then
//! sizes a diffraction-limited slit, collimator, and camera for the balloon
//! telescopes and checks the order footprint against the detector.
//!
//! Usage:
//! ```
//! cargo run --bin spectrograph_design -- --theta-deg 1.6 --json plots/design.json
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use hires::optics::spectrograph::{
    HiresDesign, IgrinsReference, SpectrographReport, DEFAULT_THETA_DEG,
};
use hires::shared_args::{telescopes, Platform};
use hires::snr::DEFAULT_RESOLUTION;
use shared::units::{Angle, AngleExt};

#[derive(Parser, Debug)]
#[command(author, version, about = "Immersion-grating spectrograph design for hires")]
struct Args {
    /// Resolving power of the hires design
    #[arg(long, default_value_t = DEFAULT_RESOLUTION)]
    resolution: f64,

    /// Off-Littrow angle in degrees
    #[arg(long, default_value_t = DEFAULT_THETA_DEG)]
    theta_deg: f64,

    /// Focal ratio delivered to the slit
    #[arg(long, default_value_t = 12.0)]
    f_number: f64,

    /// Wavelength the slit is diffraction-limited at, microns
    #[arg(long, default_value_t = 1.5)]
    critical_wavelength_um: f64,

    /// Write the full report as JSON to this path
    #[arg(long)]
    json: Option<PathBuf>,

    /// Telescope platforms to lay the instrument out for
    #[arg(long, value_enum, value_delimiter = ',', default_values_t = Platform::BALLOON)]
    platforms: Vec<Platform>,
}

fn format_list<T: std::fmt::Display>(values: &[T], precision: usize) -> String {
    values
        .iter()
        .map(|v| format!("{v:.precision$}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let theta_rad = Angle::from_degrees(args.theta_deg).as_radians();
    let reference = IgrinsReference::new(theta_rad);
    let design = HiresDesign {
        resolution: args.resolution,
        f_number: args.f_number,
        critical_wavelength_m: args.critical_wavelength_um * 1e-6,
        theta_rad,
        ..HiresDesign::default()
    };
    let report = SpectrographReport::build(&reference, &design, &telescopes(&args.platforms));

    let igrins = &report.igrins;
    println!("IGRINS reference (theta = {:.2} deg)", report.theta_deg);
    println!("  Anamorphic factor r:      {:.4}", igrins.anamorphic_factor);
    println!("  Fold mirror clearance:    {:.3} mm", igrins.fold_mirror_clearance_mm);
    println!("  Grating length:           {:.2} mm", igrins.grating_length_mm);
    println!("  Camera f-number:          {:.3}", igrins.camera_f_number);
    println!("  Gemini beam diameter:     {:.3} mm", igrins.gemini_beam_diameter_mm);
    println!("  H orders:                 {}", format_list(&igrins.h_orders, 0));
    println!("  H blaze (nm):             {}", format_list(&igrins.h_blaze_nm, 2));
    println!("  H blaze off-plane (nm):   {}", format_list(&igrins.h_blaze_off_plane_nm, 2));
    println!("  H FSR (nm):               {}", format_list(&igrins.h_free_spectral_range_nm, 2));
    println!("  H resolution:             {}", format_list(&igrins.h_resolution, 0));

    for platform in &report.platforms {
        println!("------------------------");
        println!("{} (D = {:.2} m)", platform.platform, platform.aperture_m);
        println!("  Slit angle on sky:        {:.4} arcsec", platform.slit_angle_arcsec);
        println!("  Slit width:               {:.2} um", platform.slit_width_um);
        println!("  Beam diameter:            {:.3} mm", platform.beam_diameter_mm);
        println!("  Camera focal length:      {:.2} mm", platform.camera_focal_length_mm);
        println!("  Collimator focal length:  {:.2} mm", platform.collimator_focal_length_mm);
        println!("  Critical order:           {}", platform.critical_order);
    }

    let footprint = &report.footprint;
    println!("------------------------");
    println!(
        "{}: {} orders, {:.0} resolution elements, longest order {:.0} px (fits: {})",
        footprint.detector,
        footprint.orders.len(),
        footprint.total_resolution_elements,
        footprint.longest_order_px,
        footprint.fits_detector
    );

    if let Some(path) = &args.json {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(&report).context("serializing report")?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        println!("Report saved to: {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_balloon_platforms() {
        let args = Args::parse_from(["spectrograph_design"]);
        assert_eq!(args.platforms, Platform::BALLOON.to_vec());
        assert_eq!(args.resolution, DEFAULT_RESOLUTION);

        let names: Vec<String> = telescopes(&args.platforms).into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["Superbit", "Gigabit"]);
    }

    #[test]
    fn test_gemini_on_request() {
        let args = Args::parse_from(["spectrograph_design", "--platforms", "gemini"]);
        assert_eq!(args.platforms, vec![Platform::Gemini]);
    }
}
