//! Water absorption features versus the telluric windows
//!
//! Loads an H2O cross-section table over the IGRINS band, smooths it to the
//! instrument's resolving power, computes the hot-Jupiter transit signal, and
//! optionally compares it against a ground transmission spectrum to show how
//! much of the water spectrum a balloon platform recovers.
//!
//! Usage:
//! ```
//! cargo run --bin water_access -- --transmission data/mktrans_zm_16_15.dat
//! ```

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use hires::access::{water_spectrum, water_transit_heights, SpectralAccess, LOG_WATER_FRACTION};
use hires::shared_args::SharedArgs;
use hires::spectra::{load_columns, smooth_to_resolution, Spectrum};
use hires::transit::{eclipse_depth, mean_molecular_mass, MASS_H2, MASS_H2O};
use plotters::prelude::*;
use shared::range_arg::BoundsArg;

#[derive(Parser, Debug)]
#[command(author, version, about = "Water cross-section access from ground and balloon")]
struct Args {
    /// Cross-section table (wavenumber in cm^-1, cross-section in cm^2)
    #[arg(long, default_value = "line_lists/H2O_30mbar_1500K.txt")]
    cross_section: PathBuf,

    /// Header lines to skip before parsing
    #[arg(long)]
    skip_lines: Option<usize>,

    /// Wavelength window in microns (lower:upper)
    #[arg(long, default_value = "1.47:2.5")]
    window: BoundsArg,

    /// log10 water volume mixing ratio
    #[arg(long, default_value_t = LOG_WATER_FRACTION, allow_negative_numbers = true)]
    log_abundance: f64,

    /// Atmospheric temperature in K
    #[arg(long, default_value_t = 1500.0)]
    temperature: f64,

    /// Reference pressure in bar
    #[arg(long, default_value_t = 1.0)]
    pressure: f64,

    /// Ground transmission table (wavelength in um, transmission)
    #[arg(long)]
    transmission: Option<PathBuf>,

    /// Transmission at or above which a sample counts as an open window
    #[arg(long, default_value_t = 0.5)]
    threshold: f64,

    /// Cross-section plot file name, written inside --plot-dir
    #[arg(long, default_value = "water_cross_section.png")]
    output: String,

    #[command(flatten)]
    shared: SharedArgs,
}

/// Plot the raw and smoothed cross-section spectra
fn plot_cross_section(
    raw: &Spectrum,
    smoothed: &Spectrum,
    resolution: f64,
    output_path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(output_path, (1600, 1200)).into_drawing_area();
    root.fill(&WHITE)?;

    let x_min = raw.x.iter().copied().fold(f64::INFINITY, f64::min);
    let x_max = raw.x.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let y_max = raw.y.iter().copied().fold(0.0, f64::max);

    let mut chart = ChartBuilder::on(&root)
        .caption("H2O cross section", ("sans-serif", 40))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(80)
        .build_cartesian_2d(x_min..x_max, 0.0..y_max * 1.05)?;

    chart
        .configure_mesh()
        .x_desc("wavelength (um)")
        .y_desc("Cross section (cm^2)")
        .y_label_formatter(&|y| format!("{y:.1e}"))
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            raw.x.iter().copied().zip(raw.y.iter().copied()),
            RED.mix(0.4),
        ))?
        .label("Line list")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.mix(0.4)));

    chart
        .draw_series(LineSeries::new(
            smoothed.x.iter().copied().zip(smoothed.y.iter().copied()),
            &BLUE,
        ))?
        .label(format!("R={resolution}"))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let raw = water_spectrum(
        &args.cross_section,
        args.window.lower,
        args.window.upper,
        args.skip_lines,
    )
    .with_context(|| format!("loading {}", args.cross_section.display()))?;
    let (smoothed, sigma) = smooth_to_resolution(&raw, args.shared.resolution)
        .context("smoothing cross section")?;

    let mass = mean_molecular_mass(args.log_abundance, MASS_H2O, MASS_H2);
    let heights =
        water_transit_heights(&smoothed, args.log_abundance, args.temperature, args.pressure)
            .context("computing transit heights")?;
    let depth = eclipse_depth(heights.view(), 1.0, 1.0);
    let finite_depth = || depth.iter().copied().filter(|d| d.is_finite());

    println!("Window: {} um, {} samples", args.window, raw.len());
    println!("Filter sigma: {sigma:.3} samples");
    println!("Mean molecular mass: {mass:.4} amu");
    println!(
        "Transit depth: {:.6} .. {:.6}",
        finite_depth().fold(f64::INFINITY, f64::min),
        finite_depth().fold(f64::NEG_INFINITY, f64::max)
    );

    if let Some(path) = &args.transmission {
        let transmission =
            load_columns(path).with_context(|| format!("loading {}", path.display()))?;
        let access = SpectralAccess::compare(&smoothed, &transmission, args.threshold)
            .context("comparing against transmission")?;

        println!("------------------------");
        println!("Ground (weighted):        {:.4}", access.ground_weighted);
        println!(
            "Ground (T >= {:.2}):       {:.4}",
            access.threshold, access.ground_windowed
        );
        println!("Balloon:                  {:.4}", access.balloon);
        println!("Balloon gain:             {:.2}x", access.gain);
    }

    let plot_path = args
        .shared
        .plot_path(&args.output)
        .with_context(|| format!("creating {}", args.shared.plot_dir.display()))?;
    plot_cross_section(&raw, &smoothed, args.shared.resolution, &plot_path)
        .map_err(|e| anyhow!("plotting cross section: {e}"))?;
    println!("Plot saved to: {}", plot_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_plot_lands_in_plot_dir() {
        let args = Args::parse_from(["water_access"]);
        assert_eq!(
            args.shared.plot_dir.join(&args.output),
            PathBuf::from("plots/water_cross_section.png")
        );

        let args = Args::parse_from(["water_access", "--plot-dir", "out", "--output", "h2o.png"]);
        assert_eq!(args.shared.plot_dir.join(&args.output), PathBuf::from("out/h2o.png"));
    }

    #[test]
    fn test_skip_lines_help_describes_header() {
        let command = Args::command();
        let skip = command
            .get_arguments()
            .find(|arg| arg.get_id() == "skip_lines")
            .unwrap();
        let help = skip.get_help().unwrap().to_string();
        assert!(help.starts_with("Header lines to skip"));
    }

    #[test]
    fn test_negative_log_abundance() {
        let args =
            Args::parse_from(["water_access", "--log-abundance", "-4.5", "--skip-lines", "3"]);
        assert_eq!(args.log_abundance, -4.5);
        assert_eq!(args.skip_lines, Some(3));
        assert_eq!(args.window, BoundsArg::new(1.47, 2.5));
    }
}
