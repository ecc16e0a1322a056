//! Estimate cross-correlation SNR for the hires instrument on each platform
//!
//! Smooths a Maunakea telluric transmission spectrum to the instrument's
//! resolving power, counts the usable absorption lines, and scales the
//! IGRINS/Gemini reference detection to each telescope.
//!
//! Usage:
//! ```
//! cargo run --bin snr_estimate -- --exposure-range 60:3600:60 --debug
//! ```

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use hires::shared_args::{telescopes, Platform, SharedArgs};
use hires::snr::{CrossCorrelationSnr, TransmissionAnalysis};
use hires::spectra::{load_columns, Spectrum};
use plotters::prelude::*;
use shared::range_arg::RangeArg;

#[derive(Parser, Debug)]
#[command(author, version, about = "Cross-correlation SNR for the hires feasibility study")]
struct Args {
    /// Telluric transmission table (wavelength in um, transmission)
    #[arg(long, default_value = "data/mktrans_zm_16_15.dat")]
    transmission: PathBuf,

    /// Planet/star flux contrast
    #[arg(long, default_value_t = 1e-3)]
    planet_contrast: f64,

    /// SNR of the reference IGRINS observation
    #[arg(long, default_value_t = 200.0)]
    reference_snr: f64,

    /// Exposure time in seconds
    #[arg(long, default_value_t = 120.0)]
    exposure: f64,

    /// Optional exposure sweep in seconds (start:stop:step), plotted per platform
    #[arg(long)]
    exposure_range: Option<RangeArg>,

    /// Telescope platforms to evaluate
    #[arg(long, value_enum, value_delimiter = ',', default_values_t = Platform::ALL)]
    platforms: Vec<Platform>,

    /// Plot the raw and smoothed transmission spectra
    #[arg(long, default_value_t = false)]
    debug: bool,

    #[command(flatten)]
    shared: SharedArgs,
}

/// Plot the raw and smoothed transmission spectra
fn plot_filter(
    raw: &Spectrum,
    analysis: &TransmissionAnalysis,
    output_path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(output_path, (1600, 1200)).into_drawing_area();
    root.fill(&WHITE)?;

    let x_min = raw.x.iter().copied().fold(f64::INFINITY, f64::min);
    let x_max = raw.x.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let mut chart = ChartBuilder::on(&root)
        .caption("Telluric transmission", ("sans-serif", 40))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, 0.0..1.05)?;

    chart
        .configure_mesh()
        .x_desc("wavelength (um)")
        .y_desc("Fractional Transmission")
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            raw.x.iter().copied().zip(raw.y.iter().copied()),
            RED.mix(0.5),
        ))?
        .label("Raw spectrum data")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.mix(0.5)));

    let filtered = &analysis.filtered;
    chart
        .draw_series(LineSeries::new(
            filtered.x.iter().copied().zip(filtered.y.iter().copied()),
            &BLUE,
        ))?
        .label(format!("R={}", analysis.resolution))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Plot SNR against exposure time for each platform
fn plot_sweep(
    curves: &[(String, Vec<(f64, f64)>)],
    output_path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(output_path, (1600, 1200)).into_drawing_area();
    root.fill(&WHITE)?;

    let points = curves.iter().flat_map(|(_, pts)| pts.iter());
    let (t_max, snr_max) = points
        .fold((0.0f64, 0.0f64), |(t, s), &(pt, ps)| (t.max(pt), s.max(ps)));

    let mut chart = ChartBuilder::on(&root)
        .caption("Cross-correlation SNR vs exposure", ("sans-serif", 40))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..t_max * 1.05, 0.0..snr_max * 1.1)?;

    chart
        .configure_mesh()
        .x_desc("Exposure (s)")
        .y_desc("SNR")
        .draw()?;

    let colors = [BLUE, GREEN, RED, MAGENTA];
    for ((name, pts), color) in curves.iter().zip(colors.iter().cycle()) {
        let legend_color = *color;
        chart
            .draw_series(LineSeries::new(pts.iter().copied(), color))?
            .label(name)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], legend_color));
    }

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

    let raw = load_columns(&args.transmission)
        .with_context(|| format!("loading {}", args.transmission.display()))?;
    let analysis = TransmissionAnalysis::new(&raw, args.shared.resolution)
        .context("smoothing transmission spectrum")?;

    println!("Transmission: {} samples", raw.len());
    println!("Filter sigma: {:.3} samples", analysis.sigma);
    println!("Oversampling: {:.3}", analysis.oversample);
    println!("N_lines: {:.2}", analysis.n_lines);

    let model = CrossCorrelationSnr {
        reference_snr: args.reference_snr,
        planet_contrast: args.planet_contrast,
        ..CrossCorrelationSnr::default()
    };
    let selected = telescopes(&args.platforms);

    println!("------------------------");
    for estimate in model.estimate(&analysis, args.exposure, &selected) {
        println!(
            "{:<14} D={:>5.2} m  t={:>6.0} s  SNR_cc={:.4}",
            estimate.platform, estimate.aperture_m, estimate.exposure_s, estimate.snr
        );
    }

    if args.debug {
        let path = args.shared.plot_path("transmission_filter.png")?;
        plot_filter(&raw, &analysis, &path).map_err(|e| anyhow!("plotting filter: {e}"))?;
        println!("Plot saved to: {}", path.display());
    }

    if let Some(range) = &args.exposure_range {
        let exposures = range.values();
        let curves: Vec<(String, Vec<(f64, f64)>)> = selected
            .iter()
            .map(|telescope| {
                let pts = exposures
                    .iter()
                    .map(|&t| (t, model.snr(analysis.n_lines, t, telescope.aperture_m)))
                    .collect();
                (telescope.name.clone(), pts)
            })
            .collect();

        let path = args.shared.plot_path("snr_vs_exposure.png")?;
        plot_sweep(&curves, &path).map_err(|e| anyhow!("plotting sweep: {e}"))?;
        println!("Plot saved to: {}", path.display());
    }

    Ok(())
}
