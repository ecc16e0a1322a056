//! Interpolation and sample lookup over sorted 1-D data.
//!
//! Spectra in this workspace are stored as parallel `x`/`y` sample arrays.
//! These helpers cover the handful of operations the calculations need:
//!
//! - **Linear interpolation** with explicit bounds errors ([`interp`])
//! - **Zero-padded interpolation** onto another grid ([`interp_or_zero`])
//! - **Nearest-sample search** used when slicing spectra ([`nearest_index`])
//! - **Averages** used for resolution estimates ([`mean`], [`mean_spacing`])

use thiserror::Error;

/// Errors that can occur during interpolation operations.
#[derive(Error, Debug, PartialEq)]
pub enum InterpError {
    #[error("Value {0} is out of bounds for interpolation range [{1}, {2}]")]
    OutOfBounds(f64, f64, f64),
    #[error("Input vectors must have at least 2 points")]
    InsufficientData,
    #[error("Input vectors must have the same length")]
    MismatchedLengths,
    #[error("X values must be sorted in ascending order")]
    UnsortedData,
}

fn validate(xs: &[f64], ys: &[f64]) -> Result<(), InterpError> {
    if xs.len() != ys.len() {
        return Err(InterpError::MismatchedLengths);
    }
    if xs.len() < 2 {
        return Err(InterpError::InsufficientData);
    }
    if xs.windows(2).any(|w| w[1] < w[0]) {
        return Err(InterpError::UnsortedData);
    }
    Ok(())
}

/// Evaluate the segment containing `x`, assuming `xs` is validated and `x` in range.
fn interp_unchecked(x: f64, xs: &[f64], ys: &[f64]) -> f64 {
    // partition_point returns the index of the first element > x
    let idx = xs.partition_point(|&val| val <= x);

    if idx == 0 {
        return ys[0];
    }
    if idx == xs.len() {
        return ys[xs.len() - 1];
    }

    let (x1, x2) = (xs[idx - 1], xs[idx]);
    let (y1, y2) = (ys[idx - 1], ys[idx]);
    let t = (x - x1) / (x2 - x1);
    y1 + t * (y2 - y1)
}

/// Linearly interpolate `ys(xs)` at `x`.
///
/// `xs` must be ascending and bracket `x`.
///
/// # Examples
///
/// ```rust
/// use shared::algo::misc::interp;
///
/// let xs = vec![0.0, 1.0, 2.0, 3.0];
/// let ys = vec![0.0, 2.0, 4.0, 6.0];
///
/// assert_eq!(interp(1.5, &xs, &ys).unwrap(), 3.0);
/// assert_eq!(interp(2.0, &xs, &ys).unwrap(), 4.0);
/// assert!(interp(4.0, &xs, &ys).is_err());
/// ```
pub fn interp(x: f64, xs: &[f64], ys: &[f64]) -> Result<f64, InterpError> {
    validate(xs, ys)?;

    let (lo, hi) = (xs[0], xs[xs.len() - 1]);
    if x < lo || x > hi {
        return Err(InterpError::OutOfBounds(x, lo, hi));
    }

    Ok(interp_unchecked(x, xs, ys))
}

/// Resample `ys(xs)` onto `grid`, returning 0.0 wherever `grid` falls outside `xs`.
///
/// Used to project a transmission curve onto the sampling of a cross-section
/// table; regions without transmission data count as opaque.
pub fn interp_or_zero(grid: &[f64], xs: &[f64], ys: &[f64]) -> Result<Vec<f64>, InterpError> {
    validate(xs, ys)?;

    let (lo, hi) = (xs[0], xs[xs.len() - 1]);
    Ok(grid
        .iter()
        .map(|&x| {
            if x < lo || x > hi {
                0.0
            } else {
                interp_unchecked(x, xs, ys)
            }
        })
        .collect())
}

/// Index of the sample in `xs` closest to `value`.
///
/// Ties resolve to the earliest index. `xs` need not be sorted. NaN samples
/// are never chosen; returns `None` when no sample has a finite distance.
///
/// ```rust
/// use shared::algo::misc::nearest_index;
///
/// assert_eq!(nearest_index(&[1.0, 2.0, 3.0], 2.4), Some(1));
/// assert_eq!(nearest_index(&[1.0, 2.0, 3.0], 2.5), Some(1));
/// assert_eq!(nearest_index(&[], 2.5), None);
/// ```
pub fn nearest_index(xs: &[f64], value: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &x) in xs.iter().enumerate() {
        let dist = (x - value).abs();
        if dist.is_nan() {
            continue;
        }
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((i, dist)),
        }
    }
    best.map(|(i, _)| i)
}

/// Arithmetic mean, `None` for empty input.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Mean of successive differences `x[i+1] - x[i]`, `None` with fewer than two samples.
pub fn mean_spacing(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    // Telescoping sum of the differences
    Some((values[values.len() - 1] - values[0]) / (values.len() - 1) as f64)
}
