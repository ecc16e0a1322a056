//! Command-line range arguments.
//!
//! Two clap-compatible types:
//! - [`RangeArg`]: `start:stop:step` sweeps (exposure times, resolving powers)
//! - [`BoundsArg`]: `lower:upper` windows (wavelength coverage)

use std::fmt;
use std::str::FromStr;

fn parse_component(part: &str, what: &str) -> Result<f64, String> {
    part.trim()
        .parse::<f64>()
        .map_err(|_| format!("Invalid {what} value: '{}'", part.trim()))
}

/// Parse a `start:stop:step` sweep specification.
///
/// # Validation Rules
/// - **Step non-zero**: prevents infinite loops
/// - **Direction consistency**: positive step requires start < stop,
///   negative step requires start > stop
///
/// # Examples
/// Valid: `"60:600:60"`, `"10:0:-1"`.
/// Invalid: `"1:2"` (missing step), `"1:2:0"` (zero step), `"5:1:1"` (wrong direction).
pub fn parse_range(s: &str) -> Result<(f64, f64, f64), String> {
    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() != 3 {
        return Err("Range must be in format 'start:stop:step'".to_string());
    }

    let start = parse_component(parts[0], "start")?;
    let stop = parse_component(parts[1], "stop")?;
    let step = parse_component(parts[2], "step")?;

    if step == 0.0 {
        return Err("Step cannot be zero".to_string());
    }
    if step > 0.0 && start >= stop {
        return Err("For positive step, start must be less than stop".to_string());
    }
    if step < 0.0 && start <= stop {
        return Err("For negative step, start must be greater than stop".to_string());
    }

    Ok((start, stop, step))
}

/// Parameter sweep `start:stop:step`, stop inclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeArg(pub f64, pub f64, pub f64);

impl FromStr for RangeArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, stop, step) = parse_range(s)?;
        Ok(RangeArg(start, stop, step))
    }
}

impl fmt::Display for RangeArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.0, self.1, self.2)
    }
}

impl RangeArg {
    pub fn start(&self) -> f64 {
        self.0
    }

    pub fn stop(&self) -> f64 {
        self.1
    }

    pub fn step(&self) -> f64 {
        self.2
    }

    /// All values from start to stop (inclusive) by step.
    ///
    /// Values are computed as `start + i * step` so long sweeps do not
    /// accumulate rounding error. A tolerance of 1e-9 steps keeps an end point
    /// that lands on `stop` up to floating-point noise.
    pub fn values(&self) -> Vec<f64> {
        let (start, stop, step) = (self.0, self.1, self.2);
        let span = (stop - start) / step;
        if !span.is_finite() || span < 0.0 {
            return Vec::new();
        }
        let count = (span + 1e-9).floor() as usize + 1;
        (0..count).map(|i| start + i as f64 * step).collect()
    }
}

/// Closed interval `lower:upper` with `lower < upper`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundsArg {
    pub lower: f64,
    pub upper: f64,
}

impl BoundsArg {
    pub fn new(lower: f64, upper: f64) -> Self {
        if !lower.is_finite() || !upper.is_finite() {
            panic!("Bounds cannot contain non-finite values");
        }
        if lower >= upper {
            panic!("Invalid bounds: lower must be less than upper, got {lower}..{upper}");
        }
        Self { lower, upper }
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.lower..=self.upper).contains(&value)
    }
}

impl FromStr for BoundsArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() != 2 {
            return Err("Bounds must be in format 'lower:upper'".to_string());
        }
        let lower = parse_component(parts[0], "lower")?;
        let upper = parse_component(parts[1], "upper")?;
        if !lower.is_finite() || !upper.is_finite() {
            return Err("Bounds must be finite".to_string());
        }
        if lower >= upper {
            return Err(format!("Lower bound {lower} must be less than upper bound {upper}"));
        }
        Ok(Self { lower, upper })
    }
}

impl fmt::Display for BoundsArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.lower, self.upper)
    }
}
