//! Numeric helpers shared by the feasibility tools
//!
//! Small, allocation-light routines over `f64` slices: linear interpolation,
//! nearest-sample lookup and simple averages.

pub mod misc;

pub use misc::{interp, interp_or_zero, mean, mean_spacing, nearest_index, InterpError};
