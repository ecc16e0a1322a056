//! Shared components and utilities for the hires feasibility workspace.
//!
//! Numeric helpers, command-line argument types and unit conversions used
//! by more than one crate.

pub mod algo;
pub mod range_arg;
pub mod units;

pub use range_arg::{BoundsArg, RangeArg};
