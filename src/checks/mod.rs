//! The check library.
//!
//! Each check is a pure function over one group's series (or its baseline
//! and recent windows) returning a structured statistics value. Checks never
//! fail: degenerate input (empty series, single rows, constant values) has a
//! defined result.
//!
//! | check | input | output |
//! |---|---|---|
//! | [`range_check`] | values | [`RangeStats`](opsmon_types::RangeStats) |
//! | [`missingness_check`] | (timestamp, value) rows | [`MissingnessStats`](opsmon_types::MissingnessStats) |
//! | [`distribution_shift`] | baseline + recent values | [`ShiftStats`](opsmon_types::ShiftStats) |
//! | [`integrity_check`] | (timestamp, value) rows | [`IntegrityStats`](opsmon_types::IntegrityStats) |

mod integrity;
mod missingness;
mod range;
mod shift;

pub use integrity::integrity_check;
pub use missingness::missingness_check;
pub use range::range_check;
pub use shift::{distribution_shift, ks_two_sample, psi, KsTest};
