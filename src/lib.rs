//! tickspan: "nice" axis tick-range calculation.
//!
//! Given a data range and a rendering-size budget, this crate computes a
//! human-friendly set of axis tick marks: a covering start and end value, a
//! minor-tick width drawn from standard multiples, and a major-tick grouping
//! that never overflows the available space. Two domains are built in:
//! exact-decimal numeric axes and calendar-month axes.

pub mod api;
pub mod core;
pub mod error;
pub mod telemetry;

pub use api::{AxisValue, RangePlanner, axis_range, axis_range_at, axis_ranges};
pub use core::{
    MonthDomain, MonthNumber, NumericDomain, TickCountTarget, TickDomain, TickMark, TickRange,
    TickSizePreference,
};
pub use error::{RangeError, RangeResult};
