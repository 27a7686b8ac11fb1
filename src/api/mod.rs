//! Caller-facing facade: the planner and the compile-time domain dispatch.

pub mod planner;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use crate::core::domain::{TickDomain, TickRange};
use crate::core::month::{MonthDomain, MonthNumber};
use crate::core::numeric::NumericDomain;
use crate::error::{RangeError, RangeResult};

pub use planner::{MAX_TICK_PIXEL_PROBE, MIN_TICK_PIXEL_PROBE, RangePlanner};

type DomainValue<T> = <<T as AxisValue>::Domain as TickDomain>::Value;
type DomainWidth<T> = <<T as AxisValue>::Domain as TickDomain>::Width;

/// Maps a caller value type onto its axis domain.
///
/// Domain selection happens at the call site through this bound, so an
/// unsupported endpoint type is a compile-time error; only the value
/// conversion itself can fail at runtime.
pub trait AxisValue: Sized {
    type Domain: TickDomain + Default;

    fn into_axis_value(self) -> RangeResult<DomainValue<Self>>;
}

impl AxisValue for Decimal {
    type Domain = NumericDomain;

    fn into_axis_value(self) -> RangeResult<Decimal> {
        Ok(self)
    }
}

impl AxisValue for f64 {
    type Domain = NumericDomain;

    fn into_axis_value(self) -> RangeResult<Decimal> {
        Decimal::from_f64(self).ok_or_else(|| {
            RangeError::Conversion(format!("`{self}` is not representable as a decimal"))
        })
    }
}

impl AxisValue for MonthNumber {
    type Domain = MonthDomain;

    fn into_axis_value(self) -> RangeResult<MonthNumber> {
        Ok(self)
    }
}

impl AxisValue for NaiveDate {
    type Domain = MonthDomain;

    fn into_axis_value(self) -> RangeResult<MonthNumber> {
        Ok(MonthNumber::from_date(self))
    }
}

/// Coverage-selected tick range for the domain matching the endpoint type.
pub fn axis_range<T: AxisValue>(
    control_size: f64,
    min: T,
    max: T,
) -> RangeResult<TickRange<DomainValue<T>, DomainWidth<T>>> {
    RangePlanner::new(T::Domain::default()).range(
        control_size,
        min.into_axis_value()?,
        max.into_axis_value()?,
    )
}

/// Every accepted layout across the probed tick pixel widths.
pub fn axis_ranges<T: AxisValue>(
    control_size: f64,
    min: T,
    max: T,
) -> RangeResult<Vec<TickRange<DomainValue<T>, DomainWidth<T>>>> {
    RangePlanner::new(T::Domain::default()).ranges(
        control_size,
        min.into_axis_value()?,
        max.into_axis_value()?,
    )
}

/// Single-probe evaluation for the domain matching the endpoint type.
pub fn axis_range_at<T: AxisValue>(
    control_size: f64,
    tick_pixel_size: u32,
    min: T,
    max: T,
) -> RangeResult<TickRange<DomainValue<T>, DomainWidth<T>>> {
    RangePlanner::new(T::Domain::default()).range_at(
        control_size,
        tick_pixel_size,
        min.into_axis_value()?,
        max.into_axis_value()?,
    )
}
