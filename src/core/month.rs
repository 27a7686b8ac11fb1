use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::candidates::{month_candidate_widths, month_major_width};
use crate::core::domain::{CandidateIter, DegenerateSpan, TickCandidate, TickDomain, TickRange};
use crate::error::{RangeError, RangeResult};

/// Fallback minor width: one calendar year per minor tick.
const FALLBACK_MINOR_MONTHS: u32 = 12;

/// Integer month index encoding `year * 12 + month`, with January = 1.
///
/// All month-domain tick arithmetic happens on this index; calendar dates
/// exist only at the adapter boundary.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MonthNumber(i32);

impl MonthNumber {
    #[must_use]
    pub fn new(index: i32) -> Self {
        Self(index)
    }

    /// Month index of the calendar month containing `date`.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.year() * 12 + date.month() as i32)
    }

    /// Month index for an explicit year and 1-based month.
    pub fn from_ym(year: i32, month: u32) -> RangeResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(RangeError::Conversion(format!(
                "month {month} is outside 1..=12"
            )));
        }
        year.checked_mul(12)
            .and_then(|base| base.checked_add(month as i32))
            .map(Self)
            .ok_or_else(|| RangeError::Conversion(format!("year {year} is not representable")))
    }

    #[must_use]
    pub fn index(self) -> i32 {
        self.0
    }

    #[must_use]
    pub fn year(self) -> i32 {
        (self.0 - 1).div_euclid(12)
    }

    /// 1-based month within [`Self::year`].
    #[must_use]
    pub fn month(self) -> u32 {
        ((self.0 - 1).rem_euclid(12) + 1) as u32
    }

    /// First day of the encoded month.
    pub fn first_day(self) -> RangeResult<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year(), self.month(), 1).ok_or_else(|| {
            RangeError::Conversion(format!(
                "month index {} is outside the supported calendar range",
                self.0
            ))
        })
    }
}

/// Calendar-month axis domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MonthDomain {
    traditional_only: bool,
}

impl MonthDomain {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts minor widths to the traditional month groupings.
    #[must_use]
    pub fn traditional_only() -> Self {
        Self {
            traditional_only: true,
        }
    }

    #[must_use]
    pub fn is_traditional_only(self) -> bool {
        self.traditional_only
    }
}

fn overflow(context: &str) -> RangeError {
    RangeError::Unrepresentable(context.to_owned())
}

fn to_index(value: i64, context: &str) -> RangeResult<MonthNumber> {
    i32::try_from(value)
        .map(MonthNumber::new)
        .map_err(|_| overflow(context))
}

impl TickDomain for MonthDomain {
    type Value = MonthNumber;
    type Width = u32;

    fn name(&self) -> &'static str {
        "month"
    }

    fn candidates(
        &self,
        min: MonthNumber,
        max: MonthNumber,
        _tick_pixel_size: u32,
        _control_size: f64,
    ) -> RangeResult<CandidateIter<u32>> {
        let span = (i64::from(max.index()) - i64::from(min.index())).max(1) as u64;
        let iter = month_candidate_widths(self.traditional_only, span).filter_map(|minor| {
            let major = month_major_width(minor);
            Some(TickCandidate {
                minor: u32::try_from(minor).ok()?,
                major: u32::try_from(major).ok()?,
            })
        });
        Ok(Box::new(iter))
    }

    fn round_down(&self, value: MonthNumber, minor: u32) -> RangeResult<MonthNumber> {
        let width = i64::from(minor.max(1));
        let rounded = i64::from(value.index()).div_euclid(width) * width;
        to_index(rounded, "rounded minimum exceeds the month range")
    }

    fn round_up(&self, value: MonthNumber, minor: u32) -> RangeResult<MonthNumber> {
        let width = i64::from(minor.max(1));
        let rounded = i64::from(value.index()).div_euclid(width) * width;
        if rounded == i64::from(value.index()) {
            return Ok(value);
        }
        to_index(rounded + width, "rounded maximum exceeds the month range")
    }

    fn minor_tick_count(
        &self,
        start: MonthNumber,
        end: MonthNumber,
        minor: u32,
    ) -> RangeResult<u64> {
        let span = i64::from(end.index()) - i64::from(start.index());
        if span < 0 {
            return Err(overflow("tick count requires an ascending range"));
        }
        Ok(span as u64 / u64::from(minor.max(1)))
    }

    fn width_ratio(&self, outer: u32, inner: u32) -> RangeResult<u64> {
        Ok(u64::from(outer) / u64::from(inner.max(1)))
    }

    fn offset_ticks(&self, value: MonthNumber, minor: u32, ticks: i64) -> RangeResult<MonthNumber> {
        let offset = i64::from(value.index()) + ticks * i64::from(minor);
        to_index(offset, "offset bound exceeds the month range")
    }

    fn is_lattice_point(&self, value: MonthNumber, width: u32) -> bool {
        width > 0 && i64::from(value.index()).rem_euclid(i64::from(width)) == 0
    }

    fn span_between(&self, from: MonthNumber, to: MonthNumber) -> f64 {
        (i64::from(to.index()) - i64::from(from.index())) as f64
    }

    fn degenerate_span(&self, _value: MonthNumber) -> DegenerateSpan<MonthNumber> {
        // A single month keeps its collapsed bounds; only tick sizing widens.
        DegenerateSpan::KeepCollapsed
    }

    fn fallback_range(
        &self,
        min: MonthNumber,
        max: MonthNumber,
        tick_pixel_size: u32,
        control_size: f64,
    ) -> RangeResult<TickRange<MonthNumber, u32>> {
        let minor = FALLBACK_MINOR_MONTHS;
        let major = u32::try_from(month_major_width(u64::from(minor)))
            .map_err(|_| overflow("fallback major width exceeds the month range"))?;
        let start = self.round_down(min, minor)?;
        let end = self.round_up(max, minor)?;
        let ticks = self.minor_tick_count(start, end, minor)?.max(1);
        Ok(TickRange {
            tick_pixel_size,
            minor,
            major,
            start,
            end,
            coverage: (ticks * u64::from(tick_pixel_size)) as f64 / control_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{MonthDomain, MonthNumber};
    use crate::core::domain::TickDomain;
    use chrono::NaiveDate;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[test]
    fn month_number_round_trips_through_dates() {
        let number = MonthNumber::from_date(date(2020, 2, 15));
        assert_eq!(number.index(), 2020 * 12 + 2);
        assert_eq!(number.year(), 2020);
        assert_eq!(number.month(), 2);
        assert_eq!(number.first_day().expect("date"), date(2020, 2, 1));
    }

    #[test]
    fn month_number_handles_december_and_january() {
        let december = MonthNumber::from_ym(2020, 12).expect("valid month");
        assert_eq!(december.year(), 2020);
        assert_eq!(december.month(), 12);

        let january = MonthNumber::from_ym(2021, 1).expect("valid month");
        assert_eq!(january.index(), december.index() + 1);
        assert_eq!(january.year(), 2021);
        assert_eq!(january.month(), 1);
    }

    #[test]
    fn out_of_range_months_are_rejected() {
        assert!(MonthNumber::from_ym(2020, 0).is_err());
        assert!(MonthNumber::from_ym(2020, 13).is_err());
    }

    #[test]
    fn rounding_anchors_at_month_zero() {
        let domain = MonthDomain::new();
        let value = MonthNumber::new(24242);
        assert_eq!(domain.round_down(value, 3).expect("round").index(), 24240);
        assert_eq!(domain.round_up(value, 3).expect("round").index(), 24243);
        assert_eq!(domain.round_down(value, 2).expect("round").index(), 24242);
        assert_eq!(domain.round_up(value, 2).expect("round").index(), 24242);
    }

    #[test]
    fn tick_counts_use_whole_minor_widths() {
        let domain = MonthDomain::new();
        let start = MonthNumber::new(24240);
        let end = MonthNumber::new(24261);
        assert_eq!(domain.minor_tick_count(start, end, 3).expect("count"), 7);
    }
}
