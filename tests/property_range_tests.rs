use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use tickspan::{MonthDomain, MonthNumber, NumericDomain, RangePlanner};

proptest! {
    #[test]
    fn numeric_ranges_cover_and_fit(
        min in -1_000_000.0f64..1_000_000.0,
        span in 0.001f64..1_000_000.0,
        control in 40.0f64..2000.0,
    ) {
        let min = Decimal::from_f64(min).expect("representable minimum");
        let max = min + Decimal::from_f64(span).expect("representable span");
        let planner = RangePlanner::new(NumericDomain::new());

        let ranges = planner.ranges(control, min, max).expect("probe ranges");
        prop_assert!(ranges.len() <= 9);

        for range in &ranges {
            prop_assert!(range.coverage > 0.0);
            prop_assert!(range.coverage <= 1.0 + 1e-9);
            prop_assert!(range.start <= min);
            prop_assert!(range.end >= max);
            prop_assert!(range.minor > Decimal::ZERO);
            prop_assert!((range.start / range.minor).fract().is_zero());
            prop_assert!((range.end / range.minor).fract().is_zero());
        }

        for (index, left) in ranges.iter().enumerate() {
            for right in &ranges[index + 1..] {
                let duplicate = left.minor == right.minor
                    && left.major == right.major
                    && left.start == right.start
                    && left.end == right.end;
                prop_assert!(!duplicate, "duplicate layout across probes");
            }
        }

        let again = planner.ranges(control, min, max).expect("probe ranges");
        prop_assert_eq!(ranges, again);
    }

    #[test]
    fn numeric_selection_is_deterministic(
        min in -10_000.0f64..10_000.0,
        span in 0.01f64..10_000.0,
        control in 40.0f64..2000.0,
    ) {
        let min = Decimal::from_f64(min).expect("representable minimum");
        let max = min + Decimal::from_f64(span).expect("representable span");
        let planner = RangePlanner::new(NumericDomain::new());

        match planner.range(control, min, max) {
            Ok(first) => {
                let second = planner.range(control, min, max).expect("repeat selection");
                prop_assert_eq!(first, second);
            }
            Err(_) => {
                prop_assert!(planner.ranges(control, min, max).expect("probes").is_empty());
            }
        }
    }

    #[test]
    fn month_ranges_cover_and_fit(
        start_index in 20_000i32..30_000,
        span in 0i32..600,
        control in 30.0f64..1500.0,
    ) {
        let min = MonthNumber::new(start_index);
        let max = MonthNumber::new(start_index + span);
        let planner = RangePlanner::new(MonthDomain::new());

        let ranges = planner.ranges(control, min, max).expect("probe ranges");
        prop_assert!(ranges.len() <= 9);

        for range in &ranges {
            prop_assert!(range.coverage > 0.0);
            prop_assert!(range.coverage <= 1.0 + 1e-9);
            prop_assert!(range.start <= min);
            prop_assert!(range.end >= max);
            prop_assert!(range.minor >= 1);
            prop_assert_eq!(range.start.index().rem_euclid(range.minor as i32), 0);
            prop_assert_eq!(range.end.index().rem_euclid(range.minor as i32), 0);
            prop_assert_eq!(range.major % 12, 0);
            prop_assert_eq!(range.major % range.minor, 0);
        }

        let again = planner.ranges(control, min, max).expect("probe ranges");
        prop_assert_eq!(ranges, again);
    }

    #[test]
    fn month_fallback_always_covers(
        start_index in 20_000i32..30_000,
        span in 0i32..6_000,
    ) {
        let min = MonthNumber::new(start_index);
        let max = MonthNumber::new(start_index + span);
        let planner = RangePlanner::new(MonthDomain::new());

        let range = planner.range_at(10.0, 2, min, max).expect("probe or fallback");
        prop_assert!(range.start <= min);
        prop_assert!(range.end >= max);
        prop_assert!(range.minor >= 1);
    }
}
