//! Candidate width sequences for the numeric and month domains.
//!
//! Generators here are pure: each call composes a fresh finite sequence from
//! immutable tables, so iteration is restartable and carries no cursor state.

use serde::{Deserialize, Serialize};

/// Ticks-per-decade multipliers used by the numeric domain.
///
/// In ascending order these produce minor widths of 5, 2.5, 2, 1.25 and 1
/// times a power of ten.
pub const TICKS_PER_DECADE: [u32; 5] = [2, 4, 5, 8, 10];

/// Traditional month-domain minor widths, before whole-year multiples.
pub const TRADITIONAL_MONTH_WIDTHS: [u32; 6] = [1, 2, 3, 6, 12, 18];

const LAST_TRADITIONAL_WIDTH: u32 = 18;

/// A prime factor of a minor-tick width and its multiplicity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorInfo {
    pub factor: u64,
    pub frequency: u32,
}

/// Prime factorization by trial division; month widths stay far below the
/// point where this matters.
pub(crate) fn prime_factors(value: u64) -> Vec<FactorInfo> {
    let mut remaining = value;
    let mut factors = Vec::new();
    let mut divisor = 2u64;
    while divisor.saturating_mul(divisor) <= remaining {
        if remaining % divisor == 0 {
            let mut frequency = 0u32;
            while remaining % divisor == 0 {
                remaining /= divisor;
                frequency += 1;
            }
            factors.push(FactorInfo {
                factor: divisor,
                frequency,
            });
        }
        divisor += 1;
    }
    if remaining > 1 {
        factors.push(FactorInfo {
            factor: remaining,
            frequency: 1,
        });
    }
    factors
}

fn force_factor(factors: &mut Vec<FactorInfo>, factor: u64, min_frequency: u32) {
    match factors.iter_mut().find(|info| info.factor == factor) {
        Some(info) => info.frequency = info.frequency.max(min_frequency),
        None => factors.push(FactorInfo {
            factor,
            frequency: min_frequency,
        }),
    }
}

/// Major-tick width for a month-domain minor width.
///
/// Forcing a factor of 2 (multiplicity >= 2) and of 3 makes the major both a
/// whole number of calendar years and a multiple of the minor. A major equal
/// to the minor is scaled by 5 to avoid a degenerate 1:1 grouping.
pub(crate) fn month_major_width(minor: u64) -> u64 {
    let mut factors = prime_factors(minor);
    force_factor(&mut factors, 2, 2);
    force_factor(&mut factors, 3, 1);

    let mut major = 1u64;
    for info in &factors {
        for _ in 0..info.frequency {
            major = major.saturating_mul(info.factor);
        }
    }

    if major == minor {
        minor.saturating_mul(5)
    } else {
        major
    }
}

/// Minor-width sequence for the month domain, in months.
///
/// The traditional list (or every integer up to its terminal value when
/// non-traditional widths are allowed) comes first, then whole-year multiples.
/// Generation stops once a candidate's derived major width exceeds the range's
/// month count; the first candidate is always produced so short ranges still
/// evaluate.
pub(crate) fn month_candidate_widths(
    traditional_only: bool,
    span_months: u64,
) -> impl Iterator<Item = u64> {
    let head: Box<dyn Iterator<Item = u64>> = if traditional_only {
        Box::new(TRADITIONAL_MONTH_WIDTHS.iter().map(|width| u64::from(*width)))
    } else {
        Box::new(1..=u64::from(LAST_TRADITIONAL_WIDTH))
    };

    head.chain((2u64..).map(|years| years.saturating_mul(12)))
        .enumerate()
        .take_while(move |(index, minor)| *index == 0 || month_major_width(*minor) <= span_months)
        .map(|(_, minor)| minor)
}

#[cfg(test)]
mod tests {
    use super::{month_candidate_widths, month_major_width, prime_factors};

    #[test]
    fn factors_multiply_back_to_the_input() {
        for value in [1u64, 2, 12, 18, 36, 60, 210] {
            let product: u64 = prime_factors(value)
                .iter()
                .map(|info| info.factor.pow(info.frequency))
                .product();
            assert_eq!(product, value.max(1));
        }
    }

    #[test]
    fn month_major_is_a_year_multiple_and_a_minor_multiple() {
        for minor in 1u64..=48 {
            let major = month_major_width(minor);
            assert_eq!(major % 12, 0, "minor {minor} produced major {major}");
            assert_eq!(major % minor, 0, "minor {minor} produced major {major}");
            assert!(major > minor, "minor {minor} produced degenerate major");
        }
    }

    #[test]
    fn month_major_scales_degenerate_groupings_by_five() {
        assert_eq!(month_major_width(12), 60);
        assert_eq!(month_major_width(24), 120);
        assert_eq!(month_major_width(18), 36);
    }

    #[test]
    fn traditional_widths_stop_at_the_range_month_count() {
        let widths: Vec<u64> = month_candidate_widths(true, 18).collect();
        assert_eq!(widths, vec![1, 2, 3, 6]);
    }

    #[test]
    fn year_multiples_follow_the_traditional_list() {
        let widths: Vec<u64> = month_candidate_widths(true, 400).collect();
        assert_eq!(widths, vec![1, 2, 3, 6, 12, 18, 24, 36, 48, 60, 72]);
    }

    #[test]
    fn short_ranges_still_produce_one_candidate() {
        let widths: Vec<u64> = month_candidate_widths(true, 1).collect();
        assert_eq!(widths, vec![1]);
    }

    #[test]
    fn non_traditional_widths_cover_every_integer() {
        let widths: Vec<u64> = month_candidate_widths(false, 100).collect();
        assert_eq!(widths[..5], [1, 2, 3, 4, 5]);
        assert!(widths.contains(&7));
        assert!(!widths.contains(&11), "major of 11 months exceeds the range");
    }
}
