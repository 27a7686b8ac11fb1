use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

use crate::core::candidates::TICKS_PER_DECADE;
use crate::core::domain::{CandidateIter, DegenerateSpan, TickCandidate, TickDomain, TickRange};
use crate::error::{RangeError, RangeResult};

/// Numeric axis domain over exact decimal values.
///
/// The ticks-per-decade table is fixed at construction; two adapters with
/// different tables can coexist without shared state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericDomain {
    ticks_per_decade: Vec<u32>,
}

impl Default for NumericDomain {
    fn default() -> Self {
        Self {
            ticks_per_decade: TICKS_PER_DECADE.to_vec(),
        }
    }
}

impl NumericDomain {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a domain with a custom ticks-per-decade table.
    ///
    /// The table must be non-empty, strictly ascending, and confined to
    /// `1..=10` so every entry describes a grouping within one decade.
    pub fn with_ticks_per_decade(table: Vec<u32>) -> RangeResult<Self> {
        if table.is_empty() {
            return Err(RangeError::Configuration(
                "ticks-per-decade table must not be empty".to_owned(),
            ));
        }
        if !table.windows(2).all(|pair| pair[0] < pair[1]) {
            return Err(RangeError::Configuration(
                "ticks-per-decade table must be strictly ascending".to_owned(),
            ));
        }
        if table.iter().any(|value| !(1..=10).contains(value)) {
            return Err(RangeError::Configuration(
                "ticks-per-decade entries must be between 1 and 10".to_owned(),
            ));
        }
        Ok(Self {
            ticks_per_decade: table,
        })
    }

    #[must_use]
    pub fn ticks_per_decade(&self) -> &[u32] {
        &self.ticks_per_decade
    }
}

fn overflow(context: &str) -> RangeError {
    RangeError::Unrepresentable(context.to_owned())
}

/// `10^exponent` as an exact decimal.
pub(crate) fn pow10(exponent: i32) -> RangeResult<Decimal> {
    let mut value = Decimal::ONE;
    if exponent >= 0 {
        for _ in 0..exponent {
            value = value
                .checked_mul(Decimal::TEN)
                .ok_or_else(|| overflow("power of ten exceeds the decimal range"))?;
        }
    } else {
        for _ in 0..exponent.unsigned_abs() {
            value /= Decimal::TEN;
            if value.is_zero() {
                return Err(overflow("power of ten underflows the decimal range"));
            }
        }
    }
    Ok(value)
}

fn decimal_to_f64(value: Decimal, context: &str) -> RangeResult<f64> {
    value
        .to_f64()
        .ok_or_else(|| overflow(context))
}

/// Exponent `e` such that `value / 10^e` lies in `[1, 10)`.
fn decade_exponent(value: Decimal) -> RangeResult<i32> {
    let approx = decimal_to_f64(value, "tick width cannot be approximated")?;
    let mut exponent = approx.log10().floor() as i32;

    // The float estimate can be off by one near decade boundaries.
    for _ in 0..4 {
        let scale = pow10(exponent)?;
        let next = scale
            .checked_mul(Decimal::TEN)
            .ok_or_else(|| overflow("decade bound exceeds the decimal range"))?;
        if value < scale {
            exponent -= 1;
        } else if value >= next {
            exponent += 1;
        } else {
            return Ok(exponent);
        }
    }
    Err(overflow("tick width has no representable decade"))
}

impl TickDomain for NumericDomain {
    type Value = Decimal;
    type Width = Decimal;

    fn name(&self) -> &'static str {
        "numeric"
    }

    fn candidates(
        &self,
        min: Decimal,
        max: Decimal,
        tick_pixel_size: u32,
        control_size: f64,
    ) -> RangeResult<CandidateIter<Decimal>> {
        let span = max
            .checked_sub(min)
            .ok_or_else(|| overflow("range span exceeds the decimal range"))?;
        if span <= Decimal::ZERO {
            return Ok(Box::new(std::iter::empty()));
        }

        let control = Decimal::from_f64(control_size)
            .filter(|value| !value.is_zero())
            .ok_or_else(|| overflow("control size is not representable as a decimal"))?;
        let tick_value = span
            .checked_mul(Decimal::from(tick_pixel_size))
            .and_then(|scaled| scaled.checked_div(control))
            .ok_or_else(|| overflow("tick width exceeds the decimal range"))?;
        if tick_value <= Decimal::ZERO {
            return Err(overflow("tick width underflows the decimal range"));
        }

        let scale = pow10(decade_exponent(tick_value)?)?;
        let mut candidates = Vec::with_capacity(self.ticks_per_decade.len());
        for &ticks in &self.ticks_per_decade {
            let minor = (Decimal::TEN / Decimal::from(ticks))
                .checked_mul(scale)
                .ok_or_else(|| overflow("minor width exceeds the decimal range"))?;
            let major = minor
                .checked_mul(Decimal::from(ticks))
                .ok_or_else(|| overflow("major width exceeds the decimal range"))?;
            candidates.push(TickCandidate { minor, major });
        }
        Ok(Box::new(candidates.into_iter()))
    }

    fn round_down(&self, value: Decimal, minor: Decimal) -> RangeResult<Decimal> {
        value
            .checked_div(minor)
            .and_then(|quotient| quotient.floor().checked_mul(minor))
            .ok_or_else(|| overflow("rounded minimum exceeds the decimal range"))
    }

    fn round_up(&self, value: Decimal, minor: Decimal) -> RangeResult<Decimal> {
        value
            .checked_div(minor)
            .and_then(|quotient| quotient.ceil().checked_mul(minor))
            .ok_or_else(|| overflow("rounded maximum exceeds the decimal range"))
    }

    fn minor_tick_count(
        &self,
        start: Decimal,
        end: Decimal,
        minor: Decimal,
    ) -> RangeResult<u64> {
        end.checked_sub(start)
            .and_then(|span| span.checked_div(minor))
            .and_then(|ticks| ticks.round().to_u64())
            .ok_or_else(|| overflow("tick count exceeds the integer range"))
    }

    fn width_ratio(&self, outer: Decimal, inner: Decimal) -> RangeResult<u64> {
        outer
            .checked_div(inner)
            .and_then(|ratio| ratio.round().to_u64())
            .ok_or_else(|| overflow("width ratio exceeds the integer range"))
    }

    fn offset_ticks(&self, value: Decimal, minor: Decimal, ticks: i64) -> RangeResult<Decimal> {
        Decimal::from(ticks)
            .checked_mul(minor)
            .and_then(|delta| value.checked_add(delta))
            .ok_or_else(|| overflow("padded bound exceeds the decimal range"))
    }

    fn is_lattice_point(&self, value: Decimal, width: Decimal) -> bool {
        value
            .checked_div(width)
            .map(|quotient| quotient.fract().is_zero())
            .unwrap_or(false)
    }

    fn span_between(&self, from: Decimal, to: Decimal) -> f64 {
        to.checked_sub(from)
            .and_then(|span| span.to_f64())
            .unwrap_or(f64::INFINITY)
    }

    fn degenerate_span(&self, value: Decimal) -> DegenerateSpan<Decimal> {
        match value.checked_sub(Decimal::ONE) {
            Some(widened) => DegenerateSpan::WidenBelow(widened),
            None => DegenerateSpan::KeepCollapsed,
        }
    }

    fn pads_trailing_budget(&self) -> bool {
        true
    }

    fn fallback_range(
        &self,
        min: Decimal,
        max: Decimal,
        tick_pixel_size: u32,
        control_size: f64,
    ) -> RangeResult<TickRange<Decimal, Decimal>> {
        let span = max
            .checked_sub(min)
            .ok_or_else(|| overflow("range span exceeds the decimal range"))?;
        if span <= Decimal::ZERO {
            return Err(overflow("fallback range requires a non-zero span"));
        }

        let magnitude = decimal_to_f64(span, "range span cannot be approximated")?
            .log10()
            .floor() as i32;
        let major = pow10(magnitude - 1)?;
        let minor = pow10(magnitude - 2)?;
        let start = self.round_down(min, minor)?;
        let end = self.round_up(max, minor)?;
        let ticks = self.minor_tick_count(start, end, minor)?;
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
    use super::{NumericDomain, decade_exponent, pow10};
    use crate::core::domain::{TickCandidate, TickDomain};
    use rust_decimal::Decimal;

    fn dec(value: &str) -> Decimal {
        value.parse().expect("valid decimal literal")
    }

    #[test]
    fn decade_exponent_brackets_the_value() {
        assert_eq!(decade_exponent(dec("69.15")).expect("exponent"), 1);
        assert_eq!(decade_exponent(dec("1")).expect("exponent"), 0);
        assert_eq!(decade_exponent(dec("0.02")).expect("exponent"), -2);
        assert_eq!(decade_exponent(dec("9.999")).expect("exponent"), 0);
        assert_eq!(decade_exponent(dec("10")).expect("exponent"), 1);
    }

    #[test]
    fn candidates_scale_the_multiplier_table_by_the_tick_decade() {
        let domain = NumericDomain::new();
        let candidates: Vec<TickCandidate<Decimal>> = domain
            .candidates(dec("-76"), dec("1307"), 5, 100.0)
            .expect("candidates")
            .collect();

        let minors: Vec<Decimal> = candidates.iter().map(|c| c.minor).collect();
        assert_eq!(
            minors,
            vec![dec("50"), dec("25"), dec("20"), dec("12.5"), dec("10")]
        );
        assert!(candidates.iter().all(|c| c.major == dec("100")));
    }

    #[test]
    fn candidate_generation_is_restartable() {
        let domain = NumericDomain::new();
        let first: Vec<_> = domain
            .candidates(dec("0"), dec("10"), 2, 100.0)
            .expect("candidates")
            .collect();
        let second: Vec<_> = domain
            .candidates(dec("0"), dec("10"), 2, 100.0)
            .expect("candidates")
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn rounding_covers_negative_values() {
        let domain = NumericDomain::new();
        assert_eq!(
            domain.round_down(dec("-76"), dec("10")).expect("round"),
            dec("-80")
        );
        assert_eq!(
            domain.round_up(dec("1307"), dec("10")).expect("round"),
            dec("1310")
        );
    }

    #[test]
    fn custom_tables_are_validated() {
        assert!(NumericDomain::with_ticks_per_decade(vec![]).is_err());
        assert!(NumericDomain::with_ticks_per_decade(vec![5, 2]).is_err());
        assert!(NumericDomain::with_ticks_per_decade(vec![2, 20]).is_err());
        assert!(NumericDomain::with_ticks_per_decade(vec![2, 5, 10]).is_ok());
    }

    #[test]
    fn pow10_round_trips_positive_and_negative_exponents() {
        assert_eq!(pow10(3).expect("pow"), dec("1000"));
        assert_eq!(pow10(-2).expect("pow"), dec("0.01"));
    }
}
