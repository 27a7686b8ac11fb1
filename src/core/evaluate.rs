use tracing::warn;

use crate::core::domain::{DegenerateSpan, TickDomain, TickRange};
use crate::error::RangeResult;

pub(crate) const DEFAULT_CONTROL_SIZE: f64 = 100.0;
pub(crate) const DEFAULT_TICK_PIXEL_SIZE: u32 = 2;
pub(crate) const COVERAGE_EPSILON: f64 = 1e-9;

/// Input bounds after correction; rounding and candidate sizing both read
/// from here.
#[derive(Debug, Clone, Copy)]
pub(crate) struct EvaluationInput<V> {
    pub control_size: f64,
    pub min: V,
    pub max: V,
}

/// Applies the silent-correction policy: non-positive control sizes default,
/// reversed bounds swap, zero-width ranges widen by one unit. Every
/// correction is logged at warning level and processing continues.
pub(crate) fn normalize_input<D: TickDomain>(
    domain: &D,
    control_size: f64,
    min: D::Value,
    max: D::Value,
) -> EvaluationInput<D::Value> {
    let control_size = if control_size.is_finite() && control_size > 0.0 {
        control_size
    } else {
        warn!(
            domain = domain.name(),
            control_size, "control size is not positive; defaulting to 100"
        );
        DEFAULT_CONTROL_SIZE
    };

    let (mut min, max) = if max < min {
        warn!(
            domain = domain.name(),
            "minimum exceeds maximum; swapping bounds"
        );
        (max, min)
    } else {
        (min, max)
    };

    if min == max {
        match domain.degenerate_span(min) {
            DegenerateSpan::WidenBelow(widened) => {
                warn!(
                    domain = domain.name(),
                    "zero-width range; widening the minimum by one unit"
                );
                min = widened;
            }
            DegenerateSpan::KeepCollapsed => {
                warn!(
                    domain = domain.name(),
                    "zero-width range; sizing ticks for a single unit"
                );
            }
        }
    }

    EvaluationInput {
        control_size,
        min,
        max,
    }
}

pub(crate) fn normalize_tick_pixel_size(tick_pixel_size: u32) -> u32 {
    if tick_pixel_size == 0 {
        warn!("tick pixel size is zero; defaulting to 2");
        DEFAULT_TICK_PIXEL_SIZE
    } else {
        tick_pixel_size
    }
}

/// Evaluates every candidate for one tick pixel width and keeps the best fit.
///
/// Candidates are scored in generation order; one is kept only when it fits
/// the budget and strictly improves on the coverage seen so far, and the
/// search stops early on an exact fit. Returns `None` when every candidate
/// overflows the control size.
pub(crate) fn evaluate_probe<D: TickDomain>(
    domain: &D,
    input: &EvaluationInput<D::Value>,
    tick_pixel_size: u32,
) -> RangeResult<Option<TickRange<D::Value, D::Width>>> {
    let mut best: Option<TickRange<D::Value, D::Width>> = None;

    for candidate in domain.candidates(input.min, input.max, tick_pixel_size, input.control_size)? {
        let start = domain.round_down(input.min, candidate.minor)?;
        let end = domain.round_up(input.max, candidate.minor)?;
        let ticks = domain.minor_tick_count(start, end, candidate.minor)?.max(1);
        let coverage =
            (ticks as f64) * f64::from(tick_pixel_size) / input.control_size;

        if coverage > 1.0 + COVERAGE_EPSILON {
            continue;
        }
        if let Some(current) = &best {
            if coverage <= current.coverage {
                continue;
            }
        }

        let exact_fit = (coverage - 1.0).abs() <= COVERAGE_EPSILON;
        best = Some(TickRange {
            tick_pixel_size,
            minor: candidate.minor,
            major: candidate.major,
            start,
            end,
            coverage,
        });
        if exact_fit {
            break;
        }
    }

    let Some(mut range) = best else {
        return Ok(None);
    };
    if domain.pads_trailing_budget() {
        apply_surplus_padding(domain, input, &mut range)?;
    }
    Ok(Some(range))
}

/// Distributes the unused whole-tick budget around the rounded range, floor
/// on the low end and ceiling on the high end.
fn apply_surplus_padding<D: TickDomain>(
    domain: &D,
    input: &EvaluationInput<D::Value>,
    range: &mut TickRange<D::Value, D::Width>,
) -> RangeResult<()> {
    let budget = (input.control_size / f64::from(range.tick_pixel_size)).floor();
    if !budget.is_finite() || budget <= 0.0 {
        return Ok(());
    }

    let ticks = domain.minor_tick_count(range.start, range.end, range.minor)? as i64;
    let surplus = budget as i64 - ticks;
    if surplus <= 0 {
        return Ok(());
    }

    let pad_low = surplus / 2;
    let pad_high = surplus - pad_low;
    range.start = domain.offset_ticks(range.start, range.minor, -pad_low)?;
    range.end = domain.offset_ticks(range.end, range.minor, pad_high)?;
    Ok(())
}
