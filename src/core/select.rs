use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::domain::{TickDomain, TickRange};
use crate::error::RangeResult;

/// Tie-break policy when several layouts reach the same coverage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TickSizePreference {
    /// Prefer the smallest tick pixel size, i.e. finer ticks.
    #[default]
    Smallest,
    /// Prefer the largest tick pixel size, i.e. coarser ticks.
    Largest,
}

/// Target tick counts for the margin-based selection policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickCountTarget {
    /// Preferred number of major ticks across the range.
    pub major_count: u32,
    /// Preferred number of minor ticks per major tick.
    pub minors_per_major: u32,
    /// Layouts with more major ticks than this are excluded.
    pub max_major_count: Option<u32>,
}

impl Default for TickCountTarget {
    fn default() -> Self {
        Self {
            major_count: 10,
            minors_per_major: 5,
            max_major_count: None,
        }
    }
}

/// Picks the layout whose coverage is closest to (but not above) the budget.
pub(crate) fn select_by_coverage<V, W>(
    ranges: &[TickRange<V, W>],
    preference: TickSizePreference,
) -> Option<&TickRange<V, W>> {
    ranges.iter().max_by_key(|range| {
        let tie = match preference {
            TickSizePreference::Smallest => -i64::from(range.tick_pixel_size),
            TickSizePreference::Largest => i64::from(range.tick_pixel_size),
        };
        (OrderedFloat(range.coverage), tie)
    })
}

/// Picks the layout closest to the target tick counts, breaking ties by the
/// unused margin around the input range.
pub(crate) fn select_by_target<'a, D: TickDomain>(
    domain: &D,
    min: D::Value,
    max: D::Value,
    ranges: &'a [TickRange<D::Value, D::Width>],
    target: TickCountTarget,
) -> RangeResult<Option<&'a TickRange<D::Value, D::Width>>> {
    let mut best: Option<(u64, OrderedFloat<f64>, &TickRange<D::Value, D::Width>)> = None;

    for range in ranges {
        let minors = domain.minor_tick_count(range.start, range.end, range.minor)?;
        let per_major = domain.width_ratio(range.major, range.minor)?.max(1);
        let majors = minors.div_ceil(per_major);

        if let Some(cap) = target.max_major_count {
            if majors > u64::from(cap) {
                continue;
            }
        }

        let count_penalty = majors.abs_diff(u64::from(target.major_count))
            + per_major.abs_diff(u64::from(target.minors_per_major));
        let margin = OrderedFloat(
            domain.span_between(range.start, min).abs() + domain.span_between(max, range.end).abs(),
        );

        let better = match &best {
            Some((penalty, best_margin, _)) => {
                (count_penalty, margin) < (*penalty, *best_margin)
            }
            None => true,
        };
        if better {
            best = Some((count_penalty, margin, range));
        }
    }

    Ok(best.map(|(_, _, range)| range))
}
