use smallvec::SmallVec;
use tracing::{error, warn};

use crate::core::domain::{TickDomain, TickMark, TickRange};
use crate::core::evaluate::{
    EvaluationInput, evaluate_probe, normalize_input, normalize_tick_pixel_size,
};
use crate::core::select::{TickCountTarget, TickSizePreference, select_by_coverage, select_by_target};
use crate::error::{RangeError, RangeResult};

/// Smallest tick pixel width probed by the multi-probe operations.
pub const MIN_TICK_PIXEL_PROBE: u32 = 2;
/// Largest tick pixel width probed by the multi-probe operations.
pub const MAX_TICK_PIXEL_PROBE: u32 = 10;

/// Plans nice tick ranges for one axis domain.
///
/// The planner holds only immutable configuration; every operation is a pure
/// function of its arguments, so one planner can serve concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct RangePlanner<D: TickDomain> {
    domain: D,
    preference: TickSizePreference,
}

impl<D: TickDomain> RangePlanner<D> {
    #[must_use]
    pub fn new(domain: D) -> Self {
        Self {
            domain,
            preference: TickSizePreference::default(),
        }
    }

    #[must_use]
    pub fn with_preference(mut self, preference: TickSizePreference) -> Self {
        self.preference = preference;
        self
    }

    #[must_use]
    pub fn domain(&self) -> &D {
        &self.domain
    }

    /// Evaluates a single tick pixel width.
    ///
    /// When every candidate overflows the control size this falls back to the
    /// domain's default range, which covers the input but may exceed the
    /// budget.
    pub fn range_at(
        &self,
        control_size: f64,
        tick_pixel_size: u32,
        min: D::Value,
        max: D::Value,
    ) -> RangeResult<TickRange<D::Value, D::Width>> {
        let tick_pixel_size = normalize_tick_pixel_size(tick_pixel_size);
        let input = normalize_input(&self.domain, control_size, min, max);
        match evaluate_probe(&self.domain, &input, tick_pixel_size)? {
            Some(range) => Ok(range),
            None => {
                warn!(
                    domain = self.domain.name(),
                    tick_pixel_size,
                    control_size = input.control_size,
                    "no tick candidate fits; using the domain fallback range"
                );
                self.domain
                    .fallback_range(input.min, input.max, tick_pixel_size, input.control_size)
            }
        }
    }

    /// Evaluates every probed tick pixel width in `[2, 10]`.
    ///
    /// Returns up to nine accepted layouts and an empty vector when nothing
    /// fits anywhere. Probes that settle on an identical layout are collapsed
    /// into the highest-coverage representative.
    pub fn ranges(
        &self,
        control_size: f64,
        min: D::Value,
        max: D::Value,
    ) -> RangeResult<Vec<TickRange<D::Value, D::Width>>> {
        let input = normalize_input(&self.domain, control_size, min, max);
        Ok(self.probe_all(&input)?.into_vec())
    }

    /// Coverage-based selection across every probed tick pixel width.
    pub fn range(
        &self,
        control_size: f64,
        min: D::Value,
        max: D::Value,
    ) -> RangeResult<TickRange<D::Value, D::Width>> {
        let input = normalize_input(&self.domain, control_size, min, max);
        let probes = self.probe_all(&input)?;
        match select_by_coverage(&probes, self.preference) {
            Some(range) => Ok(*range),
            None => {
                error!(
                    domain = self.domain.name(),
                    control_size = input.control_size,
                    "no tick candidate fits the control size"
                );
                Err(RangeError::NoFeasibleRange {
                    control_size: input.control_size,
                })
            }
        }
    }

    /// Target-count selection across every probed tick pixel width.
    pub fn range_targeting(
        &self,
        control_size: f64,
        min: D::Value,
        max: D::Value,
        target: TickCountTarget,
    ) -> RangeResult<TickRange<D::Value, D::Width>> {
        let input = normalize_input(&self.domain, control_size, min, max);
        let probes = self.probe_all(&input)?;
        match select_by_target(&self.domain, input.min, input.max, &probes, target)? {
            Some(range) => Ok(*range),
            None => {
                error!(
                    domain = self.domain.name(),
                    control_size = input.control_size,
                    "no tick candidate satisfies the target tick counts"
                );
                Err(RangeError::NoFeasibleRange {
                    control_size: input.control_size,
                })
            }
        }
    }

    /// Enumerates the concrete tick positions of a computed range.
    pub fn tick_positions(
        &self,
        range: &TickRange<D::Value, D::Width>,
    ) -> RangeResult<Vec<TickMark<D::Value>>> {
        let count = self
            .domain
            .minor_tick_count(range.start, range.end, range.minor)?;
        let mut marks = Vec::with_capacity(count as usize + 1);
        for step in 0..=count {
            let value = self
                .domain
                .offset_ticks(range.start, range.minor, step as i64)?;
            marks.push(TickMark {
                value,
                is_major: self.domain.is_lattice_point(value, range.major),
            });
        }
        Ok(marks)
    }

    fn probe_all(
        &self,
        input: &EvaluationInput<D::Value>,
    ) -> RangeResult<SmallVec<[TickRange<D::Value, D::Width>; 9]>> {
        let mut probes: SmallVec<[TickRange<D::Value, D::Width>; 9]> = SmallVec::new();
        for tick_pixel_size in MIN_TICK_PIXEL_PROBE..=MAX_TICK_PIXEL_PROBE {
            let Some(range) = evaluate_probe(&self.domain, input, tick_pixel_size)? else {
                continue;
            };
            match probes.iter_mut().find(|existing| {
                existing.minor == range.minor
                    && existing.major == range.major
                    && existing.start == range.start
                    && existing.end == range.end
            }) {
                Some(existing) => {
                    if range.coverage > existing.coverage {
                        *existing = range;
                    }
                }
                None => probes.push(range),
            }
        }
        Ok(probes)
    }
}
