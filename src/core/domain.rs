use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RangeResult;

/// One "nice" minor-tick width, paired with the major-tick width it groups into.
///
/// The major grouping is resolved when the candidate is generated: numeric
/// candidates group `ticksPerDecade` minors into one decade, month candidates
/// derive a whole-year multiple of the minor width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickCandidate<W> {
    pub minor: W,
    pub major: W,
}

/// Lazy candidate sequence produced by a domain adapter.
///
/// A fresh iterator is built per evaluation, so candidate generation is
/// restartable and carries no cursor state between calls.
pub type CandidateIter<W> = Box<dyn Iterator<Item = TickCandidate<W>>>;

/// A computed axis tick layout for one probed tick pixel width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickRange<V, W> {
    /// Pixel width assumed for one minor tick during evaluation.
    pub tick_pixel_size: u32,
    /// Minor-tick width in domain units.
    pub minor: W,
    /// Major-tick width in domain units, a whole multiple of `minor`.
    pub major: W,
    /// First tick value; never above the input minimum.
    pub start: V,
    /// Last tick value; never below the input maximum.
    pub end: V,
    /// Fraction of the control size consumed by the minor ticks.
    pub coverage: f64,
}

/// A single tick position enumerated from a [`TickRange`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickMark<V> {
    pub value: V,
    pub is_major: bool,
}

/// How a domain treats a zero-width input range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DegenerateSpan<V> {
    /// Lower the minimum so the range regains one unit of width.
    WidenBelow(V),
    /// Keep the collapsed bounds and size ticks as if the range were one unit wide.
    KeepCollapsed,
}

/// Domain arithmetic behind the generic evaluator and selectors.
///
/// `Value` is a position on the axis, `Width` a tick spacing. The two differ
/// in the month domain, where positions are month numbers and spacings are
/// month counts.
pub trait TickDomain {
    type Value: Copy + PartialEq + PartialOrd + fmt::Debug;
    type Width: Copy + PartialEq + fmt::Debug;

    /// Short domain name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Scaled minor/major candidate widths for one probe, in generation order.
    fn candidates(
        &self,
        min: Self::Value,
        max: Self::Value,
        tick_pixel_size: u32,
        control_size: f64,
    ) -> RangeResult<CandidateIter<Self::Width>>;

    /// Rounds `value` toward negative infinity onto the `minor` lattice.
    fn round_down(&self, value: Self::Value, minor: Self::Width) -> RangeResult<Self::Value>;

    /// Rounds `value` toward positive infinity onto the `minor` lattice.
    fn round_up(&self, value: Self::Value, minor: Self::Width) -> RangeResult<Self::Value>;

    /// Number of minor ticks between two lattice points.
    fn minor_tick_count(
        &self,
        start: Self::Value,
        end: Self::Value,
        minor: Self::Width,
    ) -> RangeResult<u64>;

    /// How many `inner` widths make up one `outer` width.
    fn width_ratio(&self, outer: Self::Width, inner: Self::Width) -> RangeResult<u64>;

    /// Moves a lattice point by a whole number of minor ticks.
    fn offset_ticks(
        &self,
        value: Self::Value,
        minor: Self::Width,
        ticks: i64,
    ) -> RangeResult<Self::Value>;

    /// Whether `value` sits on the `width` lattice anchored at the domain origin.
    fn is_lattice_point(&self, value: Self::Value, width: Self::Width) -> bool;

    /// Signed distance from `from` to `to` in domain units, as `f64`.
    fn span_between(&self, from: Self::Value, to: Self::Value) -> f64;

    /// Policy for zero-width input ranges.
    fn degenerate_span(&self, value: Self::Value) -> DegenerateSpan<Self::Value>;

    /// Whether surplus tick budget is distributed as padding around the range.
    fn pads_trailing_budget(&self) -> bool {
        false
    }

    /// Default range used when no candidate fits the budget of a single probe.
    ///
    /// The fallback always covers the input range but is not guaranteed to
    /// respect the control-size budget.
    fn fallback_range(
        &self,
        min: Self::Value,
        max: Self::Value,
        tick_pixel_size: u32,
        control_size: f64,
    ) -> RangeResult<TickRange<Self::Value, Self::Width>>;
}
