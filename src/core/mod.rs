pub mod candidates;
pub mod domain;
pub mod evaluate;
pub mod month;
pub mod numeric;
pub mod select;

pub use candidates::{FactorInfo, TICKS_PER_DECADE, TRADITIONAL_MONTH_WIDTHS};
pub use domain::{CandidateIter, DegenerateSpan, TickCandidate, TickDomain, TickMark, TickRange};
pub use month::{MonthDomain, MonthNumber};
pub use numeric::NumericDomain;
pub use select::{TickCountTarget, TickSizePreference};
