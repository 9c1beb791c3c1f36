//! Pay-period scheduling logic.
//!
//! This module turns raw department day lists into validated templates,
//! instantiates templates against real calendar months, and labels the
//! resulting periods relative to today: day-list parsing, start/end
//! pairing across month boundaries, payout-day resolution with the
//! "1 = last day" sentinel, month-length clamping, year rollover, and
//! current-period selection.

mod day_pattern;
mod instantiate;
mod relevance;
mod template_resolver;

pub use day_pattern::parse_day_list;
pub use instantiate::{instantiate_cycle, instantiate_period, last_day_of_month};
pub use relevance::{classify, select_current, CurrentSelection, Relevance};
pub use template_resolver::{resolve_templates, ResolvedTemplates};
