//! Contribution statistics for GitHub year-in-review reports.
//!
//! The core is [`stats`]: a pure function of a contribution calendar and
//! windowing options that yields a [`stats::YearlyStatistics`] record, plus the
//! repository and language rankings. Everything else builds on its output.

pub mod calendar;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod report;
pub mod stats;
pub mod summary;

pub use calendar::{CalendarDay, ContributionCalendar, ContributionLevel, ProfilePayload};
pub use config::Config;
pub use error::{RecapError, Result};
pub use stats::{derive_yearly_statistics, WindowOptions, YearlyStatistics};
