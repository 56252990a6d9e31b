pub mod activity;
pub mod contribution;
pub mod repo;
pub mod stats;

pub use activity::{EventKind, RawActivityEvent, activity_by_date};
pub use contribution::{CALENDAR_DAYS, CalendarSource, ContributionDay, derive_calendar, synthetic_calendar};
pub use repo::{RepositorySummary, prepare_for_display};
pub use stats::ContributionStats;
