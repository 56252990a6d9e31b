//! GitHub activity pipeline behind a personal portfolio site.
//!
//! Lists the owner's public repositories and derives a one-year contribution
//! calendar from recent public events. Outbound calls are gated by an
//! environment policy and a cooldown guard, so callers always get either data,
//! an explicit [`Unavailable`] marker, or a synthetic calendar.

pub mod application;
pub mod config;
pub mod display;
pub mod domain;
pub mod infrastructure;

pub use application::{
    ContributionReport, OutboundPolicy, Portfolio, RateLimitGuard, Unavailable,
};
pub use domain::{
    CalendarSource, ContributionDay, ContributionStats, RawActivityEvent, RepositorySummary,
};
