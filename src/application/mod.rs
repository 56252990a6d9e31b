pub mod data_refresh;
pub mod policy;
pub mod portfolio;
pub mod rate_limit;

pub use data_refresh::{RefreshResult, refresh_cache};
pub use policy::OutboundPolicy;
pub use portfolio::{ContributionReport, Portfolio, Unavailable};
pub use rate_limit::RateLimitGuard;
