use super::{OutboundPolicy, RateLimitGuard};
use crate::domain::{
    CalendarSource, ContributionDay, ContributionStats, RepositorySummary, activity_by_date,
    derive_calendar, prepare_for_display, synthetic_calendar,
};
use crate::infrastructure::{ApiError, GitHubClient};
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use std::future::Future;
use thiserror::Error;

/// GitHub data could not be obtained. Distinct from an empty result.
#[derive(Debug, Error)]
pub enum Unavailable {
    #[error("GitHub calls are disabled in this environment")]
    Skipped,
    #[error("GitHub calls are cooling down after a throttling response")]
    CoolingDown,
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Contribution calendar plus its aggregates. Always usable.
#[derive(Debug, Clone, Serialize)]
pub struct ContributionReport {
    pub contributions: Vec<ContributionDay>,
    pub stats: ContributionStats,
    pub source: CalendarSource,
}

impl ContributionReport {
    pub fn new(contributions: Vec<ContributionDay>, today: NaiveDate, source: CalendarSource) -> Self {
        let stats = ContributionStats::from_calendar(&contributions, today);
        Self {
            contributions,
            stats,
            source,
        }
    }
}

/// Composes the GitHub client with the environment policy and the shared
/// cooldown guard.
pub struct Portfolio {
    client: GitHubClient,
    policy: OutboundPolicy,
    guard: RateLimitGuard,
}

impl Portfolio {
    pub fn new(client: GitHubClient, policy: OutboundPolicy) -> Self {
        Self::with_guard(client, policy, RateLimitGuard::default())
    }

    pub fn with_guard(client: GitHubClient, policy: OutboundPolicy, guard: RateLimitGuard) -> Self {
        Self {
            client,
            policy,
            guard,
        }
    }

    pub fn guard(&self) -> &RateLimitGuard {
        &self.guard
    }

    pub fn username(&self) -> &str {
        self.client.username()
    }

    /// Public, non-fork, non-archived repositories sorted by stars then recency
    pub async fn repositories(&self) -> Result<Vec<RepositorySummary>, Unavailable> {
        let repos = self.call(self.client.fetch_repositories()).await?;
        Ok(prepare_for_display(repos))
    }

    /// A 366-day calendar ending today. Falls back to synthetic data on any failure.
    pub async fn contributions(&self) -> ContributionReport {
        let today = Utc::now().date_naive();
        match self.call(self.client.fetch_public_events()).await {
            Ok(events) => {
                let activity = activity_by_date(&events);
                let days = derive_calendar(&activity, today, &mut rand::thread_rng());
                ContributionReport::new(days, today, CalendarSource::Events)
            }
            Err(reason) => {
                tracing::info!(%reason, "using synthetic contribution calendar");
                let days = synthetic_calendar(today, &mut rand::thread_rng());
                ContributionReport::new(days, today, CalendarSource::Synthetic)
            }
        }
    }

    /// Gate a request on policy and cooldown, arming the guard on throttling failures
    async fn call<T, F>(&self, request: F) -> Result<T, Unavailable>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        if self.policy.should_skip() {
            tracing::debug!(context = %self.policy.context, "skipping GitHub call");
            return Err(Unavailable::Skipped);
        }
        if self.guard.is_limited() {
            tracing::debug!("GitHub guard cooling, skipping call");
            return Err(Unavailable::CoolingDown);
        }

        request.await.map_err(|err| {
            if err.is_throttling() {
                tracing::warn!(error = %err, "GitHub call failed, arming cooldown");
                self.guard.arm();
            } else {
                tracing::warn!(error = %err, "GitHub call failed");
            }
            Unavailable::from(err)
        })
    }
}
