use super::Portfolio;
use crate::domain::CalendarSource;
use crate::infrastructure::Cache;
use anyhow::Result;
use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};

/// Refresh the snapshot: repositories when available, the calendar always
pub async fn refresh_cache(portfolio: &Portfolio, cache: &Cache, quiet: bool) -> Result<RefreshResult> {
    let spinner = if !quiet {
        let pb = ProgressBar::new(3);
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb.set_style(
            ProgressStyle::default_spinner()
                .tick_strings(&["◐", "◓", "◑", "◒"])
                .template("{spinner:.cyan.bold} {msg:.dim}")?,
        );
        pb.set_message(format!("📦 Fetching repositories for {}...", portfolio.username()));
        Some(pb)
    } else {
        None
    };

    let repos_fetched = match portfolio.repositories().await {
        Ok(repos) => {
            cache.store_repositories(&repos)?;
            Some(repos.len())
        }
        Err(reason) => {
            tracing::info!(%reason, "keeping cached repositories");
            None
        }
    };
    if let Some(ref pb) = spinner {
        pb.inc(1);
        pb.set_message("📅 Building contribution calendar...");
    }

    let report = portfolio.contributions().await;
    cache.store_contributions(&report.contributions, report.source)?;
    if let Some(ref pb) = spinner {
        pb.inc(1);
        pb.set_message("💾 Writing to cache...");
    }

    cache.mark_refreshed(Utc::now())?;

    let result = RefreshResult {
        repos_fetched,
        days_stored: report.contributions.len(),
        total_contributions: report.stats.total_contributions,
        source: report.source,
    };
    tracing::info!(?result, "snapshot refreshed");

    if let Some(pb) = spinner {
        pb.inc(1);
        pb.finish_with_message(format!("✅ {}", result));
    }

    Ok(result)
}

#[derive(Debug)]
pub struct RefreshResult {
    /// `None` when GitHub was unavailable and the cached list was kept
    pub repos_fetched: Option<usize>,
    pub days_stored: usize,
    pub total_contributions: u32,
    pub source: CalendarSource,
}

impl std::fmt::Display for RefreshResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.repos_fetched {
            Some(count) => write!(f, "Fetched {} repo(s)", count)?,
            None => write!(f, "Repositories unavailable, kept cached list")?,
        }
        write!(
            f,
            "; stored {} day(s) with {} contribution(s) from {}",
            self.days_stored, self.total_contributions, self.source
        )
    }
}
