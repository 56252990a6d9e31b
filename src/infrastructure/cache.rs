use crate::domain::{CalendarSource, ContributionDay, RepositorySummary};
use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::{Path, PathBuf};

const REFRESHED_AT: &str = "refreshed_at";
const CALENDAR_SOURCE: &str = "calendar_source";

/// Cache file location following XDG base directory specification
pub fn cache_path() -> Result<PathBuf> {
    let base_dir = dirs::config_dir()
        .context("Could not determine config directory")?;

    let cache_dir = base_dir.join("folio");
    std::fs::create_dir_all(&cache_dir)
        .context("Failed to create cache directory")?;

    Ok(cache_dir.join("cache.db"))
}

/// SQLite snapshot of the last successful refresh
pub struct Cache {
    conn: Connection,
    path: PathBuf,
}

impl Cache {
    /// Open or create the cache database at the default location
    pub fn open() -> Result<Self> {
        Self::open_at(&cache_path()?)
    }

    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open cache at {:?}", path))?;

        let cache = Self {
            conn,
            path: path.to_path_buf(),
        };
        cache.init_schema()?;
        Ok(cache)
    }

    fn init_schema(&self) -> Result<()> {
        // PRAGMA journal_mode returns a row
        let exec = |sql: &str| -> Result<()> {
            match self.conn.execute(sql, []) {
                Ok(_) => Ok(()),
                Err(rusqlite::Error::ExecuteReturnedResults) => Ok(()),
                Err(e) => Err(e.into()),
            }
        };

        exec("PRAGMA journal_mode = WAL")?;
        exec("PRAGMA synchronous = NORMAL")?;
        exec("CREATE TABLE IF NOT EXISTS metadata (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )")?;

        exec("CREATE TABLE IF NOT EXISTS repositories (
                id INTEGER PRIMARY KEY,
                position INTEGER NOT NULL,
                full_name TEXT NOT NULL,
                body TEXT NOT NULL
            )")?;

        exec("CREATE TABLE IF NOT EXISTS contributions (
                date TEXT PRIMARY KEY,
                count INTEGER NOT NULL,
                level INTEGER NOT NULL
            )")?;

        exec("CREATE INDEX IF NOT EXISTS idx_repositories_position ON repositories(position)")?;

        Ok(())
    }

    /// Clear all data from the cache
    pub fn clear(&self) -> Result<()> {
        self.conn.execute("DELETE FROM repositories", [])?;
        self.conn.execute("DELETE FROM contributions", [])?;
        self.conn.execute("DELETE FROM metadata", [])?;
        Ok(())
    }

    /// Get cache statistics
    pub fn stats(&self) -> Result<CacheStats> {
        let repo_count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM repositories",
            [],
            |row| row.get(0),
        )?;

        let day_count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM contributions",
            [],
            |row| row.get(0),
        )?;

        let size_bytes = std::fs::metadata(&self.path)?.len();

        Ok(CacheStats {
            repo_count,
            day_count,
            size_bytes,
            refreshed_at: self.refreshed_at()?,
        })
    }

    /// Replace the stored repository list, keeping display order
    pub fn store_repositories(&self, repos: &[RepositorySummary]) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM repositories", [])?;

        for (position, repo) in repos.iter().enumerate() {
            let body = serde_json::to_string(repo)
                .with_context(|| format!("Failed to serialize {}", repo.full_name))?;
            tx.execute(
                "INSERT INTO repositories (id, position, full_name, body) VALUES (?1, ?2, ?3, ?4)",
                params![repo.id as i64, position as i64, &repo.full_name, body],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    /// Replace the stored calendar and record where it came from
    pub fn store_contributions(&self, days: &[ContributionDay], source: CalendarSource) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM contributions", [])?;

        for day in days {
            tx.execute(
                "INSERT INTO contributions (date, count, level) VALUES (?1, ?2, ?3)",
                params![day.date.to_string(), day.count, day.level],
            )?;
        }
        tx.execute(
            "INSERT OR REPLACE INTO metadata (key, value) VALUES (?1, ?2)",
            params![CALENDAR_SOURCE, source.to_string()],
        )?;

        tx.commit()?;
        Ok(())
    }

    pub fn mark_refreshed(&self, at: DateTime<Utc>) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO metadata (key, value) VALUES (?1, ?2)",
            params![REFRESHED_AT, at.to_rfc3339()],
        )?;
        Ok(())
    }

    pub fn refreshed_at(&self) -> Result<Option<DateTime<Utc>>> {
        Ok(self
            .metadata(REFRESHED_AT)?
            .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
            .map(|dt| dt.with_timezone(&Utc)))
    }

    pub fn calendar_source(&self) -> Result<Option<CalendarSource>> {
        Ok(self
            .metadata(CALENDAR_SOURCE)?
            .and_then(|s| s.parse().ok()))
    }

    fn metadata(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .conn
            .query_row("SELECT value FROM metadata WHERE key = ?1", [key], |row| row.get(0))
            .optional()?)
    }

    /// Load repositories in the order they were stored
    pub fn load_repositories(&self) -> Result<Vec<RepositorySummary>> {
        let mut stmt = self.conn.prepare(
            "SELECT body FROM repositories ORDER BY position"
        )?;

        let repos = stmt.query_map([], |row| {
            let body: String = row.get(0)?;
            serde_json::from_str(&body)
                .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)))
        })?
        .collect::<Result<Vec<_>, _>>()?;

        Ok(repos)
    }

    /// Load the stored calendar, oldest day first
    pub fn load_contributions(&self) -> Result<Vec<ContributionDay>> {
        let mut stmt = self.conn.prepare(
            "SELECT date, count, level FROM contributions ORDER BY date"
        )?;

        let days = stmt.query_map([], |row| {
            let date: String = row.get(0)?;
            let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)))?;
            Ok(ContributionDay {
                date,
                count: row.get(1)?,
                level: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

        Ok(days)
    }
}

#[derive(Debug)]
pub struct CacheStats {
    pub repo_count: i64,
    pub day_count: i64,
    pub size_bytes: u64,
    pub refreshed_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repo::tests::repo;
    use chrono::{Days, TimeZone};

    fn open_temp() -> (tempfile::TempDir, Cache) {
        let dir = tempfile::tempdir().unwrap();
        let cache = Cache::open_at(&dir.path().join("cache.db")).unwrap();
        (dir, cache)
    }

    #[test]
    fn test_repositories_keep_order() {
        let (_dir, cache) = open_temp();
        let repos = vec![repo(9, 10, 1), repo(2, 5, 2), repo(5, 1, 3)];
        cache.store_repositories(&repos).unwrap();
        assert_eq!(cache.load_repositories().unwrap(), repos);

        cache.store_repositories(&repos[..1]).unwrap();
        assert_eq!(cache.load_repositories().unwrap().len(), 1);
    }

    #[test]
    fn test_contributions_and_metadata() {
        let (_dir, cache) = open_temp();
        let today = NaiveDate::from_ymd_opt(2025, 2, 10).unwrap();
        let days: Vec<ContributionDay> = (0..5u64)
            .rev()
            .map(|back| ContributionDay::new(today - Days::new(back), back as u32 * 3))
            .collect();

        cache.store_contributions(&days, CalendarSource::Events).unwrap();
        let at = Utc.with_ymd_and_hms(2025, 2, 10, 8, 30, 0).unwrap();
        cache.mark_refreshed(at).unwrap();

        assert_eq!(cache.load_contributions().unwrap(), days);
        assert_eq!(cache.calendar_source().unwrap(), Some(CalendarSource::Events));
        assert_eq!(cache.refreshed_at().unwrap(), Some(at));

        let stats = cache.stats().unwrap();
        assert_eq!(stats.day_count, 5);
        assert_eq!(stats.repo_count, 0);
    }

    #[test]
    fn test_clear() {
        let (_dir, cache) = open_temp();
        cache.store_repositories(&[repo(1, 1, 1)]).unwrap();
        cache.mark_refreshed(Utc::now()).unwrap();
        cache.clear().unwrap();

        assert!(cache.load_repositories().unwrap().is_empty());
        assert_eq!(cache.refreshed_at().unwrap(), None);
        assert_eq!(cache.calendar_source().unwrap(), None);
    }
}
