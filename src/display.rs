//! Plain-text rendering for the CLI.

use crate::domain::{ContributionDay, ContributionStats, RepositorySummary};
use chrono::Datelike;

const LEVEL_GLYPHS: [char; 5] = ['·', '░', '▒', '▓', '█'];
const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// One line per repository: stars, forks, name, language, description
pub fn repository_table(repos: &[RepositorySummary]) -> String {
    let width = repos.iter().map(|r| r.full_name.len()).max().unwrap_or(0);
    repos
        .iter()
        .map(|repo| {
            let mut line = format!(
                "★ {:>5}  ⑂ {:>4}  {:<width$}  {}",
                repo.stargazers_count,
                repo.forks_count,
                repo.full_name,
                repo.language.as_deref().unwrap_or("-"),
            );
            if let Some(description) = repo.description.as_deref().filter(|d| !d.is_empty()) {
                line.push_str("  ");
                line.push_str(description);
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// GitHub-style grid: a row per weekday, a column per week, oldest on the left
pub fn heatmap(days: &[ContributionDay]) -> String {
    let Some(first) = days.first() else {
        return String::new();
    };
    let lead = first.date.weekday().num_days_from_sunday() as usize;
    let weeks = (lead + days.len()).div_ceil(7);

    let mut grid = vec![vec![' '; weeks]; 7];
    for (offset, day) in days.iter().enumerate() {
        let slot = lead + offset;
        grid[slot % 7][slot / 7] = LEVEL_GLYPHS[day.level.min(4) as usize];
    }

    grid.iter()
        .zip(WEEKDAY_LABELS)
        .map(|(row, label)| format!("{label} {}", row.iter().collect::<String>().trim_end()))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn stats_summary(stats: &ContributionStats) -> String {
    format!(
        "Total: {}  Current streak: {}d  Longest streak: {}d  This week: {}  This month: {}",
        stats.total_contributions,
        stats.current_streak,
        stats.longest_streak,
        stats.this_week,
        stats.this_month
    )
}
