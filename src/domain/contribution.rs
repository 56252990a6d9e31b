use chrono::{Datelike, Days, NaiveDate, Weekday};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A full year inclusive of today
pub const CALENDAR_DAYS: usize = 366;

const MAX_LEVEL: u8 = 4;

/// One calendar day of (possibly synthesized) activity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContributionDay {
    pub date: NaiveDate,
    pub count: u32,
    pub level: u8,
}

impl ContributionDay {
    pub fn new(date: NaiveDate, count: u32) -> Self {
        Self {
            date,
            count,
            level: level_for(count),
        }
    }
}

/// Heatmap intensity: `min(count / 2, 4)`
pub fn level_for(count: u32) -> u8 {
    (count / 2).min(MAX_LEVEL as u32) as u8
}

/// Which generation path produced a calendar
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CalendarSource {
    Events,
    Synthetic,
}

impl std::fmt::Display for CalendarSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CalendarSource::Events => write!(f, "events"),
            CalendarSource::Synthetic => write!(f, "synthetic"),
        }
    }
}

impl std::str::FromStr for CalendarSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "events" => Ok(CalendarSource::Events),
            "synthetic" => Ok(CalendarSource::Synthetic),
            other => Err(format!("unknown calendar source: {other}")),
        }
    }
}

/// The 366 dates ending at `today`, oldest first
pub fn calendar_dates(today: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    (0..CALENDAR_DAYS as u64)
        .rev()
        .filter_map(move |back| today.checked_sub_days(Days::new(back)))
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Fill the year from real activity, sprinkling small synthetic counts on
/// days without recorded events.
pub fn derive_calendar<R: Rng + ?Sized>(
    activity: &BTreeMap<NaiveDate, u32>,
    today: NaiveDate,
    rng: &mut R,
) -> Vec<ContributionDay> {
    calendar_dates(today)
        .map(|date| {
            let count = match activity.get(&date) {
                Some(&weight) if weight > 0 => weight,
                _ => sparse_count(date, rng),
            };
            ContributionDay::new(date, count)
        })
        .collect()
}

fn sparse_count<R: Rng + ?Sized>(date: NaiveDate, rng: &mut R) -> u32 {
    let chance = if is_weekend(date) { 0.2 } else { 0.4 };
    if rng.gen_bool(chance) {
        rng.gen_range(1..=3)
    } else {
        0
    }
}

/// Entirely synthetic year, used when no events could be fetched
pub fn synthetic_calendar<R: Rng + ?Sized>(today: NaiveDate, rng: &mut R) -> Vec<ContributionDay> {
    calendar_dates(today)
        .map(|date| {
            let chance = if is_weekend(date) { 0.3 } else { 0.6 };
            if !rng.gen_bool(chance) {
                return ContributionDay::new(date, 0);
            }
            let mut count = rng.gen_range(1..=6);
            // occasional burst on top of an active day
            if rng.gen_bool(0.1) {
                count += rng.gen_range(0..=8);
            }
            ContributionDay::new(date, count)
        })
        .collect()
}
