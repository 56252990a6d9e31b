use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use serde::de::IgnoredAny;
use std::collections::BTreeMap;

/// Upstream event type tag. Anything we don't weight specially lands in `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum EventKind {
    #[serde(rename = "PushEvent")]
    Push,
    #[serde(rename = "CreateEvent")]
    Create,
    #[serde(rename = "ReleaseEvent")]
    Release,
    #[serde(rename = "PullRequestEvent")]
    PullRequest,
    #[serde(rename = "IssuesEvent")]
    Issue,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventPayload {
    #[serde(default)]
    pub commits: Option<Vec<IgnoredAny>>,
}

/// One record from `/users/{user}/events/public`
#[derive(Debug, Clone, Deserialize)]
pub struct RawActivityEvent {
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub payload: Option<EventPayload>,
}

impl RawActivityEvent {
    pub fn new(kind: EventKind, created_at: DateTime<Utc>, commits: Option<usize>) -> Self {
        Self {
            kind,
            created_at,
            payload: Some(EventPayload {
                commits: commits.map(|n| vec![IgnoredAny; n]),
            }),
        }
    }

    fn commit_count(&self) -> usize {
        self.payload
            .as_ref()
            .and_then(|p| p.commits.as_ref())
            .map_or(0, Vec::len)
    }

    /// Contribution points this event is worth
    pub fn weight(&self) -> u32 {
        match self.kind {
            EventKind::Push => self.commit_count().max(1) as u32,
            EventKind::Create | EventKind::Release => 2,
            EventKind::PullRequest | EventKind::Issue => 3,
            EventKind::Other => 1,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.created_at.date_naive()
    }
}

/// Accumulate event weights per UTC calendar day
pub fn activity_by_date(events: &[RawActivityEvent]) -> BTreeMap<NaiveDate, u32> {
    let mut activity = BTreeMap::new();
    for event in events {
        *activity.entry(event.date()).or_insert(0) += event.weight();
    }
    activity
}
