use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(60);

/// Suppresses outbound calls for a fixed window after a throttling failure.
///
/// There is no explicit `Cooling -> Open` transition: every check compares
/// the stored deadline against the current instant.
#[derive(Debug)]
pub struct RateLimitGuard {
    cooldown: Duration,
    resume_at: Mutex<Option<Instant>>,
}

impl Default for RateLimitGuard {
    fn default() -> Self {
        Self::new(DEFAULT_COOLDOWN)
    }
}

impl RateLimitGuard {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            resume_at: Mutex::new(None),
        }
    }

    fn deadline(&self) -> MutexGuard<'_, Option<Instant>> {
        self.resume_at.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_limited(&self) -> bool {
        self.is_limited_at(Instant::now())
    }

    pub fn is_limited_at(&self, now: Instant) -> bool {
        (*self.deadline()).is_some_and(|resume_at| now < resume_at)
    }

    /// Start (or restart) the cooldown from now
    pub fn arm(&self) {
        let resume_at = Instant::now() + self.cooldown;
        *self.deadline() = Some(resume_at);
        tracing::debug!(cooldown_secs = self.cooldown.as_secs(), "GitHub calls suspended");
    }

    pub fn reset(&self) {
        if self.deadline().take().is_some() {
            tracing::info!("GitHub rate-limit guard reset");
        }
    }

    /// When calls may resume, if still cooling
    pub fn cooling_until(&self) -> Option<Instant> {
        let now = Instant::now();
        (*self.deadline()).filter(|resume_at| now < *resume_at)
    }
}
