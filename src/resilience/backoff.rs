//! Two-phase poll schedule.
//!
//! Polling starts fast and backs off to a coarse interval once the short-poll
//! window has passed, then stops at the overall timeout:
//!
//! ```text
//! start ──── fast_interval ────▶ interval_boundary ──── slow_interval ────▶ final_boundary ─▶ timed out
//! ```

use std::time::Duration;
use tokio::time::Instant;

use crate::config::PollingConfig;

/// Stand-in for "never" when a window does not fit in an `Instant`.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Phase a poller is in at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollPhase {
    /// Before the interval boundary.
    FastPoll,
    /// Between the interval boundary and the final boundary.
    SlowPoll,
    /// At or past the final boundary.
    TimedOut,
}

impl PollPhase {
    /// Label used in logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            PollPhase::FastPoll => "fast",
            PollPhase::SlowPoll => "slow",
            PollPhase::TimedOut => "timed_out",
        }
    }
}

/// Timing policy for confirmation polling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSchedule {
    pub short_poll_window: Duration,
    pub overall_timeout: Duration,
    pub fast_interval: Duration,
    pub slow_interval: Duration,
}

impl PollSchedule {
    /// Schedule with the given windows and the default 500 ms / 10 s delays.
    pub fn new(short_poll_window: Duration, overall_timeout: Duration) -> Self {
        Self {
            short_poll_window,
            overall_timeout,
            ..Self::default()
        }
    }

    /// Fix both boundaries relative to `now`. Windows too large to
    /// represent saturate to a far-future instant.
    pub fn start(&self, now: Instant) -> Deadlines {
        let boundary = |window: Duration| {
            now.checked_add(window).unwrap_or_else(|| now + window.min(FAR_FUTURE))
        };
        Deadlines {
            interval_boundary: boundary(self.short_poll_window),
            final_boundary: boundary(self.overall_timeout),
        }
    }

    /// Delay before the next attempt in `phase`; `None` once timed out.
    pub fn delay(&self, phase: PollPhase) -> Option<Duration> {
        match phase {
            PollPhase::FastPoll => Some(self.fast_interval),
            PollPhase::SlowPoll => Some(self.slow_interval),
            PollPhase::TimedOut => None,
        }
    }
}

impl Default for PollSchedule {
    fn default() -> Self {
        Self {
            short_poll_window: Duration::from_secs(60),
            overall_timeout: Duration::from_secs(3600),
            fast_interval: Duration::from_millis(500),
            slow_interval: Duration::from_millis(10_000),
        }
    }
}

impl From<&PollingConfig> for PollSchedule {
    fn from(config: &PollingConfig) -> Self {
        Self {
            short_poll_window: Duration::from_secs(config.short_poll_window_secs),
            overall_timeout: Duration::from_secs(config.overall_timeout_secs),
            fast_interval: Duration::from_millis(config.fast_interval_ms),
            slow_interval: Duration::from_millis(config.slow_interval_ms),
        }
    }
}

/// Boundaries computed once when polling begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadlines {
    pub interval_boundary: Instant,
    pub final_boundary: Instant,
}

impl Deadlines {
    /// Phase at `now`. Both comparisons are strict.
    pub fn phase_at(&self, now: Instant) -> PollPhase {
        if now < self.interval_boundary {
            PollPhase::FastPoll
        } else if now < self.final_boundary {
            PollPhase::SlowPoll
        } else {
            PollPhase::TimedOut
        }
    }
}
