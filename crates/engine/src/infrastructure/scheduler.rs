//! Weekly quota reset scheduler.
//!
//! Polls wall-clock time against an armed target. When the target passes,
//! the scheduler advances the target a week first and only then resets
//! quotas, so a slow store call can never double-fire the same instant.

use std::sync::Arc;
use std::time::Duration;

use chrono::{FixedOffset, NaiveDateTime};
use gashapon_domain::ResetSchedule;
use tokio::sync::Mutex;

use crate::infrastructure::ports::{ClockPort, QuotaStore};

#[derive(Debug, Clone, Copy)]
enum SchedulerState {
    /// No schedule configured, ticks are no-ops.
    Unset,
    /// Armed to fire at `target` (local time), then every week after.
    Armed {
        schedule: ResetSchedule,
        target: NaiveDateTime,
    },
}

/// Record of one completed reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetFired {
    pub fired_target: NaiveDateTime,
    pub next_target: NaiveDateTime,
    pub users_reset: usize,
}

/// Drives the weekly quota reset from an injected clock.
pub struct ResetScheduler {
    quota: Arc<dyn QuotaStore>,
    clock: Arc<dyn ClockPort>,
    tz: FixedOffset,
    state: Mutex<SchedulerState>,
}

impl ResetScheduler {
    pub fn new(quota: Arc<dyn QuotaStore>, clock: Arc<dyn ClockPort>, tz: FixedOffset) -> Self {
        Self {
            quota,
            clock,
            tz,
            state: Mutex::new(SchedulerState::Unset),
        }
    }

    fn local_now(&self) -> NaiveDateTime {
        self.clock.now().with_timezone(&self.tz).naive_local()
    }

    /// Arm (or re-arm) the weekly schedule. Any previously pending fire is
    /// discarded. Returns the next fire time in local time.
    pub async fn set_schedule(&self, schedule: ResetSchedule) -> NaiveDateTime {
        let target = schedule.next_occurrence(self.local_now());
        {
            let mut state = self.state.lock().await;
            *state = SchedulerState::Armed { schedule, target };
        }
        tracing::info!(
            weekday = %schedule.weekday,
            time = %schedule.time,
            %target,
            "Reset schedule armed"
        );
        target
    }

    /// Current schedule and next fire time, if armed.
    pub async fn status(&self) -> Option<(ResetSchedule, NaiveDateTime)> {
        match *self.state.lock().await {
            SchedulerState::Unset => None,
            SchedulerState::Armed { schedule, target } => Some((schedule, target)),
        }
    }

    /// One poll step: fire if the armed target has passed.
    ///
    /// The target is advanced under the state lock before the store reset
    /// runs, so a concurrent or repeated tick sees the new target and
    /// cannot fire twice for the same instant.
    pub async fn tick(&self) -> Option<ResetFired> {
        let fired = {
            let mut state = self.state.lock().await;
            match *state {
                SchedulerState::Armed { schedule, target } => {
                    let now = self.local_now();
                    if now >= target {
                        let next_target = schedule.next_occurrence(now);
                        *state = SchedulerState::Armed {
                            schedule,
                            target: next_target,
                        };
                        Some((target, next_target))
                    } else {
                        None
                    }
                }
                SchedulerState::Unset => None,
            }
        };

        let (fired_target, next_target) = fired?;
        let users_reset = match self.quota.reset_all().await {
            Ok(count) => count,
            Err(e) => {
                tracing::warn!(error = %e, "Quota reset failed, will retry next week");
                0
            }
        };
        tracing::info!(
            %fired_target,
            %next_target,
            users_reset,
            "Weekly quota reset fired"
        );
        Some(ResetFired {
            fired_target,
            next_target,
            users_reset,
        })
    }

    /// Poll loop, spawned at startup.
    pub async fn run(self: Arc<Self>, poll_interval: Duration) {
        loop {
            self.tick().await;
            tokio::time::sleep(poll_interval).await;
        }
    }
}
