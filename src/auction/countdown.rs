/// Countdown to an auction deadline.
/// The derived state is recomputed once per second; once expired it is
/// terminal and the tick task stops.
// region:    --- Imports
use crate::config::COUNTDOWN_TICK;
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::interval;
use tracing::debug;

// endregion: --- Imports

// region:    --- Derivation

/// Display state of the countdown at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownState {
    /// The deadline has passed. Terminal; no numeric fields are emitted.
    Expired,
    Running {
        days: i64,
        hours: i64,
        minutes: i64,
        seconds: i64,
        /// Under one hour remains on the final day.
        urgent: bool,
    },
}

impl CountdownState {
    pub fn is_expired(&self) -> bool {
        matches!(self, CountdownState::Expired)
    }

    pub fn is_urgent(&self) -> bool {
        matches!(self, CountdownState::Running { urgent: true, .. })
    }
}

/// Derive the countdown state for `end` as seen at `now`.
pub fn countdown_at(end: DateTime<Utc>, now: DateTime<Utc>) -> CountdownState {
    let remaining_ms = (end - now).num_milliseconds();
    if remaining_ms <= 0 {
        return CountdownState::Expired;
    }
    let days = remaining_ms / 86_400_000;
    let hours = (remaining_ms / 3_600_000) % 24;
    let minutes = (remaining_ms / 60_000) % 60;
    let seconds = (remaining_ms / 1_000) % 60;
    CountdownState::Running {
        days,
        hours,
        minutes,
        seconds,
        urgent: days == 0 && hours == 0,
    }
}

// endregion: --- Derivation

// region:    --- CountdownTimer

/// One-second tick task publishing countdown states on a watch channel.
///
/// Dropping the timer aborts the task, so a screen that navigates away never
/// leaves a tick running against a stale deadline.
pub struct CountdownTimer {
    end: DateTime<Utc>,
    state_rx: watch::Receiver<CountdownState>,
    task: JoinHandle<()>,
}

impl CountdownTimer {
    /// Start ticking toward `end`.
    pub fn start(end: DateTime<Utc>) -> Self {
        let (state_tx, state_rx) = watch::channel(countdown_at(end, Utc::now()));
        let task = tokio::spawn(async move {
            let mut ticker = interval(COUNTDOWN_TICK);
            loop {
                ticker.tick().await;
                let state = countdown_at(end, Utc::now());
                let expired = state.is_expired();
                if state_tx.send(state).is_err() {
                    break;
                }
                if expired {
                    debug!("{:<12} --> reached deadline, tick stopped", "Countdown");
                    break;
                }
            }
        });
        Self {
            end,
            state_rx,
            task,
        }
    }

    /// Point the countdown at a new deadline. The old tick task is aborted
    /// before the replacement starts; an unchanged deadline is a no-op.
    pub fn retarget(&mut self, end: DateTime<Utc>) {
        if end == self.end {
            return;
        }
        *self = Self::start(end);
    }

    /// Latest derived state.
    pub fn state(&self) -> CountdownState {
        *self.state_rx.borrow()
    }

    /// Watch the state as it changes.
    pub fn subscribe(&self) -> watch::Receiver<CountdownState> {
        self.state_rx.clone()
    }
}

impl Drop for CountdownTimer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

// endregion: --- CountdownTimer

// region:    --- Tests


// endregion: --- Tests
