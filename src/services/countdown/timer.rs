//! Countdown state machine.
//!
//! The timer only tracks the phase and the paused remaining duration. The
//! target instant itself lives in [`CountdownConfig`](crate::models::countdown::CountdownConfig)
//! so that it can be persisted and shared; callers pass it in.

use chrono::{DateTime, Duration, Utc};

/// Refresh cadence while running. Short enough that seconds never skip.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 250;
pub const MIN_TICK_INTERVAL_MS: u64 = 50;
pub const MAX_TICK_INTERVAL_MS: u64 = 1000;

const SECONDS_PER_DAY: i64 = 86_400;
const SECONDS_PER_HOUR: i64 = 3_600;
const SECONDS_PER_MINUTE: i64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountdownPhase {
    /// No target
    #[default]
    Unset,
    /// Ticking towards the target
    Running,
    /// Suspended with the remaining duration captured
    Paused { remaining: Duration },
    /// Target reached; completion already announced
    Elapsed,
}

/// Remaining time broken into display fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CountdownFields {
    pub days: i64,
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl CountdownFields {
    pub const ZERO: CountdownFields = CountdownFields {
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    /// Floor-decompose a millisecond difference. Non-positive input is zero.
    pub fn from_millis(diff_ms: i64) -> Self {
        if diff_ms <= 0 {
            return Self::ZERO;
        }

        let total_seconds = diff_ms / 1000;
        Self {
            days: total_seconds / SECONDS_PER_DAY,
            hours: ((total_seconds % SECONDS_PER_DAY) / SECONDS_PER_HOUR) as u8,
            minutes: ((total_seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE) as u8,
            seconds: (total_seconds % SECONDS_PER_MINUTE) as u8,
        }
    }

    pub fn from_duration(remaining: Duration) -> Self {
        Self::from_millis(remaining.num_milliseconds())
    }

    pub fn total_seconds(&self) -> i64 {
        self.days * SECONDS_PER_DAY
            + i64::from(self.hours) * SECONDS_PER_HOUR
            + i64::from(self.minutes) * SECONDS_PER_MINUTE
            + i64::from(self.seconds)
    }

    /// Days unpadded, the rest as two digits.
    pub fn formatted(&self) -> [String; 4] {
        [
            self.days.to_string(),
            format!("{:02}", self.hours),
            format!("{:02}", self.minutes),
            format!("{:02}", self.seconds),
        ]
    }
}

/// Result of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running; nothing to refresh
    Idle,
    /// Still counting down
    Counting(CountdownFields),
    /// The target was reached on this tick
    Elapsed,
}

/// Action offered by the dual-purpose Pause/Resume control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryAction {
    Pause,
    Resume,
}

impl PrimaryAction {
    pub fn label(&self) -> &'static str {
        match self {
            PrimaryAction::Pause => "Pause",
            PrimaryAction::Resume => "Resume",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CountdownTimer {
    phase: CountdownPhase,
}

impl CountdownTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> CountdownPhase {
        self.phase
    }

    /// Whether the periodic refresh should be scheduled.
    pub fn is_ticking(&self) -> bool {
        self.phase == CountdownPhase::Running
    }

    /// The next action for the Pause/Resume control, `None` when it is disabled.
    pub fn primary_action(&self) -> Option<PrimaryAction> {
        match self.phase {
            CountdownPhase::Running => Some(PrimaryAction::Pause),
            CountdownPhase::Paused { .. } => Some(PrimaryAction::Resume),
            CountdownPhase::Unset | CountdownPhase::Elapsed => None,
        }
    }

    /// Begin ticking toward `target`, replacing whatever was running before.
    pub fn start(&mut self, target: Option<DateTime<Utc>>) {
        self.phase = match target {
            Some(_) => CountdownPhase::Running,
            None => CountdownPhase::Unset,
        };
        log::debug!("Countdown timer started: {:?}", self.phase);
    }

    /// Capture the remaining duration. No-op unless running with a target.
    pub fn pause(&mut self, target: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
        match (self.phase, target) {
            (CountdownPhase::Running, Some(target)) => {
                let remaining = target - now;
                self.phase = CountdownPhase::Paused { remaining };
                log::debug!("Countdown paused with {} ms remaining", remaining.num_milliseconds());
                true
            }
            _ => false,
        }
    }

    /// Resume from a pause, returning the new target `now + remaining`.
    pub fn resume(&mut self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self.phase {
            CountdownPhase::Paused { remaining } => {
                self.phase = CountdownPhase::Running;
                log::debug!("Countdown resumed");
                Some(now + remaining)
            }
            _ => None,
        }
    }

    pub fn reset(&mut self) {
        self.phase = CountdownPhase::Unset;
    }

    /// Advance the machine. Only a running timer can elapse, and it reports
    /// [`TickOutcome::Elapsed`] once per transition.
    pub fn tick(&mut self, target: Option<DateTime<Utc>>, now: DateTime<Utc>) -> TickOutcome {
        if self.phase != CountdownPhase::Running {
            return TickOutcome::Idle;
        }

        let Some(target) = target else {
            self.phase = CountdownPhase::Unset;
            return TickOutcome::Idle;
        };

        let diff_ms = (target - now).num_milliseconds();
        if diff_ms <= 0 {
            self.phase = CountdownPhase::Elapsed;
            log::info!("Countdown elapsed");
            TickOutcome::Elapsed
        } else {
            TickOutcome::Counting(CountdownFields::from_millis(diff_ms))
        }
    }

    /// Fields to display for the current phase without advancing it.
    pub fn fields(&self, target: Option<DateTime<Utc>>, now: DateTime<Utc>) -> CountdownFields {
        match (self.phase, target) {
            (CountdownPhase::Running, Some(target)) => {
                CountdownFields::from_duration(target - now)
            }
            (CountdownPhase::Paused { remaining }, _) => CountdownFields::from_duration(remaining),
            _ => CountdownFields::ZERO,
        }
    }
}

/// Clamp a configured refresh interval into the supported range.
pub fn clamp_tick_interval(interval_ms: u64) -> u64 {
    interval_ms.clamp(MIN_TICK_INTERVAL_MS, MAX_TICK_INTERVAL_MS)
}
