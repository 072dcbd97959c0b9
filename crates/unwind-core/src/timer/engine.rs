//! Phase timer engine.
//!
//! The engine is clock-agnostic: it only advances when the caller feeds it a
//! delta through `tick()`. Any tick granularity that sums to the same elapsed
//! time produces the same phase and progress values.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running <-> Paused
//!           |
//!           v
//!        Complete      (reset() returns every state to Idle)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut timer = PhaseTimer::linear(table);
//! timer.play();
//! // On every clock callback:
//! for event in timer.tick(0.05) { /* render */ }
//! ```

use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::phase::{PhaseLocation, PhaseSpec, PhaseTable};
use crate::error::ValidationError;
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    /// Nothing has run since creation or the last reset.
    Idle,
    Running,
    Paused,
    /// Terminal until `reset()`.
    Complete,
}

/// How the engine treats the end of its phase table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TimerMode {
    /// Run the table once and complete at its end.
    Linear,
    /// Cycle through the table until `session` has elapsed in total.
    Looping { session: Duration },
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub status: TimerStatus,
    pub phase_index: usize,
    pub phase_count: usize,
    pub phase_name: String,
    pub phase_label: String,
    pub instruction: String,
    pub phase_progress_pct: f64,
    pub total_progress_pct: f64,
    pub seconds_remaining: u64,
    pub phase_seconds_remaining: u64,
    pub elapsed_secs: f64,
    pub total_elapsed_secs: f64,
    pub cycles_completed: u32,
}

/// Generic phase timer shared by every timed exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseTimer {
    table: PhaseTable,
    mode: TimerMode,
    status: TimerStatus,
    /// Position inside the current pass through the table.
    elapsed: Duration,
    /// Un-wrapped run time. Equals `elapsed` in linear mode.
    total_elapsed: Duration,
    cycles_completed: u32,
}

impl PhaseTimer {
    /// A timer that runs `table` once.
    pub fn linear(table: PhaseTable) -> Self {
        Self::with_mode(table, TimerMode::Linear)
    }

    /// A timer that cycles `table` until `session` has elapsed.
    pub fn looping(table: PhaseTable, session: Duration) -> Result<Self, ValidationError> {
        validate_session(session)?;
        Ok(Self::with_mode(table, TimerMode::Looping { session }))
    }

    fn with_mode(table: PhaseTable, mode: TimerMode) -> Self {
        Self {
            table,
            mode,
            status: TimerStatus::Idle,
            elapsed: Duration::ZERO,
            total_elapsed: Duration::ZERO,
            cycles_completed: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn status(&self) -> TimerStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == TimerStatus::Running
    }

    pub fn is_complete(&self) -> bool {
        self.status == TimerStatus::Complete
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn table(&self) -> &PhaseTable {
        &self.table
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    pub fn total_elapsed(&self) -> Duration {
        self.total_elapsed
    }

    pub fn cycles_completed(&self) -> u32 {
        self.cycles_completed
    }

    /// Session length for looping timers.
    pub fn session(&self) -> Option<Duration> {
        match self.mode {
            TimerMode::Linear => None,
            TimerMode::Looping { session } => Some(session),
        }
    }

    /// Length of the whole run: the table for linear timers, the session
    /// for looping ones.
    pub fn run_length(&self) -> Duration {
        match self.mode {
            TimerMode::Linear => self.table.total_duration(),
            TimerMode::Looping { session } => session,
        }
    }

    pub fn current_phase(&self) -> PhaseLocation {
        self.table.locate(self.elapsed)
    }

    pub fn current_spec(&self) -> &PhaseSpec {
        self.table.phase_at(self.current_phase())
    }

    /// 0.0 .. 100.0 progress within the current phase.
    pub fn phase_progress_percent(&self) -> f64 {
        let loc = self.current_phase();
        let duration = self.current_spec().duration().as_secs_f64();
        loc.local_elapsed.as_secs_f64() / duration * 100.0
    }

    /// 0.0 .. 100.0 progress across the whole run.
    pub fn total_progress_percent(&self) -> f64 {
        let length = self.run_length().as_secs_f64();
        (self.total_elapsed.as_secs_f64() / length * 100.0).min(100.0)
    }

    /// Whole seconds left in the run, rounded up.
    pub fn seconds_remaining(&self) -> u64 {
        ceil_secs(self.run_length().saturating_sub(self.total_elapsed))
    }

    /// Whole seconds left in the current phase, rounded up.
    pub fn phase_seconds_remaining(&self) -> u64 {
        let loc = self.current_phase();
        ceil_secs(self.current_spec().duration().saturating_sub(loc.local_elapsed))
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        let loc = self.current_phase();
        let spec = self.current_spec();
        TimerSnapshot {
            status: self.status,
            phase_index: loc.index,
            phase_count: self.table.len(),
            phase_name: spec.name.clone(),
            phase_label: spec.label.clone(),
            instruction: spec.instruction.clone(),
            phase_progress_pct: self.phase_progress_percent(),
            total_progress_pct: self.total_progress_percent(),
            seconds_remaining: self.seconds_remaining(),
            phase_seconds_remaining: self.phase_seconds_remaining(),
            elapsed_secs: self.elapsed.as_secs_f64(),
            total_elapsed_secs: self.total_elapsed.as_secs_f64(),
            cycles_completed: self.cycles_completed,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start or resume. No-op when running or complete.
    pub fn play(&mut self) -> Option<Event> {
        match self.status {
            TimerStatus::Idle => {
                self.status = TimerStatus::Running;
                let spec = self.current_spec();
                Some(Event::TimerStarted {
                    phase_index: self.current_phase().index,
                    phase_name: spec.name.clone(),
                    at: Utc::now(),
                })
            }
            TimerStatus::Paused => {
                self.status = TimerStatus::Running;
                Some(Event::TimerResumed {
                    elapsed_secs: self.total_elapsed.as_secs_f64(),
                    at: Utc::now(),
                })
            }
            TimerStatus::Running | TimerStatus::Complete => None,
        }
    }

    pub fn pause(&mut self) -> Option<Event> {
        match self.status {
            TimerStatus::Running => {
                self.status = TimerStatus::Paused;
                Some(Event::TimerPaused {
                    elapsed_secs: self.total_elapsed.as_secs_f64(),
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    /// The single play/pause affordance.
    pub fn toggle(&mut self) -> Option<Event> {
        if self.is_active() {
            self.pause()
        } else {
            self.play()
        }
    }

    /// Back to `Idle` with all counters cleared. The session length is kept.
    pub fn reset(&mut self) -> Event {
        self.status = TimerStatus::Idle;
        self.elapsed = Duration::ZERO;
        self.total_elapsed = Duration::ZERO;
        self.cycles_completed = 0;
        Event::TimerReset { at: Utc::now() }
    }

    /// Change the session length of a looping timer.
    ///
    /// Rejected while running; otherwise the run is reset so the new length
    /// applies from zero.
    pub fn set_session(&mut self, session: Duration) -> Result<Event, ValidationError> {
        if self.mode == TimerMode::Linear {
            return Err(ValidationError::InvalidValue {
                field: "mode".into(),
                message: "linear timers have no session length".into(),
            });
        }
        if self.is_active() {
            warn!("rejected session change while running");
            return Err(ValidationError::BudgetLocked);
        }
        validate_session(session)?;
        self.mode = TimerMode::Looping { session };
        self.reset();
        Ok(Event::BudgetSelected {
            session_secs: session.as_secs(),
            at: Utc::now(),
        })
    }

    /// Advance by `delta_secs`. Negative or non-finite deltas count as zero.
    pub fn tick(&mut self, delta_secs: f64) -> Vec<Event> {
        self.tick_duration(secs_to_duration(delta_secs))
    }

    /// Advance by `delta`. No-op unless running.
    pub fn tick_duration(&mut self, delta: Duration) -> Vec<Event> {
        if self.status != TimerStatus::Running || delta.is_zero() {
            return Vec::new();
        }

        let before = self.current_phase().index;
        let mut events = Vec::new();
        let mut wrapped = false;

        match self.mode {
            TimerMode::Linear => {
                let total = self.table.total_duration();
                self.elapsed = self.elapsed.saturating_add(delta).min(total);
                self.total_elapsed = self.elapsed;
            }
            TimerMode::Looping { session } => {
                let step = delta.min(session.saturating_sub(self.total_elapsed));
                self.total_elapsed += step;
                let position = self.elapsed.saturating_add(step).as_micros();
                let cycle = self.table.total_duration().as_micros();
                let wraps = position / cycle;
                // position % cycle < cycle, which fits in u64 microseconds.
                self.elapsed = Duration::from_micros((position % cycle) as u64);
                if wraps > 0 {
                    let wraps = u32::try_from(wraps).unwrap_or(u32::MAX);
                    self.cycles_completed = self.cycles_completed.saturating_add(wraps);
                    wrapped = true;
                    debug!(wraps, cycles = self.cycles_completed, "cycle completed");
                    events.push(Event::CycleCompleted {
                        cycles_completed: self.cycles_completed,
                        at: Utc::now(),
                    });
                }
            }
        }

        let after = self.current_phase().index;
        if after != before || wrapped {
            let spec = self.current_spec();
            debug!(from = before, to = after, phase = %spec.name, "phase changed");
            events.push(Event::PhaseChanged {
                from_index: before,
                to_index: after,
                phase_name: spec.name.clone(),
                phase_label: spec.label.clone(),
                at: Utc::now(),
            });
        }

        if self.total_elapsed >= self.run_length() {
            self.status = TimerStatus::Complete;
            info!(
                elapsed_secs = self.total_elapsed.as_secs_f64(),
                cycles = self.cycles_completed,
                "timer completed"
            );
            events.push(Event::TimerCompleted {
                total_elapsed_secs: self.total_elapsed.as_secs_f64(),
                cycles_completed: self.cycles_completed,
                at: Utc::now(),
            });
        }

        events
    }
}

fn validate_session(session: Duration) -> Result<(), ValidationError> {
    if session.is_zero() {
        return Err(ValidationError::InvalidValue {
            field: "session".into(),
            message: "session length must be greater than zero".into(),
        });
    }
    Ok(())
}

/// Convert a tick delta to a whole number of microseconds.
///
/// Rounding to microseconds keeps repeated fractional ticks exact:
/// 280 ticks of 0.05 s sum to exactly 14 s.
fn secs_to_duration(delta_secs: f64) -> Duration {
    if !delta_secs.is_finite() || delta_secs < 0.0 {
        warn!(delta_secs, "ignoring invalid tick delta");
        return Duration::ZERO;
    }
    Duration::from_micros((delta_secs * 1_000_000.0).round() as u64)
}

fn ceil_secs(d: Duration) -> u64 {
    let micros = d.as_micros();
    micros.div_ceil(1_000_000) as u64
}
