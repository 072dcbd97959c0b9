//! 4-4-4-2 breathing: a looping phase timer with a user-selected session
//! length.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::events::Event;
use crate::timer::{PhaseSpec, PhaseTable, PhaseTimer, TimerSnapshot, TimerStatus};

/// Session lengths offered by the duration toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub enum SessionBudget {
    OneMinute,
    #[default]
    TwoMinutes,
    FiveMinutes,
}

impl SessionBudget {
    pub const ALL: [SessionBudget; 3] = [
        SessionBudget::OneMinute,
        SessionBudget::TwoMinutes,
        SessionBudget::FiveMinutes,
    ];

    pub fn from_secs(secs: u64) -> Result<Self, ValidationError> {
        match secs {
            60 => Ok(SessionBudget::OneMinute),
            120 => Ok(SessionBudget::TwoMinutes),
            300 => Ok(SessionBudget::FiveMinutes),
            other => Err(ValidationError::InvalidValue {
                field: "session_secs".into(),
                message: format!("{other} is not one of 60, 120, 300"),
            }),
        }
    }

    pub fn secs(self) -> u64 {
        match self {
            SessionBudget::OneMinute => 60,
            SessionBudget::TwoMinutes => 120,
            SessionBudget::FiveMinutes => 300,
        }
    }

    pub fn duration(self) -> Duration {
        Duration::from_secs(self.secs())
    }

    pub fn label(self) -> &'static str {
        match self {
            SessionBudget::OneMinute => "1 min",
            SessionBudget::TwoMinutes => "2 min",
            SessionBudget::FiveMinutes => "5 min",
        }
    }
}

impl TryFrom<u64> for SessionBudget {
    type Error = ValidationError;

    fn try_from(secs: u64) -> Result<Self, Self::Error> {
        Self::from_secs(secs)
    }
}

impl From<SessionBudget> for u64 {
    fn from(budget: SessionBudget) -> Self {
        budget.secs()
    }
}

/// inhale 4, hold 4, exhale 4, rest 2: one 14 second cycle.
pub fn breathing_table() -> Result<PhaseTable, ValidationError> {
    PhaseTable::new(vec![
        PhaseSpec::new("inhale", "Breathe in", "", 4),
        PhaseSpec::new("hold", "Hold", "", 4),
        PhaseSpec::new("exhale", "Breathe out", "", 4),
        PhaseSpec::new("rest", "Rest", "", 2),
    ])
}

const SCALE_MIN: f64 = 1.0;
const SCALE_MAX: f64 = 1.3;

/// Size of the breathing circle for a phase and its progress.
///
/// Grows over inhale, stays large over hold, shrinks over exhale and rests
/// at its base size.
pub fn circle_scale(phase_name: &str, progress_pct: f64) -> f64 {
    let p = (progress_pct / 100.0).clamp(0.0, 1.0);
    match phase_name {
        "inhale" => SCALE_MIN + p * (SCALE_MAX - SCALE_MIN),
        "hold" => SCALE_MAX,
        "exhale" => SCALE_MAX - p * (SCALE_MAX - SCALE_MIN),
        _ => SCALE_MIN,
    }
}

/// `m:ss`, seconds zero-padded.
pub fn format_clock(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[derive(Debug, Clone, PartialEq)]
pub struct BreathingExercise {
    timer: PhaseTimer,
    budget: SessionBudget,
}

impl BreathingExercise {
    pub fn new(budget: SessionBudget) -> Result<Self, ValidationError> {
        Ok(Self {
            timer: PhaseTimer::looping(breathing_table()?, budget.duration())?,
            budget,
        })
    }

    pub fn budget(&self) -> SessionBudget {
        self.budget
    }

    pub fn timer(&self) -> &PhaseTimer {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut PhaseTimer {
        &mut self.timer
    }

    pub fn play(&mut self) -> Option<Event> {
        self.timer.play()
    }

    pub fn pause(&mut self) -> Option<Event> {
        self.timer.pause()
    }

    pub fn toggle(&mut self) -> Option<Event> {
        self.timer.toggle()
    }

    pub fn reset(&mut self) -> Event {
        self.timer.reset()
    }

    pub fn tick(&mut self, delta_secs: f64) -> Vec<Event> {
        self.timer.tick(delta_secs)
    }

    /// Pick a session length. Disallowed while the exercise is running.
    pub fn select_duration(&mut self, budget: SessionBudget) -> Result<Event, ValidationError> {
        let event = self.timer.set_session(budget.duration())?;
        self.budget = budget;
        Ok(event)
    }

    pub fn circle_scale(&self) -> f64 {
        if self.timer.status() == TimerStatus::Idle {
            return SCALE_MIN;
        }
        circle_scale(&self.timer.current_spec().name, self.timer.phase_progress_percent())
    }

    /// Session time left as `m:ss`.
    pub fn remaining_clock(&self) -> String {
        format_clock(self.timer.seconds_remaining())
    }

    /// `Ready` before the first play, `Done` at the end, otherwise the phase
    /// label. A paused session keeps showing the phase it stopped in.
    pub fn status_label(&self) -> String {
        match self.timer.status() {
            TimerStatus::Idle => "Ready".into(),
            TimerStatus::Complete => "Done".into(),
            TimerStatus::Running | TimerStatus::Paused => self.timer.current_spec().label.clone(),
        }
    }

    /// `N cycle(s)` once the session is complete.
    pub fn completion_summary(&self) -> Option<String> {
        if !self.timer.is_complete() {
            return None;
        }
        let cycles = self.timer.cycles_completed();
        let plural = if cycles == 1 { "" } else { "s" };
        Some(format!("{cycles} cycle{plural}"))
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        self.timer.snapshot()
    }
}
