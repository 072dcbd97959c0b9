//! 90-second guided body reset: a linear phase timer.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::events::Event;
use crate::timer::{PhaseSpec, PhaseTable, PhaseTimer, TimerSnapshot};

pub const COMPLETE_TITLE: &str = "Body reset complete";
pub const COMPLETE_MESSAGE: &str =
    "Your nervous system got a chance to settle. The thinking will be clearer now.";

pub fn body_reset_table() -> Result<PhaseTable, ValidationError> {
    PhaseTable::new(vec![
        PhaseSpec::new(
            "shake",
            "Shake it out",
            "Shake your hands and arms loosely. Let the tension leave your body.",
            15,
        ),
        PhaseSpec::new(
            "shoulders",
            "Roll your shoulders",
            "Slow, big circles. Forward, then backward. Feel the knots release.",
            15,
        ),
        PhaseSpec::new(
            "belly",
            "Belly breathing",
            "Hand on your stomach. Breathe deep into your belly. Slow exhale through your mouth.",
            20,
        ),
        PhaseSpec::new(
            "neck",
            "Release your neck",
            "Gently tilt your head side to side. No rushing. Let gravity do the work.",
            15,
        ),
        PhaseSpec::new(
            "stretch",
            "Full body stretch",
            "Reach your arms overhead. Stretch tall. Then slowly fold forward and hang.",
            15,
        ),
        PhaseSpec::new(
            "still",
            "Be still",
            "Close your eyes. Stand or sit. Just exist for a moment. You are safe.",
            10,
        ),
    ])
}

/// State of one dot in the phase progress row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseMarker {
    Done,
    Current,
    Upcoming,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BodyReset {
    timer: PhaseTimer,
}

impl BodyReset {
    pub fn new() -> Result<Self, ValidationError> {
        Ok(Self {
            timer: PhaseTimer::linear(body_reset_table()?),
        })
    }

    pub fn timer(&self) -> &PhaseTimer {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut PhaseTimer {
        &mut self.timer
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

    pub fn markers(&self) -> Vec<PhaseMarker> {
        let current = self.timer.current_phase().index;
        (0..self.timer.table().len())
            .map(|i| match i.cmp(&current) {
                std::cmp::Ordering::Less => PhaseMarker::Done,
                std::cmp::Ordering::Equal => PhaseMarker::Current,
                std::cmp::Ordering::Greater => PhaseMarker::Upcoming,
            })
            .collect()
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        self.timer.snapshot()
    }
}
