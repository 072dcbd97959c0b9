//! 5-4-3-2-1 grounding: a user-paced step sequencer.
//!
//! There is no time dimension. `advance` is the only driver and never
//! requires an answer.

use std::collections::BTreeSet;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ValidationError;
use crate::events::Event;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingStep {
    pub count: u8,
    pub sense: String,
    pub placeholder: String,
}

impl GroundingStep {
    fn new(count: u8, sense: &str, placeholder: &str) -> Self {
        Self {
            count,
            sense: sense.into(),
            placeholder: placeholder.into(),
        }
    }

    /// e.g. `5 things you can see`.
    pub fn prompt(&self) -> String {
        format!("{} {}", self.count, self.sense)
    }
}

pub fn grounding_steps() -> Vec<GroundingStep> {
    vec![
        GroundingStep::new(5, "things you can see", "desk, window, lamp..."),
        GroundingStep::new(4, "things you can touch", "keyboard, mug, fabric..."),
        GroundingStep::new(3, "things you can hear", "fan, birds, typing..."),
        GroundingStep::new(2, "things you can smell", "coffee, air, soap..."),
        GroundingStep::new(1, "thing you can taste", "water, mint, nothing..."),
    ]
}

/// Placeholder shown for a skipped step in the summary.
pub const EMPTY_ANSWER: &str = "---";

/// State of one dot in the step indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepMarker {
    Completed,
    Current,
    Pending,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequencerSnapshot {
    pub current_step: usize,
    pub step_count: usize,
    pub prompt: String,
    pub placeholder: String,
    pub answer: String,
    pub is_finished: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepSequencer {
    steps: Vec<GroundingStep>,
    current: usize,
    completed: BTreeSet<usize>,
    answers: Vec<String>,
    finished: bool,
}

impl StepSequencer {
    pub fn new(steps: Vec<GroundingStep>) -> Result<Self, ValidationError> {
        if steps.is_empty() {
            return Err(ValidationError::EmptyCollection("grounding steps".into()));
        }
        let answers = vec![String::new(); steps.len()];
        Ok(Self {
            steps,
            current: 0,
            completed: BTreeSet::new(),
            answers,
            finished: false,
        })
    }

    /// The standard five-sense sequence.
    pub fn grounding() -> Result<Self, ValidationError> {
        Self::new(grounding_steps())
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_step(&self) -> &GroundingStep {
        &self.steps[self.current]
    }

    pub fn steps(&self) -> &[GroundingStep] {
        &self.steps
    }

    pub fn completed_steps(&self) -> &BTreeSet<usize> {
        &self.completed
    }

    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Edit the answer buffer of the current step without advancing.
    pub fn set_answer(&mut self, text: &str) {
        if self.finished {
            return;
        }
        self.answers[self.current] = text.to_string();
    }

    /// Record `answer` (or keep the buffered text when `None`) and move on.
    /// Finishes after the last step; no-op once finished.
    pub fn advance(&mut self, answer: Option<&str>) -> Option<Event> {
        if self.finished {
            return None;
        }
        let from = self.current;
        if let Some(text) = answer {
            self.answers[from] = text.to_string();
        }
        self.completed.insert(from);

        if from + 1 < self.steps.len() {
            self.current = from + 1;
            debug!(from, to = self.current, "grounding step advanced");
            Some(Event::StepAdvanced {
                from_step: from,
                to_step: self.current,
                answer: self.answers[from].clone(),
                at: Utc::now(),
            })
        } else {
            self.finished = true;
            let answered = self.answers.iter().filter(|a| !a.trim().is_empty()).count();
            debug!(answered, "grounding sequence finished");
            Some(Event::SequenceFinished {
                answered,
                at: Utc::now(),
            })
        }
    }

    pub fn reset(&mut self) -> Event {
        self.current = 0;
        self.completed.clear();
        self.answers = vec![String::new(); self.steps.len()];
        self.finished = false;
        Event::SequenceReset { at: Utc::now() }
    }

    pub fn step_marker(&self, index: usize) -> StepMarker {
        if self.completed.contains(&index) {
            StepMarker::Completed
        } else if index == self.current {
            StepMarker::Current
        } else {
            StepMarker::Pending
        }
    }

    /// Each step's prompt with its answer, or `---` when skipped.
    pub fn summary(&self) -> Vec<(String, String)> {
        self.steps
            .iter()
            .zip(&self.answers)
            .map(|(step, answer)| {
                let shown = if answer.is_empty() {
                    EMPTY_ANSWER.to_string()
                } else {
                    answer.clone()
                };
                (step.prompt(), shown)
            })
            .collect()
    }

    pub fn snapshot(&self) -> SequencerSnapshot {
        let step = self.current_step();
        SequencerSnapshot {
            current_step: self.current,
            step_count: self.steps.len(),
            prompt: step.prompt(),
            placeholder: step.placeholder.clone(),
            answer: self.answers[self.current].clone(),
            is_finished: self.finished,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_counts_descend() {
        let counts: Vec<u8> = grounding_steps().iter().map(|s| s.count).collect();
        assert_eq!(counts, vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn five_advances_finish() {
        let mut seq = StepSequencer::grounding().unwrap();
        for _ in 0..4 {
            assert!(matches!(seq.advance(None), Some(Event::StepAdvanced { .. })));
        }
        assert!(matches!(
            seq.advance(None),
            Some(Event::SequenceFinished { answered: 0, .. })
        ));
        assert!(seq.is_finished());
        assert_eq!(
            seq.completed_steps().iter().copied().collect::<Vec<_>>(),
            vec![0, 1, 2, 3, 4]
        );
        assert_eq!(seq.answers().len(), 5);
        assert_eq!(seq.current_index(), 4);
    }

    #[test]
    fn advance_after_finish_is_noop() {
        let mut seq = StepSequencer::grounding().unwrap();
        for _ in 0..5 {
            seq.advance(Some("x"));
        }
        let before = seq.clone();
        assert!(seq.advance(Some("late")).is_none());
        seq.set_answer("late");
        assert_eq!(seq, before);
    }

    #[test]
    fn answers_are_recorded_per_step() {
        let mut seq = StepSequencer::grounding().unwrap();
        seq.advance(Some("lamp, desk"));
        seq.set_answer("mug");
        seq.advance(None);
        seq.advance(Some(""));
        assert_eq!(seq.answers()[0], "lamp, desk");
        assert_eq!(seq.answers()[1], "mug");
        assert_eq!(seq.answers()[2], "");

        let summary = seq.summary();
        assert_eq!(summary[0], ("5 things you can see".to_string(), "lamp, desk".to_string()));
        assert_eq!(summary[2].1, EMPTY_ANSWER);
    }

    #[test]
    fn markers_track_progress() {
        let mut seq = StepSequencer::grounding().unwrap();
        seq.advance(None);
        assert_eq!(seq.step_marker(0), StepMarker::Completed);
        assert_eq!(seq.step_marker(1), StepMarker::Current);
        assert_eq!(seq.step_marker(2), StepMarker::Pending);
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut seq = StepSequencer::grounding().unwrap();
        for _ in 0..5 {
            seq.advance(Some("something"));
        }
        seq.reset();
        assert_eq!(seq, StepSequencer::grounding().unwrap());
    }

    #[test]
    fn empty_table_is_rejected() {
        assert!(StepSequencer::new(Vec::new()).is_err());
    }
}
