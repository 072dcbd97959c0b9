use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::navigation::Tool;

/// Every state change in an exercise produces an Event.
/// Renderers print or animate them; tests match on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        phase_index: usize,
        phase_name: String,
        at: DateTime<Utc>,
    },
    TimerPaused {
        elapsed_secs: f64,
        at: DateTime<Utc>,
    },
    TimerResumed {
        elapsed_secs: f64,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    PhaseChanged {
        from_index: usize,
        to_index: usize,
        phase_name: String,
        phase_label: String,
        at: DateTime<Utc>,
    },
    /// A looping table wrapped from its last phase back to the first.
    CycleCompleted {
        cycles_completed: u32,
        at: DateTime<Utc>,
    },
    TimerCompleted {
        total_elapsed_secs: f64,
        cycles_completed: u32,
        at: DateTime<Utc>,
    },
    BudgetSelected {
        session_secs: u64,
        at: DateTime<Utc>,
    },
    StepAdvanced {
        from_step: usize,
        to_step: usize,
        answer: String,
        at: DateTime<Utc>,
    },
    SequenceFinished {
        answered: usize,
        at: DateTime<Utc>,
    },
    SequenceReset {
        at: DateTime<Utc>,
    },
    ToolOpened {
        tool: Tool,
        at: DateTime<Utc>,
    },
    ToolClosed {
        tool: Tool,
        at: DateTime<Utc>,
    },
    PromptDrawn {
        prompt: String,
        at: DateTime<Utc>,
    },
    ThoughtReleased {
        chars: usize,
        at: DateTime<Utc>,
    },
    ThoughtSaved {
        file_name: String,
        bytes: usize,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Snake-case name of the variant, used for compact log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::TimerStarted { .. } => "timer_started",
            Event::TimerPaused { .. } => "timer_paused",
            Event::TimerResumed { .. } => "timer_resumed",
            Event::TimerReset { .. } => "timer_reset",
            Event::PhaseChanged { .. } => "phase_changed",
            Event::CycleCompleted { .. } => "cycle_completed",
            Event::TimerCompleted { .. } => "timer_completed",
            Event::BudgetSelected { .. } => "budget_selected",
            Event::StepAdvanced { .. } => "step_advanced",
            Event::SequenceFinished { .. } => "sequence_finished",
            Event::SequenceReset { .. } => "sequence_reset",
            Event::ToolOpened { .. } => "tool_opened",
            Event::ToolClosed { .. } => "tool_closed",
            Event::PromptDrawn { .. } => "prompt_drawn",
            Event::ThoughtReleased { .. } => "thought_released",
            Event::ThoughtSaved { .. } => "thought_saved",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_type_tag() {
        let event = Event::CycleCompleted {
            cycles_completed: 3,
            at: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "CycleCompleted");
        assert_eq!(json["cycles_completed"], 3);
        assert_eq!(event.kind(), "cycle_completed");
    }
}
