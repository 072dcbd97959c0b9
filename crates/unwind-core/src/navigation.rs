//! Home screen and tool navigation.
//!
//! At most one tool is open at a time. Opening a tool always builds fresh
//! exercise state and drops whatever was open before, including any tick
//! schedule the caller was holding for it.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ValidationError;
use crate::events::Event;
use crate::exercises::{BodyReset, BreathingExercise, ReframePrompts, SessionBudget, StepSequencer, ThoughtDump};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    Breathing,
    Grounding,
    Dump,
    Prompts,
    BodyReset,
}

impl Tool {
    /// Display order on the home screen and for next/prev.
    pub const ALL: [Tool; 5] = [
        Tool::Breathing,
        Tool::Grounding,
        Tool::Dump,
        Tool::Prompts,
        Tool::BodyReset,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Tool::Breathing => "Breathe",
            Tool::Grounding => "Ground",
            Tool::Dump => "Dump",
            Tool::Prompts => "Reframe",
            Tool::BodyReset => "Body Reset",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Tool::Breathing => "4-4-4-2 breathing exercise to calm your nervous system",
            Tool::Grounding => "5-4-3-2-1 sensory grounding technique",
            Tool::Dump => "Write out your thoughts, then release or save them",
            Tool::Prompts => "Random prompts to shift your perspective",
            Tool::BodyReset => "90-second guided movement to settle your nervous system first",
        }
    }

    pub fn index(self) -> usize {
        Tool::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }
}

/// A live exercise instance owned by the navigator.
#[derive(Debug, Clone)]
pub enum ActiveTool {
    Breathing(BreathingExercise),
    Grounding(StepSequencer),
    Dump(ThoughtDump),
    Prompts(ReframePrompts),
    BodyReset(BodyReset),
}

impl ActiveTool {
    fn build(tool: Tool, budget: SessionBudget, prompt_seed: Option<u64>) -> Result<Self, ValidationError> {
        Ok(match tool {
            Tool::Breathing => ActiveTool::Breathing(BreathingExercise::new(budget)?),
            Tool::Grounding => ActiveTool::Grounding(StepSequencer::grounding()?),
            Tool::Dump => ActiveTool::Dump(ThoughtDump::new()),
            Tool::Prompts => ActiveTool::Prompts(ReframePrompts::new(prompt_seed)),
            Tool::BodyReset => ActiveTool::BodyReset(BodyReset::new()?),
        })
    }

    pub fn tool(&self) -> Tool {
        match self {
            ActiveTool::Breathing(_) => Tool::Breathing,
            ActiveTool::Grounding(_) => Tool::Grounding,
            ActiveTool::Dump(_) => Tool::Dump,
            ActiveTool::Prompts(_) => Tool::Prompts,
            ActiveTool::BodyReset(_) => Tool::BodyReset,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Navigator {
    active: Option<ActiveTool>,
    default_budget: SessionBudget,
    prompt_seed: Option<u64>,
}

impl Navigator {
    pub fn new(default_budget: SessionBudget) -> Self {
        Self {
            active: None,
            default_budget,
            prompt_seed: None,
        }
    }

    /// Seed the prompt deck of every Reframe instance opened from here on.
    pub fn with_prompt_seed(mut self, seed: Option<u64>) -> Self {
        self.prompt_seed = seed;
        self
    }

    pub fn active(&self) -> Option<&ActiveTool> {
        self.active.as_ref()
    }

    pub fn active_mut(&mut self) -> Option<&mut ActiveTool> {
        self.active.as_mut()
    }

    pub fn active_tool(&self) -> Option<Tool> {
        self.active.as_ref().map(ActiveTool::tool)
    }

    pub fn is_home(&self) -> bool {
        self.active.is_none()
    }

    /// Open `tool` with fresh state, discarding the current instance.
    pub fn open(&mut self, tool: Tool) -> Result<Event, ValidationError> {
        let instance = ActiveTool::build(tool, self.default_budget, self.prompt_seed)?;
        if let Some(previous) = self.active.replace(instance) {
            info!(from = ?previous.tool(), to = ?tool, "switched tool");
        } else {
            info!(tool = ?tool, "opened tool");
        }
        Ok(Event::ToolOpened { tool, at: Utc::now() })
    }

    /// The panic button: straight into breathing.
    pub fn panic(&mut self) -> Result<Event, ValidationError> {
        self.open(Tool::Breathing)
    }

    /// Back to the home screen.
    pub fn close(&mut self) -> Option<Event> {
        let previous = self.active.take()?;
        info!(tool = ?previous.tool(), "closed tool");
        Some(Event::ToolClosed {
            tool: previous.tool(),
            at: Utc::now(),
        })
    }

    /// Next tool in display order. No-op on the home screen or at the end.
    pub fn next(&mut self) -> Result<Option<Event>, ValidationError> {
        let Some(current) = self.active_tool() else {
            return Ok(None);
        };
        match Tool::ALL.get(current.index() + 1) {
            Some(next) => self.open(*next).map(Some),
            None => Ok(None),
        }
    }

    /// Previous tool in display order. No-op on the home screen or at the start.
    pub fn prev(&mut self) -> Result<Option<Event>, ValidationError> {
        let Some(current) = self.active_tool() else {
            return Ok(None);
        };
        match current.index().checked_sub(1) {
            Some(i) => self.open(Tool::ALL[i]).map(Some),
            None => Ok(None),
        }
    }

    /// `(n, of)` for the `n / of` indicator, 1-based.
    pub fn position(&self) -> Option<(usize, usize)> {
        self.active_tool().map(|t| (t.index() + 1, Tool::ALL.len()))
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(SessionBudget::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_home() {
        let nav = Navigator::default();
        assert!(nav.is_home());
        assert_eq!(nav.position(), None);
    }

    #[test]
    fn panic_opens_breathing() {
        let mut nav = Navigator::default();
        nav.panic().unwrap();
        assert_eq!(nav.active_tool(), Some(Tool::Breathing));
        assert_eq!(nav.position(), Some((1, 5)));
    }

    #[test]
    fn next_and_prev_do_not_wrap() {
        let mut nav = Navigator::default();
        nav.open(Tool::BodyReset).unwrap();
        assert!(nav.next().unwrap().is_none());
        assert_eq!(nav.active_tool(), Some(Tool::BodyReset));

        nav.prev().unwrap();
        assert_eq!(nav.active_tool(), Some(Tool::Prompts));

        nav.open(Tool::Breathing).unwrap();
        assert!(nav.prev().unwrap().is_none());
        nav.next().unwrap();
        assert_eq!(nav.active_tool(), Some(Tool::Grounding));
    }

    #[test]
    fn navigation_discards_state() {
        let mut nav = Navigator::new(SessionBudget::OneMinute);
        nav.open(Tool::Breathing).unwrap();
        if let Some(ActiveTool::Breathing(ex)) = nav.active_mut() {
            ex.play();
            ex.tick(10.0);
        }
        nav.next().unwrap();
        nav.prev().unwrap();
        match nav.active() {
            Some(ActiveTool::Breathing(ex)) => {
                assert_eq!(ex.timer().total_elapsed(), std::time::Duration::ZERO);
                assert_eq!(ex.budget(), SessionBudget::OneMinute);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn close_returns_home() {
        let mut nav = Navigator::default();
        assert!(nav.close().is_none());
        nav.open(Tool::Dump).unwrap();
        assert!(matches!(nav.close(), Some(Event::ToolClosed { tool: Tool::Dump, .. })));
        assert!(nav.is_home());
        assert!(nav.next().unwrap().is_none());
    }

    #[test]
    fn tool_ids_match_display_order() {
        let ids: Vec<String> = Tool::ALL
            .iter()
            .map(|t| serde_json::to_value(t).unwrap().as_str().unwrap().to_string())
            .collect();
        assert_eq!(ids, vec!["breathing", "grounding", "dump", "prompts", "bodyreset"]);
    }
}
