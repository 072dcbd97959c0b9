pub mod body_reset;
pub mod breathing;
pub mod grounding;
pub mod prompts;
pub mod thought_dump;

pub use body_reset::{body_reset_table, BodyReset, PhaseMarker};
pub use breathing::{breathing_table, circle_scale, format_clock, BreathingExercise, SessionBudget};
pub use grounding::{grounding_steps, GroundingStep, SequencerSnapshot, StepMarker, StepSequencer};
pub use prompts::{pick_random, ReframePrompts, REFRAME_PROMPTS};
pub use thought_dump::{export_file_name, ThoughtDump};
