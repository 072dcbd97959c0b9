//! # Unwind Core Library
//!
//! This library provides the state and logic behind Unwind's guided
//! self-regulation exercises. Every operation is available without a UI:
//! the bundled CLI is a thin rendering layer over the same types.
//!
//! ## Architecture
//!
//! - **Phase Timer**: a clock-agnostic state machine over an ordered phase
//!   table. The caller feeds it deltas through `tick()`; it runs once
//!   (body reset) or loops under a session length (breathing).
//! - **Tick Schedule**: a scoped periodic clock that is released as soon as
//!   the running exercise goes away.
//! - **Step Sequencer**: user-paced progression through the grounding prompts.
//! - **Navigation**: the home screen and the single open tool.
//! - **Storage**: TOML-based configuration.
//!
//! ## Key Components
//!
//! - [`PhaseTimer`]: Core timer state machine
//! - [`StepSequencer`]: Grounding sequence
//! - [`Navigator`]: Tool switching
//! - [`Config`]: Application configuration management

pub mod error;
pub mod events;
pub mod exercises;
pub mod navigation;
pub mod storage;
pub mod timer;

pub use error::{ConfigError, CoreError, ValidationError};
pub use events::Event;
pub use exercises::{
    BodyReset, BreathingExercise, ReframePrompts, SessionBudget, StepSequencer, ThoughtDump,
};
pub use navigation::{ActiveTool, Navigator, Tool};
pub use storage::Config;
pub use timer::{
    DriveOutcome, PhaseSpec, PhaseTable, PhaseTimer, TickSchedule, TimerMode, TimerSnapshot,
    TimerStatus,
};
