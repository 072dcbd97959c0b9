mod engine;
mod phase;
mod ticker;

pub use engine::{PhaseTimer, TimerMode, TimerSnapshot, TimerStatus};
pub use phase::{PhaseLocation, PhaseSpec, PhaseTable};
pub use ticker::{drive, until_signal, DriveOutcome, TickSchedule, DEFAULT_TICK};
