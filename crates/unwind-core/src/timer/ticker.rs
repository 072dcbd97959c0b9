//! Scoped tick schedule.
//!
//! A [`TickSchedule`] is the periodic clock callback of a running exercise.
//! It is acquired when a timer enters `Running` and the spawned interval task
//! is aborted as soon as the schedule is dropped, so a discarded exercise can
//! never be updated by an orphaned callback.

use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, warn};

use super::engine::PhaseTimer;
use crate::events::Event;

/// Default clock period used by the exercises.
pub const DEFAULT_TICK: Duration = Duration::from_millis(50);

/// A running periodic clock. Dropping it releases the clock.
#[derive(Debug)]
pub struct TickSchedule {
    rx: mpsc::Receiver<Duration>,
    handle: JoinHandle<()>,
}

impl TickSchedule {
    /// Spawn the interval task. Must be called inside a tokio runtime.
    pub fn start(period: Duration) -> Self {
        let (tx, rx) = mpsc::channel(16);
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately.
            interval.tick().await;
            let mut last = Instant::now();
            loop {
                interval.tick().await;
                let now = Instant::now();
                if tx.send(now - last).await.is_err() {
                    break;
                }
                last = now;
            }
        });
        debug!(period_ms = period.as_millis() as u64, "tick schedule acquired");
        Self { rx, handle }
    }

    /// Wait for the next tick and return the wall-clock time since the
    /// previous one.
    pub async fn next(&mut self) -> Option<Duration> {
        self.rx.recv().await
    }

    /// Release the schedule explicitly.
    pub fn cancel(self) {}
}

impl Drop for TickSchedule {
    fn drop(&mut self) {
        self.handle.abort();
        debug!("tick schedule released");
    }
}

/// Why [`drive`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveOutcome {
    /// The timer reached its terminal state.
    Completed,
    /// The cancel future resolved first; the timer was paused.
    Cancelled,
    /// The timer left `Running` some other way (paused from a frame callback,
    /// or it was never started).
    Stopped,
}

/// Feed `timer` from a tick schedule until it completes, stops running, or
/// `cancel` resolves.
///
/// `speed` scales every measured delta; non-positive or non-finite values
/// fall back to real time. `on_frame` runs after every tick with the events
/// that tick produced and may pause or reset the timer.
pub async fn drive<C, F>(
    timer: &mut PhaseTimer,
    period: Duration,
    speed: f64,
    cancel: C,
    mut on_frame: F,
) -> DriveOutcome
where
    C: Future<Output = ()>,
    F: FnMut(&mut PhaseTimer, &[Event]),
{
    if timer.is_complete() {
        return DriveOutcome::Completed;
    }
    if !timer.is_active() {
        return DriveOutcome::Stopped;
    }

    let speed = if speed.is_finite() && speed > 0.0 {
        speed
    } else {
        warn!(speed, "invalid speed, using real time");
        1.0
    };

    let mut schedule = TickSchedule::start(period);
    tokio::pin!(cancel);

    loop {
        tokio::select! {
            _ = &mut cancel => {
                timer.pause();
                return DriveOutcome::Cancelled;
            }
            delta = schedule.next() => {
                let Some(delta) = delta else {
                    return DriveOutcome::Stopped;
                };
                let scaled = Duration::try_from_secs_f64(delta.as_secs_f64() * speed)
                    .unwrap_or(Duration::MAX);
                let events = timer.tick_duration(scaled);
                on_frame(timer, &events);
                if timer.is_complete() {
                    return DriveOutcome::Completed;
                }
                if !timer.is_active() {
                    return DriveOutcome::Stopped;
                }
            }
        }
    }
}

/// Turn a fallible signal future into a cancel future for [`drive`].
///
/// Resolves when `signal` succeeds. If the signal cannot be listened for, the
/// error is logged and the returned future never resolves.
pub async fn until_signal<F, E>(signal: F)
where
    F: Future<Output = Result<(), E>>,
    E: std::fmt::Display,
{
    if let Err(e) = signal.await {
        warn!(error = %e, "signal handler unavailable, run cannot be interrupted");
        std::future::pending::<()>().await;
    }
}
