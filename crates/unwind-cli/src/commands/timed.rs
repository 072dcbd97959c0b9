use std::time::Duration;

use clap::Args;
use unwind_core::exercises::format_clock;
use unwind_core::timer::{drive, until_signal, DriveOutcome};
use unwind_core::{ActiveTool, Config, Event, Navigator, PhaseTimer, SessionBudget, Tool};

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Play back faster than real time (e.g. 10 = ten times faster)
    #[arg(long, default_value = "1.0")]
    pub speed: f64,
    /// Print events and the final state as JSON lines
    #[arg(long)]
    pub json: bool,
}

pub fn breathe(duration: Option<u64>, args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let budget = match duration {
        Some(secs) => SessionBudget::from_secs(secs)?,
        None => config.session_budget(),
    };

    let mut nav = Navigator::new(budget);
    nav.panic()?;
    let Some(ActiveTool::Breathing(exercise)) = nav.active_mut() else {
        return Err("breathing exercise did not open".into());
    };

    if !args.json {
        println!("{} ({})", Tool::Breathing.title(), budget.label());
        println!(
            "[{}] {}",
            exercise.remaining_clock(),
            exercise.timer().current_spec().label
        );
    }
    emit(args.json, exercise.play())?;
    let outcome = run_timer(exercise.timer_mut(), config.tick_interval(), &args)?;

    if args.json {
        println!("{}", serde_json::to_string(&exercise.snapshot())?);
    } else if outcome == DriveOutcome::Completed {
        println!(
            "Done. {}",
            exercise.completion_summary().unwrap_or_default()
        );
    } else {
        println!("Stopped with {} left.", exercise.remaining_clock());
    }
    nav.close();
    Ok(())
}

pub fn body_reset(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let mut nav = Navigator::new(config.session_budget());
    nav.open(Tool::BodyReset)?;
    let Some(ActiveTool::BodyReset(reset)) = nav.active_mut() else {
        return Err("body reset did not open".into());
    };

    if !args.json {
        println!("{}", Tool::BodyReset.title());
        let snap = reset.snapshot();
        println!("  {}: {}", snap.phase_label, snap.instruction);
    }
    emit(args.json, reset.toggle())?;
    let outcome = run_timer(reset.timer_mut(), config.tick_interval(), &args)?;

    if args.json {
        println!("{}", serde_json::to_string(&reset.snapshot())?);
    } else if outcome == DriveOutcome::Completed {
        println!("{}", unwind_core::exercises::body_reset::COMPLETE_TITLE);
        println!("{}", unwind_core::exercises::body_reset::COMPLETE_MESSAGE);
    } else {
        println!("Stopped with {} seconds left.", reset.timer().seconds_remaining());
    }
    nav.close();
    Ok(())
}

/// Drive a running timer on a fresh current-thread runtime until it
/// completes or Ctrl-C is pressed.
fn run_timer(
    timer: &mut PhaseTimer,
    period: Duration,
    args: &RunArgs,
) -> Result<DriveOutcome, Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let json = args.json;
    let mut write_error = None;
    let outcome = runtime.block_on(drive(
        timer,
        period,
        args.speed,
        until_signal(tokio::signal::ctrl_c()),
        |timer, events| {
            for event in events {
                if let Err(e) = render(json, timer, event) {
                    write_error.get_or_insert(e);
                }
            }
        },
    ));

    if let Some(e) = write_error {
        return Err(e);
    }
    tracing::debug!(?outcome, "timer run finished");
    Ok(outcome)
}

fn emit(json: bool, event: Option<Event>) -> Result<(), Box<dyn std::error::Error>> {
    if let (true, Some(event)) = (json, event) {
        println!("{}", serde_json::to_string(&event)?);
    }
    Ok(())
}

fn render(
    json: bool,
    timer: &PhaseTimer,
    event: &Event,
) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string(event)?);
        return Ok(());
    }
    match event {
        Event::PhaseChanged { phase_label, .. } if !timer.is_complete() => {
            let spec = timer.current_spec();
            let clock = format_clock(timer.seconds_remaining());
            if spec.instruction.is_empty() {
                println!("[{clock}] {phase_label}");
            } else {
                println!("[{clock}] {phase_label}: {}", spec.instruction);
            }
        }
        Event::CycleCompleted { cycles_completed, .. } => {
            tracing::info!(cycles_completed, "cycle");
        }
        _ => {}
    }
    Ok(())
}
