//! Integration tests for the exercises driven through the navigator.

use std::time::Duration;

use chrono::NaiveDate;
use unwind_core::timer::{drive, DriveOutcome, DEFAULT_TICK};
use unwind_core::{ActiveTool, Event, Navigator, SessionBudget, TimerStatus, Tool};

#[test]
fn breathing_session_scenario() {
    let mut nav = Navigator::new(SessionBudget::TwoMinutes);
    nav.panic().unwrap();

    let Some(ActiveTool::Breathing(ex)) = nav.active_mut() else {
        panic!("breathing should be open");
    };
    ex.play();

    let mut cycle_events = 0;
    let mut completed = 0;
    // 126 s of 50 ms ticks.
    for _ in 0..2520 {
        for event in ex.tick(0.05) {
            match event {
                Event::CycleCompleted { .. } => cycle_events += 1,
                Event::TimerCompleted { .. } => completed += 1,
                _ => {}
            }
        }
    }

    let timer = ex.timer();
    assert!(timer.is_complete());
    assert_eq!(timer.total_elapsed(), Duration::from_secs(120));
    assert_eq!(timer.cycles_completed(), 8);
    assert_eq!(cycle_events, 8);
    assert_eq!(completed, 1);
    assert_eq!(ex.remaining_clock(), "0:00");
    assert_eq!(ex.completion_summary().as_deref(), Some("8 cycles"));
}

#[test]
fn body_reset_scenario() {
    let mut nav = Navigator::default();
    nav.open(Tool::BodyReset).unwrap();
    let Some(ActiveTool::BodyReset(reset)) = nav.active_mut() else {
        panic!("body reset should be open");
    };

    reset.toggle();
    for _ in 0..800 {
        reset.tick(0.05);
    }
    let snap = reset.snapshot();
    assert_eq!(snap.phase_index, 2);
    assert_eq!(snap.phase_label, "Belly breathing");
    assert!((snap.elapsed_secs - 40.0).abs() < 1e-9);
    assert_eq!(snap.seconds_remaining, 50);

    reset.toggle();
    assert_eq!(reset.timer().status(), TimerStatus::Paused);
    reset.tick(10.0);
    assert_eq!(reset.snapshot().seconds_remaining, 50);
}

#[test]
fn grounding_walkthrough() {
    let mut nav = Navigator::default();
    nav.open(Tool::Grounding).unwrap();
    let Some(ActiveTool::Grounding(seq)) = nav.active_mut() else {
        panic!("grounding should be open");
    };

    let answers = ["lamp, mug, window, desk, plant", "", "fan", "", "mint"];
    let mut finished = false;
    for answer in answers {
        if let Some(Event::SequenceFinished { answered, .. }) = seq.advance(Some(answer)) {
            assert_eq!(answered, 3);
            finished = true;
        }
    }
    assert!(finished);
    assert!(seq.is_finished());
    assert_eq!(seq.completed_steps().len(), 5);

    let summary = seq.summary();
    assert_eq!(summary[1].1, "---");
    assert_eq!(summary[4], ("1 thing you can taste".to_string(), "mint".to_string()));
}

#[test]
fn thought_dump_export() {
    let dir = tempfile::tempdir().unwrap();
    let mut nav = Navigator::default();
    nav.open(Tool::Dump).unwrap();
    let Some(ActiveTool::Dump(dump)) = nav.active_mut() else {
        panic!("dump should be open");
    };

    dump.set_text("the deadline is moving again\n");
    let date = NaiveDate::from_ymd_opt(2025, 11, 2).unwrap();
    let (path, event) = dump.save_to(dir.path(), date).unwrap().unwrap();
    assert!(path.ends_with("thought-2025-11-02.txt"));
    assert!(matches!(event, Event::ThoughtSaved { bytes: 29, .. }));
    assert_eq!(
        std::fs::read_to_string(path).unwrap(),
        "the deadline is moving again\n"
    );
    assert!(dump.release().is_some());
    assert!(!dump.can_submit());
}

#[test]
fn seeded_prompts_are_reproducible_through_navigation() {
    let mut a = Navigator::default().with_prompt_seed(Some(11));
    let mut b = Navigator::default().with_prompt_seed(Some(11));
    a.open(Tool::Prompts).unwrap();
    b.open(Tool::Prompts).unwrap();
    match (a.active(), b.active()) {
        (Some(ActiveTool::Prompts(x)), Some(ActiveTool::Prompts(y))) => {
            assert_eq!(x.current(), y.current());
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn driven_breathing_session_completes() {
    let mut nav = Navigator::new(SessionBudget::OneMinute);
    nav.open(Tool::Breathing).unwrap();
    let Some(ActiveTool::Breathing(ex)) = nav.active_mut() else {
        panic!("breathing should be open");
    };
    ex.play();

    let mut labels = Vec::new();
    let outcome = drive(
        ex.timer_mut(),
        DEFAULT_TICK,
        1.0,
        std::future::pending(),
        |_, events| {
            for event in events {
                if let Event::PhaseChanged { phase_name, .. } = event {
                    labels.push(phase_name.clone());
                }
            }
        },
    )
    .await;

    assert_eq!(outcome, DriveOutcome::Completed);
    assert_eq!(ex.timer().total_elapsed(), Duration::from_secs(60));
    assert_eq!(ex.timer().cycles_completed(), 4);
    assert_eq!(&labels[..4], ["hold", "exhale", "rest", "inhale"]);
}
