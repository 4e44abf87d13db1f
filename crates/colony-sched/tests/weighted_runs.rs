use std::sync::atomic::Ordering;

use colony_core::{ProcessId, StateId};
use colony_processes::{Divide, UniformBiomassGrowth};
use colony_layer::CellLayer;
use colony_sched::{
    GillespieChooser, GillespieState, HaltCondition, Process, Scheduler, SchedulerConfig,
    UniformSource,
};
use colony_space::BoundaryKind;
use colony_test_utils::fixtures::{line, ConstProcess, CountingCheck, FailingProcess};
use colony_test_utils::{FixedDraws, MockAgent};

fn empty_layer() -> CellLayer<MockAgent> {
    CellLayer::new(line(4, BoundaryKind::Arena))
}

fn config(seed: u64, max_steps: u64) -> SchedulerConfig {
    SchedulerConfig {
        seed,
        max_steps: Some(max_steps),
        max_time: None,
    }
}

// ── Selection ──────────────────────────────────────────────────────

#[test]
fn scripted_draws_walk_the_weight_layout() {
    let mut gs = GillespieState::new();
    gs.add(ProcessId(2), 1, 3.0).unwrap();
    gs.add(ProcessId(1), 1, 1.0).unwrap();
    let chooser = GillespieChooser::new(&gs).unwrap();

    // Ascending ids: process 1 owns [0, 1), process 2 owns [1, 4).
    let mut draws = FixedDraws::new([0.0, 0.2, 0.25, 0.99]);
    let picked: Vec<_> = (0..4)
        .map(|_| {
            let x = draws.next_below(chooser.total_weight());
            chooser.select_target(x).unwrap()
        })
        .collect();
    assert_eq!(
        picked,
        vec![ProcessId(1), ProcessId(1), ProcessId(2), ProcessId(2)]
    );
}

#[test]
fn selection_frequency_follows_weight() {
    let light = ConstProcess::new(1, 1.0);
    let heavy = ConstProcess::new(2, 3.0);
    let light_fired = light.fired_counter();
    let heavy_fired = heavy.fired_counter();
    let processes: Vec<Box<dyn Process<MockAgent>>> = vec![Box::new(light), Box::new(heavy)];
    let mut scheduler = Scheduler::new(config(11, 4_000), processes).unwrap();

    let halt = scheduler.run(&mut empty_layer());
    assert_eq!(halt, HaltCondition::StepLimit { frame: 4_000 });

    let light = light_fired.load(Ordering::Relaxed);
    let heavy = heavy_fired.load(Ordering::Relaxed);
    assert_eq!(light + heavy, 4_000);
    let share = heavy as f64 / 4_000.0;
    assert!((share - 0.75).abs() < 0.04, "heavy share {share}");
}

#[test]
fn mean_waiting_time_is_inverse_total_weight() {
    let processes: Vec<Box<dyn Process<MockAgent>>> = vec![Box::new(ConstProcess::new(0, 4.0))];
    let mut scheduler = Scheduler::new(config(3, 5_000), processes).unwrap();
    scheduler.run(&mut empty_layer());
    let mean = scheduler.time() / 5_000.0;
    assert!((mean - 0.25).abs() < 0.02, "mean wait {mean}");
}

// ── Every-step processes ───────────────────────────────────────────

#[test]
fn checks_run_once_per_event() {
    let check = CountingCheck::new(9);
    let runs = check.runs_counter();
    let processes: Vec<Box<dyn Process<MockAgent>>> =
        vec![Box::new(ConstProcess::new(0, 1.0)), Box::new(check)];
    let mut scheduler = Scheduler::new(config(0, 25), processes).unwrap();
    scheduler.run(&mut empty_layer());
    assert_eq!(runs.load(Ordering::Relaxed), 25);
}

#[test]
fn stall_still_runs_checks() {
    let check = CountingCheck::new(9);
    let runs = check.runs_counter();
    let processes: Vec<Box<dyn Process<MockAgent>>> =
        vec![Box::new(ConstProcess::new(0, 0.0)), Box::new(check)];
    let mut scheduler = Scheduler::new(SchedulerConfig::default(), processes).unwrap();
    assert_eq!(
        scheduler.run(&mut empty_layer()),
        HaltCondition::Stalled {
            time: 0.0,
            frame: 0
        }
    );
    assert_eq!(runs.load(Ordering::Relaxed), 1);
}

#[test]
fn growth_that_enables_division_does_not_stall() {
    let mut layer = CellLayer::new(line(5, BoundaryKind::Arena));
    let center = layer.geometry().center();
    layer.place(MockAgent::new(StateId(1), 0.5), &center).unwrap();
    let processes: Vec<Box<dyn Process<MockAgent>>> = vec![
        Box::new(Divide::new(ProcessId(0), 1.0)),
        Box::new(UniformBiomassGrowth::new(ProcessId(1), 0.5)),
    ];
    let mut scheduler = Scheduler::new(config(3, 10), processes).unwrap();

    // Nothing is divisible until growth has run once; that growth must
    // lead straight into a division rather than a stall.
    let report = scheduler.step(&mut layer).unwrap();
    assert_eq!(report.fired, ProcessId(0));
    assert_eq!(scheduler.frame(), 1);
    assert!(scheduler.time() > 0.0);
    assert_eq!(layer.occupied_count(), 2);
}

// ── Limits and faults ──────────────────────────────────────────────

#[test]
fn time_limit_stops_after_crossing() {
    let processes: Vec<Box<dyn Process<MockAgent>>> = vec![Box::new(ConstProcess::new(0, 2.0))];
    let mut scheduler = Scheduler::new(
        SchedulerConfig {
            max_time: Some(5.0),
            ..SchedulerConfig::default()
        },
        processes,
    )
    .unwrap();
    match scheduler.run(&mut empty_layer()) {
        HaltCondition::TimeLimit { time } => assert!(time >= 5.0),
        other => panic!("expected time limit, got {other:?}"),
    }
}

#[test]
fn process_fault_aborts_the_run() {
    let processes: Vec<Box<dyn Process<MockAgent>>> = vec![Box::new(FailingProcess::new(0, 3))];
    let mut scheduler = Scheduler::new(config(0, 100), processes).unwrap();
    let halt = scheduler.run(&mut empty_layer());
    assert!(halt.is_fault());
    assert!(matches!(halt, HaltCondition::Layer(_)));
    // Three successful events; the failing fourth does not advance the clock.
    assert_eq!(scheduler.frame(), 3);
}
