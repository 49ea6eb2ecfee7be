use flee_core::{run_cycle, Control, CycleStatus, Task, TaskController, TaskOutcome};

#[derive(Default)]
struct Log {
    phases: Vec<&'static str>,
}

/// Scripted task: records phases and signals whatever it was told to.
struct Scripted {
    eligible: bool,
    signals: Vec<TaskOutcome>,
}

impl Scripted {
    fn new(eligible: bool, signals: Vec<TaskOutcome>) -> Self {
        Self { eligible, signals }
    }
}

impl Task<Log> for Scripted {
    fn name(&self) -> &str {
        "scripted"
    }

    fn start(&mut self, log: &mut Log) {
        log.phases.push("start");
    }

    fn check_conditions(&self, _log: &Log) -> bool {
        self.eligible
    }

    fn do_action(&mut self, log: &mut Log, control: &mut dyn Control) {
        log.phases.push("action");
        for signal in &self.signals {
            match signal {
                TaskOutcome::Success => control.finish_with_success(),
                TaskOutcome::Failure => control.finish_with_failure(),
            }
        }
    }

    fn end(&mut self, log: &mut Log) {
        log.phases.push("end");
    }
}

#[test]
fn phases_run_in_order_and_success_is_reported() {
    let mut log = Log::default();
    let mut task = Scripted::new(true, vec![TaskOutcome::Success]);

    let status = run_cycle(&mut task, &mut log);

    assert_eq!(status, CycleStatus::Finished(TaskOutcome::Success));
    assert_eq!(log.phases, vec!["start", "action", "end"]);
}

#[test]
fn failed_conditions_skip_the_action_but_still_end() {
    let mut log = Log::default();
    let mut task = Scripted::new(false, vec![TaskOutcome::Success]);

    let status = run_cycle(&mut task, &mut log);

    assert_eq!(status, CycleStatus::Skipped);
    assert_eq!(status.outcome(), TaskOutcome::Failure);
    assert_eq!(log.phases, vec!["start", "end"]);
}

#[test]
fn missing_signal_is_unresolved_failure() {
    let mut log = Log::default();
    let mut task = Scripted::new(true, Vec::new());

    let status = run_cycle(&mut task, &mut log);

    assert_eq!(status, CycleStatus::Unresolved);
    assert_eq!(status.outcome(), TaskOutcome::Failure);
    assert_eq!(log.phases, vec!["start", "action", "end"]);
}

#[test]
fn only_the_first_signal_counts() {
    let mut log = Log::default();
    let mut task = Scripted::new(true, vec![TaskOutcome::Failure, TaskOutcome::Success]);

    assert_eq!(
        run_cycle(&mut task, &mut log),
        CycleStatus::Finished(TaskOutcome::Failure)
    );
}

#[test]
fn controller_counts_dropped_signals_until_reset() {
    let mut control = TaskController::new();
    assert!(!control.is_finished());

    control.finish_with_success();
    control.finish_with_failure();
    control.finish_with_failure();

    assert_eq!(control.outcome(), Some(TaskOutcome::Success));
    assert_eq!(control.dropped_signals(), 2);

    control.reset();
    assert_eq!(control.outcome(), None);
    assert_eq!(control.dropped_signals(), 0);
}

#[test]
fn task_is_reusable_across_cycles() {
    let mut log = Log::default();
    let mut task = Scripted::new(true, vec![TaskOutcome::Success]);

    for _ in 0..3 {
        assert_eq!(
            run_cycle(&mut task, &mut log).outcome(),
            TaskOutcome::Success
        );
    }
    assert_eq!(log.phases.len(), 9);
}
