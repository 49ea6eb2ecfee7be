use tracing::{debug, warn};

/// Terminal result of one task invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    Success,
    Failure,
}

impl TaskOutcome {
    pub fn is_success(self) -> bool {
        matches!(self, TaskOutcome::Success)
    }
}

/// Completion channel handed to [`Task::do_action`].
pub trait Control {
    fn finish_with_success(&mut self);
    fn finish_with_failure(&mut self);
}

/// A leaf task with the four-phase lifecycle.
///
/// The owning controller calls `start`, then `check_conditions`; only when that returns `true`
/// does it call `do_action`, which must report exactly one terminal signal on `control`.
/// `end` always runs last. A task instance is reused across cycles.
pub trait Task<B> {
    /// Name used in diagnostics.
    fn name(&self) -> &str;

    fn start(&mut self, _blackboard: &mut B) {}

    fn check_conditions(&self, blackboard: &B) -> bool;

    fn do_action(&mut self, blackboard: &mut B, control: &mut dyn Control);

    fn end(&mut self, _blackboard: &mut B) {}
}

/// Records the terminal signal of a single cycle.
///
/// Only the first signal counts; later ones are dropped and logged.
#[derive(Debug, Default)]
pub struct TaskController {
    outcome: Option<TaskOutcome>,
    dropped_signals: u32,
}

impl TaskController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn outcome(&self) -> Option<TaskOutcome> {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// Signals received after the first one in the current cycle.
    pub fn dropped_signals(&self) -> u32 {
        self.dropped_signals
    }

    pub fn reset(&mut self) {
        self.outcome = None;
        self.dropped_signals = 0;
    }

    fn finish(&mut self, outcome: TaskOutcome) {
        if let Some(first) = self.outcome {
            warn!(
                ?first,
                ignored = ?outcome,
                "task signalled completion more than once"
            );
            self.dropped_signals = self.dropped_signals.saturating_add(1);
            return;
        }
        self.outcome = Some(outcome);
    }
}

impl Control for TaskController {
    fn finish_with_success(&mut self) {
        self.finish(TaskOutcome::Success);
    }

    fn finish_with_failure(&mut self) {
        self.finish(TaskOutcome::Failure);
    }
}

/// How a lifecycle cycle resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleStatus {
    /// `check_conditions` returned `false`; `do_action` never ran.
    Skipped,
    /// `do_action` reported this outcome.
    Finished(TaskOutcome),
    /// `do_action` returned without signalling.
    Unresolved,
}

impl CycleStatus {
    /// Collapse to a terminal outcome; anything but an explicit success is a failure.
    pub fn outcome(self) -> TaskOutcome {
        match self {
            CycleStatus::Finished(outcome) => outcome,
            CycleStatus::Skipped | CycleStatus::Unresolved => TaskOutcome::Failure,
        }
    }
}

/// Drive one decision cycle of `task` against `blackboard`.
pub fn run_cycle<B, T>(task: &mut T, blackboard: &mut B) -> CycleStatus
where
    T: Task<B> + ?Sized,
{
    debug!(task = task.name(), "starting");
    task.start(blackboard);

    debug!(task = task.name(), "checking conditions");
    let status = if task.check_conditions(blackboard) {
        let mut control = TaskController::new();
        debug!(task = task.name(), "doing action");
        task.do_action(blackboard, &mut control);
        match control.outcome() {
            Some(outcome) => CycleStatus::Finished(outcome),
            None => {
                warn!(task = task.name(), "action returned without a completion signal");
                CycleStatus::Unresolved
            }
        }
    } else {
        CycleStatus::Skipped
    };

    debug!(task = task.name(), ?status, "ending");
    task.end(blackboard);
    status
}
